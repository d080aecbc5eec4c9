mod query;
mod resolver;
mod segmenter;

pub use query::{ConceptSummary, RelationQueryService, RelationSummary, TargetLabel};
pub use resolver::{RelationResolver, ResolvedSet};
pub use segmenter::PhraseSegmenter;

use crate::domain::Concept;
use crate::error::GraphResult;
use crate::memory::ConceptStore;

/// Segments `phrase` against the store and resolves every matched concept,
/// returning the resolved concepts in id order.
pub fn describe_phrase<'a>(store: &'a ConceptStore, phrase: &str) -> GraphResult<Vec<&'a Concept>> {
    let matched = PhraseSegmenter::new(store).segment(phrase)?;
    let resolver = RelationResolver::new(store);
    let resolved = resolver.describe(&matched);
    Ok(resolver.materialize(&resolved))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ConceptId, ConceptType, RelationKind};
    use crate::error::GraphError;

    #[test]
    fn superset_is_not_expanded_when_describing() {
        let mut store = ConceptStore::new();
        store.create_concept("dog", ConceptType::Noun).unwrap();
        store.create_concept("animal", ConceptType::Noun).unwrap();
        store
            .add_relation(ConceptId(1), RelationKind::Superset, &["animal"])
            .unwrap();

        let described = describe_phrase(&store, "dog").unwrap();
        assert_eq!(described.len(), 1);
        assert_eq!(described[0].name, "dog");

        assert_eq!(
            describe_phrase(&store, "cat").unwrap_err(),
            GraphError::UnmatchedPhrase {
                remainder: "cat".into()
            }
        );
    }

    #[test]
    fn phrase_with_union_expands_to_members() {
        let mut store = ConceptStore::new();
        for name in ["red", "green", "colour", "light"] {
            store.create_concept(name, ConceptType::Adjective).unwrap();
        }
        store
            .add_relation(ConceptId(3), RelationKind::Union, &["red", "green"])
            .unwrap();

        let ids: Vec<_> = describe_phrase(&store, "colours light")
            .unwrap()
            .into_iter()
            .map(|concept| concept.id.0)
            .collect();
        assert_eq!(ids, vec![1, 2, 4]);
    }
}
