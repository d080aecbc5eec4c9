use std::collections::HashSet;

use tracing::debug;

use super::snapshot::Snapshot;
use crate::domain::{Concept, ConceptId, ConceptType, Relation, RelationId, RelationKind};
use crate::error::{GraphError, GraphResult};
use crate::utils::normalize_phrase;

/// Owns every concept and relation together with the two id counters.
///
/// Concepts are kept in insertion order: when several concepts share a
/// normalized name, lookups return the oldest one and the others are
/// shadowed (reachable by id only).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConceptStore {
    concepts: Vec<Concept>,
    max_concept_id: u64,
    max_relation_id: u64,
}

impl ConceptStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_snapshot(snapshot: Snapshot) -> GraphResult<Self> {
        let mut store = Self::new();
        store.restore(snapshot)?;
        Ok(store)
    }

    pub fn concepts(&self) -> impl Iterator<Item = &Concept> {
        self.concepts.iter()
    }

    pub fn len(&self) -> usize {
        self.concepts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.concepts.is_empty()
    }

    pub fn max_concept_id(&self) -> u64 {
        self.max_concept_id
    }

    pub fn max_relation_id(&self) -> u64 {
        self.max_relation_id
    }

    pub fn create_concept(&mut self, name: &str, concept_type: ConceptType) -> GraphResult<&Concept> {
        let normalized = normalize_phrase(name);
        if normalized.is_empty() {
            return Err(GraphError::EmptyName(name.to_string()));
        }
        if let Some(existing) = self.find_by_name(&normalized) {
            debug!(name = %normalized, shadowed_by = %existing.id, "message" = "nom de concept déjà utilisé");
        }

        self.max_concept_id += 1;
        let id = ConceptId(self.max_concept_id);
        debug!(%id, name = %normalized, concept_type = %concept_type, "message" = "concept créé");
        self.concepts.push(Concept::new(id, normalized, concept_type));
        Ok(&self.concepts[self.concepts.len() - 1])
    }

    pub fn get(&self, id: ConceptId) -> Option<&Concept> {
        self.concepts.iter().find(|concept| concept.id == id)
    }

    fn get_mut(&mut self, id: ConceptId) -> Option<&mut Concept> {
        self.concepts.iter_mut().find(|concept| concept.id == id)
    }

    /// Looks `selector` up by normalized name first (first match wins), then
    /// as a literal decimal id.
    pub fn find_concept(&self, selector: &str) -> Option<&Concept> {
        let normalized = normalize_phrase(selector);
        self.find_by_name(&normalized)
            .or_else(|| self.find_by_literal_id(selector))
    }

    /// Same lookup for text that is already normalized, so stems are never
    /// stemmed a second time.
    pub fn find_normalized(&self, normalized: &str) -> Option<&Concept> {
        self.find_by_name(normalized)
            .or_else(|| self.find_by_literal_id(normalized))
    }

    pub fn require(&self, selector: &str) -> GraphResult<&Concept> {
        self.find_concept(selector)
            .ok_or_else(|| GraphError::ConceptNotFound(selector.to_string()))
    }

    fn find_by_name(&self, normalized: &str) -> Option<&Concept> {
        if normalized.is_empty() {
            return None;
        }
        self.concepts.iter().find(|concept| concept.name == normalized)
    }

    fn find_by_literal_id(&self, selector: &str) -> Option<&Concept> {
        let id = selector.parse::<ConceptId>().ok()?;
        self.get(id)
    }

    /// Appends a relation to `owner`. Every selector must resolve; otherwise
    /// the owner is left exactly as it was.
    pub fn add_relation<S: AsRef<str>>(
        &mut self,
        owner: ConceptId,
        kind: RelationKind,
        selectors: &[S],
    ) -> GraphResult<&Relation> {
        if self.get(owner).is_none() {
            return Err(GraphError::ConceptNotFound(owner.to_string()));
        }
        if selectors.is_empty() {
            return Err(GraphError::EmptyRelation);
        }

        let targets = selectors
            .iter()
            .map(|selector| {
                let selector = selector.as_ref();
                self.find_concept(selector)
                    .map(|concept| concept.id)
                    .ok_or_else(|| GraphError::UnknownConcept {
                        selector: selector.to_string(),
                    })
            })
            .collect::<GraphResult<Vec<_>>>()?;

        self.max_relation_id += 1;
        let relation = Relation {
            id: RelationId(self.max_relation_id),
            kind,
            targets,
        };
        debug!(owner = %owner, relation = %relation.id, %kind, targets = ?relation.targets, "message" = "relation ajoutée");

        let concept = self
            .get_mut(owner)
            .ok_or_else(|| GraphError::ConceptNotFound(owner.to_string()))?;
        concept.relations.push(relation);
        let index = concept.relations.len() - 1;
        Ok(&concept.relations[index])
    }

    pub fn has_relation(&self, owner: ConceptId, kind: RelationKind, targets: &[ConceptId]) -> bool {
        self.get(owner).is_some_and(|concept| {
            concept
                .relations
                .iter()
                .any(|relation| relation.kind == kind && relation.targets == targets)
        })
    }

    pub fn remove_relation(&mut self, owner: ConceptId, relation: RelationId) -> GraphResult<Relation> {
        let concept = self
            .get_mut(owner)
            .ok_or_else(|| GraphError::ConceptNotFound(owner.to_string()))?;
        let index = concept
            .relations
            .iter()
            .position(|candidate| candidate.id == relation)
            .ok_or(GraphError::RelationNotFound {
                concept: owner,
                relation,
            })?;
        debug!(%owner, %relation, "message" = "relation supprimée");
        Ok(concept.relations.remove(index))
    }

    /// Removes the concept only. Relations elsewhere that target it keep the
    /// now dangling id.
    pub fn remove_concept(&mut self, id: ConceptId) -> GraphResult<Concept> {
        let index = self
            .concepts
            .iter()
            .position(|concept| concept.id == id)
            .ok_or_else(|| GraphError::ConceptNotFound(id.to_string()))?;
        debug!(%id, "message" = "concept supprimé");
        Ok(self.concepts.remove(index))
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::new(
            self.max_concept_id,
            self.max_relation_id,
            self.concepts.clone(),
        )
    }

    /// Replaces the whole store. The snapshot is validated before anything
    /// is touched, so a rejected snapshot leaves the current state intact.
    pub fn restore(&mut self, snapshot: Snapshot) -> GraphResult<()> {
        validate_snapshot(&snapshot)?;
        debug!(
            version = %snapshot.version,
            concepts = snapshot.concepts.len(),
            "message" = "instantané restauré"
        );
        *self = Self {
            concepts: snapshot.concepts,
            max_concept_id: snapshot.max_concept_id,
            max_relation_id: snapshot.max_relation_id,
        };
        Ok(())
    }
}

fn validate_snapshot(snapshot: &Snapshot) -> GraphResult<()> {
    let mut concept_ids = HashSet::new();
    let mut relation_ids = HashSet::new();
    for concept in &snapshot.concepts {
        if !concept_ids.insert(concept.id) {
            return Err(GraphError::InvalidSnapshot(format!(
                "identifiant de concept dupliqué: {}",
                concept.id
            )));
        }
        if concept.id.0 > snapshot.max_concept_id {
            return Err(GraphError::InvalidSnapshot(format!(
                "concept {} au-delà du compteur {}",
                concept.id, snapshot.max_concept_id
            )));
        }
        for relation in &concept.relations {
            if !relation_ids.insert(relation.id) {
                return Err(GraphError::InvalidSnapshot(format!(
                    "identifiant de relation dupliqué: {}",
                    relation.id
                )));
            }
            if relation.id.0 > snapshot.max_relation_id {
                return Err(GraphError::InvalidSnapshot(format!(
                    "relation {} au-delà du compteur {}",
                    relation.id, snapshot.max_relation_id
                )));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_with(names: &[&str]) -> ConceptStore {
        let mut store = ConceptStore::new();
        for name in names {
            store.create_concept(name, ConceptType::Noun).unwrap();
        }
        store
    }

    #[test]
    fn ids_are_allocated_from_one_and_never_reused() {
        let mut store = store_with(&["dog", "cat"]);
        assert_eq!(store.find_concept("dog").unwrap().id, ConceptId(1));
        assert_eq!(store.find_concept("cat").unwrap().id, ConceptId(2));

        store.remove_concept(ConceptId(2)).unwrap();
        let bird = store.create_concept("bird", ConceptType::Noun).unwrap();
        assert_eq!(bird.id, ConceptId(3));
        assert_eq!(store.max_concept_id(), 3);
    }

    #[test]
    fn names_are_stored_normalized() {
        let mut store = ConceptStore::new();
        let concept = store.create_concept("Running Dogs", ConceptType::Verb).unwrap();
        assert_eq!(concept.name, "run dog");
        assert!(concept.relations.is_empty());
        assert!(store.find_concept("running dog").is_some());
        assert!(store.find_concept("RUN DOGS").is_some());
    }

    #[test]
    fn empty_names_are_rejected() {
        let mut store = ConceptStore::new();
        assert_eq!(
            store.create_concept(" ?! ", ConceptType::Untyped),
            Err(GraphError::EmptyName(" ?! ".into()))
        );
        assert_eq!(store.max_concept_id(), 0);
    }

    #[test]
    fn lookup_prefers_names_then_falls_back_to_ids() {
        let mut store = store_with(&["dog"]);
        let numeric = store.create_concept("1", ConceptType::Untyped).unwrap().id;
        assert_eq!(numeric, ConceptId(2));

        // "1" is a registered name, so it shadows the id lookup.
        assert_eq!(store.find_concept("1").unwrap().id, ConceptId(2));
        assert_eq!(store.find_concept("2").unwrap().id, ConceptId(2));
        assert!(store.find_concept("7").is_none());
        assert!(matches!(store.require("wolf"), Err(GraphError::ConceptNotFound(_))));
    }

    #[test]
    fn duplicate_names_resolve_to_the_first_concept() {
        let mut store = store_with(&["bank", "banks"]);
        assert_eq!(store.len(), 2);
        assert_eq!(store.find_concept("bank").unwrap().id, ConceptId(1));
        assert_eq!(store.get(ConceptId(2)).unwrap().name, "bank");
    }

    #[test]
    fn add_relation_resolves_targets_in_order() {
        let mut store = store_with(&["dog", "animal", "pet"]);
        let relation = store
            .add_relation(ConceptId(1), RelationKind::Superset, &["animals", "3", "animal"])
            .unwrap()
            .clone();
        assert_eq!(relation.id, RelationId(1));
        assert_eq!(relation.targets, vec![ConceptId(2), ConceptId(3), ConceptId(2)]);

        let dog = store.get(ConceptId(1)).unwrap();
        assert_eq!(dog.relations, vec![relation]);
        assert!(store.has_relation(
            ConceptId(1),
            RelationKind::Superset,
            &[ConceptId(2), ConceptId(3), ConceptId(2)]
        ));
    }

    #[test]
    fn add_relation_is_all_or_nothing() {
        let mut store = store_with(&["dog", "animal"]);
        let err = store
            .add_relation(ConceptId(1), RelationKind::Union, &["animal", "unicorn"])
            .unwrap_err();
        assert_eq!(
            err,
            GraphError::UnknownConcept {
                selector: "unicorn".into()
            }
        );
        assert!(store.get(ConceptId(1)).unwrap().relations.is_empty());
        assert_eq!(store.max_relation_id(), 0);

        let empty: [&str; 0] = [];
        assert_eq!(
            store.add_relation(ConceptId(1), RelationKind::Union, &empty),
            Err(GraphError::EmptyRelation)
        );
        assert!(store
            .add_relation(ConceptId(9), RelationKind::Union, &["dog"])
            .unwrap_err()
            .is_not_found());
    }

    #[test]
    fn remove_relation_keeps_the_order_of_the_rest() {
        let mut store = store_with(&["dog", "animal", "pet", "wolf"]);
        for target in ["animal", "pet", "wolf"] {
            store
                .add_relation(ConceptId(1), RelationKind::Synonym, &[target])
                .unwrap();
        }
        let removed = store.remove_relation(ConceptId(1), RelationId(2)).unwrap();
        assert_eq!(removed.targets, vec![ConceptId(3)]);

        let remaining: Vec<_> = store
            .get(ConceptId(1))
            .unwrap()
            .relations
            .iter()
            .map(|relation| relation.id)
            .collect();
        assert_eq!(remaining, vec![RelationId(1), RelationId(3)]);
        assert_eq!(
            store.remove_relation(ConceptId(1), RelationId(2)),
            Err(GraphError::RelationNotFound {
                concept: ConceptId(1),
                relation: RelationId(2)
            })
        );
    }

    #[test]
    fn remove_concept_leaves_dangling_targets() {
        let mut store = store_with(&["dog", "animal", "pet"]);
        store
            .add_relation(ConceptId(1), RelationKind::Union, &["animal", "pet"])
            .unwrap();
        let removed = store.remove_concept(ConceptId(2)).unwrap();
        assert_eq!(removed.id, ConceptId(2));

        let names: Vec<_> = store.concepts().map(|concept| concept.name.as_str()).collect();
        assert_eq!(names, vec!["dog", "pet"]);
        assert_eq!(
            store.get(ConceptId(1)).unwrap().relations[0].targets,
            vec![ConceptId(2), ConceptId(3)]
        );
        assert!(store.remove_concept(ConceptId(2)).unwrap_err().is_not_found());
    }

    #[test]
    fn snapshot_round_trip_reproduces_the_graph() {
        let mut store = store_with(&["dog", "animal", "pet"]);
        store
            .add_relation(ConceptId(1), RelationKind::Example, &["pet", "animal", "pet"])
            .unwrap();
        store.remove_concept(ConceptId(3)).unwrap();

        let mut restored = ConceptStore::new();
        restored.restore(store.snapshot()).unwrap();
        assert_eq!(restored, store);
        assert_eq!(restored.max_concept_id(), 3);
        assert_eq!(restored.max_relation_id(), 1);
    }

    #[test]
    fn invalid_snapshot_leaves_store_untouched() {
        let mut store = store_with(&["dog"]);
        let before = store.clone();

        let mut snapshot = store_with(&["cat", "bird"]).snapshot();
        snapshot.max_concept_id = 1;
        let err = store.restore(snapshot).unwrap_err();
        assert!(matches!(err, GraphError::InvalidSnapshot(_)));
        assert_eq!(store, before);

        let mut duplicated = store_with(&["cat"]).snapshot();
        duplicated.concepts.push(duplicated.concepts[0].clone());
        assert!(store.restore(duplicated).is_err());
        assert_eq!(store, before);
    }
}
