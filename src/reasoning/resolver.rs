use std::collections::{BTreeSet, HashSet};

use tracing::trace;

use crate::domain::{Concept, ConceptId, Relation, RelationKind};
use crate::memory::ConceptStore;

pub type ResolvedSet = BTreeSet<ConceptId>;

/// Expands concepts through their UNION and EXAMPLE relations.
///
/// - UNION: union of the resolved targets.
/// - EXAMPLE: intersection of the resolved targets.
/// - every other kind is descriptive and never expanded.
///
/// A concept without combinator relations resolves to itself. A concept
/// with several combinator relations resolves to the union of what each one
/// yields. Missing target ids resolve to the empty set, and so does a
/// concept met again while it is still being resolved further up the chain,
/// which bounds the recursion on cyclic graphs.
pub struct RelationResolver<'a> {
    store: &'a ConceptStore,
}

impl<'a> RelationResolver<'a> {
    pub fn new(store: &'a ConceptStore) -> Self {
        Self { store }
    }

    pub fn resolve(&self, id: ConceptId) -> ResolvedSet {
        let mut in_progress = HashSet::new();
        self.resolve_id(id, &mut in_progress)
    }

    /// Union of `resolve` over every input concept.
    pub fn describe(&self, concepts: &[&Concept]) -> ResolvedSet {
        concepts
            .iter()
            .flat_map(|concept| self.resolve(concept.id))
            .collect()
    }

    /// Maps resolved ids back to concepts, in id order.
    pub fn materialize(&self, ids: &ResolvedSet) -> Vec<&'a Concept> {
        ids.iter().filter_map(|id| self.store.get(*id)).collect()
    }

    fn resolve_id(&self, id: ConceptId, in_progress: &mut HashSet<ConceptId>) -> ResolvedSet {
        let Some(concept) = self.store.get(id) else {
            trace!(%id, "message" = "cible absente, ensemble vide");
            return ResolvedSet::new();
        };
        if !in_progress.insert(id) {
            trace!(%id, "message" = "cycle détecté, ensemble vide");
            return ResolvedSet::new();
        }

        let mut combinators = concept.combinators().peekable();
        let resolved = if combinators.peek().is_none() {
            ResolvedSet::from([id])
        } else {
            combinators
                .flat_map(|relation| self.resolve_relation(relation, in_progress))
                .collect()
        };

        in_progress.remove(&id);
        resolved
    }

    fn resolve_relation(
        &self,
        relation: &Relation,
        in_progress: &mut HashSet<ConceptId>,
    ) -> ResolvedSet {
        let mut per_target = relation
            .targets
            .iter()
            .map(|target| self.resolve_id(*target, in_progress));

        match relation.kind {
            RelationKind::Union => per_target.flatten().collect(),
            RelationKind::Example => {
                let Some(first) = per_target.next() else {
                    return ResolvedSet::new();
                };
                per_target.fold(first, |common, next| {
                    common.intersection(&next).copied().collect()
                })
            }
            _ => ResolvedSet::new(),
        }
    }
}
