use std::fmt;

use serde::Serialize;

use crate::domain::{Concept, ConceptId, Relation, RelationId, RelationKind};
use crate::memory::ConceptStore;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TargetLabel {
    pub id: ConceptId,
    /// `None` when the target concept no longer exists.
    pub name: Option<String>,
}

impl fmt::Display for TargetLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => f.write_str(name),
            None => write!(f, "#{}", self.id),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RelationSummary {
    pub id: RelationId,
    pub kind: RelationKind,
    pub targets: Vec<TargetLabel>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ConceptSummary {
    pub concept: Concept,
    pub relations: Vec<RelationSummary>,
}

impl fmt::Display for ConceptSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.concept)?;
        for relation in &self.relations {
            let targets = relation
                .targets
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(" ");
            write!(
                f,
                "\n |-> {} of: {} (id={})",
                relation.kind, targets, relation.id
            )?;
        }
        Ok(())
    }
}

/// Read-only views over the store used by listings and the command shell.
pub struct RelationQueryService<'a> {
    store: &'a ConceptStore,
}

impl<'a> RelationQueryService<'a> {
    pub fn new(store: &'a ConceptStore) -> Self {
        Self { store }
    }

    pub fn listing(&self) -> Vec<ConceptSummary> {
        self.store
            .concepts()
            .map(|concept| self.summarize(concept))
            .collect()
    }

    pub fn summarize(&self, concept: &Concept) -> ConceptSummary {
        ConceptSummary {
            concept: concept.clone(),
            relations: concept
                .relations
                .iter()
                .map(|relation| self.summarize_relation(relation))
                .collect(),
        }
    }

    fn summarize_relation(&self, relation: &Relation) -> RelationSummary {
        RelationSummary {
            id: relation.id,
            kind: relation.kind,
            targets: relation
                .targets
                .iter()
                .map(|id| TargetLabel {
                    id: *id,
                    name: self.store.get(*id).map(|concept| concept.name.clone()),
                })
                .collect(),
        }
    }

    pub fn filter_by_kind(&self, selector: &str, kind: RelationKind) -> Vec<Relation> {
        let Some(concept) = self.store.find_concept(selector) else {
            return Vec::new();
        };
        concept
            .relations
            .iter()
            .filter(|relation| relation.kind == kind)
            .cloned()
            .collect()
    }

    /// Relations owned by other concepts that point at `id`.
    pub fn incoming(&self, id: ConceptId) -> Vec<(ConceptId, Relation)> {
        self.store
            .concepts()
            .flat_map(|owner| {
                owner
                    .relations
                    .iter()
                    .filter(move |relation| relation.targets.contains(&id))
                    .map(move |relation| (owner.id, relation.clone()))
            })
            .collect()
    }
}
