mod concept;
mod relation;

pub use concept::{Concept, ConceptId, ConceptType};
pub use relation::{Relation, RelationId, RelationKind};
