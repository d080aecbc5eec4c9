pub mod domain;
pub mod error;
pub mod memory;
pub mod reasoning;
pub mod shell;
pub mod training;
pub mod utils;

pub use domain::{Concept, ConceptId, ConceptType, Relation, RelationId, RelationKind};
pub use error::{GraphError, GraphResult};
pub use memory::{ConceptStore, Snapshot, SnapshotLoader, SnapshotWriter};
pub use reasoning::{describe_phrase, PhraseSegmenter, RelationResolver};
