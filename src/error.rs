//! Typed errors raised by the concept store and the reasoning layer.

use thiserror::Error;

use crate::domain::{ConceptId, RelationId};

pub type GraphResult<T> = std::result::Result<T, GraphError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    #[error("concept introuvable: {0}")]
    ConceptNotFound(String),

    #[error("relation {relation} introuvable sur le concept {concept}")]
    RelationNotFound {
        concept: ConceptId,
        relation: RelationId,
    },

    /// A relation target did not resolve; nothing was created.
    #[error("concept inconnu dans la relation: {selector}")]
    UnknownConcept { selector: String },

    /// Segmentation stopped on words that match no concept.
    #[error("aucun concept ne correspond à la phrase '{remainder}'")]
    UnmatchedPhrase { remainder: String },

    #[error("type de concept inconnu: {0}")]
    InvalidConceptType(String),

    #[error("relation inconnue: {0}")]
    InvalidRelationKind(String),

    #[error("le nom du concept est vide après normalisation: '{0}'")]
    EmptyName(String),

    #[error("une relation doit viser au moins un concept")]
    EmptyRelation,

    #[error("instantané invalide: {0}")]
    InvalidSnapshot(String),
}

impl GraphError {
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            GraphError::ConceptNotFound(_) | GraphError::RelationNotFound { .. }
        )
    }
}
