use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::relation::{Relation, RelationId};
use crate::error::GraphError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConceptId(pub u64);

impl fmt::Display for ConceptId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ConceptId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(ConceptId)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConceptType {
    Noun,
    Verb,
    Adjective,
    Pronoun,
    #[default]
    Untyped,
}

impl ConceptType {
    pub fn as_str(self) -> &'static str {
        match self {
            ConceptType::Noun => "NOUN",
            ConceptType::Verb => "VERB",
            ConceptType::Adjective => "ADJECTIVE",
            ConceptType::Pronoun => "PRONOUN",
            ConceptType::Untyped => "UNTYPED",
        }
    }
}

impl fmt::Display for ConceptType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConceptType {
    type Err = GraphError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let candidate = match s.trim().to_uppercase().as_str() {
            "NOUN" => ConceptType::Noun,
            "VERB" => ConceptType::Verb,
            "ADJECTIVE" => ConceptType::Adjective,
            "PRONOUN" => ConceptType::Pronoun,
            "UNTYPED" => ConceptType::Untyped,
            _ => return Err(GraphError::InvalidConceptType(s.to_string())),
        };
        Ok(candidate)
    }
}

/// A named, typed node. The name is stored already normalized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Concept {
    pub id: ConceptId,
    pub name: String,
    #[serde(rename = "type", default)]
    pub concept_type: ConceptType,
    #[serde(default)]
    pub relations: Vec<Relation>,
}

impl Concept {
    pub(crate) fn new(id: ConceptId, name: String, concept_type: ConceptType) -> Self {
        Self {
            id,
            name,
            concept_type,
            relations: Vec::new(),
        }
    }

    pub fn relation(&self, id: RelationId) -> Option<&Relation> {
        self.relations.iter().find(|relation| relation.id == id)
    }

    pub fn combinators(&self) -> impl Iterator<Item = &Relation> {
        self.relations
            .iter()
            .filter(|relation| relation.kind.is_combinator())
    }
}

impl fmt::Display for Concept {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}) {}[{}]", self.id, self.name, self.concept_type)
    }
}
