use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::concept::ConceptId;
use crate::error::GraphError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RelationId(pub u64);

impl fmt::Display for RelationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for RelationId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(RelationId)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RelationKind {
    Keyword,
    Synonym,
    Antonym,
    Superset,
    Subset,
    Identical,
    Possessive,
    Union,
    Example,
}

impl RelationKind {
    pub fn all() -> &'static [RelationKind] {
        const ALL: &[RelationKind] = &[
            RelationKind::Keyword,
            RelationKind::Synonym,
            RelationKind::Antonym,
            RelationKind::Superset,
            RelationKind::Subset,
            RelationKind::Identical,
            RelationKind::Possessive,
            RelationKind::Union,
            RelationKind::Example,
        ];
        ALL
    }

    pub fn name(self) -> &'static str {
        match self {
            RelationKind::Keyword => "KEYWORD",
            RelationKind::Synonym => "SYNONYM",
            RelationKind::Antonym => "ANTONYM",
            RelationKind::Superset => "SUPERSET",
            RelationKind::Subset => "SUBSET",
            RelationKind::Identical => "IDENTICAL",
            RelationKind::Possessive => "POSSESSIVE",
            RelationKind::Union => "UNION",
            RelationKind::Example => "EXAMPLE",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            RelationKind::Keyword => "concept defined in code",
            RelationKind::Synonym => "similar to the targets",
            RelationKind::Antonym => "opposite of the targets",
            RelationKind::Superset => "more general form of the targets",
            RelationKind::Subset => "more specific form of the targets",
            RelationKind::Identical => "variant of the targets",
            RelationKind::Possessive => "owns the targets",
            RelationKind::Union => "defined as the union of the targets",
            RelationKind::Example => "what the targets have in common",
        }
    }

    /// UNION and EXAMPLE are the only kinds expanded during resolution.
    pub fn is_combinator(self) -> bool {
        matches!(self, RelationKind::Union | RelationKind::Example)
    }
}

impl fmt::Display for RelationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for RelationKind {
    type Err = GraphError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_uppercase();
        let candidate = match normalized.as_str() {
            "KEYWORD" => RelationKind::Keyword,
            "SYNONYM" => RelationKind::Synonym,
            "ANTONYM" => RelationKind::Antonym,
            "SUPERSET" => RelationKind::Superset,
            "SUBSET" => RelationKind::Subset,
            "IDENTICAL" => RelationKind::Identical,
            "POSSESSIVE" | "POSSESIVE" => RelationKind::Possessive,
            "UNION" => RelationKind::Union,
            "EXAMPLE" => RelationKind::Example,
            _ => return Err(GraphError::InvalidRelationKind(s.to_string())),
        };
        Ok(candidate)
    }
}

/// Directed edge from its owning concept to an ordered list of targets.
/// Targets may repeat and may dangle once a target concept is removed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relation {
    pub id: RelationId,
    pub kind: RelationKind,
    #[serde(default)]
    pub targets: Vec<ConceptId>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_union_and_example_are_combinators() {
        let combinators: Vec<_> = RelationKind::all()
            .iter()
            .filter(|kind| kind.is_combinator())
            .collect();
        assert_eq!(combinators, vec![&RelationKind::Union, &RelationKind::Example]);
    }

    #[test]
    fn parses_names_and_legacy_spelling() {
        assert_eq!("union".parse::<RelationKind>().unwrap(), RelationKind::Union);
        assert_eq!(
            "Possesive".parse::<RelationKind>().unwrap(),
            RelationKind::Possessive
        );
        for kind in RelationKind::all() {
            assert_eq!(kind.name().parse::<RelationKind>().unwrap(), *kind);
        }
        assert!(matches!(
            "hypernym".parse::<RelationKind>(),
            Err(GraphError::InvalidRelationKind(_))
        ));
    }

    #[test]
    fn relation_wire_format() {
        let relation = Relation {
            id: RelationId(10),
            kind: RelationKind::Superset,
            targets: vec![ConceptId(2), ConceptId(2)],
        };
        let json = serde_json::to_string(&relation).unwrap();
        assert_eq!(json, r#"{"id":10,"kind":"SUPERSET","targets":[2,2]}"#);
    }
}
