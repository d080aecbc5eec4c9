use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::Concept;

pub const SNAPSHOT_VERSION: &str = "v1";

/// Complete serializable state of a `ConceptStore`, relations inline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub version: String,
    pub max_concept_id: u64,
    pub max_relation_id: u64,
    #[serde(default)]
    pub concepts: Vec<Concept>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saved_at: Option<DateTime<Utc>>,
}

impl Snapshot {
    pub fn new(max_concept_id: u64, max_relation_id: u64, concepts: Vec<Concept>) -> Self {
        Self {
            version: SNAPSHOT_VERSION.to_string(),
            max_concept_id,
            max_relation_id,
            concepts,
            saved_at: Some(Utc::now()),
        }
    }
}

impl Default for Snapshot {
    fn default() -> Self {
        Self::new(0, 0, Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_is_read_but_not_checked() {
        let json = r#"{
            "version": "v0-legacy",
            "max_concept_id": 2,
            "max_relation_id": 10,
            "concepts": [
                {"id": 1, "name": "dog", "type": "NOUN",
                 "relations": [{"id": 10, "kind": "SUPERSET", "targets": [2]}]},
                {"id": 2, "name": "anim", "type": "NOUN"}
            ]
        }"#;
        let snapshot: Snapshot = serde_json::from_str(json).unwrap();
        assert_eq!(snapshot.version, "v0-legacy");
        assert_eq!(snapshot.concepts.len(), 2);
        assert!(snapshot.concepts[1].relations.is_empty());
        assert!(snapshot.saved_at.is_none());
    }
}
