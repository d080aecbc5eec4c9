use crate::domain::Concept;
use crate::error::{GraphError, GraphResult};
use crate::memory::ConceptStore;
use crate::utils::stem;

/// Greedy longest-prefix mapping of a phrase onto concept names.
///
/// The longest run of leading words that names a concept is consumed first;
/// there is no backtracking, so a phrase has exactly one segmentation for a
/// given store.
pub struct PhraseSegmenter<'a> {
    store: &'a ConceptStore,
}

impl<'a> PhraseSegmenter<'a> {
    pub fn new(store: &'a ConceptStore) -> Self {
        Self { store }
    }

    pub fn segment(&self, phrase: &str) -> GraphResult<Vec<&'a Concept>> {
        let words: Vec<(&str, String)> = phrase
            .split_whitespace()
            .map(|raw| (raw, stem(raw)))
            .filter(|(_, normalized)| !normalized.is_empty())
            .collect();

        let mut remaining = words.as_slice();
        let mut matched = Vec::new();
        while !remaining.is_empty() {
            let Some((concept, consumed)) = self.longest_prefix(remaining) else {
                let remainder = remaining
                    .iter()
                    .map(|(raw, _)| *raw)
                    .collect::<Vec<_>>()
                    .join(" ");
                return Err(GraphError::UnmatchedPhrase { remainder });
            };
            matched.push(concept);
            remaining = &remaining[consumed..];
        }
        Ok(matched)
    }

    fn longest_prefix(&self, words: &[(&str, String)]) -> Option<(&'a Concept, usize)> {
        (1..=words.len()).rev().find_map(|len| {
            let candidate = words[..len]
                .iter()
                .map(|(_, normalized)| normalized.as_str())
                .collect::<Vec<_>>()
                .join(" ");
            self.store
                .find_normalized(&candidate)
                .map(|concept| (concept, len))
        })
    }
}
