use std::path::PathBuf;
use std::sync::Arc;
use std::thread::sleep;
use std::time::{Duration, Instant};

use anyhow::Result;
use tracing::{debug, info, warn};

use super::client::{map_relationship, RelatedWordsSource};
use crate::domain::{ConceptId, ConceptType};
use crate::error::GraphError;
use crate::memory::{ConceptStore, SnapshotWriter};

#[derive(Debug, Clone)]
pub struct TrainingConfig {
    pub max_depth: usize,
    pub pause: Duration,
    pub snapshot_path: Option<PathBuf>,
}

impl TrainingConfig {
    pub fn new(max_depth: usize) -> Self {
        Self {
            max_depth,
            pause: Duration::from_millis(750),
            snapshot_path: None,
        }
    }

    pub fn with_pause(mut self, pause: Duration) -> Self {
        self.pause = pause;
        self
    }

    /// Persist the whole store to `path` after every relation added.
    pub fn with_snapshot_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.snapshot_path = Some(path.into());
        self
    }
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self::new(2)
    }
}

#[derive(Debug, Default)]
pub struct TrainingStats {
    pub concepts_created: usize,
    pub relations_added: usize,
    pub relations_skipped: usize,
    pub words_fetched: usize,
    pub elapsed: Duration,
}

/// Populates the store from an external word service using only the public
/// store primitives (find, create, relate).
pub struct Trainer {
    source: Arc<dyn RelatedWordsSource>,
    config: TrainingConfig,
}

impl Trainer {
    pub fn new(source: Arc<dyn RelatedWordsSource>, config: TrainingConfig) -> Self {
        Self { source, config }
    }

    pub fn config(&self) -> &TrainingConfig {
        &self.config
    }

    pub fn train(&self, store: &mut ConceptStore, word: &str) -> Result<TrainingStats> {
        self.train_with_depth(store, word, self.config.max_depth)
    }

    pub fn train_with_depth(
        &self,
        store: &mut ConceptStore,
        word: &str,
        max_depth: usize,
    ) -> Result<TrainingStats> {
        let start = Instant::now();
        let mut stats = TrainingStats::default();
        self.train_word(store, word, max_depth, &mut stats)?;
        stats.elapsed = start.elapsed();
        info!(
            word,
            concepts = stats.concepts_created,
            relations = stats.relations_added,
            skipped = stats.relations_skipped,
            fetched = stats.words_fetched,
            elapsed_ms = stats.elapsed.as_millis() as u64,
            "message" = "entraînement terminé"
        );
        Ok(stats)
    }

    fn train_word(
        &self,
        store: &mut ConceptStore,
        word: &str,
        depth: usize,
        stats: &mut TrainingStats,
    ) -> Result<()> {
        if depth == 0 {
            debug!(word, "message" = "profondeur maximale atteinte");
            return Ok(());
        }
        info!(word, depth, "message" = "entraînement sur le mot");

        let Some(base) = self.ensure_concept(store, word, stats)? else {
            return Ok(());
        };

        if !self.config.pause.is_zero() {
            sleep(self.config.pause);
        }
        let relationships = self.source.related_words(word)?;
        stats.words_fetched += 1;

        for relationship in relationships {
            let Some(kind) = map_relationship(&relationship.relationship_type) else {
                continue;
            };

            for related in &relationship.words {
                if store.find_concept(related).is_none() {
                    self.train_word(store, related, depth - 1, stats)?;
                }
                let Some(target) = store.find_concept(related).map(|concept| concept.id) else {
                    debug!(word, related = %related, "message" = "mot lié ignoré, profondeur épuisée");
                    stats.relations_skipped += 1;
                    continue;
                };
                if store.has_relation(base, kind, &[target]) {
                    continue;
                }

                store.add_relation(base, kind, &[related.as_str()])?;
                stats.relations_added += 1;
                debug!(word, related = %related, %kind, "message" = "relation apprise");
                self.persist(store)?;
            }
        }
        Ok(())
    }

    fn ensure_concept(
        &self,
        store: &mut ConceptStore,
        word: &str,
        stats: &mut TrainingStats,
    ) -> Result<Option<ConceptId>> {
        if let Some(concept) = store.find_concept(word) {
            return Ok(Some(concept.id));
        }
        match store.create_concept(word, ConceptType::Untyped) {
            Ok(concept) => {
                stats.concepts_created += 1;
                Ok(Some(concept.id))
            }
            Err(GraphError::EmptyName(_)) => {
                warn!(word, "message" = "mot sans contenu, ignoré");
                Ok(None)
            }
            Err(err) => Err(err.into()),
        }
    }

    fn persist(&self, store: &ConceptStore) -> Result<()> {
        if let Some(path) = &self.config.snapshot_path {
            SnapshotWriter::save_to_path(path, store)?;
        }
        Ok(())
    }
}
