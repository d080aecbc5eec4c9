use super::snapshot::Snapshot;
use super::store::ConceptStore;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use tracing::info;

pub struct SnapshotLoader;

impl SnapshotLoader {
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Snapshot> {
        let path = path.as_ref();
        let data = fs::read_to_string(path)
            .with_context(|| format!("impossible de lire l'instantané depuis {:?}", path))?;
        let snapshot: Snapshot = serde_json::from_str(&data)
            .with_context(|| format!("JSON invalide pour l'instantané {:?}", path))?;
        info!(version = %snapshot.version, concepts = snapshot.concepts.len(), "message" = "instantané chargé");
        Ok(snapshot)
    }

    pub fn load_store(path: impl AsRef<Path>) -> Result<ConceptStore> {
        let path = path.as_ref();
        let snapshot = Self::load_from_path(path)?;
        ConceptStore::from_snapshot(snapshot)
            .with_context(|| format!("instantané refusé: {:?}", path))
    }

    /// A missing file is treated as an empty store.
    pub fn load_store_or_default(path: impl AsRef<Path>) -> Result<ConceptStore> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(ConceptStore::new());
        }
        Self::load_store(path)
    }
}

pub struct SnapshotWriter;

impl SnapshotWriter {
    pub fn save_to_path(path: impl AsRef<Path>, store: &ConceptStore) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("impossible de créer le dossier {:?}", parent))?;
        }
        let data = serde_json::to_string_pretty(&store.snapshot())?;
        fs::write(path, data)
            .with_context(|| format!("impossible d'écrire l'instantané dans {:?}", path))?;
        Ok(())
    }
}
