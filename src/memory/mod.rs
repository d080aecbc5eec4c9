mod persistence;
mod snapshot;
mod store;

pub use persistence::{SnapshotLoader, SnapshotWriter};
pub use snapshot::{Snapshot, SNAPSHOT_VERSION};
pub use store::ConceptStore;
