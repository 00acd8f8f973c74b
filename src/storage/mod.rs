// Storage module - PERSISTENCE
// Snapshot store capability, its backends, and the snapshot format

mod file_store;
mod memory;
mod sled_store;
mod snapshot;
mod traits;

pub use file_store::FileStore;
pub use memory::MemoryStore;
pub use sled_store::SledStore;
pub use snapshot::{SnapshotCodec, SnapshotError, SNAPSHOT_VERSION};
pub use traits::{SnapshotStore, StoreError};
