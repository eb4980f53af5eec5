//! Persistence: the snapshot schema, the key-value port and the
//! snapshot persister that sits between them.

pub mod persist;
pub mod snapshot;
pub mod store;

pub use persist::{SnapshotStorage, STORAGE_KEY};
pub use snapshot::Snapshot;
pub use store::{FileStore, KeyValueStore, MemoryStore};
