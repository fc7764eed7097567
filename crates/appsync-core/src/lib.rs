//! Synchronization engine between a local work tree and a remote
//! application object store
//!
//! Three object categories (data items, data source items, data objects)
//! live as files under the work root. The engine detects local changes by
//! content hash against a persisted snapshot, maps them to remote
//! create/update/delete calls on upload, and rebuilds the local tree from a
//! downloaded archive on download. Both flows end by replacing the snapshot
//! wholesale.

pub mod archive;
pub mod collection;
pub mod diff;
pub mod engine;
pub mod error;
pub mod join;
pub mod snapshot;

pub use collection::ObjectCollection;
pub use diff::DiffResult;
pub use engine::SyncEngine;
pub use error::{Error, Result};
pub use join::settle_all;
pub use snapshot::{
    CategoryHashes, HASH_BATCH_SIZE, HashRecord, STATE_FILE, Snapshot, SnapshotStore,
    hash_files,
};
