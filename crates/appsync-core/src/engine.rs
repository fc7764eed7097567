//! Sync orchestrator
//!
//! Owns the three object collections and drives the two top-level flows.
//! Upload: load snapshot, diff and push each collection, then recompute and
//! persist a fresh snapshot. Download: clear non-ignored files, fetch and
//! unpack the remote archive, then recompute and persist. Neither flow
//! saves the snapshot on failure, so a retried run re-diffs against the
//! last known-good state.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::info;

use appsync_fs::{Category, IGNORE_FILE, IgnoreFilter, io};
use appsync_remote::RemoteStore;

use crate::archive;
use crate::collection::ObjectCollection;
use crate::snapshot::{Snapshot, SnapshotStore};
use crate::{Result, settle_all};

/// Orchestrates upload and download between the work root and the remote.
pub struct SyncEngine {
    work_root: PathBuf,
    remote: Arc<dyn RemoteStore>,
    store: SnapshotStore,
    ignore: Arc<IgnoreFilter>,
}

impl SyncEngine {
    /// Create an engine for `work_root`.
    ///
    /// Loads the ignore file, creating it with default rules if absent.
    pub fn new(work_root: impl Into<PathBuf>, remote: Arc<dyn RemoteStore>) -> Result<Self> {
        let work_root = work_root.into();
        let ignore = Arc::new(IgnoreFilter::load_or_init(&work_root.join(IGNORE_FILE))?);
        let store = SnapshotStore::new(&work_root);
        Ok(Self {
            work_root,
            remote,
            store,
            ignore,
        })
    }

    pub fn work_root(&self) -> &PathBuf {
        &self.work_root
    }

    /// Create the work root and the three category directories if missing.
    pub fn ensure_work_tree(&self) -> Result<()> {
        for category in Category::ALL {
            io::ensure_dir(&self.work_root.join(category.dir_name()))?;
        }
        Ok(())
    }

    fn collections(&self, snapshot: &Snapshot) -> [ObjectCollection; 3] {
        Category::ALL.map(|category| {
            ObjectCollection::new(
                category,
                self.work_root.clone(),
                self.remote.clone(),
                self.ignore.clone(),
                snapshot.slice(category).clone(),
            )
        })
    }

    /// Push all local changes to the remote, then persist a fresh snapshot.
    ///
    /// The three collections upload concurrently; all settle before the
    /// first failure (if any) aborts the flow, leaving the previous snapshot
    /// in place.
    pub async fn upload(&self) -> Result<()> {
        let snapshot = self.store.load()?;
        let collections = self.collections(&snapshot);

        settle_all(collections.iter().map(|c| c.upload())).await?;
        info!("upload complete");

        self.save_fresh_snapshot(&collections).await
    }

    /// Replace the local tree with the remote's current state, then persist
    /// a fresh snapshot.
    ///
    /// A failure mid-flow leaves the tree cleared but not repopulated and
    /// the snapshot unwritten; the caller retries the whole flow.
    pub async fn download(&self) -> Result<()> {
        self.ensure_work_tree()?;
        // Snapshot slices are only consulted for diffing, which download
        // never does
        let collections = self.collections(&Snapshot::default());

        settle_all(collections.iter().map(|c| c.remove_non_ignored())).await?;
        info!("cleared non-ignored files");

        let bytes = self.remote.download_archive().await?;
        info!(bytes = bytes.len(), "archive downloaded");

        archive::unpack(&self.work_root, &bytes).await?;
        info!("archive unpacked");

        self.save_fresh_snapshot(&collections).await
    }

    /// Recompute hashes for all three categories (batched per category,
    /// categories concurrent) and replace the snapshot file.
    async fn save_fresh_snapshot(&self, collections: &[ObjectCollection; 3]) -> Result<()> {
        let hashes = settle_all(collections.iter().map(|c| c.compute_hashes())).await?;

        let mut snapshot = Snapshot::default();
        for (collection, slice) in collections.iter().zip(hashes) {
            snapshot.set_slice(collection.category(), slice);
        }
        self.store.save(&snapshot)?;
        info!(path = %self.store.path().display(), "snapshot saved");
        Ok(())
    }
}
