//! Persisted hash snapshot
//!
//! The snapshot records one content hash per file as of the end of the
//! previous successful sync. It is read once per run, never mutated
//! mid-operation, and replaced wholesale after a successful upload or
//! download.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use appsync_fs::{Category, checksum_bytes, io};

use crate::{Result, settle_all};

/// File name of the persisted snapshot at the work root.
pub const STATE_FILE: &str = ".appsync-state";

/// Files hashed concurrently per batch, to respect open-file limits.
pub const HASH_BATCH_SIZE: usize = 100;

/// Content hash of one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HashRecord {
    /// Hex digest of the file's bytes
    pub hash: String,
}

/// Per-category mapping of relative path to hash record.
pub type CategoryHashes = BTreeMap<String, HashRecord>;

/// Snapshot of all three categories.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(rename = "data-items", default)]
    pub data_items: CategoryHashes,
    #[serde(rename = "data-source-items", default)]
    pub data_source_items: CategoryHashes,
    #[serde(rename = "data-objects", default)]
    pub data_objects: CategoryHashes,
}

impl Snapshot {
    /// The slice of the snapshot belonging to one category.
    pub fn slice(&self, category: Category) -> &CategoryHashes {
        match category {
            Category::DataItems => &self.data_items,
            Category::DataSourceItems => &self.data_source_items,
            Category::DataObjects => &self.data_objects,
        }
    }

    /// Replace one category's slice with freshly computed hashes.
    pub fn set_slice(&mut self, category: Category, hashes: CategoryHashes) {
        match category {
            Category::DataItems => self.data_items = hashes,
            Category::DataSourceItems => self.data_source_items = hashes,
            Category::DataObjects => self.data_objects = hashes,
        }
    }
}

/// Load/save access to the snapshot file at the work root.
#[derive(Debug)]
pub struct SnapshotStore {
    path: PathBuf,
}

impl SnapshotStore {
    pub fn new(work_root: &Path) -> Self {
        Self {
            path: work_root.join(STATE_FILE),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the snapshot, creating an empty document if the file is absent.
    pub fn load(&self) -> Result<Snapshot> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "creating empty snapshot file");
                let empty = serde_json::to_string_pretty(&Snapshot::default())?;
                io::write_text(&self.path, &empty)?;
                return Ok(Snapshot::default());
            }
            Err(e) => return Err(appsync_fs::Error::io(&self.path, e).into()),
        };
        Ok(serde_json::from_str(&content)?)
    }

    /// Replace the snapshot file with `snapshot`.
    ///
    /// The caller supplies a complete snapshot for all three categories;
    /// partial snapshots are never merged.
    pub fn save(&self, snapshot: &Snapshot) -> Result<()> {
        let content = serde_json::to_string_pretty(snapshot)?;
        io::write_text(&self.path, &content)?;
        Ok(())
    }
}

/// Hash `files` (relative to `root`) in batches of [`HASH_BATCH_SIZE`].
///
/// Within a batch every file is read and hashed concurrently; the next batch
/// starts only once the previous one has settled, bounding open file handles.
pub async fn hash_files(root: &Path, files: &[String]) -> Result<CategoryHashes> {
    hash_in_batches(root, files, |_| {}).await
}

async fn hash_in_batches(
    root: &Path,
    files: &[String],
    mut on_batch: impl FnMut(usize),
) -> Result<CategoryHashes> {
    let mut records = CategoryHashes::new();
    for batch in files.chunks(HASH_BATCH_SIZE) {
        on_batch(batch.len());
        let hashed = settle_all(batch.iter().map(|file| {
            let path = root.join(file);
            async move {
                let bytes = tokio::fs::read(&path)
                    .await
                    .map_err(|e| appsync_fs::Error::io(&path, e))?;
                Ok::<_, crate::Error>((
                    file.clone(),
                    HashRecord {
                        hash: checksum_bytes(&bytes),
                    },
                ))
            }
        }))
        .await?;
        records.extend(hashed);
    }
    Ok(records)
}
