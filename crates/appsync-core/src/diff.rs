//! Change detection against the previous snapshot
//!
//! Partitions a category's live file listing into new, changed, and deleted
//! sets. Sidecar files never appear as objects of their own: a changed
//! sidecar is remapped to its owning primary file (a metadata-only edit must
//! still re-upload the object, since the payload embeds both), and sidecars
//! are excluded from the new and deleted sets.

use std::collections::BTreeSet;
use std::path::Path;

use appsync_fs::{Category, is_sidecar};

use crate::snapshot::{CategoryHashes, hash_files};
use crate::Result;

/// The computed partition of one category's files relative to a snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiffResult {
    /// Paths not present in the snapshot
    pub new: BTreeSet<String>,
    /// Paths whose live hash differs from the recorded one, sidecars
    /// remapped to their primary file
    pub changed: BTreeSet<String>,
    /// Snapshot paths absent from the live listing
    pub deleted: BTreeSet<String>,
}

impl DiffResult {
    pub fn is_empty(&self) -> bool {
        self.new.is_empty() && self.changed.is_empty() && self.deleted.is_empty()
    }

    /// Human-readable change summary, e.g. `2 new, 1 changed`.
    pub fn summary(&self) -> String {
        if self.is_empty() {
            return "no changes".to_string();
        }
        let mut parts = Vec::new();
        if !self.new.is_empty() {
            parts.push(format!("{} new", self.new.len()));
        }
        if !self.changed.is_empty() {
            parts.push(format!("{} changed", self.changed.len()));
        }
        if !self.deleted.is_empty() {
            parts.push(format!("{} deleted", self.deleted.len()));
        }
        parts.join(", ")
    }
}

/// Compare the live listing of a category root against its snapshot slice.
///
/// Pure in its inputs apart from re-hashing the tracked live files; running
/// it twice against the same tree and snapshot yields identical results.
pub async fn diff(
    category: Category,
    root: &Path,
    live_files: &[String],
    previous: &CategoryHashes,
) -> Result<DiffResult> {
    let mut result = DiffResult::default();

    // Files present in the snapshot (primary or sidecar) are changed
    // candidates; unknown non-sidecar files are new.
    let mut tracked = Vec::new();
    for file in live_files {
        if previous.contains_key(file) {
            tracked.push(file.clone());
        } else if !is_sidecar(file) {
            result.new.insert(file.clone());
        }
    }

    let live_hashes = hash_files(root, &tracked).await?;
    for (file, record) in &live_hashes {
        if previous[file].hash != record.hash {
            let object = match category.primary_for_sidecar(file) {
                Some(primary) => primary,
                None => file.clone(),
            };
            result.changed.insert(object);
        }
    }

    // A remapped sidecar can name a primary file that is itself new;
    // changed processing wins so the partition stays disjoint.
    result.new.retain(|file| !result.changed.contains(file));

    let live: BTreeSet<&String> = live_files.iter().collect();
    for file in previous.keys() {
        if !is_sidecar(file) && !live.contains(file) {
            result.deleted.insert(file.clone());
        }
    }

    Ok(result)
}
