//! Archive unpacking
//!
//! The remote delivers the project's full state as a single ZIP container:
//! raw data-item entries under `data-items/` described by a `data-items.json`
//! manifest, and one JSON manifest per document category whose records embed
//! base64 source. Unpacking rebuilds the local tree plus one metadata
//! sidecar per object.

use std::collections::HashMap;
use std::io::{Cursor, Read};
use std::path::{Component, Path, PathBuf};

use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use serde::{Deserialize, Serialize};
use tracing::debug;
use zip::ZipArchive;

use appsync_fs::{Category, SIDECAR_SUFFIX};

use crate::collection::SOURCE_PLACEHOLDER;
use crate::{Error, Result, settle_all};

/// One record of the `data-items.json` manifest.
#[derive(Debug, Clone, Deserialize)]
struct ItemRecord {
    name: String,
    #[serde(flatten)]
    meta: ItemMeta,
}

/// Sidecar fields of a data item; absent fields are omitted on write.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ItemMeta {
    category: String,
    #[serde(rename = "contentType", skip_serializing_if = "Option::is_none")]
    content_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    key: Option<String>,
}

/// Decode `bytes` as a ZIP container and rebuild the work tree from it.
///
/// All per-entry writes run concurrently; the unpack completes only once
/// every write has settled.
pub async fn unpack(work_root: &Path, bytes: &[u8]) -> Result<()> {
    let entries = read_entries(bytes)?;
    debug!(entries = entries.len(), "archive decoded");

    let mut writes: Vec<(PathBuf, Vec<u8>)> = Vec::new();
    collect_item_writes(work_root, &entries, &mut writes)?;
    for category in [Category::DataSourceItems, Category::DataObjects] {
        collect_document_writes(work_root, category, &entries, &mut writes)?;
    }

    settle_all(writes.into_iter().map(|(path, content)| async move {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| appsync_fs::Error::io(parent, e))?;
        }
        tokio::fs::write(&path, content)
            .await
            .map_err(|e| Error::Fs(appsync_fs::Error::io(&path, e)))
    }))
    .await?;
    Ok(())
}

/// Read every file entry of the container into memory.
fn read_entries(bytes: &[u8]) -> Result<HashMap<String, Vec<u8>>> {
    let mut archive = ZipArchive::new(Cursor::new(bytes))?;
    let mut entries = HashMap::new();
    for index in 0..archive.len() {
        let mut entry = archive.by_index(index)?;
        if entry.is_dir() {
            continue;
        }
        // Entry names become paths under the work root; anything but plain
        // relative segments could escape it
        let safe = Path::new(entry.name())
            .components()
            .all(|c| matches!(c, Component::Normal(_)));
        if !safe {
            return Err(Error::archive(format!(
                "unsafe entry path {:?}",
                entry.name()
            )));
        }
        let mut content = Vec::with_capacity(entry.size() as usize);
        entry
            .read_to_end(&mut content)
            .map_err(|e| Error::archive(format!("unreadable entry: {e}")))?;
        entries.insert(entry.name().to_string(), content);
    }
    Ok(entries)
}

/// Queue writes for raw `data-items/` entries and their synthesized sidecars.
fn collect_item_writes(
    work_root: &Path,
    entries: &HashMap<String, Vec<u8>>,
    writes: &mut Vec<(PathBuf, Vec<u8>)>,
) -> Result<()> {
    let manifest: Vec<ItemRecord> =
        match entries.get(Category::DataItems.manifest_name()) {
            Some(raw) => serde_json::from_slice(raw)?,
            None => Vec::new(),
        };

    let prefix = format!("{}/", Category::DataItems.dir_name());
    for (name, content) in entries {
        let Some(relative) = name.strip_prefix(&prefix) else {
            continue;
        };
        let record = manifest
            .iter()
            .find(|r| r.name == relative)
            .ok_or_else(|| Error::ManifestEntryMissing {
                name: name.clone(),
            })?;

        writes.push((work_root.join(name), content.clone()));
        writes.push((
            work_root.join(format!("{name}{SIDECAR_SUFFIX}")),
            serde_json::to_vec(&record.meta)?,
        ));
    }
    Ok(())
}

/// Queue writes for one document category's manifest: decoded source files
/// plus pretty-printed sidecars with the source field replaced by a
/// placeholder reference.
fn collect_document_writes(
    work_root: &Path,
    category: Category,
    entries: &HashMap<String, Vec<u8>>,
    writes: &mut Vec<(PathBuf, Vec<u8>)>,
) -> Result<()> {
    let Some(raw) = entries.get(category.manifest_name()) else {
        return Ok(());
    };
    let records: Vec<serde_json::Map<String, serde_json::Value>> =
        serde_json::from_slice(raw)?;

    let suffix = category.source_suffix().unwrap_or_default();
    let root = work_root.join(category.dir_name());
    for mut record in records {
        let name = record
            .get("name")
            .and_then(|v| v.as_str())
            .ok_or_else(|| {
                Error::archive(format!("{} record without name", category.manifest_name()))
            })?
            .to_string();

        let source = match record.get("stylesheet").and_then(|v| v.as_str()) {
            Some(encoded) => {
                let decoded = BASE64
                    .decode(encoded)
                    .map_err(|e| Error::archive(format!("bad source encoding for {name}: {e}")))?;
                String::from_utf8(decoded).map_err(|e| {
                    Error::archive(format!("source for {name} is not UTF-8: {e}"))
                })?
            }
            None => String::new(),
        };
        record.insert(
            "stylesheet".to_string(),
            serde_json::Value::String(SOURCE_PLACEHOLDER.to_string()),
        );

        writes.push((root.join(format!("{name}{suffix}")), source.into_bytes()));
        writes.push((
            root.join(format!("{name}{SIDECAR_SUFFIX}")),
            serde_json::to_vec_pretty(&record)?,
        ));
    }
    Ok(())
}
