//! Per-category object collection
//!
//! One collection value per category maps local file changes to remote
//! create/update/delete calls. The wire shape is decided by the category:
//! data items travel as raw bytes plus sidecar metadata, the two document
//! categories as a JSON document embedding the base64 source.

use std::path::PathBuf;
use std::sync::Arc;

use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use futures_util::FutureExt;
use futures_util::future::BoxFuture;
use tracing::{debug, info};

use appsync_fs::{Category, IgnoreFilter, list_files_filtered};
use appsync_remote::{Payload, RemoteStore};

use crate::diff::{DiffResult, diff};
use crate::snapshot::{CategoryHashes, hash_files};
use crate::{Error, Result, settle_all};

/// Placeholder written into downloaded metadata instead of embedded source.
pub const SOURCE_PLACEHOLDER: &str = "<See corresponding .py file>";

/// Capability set for one object category under the work root.
pub struct ObjectCollection {
    category: Category,
    work_root: PathBuf,
    remote: Arc<dyn RemoteStore>,
    ignore: Arc<IgnoreFilter>,
    /// This category's slice of the previous snapshot, fixed for the run
    snapshot: CategoryHashes,
}

impl ObjectCollection {
    pub fn new(
        category: Category,
        work_root: PathBuf,
        remote: Arc<dyn RemoteStore>,
        ignore: Arc<IgnoreFilter>,
        snapshot: CategoryHashes,
    ) -> Self {
        Self {
            category,
            work_root,
            remote,
            ignore,
            snapshot,
        }
    }

    pub fn category(&self) -> Category {
        self.category
    }

    /// Directory holding this category's files.
    fn objects_root(&self) -> PathBuf {
        self.work_root.join(self.category.dir_name())
    }

    /// Ignore rules match work-root-relative paths, so the category
    /// directory is part of the tested path.
    fn keep(&self, relative: &str) -> bool {
        self.ignore
            .is_kept(&format!("{}/{}", self.category.dir_name(), relative))
    }

    /// List the category's non-ignored files, relative to the category root.
    pub fn list(&self) -> Result<Vec<String>> {
        Ok(list_files_filtered(&self.objects_root(), |path| {
            self.keep(path)
        })?)
    }

    /// Diff the live tree against this collection's snapshot slice.
    pub async fn dirty(&self) -> Result<DiffResult> {
        let live = self.list()?;
        diff(self.category, &self.objects_root(), &live, &self.snapshot).await
    }

    /// Freshly hash every non-ignored file in the category.
    pub async fn compute_hashes(&self) -> Result<CategoryHashes> {
        let live = self.list()?;
        hash_files(&self.objects_root(), &live).await
    }

    /// Push all local changes to the remote.
    ///
    /// Creates, updates, and deletes run concurrently; every operation
    /// settles before the first error (if any) is reported. A 404 on delete
    /// means the object was already removed by other means and is success.
    pub async fn upload(&self) -> Result<()> {
        let changes = self.dirty().await?;
        info!(category = %self.category, "{}", changes.summary());

        let mut operations: Vec<BoxFuture<'_, Result<()>>> = Vec::new();
        for path in &changes.new {
            operations.push(self.push_object(path).boxed());
        }
        for path in &changes.changed {
            operations.push(self.push_object(path).boxed());
        }
        for path in &changes.deleted {
            operations.push(self.delete_object(path).boxed());
        }

        settle_all(operations).await?;
        Ok(())
    }

    /// Remove every locally present, non-ignored file in the category.
    ///
    /// Used before unpacking a downloaded archive so stale local files that
    /// are not excluded by the ignore file do not linger.
    pub async fn remove_non_ignored(&self) -> Result<()> {
        let files = self.list()?;
        let root = self.objects_root();
        settle_all(files.iter().map(|file| {
            let path = root.join(file);
            async move {
                tokio::fs::remove_file(&path)
                    .await
                    .map_err(|e| Error::Fs(appsync_fs::Error::io(&path, e)))
            }
        }))
        .await?;
        Ok(())
    }

    /// Upsert one object from its local file.
    async fn push_object(&self, relative: &str) -> Result<()> {
        let payload = self.build_payload(relative).await?;
        let name = self.category.remote_name(relative);
        self.remote.upsert(self.category, name, payload).await?;
        Ok(())
    }

    /// Delete one object, treating a remote 404 as an idempotent no-op.
    async fn delete_object(&self, relative: &str) -> Result<()> {
        let name = self.category.remote_name(relative);
        match self.remote.delete(self.category, name).await {
            Ok(()) => Ok(()),
            Err(e) if e.is_not_found() => {
                debug!(category = %self.category, name, "already removed remotely");
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn build_payload(&self, relative: &str) -> Result<Payload> {
        match self.category.source_suffix() {
            None => {
                let path = self.objects_root().join(relative);
                let content = tokio::fs::read(&path)
                    .await
                    .map_err(|e| appsync_fs::Error::io(&path, e))?;
                let meta = self.read_sidecar(relative).await?;
                Ok(Payload::Item { content, meta })
            }
            Some(_) => Ok(Payload::Document(self.render_document(relative).await?)),
        }
    }

    /// Parse the sidecar accompanying `relative`; absent means empty.
    async fn read_sidecar(&self, relative: &str) -> Result<serde_json::Value> {
        let path = self
            .objects_root()
            .join(self.category.sidecar_path(relative));
        let raw = match tokio::fs::read_to_string(&path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => "{}".to_string(),
            Err(e) => return Err(appsync_fs::Error::io(&path, e).into()),
        };
        Ok(serde_json::from_str(&raw)?)
    }

    /// Render the upload document for the source categories: the sidecar
    /// fields with the file's content embedded base64 under `stylesheet`.
    async fn render_document(&self, relative: &str) -> Result<String> {
        let path = self.objects_root().join(relative);
        let source = tokio::fs::read_to_string(&path)
            .await
            .map_err(|e| appsync_fs::Error::io(&path, e))?;

        let mut meta = self.read_sidecar(relative).await?;
        let Some(fields) = meta.as_object_mut() else {
            return Err(Error::SidecarFormat {
                path: self
                    .objects_root()
                    .join(self.category.sidecar_path(relative)),
            });
        };
        fields.insert(
            "stylesheet".to_string(),
            serde_json::Value::String(BASE64.encode(source)),
        );
        Ok(serde_json::to_string_pretty(&meta)?)
    }
}
