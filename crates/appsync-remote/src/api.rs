//! Remote store capability surface
//!
//! The sync core only ever needs three operations: idempotent upsert of a
//! single object, delete of a single object, and download of the full
//! project archive. Everything transport-specific lives behind this trait.

use async_trait::async_trait;

use appsync_fs::Category;

use crate::Result;

/// Wire payload for an object upsert.
///
/// Data items travel as raw bytes plus their sidecar metadata; the two
/// document categories send a single JSON document with the source embedded.
#[derive(Debug, Clone)]
pub enum Payload {
    /// Raw file content with parsed sidecar metadata.
    Item {
        content: Vec<u8>,
        meta: serde_json::Value,
    },
    /// Pre-rendered JSON document (metadata with base64-embedded source).
    Document(String),
}

/// Authenticated access to the remote object store.
#[async_trait]
pub trait RemoteStore: Send + Sync {
    /// Create or replace the object `name` in `category`.
    ///
    /// Upsert semantics: safe to call whether or not the object exists.
    async fn upsert(&self, category: Category, name: &str, payload: Payload) -> Result<()>;

    /// Delete the object `name` from `category`.
    ///
    /// A missing object surfaces as a 404 `Error::Status`; the caller decides
    /// whether that counts as success.
    async fn delete(&self, category: Category, name: &str) -> Result<()>;

    /// Download the remote project's current full state as a ZIP container.
    async fn download_archive(&self) -> Result<Vec<u8>>;
}
