//! Shared helpers for the end-to-end sync flow tests

use std::io::{Cursor, Write};
use std::sync::Mutex;

use async_trait::async_trait;
use zip::write::SimpleFileOptions;

use appsync_fs::Category;
use appsync_remote::{Payload, RemoteStore};

/// One recorded remote mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Upsert {
        category: &'static str,
        name: String,
        /// `"item"` or `"document"`
        kind: &'static str,
    },
    Delete {
        category: &'static str,
        name: String,
    },
}

/// In-memory [`RemoteStore`] recording every mutation.
#[derive(Default)]
pub struct MockRemote {
    pub calls: Mutex<Vec<Call>>,
    /// Last document payload per upsert name, for content assertions
    pub documents: Mutex<Vec<(String, String)>>,
    /// Names answered with 404 on delete
    pub missing: Vec<String>,
    /// Archive served by `download_archive`; empty means "remote broken"
    pub archive: Vec<u8>,
}

#[async_trait]
impl RemoteStore for MockRemote {
    async fn upsert(
        &self,
        category: Category,
        name: &str,
        payload: Payload,
    ) -> appsync_remote::Result<()> {
        let kind = match &payload {
            Payload::Item { .. } => "item",
            Payload::Document(document) => {
                self.documents
                    .lock()
                    .unwrap()
                    .push((name.to_string(), document.clone()));
                "document"
            }
        };
        self.calls.lock().unwrap().push(Call::Upsert {
            category: category.dir_name(),
            name: name.to_string(),
            kind,
        });
        Ok(())
    }

    async fn delete(&self, category: Category, name: &str) -> appsync_remote::Result<()> {
        self.calls.lock().unwrap().push(Call::Delete {
            category: category.dir_name(),
            name: name.to_string(),
        });
        if self.missing.iter().any(|m| m == name) {
            return Err(appsync_remote::Error::Status { status: 404 });
        }
        Ok(())
    }

    async fn download_archive(&self) -> appsync_remote::Result<Vec<u8>> {
        if self.archive.is_empty() {
            return Err(appsync_remote::Error::Status { status: 404 });
        }
        Ok(self.archive.clone())
    }
}

impl MockRemote {
    pub fn recorded(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn clear(&self) {
        self.calls.lock().unwrap().clear();
        self.documents.lock().unwrap().clear();
    }
}

/// Build a ZIP container from (name, content) pairs.
pub fn build_archive(entries: &[(&str, &[u8])]) -> Vec<u8> {
    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    for (name, content) in entries {
        writer
            .start_file(*name, SimpleFileOptions::default())
            .unwrap();
        writer.write_all(content).unwrap();
    }
    writer.finish().unwrap().into_inner()
}
