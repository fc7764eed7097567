//! HTTP implementation of [`RemoteStore`]
//!
//! REST layout: objects live under
//! `{base}/api/groups/{group}/apps/{app}/{category}/{name}` and the full
//! project archive under `.../archive`. All calls use basic auth from the
//! sync configuration.

use async_trait::async_trait;
use tracing::debug;

use appsync_fs::Category;

use crate::{Error, Payload, RemoteStore, Result, SyncConfig};

/// [`RemoteStore`] over authenticated HTTP.
pub struct HttpRemote {
    client: reqwest::Client,
    config: SyncConfig,
}

impl HttpRemote {
    pub fn new(config: SyncConfig) -> Result<Self> {
        let client = reqwest::Client::builder().build()?;
        Ok(Self { client, config })
    }

    fn app_url(&self, tail: &str) -> String {
        format!(
            "{}/api/groups/{}/apps/{}/{}",
            self.config.base_url.trim_end_matches('/'),
            self.config.group,
            self.config.app,
            tail
        )
    }

    fn object_url(&self, category: Category, name: &str) -> String {
        self.app_url(&format!("{}/{}", category.dir_name(), name))
    }

    fn check(response: &reqwest::Response) -> Result<()> {
        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(Error::Status {
                status: status.as_u16(),
            })
        }
    }
}

#[async_trait]
impl RemoteStore for HttpRemote {
    async fn upsert(&self, category: Category, name: &str, payload: Payload) -> Result<()> {
        let url = self.object_url(category, name);
        debug!(%category, name, "upsert");

        let request = self
            .client
            .put(&url)
            .basic_auth(&self.config.username, Some(&self.config.password));
        let request = match payload {
            Payload::Item { content, meta } => request
                .header("X-AppSync-Meta", meta.to_string())
                .header(reqwest::header::CONTENT_TYPE, "application/octet-stream")
                .body(content),
            Payload::Document(document) => request
                .header(reqwest::header::CONTENT_TYPE, "application/json")
                .body(document),
        };

        let response = request.send().await?;
        Self::check(&response)
    }

    async fn delete(&self, category: Category, name: &str) -> Result<()> {
        let url = self.object_url(category, name);
        debug!(%category, name, "delete");

        let response = self
            .client
            .delete(&url)
            .basic_auth(&self.config.username, Some(&self.config.password))
            .send()
            .await?;
        Self::check(&response)
    }

    async fn download_archive(&self) -> Result<Vec<u8>> {
        let url = self.app_url("archive");
        debug!(url, "downloading archive");

        let response = self
            .client
            .get(&url)
            .basic_auth(&self.config.username, Some(&self.config.password))
            .send()
            .await?;
        Self::check(&response)?;
        Ok(response.bytes().await?.to_vec())
    }
}
