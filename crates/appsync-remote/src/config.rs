//! Sync configuration
//!
//! A single JSON file at the project root carries the remote credentials,
//! target group/app, base URL, and the work subdirectory holding the synced
//! tree.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// File name of the sync configuration at the project root.
pub const CONFIG_FILE: &str = "appsyncconfig.json";

/// Remote credentials and project layout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncConfig {
    pub username: String,
    pub password: String,
    /// Remote project group the app belongs to
    pub group: String,
    /// Remote app name
    pub app: String,
    #[serde(rename = "baseUrl")]
    pub base_url: String,
    /// Subdirectory of the project root holding the synced tree;
    /// empty means the project root itself
    #[serde(default)]
    pub workpath: String,
    /// Group used when launching the app, kept for config compatibility
    #[serde(default)]
    pub rungroup: String,
    /// App used when launching, kept for config compatibility
    #[serde(default)]
    pub runapp: String,
}

impl SyncConfig {
    /// Load the configuration from `<project_root>/appsyncconfig.json`.
    ///
    /// # Errors
    ///
    /// `ConfigNotFound` if the file is absent, `ConfigParse` if it exists
    /// but is not valid.
    pub fn load(project_root: &Path) -> Result<Self> {
        let path = project_root.join(CONFIG_FILE);
        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(Error::ConfigNotFound { path });
            }
            Err(e) => return Err(appsync_fs::Error::io(&path, e).into()),
        };
        serde_json::from_str(&content).map_err(|e| Error::ConfigParse {
            path,
            message: e.to_string(),
        })
    }

    /// Write a placeholder configuration if none exists yet.
    ///
    /// Returns `true` if the template was created, `false` if a
    /// configuration file was already present.
    pub fn create_template(project_root: &Path) -> Result<bool> {
        let path = project_root.join(CONFIG_FILE);
        if path.exists() {
            return Ok(false);
        }
        let template = Self {
            username: "<username>/<devgroups>".into(),
            password: "<password>".into(),
            group: "<projectGroup>".into(),
            app: "<appname>".into(),
            base_url: "https://example.invalid/".into(),
            workpath: String::new(),
            rungroup: String::new(),
            runapp: String::new(),
        };
        let content =
            serde_json::to_string_pretty(&template).expect("template serializes");
        appsync_fs::io::write_text(&path, &content)?;
        Ok(true)
    }

    /// Resolve the work root: the project root joined with `workpath`.
    pub fn work_root(&self, project_root: &Path) -> PathBuf {
        if self.workpath.is_empty() {
            project_root.to_path_buf()
        } else {
            project_root.join(&self.workpath)
        }
    }
}
