//! Command implementations

use std::path::Path;
use std::sync::Arc;

use colored::Colorize;

use appsync_core::SyncEngine;
use appsync_remote::{HttpRemote, SyncConfig};

use crate::error::Result;

/// Create the config template (if absent) and the work directory tree.
pub fn run_init(project_root: &Path) -> Result<()> {
    if SyncConfig::create_template(project_root)? {
        println!(
            "{} {}",
            "created".green().bold(),
            appsync_remote::CONFIG_FILE
        );
        println!("Fill in your credentials before uploading.");
    } else {
        println!("{} already exists", appsync_remote::CONFIG_FILE);
    }

    let config = SyncConfig::load(project_root)?;
    let engine = build_engine(project_root, &config)?;
    engine.ensure_work_tree()?;
    println!("{} work tree ready", "ok".green().bold());
    Ok(())
}

/// Push local changes to the remote store.
pub async fn run_upload(project_root: &Path) -> Result<()> {
    let config = SyncConfig::load(project_root)?;
    let engine = build_engine(project_root, &config)?;

    engine.upload().await?;
    println!("{} upload complete", "ok".green().bold());
    Ok(())
}

/// Replace the local tree with the remote project's current state.
pub async fn run_download(project_root: &Path) -> Result<()> {
    let config = SyncConfig::load(project_root)?;
    let engine = build_engine(project_root, &config)?;

    engine.download().await?;
    println!("{} download complete", "ok".green().bold());
    Ok(())
}

fn build_engine(project_root: &Path, config: &SyncConfig) -> Result<SyncEngine> {
    let remote = Arc::new(HttpRemote::new(config.clone())?);
    Ok(SyncEngine::new(config.work_root(project_root), remote)?)
}
