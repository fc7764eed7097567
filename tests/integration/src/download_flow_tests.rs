//! End-to-end download flow tests against archive fixtures

use std::fs;
use std::path::Path;
use std::sync::Arc;

use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use pretty_assertions::assert_eq;

use appsync_core::{SnapshotStore, SyncEngine};
use integration_tests::{MockRemote, build_archive};

fn engine(work_root: &Path, remote: Arc<MockRemote>) -> SyncEngine {
    SyncEngine::new(work_root.to_path_buf(), remote).unwrap()
}

#[tokio::test]
async fn download_rebuilds_items_with_sidecars() {
    let dir = tempfile::tempdir().unwrap();
    let remote = Arc::new(MockRemote {
        archive: build_archive(&[
            ("data-items.json", br#"[{"name":"x","category":"web"}]"#),
            ("data-items/x", b"payload"),
        ]),
        ..MockRemote::default()
    });
    let engine = engine(dir.path(), remote);

    engine.download().await.unwrap();

    assert_eq!(fs::read(dir.path().join("data-items/x")).unwrap(), b"payload");
    let sidecar: serde_json::Value = serde_json::from_str(
        &fs::read_to_string(dir.path().join("data-items/x.meta.json")).unwrap(),
    )
    .unwrap();
    assert_eq!(sidecar, serde_json::json!({"category": "web"}));

    // The fresh snapshot tracks the rebuilt tree
    let snapshot = SnapshotStore::new(dir.path()).load().unwrap();
    assert!(snapshot.data_items.contains_key("x"));
    assert!(snapshot.data_items.contains_key("x.meta.json"));
}

#[tokio::test]
async fn download_decodes_documents_and_clears_stale_files() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir_all(dir.path().join("data-objects")).unwrap();
    fs::write(dir.path().join("data-objects/stale.py"), "old").unwrap();

    let manifest = format!(
        r#"[{{"name":"calc","category":"tools","stylesheet":"{}"}}]"#,
        BASE64.encode("x = 2")
    );
    let remote = Arc::new(MockRemote {
        archive: build_archive(&[("data-objects.json", manifest.as_bytes())]),
        ..MockRemote::default()
    });
    let engine = engine(dir.path(), remote);

    engine.download().await.unwrap();

    assert!(!dir.path().join("data-objects/stale.py").exists());
    assert_eq!(
        fs::read_to_string(dir.path().join("data-objects/calc.py")).unwrap(),
        "x = 2"
    );
    let sidecar: serde_json::Value = serde_json::from_str(
        &fs::read_to_string(dir.path().join("data-objects/calc.meta.json")).unwrap(),
    )
    .unwrap();
    assert_eq!(sidecar["stylesheet"], "<See corresponding .py file>");
}

#[tokio::test]
async fn download_keeps_ignored_local_files() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join(".appsyncignore"), "data-items/web/").unwrap();
    fs::create_dir_all(dir.path().join("data-items/web")).unwrap();
    fs::write(dir.path().join("data-items/web/local.html"), "keep me").unwrap();

    let remote = Arc::new(MockRemote {
        archive: build_archive(&[("data-items.json", b"[]")]),
        ..MockRemote::default()
    });
    let engine = engine(dir.path(), remote);

    engine.download().await.unwrap();

    assert_eq!(
        fs::read_to_string(dir.path().join("data-items/web/local.html")).unwrap(),
        "keep me"
    );
}

#[tokio::test]
async fn download_then_upload_reports_no_changes() {
    let dir = tempfile::tempdir().unwrap();
    let manifest = format!(
        r#"[{{"name":"calc","category":"tools","stylesheet":"{}"}}]"#,
        BASE64.encode("x = 2")
    );
    let remote = Arc::new(MockRemote {
        archive: build_archive(&[
            ("data-items.json", br#"[{"name":"x","category":"web"}]"#),
            ("data-items/x", b"payload"),
            ("data-source-items.json", manifest.as_bytes()),
        ]),
        ..MockRemote::default()
    });
    let engine = engine(dir.path(), remote.clone());

    engine.download().await.unwrap();
    remote.clear();

    // Everything just downloaded hashes identically, so nothing uploads
    engine.upload().await.unwrap();
    assert!(remote.recorded().is_empty());
}
