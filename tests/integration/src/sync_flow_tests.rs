//! End-to-end upload flow tests against an in-memory remote

use std::fs;
use std::path::Path;
use std::sync::Arc;

use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use pretty_assertions::assert_eq;

use appsync_core::{STATE_FILE, SyncEngine, SnapshotStore};
use integration_tests::{Call, MockRemote};

fn engine(work_root: &Path, remote: Arc<MockRemote>) -> SyncEngine {
    let engine = SyncEngine::new(work_root.to_path_buf(), remote).unwrap();
    engine.ensure_work_tree().unwrap();
    engine
}

#[tokio::test]
async fn first_upload_pushes_every_category_and_persists_state() {
    let dir = tempfile::tempdir().unwrap();
    let remote = Arc::new(MockRemote::default());
    let engine = engine(dir.path(), remote.clone());

    fs::write(dir.path().join("data-items/logo.png"), [1u8, 2, 3]).unwrap();
    fs::write(
        dir.path().join("data-items/logo.png.meta.json"),
        r#"{"category":"web"}"#,
    )
    .unwrap();
    fs::write(dir.path().join("data-source-items/orders.py"), "rows = []").unwrap();
    fs::write(dir.path().join("data-objects/calc.py"), "x = 1").unwrap();

    engine.upload().await.unwrap();

    let mut calls = remote.recorded();
    calls.sort_by_key(|c| format!("{c:?}"));
    assert_eq!(
        calls,
        vec![
            Call::Upsert {
                category: "data-items",
                name: "logo.png".into(),
                kind: "item"
            },
            Call::Upsert {
                category: "data-objects",
                name: "calc".into(),
                kind: "document"
            },
            Call::Upsert {
                category: "data-source-items",
                name: "orders".into(),
                kind: "document"
            },
        ]
    );

    // Snapshot covers primaries and sidecars across all categories
    let snapshot = SnapshotStore::new(dir.path()).load().unwrap();
    assert!(snapshot.data_items.contains_key("logo.png"));
    assert!(snapshot.data_items.contains_key("logo.png.meta.json"));
    assert!(snapshot.data_source_items.contains_key("orders.py"));
    assert!(snapshot.data_objects.contains_key("calc.py"));
}

#[tokio::test]
async fn document_payload_embeds_base64_source_and_sidecar_fields() {
    let dir = tempfile::tempdir().unwrap();
    let remote = Arc::new(MockRemote::default());
    let engine = engine(dir.path(), remote.clone());

    fs::write(dir.path().join("data-objects/calc.py"), "x = 1").unwrap();
    fs::write(
        dir.path().join("data-objects/calc.meta.json"),
        r#"{"category":"tools"}"#,
    )
    .unwrap();

    engine.upload().await.unwrap();

    let documents = remote.documents.lock().unwrap().clone();
    assert_eq!(documents.len(), 1);
    let (name, document) = &documents[0];
    assert_eq!(name, "calc");
    let value: serde_json::Value = serde_json::from_str(document).unwrap();
    assert_eq!(value["category"], "tools");
    assert_eq!(value["stylesheet"], BASE64.encode("x = 1"));
}

#[tokio::test]
async fn sidecar_only_edit_reuploads_the_primary_file() {
    let dir = tempfile::tempdir().unwrap();
    let remote = Arc::new(MockRemote::default());
    let engine = engine(dir.path(), remote.clone());

    fs::write(dir.path().join("data-source-items/orders.py"), "rows = []").unwrap();
    fs::write(
        dir.path().join("data-source-items/orders.meta.json"),
        r#"{"category":"db"}"#,
    )
    .unwrap();
    engine.upload().await.unwrap();
    remote.clear();

    fs::write(
        dir.path().join("data-source-items/orders.meta.json"),
        r#"{"category":"db","timeout":30}"#,
    )
    .unwrap();
    engine.upload().await.unwrap();

    assert_eq!(
        remote.recorded(),
        vec![Call::Upsert {
            category: "data-source-items",
            name: "orders".into(),
            kind: "document"
        }]
    );
}

#[tokio::test]
async fn removed_file_is_deleted_remotely_and_404_counts_as_done() {
    let dir = tempfile::tempdir().unwrap();
    let remote = Arc::new(MockRemote {
        missing: vec!["calc".to_string()],
        ..MockRemote::default()
    });
    let engine = engine(dir.path(), remote.clone());

    fs::write(dir.path().join("data-objects/calc.py"), "x = 1").unwrap();
    engine.upload().await.unwrap();
    remote.clear();

    fs::remove_file(dir.path().join("data-objects/calc.py")).unwrap();
    engine.upload().await.unwrap();

    // The 404 was swallowed and the flow still saved a fresh snapshot
    assert_eq!(
        remote.recorded(),
        vec![Call::Delete {
            category: "data-objects",
            name: "calc".into()
        }]
    );
    let snapshot = SnapshotStore::new(dir.path()).load().unwrap();
    assert!(snapshot.data_objects.is_empty());
}

#[tokio::test]
async fn ignored_files_are_never_uploaded_or_tracked() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join(".appsyncignore"), "data-items/web/").unwrap();
    let remote = Arc::new(MockRemote::default());
    let engine = engine(dir.path(), remote.clone());

    fs::create_dir_all(dir.path().join("data-items/web")).unwrap();
    fs::write(dir.path().join("data-items/web/index.html"), "<html>").unwrap();
    fs::write(dir.path().join("data-items/version.json"), "{}").unwrap();

    engine.upload().await.unwrap();

    assert_eq!(
        remote.recorded(),
        vec![Call::Upsert {
            category: "data-items",
            name: "version.json".into(),
            kind: "item"
        }]
    );
    let snapshot = SnapshotStore::new(dir.path()).load().unwrap();
    assert!(!snapshot.data_items.contains_key("web/index.html"));
}

#[tokio::test]
async fn unchanged_tree_round_trips_to_a_stable_snapshot() {
    let dir = tempfile::tempdir().unwrap();
    let remote = Arc::new(MockRemote::default());
    let engine = engine(dir.path(), remote.clone());

    fs::write(dir.path().join("data-items/x"), "raw").unwrap();
    engine.upload().await.unwrap();
    let first = fs::read_to_string(dir.path().join(STATE_FILE)).unwrap();
    remote.clear();

    engine.upload().await.unwrap();
    let second = fs::read_to_string(dir.path().join(STATE_FILE)).unwrap();

    assert!(remote.recorded().is_empty());
    assert_eq!(first, second);
}
