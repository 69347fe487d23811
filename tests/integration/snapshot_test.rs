//! Backend state survives a save and reload.

use std::sync::Arc;

use drivedesk_core::config::{SizeConfig, TransferConfig};
use drivedesk_core::types::FolderId;
use drivedesk_service::{BackendHandles, FolderSession, SessionContext, StaticAccessToken};
use drivedesk_storage::{LocalFileSaver, MemoryBackend, snapshot};

use crate::helpers::{FS, RecordingNotifier, TOKEN, TestApp};

#[tokio::test]
async fn test_changes_survive_reload() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("state").join("drive.json");

    let mut app = TestApp::new().await;
    app.session.select_folder(FolderId(4)).await.unwrap();
    app.session.create_folder("albums").await.unwrap();
    snapshot::save(&path, &app.backend.snapshot().await).await.unwrap();

    let loaded = snapshot::load(&path).await.unwrap();
    assert_eq!(loaded, app.backend.snapshot().await);

    let backend = Arc::new(MemoryBackend::new(loaded, &TransferConfig::default()));
    let mut session = FolderSession::open(SessionContext {
        file_system_id: FS,
        backend: BackendHandles::from_backend(backend),
        tokens: Arc::new(StaticAccessToken::new(Some(TOKEN.to_string()))),
        saver: Arc::new(LocalFileSaver::new(dir.path())),
        notifier: Arc::new(RecordingNotifier::default()),
        size: SizeConfig::default(),
        transfer: TransferConfig::default(),
    })
    .await
    .unwrap();

    session.select_folder(FolderId(4)).await.unwrap();
    let names: Vec<&str> = session.rows().iter().map(|r| r.name()).collect();
    assert_eq!(names, vec!["albums", "photo.jpg"]);
}

#[tokio::test]
async fn test_missing_snapshot_loads_empty() {
    let dir = tempfile::tempdir().unwrap();

    let loaded = snapshot::load(&dir.path().join("absent.json")).await.unwrap();

    assert!(loaded.file_systems.is_empty());
}
