//! Recycle bin listing and restore through a session.

use drivedesk_core::types::{FileId, FolderId};
use drivedesk_entity::recycle::{RecycleBin, RestoreSelection};
use drivedesk_service::{ActionOutcome, FolderAction};

use crate::helpers::TestApp;

async fn open_bin(app: &mut TestApp) -> RecycleBin {
    match app.session.handle(FolderAction::OpenRecycleBin).await {
        ActionOutcome::RecycleBin(bin) => bin,
        other => panic!("unexpected outcome: {other:?}"),
    }
}

async fn delete_named(app: &mut TestApp, name: &str) {
    let row = app
        .session
        .rows()
        .iter()
        .find(|r| r.name() == name)
        .cloned()
        .unwrap();
    assert_eq!(
        app.session.handle(FolderAction::Delete(row)).await,
        ActionOutcome::Deleted
    );
}

#[tokio::test]
async fn test_deleted_items_are_listed_with_folder_names() {
    let mut app = TestApp::new().await;
    app.session.select_folder(FolderId(1)).await.unwrap();
    delete_named(&mut app, "plan.txt").await;
    app.session.select_folder(FolderId::ROOT).await.unwrap();
    delete_named(&mut app, "media").await;

    let bin = open_bin(&mut app).await;

    assert_eq!(bin.folders.len(), 1);
    assert_eq!(bin.folders[0].name, "media");
    assert_eq!(bin.files.len(), 1);
    assert_eq!(bin.files[0].record.name, "plan.txt");
    assert_eq!(bin.files[0].record.size_bytes, 100);
    assert_eq!(bin.files[0].parent_folder_name, "docs");
}

#[tokio::test]
async fn test_restore_brings_items_back() {
    let mut app = TestApp::new().await;
    app.session.select_folder(FolderId(1)).await.unwrap();
    delete_named(&mut app, "plan.txt").await;
    delete_named(&mut app, "reports").await;
    assert_eq!(app.row_names(), Vec::<String>::new());

    let outcome = app
        .session
        .handle(FolderAction::Restore(RestoreSelection {
            folder_ids: vec![FolderId(2)],
            files: vec![(FileId(2), FolderId(1))],
        }))
        .await;

    assert_eq!(outcome, ActionOutcome::Restored);
    assert!(app.session.navigator().tree().contains(FolderId(3)));
    assert_eq!(app.row_names(), vec!["reports", "plan.txt"]);
    assert!(open_bin(&mut app).await.is_empty());
}

#[tokio::test]
async fn test_restore_live_folder_fails() {
    let mut app = TestApp::new().await;

    let outcome = app
        .session
        .handle(FolderAction::Restore(RestoreSelection {
            folder_ids: vec![FolderId(4)],
            files: Vec::new(),
        }))
        .await;

    assert_eq!(
        outcome,
        ActionOutcome::Failed {
            message: "The folder no longer exists.".into()
        }
    );
}

#[tokio::test]
async fn test_restore_nothing_is_rejected() {
    let mut app = TestApp::new().await;

    let outcome = app
        .session
        .handle(FolderAction::Restore(RestoreSelection::default()))
        .await;

    assert!(matches!(outcome, ActionOutcome::Failed { .. }));
    assert!(app.notifier.successes().is_empty());
}
