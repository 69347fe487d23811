//! Folder size calculation through a session.

use drivedesk_core::types::FolderId;
use drivedesk_service::{ActionOutcome, FolderAction};

use crate::helpers::TestApp;

#[tokio::test]
async fn test_size_sums_nested_files() {
    let mut app = TestApp::new().await;

    let outcome = app
        .session
        .handle(FolderAction::CalculateSize(FolderId(1)))
        .await;

    assert_eq!(
        outcome,
        ActionOutcome::SizeComputed {
            folder_id: FolderId(1),
            bytes: 400,
            formatted: "400 B".into(),
        }
    );
    assert_eq!(app.session.sizes().formatted(FolderId(1)).as_deref(), Some("400 B"));
    assert!(!app.session.sizes().is_computing(FolderId(1)));
}

#[tokio::test]
async fn test_root_size_includes_every_level() {
    let mut app = TestApp::new().await;

    let outcome = app
        .session
        .handle(FolderAction::CalculateSize(FolderId::ROOT))
        .await;

    match outcome {
        ActionOutcome::SizeComputed { bytes, formatted, .. } => {
            assert_eq!(bytes, 2458);
            assert_eq!(formatted, "2.40 KB");
        }
        other => panic!("unexpected outcome: {other:?}"),
    }
}

#[tokio::test]
async fn test_computed_size_shows_in_details() {
    let mut app = TestApp::new().await;
    app.session
        .handle(FolderAction::CalculateSize(FolderId(4)))
        .await;

    let media = app
        .session
        .rows()
        .iter()
        .find(|r| r.name() == "media")
        .cloned()
        .unwrap();
    let outcome = app.session.handle(FolderAction::ViewDetails(media)).await;

    match outcome {
        ActionOutcome::Details(details) => {
            assert_eq!(details.size.as_deref(), Some("2.00 KB"));
            assert_eq!(details.location, "/");
        }
        other => panic!("unexpected outcome: {other:?}"),
    }
}

#[tokio::test]
async fn test_unknown_folder_size_is_not_cached() {
    let mut app = TestApp::new().await;

    let outcome = app
        .session
        .handle(FolderAction::CalculateSize(FolderId(99)))
        .await;

    assert!(matches!(outcome, ActionOutcome::Failed { .. }));
    assert!(app.session.sizes().formatted(FolderId(99)).is_none());
    assert!(!app.session.sizes().is_computing(FolderId(99)));
    assert_eq!(app.notifier.errors().len(), 1);
}
