//! Tree loading, navigation, and folder/file mutations through a session.

use drivedesk_core::types::FolderId;
use drivedesk_entity::content::ContentRow;
use drivedesk_service::messages;
use drivedesk_service::{ActionOutcome, FolderAction};

use crate::helpers::TestApp;

fn row(app: &TestApp, name: &str) -> ContentRow {
    app.session
        .rows()
        .iter()
        .find(|r| r.name() == name)
        .cloned()
        .unwrap_or_else(|| panic!("no row named {name}"))
}

#[tokio::test]
async fn test_open_lists_root() {
    let app = TestApp::new().await;

    assert_eq!(app.session.current_folder_id(), FolderId::ROOT);
    assert_eq!(app.row_names(), vec!["docs", "media", "readme.md"]);
    assert_eq!(app.session.navigator().tree().len(), 4);
    assert!(app.session.last_error().is_none());
}

#[tokio::test]
async fn test_navigate_and_go_back() {
    let mut app = TestApp::new().await;

    let docs = row(&app, "docs");
    let outcome = app.session.handle(FolderAction::Open(docs)).await;
    assert_eq!(outcome, ActionOutcome::Opened { folder_id: FolderId(1) });
    assert_eq!(app.row_names(), vec!["reports", "plan.txt"]);

    app.session.select_folder(FolderId(3)).await.unwrap();
    assert_eq!(app.row_names(), vec!["q1.csv"]);
    assert_eq!(app.session.path_label(FolderId(3)), "/docs/reports/q1");

    assert_eq!(app.session.go_back().await.unwrap(), FolderId(1));
    assert_eq!(app.row_names(), vec!["reports", "plan.txt"]);
    assert_eq!(app.session.go_back().await.unwrap(), FolderId::ROOT);
    assert_eq!(app.row_names(), vec!["docs", "media", "readme.md"]);
}

#[tokio::test]
async fn test_select_unknown_folder() {
    let mut app = TestApp::new().await;

    assert!(app.session.select_folder(FolderId(99)).await.is_err());
    assert_eq!(app.session.current_folder_id(), FolderId::ROOT);
}

#[tokio::test]
async fn test_create_folder_refreshes_tree_and_rows() {
    let mut app = TestApp::new().await;
    app.session.select_folder(FolderId(4)).await.unwrap();

    app.session.create_folder("holiday").await.unwrap();

    assert_eq!(app.row_names(), vec!["holiday", "photo.jpg"]);
    let tree = app.session.navigator().tree();
    assert!(tree.iter().any(|n| n.name == "holiday" && n.parent_id == FolderId(4)));
    assert_eq!(app.notifier.successes(), vec![messages::CREATED]);
}

#[tokio::test]
async fn test_create_duplicate_folder_is_reported() {
    let mut app = TestApp::new().await;

    assert!(app.session.create_folder("DOCS").await.is_err());

    assert_eq!(
        app.notifier.errors(),
        vec!["A folder with this name already exists here."]
    );
    assert_eq!(app.session.navigator().tree().len(), 4);
}

#[tokio::test]
async fn test_rename_file_in_open_folder() {
    let mut app = TestApp::new().await;
    app.session.select_folder(FolderId(1)).await.unwrap();

    let outcome = app
        .session
        .handle(FolderAction::Rename {
            row: row(&app, "plan.txt"),
            new_name: "budget.txt".into(),
        })
        .await;

    assert_eq!(outcome, ActionOutcome::Renamed);
    assert_eq!(app.row_names(), vec!["reports", "budget.txt"]);
    assert_eq!(app.notifier.successes(), vec![messages::RENAMED]);
}

#[tokio::test]
async fn test_move_folder_and_reject_cycle() {
    let mut app = TestApp::new().await;

    let outcome = app
        .session
        .handle(FolderAction::Move {
            folder_id: FolderId(4),
            destination: FolderId(3),
        })
        .await;
    assert_eq!(outcome, ActionOutcome::Moved);
    assert_eq!(
        app.session.navigator().tree().path_to(FolderId(4)),
        Some(vec![FolderId(1), FolderId(2), FolderId(3), FolderId(4)])
    );

    let outcome = app
        .session
        .handle(FolderAction::Move {
            folder_id: FolderId(1),
            destination: FolderId(3),
        })
        .await;
    assert!(matches!(outcome, ActionOutcome::Failed { .. }));
    assert!(app.session.last_error().is_some());
    assert_eq!(
        app.session.navigator().tree().path_to(FolderId(1)),
        Some(vec![FolderId(1)])
    );
}

#[tokio::test]
async fn test_delete_folder_removes_subtree() {
    let mut app = TestApp::new().await;

    let outcome = app.session.handle(FolderAction::Delete(row(&app, "docs"))).await;

    assert_eq!(outcome, ActionOutcome::Deleted);
    let tree = app.session.navigator().tree();
    assert!(!tree.contains(FolderId(1)));
    assert!(!tree.contains(FolderId(3)));
    assert_eq!(app.row_names(), vec!["media", "readme.md"]);
    assert_eq!(app.notifier.successes(), vec![messages::DELETED]);
}

#[tokio::test]
async fn test_delete_drops_folder_from_history() {
    let mut app = TestApp::new().await;
    app.session.select_folder(FolderId(1)).await.unwrap();

    let reports = row(&app, "reports");
    app.session.select_folder(FolderId(2)).await.unwrap();
    app.session.select_folder(FolderId(1)).await.unwrap();
    let outcome = app.session.handle(FolderAction::Delete(reports)).await;

    assert_eq!(outcome, ActionOutcome::Deleted);
    assert_eq!(app.row_names(), vec!["plan.txt"]);
    assert_eq!(app.session.current_folder_id(), FolderId(1));
    assert_ne!(app.session.go_back().await.unwrap(), FolderId(2));
}
