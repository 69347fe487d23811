//! Uploads and downloads through a session.

use drivedesk_core::traits::FolderAdminApi;
use drivedesk_core::types::FolderId;
use drivedesk_entity::transfer::TransferStatus;
use drivedesk_service::{ActionOutcome, FolderAction, UploadSource};

use crate::helpers::{FS, TestApp};

#[tokio::test]
async fn test_upload_batch_into_open_folder() {
    let mut app = TestApp::new().await;
    app.session.select_folder(FolderId(4)).await.unwrap();
    let progress = app.session.uploads().subscribe();

    let summary = app
        .session
        .upload_files(vec![
            UploadSource::new("a.txt", b"0123456789".to_vec()),
            UploadSource::new("b.txt", b"abcdef".to_vec()),
        ])
        .await
        .unwrap();

    assert_eq!(summary.completed, 2);
    assert!(summary.failure.is_none());
    assert_eq!(app.row_names(), vec!["a.txt", "b.txt", "photo.jpg"]);
    assert!(
        app.session
            .uploads()
            .tasks()
            .all(|t| t.status() == TransferStatus::Completed && t.progress == 100)
    );
    assert_eq!(progress.borrow().percent, 100);
    assert_eq!(progress.borrow().completed, 2);
}

#[tokio::test]
async fn test_upload_rejects_bad_batch_whole() {
    let mut app = TestApp::new().await;

    let result = app
        .session
        .upload_files(vec![
            UploadSource::new("ok.txt", b"fine".to_vec()),
            UploadSource::new("big.bin", vec![0u8; 2048]),
        ])
        .await;

    assert!(result.is_err());
    assert_eq!(app.session.uploads().tasks().count(), 0);
    assert_eq!(app.row_names(), vec!["docs", "media", "readme.md"]);

    let result = app
        .session
        .upload_files(vec![UploadSource::new("bad|name.txt", b"x".to_vec())])
        .await;
    assert!(result.is_err());
    assert_eq!(app.notifier.errors().len(), 2);
}

#[tokio::test]
async fn test_upload_stops_at_first_failure() {
    let mut app = TestApp::new().await;
    app.session.select_folder(FolderId(4)).await.unwrap();
    app.backend.delete_folder(FolderId(4), FS).await.unwrap();

    let summary = app
        .session
        .upload_files(vec![
            UploadSource::new("one.txt", b"1".to_vec()),
            UploadSource::new("two.txt", b"2".to_vec()),
        ])
        .await
        .unwrap();

    assert_eq!(summary.completed, 0);
    assert_eq!(summary.not_attempted, 1);
    assert_eq!(summary.failure.as_ref().unwrap().file_name, "one.txt");
    let statuses: Vec<_> = app.session.uploads().tasks().map(|t| t.status()).collect();
    assert_eq!(statuses, vec![TransferStatus::Error, TransferStatus::Pending]);
    assert!(app.session.last_error().is_some());
}

#[tokio::test]
async fn test_download_saves_file() {
    let mut app = TestApp::new().await;
    app.session.select_folder(FolderId(4)).await.unwrap();
    let photo = app.session.rows()[0].clone();

    let outcome = app.session.handle(FolderAction::Download(photo)).await;

    assert_eq!(
        outcome,
        ActionOutcome::Downloaded {
            file_name: "photo.jpg".into(),
            bytes: 2048,
        }
    );
    let saved = tokio::fs::read(app.downloads.path().join("photo.jpg"))
        .await
        .unwrap();
    assert_eq!(saved.len(), 2048);
}

#[tokio::test]
async fn test_download_folder_row_fails() {
    let mut app = TestApp::new().await;
    let docs = app.session.rows()[0].clone();

    let outcome = app.session.handle(FolderAction::Download(docs)).await;

    assert_eq!(
        outcome,
        ActionOutcome::Failed {
            message: "Only files can be downloaded".into()
        }
    );
}

#[tokio::test]
async fn test_files_left_by_failed_batch_stay_out_of_next_folder() {
    let mut app = TestApp::rejecting_upload("b.txt").await;
    app.session.select_folder(FolderId(1)).await.unwrap();

    let first = app
        .session
        .upload_files(vec![
            UploadSource::new("a.txt", b"aaaa".to_vec()),
            UploadSource::new("b.txt", b"bbbb".to_vec()),
            UploadSource::new("c.txt", b"cccc".to_vec()),
        ])
        .await
        .unwrap();
    assert_eq!(first.completed, 1);
    assert_eq!(first.failure.as_ref().map(|f| f.file_name.as_str()), Some("b.txt"));
    assert!(app.notifier.successes().is_empty());

    app.session.select_folder(FolderId(4)).await.unwrap();
    let second = app
        .session
        .upload_files(vec![UploadSource::new("new.txt", b"new".to_vec())])
        .await
        .unwrap();

    assert_eq!(second.completed, 1);
    assert_eq!(app.row_names(), vec!["new.txt", "photo.jpg"]);

    app.session.select_folder(FolderId(1)).await.unwrap();
    assert!(!app.row_names().contains(&"c.txt".to_string()));
    assert!(app.row_names().contains(&"a.txt".to_string()));
}
