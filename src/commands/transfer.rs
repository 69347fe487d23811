//! Upload and download commands.

use std::path::PathBuf;

use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use drivedesk_core::error::AppError;
use drivedesk_core::types::{FileId, FolderId};
use drivedesk_service::{ActionOutcome, FolderAction, UploadSource, format_size};

use super::succeeded;
use super::workspace::Workspace;
use crate::output::{self, OutputFormat};

/// Arguments for `upload`
#[derive(Debug, Args)]
pub struct UploadArgs {
    /// Local files to upload, in order
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,
    /// Target folder ID (omit for the top level)
    #[arg(short, long, default_value_t = 0)]
    pub to: i64,
}

/// Arguments for `download`
#[derive(Debug, Args)]
pub struct DownloadArgs {
    /// File ID
    pub file: i64,
    /// Folder containing the file
    #[arg(long = "in")]
    pub in_folder: i64,
}

/// Upload task display row
#[derive(Debug, Serialize, Tabled)]
struct TaskRow {
    /// File name
    file: String,
    /// Size
    size: String,
    /// Status
    status: String,
    /// Progress
    progress: String,
    /// Error
    error: String,
}

/// Upload files one after another into a folder.
pub async fn upload(
    ws: &mut Workspace,
    args: &UploadArgs,
    format: OutputFormat,
) -> Result<(), AppError> {
    let mut files = Vec::with_capacity(args.paths.len());
    for path in &args.paths {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| AppError::validation(format!("Not a file: {}", path.display())))?;
        let data = tokio::fs::read(path).await?;
        files.push(UploadSource::new(file_name, data));
    }

    ws.session.select_folder(FolderId(args.to)).await?;
    let summary = ws.session.upload_files(files).await?;

    let rows: Vec<TaskRow> = ws
        .session
        .uploads()
        .tasks()
        .map(|task| TaskRow {
            file: task.file_name.clone(),
            size: format_size(task.size_bytes),
            status: task.status().to_string(),
            progress: format!("{}%", task.progress),
            error: task.error.clone().unwrap_or_default(),
        })
        .collect();
    output::print_list(&rows, format);

    match summary.failure {
        Some(failure) => Err(failure.error),
        None => Ok(()),
    }
}

/// Download a file into the configured download directory.
pub async fn download(
    ws: &mut Workspace,
    args: &DownloadArgs,
    format: OutputFormat,
) -> Result<(), AppError> {
    let row = ws
        .file_row(FileId(args.file), FolderId(args.in_folder))
        .await?;
    let outcome = succeeded(ws.session.handle(FolderAction::Download(row)).await)?;
    match (format, &outcome) {
        (OutputFormat::Table, ActionOutcome::Downloaded { file_name, bytes }) => {
            output::print_kv("File", file_name);
            output::print_kv("Size", &format_size(*bytes));
        }
        _ => output::print_json(&outcome),
    }
    Ok(())
}
