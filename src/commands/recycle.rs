//! Recycle bin commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use drivedesk_core::error::AppError;
use drivedesk_core::types::{FileId, FolderId, PageRequest};
use drivedesk_entity::recycle::{RecycleBin, RestoreSelection};
use drivedesk_service::{ActionOutcome, FolderAction, format_size};

use super::succeeded;
use super::workspace::Workspace;
use crate::output::{self, OutputFormat};

/// Arguments for recycle bin commands
#[derive(Debug, Args)]
pub struct RecycleArgs {
    /// Recycle bin subcommand
    #[command(subcommand)]
    pub command: RecycleCommand,
}

impl RecycleArgs {
    pub(super) fn mutates(&self) -> bool {
        matches!(self.command, RecycleCommand::Restore { .. })
    }
}

/// Recycle bin subcommands
#[derive(Debug, Subcommand)]
pub enum RecycleCommand {
    /// List deleted folders and files
    List {
        /// Page number
        #[arg(long, default_value_t = 1)]
        page: u64,
        /// Page size
        #[arg(long, default_value_t = 25)]
        page_size: u64,
    },
    /// Restore deleted folders and files
    Restore {
        /// Folder ID to restore (repeatable)
        #[arg(long = "folder")]
        folders: Vec<i64>,
        /// File to restore as FILE_ID:FOLDER_ID (repeatable)
        #[arg(long = "file", value_parser = parse_file_pair)]
        files: Vec<(i64, i64)>,
    },
}

fn parse_file_pair(raw: &str) -> Result<(i64, i64), String> {
    let (file, folder) = raw
        .split_once(':')
        .ok_or_else(|| format!("expected FILE_ID:FOLDER_ID, got '{raw}'"))?;
    let file = file.trim().parse().map_err(|e| format!("bad file id: {e}"))?;
    let folder = folder.trim().parse().map_err(|e| format!("bad folder id: {e}"))?;
    Ok((file, folder))
}

/// Deleted folder display row
#[derive(Debug, Serialize, Tabled)]
struct DeletedFolderRow {
    /// Folder ID
    id: i64,
    /// Name
    name: String,
    /// Parent folder ID
    parent_id: i64,
}

/// Deleted file display row
#[derive(Debug, Serialize, Tabled)]
struct DeletedFileRow {
    /// File ID
    id: i64,
    /// Name
    name: String,
    /// Size
    size: String,
    /// Folder ID
    folder_id: i64,
    /// Folder name
    folder: String,
}

/// Execute recycle bin commands
pub async fn execute(
    ws: &mut Workspace,
    args: &RecycleArgs,
    format: OutputFormat,
) -> Result<(), AppError> {
    match &args.command {
        RecycleCommand::List { page, page_size } => {
            let outcome = succeeded(ws.session.handle(FolderAction::OpenRecycleBin).await)?;
            if let ActionOutcome::RecycleBin(bin) = outcome {
                print_bin(&bin, &PageRequest::new(*page, *page_size), format);
            }
        }
        RecycleCommand::Restore { folders, files } => {
            let selection = RestoreSelection {
                folder_ids: folders.iter().copied().map(FolderId).collect(),
                files: files
                    .iter()
                    .map(|(file, folder)| (FileId(*file), FolderId(*folder)))
                    .collect(),
            };
            succeeded(ws.session.handle(FolderAction::Restore(selection)).await)?;
        }
    }
    Ok(())
}

fn print_bin(bin: &RecycleBin, request: &PageRequest, format: OutputFormat) {
    let folders = bin.folders_page(request);
    let files = bin.files_page(request);
    match format {
        OutputFormat::Json => {
            output::print_json(&serde_json::json!({ "folders": folders, "files": files }));
        }
        OutputFormat::Table => {
            println!(
                "Deleted folders (page {} of {}, {} total)",
                folders.page,
                folders.total_pages.max(1),
                folders.total_items
            );
            let rows: Vec<DeletedFolderRow> = folders
                .items
                .iter()
                .map(|f| DeletedFolderRow {
                    id: f.id.get(),
                    name: f.name.clone(),
                    parent_id: f.parent_id.get(),
                })
                .collect();
            output::print_list(&rows, format);

            println!(
                "Deleted files (page {} of {}, {} total)",
                files.page,
                files.total_pages.max(1),
                files.total_items
            );
            let rows: Vec<DeletedFileRow> = files
                .items
                .iter()
                .map(|f| DeletedFileRow {
                    id: f.record.id.get(),
                    name: f.record.name.clone(),
                    size: format_size(f.record.size_bytes),
                    folder_id: f.record.parent_id.get(),
                    folder: f.parent_folder_name.clone(),
                })
                .collect();
            output::print_list(&rows, format);
        }
    }
}
