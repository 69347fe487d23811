//! Mutating folder and file commands.

use clap::Args;

use drivedesk_core::error::AppError;
use drivedesk_core::types::{FileId, FolderId};
use drivedesk_entity::content::ContentRow;
use drivedesk_service::FolderAction;

use super::succeeded;
use super::workspace::Workspace;

/// Selects a folder, or a file inside a folder
#[derive(Debug, Args)]
#[group(required = true, multiple = false)]
pub struct TargetArgs {
    /// Folder ID
    #[arg(long)]
    pub folder: Option<i64>,
    /// File ID (requires --in)
    #[arg(long, requires = "in_folder")]
    pub file: Option<i64>,
}

/// Arguments for `mkdir`
#[derive(Debug, Args)]
pub struct MkdirArgs {
    /// Folder name
    pub name: String,
    /// Parent folder ID (omit for the top level)
    #[arg(short, long, default_value_t = 0)]
    pub parent: i64,
}

/// Arguments for `rename`
#[derive(Debug, Args)]
pub struct RenameArgs {
    #[command(flatten)]
    pub target: TargetArgs,
    /// Folder containing the file
    #[arg(long = "in", id = "in_folder")]
    pub in_folder: Option<i64>,
    /// New name
    pub name: String,
}

/// Arguments for `mv`
#[derive(Debug, Args)]
pub struct MvArgs {
    /// Folder to move
    pub folder: i64,
    /// Destination folder ID (0 for the top level)
    pub destination: i64,
}

/// Arguments for `rm`
#[derive(Debug, Args)]
pub struct RmArgs {
    #[command(flatten)]
    pub target: TargetArgs,
    /// Folder containing the file
    #[arg(long = "in", id = "in_folder")]
    pub in_folder: Option<i64>,
}

async fn target_row(
    ws: &mut Workspace,
    target: &TargetArgs,
    in_folder: Option<i64>,
) -> Result<ContentRow, AppError> {
    match (target.folder, target.file) {
        (Some(folder), _) => ws.folder_row(FolderId(folder)).await,
        (None, Some(file)) => {
            let folder = in_folder
                .ok_or_else(|| AppError::validation("--in is required with --file"))?;
            ws.file_row(FileId(file), FolderId(folder)).await
        }
        (None, None) => Err(AppError::validation("Pass --folder or --file")),
    }
}

/// Create a folder.
pub async fn mkdir(ws: &mut Workspace, args: &MkdirArgs) -> Result<(), AppError> {
    ws.session.select_folder(FolderId(args.parent)).await?;
    ws.session.create_folder(&args.name).await
}

/// Rename a folder or file.
pub async fn rename(ws: &mut Workspace, args: &RenameArgs) -> Result<(), AppError> {
    let row = target_row(ws, &args.target, args.in_folder).await?;
    succeeded(
        ws.session
            .handle(FolderAction::Rename {
                row,
                new_name: args.name.clone(),
            })
            .await,
    )?;
    Ok(())
}

/// Move a folder.
pub async fn mv(ws: &mut Workspace, args: &MvArgs) -> Result<(), AppError> {
    succeeded(
        ws.session
            .handle(FolderAction::Move {
                folder_id: FolderId(args.folder),
                destination: FolderId(args.destination),
            })
            .await,
    )?;
    Ok(())
}

/// Delete a folder or file.
pub async fn rm(ws: &mut Workspace, args: &RmArgs) -> Result<(), AppError> {
    let row = target_row(ws, &args.target, args.in_folder).await?;
    succeeded(ws.session.handle(FolderAction::Delete(row)).await)?;
    Ok(())
}
