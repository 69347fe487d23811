//! Read-only commands: tree, ls, size.

use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use drivedesk_core::error::AppError;
use drivedesk_core::types::FolderId;
use drivedesk_entity::content::ContentRow;
use drivedesk_entity::folder::FolderNode;
use drivedesk_service::{ActionOutcome, FolderAction, format_size};

use super::workspace::Workspace;
use super::succeeded;
use crate::output::{self, OutputFormat};

/// Arguments for `ls`
#[derive(Debug, Args)]
pub struct LsArgs {
    /// Folder ID (omit for the top level)
    #[arg(default_value_t = 0)]
    pub folder: i64,
}

/// Arguments for `size`
#[derive(Debug, Args)]
pub struct SizeArgs {
    /// Folder ID
    pub folder: i64,
}

/// Tree display row
#[derive(Debug, Serialize, Tabled)]
struct TreeRow {
    /// Folder ID
    id: i64,
    /// Name, indented by depth
    name: String,
    /// Children
    children: usize,
}

/// Content display row
#[derive(Debug, Serialize, Tabled)]
struct EntryRow {
    /// Kind
    kind: &'static str,
    /// ID
    id: i64,
    /// Name
    name: String,
    /// Size
    size: String,
    /// Modified at
    modified: String,
}

impl From<&ContentRow> for EntryRow {
    fn from(row: &ContentRow) -> Self {
        let (kind, id, size) = match row {
            ContentRow::Folder { id, .. } => ("folder", id.get(), String::new()),
            ContentRow::File { id, size_bytes, .. } => ("file", id.get(), format_size(*size_bytes)),
        };
        Self {
            kind,
            id,
            name: row.name().to_string(),
            size,
            modified: row
                .modified_at()
                .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
                .unwrap_or_default(),
        }
    }
}

fn flatten(roots: &[FolderNode]) -> Vec<TreeRow> {
    let mut rows = Vec::new();
    let mut stack: Vec<(&FolderNode, usize)> = roots.iter().rev().map(|n| (n, 0)).collect();
    while let Some((node, depth)) = stack.pop() {
        rows.push(TreeRow {
            id: node.id.get(),
            name: format!("{}{}", "  ".repeat(depth), node.name),
            children: node.children.len(),
        });
        stack.extend(node.children.iter().rev().map(|c| (c, depth + 1)));
    }
    rows
}

/// Print the folder tree.
pub fn tree(ws: &Workspace, format: OutputFormat) {
    let tree = ws.session.navigator().tree();
    match format {
        OutputFormat::Table => output::print_list(&flatten(&tree.roots), format),
        OutputFormat::Json => output::print_json(tree),
    }
}

/// List one folder.
pub async fn ls(ws: &mut Workspace, args: &LsArgs, format: OutputFormat) -> Result<(), AppError> {
    let folder_id = FolderId(args.folder);
    ws.session.select_folder(folder_id).await?;
    match format {
        OutputFormat::Table => {
            println!("{}", ws.session.path_label(folder_id));
            let rows: Vec<EntryRow> = ws.session.rows().iter().map(EntryRow::from).collect();
            output::print_list(&rows, format);
        }
        OutputFormat::Json => output::print_json(&ws.session.rows()),
    }
    Ok(())
}

/// Compute and print a folder's size.
pub async fn size(ws: &mut Workspace, args: &SizeArgs, format: OutputFormat) -> Result<(), AppError> {
    let outcome = succeeded(
        ws.session
            .handle(FolderAction::CalculateSize(FolderId(args.folder)))
            .await,
    )?;
    match (format, &outcome) {
        (OutputFormat::Table, ActionOutcome::SizeComputed { bytes, formatted, .. }) => {
            output::print_kv("Folder", &ws.session.path_label(FolderId(args.folder)));
            output::print_kv("Size", formatted);
            output::print_kv("Bytes", &bytes.to_string());
        }
        _ => output::print_json(&outcome),
    }
    Ok(())
}
