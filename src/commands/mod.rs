//! Console command definitions and dispatch.

pub mod browse;
pub mod edit;
pub mod recycle;
pub mod transfer;
pub mod workspace;

use clap::{Parser, Subcommand};

use drivedesk_core::config::AppConfig;
use drivedesk_core::error::AppError;
use drivedesk_service::ActionOutcome;

use crate::output::OutputFormat;
use workspace::Workspace;

/// DriveDesk: folder and file management for a storage drive
#[derive(Debug, Parser)]
#[command(name = "drivedesk", version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show the folder tree
    Tree,
    /// List a folder's contents
    Ls(browse::LsArgs),
    /// Compute a folder's total size
    Size(browse::SizeArgs),
    /// Create a folder
    Mkdir(edit::MkdirArgs),
    /// Rename a folder or file
    Rename(edit::RenameArgs),
    /// Move a folder under another folder
    Mv(edit::MvArgs),
    /// Move a folder or file to the recycle bin
    Rm(edit::RmArgs),
    /// Upload local files into a folder
    Upload(transfer::UploadArgs),
    /// Download a file into the download directory
    Download(transfer::DownloadArgs),
    /// Recycle bin
    Recycle(recycle::RecycleArgs),
}

impl Commands {
    fn mutates(&self) -> bool {
        match self {
            Self::Tree | Self::Ls(_) | Self::Size(_) | Self::Download(_) => false,
            Self::Recycle(args) => args.mutates(),
            _ => true,
        }
    }
}

impl Cli {
    /// Execute the console command
    pub async fn execute(&self, config: AppConfig) -> Result<(), AppError> {
        let mut ws = Workspace::open(&config).await?;
        let format = self.format;

        match &self.command {
            Commands::Tree => browse::tree(&ws, format),
            Commands::Ls(args) => browse::ls(&mut ws, args, format).await?,
            Commands::Size(args) => browse::size(&mut ws, args, format).await?,
            Commands::Mkdir(args) => edit::mkdir(&mut ws, args).await?,
            Commands::Rename(args) => edit::rename(&mut ws, args).await?,
            Commands::Mv(args) => edit::mv(&mut ws, args).await?,
            Commands::Rm(args) => edit::rm(&mut ws, args).await?,
            Commands::Upload(args) => transfer::upload(&mut ws, args, format).await?,
            Commands::Download(args) => transfer::download(&mut ws, args, format).await?,
            Commands::Recycle(args) => recycle::execute(&mut ws, args, format).await?,
        }

        if self.command.mutates() {
            ws.save().await?;
        }
        Ok(())
    }
}

/// Turn a failed action into an error. The user message was already shown
/// by the notifier.
pub fn succeeded(outcome: ActionOutcome) -> Result<ActionOutcome, AppError> {
    match outcome {
        ActionOutcome::Failed { message } => Err(AppError::internal(message)),
        other => Ok(other),
    }
}
