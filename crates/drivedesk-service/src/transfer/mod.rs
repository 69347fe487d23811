//! Upload queue and single-file download.

pub mod download;
pub mod upload;

pub use download::DownloadService;
pub use upload::{BatchProgress, UploadFailure, UploadManager, UploadSource, UploadSummary};
