//! Recursive folder sizes by bounded fan-out over content listings.

use std::collections::HashSet;
use std::sync::Arc;

use dashmap::{DashMap, DashSet};
use futures::StreamExt;
use futures::stream;
use serde::Serialize;
use tracing::{debug, info, warn};

use drivedesk_core::error::AppError;
use drivedesk_core::traits::{FolderContentApi, FolderListing};
use drivedesk_core::types::{FileSystemId, FolderId};

const UNITS: [&str; 4] = ["KB", "MB", "GB", "TB"];

/// Human-readable size in binary units: `"512 B"`, `"1.50 KB"`, `"2.00 GB"`.
pub fn format_size(bytes: u64) -> String {
    if bytes < 1024 {
        return format!("{bytes} B");
    }
    let mut value = bytes as f64 / 1024.0;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    format!("{value:.2} {}", UNITS[unit])
}

/// Sums file sizes below a folder.
///
/// Folders are walked level by level. Each level is listed concurrently,
/// at most `max_fan_out` calls at a time, and joined before the next level
/// starts. A visited set stops backend-reported loops.
#[derive(Clone)]
pub struct SizeAggregator {
    contents: Arc<dyn FolderContentApi>,
    file_system_id: FileSystemId,
    max_fan_out: usize,
}

impl std::fmt::Debug for SizeAggregator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SizeAggregator")
            .field("file_system_id", &self.file_system_id)
            .field("max_fan_out", &self.max_fan_out)
            .finish()
    }
}

impl SizeAggregator {
    /// Creates a new aggregator.
    pub fn new(
        contents: Arc<dyn FolderContentApi>,
        file_system_id: FileSystemId,
        max_fan_out: usize,
    ) -> Self {
        Self {
            contents,
            file_system_id,
            max_fan_out: max_fan_out.max(1),
        }
    }

    /// Total bytes of every file at or below `folder_id`.
    ///
    /// Fails only when `folder_id` itself cannot be listed; a subfolder
    /// whose listing fails counts as 0.
    pub async fn compute_total_bytes(&self, folder_id: FolderId) -> Result<u64, AppError> {
        let top = self.list(folder_id).await?;

        let mut visited = HashSet::from([folder_id]);
        let mut total = top.local_bytes();
        let mut level: Vec<FolderId> = top
            .folders
            .iter()
            .map(|f| f.id)
            .filter(|id| visited.insert(*id))
            .collect();

        let mut depth = 1usize;
        while !level.is_empty() {
            debug!(folder_id = %folder_id, depth, width = level.len(), "Listing size level");
            let listings: Vec<(FolderId, Result<FolderListing, AppError>)> = stream::iter(level)
                .map(|id| async move { (id, self.list(id).await) })
                .buffer_unordered(self.max_fan_out)
                .collect()
                .await;

            let mut next = Vec::new();
            for (id, listing) in listings {
                match listing {
                    Ok(listing) => {
                        total += listing.local_bytes();
                        next.extend(
                            listing
                                .folders
                                .iter()
                                .map(|f| f.id)
                                .filter(|child| visited.insert(*child)),
                        );
                    }
                    Err(err) => {
                        warn!(folder_id = %id, error = %err, "Subfolder listing failed, counted as empty");
                    }
                }
            }
            level = next;
            depth += 1;
        }

        Ok(total)
    }

    async fn list(&self, folder_id: FolderId) -> Result<FolderListing, AppError> {
        self.contents
            .list_contents(folder_id, self.file_system_id)
            .await?
            .into_result()
    }
}

/// Result of a size request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SizeOutcome {
    /// The size was computed and cached.
    Computed {
        /// Total bytes.
        bytes: u64,
        /// Display string, as cached.
        formatted: String,
    },
    /// A computation for this folder is already running.
    AlreadyComputing,
}

/// Size cache plus the set of folders currently being computed.
///
/// Clones share both, so concurrent requests for one folder from any clone
/// collapse into a single computation. The latest success wins and entries
/// are never invalidated.
#[derive(Debug, Clone)]
pub struct SizeTracker {
    aggregator: SizeAggregator,
    cache: Arc<DashMap<FolderId, String>>,
    computing: Arc<DashSet<FolderId>>,
}

/// Removes a folder from the in-flight set when the request ends, however
/// it ends.
struct InFlight {
    computing: Arc<DashSet<FolderId>>,
    folder_id: FolderId,
}

impl Drop for InFlight {
    fn drop(&mut self) {
        self.computing.remove(&self.folder_id);
    }
}

impl SizeTracker {
    /// Creates a tracker with an empty cache.
    pub fn new(aggregator: SizeAggregator) -> Self {
        Self {
            aggregator,
            cache: Arc::new(DashMap::new()),
            computing: Arc::new(DashSet::new()),
        }
    }

    /// Compute and cache the size of `folder_id`, unless it is already
    /// being computed. On failure the cache is left untouched.
    pub async fn request(&self, folder_id: FolderId) -> Result<SizeOutcome, AppError> {
        if !self.computing.insert(folder_id) {
            return Ok(SizeOutcome::AlreadyComputing);
        }
        let _guard = InFlight {
            computing: Arc::clone(&self.computing),
            folder_id,
        };

        let bytes = self.aggregator.compute_total_bytes(folder_id).await?;
        let formatted = format_size(bytes);
        self.cache.insert(folder_id, formatted.clone());
        info!(folder_id = %folder_id, bytes, "Folder size computed");
        Ok(SizeOutcome::Computed { bytes, formatted })
    }

    /// The cached display size of `folder_id`.
    pub fn formatted(&self, folder_id: FolderId) -> Option<String> {
        self.cache.get(&folder_id).map(|entry| entry.value().clone())
    }

    /// Whether a computation for `folder_id` is running.
    pub fn is_computing(&self, folder_id: FolderId) -> bool {
        self.computing.contains(&folder_id)
    }
}
