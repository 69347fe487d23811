//! Folder tree, navigation, move checks, size aggregation and CRUD.

pub mod move_check;
pub mod navigator;
pub mod service;
pub mod size;
pub mod tree;

pub use move_check::MoveValidator;
pub use navigator::FolderNavigator;
pub use service::FolderService;
pub use size::{SizeAggregator, SizeOutcome, SizeTracker, format_size};
pub use tree::{TreeBuilder, TreeService};
