//! Rows of the currently open folder.

pub mod row;

pub use row::ContentRow;
