//! Integration tests driving a folder session against the in-memory backend.

mod helpers;

mod folder_test;
mod recycle_test;
mod size_test;
mod snapshot_test;
mod transfer_test;
