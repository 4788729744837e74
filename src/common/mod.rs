//! Shared utilities across micropy-build modules.

pub mod files;
pub mod paths;

pub use files::{copy_dir_recursive, copy_file_with_metadata};
pub use paths::{ensure_dir_exists, remove_if_exists};
