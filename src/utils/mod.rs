//! Utility modules for Antoinette
//!
//! - [`fs`]: template reads, recursive listing and atomic writes
//! - [`paths`]: storage-form template identifiers and partial detection

pub mod fs;
pub mod paths;

pub use fs::{
    atomic_write, ensure_dir, find_files_with_extension, list_files_with_extension, read_source,
};
pub use paths::{
    file_stem_without, is_partial_below, is_partial_path, normalize_path_for_storage, parent_dir,
    relative_to, strip_scan_root,
};
