//! File system helpers shared by the scanners and the artifact writer.
//!
//! Reads go through [`read_source`], which turns I/O failures into the
//! typed [`AntoinetteError::SourceUnreadable`] so that scanners can log and
//! skip a single file. Writes go through [`atomic_write`] so a crashed run
//! never leaves a half-written artifact behind.

use anyhow::{Context, Result};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::trace;
use walkdir::WalkDir;

use crate::core::AntoinetteError;

/// Ensures a directory exists, creating it and its parents if necessary.
///
/// # Errors
///
/// Returns an error if the directory cannot be created or if the path exists
/// but is not a directory.
pub fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)
            .with_context(|| format!("Failed to create directory: {}", path.display()))?;
    } else if !path.is_dir() {
        return Err(anyhow::anyhow!("Path exists but is not a directory: {}", path.display()));
    }
    Ok(())
}

/// Writes `content` to `path` via a sibling temporary file and a rename.
///
/// Parent directories are created as needed.
///
/// # Errors
///
/// Returns [`AntoinetteError::WriteFailed`] (wrapped in `anyhow`) if any step fails.
pub fn atomic_write(path: &Path, content: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        ensure_dir(parent)?;
    }

    let temp_path = path.with_extension("tmp");
    let write_failed = |e: std::io::Error| AntoinetteError::WriteFailed {
        path: path.display().to_string(),
        reason: e.to_string(),
    };

    {
        let mut file = fs::File::create(&temp_path).map_err(write_failed)?;
        file.write_all(content).map_err(write_failed)?;
        file.sync_all().map_err(write_failed)?;
    }

    fs::rename(&temp_path, path).map_err(write_failed)?;
    Ok(())
}

/// Reads a template or layout as UTF-8 text.
///
/// # Errors
///
/// Returns [`AntoinetteError::SourceUnreadable`] when the file is missing,
/// unreadable or not valid UTF-8.
pub fn read_source(path: &Path) -> std::result::Result<String, AntoinetteError> {
    fs::read_to_string(path).map_err(|e| AntoinetteError::SourceUnreadable {
        path: path.display().to_string(),
        reason: e.to_string(),
    })
}

/// Lists every file under `dir` whose name ends with `extension`, recursively.
///
/// A missing directory yields an empty list. Entries that cannot be visited
/// are skipped. The result is sorted so scans are order-stable.
#[must_use]
pub fn find_files_with_extension(dir: &Path, extension: &str) -> Vec<PathBuf> {
    if !dir.is_dir() {
        trace!("Skipping missing directory {}", dir.display());
        return Vec::new();
    }

    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .follow_links(false)
        .into_iter()
        .filter_map(std::result::Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| entry.file_name().to_string_lossy().ends_with(extension))
        .map(walkdir::DirEntry::into_path)
        .collect();

    files.sort();
    files
}

/// Lists the files directly inside `dir` (no recursion) ending with `extension`.
#[must_use]
pub fn list_files_with_extension(dir: &Path, extension: &str) -> Vec<PathBuf> {
    if !dir.is_dir() {
        return Vec::new();
    }

    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(false)
        .into_iter()
        .filter_map(std::result::Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| entry.file_name().to_string_lossy().ends_with(extension))
        .map(walkdir::DirEntry::into_path)
        .collect();

    files.sort();
    files
}
