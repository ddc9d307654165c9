//! Path helpers for template identifiers.
//!
//! Templates are identified by forward-slash strings relative to the project
//! root (`app/views/cases/show.html.erb`), so that the artifact is identical
//! across platforms and diffs only when content changes.

use std::path::Path;

use crate::constants::PARTIAL_MARKER;

/// Normalizes a path for storage by converting all separators to forward slashes.
///
/// Windows extended-length prefixes produced by `canonicalize()` are stripped.
#[must_use]
pub fn normalize_path_for_storage<P: AsRef<Path>>(path: P) -> String {
    let path_str = path.as_ref().to_string_lossy();

    let cleaned = if let Some(stripped) = path_str.strip_prefix(r"\\?\UNC\") {
        format!("//{stripped}")
    } else if let Some(stripped) = path_str.strip_prefix(r"\\?\") {
        stripped.to_string()
    } else {
        path_str.to_string()
    };

    cleaned.replace('\\', "/")
}

/// Returns `path` relative to `root` in storage form.
///
/// Paths outside `root` are returned in storage form unchanged.
#[must_use]
pub fn relative_to(root: &Path, path: &Path) -> String {
    match path.strip_prefix(root) {
        Ok(relative) => normalize_path_for_storage(relative),
        Err(_) => normalize_path_for_storage(path),
    }
}

/// Strips `extension` from the file name of `path`, returning the bare name.
///
/// `app/views/layouts/blog.html.erb` → `blog`.
#[must_use]
pub fn file_stem_without(path: &Path, extension: &str) -> String {
    let name = path.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default();
    name.strip_suffix(extension).map_or_else(|| name.clone(), str::to_string)
}

/// Returns the directory part of a storage path, or `""` for a bare name.
#[must_use]
pub fn parent_dir(path: &str) -> &str {
    path.rfind('/').map_or("", |idx| &path[..idx])
}

/// Whether a storage path names a partial.
///
/// A path is a partial when its file name or any directory component starts
/// with the partial marker (`cases/_row.html.erb`, `_shared/card.html.erb`).
#[must_use]
pub fn is_partial_path(path: &str) -> bool {
    path.split('/').any(|component| component.starts_with(PARTIAL_MARKER))
}

/// The part of a storage path below the most specific scan root containing it.
///
/// A root equal to the whole path (a single-file scan location) leaves just
/// the file name. Paths under no root are returned unchanged.
#[must_use]
pub fn strip_scan_root<'p, S: AsRef<str>>(path: &'p str, roots: &[S]) -> &'p str {
    roots
        .iter()
        .filter_map(|root| {
            let root = root.as_ref().trim_end_matches('/');
            if root.is_empty() {
                return None;
            }
            if path == root {
                return Some(path.rfind('/').map_or(path, |idx| &path[idx + 1..]));
            }
            path.strip_prefix(root)?.strip_prefix('/')
        })
        .min_by_key(|rest| rest.len())
        .unwrap_or(path)
}

/// Whether a storage path names a partial, judged only below its scan root.
///
/// Directories above the scan root (`/home/_ci/views`) do not make every
/// template underneath a partial.
#[must_use]
pub fn is_partial_below<S: AsRef<str>>(path: &str, roots: &[S]) -> bool {
    is_partial_path(strip_scan_root(path, roots))
}
