//! Project layout settings: where templates and layouts live.

use anyhow::Result;
use glob::Pattern;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tracing::trace;

use crate::constants::{
    DEFAULT_EXCLUDE_PATTERN, DEFAULT_LAYOUT, DEFAULT_NAMESPACE, LAYOUTS_DIR, TEMPLATE_EXTENSION,
    VIEWS_DIR,
};
use crate::core::AntoinetteError;
use crate::utils::{find_files_with_extension, relative_to, strip_scan_root};

/// Scan settings for one project tree.
///
/// All directory fields are relative to [`ProjectLayout::root`] and use
/// forward slashes. Construct with [`ProjectLayout::new`] to get the Rails
/// conventions, then adjust with the `with_*` builders.
///
/// ```rust,no_run
/// use antoinette_cli::config::ProjectLayout;
///
/// let layout = ProjectLayout::new("/srv/app")
///     .with_custom_view_paths(vec!["app/content".to_string()])
///     .with_default_layout("marketing");
/// assert_eq!(layout.views_dir, "app/views");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectLayout {
    /// Project root every template path is reported relative to.
    pub root: PathBuf,
    /// Directory holding view templates and partials.
    pub views_dir: String,
    /// Primary layout directories, scanned one level deep.
    pub layout_dirs: Vec<String>,
    /// Layout used when a template's front-matter does not name one.
    pub default_layout: String,
    /// Extension shared by templates, partials and layouts.
    pub template_extension: String,
    /// Namespace of the component invocation pattern.
    pub namespace: String,
    /// Extra scan locations (file or directory) beyond the views directory.
    pub custom_view_paths: Vec<String>,
    /// Globs (relative to the root) kept out of the page inventory.
    pub exclude_patterns: Vec<String>,
}

impl ProjectLayout {
    /// Create settings with the default Rails conventions.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            views_dir: VIEWS_DIR.to_string(),
            layout_dirs: vec![LAYOUTS_DIR.to_string()],
            default_layout: DEFAULT_LAYOUT.to_string(),
            template_extension: TEMPLATE_EXTENSION.to_string(),
            namespace: DEFAULT_NAMESPACE.to_string(),
            custom_view_paths: Vec::new(),
            exclude_patterns: vec![DEFAULT_EXCLUDE_PATTERN.to_string()],
        }
    }

    /// Replace the extra scan locations.
    #[must_use]
    pub fn with_custom_view_paths(mut self, paths: Vec<String>) -> Self {
        self.custom_view_paths = paths;
        self
    }

    /// Replace the default layout name.
    #[must_use]
    pub fn with_default_layout(mut self, layout: impl Into<String>) -> Self {
        self.default_layout = layout.into();
        self
    }

    /// Add a primary layout directory.
    #[must_use]
    pub fn with_layout_dir(mut self, dir: impl Into<String>) -> Self {
        self.layout_dirs.push(dir.into());
        self
    }

    /// Replace the component namespace.
    #[must_use]
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    /// Add an inventory exclude glob.
    #[must_use]
    pub fn with_exclude(mut self, pattern: impl Into<String>) -> Self {
        self.exclude_patterns.push(pattern.into());
        self
    }

    /// Absolute path of the views directory.
    #[must_use]
    pub fn views_path(&self) -> PathBuf {
        self.root.join(&self.views_dir)
    }

    /// Resolve a root-relative location to an absolute path.
    #[must_use]
    pub fn resolve(&self, relative: &str) -> PathBuf {
        let path = Path::new(relative);
        if path.is_absolute() { path.to_path_buf() } else { self.root.join(path) }
    }

    /// Scan roots in storage form: the views directory, then each custom
    /// view path (root-relative when it lies under the root).
    #[must_use]
    pub fn scan_roots(&self) -> Vec<String> {
        let mut roots = vec![self.views_dir.trim_end_matches('/').to_string()];
        for custom in &self.custom_view_paths {
            let root = relative_to(&self.root, &self.resolve(custom.trim_end_matches('/')));
            if !roots.contains(&root) {
                roots.push(root);
            }
        }
        roots
    }

    /// Path of `file` below its scan root, the form partial names take.
    ///
    /// `app/views/cases/index.html.erb` → `cases/index.html.erb`.
    #[must_use]
    pub fn lookup_path(&self, file: &Path) -> String {
        let stored = relative_to(&self.root, file);
        strip_scan_root(&stored, &self.scan_roots()).to_string()
    }

    /// Every template file in the scan locations, de-duplicated and sorted.
    ///
    /// Scan locations are the views directory plus each custom view path (a
    /// single file, or a directory scanned recursively).
    #[must_use]
    pub fn template_files(&self) -> BTreeSet<PathBuf> {
        let extension = &self.template_extension;
        let mut files: BTreeSet<PathBuf> =
            find_files_with_extension(&self.views_path(), extension).into_iter().collect();

        for custom in &self.custom_view_paths {
            let full_path = self.resolve(custom);
            if full_path.is_file() {
                files.insert(full_path);
            } else {
                files.extend(find_files_with_extension(&full_path, extension));
            }
        }

        files
    }

    /// Servable template files with their root-relative paths.
    ///
    /// These are [`ProjectLayout::template_files`] minus everything matched
    /// by the exclude globs, layouts included.
    ///
    /// # Errors
    ///
    /// Returns [`AntoinetteError::InvalidPattern`] for a malformed glob.
    pub fn page_files(&self) -> Result<Vec<(PathBuf, String)>> {
        let excludes = self.exclude_globs()?;
        Ok(self
            .template_files()
            .into_iter()
            .filter_map(|file_path| {
                let relative = relative_to(&self.root, &file_path);
                if excludes.iter().any(|pattern| pattern.matches(&relative)) {
                    trace!("Excluded: {relative}");
                    None
                } else {
                    Some((file_path, relative))
                }
            })
            .collect())
    }

    /// Custom view paths that hold layouts rather than pages.
    ///
    /// A custom path counts as a layout location when one of its directory
    /// components is named `layouts`.
    #[must_use]
    pub fn custom_layout_paths(&self) -> Vec<String> {
        self.custom_view_paths
            .iter()
            .filter(|path| path.trim_end_matches('/').split('/').any(|c| c == "layouts"))
            .cloned()
            .collect()
    }

    /// Compile the inventory exclude globs.
    ///
    /// Custom layout paths are excluded too, so layout templates never show
    /// up as pages.
    ///
    /// # Errors
    ///
    /// Returns [`AntoinetteError::InvalidPattern`] for a malformed glob.
    pub fn exclude_globs(&self) -> Result<Vec<Pattern>> {
        let mut sources = self.exclude_patterns.clone();
        for path in self.custom_layout_paths() {
            let trimmed = path.trim_end_matches('/').to_string();
            sources.push(format!("{trimmed}/**"));
            sources.push(trimmed);
        }

        sources
            .iter()
            .map(|source| {
                Pattern::new(source).map_err(|e| {
                    AntoinetteError::InvalidPattern {
                        pattern: source.clone(),
                        reason: e.to_string(),
                    }
                    .into()
                })
            })
            .collect()
    }
}
