//! Page inventory: which templates use which components.
//!
//! The inventory walks the views directory (plus any custom view paths),
//! runs the [`UsageExtractor`] over every template and keeps the templates
//! that reference at least one component. Layout templates are kept out via
//! the exclude globs of [`ProjectLayout`]; they are handled by
//! [`crate::layouts`].
//!
//! Paths are reported relative to the project root in storage form, e.g.
//! `app/views/cases/show.html.erb`.
//!
//! # Example
//!
//! ```rust,no_run
//! use antoinette_cli::config::ProjectLayout;
//! use antoinette_cli::usage::PageInventory;
//!
//! # fn example() -> anyhow::Result<()> {
//! let inventory = PageInventory::scan(&ProjectLayout::new("."))?;
//! for group in inventory.mappings() {
//!     println!("{:?} -> {:?}", group.components, group.templates);
//! }
//! # Ok(())
//! # }
//! ```

pub mod extractor;
pub mod report;

use anyhow::Result;
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, trace, warn};

use crate::config::ProjectLayout;
use crate::utils::read_source;

pub use extractor::UsageExtractor;
pub use report::UsageReport;

/// One template and the components it references directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewFile {
    /// Root-relative template path.
    pub path: String,
    /// Component names in first-seen order, without duplicates.
    pub components: Vec<String>,
}

impl ViewFile {
    /// Create a view file entry.
    pub fn new(path: impl Into<String>, components: Vec<String>) -> Self {
        Self {
            path: path.into(),
            components,
        }
    }
}

/// Templates that share exactly the same own component set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UsageGroup {
    /// Sorted component names.
    pub components: Vec<String>,
    /// Sorted template paths.
    pub templates: Vec<String>,
}

/// Every template that references at least one component.
#[derive(Debug, Clone, Default)]
pub struct PageInventory {
    views: Vec<ViewFile>,
}

impl PageInventory {
    /// Build an inventory from already extracted entries.
    #[must_use]
    pub fn from_views(views: Vec<ViewFile>) -> Self {
        Self { views }
    }

    /// Scan the project tree.
    ///
    /// Scan locations are the views directory plus each custom view path (a
    /// single file, or a directory scanned recursively). A template that
    /// cannot be read is logged and skipped.
    ///
    /// # Errors
    ///
    /// Returns an error if an exclude glob or the component namespace is invalid.
    pub fn scan(layout: &ProjectLayout) -> Result<Self> {
        let extractor = UsageExtractor::new(&layout.namespace)?;

        let mut views = Vec::new();
        for (file_path, relative) in layout.page_files()? {
            let content = match read_source(&file_path) {
                Ok(content) => content,
                Err(e) => {
                    warn!("Skipping template: {e}");
                    continue;
                }
            };

            let components = extractor.extract(&content);
            if components.is_empty() {
                trace!("No components in {relative}");
                continue;
            }

            debug!("{relative}: {}", components.join(", "));
            views.push(ViewFile::new(relative, components));
        }

        debug!("Inventory holds {} templates with components", views.len());
        Ok(Self { views })
    }

    /// The inventory entries in scan order.
    #[must_use]
    pub fn views(&self) -> &[ViewFile] {
        &self.views
    }

    /// Whether no template references a component.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.views.is_empty()
    }

    /// Group templates by their exact (sorted) component set.
    ///
    /// Groups are ordered by descending component count, then by component
    /// list; templates within a group are sorted.
    #[must_use]
    pub fn mappings(&self) -> Vec<UsageGroup> {
        let mut grouped: BTreeMap<Vec<String>, BTreeSet<String>> = BTreeMap::new();
        for view in &self.views {
            let mut key = view.components.clone();
            key.sort();
            grouped.entry(key).or_default().insert(view.path.clone());
        }

        let mut groups: Vec<UsageGroup> = grouped
            .into_iter()
            .map(|(components, templates)| UsageGroup {
                components,
                templates: templates.into_iter().collect(),
            })
            .collect();

        groups.sort_by(|a, b| {
            b.components.len().cmp(&a.components.len()).then_with(|| a.components.cmp(&b.components))
        });
        groups
    }

    /// All component names seen, sorted and unique.
    #[must_use]
    pub fn all_component_names(&self) -> Vec<String> {
        self.views
            .iter()
            .flat_map(|view| view.components.iter().cloned())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Component → templates that reference it directly.
    #[must_use]
    pub fn matrix(&self) -> BTreeMap<String, Vec<String>> {
        let mut matrix: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for view in &self.views {
            for component in &view.components {
                matrix.entry(component.clone()).or_default().push(view.path.clone());
            }
        }
        matrix
    }

    /// Template → own components, templates with the most components first.
    #[must_use]
    pub fn per_file(&self) -> Vec<(String, Vec<String>)> {
        let mut entries: Vec<(String, Vec<String>)> =
            self.views.iter().map(|v| (v.path.clone(), v.components.clone())).collect();
        entries.sort_by(|a, b| b.1.len().cmp(&a.1.len()));
        entries
    }
}
