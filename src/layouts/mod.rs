//! Layout resolution.
//!
//! Every page is wrapped by a layout, and components initialised by that
//! layout have to be shipped with the page. The [`LayoutResolver`] answers
//! two questions:
//!
//! - which layout wraps a template ([`LayoutResolver::layout_for`]): the one
//!   declared in its front-matter, or the configured default;
//! - which components that layout uses ([`LayoutResolver::components_for`]).
//!
//! Layout files are scanned once when the resolver is built. Primary layout
//! directories are read one level deep; custom layout locations (custom view
//! paths with a `layouts` component) may be a single file or a directory
//! scanned recursively. Layouts with the same name from different locations
//! contribute the union of their components.
//!
//! A layout's components include those of every fragment it renders,
//! followed through nested fragments, so a navigation partial rendered by
//! the application layout reaches every page that layout wraps.

pub mod frontmatter;

use anyhow::Result;
use std::collections::{BTreeMap, BTreeSet, VecDeque};
use std::path::{Path, PathBuf};
use tracing::{debug, trace, warn};

use crate::config::ProjectLayout;
use crate::partials::InclusionScanner;
use crate::usage::UsageExtractor;
use crate::utils::{file_stem_without, find_files_with_extension, list_files_with_extension, read_source};

/// Lookup of the layout components that apply to a template.
///
/// Implemented by [`LayoutResolver`]; the weaver only depends on this trait.
pub trait LayoutLookup {
    /// Components contributed by the layout wrapping `template_path`.
    fn components_for(&self, template_path: &str) -> Vec<String>;
}

/// Every template gets no layout components.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoLayouts;

impl LayoutLookup for NoLayouts {
    fn components_for(&self, _template_path: &str) -> Vec<String> {
        Vec::new()
    }
}

/// Layout names and their components for one project, built once per run.
#[derive(Debug, Clone)]
pub struct LayoutResolver {
    root: PathBuf,
    default_layout: String,
    usage: BTreeMap<String, Vec<String>>,
}

impl LayoutResolver {
    /// Scan the layout locations of `layout`.
    ///
    /// # Errors
    ///
    /// Returns an error if the component namespace is invalid or the
    /// directive patterns fail to compile.
    pub fn scan(layout: &ProjectLayout) -> Result<Self> {
        let extractor = UsageExtractor::new(&layout.namespace)?;
        let scanner = InclusionScanner::new(&layout.template_extension)?;
        let extension = &layout.template_extension;

        let mut files: Vec<PathBuf> = layout
            .layout_dirs
            .iter()
            .flat_map(|dir| list_files_with_extension(&layout.resolve(dir), extension))
            .collect();
        for custom in layout.custom_layout_paths() {
            let full_path = layout.resolve(&custom);
            if full_path.is_file() {
                files.push(full_path);
            } else {
                files.extend(find_files_with_extension(&full_path, extension));
            }
        }

        let mut usage: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for file_path in files {
            let content = match read_source(&file_path) {
                Ok(content) => content,
                Err(e) => {
                    warn!("Skipping layout: {e}");
                    continue;
                }
            };

            let name = file_stem_without(&file_path, extension);
            let lookup_path = layout.lookup_path(&file_path);
            let rendered = scanner.extract_partial_paths(&content, Some(lookup_path.as_str()));
            let mut found = extractor.extract(&content);
            found.extend(fragment_components(&layout.views_path(), &extractor, &scanner, rendered));

            let components = usage.entry(name.clone()).or_default();
            for component in found {
                if !components.contains(&component) {
                    components.push(component);
                }
            }
            debug!("Layout {name}: [{}]", components.join(", "));
        }

        Ok(Self {
            root: layout.root.clone(),
            default_layout: layout.default_layout.clone(),
            usage,
        })
    }

    /// Build a resolver from a known layout → components map.
    #[must_use]
    pub fn from_usage(
        root: impl Into<PathBuf>,
        default_layout: impl Into<String>,
        usage: BTreeMap<String, Vec<String>>,
    ) -> Self {
        Self {
            root: root.into(),
            default_layout: default_layout.into(),
            usage,
        }
    }

    /// Layout name → components it references.
    #[must_use]
    pub fn layout_usage_map(&self) -> &BTreeMap<String, Vec<String>> {
        &self.usage
    }

    /// The layout wrapping `template_path` (root-relative or absolute).
    ///
    /// Falls back to the default layout when the template is missing, has no
    /// front-matter, has unparsable front-matter, or declares no layout.
    #[must_use]
    pub fn layout_for(&self, template_path: &str) -> String {
        let full_path = self.root.join(template_path);
        let Ok(content) = read_source(&full_path) else {
            return self.default_layout.clone();
        };

        frontmatter::declared_layout(&content).unwrap_or_else(|| self.default_layout.clone())
    }
}

/// Components of the fragments a layout renders, nested fragments included.
///
/// Fragments are read from the views directory; missing ones are skipped.
fn fragment_components(
    views_path: &Path,
    extractor: &UsageExtractor,
    scanner: &InclusionScanner,
    rendered: Vec<String>,
) -> Vec<String> {
    let mut components = Vec::new();
    let mut visited = BTreeSet::new();
    let mut queue = VecDeque::from(rendered);

    while let Some(partial) = queue.pop_front() {
        if !visited.insert(partial.clone()) {
            continue;
        }
        let content = match read_source(&views_path.join(&partial)) {
            Ok(content) => content,
            Err(e) => {
                debug!("Layout fragment skipped: {e}");
                continue;
            }
        };
        trace!("Layout renders {partial}");
        components.extend(extractor.extract(&content));
        queue.extend(scanner.extract_partial_paths(&content, Some(partial.as_str())));
    }

    components
}

impl LayoutLookup for LayoutResolver {
    fn components_for(&self, template_path: &str) -> Vec<String> {
        let layout = self.layout_for(template_path);
        self.usage.get(&layout).cloned().unwrap_or_default()
    }
}
