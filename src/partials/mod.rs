//! Partial inclusion tracking.
//!
//! A component referenced only inside a partial must be shipped to every
//! page that renders that partial. This module builds the inverse of the
//! inclusion relation, partial → templates that render it, from a single pass
//! over the same servable templates the page inventory scans.
//!
//! Two directive spellings are recognised, both taking a string path:
//!
//! - keyword form: `render partial: "shared/card"`
//! - shorthand form: `render "shared/card"`
//!
//! Parentheses are allowed (`render("card")`). Partial names are relative to
//! the scan root (`cases/_row.html.erb`), which is how Rails spells them in
//! the directives themselves. Rendering templates are recorded the way the
//! inventory reports them, relative to the project root.

use anyhow::{Context, Result};
use regex::Regex;
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, trace, warn};

use crate::config::ProjectLayout;
use crate::constants::PARTIAL_MARKER;
use crate::utils::{parent_dir, read_source};

/// Lookup of the templates that render a partial.
///
/// Implemented by [`PartialResolver`]; the weaver only depends on this trait
/// so tests can supply a fixed relation.
pub trait PartialLookup {
    /// Sorted, de-duplicated templates that render `partial_path`, or an
    /// empty list if nothing renders it.
    ///
    /// `partial_path` is relative to its scan root; the templates returned
    /// use the same form as the page inventory.
    fn resolve(&self, partial_path: &str) -> Vec<String>;
}

impl PartialLookup for BTreeMap<String, Vec<String>> {
    fn resolve(&self, partial_path: &str) -> Vec<String> {
        let mut parents = self.get(partial_path).cloned().unwrap_or_default();
        parents.sort();
        parents.dedup();
        parents
    }
}

/// Finds inclusion directives and canonicalises their arguments.
#[derive(Debug, Clone)]
pub struct InclusionScanner {
    keyword: Regex,
    shorthand: Regex,
    extension: String,
}

impl InclusionScanner {
    /// Create a scanner producing partial paths with `extension`.
    ///
    /// # Errors
    ///
    /// Returns an error if a directive regex fails to compile.
    pub fn new(extension: &str) -> Result<Self> {
        Ok(Self {
            keyword: Regex::new(r#"render[\s(]+partial:\s*["']([^"']+)["']"#)
                .context("Failed to compile keyword render pattern")?,
            shorthand: Regex::new(r#"render[\s(]+["']([^"']+)["']"#)
                .context("Failed to compile shorthand render pattern")?,
            extension: extension.to_string(),
        })
    }

    /// Extract the canonical partial paths rendered by `content`.
    ///
    /// `template_path` (views-relative) supplies the implied directory for
    /// bare partial names. Results are de-duplicated in first-seen order.
    #[must_use]
    pub fn extract_partial_paths(&self, content: &str, template_path: Option<&str>) -> Vec<String> {
        let mut seen = BTreeSet::new();
        self.keyword
            .captures_iter(content)
            .chain(self.shorthand.captures_iter(content))
            .filter_map(|cap| cap.get(1))
            .map(|m| normalize_partial_path(m.as_str(), template_path, &self.extension))
            .filter(|path| seen.insert(path.clone()))
            .collect()
    }
}

/// Turn a directive argument into the partial's file path.
///
/// - `shared/card` → `shared/_card.html.erb`
/// - `shared/_card` → `shared/_card.html.erb`
/// - `card` rendered from `cases/index.html.erb` → `cases/_card.html.erb`
/// - `card` with no including template → `_card.html.erb`
#[must_use]
pub fn normalize_partial_path(path: &str, template_path: Option<&str>, extension: &str) -> String {
    let (dir, name) = match path.rfind('/') {
        Some(idx) => (path[..idx].to_string(), &path[idx + 1..]),
        None => (template_path.map(parent_dir).unwrap_or_default().to_string(), path),
    };

    let mut file_name = if name.starts_with(PARTIAL_MARKER) {
        name.to_string()
    } else {
        format!("{PARTIAL_MARKER}{name}")
    };
    if !file_name.ends_with(extension) {
        file_name.push_str(extension);
    }

    if dir.is_empty() { file_name } else { format!("{dir}/{file_name}") }
}

/// The inclusion relation for one project, built once per run.
#[derive(Debug, Clone, Default)]
pub struct PartialResolver {
    partials: BTreeMap<String, BTreeSet<String>>,
}

impl PartialResolver {
    /// Scan every servable template: the views directory and the custom view
    /// paths, minus layouts and other excluded files.
    ///
    /// Layouts are never recorded as renderers; the fragments they render are
    /// folded into the layout by [`crate::layouts::LayoutResolver`].
    /// Unreadable templates are logged and skipped.
    ///
    /// # Errors
    ///
    /// Returns an error if an exclude glob is invalid or the directive
    /// patterns fail to compile.
    pub fn scan(layout: &ProjectLayout) -> Result<Self> {
        let scanner = InclusionScanner::new(&layout.template_extension)?;
        let mut resolver = Self::default();

        for (file_path, relative) in layout.page_files()? {
            match read_source(&file_path) {
                Ok(content) => {
                    resolver.collect(&scanner, &relative, &layout.lookup_path(&file_path), &content);
                }
                Err(e) => warn!("Skipping template while collecting partials: {e}"),
            }
        }

        debug!("Collected {} rendered partials", resolver.len());
        Ok(resolver)
    }

    /// Build the relation from `(template path, content)` pairs.
    ///
    /// The template path both names the renderer and anchors bare partial
    /// names, so it should be relative to the scan root.
    ///
    /// # Errors
    ///
    /// Returns an error only if the directive patterns fail to compile.
    pub fn from_sources<I>(sources: I, extension: &str) -> Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let scanner = InclusionScanner::new(extension)?;
        let mut resolver = Self::default();

        for (template_path, content) in sources {
            resolver.collect(&scanner, &template_path, &template_path, &content);
        }

        debug!("Collected {} rendered partials", resolver.len());
        Ok(resolver)
    }

    fn collect(
        &mut self,
        scanner: &InclusionScanner,
        template: &str,
        lookup_path: &str,
        content: &str,
    ) {
        for partial_path in scanner.extract_partial_paths(content, Some(lookup_path)) {
            trace!("{template} renders {partial_path}");
            self.partials.entry(partial_path).or_default().insert(template.to_string());
        }
    }

    /// Number of distinct partials rendered anywhere.
    #[must_use]
    pub fn len(&self) -> usize {
        self.partials.len()
    }

    /// Whether no inclusion directive was found.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.partials.is_empty()
    }
}

impl PartialLookup for PartialResolver {
    fn resolve(&self, partial_path: &str) -> Vec<String> {
        self.partials
            .get(partial_path)
            .map(|parents| parents.iter().cloned().collect())
            .unwrap_or_default()
    }
}
