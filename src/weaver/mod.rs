//! Partitioning templates into bundles.
//!
//! The weaver combines the three per-run relations:
//!
//! 1. the page inventory, grouped by each template's own component set;
//! 2. the partial inclusion relation, which redirects a fragment's components
//!    onto every page that (transitively) renders it;
//! 3. the layout lookup, which adds the wrapping layout's components.
//!
//! Each servable template ends up with exactly one final component set:
//! its own components, plus those of every fragment it renders, plus those
//! of its layout. Templates are then grouped by that final set, so every
//! template lands in exactly one bundle and no two bundles share a set.
//!
//! Fragments are never bundled under their own path. A fragment that nothing
//! renders contributes nothing.
//!
//! # Ordering
//!
//! Component and template lists are sorted. Bundles are named in canonical
//! order (most components first, then by component list) so a deterministic
//! namer gives the same name to the same set on every run, and are returned
//! ordered by descending component count with ties broken by name.

pub mod naming;

use anyhow::Result;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::{BTreeMap, BTreeSet, VecDeque};
use tracing::debug;

use crate::config::ProjectLayout;
use crate::constants::{FINGERPRINT_LENGTH, MAX_NAME_ATTEMPTS, VIEWS_DIR};
use crate::layouts::{LayoutLookup, LayoutResolver};
use crate::partials::{PartialLookup, PartialResolver};
use crate::usage::{PageInventory, UsageGroup};
use crate::utils::{is_partial_below, strip_scan_root};

pub use naming::{BundleNamer, HaikuNamer, SequentialNamer};

/// A set of templates that need exactly the same components.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bundle {
    /// Generated name, unique within one run.
    pub name: String,
    /// Sorted component names.
    #[serde(rename = "elm_apps", alias = "components")]
    pub components: Vec<String>,
    /// Sorted root-relative template paths.
    pub templates: Vec<String>,
}

impl Bundle {
    /// Short hex SHA-256 of the component list.
    ///
    /// Two bundles with the same components share a fingerprint regardless
    /// of their generated names.
    #[must_use]
    pub fn fingerprint(&self) -> String {
        let mut hasher = Sha256::new();
        for component in &self.components {
            hasher.update(component.as_bytes());
            hasher.update(b"\n");
        }
        let mut digest = hex::encode(hasher.finalize());
        digest.truncate(FINGERPRINT_LENGTH);
        digest
    }

    /// Whether the bundle ships `component`.
    #[must_use]
    pub fn contains(&self, component: &str) -> bool {
        self.components.binary_search_by(|c| c.as_str().cmp(component)).is_ok()
    }
}

/// Combines inventory groups with partial and layout lookups.
pub struct Weaver<'a> {
    groups: Vec<UsageGroup>,
    partials: &'a dyn PartialLookup,
    layouts: &'a dyn LayoutLookup,
    scan_roots: Vec<String>,
}

impl<'a> Weaver<'a> {
    /// Create a weaver over inventory `groups`.
    ///
    /// Inventory paths are expected under the views directory
    /// (`app/views/...`); use [`Weaver::with_views_prefix`] or
    /// [`Weaver::with_scan_roots`] when they are not.
    #[must_use]
    pub fn new(
        groups: Vec<UsageGroup>,
        partials: &'a dyn PartialLookup,
        layouts: &'a dyn LayoutLookup,
    ) -> Self {
        Self {
            groups,
            partials,
            layouts,
            scan_roots: vec![VIEWS_DIR.to_string()],
        }
    }

    /// Single scan root separating inventory paths from the partial names
    /// the lookup speaks. An empty prefix means both use the same form.
    #[must_use]
    pub fn with_views_prefix(self, prefix: impl Into<String>) -> Self {
        self.with_scan_roots(vec![prefix.into()])
    }

    /// Every scan root inventory paths may live under.
    #[must_use]
    pub fn with_scan_roots(mut self, roots: Vec<String>) -> Self {
        self.scan_roots = roots
            .into_iter()
            .map(|root| root.trim_end_matches('/').to_string())
            .filter(|root| !root.is_empty())
            .collect();
        self
    }

    fn partial_name<'p>(&self, path: &'p str) -> &'p str {
        strip_scan_root(path, &self.scan_roots)
    }

    fn is_fragment(&self, path: &str) -> bool {
        is_partial_below(path, &self.scan_roots)
    }

    /// The servable templates a template stands for.
    ///
    /// A page stands for itself. A fragment stands for every non-fragment
    /// template that renders it, directly or through other fragments; the
    /// result is sorted and empty if nothing renders it.
    #[must_use]
    pub fn resolve_template(&self, template: &str) -> Vec<String> {
        if !self.is_fragment(template) {
            return vec![template.to_string()];
        }

        let mut pages = BTreeSet::new();
        let mut visited = BTreeSet::new();
        let mut queue = VecDeque::from([self.partial_name(template).to_string()]);

        while let Some(fragment) = queue.pop_front() {
            if !visited.insert(fragment.clone()) {
                continue;
            }
            for parent in self.partials.resolve(&fragment) {
                if self.is_fragment(&parent) {
                    queue.push_back(self.partial_name(&parent).to_string());
                } else {
                    pages.insert(parent);
                }
            }
        }

        if pages.is_empty() {
            debug!("Fragment {template} is never rendered; dropping");
        }
        pages.into_iter().collect()
    }

    /// Template → final component set (own ∪ rendered fragments ∪ layout).
    #[must_use]
    pub fn resolved_usage(&self) -> BTreeMap<String, BTreeSet<String>> {
        let mut own: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
        for group in &self.groups {
            for template in &group.templates {
                for page in self.resolve_template(template) {
                    own.entry(page).or_default().extend(group.components.iter().cloned());
                }
            }
        }

        for (page, components) in &mut own {
            components.extend(self.layouts.components_for(page));
        }
        own
    }

    /// Partition every resolved template into named bundles.
    pub fn weave(&self, namer: &mut dyn BundleNamer) -> Vec<Bundle> {
        let mut by_set: BTreeMap<Vec<String>, Vec<String>> = BTreeMap::new();
        for (page, components) in self.resolved_usage() {
            by_set.entry(components.into_iter().collect()).or_default().push(page);
        }

        let mut sets: Vec<(Vec<String>, Vec<String>)> = by_set.into_iter().collect();
        sets.sort_by(|a, b| b.0.len().cmp(&a.0.len()).then_with(|| a.0.cmp(&b.0)));

        let mut taken = BTreeSet::new();
        let mut bundles: Vec<Bundle> = sets
            .into_iter()
            .map(|(components, templates)| Bundle {
                name: unique_name(namer, &mut taken),
                components,
                templates,
            })
            .collect();

        bundles.sort_by(|a, b| {
            b.components.len().cmp(&a.components.len()).then_with(|| a.name.cmp(&b.name))
        });

        debug!("Wove {} bundles", bundles.len());
        bundles
    }
}

fn unique_name(namer: &mut dyn BundleNamer, taken: &mut BTreeSet<String>) -> String {
    let mut candidate = namer.next_name();
    for _ in 1..MAX_NAME_ATTEMPTS {
        if !taken.contains(&candidate) {
            break;
        }
        candidate = namer.next_name();
    }

    let mut name = candidate.clone();
    let mut suffix = 2;
    while taken.contains(&name) {
        name = format!("{candidate}-{suffix}");
        suffix += 1;
    }
    taken.insert(name.clone());
    name
}

/// Run the whole pipeline over a project tree.
///
/// # Errors
///
/// Returns an error if the project configuration is invalid (bad exclude
/// glob or component namespace). Unreadable files are skipped.
pub fn weave_project(layout: &ProjectLayout, namer: &mut dyn BundleNamer) -> Result<Vec<Bundle>> {
    let inventory = PageInventory::scan(layout)?;
    let partials = PartialResolver::scan(layout)?;
    let layouts = LayoutResolver::scan(layout)?;
    debug!("{} templates, {} rendered partials", inventory.views().len(), partials.len());

    let weaver =
        Weaver::new(inventory.mappings(), &partials, &layouts).with_scan_roots(layout.scan_roots());
    Ok(weaver.weave(namer))
}
