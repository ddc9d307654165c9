//! Serializable usage report for the `usage` command.

use serde::Serialize;
use std::collections::BTreeMap;

use super::PageInventory;

/// Direct component usage, before partial and layout propagation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UsageReport {
    /// Every component name seen, sorted.
    pub components: Vec<String>,
    /// Component → templates referencing it.
    pub matrix: BTreeMap<String, Vec<String>>,
    /// Template → its own components, most components first.
    pub per_file: Vec<FileUsage>,
}

/// One row of [`UsageReport::per_file`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileUsage {
    /// Root-relative template path.
    pub template: String,
    /// Components in first-seen order.
    pub components: Vec<String>,
}

impl From<&PageInventory> for UsageReport {
    fn from(inventory: &PageInventory) -> Self {
        Self {
            components: inventory.all_component_names(),
            matrix: inventory.matrix(),
            per_file: inventory
                .per_file()
                .into_iter()
                .map(|(template, components)| FileUsage {
                    template,
                    components,
                })
                .collect(),
        }
    }
}

impl UsageReport {
    /// Pretty JSON rendering.
    ///
    /// # Errors
    ///
    /// Propagates serializer failures, which cannot happen for this shape.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
