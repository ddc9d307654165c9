//! Report direct component usage.
//!
//! Prints every component name, the component → templates matrix and the
//! per-template component lists as JSON. Partials and layouts are not
//! propagated here; the report shows what each file references itself.

use anyhow::Result;
use clap::Args;
use std::path::Path;

use crate::config::{ConfigRecord, ProjectLayout};
use crate::usage::{PageInventory, UsageReport};

/// Options of `antoinette usage`.
#[derive(Args, Debug, Default)]
pub struct UsageCommand {
    /// Additional view files or directories to scan, on top of the stored ones.
    #[arg(long, num_args = 1.., value_delimiter = ',')]
    custom_views: Vec<String>,
}

impl UsageCommand {
    /// Scan the project at `root` and print the report.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored record is malformed or the project
    /// configuration is invalid.
    pub fn execute(self, root: &Path, record_path: &Path) -> Result<()> {
        let mut record = ConfigRecord::load(record_path)?;
        record.merge_custom_view_paths(self.custom_views);

        let layout = ProjectLayout::new(root).with_custom_view_paths(record.custom_view_paths);
        let inventory = PageInventory::scan(&layout)?;

        println!("{}", UsageReport::from(&inventory).to_json()?);
        Ok(())
    }
}
