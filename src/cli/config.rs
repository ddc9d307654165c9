//! Generate the bundle configuration.
//!
//! Runs the full pipeline and writes the resulting document to the stored
//! configuration record (or stdout). Pass-through fields of an existing
//! record are kept; newly supplied custom view paths are merged into the
//! stored ones.
//!
//! ```bash
//! antoinette config
//! antoinette config --custom-views app/content app/content/layouts
//! antoinette config --stdout --sequential-names
//! ```

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use std::path::Path;
use tracing::debug;

use crate::artifact::to_canonical;
use crate::config::{ConfigRecord, ProjectLayout};
use crate::weaver::{BundleNamer, HaikuNamer, SequentialNamer, weave_project};

/// Options of `antoinette config`.
#[derive(Args, Debug, Default)]
pub struct ConfigCommand {
    /// Print the document instead of writing it.
    #[arg(long)]
    stdout: bool,

    /// Additional view files or directories to scan.
    ///
    /// Paths with a `layouts` component are also read as layouts.
    #[arg(long, num_args = 1.., value_delimiter = ',')]
    custom_views: Vec<String>,

    /// Name bundles `bundle-001`, `bundle-002`, ... instead of random words.
    #[arg(long)]
    sequential_names: bool,
}

impl ConfigCommand {
    /// Weave the project at `root` and emit the document.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored record is malformed, the project
    /// configuration is invalid, or the document cannot be written.
    pub fn execute(self, root: &Path, record_path: &Path) -> Result<()> {
        let mut record = ConfigRecord::load(record_path)?;
        record.merge_custom_view_paths(self.custom_views);
        record.ensure_elm_path();

        let layout = ProjectLayout::new(root).with_custom_view_paths(record.custom_view_paths.clone());
        debug!("Scanning {} ({} custom view paths)", root.display(), layout.custom_view_paths.len());

        let mut namer: Box<dyn BundleNamer> = if self.sequential_names {
            Box::new(SequentialNamer::default())
        } else {
            Box::new(HaikuNamer)
        };
        let bundles = weave_project(&layout, namer.as_mut())?;
        let document = to_canonical(bundles, record);

        if self.stdout {
            print!("{}", document.to_json()?);
        } else {
            document.write(record_path)?;
            println!(
                "✅ Generated {} ({} bundles)",
                record_path.display().to_string().green(),
                document.bundles.len()
            );
        }
        Ok(())
    }
}
