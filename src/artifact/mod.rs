//! The serialized bundle document.
//!
//! The document is the only durable output of a run. It lists the bundles in
//! weaver order followed by the pass-through configuration fields:
//!
//! ```json
//! {
//!   "bundles": [
//!     {
//!       "name": "quiet-river-0412",
//!       "elm_apps": ["CaseBuilder", "SearchForm"],
//!       "templates": ["app/views/cases/new.html.erb", "app/views/cases/show.html.erb"]
//!     }
//!   ],
//!   "custom_view_paths": ["app/content"],
//!   "elm_path": "elm"
//! }
//! ```
//!
//! Serialization is a structural projection only. Parsing a document and
//! serializing it again yields the same bytes.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::Path;
use tracing::debug;

use crate::config::ConfigRecord;
use crate::core::AntoinetteError;
use crate::utils::atomic_write;
use crate::weaver::Bundle;

/// Bundles plus pass-through configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BundleDocument {
    /// Bundles in the order the weaver produced them.
    #[serde(default)]
    pub bundles: Vec<Bundle>,

    /// Fields carried over from the stored configuration record.
    #[serde(flatten)]
    pub config: ConfigRecord,
}

/// Project `bundles` and `config` into a document without reordering.
#[must_use]
pub fn to_canonical(bundles: Vec<Bundle>, config: ConfigRecord) -> BundleDocument {
    BundleDocument { bundles, config }
}

impl BundleDocument {
    /// Pretty JSON with a trailing newline.
    ///
    /// # Errors
    ///
    /// Propagates serializer failures, which cannot happen for this shape.
    pub fn to_json(&self) -> serde_json::Result<String> {
        let mut json = serde_json::to_string_pretty(self)?;
        json.push('\n');
        Ok(json)
    }

    /// Parse a document.
    ///
    /// # Errors
    ///
    /// Returns [`AntoinetteError::ArtifactParseError`] if `json` is not a
    /// valid bundle document.
    pub fn from_json(json: &str) -> Result<Self, AntoinetteError> {
        serde_json::from_str(json).map_err(|e| AntoinetteError::ArtifactParseError {
            reason: e.to_string(),
        })
    }

    /// Read and parse a document from disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| AntoinetteError::SourceUnreadable {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self::from_json(&content)?)
    }

    /// Write the document atomically, creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns [`AntoinetteError::WriteFailed`] if the file cannot be written.
    pub fn write(&self, path: &Path) -> Result<()> {
        let json = self.to_json()?;
        atomic_write(path, json.as_bytes())?;
        debug!("Wrote {} bundles to {}", self.bundles.len(), path.display());
        Ok(())
    }

    /// Bundles shipping any of `components`.
    ///
    /// Entries may be bare component names (`CaseBuilder`) or component
    /// source paths (`app/client/CaseBuilder.elm`); the file name without its
    /// extension is used.
    #[must_use]
    pub fn bundles_containing<S: AsRef<str>>(&self, components: &[S]) -> Vec<&Bundle> {
        let wanted: BTreeSet<String> = components.iter().map(|c| component_name(c.as_ref())).collect();
        self.bundles
            .iter()
            .filter(|bundle| wanted.iter().any(|component| bundle.contains(component)))
            .collect()
    }
}

fn component_name(entry: &str) -> String {
    Path::new(entry)
        .file_stem()
        .map_or_else(|| entry.to_string(), |stem| stem.to_string_lossy().into_owned())
}
