//! The stored configuration record.
//!
//! The generated artifact (`config/antoinette.json`) carries a few fields the
//! engine never derives: the compiler location (`elm_path`) and the extra scan
//! locations (`custom_view_paths`). They are read back on the next run and
//! written out again unchanged, together with any keys this version does not
//! know about.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::debug;

use crate::constants::DEFAULT_ELM_PATH;
use crate::core::AntoinetteError;

/// Pass-through fields of the artifact.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfigRecord {
    /// Extra scan locations supplied on earlier runs.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub custom_view_paths: Vec<String>,

    /// Location of the external compiler.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elm_path: Option<String>,

    /// Unknown keys, preserved verbatim.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Only the record part of an artifact; `bundles` is ignored.
#[derive(Deserialize)]
struct StoredArtifact {
    #[serde(default, rename = "bundles")]
    _bundles: serde_json::Value,
    #[serde(flatten)]
    record: ConfigRecord,
}

impl ConfigRecord {
    /// Load the record from an existing artifact.
    ///
    /// A missing file yields an empty record.
    ///
    /// # Errors
    ///
    /// Returns [`AntoinetteError::ConfigParseError`] if the file exists but is
    /// not a JSON object, or an I/O error if it cannot be read.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!("No configuration record at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read configuration file: {}", path.display()))?;

        let stored: StoredArtifact =
            serde_json::from_str(&content).map_err(|e| AntoinetteError::ConfigParseError {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?;

        debug!(
            "Loaded configuration record from {} ({} custom view paths)",
            path.display(),
            stored.record.custom_view_paths.len()
        );
        Ok(stored.record)
    }

    /// Union newly supplied custom view paths into the stored ones.
    ///
    /// Order is preserved: stored paths first, then new paths not seen yet.
    pub fn merge_custom_view_paths<I, S>(&mut self, paths: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for path in paths {
            let path = path.into();
            if !self.custom_view_paths.contains(&path) {
                self.custom_view_paths.push(path);
            }
        }
    }

    /// The compiler location, falling back to `elm`.
    #[must_use]
    pub fn effective_elm_path(&self) -> &str {
        self.elm_path.as_deref().unwrap_or(DEFAULT_ELM_PATH)
    }

    /// Fill in the compiler location if it is missing.
    pub fn ensure_elm_path(&mut self) {
        if self.elm_path.is_none() {
            self.elm_path = Some(DEFAULT_ELM_PATH.to_string());
        }
    }
}
