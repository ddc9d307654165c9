//! Project tree builder for tests
//!
//! Builds a Rails-like layout (`app/views/...`, `app/views/layouts/...`)
//! under a temporary directory that lives as long as the [`TestProject`].

use anyhow::Result;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use crate::config::ProjectLayout;
use crate::constants::{CONFIG_FILE, LAYOUTS_DIR, TEMPLATE_EXTENSION, VIEWS_DIR};

/// Fluent builder for [`TestProject`].
pub struct TestProjectBuilder {
    temp_dir: TempDir,
    files: Vec<(String, String)>,
    custom_view_paths: Vec<String>,
}

impl TestProjectBuilder {
    /// Start an empty project.
    pub fn new() -> Result<Self> {
        Ok(Self {
            temp_dir: TempDir::new()?,
            files: Vec::new(),
            custom_view_paths: Vec::new(),
        })
    }

    /// Add a template under `app/views`.
    pub fn with_view(mut self, path: &str, content: impl Into<String>) -> Self {
        self.files.push((format!("{VIEWS_DIR}/{path}"), content.into()));
        self
    }

    /// Add a layout file `app/views/layouts/<name>.html.erb`.
    pub fn with_layout(mut self, name: &str, content: impl Into<String>) -> Self {
        self.files.push((format!("{LAYOUTS_DIR}/{name}{TEMPLATE_EXTENSION}"), content.into()));
        self
    }

    /// Add any file, relative to the project root.
    pub fn with_file(mut self, path: impl Into<String>, content: impl Into<String>) -> Self {
        self.files.push((path.into(), content.into()));
        self
    }

    /// Register an extra scan location for [`TestProject::layout`].
    pub fn with_custom_view_path(mut self, path: impl Into<String>) -> Self {
        self.custom_view_paths.push(path.into());
        self
    }

    /// Write every file and return the project.
    pub fn build(self) -> Result<TestProject> {
        let root = self.temp_dir.path().to_path_buf();
        std::fs::create_dir_all(root.join(VIEWS_DIR))?;

        for (path, content) in &self.files {
            let full_path = root.join(path);
            if let Some(parent) = full_path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(full_path, content)?;
        }

        Ok(TestProject {
            _temp_dir: self.temp_dir,
            root,
            custom_view_paths: self.custom_view_paths,
        })
    }
}

/// A project tree on disk.
pub struct TestProject {
    _temp_dir: TempDir, // Keep temp dir alive
    /// Project root.
    pub root: PathBuf,
    custom_view_paths: Vec<String>,
}

impl TestProject {
    /// Start a builder.
    pub fn builder() -> Result<TestProjectBuilder> {
        TestProjectBuilder::new()
    }

    /// The project layout with the registered custom view paths.
    #[must_use]
    pub fn layout(&self) -> ProjectLayout {
        ProjectLayout::new(&self.root).with_custom_view_paths(self.custom_view_paths.clone())
    }

    /// Default location of the stored configuration record.
    #[must_use]
    pub fn config_path(&self) -> PathBuf {
        self.root.join(CONFIG_FILE)
    }

    /// Whether `path` exists under the root.
    pub fn file_exists(&self, path: impl AsRef<Path>) -> bool {
        self.root.join(path).exists()
    }

    /// Read a file under the root.
    pub fn read_file(&self, path: impl AsRef<Path>) -> Result<String> {
        Ok(std::fs::read_to_string(self.root.join(path))?)
    }

    /// Write a file under the root, creating parent directories.
    pub fn write_file(&self, path: impl AsRef<Path>, content: impl AsRef<str>) -> Result<()> {
        let full_path = self.root.join(path);
        if let Some(parent) = full_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(full_path, content.as_ref())?;
        Ok(())
    }
}
