//! Global constants used throughout the Antoinette codebase.
//!
//! This module contains the Rails-style directory conventions, file
//! extensions and default names that multiple modules agree on. Defining
//! them centrally keeps the scanner, the resolvers and the CLI in sync.

/// Directory (relative to the project root) holding the view templates.
pub const VIEWS_DIR: &str = "app/views";

/// Directory (relative to the project root) holding layout templates.
pub const LAYOUTS_DIR: &str = "app/views/layouts";

/// Layout applied to a template that does not declare one in its front-matter.
pub const DEFAULT_LAYOUT: &str = "application";

/// Extension shared by every template and layout file.
pub const TEMPLATE_EXTENSION: &str = ".html.erb";

/// Leading character that marks a template as a partial (fragment).
pub const PARTIAL_MARKER: char = '_';

/// Namespace used by the component invocation pattern (`Elm.<Name>.init`).
pub const DEFAULT_NAMESPACE: &str = "Elm";

/// Glob excluding layout templates from the page inventory.
pub const DEFAULT_EXCLUDE_PATTERN: &str = "app/views/layouts/**";

/// Location of the generated artifact, relative to the project root.
///
/// The artifact doubles as the stored configuration record.
pub const CONFIG_FILE: &str = "config/antoinette.json";

/// Compiler location written into a fresh configuration record.
pub const DEFAULT_ELM_PATH: &str = "elm";

/// Front-matter key naming the layout that wraps a template.
pub const LAYOUT_KEY: &str = "layout";

/// Number of times the weaver asks a namer for a fresh name before
/// disambiguating a colliding one with a numeric suffix.
pub const MAX_NAME_ATTEMPTS: usize = 16;

/// Length (in hex characters) of a bundle content fingerprint.
pub const FINGERPRINT_LENGTH: usize = 12;
