//! Test utilities for Antoinette
//!
//! Helpers for building Rails-like project trees in temporary directories
//! and for turning on logging inside tests.
//!
//! # Example
//!
//! ```rust,no_run
//! use antoinette_cli::test_utils::TestProject;
//!
//! # fn example() -> anyhow::Result<()> {
//! let project = TestProject::builder()?
//!     .with_view("cases/show.html.erb", "Elm.CaseBuilder.init()")
//!     .with_layout("application", "Elm.NavSidebar.init()")
//!     .build()?;
//!
//! assert!(project.file_exists("app/views/cases/show.html.erb"));
//! # Ok(())
//! # }
//! ```

pub mod builder;

pub use builder::{TestProject, TestProjectBuilder};

use std::sync::Once;
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Global flag to ensure logging is only initialized once in tests
static INIT_LOGGING: Once = Once::new();

/// Initialize logging for tests.
///
/// Only the first call has an effect. Uses `level` if given, otherwise
/// `RUST_LOG`; with neither, logging stays off.
///
/// ```bash
/// RUST_LOG=antoinette_cli=debug cargo test
/// ```
pub fn init_test_logging(level: Option<Level>) {
    INIT_LOGGING.call_once(|| {
        let filter = if let Some(level) = level {
            EnvFilter::new(level.to_string())
        } else if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            return;
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .with_ansi(true)
            .try_init();
    });
}
