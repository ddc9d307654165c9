//! Configuration for Antoinette
//!
//! Two kinds of configuration exist:
//!
//! - [`ProjectLayout`]: where templates, partials and layouts live and how the
//!   component invocation pattern is spelled. Built in code (or from CLI
//!   flags) with Rails defaults from [`crate::constants`].
//! - [`ConfigRecord`]: pass-through fields stored in the generated artifact
//!   (`config/antoinette.json`). The engine never derives these; it reads them
//!   back and writes them out unchanged.

mod project;
mod record;

pub use project::ProjectLayout;
pub use record::ConfigRecord;
