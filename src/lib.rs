//! Antoinette - per-page Elm bundles for Rails views
//!
//! Antoinette discovers which client-side components (Elm applications) every
//! server-rendered template initialises and partitions the templates into the
//! smallest set of script bundles such that each template receives exactly the
//! components it needs.
//!
//! # Pipeline
//!
//! 1. [`usage`] extracts `Elm.<Name>.init` references and builds the page
//!    inventory: every template that references at least one component.
//! 2. [`partials`] builds the inverse inclusion relation, partial → templates
//!    rendering it, so a partial's components reach the pages that use it.
//! 3. [`layouts`] resolves the layout wrapping each template (front-matter or
//!    the default) and the components that layout references.
//! 4. [`weaver`] combines the three into bundles, one per distinct final
//!    component set.
//! 5. [`artifact`] serializes the bundles, plus pass-through configuration,
//!    into `config/antoinette.json`.
//!
//! The compiler and the script tag rewriting that consume the document are
//! external; [`collaborators`] defines their interfaces.
//!
//! # Example
//!
//! ```rust,no_run
//! use antoinette_cli::artifact::to_canonical;
//! use antoinette_cli::config::{ConfigRecord, ProjectLayout};
//! use antoinette_cli::weaver::{SequentialNamer, weave_project};
//!
//! # fn example() -> anyhow::Result<()> {
//! let layout = ProjectLayout::new("/srv/shop");
//! let bundles = weave_project(&layout, &mut SequentialNamer::default())?;
//! let document = to_canonical(bundles, ConfigRecord::default());
//! print!("{}", document.to_json()?);
//! # Ok(())
//! # }
//! ```
//!
//! # Determinism
//!
//! Every scan result is sorted, and bundle order depends only on component
//! counts and names. With a deterministic namer two runs over the same tree
//! produce byte-identical documents.

pub mod artifact;
pub mod cli;
pub mod collaborators;
pub mod config;
pub mod constants;
pub mod core;
pub mod layouts;
pub mod partials;
pub mod usage;
pub mod utils;
pub mod weaver;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
