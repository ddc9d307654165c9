//! Interfaces to the build collaborators.
//!
//! A bundle document drives two external steps: compiling each bundle's
//! components into one script, and pointing each template at its bundle.
//! Neither step is implemented here; this module defines the traits they
//! plug into and the loop that feeds them.

use anyhow::Result;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::artifact::BundleDocument;
use crate::core::AntoinetteError;
use crate::weaver::Bundle;

/// Compiles an ordered component list.
pub trait Compiler {
    /// Compile `components` for output at `output`, returning the compiled text.
    ///
    /// # Errors
    ///
    /// Returns an error if compilation fails.
    fn compile(&mut self, components: &[String], output: &Path) -> Result<String>;
}

/// Rewrites the marked bundle reference line of a template.
pub trait TagInjector {
    /// Point `template_path` at `bundle_name`.
    ///
    /// # Errors
    ///
    /// Returns an error if the template cannot be rewritten.
    fn inject(&mut self, template_path: &str, bundle_name: &str, fingerprint: &str) -> Result<()>;

    /// Remove the bundle reference from `template_path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the template cannot be rewritten.
    fn clear(&mut self, template_path: &str) -> Result<()>;
}

/// Counts from one dispatch pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchSummary {
    /// Bundles compiled.
    pub bundles: usize,
    /// Templates rewritten.
    pub templates: usize,
}

/// Where the compiled script for `bundle` goes inside `output_dir`.
#[must_use]
pub fn bundle_output_path(output_dir: &Path, bundle: &Bundle) -> PathBuf {
    output_dir.join(format!("{}.js", bundle.name))
}

/// Compile and inject every bundle of `document`.
///
/// # Errors
///
/// Stops at the first failing bundle; a compiler failure is reported as
/// [`AntoinetteError::CompilationFailed`].
pub fn dispatch(
    document: &BundleDocument,
    compiler: &mut dyn Compiler,
    injector: &mut dyn TagInjector,
    output_dir: &Path,
) -> Result<DispatchSummary> {
    dispatch_bundles(document.bundles.iter(), compiler, injector, output_dir)
}

/// Compile and inject a selection of bundles, such as the result of
/// [`BundleDocument::bundles_containing`].
///
/// # Errors
///
/// See [`dispatch`].
pub fn dispatch_bundles<'a, I>(
    bundles: I,
    compiler: &mut dyn Compiler,
    injector: &mut dyn TagInjector,
    output_dir: &Path,
) -> Result<DispatchSummary>
where
    I: IntoIterator<Item = &'a Bundle>,
{
    let mut summary = DispatchSummary::default();

    for bundle in bundles {
        let output = bundle_output_path(output_dir, bundle);
        debug!("Compiling {} into {}", bundle.name, output.display());
        compiler.compile(&bundle.components, &output).map_err(|e| {
            AntoinetteError::CompilationFailed {
                bundle: bundle.name.clone(),
                reason: format!("{e:#}"),
            }
        })?;

        let fingerprint = bundle.fingerprint();
        for template in &bundle.templates {
            injector.inject(template, &bundle.name, &fingerprint)?;
        }

        info!(
            "Bundle {}: {} components, {} templates",
            bundle.name,
            bundle.components.len(),
            bundle.templates.len()
        );
        summary.bundles += 1;
        summary.templates += bundle.templates.len();
    }

    Ok(summary)
}

/// Remove the bundle reference from every template in `document`.
///
/// # Errors
///
/// Returns the first injector failure.
pub fn clear_all(document: &BundleDocument, injector: &mut dyn TagInjector) -> Result<usize> {
    let mut cleared = 0;
    for template in document.bundles.iter().flat_map(|b| b.templates.iter()) {
        injector.clear(template)?;
        cleared += 1;
    }
    Ok(cleared)
}
