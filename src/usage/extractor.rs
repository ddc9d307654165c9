//! Component usage extraction for template sources.
//!
//! A component is detected purely textually: an invocation of the form
//! `Elm.<Name>.init` anywhere in the template. The extractor does not parse
//! ERB or JavaScript, so an invocation assembled at runtime from string
//! pieces goes unnoticed. That approximation is accepted; keep this module a
//! narrow pattern matcher so it can be swapped for something smarter later.
//!
//! # Example
//!
//! ```rust
//! use antoinette_cli::usage::extractor::extract_components;
//!
//! let erb = r#"
//! <div id="builder"></div>
//! <script>
//!   Elm.CaseBuilder.init({ node: document.getElementById("builder") });
//!   Elm.SearchForm
//!     .init({ node: document.getElementById("search") });
//!   Elm.CaseBuilder.init({ node: other });
//! </script>
//! "#;
//!
//! assert_eq!(extract_components(erb), vec!["CaseBuilder", "SearchForm"]);
//! ```

use anyhow::{Context, Result};
use regex::Regex;
use std::collections::HashSet;

use crate::constants::DEFAULT_NAMESPACE;

/// Detects `<namespace>.<Name>.init` invocations.
#[derive(Debug, Clone)]
pub struct UsageExtractor {
    pattern: Regex,
    namespace: String,
}

impl UsageExtractor {
    /// Build an extractor for the given component namespace.
    ///
    /// Whitespace (including line breaks) is tolerated around the dots, so
    /// invocations split over several lines are still detected.
    ///
    /// # Errors
    ///
    /// Returns an error only if the resulting regex exceeds the compiled
    /// size limit, which a plain identifier namespace never does.
    pub fn new(namespace: &str) -> Result<Self> {
        let source = format!(r"\b{}\s*\.\s*(\w+)\s*\.\s*init\b", regex::escape(namespace));
        let pattern = Regex::new(&source)
            .with_context(|| format!("Invalid component namespace: {namespace}"))?;

        Ok(Self {
            pattern,
            namespace: namespace.to_string(),
        })
    }

    /// The namespace this extractor matches.
    #[must_use]
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Extract the component names referenced by `text`.
    ///
    /// Duplicates collapse to their first occurrence; an empty result is a
    /// normal outcome, not an error.
    #[must_use]
    pub fn extract(&self, text: &str) -> Vec<String> {
        let mut seen = HashSet::new();
        self.pattern
            .captures_iter(text)
            .filter_map(|cap| cap.get(1))
            .map(|name| name.as_str().to_string())
            .filter(|name| seen.insert(name.clone()))
            .collect()
    }
}

/// Extract component names using the default `Elm` namespace.
#[must_use]
pub fn extract_components(text: &str) -> Vec<String> {
    UsageExtractor::new(DEFAULT_NAMESPACE)
        .map(|extractor| extractor.extract(text))
        .unwrap_or_default()
}
