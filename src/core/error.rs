//! Error handling for Antoinette
//!
//! The error system follows two principles:
//! 1. **Strongly-typed errors** ([`AntoinetteError`]) for precise handling in code
//! 2. **User-friendly messages** ([`ErrorContext`]) with actionable suggestions for CLI users
//!
//! Most of the engine never fails: extraction has no error conditions, an
//! unreadable template is skipped with a warning, and malformed front-matter
//! falls back to the default layout. The variants below cover the few
//! boundaries where a run genuinely cannot continue, such as an unparsable
//! configuration record or an invalid exclude pattern.
//!
//! # Examples
//!
//! ```rust,no_run
//! use antoinette_cli::core::{AntoinetteError, ErrorContext, user_friendly_error};
//!
//! let error = AntoinetteError::ConfigParseError {
//!     path: "config/antoinette.json".to_string(),
//!     reason: "expected value at line 1 column 1".to_string(),
//! };
//! let ctx = user_friendly_error(anyhow::Error::from(error));
//! ctx.display();
//! ```

use colored::Colorize;
use std::fmt;
use thiserror::Error;

/// The main error type for Antoinette operations.
#[derive(Error, Debug, Clone)]
pub enum AntoinetteError {
    /// A template or layout could not be read.
    ///
    /// Scanners log and skip this condition; it only surfaces as an error when
    /// a caller asks for a single file explicitly.
    #[error("Template source unreadable: {path}")]
    SourceUnreadable {
        /// Path of the file that could not be read
        path: String,
        /// Underlying I/O failure
        reason: String,
    },

    /// The stored configuration record exists but is not valid JSON.
    #[error("Failed to parse configuration file {path}: {reason}")]
    ConfigParseError {
        /// Path of the configuration record
        path: String,
        /// Parser message
        reason: String,
    },

    /// A serialized bundle document could not be parsed.
    #[error("Invalid bundle document: {reason}")]
    ArtifactParseError {
        /// Parser message
        reason: String,
    },

    /// An exclude glob could not be compiled.
    #[error("Invalid exclude pattern '{pattern}': {reason}")]
    InvalidPattern {
        /// The offending glob
        pattern: String,
        /// Compiler message
        reason: String,
    },

    /// Writing the artifact or configuration record failed.
    #[error("Failed to write {path}")]
    WriteFailed {
        /// Destination path
        path: String,
        /// Underlying I/O failure
        reason: String,
    },

    /// A compiler collaborator rejected a bundle.
    #[error("Compilation failed for bundle '{bundle}'")]
    CompilationFailed {
        /// Bundle whose component list failed to compile
        bundle: String,
        /// Collaborator output
        reason: String,
    },

    /// Catch-all for errors that carry only a message.
    #[error("{message}")]
    Other {
        /// Human readable message
        message: String,
    },
}

/// Error wrapper with a user-facing suggestion and details.
#[derive(Debug)]
pub struct ErrorContext {
    /// The underlying error
    pub error: AntoinetteError,
    /// Optional suggestion for resolving the error
    pub suggestion: Option<String>,
    /// Optional additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    /// Create a new error context without suggestion or details.
    #[must_use]
    pub const fn new(error: AntoinetteError) -> Self {
        Self {
            error,
            suggestion: None,
            details: None,
        }
    }

    /// Add a suggestion for resolving the error.
    #[must_use]
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add details explaining the error.
    #[must_use]
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Display the error context to stderr with terminal colors.
    ///
    /// - Error message: red and bold
    /// - Details: yellow
    /// - Suggestion: green
    pub fn display(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.error);

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ErrorContext {}

/// Convert any error into an [`ErrorContext`] suitable for CLI display.
///
/// Known [`AntoinetteError`] variants get tailored suggestions; I/O errors are
/// mapped by kind; everything else keeps its full `anyhow` chain as the
/// message.
#[must_use]
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    if let Some(known) = error.downcast_ref::<AntoinetteError>() {
        return create_error_context(known.clone());
    }

    if let Some(io_error) = error.downcast_ref::<std::io::Error>() {
        match io_error.kind() {
            std::io::ErrorKind::PermissionDenied => {
                return ErrorContext::new(AntoinetteError::Other {
                    message: format!("Permission denied: {io_error}"),
                })
                .with_suggestion("Check file ownership and permissions of the project tree");
            }
            std::io::ErrorKind::NotFound => {
                return ErrorContext::new(AntoinetteError::Other {
                    message: format!("File not found: {io_error}"),
                })
                .with_suggestion(
                    "Run antoinette from the project root or pass --root explicitly",
                );
            }
            _ => {}
        }
    }

    ErrorContext::new(AntoinetteError::Other {
        message: format!("{error:#}"),
    })
}

fn create_error_context(error: AntoinetteError) -> ErrorContext {
    match &error {
        AntoinetteError::SourceUnreadable { reason, .. } => {
            let details = reason.clone();
            ErrorContext::new(error)
                .with_details(details)
                .with_suggestion("Check that the file exists and is readable")
        }
        AntoinetteError::ConfigParseError { path, .. } => {
            let suggestion = format!(
                "Fix the JSON syntax in {path}, or delete it to regenerate from scratch"
            );
            ErrorContext::new(error).with_suggestion(suggestion)
        }
        AntoinetteError::ArtifactParseError { .. } => ErrorContext::new(error)
            .with_suggestion("Regenerate the bundle document with 'antoinette config'"),
        AntoinetteError::InvalidPattern { .. } => ErrorContext::new(error)
            .with_suggestion("Exclude patterns use glob syntax, e.g. 'app/views/layouts/**'"),
        AntoinetteError::WriteFailed { reason, .. } => {
            let details = reason.clone();
            ErrorContext::new(error)
                .with_details(details)
                .with_suggestion("Check that the config directory is writable")
        }
        AntoinetteError::CompilationFailed { reason, .. } => {
            let details = reason.clone();
            ErrorContext::new(error)
                .with_details(details)
                .with_suggestion("Check the elm_path entry in the configuration record")
        }
        AntoinetteError::Other { .. } => ErrorContext::new(error),
    }
}
