//! Core types for Antoinette
//!
//! This module holds the error types shared by every stage of the pipeline.
//! See [`error`] for the error enum and the CLI-facing context wrapper.

pub mod error;

pub use error::{AntoinetteError, ErrorContext, user_friendly_error};
