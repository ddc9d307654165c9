//! Unit test suite for Antoinette
//!
//! Tests of individual stages through the public API, using in-memory
//! lookups instead of project trees where possible.
//!
//! ```bash
//! cargo test --test unit
//! ```

#[path = "../common/mod.rs"]
mod common;

mod document;
mod partial_paths;
mod weaver_properties;
