//! Integration test suite for Antoinette
//!
//! End-to-end tests over real project trees in temporary directories, plus
//! tests of the `antoinette` binary.
//!
//! ```bash
//! cargo test --test integration
//! ```
//!
//! # Test Organization
//!
//! - **scenarios**: reference inventories woven with fixed lookups
//! - **pipeline**: scanning, partial propagation and layout merge on disk
//! - **cli**: the `config` and `usage` commands

#[path = "../common/mod.rs"]
mod common;

mod pipeline;
