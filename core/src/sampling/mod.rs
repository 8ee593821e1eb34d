//! Sampling functions

mod common;

// Re-export.
pub use common::*;
