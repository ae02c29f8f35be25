//! Error handling
//!
//! Defines error types for the directory layer and configuration.

pub mod types;

pub use types::*;
