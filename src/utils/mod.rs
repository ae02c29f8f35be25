//! Utility functions
//!
//! Provides process-level helpers shared by the binary.

pub mod logging;

pub use logging::setup_logging;
