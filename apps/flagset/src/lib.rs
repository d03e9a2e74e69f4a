//! # Flagset Library
//!
//! This library exposes the flagset CLI modules for testing and integration.
//!
//! The main binary uses these modules through the `main.rs` entry point.

pub mod cli;
pub mod config;
pub mod operand;

// Re-export flagset_core for convenience
pub use flagset_core;

/// Error type shared by the CLI layer.
pub type CliResult<T> = Result<T, Box<dyn std::error::Error>>;
