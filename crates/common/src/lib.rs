//! Autocam Common Utilities
//!
//! Shared infrastructure for all Autocam crates:
//! - Error types and result aliases
//! - Tracing/logging initialization
//! - Configuration loading, including persisted auto-zoom settings

pub mod config;
pub mod error;
pub mod logging;

pub use config::*;
pub use error::*;
