//! AdForge Common Utilities
//!
//! Shared infrastructure for all AdForge crates:
//! - Error taxonomy and result alias
//! - Configuration loading (generation credentials, editor defaults, logging)
//! - Tracing/logging initialization

pub mod config;
pub mod error;
pub mod logging;

pub use config::*;
pub use error::*;
