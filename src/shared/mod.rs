//! Shared Module
//!
//! Domain records, configuration and error types used by every client.
//!
//! # Overview
//!
//! The types here carry no I/O. They describe what the shelter tracks (dogs,
//! volunteers, rescue reports, adoption applications, users) and how the
//! clients report failures.

/// Shared error types
pub mod error;

/// Application configuration
pub mod config;

/// Domain records
pub mod models;

/// Re-export commonly used types for convenience
pub use config::{AppConfig, AppConfigBuilder, ConfigError};
pub use error::{ClientError, ClientResult};
pub use models::{RecordId, RecordKey, Resource};
