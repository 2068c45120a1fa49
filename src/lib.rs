//! RescueDesk - Main Library
//!
//! Data-access layer for a dog adoption and rescue shelter: listings,
//! volunteer sign-ups, rescue reports and adoption applications, plus the
//! user session.
//!
//! # Overview
//!
//! Each collection is served by a [`client::ResourceClient`] that calls the
//! REST service first. When the service cannot be reached, the client
//! switches to an in-memory dataset seeded with sample records and keeps
//! answering from it until it is dropped. Callers see the same operations and
//! the same error kinds in both modes.
//!
//! # Module Structure
//!
//! - **`shared`** - Records, configuration, error types
//!   - Dual identifiers (`_id` from the service, numeric `id` locally)
//!   - Status enums per collection
//!
//! - **`client`** - HTTP client, resource clients, session store
//!   - Remote-first CRUD with one-way local fallback
//!   - Token and identity persistence
//!
//! # Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use rescuedesk::client::{ApiClient, Config, FileStorage, LoginRequest, SessionStore};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::from_env()?;
//! let storage = Arc::new(FileStorage::new(config.storage_path()));
//! let session = SessionStore::new(ApiClient::new(config)?, storage);
//! session.login(&LoginRequest::new("admin", "admin123")).await?;
//! assert!(session.is_authenticated());
//! # Ok(())
//! # }
//! ```
//!
//! # Logging
//!
//! Diagnostics go through `tracing` with a bracketed area prefix:
//! `[DATA]`, `[SESSION]`, `[HTTP]`, `[CONFIG]`. The binary installs a
//! `tracing-subscriber` filter from `RUST_LOG`.
//!
//! # Error Handling
//!
//! - `ClientError` for everything a caller can act on
//! - `ConfigError` for bad configuration
//! - Transport failures never reach the caller; they trigger the fallback

/// Shared types and data structures
pub mod shared;

/// Resource clients and session store
pub mod client;
