//! Client Module
//!
//! Data access for the shelter front end: one client per resource collection
//! plus the session store. Every client talks to the REST service first and
//! falls back to local synthetic data once the service is unreachable.
//!
//! # Architecture
//!
//! - **`config`** - Server URL, storage directory, request timeout
//! - **`http`** - Shared HTTP client, response classification
//! - **`mode`** - Remote/local mode flag
//! - **`resource`** - Generic CRUD client with local fallback
//! - **`dogs`**, **`volunteers`**, **`rescues`**, **`applications`** - Per-collection helpers
//! - **`storage`** - Durable key/value storage for the session
//! - **`session`** - Register, login, logout, token verification
//! - **`types`** - Request bodies and response envelopes
//! - **`main`** - Command-line entry point (binary)
//!
//! # Example
//!
//! ```rust,no_run
//! use rescuedesk::client::{ApiClient, Config, DogClient};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let api = ApiClient::new(Config::from_env()?)?;
//! let dogs = DogClient::new(api);
//! for dog in dogs.available().await? {
//!     println!("{} ({})", dog.name, dog.breed);
//! }
//! # Ok(())
//! # }
//! ```

pub mod applications;
pub mod config;
pub mod dogs;
pub mod http;
pub mod mode;
pub mod rescues;
pub mod resource;
pub mod session;
pub mod storage;
pub mod types;
pub mod volunteers;

// Re-export commonly used types
pub use applications::ApplicationClient;
pub use config::Config;
pub use dogs::DogClient;
pub use http::{ApiClient, Rejection, RemoteError, TransportFailure};
pub use mode::{Mode, ModeFlag};
pub use rescues::RescueClient;
pub use resource::{DeleteAck, ResourceClient};
pub use session::{LocalToken, LocalTokenPolicy, LocalUser, SessionStore};
pub use storage::{FileStorage, MemoryStorage, Storage, StorageError};
pub use types::{AuthEnvelope, AuthSuccess, DataEnvelope, LoginRequest, RegisterRequest};
pub use volunteers::VolunteerClient;
