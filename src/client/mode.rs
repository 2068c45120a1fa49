//! # Mode Flag
//!
//! Tracks whether a client still talks to the remote service or has fallen
//! back to its local synthetic data. The switch goes one way only: after the
//! first transport failure the owner stays local until it is dropped. A new
//! instance starts remote again.

use std::fmt;
use std::future::Future;

use tokio::sync::RwLock;

use crate::client::http::{Rejection, RemoteError};

/// Which data path is active
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Mode {
    #[default]
    Remote,
    Local,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Remote => f.write_str("remote"),
            Self::Local => f.write_str("local"),
        }
    }
}

/// Per-client mode state
#[derive(Debug, Default)]
pub struct ModeFlag {
    mode: RwLock<Mode>,
}

impl ModeFlag {
    /// A flag in remote mode
    pub fn new() -> Self {
        Self::default()
    }

    /// A flag that starts out local, for clients that never touch the network
    pub fn local() -> Self {
        Self {
            mode: RwLock::new(Mode::Local),
        }
    }

    pub async fn get(&self) -> Mode {
        *self.mode.read().await
    }

    pub async fn is_local(&self) -> bool {
        self.get().await == Mode::Local
    }

    /// Switch to local mode. Returns `true` if this call made the switch.
    pub async fn fall_back(&self) -> bool {
        let mut mode = self.mode.write().await;
        let switched = *mode == Mode::Remote;
        *mode = Mode::Local;
        switched
    }

    /// Run `call` unless already local.
    ///
    /// Returns `None` when the local path has to answer: either the flag was
    /// already local (and `call` is never polled) or `call` hit a transport
    /// failure, in which case the flag is switched first.
    pub async fn attempt<T, F>(&self, area: &str, op: &str, call: F) -> Option<Result<T, Rejection>>
    where
        F: Future<Output = Result<T, RemoteError>>,
    {
        if self.is_local().await {
            return None;
        }

        match call.await {
            Ok(value) => Some(Ok(value)),
            Err(RemoteError::Rejected(rejection)) => Some(Err(rejection)),
            Err(RemoteError::Transport(failure)) => {
                if self.fall_back().await {
                    tracing::warn!(
                        "[{}] {} failed ({}); switching to local data for this session",
                        area,
                        op,
                        failure
                    );
                } else {
                    tracing::debug!("[{}] {} failed after fallback: {}", area, op, failure);
                }
                None
            }
        }
    }
}
