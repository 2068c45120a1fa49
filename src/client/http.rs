//! Shared HTTP client
//!
//! One [`ApiClient`] is shared by every resource client and the session store.
//! It owns the reqwest client, the base URL and the bearer token slot.
//!
//! Every call returns `Result<T, RemoteError>`. A [`RemoteError::Transport`]
//! means the service could not be used at all and the caller should fall back
//! to local data. A [`RemoteError::Rejected`] means the service answered and
//! said no, which callers report as a typed error.

use std::sync::{Arc, PoisonError, RwLock};

use reqwest::{Method, StatusCode};
use serde::de::{DeserializeOwned, IgnoredAny};
use serde::Serialize;
use thiserror::Error;

use crate::client::config::Config;
use crate::client::types::DataEnvelope;
use crate::shared::config::ConfigError;

/// The service could not be reached or did not answer usefully
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransportFailure {
    /// Connection refused, DNS failure, timeout, ...
    #[error("network error: {0}")]
    Network(String),
    /// Server error, or a client error without a usable message
    #[error("server returned {status}: {body}")]
    Status { status: u16, body: String },
    /// A success response whose body could not be decoded
    #[error("failed to decode response: {0}")]
    Decode(String),
}

/// The service answered and refused the request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejection {
    pub status: StatusCode,
    pub message: Option<String>,
}

impl Rejection {
    /// The server's message, or the canonical reason phrase
    pub fn message_or_reason(&self) -> String {
        self.message.clone().unwrap_or_else(|| {
            self.status
                .canonical_reason()
                .unwrap_or("request rejected")
                .to_string()
        })
    }
}

/// Outcome of a failed remote call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteError {
    Transport(TransportFailure),
    Rejected(Rejection),
}

impl From<TransportFailure> for RemoteError {
    fn from(failure: TransportFailure) -> Self {
        Self::Transport(failure)
    }
}

/// Classify a non-success response.
///
/// 404 and the auth statuses are always rejections. Any other 4xx is a
/// rejection only when the body carries a `message` or `error` string.
/// Everything else counts as a transport failure.
pub(crate) fn classify(status: StatusCode, body: &str) -> RemoteError {
    let message = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| {
            ["message", "error"]
                .iter()
                .find_map(|field| value.get(field).and_then(|m| m.as_str()).map(str::to_string))
        });

    let always_rejected = matches!(
        status,
        StatusCode::NOT_FOUND
            | StatusCode::UNAUTHORIZED
            | StatusCode::FORBIDDEN
            | StatusCode::CONFLICT
    );

    if status.is_client_error() && (always_rejected || message.is_some()) {
        RemoteError::Rejected(Rejection { status, message })
    } else {
        RemoteError::Transport(TransportFailure::Status {
            status: status.as_u16(),
            body: body.chars().take(200).collect(),
        })
    }
}

fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, TransportFailure> {
    let bytes: &[u8] = if bytes.iter().all(u8::is_ascii_whitespace) {
        b"null"
    } else {
        bytes
    };
    serde_json::from_slice(bytes).map_err(|e| TransportFailure::Decode(e.to_string()))
}

#[derive(Debug)]
struct Inner {
    config: Config,
    http: reqwest::Client,
    token: RwLock<Option<String>>,
}

/// HTTP client for the REST service. Cheap to clone; clones share the token.
#[derive(Debug, Clone)]
pub struct ApiClient {
    inner: Arc<Inner>,
}

impl ApiClient {
    pub fn new(config: Config) -> Result<Self, ConfigError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| ConfigError::HttpClient(e.to_string()))?;

        Ok(Self {
            inner: Arc::new(Inner {
                config,
                http,
                token: RwLock::new(None),
            }),
        })
    }

    pub fn config(&self) -> &Config {
        &self.inner.config
    }

    /// Set the bearer token attached to every request
    pub fn set_token(&self, token: Option<String>) {
        *self
            .inner
            .token
            .write()
            .unwrap_or_else(PoisonError::into_inner) = token;
    }

    /// Get the bearer token
    pub fn token(&self) -> Option<String> {
        self.inner
            .token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// GET a `{ data }` envelope
    pub async fn get_data<T: DeserializeOwned>(&self, path: &str) -> Result<T, RemoteError> {
        self.send::<(), DataEnvelope<T>>(Method::GET, path, None)
            .await
            .map(|envelope| envelope.data)
    }

    /// POST a body, expecting a `{ data }` envelope
    pub async fn post_data<B, T>(&self, path: &str, body: &B) -> Result<T, RemoteError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send::<B, DataEnvelope<T>>(Method::POST, path, Some(body))
            .await
            .map(|envelope| envelope.data)
    }

    /// PUT a body, expecting a `{ data }` envelope
    pub async fn put_data<B, T>(&self, path: &str, body: &B) -> Result<T, RemoteError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send::<B, DataEnvelope<T>>(Method::PUT, path, Some(body))
            .await
            .map(|envelope| envelope.data)
    }

    /// PATCH a body, expecting a `{ data }` envelope
    pub async fn patch_data<B, T>(&self, path: &str, body: &B) -> Result<T, RemoteError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send::<B, DataEnvelope<T>>(Method::PATCH, path, Some(body))
            .await
            .map(|envelope| envelope.data)
    }

    /// DELETE, ignoring whatever body comes back
    pub async fn delete(&self, path: &str) -> Result<(), RemoteError> {
        self.send::<(), IgnoredAny>(Method::DELETE, path, None)
            .await
            .map(|_| ())
    }

    /// Send a request and decode the raw JSON body (no `{ data }` envelope)
    pub async fn send<B, T>(&self, method: Method, path: &str, body: Option<&B>) -> Result<T, RemoteError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.inner.config.api_url(path);
        tracing::debug!("[HTTP] {} {}", method, url);

        let mut request = self.inner.http.request(method, &url);
        if let Some(token) = self.token() {
            request = request.bearer_auth(token);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request
            .send()
            .await
            .map_err(|e| TransportFailure::Network(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            let bytes = response
                .bytes()
                .await
                .map_err(|e| TransportFailure::Network(e.to_string()))?;
            return Ok(decode(&bytes)?);
        }

        let text = response.text().await.unwrap_or_default();
        Err(classify(status, &text))
    }
}
