//! # Session Store
//!
//! Authentication lifecycle: register, login, logout, token verification and
//! the cached identity of the signed-in user.
//!
//! The token and identity live in durable [`Storage`] and are the only source
//! of truth across restarts. Network calls follow the same rule as the
//! resource clients: remote first, and after a transport failure the store
//! answers from its synthetic accounts for the rest of its lifetime.
//!
//! ## Local tokens
//!
//! Tokens issued in local mode look like `local.<user-id>.<expires-unix>.<nonce>`.
//! They are placeholders, not credentials. How they are checked in local mode
//! depends on [`LocalTokenPolicy`]:
//!
//! - `PresenceOnly` treats any stored token as proof of authentication.
//! - `Expiring` (the default) only accepts well-formed local tokens that have
//!   not expired. Expired or malformed local tokens clear the session. A token
//!   issued by the remote service cannot be checked offline: verification
//!   fails but the token stays stored for when the service is back.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use reqwest::{Method, StatusCode};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::client::http::{ApiClient, Rejection};
use crate::client::mode::{Mode, ModeFlag};
use crate::client::storage::Storage;
use crate::client::types::{AuthEnvelope, AuthSuccess, LoginRequest, RegisterRequest};
use crate::shared::error::{ClientError, ClientResult};
use crate::shared::models::{RecordKey, Role, User};

/// Storage key of the bearer token
pub const TOKEN_KEY: &str = "rescuedesk.token";
/// Storage key of the cached identity
pub const USER_KEY: &str = "rescuedesk.user";
/// Version written into the persisted identity payload
pub const SESSION_VERSION: u32 = 1;
/// Lifetime of locally issued tokens under the default policy
pub const DEFAULT_LOCAL_TOKEN_TTL_SECS: i64 = 24 * 60 * 60;

const AREA: &str = "SESSION";
const REGISTER_PATH: &str = "/auth/user/register";
const LOGIN_PATH: &str = "/auth/user/login";
const VERIFY_PATH: &str = "/auth/user/verify";

#[derive(Debug, Serialize, Deserialize)]
struct PersistedUser {
    version: u32,
    user: User,
}

/// Decode a stored identity. The flag is `true` for the unversioned legacy
/// shape (a bare user object).
fn decode_user(raw: &str) -> Option<(User, bool)> {
    let value: serde_json::Value = serde_json::from_str(raw).ok()?;
    match value.get("version").and_then(serde_json::Value::as_u64) {
        Some(version) if version == u64::from(SESSION_VERSION) => {
            serde_json::from_value::<PersistedUser>(value)
                .ok()
                .map(|persisted| (persisted.user, false))
        }
        Some(_) => None,
        None => serde_json::from_value::<User>(value).ok().map(|user| (user, true)),
    }
}

/// How local mode decides whether a stored token is still good
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocalTokenPolicy {
    /// Any stored token counts
    PresenceOnly,
    /// Only unexpired locally issued tokens count
    Expiring { ttl_secs: i64 },
}

impl Default for LocalTokenPolicy {
    fn default() -> Self {
        Self::Expiring {
            ttl_secs: DEFAULT_LOCAL_TOKEN_TTL_SECS,
        }
    }
}

impl LocalTokenPolicy {
    fn ttl(&self) -> Duration {
        match self {
            Self::PresenceOnly => Duration::seconds(DEFAULT_LOCAL_TOKEN_TTL_SECS),
            Self::Expiring { ttl_secs } => Duration::seconds(*ttl_secs),
        }
    }
}

/// A parsed locally issued token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalToken {
    pub user_id: u64,
    pub expires_at: DateTime<Utc>,
}

impl LocalToken {
    const PREFIX: &'static str = "local";

    /// Issue a new placeholder token for `user_id`
    pub fn issue(user_id: u64, ttl: Duration) -> String {
        let expires_at = Utc::now() + ttl;
        format!(
            "{}.{}.{}.{}",
            Self::PREFIX,
            user_id,
            expires_at.timestamp(),
            Uuid::new_v4().simple()
        )
    }

    /// Whether `token` was issued locally, well-formed or not
    pub fn is_local(token: &str) -> bool {
        token
            .strip_prefix(Self::PREFIX)
            .is_some_and(|rest| rest.starts_with('.'))
    }

    pub fn parse(token: &str) -> Option<Self> {
        let mut parts = token.split('.');
        if parts.next()? != Self::PREFIX {
            return None;
        }
        let user_id = parts.next()?.parse().ok()?;
        let expires_at = DateTime::from_timestamp(parts.next()?.parse().ok()?, 0)?;
        let nonce = parts.next()?;
        if nonce.is_empty() || parts.next().is_some() {
            return None;
        }
        Some(Self { user_id, expires_at })
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

/// A synthetic account usable in local mode
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalUser {
    pub id: u64,
    pub username: String,
    pub password: String,
    pub name: String,
    pub email: String,
    pub role: Role,
}

impl LocalUser {
    pub fn identity(&self) -> User {
        User {
            key: RecordKey::local(self.id),
            username: self.username.clone(),
            name: self.name.clone(),
            email: self.email.clone(),
            role: self.role,
        }
    }
}

/// Accounts available in local mode
pub fn seed_users() -> Vec<LocalUser> {
    vec![
        LocalUser {
            id: 1,
            username: "admin".to_string(),
            password: "admin123".to_string(),
            name: "Shelter Admin".to_string(),
            email: "admin@rescuedesk.local".to_string(),
            role: Role::Admin,
        },
        LocalUser {
            id: 2,
            username: "jane".to_string(),
            password: "password123".to_string(),
            name: "Jane Doe".to_string(),
            email: "jane@rescuedesk.local".to_string(),
            role: Role::User,
        },
    ]
}

/// Identity used when a valid token exists but no identity was cached
fn default_identity() -> User {
    User {
        key: RecordKey::default(),
        username: "guest".to_string(),
        name: "Local User".to_string(),
        email: String::new(),
        role: Role::User,
    }
}

fn mentions_duplicate(message: &str) -> bool {
    let message = message.to_lowercase();
    ["already exists", "already taken", "already registered", "already in use"]
        .iter()
        .any(|phrase| message.contains(phrase))
}

/// Authentication state backed by durable storage
#[derive(Debug)]
pub struct SessionStore {
    api: ApiClient,
    storage: Arc<dyn Storage>,
    mode: Arc<ModeFlag>,
    users: Mutex<Vec<LocalUser>>,
    policy: LocalTokenPolicy,
}

impl SessionStore {
    /// Open the session persisted in `storage` and hand its token to `api`
    pub fn new(api: ApiClient, storage: Arc<dyn Storage>) -> Self {
        let store = Self {
            api,
            storage,
            mode: Arc::new(ModeFlag::new()),
            users: Mutex::new(seed_users()),
            policy: LocalTokenPolicy::default(),
        };
        store.migrate_legacy_user();
        store.api.set_token(store.token());
        store
    }

    pub fn with_policy(mut self, policy: LocalTokenPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Replace the synthetic accounts
    pub fn with_users(mut self, users: Vec<LocalUser>) -> Self {
        self.users = Mutex::new(users);
        self
    }

    pub fn with_mode(mut self, mode: Arc<ModeFlag>) -> Self {
        self.mode = mode;
        self
    }

    pub fn mode_flag(&self) -> Arc<ModeFlag> {
        Arc::clone(&self.mode)
    }

    pub async fn mode(&self) -> Mode {
        self.mode.get().await
    }

    pub fn policy(&self) -> LocalTokenPolicy {
        self.policy
    }

    /// Create an account and sign in as it
    pub async fn register(&self, request: &RegisterRequest) -> ClientResult<AuthSuccess> {
        let call = self
            .api
            .send::<RegisterRequest, AuthEnvelope>(Method::POST, REGISTER_PATH, Some(request));
        if let Some(outcome) = self.mode.attempt(AREA, "register", call).await {
            let refused = |message: Option<String>| match message {
                Some(message) if mentions_duplicate(&message) => {
                    ClientError::duplicate_username(&request.username)
                }
                // The service refused inside a 2xx envelope; report it as a bad request.
                message => ClientError::rejected(
                    400,
                    message.unwrap_or_else(|| "registration failed".to_string()),
                ),
            };
            return match outcome {
                Ok(envelope) => self.accept(envelope, refused),
                Err(rejection) if rejection.status == StatusCode::CONFLICT => {
                    Err(ClientError::duplicate_username(&request.username))
                }
                Err(rejection) if rejection.message.as_deref().is_some_and(mentions_duplicate) => {
                    Err(ClientError::duplicate_username(&request.username))
                }
                Err(rejection) => Err(reject(rejection)),
            };
        }

        self.register_local(request).await
    }

    /// Sign in with username and password
    pub async fn login(&self, request: &LoginRequest) -> ClientResult<AuthSuccess> {
        let call = self
            .api
            .send::<LoginRequest, AuthEnvelope>(Method::POST, LOGIN_PATH, Some(request));
        if let Some(outcome) = self.mode.attempt(AREA, "login", call).await {
            return match outcome {
                Ok(envelope) => self.accept(envelope, |_| ClientError::InvalidCredentials),
                Err(rejection)
                    if matches!(
                        rejection.status,
                        StatusCode::BAD_REQUEST | StatusCode::UNAUTHORIZED | StatusCode::NOT_FOUND
                    ) =>
                {
                    Err(ClientError::InvalidCredentials)
                }
                Err(rejection) => Err(reject(rejection)),
            };
        }

        self.login_local(request).await
    }

    /// Forget the token and identity. Safe to call at any time.
    pub fn logout(&self) {
        for key in [TOKEN_KEY, USER_KEY] {
            if let Err(e) = self.storage.remove(key) {
                tracing::warn!("[{}] Failed to clear {}: {}", AREA, key, e);
            }
        }
        self.api.set_token(None);
        tracing::info!("[{}] Signed out", AREA);
    }

    /// Check the stored token, refreshing the cached identity on success.
    pub async fn verify_token(&self) -> bool {
        let Some(token) = self.token() else {
            return false;
        };
        self.api.set_token(Some(token.clone()));

        let call = self
            .api
            .send::<(), AuthEnvelope>(Method::GET, VERIFY_PATH, None);
        if let Some(outcome) = self.mode.attempt(AREA, "verify", call).await {
            return match outcome {
                Ok(envelope) if envelope.success => {
                    if let Some(user) = envelope.user {
                        self.store_user(&user);
                    }
                    true
                }
                Ok(envelope) => {
                    tracing::info!(
                        "[{}] Token refused: {}",
                        AREA,
                        envelope.message.unwrap_or_default()
                    );
                    self.logout();
                    false
                }
                Err(rejection)
                    if matches!(rejection.status, StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN) =>
                {
                    self.logout();
                    false
                }
                Err(rejection) => {
                    tracing::warn!(
                        "[{}] Verification rejected ({}): {}",
                        AREA,
                        rejection.status,
                        rejection.message_or_reason()
                    );
                    false
                }
            };
        }

        self.verify_local(&token).await
    }

    /// The cached identity, if any
    pub fn current_user(&self) -> Option<User> {
        let raw = self.storage.get(USER_KEY).ok().flatten()?;
        decode_user(&raw).map(|(user, _)| user)
    }

    /// The stored bearer token, if any
    pub fn token(&self) -> Option<String> {
        self.storage
            .get(TOKEN_KEY)
            .ok()
            .flatten()
            .filter(|token| !token.trim().is_empty())
    }

    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }

    pub fn is_admin(&self) -> bool {
        self.current_user().is_some_and(|user| user.is_admin())
    }

    fn accept(
        &self,
        envelope: AuthEnvelope,
        refused: impl FnOnce(Option<String>) -> ClientError,
    ) -> ClientResult<AuthSuccess> {
        match envelope {
            AuthEnvelope {
                success: true,
                token: Some(token),
                user: Some(user),
                message,
            } => {
                self.persist(&token, &user);
                tracing::info!("[{}] Signed in as {}", AREA, user.username);
                Ok(AuthSuccess { token, user, message })
            }
            envelope => Err(refused(envelope.message)),
        }
    }

    async fn register_local(&self, request: &RegisterRequest) -> ClientResult<AuthSuccess> {
        let account = {
            let mut users = self.users.lock().await;
            if users
                .iter()
                .any(|user| user.username.eq_ignore_ascii_case(&request.username))
            {
                return Err(ClientError::duplicate_username(&request.username));
            }

            let id = users.iter().map(|user| user.id).max().unwrap_or(0) + 1;
            let name = if request.name.trim().is_empty() {
                request.username.clone()
            } else {
                request.name.clone()
            };
            let account = LocalUser {
                id,
                username: request.username.clone(),
                password: request.password.clone(),
                name,
                email: request.email.clone(),
                role: Role::User,
            };
            users.push(account.clone());
            account
        };

        let success = self.sign_in_local(&account, "Registration successful");
        tracing::info!("[{}] Registered local account {} ({})", AREA, account.username, account.id);
        Ok(success)
    }

    async fn login_local(&self, request: &LoginRequest) -> ClientResult<AuthSuccess> {
        let account = self
            .users
            .lock()
            .await
            .iter()
            .find(|user| {
                user.username.eq_ignore_ascii_case(&request.username) && user.password == request.password
            })
            .cloned()
            .ok_or(ClientError::InvalidCredentials)?;

        let success = self.sign_in_local(&account, "Login successful");
        tracing::info!("[{}] Signed in locally as {}", AREA, account.username);
        Ok(success)
    }

    fn sign_in_local(&self, account: &LocalUser, message: &str) -> AuthSuccess {
        let token = LocalToken::issue(account.id, self.policy.ttl());
        let user = account.identity();
        self.persist(&token, &user);
        AuthSuccess {
            token,
            user,
            message: Some(message.to_string()),
        }
    }

    async fn verify_local(&self, token: &str) -> bool {
        match self.policy {
            LocalTokenPolicy::PresenceOnly => {
                if self.current_user().is_none() {
                    self.store_user(&default_identity());
                }
                true
            }
            LocalTokenPolicy::Expiring { .. } => {
                let Some(parsed) = LocalToken::parse(token) else {
                    if LocalToken::is_local(token) {
                        tracing::warn!("[{}] Malformed local token; signing out", AREA);
                        self.logout();
                    } else {
                        tracing::info!("[{}] Service token cannot be checked offline; keeping it", AREA);
                    }
                    return false;
                };
                if parsed.is_expired_at(Utc::now()) {
                    tracing::info!("[{}] Local token expired at {}", AREA, parsed.expires_at);
                    self.logout();
                    return false;
                }
                if self.current_user().is_none() {
                    let user = self
                        .users
                        .lock()
                        .await
                        .iter()
                        .find(|user| user.id == parsed.user_id)
                        .map(LocalUser::identity)
                        .unwrap_or_else(default_identity);
                    self.store_user(&user);
                }
                true
            }
        }
    }

    fn persist(&self, token: &str, user: &User) {
        if let Err(e) = self.storage.set(TOKEN_KEY, token) {
            tracing::warn!("[{}] Failed to persist token: {}", AREA, e);
        }
        self.store_user(user);
        self.api.set_token(Some(token.to_string()));
    }

    fn store_user(&self, user: &User) {
        let payload = PersistedUser {
            version: SESSION_VERSION,
            user: user.clone(),
        };
        let result = serde_json::to_string(&payload)
            .map_err(|e| e.to_string())
            .and_then(|json| self.storage.set(USER_KEY, &json).map_err(|e| e.to_string()));
        if let Err(e) = result {
            tracing::warn!("[{}] Failed to persist identity: {}", AREA, e);
        }
    }

    /// Rewrite an unversioned identity payload in the current format.
    fn migrate_legacy_user(&self) {
        let Some(raw) = self.storage.get(USER_KEY).ok().flatten() else {
            return;
        };
        match decode_user(&raw) {
            Some((user, true)) => {
                tracing::info!("[{}] Migrating stored identity to version {}", AREA, SESSION_VERSION);
                self.store_user(&user);
            }
            Some((_, false)) => {}
            None => tracing::warn!("[{}] Ignoring unreadable stored identity", AREA),
        }
    }
}

fn reject(rejection: Rejection) -> ClientError {
    ClientError::rejected(rejection.status.as_u16(), rejection.message_or_reason())
}
