use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::audit::{AuditLog, ACTION_LOGIN, ACTION_LOGOUT};
use crate::error::AppError;
use crate::storage::DurableStore;

use super::principal::{Permission, Role, User};
use super::registry;

/// Durable slot holding the persisted part of the session.
pub const SESSION_SLOT: &str = "rbac-banking-auth-storage";

/// Bumped whenever the persisted shape changes; a mismatch on hydrate yields
/// a fresh unauthenticated session instead of a parse failure.
pub const SESSION_SCHEMA_VERSION: u32 = 2;

const DEFAULT_LOGIN_LATENCY: Duration = Duration::from_millis(1000);

/// Transient authentication state of the current process. Exactly one exists,
/// owned by `SessionStore`; evaluator and guard code take cheap snapshots.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub user: Option<User>,
    pub is_authenticated: bool,
    #[serde(skip)]
    pub is_loading: bool,
}

/// The subset of the session that survives a process restart. The credential
/// is never part of this.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct PersistedSession {
    user: Option<User>,
    is_authenticated: bool,
}

#[derive(Debug, Error)]
pub enum LoginError {
    /// Unknown username or wrong password; the two are deliberately not
    /// distinguished to the user.
    #[error("Invalid credentials!")]
    InvalidCredentials,
    /// Unexpected fault at the session boundary (e.g. a future real backend
    /// call failing). The session is reset to not-loading/unauthenticated.
    #[error("Login failed. Please try again.")]
    Internal(String),
}

impl LoginError {
    /// Map to the transient notice surfaced by the UI layer.
    pub fn to_app_error(&self) -> AppError {
        match self {
            LoginError::InvalidCredentials => AppError::auth("invalid_credentials", "Invalid credentials!"),
            LoginError::Internal(msg) => AppError::internal("login_failed", msg.as_str()),
        }
    }
}

/// Owner of the single process-wide session.
///
/// Login is the only asynchronous operation in the core and carries a fixed
/// simulated latency. While a login is in flight `is_loading()` answers true;
/// a second concurrent login is not prevented here and must be guarded by the
/// caller (disable the submitting control).
#[derive(Clone)]
pub struct SessionStore {
    state: Arc<parking_lot::RwLock<Session>>,
    durable: DurableStore,
    audit: AuditLog,
    latency: Duration,
}

impl SessionStore {
    /// Create the session store, hydrating any persisted session from the
    /// durable slot. A missing, unreadable or version-mismatched slot starts
    /// an empty unauthenticated session.
    pub fn hydrate(durable: DurableStore, audit: AuditLog) -> Self {
        let session = durable
            .load_versioned::<PersistedSession>(SESSION_SLOT, SESSION_SCHEMA_VERSION)
            .map(|p| Session { user: p.user, is_authenticated: p.is_authenticated, is_loading: false })
            .unwrap_or_default();
        if session.is_authenticated {
            debug!(target: "bankgate::session", "session resumed: user={:?}", session.user.as_ref().map(|u| u.username.as_str()));
        }
        Self {
            state: Arc::new(parking_lot::RwLock::new(session)),
            durable,
            audit,
            latency: DEFAULT_LOGIN_LATENCY,
        }
    }

    /// Override the simulated login latency; tests use zero.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Authenticate against the static registry and credential table.
    ///
    /// On success the identity is installed with a refreshed last-login
    /// timestamp, the session is persisted (identity + flag only) and a
    /// `USER_LOGIN` audit event is appended. On failure the session stays
    /// unauthenticated and the error maps to a user-facing notice.
    pub async fn login(&self, username: &str, password: &str) -> Result<(), LoginError> {
        self.state.write().is_loading = true;
        // Simulated network latency; an implementer may replace this with a
        // real backend call that can also fail with LoginError::Internal.
        tokio::time::sleep(self.latency).await;

        let candidate = registry::find_user(username);
        let valid = registry::credential_matches(username, password);

        match candidate {
            Some(user) if valid => {
                let mut updated = user.clone();
                updated.last_login = Some(chrono::Utc::now());
                {
                    let mut s = self.state.write();
                    s.user = Some(updated.clone());
                    s.is_authenticated = true;
                    s.is_loading = false;
                }
                self.persist();
                self.audit
                    .record(&updated.id, ACTION_LOGIN, format!("User {} logged in", username));
                info!(target: "bankgate::session", "login: user={} role={}", username, updated.role);
                Ok(())
            }
            _ => {
                self.state.write().is_loading = false;
                debug!(target: "bankgate::session", "login rejected: user={}", username);
                Err(LoginError::InvalidCredentials)
            }
        }
    }

    /// Clear the session. If an identity is present a `USER_LOGOUT` audit
    /// event is appended first. Never fails.
    pub fn logout(&self) {
        let current = self.state.read().user.clone();
        if let Some(user) = current {
            self.audit
                .record(&user.id, ACTION_LOGOUT, format!("User {} logged out", user.username));
            info!(target: "bankgate::session", "logout: user={}", user.username);
        }
        {
            let mut s = self.state.write();
            s.user = None;
            s.is_authenticated = false;
            s.is_loading = false;
        }
        self.persist();
    }

    /// True iff an identity is set and its permission set contains `p`.
    pub fn has_permission(&self, p: Permission) -> bool {
        self.state
            .read()
            .user
            .as_ref()
            .map(|u| u.permissions.contains(&p))
            .unwrap_or(false)
    }

    /// True iff an identity is set and its role equals `r` exactly.
    pub fn has_role(&self, r: Role) -> bool {
        self.state
            .read()
            .user
            .as_ref()
            .map(|u| u.role == r)
            .unwrap_or(false)
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.read().is_authenticated
    }

    pub fn is_loading(&self) -> bool {
        self.state.read().is_loading
    }

    pub fn current_user(&self) -> Option<User> {
        self.state.read().user.clone()
    }

    /// Cheap clone of the whole session for pure evaluation call sites.
    pub fn snapshot(&self) -> Session {
        self.state.read().clone()
    }

    fn persist(&self) {
        let s = self.state.read();
        let persisted = PersistedSession { user: s.user.clone(), is_authenticated: s.is_authenticated };
        drop(s);
        self.durable
            .save_versioned(SESSION_SLOT, SESSION_SCHEMA_VERSION, &persisted);
    }
}
