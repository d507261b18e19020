use super::authorizer::{evaluate, AccessDecision, AccessRequirement};
use super::principal::{Permission, Role};
use super::session::Session;

pub const LOGIN_PATH: &str = "/login";
pub const DEFAULT_FALLBACK_PATH: &str = "/unauthorized";

/// Wraps a protected destination. Holds no state of its own: `resolve` is a
/// pure function of the session snapshot and is re-run whenever the session
/// changes.
#[derive(Debug, Clone)]
pub struct RouteGuard {
    pub required_role: Option<Role>,
    pub required_permission: Option<Permission>,
    pub fallback_path: String,
}

/// What the caller should do with the wrapped destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardOutcome {
    /// Access granted; render the wrapped view unchanged.
    Render,
    /// Not authenticated; go to login, remembering the requested destination
    /// so it can resume after a successful login.
    RedirectToLogin { resume: String },
    /// Authenticated but not allowed; go to the fallback destination.
    Redirect(String),
}

impl GuardOutcome {
    /// Where the caller should navigate, if anywhere. Unauthenticated
    /// outcomes always land on the login page; the resume path rides along
    /// separately in the variant.
    pub fn redirect_target(&self) -> Option<&str> {
        match self {
            GuardOutcome::Render => None,
            GuardOutcome::RedirectToLogin { .. } => Some(LOGIN_PATH),
            GuardOutcome::Redirect(path) => Some(path.as_str()),
        }
    }
}

impl Default for RouteGuard {
    fn default() -> Self {
        Self {
            required_role: None,
            required_permission: None,
            fallback_path: DEFAULT_FALLBACK_PATH.to_string(),
        }
    }
}

impl RouteGuard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn require_role(mut self, role: Role) -> Self {
        self.required_role = Some(role);
        self
    }

    pub fn require_permission(mut self, permission: Permission) -> Self {
        self.required_permission = Some(permission);
        self
    }

    pub fn with_fallback(mut self, path: impl Into<String>) -> Self {
        self.fallback_path = path.into();
        self
    }

    /// Decide whether `requested_path` may render for this session.
    pub fn resolve(&self, session: &Session, requested_path: &str) -> GuardOutcome {
        let req = AccessRequirement { role: self.required_role, permission: self.required_permission };
        match evaluate(session, &req) {
            AccessDecision::Grant => GuardOutcome::Render,
            AccessDecision::DenyUnauthenticated => {
                GuardOutcome::RedirectToLogin { resume: requested_path.to_string() }
            }
            AccessDecision::DenyForbidden => GuardOutcome::Redirect(self.fallback_path.clone()),
        }
    }
}
