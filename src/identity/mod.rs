//! Central identity and session management for the portal core.
//! Keep the public surface thin and split implementation across sub-modules.

mod authorizer;
mod guard;
mod principal;
pub mod registry;
mod session;

pub use authorizer::{any_grants, can, can_all, can_any, evaluate, is, AccessDecision, AccessRequirement};
pub use guard::{GuardOutcome, RouteGuard, DEFAULT_FALLBACK_PATH, LOGIN_PATH};
pub use principal::{AccountType, Permission, Role, User};
pub use session::{LoginError, Session, SessionStore, SESSION_SCHEMA_VERSION, SESSION_SLOT};
