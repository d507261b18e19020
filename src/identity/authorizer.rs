//! Pure access-decision functions over a session snapshot.
//!
//! Two deliberately distinct rule families live here and must stay distinct:
//! the route-guard rule (`evaluate`) ANDs every specified constraint, while
//! the dashboard-visibility predicates (`any_grants`, `can_any`) OR their
//! checks. The portal exhibits both behaviors at different call sites.

use super::principal::{Permission, Role};
use super::session::Session;

/// Constraints a protected destination may declare. Absent fields are not
/// checked; present fields must all pass.
#[derive(Debug, Clone, Copy, Default)]
pub struct AccessRequirement {
    pub role: Option<Role>,
    pub permission: Option<Permission>,
}

impl AccessRequirement {
    pub fn role(r: Role) -> Self {
        Self { role: Some(r), permission: None }
    }

    pub fn permission(p: Permission) -> Self {
        Self { role: None, permission: Some(p) }
    }
}

/// Outcome of evaluating a requirement. Denial is normal control flow, never
/// an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessDecision {
    Grant,
    /// No authenticated identity; the caller should redirect to login.
    DenyUnauthenticated,
    /// Authenticated but missing the required role or permission.
    DenyForbidden,
}

fn session_has_role(session: &Session, r: Role) -> bool {
    session.user.as_ref().map(|u| u.role == r).unwrap_or(false)
}

fn session_has_permission(session: &Session, p: Permission) -> bool {
    session
        .user
        .as_ref()
        .map(|u| u.permissions.contains(&p))
        .unwrap_or(false)
}

/// Route-guard rule, evaluated in order: unauthenticated denies first, then
/// each specified constraint must pass (AND).
pub fn evaluate(session: &Session, req: &AccessRequirement) -> AccessDecision {
    if !session.is_authenticated {
        return AccessDecision::DenyUnauthenticated;
    }
    if let Some(role) = req.role {
        if !session_has_role(session, role) {
            return AccessDecision::DenyForbidden;
        }
    }
    if let Some(permission) = req.permission {
        if !session_has_permission(session, permission) {
            return AccessDecision::DenyForbidden;
        }
    }
    AccessDecision::Grant
}

/// `can`: the identity holds the permission.
pub fn can(session: &Session, p: Permission) -> bool {
    session_has_permission(session, p)
}

/// `is`: the identity's role equals `r`.
pub fn is(session: &Session, r: Role) -> bool {
    session_has_role(session, r)
}

/// True when any of the listed permissions is held.
pub fn can_any(session: &Session, permissions: &[Permission]) -> bool {
    permissions.iter().any(|p| session_has_permission(session, *p))
}

/// True when every listed permission is held.
pub fn can_all(session: &Session, permissions: &[Permission]) -> bool {
    permissions.iter().all(|p| session_has_permission(session, *p))
}

/// Feature-visibility rule: grant when the identity matches ANY listed role
/// OR holds ANY listed permission. This is the dashboard-panel semantics and
/// is intentionally looser than `evaluate`.
pub fn any_grants(session: &Session, roles: &[Role], permissions: &[Permission]) -> bool {
    roles.iter().any(|r| session_has_role(session, *r)) || can_any(session, permissions)
}
