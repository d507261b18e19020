//! Session and authorization integration tests: registry logins, predicates,
//! guard outcomes, durable round-trips and the audit trail.

use std::time::Duration;

use anyhow::Result;
use tempfile::tempdir;

use bankgate::audit::{AuditLog, ACTION_LOGIN, ACTION_LOGOUT};
use bankgate::identity::{
    registry, GuardOutcome, Permission, Role, RouteGuard, SessionStore, SESSION_SLOT,
};
use bankgate::storage::DurableStore;

fn store_at(path: &std::path::Path) -> (DurableStore, AuditLog) {
    let durable = DurableStore::new(path).expect("durable store");
    let audit = AuditLog::new(durable.clone());
    (durable, audit)
}

fn sessions_at(path: &std::path::Path) -> SessionStore {
    let (durable, audit) = store_at(path);
    SessionStore::hydrate(durable, audit).with_latency(Duration::ZERO)
}

// username -> password pairs for the static demo registry
const CREDENTIALS: &[(&str, &str)] = &[
    ("alice", "alice123"),
    ("tom", "teller123"),
    ("maria", "manager123"),
    ("admin", "admin123"),
];

#[tokio::test]
async fn every_registry_identity_logs_in_with_paired_credential() -> Result<()> {
    let tmp = tempdir()?;
    for (username, password) in CREDENTIALS.iter().copied() {
        let sessions = sessions_at(&tmp.path().join(username));
        sessions.login(username, password).await.expect("login should succeed");
        assert!(sessions.is_authenticated());
        assert!(!sessions.is_loading());

        let user = sessions.current_user().expect("user installed");
        let registered = registry::find_user(username).expect("registry entry");
        assert_eq!(user.role, registered.role);
        assert_eq!(user.permissions, registered.permissions);
        // Login refreshes the timestamp the registry leaves empty
        assert!(user.last_login.is_some());
    }
    Ok(())
}

#[tokio::test]
async fn wrong_password_and_unknown_user_stay_unauthenticated() -> Result<()> {
    let tmp = tempdir()?;
    let sessions = sessions_at(tmp.path());

    let err = sessions.login("alice", "wrong").await.unwrap_err();
    assert_eq!(err.to_string(), "Invalid credentials!");
    assert!(!sessions.is_authenticated());
    assert!(!sessions.is_loading());

    let err = sessions.login("nobody", "alice123").await.unwrap_err();
    assert_eq!(err.to_string(), "Invalid credentials!");
    assert!(!sessions.is_authenticated());
    Ok(())
}

#[tokio::test]
async fn predicates_answer_false_without_identity() -> Result<()> {
    let tmp = tempdir()?;
    let sessions = sessions_at(tmp.path());
    assert!(!sessions.has_role(Role::Admin));
    assert!(!sessions.has_role(Role::Customer));
    assert!(!sessions.has_permission(Permission::ViewAccounts));

    sessions.login("tom", "teller123").await?;
    assert!(sessions.has_role(Role::Teller));
    assert!(!sessions.has_role(Role::Manager));
    assert!(sessions.has_permission(Permission::ApproveTransactions));
    assert!(!sessions.has_permission(Permission::SystemConfig));
    Ok(())
}

#[tokio::test]
async fn guard_redirects_match_denial_reason() -> Result<()> {
    let tmp = tempdir()?;
    let sessions = sessions_at(tmp.path());
    let guard = RouteGuard::new().require_role(Role::Admin);

    // Unauthenticated: back to login, remembering the destination
    assert_eq!(
        guard.resolve(&sessions.snapshot(), "/test-page"),
        GuardOutcome::RedirectToLogin { resume: "/test-page".into() }
    );

    // Customer on an admin route: unauthorized fallback
    sessions.login("alice", "alice123").await?;
    assert_eq!(
        guard.resolve(&sessions.snapshot(), "/test-page"),
        GuardOutcome::Redirect("/unauthorized".into())
    );

    // Admin renders
    sessions.logout();
    sessions.login("admin", "admin123").await?;
    assert_eq!(guard.resolve(&sessions.snapshot(), "/test-page"), GuardOutcome::Render);
    Ok(())
}

#[tokio::test]
async fn session_survives_restart_via_durable_slot() -> Result<()> {
    let tmp = tempdir()?;
    {
        let sessions = sessions_at(tmp.path());
        sessions.login("maria", "manager123").await?;
    }
    // New store over the same root simulates a process restart
    let resumed = sessions_at(tmp.path());
    assert!(resumed.is_authenticated());
    let user = resumed.current_user().expect("resumed user");
    assert_eq!(user.username, "maria");
    assert_eq!(user.role, Role::Manager);
    Ok(())
}

#[tokio::test]
async fn schema_version_mismatch_yields_fresh_session() -> Result<()> {
    let tmp = tempdir()?;
    {
        let sessions = sessions_at(tmp.path());
        sessions.login("maria", "manager123").await?;
    }
    // Rewrite the persisted envelope under a stale version marker
    let (durable, _) = store_at(tmp.path());
    let blob = durable.get(SESSION_SLOT).expect("persisted session");
    let rewritten = blob.replacen("\"version\":2", "\"version\":1", 1);
    durable.set(SESSION_SLOT, &rewritten);

    let resumed = sessions_at(tmp.path());
    assert!(!resumed.is_authenticated());
    assert!(resumed.current_user().is_none());
    Ok(())
}

#[tokio::test]
async fn logout_clears_session_and_is_idempotent() -> Result<()> {
    let tmp = tempdir()?;
    let sessions = sessions_at(tmp.path());
    sessions.login("alice", "alice123").await?;
    sessions.logout();
    assert!(!sessions.is_authenticated());
    assert!(sessions.current_user().is_none());
    // Logging out without a session never fails
    sessions.logout();
    assert!(!sessions.is_authenticated());
    Ok(())
}

#[tokio::test]
async fn audit_trail_records_login_and_logout() -> Result<()> {
    let tmp = tempdir()?;
    let (durable, audit) = store_at(tmp.path());
    let sessions = SessionStore::hydrate(durable, audit.clone()).with_latency(Duration::ZERO);

    // Failed attempts do not reach the trail
    let _ = sessions.login("alice", "nope").await;
    assert!(audit.entries().is_empty());

    sessions.login("alice", "alice123").await?;
    sessions.logout();
    let entries = audit.entries();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].action, ACTION_LOGIN);
    assert_eq!(entries[0].user_id, "u-1001");
    assert_eq!(entries[1].action, ACTION_LOGOUT);
    assert!(entries[1].details.contains("alice"));
    Ok(())
}

#[tokio::test]
async fn persisted_blob_never_contains_the_password() -> Result<()> {
    let tmp = tempdir()?;
    let sessions = sessions_at(tmp.path());
    sessions.login("admin", "admin123").await?;
    let (durable, _) = store_at(tmp.path());
    let blob = durable.get(SESSION_SLOT).expect("persisted session");
    assert!(!blob.contains("admin123"));
    Ok(())
}
