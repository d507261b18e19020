//! Static demo identity registry and its parallel credential table.
//!
//! Both are fixed at build time; the session store looks identities up here
//! during login. Credentials are plain strings on purpose: this is a demo
//! portal with no real verification, and the password never reaches durable
//! storage.

use std::collections::HashSet;

use once_cell::sync::Lazy;

use super::principal::{AccountType, Permission, Role, User};

fn user(
    id: &str,
    username: &str,
    first_name: &str,
    last_name: &str,
    role: Role,
    permissions: &[Permission],
    account_type: AccountType,
) -> User {
    User {
        id: id.to_string(),
        username: username.to_string(),
        first_name: first_name.to_string(),
        last_name: last_name.to_string(),
        email: format!("{}@bankgate.demo", username),
        role,
        permissions: permissions.iter().copied().collect::<HashSet<_>>(),
        account_type,
        is_active: true,
        last_login: None,
    }
}

static DEMO_USERS: Lazy<Vec<User>> = Lazy::new(|| {
    use Permission::*;
    vec![
        user(
            "u-1001",
            "alice",
            "Alice",
            "Carter",
            Role::Customer,
            &[ViewAccounts, ViewTransactions, CreateTransactions, ManageTransfers],
            AccountType::Checking,
        ),
        user(
            "u-1002",
            "tom",
            "Tom",
            "Nguyen",
            Role::Teller,
            &[ViewAccounts, ViewTransactions, CreateTransactions, ApproveTransactions],
            AccountType::Savings,
        ),
        user(
            "u-1003",
            "maria",
            "Maria",
            "Alvarez",
            Role::Manager,
            &[
                ViewAccounts,
                ViewTransactions,
                CreateTransactions,
                ApproveTransactions,
                ViewAnalytics,
                ManageAccounts,
            ],
            AccountType::Business,
        ),
        user(
            "u-1004",
            "admin",
            "Ada",
            "Okafor",
            Role::Admin,
            &[
                ViewAccounts,
                ViewTransactions,
                CreateTransactions,
                ManageTransfers,
                ViewAnalytics,
                ManageUsers,
                ManageAccounts,
                ApproveTransactions,
                ViewAuditLogs,
                SystemConfig,
            ],
            AccountType::Premium,
        ),
    ]
});

/// username -> password, parallel to the user list above.
static DEMO_CREDENTIALS: Lazy<Vec<(&'static str, &'static str)>> = Lazy::new(|| {
    vec![
        ("alice", "alice123"),
        ("tom", "teller123"),
        ("maria", "manager123"),
        ("admin", "admin123"),
    ]
});

/// Look up a registered identity by username.
pub fn find_user(username: &str) -> Option<&'static User> {
    DEMO_USERS.iter().find(|u| u.username == username)
}

/// Check a candidate password against the static credential table.
pub fn credential_matches(username: &str, password: &str) -> bool {
    DEMO_CREDENTIALS
        .iter()
        .any(|(u, p)| *u == username && *p == password)
}

/// All registered identities; seeds the user management demo table.
pub fn all_users() -> &'static [User] {
    &DEMO_USERS
}
