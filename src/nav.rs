//! Navigation links, dashboard panels and quick actions.
//!
//! Links are gated only by authentication state; panels use the OR-of-checks
//! visibility rule (`identity::any_grants`), which is looser than the route
//! guard's AND rule on purpose.

use crate::identity::{any_grants, can, Permission, Role, Session};

#[derive(Debug, Clone)]
pub struct NavigationLink {
    pub label: &'static str,
    pub href: &'static str,
    pub required_role: Option<Role>,
    pub required_permission: Option<Permission>,
}

const fn link(label: &'static str, href: &'static str) -> NavigationLink {
    NavigationLink { label, href, required_role: None, required_permission: None }
}

const BASE_LINKS: &[NavigationLink] = &[link("Home", "/")];

const PROTECTED_LINKS: &[NavigationLink] = &[
    link("Home", "/"),
    link("Dashboard", "/dashboard"),
    link("Test Page", "/test-page"),
];

/// The navigation set for a session: the protected links appear once
/// authenticated, the base set otherwise.
pub fn visible_links(session: &Session) -> &'static [NavigationLink] {
    if session.is_authenticated {
        PROTECTED_LINKS
    } else {
        BASE_LINKS
    }
}

/// One dashboard card with its OR visibility rule.
#[derive(Debug, Clone)]
pub struct DashboardPanel {
    pub title: &'static str,
    pub blurb: &'static str,
    pub roles: &'static [Role],
    pub permissions: &'static [Permission],
}

impl DashboardPanel {
    pub fn visible(&self, session: &Session) -> bool {
        any_grants(session, self.roles, self.permissions)
    }
}

pub const DASHBOARD_PANELS: &[DashboardPanel] = &[
    DashboardPanel {
        title: "My Accounts",
        blurb: "View and manage your bank accounts",
        roles: &[Role::Customer],
        permissions: &[Permission::ViewAccounts],
    },
    DashboardPanel {
        title: "Transaction Approval",
        blurb: "Review and approve pending transactions",
        roles: &[Role::Teller, Role::Manager],
        permissions: &[Permission::ApproveTransactions],
    },
    DashboardPanel {
        title: "Branch Analytics",
        blurb: "View branch performance and analytics",
        roles: &[Role::Manager],
        permissions: &[Permission::ViewAnalytics],
    },
    DashboardPanel {
        title: "User Management",
        blurb: "Manage system users and permissions",
        roles: &[Role::Admin],
        permissions: &[Permission::ManageUsers],
    },
    DashboardPanel {
        title: "Audit Logs",
        blurb: "View system audit and activity logs",
        roles: &[Role::Admin],
        permissions: &[Permission::ViewAuditLogs],
    },
];

/// Panels the session may see, in declaration order.
pub fn visible_panels(session: &Session) -> Vec<&'static DashboardPanel> {
    DASHBOARD_PANELS.iter().filter(|p| p.visible(session)).collect()
}

/// One permission-gated quick action button.
#[derive(Debug, Clone)]
pub struct QuickAction {
    pub label: &'static str,
    pub permission: Permission,
}

pub const QUICK_ACTIONS: &[QuickAction] = &[
    QuickAction { label: "New Transaction", permission: Permission::CreateTransactions },
    QuickAction { label: "Transfer Funds", permission: Permission::ManageTransfers },
    QuickAction { label: "Approve Pending", permission: Permission::ApproveTransactions },
    QuickAction { label: "Manage Users", permission: Permission::ManageUsers },
];

pub fn visible_actions(session: &Session) -> Vec<&'static QuickAction> {
    QUICK_ACTIONS
        .iter()
        .filter(|a| can(session, a.permission))
        .collect()
}
