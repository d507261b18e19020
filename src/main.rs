use std::time::Duration;

use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use bankgate::audit::AuditLog;
use bankgate::demo::{product_config, seed_products, seed_users, user_config, Product};
use bankgate::error::{AppError, AppResult};
use bankgate::identity::{Permission, Role, RouteGuard, SessionStore, User};
use bankgate::nav::{visible_actions, visible_links, visible_panels};
use bankgate::storage::DurableStore;
use bankgate::table::{
    EntityStore, Row, SortDirective, TableConfig, TableController, TableView,
};

fn open_state(dir: &str) -> AppResult<DurableStore> {
    DurableStore::new(dir)
        .map_err(|e| AppError::storage("state_dir".to_string(), format!("cannot open '{}': {}", dir, e)))
}

fn print_page<T: Row + Clone + serde::Serialize + serde::de::DeserializeOwned>(
    config: &TableConfig,
    table: &mut TableController<T>,
) {
    let page = table.page();
    println!(
        "\n{} management — page {}/{} ({} of {} rows shown)",
        config.name,
        page.page_index + 1,
        page.page_count,
        page.rows.len(),
        page.total_rows
    );
    let labels: Vec<&str> = config.columns.iter().map(|c| c.label.as_str()).collect();
    println!("  {}", labels.join(" | "));
    for row in &page.rows {
        let cells: Vec<String> = config
            .columns
            .iter()
            .map(|c| row.cell(&c.key).map(|v| v.render()).unwrap_or_default())
            .collect();
        println!("  {}", cells.join(" | "));
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Init logging
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .unwrap();
    fmt().with_env_filter(filter).init();

    let rust_log = std::env::var("RUST_LOG").unwrap_or_else(|_| "<unset>".to_string());
    let state_dir = std::env::var("BANKGATE_STATE_DIR").unwrap_or_else(|_| ".bankgate-state".to_string());
    let username = std::env::var("BANKGATE_USER").unwrap_or_else(|_| "admin".to_string());
    let password = std::env::var("BANKGATE_PASSWORD").unwrap_or_else(|_| "admin123".to_string());
    info!(
        target: "bankgate",
        "bankgate starting: RUST_LOG='{}', state_dir='{}', user='{}'",
        rust_log, state_dir, username
    );

    let durable = open_state(&state_dir)?;
    let audit = AuditLog::new(durable.clone());
    let sessions = SessionStore::hydrate(durable.clone(), audit.clone())
        .with_latency(Duration::from_millis(250));

    if let Err(e) = sessions.login(&username, &password).await {
        // Transient notice, never a crash.
        let notice = e.to_app_error();
        println!("[{}] {}", notice.notice_level(), notice.message());
        return Ok(());
    }
    let session = sessions.snapshot();
    if let Some(user) = &session.user {
        println!("Welcome back, {}! ({})", user.first_name, user.role);
    }

    // Route guards for the two protected destinations
    let dashboard = RouteGuard::new().require_permission(Permission::ViewAccounts);
    let test_page = RouteGuard::new().require_role(Role::Admin);
    println!("/dashboard -> {:?}", dashboard.resolve(&session, "/dashboard"));
    println!("/test-page -> {:?}", test_page.resolve(&session, "/test-page"));

    println!("\nNavigation:");
    for link in visible_links(&session) {
        println!("  {} ({})", link.label, link.href);
    }
    println!("\nDashboard panels:");
    for panel in visible_panels(&session) {
        println!("  [{}] {}", panel.title, panel.blurb);
    }
    println!("\nQuick actions:");
    for action in visible_actions(&session) {
        println!("  <{}>", action.label);
    }

    // Product table bound to a persistent store, sorted by price descending
    let products = product_config();
    let store = EntityStore::<Product>::persistent(seed_products(), durable.clone(), "demo-products");
    let view = TableView::new().with_page_size(5);
    let mut table = TableController::new(store).with_view(view);
    table.view().set_sort(vec![SortDirective::desc("price")]);
    print_page(&products, &mut table);

    // User table seeded from the identity registry, alphabetical by surname
    let users = user_config();
    let store = EntityStore::<User>::persistent(seed_users(), durable.clone(), "demo-users");
    let mut table = TableController::new(store);
    table.view().set_sort(vec![SortDirective::asc("last_name")]);
    print_page(&users, &mut table);

    sessions.logout();
    println!("\nYou have been logged out. ({} audit events recorded)", audit.entries().len());
    Ok(())
}
