//! Demo catalog used by the bundled binary and the integration tests: two
//! concrete entity types (products and user accounts), their seed rows and
//! their table descriptors. Having two shapes keeps the store and view
//! honestly generic.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::identity::{registry, AccountType, User};
use crate::table::{
    CellValue, ColumnKind, ColumnSpec, FieldKind, FormField, HasId, Row, SelectOption, TableConfig,
    TableFilter,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub price: f64,
    pub category: String,
    pub in_stock: bool,
    pub description: String,
    pub created_at: NaiveDate,
}

impl HasId for Product {
    fn id(&self) -> &str {
        &self.id
    }

    fn assign_id(&mut self, id: String) {
        self.id = id;
    }
}

impl Row for Product {
    fn cell(&self, column: &str) -> Option<CellValue> {
        match column {
            "name" => Some(CellValue::Text(self.name.clone())),
            "price" => Some(CellValue::Number(self.price)),
            "category" => Some(CellValue::Text(self.category.clone())),
            "in_stock" => Some(CellValue::Bool(self.in_stock)),
            "description" => Some(CellValue::Text(self.description.clone())),
            "created_at" => Some(CellValue::Date(self.created_at)),
            _ => None,
        }
    }

    fn searchable() -> &'static [&'static str] {
        &["name", "category", "description"]
    }
}

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("static demo date")
}

/// The catalog the demo table starts from.
pub fn seed_products() -> Vec<Product> {
    vec![
        Product {
            id: "1".into(),
            name: "MacBook Pro".into(),
            price: 1999.99,
            category: "electronics".into(),
            in_stock: true,
            description: "16-inch MacBook Pro with M3 chip".into(),
            created_at: day(2024, 1, 15),
        },
        Product {
            id: "2".into(),
            name: "T-Shirt".into(),
            price: 29.99,
            category: "clothing".into(),
            in_stock: true,
            description: "Cotton crew neck t-shirt".into(),
            created_at: day(2024, 1, 14),
        },
        Product {
            id: "3".into(),
            name: "Rust Programming Guide".into(),
            price: 49.99,
            category: "books".into(),
            in_stock: false,
            description: "Complete guide to systems programming".into(),
            created_at: day(2024, 1, 13),
        },
        Product {
            id: "4".into(),
            name: "Wireless Headphones".into(),
            price: 199.99,
            category: "electronics".into(),
            in_stock: true,
            description: "Noise cancelling wireless headphones".into(),
            created_at: day(2024, 1, 12),
        },
    ]
}

fn category_options() -> Vec<SelectOption> {
    vec![
        SelectOption { label: "Electronics".into(), value: "electronics".into() },
        SelectOption { label: "Clothing".into(), value: "clothing".into() },
        SelectOption { label: "Books".into(), value: "books".into() },
    ]
}

/// Column, filter and form descriptors for the product table. Rendering
/// metadata only; nothing here changes store or view semantics.
pub fn product_config() -> TableConfig {
    TableConfig {
        name: "Product".into(),
        columns: vec![
            ColumnSpec::new("name", "Name", ColumnKind::Text).unsortable(),
            ColumnSpec::new("price", "Price", ColumnKind::Number),
            ColumnSpec::new("category", "Category", ColumnKind::Select),
            ColumnSpec::new("in_stock", "In Stock", ColumnKind::Boolean),
            ColumnSpec::new("description", "Description", ColumnKind::Text),
            ColumnSpec::new("created_at", "Created At", ColumnKind::Date),
        ],
        form_fields: vec![
            FormField {
                name: "name".into(),
                label: "Product Name".into(),
                kind: FieldKind::Text,
                required: true,
                options: Vec::new(),
                placeholder: Some("Enter product name".into()),
            },
            FormField {
                name: "price".into(),
                label: "Price".into(),
                kind: FieldKind::Number,
                required: true,
                options: Vec::new(),
                placeholder: Some("0.00".into()),
            },
            FormField {
                name: "category".into(),
                label: "Category".into(),
                kind: FieldKind::Select,
                required: true,
                options: category_options(),
                placeholder: None,
            },
            FormField {
                name: "in_stock".into(),
                label: "In Stock".into(),
                kind: FieldKind::Checkbox,
                required: false,
                options: Vec::new(),
                placeholder: None,
            },
            FormField {
                name: "description".into(),
                label: "Description".into(),
                kind: FieldKind::Textarea,
                required: false,
                options: Vec::new(),
                placeholder: Some("Enter product description".into()),
            },
        ],
        filters: vec![
            TableFilter {
                key: "category".into(),
                label: "Category".into(),
                kind: ColumnKind::Select,
                options: category_options(),
                placeholder: Some("Select Category".into()),
            },
            TableFilter {
                key: "in_stock".into(),
                label: "In Stock".into(),
                kind: ColumnKind::Boolean,
                options: Vec::new(),
                placeholder: None,
            },
        ],
        enable_row_selection: true,
        enable_column_visibility: true,
    }
}

fn account_label(kind: AccountType) -> &'static str {
    match kind {
        AccountType::Checking => "checking",
        AccountType::Savings => "savings",
        AccountType::Business => "business",
        AccountType::Premium => "premium",
    }
}

impl HasId for User {
    fn id(&self) -> &str {
        &self.id
    }

    fn assign_id(&mut self, id: String) {
        self.id = id;
    }
}

impl Row for User {
    fn cell(&self, column: &str) -> Option<CellValue> {
        match column {
            "username" => Some(CellValue::Text(self.username.clone())),
            "first_name" => Some(CellValue::Text(self.first_name.clone())),
            "last_name" => Some(CellValue::Text(self.last_name.clone())),
            "email" => Some(CellValue::Text(self.email.clone())),
            "role" => Some(CellValue::Text(self.role.to_string())),
            "account_type" => Some(CellValue::Text(account_label(self.account_type).to_string())),
            "is_active" => Some(CellValue::Bool(self.is_active)),
            // Absent until the first login; absent cells sort first ascending
            "last_login" => self.last_login.map(|t| CellValue::Date(t.date_naive())),
            _ => None,
        }
    }

    fn searchable() -> &'static [&'static str] {
        &["username", "first_name", "last_name", "email"]
    }
}

/// The accounts the user management table starts from: the identity registry.
pub fn seed_users() -> Vec<User> {
    registry::all_users().to_vec()
}

fn role_options() -> Vec<SelectOption> {
    vec![
        SelectOption { label: "Customer".into(), value: "customer".into() },
        SelectOption { label: "Teller".into(), value: "teller".into() },
        SelectOption { label: "Manager".into(), value: "manager".into() },
        SelectOption { label: "Admin".into(), value: "admin".into() },
    ]
}

/// Column, filter and form descriptors for the user management table.
pub fn user_config() -> TableConfig {
    TableConfig {
        name: "User".into(),
        columns: vec![
            ColumnSpec::new("first_name", "First Name", ColumnKind::Text),
            ColumnSpec::new("last_name", "Last Name", ColumnKind::Text),
            ColumnSpec::new("email", "Email", ColumnKind::Text),
            ColumnSpec::new("role", "Role", ColumnKind::Select),
            ColumnSpec::new("account_type", "Account Type", ColumnKind::Select),
            ColumnSpec::new("is_active", "Status", ColumnKind::Boolean),
        ],
        form_fields: vec![
            FormField {
                name: "first_name".into(),
                label: "First Name".into(),
                kind: FieldKind::Text,
                required: true,
                options: Vec::new(),
                placeholder: Some("Enter first name".into()),
            },
            FormField {
                name: "last_name".into(),
                label: "Last Name".into(),
                kind: FieldKind::Text,
                required: true,
                options: Vec::new(),
                placeholder: Some("Enter last name".into()),
            },
            FormField {
                name: "email".into(),
                label: "Email".into(),
                kind: FieldKind::Email,
                required: true,
                options: Vec::new(),
                placeholder: Some("user@example.com".into()),
            },
            FormField {
                name: "role".into(),
                label: "Role".into(),
                kind: FieldKind::Select,
                required: true,
                options: role_options(),
                placeholder: None,
            },
            FormField {
                name: "is_active".into(),
                label: "Active".into(),
                kind: FieldKind::Checkbox,
                required: false,
                options: Vec::new(),
                placeholder: None,
            },
        ],
        filters: vec![
            TableFilter {
                key: "role".into(),
                label: "Role".into(),
                kind: ColumnKind::Select,
                options: role_options(),
                placeholder: Some("Select Role".into()),
            },
            TableFilter {
                key: "is_active".into(),
                label: "Status".into(),
                kind: ColumnKind::Boolean,
                options: Vec::new(),
                placeholder: None,
            },
        ],
        enable_row_selection: true,
        enable_column_visibility: true,
    }
}
