//! Column, filter and form descriptors consumed by table renderers.
//!
//! These are rendering metadata only: nothing here affects store semantics or
//! the view-engine compute order. A feature declares one `TableConfig` per
//! entity type and hands it, together with a store and a view, to whatever
//! layer draws the table.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnKind {
    Text,
    Number,
    Boolean,
    Date,
    Select,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectOption {
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnSpec {
    pub key: String,
    pub label: String,
    pub kind: ColumnKind,
    #[serde(default = "default_true")]
    pub sortable: bool,
}

fn default_true() -> bool {
    true
}

impl ColumnSpec {
    pub fn new(key: impl Into<String>, label: impl Into<String>, kind: ColumnKind) -> Self {
        Self { key: key.into(), label: label.into(), kind, sortable: true }
    }

    pub fn unsortable(mut self) -> Self {
        self.sortable = false;
        self
    }
}

/// One configurable filter control above the table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableFilter {
    pub key: String,
    pub label: String,
    pub kind: ColumnKind,
    #[serde(default)]
    pub options: Vec<SelectOption>,
    #[serde(default)]
    pub placeholder: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Text,
    Number,
    Email,
    Date,
    Select,
    Textarea,
    Checkbox,
}

/// One input in the create/edit form dialog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormField {
    pub name: String,
    pub label: String,
    pub kind: FieldKind,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub options: Vec<SelectOption>,
    #[serde(default)]
    pub placeholder: Option<String>,
}

/// Everything a renderer needs to draw one entity table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableConfig {
    /// Singular display name, e.g. "Product".
    pub name: String,
    pub columns: Vec<ColumnSpec>,
    #[serde(default)]
    pub form_fields: Vec<FormField>,
    #[serde(default)]
    pub filters: Vec<TableFilter>,
    #[serde(default)]
    pub enable_row_selection: bool,
    #[serde(default)]
    pub enable_column_visibility: bool,
}
