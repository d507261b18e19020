//! Generic tabular CRUD engine: entity stores plus the derived view state any
//! feature-specific table builds on.

mod columns;
mod controller;
mod entity;
mod store;
mod view;

pub use columns::{ColumnKind, ColumnSpec, FieldKind, FormField, SelectOption, TableConfig, TableFilter};
pub use controller::TableController;
pub use entity::{CellValue, HasId, Row};
pub use store::EntityStore;
pub use view::{FilterValue, PageView, SortDirection, SortDirective, TableView};
