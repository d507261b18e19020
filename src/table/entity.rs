use std::cmp::Ordering;

use chrono::NaiveDate;

/// Anything an entity store can manage: a record with a unique string
/// identifier. The identifier is immutable once assigned; only the store
/// itself calls `assign_id`.
pub trait HasId {
    fn id(&self) -> &str;
    fn assign_id(&mut self, id: String);
}

/// A typed cell produced by projecting one column of an entity. The view
/// engine sorts, searches and filters through these, never through the
/// entity's concrete fields.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Number(f64),
    Bool(bool),
    Date(NaiveDate),
}

impl CellValue {
    /// Textual rendering used for free-text search and display.
    pub fn render(&self) -> String {
        match self {
            CellValue::Text(s) => s.clone(),
            CellValue::Number(n) => {
                if n.fract() == 0.0 {
                    format!("{}", *n as i64)
                } else {
                    format!("{:.2}", n)
                }
            }
            CellValue::Bool(b) => if *b { "Yes".into() } else { "No".into() },
            CellValue::Date(d) => d.format("%Y-%m-%d").to_string(),
        }
    }

    /// Total ordering for sort directives. Same-kind cells compare naturally;
    /// mixed kinds fall back to their textual rendering so the sort stays
    /// total and deterministic.
    pub fn sort_cmp(&self, other: &CellValue) -> Ordering {
        match (self, other) {
            (CellValue::Text(a), CellValue::Text(b)) => a.to_lowercase().cmp(&b.to_lowercase()),
            (CellValue::Number(a), CellValue::Number(b)) => a.total_cmp(b),
            (CellValue::Bool(a), CellValue::Bool(b)) => a.cmp(b),
            (CellValue::Date(a), CellValue::Date(b)) => a.cmp(b),
            (a, b) => a.render().to_lowercase().cmp(&b.render().to_lowercase()),
        }
    }

    /// Case-insensitive substring match against the rendered cell.
    pub fn contains_ci(&self, needle_lower: &str) -> bool {
        self.render().to_lowercase().contains(needle_lower)
    }
}

/// Column projection for the view engine. Implemented per entity type next to
/// its column descriptors; the store itself never needs this.
pub trait Row: HasId {
    /// Project one column by key. Unknown keys answer `None` and simply never
    /// match or sort.
    fn cell(&self, column: &str) -> Option<CellValue>;

    /// Column keys the free-text query searches across.
    fn searchable() -> &'static [&'static str];
}
