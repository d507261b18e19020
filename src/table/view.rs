//! Tabular view engine: derived sort/filter/paginate/select state over an
//! entity store's collection.
//!
//! Every transition is a total function; malformed or out-of-range input
//! clamps instead of erroring. `compute` is deterministic in
//! (collection, state) and never mutates the collection. The computation
//! order is fixed: free-text query, then column filters (AND), then stable
//! sort, then page slice.

use std::cmp::Ordering;
use std::collections::{BTreeMap, HashSet};

use chrono::NaiveDate;

use super::entity::Row;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// One column sort instruction. Directives earlier in the list take priority;
/// ties fall through to later directives and finally to collection order.
#[derive(Debug, Clone)]
pub struct SortDirective {
    pub column: String,
    pub direction: SortDirection,
}

impl SortDirective {
    pub fn asc(column: impl Into<String>) -> Self {
        Self { column: column.into(), direction: SortDirection::Ascending }
    }

    pub fn desc(column: impl Into<String>) -> Self {
        Self { column: column.into(), direction: SortDirection::Descending }
    }
}

/// A typed active column filter. The variant fixes the match rule:
/// `Text` is a case-insensitive substring, `Choice` and `Flag` are exact,
/// `Day` is exact-date.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterValue {
    Text(String),
    Choice(String),
    Flag(bool),
    Day(NaiveDate),
}

const DEFAULT_PAGE_SIZE: usize = 10;

/// View state: sort directives, active filters, free-text query, selection
/// and pagination. Derived, never persisted.
#[derive(Debug, Clone)]
pub struct TableView {
    sort: Vec<SortDirective>,
    filters: BTreeMap<String, FilterValue>,
    query: String,
    selection: HashSet<String>,
    page_index: usize,
    page_size: usize,
}

/// One computed page of the view, borrowing rows from the collection.
#[derive(Debug)]
pub struct PageView<'a, T> {
    pub rows: Vec<&'a T>,
    /// Size of the unfiltered collection.
    pub total_rows: usize,
    /// Rows surviving query + filters, across all pages.
    pub filtered_rows: usize,
    /// Clamped to the last valid page.
    pub page_index: usize,
    pub page_count: usize,
    pub selected_total: usize,
    pub selected_on_page: usize,
}

impl Default for TableView {
    fn default() -> Self {
        Self {
            sort: Vec::new(),
            filters: BTreeMap::new(),
            query: String::new(),
            selection: HashSet::new(),
            page_index: 0,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl TableView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    // --- transitions ---------------------------------------------------

    /// Replace the sort directives wholesale.
    pub fn set_sort(&mut self, directives: Vec<SortDirective>) {
        self.sort = directives;
    }

    /// Append a lower-priority sort directive.
    pub fn push_sort(&mut self, directive: SortDirective) {
        self.sort.push(directive);
    }

    pub fn set_filter(&mut self, key: impl Into<String>, value: FilterValue) {
        self.filters.insert(key.into(), value);
    }

    pub fn clear_filter(&mut self, key: &str) {
        self.filters.remove(key);
    }

    pub fn clear_all_filters(&mut self) {
        self.filters.clear();
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
        // A changed search usually invalidates the current page position.
        self.page_index = 0;
    }

    pub fn toggle_select(&mut self, id: &str) {
        if !self.selection.remove(id) {
            self.selection.insert(id.to_string());
        }
    }

    /// Select every row on the currently visible page.
    pub fn select_all_on_page<T: Row>(&mut self, data: &[T]) {
        let page_ids: Vec<String> = self
            .visible_rows(data)
            .into_iter()
            .map(|item| item.id().to_string())
            .collect();
        self.selection.extend(page_ids);
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    pub fn set_page(&mut self, page_index: usize) {
        // Stored as requested; compute clamps against the filtered row count.
        self.page_index = page_index;
    }

    pub fn set_page_size(&mut self, page_size: usize) {
        self.page_size = page_size.max(1);
    }

    // --- accessors ------------------------------------------------------

    pub fn is_selected(&self, id: &str) -> bool {
        self.selection.contains(id)
    }

    pub fn selection(&self) -> &HashSet<String> {
        &self.selection
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn active_filters(&self) -> &BTreeMap<String, FilterValue> {
        &self.filters
    }

    // --- computation ----------------------------------------------------

    /// Derive the current page. Selection is pruned of ids no longer present
    /// in the collection; it is otherwise independent of filtering and
    /// sorting. The stored page index is clamped as a side effect so
    /// subsequent transitions start from a valid page.
    pub fn compute<'a, T: Row>(&mut self, data: &'a [T]) -> PageView<'a, T> {
        let live_ids: HashSet<&str> = data.iter().map(|item| item.id()).collect();
        self.selection.retain(|id| live_ids.contains(id.as_str()));

        let rows = self.ordered_rows(data);
        let filtered_rows = rows.len();
        let page_count = filtered_rows.div_ceil(self.page_size).max(1);
        let page_index = self.page_index.min(page_count - 1);
        self.page_index = page_index;

        let start = page_index * self.page_size;
        let end = (start + self.page_size).min(filtered_rows);
        let page: Vec<&T> = rows[start.min(filtered_rows)..end].to_vec();
        let selected_on_page = page.iter().filter(|item| self.selection.contains(item.id())).count();

        PageView {
            rows: page,
            total_rows: data.len(),
            filtered_rows,
            page_index,
            page_count,
            selected_total: self.selection.len(),
            selected_on_page,
        }
    }

    /// Query + filters + sort, before pagination. Used by `compute` and by
    /// `select_all_on_page`.
    fn visible_rows<'a, T: Row>(&self, data: &'a [T]) -> Vec<&'a T> {
        let rows = self.ordered_rows(data);
        let filtered_rows = rows.len();
        let page_count = filtered_rows.div_ceil(self.page_size).max(1);
        let page_index = self.page_index.min(page_count - 1);
        let start = page_index * self.page_size;
        let end = (start + self.page_size).min(filtered_rows);
        rows[start.min(filtered_rows)..end].to_vec()
    }

    fn ordered_rows<'a, T: Row>(&self, data: &'a [T]) -> Vec<&'a T> {
        let needle = self.query.trim().to_lowercase();
        let mut rows: Vec<&T> = data
            .iter()
            .filter(|item| needle.is_empty() || Self::matches_query(*item, &needle))
            .filter(|item| {
                self.filters
                    .iter()
                    .all(|(key, value)| Self::matches_filter(*item, key, value))
            })
            .collect();

        if !self.sort.is_empty() {
            // sort_by is stable: ties keep original collection order.
            rows.sort_by(|a, b| self.compare(*a, *b));
        }
        rows
    }

    fn matches_query<T: Row>(item: &T, needle_lower: &str) -> bool {
        T::searchable().iter().any(|column| {
            item.cell(column)
                .map(|cell| cell.contains_ci(needle_lower))
                .unwrap_or(false)
        })
    }

    fn matches_filter<T: Row>(item: &T, key: &str, value: &FilterValue) -> bool {
        let Some(cell) = item.cell(key) else { return false };
        match value {
            FilterValue::Text(needle) => cell.contains_ci(&needle.to_lowercase()),
            FilterValue::Choice(choice) => cell.render() == *choice,
            FilterValue::Flag(flag) => matches!(cell, super::entity::CellValue::Bool(b) if b == *flag),
            FilterValue::Day(day) => matches!(cell, super::entity::CellValue::Date(d) if d == *day),
        }
    }

    fn compare<T: Row>(&self, a: &T, b: &T) -> Ordering {
        for directive in &self.sort {
            let ca = a.cell(&directive.column);
            let cb = b.cell(&directive.column);
            let ord = match (ca, cb) {
                (Some(ca), Some(cb)) => ca.sort_cmp(&cb),
                (None, Some(_)) => Ordering::Less,
                (Some(_), None) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            };
            let ord = match directive.direction {
                SortDirection::Ascending => ord,
                SortDirection::Descending => ord.reverse(),
            };
            if ord != Ordering::Equal {
                return ord;
            }
        }
        Ordering::Equal
    }
}
