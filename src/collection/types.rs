//! Core types for collection views.
//!
//! This module contains the pieces every other collection module builds on:
//! - [`RecordId`], the identity of an item
//! - [`Schema`], the caller-supplied accessors describing an item type
//! - [`ViewState`] and [`PageInfo`], snapshots of what the view shows
//! - [`Action`], the transitions a view accepts

use super::filter::FilterKey;
use super::sort::SortKey;
use chrono::{DateTime, Utc};
use std::fmt;
use std::sync::Arc;

/// Identifier of a record, as delivered by the backend.
///
/// Integer ids order numerically and sort before text ids; text ids order
/// lexicographically.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RecordId {
    /// Numeric id such as `eventID` or `bookingId`.
    Int(i64),
    /// Opaque string id.
    Text(String),
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordId::Int(n) => write!(f, "{}", n),
            RecordId::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for RecordId {
    fn from(n: i64) -> Self {
        RecordId::Int(n)
    }
}

impl From<&str> for RecordId {
    fn from(s: &str) -> Self {
        RecordId::Text(s.to_string())
    }
}

impl From<String> for RecordId {
    fn from(s: String) -> Self {
        RecordId::Text(s)
    }
}

type IdFn<I> = Arc<dyn Fn(&I) -> RecordId + Send + Sync>;
type TextFn<I> = Arc<dyn Fn(&I) -> Option<String> + Send + Sync>;
type DateFn<I> = Arc<dyn Fn(&I) -> Option<DateTime<Utc>> + Send + Sync>;

/// Describes an item type to the collection controller.
///
/// The controller never looks inside an item. Everything it needs for search,
/// filtering and sorting comes from the accessors registered here. Accessors
/// return `Option` so that missing fields are handled without panicking: a
/// missing text field behaves as the empty string, a missing status never
/// matches a specific filter, and a missing date sorts last.
///
/// # Examples
///
/// ```rust
/// use eventdesk_widgets::collection::{RecordId, Schema};
///
/// #[derive(Clone)]
/// struct Venue {
///     id: i64,
///     name: String,
///     city: Option<String>,
/// }
///
/// let schema = Schema::new(|v: &Venue| RecordId::from(v.id))
///     .search_id()
///     .search(|v: &Venue| Some(v.name.clone()))
///     .search(|v: &Venue| v.city.clone())
///     .title(|v: &Venue| Some(v.name.clone()))
///     .location(|v: &Venue| v.city.clone());
///
/// assert_eq!(schema.search_field_count(), 3);
/// ```
pub struct Schema<I> {
    pub(crate) id: IdFn<I>,
    pub(crate) search_fields: Vec<TextFn<I>>,
    pub(crate) status: Option<TextFn<I>>,
    pub(crate) known_statuses: Vec<String>,
    pub(crate) title: Option<TextFn<I>>,
    pub(crate) location: Option<TextFn<I>>,
    pub(crate) date: Option<DateFn<I>>,
}

impl<I> Clone for Schema<I> {
    fn clone(&self) -> Self {
        Self {
            id: Arc::clone(&self.id),
            search_fields: self.search_fields.clone(),
            status: self.status.clone(),
            known_statuses: self.known_statuses.clone(),
            title: self.title.clone(),
            location: self.location.clone(),
            date: self.date.clone(),
        }
    }
}

impl<I> fmt::Debug for Schema<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Schema")
            .field("search_fields", &self.search_fields.len())
            .field("status", &self.status.is_some())
            .field("known_statuses", &self.known_statuses)
            .field("title", &self.title.is_some())
            .field("location", &self.location.is_some())
            .field("date", &self.date.is_some())
            .finish()
    }
}

impl<I> Schema<I> {
    /// Creates a schema from the item's id accessor. No other capability is
    /// enabled until registered.
    pub fn new<F>(id: F) -> Self
    where
        F: Fn(&I) -> RecordId + Send + Sync + 'static,
    {
        Self {
            id: Arc::new(id),
            search_fields: Vec::new(),
            status: None,
            known_statuses: Vec::new(),
            title: None,
            location: None,
            date: None,
        }
    }

    /// Adds a text field to the search predicate.
    pub fn search<F>(mut self, field: F) -> Self
    where
        F: Fn(&I) -> Option<String> + Send + Sync + 'static,
    {
        self.search_fields.push(Arc::new(field));
        self
    }

    /// Makes the id, rendered as a string, searchable.
    pub fn search_id(mut self) -> Self
    where
        I: 'static,
    {
        let id = Arc::clone(&self.id);
        self.search_fields
            .push(Arc::new(move |item: &I| Some(id(item).to_string())));
        self
    }

    /// Sets the status accessor used by status filters.
    pub fn status<F>(mut self, field: F) -> Self
    where
        F: Fn(&I) -> Option<String> + Send + Sync + 'static,
    {
        self.status = Some(Arc::new(field));
        self
    }

    /// Restricts status filters to the given keys.
    ///
    /// When the list is empty (the default) any status key is accepted.
    pub fn known_statuses<S: AsRef<str>>(mut self, statuses: &[S]) -> Self {
        self.known_statuses = statuses
            .iter()
            .map(|s| s.as_ref().trim().to_uppercase())
            .collect();
        self
    }

    /// Sets the accessor used by the title sort.
    pub fn title<F>(mut self, field: F) -> Self
    where
        F: Fn(&I) -> Option<String> + Send + Sync + 'static,
    {
        self.title = Some(Arc::new(field));
        self
    }

    /// Sets the accessor used by the location sort.
    pub fn location<F>(mut self, field: F) -> Self
    where
        F: Fn(&I) -> Option<String> + Send + Sync + 'static,
    {
        self.location = Some(Arc::new(field));
        self
    }

    /// Sets the accessor used by the date sort and the date-window filters.
    pub fn date<F>(mut self, field: F) -> Self
    where
        F: Fn(&I) -> Option<DateTime<Utc>> + Send + Sync + 'static,
    {
        self.date = Some(Arc::new(field));
        self
    }

    /// Number of registered search fields.
    pub fn search_field_count(&self) -> usize {
        self.search_fields.len()
    }

    /// Status keys accepted by status filters, uppercase. Empty means any.
    pub fn statuses(&self) -> &[String] {
        &self.known_statuses
    }

    /// Returns true if the schema can evaluate the sort key.
    pub fn supports_sort(&self, key: SortKey) -> bool {
        match key {
            SortKey::Id => true,
            SortKey::Title => self.title.is_some(),
            SortKey::Location => self.location.is_some(),
            SortKey::Date => self.date.is_some(),
        }
    }

    /// Returns true if the schema can evaluate the filter key.
    pub fn supports_filter(&self, key: &FilterKey) -> bool {
        match key {
            FilterKey::All => true,
            FilterKey::Status(status) => {
                self.status.is_some()
                    && (self.known_statuses.is_empty() || self.known_statuses.contains(status))
            }
            FilterKey::Window(_) => self.date.is_some(),
        }
    }

    /// Id of an item.
    pub fn id_of(&self, item: &I) -> RecordId {
        (self.id)(item)
    }

    /// Status of an item, if the schema has a status accessor and the item has one.
    pub fn status_of(&self, item: &I) -> Option<String> {
        self.status.as_ref().and_then(|f| f(item))
    }

    /// Date of an item, if the schema has a date accessor and the item has one.
    pub fn date_of(&self, item: &I) -> Option<DateTime<Utc>> {
        self.date.as_ref().and_then(|f| f(item))
    }
}

/// Page position reported to the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageInfo {
    /// Current page, 1-based.
    pub page_index: usize,
    /// Number of pages, never less than 1.
    pub total_pages: usize,
}

/// Snapshot of the user-facing state driving what a view shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    /// Raw search text as entered.
    pub search_term: String,
    /// Active category filter.
    pub active_filter: FilterKey,
    /// Active sort, or `None` for data-source order.
    pub sort_key: Option<SortKey>,
    /// Current page, 1-based.
    pub page_index: usize,
    /// Items per page, at least 1.
    pub page_size: usize,
}

impl ViewState {
    /// State of a freshly created view: first page, no search, no filter, no sort.
    pub fn new(page_size: usize) -> Self {
        Self {
            search_term: String::new(),
            active_filter: FilterKey::All,
            sort_key: None,
            page_index: 1,
            page_size: page_size.max(1),
        }
    }
}

/// A transition accepted by [`super::Model::dispatch`].
#[derive(Debug, Clone)]
pub enum Action<I> {
    /// Replace the search text.
    SetSearch(String),
    /// Replace the category filter.
    SetFilter(FilterKey),
    /// Replace the sort key; `None` restores data-source order.
    SetSort(Option<SortKey>),
    /// Move one page forward; no-op on the last page.
    NextPage,
    /// Move one page back; no-op on the first page.
    PreviousPage,
    /// Jump to a 1-based page, clamped into range.
    GoToPage(usize),
    /// Change the page size; values below 1 become 1.
    SetPageSize(usize),
    /// Replace the whole collection, e.g. after a refresh.
    ReplaceCollection(Vec<I>),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collection::filter::DateWindow;

    #[derive(Clone)]
    struct Row {
        id: i64,
        status: Option<&'static str>,
    }

    #[test]
    fn test_record_id_ordering() {
        let mut ids = vec![
            RecordId::from("b"),
            RecordId::from(10),
            RecordId::from("a"),
            RecordId::from(2),
        ];
        ids.sort();
        assert_eq!(
            ids,
            vec![
                RecordId::Int(2),
                RecordId::Int(10),
                RecordId::Text("a".into()),
                RecordId::Text("b".into()),
            ]
        );
    }

    #[test]
    fn test_search_id_renders_id_as_text() {
        let schema = Schema::new(|r: &Row| RecordId::from(r.id)).search_id();
        let row = Row { id: 42, status: None };
        let rendered: Vec<Option<String>> =
            schema.search_fields.iter().map(|f| f(&row)).collect();
        assert_eq!(rendered, vec![Some("42".to_string())]);
    }

    #[test]
    fn test_supports_filter_respects_known_statuses() {
        let schema = Schema::new(|r: &Row| RecordId::from(r.id))
            .status(|r: &Row| r.status.map(str::to_string))
            .known_statuses(&["pending", "CANCELLED"]);
        assert!(schema.supports_filter(&FilterKey::All));
        assert!(schema.supports_filter(&FilterKey::Status("PENDING".into())));
        assert!(!schema.supports_filter(&FilterKey::Status("ARCHIVED".into())));
        assert!(!schema.supports_filter(&FilterKey::Window(DateWindow::Past)));
    }

    #[test]
    fn test_status_filter_needs_status_accessor() {
        let schema = Schema::new(|r: &Row| RecordId::from(r.id));
        assert!(!schema.supports_filter(&FilterKey::Status("PENDING".into())));
        assert!(schema.supports_sort(SortKey::Id));
        assert!(!schema.supports_sort(SortKey::Date));
    }

    #[test]
    fn test_view_state_defaults() {
        let state = ViewState::new(0);
        assert_eq!(state.page_index, 1);
        assert_eq!(state.page_size, 1);
        assert_eq!(state.active_filter, FilterKey::All);
        assert!(state.search_term.is_empty());
        assert!(state.sort_key.is_none());
    }
}
