//! The collection view controller.
//!
//! [`Model`] owns a fetched collection together with the user's search,
//! filter, sort and page choices, and derives the ordered list of visible
//! items from them. The collection itself is never reordered or filtered in
//! place: the controller keeps a list of indices into it, so clearing a search
//! or a sort always restores the original order.

use super::filter::{DateWindow, FilterKey};
use super::keys::CollectionKeyMap;
use super::rendering::{DefaultDelegate, ItemDelegate};
use super::search::SearchQuery;
use super::sort::{sort_indices, SortKey};
use super::style::CollectionStyles;
use super::types::{Action, PageInfo, Schema, ViewState};
use crate::config::ViewConfig;
use crate::paginator;
use crate::session::Session;
use crate::source::{CollectionLoadedMsg, CollectionSource, LoadFailedMsg};
use bubbletea_rs::{Cmd, Msg};
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::atomic::{AtomicI64, Ordering};
use tracing::{debug, trace};

static LAST_ID: AtomicI64 = AtomicI64::new(0);

fn next_id() -> i64 {
    LAST_ID.fetch_add(1, Ordering::SeqCst) + 1
}

/// A searchable, filterable, sortable and paginated view over a collection.
///
/// # Examples
///
/// ```rust
/// use eventdesk_widgets::collection::{FilterKey, Model, RecordId, Schema, SortKey};
/// use std::fmt;
///
/// #[derive(Clone)]
/// struct Ticket {
///     id: i64,
///     status: &'static str,
/// }
///
/// impl fmt::Display for Ticket {
///     fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
///         write!(f, "#{} {}", self.id, self.status)
///     }
/// }
///
/// let schema = Schema::new(|t: &Ticket| RecordId::from(t.id))
///     .search_id()
///     .status(|t: &Ticket| Some(t.status.to_string()));
///
/// let tickets = (1..=5)
///     .map(|id| Ticket { id, status: if id % 2 == 0 { "CANCELLED" } else { "PENDING" } })
///     .collect();
///
/// let mut view = Model::new(schema, 4);
/// view.replace_collection(tickets);
/// assert_eq!(view.page_info().total_pages, 2);
///
/// view.set_filter(FilterKey::parse("cancelled"));
/// view.set_sort(Some(SortKey::Id));
/// let ids: Vec<i64> = view.visible_page().iter().map(|t| t.id).collect();
/// assert_eq!(ids, vec![2, 4]);
/// ```
pub struct Model<I> {
    pub(super) id: i64,
    pub(super) title: String,
    pub(super) schema: Schema<I>,
    pub(super) items: Vec<I>,
    /// Indices into `items`, in display order.
    pub(super) visible: Vec<usize>,
    pub(super) search: SearchQuery,
    pub(super) filter: FilterKey,
    pub(super) sort: Option<SortKey>,
    pub(super) paginator: paginator::Model,
    pub(super) reference_time: Option<DateTime<Utc>>,
    pub(super) load_error: Option<String>,
    pub(super) loading: bool,

    // UI state
    pub(super) searching: bool,
    pub(super) focus: bool,
    pub(super) width: usize,
    pub(super) show_help: bool,
    pub(super) keymap: CollectionKeyMap,
    pub(super) styles: CollectionStyles,
    pub(super) delegate: Box<dyn ItemDelegate<I> + Send + Sync>,
}

impl<I: Clone + Send + Sync + 'static> fmt::Debug for Model<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Model")
            .field("id", &self.id)
            .field("title", &self.title)
            .field("items", &self.items.len())
            .field("visible", &self.visible.len())
            .field("view_state", &self.view_state())
            .field("load_error", &self.load_error)
            .finish()
    }
}

impl<I: fmt::Display + Clone + Send + Sync + 'static> Model<I> {
    /// Creates an empty, focused view that renders items through their
    /// `Display` implementation.
    ///
    /// `page_size` values below 1 become 1.
    pub fn new(schema: Schema<I>, page_size: usize) -> Self {
        Self::with_delegate(schema, page_size, DefaultDelegate::new())
    }
}

impl<I: Clone + Send + Sync + 'static> Model<I> {
    /// Creates an empty, focused view with a custom row renderer.
    pub fn with_delegate<D>(schema: Schema<I>, page_size: usize, delegate: D) -> Self
    where
        D: ItemDelegate<I> + Send + Sync + 'static,
    {
        let paginator = paginator::Model::new()
            .with_per_page(page_size)
            .with_total_items(0);

        Self {
            id: next_id(),
            title: "Items".to_string(),
            schema,
            items: Vec::new(),
            visible: Vec::new(),
            search: SearchQuery::default(),
            filter: FilterKey::All,
            sort: None,
            paginator,
            reference_time: None,
            load_error: None,
            loading: false,
            searching: false,
            focus: true,
            width: 80,
            show_help: true,
            keymap: CollectionKeyMap::default(),
            styles: CollectionStyles::default(),
            delegate: Box::new(delegate),
        }
    }

    /// Sets the title shown above the rows (builder pattern).
    pub fn with_title(mut self, title: &str) -> Self {
        self.title = title.to_string();
        self
    }

    /// Fixes the time date windows are measured from (builder pattern).
    ///
    /// Without it, the current time is read whenever the visible order is
    /// recomputed.
    pub fn with_reference_time(mut self, now: DateTime<Utc>) -> Self {
        self.reference_time = Some(now);
        self.recompute();
        self
    }

    /// Sets the maximum rendered row width in columns (builder pattern).
    pub fn with_width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }

    /// Shows or hides the help line below the page indicator (builder pattern).
    pub fn with_show_help(mut self, show: bool) -> Self {
        self.show_help = show;
        self
    }

    /// Shows or hides the help line below the page indicator.
    pub fn set_show_help(&mut self, show: bool) {
        self.show_help = show;
    }

    /// Replaces the styles (builder pattern).
    pub fn with_styles(mut self, styles: CollectionStyles) -> Self {
        self.styles = styles;
        self
    }

    /// Applies a configured page size, indicator style, sort and filter
    /// (builder pattern).
    ///
    /// Values are applied through the same paths as user actions, so unknown
    /// sort or filter names fall back to no sort and [`FilterKey::All`].
    pub fn with_config(mut self, config: &ViewConfig) -> Self {
        if let Some(page_size) = config.page_size {
            self.set_page_size(page_size);
        }
        self.paginator.paginator_type = config.paginator;
        if let Some(sort) = config.sort.as_deref() {
            let key = SortKey::parse(sort);
            if key.is_none() {
                debug!(sort, "unknown sort in configuration, leaving unsorted");
            }
            self.set_sort(key);
        }
        if let Some(filter) = config.filter.as_deref() {
            self.set_filter(FilterKey::parse(filter));
        }
        self
    }

    /// Unique id of this view, carried by the messages of its load commands.
    pub fn id(&self) -> i64 {
        self.id
    }

    /// The title shown above the rows.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// The accessors describing the item type.
    pub fn schema(&self) -> &Schema<I> {
        &self.schema
    }

    /// Applies an action. Equivalent to calling the matching method.
    pub fn dispatch(&mut self, action: Action<I>) {
        match action {
            Action::SetSearch(term) => self.set_search(&term),
            Action::SetFilter(key) => self.set_filter(key),
            Action::SetSort(key) => self.set_sort(key),
            Action::NextPage => self.next_page(),
            Action::PreviousPage => self.previous_page(),
            Action::GoToPage(page) => self.go_to_page(page),
            Action::SetPageSize(size) => self.set_page_size(size),
            Action::ReplaceCollection(items) => self.replace_collection(items),
        }
    }

    /// Replaces the search text and returns to the first page.
    pub fn set_search(&mut self, term: &str) {
        self.search = SearchQuery::new(term);
        self.paginator.page = 1;
        self.recompute();
    }

    /// Replaces the category filter and returns to the first page.
    ///
    /// A key the schema cannot evaluate, such as a status outside the known
    /// statuses or a date window on items without dates, falls back to
    /// [`FilterKey::All`].
    pub fn set_filter(&mut self, key: FilterKey) {
        let key = match key {
            FilterKey::Status(status) => match status.trim().to_uppercase() {
                s if s.is_empty() || s == "ALL" => FilterKey::All,
                s => FilterKey::Status(s),
            },
            other => other,
        };
        self.filter = if self.schema.supports_filter(&key) {
            key
        } else {
            debug!(filter = %key, "unsupported filter, showing all items");
            FilterKey::All
        };
        self.paginator.page = 1;
        self.recompute();
    }

    /// Replaces the sort key and returns to the first page. `None` restores
    /// the order the collection was delivered in.
    ///
    /// A key whose accessor is missing from the schema falls back to `None`.
    pub fn set_sort(&mut self, key: Option<SortKey>) {
        self.sort = match key {
            Some(key) if !self.schema.supports_sort(key) => {
                debug!(sort = %key, "unsupported sort, keeping delivery order");
                None
            }
            other => other,
        };
        self.paginator.page = 1;
        self.recompute();
    }

    /// Moves one page forward. No-op on the last page.
    pub fn next_page(&mut self) {
        self.paginator.next_page();
    }

    /// Moves one page back. No-op on the first page.
    pub fn previous_page(&mut self) {
        self.paginator.prev_page();
    }

    /// Jumps to a 1-based page, clamped into `1..=total_pages`.
    pub fn go_to_page(&mut self, page: usize) {
        self.paginator.go_to_page(page);
    }

    /// Changes the page size and returns to the first page. Values below 1
    /// become 1.
    pub fn set_page_size(&mut self, page_size: usize) {
        self.paginator.set_per_page(page_size);
        self.paginator.page = 1;
        self.recompute();
    }

    /// Replaces the whole collection, keeping search, filter, sort and page.
    ///
    /// The page is clamped if the new collection is shorter. Any load error
    /// is cleared.
    pub fn replace_collection(&mut self, items: Vec<I>) {
        self.items = items;
        self.load_error = None;
        self.loading = false;
        self.recompute();
    }

    /// Starts fetching the collection from `source`.
    ///
    /// The returned command resolves to a [`CollectionLoadedMsg`] or a
    /// [`LoadFailedMsg`] addressed to this view; hand it back to
    /// [`Model::update`] to apply it.
    pub fn load<S>(&mut self, source: &S, session: &Session) -> Cmd
    where
        S: CollectionSource<I> + ?Sized,
    {
        self.loading = true;
        let view_id = self.id;
        let fetch = source.fetch(session);
        debug!(view_id, role = %session.role, "starting collection load");
        Box::pin(async move {
            let msg: Msg = match fetch.await {
                Ok(items) => Box::new(CollectionLoadedMsg { view_id, items }),
                Err(err) => Box::new(LoadFailedMsg {
                    view_id,
                    message: err.to_string(),
                }),
            };
            Some(msg)
        })
    }

    /// Empties the collection and records the failure for the error banner.
    pub(super) fn fail_load(&mut self, message: &str) {
        self.items.clear();
        self.load_error = Some(message.to_string());
        self.loading = false;
        self.recompute();
    }

    /// Items of the current page, in display order.
    pub fn visible_page(&self) -> Vec<&I> {
        let (start, end) = self.paginator.slice_bounds(self.visible.len());
        self.visible[start..end]
            .iter()
            .map(|&idx| &self.items[idx])
            .collect()
    }

    /// All items passing search and filter, in display order.
    pub fn visible_items(&self) -> Vec<&I> {
        self.visible.iter().map(|&idx| &self.items[idx]).collect()
    }

    /// Current page and page count.
    pub fn page_info(&self) -> PageInfo {
        PageInfo {
            page_index: self.paginator.page,
            total_pages: self.paginator.total_pages,
        }
    }

    /// Snapshot of the user-facing state.
    pub fn view_state(&self) -> ViewState {
        ViewState {
            search_term: self.search.raw().to_string(),
            active_filter: self.filter.clone(),
            sort_key: self.sort,
            page_index: self.paginator.page,
            page_size: self.paginator.per_page,
        }
    }

    /// Number of items passing search and filter.
    pub fn visible_len(&self) -> usize {
        self.visible.len()
    }

    /// Number of items in the collection.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if the collection is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The collection, in delivery order.
    pub fn items(&self) -> &[I] {
        &self.items
    }

    /// Number of items per status over the whole collection, keyed by the
    /// uppercase status. Items without a status are not counted.
    pub fn status_counts(&self) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for item in &self.items {
            if let Some(status) = self.schema.status_of(item) {
                *counts.entry(status.trim().to_uppercase()).or_insert(0) += 1;
            }
        }
        counts
    }

    /// Message of the last failed load, until the next successful one.
    pub fn load_error(&self) -> Option<&str> {
        self.load_error.as_deref()
    }

    /// Returns true while a load started by [`Model::load`] is outstanding.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Returns true while the search prompt is taking input.
    pub fn is_searching(&self) -> bool {
        self.searching
    }

    /// Filters the filter toggle cycles through, starting with `All`.
    ///
    /// Statuses come from the schema's known statuses, or from the statuses
    /// present in the collection when none are declared.
    pub fn filter_choices(&self) -> Vec<FilterKey> {
        let mut choices = vec![FilterKey::All];
        if self.schema.status.is_some() {
            if self.schema.statuses().is_empty() {
                choices.extend(self.status_counts().into_keys().map(FilterKey::Status));
            } else {
                choices.extend(self.schema.statuses().iter().cloned().map(FilterKey::Status));
            }
        }
        if self.schema.date.is_some() {
            choices.extend(
                [DateWindow::Past, DateWindow::Today, DateWindow::Upcoming]
                    .into_iter()
                    .map(FilterKey::Window),
            );
        }
        choices
    }

    /// Sorts the sort toggle cycles through, starting with no sort.
    pub fn sort_choices(&self) -> Vec<Option<SortKey>> {
        std::iter::once(None)
            .chain(
                SortKey::ALL
                    .into_iter()
                    .filter(|key| self.schema.supports_sort(*key))
                    .map(Some),
            )
            .collect()
    }

    /// Clears search, filter and sort and returns to the first page.
    pub fn reset(&mut self) {
        self.search = SearchQuery::default();
        self.filter = FilterKey::All;
        self.sort = None;
        self.paginator.page = 1;
        self.recompute();
    }

    /// Rebuilds the visible order: filter, then search, then a stable sort.
    fn recompute(&mut self) {
        let now = self.reference_time.unwrap_or_else(Utc::now);
        let mut visible: Vec<usize> = self
            .items
            .iter()
            .enumerate()
            .filter(|(_, item)| {
                self.filter.matches(*item, &self.schema, now)
                    && self.search.matches(*item, &self.schema)
            })
            .map(|(idx, _)| idx)
            .collect();

        if let Some(key) = self.sort {
            sort_indices(&mut visible, &self.items, key, &self.schema);
        }

        self.visible = visible;
        self.paginator.set_total_items(self.visible.len());
        trace!(
            view_id = self.id,
            total = self.items.len(),
            visible = self.visible.len(),
            page = self.paginator.page,
            total_pages = self.paginator.total_pages,
            "recomputed visible order"
        );
    }
}
