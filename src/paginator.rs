//! Pagination math and the page indicator.
//!
//! The paginator tracks a 1-based current page, the page size and the page
//! count. It never holds the items themselves; callers hand it the number of
//! visible items and ask for slice bounds.
//!
//! Invariants kept by every method:
//! - `per_page >= 1`
//! - `total_pages == max(1, ceil(items / per_page))`
//! - `1 <= page <= total_pages`

use crate::key::{self, KeyMap as KeyMapTrait};
use bubbletea_rs::{KeyMsg, Msg};
use serde::{Deserialize, Serialize};

/// How the page indicator is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Type {
    /// Page numbers, e.g. `"2/5"`.
    #[default]
    Arabic,
    /// One dot per page, e.g. `"○ • ○ ○ ○"`.
    Dots,
}

/// Key bindings for page navigation.
///
/// # Examples
///
/// ```rust
/// use eventdesk_widgets::paginator::PaginatorKeyMap;
/// use eventdesk_widgets::key::KeyMap;
///
/// let keymap = PaginatorKeyMap::default();
/// assert_eq!(keymap.short_help().len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct PaginatorKeyMap {
    /// Previous page. Default keys: PageUp, Left, `h`.
    pub prev_page: key::Binding,
    /// Next page. Default keys: PageDown, Right, `l`.
    pub next_page: key::Binding,
}

impl Default for PaginatorKeyMap {
    fn default() -> Self {
        Self {
            prev_page: key::new_binding(vec![
                key::with_keys_str(&["pgup", "left", "h"]),
                key::with_help("←/h", "prev page"),
            ]),
            next_page: key::new_binding(vec![
                key::with_keys_str(&["pgdown", "right", "l"]),
                key::with_help("→/l", "next page"),
            ]),
        }
    }
}

impl KeyMapTrait for PaginatorKeyMap {
    fn short_help(&self) -> Vec<&key::Binding> {
        vec![&self.prev_page, &self.next_page]
    }

    fn full_help(&self) -> Vec<Vec<&key::Binding>> {
        vec![vec![&self.prev_page, &self.next_page]]
    }
}

/// Pagination state.
///
/// # Examples
///
/// ```rust
/// use eventdesk_widgets::paginator::Model;
///
/// let mut paginator = Model::new().with_per_page(4).with_total_items(5);
/// assert_eq!(paginator.total_pages, 2);
/// assert_eq!(paginator.slice_bounds(5), (0, 4));
///
/// paginator.next_page();
/// assert_eq!(paginator.page, 2);
/// assert_eq!(paginator.slice_bounds(5), (4, 5));
///
/// paginator.next_page(); // already on the last page
/// assert_eq!(paginator.page, 2);
/// ```
#[derive(Debug, Clone)]
pub struct Model {
    /// How the indicator is rendered.
    pub paginator_type: Type,
    /// Current page, 1-based.
    pub page: usize,
    /// Items per page, at least 1.
    pub per_page: usize,
    /// Number of pages, at least 1.
    pub total_pages: usize,

    /// Marker for the current page in dots mode.
    pub active_dot: String,
    /// Marker for other pages in dots mode.
    pub inactive_dot: String,
    /// Format for Arabic mode; the first `%d` is the page, the second the total.
    pub arabic_format: String,

    /// Key bindings.
    pub keymap: PaginatorKeyMap,
}

impl Default for Model {
    fn default() -> Self {
        Self {
            paginator_type: Type::default(),
            page: 1,
            per_page: 1,
            total_pages: 1,
            active_dot: "•".to_string(),
            inactive_dot: "○".to_string(),
            arabic_format: "%d/%d".to_string(),
            keymap: PaginatorKeyMap::default(),
        }
    }
}

impl Model {
    /// Creates a paginator on page 1 of 1 with one item per page.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the page size (builder pattern). Values below 1 become 1.
    pub fn with_per_page(mut self, per_page: usize) -> Self {
        self.per_page = per_page.max(1);
        self
    }

    /// Recomputes the page count for `items` items (builder pattern).
    pub fn with_total_items(mut self, items: usize) -> Self {
        self.set_total_items(items);
        self
    }

    /// Sets the indicator style (builder pattern).
    pub fn with_type(mut self, paginator_type: Type) -> Self {
        self.paginator_type = paginator_type;
        self
    }

    /// Sets the page size. Values below 1 become 1.
    ///
    /// The page count is not recomputed; call [`Model::set_total_items`]
    /// afterwards.
    pub fn set_per_page(&mut self, per_page: usize) {
        self.per_page = per_page.max(1);
    }

    /// Recomputes the page count for `items` items and clamps the current page.
    ///
    /// ```rust
    /// use eventdesk_widgets::paginator::Model;
    ///
    /// let mut paginator = Model::new().with_per_page(10).with_total_items(95);
    /// assert_eq!(paginator.total_pages, 10);
    ///
    /// paginator.go_to_page(10);
    /// paginator.set_total_items(0);
    /// assert_eq!(paginator.total_pages, 1);
    /// assert_eq!(paginator.page, 1);
    /// ```
    pub fn set_total_items(&mut self, items: usize) {
        self.total_pages = items.div_ceil(self.per_page).max(1);
        self.clamp_page();
    }

    /// Jumps to a 1-based page. Out-of-range requests are clamped.
    pub fn go_to_page(&mut self, page: usize) {
        self.page = page;
        self.clamp_page();
    }

    fn clamp_page(&mut self) {
        self.page = self.page.clamp(1, self.total_pages);
    }

    /// Number of items shown on the current page.
    pub fn items_on_page(&self, total_items: usize) -> usize {
        let (start, end) = self.slice_bounds(total_items);
        end - start
    }

    /// Start (inclusive) and end (exclusive) indices of the current page
    /// within a sequence of `length` items.
    ///
    /// Both bounds are clamped to `length`, so the result can always be used
    /// to slice.
    pub fn slice_bounds(&self, length: usize) -> (usize, usize) {
        let start = ((self.page - 1) * self.per_page).min(length);
        let end = (start + self.per_page).min(length);
        (start, end)
    }

    /// Moves one page back. No-op on the first page.
    pub fn prev_page(&mut self) {
        if !self.on_first_page() {
            self.page -= 1;
        }
    }

    /// Moves one page forward. No-op on the last page.
    pub fn next_page(&mut self) {
        if !self.on_last_page() {
            self.page += 1;
        }
    }

    /// Returns true on page 1.
    pub fn on_first_page(&self) -> bool {
        self.page <= 1
    }

    /// Returns true on the last page.
    pub fn on_last_page(&self) -> bool {
        self.page >= self.total_pages
    }

    /// Handles page navigation keys.
    pub fn update(&mut self, msg: &Msg) {
        if let Some(key_msg) = msg.downcast_ref::<KeyMsg>() {
            if self.keymap.next_page.matches(key_msg) {
                self.next_page();
            } else if self.keymap.prev_page.matches(key_msg) {
                self.prev_page();
            }
        }
    }

    /// Renders the page indicator.
    ///
    /// ```rust
    /// use eventdesk_widgets::paginator::{Model, Type};
    ///
    /// let mut paginator = Model::new().with_per_page(10).with_total_items(30);
    /// assert_eq!(paginator.view(), "1/3");
    ///
    /// paginator.paginator_type = Type::Dots;
    /// paginator.next_page();
    /// assert_eq!(paginator.view(), "○ • ○");
    /// ```
    pub fn view(&self) -> String {
        match self.paginator_type {
            Type::Arabic => self.arabic_view(),
            Type::Dots => self.dots_view(),
        }
    }

    fn arabic_view(&self) -> String {
        self.arabic_format
            .replacen("%d", &self.page.to_string(), 1)
            .replacen("%d", &self.total_pages.to_string(), 1)
    }

    fn dots_view(&self) -> String {
        (1..=self.total_pages)
            .map(|i| {
                if i == self.page {
                    self.active_dot.as_str()
                } else {
                    self.inactive_dot.as_str()
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}
