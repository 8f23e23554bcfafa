//! Key bindings for collection views.
//!
//! - **Pages**: `→/l/pgdn` (next), `←/h/pgup` (previous), `g/home` (first), `G/end` (last)
//! - **Search**: `/` opens the prompt, `enter` keeps the term, `esc` clears it
//! - **Filter and sort**: `f` cycles the filter, `s` cycles the sort
//! - **Reset**: `r` clears search, filter and sort
//!
//! ```rust
//! use eventdesk_widgets::collection::CollectionKeyMap;
//! use eventdesk_widgets::key::KeyMap;
//!
//! let keymap = CollectionKeyMap::default();
//! assert!(!keymap.short_help().is_empty());
//! ```

use crate::key;

/// Key bindings for paging, searching, filtering and sorting.
#[derive(Debug, Clone)]
pub struct CollectionKeyMap {
    /// Go to the next page.
    pub next_page: key::Binding,
    /// Go to the previous page.
    pub prev_page: key::Binding,
    /// Jump to the first page.
    pub first_page: key::Binding,
    /// Jump to the last page.
    pub last_page: key::Binding,
    /// Open the search prompt.
    pub search: key::Binding,
    /// Close the search prompt, keeping the term.
    pub accept_search: key::Binding,
    /// Close the search prompt and clear the term.
    pub cancel_search: key::Binding,
    /// Switch to the next filter.
    pub cycle_filter: key::Binding,
    /// Switch to the next sort.
    pub cycle_sort: key::Binding,
    /// Clear search, filter and sort.
    pub reset: key::Binding,
}

impl Default for CollectionKeyMap {
    fn default() -> Self {
        Self {
            next_page: key::new_binding(vec![
                key::with_keys_str(&["right", "l", "pgdown"]),
                key::with_help("→/l/pgdn", "next page"),
            ]),
            prev_page: key::new_binding(vec![
                key::with_keys_str(&["left", "h", "pgup"]),
                key::with_help("←/h/pgup", "prev page"),
            ]),
            first_page: key::new_binding(vec![
                key::with_keys_str(&["home", "g"]),
                key::with_help("g/home", "first page"),
            ]),
            last_page: key::new_binding(vec![
                key::with_keys_str(&["end", "G"]),
                key::with_help("G/end", "last page"),
            ]),
            search: key::new_binding(vec![
                key::with_keys_str(&["/"]),
                key::with_help("/", "search"),
            ]),
            accept_search: key::new_binding(vec![
                key::with_keys_str(&["enter", "tab"]),
                key::with_help("enter", "apply search"),
            ]),
            cancel_search: key::new_binding(vec![
                key::with_keys_str(&["esc"]),
                key::with_help("esc", "clear search"),
            ]),
            cycle_filter: key::new_binding(vec![
                key::with_keys_str(&["f"]),
                key::with_help("f", "filter"),
            ]),
            cycle_sort: key::new_binding(vec![
                key::with_keys_str(&["s"]),
                key::with_help("s", "sort"),
            ]),
            reset: key::new_binding(vec![
                key::with_keys_str(&["r"]),
                key::with_help("r", "reset"),
            ]),
        }
    }
}

impl key::KeyMap for CollectionKeyMap {
    fn short_help(&self) -> Vec<&key::Binding> {
        vec![
            &self.prev_page,
            &self.next_page,
            &self.search,
            &self.cycle_filter,
            &self.cycle_sort,
        ]
    }

    fn full_help(&self) -> Vec<Vec<&key::Binding>> {
        vec![
            vec![
                &self.next_page,
                &self.prev_page,
                &self.first_page,
                &self.last_page,
            ],
            vec![&self.search, &self.accept_search, &self.cancel_search],
            vec![&self.cycle_filter, &self.cycle_sort, &self.reset],
        ]
    }
}
