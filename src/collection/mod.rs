//! Searchable, filterable, sortable and paginated views over a collection.
//!
//! The centre of this module is [`Model<I>`], a controller that owns one
//! fetched collection of `I` and derives what the user sees from four
//! choices: a search term, a category filter, a sort key and a page.
//!
//! ## How the visible order is built
//!
//! Every change recomputes the visible order in a fixed sequence:
//! 1. keep items passing the [`FilterKey`]
//! 2. keep items matching the [`SearchQuery`]
//! 3. stably sort by the [`SortKey`], if any
//! 4. slice out the current page
//!
//! The collection itself is never modified by these steps. Clearing a search
//! or a sort always brings back the original order.
//!
//! ## Describing items
//!
//! The controller learns about an item type only through a [`Schema`]: the
//! id, the searchable text fields, the status used by filters and the fields
//! used by sorts. The record types in [`crate::records`] each provide one.
//!
//! ## Embedding in a bubbletea-rs program
//!
//! [`Model::update`] handles key presses and the messages produced by
//! [`Model::load`]; [`Model::view`] renders the view as text. Load messages
//! carry the id of the view that started them, so several views can share a
//! program.
//!
//! ```rust
//! use eventdesk_widgets::collection::{Model, RecordId, Schema};
//! use bubbletea_rs::{KeyMsg, Msg};
//! use crossterm::event::{KeyCode, KeyModifiers};
//!
//! let schema = Schema::new(|n: &i64| RecordId::from(*n)).search_id();
//! let mut view = Model::new(schema, 3);
//! view.replace_collection((1..=7).collect());
//!
//! let right: Msg = Box::new(KeyMsg { key: KeyCode::Right, modifiers: KeyModifiers::NONE });
//! view.update(&right);
//! assert_eq!(view.page_info().page_index, 2);
//! ```

pub mod filter;
pub mod keys;
pub mod model;
pub mod rendering;
pub mod search;
pub mod sort;
pub mod style;
pub mod types;

pub use filter::{DateWindow, FilterKey};
pub use keys::CollectionKeyMap;
pub use model::Model;
pub use rendering::{DefaultDelegate, ItemDelegate};
pub use search::SearchQuery;
pub use sort::SortKey;
pub use style::CollectionStyles;
pub use types::{Action, PageInfo, RecordId, Schema, ViewState};

use crate::key::{self, KeyMap};
use crate::source::{CollectionLoadedMsg, LoadFailedMsg};
use crate::Component;
use bubbletea_rs::{Cmd, KeyMsg, Msg};
use crossterm::event::{KeyCode, KeyModifiers};
use tracing::{debug, warn};

impl<I: Clone + Send + Sync + 'static> KeyMap for Model<I> {
    fn short_help(&self) -> Vec<&key::Binding> {
        if self.searching {
            vec![&self.keymap.accept_search, &self.keymap.cancel_search]
        } else {
            self.keymap.short_help()
        }
    }

    fn full_help(&self) -> Vec<Vec<&key::Binding>> {
        self.keymap.full_help()
    }
}

impl<I: Clone + Send + Sync + 'static> Component for Model<I> {
    fn focus(&mut self) -> Option<Cmd> {
        self.focus = true;
        None
    }

    fn blur(&mut self) {
        self.focus = false;
        self.searching = false;
    }

    fn focused(&self) -> bool {
        self.focus
    }
}

impl<I: Clone + Send + Sync + 'static> Model<I> {
    /// Handles a message.
    ///
    /// Load results addressed to this view replace the collection or show
    /// the error banner; results for other views are ignored. Key presses are
    /// handled only while the view is focused:
    ///
    /// - while searching, printable keys and backspace edit the term live,
    ///   `enter` closes the prompt and `esc` clears the term
    /// - otherwise the [`CollectionKeyMap`] bindings page, open the search,
    ///   cycle the filter or sort, or reset the view
    ///
    /// The message is borrowed so one message can be offered to several views.
    pub fn update(&mut self, msg: &Msg) -> Option<Cmd> {
        if let Some(loaded) = msg.downcast_ref::<CollectionLoadedMsg<I>>() {
            if loaded.view_id == self.id {
                debug!(view_id = self.id, count = loaded.items.len(), "collection loaded");
                self.replace_collection(loaded.items.clone());
            }
            return None;
        }

        if let Some(failed) = msg.downcast_ref::<LoadFailedMsg>() {
            if failed.view_id == self.id {
                warn!(view_id = self.id, error = %failed.message, "collection load failed");
                self.fail_load(&failed.message);
            }
            return None;
        }

        if !self.focus {
            return None;
        }

        if let Some(key_msg) = msg.downcast_ref::<KeyMsg>() {
            if self.searching {
                self.handle_search_key(key_msg);
            } else {
                self.handle_key(key_msg);
            }
        }
        None
    }

    fn handle_search_key(&mut self, key_msg: &KeyMsg) {
        if self.keymap.accept_search.matches(key_msg) {
            self.searching = false;
            return;
        }
        if self.keymap.cancel_search.matches(key_msg) {
            self.searching = false;
            self.set_search("");
            return;
        }

        let plain = !key_msg
            .modifiers
            .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT);
        match key_msg.key {
            KeyCode::Char(c) if plain => {
                let mut term = self.search.raw().to_string();
                term.push(c);
                self.set_search(&term);
            }
            KeyCode::Backspace => {
                let mut term = self.search.raw().to_string();
                if term.pop().is_some() {
                    self.set_search(&term);
                }
            }
            _ => {}
        }
    }

    fn handle_key(&mut self, key_msg: &KeyMsg) {
        if self.keymap.next_page.matches(key_msg) {
            self.next_page();
        } else if self.keymap.prev_page.matches(key_msg) {
            self.previous_page();
        } else if self.keymap.first_page.matches(key_msg) {
            self.go_to_page(1);
        } else if self.keymap.last_page.matches(key_msg) {
            self.go_to_page(self.paginator.total_pages);
        } else if self.keymap.search.matches(key_msg) {
            self.searching = true;
        } else if self.keymap.cancel_search.matches(key_msg) {
            if !self.search.is_empty() {
                self.set_search("");
            }
        } else if self.keymap.cycle_filter.matches(key_msg) {
            let choices = self.filter_choices();
            let next = next_choice(&choices, &self.filter);
            self.set_filter(next);
        } else if self.keymap.cycle_sort.matches(key_msg) {
            let choices = self.sort_choices();
            let next = next_choice(&choices, &self.sort);
            self.set_sort(next);
        } else if self.keymap.reset.matches(key_msg) {
            self.reset();
        }
    }
}

/// The choice after `current`, wrapping around. Unknown values restart at the
/// first choice.
fn next_choice<T: Clone + PartialEq>(choices: &[T], current: &T) -> T {
    let next = choices
        .iter()
        .position(|c| c == current)
        .map(|idx| (idx + 1) % choices.len())
        .unwrap_or(0);
    choices[next].clone()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{Role, Session};
    use crate::source::StaticSource;
    use std::fmt;

    #[derive(Debug, Clone, PartialEq)]
    struct Ticket {
        id: i64,
        status: &'static str,
    }

    impl fmt::Display for Ticket {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "ticket {}", self.id)
        }
    }

    fn tickets(n: i64) -> Vec<Ticket> {
        (1..=n)
            .map(|id| Ticket {
                id,
                status: if id % 3 == 0 { "CANCELLED" } else { "PENDING" },
            })
            .collect()
    }

    fn view(n: i64, page_size: usize) -> Model<Ticket> {
        let schema = Schema::new(|t: &Ticket| RecordId::from(t.id))
            .search_id()
            .status(|t: &Ticket| Some(t.status.to_string()))
            .known_statuses(&["PENDING", "CANCELLED"]);
        let mut m = Model::new(schema, page_size);
        m.replace_collection(tickets(n));
        m
    }

    fn key(code: KeyCode) -> Msg {
        Box::new(KeyMsg {
            key: code,
            modifiers: KeyModifiers::NONE,
        }) as Msg
    }

    fn ids(m: &Model<Ticket>) -> Vec<i64> {
        m.visible_page().iter().map(|t| t.id).collect()
    }

    #[test]
    fn test_page_keys() {
        let mut m = view(10, 3);

        m.update(&key(KeyCode::Char('l')));
        assert_eq!(ids(&m), vec![4, 5, 6]);
        m.update(&key(KeyCode::End));
        assert_eq!(m.page_info().page_index, 4);
        m.update(&key(KeyCode::PageDown));
        assert_eq!(m.page_info().page_index, 4);
        m.update(&key(KeyCode::Char('g')));
        assert_eq!(m.page_info().page_index, 1);
        m.update(&key(KeyCode::Left));
        assert_eq!(m.page_info().page_index, 1);
    }

    #[test]
    fn test_live_search_typing() {
        let mut m = view(30, 5);

        m.update(&key(KeyCode::Char('/')));
        assert!(m.is_searching());
        m.update(&key(KeyCode::Char('2')));
        m.update(&key(KeyCode::Char('5')));
        assert_eq!(ids(&m), vec![25]);

        m.update(&key(KeyCode::Backspace));
        assert_eq!(m.view_state().search_term, "2");
        assert_eq!(m.visible_len(), 12);

        m.update(&key(KeyCode::Enter));
        assert!(!m.is_searching());
        assert_eq!(m.view_state().search_term, "2");

        // Outside the prompt, letters are bindings again.
        m.update(&key(KeyCode::Char('l')));
        assert_eq!(m.page_info().page_index, 2);
        assert_eq!(m.view_state().search_term, "2");
    }

    #[test]
    fn test_escape_clears_search() {
        let mut m = view(30, 5);
        m.update(&key(KeyCode::Char('/')));
        m.update(&key(KeyCode::Char('7')));
        m.update(&key(KeyCode::Esc));

        assert!(!m.is_searching());
        assert_eq!(m.view_state().search_term, "");
        assert_eq!(m.visible_len(), 30);
    }

    #[test]
    fn test_cycle_filter_and_sort() {
        let mut m = view(6, 10);

        m.update(&key(KeyCode::Char('f')));
        assert_eq!(m.view_state().active_filter, FilterKey::Status("PENDING".into()));
        m.update(&key(KeyCode::Char('f')));
        assert_eq!(ids(&m), vec![3, 6]);
        m.update(&key(KeyCode::Char('f')));
        assert_eq!(m.view_state().active_filter, FilterKey::All);

        m.update(&key(KeyCode::Char('s')));
        assert_eq!(m.view_state().sort_key, Some(SortKey::Id));
        m.update(&key(KeyCode::Char('s')));
        assert_eq!(m.view_state().sort_key, None);
    }

    #[test]
    fn test_reset_key() {
        let mut m = view(12, 5);
        m.set_search("1");
        m.set_filter(FilterKey::parse("pending"));
        m.set_sort(Some(SortKey::Id));

        m.update(&key(KeyCode::Char('r')));

        let state = m.view_state();
        assert_eq!(state.search_term, "");
        assert_eq!(state.active_filter, FilterKey::All);
        assert_eq!(state.sort_key, None);
        assert_eq!(m.visible_len(), 12);
    }

    #[test]
    fn test_blurred_view_ignores_keys() {
        let mut m = view(10, 3);
        m.blur();
        assert!(!m.focused());

        m.update(&key(KeyCode::Right));
        assert_eq!(m.page_info().page_index, 1);

        assert!(m.focus().is_none());
        m.update(&key(KeyCode::Right));
        assert_eq!(m.page_info().page_index, 2);
    }

    #[test]
    fn test_load_messages_are_routed_by_view_id() {
        let mut a = view(0, 3);
        let mut b = view(0, 3);

        let loaded: Msg = Box::new(CollectionLoadedMsg {
            view_id: a.id(),
            items: tickets(4),
        });
        a.update(&loaded);
        b.update(&loaded);
        assert_eq!(a.len(), 4);
        assert_eq!(b.len(), 0);

        let failed: Msg = Box::new(LoadFailedMsg {
            view_id: a.id(),
            message: "bookings unavailable".into(),
        });
        b.update(&failed);
        assert_eq!(b.load_error(), None);
        a.update(&failed);
        assert!(a.is_empty());
        assert_eq!(a.load_error(), Some("bookings unavailable"));
    }

    #[tokio::test]
    async fn test_load_round_trip_through_update() {
        let mut m = view(0, 3);
        let source = StaticSource::new(tickets(5));

        let cmd = m.load(&source, &Session::new(Role::Client, "token"));
        let msg = cmd.await.unwrap();
        m.update(&msg);

        assert!(!m.is_loading());
        assert_eq!(m.len(), 5);
        assert_eq!(ids(&m), vec![1, 2, 3]);
    }

    #[test]
    fn test_help_follows_search_mode() {
        let mut m = view(3, 3);
        assert_eq!(KeyMap::short_help(&m).len(), 5);
        m.update(&key(KeyCode::Char('/')));
        assert_eq!(KeyMap::short_help(&m).len(), 2);
    }

    #[test]
    fn test_next_choice_wraps() {
        assert_eq!(next_choice(&[1, 2, 3], &3), 1);
        assert_eq!(next_choice(&[1, 2, 3], &1), 2);
        assert_eq!(next_choice(&[1, 2, 3], &9), 1);
    }
}
