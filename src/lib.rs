#![warn(missing_docs)]

//! # eventdesk-widgets
//!
//! Collection views for terminal front-ends of an event-management backend,
//! built on [bubbletea-rs](https://github.com/joshka/bubbletea-rs).
//!
//! ## Overview
//!
//! The backend serves three collections: events, resources and bookings.
//! Each screen fetches its whole collection once and lets the user search,
//! filter, sort and page through it locally. This crate provides that view:
//!
//! - [`collection::Model`] keeps the fetched items and the user's choices and
//!   derives the visible page from them
//! - [`records`] holds the typed records and their search, filter and sort
//!   accessors
//! - [`source`] routes fetches to the endpoint matching the session's role
//! - [`config`] reads per-view defaults from TOML
//!
//! ## Quick start
//!
//! ```rust
//! use eventdesk_widgets::prelude::*;
//!
//! let mut view = collection_view::<Event>(&Config::default());
//! let events: Vec<Event> = decode_collection(
//!     r#"[{"eventID":1,"title":"Spring Gala","status":"Scheduled"},
//!         {"eventID":2,"title":"Tech Meetup","status":"Completed"},
//!         {"eventID":3,"title":"Board Review"},
//!         {"eventID":4,"title":"Gala Dinner"}]"#,
//! )
//! .unwrap();
//! view.replace_collection(events);
//!
//! assert_eq!(view.page_info(), PageInfo { page_index: 1, total_pages: 2 });
//!
//! view.set_search("gala");
//! let titles: Vec<_> = view
//!     .visible_page()
//!     .iter()
//!     .filter_map(|e| e.title.clone())
//!     .collect();
//! assert_eq!(titles, vec!["Spring Gala", "Gala Dinner"]);
//! ```
//!
//! ## Loading
//!
//! Fetches run as bubbletea-rs commands. The application supplies a
//! [`source::Transport`]; [`source::RemoteSource`] picks the endpoint and
//! decodes the payload, and the view applies the result when the message
//! comes back through [`collection::Model::update`].
//!
//! ```rust,no_run
//! use eventdesk_widgets::prelude::*;
//! use std::sync::Arc;
//!
//! struct Http;
//!
//! impl Transport for Http {
//!     fn get(&self, path: &str, session: &Session) -> BoxFuture<eventdesk_widgets::Result<String>> {
//!         let url = format!("http://localhost:8080{}", path);
//!         let _bearer = session.token.clone();
//!         Box::pin(async move { Err(eventdesk_widgets::Error::Transport(format!("not wired: {}", url))) })
//!     }
//! }
//!
//! let source: RemoteSource<Http, Booking> = RemoteSource::new(Arc::new(Http));
//! let mut view = collection_view::<Booking>(&Config::default());
//! let _cmd = view.load(&source, &Session::new(Role::Client, "token"));
//! ```
//!
//! ## Logging
//!
//! The crate emits [`tracing`] events and never installs a subscriber.
//! Fallbacks are logged at `debug`, recomputation at `trace`, failed loads
//! at `warn`.

pub mod collection;
pub mod config;
pub mod error;
pub mod key;
pub mod paginator;
pub mod records;
pub mod session;
pub mod source;

use bubbletea_rs::Cmd;

/// Focus management shared by interactive components.
///
/// A focused component handles key presses; a blurred one ignores them but
/// still processes other messages.
///
/// ```rust
/// use eventdesk_widgets::prelude::*;
///
/// let mut view = collection_view::<Resource>(&Config::default());
/// assert!(view.focused());
///
/// view.blur();
/// assert!(!view.focused());
///
/// let _cmd = view.focus();
/// assert!(view.focused());
/// ```
pub trait Component {
    /// Gives the component keyboard focus. May return a command to run.
    fn focus(&mut self) -> Option<Cmd>;

    /// Removes keyboard focus.
    fn blur(&mut self);

    /// Returns true while the component has focus.
    fn focused(&self) -> bool;
}

pub use collection::{
    Action, CollectionKeyMap, CollectionStyles, DateWindow, FilterKey, Model as CollectionView,
    PageInfo, RecordId, Schema, SearchQuery, SortKey, ViewState,
};
pub use config::{Config, ViewConfig};
pub use error::{Error, Result};
pub use key::{matches, new_binding, with_help, with_keys_str, Binding, KeyMap, KeyPress};
pub use paginator::Model as Paginator;
pub use records::{collection_view, decode_collection, Booking, Event, Record, Resource};
pub use session::{Capability, Role, Session};
pub use source::{
    endpoint, BoxFuture, CollectionKind, CollectionLoadedMsg, CollectionSource, LoadFailedMsg,
    RemoteSource, StaticSource, Transport,
};

/// Commonly used types in one import.
///
/// ```rust
/// use eventdesk_widgets::prelude::*;
/// ```
pub mod prelude {
    pub use crate::collection::{
        Action, DateWindow, FilterKey, Model as CollectionView, PageInfo, RecordId, Schema,
        SortKey, ViewState,
    };
    pub use crate::config::{Config, ViewConfig};
    pub use crate::key::{Binding, KeyMap};
    pub use crate::records::{collection_view, decode_collection, Booking, Event, Record, Resource};
    pub use crate::session::{Capability, Role, Session};
    pub use crate::source::{
        BoxFuture, CollectionKind, CollectionSource, RemoteSource, StaticSource, Transport,
    };
    pub use crate::Component;
}
