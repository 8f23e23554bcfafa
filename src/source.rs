//! Where collections come from.
//!
//! A collection view never talks to the network. It asks a
//! [`CollectionSource`] for the whole collection once, through the command
//! returned by [`crate::collection::Model::load`], and receives the result as
//! a [`CollectionLoadedMsg`] or [`LoadFailedMsg`].
//!
//! [`RemoteSource`] is the source used against the real backend: it picks the
//! endpoint for the session's role, fetches the body through an
//! application-supplied [`Transport`] and decodes it into typed records.
//! [`StaticSource`] serves a fixed collection and is handy for tests and demos.

use crate::error::{Error, Result};
use crate::records::{decode_collection, Record};
use crate::session::{Role, Session};
use serde::de::DeserializeOwned;
use std::fmt;
use std::future::Future;
use std::marker::PhantomData;
use std::pin::Pin;
use std::sync::Arc;
use tracing::debug;

/// A boxed, sendable future, the same shape bubbletea-rs uses for commands.
pub type BoxFuture<T> = Pin<Box<dyn Future<Output = T> + Send>>;

/// The collections shown by the front-end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollectionKind {
    /// Events.
    Events,
    /// Allocatable resources.
    Resources,
    /// Event bookings.
    Bookings,
}

impl CollectionKind {
    /// Page size used when no configuration overrides it.
    pub fn default_page_size(self) -> usize {
        match self {
            CollectionKind::Events => 3,
            CollectionKind::Resources => 4,
            CollectionKind::Bookings => 5,
        }
    }
}

impl fmt::Display for CollectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CollectionKind::Events => "events",
            CollectionKind::Resources => "resources",
            CollectionKind::Bookings => "bookings",
        };
        f.write_str(name)
    }
}

/// Backend path serving `kind` to users with `role`, if that role may see it.
///
/// ```rust
/// use eventdesk_widgets::session::Role;
/// use eventdesk_widgets::source::{endpoint, CollectionKind};
///
/// assert_eq!(endpoint(Role::Client, CollectionKind::Bookings), Some("/api/client/my-bookings"));
/// assert_eq!(endpoint(Role::Staff, CollectionKind::Resources), None);
/// ```
pub fn endpoint(role: Role, kind: CollectionKind) -> Option<&'static str> {
    match (kind, role) {
        (CollectionKind::Events, Role::Planner) => Some("/api/planner/events"),
        (CollectionKind::Events, Role::Staff) => Some("/api/staff/allEvents"),
        (CollectionKind::Events, Role::Client) => Some("/api/client/allEvents"),
        (CollectionKind::Resources, Role::Planner) => Some("/api/planner/resources"),
        (CollectionKind::Resources, _) => None,
        (CollectionKind::Bookings, Role::Planner) => Some("/api/planner/bookings"),
        (CollectionKind::Bookings, Role::Client) => Some("/api/client/my-bookings"),
        (CollectionKind::Bookings, Role::Staff) => None,
    }
}

/// HTTP GET as provided by the embedding application.
///
/// Implementations attach the session's credentials, perform the request and
/// resolve to the response body. Non-success responses should resolve to
/// [`Error::Transport`].
pub trait Transport: Send + Sync {
    /// Fetches `path` on behalf of `session`.
    fn get(&self, path: &str, session: &Session) -> BoxFuture<Result<String>>;
}

/// Anything that can produce a full, unpaginated collection.
pub trait CollectionSource<I>: Send + Sync {
    /// Fetches the whole collection visible to `session`.
    fn fetch(&self, session: &Session) -> BoxFuture<Result<Vec<I>>>;
}

/// Fetches records from the backend endpoint matching the session's role.
pub struct RemoteSource<T, I> {
    transport: Arc<T>,
    _records: PhantomData<fn() -> I>,
}

impl<T, I> RemoteSource<T, I> {
    /// Creates a source fetching `I` records through `transport`.
    pub fn new(transport: Arc<T>) -> Self {
        Self {
            transport,
            _records: PhantomData,
        }
    }
}

impl<T, I> CollectionSource<I> for RemoteSource<T, I>
where
    T: Transport,
    I: Record + DeserializeOwned,
{
    fn fetch(&self, session: &Session) -> BoxFuture<Result<Vec<I>>> {
        let Some(path) = endpoint(session.role, I::KIND) else {
            let err = Error::Forbidden {
                role: session.role,
                kind: I::KIND,
            };
            return Box::pin(async move { Err(err) });
        };

        debug!(kind = %I::KIND, role = %session.role, path, "fetching collection");
        let request = self.transport.get(path, session);
        Box::pin(async move {
            let body = request.await?;
            let items = decode_collection::<I>(&body)?;
            debug!(kind = %I::KIND, count = items.len(), "collection decoded");
            Ok(items)
        })
    }
}

/// Serves a fixed collection, regardless of the session.
#[derive(Debug, Clone)]
pub struct StaticSource<I> {
    items: Vec<I>,
}

impl<I> StaticSource<I> {
    /// Creates a source that always returns `items`.
    pub fn new(items: Vec<I>) -> Self {
        Self { items }
    }
}

impl<I> CollectionSource<I> for StaticSource<I>
where
    I: Clone + Send + Sync + 'static,
{
    fn fetch(&self, _session: &Session) -> BoxFuture<Result<Vec<I>>> {
        let items = self.items.clone();
        Box::pin(async move { Ok(items) })
    }
}

/// Delivered when a load started by a view succeeds.
#[derive(Debug, Clone)]
pub struct CollectionLoadedMsg<I> {
    /// Id of the view that started the load.
    pub view_id: i64,
    /// The fetched collection.
    pub items: Vec<I>,
}

/// Delivered when a load started by a view fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadFailedMsg {
    /// Id of the view that started the load.
    pub view_id: i64,
    /// Human-readable reason, shown in the view's error banner.
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::{Booking, Event, Resource};
    use std::sync::Mutex;

    /// Records requested paths and answers with a canned body.
    struct CannedTransport {
        body: std::result::Result<String, String>,
        requested: Mutex<Vec<String>>,
    }

    impl CannedTransport {
        fn ok(body: &str) -> Arc<Self> {
            Arc::new(Self {
                body: Ok(body.to_string()),
                requested: Mutex::new(Vec::new()),
            })
        }

        fn failing(reason: &str) -> Arc<Self> {
            Arc::new(Self {
                body: Err(reason.to_string()),
                requested: Mutex::new(Vec::new()),
            })
        }
    }

    impl Transport for CannedTransport {
        fn get(&self, path: &str, _session: &Session) -> BoxFuture<Result<String>> {
            self.requested.lock().unwrap().push(path.to_string());
            let body = self.body.clone().map_err(Error::Transport);
            Box::pin(async move { body })
        }
    }

    #[test]
    fn test_every_role_sees_events() {
        for role in [Role::Planner, Role::Staff, Role::Client] {
            assert!(endpoint(role, CollectionKind::Events).is_some());
        }
        assert_eq!(
            endpoint(Role::Planner, CollectionKind::Resources),
            Some("/api/planner/resources")
        );
        assert_eq!(endpoint(Role::Staff, CollectionKind::Bookings), None);
    }

    #[tokio::test]
    async fn test_remote_source_routes_by_role_and_decodes() {
        let transport = CannedTransport::ok(r#"[{"eventID":5,"title":"Expo"}]"#);
        let source: RemoteSource<_, Event> = RemoteSource::new(Arc::clone(&transport));

        let events = source
            .fetch(&Session::new(Role::Staff, "t"))
            .await
            .unwrap();

        assert_eq!(events.len(), 1);
        assert_eq!(events[0].title.as_deref(), Some("Expo"));
        assert_eq!(
            *transport.requested.lock().unwrap(),
            vec!["/api/staff/allEvents".to_string()]
        );
    }

    #[tokio::test]
    async fn test_remote_source_refuses_unrouted_role() {
        let transport = CannedTransport::ok("[]");
        let source: RemoteSource<_, Booking> = RemoteSource::new(Arc::clone(&transport));

        let err = source
            .fetch(&Session::new(Role::Staff, "t"))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            Error::Forbidden {
                role: Role::Staff,
                kind: CollectionKind::Bookings
            }
        ));
        assert!(transport.requested.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_remote_source_surfaces_transport_and_decode_errors() {
        let session = Session::new(Role::Planner, "t");

        let down: RemoteSource<_, Resource> =
            RemoteSource::new(CannedTransport::failing("connection refused"));
        let err = down.fetch(&session).await.unwrap_err();
        assert_eq!(err.to_string(), "transport error: connection refused");

        let garbled: RemoteSource<_, Resource> = RemoteSource::new(CannedTransport::ok("<html>"));
        let err = garbled.fetch(&session).await.unwrap_err();
        assert!(matches!(
            err,
            Error::Decode {
                kind: CollectionKind::Resources,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_static_source_returns_copy() {
        let source = StaticSource::new(vec![1, 2, 3]);
        let session = Session::new(Role::Client, "t");
        assert_eq!(source.fetch(&session).await.unwrap(), vec![1, 2, 3]);
        assert_eq!(source.fetch(&session).await.unwrap(), vec![1, 2, 3]);
    }
}
