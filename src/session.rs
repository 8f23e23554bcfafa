//! Session context and role-based capabilities.
//!
//! The session is created at login and dropped at logout by the embedding
//! application and handed explicitly to every data source.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The three kinds of users of the event-management backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    /// Creates events, manages resources and staff, sees every booking.
    Planner,
    /// Works the events it has been assigned to.
    Staff,
    /// Browses events and books them.
    Client,
}

impl Role {
    /// Parses a stored role name, ignoring case and surrounding whitespace.
    ///
    /// ```rust
    /// use eventdesk_widgets::session::Role;
    ///
    /// assert_eq!(Role::parse("PLANNER"), Some(Role::Planner));
    /// assert_eq!(Role::parse(" client "), Some(Role::Client));
    /// assert_eq!(Role::parse("admin"), None);
    /// ```
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_uppercase().as_str() {
            "PLANNER" => Some(Role::Planner),
            "STAFF" => Some(Role::Staff),
            "CLIENT" => Some(Role::Client),
            _ => None,
        }
    }

    /// Returns true if users with this role may perform the action.
    pub fn can(self, capability: Capability) -> bool {
        use Capability::*;
        match self {
            Role::Planner => matches!(
                capability,
                CreateEvent
                    | EditEvent
                    | AddResource
                    | AllocateResources
                    | AssignStaff
                    | ViewAllBookings
                    | SendMessage
            ),
            Role::Staff => matches!(capability, ViewAssignedEvents | SendMessage),
            Role::Client => matches!(capability, BookEvent | ViewOwnBookings | SendMessage),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Role::Planner => "PLANNER",
            Role::Staff => "STAFF",
            Role::Client => "CLIENT",
        };
        f.write_str(name)
    }
}

/// Actions a screen may offer depending on the session's role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    /// Create a new event.
    CreateEvent,
    /// Edit an existing event.
    EditEvent,
    /// Register a new resource.
    AddResource,
    /// Allocate resources to an event.
    AllocateResources,
    /// Assign a staff member to an event.
    AssignStaff,
    /// See the events assigned to the current staff member.
    ViewAssignedEvents,
    /// Book an event.
    BookEvent,
    /// See the bookings of every client.
    ViewAllBookings,
    /// See the current client's own bookings.
    ViewOwnBookings,
    /// Exchange messages on an event thread.
    SendMessage,
}

/// The logged-in user's context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    /// Role granted at login.
    pub role: Role,
    /// Bearer token issued by the backend.
    pub token: String,
    /// Backend id of the user, when the login response included one.
    #[serde(default)]
    pub user_id: Option<i64>,
}

impl Session {
    /// Creates a session for the given role and token.
    pub fn new(role: Role, token: impl Into<String>) -> Self {
        Self {
            role,
            token: token.into(),
            user_id: None,
        }
    }

    /// Attaches the backend user id (builder pattern).
    pub fn with_user_id(mut self, user_id: i64) -> Self {
        self.user_id = Some(user_id);
        self
    }
}
