//! Typed records for the three collections of the event-management backend.
//!
//! Payloads are decoded here, at the network boundary, so collection views
//! only ever see typed data. Field names follow the backend's JSON
//! (`eventID`, `resourceID`, `bookingId`, camelCase elsewhere).
//!
//! Every record type implements [`Record`], which ties it to its
//! [`CollectionKind`] and provides the default [`Schema`] used by its screen.

use crate::collection::{Model, RecordId, Schema};
use crate::config::Config;
use crate::source::CollectionKind;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A record type that can be shown in a collection view.
pub trait Record: Clone + Send + Sync + 'static {
    /// The collection this record belongs to.
    const KIND: CollectionKind;

    /// Accessors used for search, filtering and sorting.
    fn schema() -> Schema<Self>;
}

/// Minimal view of a user embedded in other records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    /// Backend id.
    pub user_id: i64,
    /// Login name.
    #[serde(default)]
    pub username: Option<String>,
    /// Display name.
    #[serde(default)]
    pub full_name: Option<String>,
    /// Contact e-mail.
    #[serde(default)]
    pub email: Option<String>,
}

impl UserSummary {
    /// The best available name for display.
    pub fn display_name(&self) -> String {
        self.full_name
            .clone()
            .or_else(|| self.username.clone())
            .unwrap_or_else(|| format!("user #{}", self.user_id))
    }
}

/// An event as returned by the planner, staff and client event endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    /// Backend id.
    #[serde(rename = "eventID")]
    pub event_id: i64,
    /// Event title.
    #[serde(default)]
    pub title: Option<String>,
    /// Free-form description.
    #[serde(default)]
    pub description: Option<String>,
    /// When the event takes place.
    #[serde(default, with = "flexible_date")]
    pub date_time: Option<DateTime<Utc>>,
    /// Venue.
    #[serde(default)]
    pub location: Option<String>,
    /// Lifecycle status such as `Scheduled` or `Completed`.
    #[serde(default)]
    pub status: Option<String>,
    /// Ticket price.
    #[serde(default)]
    pub amount: Option<f64>,
    /// Staff member in charge, once assigned.
    #[serde(default)]
    pub assigned_staff: Option<UserSummary>,
}

/// Status keys an event can carry.
pub const EVENT_STATUSES: [&str; 3] = ["SCHEDULED", "ACTIVE", "COMPLETED"];

impl Record for Event {
    const KIND: CollectionKind = CollectionKind::Events;

    fn schema() -> Schema<Self> {
        Schema::new(|e: &Event| RecordId::from(e.event_id))
            .search_id()
            .search(|e: &Event| e.title.clone())
            .search(|e: &Event| e.location.clone())
            .status(|e: &Event| e.status.clone())
            .known_statuses(&EVENT_STATUSES)
            .title(|e: &Event| e.title.clone())
            .location(|e: &Event| e.location.clone())
            .date(|e: &Event| e.date_time)
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{} {} · {} · {}",
            self.event_id,
            self.title.as_deref().unwrap_or("(untitled)"),
            self.location.as_deref().unwrap_or("-"),
            format_date(self.date_time)
        )
    }
}

/// A resource that can be allocated to events.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    /// Backend id.
    #[serde(rename = "resourceID")]
    pub resource_id: i64,
    /// Resource name.
    #[serde(default)]
    pub name: Option<String>,
    /// Category such as `Equipment` or `Venue`.
    #[serde(rename = "type", default)]
    pub resource_type: Option<String>,
    /// Whether the resource can currently be allocated.
    #[serde(default)]
    pub availability: bool,
}

impl Resource {
    /// Availability as a status key: `AVAILABLE` or `UNAVAILABLE`.
    pub fn availability_status(&self) -> &'static str {
        if self.availability {
            "AVAILABLE"
        } else {
            "UNAVAILABLE"
        }
    }
}

impl Record for Resource {
    const KIND: CollectionKind = CollectionKind::Resources;

    fn schema() -> Schema<Self> {
        Schema::new(|r: &Resource| RecordId::from(r.resource_id))
            .search_id()
            .search(|r: &Resource| r.name.clone())
            .status(|r: &Resource| Some(r.availability_status().to_string()))
            .known_statuses(&["AVAILABLE", "UNAVAILABLE"])
            .title(|r: &Resource| r.name.clone())
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{} {} ({})",
            self.resource_id,
            self.name.as_deref().unwrap_or("(unnamed)"),
            self.resource_type.as_deref().unwrap_or("other")
        )
    }
}

/// A client's booking of an event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    /// Backend id.
    pub booking_id: i64,
    /// The booked event.
    #[serde(default)]
    pub event: Option<Event>,
    /// The client who booked.
    #[serde(default)]
    pub client: Option<UserSummary>,
    /// When the booking was made.
    #[serde(default, with = "flexible_date")]
    pub booking_date: Option<DateTime<Utc>>,
    /// `PENDING`, `CONFIRMED`, `APPROVED`, `CANCELLED` or `REJECTED`.
    #[serde(default)]
    pub status: Option<String>,
    /// What the client asked for.
    #[serde(default)]
    pub client_requirements: Option<String>,
    /// Planner notes.
    #[serde(default)]
    pub notes: Option<String>,
}

/// Status keys a booking can carry.
pub const BOOKING_STATUSES: [&str; 5] = ["PENDING", "CONFIRMED", "APPROVED", "CANCELLED", "REJECTED"];

impl Booking {
    fn event_field<T>(&self, field: impl FnOnce(&Event) -> Option<T>) -> Option<T> {
        self.event.as_ref().and_then(field)
    }
}

impl Record for Booking {
    const KIND: CollectionKind = CollectionKind::Bookings;

    fn schema() -> Schema<Self> {
        Schema::new(|b: &Booking| RecordId::from(b.booking_id))
            .search_id()
            .search(|b: &Booking| b.event_field(|e| e.title.clone()))
            .search(|b: &Booking| b.event_field(|e| e.location.clone()))
            .status(|b: &Booking| b.status.clone())
            .known_statuses(&BOOKING_STATUSES)
            .title(|b: &Booking| b.event_field(|e| e.title.clone()))
            .location(|b: &Booking| b.event_field(|e| e.location.clone()))
            .date(|b: &Booking| b.event_field(|e| e.date_time))
    }
}

impl fmt::Display for Booking {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let title = self.event_field(|e| e.title.clone());
        write!(
            f,
            "#{} {} · {}",
            self.booking_id,
            title.as_deref().unwrap_or("(no event)"),
            format_date(self.event_field(|e| e.date_time))
        )
    }
}

fn format_date(date: Option<DateTime<Utc>>) -> String {
    date.map(|d| d.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "no date".to_string())
}

/// Decodes a JSON array of records.
pub fn decode_collection<I>(body: &str) -> crate::error::Result<Vec<I>>
where
    I: Record + for<'de> Deserialize<'de>,
{
    serde_json::from_str(body).map_err(|source| crate::error::Error::Decode {
        kind: I::KIND,
        source,
    })
}

/// Builds the collection view for a record type, sized and preset from
/// `config`.
///
/// ```rust
/// use eventdesk_widgets::config::Config;
/// use eventdesk_widgets::records::{collection_view, Resource};
///
/// let view = collection_view::<Resource>(&Config::default());
/// assert_eq!(view.view_state().page_size, 4);
/// assert_eq!(view.title(), "Resources");
/// ```
pub fn collection_view<I>(config: &Config) -> Model<I>
where
    I: Record + fmt::Display,
{
    let view_config = config.view(I::KIND);
    let page_size = view_config.page_size_or(I::KIND.default_page_size());
    let title = match I::KIND {
        CollectionKind::Events => "Events",
        CollectionKind::Resources => "Resources",
        CollectionKind::Bookings => "Bookings",
    };
    Model::new(I::schema(), page_size)
        .with_title(title)
        .with_config(view_config)
}

/// Dates as the backend sends them: epoch milliseconds, RFC 3339 strings, or
/// naive `YYYY-MM-DDTHH:MM[:SS]` strings read as UTC. Blank strings and null
/// decode to `None`.
mod flexible_date {
    use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Millis(i64),
        Text(String),
    }

    const NAIVE_FORMATS: [&str; 4] = [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
    ];

    fn parse_text(text: &str) -> Option<DateTime<Utc>> {
        if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
            return Some(dt.with_timezone(&Utc));
        }
        if let Ok(dt) = DateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f%z") {
            return Some(dt.with_timezone(&Utc));
        }
        NAIVE_FORMATS
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
            .map(|naive| Utc.from_utc_datetime(&naive))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<Raw>::deserialize(deserializer)? {
            None => Ok(None),
            Some(Raw::Millis(ms)) => Utc
                .timestamp_millis_opt(ms)
                .single()
                .map(Some)
                .ok_or_else(|| D::Error::custom(format!("timestamp out of range: {}", ms))),
            Some(Raw::Text(text)) if text.trim().is_empty() => Ok(None),
            Some(Raw::Text(text)) => parse_text(text.trim())
                .map(Some)
                .ok_or_else(|| D::Error::custom(format!("unrecognised date: {}", text))),
        }
    }

    pub fn serialize<S>(date: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        date.map(|d| d.to_rfc3339()).serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collection::{FilterKey, SearchQuery, SortKey};
    use chrono::TimeZone;

    const EVENTS_JSON: &str = r#"[
        {"eventID": 1, "title": "Spring Gala", "description": "Dinner",
         "dateTime": "2025-04-12T19:00:00.000+00:00", "location": "Grand Hall",
         "status": "Scheduled", "amount": 5000.0},
        {"eventID": 2, "title": "Tech Meetup", "dateTime": 1735732800000,
         "location": "Lab 3", "status": "Completed",
         "assignedStaff": {"userId": 9, "username": "sam", "fullName": "Sam Lee"}},
        {"eventID": 3, "title": "Board Review", "dateTime": "2025-07-01T09:30",
         "location": null, "status": null}
    ]"#;

    #[test]
    fn test_decode_events_with_mixed_date_formats() {
        let events: Vec<Event> = decode_collection(EVENTS_JSON).unwrap();
        assert_eq!(events.len(), 3);
        assert_eq!(
            events[0].date_time,
            Some(Utc.with_ymd_and_hms(2025, 4, 12, 19, 0, 0).unwrap())
        );
        assert_eq!(
            events[1].date_time,
            Some(Utc.with_ymd_and_hms(2025, 1, 1, 12, 0, 0).unwrap())
        );
        assert_eq!(
            events[2].date_time,
            Some(Utc.with_ymd_and_hms(2025, 7, 1, 9, 30, 0).unwrap())
        );
        assert_eq!(
            events[1].assigned_staff.as_ref().map(|s| s.display_name()),
            Some("Sam Lee".to_string())
        );
        assert!(events[2].location.is_none());
    }

    #[test]
    fn test_decode_error_names_the_collection() {
        let err = decode_collection::<Resource>(r#"{"not":"a list"}"#).unwrap_err();
        assert!(err.to_string().starts_with("failed to decode resources payload"));
    }

    #[test]
    fn test_unrecognised_date_is_rejected() {
        let err = decode_collection::<Event>(r#"[{"eventID":1,"dateTime":"next tuesday"}]"#);
        assert!(err.is_err());
    }

    #[test]
    fn test_blank_date_decodes_to_none() {
        let events: Vec<Event> =
            decode_collection(r#"[{"eventID":1,"dateTime":"  "}]"#).unwrap();
        assert!(events[0].date_time.is_none());
    }

    #[test]
    fn test_serialized_event_decodes_back() {
        let events: Vec<Event> = decode_collection(EVENTS_JSON).unwrap();
        let json = serde_json::to_string(&events).unwrap();
        let again: Vec<Event> = decode_collection(&json).unwrap();
        assert_eq!(events, again);
    }

    #[test]
    fn test_resource_schema_filters_on_availability() {
        let resources: Vec<Resource> = decode_collection(
            r#"[{"resourceID":1,"name":"Projector","type":"Equipment","availability":true},
                {"resourceID":2,"name":"Stage","type":"Venue","availability":false}]"#,
        )
        .unwrap();
        let schema = Resource::schema();
        let now = Utc::now();
        let available: Vec<i64> = resources
            .iter()
            .filter(|r| FilterKey::parse("available").matches(*r, &schema, now))
            .map(|r| r.resource_id)
            .collect();
        assert_eq!(available, vec![1]);
        assert!(!schema.supports_sort(SortKey::Date));
        assert_eq!(resources[1].to_string(), "#2 Stage (Venue)");
    }

    #[test]
    fn test_booking_schema_searches_event_fields() {
        let bookings: Vec<Booking> = decode_collection(
            r#"[{"bookingId":14,"status":"PENDING",
                 "event":{"eventID":1,"title":"Spring Gala","location":"Grand Hall"}},
                {"bookingId":15,"status":"CANCELLED","event":null}]"#,
        )
        .unwrap();
        let schema = Booking::schema();
        assert!(SearchQuery::new("grand").matches(&bookings[0], &schema));
        assert!(SearchQuery::new("15").matches(&bookings[1], &schema));
        assert!(!SearchQuery::new("gala").matches(&bookings[1], &schema));
        assert!(schema.supports_filter(&FilterKey::parse("rejected")));
        assert!(!schema.supports_filter(&FilterKey::parse("archived")));
        assert_eq!(bookings[1].to_string(), "#15 (no event) · no date");
    }

    #[test]
    fn test_collection_view_uses_kind_defaults_and_config() {
        let events = collection_view::<Event>(&Config::default());
        assert_eq!(events.view_state().page_size, 3);
        assert_eq!(events.title(), "Events");

        let config = Config::from_toml_str("[bookings]\npage_size = 2\nfilter = \"approved\"\n")
            .unwrap();
        let bookings = collection_view::<Booking>(&config);
        let state = bookings.view_state();
        assert_eq!(state.page_size, 2);
        assert_eq!(state.active_filter, FilterKey::Status("APPROVED".into()));
    }

    #[test]
    fn test_event_filter_falls_back_to_all() {
        let mut events = collection_view::<Event>(&Config::default());
        events.replace_collection(decode_collection(EVENTS_JSON).unwrap());

        events.set_filter(FilterKey::parse("completed"));
        assert_eq!(events.visible_len(), 1);

        events.set_filter(FilterKey::parse("archived"));
        assert_eq!(events.view_state().active_filter, FilterKey::All);
        assert_eq!(events.visible_len(), 3);

        events.set_filter(FilterKey::Status("all".into()));
        assert_eq!(events.view_state().active_filter, FilterKey::All);
        assert_eq!(events.visible_len(), 3);

        events.set_filter(FilterKey::Status("  ".into()));
        assert_eq!(events.view_state().active_filter, FilterKey::All);
    }
}
