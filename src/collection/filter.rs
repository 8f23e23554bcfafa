//! Category filters.
//!
//! A view shows either everything ([`FilterKey::All`]), the items whose status
//! equals a chosen key, or the items whose date falls in a [`DateWindow`]
//! relative to a reference time.

use super::types::Schema;
use chrono::{DateTime, Utc};
use std::fmt;

/// Date windows offered by the events screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DateWindow {
    /// Strictly before the reference time.
    Past,
    /// On the same UTC calendar day as the reference time.
    Today,
    /// Strictly after the reference time.
    Upcoming,
}

impl DateWindow {
    /// Returns true if `date` falls inside the window around `now`.
    pub fn contains(self, date: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        match self {
            DateWindow::Past => date < now,
            DateWindow::Today => date.date_naive() == now.date_naive(),
            DateWindow::Upcoming => date > now,
        }
    }
}

/// The active category filter of a view.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum FilterKey {
    /// No restriction.
    #[default]
    All,
    /// Status equal to the key, compared case-insensitively. Stored uppercase.
    Status(String),
    /// Date inside the window.
    Window(DateWindow),
}

impl FilterKey {
    /// Parses a filter choice as offered by a select box.
    ///
    /// `"all"` and blank input give [`FilterKey::All`]; `past`, `today`,
    /// `future` and `upcoming` give date windows; anything else is a status.
    ///
    /// ```rust
    /// use eventdesk_widgets::collection::{DateWindow, FilterKey};
    ///
    /// assert_eq!(FilterKey::parse(" All "), FilterKey::All);
    /// assert_eq!(FilterKey::parse("future"), FilterKey::Window(DateWindow::Upcoming));
    /// assert_eq!(FilterKey::parse("cancelled"), FilterKey::Status("CANCELLED".into()));
    /// ```
    pub fn parse(key: &str) -> Self {
        let key = key.trim();
        match key.to_ascii_lowercase().as_str() {
            "" | "all" => FilterKey::All,
            "past" => FilterKey::Window(DateWindow::Past),
            "today" => FilterKey::Window(DateWindow::Today),
            "future" | "upcoming" => FilterKey::Window(DateWindow::Upcoming),
            _ => FilterKey::Status(key.to_uppercase()),
        }
    }

    /// Returns true if the item passes the filter.
    ///
    /// Items without a status never match a status key and items without a
    /// date never match a window; both always match [`FilterKey::All`].
    pub fn matches<I>(&self, item: &I, schema: &Schema<I>, now: DateTime<Utc>) -> bool {
        match self {
            FilterKey::All => true,
            FilterKey::Status(key) => schema
                .status_of(item)
                .map(|status| status.trim().to_uppercase() == *key)
                .unwrap_or(false),
            FilterKey::Window(window) => schema
                .date_of(item)
                .map(|date| window.contains(date, now))
                .unwrap_or(false),
        }
    }
}

impl From<&str> for FilterKey {
    fn from(key: &str) -> Self {
        FilterKey::parse(key)
    }
}

impl fmt::Display for FilterKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterKey::All => f.write_str("all"),
            FilterKey::Status(status) => f.write_str(status),
            FilterKey::Window(DateWindow::Past) => f.write_str("past"),
            FilterKey::Window(DateWindow::Today) => f.write_str("today"),
            FilterKey::Window(DateWindow::Upcoming) => f.write_str("upcoming"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collection::types::RecordId;
    use chrono::{Duration, TimeZone};

    #[derive(Clone)]
    struct Row {
        id: i64,
        status: Option<&'static str>,
        at: Option<DateTime<Utc>>,
    }

    fn schema() -> Schema<Row> {
        Schema::new(|r: &Row| RecordId::from(r.id))
            .status(|r: &Row| r.status.map(str::to_string))
            .date(|r: &Row| r.at)
    }

    fn noon() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_status_filter_is_case_insensitive() {
        let schema = schema();
        let row = Row {
            id: 1,
            status: Some("Cancelled"),
            at: None,
        };
        assert!(FilterKey::parse("CANCELLED").matches(&row, &schema, noon()));
        assert!(FilterKey::parse("cancelled").matches(&row, &schema, noon()));
        assert!(!FilterKey::parse("PENDING").matches(&row, &schema, noon()));
    }

    #[test]
    fn test_missing_status_only_matches_all() {
        let schema = schema();
        let row = Row {
            id: 1,
            status: None,
            at: None,
        };
        assert!(FilterKey::All.matches(&row, &schema, noon()));
        assert!(!FilterKey::parse("PENDING").matches(&row, &schema, noon()));
        assert!(!FilterKey::Window(DateWindow::Past).matches(&row, &schema, noon()));
    }

    #[test]
    fn test_date_windows() {
        let schema = schema();
        let at = |offset: Duration| Row {
            id: 1,
            status: None,
            at: Some(noon() + offset),
        };
        let morning = at(Duration::hours(-3));
        let tomorrow = at(Duration::days(1));
        let last_week = at(Duration::days(-7));

        let past = FilterKey::Window(DateWindow::Past);
        let today = FilterKey::Window(DateWindow::Today);
        let upcoming = FilterKey::Window(DateWindow::Upcoming);

        assert!(past.matches(&morning, &schema, noon()));
        assert!(past.matches(&last_week, &schema, noon()));
        assert!(today.matches(&morning, &schema, noon()));
        assert!(!today.matches(&tomorrow, &schema, noon()));
        assert!(upcoming.matches(&tomorrow, &schema, noon()));
        assert!(!upcoming.matches(&morning, &schema, noon()));
    }

    #[test]
    fn test_display_round_trips_through_parse() {
        for key in [
            FilterKey::All,
            FilterKey::Status("PENDING".into()),
            FilterKey::Window(DateWindow::Past),
            FilterKey::Window(DateWindow::Today),
            FilterKey::Window(DateWindow::Upcoming),
        ] {
            assert_eq!(FilterKey::parse(&key.to_string()), key);
        }
    }
}
