//! Sort orders for collection views.
//!
//! Sorting never touches the collection itself. It reorders the list of
//! indices a view derives from the collection, so clearing the sort restores
//! the order the data source delivered.
//!
//! Ordering rules:
//! - `Id` sorts ascending by [`RecordId`](super::RecordId): numbers first, then text.
//! - `Title` and `Location` sort case-insensitively, with the original case
//!   as a tiebreak. Missing values sort as the empty string.
//! - `Date` sorts chronologically. Items without a date come after every
//!   dated item.
//!
//! All sorts are stable.

use super::types::{RecordId, Schema};
use chrono::{DateTime, Utc};
use std::cmp::Ordering;
use std::fmt;

/// The fields a view can be sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortKey {
    /// Record id, ascending.
    Id,
    /// Title or name, ascending.
    Title,
    /// Date and time, ascending.
    Date,
    /// Location, ascending.
    Location,
}

impl SortKey {
    /// All keys in the order the sort toggle cycles through them.
    pub const ALL: [SortKey; 4] = [SortKey::Id, SortKey::Title, SortKey::Date, SortKey::Location];

    /// Parses a sort choice. Unknown names give `None`.
    ///
    /// ```rust
    /// use eventdesk_widgets::collection::SortKey;
    ///
    /// assert_eq!(SortKey::parse("Title"), Some(SortKey::Title));
    /// assert_eq!(SortKey::parse("name"), Some(SortKey::Title));
    /// assert_eq!(SortKey::parse("price"), None);
    /// ```
    pub fn parse(key: &str) -> Option<Self> {
        match key.trim().to_ascii_lowercase().as_str() {
            "id" => Some(SortKey::Id),
            "title" | "name" => Some(SortKey::Title),
            "date" | "datetime" => Some(SortKey::Date),
            "location" => Some(SortKey::Location),
            _ => None,
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SortKey::Id => "id",
            SortKey::Title => "title",
            SortKey::Date => "date",
            SortKey::Location => "location",
        };
        f.write_str(name)
    }
}

/// Precomputed sort value for one item.
#[derive(Debug, Clone, PartialEq, Eq)]
enum SortValue {
    Id(RecordId),
    Text { folded: String, raw: String },
    Date(Option<DateTime<Utc>>),
}

impl SortValue {
    fn text(value: Option<String>) -> Self {
        let raw = value.unwrap_or_default();
        SortValue::Text {
            folded: raw.to_lowercase(),
            raw,
        }
    }

    fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (SortValue::Id(a), SortValue::Id(b)) => a.cmp(b),
            (
                SortValue::Text { folded: fa, raw: ra },
                SortValue::Text { folded: fb, raw: rb },
            ) => fa.cmp(fb).then_with(|| ra.cmp(rb)),
            (SortValue::Date(a), SortValue::Date(b)) => match (a, b) {
                (Some(a), Some(b)) => a.cmp(b),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            },
            // Values of one sort are always the same variant.
            _ => Ordering::Equal,
        }
    }
}

fn sort_value<I>(key: SortKey, item: &I, schema: &Schema<I>) -> SortValue {
    match key {
        SortKey::Id => SortValue::Id(schema.id_of(item)),
        SortKey::Title => SortValue::text(schema.title.as_ref().and_then(|f| f(item))),
        SortKey::Location => SortValue::text(schema.location.as_ref().and_then(|f| f(item))),
        SortKey::Date => SortValue::Date(schema.date_of(item)),
    }
}

/// Compares two items by the given key.
pub fn compare<I>(key: SortKey, a: &I, b: &I, schema: &Schema<I>) -> Ordering {
    sort_value(key, a, schema).compare(&sort_value(key, b, schema))
}

/// Stably sorts `order`, a list of indices into `items`, by the given key.
///
/// Each item's sort value is computed once.
pub fn sort_indices<I>(order: &mut Vec<usize>, items: &[I], key: SortKey, schema: &Schema<I>) {
    let mut keyed: Vec<(SortValue, usize)> = order
        .iter()
        .map(|&idx| (sort_value(key, &items[idx], schema), idx))
        .collect();
    keyed.sort_by(|a, b| a.0.compare(&b.0));
    order.clear();
    order.extend(keyed.into_iter().map(|(_, idx)| idx));
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[derive(Clone)]
    struct Row {
        id: i64,
        title: &'static str,
        day: Option<u32>,
    }

    fn schema() -> Schema<Row> {
        Schema::new(|r: &Row| RecordId::from(r.id))
            .title(|r: &Row| Some(r.title.to_string()))
            .date(|r: &Row| {
                r.day
                    .map(|d| Utc.with_ymd_and_hms(2025, 3, d, 9, 0, 0).unwrap())
            })
    }

    fn rows() -> Vec<Row> {
        vec![
            Row { id: 10, title: "gala", day: Some(5) },
            Row { id: 2, title: "Banquet", day: None },
            Row { id: 33, title: "apéro", day: Some(1) },
            Row { id: 4, title: "Gala", day: Some(5) },
        ]
    }

    fn sorted_ids(key: SortKey) -> Vec<i64> {
        let items = rows();
        let mut order: Vec<usize> = (0..items.len()).collect();
        sort_indices(&mut order, &items, key, &schema());
        order.iter().map(|&i| items[i].id).collect()
    }

    #[test]
    fn test_sort_by_id_is_numeric() {
        assert_eq!(sorted_ids(SortKey::Id), vec![2, 4, 10, 33]);
    }

    #[test]
    fn test_sort_by_title_ignores_case_first() {
        assert_eq!(sorted_ids(SortKey::Title), vec![33, 2, 4, 10]);
    }

    #[test]
    fn test_sort_by_date_puts_missing_last_and_is_stable() {
        // ids 10 and 4 share a date and keep their relative order.
        assert_eq!(sorted_ids(SortKey::Date), vec![33, 10, 4, 2]);
    }

    #[test]
    fn test_sort_is_idempotent() {
        let items = rows();
        let schema = schema();
        for key in SortKey::ALL {
            let mut once: Vec<usize> = (0..items.len()).collect();
            sort_indices(&mut once, &items, key, &schema);
            let mut twice = once.clone();
            sort_indices(&mut twice, &items, key, &schema);
            assert_eq!(once, twice, "sort by {} is not idempotent", key);
        }
    }

    #[test]
    fn test_missing_accessor_compares_equal() {
        let items = rows();
        let schema = Schema::new(|r: &Row| RecordId::from(r.id));
        assert_eq!(
            compare(SortKey::Location, &items[0], &items[1], &schema),
            Ordering::Equal
        );
    }

    #[test]
    fn test_parse_round_trips_display() {
        for key in SortKey::ALL {
            assert_eq!(SortKey::parse(&key.to_string()), Some(key));
        }
    }
}
