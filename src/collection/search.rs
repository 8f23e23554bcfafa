//! Free-text search over a collection.
//!
//! Search is a case-insensitive substring match over the schema's search
//! fields. Terms are compared as text even when they look numeric, so `"7"`
//! finds ids 7, 17, 27 and 70 alike.

use super::types::Schema;

/// A normalised search term.
///
/// # Examples
///
/// ```rust
/// use eventdesk_widgets::collection::{RecordId, Schema, SearchQuery};
///
/// #[derive(Clone)]
/// struct Room { id: i64, name: String }
///
/// let schema = Schema::new(|r: &Room| RecordId::from(r.id))
///     .search_id()
///     .search(|r: &Room| Some(r.name.clone()));
///
/// let hall = Room { id: 17, name: "Main Hall".into() };
/// assert!(SearchQuery::new("  HALL ").matches(&hall, &schema));
/// assert!(SearchQuery::new("7").matches(&hall, &schema));
/// assert!(!SearchQuery::new("garden").matches(&hall, &schema));
/// assert!(SearchQuery::new("   ").matches(&hall, &schema));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchQuery {
    raw: String,
    needle: String,
}

impl SearchQuery {
    /// Builds a query from user input. The input is trimmed and lowercased
    /// for matching; the raw text is kept for display.
    pub fn new(term: &str) -> Self {
        Self {
            raw: term.to_string(),
            needle: term.trim().to_lowercase(),
        }
    }

    /// The text as entered.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Returns true if the query accepts every item.
    pub fn is_empty(&self) -> bool {
        self.needle.is_empty()
    }

    /// Returns true if any search field of the item contains the term.
    pub fn matches<I>(&self, item: &I, schema: &Schema<I>) -> bool {
        if self.is_empty() {
            return true;
        }
        schema.search_fields.iter().any(|field| {
            field(item)
                .map(|value| value.to_lowercase().contains(&self.needle))
                .unwrap_or(false)
        })
    }
}
