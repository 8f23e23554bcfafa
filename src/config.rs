//! Per-view configuration read from TOML.
//!
//! Every table and field is optional. A missing page size falls back to the
//! collection's default.
//!
//! ```toml
//! [events]
//! page_size = 3
//! sort = "date"
//! filter = "upcoming"
//!
//! [bookings]
//! paginator = "dots"
//! filter = "pending"
//! ```

use crate::error::Result;
use crate::paginator::Type;
use crate::source::CollectionKind;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, warn};

/// Settings for every collection view.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// The `[events]` table.
    #[serde(default)]
    pub events: ViewConfig,
    /// The `[resources]` table.
    #[serde(default)]
    pub resources: ViewConfig,
    /// The `[bookings]` table.
    #[serde(default)]
    pub bookings: ViewConfig,
}

/// Settings for one collection view.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ViewConfig {
    /// Items per page. Values below 1 are treated as 1.
    #[serde(default)]
    pub page_size: Option<usize>,
    /// Page indicator style.
    #[serde(default)]
    pub paginator: Type,
    /// Initial sort, as accepted by [`crate::collection::SortKey::parse`].
    #[serde(default)]
    pub sort: Option<String>,
    /// Initial filter, as accepted by [`crate::collection::FilterKey::parse`].
    #[serde(default)]
    pub filter: Option<String>,
}

impl ViewConfig {
    /// The configured page size, or `default` when none is set.
    pub fn page_size_or(&self, default: usize) -> usize {
        self.page_size.unwrap_or(default).max(1)
    }
}

impl Config {
    /// Parses configuration from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Config = toml::from_str(text)?;
        Ok(config)
    }

    /// Reads configuration from a file. A missing file gives the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "no configuration file, using defaults");
            return Ok(Config::default());
        }
        let text = std::fs::read_to_string(path)?;
        Config::from_toml_str(&text).map_err(|err| {
            warn!(path = %path.display(), error = %err, "invalid configuration file");
            err
        })
    }

    /// Settings for the given collection.
    pub fn view(&self, kind: CollectionKind) -> &ViewConfig {
        match kind {
            CollectionKind::Events => &self.events,
            CollectionKind::Resources => &self.resources,
            CollectionKind::Bookings => &self.bookings,
        }
    }
}
