//! Styles for collection views.
//!
//! Statuses are coloured by class: confirmed and approved items read as
//! success, pending as warning, cancelled and rejected as danger. Anything
//! else uses the neutral style.
//!
//! ```rust
//! use eventdesk_widgets::collection::style::{CollectionStyles, StatusClass};
//! use lipgloss_extras::prelude::*;
//!
//! let mut styles = CollectionStyles::default();
//! styles.title = Style::new()
//!     .foreground(AdaptiveColor { Light: "#1a1a1a", Dark: "#ffffff" })
//!     .bold(true);
//!
//! assert_eq!(StatusClass::of("approved"), StatusClass::Success);
//! ```

use lipgloss_extras::prelude::*;

/// Separator between help entries and status counts.
pub const BULLET: &str = "•";

/// Marks truncated rows.
pub const ELLIPSIS: &str = "…";

/// Visual class of a status value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusClass {
    /// Confirmed or approved.
    Success,
    /// Pending.
    Warning,
    /// Cancelled or rejected.
    Danger,
    /// Any other status.
    Neutral,
}

impl StatusClass {
    /// Classifies a status, ignoring case and surrounding whitespace.
    pub fn of(status: &str) -> Self {
        match status.trim().to_uppercase().as_str() {
            "CONFIRMED" | "APPROVED" | "AVAILABLE" => StatusClass::Success,
            "PENDING" => StatusClass::Warning,
            "CANCELLED" | "REJECTED" | "UNAVAILABLE" => StatusClass::Danger,
            _ => StatusClass::Neutral,
        }
    }
}

/// Styles for every part of a collection view.
#[derive(Debug, Clone)]
pub struct CollectionStyles {
    /// The view title.
    pub title: Style,
    /// Line holding the title.
    pub title_bar: Style,
    /// `Search:` prompt.
    pub search_prompt: Style,
    /// Search text while typing.
    pub search_text: Style,
    /// Line showing counts, the active filter and sort.
    pub status_bar: Style,
    /// Banner shown after a failed load.
    pub error_banner: Style,
    /// Placeholder shown while loading.
    pub loading: Style,
    /// Placeholder when nothing is visible.
    pub no_items: Style,
    /// A rendered row.
    pub row: Style,
    /// Success statuses.
    pub status_success: Style,
    /// Warning statuses.
    pub status_warning: Style,
    /// Danger statuses.
    pub status_danger: Style,
    /// Other statuses.
    pub status_neutral: Style,
    /// Page indicator.
    pub pagination: Style,
    /// Help line.
    pub help: Style,
}

impl CollectionStyles {
    /// Style for a status value, picked by its [`StatusClass`].
    pub fn status(&self, status: &str) -> &Style {
        match StatusClass::of(status) {
            StatusClass::Success => &self.status_success,
            StatusClass::Warning => &self.status_warning,
            StatusClass::Danger => &self.status_danger,
            StatusClass::Neutral => &self.status_neutral,
        }
    }
}

impl Default for CollectionStyles {
    fn default() -> Self {
        let subdued_color = AdaptiveColor {
            Light: "#9B9B9B",
            Dark: "#5C5C5C",
        };

        Self {
            title: Style::new()
                .background(Color::from("62"))
                .foreground(Color::from("230"))
                .padding(0, 1, 0, 1),
            title_bar: Style::new().padding(0, 0, 1, 2),
            search_prompt: Style::new().foreground(AdaptiveColor {
                Light: "#04B575",
                Dark: "#ECFD65",
            }),
            search_text: Style::new().foreground(AdaptiveColor {
                Light: "#1a1a1a",
                Dark: "#dddddd",
            }),
            status_bar: Style::new()
                .foreground(AdaptiveColor {
                    Light: "#A49FA5",
                    Dark: "#777777",
                })
                .padding(0, 0, 1, 2),
            error_banner: Style::new()
                .foreground(AdaptiveColor {
                    Light: "#B3261E",
                    Dark: "#F2B8B5",
                })
                .bold(true)
                .padding_left(2),
            loading: Style::new().foreground(subdued_color.clone()).padding_left(2),
            no_items: Style::new()
                .foreground(AdaptiveColor {
                    Light: "#909090",
                    Dark: "#626262",
                })
                .padding_left(2),
            row: Style::new().padding_left(2),
            status_success: Style::new().foreground(AdaptiveColor {
                Light: "#1E7B34",
                Dark: "#6FCF97",
            }),
            status_warning: Style::new().foreground(AdaptiveColor {
                Light: "#8A6D00",
                Dark: "#F2C94C",
            }),
            status_danger: Style::new().foreground(AdaptiveColor {
                Light: "#B3261E",
                Dark: "#EB5757",
            }),
            status_neutral: Style::new().foreground(subdued_color.clone()),
            pagination: Style::new().foreground(subdued_color).padding_left(2),
            help: Style::new().padding(1, 0, 0, 2),
        }
    }
}
