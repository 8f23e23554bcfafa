//! Text rendering for collection views.
//!
//! A view renders, top to bottom: the title or the search prompt, a status
//! line, an error banner after a failed load, the rows of the current page,
//! the page indicator and a one-line help.
//!
//! Rows are drawn by an [`ItemDelegate`]. [`DefaultDelegate`] uses the item's
//! `Display` output followed by its status badge, truncated to the view width.

use super::filter::FilterKey;
use super::style::{BULLET, ELLIPSIS};
use super::Model;
use crate::key::{self, KeyMap};
use std::fmt::Display;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Draws one row of a collection view.
pub trait ItemDelegate<I> {
    /// Renders `item` as a single line. May contain ANSI styling.
    fn render(&self, m: &Model<I>, item: &I) -> String;
}

/// Renders rows as `Display` text plus a coloured status badge.
///
/// Control sequences embedded in record text are stripped before rendering.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultDelegate;

impl DefaultDelegate {
    /// Creates the default delegate.
    pub fn new() -> Self {
        Self
    }
}

impl<I> ItemDelegate<I> for DefaultDelegate
where
    I: Display + Clone + Send + Sync + 'static,
{
    fn render(&self, m: &Model<I>, item: &I) -> String {
        let text = strip_ansi_escapes::strip_str(item.to_string());
        let status = m
            .schema
            .status_of(item)
            .map(|s| s.trim().to_uppercase())
            .filter(|s| !s.is_empty());

        // Two columns of row padding, plus room for the badge.
        let badge_width = status.as_ref().map(|s| s.width() + 3).unwrap_or(0);
        let budget = m.width.saturating_sub(2 + badge_width);
        let text = truncate(&text, budget);

        let mut line = m.styles.row.clone().render(&text);
        if let Some(status) = status {
            line.push(' ');
            line.push_str(&m.styles.status(&status).clone().render(&format!("[{}]", status)));
        }
        line
    }
}

/// Cuts `text` to at most `width` columns, ending with an ellipsis when cut.
///
/// ```rust
/// use eventdesk_widgets::collection::rendering::truncate;
///
/// assert_eq!(truncate("Annual Gala", 20), "Annual Gala");
/// assert_eq!(truncate("Annual Gala", 7), "Annual…");
/// ```
pub fn truncate(text: &str, width: usize) -> String {
    if text.width() <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w + ELLIPSIS.width() > width {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push_str(ELLIPSIS);
    out
}

impl<I: Clone + Send + Sync + 'static> Model<I> {
    /// Title, or the search prompt while searching.
    pub(super) fn view_header(&self) -> String {
        if self.searching {
            return format!(
                "  {}{}",
                self.styles.search_prompt.clone().render("Search: "),
                self.styles
                    .search_text
                    .clone()
                    .render(&format!("{}█", self.search.raw()))
            );
        }

        let mut header = self.styles.title.clone().render(&self.title);
        if !self.search.is_empty() {
            header.push_str(&format!(" search: {}", self.search.raw().trim()));
        }
        self.styles.title_bar.clone().render(&header)
    }

    /// Counts plus the active filter and sort.
    pub(super) fn view_status(&self) -> String {
        let mut parts = vec![format!("{} of {} items", self.visible_len(), self.len())];
        if self.filter != FilterKey::All {
            parts.push(format!("filter: {}", self.filter));
        }
        if let Some(sort) = self.sort {
            parts.push(format!("sort: {}", sort));
        }
        self.styles.status_bar.clone().render(&parts.join(&format!(" {} ", BULLET)))
    }

    /// Rows of the current page, or a placeholder.
    pub(super) fn view_rows(&self) -> String {
        if self.loading && self.items.is_empty() {
            return self.styles.loading.clone().render("Loading…");
        }
        let page = self.visible_page();
        if page.is_empty() {
            return self.styles.no_items.clone().render("No items.");
        }
        page.into_iter()
            .map(|item| self.delegate.render(self, item))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Page indicator and help line.
    pub(super) fn view_footer(&self) -> String {
        let mut footer = self.styles.pagination.clone().render(&self.paginator.view());
        if self.show_help {
            let bindings = if self.searching {
                vec![&self.keymap.accept_search, &self.keymap.cancel_search]
            } else {
                self.keymap.short_help()
            };
            let help = key::short_help_line(&bindings);
            if !help.is_empty() {
                footer.push('\n');
                footer.push_str(&self.styles.help.clone().render(&help));
            }
        }
        footer
    }

    /// Renders the whole view.
    pub fn view(&self) -> String {
        let mut sections = vec![self.view_header(), self.view_status()];
        if let Some(err) = &self.load_error {
            sections.push(self.styles.error_banner.clone().render(&format!("Error: {}", err)));
        }
        sections.push(self.view_rows());
        sections.push(self.view_footer());
        sections.join("\n")
    }
}
