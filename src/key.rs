//! Type-safe key bindings for collection views.
//!
//! A [`Binding`] groups one or more key presses under a single action and
//! carries the help text shown in a view's footer. Bindings are built with
//! [`new_binding`] and a list of options, in the same way for every component:
//!
//! ```rust
//! use eventdesk_widgets::key;
//!
//! let next = key::new_binding(vec![
//!     key::with_keys_str(&["right", "l", "pgdown"]),
//!     key::with_help("→/l", "next page"),
//! ]);
//! assert_eq!(next.help().key, "→/l");
//! assert_eq!(next.keys().len(), 3);
//! ```
//!
//! Key specs are the lowercase names used by terminal applications: `"left"`,
//! `"pgup"`, `"enter"`, `"esc"`, `"ctrl+r"`, or a single character such as
//! `"/"`. Unrecognised specs are ignored rather than rejected.

use crate::collection::style::BULLET;
use bubbletea_rs::KeyMsg;
use crossterm::event::{KeyCode, KeyModifiers};

/// A single key press: a key code plus its modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyPress {
    /// The key that was pressed.
    pub code: KeyCode,
    /// Modifiers held while pressing it.
    pub modifiers: KeyModifiers,
}

impl KeyPress {
    /// Parses a key spec such as `"ctrl+r"`, `"pgdown"` or `"q"`.
    ///
    /// Returns `None` for specs that do not name a known key.
    pub fn parse(spec: &str) -> Option<Self> {
        let mut modifiers = KeyModifiers::NONE;
        let mut rest = spec;
        loop {
            if let Some(stripped) = rest.strip_prefix("ctrl+") {
                modifiers |= KeyModifiers::CONTROL;
                rest = stripped;
            } else if let Some(stripped) = rest.strip_prefix("alt+") {
                modifiers |= KeyModifiers::ALT;
                rest = stripped;
            } else if let Some(stripped) = rest.strip_prefix("shift+") {
                modifiers |= KeyModifiers::SHIFT;
                rest = stripped;
            } else {
                break;
            }
        }

        let code = match rest {
            "left" => KeyCode::Left,
            "right" => KeyCode::Right,
            "up" => KeyCode::Up,
            "down" => KeyCode::Down,
            "pgup" => KeyCode::PageUp,
            "pgdown" => KeyCode::PageDown,
            "home" => KeyCode::Home,
            "end" => KeyCode::End,
            "enter" => KeyCode::Enter,
            "esc" => KeyCode::Esc,
            "tab" => KeyCode::Tab,
            "backspace" => KeyCode::Backspace,
            "space" => KeyCode::Char(' '),
            other => {
                let mut chars = other.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => KeyCode::Char(c),
                    _ => return None,
                }
            }
        };

        Some(Self { code, modifiers })
    }

    fn matches(&self, msg: &KeyMsg) -> bool {
        if self.code != msg.key {
            return false;
        }
        // Shift is implied by the character itself for printable keys.
        let relevant = KeyModifiers::CONTROL | KeyModifiers::ALT;
        (msg.modifiers & relevant) == (self.modifiers & relevant)
    }
}

/// Help text attached to a binding.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Help {
    /// Short rendering of the keys, e.g. `"←/h"`.
    pub key: String,
    /// What the binding does, e.g. `"prev page"`.
    pub desc: String,
}

/// A named action bound to one or more key presses.
#[derive(Debug, Clone)]
pub struct Binding {
    keys: Vec<KeyPress>,
    help: Help,
    enabled: bool,
}

impl Default for Binding {
    fn default() -> Self {
        Self {
            keys: Vec::new(),
            help: Help::default(),
            enabled: true,
        }
    }
}

/// Option applied by [`new_binding`].
pub type BindingOpt = Box<dyn FnOnce(&mut Binding)>;

/// Builds a binding from a list of options.
pub fn new_binding(opts: Vec<BindingOpt>) -> Binding {
    let mut binding = Binding::default();
    for opt in opts {
        opt(&mut binding);
    }
    binding
}

/// Sets the keys of a binding from key specs. Unknown specs are skipped.
pub fn with_keys_str(keys: &[&str]) -> BindingOpt {
    let parsed: Vec<KeyPress> = keys.iter().filter_map(|k| KeyPress::parse(k)).collect();
    Box::new(move |b: &mut Binding| b.keys = parsed)
}

/// Sets the help text of a binding.
pub fn with_help(key: &str, desc: &str) -> BindingOpt {
    let help = Help {
        key: key.to_string(),
        desc: desc.to_string(),
    };
    Box::new(move |b: &mut Binding| b.help = help)
}

impl Binding {
    /// The key presses that trigger this binding.
    pub fn keys(&self) -> &[KeyPress] {
        &self.keys
    }

    /// Help text for this binding.
    pub fn help(&self) -> &Help {
        &self.help
    }

    /// Whether the binding currently reacts to input.
    pub fn enabled(&self) -> bool {
        self.enabled && !self.keys.is_empty()
    }

    /// Enables or disables the binding. Disabled bindings never match and are
    /// left out of help output.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Returns true if the key message triggers this binding.
    pub fn matches(&self, msg: &KeyMsg) -> bool {
        self.enabled() && self.keys.iter().any(|k| k.matches(msg))
    }
}

/// Returns true if the key message triggers any of the given bindings.
pub fn matches(msg: &KeyMsg, bindings: &[&Binding]) -> bool {
    bindings.iter().any(|b| b.matches(msg))
}

/// Components implement this to expose their bindings for help rendering.
pub trait KeyMap {
    /// Bindings shown in the compact, single-line help.
    fn short_help(&self) -> Vec<&Binding>;

    /// Bindings grouped into columns for the expanded help.
    fn full_help(&self) -> Vec<Vec<&Binding>>;
}

/// Renders bindings as a compact `key desc • key desc` line.
pub fn short_help_line(bindings: &[&Binding]) -> String {
    bindings
        .iter()
        .filter(|b| b.enabled())
        .map(|b| format!("{} {}", b.help.key, b.help.desc))
        .collect::<Vec<_>>()
        .join(&format!(" {} ", BULLET))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode, modifiers: KeyModifiers) -> KeyMsg {
        KeyMsg {
            key: code,
            modifiers,
        }
    }

    #[test]
    fn test_parse_named_and_char_keys() {
        assert_eq!(KeyPress::parse("pgup").map(|k| k.code), Some(KeyCode::PageUp));
        assert_eq!(KeyPress::parse("/").map(|k| k.code), Some(KeyCode::Char('/')));
        let ctrl_r = KeyPress::parse("ctrl+r").unwrap();
        assert_eq!(ctrl_r.code, KeyCode::Char('r'));
        assert_eq!(ctrl_r.modifiers, KeyModifiers::CONTROL);
        assert!(KeyPress::parse("hyper").is_none());
    }

    #[test]
    fn test_binding_matches_any_key() {
        let b = new_binding(vec![with_keys_str(&["left", "h"]), with_help("←/h", "prev")]);
        assert!(b.matches(&press(KeyCode::Left, KeyModifiers::NONE)));
        assert!(b.matches(&press(KeyCode::Char('h'), KeyModifiers::NONE)));
        assert!(!b.matches(&press(KeyCode::Char('l'), KeyModifiers::NONE)));
    }

    #[test]
    fn test_control_modifier_must_match() {
        let b = new_binding(vec![with_keys_str(&["ctrl+r"])]);
        assert!(b.matches(&press(KeyCode::Char('r'), KeyModifiers::CONTROL)));
        assert!(!b.matches(&press(KeyCode::Char('r'), KeyModifiers::NONE)));
    }

    #[test]
    fn test_disabled_binding_never_matches() {
        let mut b = new_binding(vec![with_keys_str(&["enter"]), with_help("enter", "ok")]);
        b.set_enabled(false);
        assert!(!b.matches(&press(KeyCode::Enter, KeyModifiers::NONE)));
        assert_eq!(short_help_line(&[&b]), "");
    }

    #[test]
    fn test_short_help_line() {
        let a = new_binding(vec![with_keys_str(&["h"]), with_help("h", "prev")]);
        let b = new_binding(vec![with_keys_str(&["l"]), with_help("l", "next")]);
        assert_eq!(short_help_line(&[&a, &b]), "h prev • l next");
    }
}
