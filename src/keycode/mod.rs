//! Keycode model: canonical key tokens and the raw key events they are captured from.

mod from_key_event;
mod normalize;
mod toggle;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use normalize::normalize;
pub use toggle::{same_keys, toggle};

/// Canonical uppercase identifier for one captured key, e.g. `A`, `SPACE`, `GUI`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeyToken(String);

impl KeyToken {
    /// Wraps a token verbatim. Tokens read from a file are kept as written.
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for KeyToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for KeyToken {
    fn from(token: &str) -> Self {
        Self::new(token)
    }
}

/// A key event as reported by the capture source, before normalization.
///
/// Labels follow the browser `KeyboardEvent.key` names (`Enter`, `ArrowUp`, `Control`)
/// so configuration files stay interchangeable with other tooling for the same firmware.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawKey {
    /// A printable character, including the space bar.
    Char(char),
    /// The platform meta key (Super, Windows, Command).
    Meta,
    /// Any other key, by label.
    Named(String),
}

impl RawKey {
    /// Builds a raw key from a textual label: one character is a `Char`, meta-like
    /// labels are `Meta`, everything else is `Named`.
    pub fn from_label(label: &str) -> Self {
        let mut chars = label.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => RawKey::Char(c),
            _ if is_meta_label(label) => RawKey::Meta,
            _ => RawKey::Named(label.to_string()),
        }
    }
}

fn is_meta_label(label: &str) -> bool {
    matches!(
        label.to_ascii_lowercase().as_str(),
        "meta" | "os" | "super" | "command" | "cmd" | "win" | "hyper"
    )
}
