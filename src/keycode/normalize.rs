use super::{KeyToken, RawKey};

/// Translates a captured key into its canonical token.
///
/// The space bar becomes `SPACE`, the platform meta key becomes `GUI`, and every
/// other key is the uppercase of its label.
pub fn normalize(raw: &RawKey) -> KeyToken {
    match raw {
        RawKey::Char(' ') => KeyToken::new("SPACE"),
        RawKey::Char(c) => KeyToken::new(c.to_uppercase().collect::<String>()),
        RawKey::Meta => KeyToken::new("GUI"),
        RawKey::Named(label) => KeyToken::new(label.to_uppercase()),
    }
}
