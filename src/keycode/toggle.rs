use super::KeyToken;

/// Removes `token` when present, appends it otherwise.
///
/// Insertion order is kept for display; membership is what counts, so a token that is
/// toggled off and on again moves to the end of the list.
pub fn toggle(keys: &[KeyToken], token: &KeyToken) -> Vec<KeyToken> {
    if keys.contains(token) {
        keys.iter().filter(|key| *key != token).cloned().collect()
    } else {
        let mut next = keys.to_vec();
        next.push(token.clone());
        next
    }
}

/// Compares two key lists as sets.
pub fn same_keys(a: &[KeyToken], b: &[KeyToken]) -> bool {
    a.len() == b.len() && a.iter().all(|key| b.contains(key))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(tokens: &[&str]) -> Vec<KeyToken> {
        tokens.iter().map(|t| KeyToken::from(*t)).collect()
    }

    #[test]
    fn test_append_absent() {
        let next = toggle(&keys(&["E"]), &KeyToken::from("R"));
        assert_eq!(next, keys(&["E", "R"]));
    }

    #[test]
    fn test_remove_present() {
        let next = toggle(&keys(&["CONTROL", "SHIFT", "A"]), &KeyToken::from("SHIFT"));
        assert_eq!(next, keys(&["CONTROL", "A"]));
    }

    #[test]
    fn test_double_toggle_restores_list() {
        let cases = [keys(&[]), keys(&["E"]), keys(&["CONTROL", "ALT", "DELETE"])];
        for list in &cases {
            for token in ["E", "ALT", "X"] {
                let token = KeyToken::from(token);
                let back = toggle(&toggle(list, &token), &token);
                assert!(same_keys(&back, list), "{:?} / {}", list, token);
                if !list.contains(&token) {
                    assert_eq!(&back, list);
                }
            }
        }
    }
}
