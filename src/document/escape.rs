//! Newline spelling for literal-mode text.
//!
//! While editing, a newline is the two characters `\` `n`. The saved file holds a
//! real newline character inside the JSON string.

/// Turns every `\n` escape into a newline character. Applied when composing a save.
pub fn expand_newlines(text: &str) -> String {
    text.replace("\\n", "\n")
}

/// Turns every newline character back into the `\n` escape. Applied on load.
pub fn collapse_newlines(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\n', "\\n")
}
