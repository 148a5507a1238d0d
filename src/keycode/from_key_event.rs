use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyEventKind, ModifierKeyCode};

use super::RawKey;

impl RawKey {
    /// Maps a terminal key event to a raw key. Releases and keys with no label yield `None`.
    pub fn from_key_event(event: &KeyEvent) -> Option<Self> {
        if event.kind == KeyEventKind::Release {
            return None;
        }

        let named = |label: &str| Some(RawKey::Named(label.to_string()));

        match event.code {
            KeyCode::Char(c) => Some(RawKey::Char(c)),
            KeyCode::Enter => named("Enter"),
            KeyCode::Tab | KeyCode::BackTab => named("Tab"),
            KeyCode::Backspace => named("Backspace"),
            KeyCode::Delete => named("Delete"),
            KeyCode::Insert => named("Insert"),
            KeyCode::Esc => named("Escape"),
            KeyCode::Home => named("Home"),
            KeyCode::End => named("End"),
            KeyCode::PageUp => named("PageUp"),
            KeyCode::PageDown => named("PageDown"),
            KeyCode::Up => named("ArrowUp"),
            KeyCode::Down => named("ArrowDown"),
            KeyCode::Left => named("ArrowLeft"),
            KeyCode::Right => named("ArrowRight"),
            KeyCode::F(n) => Some(RawKey::Named(format!("F{}", n))),
            KeyCode::CapsLock => named("CapsLock"),
            KeyCode::ScrollLock => named("ScrollLock"),
            KeyCode::NumLock => named("NumLock"),
            KeyCode::PrintScreen => named("PrintScreen"),
            KeyCode::Pause => named("Pause"),
            KeyCode::Menu => named("ContextMenu"),
            KeyCode::Modifier(modifier) => match modifier {
                ModifierKeyCode::LeftSuper
                | ModifierKeyCode::RightSuper
                | ModifierKeyCode::LeftMeta
                | ModifierKeyCode::RightMeta
                | ModifierKeyCode::LeftHyper
                | ModifierKeyCode::RightHyper => Some(RawKey::Meta),
                ModifierKeyCode::LeftShift | ModifierKeyCode::RightShift => named("Shift"),
                ModifierKeyCode::LeftControl | ModifierKeyCode::RightControl => named("Control"),
                ModifierKeyCode::LeftAlt | ModifierKeyCode::RightAlt => named("Alt"),
                ModifierKeyCode::IsoLevel3Shift => named("AltGraph"),
                ModifierKeyCode::IsoLevel5Shift => None,
            },
            KeyCode::Null | KeyCode::KeypadBegin | KeyCode::Media(_) => None,
        }
    }
}
