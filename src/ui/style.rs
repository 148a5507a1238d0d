use ratatui::style::{Color, Style, Stylize};

pub fn dim_unless_focused(is_focused: bool, style: Style) -> Style {
    if is_focused { style.bold() } else { style.dim().italic() }
}

/// Border colour of a pin card: green while edited, yellow while highlighted.
pub fn card_border(is_selected: bool, is_focused: bool) -> Style {
    if is_focused {
        Style::default().fg(Color::Green).bold()
    } else if is_selected {
        Style::default().fg(Color::Yellow).bold()
    } else {
        Style::default().fg(Color::DarkGray)
    }
}
