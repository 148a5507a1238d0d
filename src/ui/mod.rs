pub mod components;
pub mod screens;
pub mod style;

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    widgets::Widget,
};
use crate::app::App;
use crate::ui::screens::editor::{render_editor, render_intensity_prompt, render_path_prompt};

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        render_editor(self, area, buf);
        if let Some(input) = &self.prompt {
            render_path_prompt(input, centered_rect(60, 20, area), buf);
        } else if let Some(input) = &self.intensity_entry {
            let pin = self.selected_pin().unwrap_or_default();
            render_intensity_prompt(&pin, input, centered_rect(30, 15, area), buf);
        }
    }
}

pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
