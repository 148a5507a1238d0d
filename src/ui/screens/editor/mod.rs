use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, BorderType, Paragraph, Widget},
};
use crate::app::App;
use crate::serial::SessionState;
use crate::ui::components::UiComponent;

mod pin_grid;
mod prompt;
mod terminal_pane;

pub use pin_grid::render_pin_grid;
pub use prompt::{render_intensity_prompt, render_path_prompt};
pub use terminal_pane::render_terminal_pane;

pub fn render_editor(app: &App, area: Rect, buf: &mut Buffer) {
    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(8),
            Constraint::Percentage(35),
            Constraint::Length(3),
            Constraint::Length(3),
        ])
        .split(area);

    render_header(app, main_layout[0], buf);
    render_pin_grid(app, main_layout[1], buf);
    render_terminal_pane(app.controller.terminal(), main_layout[2], buf);

    let status = app.controller.status().unwrap_or("");
    UiComponent::status(status, app.controller.status_kind()).render(main_layout[3], buf);
    UiComponent::help(UiComponent::help_text(app.input_mode())).render(main_layout[4], buf);
}

fn render_header(app: &App, area: Rect, buf: &mut Buffer) {
    let file = app
        .controller
        .file_name()
        .unwrap_or_else(|| "no file loaded".to_string());

    let session = app.controller.session();
    let (state, color) = match session.state() {
        SessionState::Open => ("connected", Color::Green),
        SessionState::Opening => ("connecting", Color::Yellow),
        SessionState::Closed => ("disconnected", Color::Red),
    };
    let device = session.device_name().unwrap_or_else(|| "-".to_string());

    let line = Line::from(vec![
        Span::raw(" File: "),
        Span::styled(file, Style::default().bold()),
        Span::raw("   Device: "),
        Span::styled(device, Style::default().bold()),
        Span::raw(" "),
        Span::styled(format!("({})", state), Style::default().fg(color)),
    ]);

    Paragraph::new(line)
        .block(
            Block::bordered()
                .title(" Macropad ")
                .border_type(BorderType::Rounded)
                .style(Style::default().fg(Color::Cyan)),
        )
        .render(area, buf);
}
