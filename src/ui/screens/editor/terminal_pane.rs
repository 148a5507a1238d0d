use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style, Stylize},
    text::Text,
    widgets::{Block, BorderType, Paragraph, Widget},
};

use crate::serial::TerminalBuffer;

/// Device output, pinned to the newest lines.
pub fn render_terminal_pane(terminal: &TerminalBuffer, area: Rect, buf: &mut Buffer) {
    let visible_lines = area.height.saturating_sub(2) as usize;

    let content = if terminal.is_empty() {
        Text::from("Device output will appear here once a configuration is loaded.").dim()
    } else {
        Text::from(terminal.tail(visible_lines).join("\n"))
    };

    Paragraph::new(content)
        .block(
            Block::bordered()
                .title(format!(" Serial ({} bytes) ", terminal.len()))
                .border_type(BorderType::Rounded)
                .style(Style::default().fg(Color::Cyan)),
        )
        .style(Style::default().fg(Color::White))
        .render(area, buf);
}
