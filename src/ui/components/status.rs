use ratatui::{
    layout::Alignment,
    prelude::{Color, Style},
    widgets::{Block, Borders, Paragraph},
};

use super::UiComponent;
use crate::controller::StatusKind;

impl UiComponent {
    /// The controller's last message. Failures are drawn in red.
    pub fn status(status: &str, kind: StatusKind) -> Paragraph<'_> {
        let (color, title) = match kind {
            StatusKind::Info => (Color::Yellow, " Status "),
            StatusKind::Error => (Color::Red, " Error "),
        };

        Paragraph::new(status)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(color))
                    .title(title),
            )
            .style(Style::default().fg(color))
            .alignment(Alignment::Center)
    }
}
