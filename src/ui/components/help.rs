use ratatui::{
    layout::Alignment,
    prelude::{Color, Style},
    widgets::{Block, Borders, Paragraph},
};

use super::UiComponent;
use crate::app::InputMode;
use crate::document::PinMode;

impl UiComponent {
    pub fn help(text: &str) -> Paragraph<'_> {
        Paragraph::new(text)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Yellow))
            )
            .style(Style::default().fg(Color::Yellow))
            .alignment(Alignment::Center)
    }

    pub fn help_text(mode: InputMode) -> &'static str {
        match mode {
            InputMode::Normal => "←/→ pin  Enter edit  m keys/text  ↑/↓ intensity  i set  r reset  l load  s save  c clear  q quit",
            InputMode::Editing(PinMode::Discrete) => "press keys to add or remove them  Esc done",
            InputMode::Editing(PinMode::Literal) => "type text  Enter new line  Backspace delete  Esc done",
            InputMode::PathPrompt => "type the path of a .json file  Enter load  Esc cancel",
            InputMode::IntensityEntry => "type a value from 0 to 100  Enter set  Esc cancel",
        }
    }
}
