use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, BorderType, Gauge, Paragraph, Widget, Wrap},
};

use crate::app::App;
use crate::document::{PinMode, PinSlot};
use crate::ui::style::{card_border, dim_unless_focused};

const PINS_PER_ROW: usize = 4;

pub fn render_pin_grid(app: &App, area: Rect, buf: &mut Buffer) {
    let document = app.controller.document();
    let focus = app.controller.focus();

    let container = Block::bordered()
        .title(format!(" Pins ({}) ", document.len()))
        .border_type(BorderType::Rounded)
        .style(dim_unless_focused(focus.is_none(), Style::default().fg(Color::Yellow)));
    let inner_area = container.inner(area);
    container.render(area, buf);

    if document.is_empty() {
        Paragraph::new("The loaded file has no pins.")
            .fg(Color::Red)
            .alignment(Alignment::Center)
            .render(inner_area, buf);
        return;
    }

    let num_rows = document.len().div_ceil(PINS_PER_ROW);
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![Constraint::Ratio(1, num_rows as u32); num_rows])
        .split(inner_area);

    for (row_idx, row) in rows.iter().enumerate() {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(vec![Constraint::Ratio(1, PINS_PER_ROW as u32); PINS_PER_ROW])
            .split(*row);

        for (col_idx, col_area) in cols.iter().enumerate() {
            let index = row_idx * PINS_PER_ROW + col_idx;
            let Some((pin, slot)) = document.pin_at(index) else {
                break;
            };
            let is_focused = focus == Some(pin);
            render_pin_card(pin, slot, index == app.selected, is_focused, *col_area, buf);
        }
    }
}

fn render_pin_card(pin: &str, slot: &PinSlot, is_selected: bool, is_focused: bool, area: Rect, buf: &mut Buffer) {
    let marker = if is_focused { " ✎" } else { "" };
    let card = Block::bordered()
        .title(format!(" {} · {}{} ", pin, slot.mode.label(), marker))
        .border_type(BorderType::Rounded)
        .style(card_border(is_selected, is_focused));
    let inner = card.inner(area);
    card.render(area, buf);

    let parts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(inner);

    let body = match slot.mode {
        PinMode::Discrete if slot.discrete.is_empty() => Line::from(Span::raw("(no keys)").dim()),
        PinMode::Discrete => Line::from(
            slot.discrete
                .iter()
                .map(|key| key.as_str())
                .collect::<Vec<_>>()
                .join(" + "),
        ),
        PinMode::Literal if slot.literal.is_empty() => Line::from(Span::raw("(no text)").dim()),
        PinMode::Literal => Line::from(format!("\"{}\"", slot.literal)),
    };
    let body_style = if is_focused { Style::default().fg(Color::White).bold() } else { Style::default().fg(Color::White) };
    Paragraph::new(body)
        .style(body_style)
        .wrap(Wrap { trim: false })
        .render(parts[0], buf);

    Gauge::default()
        .gauge_style(Style::default().fg(Color::Magenta))
        .percent(u16::from(slot.intensity.value()))
        .label(format!("LED {}%", slot.intensity))
        .render(parts[1], buf);
}
