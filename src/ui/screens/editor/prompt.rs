use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::{Block, BorderType, Clear, Paragraph, Widget, Wrap},
};

pub fn render_path_prompt(input: &str, area: Rect, buf: &mut Buffer) {
    Clear.render(area, buf);
    Paragraph::new(format!("{}█", input))
        .block(
            Block::bordered()
                .title(" Load configuration (.json) ")
                .border_type(BorderType::Rounded)
                .style(Style::default().fg(Color::Yellow)),
        )
        .style(Style::default().fg(Color::White))
        .wrap(Wrap { trim: false })
        .render(area, buf);
}

pub fn render_intensity_prompt(pin: &str, input: &str, area: Rect, buf: &mut Buffer) {
    Clear.render(area, buf);
    Paragraph::new(format!("{}█", input))
        .block(
            Block::bordered()
                .title(format!(" {} intensity (0-100) ", pin))
                .border_type(BorderType::Rounded)
                .style(Style::default().fg(Color::Yellow)),
        )
        .style(Style::default().fg(Color::White))
        .render(area, buf);
}
