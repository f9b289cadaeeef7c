//! Form-level banner for submission outcomes

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Rows reserved for a banner
pub const BANNER_HEIGHT: u16 = 4;

/// Render a bordered, wrapped message in `color`
pub fn render_banner(frame: &mut Frame, area: Rect, title: &str, message: &str, color: Color) {
    let block = Block::default()
        .title(Span::styled(
            format!(" {title} "),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color));

    let paragraph = Paragraph::new(Line::from(Span::styled(
        message,
        Style::default().fg(color),
    )))
    .wrap(Wrap { trim: true })
    .block(block);

    frame.render_widget(paragraph, area);
}
