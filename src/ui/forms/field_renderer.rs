//! Field rendering utilities for forms

use crate::state::{FieldSpec, FieldWidget};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Rows a field occupies: the widget plus one line for its error
pub fn field_height(field: &FieldSpec) -> u16 {
    field.widget().height() + 1
}

/// Draw one field and, below it, its error message if any
pub fn draw_field(
    frame: &mut Frame,
    area: Rect,
    field: &FieldSpec,
    value: &str,
    error: Option<&str>,
    is_active: bool,
) {
    let widget = field.widget();
    let widget_area = Rect {
        height: area.height.saturating_sub(1).min(widget.height()),
        ..area
    };
    let error_area = Rect {
        y: widget_area.y + widget_area.height,
        height: area.height.saturating_sub(widget_area.height).min(1),
        ..area
    };

    let style = if is_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::Gray)
    };

    let border_style = if error.is_some() {
        Style::default().fg(Color::Red)
    } else if is_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let cursor = if is_active { "▌" } else { "" };

    let content = match &widget {
        FieldWidget::TextArea { .. } => {
            let mut lines: Vec<Line> = value.lines().map(|l| Line::from(l.to_string())).collect();
            if value.ends_with('\n') {
                lines.push(Line::from(""));
            }
            if lines.is_empty() && !is_active {
                lines.push(empty_line());
            }
            if is_active {
                match lines.last_mut() {
                    Some(last) => last
                        .spans
                        .push(Span::styled(cursor, Style::default().fg(Color::Cyan))),
                    None => lines.push(Line::from(Span::styled(
                        cursor,
                        Style::default().fg(Color::Cyan),
                    ))),
                }
            }
            Paragraph::new(lines)
        }
        FieldWidget::Choice { .. } => {
            let label = field
                .option_label(value)
                .map(str::to_string)
                .unwrap_or_else(|| field.display_placeholder());
            let line = if is_active {
                Line::from(vec![
                    Span::styled("◀ ", Style::default().fg(Color::Cyan)),
                    Span::styled(label, style),
                    Span::styled(" ▶", Style::default().fg(Color::Cyan)),
                ])
            } else {
                Line::from(Span::styled(label, style))
            };
            Paragraph::new(line)
        }
        FieldWidget::SingleLine { .. } => {
            if value.is_empty() && !is_active {
                Paragraph::new(empty_line())
            } else {
                Paragraph::new(Line::from(vec![
                    Span::styled(value, style),
                    Span::styled(cursor, Style::default().fg(Color::Cyan)),
                ]))
            }
        }
    };

    let mut block = Block::default()
        .title(format!(" {} ", field.display_placeholder()))
        .borders(Borders::ALL)
        .border_style(border_style);
    if let Some(hint) = widget.length_hint(value.chars().count()) {
        block = block.title_bottom(
            Line::from(Span::styled(
                format!(" {hint} "),
                Style::default().fg(Color::DarkGray),
            ))
            .right_aligned(),
        );
    }

    frame.render_widget(content.wrap(Wrap { trim: false }).block(block), widget_area);

    if let Some(message) = error {
        let line = Line::from(vec![
            Span::styled(" ✗ ", Style::default().fg(Color::Red)),
            Span::styled(
                message,
                Style::default().fg(Color::Red).add_modifier(Modifier::ITALIC),
            ),
        ]);
        frame.render_widget(Paragraph::new(line), error_area);
    }
}

fn empty_line() -> Line<'static> {
    Line::from(Span::styled(
        "(empty)",
        Style::default().fg(Color::DarkGray),
    ))
}
