//! Layout components (header, tabs, status bar)

use crate::app::App;
use crate::platform::SUBMIT_SHORTCUT;
use crate::state::{FieldKind, View};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Tabs},
    Frame,
};

/// Business name shown in the header
pub const BUSINESS_NAME: &str = "DeepHull Diving";

const TAGLINE: &str = "Professional Underwater Services";

/// Areas of the main layout
pub struct MainLayout {
    pub header: Rect,
    pub tabs: Rect,
    pub content: Rect,
}

/// Split the screen into header, tab bar and content, leaving the bottom
/// line for the status bar
pub fn create_layout(area: Rect) -> MainLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Length(1), // Tabs
            Constraint::Min(0),    // Content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    MainLayout {
        header: chunks[0],
        tabs: chunks[1],
        content: chunks[2],
    }
}

/// Draw the business header
pub fn draw_header(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let title = Paragraph::new(Line::from(vec![
        Span::styled(
            BUSINESS_NAME,
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(TAGLINE, Style::default().fg(Color::Gray)),
    ]));
    frame.render_widget(title, inner);

    let phone = Paragraph::new(Line::from(vec![
        Span::styled("24/7 Emergency  ", Style::default().fg(Color::Yellow)),
        Span::styled(
            format!("📞 {}", app.config.business_phone()),
            Style::default().fg(Color::Green),
        ),
    ]))
    .alignment(Alignment::Right);
    frame.render_widget(phone, inner);
}

/// Draw the form tabs
pub fn draw_tabs(frame: &mut Frame, area: Rect, app: &App) {
    let titles: Vec<Line> = View::ALL
        .iter()
        .enumerate()
        .map(|(idx, view)| Line::from(format!("F{} {}", idx + 1, view.label())))
        .collect();

    let tabs = Tabs::new(titles)
        .select(app.state.current_view.index())
        .style(Style::default().fg(Color::DarkGray))
        .highlight_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        );

    frame.render_widget(tabs, area);
}

/// Draw the status bar
pub fn draw_status_bar(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let status_area = Rect {
        x: 0,
        y: area.height.saturating_sub(1),
        width: area.width,
        height: 1,
    };

    let mut spans = vec![Span::raw(" ")];

    let form = app.state.active_form();
    let hints = get_field_hints(
        form.active_spec().map(|f| f.kind),
        form.is_submit_focused(),
    );
    spans.push(Span::styled(hints, Style::default().fg(Color::Gray)));

    if let Some(msg) = &app.state.status_message {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(msg, Style::default().fg(Color::Yellow)));
    }

    let status = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(status, status_area);

    // Quit hint on the right
    let quit_hint = " Esc:quit ";
    let quit_area = Rect {
        x: area.width.saturating_sub(quit_hint.len() as u16),
        y: area.height.saturating_sub(1),
        width: (quit_hint.len() as u16).min(area.width),
        height: 1,
    };
    let quit_widget =
        Paragraph::new(quit_hint).style(Style::default().bg(Color::DarkGray).fg(Color::Gray));
    frame.render_widget(quit_widget, quit_area);
}

/// Keyboard hints for whatever has focus
fn get_field_hints(kind: Option<FieldKind>, submit_focused: bool) -> String {
    if submit_focused {
        return "Enter:submit  Tab:next  F1/F2:form".to_string();
    }
    match kind {
        Some(FieldKind::SingleSelect) => {
            format!("←/→:choose  Tab:next  {SUBMIT_SHORTCUT}:submit  F1/F2:form")
        }
        Some(FieldKind::MultilineText) => {
            format!("Enter:newline  Tab:next  {SUBMIT_SHORTCUT}:submit  F1/F2:form")
        }
        _ => format!("Tab/Enter:next  {SUBMIT_SHORTCUT}:submit  F1/F2:form"),
    }
}
