//! Whole-form rendering: banner, visible fields and submit button

use super::field_renderer::{draw_field, field_height};
use crate::state::{FormEngine, SubmissionStatus};
use crate::ui::components::{button_width, render_banner, render_button, BANNER_HEIGHT, BUTTON_HEIGHT};
use chrono::{DateTime, Local, Utc};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::{Block, Borders},
    Frame,
};
use std::ops::Range;

/// Banner title, message and colour for a submission status
pub fn banner_text(
    status: SubmissionStatus,
    business_phone: &str,
    sent_at: Option<DateTime<Utc>>,
) -> Option<(&'static str, String, Color)> {
    match status {
        SubmissionStatus::Success => {
            let mut message = "Thank you! Your message has been sent successfully. \
                               We'll get back to you soon."
                .to_string();
            if let Some(at) = sent_at {
                let local: DateTime<Local> = at.into();
                message.push_str(&format!(" (sent {})", local.format("%H:%M")));
            }
            Some(("✅ Sent", message, Color::Green))
        }
        SubmissionStatus::Error => Some((
            "❌ Not sent",
            format!(
                "Sorry, there was an error sending your message. \
                 Please try again or call us directly at {business_phone}."
            ),
            Color::Red,
        )),
        SubmissionStatus::None | SubmissionStatus::Submitting => None,
    }
}

/// Fields that fit in `available` rows while keeping `active` on screen
pub fn visible_range(heights: &[u16], active: usize, available: u16) -> Range<usize> {
    if heights.is_empty() {
        return 0..0;
    }
    let active = active.min(heights.len() - 1);

    let mut start = 0;
    while start < active && heights[start..=active].iter().sum::<u16>() > available {
        start += 1;
    }

    let mut end = start;
    let mut used = 0u16;
    while end < heights.len() && used + heights[end] <= available {
        used += heights[end];
        end += 1;
    }

    start..end
}

/// Draw a form into `area`
pub fn draw_form(frame: &mut Frame, area: Rect, form: &FormEngine, business_phone: &str) {
    let block = Block::default()
        .title(format!(" {} ", form.title()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let banner = banner_text(form.status(), business_phone, form.last_success_at());
    let banner_height = if banner.is_some() { BANNER_HEIGHT } else { 0 };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(banner_height), // Banner
            Constraint::Min(0),                // Fields
            Constraint::Length(BUTTON_HEIGHT), // Submit
        ])
        .horizontal_margin(1)
        .split(inner);

    if let Some((title, message, color)) = banner {
        render_banner(frame, chunks[0], title, &message, color);
    }

    let fields = form.fields();
    let heights: Vec<u16> = fields.iter().map(field_height).collect();
    let range = visible_range(&heights, form.active_field_index, chunks[1].height);

    let mut y = chunks[1].y;
    for idx in range {
        let field = &fields[idx];
        let field_area = Rect {
            y,
            height: heights[idx],
            ..chunks[1]
        };
        draw_field(
            frame,
            field_area,
            field,
            form.value(&field.name),
            form.error(&field.name),
            form.active_field_index == idx,
        );
        y += heights[idx];
    }

    let label = form.submit_label();
    let button_area = Rect {
        width: button_width(label).min(chunks[2].width),
        ..chunks[2]
    };
    render_button(
        frame,
        button_area,
        label,
        form.is_submit_focused(),
        !form.is_submitting(),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    mod visible_range_fn {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_everything_fits() {
            assert_eq!(visible_range(&[4, 4, 7], 0, 20), 0..3);
        }

        #[test]
        fn test_scrolls_to_keep_active_visible() {
            let heights = [4, 4, 4, 4, 7];
            assert_eq!(visible_range(&heights, 0, 10), 0..2);
            assert_eq!(visible_range(&heights, 3, 10), 2..4);
            assert_eq!(visible_range(&heights, 4, 10), 4..5);
        }

        #[test]
        fn test_submit_focus_shows_tail() {
            let heights = [4, 4, 4];
            assert_eq!(visible_range(&heights, 3, 8), 1..3);
        }

        #[test]
        fn test_empty() {
            assert_eq!(visible_range(&[], 0, 10), 0..0);
        }
    }

    mod banner {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_no_banner_while_idle_or_sending() {
            assert!(banner_text(SubmissionStatus::None, "x", None).is_none());
            assert!(banner_text(SubmissionStatus::Submitting, "x", None).is_none());
        }

        #[test]
        fn test_error_banner_mentions_phone() {
            let (_, message, color) =
                banner_text(SubmissionStatus::Error, "(904) 570-0910", None).unwrap();
            assert!(message.contains("(904) 570-0910"));
            assert_eq!(color, Color::Red);
        }

        #[test]
        fn test_success_banner() {
            let (_, message, color) =
                banner_text(SubmissionStatus::Success, "x", Some(Utc::now())).unwrap();
            assert!(message.starts_with("Thank you!"));
            assert!(message.contains("(sent "));
            assert_eq!(color, Color::Green);
        }
    }
}
