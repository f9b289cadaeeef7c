//! UI module for rendering the TUI

mod components;
mod forms;
mod layout;

use crate::app::App;
use ratatui::Frame;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let main = layout::create_layout(area);

    layout::draw_header(frame, main.header, app);
    layout::draw_tabs(frame, main.tabs, app);
    forms::draw_form(
        frame,
        main.content,
        app.state.active_form(),
        app.config.business_phone(),
    );

    // Draw status bar
    layout::draw_status_bar(frame, app);
}
