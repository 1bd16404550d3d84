//! UI module for rendering the TUI

mod field_renderer;
mod form;
mod layout;
mod summary;

use crate::app::App;
use crate::state::View;
use ratatui::Frame;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let content_area = layout::create_layout(frame.area());

    form::draw(frame, content_area, app);
    layout::draw_status_bar(frame, app);

    // The summary dialog overlays the form
    if app.state.current_view == View::Summary {
        summary::draw(frame, app);
    }
}
