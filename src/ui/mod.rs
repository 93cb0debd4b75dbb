mod grid;
mod help;
mod overlay;

use crate::app::{App, PlayerState};
use ratatui::Frame;

/// Top-level render dispatch.
pub fn render(app: &App, frame: &mut Frame) {
    grid::render(app, frame);

    // At most one overlay: the selection is exclusive
    if let PlayerState::Open { .. } = app.player {
        overlay::render(app, frame);
    }

    // Render help popup on top if active
    if app.show_help {
        help::render(frame);
    }
}
