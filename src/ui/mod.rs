//! Terminal rendering, one submodule per screen.

mod quiz;
mod subjects;

use ratatui::prelude::*;
use ratatui::widgets::Block;

use crate::app::{App, Screen};

/// Render the whole frame for the current screen.
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();
    frame.render_widget(Block::default().bg(Color::Reset), area);

    match app.screen {
        Screen::Subjects => subjects::render(frame, area, app),
        Screen::Quiz => quiz::render(frame, area, app),
    }
}
