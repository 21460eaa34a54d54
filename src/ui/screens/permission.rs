//! First-launch question about reminder notifications.

use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    text::Line,
    widgets::{Clear, Paragraph, Wrap},
};

use crate::ui::{components, theme};

pub const PERMISSION_TITLE: &str = "Relaxation reminders";
pub const PERMISSION_QUESTION: &str =
    "BackTune can remind you to take a relaxing break every few hours. Allow notifications?";

/// Draws the permission dialog over whatever is on screen.
pub fn render(frame: &mut Frame, area: Rect) {
    let dialog = components::centered_rect(60, 8, area);
    frame.render_widget(Clear, dialog);

    let lines = vec![
        Line::from(PERMISSION_QUESTION),
        Line::from(""),
        Line::styled("[y] Allow   [n] Don't allow", theme::title()),
    ];
    frame.render_widget(
        Paragraph::new(lines)
            .block(components::card(PERMISSION_TITLE))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        dialog,
    );
}
