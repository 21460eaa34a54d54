//! Sound list, shown full screen or inside the player's bottom sheet.

use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    text::Line,
    widgets::{List, ListItem, ListState},
};

use crate::{
    model::AmbientSound,
    ui::{components, theme},
};

pub const SOUND_SELECTION_TITLE: &str = "Choose a background sound";

/// Draws `sounds` into `area` inside `block`.
///
/// The selected sound is highlighted; the cursor row carries a marker.
pub fn render_list(
    frame: &mut Frame,
    area: Rect,
    sounds: &[AmbientSound],
    selected_id: Option<&str>,
    cursor: usize,
) {
    let items: Vec<ListItem> = sounds
        .iter()
        .map(|sound| {
            let line = Line::from(format!("  {}", sound.name));
            if Some(sound.id.as_str()) == selected_id {
                ListItem::new(line).style(theme::highlight())
            } else {
                ListItem::new(line)
            }
        })
        .collect();

    let list = List::new(items)
        .block(components::card(SOUND_SELECTION_TITLE))
        .highlight_symbol("> ");
    let mut list_state = ListState::default().with_selected(Some(cursor));
    frame.render_stateful_widget(list, area, &mut list_state);
}

/// Draws the full-screen sound selection route.
pub fn render(
    frame: &mut Frame,
    area: Rect,
    sounds: &[AmbientSound],
    selected_id: Option<&str>,
    cursor: usize,
) {
    let [list, help] = Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(area);
    render_list(frame, list, sounds, selected_id, cursor);
    frame.render_widget(
        components::help_bar("[Up/Down] Move  [Enter] Select  [Esc] Back"),
        help,
    );
}
