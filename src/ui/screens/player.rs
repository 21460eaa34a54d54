//! Video and background sound controls.

use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    text::Line,
    widgets::{Clear, Gauge, Paragraph},
};

use crate::{
    model::AmbientSound,
    state::PlayerSnapshot,
    ui::{components, screens::sound_selection, theme},
    video::VideoId,
};

pub const BACKGROUND_SOUND: &str = "Background sound";
pub const SELECT_SOUND: &str = "Select sound";
pub const PLAY_BACKGROUND: &str = "Play background";
pub const PAUSE_BACKGROUND: &str = "Pause background";

/// Everything the player screen is drawn from.
pub struct PlayerView<'a> {
    /// The video being watched.
    pub video_id: &'a VideoId,
    /// Current view-model flags.
    pub snapshot: &'a PlayerSnapshot,
    /// Sounds offered in the bottom sheet.
    pub sounds: &'a [AmbientSound],
    /// Cursor row in the bottom sheet.
    pub cursor: usize,
}

/// Draws the player screen and, when visible, the sound selection sheet.
pub fn render(frame: &mut Frame, area: Rect, view: &PlayerView<'_>) {
    let [video, sound_card, _, help] = Layout::vertical([
        Constraint::Length(5),
        Constraint::Length(6),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(area);

    render_video(frame, video, view.video_id);
    render_sound_card(frame, sound_card, view.snapshot);

    let help_text = if view.snapshot.selected_sound.is_some() {
        "[Space] Play/Pause  [Left/Right] Volume  [s] Select sound  [o] Open video  [Esc] Back"
    } else {
        "[s] Select sound  [o] Open video  [Esc] Back"
    };
    frame.render_widget(components::help_bar(help_text), help);

    if view.snapshot.is_sound_selection_visible {
        let height = u16::try_from(view.sounds.len()).unwrap_or(u16::MAX).saturating_add(2);
        let sheet = components::bottom_sheet_rect(height, area);
        frame.render_widget(Clear, sheet);
        sound_selection::render_list(
            frame,
            sheet,
            view.sounds,
            view.snapshot
                .selected_sound
                .as_ref()
                .map(|sound| sound.id.as_str()),
            view.cursor,
        );
    }
}

fn render_video(frame: &mut Frame, area: Rect, video_id: &VideoId) {
    let lines = vec![
        Line::from(format!("Video: {video_id}")),
        Line::styled(video_id.watch_url(), theme::muted()),
    ];
    frame.render_widget(
        Paragraph::new(lines).block(components::card("Now watching")),
        area,
    );
}

fn render_sound_card(frame: &mut Frame, area: Rect, snapshot: &PlayerSnapshot) {
    let block = components::card(BACKGROUND_SOUND);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [buttons, name, volume] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(inner);

    let Some(sound) = snapshot.selected_sound.as_ref() else {
        frame.render_widget(components::primary_button(SELECT_SOUND, "s", true), buttons);
        return;
    };

    let [toggle, select] =
        Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)]).areas(buttons);
    let toggle_label = if snapshot.is_background_playing {
        PAUSE_BACKGROUND
    } else {
        PLAY_BACKGROUND
    };
    frame.render_widget(components::primary_button(toggle_label, "Space", true), toggle);
    frame.render_widget(components::primary_button(SELECT_SOUND, "s", true), select);

    frame.render_widget(
        Paragraph::new(Line::styled(sound.name.as_str(), theme::muted())),
        name,
    );

    let ratio = f64::from(snapshot.volume).clamp(0.0, 1.0);
    frame.render_widget(
        Gauge::default()
            .gauge_style(theme::accent())
            .ratio(ratio)
            .label(format!("Volume {:.0}%", ratio * 100.0)),
        volume,
    );
}
