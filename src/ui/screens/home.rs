//! URL entry screen.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::{
    ui::{components, theme},
    video::{VideoId, parse_video_url},
};

pub const SUBTITLE: &str = "Watch YouTube with your own background sound";
pub const URL_HINT: &str = "Paste a YouTube URL";
pub const INVALID_URL: &str = "Invalid YouTube URL";
pub const PLAY_BUTTON: &str = "Play";

/// Text field contents and validation flag of the home screen.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct HomeScreenState {
    url: String,
    show_error: bool,
}

impl HomeScreenState {
    /// Gets the typed URL.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Whether the inline invalid-URL message is shown.
    pub fn show_error(&self) -> bool {
        self.show_error
    }

    /// Appends a typed character. Editing hides the error.
    pub fn push_char(&mut self, c: char) {
        self.url.push(c);
        self.show_error = false;
    }

    /// Appends pasted text without line breaks. Editing hides the error.
    pub fn push_str(&mut self, text: &str) {
        self.url.extend(text.chars().filter(|c| !matches!(c, '\n' | '\r')));
        self.show_error = false;
    }

    /// Deletes the last character. Editing hides the error.
    pub fn backspace(&mut self) {
        self.url.pop();
        self.show_error = false;
    }

    /// Validates the typed URL.
    ///
    /// # Returns
    ///
    /// The video to open, or `None` after turning the inline error on.
    pub fn submit(&mut self) -> Option<VideoId> {
        let video_id = parse_video_url(&self.url);
        self.show_error = video_id.is_none();
        video_id
    }
}

/// Draws the home screen.
pub fn render(frame: &mut Frame, area: Rect, state: &HomeScreenState) {
    let [title, subtitle, _, field, error, _, button, _, help] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(3),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(area);

    frame.render_widget(
        Paragraph::new(Line::styled("BackTune", theme::title())).alignment(Alignment::Center),
        title,
    );
    frame.render_widget(
        Paragraph::new(Line::styled(SUBTITLE, theme::muted())).alignment(Alignment::Center),
        subtitle,
    );

    let input = if state.url.is_empty() {
        Line::styled(URL_HINT, theme::muted())
    } else {
        Line::from(vec![Span::raw(state.url.as_str()), Span::styled("_", theme::muted())])
    };
    let mut field_block = components::card("YouTube URL");
    if state.show_error {
        field_block = field_block.border_style(theme::error());
    }
    frame.render_widget(Paragraph::new(input).block(field_block), field);

    if state.show_error {
        frame.render_widget(
            Paragraph::new(Line::styled(INVALID_URL, theme::error())),
            error,
        );
    }

    frame.render_widget(
        components::primary_button(PLAY_BUTTON, "Enter", !state.url.trim().is_empty()),
        button,
    );
    frame.render_widget(components::help_bar("[Enter] Play  [Esc] Quit"), help);
}

#[cfg(test)]
mod tests {
    use ratatui::{Terminal, backend::TestBackend};

    use crate::ui::{
        screens::home::{HomeScreenState, INVALID_URL, URL_HINT, render},
        tests::buffer_text,
    };

    #[test]
    fn test_submit_valid_url() {
        let mut state = HomeScreenState::default();
        state.push_str("https://youtu.be/abc123\n");

        let video_id = state.submit();

        assert_eq!(video_id.map(|id| id.to_string()), Some("abc123".to_string()));
        assert!(!state.show_error());
    }

    #[test]
    fn test_invalid_url_shows_error_until_edit() {
        let mut state = HomeScreenState::default();
        state.push_str("https://vimeo.com/123");

        assert_eq!(state.submit(), None);
        assert!(state.show_error());

        state.backspace();
        assert!(!state.show_error());

        assert_eq!(state.submit(), None);
        state.push_char('4');
        assert!(!state.show_error());
    }

    #[test]
    fn test_render_hint_and_error() {
        let mut terminal = Terminal::new(TestBackend::new(60, 16)).unwrap();
        let mut state = HomeScreenState::default();

        terminal
            .draw(|frame| render(frame, frame.area(), &state))
            .unwrap();
        let text = buffer_text(terminal.backend().buffer());
        assert!(text.contains(URL_HINT));
        assert!(!text.contains(INVALID_URL));

        state.push_str("not a url");
        state.submit();
        terminal
            .draw(|frame| render(frame, frame.area(), &state))
            .unwrap();
        let text = buffer_text(terminal.backend().buffer());
        assert!(text.contains("not a url"));
        assert!(text.contains(INVALID_URL));
    }
}
