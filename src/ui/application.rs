//! Main terminal application and its event loop.
//!
//! `BackTuneApplication` owns the navigator and the per-screen input state,
//! routes key presses to the view-model and redraws whenever the view-model
//! broadcasts a change.

use std::{io::stdout, mem::drop, sync::Arc, time::Duration};

use {
    crossterm::{
        event::{
            self, DisableBracketedPaste, EnableBracketedPaste, Event, KeyCode, KeyEvent,
            KeyEventKind, KeyModifiers,
        },
        execute,
    },
    ratatui::{DefaultTerminal, Frame},
    tokio::sync::broadcast::{Receiver, error::TryRecvError},
    tracing::{debug, info, warn},
};

use crate::{
    audio::{AudioEngine, SoundPlayer},
    config::{NotificationPermission, SettingsManager},
    error::{ErrorReporter, ResultExt, UiError},
    navigation::{Navigator, Screen},
    state::{PlayerState, PlayerStateEvent, SharedIntentState},
    ui::screens::{
        HomeScreenState, PlayerView, home, permission, player, sound_selection,
    },
    video::{VideoId, VideoLauncher},
};

/// How long the loop waits for input before checking for state changes.
const POLL_INTERVAL: Duration = Duration::from_millis(16);

/// Volume change per key press.
const VOLUME_STEP: f32 = 0.05;

/// Terminal application driving the three screens.
pub struct BackTuneApplication<P: SoundPlayer + 'static = AudioEngine> {
    /// Player view-model.
    player_state: PlayerState<P>,
    /// Change notifications from the view-model.
    state_rx: Receiver<PlayerStateEvent>,
    /// Video handed over on the command line.
    shared_intent: Arc<SharedIntentState>,
    /// User settings, for the permission answer and browser preference.
    settings: Arc<SettingsManager>,
    /// Opens videos outside the terminal.
    launcher: Arc<dyn VideoLauncher>,
    /// Back stack of screens.
    navigator: Navigator,
    /// URL field of the home screen.
    home: HomeScreenState,
    /// Cursor row in the sound list.
    sound_cursor: usize,
    /// Whether the next loop iteration must redraw.
    needs_redraw: bool,
    /// Whether the loop should exit.
    should_quit: bool,
}

impl<P: SoundPlayer + 'static> BackTuneApplication<P> {
    /// Creates the application on the home screen.
    ///
    /// # Arguments
    ///
    /// * `player_state` - View-model for the player screen.
    /// * `shared_intent` - Pending video handed over from outside.
    /// * `settings` - User settings.
    /// * `launcher` - Opens videos in the browser.
    pub fn new(
        player_state: PlayerState<P>,
        shared_intent: Arc<SharedIntentState>,
        settings: Arc<SettingsManager>,
        launcher: Arc<dyn VideoLauncher>,
    ) -> Self {
        let state_rx = player_state.subscribe();
        Self {
            player_state,
            state_rx,
            shared_intent,
            settings,
            launcher,
            navigator: Navigator::new(),
            home: HomeScreenState::default(),
            sound_cursor: 0,
            needs_redraw: true,
            should_quit: false,
        }
    }

    /// Runs the event loop until the user quits.
    ///
    /// Must be called from within a tokio runtime; selecting a sound spawns
    /// a blocking task.
    ///
    /// # Errors
    ///
    /// Returns `UiError::TerminalError` if drawing or reading input fails.
    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> Result<(), UiError> {
        execute!(stdout(), EnableBracketedPaste)?;
        info!("Terminal UI started");

        let result = self.event_loop(terminal);

        if let Err(e) = execute!(stdout(), DisableBracketedPaste) {
            warn!("Failed to disable bracketed paste: {e}");
        }
        info!("Terminal UI stopped");
        result
    }

    fn event_loop(&mut self, terminal: &mut DefaultTerminal) -> Result<(), UiError> {
        while !self.should_quit {
            self.consume_shared_intent();
            self.drain_state_events();

            if self.needs_redraw {
                terminal.draw(|frame| self.render(frame))?;
                self.needs_redraw = false;
            }

            if event::poll(POLL_INTERVAL)? {
                self.handle_event(event::read()?);
            }
        }
        Ok(())
    }

    /// Gets the screen on top of the back stack.
    pub fn current_screen(&self) -> &Screen {
        self.navigator.current()
    }

    /// Gets the player view-model.
    pub fn player_state(&self) -> &PlayerState<P> {
        &self.player_state
    }

    /// Gets the home screen's input state.
    pub fn home(&self) -> &HomeScreenState {
        &self.home
    }

    /// Whether the user asked to quit.
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Whether the notification permission question is still open.
    pub fn is_permission_prompt_visible(&self) -> bool {
        self.settings.get_settings().notification_permission == NotificationPermission::NotAsked
    }

    /// Opens the player for a pending shared video, if any.
    pub fn consume_shared_intent(&mut self) {
        if self.navigator.consume_shared_intent(&self.shared_intent) {
            info!("Opening shared video");
            self.on_player_opened();
            self.needs_redraw = true;
        }
    }

    /// Marks the screen dirty for every view-model change.
    fn drain_state_events(&mut self) {
        loop {
            match self.state_rx.try_recv() {
                Ok(event) => {
                    debug!("Player state changed: {event:?}");
                    self.needs_redraw = true;
                }
                Err(TryRecvError::Lagged(skipped)) => {
                    debug!("Skipped {skipped} player state events");
                    self.needs_redraw = true;
                }
                Err(TryRecvError::Empty | TryRecvError::Closed) => break,
            }
        }
    }

    /// Dispatches one terminal event.
    pub fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key),
            Event::Paste(text) => {
                if *self.navigator.current() == Screen::Home && !self.is_permission_prompt_visible()
                {
                    self.home.push_str(&text);
                }
            }
            Event::Resize(..) => {}
            _ => return,
        }
        self.needs_redraw = true;
    }

    /// Handles one key press.
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        if self.is_permission_prompt_visible() {
            self.handle_permission_key(key.code);
            return;
        }

        match self.navigator.current() {
            Screen::Home => self.handle_home_key(key),
            Screen::Player { .. } => {
                if self.player_state.is_sound_selection_visible() {
                    self.handle_sheet_key(key.code);
                } else {
                    self.handle_player_key(key.code);
                }
            }
            Screen::SoundSelection => self.handle_sound_selection_key(key.code),
        }
    }

    fn handle_permission_key(&mut self, code: KeyCode) {
        let answer = match code {
            KeyCode::Char('y' | 'Y') => NotificationPermission::Granted,
            KeyCode::Char('n' | 'N') | KeyCode::Esc => NotificationPermission::Denied,
            _ => return,
        };
        info!("Notification permission answered: {answer:?}");
        let result = self
            .settings
            .set_notification_permission(answer)
            .add_context("Saving notification permission");
        ErrorReporter::swallow(result, "permission prompt");
    }

    fn handle_home_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.should_quit = true,
            KeyCode::Enter => {
                if let Some(video_id) = self.home.submit() {
                    self.open_player(video_id);
                }
            }
            KeyCode::Backspace => self.home.backspace(),
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.home.push_char(c);
            }
            _ => {}
        }
    }

    fn handle_player_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char(' ') => {
                if self.player_state.selected_sound().is_some() {
                    self.player_state.toggle_background_playback();
                }
            }
            KeyCode::Char('s') => {
                self.sound_cursor = self.selected_sound_index();
                self.player_state.show_sound_selection();
            }
            KeyCode::Char('f') => {
                self.sound_cursor = self.selected_sound_index();
                self.navigator.navigate(Screen::SoundSelection);
            }
            KeyCode::Left | KeyCode::Char('-') => self.step_volume(-VOLUME_STEP),
            KeyCode::Right | KeyCode::Char('+' | '=') => self.step_volume(VOLUME_STEP),
            KeyCode::Char('o') => self.open_current_video(),
            KeyCode::Esc | KeyCode::Backspace => {
                self.navigator.pop_back();
            }
            KeyCode::Char('q') => self.should_quit = true,
            _ => {}
        }
    }

    fn handle_sheet_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Up | KeyCode::Down => self.move_cursor(code),
            KeyCode::Enter => self.select_sound_at_cursor(),
            KeyCode::Esc | KeyCode::Char('s') => self.player_state.hide_sound_selection(),
            _ => {}
        }
    }

    fn handle_sound_selection_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Up | KeyCode::Down => self.move_cursor(code),
            KeyCode::Enter => self.select_sound_at_cursor(),
            KeyCode::Esc | KeyCode::Backspace => {
                self.navigator.pop_back();
            }
            KeyCode::Char('q') => self.should_quit = true,
            _ => {}
        }
    }

    fn move_cursor(&mut self, code: KeyCode) {
        let last = self.player_state.available_sounds().len().saturating_sub(1);
        self.sound_cursor = match code {
            KeyCode::Up => self.sound_cursor.saturating_sub(1),
            _ => (self.sound_cursor + 1).min(last),
        };
    }

    fn select_sound_at_cursor(&mut self) {
        if let Some(sound) = self.player_state.available_sounds().get(self.sound_cursor) {
            // Completion is observed through the state events
            drop(self.player_state.select_sound(sound.clone()));
        }
    }

    fn selected_sound_index(&self) -> usize {
        self.player_state
            .selected_sound()
            .and_then(|selected| {
                self.player_state
                    .available_sounds()
                    .iter()
                    .position(|sound| sound.id == selected.id)
            })
            .unwrap_or(0)
    }

    fn step_volume(&mut self, delta: f32) {
        if self.player_state.selected_sound().is_some() {
            self.player_state
                .update_volume(self.player_state.volume() + delta);
        }
    }

    fn open_player(&mut self, video_id: VideoId) {
        self.navigator.navigate(Screen::Player { video_id });
        self.on_player_opened();
    }

    fn on_player_opened(&mut self) {
        if self.settings.get_settings().open_video_in_browser {
            self.open_current_video();
        }
    }

    fn open_current_video(&self) {
        if let Screen::Player { video_id } = self.navigator.current() {
            ErrorReporter::swallow(self.launcher.open(video_id), "open video");
        }
    }

    /// Draws the current screen and the permission dialog on top.
    pub fn render(&self, frame: &mut Frame) {
        let area = frame.area();
        let sounds = self.player_state.available_sounds();

        match self.navigator.current() {
            Screen::Home => home::render(frame, area, &self.home),
            Screen::Player { video_id } => {
                let snapshot = self.player_state.snapshot();
                let view = PlayerView {
                    video_id,
                    snapshot: &snapshot,
                    sounds,
                    cursor: self.sound_cursor,
                };
                player::render(frame, area, &view);
            }
            Screen::SoundSelection => {
                let selected = self.player_state.selected_sound();
                sound_selection::render(
                    frame,
                    area,
                    sounds,
                    selected.as_ref().map(|sound| sound.id.as_str()),
                    self.sound_cursor,
                );
            }
        }

        if self.is_permission_prompt_visible() {
            permission::render(frame, area);
        }
    }
}
