//! Rendering helpers and end-to-end tests of the key handling.

use ratatui::buffer::Buffer;

/// Joins every row of `buffer` into one newline-separated string.
pub(crate) fn buffer_text(buffer: &Buffer) -> String {
    let area = buffer.area;
    (area.top()..area.bottom())
        .map(|y| {
            (area.left()..area.right())
                .map(|x| buffer[(x, y)].symbol())
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Finds the first row of `buffer` containing `needle`.
pub(crate) fn row_containing(buffer: &Buffer, needle: &str) -> Option<u16> {
    let area = buffer.area;
    (area.top()..area.bottom()).find(|&y| {
        (area.left()..area.right())
            .map(|x| buffer[(x, y)].symbol())
            .collect::<String>()
            .contains(needle)
    })
}

mod application_tests {
    use std::{
        fs::{create_dir_all, write},
        sync::Arc,
        time::Duration,
    };

    use {
        anyhow::{Result, bail},
        crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers},
        parking_lot::Mutex,
        ratatui::{Terminal, backend::TestBackend},
        serde_json::to_string_pretty,
        tempfile::{TempDir, tempdir},
        tokio::time::sleep,
    };

    use crate::{
        config::{NotificationPermission, SettingsManager, UserSettings},
        navigation::Screen,
        service::{BackgroundSoundService, SoundLibrary, testing::FakePlayer},
        state::{PlayerState, SharedIntentState},
        ui::{
            application::BackTuneApplication,
            screens::{home::INVALID_URL, permission::PERMISSION_TITLE},
            tests::buffer_text,
        },
        video::{VideoId, VideoLauncher},
    };

    /// Launcher that records opened videos and can be told to fail.
    #[derive(Default)]
    struct RecordingLauncher {
        opened: Mutex<Vec<String>>,
        fail: bool,
    }

    impl VideoLauncher for RecordingLauncher {
        fn open(&self, video: &VideoId) -> Result<()> {
            self.opened.lock().push(video.to_string());
            if self.fail {
                bail!("no browser");
            }
            Ok(())
        }
    }

    struct Fixture {
        _dir: TempDir,
        app: BackTuneApplication<FakePlayer>,
        launcher: Arc<RecordingLauncher>,
        intent: Arc<SharedIntentState>,
        settings: Arc<SettingsManager>,
    }

    fn fixture(permission: NotificationPermission, open_in_browser: bool) -> Fixture {
        fixture_with_launcher(permission, open_in_browser, RecordingLauncher::default())
    }

    fn fixture_with_launcher(
        permission: NotificationPermission,
        open_in_browser: bool,
        launcher: RecordingLauncher,
    ) -> Fixture {
        let dir = tempdir().unwrap();
        let sounds = dir.path().join("sounds");
        create_dir_all(&sounds).unwrap();
        for name in ["rain", "waves", "forest"] {
            write(sounds.join(format!("{name}.wav")), b"x").unwrap();
        }

        let config_path = dir.path().join("settings.json");
        let saved = UserSettings {
            notification_permission: permission,
            open_video_in_browser: open_in_browser,
            ..UserSettings::default()
        };
        write(&config_path, to_string_pretty(&saved).unwrap()).unwrap();
        let settings = Arc::new(SettingsManager::with_config_path(config_path).unwrap());

        let (player, _calls) = FakePlayer::new();
        let state = PlayerState::new(BackgroundSoundService::new(
            player,
            SoundLibrary::new(&sounds),
        ));
        let launcher = Arc::new(launcher);
        let intent = Arc::new(SharedIntentState::new());
        let app = BackTuneApplication::new(
            state,
            Arc::clone(&intent),
            Arc::clone(&settings),
            launcher.clone(),
        );

        Fixture {
            _dir: dir,
            app,
            launcher,
            intent,
            settings,
        }
    }

    fn press(app: &mut BackTuneApplication<FakePlayer>, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn type_text(app: &mut BackTuneApplication<FakePlayer>, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    fn draw(app: &BackTuneApplication<FakePlayer>) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 24)).unwrap();
        terminal.draw(|frame| app.render(frame)).unwrap();
        buffer_text(terminal.backend().buffer())
    }

    async fn wait_until_playing(app: &BackTuneApplication<FakePlayer>) {
        for _ in 0..100 {
            if app.player_state().is_background_playing() {
                return;
            }
            sleep(Duration::from_millis(10)).await;
        }
        panic!("sound selection did not complete");
    }

    #[test]
    fn test_valid_url_opens_player_and_browser() {
        let mut f = fixture(NotificationPermission::Denied, true);

        type_text(&mut f.app, "https://www.youtube.com/watch?v=abc123");
        press(&mut f.app, KeyCode::Enter);

        assert_eq!(
            f.app.current_screen(),
            &Screen::Player {
                video_id: VideoId::new("abc123").unwrap()
            }
        );
        assert_eq!(f.launcher.opened.lock().as_slice(), ["abc123".to_string()]);
    }

    #[test]
    fn test_browser_preference_is_honored() {
        let mut f = fixture(NotificationPermission::Denied, false);

        type_text(&mut f.app, "https://youtu.be/abc123");
        press(&mut f.app, KeyCode::Enter);
        assert!(f.launcher.opened.lock().is_empty());

        press(&mut f.app, KeyCode::Char('o'));
        assert_eq!(f.launcher.opened.lock().len(), 1);
    }

    #[test]
    fn test_launcher_failure_is_ignored() {
        let mut f = fixture_with_launcher(
            NotificationPermission::Denied,
            true,
            RecordingLauncher {
                fail: true,
                ..RecordingLauncher::default()
            },
        );

        type_text(&mut f.app, "https://youtu.be/abc123");
        press(&mut f.app, KeyCode::Enter);

        assert!(matches!(f.app.current_screen(), Screen::Player { .. }));
    }

    #[test]
    fn test_invalid_url_stays_home_with_error() {
        let mut f = fixture(NotificationPermission::Denied, true);

        type_text(&mut f.app, "https://www.youtube.com/shorts/abc");
        press(&mut f.app, KeyCode::Enter);

        assert_eq!(f.app.current_screen(), &Screen::Home);
        assert!(f.app.home().show_error());
        assert!(draw(&f.app).contains(INVALID_URL));
        assert!(f.launcher.opened.lock().is_empty());
    }

    #[test]
    fn test_paste_fills_url_field() {
        let mut f = fixture(NotificationPermission::Denied, false);

        f.app
            .handle_event(Event::Paste("https://youtu.be/xyz\n".to_string()));

        assert_eq!(f.app.home().url(), "https://youtu.be/xyz");
    }

    #[test]
    fn test_shared_intent_opens_player_once() {
        let mut f = fixture(NotificationPermission::Denied, true);
        f.intent
            .set_shared_video_id(VideoId::new("shared1").unwrap());

        f.app.consume_shared_intent();
        f.app.consume_shared_intent();

        assert_eq!(
            f.app.current_screen(),
            &Screen::Player {
                video_id: VideoId::new("shared1").unwrap()
            }
        );
        assert_eq!(f.launcher.opened.lock().len(), 1);
        assert_eq!(f.intent.shared_video_id(), None);

        press(&mut f.app, KeyCode::Esc);
        assert_eq!(f.app.current_screen(), &Screen::Home);
    }

    #[test]
    fn test_permission_prompt_saves_answer() {
        let mut f = fixture(NotificationPermission::NotAsked, false);
        assert!(f.app.is_permission_prompt_visible());
        assert!(draw(&f.app).contains(PERMISSION_TITLE));

        // Typing is captured by the prompt
        press(&mut f.app, KeyCode::Char('x'));
        assert_eq!(f.app.home().url(), "");

        press(&mut f.app, KeyCode::Char('y'));

        assert!(!f.app.is_permission_prompt_visible());
        assert_eq!(
            f.settings.get_settings().notification_permission,
            NotificationPermission::Granted
        );
        let reloaded = SettingsManager::with_config_path(f.settings.get_config_path().clone())
            .unwrap();
        assert!(reloaded.get_settings().notification_permission.is_granted());
    }

    #[tokio::test]
    async fn test_sheet_selection_plays_and_toggles() {
        let mut f = fixture(NotificationPermission::Denied, false);
        type_text(&mut f.app, "https://youtu.be/abc123");
        press(&mut f.app, KeyCode::Enter);

        // Toggle is inert until a sound is chosen
        press(&mut f.app, KeyCode::Char(' '));
        assert!(!f.app.player_state().is_background_playing());

        press(&mut f.app, KeyCode::Char('s'));
        assert!(f.app.player_state().is_sound_selection_visible());
        press(&mut f.app, KeyCode::Down);
        press(&mut f.app, KeyCode::Enter);
        wait_until_playing(&f.app).await;

        let state = f.app.player_state();
        assert_eq!(
            state.selected_sound().map(|sound| sound.id),
            Some("waves".to_string())
        );
        assert!(!state.is_sound_selection_visible());

        press(&mut f.app, KeyCode::Char(' '));
        assert!(!f.app.player_state().is_background_playing());
        press(&mut f.app, KeyCode::Char(' '));
        assert!(f.app.player_state().is_background_playing());

        press(&mut f.app, KeyCode::Right);
        assert!((f.app.player_state().volume() - 0.55).abs() < 1e-6);
    }

    #[tokio::test]
    async fn test_full_screen_selection_route() {
        let mut f = fixture(NotificationPermission::Denied, false);
        type_text(&mut f.app, "https://youtu.be/abc123");
        press(&mut f.app, KeyCode::Enter);

        press(&mut f.app, KeyCode::Char('f'));
        assert_eq!(f.app.current_screen(), &Screen::SoundSelection);

        press(&mut f.app, KeyCode::Down);
        press(&mut f.app, KeyCode::Down);
        press(&mut f.app, KeyCode::Down);
        press(&mut f.app, KeyCode::Enter);
        wait_until_playing(&f.app).await;

        assert_eq!(
            f.app.player_state().selected_sound().map(|sound| sound.id),
            Some("forest".to_string())
        );

        press(&mut f.app, KeyCode::Esc);
        assert!(matches!(f.app.current_screen(), Screen::Player { .. }));
    }

    #[test]
    fn test_escape_on_home_quits() {
        let mut f = fixture(NotificationPermission::Denied, false);
        press(&mut f.app, KeyCode::Esc);
        assert!(f.app.should_quit());
    }

    #[test]
    fn test_ctrl_c_quits_anywhere() {
        let mut f = fixture(NotificationPermission::NotAsked, false);
        f.app
            .handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(f.app.should_quit());
    }
}
