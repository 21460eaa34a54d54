//! Route table for the three screens.

use std::fmt::{Display, Formatter, Result as FmtResult};

use crate::video::VideoId;

/// Route of the home screen.
pub const HOME_ROUTE: &str = "home";

/// Route pattern of the player screen.
pub const PLAYER_ROUTE: &str = "player/{videoId}";

/// Route of the full-screen sound selection.
pub const SOUND_SELECTION_ROUTE: &str = "sound_selection";

/// A navigation destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    /// URL entry.
    Home,
    /// Video plus background sound controls.
    Player {
        /// The video being watched.
        video_id: VideoId,
    },
    /// Full-screen sound list.
    SoundSelection,
}

impl Screen {
    /// Formats the concrete route string.
    pub fn route(&self) -> String {
        match self {
            Self::Home => HOME_ROUTE.to_string(),
            Self::Player { video_id } => format!("player/{}", encode_segment(video_id.as_str())),
            Self::SoundSelection => SOUND_SELECTION_ROUTE.to_string(),
        }
    }

    /// Parses a concrete route string.
    ///
    /// # Returns
    ///
    /// `None` for unknown routes and for player routes with an empty or
    /// unencoded id segment.
    pub fn from_route(route: &str) -> Option<Self> {
        match route {
            HOME_ROUTE => Some(Self::Home),
            SOUND_SELECTION_ROUTE => Some(Self::SoundSelection),
            _ => {
                let segment = route.strip_prefix("player/")?;
                if segment.contains('/') {
                    return None;
                }
                let video_id = VideoId::new(decode_segment(segment))?;
                Some(Self::Player { video_id })
            }
        }
    }
}

/// Escapes `%` and `/` so an id always fills exactly one route segment.
fn encode_segment(id: &str) -> String {
    id.replace('%', "%25").replace('/', "%2F")
}

/// Reverses `encode_segment`.
fn decode_segment(segment: &str) -> String {
    segment.replace("%2F", "/").replace("%25", "%")
}

impl Display for Screen {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(&self.route())
    }
}

#[cfg(test)]
mod tests {
    use crate::{navigation::screen::Screen, video::VideoId};

    #[test]
    fn test_routes_round_trip() {
        let screens = [
            Screen::Home,
            Screen::Player {
                video_id: VideoId::new("dQw4w9WgXcQ").unwrap(),
            },
            Screen::SoundSelection,
        ];
        for screen in screens {
            assert_eq!(Screen::from_route(&screen.route()), Some(screen));
        }
    }

    #[test]
    fn test_route_strings() {
        assert_eq!(Screen::Home.route(), "home");
        assert_eq!(Screen::SoundSelection.route(), "sound_selection");
        assert_eq!(
            Screen::Player {
                video_id: VideoId::new("abc").unwrap()
            }
            .route(),
            "player/abc"
        );
    }

    #[test]
    fn test_ids_with_separators_stay_one_segment() {
        for raw in ["abc123/", "abc/def", "x%2Fy", "100%"] {
            let screen = Screen::Player {
                video_id: VideoId::new(raw).unwrap(),
            };
            let route = screen.route();

            assert_eq!(route.matches('/').count(), 1, "{route}");
            assert_eq!(Screen::from_route(&route), Some(screen));
        }
        assert_eq!(
            Screen::Player {
                video_id: VideoId::new("abc123/").unwrap()
            }
            .route(),
            "player/abc123%2F"
        );
    }

    #[test]
    fn test_unknown_routes() {
        assert_eq!(Screen::from_route("settings"), None);
        assert_eq!(Screen::from_route("player/"), None);
        assert_eq!(Screen::from_route("player/a/b"), None);
    }
}
