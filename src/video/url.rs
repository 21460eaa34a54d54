//! YouTube URL validation and video identifier extraction.

use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    sync::LazyLock,
};

use regex::Regex;

/// Accepted shared-link shape: optional scheme and `www.`, a YouTube host, any path.
const YOUTUBE_URL_PATTERN: &str = r"^(https?://)?(www\.)?(youtube\.com|youtu\.be)/.+$";

/// The identifier follows the first of these markers and ends at `#`, `&`, `?` or a newline.
const VIDEO_ID_PATTERN: &str = concat!(
    r"(?:watch\?v=|/videos/|embed/|youtu\.be/|/v/|/e/|watch\?v%3D|",
    r"watch\?feature=player_embedded&v=|%2Fvideos%2F|embed%2F|youtu\.be%2F|%2Fv%2F)",
    r"([^#&?\n]*)"
);

static YOUTUBE_URL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(YOUTUBE_URL_PATTERN).expect("YouTube URL pattern is valid"));

static VIDEO_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(VIDEO_ID_PATTERN).expect("video id pattern is valid"));

/// A YouTube video identifier: the text captured after the marker. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VideoId(String);

impl VideoId {
    /// Wraps a raw identifier, rejecting only the empty string.
    pub fn new(id: impl Into<String>) -> Option<Self> {
        let id = id.into();
        if id.is_empty() { None } else { Some(Self(id)) }
    }

    /// Gets the raw identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Gets the canonical watch page URL.
    pub fn watch_url(&self) -> String {
        format!("https://www.youtube.com/watch?v={}", self.0)
    }
}

impl Display for VideoId {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(&self.0)
    }
}

/// Checks that `url` looks like a YouTube link and is not a Shorts link.
#[must_use]
pub fn is_valid_youtube_url(url: &str) -> bool {
    YOUTUBE_URL.is_match(url) && !url.contains("/shorts/")
}

/// Extracts the video identifier from a YouTube URL.
///
/// # Returns
///
/// The text captured after the first identifier marker, or `None` when no
/// marker is present or the captured text is empty.
#[must_use]
pub fn extract_video_id(url: &str) -> Option<VideoId> {
    let captures = VIDEO_ID.captures(url)?;
    VideoId::new(captures.get(1)?.as_str())
}

/// Validates and extracts in one step, as both entry points do.
///
/// Surrounding whitespace is trimmed first, so a shared link ending in a
/// newline is still accepted.
///
/// # Returns
///
/// The identifier when `url` passes validation and carries one.
#[must_use]
pub fn parse_video_url(url: &str) -> Option<VideoId> {
    let url = url.trim();
    if !is_valid_youtube_url(url) {
        return None;
    }
    extract_video_id(url)
}
