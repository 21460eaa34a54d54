//! Video links: identifier parsing and browser hand-off.

pub mod launcher;
pub mod url;

pub use {
    launcher::{BrowserLauncher, VideoLauncher},
    url::{VideoId, extract_video_id, is_valid_youtube_url, parse_video_url},
};
