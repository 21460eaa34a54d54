//! Holds a video handed to the application from outside until it is shown.

use {parking_lot::RwLock, tracing::debug};

use crate::video::VideoId;

/// One optional pending video identifier, consumed once.
#[derive(Debug, Default)]
pub struct SharedIntentState {
    shared_video_id: RwLock<Option<VideoId>>,
}

impl SharedIntentState {
    /// Creates an empty intent state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `video_id` as pending, replacing any earlier one.
    pub fn set_shared_video_id(&self, video_id: VideoId) {
        debug!("Shared video pending: {video_id}");
        *self.shared_video_id.write() = Some(video_id);
    }

    /// Gets the pending identifier without consuming it.
    pub fn shared_video_id(&self) -> Option<VideoId> {
        self.shared_video_id.read().clone()
    }

    /// Takes the pending identifier, leaving nothing behind.
    pub fn take_shared_video_id(&self) -> Option<VideoId> {
        self.shared_video_id.write().take()
    }

    /// Drops the pending identifier.
    pub fn clear_shared_video_id(&self) {
        *self.shared_video_id.write() = None;
    }
}

#[cfg(test)]
mod tests {
    use crate::{state::shared_intent::SharedIntentState, video::VideoId};

    #[test]
    fn test_take_consumes_once() {
        let intent = SharedIntentState::new();
        intent.set_shared_video_id(VideoId::new("abc").unwrap());

        assert_eq!(intent.shared_video_id(), VideoId::new("abc"));
        assert_eq!(intent.take_shared_video_id(), VideoId::new("abc"));
        assert_eq!(intent.take_shared_video_id(), None);
    }

    #[test]
    fn test_set_replaces_and_clear_drops() {
        let intent = SharedIntentState::new();
        intent.set_shared_video_id(VideoId::new("first").unwrap());
        intent.set_shared_video_id(VideoId::new("second").unwrap());
        assert_eq!(intent.shared_video_id(), VideoId::new("second"));

        intent.clear_shared_video_id();
        assert_eq!(intent.shared_video_id(), None);
    }
}
