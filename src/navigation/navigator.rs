//! Back stack over the route table.

use tracing::debug;

use crate::{navigation::screen::Screen, state::SharedIntentState};

/// Back stack rooted at the home screen.
#[derive(Debug)]
pub struct Navigator {
    stack: Vec<Screen>,
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new()
    }
}

impl Navigator {
    /// Creates a navigator showing the home screen.
    pub fn new() -> Self {
        Self {
            stack: vec![Screen::Home],
        }
    }

    /// Gets the screen on top of the stack.
    pub fn current(&self) -> &Screen {
        // The root is never popped
        &self.stack[self.stack.len() - 1]
    }

    /// Gets the number of entries on the stack.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Pushes `screen` on top of the stack.
    pub fn navigate(&mut self, screen: Screen) {
        debug!("Navigating to {screen}");
        self.stack.push(screen);
    }

    /// Pops the top screen.
    ///
    /// # Returns
    ///
    /// `false` when already at the root, which stays in place.
    pub fn pop_back(&mut self) -> bool {
        if self.stack.len() <= 1 {
            return false;
        }
        if let Some(screen) = self.stack.pop() {
            debug!("Leaving {screen}");
        }
        true
    }

    /// Opens the player for a pending shared video and clears it.
    ///
    /// # Returns
    ///
    /// `true` if a pending video was consumed.
    pub fn consume_shared_intent(&mut self, intent: &SharedIntentState) -> bool {
        match intent.take_shared_video_id() {
            Some(video_id) => {
                self.navigate(Screen::Player { video_id });
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        navigation::{navigator::Navigator, screen::Screen},
        state::SharedIntentState,
        video::VideoId,
    };

    #[test]
    fn test_navigate_and_pop() {
        let mut navigator = Navigator::new();
        assert_eq!(navigator.current(), &Screen::Home);

        navigator.navigate(Screen::SoundSelection);
        assert_eq!(navigator.current(), &Screen::SoundSelection);
        assert_eq!(navigator.depth(), 2);

        assert!(navigator.pop_back());
        assert_eq!(navigator.current(), &Screen::Home);
    }

    #[test]
    fn test_root_is_never_popped() {
        let mut navigator = Navigator::new();

        assert!(!navigator.pop_back());
        assert!(!navigator.pop_back());
        assert_eq!(navigator.current(), &Screen::Home);
    }

    #[test]
    fn test_shared_intent_consumed_once() {
        let mut navigator = Navigator::new();
        let intent = SharedIntentState::new();
        intent.set_shared_video_id(VideoId::new("abc").unwrap());

        assert!(navigator.consume_shared_intent(&intent));
        assert!(!navigator.consume_shared_intent(&intent));

        assert_eq!(navigator.depth(), 2);
        assert_eq!(
            navigator.current(),
            &Screen::Player {
                video_id: VideoId::new("abc").unwrap()
            }
        );
        assert_eq!(intent.shared_video_id(), None);
    }
}
