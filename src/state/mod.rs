//! Observable application state with reactive updates to the screens.
//!
//! This module holds the player view-model and the pending shared video,
//! both with thread-safe access.

pub mod player_state;
pub mod shared_intent;

pub use {
    player_state::{INITIAL_VOLUME, PlayerSnapshot, PlayerState, PlayerStateEvent},
    shared_intent::SharedIntentState,
};
