//! Screen routes and the back stack between them.

pub mod navigator;
pub mod screen;

pub use {
    navigator::Navigator,
    screen::{HOME_ROUTE, PLAYER_ROUTE, SOUND_SELECTION_ROUTE, Screen},
};
