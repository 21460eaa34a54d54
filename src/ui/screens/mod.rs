//! Terminal renderings of each route plus the permission dialog.

pub mod home;
pub mod permission;
pub mod player;
pub mod sound_selection;

pub use {home::HomeScreenState, player::PlayerView};
