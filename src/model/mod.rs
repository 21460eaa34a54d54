//! Plain data types shared across the application.

pub mod sound;

pub use sound::{AmbientSound, available_sounds};
