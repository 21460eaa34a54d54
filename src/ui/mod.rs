//! Terminal user interface built with ratatui.
//!
//! This module provides the application event loop, the screen renderings
//! for each route and the shared widgets and colors they are drawn with.

#[cfg(test)]
mod tests;

pub mod application;
pub mod components;
pub mod screens;
pub mod theme;

pub use {
    application::BackTuneApplication,
    screens::{HomeScreenState, PlayerView},
};
