//! Error handling built on `thiserror` and `anyhow`.
//!
//! This module provides both domain-specific error types for precise error
//! handling and operational helpers for logging errors that are swallowed.

pub mod domain;
pub mod operational;

pub use {
    domain::{AudioError, NotificationError, UiError},
    operational::{ErrorReporter, ResultExt},
};
