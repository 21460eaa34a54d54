//! Operational error context propagation with `anyhow`.
//!
//! This module provides extension traits and utilities for enhancing
//! error context and centralized reporting of swallowed errors.

use std::{error::Error as StdError, fmt::Display};

use {
    anyhow::{Context, Error, Result as AnyhowResult},
    tracing::error,
};

/// Extension trait for enhanced error context.
///
/// This trait provides methods to add contextual information to errors,
/// making the log entries for swallowed failures more informative.
pub trait ResultExt<T, E> {
    /// Adds context to an error with a static string.
    fn add_context(self, context: &'static str) -> AnyhowResult<T>
    where
        E: StdError + Send + Sync + 'static;

    /// Adds context to an error with a formatted string.
    fn add_contextf(self, format: impl Display) -> AnyhowResult<T>
    where
        E: StdError + Send + Sync + 'static;
}

impl<T, E> ResultExt<T, E> for Result<T, E> {
    fn add_context(self, context: &'static str) -> AnyhowResult<T>
    where
        E: StdError + Send + Sync + 'static,
    {
        self.context(context)
    }

    fn add_contextf(self, format: impl Display) -> AnyhowResult<T>
    where
        E: StdError + Send + Sync + 'static,
    {
        self.context(format.to_string())
    }
}

/// Centralized error reporting and logging.
///
/// BackTune never surfaces playback or notification failures to the user;
/// they are routed through here so every swallowed error still lands in the log.
pub struct ErrorReporter;

impl ErrorReporter {
    /// Reports an error-level error.
    pub fn error(error: &Error, context: &str) {
        error!(context = context, error = %format!("{error:#}"), "Ignored error");
    }

    /// Logs the error of a fallible operation and discards it.
    ///
    /// # Arguments
    ///
    /// * `result` - Result of the operation.
    /// * `context` - Short description of what was attempted.
    ///
    /// # Returns
    ///
    /// The success value, or `None` if the operation failed.
    pub fn swallow<T>(result: AnyhowResult<T>, context: &str) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(e) => {
                Self::error(&e, context);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{
        error::Error,
        fmt::{Display, Formatter, Result as FmtResult},
    };

    use anyhow::anyhow;

    use crate::error::operational::{ErrorReporter, ResultExt};

    #[derive(Debug)]
    struct TestError;

    impl Display for TestError {
        fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
            write!(f, "Test error")
        }
    }

    impl Error for TestError {}

    #[test]
    fn test_result_ext_with_context() {
        let result: Result<i32, TestError> = Err(TestError);
        let error = result.add_context("Additional context").unwrap_err();

        assert!(error.to_string().contains("Additional context"));
    }

    #[test]
    fn test_result_ext_with_contextf() {
        let result: Result<i32, TestError> = Err(TestError);
        let error = result
            .add_contextf(format!("Loading sound {}", "rain"))
            .unwrap_err();

        assert!(error.to_string().contains("Loading sound rain"));
        assert_eq!(format!("{error:#}"), "Loading sound rain: Test error");
    }

    #[test]
    fn test_swallow_returns_value_or_none() {
        assert_eq!(ErrorReporter::swallow(Ok(7), "ok path"), Some(7));
        assert_eq!(
            ErrorReporter::swallow::<i32>(Err(anyhow!("boom")), "err path"),
            None
        );
    }
}
