//! Result and error types for the TodoMVC suite.

use thiserror::Error;

/// Result type for suite operations
pub type TodoResult<T> = Result<T, TodoError>;

/// Errors that can occur while driving or asserting on a TodoMVC page
#[derive(Debug, Error)]
pub enum TodoError {
    /// Variant key not present in the selector registry
    #[error("Unknown variant '{key}' (expected one of: classic, typescript-react)")]
    UnknownVariant {
        /// Key that was requested
        key: String,
    },

    /// Operation needs a selector the variant does not define
    #[error("Variant {variant} has no '{selector}' selector")]
    UnsupportedSelector {
        /// Variant key
        variant: String,
        /// Selector field name
        selector: &'static str,
    },

    /// Invalid configuration value
    #[error("Configuration error: {message}")]
    Config {
        /// Error message
        message: String,
    },

    /// Browser launch error
    #[error("Failed to launch browser: {message}")]
    BrowserLaunch {
        /// Error message
        message: String,
    },

    /// Page error
    #[error("Page error: {message}")]
    Page {
        /// Error message
        message: String,
    },

    /// Navigation error
    #[error("Navigation to {url} failed: {message}")]
    Navigation {
        /// URL that failed
        url: String,
        /// Error message
        message: String,
    },

    /// No element matched the locator
    #[error("No element matches {locator}")]
    ElementNotFound {
        /// Locator description
        locator: String,
    },

    /// Action target resolved to more than one element
    #[error("Strict mode violation: {locator} resolved to {count} elements")]
    StrictModeViolation {
        /// Locator description
        locator: String,
        /// Number of matches
        count: usize,
    },

    /// Driver-level action failure
    #[error("{action} on {locator} failed: {message}")]
    Action {
        /// Action name
        action: &'static str,
        /// Locator description
        locator: String,
        /// Error message
        message: String,
    },

    /// Operation timed out
    #[error("Timed out after {ms}ms waiting for {what}")]
    Timeout {
        /// Timeout in milliseconds
        ms: u64,
        /// What was being waited on, including the last observed error
        what: String,
    },

    /// Observed DOM state did not match the expectation
    #[error("Assertion failed on {locator}\n  expected: {expected}\n    actual: {actual}")]
    AssertionFailed {
        /// Locator description
        locator: String,
        /// Expected state
        expected: String,
        /// Last observed state
        actual: String,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),
}

impl TodoError {
    /// Create a configuration error
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Configuration errors are fatal at setup time and never retried
    #[must_use]
    pub const fn is_config(&self) -> bool {
        matches!(
            self,
            Self::UnknownVariant { .. } | Self::UnsupportedSelector { .. } | Self::Config { .. }
        )
    }
}
