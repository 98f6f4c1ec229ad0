//! Error types for the CLI

use thiserror::Error;

/// Result type for CLI operations
pub type CliResult<T> = Result<T, CliError>;

/// Errors that can occur in the CLI
#[derive(Debug, Error)]
pub enum CliError {
    /// Invalid argument
    #[error("Invalid argument: {message}")]
    InvalidArgument {
        /// Error message
        message: String,
    },

    /// Scenarios ran and at least one failed
    #[error("{failed} of {total} scenarios failed")]
    ScenariosFailed {
        /// Failed count
        failed: usize,
        /// Total count
        total: usize,
    },

    /// Feature compiled out
    #[error("{feature} support is not enabled; rebuild with --features {feature}")]
    FeatureDisabled {
        /// Cargo feature name
        feature: &'static str,
    },

    /// IO error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Library error
    #[error(transparent)]
    Todo(#[from] todomvc_e2e::TodoError),
}

impl CliError {
    /// Create an invalid argument error
    #[must_use]
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use todomvc_e2e::TodoError;

    #[test]
    fn test_display() {
        assert_eq!(
            CliError::ScenariosFailed {
                failed: 2,
                total: 41
            }
            .to_string(),
            "2 of 41 scenarios failed"
        );
        assert!(CliError::FeatureDisabled { feature: "browser" }
            .to_string()
            .contains("--features browser"));
    }

    #[test]
    fn test_from_library_error() {
        let err: CliError = TodoError::UnknownVariant { key: "vue".into() }.into();
        assert!(err.to_string().contains("vue"));
    }
}
