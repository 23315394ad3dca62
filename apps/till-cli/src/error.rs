//! # CLI Error Types
//!
//! Everything that can go wrong between reading a rule file and printing a
//! total.

use std::path::PathBuf;

use thiserror::Error;
use till_core::CoreError;

/// Result type alias for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    // =========================================================================
    // Configuration Errors
    // =========================================================================
    /// An explicitly requested rules file does not exist.
    #[error("Rules file not found: {}", .0.display())]
    RulesFileNotFound(PathBuf),

    /// The configuration is unusable.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Failed to read the rules file.
    #[error("Failed to read rules file: {0}")]
    Io(#[from] std::io::Error),

    /// The TOML rules file could not be parsed.
    #[error("Failed to parse TOML rules: {0}")]
    Toml(#[from] toml::de::Error),

    /// The JSON rules file could not be parsed.
    #[error("Failed to parse JSON rules: {0}")]
    Json(#[from] serde_json::Error),

    // =========================================================================
    // Pricing Errors
    // =========================================================================
    /// Rule set or checkout failure from till-core.
    #[error("{} ({})", .0, .0.kind())]
    Core(#[from] CoreError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use till_core::ArticleCode;

    #[test]
    fn test_core_error_message_includes_kind() {
        let err: CliError = CoreError::NoPriceAvailable {
            article: ArticleCode::new('X'),
        }
        .into();
        assert_eq!(
            err.to_string(),
            "No price available for article X (invalid argument)"
        );
    }

    #[test]
    fn test_missing_file_message() {
        let err = CliError::RulesFileNotFound(PathBuf::from("/tmp/none.toml"));
        assert_eq!(err.to_string(), "Rules file not found: /tmp/none.toml");
    }
}
