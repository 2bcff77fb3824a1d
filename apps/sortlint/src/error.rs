//! Error types for loading configuration, indexes, policies and targets.
//!
//! The sort engine itself is total and has no error type; everything here
//! belongs to the surrounding host (files, parsing, selectors).

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SortlintError {
    #[error("index is not configured; pass --index or add sortlint.toml")]
    IndexNotConfigured,

    #[error("failed to read '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("'{}' is not valid TOML: {source}", .path.display())]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("'{}' is not valid YAML: {source}", .path.display())]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("'{}' is not valid JSON: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid glob pattern '{pattern}': {source}")]
    Glob {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },

    #[error("invalid selector '{selector}': {reason}")]
    Selector { selector: String, reason: String },
}

impl SortlintError {
    /// Short rule id used when the error is reported as a lint issue.
    pub fn rule_id(&self) -> &'static str {
        match self {
            SortlintError::IndexNotConfigured => "config",
            SortlintError::Io { .. } => "read-file",
            SortlintError::Toml { .. } | SortlintError::Yaml { .. } => "parse-config",
            SortlintError::Json { .. } => "parse-json",
            SortlintError::Glob { .. } => "glob",
            SortlintError::Selector { .. } => "selector",
        }
    }

    /// Exit code when the error aborts a command: configuration and usage
    /// problems all map to 2, leaving 1 for findings.
    pub fn exit_code(&self) -> i32 {
        2
    }
}

/// Result type alias using `SortlintError`.
pub type Result<T> = std::result::Result<T, SortlintError>;
