//! Error types for Toplist
//!
//! This module defines all error types used throughout the service,
//! using `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Main error type for Toplist operations
///
/// This enum encompasses all possible errors that can occur during
/// configuration loading, model provider calls, listing parsing, and
/// search enrichment.
#[derive(Error, Debug)]
pub enum ToplistError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Provider-related errors (model API calls, malformed replies, etc.)
    #[error("Provider error: {0}")]
    Provider(String),

    /// Listing parse errors (model output not valid JSON after fence stripping)
    #[error("Listing parse error: {0}")]
    Parse(String),

    /// Search API errors (request failures, non-success statuses)
    #[error("Search error: {0}")]
    Search(String),

    /// Missing credentials for an external service
    #[error("Missing credentials: {0}")]
    MissingCredentials(String),

    /// Server startup and transport errors
    #[error("Server error: {0}")]
    Server(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// HTTP request errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Result type alias for Toplist operations
///
/// This is a convenience alias that uses `anyhow::Error` as the error type,
/// allowing for rich error context and easy error propagation.
pub type Result<T> = anyhow::Result<T>;
