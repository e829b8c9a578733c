//! Error types for the oVirt example helpers

use thiserror::Error;

/// Main error type for engine helper operations
///
/// Variants that wrap another error keep it as the source; nothing here
/// rewrites the underlying failure.
#[derive(Error, Debug)]
pub enum EngineError {
    /// IO errors (password file, terminal prompt, log file, CA file)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP transport errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Malformed engine URL
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// Malformed JSON payload from the engine
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TLS configuration errors
    #[error("TLS error: {0}")]
    Tls(#[from] rustls::Error),

    /// CA certificate file contents unusable
    #[error("Certificate error: {0}")]
    Certificate(String),

    /// SSO authentication rejected by the engine
    #[error("Authentication failed: {code}: {message}")]
    Authentication { code: String, message: String },

    /// Non-success API response
    #[error("API request failed with status {status}: {detail}")]
    Api { status: u16, detail: String },

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Global logger already installed
    #[error("Logging error: {0}")]
    Logging(#[from] log::SetLoggerError),
}

/// Result type alias for engine helper operations
pub type Result<T> = std::result::Result<T, EngineError>;
