//! Error types for the fallible edges (config, audio files, stores, remote clients).
//!
//! The analysis core never returns these; it logs and falls back.

/// Top-level error type.
#[derive(Debug, thiserror::Error)]
pub enum SolaceError {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("config error: {0}")]
    Config(String),

    /// Record store error.
    #[error("store error: {0}")]
    Store(String),

    /// Audio decoding error.
    #[error("audio error: {0}")]
    Audio(String),

    /// Remote service error (transport, status or payload).
    #[error("remote error: {0}")]
    Remote(String),

    /// JSON (de)serialization error.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience result type.
pub type Result<T> = std::result::Result<T, SolaceError>;
