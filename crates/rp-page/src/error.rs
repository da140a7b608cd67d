//! Error types for page construction and rendering.
//!
//! Interactive operations (toggles, sorts) never return errors; a malformed
//! enhancement degrades to a no-op. These errors cover loading documents and
//! configuration and writing rendered output.

use thiserror::Error;

/// Result type for page operations.
pub type Result<T> = std::result::Result<T, PageError>;

/// Errors that can occur while building, loading, or rendering a page.
#[derive(Error, Debug)]
pub enum PageError {
    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// IO error.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Structurally inconsistent document.
    #[error("invalid document: {0}")]
    InvalidDocument(String),

    /// Invalid configuration.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
