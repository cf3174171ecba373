//! Error types for inlay operations.

use thiserror::Error;

/// Errors surfaced to callers.
///
/// Most editing operations never fail: a missing selection or an offset that
/// resolves nowhere is reported as a skipped outcome instead.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid wrapper: {0}")]
    InvalidWrapperSpec(String),

    #[error("Invalid selector: {0}")]
    InvalidSelector(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
