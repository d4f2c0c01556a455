//! Error types for the render crate.

use thiserror::Error;

/// Errors that can occur during drawing operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    /// A texture was referenced that the engine does not know about.
    #[error("unknown texture: {0}")]
    UnknownTexture(String),

    /// The text to measure or draw had a zero or negative font size.
    #[error("invalid font size {0}")]
    InvalidFontSize(i32),

    /// The backend failed for a reason of its own.
    #[error("backend error: {0}")]
    Backend(String),
}

/// Result type for render operations.
pub type RenderResult<T> = Result<T, RenderError>;
