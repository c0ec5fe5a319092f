//! Rendering error types.

/// Errors that can occur while rendering grouped records.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// Template registration or rendering failed.
    #[error("template error: {0}")]
    Template(#[from] tera::Error),
}

/// Result type alias for rendering operations.
pub type Result<T> = std::result::Result<T, RenderError>;
