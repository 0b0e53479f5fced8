//! Error types for the Solara ray tracer

use thiserror::Error;

/// Main error type for Solara operations
#[derive(Error, Debug)]
pub enum Error {
    /// Initialization error
    #[error("Initialization failed: {0}")]
    Init(String),

    /// Mesh construction error
    #[error("Mesh error: {0}")]
    Mesh(String),

    /// Texture construction error
    #[error("Texture error: {0}")]
    Texture(String),

    /// Scene construction or frame access error
    #[error("Scene error: {0}")]
    Scene(String),

    /// Degenerate transform (non-invertible mesh matrix)
    #[error("Transform error: {0}")]
    Transform(String),
}

/// Result type alias using Solara Error
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = Error::Mesh("no triangles".to_string());
        assert!(err.to_string().contains("Mesh error"));
    }

    #[test]
    fn error_display_texture() {
        let err = Error::Texture("width must be positive".to_string());
        assert!(err.to_string().contains("Texture error"));
    }
}
