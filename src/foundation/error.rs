/// Result alias used across the crate.
pub type DotMatrixResult<T> = Result<T, DotMatrixError>;

/// Errors surfaced by configuration, rasterization and I/O helpers.
///
/// The animation core itself never fails: missing glyphs, exhausted placement
/// attempts and out-of-range writes degrade silently.
#[derive(thiserror::Error, Debug)]
pub enum DotMatrixError {
    /// Invalid input value (vocabulary, viewport, surface size).
    #[error("validation error: {0}")]
    Validation(String),

    /// Invalid or unreadable display configuration.
    #[error("config error: {0}")]
    Config(String),

    /// CPU rasterization failure.
    #[error("render error: {0}")]
    Render(String),

    /// JSON (de)serialization failure.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Any other error, with its source preserved.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl DotMatrixError {
    /// Build a [`DotMatrixError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`DotMatrixError::Config`].
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Build a [`DotMatrixError::Render`].
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`DotMatrixError::Serde`].
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
