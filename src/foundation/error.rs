/// Convenience result type used across Aquarelle.
pub type AquarelleResult<T> = Result<T, AquarelleError>;

/// Top-level error taxonomy used by the animation core.
#[derive(thiserror::Error, Debug)]
pub enum AquarelleError {
    /// Invalid user-provided configuration or geometry data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors while resolving or decoding texture/mask assets.
    #[error("load error: {0}")]
    Load(String),

    /// Errors reported while rasterizing the mask or driving the compositor.
    #[error("render error: {0}")]
    Render(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl AquarelleError {
    /// Build an [`AquarelleError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build an [`AquarelleError::Load`] value.
    pub fn load(msg: impl Into<String>) -> Self {
        Self::Load(msg.into())
    }

    /// Build an [`AquarelleError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
