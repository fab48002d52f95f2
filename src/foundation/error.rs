/// Convenience result type used across the crate.
pub type SlitscanResult<T> = Result<T, SlitscanError>;

/// Top-level error taxonomy used by slit-scan APIs.
#[derive(thiserror::Error, Debug)]
pub enum SlitscanError {
    /// Invalid construction parameters (extent, steps, duration, colors).
    #[error("configuration error: {0}")]
    Config(String),

    /// Degenerate trajectory passed to a render call.
    #[error("geometry error: {0}")]
    Geometry(String),

    /// Errors while validating or sampling interpolators.
    #[error("animation error: {0}")]
    Animation(String),

    /// Errors while loading or preparing sprite images.
    #[error("asset error: {0}")]
    Asset(String),

    /// Errors when serializing or deserializing scene descriptions.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SlitscanError {
    /// Build a [`SlitscanError::Config`] value.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Build a [`SlitscanError::Geometry`] value.
    pub fn geometry(msg: impl Into<String>) -> Self {
        Self::Geometry(msg.into())
    }

    /// Build a [`SlitscanError::Animation`] value.
    pub fn animation(msg: impl Into<String>) -> Self {
        Self::Animation(msg.into())
    }

    /// Build a [`SlitscanError::Asset`] value.
    pub fn asset(msg: impl Into<String>) -> Self {
        Self::Asset(msg.into())
    }

    /// Build a [`SlitscanError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
