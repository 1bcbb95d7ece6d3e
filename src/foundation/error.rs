/// Convenience result type used across narravis.
pub type NarravisResult<T> = Result<T, NarravisError>;

/// Top-level error taxonomy used by engine APIs.
#[derive(thiserror::Error, Debug)]
pub enum NarravisError {
    /// Invalid user-provided configuration or scale/scene parameters.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors at the dataset boundary (reading or normalizing tabular input).
    #[error("data error: {0}")]
    Data(String),

    /// A narrative step transition could not be applied; the previous scene
    /// is left untouched when this is returned.
    #[error("step error: {0}")]
    Step(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl NarravisError {
    /// Build a [`NarravisError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`NarravisError::Data`] value.
    pub fn data(msg: impl Into<String>) -> Self {
        Self::Data(msg.into())
    }

    /// Build a [`NarravisError::Step`] value.
    pub fn step(msg: impl Into<String>) -> Self {
        Self::Step(msg.into())
    }

    /// Build a [`NarravisError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
