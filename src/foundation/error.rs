/// Crate-wide result alias.
pub type RastelResult<T> = Result<T, RastelError>;

/// Crate-wide error type.
///
/// Drawing itself never fails: out-of-bounds geometry is clipped, degenerate
/// geometry draws nothing, singular transforms skip the draws that need an
/// inverse. Only surface construction and the codec surface errors.
#[derive(thiserror::Error, Debug)]
pub enum RastelError {
    /// A surface descriptor or dimension failed validation.
    #[error("validation error: {0}")]
    Validation(String),

    /// Encoded image data could not be decoded or encoded.
    #[error("codec error: {0}")]
    Codec(String),

    /// Passthrough for wrapped lower-level errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl RastelError {
    /// Build a [`RastelError::Validation`] from any message.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`RastelError::Codec`] from any message.
    pub fn codec(msg: impl Into<String>) -> Self {
        Self::Codec(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
