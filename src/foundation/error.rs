/// Convenience result type used across Frameloom.
pub type FrameloomResult<T> = Result<T, FrameloomError>;

/// Top-level error taxonomy used by the timeline, compiler and encoders.
#[derive(thiserror::Error, Debug)]
pub enum FrameloomError {
    /// A frame index fell outside `[0, total)` at placement time.
    #[error("frame index out of range: {index} is not within [0, {total})")]
    OutOfRange {
        /// Offending index.
        index: usize,
        /// Number of frame slots in the timeline.
        total: usize,
    },

    /// An operation was invoked with arguments or in a state it does not accept.
    #[error("precondition failed: {0}")]
    Precondition(String),

    /// Invalid user-provided configuration or scene data.
    #[error("validation error: {0}")]
    Validation(String),

    /// An external collaborator (`ffmpeg`, `ffprobe`, `tex2im`) failed or produced no output.
    #[error("external tool failure: {0}")]
    ExternalTool(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl FrameloomError {
    /// Build a [`FrameloomError::OutOfRange`] value.
    pub fn out_of_range(index: usize, total: usize) -> Self {
        Self::OutOfRange { index, total }
    }

    /// Build a [`FrameloomError::Precondition`] value.
    pub fn precondition(msg: impl Into<String>) -> Self {
        Self::Precondition(msg.into())
    }

    /// Build a [`FrameloomError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`FrameloomError::ExternalTool`] value.
    pub fn external(msg: impl Into<String>) -> Self {
        Self::ExternalTool(msg.into())
    }

    /// Build a [`FrameloomError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
