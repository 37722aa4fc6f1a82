/// Convenience result type used across framecast.
pub type FramecastResult<T> = Result<T, FramecastError>;

/// Error taxonomy for the animation engine.
///
/// Every variant is a local, synchronous failure: evaluation either succeeds
/// deterministically or fails immediately with one of these.
#[derive(thiserror::Error, Debug)]
pub enum FramecastError {
    /// Malformed breakpoint table (too few points, non-finite or decreasing thresholds).
    #[error("invalid domain: {0}")]
    InvalidDomain(String),

    /// Invalid numeric configuration (fps, spring parameters, timeline or composition data).
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// Scene index outside `[0, scene_count)`.
    #[error("scene index {index} is out of range for {scene_count} scenes")]
    OutOfRangeSceneIndex {
        /// Requested scene index.
        index: u32,
        /// Number of scenes in the timeline.
        scene_count: u32,
    },

    /// Errors while evaluating a frame or a frame range.
    #[error("evaluation error: {0}")]
    Evaluation(String),

    /// Errors when serializing or deserializing compositions.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl FramecastError {
    /// Build a [`FramecastError::InvalidDomain`] value.
    pub fn invalid_domain(msg: impl Into<String>) -> Self {
        Self::InvalidDomain(msg.into())
    }

    /// Build a [`FramecastError::InvalidConfig`] value.
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    /// Build a [`FramecastError::OutOfRangeSceneIndex`] value.
    pub fn scene_out_of_range(index: u32, scene_count: u32) -> Self {
        Self::OutOfRangeSceneIndex { index, scene_count }
    }

    /// Build a [`FramecastError::Evaluation`] value.
    pub fn evaluation(msg: impl Into<String>) -> Self {
        Self::Evaluation(msg.into())
    }

    /// Build a [`FramecastError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
