//! Error types for script interpretation and track baking

/// Every failure the movie pipeline can report.
///
/// All variants describe deterministic input problems; none of them are worth
/// retrying. Line numbers are 1-based and refer to the original script text.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum MovieError {
    /// A statement header has no recognised frame range, a clause is missing
    /// its parameters, or the script references no frame at all.
    #[error("Malformed script (line {line}): {reason}")]
    MalformedScript { line: usize, reason: String },

    /// A statement contains none of the recognised operation keywords.
    #[error("Unknown operation (line {line}): {statement}")]
    UnknownOperation { line: usize, statement: String },

    /// Interpolation needs a start and an end keyframe.
    #[error("Interpolation requires at least 2 keyframes, got {found}")]
    InsufficientKeyframes { found: usize },

    /// Keyframe frame indices must strictly increase.
    #[error("Keyframe at frame {frame} does not come after frame {previous}")]
    UnorderedKeyframes { previous: usize, frame: usize },

    /// A visibility command targets a layer the viewer does not have.
    #[error("Layer {layer} is out of range (viewer has {layers} layers)")]
    LayerOutOfRange { layer: usize, layers: usize },

    /// A time shift was scripted but the viewer exposes no time axis.
    #[error("Time shift on line {line} requires a viewer with a time axis")]
    MissingTimeAxis { line: usize },

    /// Keyframes disagree on how many layers exist.
    #[error("Keyframe carries {found} layer flags, expected {expected}")]
    LayerCountMismatch { expected: usize, found: usize },

    /// No keyframe authors a channel the track needs.
    #[error("No keyframe provides a value for the {channel} channel")]
    MissingChannel { channel: &'static str },

    /// Capture-session navigation with nothing captured yet.
    #[error("No keyframes have been captured")]
    EmptyCapture,
}

impl MovieError {
    pub(crate) fn malformed(line: usize, reason: impl Into<String>) -> Self {
        MovieError::MalformedScript {
            line,
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, MovieError>;
