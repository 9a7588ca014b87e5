/// Convenience result type used across pathmotion.
pub type MotionResult<T> = Result<T, MotionError>;

/// Top-level error taxonomy used by library APIs.
#[derive(thiserror::Error, Debug)]
pub enum MotionError {
    /// Invalid configuration or perturbation rules.
    #[error("validation error: {0}")]
    Validation(String),

    /// Path input that yields no usable commands when commands are required.
    #[error("parse error: {0}")]
    Parse(String),

    /// Interpolation attempted over patterns that do not line up.
    #[error(transparent)]
    Shape(#[from] ShapeError),

    /// The designated display element (or its path attribute) is absent.
    #[error("no sink: {0}")]
    NoSink(String),

    /// Reading from or writing to the sink failed.
    #[error("sink error: {0}")]
    Sink(String),

    /// Rasterizing a rendered document failed.
    #[error("render error: {0}")]
    Render(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl MotionError {
    /// Build a [`MotionError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`MotionError::Parse`] value.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    /// Build a [`MotionError::NoSink`] value.
    pub fn no_sink(msg: impl Into<String>) -> Self {
        Self::NoSink(msg.into())
    }

    /// Build a [`MotionError::Sink`] value.
    pub fn sink(msg: impl Into<String>) -> Self {
        Self::Sink(msg.into())
    }

    /// Build a [`MotionError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }
}

/// Two patterns cannot be blended index by index.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ShapeError {
    /// `current` and `next` hold a different number of commands.
    #[error("shape error: current pattern has {current} commands, next has {next}")]
    LengthMismatch {
        /// Length of the pattern being animated from.
        current: usize,
        /// Length of the pattern being animated toward.
        next: usize,
    },
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
