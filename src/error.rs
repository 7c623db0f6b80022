use std::fmt;

/// Errors raised by generator and envelope construction or by the
/// sample-buffer protocol.
///
/// Configuration errors are raised at construction time, never deferred to
/// `get`. Invalid values are reported, not clamped — a silently substituted
/// default would mask composition bugs upstream in the sequencer.
#[derive(Debug)]
pub enum GeneratorError {
    /// A construction parameter is out of range for the named component.
    InvalidParameter {
        component: &'static str,
        parameter: &'static str,
        value: f64,
    },
    /// `get` was called with a sample count of zero.
    InvalidSampleCount,
    /// A wave file could not be loaded or decoded.
    WaveFile(WaveFileError),
}

#[derive(Debug)]
pub enum WaveFileError {
    NotFound { path: String },
    Decode { path: String, reason: String },
}

impl fmt::Display for GeneratorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeneratorError::InvalidParameter {
                component,
                parameter,
                value,
            } => write!(f, "{component}: invalid {parameter} {value}"),
            GeneratorError::InvalidSampleCount => {
                write!(f, "get requires a sample count of at least 1")
            }
            GeneratorError::WaveFile(e) => write!(f, "Wave file error: {e}"),
        }
    }
}

impl std::error::Error for GeneratorError {}

impl fmt::Display for WaveFileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WaveFileError::NotFound { path } => write!(f, "File not found: {path}"),
            WaveFileError::Decode { path, reason } => {
                write!(f, "Could not decode {path}: {reason}")
            }
        }
    }
}

impl std::error::Error for WaveFileError {}

impl From<WaveFileError> for GeneratorError {
    fn from(e: WaveFileError) -> Self {
        GeneratorError::WaveFile(e)
    }
}
