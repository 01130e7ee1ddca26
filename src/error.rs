use std::io;
use thiserror::Error;

/// Result type for audio operations
pub type AudioResult<T> = Result<T, AudioError>;

/// Error types for segmentation, manipulation and audio I/O
#[derive(Error, Debug)]
pub enum AudioError {
    /// Illegal numeric parameter (segment count, duration, fade percentage, sample rate, level)
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Input collection has the wrong shape (e.g. mixed sample rates in one sequence)
    #[error("Invalid input type: {0}")]
    TypeInvalid(String),

    /// Selection pattern does not match `D*V(+|-)D`
    #[error("The pattern '{pattern}' does not match 'multiplier * n + constant'")]
    PatternFormat {
        /// Pattern with whitespace removed
        pattern: String,
    },

    /// Unsupported manipulation method
    #[error("Invalid manipulation method: {0}")]
    InvalidMethod(String),

    /// Explicit segment index outside the sequence
    #[error("Segment index {index} out of range for {len} segments")]
    IndexOutOfRange {
        /// Offending index
        index: usize,
        /// Number of segments in the sequence
        len: usize,
    },

    /// IO error (file operations, disk access)
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Unsupported audio format
    #[error("Unsupported audio format: {0}")]
    UnsupportedFormat(String),

    /// Invalid audio metadata
    #[error("Invalid audio metadata: {0}")]
    InvalidMetadata(String),

    /// Decoding failed
    #[error("Decode error: {0}")]
    DecodeError(String),

    /// Encoding failed
    #[error("Encode error: {0}")]
    EncodeError(String),

    /// Invalid channel configuration
    #[error("Invalid channel configuration: expected {expected}, got {got}")]
    InvalidChannels {
        /// Expected number of channels
        expected: u32,
        /// Got number of channels
        got: u32,
    },
}

impl From<symphonia::core::errors::Error> for AudioError {
    fn from(err: symphonia::core::errors::Error) -> Self {
        AudioError::DecodeError(err.to_string())
    }
}

impl From<hound::Error> for AudioError {
    fn from(err: hound::Error) -> Self {
        match err {
            hound::Error::IoError(e) => AudioError::Io(e),
            e => AudioError::EncodeError(e.to_string()),
        }
    }
}
