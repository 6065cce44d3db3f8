//! Error handling for the audio library layer
//!
//! Every failure raised while decoding, editing or encoding a clip is a
//! [`ClipError`]. The session layer wraps these in its own error type and
//! passes the message through to the user unchanged.

use thiserror::Error;

/// Result type alias for audio library operations
pub type Result<T> = std::result::Result<T, ClipError>;

/// Failures raised by the audio library
#[derive(Error, Debug)]
pub enum ClipError {
    // File Errors
    #[error("File not found: {path}")]
    FileNotFound { path: String },

    #[error("Could not decode {path}: {reason}")]
    Decode {
        path: String,
        reason: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Unsupported audio format: {format}")]
    UnsupportedFormat { format: String },

    #[error("Audio contains no samples")]
    EmptyAudio,

    // Editing Errors
    #[error(
        "Range {start_secs:.3}s..{end_secs:.3}s is outside the clip (duration {duration_secs:.3}s)"
    )]
    RangeOutOfBounds {
        start_secs: f64,
        end_secs: f64,
        duration_secs: f64,
    },

    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    // Output Errors
    #[error("Could not write {path}: {reason}")]
    Encode { path: String, reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ClipError {
    /// Get the error code for this error type
    pub fn error_code(&self) -> &'static str {
        match self {
            ClipError::FileNotFound { .. } => "FILE_NOT_FOUND",
            ClipError::Decode { .. } => "DECODE_ERROR",
            ClipError::UnsupportedFormat { .. } => "UNSUPPORTED_FORMAT",
            ClipError::EmptyAudio => "EMPTY_AUDIO",
            ClipError::RangeOutOfBounds { .. } => "RANGE_OUT_OF_BOUNDS",
            ClipError::InvalidParameter { .. } => "INVALID_PARAMETER",
            ClipError::Encode { .. } => "ENCODE_ERROR",
            ClipError::Io(_) => "IO_ERROR",
        }
    }

    /// Get recovery suggestions for this error
    pub fn recovery_suggestions(&self) -> Vec<&'static str> {
        match self {
            ClipError::FileNotFound { .. } => vec![
                "Check the file path is correct",
                "Verify the file hasn't been moved or deleted",
            ],
            ClipError::Decode { .. } => vec![
                "Check if the file plays in another application",
                "The file may be corrupted - try re-exporting from source",
            ],
            ClipError::UnsupportedFormat { .. } => vec![
                "Convert to WAV or FLAC format",
                "Supported formats: WAV, FLAC, MP3, OGG",
            ],
            ClipError::RangeOutOfBounds { .. } => vec![
                "Check the clip duration in the statistics display",
                "End time must be after start time",
            ],
            ClipError::Encode { .. } | ClipError::Io(_) => vec![
                "Check the output directory is writable",
                "Free up disk space",
            ],
            _ => vec![],
        }
    }

    pub(crate) fn decode(
        path: &std::path::Path,
        reason: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        ClipError::Decode {
            path: path.display().to_string(),
            reason: reason.into(),
            source: Some(Box::new(source)),
        }
    }

    pub(crate) fn encode(path: &std::path::Path, err: hound::Error) -> Self {
        match err {
            hound::Error::IoError(io) => ClipError::Io(io),
            other => ClipError::Encode {
                path: path.display().to_string(),
                reason: other.to_string(),
            },
        }
    }
}
