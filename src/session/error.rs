//! Error types for session operations.
//!
//! The display text of each variant is the message shown to the user.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ClipError;
use crate::session::effect_kind::EffectKind;
use crate::session::notice::Severity;
use crate::session::state::Slot;

/// Result type for session operations.
pub type Result<T> = std::result::Result<T, SessionError>;

/// Rejections and failures of session operations.
#[derive(Error, Debug)]
pub enum SessionError {
    // Precondition Errors
    #[error("Load the {} audio file to trim.", .0.ordinal_word())]
    NotLoaded(Slot),

    #[error("Load both audio files to merge.")]
    MissingInputs,

    #[error("Merge the audio files before applying {}.", .0.treatment())]
    NoMergedAudio(EffectKind),

    #[error("Invalid start or end time.")]
    InvalidRange { start: String, end: String },

    // Library Errors
    #[error("Failed to load audio: {source}")]
    Load {
        path: PathBuf,
        #[source]
        source: ClipError,
    },

    #[error("Failed to trim audio: {source}")]
    Trim {
        slot: Slot,
        #[source]
        source: ClipError,
    },

    #[error("Failed to merge audio: {source}")]
    Merge {
        #[source]
        source: ClipError,
    },

    #[error("Failed to {}: {}", .kind.failure_action(), .source)]
    Effect {
        kind: EffectKind,
        #[source]
        source: ClipError,
    },
}

impl SessionError {
    /// Get the error code for this error type
    pub fn error_code(&self) -> &'static str {
        match self {
            SessionError::NotLoaded(_) => "NOT_LOADED",
            SessionError::MissingInputs => "MISSING_INPUTS",
            SessionError::NoMergedAudio(_) => "NO_MERGED_AUDIO",
            SessionError::InvalidRange { .. } => "INVALID_RANGE",
            SessionError::Load { .. } => "LOAD_ERROR",
            SessionError::Trim { .. } => "TRIM_ERROR",
            SessionError::Merge { .. } => "MERGE_ERROR",
            SessionError::Effect { .. } => "EFFECT_ERROR",
        }
    }

    /// Missing-input rejections are warnings; everything else is an error
    pub fn severity(&self) -> Severity {
        match self {
            SessionError::NotLoaded(_)
            | SessionError::MissingInputs
            | SessionError::NoMergedAudio(_) => Severity::Warning,
            _ => Severity::Error,
        }
    }

    /// The library failure behind this error, if any
    pub fn clip_error(&self) -> Option<&ClipError> {
        match self {
            SessionError::Load { source, .. }
            | SessionError::Trim { source, .. }
            | SessionError::Merge { source }
            | SessionError::Effect { source, .. } => Some(source),
            _ => None,
        }
    }
}
