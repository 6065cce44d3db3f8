//! File picker
//!
//! Only paths with one of the audio extensions can be picked. Anything else
//! is refused with a warning notice and nothing is loaded.

use std::path::{Path, PathBuf};

use log::warn;

use crate::engine::{is_audio_path, AUDIO_EXTENSIONS};
use crate::session::{Notice, Severity, Slot};

pub trait FilePicker {
    /// Return the chosen file, or `None` if the user cancelled or the choice
    /// was refused
    fn pick(&mut self, slot: Slot) -> Option<PathBuf>;
}

/// Apply the picker's extension filter to a path
///
/// A refused path comes back as the warning to show the user.
pub fn check_audio_path(path: &Path) -> Result<PathBuf, Notice> {
    if is_audio_path(path) {
        return Ok(path.to_path_buf());
    }

    warn!("refusing non-audio file {}", path.display());
    Err(Notice {
        severity: Severity::Warning,
        message: format!(
            "{} is not an audio file (expected {}).",
            path.display(),
            AUDIO_EXTENSIONS.join(", ")
        ),
    })
}

/// Interpret a typed answer to the picker prompt
///
/// Blank answers cancel. Surrounding quotes are removed.
pub fn accept_answer(answer: &str) -> Result<Option<PathBuf>, Notice> {
    let answer = answer.trim().trim_matches(|c| c == '"' || c == '\'');
    if answer.is_empty() {
        Ok(None)
    } else {
        check_audio_path(Path::new(answer)).map(Some)
    }
}

/// Prompt text shown when asking for a file
pub fn prompt_for(slot: Slot) -> String {
    format!(
        "Select file for {} (*.{}), empty to cancel: ",
        slot,
        AUDIO_EXTENSIONS.join(" *.")
    )
}
