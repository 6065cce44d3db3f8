//! Session commands
//!
//! Each user action is one [`Command`]. `Session::dispatch` runs it and
//! reports a [`Dispatch`]; the front end only translates input into
//! commands and dispatch results into notices.

use std::path::{Path, PathBuf};

use crate::engine::ClipStats;
use crate::session::effect_kind::EffectKind;
use crate::session::state::Slot;

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Load a file into a slot; `None` means the picker was cancelled
    Load { slot: Slot, path: Option<PathBuf> },
    /// Read a file's metadata without touching the session
    Describe { path: PathBuf },
    /// Trim a slot to `[start, end)` milliseconds, given as typed
    Trim {
        slot: Slot,
        start: String,
        end: String,
    },
    Merge,
    ApplyEffect(EffectKind),
}

/// What a successful operation produced
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Loaded {
        slot: Slot,
        path: PathBuf,
        stats: ClipStats,
    },
    Described {
        path: PathBuf,
        stats: ClipStats,
    },
    Trimmed {
        slot: Slot,
        output: PathBuf,
        stats: ClipStats,
    },
    Merged {
        output: PathBuf,
        stats: ClipStats,
    },
    EffectApplied {
        kind: EffectKind,
        output: PathBuf,
        stats: ClipStats,
    },
}

impl Outcome {
    /// Success message shown to the user
    pub fn message(&self) -> String {
        match self {
            Outcome::Loaded { slot, .. } => {
                format!("{} audio loaded successfully.", slot.ordinal_title())
            }
            Outcome::Described { path, stats } => format!("{}: {}", path.display(), stats),
            Outcome::Trimmed { slot, output, .. } => format!(
                "Trimmed audio {} saved as {}",
                slot.number(),
                file_name(output)
            ),
            Outcome::Merged { output, .. } => {
                format!("Merged audio saved as {}", file_name(output))
            }
            Outcome::EffectApplied { kind, output, .. } => {
                kind.success_message(&file_name(output))
            }
        }
    }

    /// Statistics of the clip the operation produced or read
    pub fn stats(&self) -> &ClipStats {
        match self {
            Outcome::Loaded { stats, .. }
            | Outcome::Described { stats, .. }
            | Outcome::Trimmed { stats, .. }
            | Outcome::Merged { stats, .. }
            | Outcome::EffectApplied { stats, .. } => stats,
        }
    }

    /// The file written, for operations that write one
    pub fn output(&self) -> Option<&Path> {
        match self {
            Outcome::Trimmed { output, .. }
            | Outcome::Merged { output, .. }
            | Outcome::EffectApplied { output, .. } => Some(output),
            Outcome::Loaded { .. } | Outcome::Described { .. } => None,
        }
    }
}

/// Result of dispatching one command
#[derive(Debug)]
pub enum Dispatch {
    /// Nothing happened (the file picker was dismissed)
    Cancelled,
    Completed(crate::session::error::Result<Outcome>),
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn stats() -> ClipStats {
        ClipStats {
            duration_secs: 1.0,
            sample_rate: 44100,
            channels: 1,
        }
    }

    #[test]
    fn test_outcome_messages() {
        let loaded = Outcome::Loaded {
            slot: Slot::Secondary,
            path: PathBuf::from("b.wav"),
            stats: stats(),
        };
        assert_eq!(loaded.message(), "Second audio loaded successfully.");
        assert_eq!(loaded.output(), None);

        let trimmed = Outcome::Trimmed {
            slot: Slot::Primary,
            output: PathBuf::from("out/trimmed_audio1.wav"),
            stats: stats(),
        };
        assert_eq!(trimmed.message(), "Trimmed audio 1 saved as trimmed_audio1.wav");

        let effect = Outcome::EffectApplied {
            kind: EffectKind::Normalize,
            output: PathBuf::from("reverb_merged_audio.wav"),
            stats: stats(),
        };
        assert_eq!(
            effect.message(),
            "Reverb added to merged audio saved as reverb_merged_audio.wav"
        );
    }
}
