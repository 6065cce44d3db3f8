//! Audio Session Controller
//!
//! Owns the [`SessionState`] and runs the five session operations against
//! the audio library. A slot or the merged clip is only replaced once
//! every library call of the operation has succeeded, so a failed
//! operation leaves the session exactly as it was.

use std::path::Path;

use log::{debug, info, warn};

use crate::config::SessionConfig;
use crate::engine::{self, ClipStats};
use crate::session::command::{Command, Dispatch, Outcome};
use crate::session::effect_kind::EffectKind;
use crate::session::error::{Result, SessionError};
use crate::session::state::{SessionState, Slot};

/// Stem of the concatenation output
const MERGED_OUTPUT_STEM: &str = "merged_audio";

#[derive(Debug, Default)]
pub struct Session {
    state: SessionState,
    config: SessionConfig,
}

impl Session {
    pub fn new(config: SessionConfig) -> Self {
        Self {
            state: SessionState::new(),
            config,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Run one command
    pub fn dispatch(&mut self, command: Command) -> Dispatch {
        debug!("dispatching {:?}", command);

        let result = match command {
            Command::Load { path: None, slot } => {
                debug!("load into {} cancelled", slot);
                return Dispatch::Cancelled;
            }
            Command::Load {
                slot,
                path: Some(path),
            } => self.load(slot, &path),
            Command::Describe { path } => self.describe(&path).map(|stats| Outcome::Described {
                path,
                stats,
            }),
            Command::Trim { slot, start, end } => self.trim(slot, &start, &end),
            Command::Merge => self.merge(),
            Command::ApplyEffect(kind) => self.apply_effect(kind),
        };

        if let Err(err) = &result {
            warn!("{} ({})", err, err.error_code());
        }

        Dispatch::Completed(result)
    }

    /// Decode `path` into `slot`, replacing whatever was there
    pub fn load(&mut self, slot: Slot, path: &Path) -> Result<Outcome> {
        let clip = engine::decode_file(path).map_err(|source| SessionError::Load {
            path: path.to_path_buf(),
            source,
        })?;

        let stats = clip.stats();
        self.state.set_clip(slot, clip);
        info!("{} loaded from {}: {}", slot, path.display(), stats);

        Ok(Outcome::Loaded {
            slot,
            path: path.to_path_buf(),
            stats,
        })
    }

    /// Decode `path` only to read its metadata
    pub fn describe(&self, path: &Path) -> Result<ClipStats> {
        engine::decode_file(path)
            .map(|clip| clip.stats())
            .map_err(|source| SessionError::Load {
                path: path.to_path_buf(),
                source,
            })
    }

    /// Trim `slot` to `[start_ms, end_ms)` and write `trimmed_audio<N>`
    ///
    /// The bounds are the raw text the user typed. They are not checked
    /// against the clip length here; the library rejects ranges that do not
    /// fit and that surfaces as [`SessionError::Trim`].
    pub fn trim(&mut self, slot: Slot, start_ms: &str, end_ms: &str) -> Result<Outcome> {
        let clip = self.state.clip(slot).ok_or(SessionError::NotLoaded(slot))?;

        let (start, end) = match (parse_millis(start_ms), parse_millis(end_ms)) {
            (Some(start), Some(end)) => (start, end),
            _ => {
                return Err(SessionError::InvalidRange {
                    start: start_ms.to_string(),
                    end: end_ms.to_string(),
                })
            }
        };

        let trim_err = |source| SessionError::Trim { slot, source };
        let trimmed = clip
            .subclip(start as f64 / 1000.0, end as f64 / 1000.0)
            .map_err(trim_err)?;

        let output = self.config.output_path(slot.trim_output_stem());
        engine::encode_wav(&trimmed, &output, self.config.export).map_err(trim_err)?;

        let stats = trimmed.stats();
        self.state.set_clip(slot, trimmed);
        info!("{} trimmed to {}..{} ms: {}", slot, start, end, stats);

        Ok(Outcome::Trimmed {
            slot,
            output,
            stats,
        })
    }

    /// Concatenate primary then secondary and write `merged_audio`
    pub fn merge(&mut self) -> Result<Outcome> {
        let (primary, secondary) = match (&self.state.primary, &self.state.secondary) {
            (Some(primary), Some(secondary)) => (primary, secondary),
            _ => return Err(SessionError::MissingInputs),
        };

        let merge_err = |source| SessionError::Merge { source };
        let merged = engine::concatenate(&[primary, secondary]).map_err(merge_err)?;

        let output = self.config.output_path(MERGED_OUTPUT_STEM);
        engine::encode_wav(&merged, &output, self.config.export).map_err(merge_err)?;

        let stats = merged.stats();
        self.state.merged = Some(merged);
        info!("merged audio: {}", stats);

        Ok(Outcome::Merged { output, stats })
    }

    /// Apply `kind` to the merged clip and write its output file
    ///
    /// The stored merged clip is left as it is.
    pub fn apply_effect(&self, kind: EffectKind) -> Result<Outcome> {
        let merged = self
            .state
            .merged
            .as_ref()
            .ok_or(SessionError::NoMergedAudio(kind))?;

        let effect_err = |source| SessionError::Effect { kind, source };
        let effect = kind.effect();
        let processed = effect.apply(merged).map_err(effect_err)?;

        let output = self.config.output_path(kind.output_stem());
        engine::encode_wav(&processed, &output, self.config.export).map_err(effect_err)?;

        let stats = processed.stats();
        info!("{} ({}) written to {}", kind, effect.display_name(), output.display());

        Ok(Outcome::EffectApplied {
            kind,
            output,
            stats,
        })
    }
}

/// Parse a millisecond bound as an integer
///
/// Surrounding whitespace and a leading sign are accepted.
fn parse_millis(text: &str) -> Option<i64> {
    text.trim().parse().ok()
}
