//! CLI Command Implementations
//!
//! Turns prompt commands into session commands and keeps the two
//! statistics displays.

use std::path::PathBuf;

use crate::cli::picker::{check_audio_path, FilePicker};
use crate::cli::PromptCommand;
use crate::engine::ClipStats;
use crate::session::{Command, Notice, Outcome, Slot};

/// What the console should do with one prompt line
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Dispatch(Command),
    /// The command was refused before reaching the session
    Refuse(Notice),
    DescribeJson(PathBuf),
    ShowStats,
    Quit,
}

/// Translate a prompt command, asking the picker when `load` has no path
pub fn plan(prompt: PromptCommand, picker: &mut dyn FilePicker) -> Action {
    match prompt {
        PromptCommand::Load {
            slot,
            path: Some(path),
        } => match check_audio_path(&path) {
            Ok(path) => Action::Dispatch(Command::Load {
                slot,
                path: Some(path),
            }),
            Err(notice) => Action::Refuse(notice),
        },
        PromptCommand::Load { slot, path: None } => Action::Dispatch(Command::Load {
            slot,
            path: picker.pick(slot),
        }),
        PromptCommand::Describe { path, json: true } => Action::DescribeJson(path),
        PromptCommand::Describe { path, json: false } => {
            Action::Dispatch(Command::Describe { path })
        }
        PromptCommand::Trim { slot, start, end } => {
            Action::Dispatch(Command::Trim { slot, start, end })
        }
        PromptCommand::Merge => Action::Dispatch(Command::Merge),
        PromptCommand::Effect { kind } => Action::Dispatch(Command::ApplyEffect(kind)),
        PromptCommand::Stats => Action::ShowStats,
        PromptCommand::Quit => Action::Quit,
    }
}

/// The read-only statistics shown for each slot
///
/// Updated when a file is loaded into the slot.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatsDisplay {
    primary: Option<ClipStats>,
    secondary: Option<ClipStats>,
}

impl StatsDisplay {
    pub fn update(&mut self, outcome: &Outcome) {
        if let Outcome::Loaded { slot, stats, .. } = outcome {
            match slot {
                Slot::Primary => self.primary = Some(*stats),
                Slot::Secondary => self.secondary = Some(*stats),
            }
        }
    }

    pub fn get(&self, slot: Slot) -> Option<&ClipStats> {
        match slot {
            Slot::Primary => self.primary.as_ref(),
            Slot::Secondary => self.secondary.as_ref(),
        }
    }

    pub fn line(&self, slot: Slot) -> String {
        match self.get(slot) {
            Some(stats) => format!("{}: {}", slot, stats),
            None => format!("{}: Not Loaded", slot),
        }
    }
}
