//! Session state: two source slots and the merged clip

use std::fmt;
use std::str::FromStr;

use crate::engine::AudioClip;

/// One of the two source slots
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    Primary,
    Secondary,
}

impl Slot {
    pub const ALL: [Slot; 2] = [Slot::Primary, Slot::Secondary];

    /// 1 for the primary slot, 2 for the secondary
    pub fn number(self) -> u8 {
        match self {
            Slot::Primary => 1,
            Slot::Secondary => 2,
        }
    }

    pub fn ordinal_word(self) -> &'static str {
        match self {
            Slot::Primary => "first",
            Slot::Secondary => "second",
        }
    }

    pub fn ordinal_title(self) -> &'static str {
        match self {
            Slot::Primary => "First",
            Slot::Secondary => "Second",
        }
    }

    /// File stem written by a trim of this slot
    pub fn trim_output_stem(self) -> &'static str {
        match self {
            Slot::Primary => "trimmed_audio1",
            Slot::Secondary => "trimmed_audio2",
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Audio {}", self.number())
    }
}

impl FromStr for Slot {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "1" | "first" | "primary" => Ok(Slot::Primary),
            "2" | "second" | "secondary" => Ok(Slot::Secondary),
            other => Err(format!("unknown slot '{}' (expected 1 or 2)", other)),
        }
    }
}

/// All clips held by a session
///
/// Starts empty. Fields are replaced wholesale, never edited in place.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    pub primary: Option<AudioClip>,
    pub secondary: Option<AudioClip>,
    pub merged: Option<AudioClip>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clip(&self, slot: Slot) -> Option<&AudioClip> {
        match slot {
            Slot::Primary => self.primary.as_ref(),
            Slot::Secondary => self.secondary.as_ref(),
        }
    }

    pub(crate) fn set_clip(&mut self, slot: Slot, clip: AudioClip) {
        match slot {
            Slot::Primary => self.primary = Some(clip),
            Slot::Secondary => self.secondary = Some(clip),
        }
    }

    pub fn is_loaded(&self, slot: Slot) -> bool {
        self.clip(slot).is_some()
    }
}
