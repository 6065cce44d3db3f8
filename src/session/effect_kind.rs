//! The four effects offered on the merged clip
//!
//! Each kind keeps the label and output name it was released under
//! ("Equalize", "Reduce Noise", "Add Reverb", "Add Echo") while running a
//! fade-in, fade-out, normalize or loop respectively.

use std::fmt;
use std::str::FromStr;

use crate::dsp::{Effect, FadeIn, FadeOut, Loop, Normalize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EffectKind {
    FadeIn,
    FadeOut,
    Normalize,
    Loop,
}

impl EffectKind {
    pub const ALL: [EffectKind; 4] = [
        EffectKind::FadeIn,
        EffectKind::FadeOut,
        EffectKind::Normalize,
        EffectKind::Loop,
    ];

    /// The effect with its fixed session parameters
    pub fn effect(self) -> Box<dyn Effect> {
        match self {
            EffectKind::FadeIn => Box::new(FadeIn::default()),
            EffectKind::FadeOut => Box::new(FadeOut::default()),
            EffectKind::Normalize => Box::new(Normalize),
            EffectKind::Loop => Box::new(Loop::default()),
        }
    }

    /// Button label
    pub fn label(self) -> &'static str {
        match self {
            EffectKind::FadeIn => "Equalize",
            EffectKind::FadeOut => "Reduce Noise",
            EffectKind::Normalize => "Add Reverb",
            EffectKind::Loop => "Add Echo",
        }
    }

    /// File stem of the effect output
    pub fn output_stem(self) -> &'static str {
        match self {
            EffectKind::FadeIn => "equalized_merged_audio",
            EffectKind::FadeOut => "reduced_noise_merged_audio",
            EffectKind::Normalize => "reverb_merged_audio",
            EffectKind::Loop => "echo_merged_audio",
        }
    }

    /// Noun used in "Merge the audio files before applying ..."
    pub fn treatment(self) -> &'static str {
        match self {
            EffectKind::FadeIn => "equalization",
            EffectKind::FadeOut => "noise reduction",
            EffectKind::Normalize => "reverb",
            EffectKind::Loop => "echo",
        }
    }

    /// Verb phrase used in "Failed to ..."
    pub fn failure_action(self) -> &'static str {
        match self {
            EffectKind::FadeIn => "equalize audio",
            EffectKind::FadeOut => "reduce noise",
            EffectKind::Normalize => "add reverb",
            EffectKind::Loop => "add echo",
        }
    }

    pub fn success_message(self, file_name: &str) -> String {
        match self {
            EffectKind::FadeIn => format!("Equalized merged audio saved as {}", file_name),
            EffectKind::FadeOut => format!("Noise reduced merged audio saved as {}", file_name),
            EffectKind::Normalize => {
                format!("Reverb added to merged audio saved as {}", file_name)
            }
            EffectKind::Loop => format!("Echo added to merged audio saved as {}", file_name),
        }
    }
}

impl fmt::Display for EffectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for EffectKind {
    type Err = String;

    /// Accepts both the button names and the underlying effect names
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase().replace(['_', ' '], "-");
        match key.as_str() {
            "equalize" | "fade-in" | "fadein" => Ok(EffectKind::FadeIn),
            "reduce-noise" | "fade-out" | "fadeout" => Ok(EffectKind::FadeOut),
            "reverb" | "add-reverb" | "normalize" => Ok(EffectKind::Normalize),
            "echo" | "add-echo" | "loop" => Ok(EffectKind::Loop),
            _ => Err(format!(
                "unknown effect '{}' (expected equalize, reduce-noise, reverb or echo)",
                s.trim()
            )),
        }
    }
}
