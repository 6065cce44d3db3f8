//! Loop Effect
//!
//! Plays a clip back-to-back a fixed number of times.

use crate::dsp::effect::Effect;
use crate::engine::{concatenate, AudioClip};
use crate::error::{ClipError, Result};

/// Repeat count used by the session effects
pub const DEFAULT_LOOP_COUNT: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Loop {
    pub count: usize,
}

impl Loop {
    pub fn new(count: usize) -> Self {
        Self { count }
    }
}

impl Default for Loop {
    fn default() -> Self {
        Self::new(DEFAULT_LOOP_COUNT)
    }
}

impl Effect for Loop {
    fn apply(&self, clip: &AudioClip) -> Result<AudioClip> {
        if self.count == 0 {
            return Err(ClipError::InvalidParameter {
                name: "count",
                reason: "loop count must be at least 1".to_string(),
            });
        }
        let copies = vec![clip; self.count];
        concatenate(&copies)
    }

    fn effect_type(&self) -> &'static str {
        "loop"
    }

    fn display_name(&self) -> &str {
        "Loop"
    }
}
