//! DSP Effects Library
//!
//! Whole-clip effects applied to the merged audio.
//! All effects implement the `Effect` trait for uniform processing.

mod effect;
mod fade;
mod normalize;
mod repeat;

pub use effect::Effect;
pub use fade::{FadeIn, FadeOut, DEFAULT_FADE_SECS};
pub use normalize::Normalize;
pub use repeat::{Loop, DEFAULT_LOOP_COUNT};
