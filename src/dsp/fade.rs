//! Fade Effects
//!
//! Linear gain ramps at the start (fade-in) or end (fade-out) of a clip.
//! A clip shorter than the fade never reaches full gain, matching a ramp
//! of `min(t / duration, 1)`.

use crate::dsp::effect::Effect;
use crate::engine::AudioClip;
use crate::error::{ClipError, Result};

/// Fade length used by the session effects (seconds)
pub const DEFAULT_FADE_SECS: f64 = 1.0;

fn check_duration(duration_secs: f64) -> Result<()> {
    if duration_secs.is_finite() && duration_secs > 0.0 {
        Ok(())
    } else {
        Err(ClipError::InvalidParameter {
            name: "duration",
            reason: format!("fade duration must be positive, got {}", duration_secs),
        })
    }
}

/// Apply `gain(frame_index)` to every channel of a copy of `clip`
fn with_gain_curve(clip: &AudioClip, gain: impl Fn(usize) -> f32) -> AudioClip {
    let mut output = clip.clone();
    for channel in output.channels_mut() {
        for (i, sample) in channel.iter_mut().enumerate() {
            *sample *= gain(i);
        }
    }
    output
}

/// Ramp from silence to full level over the first `duration_secs`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FadeIn {
    pub duration_secs: f64,
}

impl FadeIn {
    pub fn new(duration_secs: f64) -> Self {
        Self { duration_secs }
    }
}

impl Default for FadeIn {
    fn default() -> Self {
        Self::new(DEFAULT_FADE_SECS)
    }
}

impl Effect for FadeIn {
    fn apply(&self, clip: &AudioClip) -> Result<AudioClip> {
        check_duration(self.duration_secs)?;
        let fade_frames = self.duration_secs * clip.sample_rate() as f64;
        Ok(with_gain_curve(clip, |i| {
            (i as f64 / fade_frames).min(1.0) as f32
        }))
    }

    fn effect_type(&self) -> &'static str {
        "fade_in"
    }

    fn display_name(&self) -> &str {
        "Fade In"
    }
}

/// Ramp from full level to silence over the last `duration_secs`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FadeOut {
    pub duration_secs: f64,
}

impl FadeOut {
    pub fn new(duration_secs: f64) -> Self {
        Self { duration_secs }
    }
}

impl Default for FadeOut {
    fn default() -> Self {
        Self::new(DEFAULT_FADE_SECS)
    }
}

impl Effect for FadeOut {
    fn apply(&self, clip: &AudioClip) -> Result<AudioClip> {
        check_duration(self.duration_secs)?;
        let fade_frames = self.duration_secs * clip.sample_rate() as f64;
        let last = clip.len().saturating_sub(1);
        Ok(with_gain_curve(clip, |i| {
            ((last - i) as f64 / fade_frames).min(1.0) as f32
        }))
    }

    fn effect_type(&self) -> &'static str {
        "fade_out"
    }

    fn display_name(&self) -> &str {
        "Fade Out"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn constant(frames: usize, sample_rate: u32) -> AudioClip {
        AudioClip::from_channels(vec![vec![0.8; frames], vec![-0.8; frames]], sample_rate).unwrap()
    }

    #[test]
    fn test_fade_in_ramp() {
        let clip = constant(4000, 1000);
        let faded = FadeIn::default().apply(&clip).unwrap();

        assert_eq!(faded.channel(0)[0], 0.0);
        assert_abs_diff_eq!(faded.channel(0)[500], 0.4, epsilon = 1e-6);
        assert_abs_diff_eq!(faded.channel(1)[500], -0.4, epsilon = 1e-6);
        assert_eq!(faded.channel(0)[1000], 0.8);
        assert_eq!(faded.channel(0)[3999], 0.8);
    }

    #[test]
    fn test_fade_out_ramp() {
        let clip = constant(4000, 1000);
        let faded = FadeOut::default().apply(&clip).unwrap();

        assert_eq!(faded.channel(0)[0], 0.8);
        assert_eq!(faded.channel(0)[2999], 0.8);
        assert_abs_diff_eq!(faded.channel(0)[3499], 0.4, epsilon = 1e-6);
        assert_eq!(faded.channel(0)[3999], 0.0);
    }

    #[test]
    fn test_fade_keeps_shape_and_input() {
        let clip = constant(2500, 1000);
        let faded = FadeIn::default().apply(&clip).unwrap();

        assert_eq!(faded.stats(), clip.stats());
        assert_eq!(clip.channel(0)[0], 0.8);
    }

    #[test]
    fn test_fade_longer_than_clip() {
        let clip = constant(500, 1000);
        let faded = FadeIn::default().apply(&clip).unwrap();
        // Halfway through a one-second ramp at the final frame
        assert!(faded.channel(0)[499] < 0.41);
    }

    #[test]
    fn test_fade_rejects_bad_duration() {
        let clip = constant(10, 1000);
        assert!(FadeIn::new(0.0).apply(&clip).is_err());
        assert!(FadeOut::new(f64::NAN).apply(&clip).is_err());
    }
}
