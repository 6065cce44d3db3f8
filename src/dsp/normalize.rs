//! Peak normalization

use crate::dsp::effect::Effect;
use crate::engine::AudioClip;
use crate::error::Result;

/// Peak level normalization targets (linear full scale)
const TARGET_PEAK: f32 = 1.0;

/// Scale a clip so its loudest sample reaches full scale
///
/// Silent clips are returned unchanged.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Normalize;

impl Effect for Normalize {
    fn apply(&self, clip: &AudioClip) -> Result<AudioClip> {
        let peak = clip.peak();
        let mut output = clip.clone();
        if peak <= 0.0 || !peak.is_finite() {
            return Ok(output);
        }

        let gain = TARGET_PEAK / peak;
        for channel in output.channels_mut() {
            for sample in channel.iter_mut() {
                *sample *= gain;
            }
        }
        Ok(output)
    }

    fn effect_type(&self) -> &'static str {
        "normalize"
    }

    fn display_name(&self) -> &str {
        "Normalize"
    }
}
