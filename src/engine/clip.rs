//! Audio Clip
//!
//! The in-memory clip type produced by decoding and by every editing
//! operation. Clips are never edited in place once handed out: trimming,
//! concatenation and effects all return a new clip.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{ClipError, Result};

/// Tolerance used when comparing a requested time against the clip duration
const TIME_EPSILON_SECS: f64 = 1e-9;

// ============================================================================
// Clip Statistics
// ============================================================================

/// Display metadata for a clip
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClipStats {
    /// Duration in seconds
    pub duration_secs: f64,
    /// Sample rate in Hz
    pub sample_rate: u32,
    /// Number of channels
    pub channels: usize,
}

impl fmt::Display for ClipStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Duration: {:.2} s, Sample Rate: {} Hz, Channels: {}",
            self.duration_secs, self.sample_rate, self.channels
        )
    }
}

// ============================================================================
// Audio Clip
// ============================================================================

/// Decoded audio held as non-interleaved 32-bit float samples
///
/// Each channel is a separate `Vec<f32>`; all channels have the same length.
///
/// # Example
/// ```
/// use clipmerge::engine::AudioClip;
///
/// let clip = AudioClip::silence(44100, 2, 44100).unwrap();
/// assert_eq!(clip.channels(), 2);
/// assert!((clip.duration_secs() - 1.0).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct AudioClip {
    samples: Vec<Vec<f32>>,
    sample_rate: u32,
}

impl AudioClip {
    /// Build a clip from per-channel sample data
    ///
    /// # Errors
    /// * `InvalidParameter` - no channels, a zero sample rate, or channels
    ///   of differing lengths
    pub fn from_channels(samples: Vec<Vec<f32>>, sample_rate: u32) -> Result<Self> {
        if samples.is_empty() {
            return Err(ClipError::InvalidParameter {
                name: "channels",
                reason: "a clip needs at least one channel".to_string(),
            });
        }
        if sample_rate == 0 {
            return Err(ClipError::InvalidParameter {
                name: "sample_rate",
                reason: "sample rate must be positive".to_string(),
            });
        }
        let frames = samples[0].len();
        if samples.iter().any(|ch| ch.len() != frames) {
            return Err(ClipError::InvalidParameter {
                name: "channels",
                reason: "all channels must have the same length".to_string(),
            });
        }
        Ok(Self {
            samples,
            sample_rate,
        })
    }

    /// Build a clip from interleaved sample data (L, R, L, R, ... for stereo)
    pub fn from_interleaved(
        interleaved: &[f32],
        channels: usize,
        sample_rate: u32,
    ) -> Result<Self> {
        if channels == 0 || interleaved.len() % channels != 0 {
            return Err(ClipError::InvalidParameter {
                name: "channels",
                reason: format!(
                    "interleaved data length {} is not divisible by channel count {}",
                    interleaved.len(),
                    channels
                ),
            });
        }

        let frames = interleaved.len() / channels;
        let mut samples = vec![Vec::with_capacity(frames); channels];
        for frame in interleaved.chunks_exact(channels) {
            for (ch, &sample) in frame.iter().enumerate() {
                samples[ch].push(sample);
            }
        }

        Self::from_channels(samples, sample_rate)
    }

    /// A clip of `frames` zeroed frames
    pub fn silence(frames: usize, channels: usize, sample_rate: u32) -> Result<Self> {
        Self::from_channels(vec![vec![0.0; frames]; channels.max(1)], sample_rate)
    }

    /// Convert the clip to interleaved format
    pub fn to_interleaved(&self) -> Vec<f32> {
        let mut interleaved = Vec::with_capacity(self.channels() * self.len());
        for frame in 0..self.len() {
            for channel in &self.samples {
                interleaved.push(channel[frame]);
            }
        }
        interleaved
    }

    #[inline]
    pub fn channels(&self) -> usize {
        self.samples.len()
    }

    /// Number of frames (samples per channel)
    #[inline]
    pub fn len(&self) -> usize {
        self.samples.first().map(|ch| ch.len()).unwrap_or(0)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[inline]
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Duration in seconds
    #[inline]
    pub fn duration_secs(&self) -> f64 {
        self.len() as f64 / self.sample_rate as f64
    }

    #[inline]
    pub fn channel(&self, index: usize) -> &[f32] {
        &self.samples[index]
    }

    pub(crate) fn channels_mut(&mut self) -> impl Iterator<Item = &mut Vec<f32>> {
        self.samples.iter_mut()
    }

    pub fn stats(&self) -> ClipStats {
        ClipStats {
            duration_secs: self.duration_secs(),
            sample_rate: self.sample_rate,
            channels: self.channels(),
        }
    }

    /// Peak absolute sample value across all channels
    pub fn peak(&self) -> f32 {
        self.samples
            .iter()
            .flat_map(|channel| channel.iter())
            .map(|&s| s.abs())
            .fold(0.0_f32, f32::max)
    }

    /// Extract the half-open time range `[start_secs, end_secs)`
    ///
    /// Negative times count back from the end of the clip. After that the
    /// range must satisfy `0 <= start < end <= duration`.
    ///
    /// # Errors
    /// * `RangeOutOfBounds` - the resolved range does not fit the clip
    /// * `EmptyAudio` - the range is shorter than one frame
    pub fn subclip(&self, start_secs: f64, end_secs: f64) -> Result<Self> {
        let duration = self.duration_secs();
        let start = resolve_time(start_secs, duration);
        let end = resolve_time(end_secs, duration);

        if start < 0.0 || end > duration + TIME_EPSILON_SECS || start >= end {
            return Err(ClipError::RangeOutOfBounds {
                start_secs,
                end_secs,
                duration_secs: duration,
            });
        }

        let rate = self.sample_rate as f64;
        let first = ((start * rate).round() as usize).min(self.len());
        let last = ((end * rate).round() as usize).min(self.len());
        if first >= last {
            return Err(ClipError::EmptyAudio);
        }

        let samples = self
            .samples
            .iter()
            .map(|channel| channel[first..last].to_vec())
            .collect();

        Ok(Self {
            samples,
            sample_rate: self.sample_rate,
        })
    }

    /// This clip at another sample rate
    ///
    /// Uses linear interpolation.
    pub fn resampled(&self, target_rate: u32) -> Result<Self> {
        if target_rate == 0 {
            return Err(ClipError::InvalidParameter {
                name: "sample_rate",
                reason: "sample rate must be positive".to_string(),
            });
        }
        if target_rate == self.sample_rate {
            return Ok(self.clone());
        }

        let ratio = target_rate as f64 / self.sample_rate as f64;
        let samples = self
            .samples
            .iter()
            .map(|channel| resample_linear(channel, ratio))
            .collect();

        Ok(Self {
            samples,
            sample_rate: target_rate,
        })
    }

    /// This clip with `count` channels
    ///
    /// Extra channels repeat the existing ones in order (mono duplicates);
    /// surplus channels are dropped.
    pub fn with_channels(&self, count: usize) -> Self {
        let source = self.channels();
        let samples = (0..count.max(1))
            .map(|ch| self.samples[ch % source].clone())
            .collect();
        Self {
            samples,
            sample_rate: self.sample_rate,
        }
    }

    /// Append another clip that already has this clip's rate and channel count
    fn append(&mut self, other: &AudioClip) {
        for (dst, src) in self.samples.iter_mut().zip(other.samples.iter()) {
            dst.extend_from_slice(src);
        }
    }
}

/// Concatenate clips in order
///
/// The result takes the first clip's sample rate and the widest channel
/// count among the inputs; other clips are resampled and up-mixed to match.
pub fn concatenate(clips: &[&AudioClip]) -> Result<AudioClip> {
    let first = clips.first().ok_or_else(|| ClipError::InvalidParameter {
        name: "clips",
        reason: "nothing to concatenate".to_string(),
    })?;

    let sample_rate = first.sample_rate;
    let channels = clips.iter().map(|c| c.channels()).max().unwrap_or(1);
    let total: usize = clips.iter().map(|c| c.len()).sum();

    let mut output = AudioClip {
        samples: vec![Vec::with_capacity(total); channels],
        sample_rate,
    };

    for clip in clips {
        let conformed = clip.resampled(sample_rate)?.with_channels(channels);
        output.append(&conformed);
    }

    Ok(output)
}

fn resolve_time(t: f64, duration: f64) -> f64 {
    if t < 0.0 {
        duration + t
    } else {
        t
    }
}

/// Linear interpolation resampling
///
/// TODO: Replace with sinc interpolation; linear interpolation aliases when
/// downsampling.
fn resample_linear(samples: &[f32], ratio: f64) -> Vec<f32> {
    if samples.is_empty() {
        return Vec::new();
    }

    let source_len = samples.len();
    let target_len = ((source_len as f64) * ratio).round() as usize;
    let mut output = Vec::with_capacity(target_len);

    for i in 0..target_len {
        let src_pos = i as f64 / ratio;
        let src_idx = src_pos.floor() as usize;
        let frac = (src_pos - src_idx as f64) as f32;

        let sample = if src_idx + 1 < source_len {
            samples[src_idx] * (1.0 - frac) + samples[src_idx + 1] * frac
        } else if src_idx < source_len {
            samples[src_idx]
        } else {
            0.0
        };

        output.push(sample);
    }

    output
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn ramp(frames: usize, sample_rate: u32) -> AudioClip {
        let samples = (0..frames).map(|i| i as f32 / frames as f32).collect();
        AudioClip::from_channels(vec![samples], sample_rate).unwrap()
    }

    #[test]
    fn test_from_channels_rejects_ragged() {
        let result = AudioClip::from_channels(vec![vec![0.0; 10], vec![0.0; 9]], 44100);
        assert!(matches!(result, Err(ClipError::InvalidParameter { .. })));
    }

    #[test]
    fn test_from_channels_rejects_zero_rate() {
        assert!(AudioClip::from_channels(vec![vec![0.0; 10]], 0).is_err());
    }

    #[test]
    fn test_from_interleaved_stereo() {
        let clip = AudioClip::from_interleaved(&[0.1, 0.2, 0.3, 0.4, 0.5, 0.6], 2, 48000).unwrap();
        assert_eq!(clip.channels(), 2);
        assert_eq!(clip.len(), 3);
        assert_eq!(clip.channel(0), &[0.1, 0.3, 0.5]);
        assert_eq!(clip.channel(1), &[0.2, 0.4, 0.6]);
        assert_eq!(clip.to_interleaved(), vec![0.1, 0.2, 0.3, 0.4, 0.5, 0.6]);
    }

    #[test]
    fn test_from_interleaved_invalid() {
        assert!(AudioClip::from_interleaved(&[0.1, 0.2, 0.3], 2, 48000).is_err());
    }

    #[test]
    fn test_stats_display() {
        let clip = AudioClip::silence(44100 * 10, 1, 44100).unwrap();
        assert_eq!(
            clip.stats().to_string(),
            "Duration: 10.00 s, Sample Rate: 44100 Hz, Channels: 1"
        );
    }

    #[test]
    fn test_subclip_duration() {
        let clip = AudioClip::silence(44100 * 10, 2, 44100).unwrap();
        let trimmed = clip.subclip(1.5, 4.25).unwrap();
        assert_abs_diff_eq!(trimmed.duration_secs(), 2.75, epsilon = 1.0 / 44100.0);
        assert_eq!(trimmed.channels(), 2);
        // Source untouched
        assert_eq!(clip.len(), 441000);
    }

    #[test]
    fn test_subclip_keeps_samples() {
        let clip = ramp(1000, 1000);
        let trimmed = clip.subclip(0.1, 0.2).unwrap();
        assert_eq!(trimmed.len(), 100);
        assert_eq!(trimmed.channel(0)[0], clip.channel(0)[100]);
        assert_eq!(trimmed.channel(0)[99], clip.channel(0)[199]);
    }

    #[test]
    fn test_subclip_full_length() {
        let clip = ramp(1000, 1000);
        let trimmed = clip.subclip(0.0, 1.0).unwrap();
        assert_eq!(trimmed, clip);
    }

    #[test]
    fn test_subclip_negative_counts_from_end() {
        let clip = ramp(1000, 1000);
        let tail = clip.subclip(-0.25, 1.0).unwrap();
        assert_eq!(tail.len(), 250);
        let without_tail = clip.subclip(0.0, -0.25).unwrap();
        assert_eq!(without_tail.len(), 750);
    }

    #[test]
    fn test_subclip_end_past_duration() {
        let clip = ramp(1000, 1000);
        let result = clip.subclip(0.0, 2.0);
        assert!(matches!(result, Err(ClipError::RangeOutOfBounds { .. })));
    }

    #[test]
    fn test_subclip_start_not_before_end() {
        let clip = ramp(1000, 1000);
        assert!(clip.subclip(0.5, 0.5).is_err());
        assert!(clip.subclip(0.6, 0.5).is_err());
    }

    #[test]
    fn test_subclip_shorter_than_a_frame() {
        let clip = ramp(1000, 1000);
        let result = clip.subclip(0.1, 0.1002);
        assert!(matches!(result, Err(ClipError::EmptyAudio)));
    }

    #[test]
    fn test_concatenate_order_and_duration() {
        let a = AudioClip::from_channels(vec![vec![1.0; 100]], 1000).unwrap();
        let b = AudioClip::from_channels(vec![vec![-1.0; 50]], 1000).unwrap();
        let merged = concatenate(&[&a, &b]).unwrap();

        assert_eq!(merged.len(), 150);
        assert_abs_diff_eq!(merged.duration_secs(), a.duration_secs() + b.duration_secs());
        assert_eq!(merged.channel(0)[99], 1.0);
        assert_eq!(merged.channel(0)[100], -1.0);
    }

    #[test]
    fn test_concatenate_upmixes_mono() {
        let mono = AudioClip::from_channels(vec![vec![0.5; 10]], 1000).unwrap();
        let stereo = AudioClip::from_channels(vec![vec![0.1; 10], vec![0.2; 10]], 1000).unwrap();
        let merged = concatenate(&[&mono, &stereo]).unwrap();

        assert_eq!(merged.channels(), 2);
        assert_eq!(merged.channel(1)[0], 0.5);
        assert_eq!(merged.channel(1)[10], 0.2);
    }

    #[test]
    fn test_concatenate_uses_first_sample_rate() {
        let a = AudioClip::silence(44100, 1, 44100).unwrap();
        let b = AudioClip::silence(48000, 1, 48000).unwrap();
        let merged = concatenate(&[&a, &b]).unwrap();

        assert_eq!(merged.sample_rate(), 44100);
        assert_abs_diff_eq!(merged.duration_secs(), 2.0, epsilon = 1e-3);
    }

    #[test]
    fn test_concatenate_nothing() {
        assert!(concatenate(&[]).is_err());
    }

    #[test]
    fn test_resample_linear_upsample() {
        let resampled = resample_linear(&[0.0, 1.0, 0.0], 2.0);
        assert_eq!(resampled.len(), 6);
        assert_abs_diff_eq!(resampled[1], 0.5, epsilon = 0.01);
    }

    #[test]
    fn test_resample_linear_downsample() {
        let samples = vec![0.0, 0.5, 1.0, 0.5, 0.0, -0.5, -1.0, -0.5];
        assert_eq!(resample_linear(&samples, 0.5).len(), 4);
    }

    #[test]
    fn test_with_channels_drops_surplus() {
        let stereo = AudioClip::from_channels(vec![vec![0.1; 4], vec![0.2; 4]], 1000).unwrap();
        let mono = stereo.with_channels(1);
        assert_eq!(mono.channels(), 1);
        assert_eq!(mono.channel(0), stereo.channel(0));
    }

    #[test]
    fn test_peak() {
        let clip = AudioClip::from_channels(vec![vec![0.1, -0.7, 0.3]], 1000).unwrap();
        assert_abs_diff_eq!(clip.peak(), 0.7);
    }
}
