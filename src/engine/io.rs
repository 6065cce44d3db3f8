//! Audio file I/O
//!
//! Decoding accepts WAV (read with `hound`) and MP3, OGG Vorbis and FLAC
//! (read with `symphonia`). Clips keep the file's own sample rate and
//! channel count. Encoding always writes WAV.

use std::fs::File;
use std::path::Path;

use hound::{SampleFormat, WavReader, WavSpec, WavWriter};
use log::{debug, warn};
use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::DecoderOptions;
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

use crate::engine::clip::AudioClip;
use crate::error::{ClipError, Result};

/// File extensions offered by the file picker
pub const AUDIO_EXTENSIONS: [&str; 4] = ["mp3", "wav", "ogg", "flac"];

/// Extension of every file this crate writes
pub const OUTPUT_EXTENSION: &str = "wav";

/// Check whether a path carries one of the [`AUDIO_EXTENSIONS`]
pub fn is_audio_path(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            AUDIO_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
        .unwrap_or(false)
}

/// Export format configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportFormat {
    /// Bit depth: 16, 24 (integer PCM) or 32 (float)
    pub bit_depth: u16,
}

impl Default for ExportFormat {
    fn default() -> Self {
        Self::cd_quality()
    }
}

impl ExportFormat {
    pub fn new(bit_depth: u16) -> Self {
        ExportFormat { bit_depth }
    }

    /// 16-bit integer PCM
    pub fn cd_quality() -> Self {
        ExportFormat { bit_depth: 16 }
    }

    /// 24-bit integer PCM
    pub fn high_quality() -> Self {
        ExportFormat { bit_depth: 24 }
    }

    /// 32-bit float
    pub fn max_quality() -> Self {
        ExportFormat { bit_depth: 32 }
    }
}

/// Decode an audio file into a clip
///
/// # Errors
/// * `FileNotFound` - If the file does not exist
/// * `Decode` - If the container or codec data cannot be read
/// * `UnsupportedFormat` - If no decoder handles the codec or bit depth
/// * `EmptyAudio` - If the file decodes to zero frames
pub fn decode_file(path: &Path) -> Result<AudioClip> {
    if !path.exists() {
        return Err(ClipError::FileNotFound {
            path: path.display().to_string(),
        });
    }

    let is_wav = path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("wav"))
        .unwrap_or(false);

    let clip = if is_wav {
        decode_wav(path)?
    } else {
        decode_with_symphonia(path)?
    };

    if clip.is_empty() {
        return Err(ClipError::EmptyAudio);
    }

    debug!(
        "decoded {}: {} frames, {} Hz, {} channel(s)",
        path.display(),
        clip.len(),
        clip.sample_rate(),
        clip.channels()
    );

    Ok(clip)
}

/// Write a clip to a WAV file
///
/// # Errors
/// * `EmptyAudio` - If the clip has no frames
/// * `UnsupportedFormat` - If the bit depth is not 16, 24 or 32
/// * `Encode` / `Io` - If the file cannot be written
pub fn encode_wav(clip: &AudioClip, path: &Path, format: ExportFormat) -> Result<()> {
    if clip.is_empty() {
        return Err(ClipError::EmptyAudio);
    }

    let sample_format = match format.bit_depth {
        16 | 24 => SampleFormat::Int,
        32 => SampleFormat::Float,
        other => {
            return Err(ClipError::UnsupportedFormat {
                format: format!("{}-bit audio (only 16, 24, 32 supported)", other),
            })
        }
    };

    let spec = WavSpec {
        channels: clip.channels() as u16,
        sample_rate: clip.sample_rate(),
        bits_per_sample: format.bit_depth,
        sample_format,
    };

    let mut writer = WavWriter::create(path, spec).map_err(|e| ClipError::encode(path, e))?;

    for sample in clip.to_interleaved() {
        let written = match format.bit_depth {
            16 => writer.write_sample((sample * 32767.0).clamp(-32768.0, 32767.0) as i16),
            // 24-bit stored as i32 in hound
            24 => writer.write_sample((sample * 8388607.0).clamp(-8388608.0, 8388607.0) as i32),
            _ => writer.write_sample(sample),
        };
        written.map_err(|e| ClipError::encode(path, e))?;
    }

    writer.finalize().map_err(|e| ClipError::encode(path, e))?;

    debug!("wrote {} ({} frames)", path.display(), clip.len());
    Ok(())
}

/// Generate a sine tone with the same signal on every channel
pub fn generate_test_tone(
    frequency: f32,
    duration_secs: f32,
    sample_rate: u32,
    channels: usize,
) -> Result<AudioClip> {
    let num_samples = (duration_secs * sample_rate as f32).round() as usize;
    let angular_freq = 2.0 * std::f32::consts::PI * frequency / sample_rate as f32;
    let tone: Vec<f32> = (0..num_samples)
        .map(|i| 0.5 * (angular_freq * i as f32).sin())
        .collect();

    AudioClip::from_channels(vec![tone; channels.max(1)], sample_rate)
}

// ============================================================================
// Internal helper functions
// ============================================================================

/// Read a WAV file with hound
///
/// Encodings hound does not handle (ADPCM, mu-law, A-law) go to symphonia.
fn decode_wav(path: &Path) -> Result<AudioClip> {
    let reader = match WavReader::open(path) {
        Ok(reader) => reader,
        Err(hound::Error::Unsupported) => {
            debug!("{}: WAV encoding not handled by hound, using symphonia", path.display());
            return decode_with_symphonia(path);
        }
        Err(other) => return Err(ClipError::decode(path, "failed to open WAV file", other)),
    };

    let spec = reader.spec();
    let interleaved =
        read_samples_as_f32(reader, path, spec.bits_per_sample, spec.sample_format)?;

    AudioClip::from_interleaved(&interleaved, spec.channels as usize, spec.sample_rate)
}

fn read_samples_as_f32<R: std::io::Read>(
    mut reader: WavReader<R>,
    path: &Path,
    bits_per_sample: u16,
    sample_format: SampleFormat,
) -> Result<Vec<f32>> {
    let err = |e: hound::Error| ClipError::decode(path, "failed to read WAV samples", e);

    match (sample_format, bits_per_sample) {
        (SampleFormat::Float, _) => reader
            .samples::<f32>()
            .collect::<std::result::Result<Vec<f32>, _>>()
            .map_err(err),
        (SampleFormat::Int, 8) => reader
            .samples::<i8>()
            .map(|s| s.map(|v| v as f32 / 128.0))
            .collect::<std::result::Result<Vec<f32>, _>>()
            .map_err(err),
        (SampleFormat::Int, 16) => reader
            .samples::<i16>()
            .map(|s| s.map(|v| v as f32 / 32768.0))
            .collect::<std::result::Result<Vec<f32>, _>>()
            .map_err(err),
        (SampleFormat::Int, 24) => reader
            .samples::<i32>()
            .map(|s| s.map(|v| v as f32 / 8388608.0))
            .collect::<std::result::Result<Vec<f32>, _>>()
            .map_err(err),
        (SampleFormat::Int, 32) => reader
            .samples::<i32>()
            .map(|s| s.map(|v| v as f32 / 2147483648.0))
            .collect::<std::result::Result<Vec<f32>, _>>()
            .map_err(err),
        (SampleFormat::Int, bits) => Err(ClipError::UnsupportedFormat {
            format: format!("{}-bit integer audio", bits),
        }),
    }
}

fn decode_with_symphonia(path: &Path) -> Result<AudioClip> {
    let file = File::open(path)?;
    let mss = MediaSourceStream::new(Box::new(file), Default::default());

    let mut hint = Hint::new();
    if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
        hint.with_extension(ext);
    }

    let probed = symphonia::default::get_probe()
        .format(
            &hint,
            mss,
            &FormatOptions::default(),
            &MetadataOptions::default(),
        )
        .map_err(|e| ClipError::decode(path, "unrecognised audio container", e))?;

    let mut format = probed.format;

    let track = format.default_track().ok_or_else(|| ClipError::Decode {
        path: path.display().to_string(),
        reason: "no audio track".to_string(),
        source: None,
    })?;
    let track_id = track.id;
    let codec_params = track.codec_params.clone();

    let mut sample_rate = codec_params.sample_rate;
    let mut channels = codec_params.channels.map(|c| c.count());

    let mut decoder = symphonia::default::get_codecs()
        .make(&codec_params, &DecoderOptions::default())
        .map_err(|e| match e {
            SymphoniaError::Unsupported(what) => ClipError::UnsupportedFormat {
                format: what.to_string(),
            },
            other => ClipError::decode(path, "failed to create decoder", other),
        })?;

    let mut interleaved: Vec<f32> = Vec::new();

    loop {
        let packet = match format.next_packet() {
            Ok(p) => p,
            Err(SymphoniaError::IoError(e)) if e.kind() == std::io::ErrorKind::UnexpectedEof => {
                break;
            }
            Err(SymphoniaError::ResetRequired) => break,
            Err(e) => return Err(ClipError::decode(path, "failed to read packet", e)),
        };

        if packet.track_id() != track_id {
            continue;
        }

        let decoded = match decoder.decode(&packet) {
            Ok(decoded) => decoded,
            Err(SymphoniaError::DecodeError(reason)) => {
                warn!("skipping corrupt packet in {}: {}", path.display(), reason);
                continue;
            }
            Err(e) => return Err(ClipError::decode(path, "failed to decode packet", e)),
        };

        let spec = *decoded.spec();
        sample_rate.get_or_insert(spec.rate);
        channels.get_or_insert(spec.channels.count());

        let mut sample_buf = SampleBuffer::<f32>::new(decoded.capacity() as u64, spec);
        sample_buf.copy_interleaved_ref(decoded);
        interleaved.extend_from_slice(sample_buf.samples());
    }

    if interleaved.is_empty() {
        return Err(ClipError::EmptyAudio);
    }

    let sample_rate = sample_rate.ok_or_else(|| ClipError::Decode {
        path: path.display().to_string(),
        reason: "unknown sample rate".to_string(),
        source: None,
    })?;

    AudioClip::from_interleaved(&interleaved, channels.unwrap_or(1), sample_rate)
}

// ============================================================================
// Tests
// ============================================================================
