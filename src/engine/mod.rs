//! Audio Engine Module
//!
//! The audio library the session delegates to:
//! - Clip type and editing (sub-range extraction, concatenation)
//! - File I/O (decode common formats, encode WAV)

pub mod clip;
pub mod io;

pub use clip::{concatenate, AudioClip, ClipStats};
pub use io::{
    decode_file, encode_wav, generate_test_tone, is_audio_path, ExportFormat, AUDIO_EXTENSIONS,
    OUTPUT_EXTENSION,
};
