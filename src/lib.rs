//! Clipmerge - Two-Slot Audio Session
//!
//! Load two audio files, trim them, concatenate them and apply an effect to
//! the concatenation. Every result is written to a fixed file name.
//!
//! # Architecture
//!
//! - `engine`: clip type, sub-range extraction, concatenation, file I/O
//! - `dsp`: whole-clip effects (fades, normalize, loop)
//! - `session`: the session state and the command-driven controller
//! - `cli`: the interactive console front end

pub mod cli;
pub mod config;
pub mod dsp;
pub mod engine;
pub mod error;
pub mod session;

pub use config::SessionConfig;
pub use error::{ClipError, Result};
pub use session::{Command, Session, SessionError};
