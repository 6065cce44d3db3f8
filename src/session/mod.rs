//! Audio session
//!
//! Holds two source clips and one merged clip, and runs the load, describe,
//! trim, merge and effect operations on them.

pub mod command;
pub mod controller;
pub mod effect_kind;
pub mod error;
pub mod notice;
pub mod state;

pub use command::{Command, Dispatch, Outcome};
pub use controller::Session;
pub use effect_kind::EffectKind;
pub use error::SessionError;
pub use notice::{Notice, Notifier, Severity};
pub use state::{SessionState, Slot};
