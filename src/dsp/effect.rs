//! Effect trait definition

use crate::engine::AudioClip;
use crate::error::Result;

/// Base trait for clip effects
///
/// Effects read a clip and return a new one; the input is never modified,
/// so applying the same effect twice to the same clip gives identical
/// output.
pub trait Effect: Send + Sync {
    /// Produce the processed clip
    fn apply(&self, clip: &AudioClip) -> Result<AudioClip>;

    /// Get the effect type identifier
    fn effect_type(&self) -> &'static str;

    /// Get human-readable display name
    fn display_name(&self) -> &str;
}
