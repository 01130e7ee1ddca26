//! Whole-frame audio filters

/// Linear fades
pub mod fade;
/// Output normalization
pub mod normalize;

pub use fade::Fade;
pub use normalize::Normalize;

use crate::core::AudioFrame;
use crate::error::AudioResult;

/// Trait for audio filters
pub trait Filter {
    /// Process an audio frame through this filter
    fn process(&mut self, frame: &AudioFrame) -> AudioResult<AudioFrame>;
}
