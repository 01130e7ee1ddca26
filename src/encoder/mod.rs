//! Audio encoder implementations

/// WAV encoder
pub mod wav;

pub use wav::WavEncoder;

use crate::core::AudioFrame;
use crate::error::AudioResult;
use std::path::Path;

/// Trait for audio encoders
pub trait Encoder {
    /// Encode an audio frame to output
    fn encode(&mut self, frame: &AudioFrame) -> AudioResult<()>;

    /// Finalize encoding (flush any remaining data)
    fn finalize(&mut self) -> AudioResult<()> {
        Ok(())
    }
}

/// Write a whole frame to a 32-bit float WAV file
pub fn write_wav<P: AsRef<Path>>(path: P, frame: &AudioFrame) -> AudioResult<()> {
    let mut encoder = WavEncoder::new(path, frame.sample_rate(), frame.channels())?;
    encoder.encode(frame)?;
    encoder.finalize()
}
