//! Audio decoder implementations

/// Symphonia decoder
pub mod symphonia;

pub use symphonia::SymphoniaDecoder;

use crate::core::AudioFrame;
use crate::error::AudioResult;
use std::path::Path;

/// Trait for audio decoders
pub trait Decoder: Send {
    /// Get next audio frame from the stream
    fn decode_frame(&mut self) -> AudioResult<Option<AudioFrame>>;

    /// Check if decoder is finished
    fn is_finished(&self) -> bool;
}

/// Create a decoder from a file path
pub fn from_file<P: AsRef<Path>>(path: P) -> AudioResult<Box<dyn Decoder>> {
    SymphoniaDecoder::from_file(path).map(|d| Box::new(d) as Box<dyn Decoder>)
}

/// Decode a whole file into one interleaved frame
pub fn read_audio<P: AsRef<Path>>(path: P) -> AudioResult<AudioFrame> {
    let mut decoder = SymphoniaDecoder::from_file(path)?;
    let sample_rate = decoder.sample_rate();
    let channels = decoder.channels();

    let mut samples = Vec::new();
    while let Some(frame) = Decoder::decode_frame(&mut decoder)? {
        samples.extend_from_slice(frame.samples());
    }

    AudioFrame::new(samples, sample_rate, channels)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Channels;
    use crate::encoder::write_wav;

    #[test]
    fn test_read_back_written_wav() {
        let file = tempfile::Builder::new().suffix(".wav").tempfile().unwrap();
        let samples: Vec<f32> = (0..2000).map(|i| ((i as f32) * 0.01).sin() * 0.5).collect();
        let frame = AudioFrame::new(samples.clone(), 22050, Channels::Stereo).unwrap();
        write_wav(file.path(), &frame).unwrap();

        let decoded = read_audio(file.path()).unwrap();
        assert_eq!(decoded.sample_rate(), 22050);
        assert_eq!(decoded.channels(), Channels::Stereo);
        assert_eq!(decoded.samples(), samples.as_slice());
    }

    #[test]
    fn test_boxed_decoder_finishes() {
        let file = tempfile::Builder::new().suffix(".wav").tempfile().unwrap();
        let frame = AudioFrame::new(vec![0.25; 64], 8000, Channels::Mono).unwrap();
        write_wav(file.path(), &frame).unwrap();

        let mut decoder = from_file(file.path()).unwrap();
        let mut total = 0;
        while let Some(frame) = decoder.decode_frame().unwrap() {
            total += frame.samples().len();
        }
        assert_eq!(total, 64);
        assert!(decoder.is_finished());
    }
}
