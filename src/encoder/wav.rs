use crate::core::{AudioFrame, Channels};
use crate::error::{AudioError, AudioResult};
use hound::{WavSpec, WavWriter};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// WAV audio encoder (32-bit float samples)
pub struct WavEncoder {
    writer: Option<WavWriter<BufWriter<File>>>,
    sample_rate: u32,
    channels: Channels,
}

impl WavEncoder {
    /// Create a new WAV encoder to file
    pub fn new<P: AsRef<Path>>(path: P, sample_rate: u32, channels: Channels) -> AudioResult<Self> {
        let spec = WavSpec {
            channels: channels.count() as u16,
            sample_rate,
            bits_per_sample: 32,
            sample_format: hound::SampleFormat::Float,
        };

        let writer = WavWriter::create(path, spec)?;

        Ok(WavEncoder {
            writer: Some(writer),
            sample_rate,
            channels,
        })
    }

    /// Get the sample rate
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Get the channel configuration
    pub fn channels(&self) -> Channels {
        self.channels
    }

    /// Number of samples written so far (all channels)
    pub fn samples_written(&self) -> u32 {
        self.writer.as_ref().map(|w| w.len()).unwrap_or(0)
    }
}

impl super::Encoder for WavEncoder {
    fn encode(&mut self, frame: &AudioFrame) -> AudioResult<()> {
        if frame.sample_rate() != self.sample_rate {
            return Err(AudioError::EncodeError(format!(
                "frame sample rate {} does not match encoder rate {}",
                frame.sample_rate(),
                self.sample_rate
            )));
        }

        if frame.channels() != self.channels {
            return Err(AudioError::InvalidChannels {
                expected: self.channels.count(),
                got: frame.channels().count(),
            });
        }

        let writer = self
            .writer
            .as_mut()
            .ok_or_else(|| AudioError::EncodeError("Encoder already finalized".to_string()))?;

        for &sample in frame.samples() {
            writer.write_sample(sample)?;
        }

        Ok(())
    }

    fn finalize(&mut self) -> AudioResult<()> {
        if let Some(writer) = self.writer.take() {
            writer.finalize()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoder::Encoder;
    use tempfile::NamedTempFile;

    #[test]
    fn test_wav_encoder_write() {
        let temp_file = NamedTempFile::new().unwrap();
        let mut encoder = WavEncoder::new(temp_file.path(), 44100, Channels::Mono).unwrap();

        let frame = AudioFrame::new(vec![0.0, 0.1, -0.1, 0.5], 44100, Channels::Mono).unwrap();
        assert!(encoder.encode(&frame).is_ok());
        assert_eq!(encoder.samples_written(), 4);

        assert!(encoder.finalize().is_ok());
        // Writing after finalize is an error
        assert!(encoder.encode(&frame).is_err());
    }

    #[test]
    fn test_unclipped_samples_survive() {
        let temp_file = NamedTempFile::new().unwrap();
        let frame = AudioFrame::new(vec![1.5, -2.0], 8000, Channels::Mono).unwrap();
        crate::encoder::write_wav(temp_file.path(), &frame).unwrap();

        let mut reader = hound::WavReader::open(temp_file.path()).unwrap();
        let samples: Vec<f32> = reader.samples::<f32>().map(|s| s.unwrap()).collect();
        assert_eq!(samples, vec![1.5, -2.0]);
    }

    #[test]
    fn test_wav_encoder_invalid_sample_rate() {
        let temp_file = NamedTempFile::new().unwrap();
        let mut encoder = WavEncoder::new(temp_file.path(), 44100, Channels::Mono).unwrap();

        let frame = AudioFrame::new(vec![0.0, 0.1], 48000, Channels::Mono).unwrap();
        assert!(encoder.encode(&frame).is_err());
    }

    #[test]
    fn test_wav_encoder_invalid_channels() {
        let temp_file = NamedTempFile::new().unwrap();
        let mut encoder = WavEncoder::new(temp_file.path(), 44100, Channels::Mono).unwrap();

        let frame = AudioFrame::new(vec![0.0, 0.1, 0.2, 0.3], 44100, Channels::Stereo).unwrap();
        assert!(matches!(
            encoder.encode(&frame),
            Err(AudioError::InvalidChannels { expected: 1, got: 2 })
        ));
    }
}
