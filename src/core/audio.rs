use crate::error::{AudioError, AudioResult};
use std::time::Duration;

/// Channel configuration for audio
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channels {
    /// Mono (1 channel)
    Mono,
    /// Stereo (2 channels)
    Stereo,
    /// Quad (4 channels)
    Quad,
    /// 5.1 surround sound
    SurroundFivePointOne,
    /// 7.1 surround sound
    SurroundSevenPointOne,
    /// Any other layout; [`Channels::from_count`] never builds this for a named count
    Other(u32),
}

impl Channels {
    /// Create Channels from channel count, rejecting zero
    pub fn from_count(count: u32) -> AudioResult<Self> {
        match count {
            0 => Err(AudioError::InvalidArgument(
                "channel count must be greater than 0".to_string(),
            )),
            1 => Ok(Channels::Mono),
            2 => Ok(Channels::Stereo),
            4 => Ok(Channels::Quad),
            6 => Ok(Channels::SurroundFivePointOne),
            8 => Ok(Channels::SurroundSevenPointOne),
            n => Ok(Channels::Other(n)),
        }
    }

    /// Get the number of channels
    pub fn count(&self) -> u32 {
        match self {
            Channels::Mono => 1,
            Channels::Stereo => 2,
            Channels::Quad => 4,
            Channels::SurroundFivePointOne => 6,
            Channels::SurroundSevenPointOne => 8,
            Channels::Other(n) => *n,
        }
    }

    /// Get channel layout name
    pub fn name(&self) -> &'static str {
        match self {
            Channels::Mono => "Mono",
            Channels::Stereo => "Stereo",
            Channels::Quad => "Quad",
            Channels::SurroundFivePointOne => "5.1 Surround",
            Channels::SurroundSevenPointOne => "7.1 Surround",
            Channels::Other(_) => "Multichannel",
        }
    }
}

/// A single-channel run of samples at a fixed sample rate.
///
/// Samples are not bounded to `[-1.0, 1.0]`; clipping is left to whoever
/// writes the signal out.
#[derive(Debug, Clone, PartialEq)]
pub struct Signal {
    samples: Vec<f32>,
    sample_rate: u32,
}

impl Signal {
    /// Create a signal, rejecting a zero sample rate
    pub fn new(samples: Vec<f32>, sample_rate: u32) -> AudioResult<Self> {
        if sample_rate == 0 {
            return Err(AudioError::InvalidArgument(
                "sample_rate must be greater than 0".to_string(),
            ));
        }

        Ok(Signal {
            samples,
            sample_rate,
        })
    }

    /// Create an empty signal
    pub fn empty(sample_rate: u32) -> AudioResult<Self> {
        Self::new(Vec::new(), sample_rate)
    }

    /// Get reference to the samples
    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    /// Get mutable reference to the samples
    pub fn samples_mut(&mut self) -> &mut [f32] {
        &mut self.samples
    }

    /// Get owned samples (consumes the signal)
    pub fn into_samples(self) -> Vec<f32> {
        self.samples
    }

    /// Get sample rate in Hz
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Number of samples
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Check if signal is empty
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Get duration of this signal
    pub fn duration(&self) -> Duration {
        Duration::from_secs_f64(self.samples.len() as f64 / self.sample_rate as f64)
    }

    /// Root-mean-square of the whole signal, 0.0 for an empty signal
    pub fn rms(&self) -> f64 {
        if self.samples.is_empty() {
            return 0.0;
        }

        let sum_squared: f64 = self.samples.iter().map(|&s| (s as f64) * (s as f64)).sum();
        (sum_squared / self.samples.len() as f64).sqrt()
    }
}

/// Interleaved multi-channel audio as it comes from a decoder or goes to an encoder
#[derive(Debug, Clone)]
pub struct AudioFrame {
    /// Audio samples (interleaved for multiple channels)
    samples: Vec<f32>,
    /// Sample rate in Hz (e.g., 44100, 48000, 16000)
    sample_rate: u32,
    /// Number of channels
    channels: Channels,
}

impl AudioFrame {
    /// Create a new audio frame
    pub fn new(samples: Vec<f32>, sample_rate: u32, channels: Channels) -> AudioResult<Self> {
        if sample_rate == 0 {
            return Err(AudioError::InvalidArgument(
                "sample_rate must be greater than 0".to_string(),
            ));
        }

        if channels.count() == 0 {
            return Err(AudioError::InvalidArgument(
                "channel count must be greater than 0".to_string(),
            ));
        }

        if samples.len() % channels.count() as usize != 0 {
            return Err(AudioError::TypeInvalid(
                "Sample count not divisible by channel count".to_string(),
            ));
        }

        Ok(AudioFrame {
            samples,
            sample_rate,
            channels,
        })
    }

    /// Interleave per-channel signals into one frame.
    ///
    /// All signals must share a sample rate and a length.
    pub fn from_signals(signals: Vec<Signal>) -> AudioResult<Self> {
        let channels = Channels::from_count(signals.len() as u32)?;
        let first = &signals[0];
        let sample_rate = first.sample_rate();
        let frames = first.len();

        for signal in &signals[1..] {
            if signal.sample_rate() != sample_rate {
                return Err(AudioError::TypeInvalid(format!(
                    "channel sample rates differ: {} vs {}",
                    sample_rate,
                    signal.sample_rate()
                )));
            }
            if signal.len() != frames {
                return Err(AudioError::TypeInvalid(format!(
                    "channel lengths differ: {} vs {}",
                    frames,
                    signal.len()
                )));
            }
        }

        let mut samples = Vec::with_capacity(frames * signals.len());
        for i in 0..frames {
            for signal in &signals {
                samples.push(signal.samples()[i]);
            }
        }

        AudioFrame::new(samples, sample_rate, channels)
    }

    /// Split the frame into one signal per channel
    pub fn to_signals(&self) -> Vec<Signal> {
        let num_channels = self.channels.count() as usize;
        (0..num_channels)
            .map(|ch| Signal {
                samples: self
                    .samples
                    .iter()
                    .skip(ch)
                    .step_by(num_channels)
                    .copied()
                    .collect(),
                sample_rate: self.sample_rate,
            })
            .collect()
    }

    /// Get reference to the samples
    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    /// Get owned samples (consumes frame)
    pub fn into_samples(self) -> Vec<f32> {
        self.samples
    }

    /// Get sample rate in Hz
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Get channel configuration
    pub fn channels(&self) -> Channels {
        self.channels
    }

    /// Get number of samples per channel
    pub fn samples_per_channel(&self) -> usize {
        self.samples.len() / self.channels.count() as usize
    }

    /// Get duration of this frame
    pub fn duration(&self) -> Duration {
        Duration::from_secs_f64(self.samples_per_channel() as f64 / self.sample_rate as f64)
    }

    /// Check if frame is empty
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channels_from_count() {
        assert_eq!(Channels::from_count(1).unwrap(), Channels::Mono);
        assert_eq!(Channels::from_count(2).unwrap(), Channels::Stereo);
        assert!(matches!(
            Channels::from_count(0),
            Err(AudioError::InvalidArgument(_))
        ));
        for count in [3, 5, 7, 12] {
            let channels = Channels::from_count(count).unwrap();
            assert_eq!(channels, Channels::Other(count));
            assert_eq!(channels.count(), count);
        }
        assert_eq!(Channels::from_count(6).unwrap().count(), 6);
    }

    #[test]
    fn test_signal_zero_rate() {
        let result = Signal::new(vec![0.0; 4], 0);
        assert!(matches!(result, Err(AudioError::InvalidArgument(_))));
    }

    #[test]
    fn test_signal_rms() {
        let signal = Signal::new(vec![3.0, -3.0, 3.0, -3.0], 8000).unwrap();
        assert!((signal.rms() - 3.0).abs() < 1e-9);
        assert_eq!(Signal::empty(8000).unwrap().rms(), 0.0);
    }

    #[test]
    fn test_signal_duration() {
        let signal = Signal::new(vec![0.0; 22050], 44100).unwrap();
        assert_eq!(signal.duration(), Duration::from_millis(500));
    }

    #[test]
    fn test_audio_frame_invalid_samples() {
        // Odd number of samples for stereo should fail
        let samples = vec![0.1, 0.2, 0.3];
        let result = AudioFrame::new(samples, 44100, Channels::Stereo);
        assert!(matches!(result, Err(AudioError::TypeInvalid(_))));
    }

    #[test]
    fn test_frame_split_and_join() {
        // [L1, R1, L2, R2, L3, R3]
        let frame = AudioFrame::new(vec![1.0, -1.0, 2.0, -2.0, 3.0, -3.0], 16000, Channels::Stereo)
            .unwrap();
        let signals = frame.to_signals();

        assert_eq!(signals.len(), 2);
        assert_eq!(signals[0].samples(), &[1.0, 2.0, 3.0]);
        assert_eq!(signals[1].samples(), &[-1.0, -2.0, -3.0]);

        let joined = AudioFrame::from_signals(signals).unwrap();
        assert_eq!(joined.samples(), frame.samples());
        assert_eq!(joined.channels(), Channels::Stereo);
    }

    #[test]
    fn test_three_channel_frame() {
        let frame = AudioFrame::new((0..9).map(|i| i as f32).collect(), 8000, Channels::Other(3)).unwrap();
        let signals = frame.to_signals();
        assert_eq!(signals[1].samples(), &[1.0, 4.0, 7.0]);

        let joined = AudioFrame::from_signals(signals).unwrap();
        assert_eq!(joined.channels(), Channels::Other(3));
        assert_eq!(joined.samples(), frame.samples());

        assert!(AudioFrame::new(vec![0.0; 3], 8000, Channels::Other(0)).is_err());
    }

    #[test]
    fn test_from_signals_length_mismatch() {
        let left = Signal::new(vec![0.0; 3], 16000).unwrap();
        let right = Signal::new(vec![0.0; 2], 16000).unwrap();
        assert!(AudioFrame::from_signals(vec![left, right]).is_err());
    }
}
