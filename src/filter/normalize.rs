use crate::core::AudioFrame;
use crate::error::{AudioError, AudioResult};

/// Output normalization - brings the finished signal into range before encoding
#[derive(Clone, Debug)]
pub struct Normalize {
    /// Target level (0.0 to 1.0)
    target: f32,
    /// Whether to use loudness normalization (true) or peak normalization (false)
    use_loudness: bool,
}

impl Normalize {
    /// Create a peak normalizer (normalizes to target peak level)
    pub fn peak(target_peak: f32) -> AudioResult<Self> {
        Self::validate(target_peak, "peak")?;
        Ok(Normalize {
            target: target_peak,
            use_loudness: false,
        })
    }

    /// Create a loudness normalizer.
    /// Uses RMS (Root Mean Square) instead of peak
    pub fn loudness(target_loudness: f32) -> AudioResult<Self> {
        Self::validate(target_loudness, "loudness")?;
        Ok(Normalize {
            target: target_loudness,
            use_loudness: true,
        })
    }

    fn validate(target: f32, what: &str) -> AudioResult<()> {
        if !(target > 0.0 && target <= 1.0) {
            return Err(AudioError::InvalidArgument(format!(
                "Target {} must be between 0.0 and 1.0, got {}",
                what, target
            )));
        }
        Ok(())
    }

    /// Calculate peak level of audio samples
    fn calculate_peak(samples: &[f32]) -> f32 {
        samples
            .iter()
            .map(|&s| s.abs())
            .fold(0.0f32, |a, b| a.max(b))
    }

    /// Calculate RMS (loudness) of audio samples
    fn calculate_rms(samples: &[f32]) -> f32 {
        if samples.is_empty() {
            return 0.0;
        }

        let sum_squared: f32 = samples.iter().map(|&s| s * s).sum();
        (sum_squared / samples.len() as f32).sqrt()
    }

    /// Apply gain to all samples, clipping to [-1.0, 1.0]
    fn apply_gain(samples: &[f32], gain: f32) -> Vec<f32> {
        samples.iter().map(|&s| (s * gain).clamp(-1.0, 1.0)).collect()
    }
}

impl super::Filter for Normalize {
    fn process(&mut self, frame: &AudioFrame) -> AudioResult<AudioFrame> {
        let samples = frame.samples();

        let current_level = if self.use_loudness {
            Self::calculate_rms(samples)
        } else {
            Self::calculate_peak(samples)
        };

        if current_level == 0.0 {
            return Ok(frame.clone());
        }

        let gain = self.target / current_level;

        AudioFrame::new(
            Self::apply_gain(samples, gain),
            frame.sample_rate(),
            frame.channels(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Channels;
    use crate::filter::Filter;

    fn mono(samples: Vec<f32>) -> AudioFrame {
        AudioFrame::new(samples, 44100, Channels::Mono).unwrap()
    }

    #[test]
    fn test_invalid_targets() {
        assert!(Normalize::peak(0.0).is_err());
        assert!(Normalize::peak(1.5).is_err());
        assert!(Normalize::loudness(-0.1).is_err());
        assert!(Normalize::loudness(f32::NAN).is_err());
    }

    #[test]
    fn test_peak_normalization() {
        let mut normalizer = Normalize::peak(0.8).unwrap();

        let result = normalizer.process(&mono(vec![0.0, 0.25, 0.5, -0.3])).unwrap();

        let peak = Normalize::calculate_peak(result.samples());
        assert!((peak - 0.8).abs() < 0.001);
    }

    #[test]
    fn test_peak_normalization_tames_loud_noise() {
        // Injected noise can exceed full scale
        let mut normalizer = Normalize::peak(1.0).unwrap();
        let result = normalizer.process(&mono(vec![2.5, -4.0, 1.0])).unwrap();

        assert_eq!(result.samples(), &[0.625, -1.0, 0.25]);
    }

    #[test]
    fn test_rms_normalization() {
        let mut normalizer = Normalize::loudness(0.5).unwrap();

        let result = normalizer.process(&mono(vec![0.1, 0.2, -0.15, 0.1])).unwrap();

        let new_rms = Normalize::calculate_rms(result.samples());
        assert!((new_rms - 0.5).abs() < 0.01);
    }

    #[test]
    fn test_silence_handling() {
        let mut normalizer = Normalize::peak(0.8).unwrap();

        let result = normalizer.process(&mono(vec![0.0, 0.0, 0.0])).unwrap();
        assert_eq!(result.samples(), &[0.0, 0.0, 0.0]);
    }
}
