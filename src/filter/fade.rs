use crate::core::{AudioFrame, SegmentSequence, Signal};
use crate::error::{AudioError, AudioResult};

/// Linear fade-in / fade-out envelope.
///
/// Each ramp covers `percentage` percent of the signal it is applied to.
/// Re-applying compounds the fade.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Fade {
    percentage: f64,
}

impl Fade {
    /// Create a fade covering `percentage` (0 to 50) of each signal on both ends
    pub fn new(percentage: f64) -> AudioResult<Self> {
        if !(0.0..=50.0).contains(&percentage) {
            return Err(AudioError::InvalidArgument(format!(
                "The fade_percentage must be between 0 and 50, got {}",
                percentage
            )));
        }

        Ok(Fade { percentage })
    }

    /// Fade length as a percentage of the signal
    pub fn percentage(&self) -> f64 {
        self.percentage
    }

    /// Number of samples in each ramp for a signal of `len` samples
    pub fn fade_samples(&self, len: usize) -> usize {
        (len as f64 * self.percentage / 100.0).floor() as usize
    }

    /// Fade `samples` in place
    fn apply_samples(&self, samples: &mut [f32]) {
        let fade_samples = self.fade_samples(samples.len());
        if fade_samples == 0 {
            return;
        }

        let len = samples.len();
        for i in 0..fade_samples {
            let rise = ramp(i, fade_samples);
            samples[i] *= rise;
            samples[len - fade_samples + i] *= 1.0 - rise;
        }
    }

    /// Fade one signal in place
    pub fn apply(&self, signal: &mut Signal) {
        self.apply_samples(signal.samples_mut());
    }

    /// Fade every segment of a sequence in place
    pub fn apply_sequence(&self, sequence: &mut SegmentSequence) {
        for segment in sequence.segments_mut() {
            self.apply(segment);
        }
    }
}

/// Point `i` of an `n`-point linear ramp from 0 to 1 (a single point is 0)
fn ramp(i: usize, n: usize) -> f32 {
    if n < 2 {
        0.0
    } else {
        (i as f64 / (n - 1) as f64) as f32
    }
}

impl super::Filter for Fade {
    /// Fades each channel of the frame over its full length
    fn process(&mut self, frame: &AudioFrame) -> AudioResult<AudioFrame> {
        let mut signals = frame.to_signals();
        for signal in &mut signals {
            self.apply(signal);
        }
        AudioFrame::from_signals(signals)
    }
}

/// Fade `signal` in place by `fade_percentage` (0 to 50) on both ends
pub fn smooth(signal: &mut Signal, fade_percentage: f64) -> AudioResult<()> {
    Fade::new(fade_percentage)?.apply(signal);
    Ok(())
}

/// Fade every segment of `sequence` in place
pub fn smooth_sequence(sequence: &mut SegmentSequence, fade_percentage: f64) -> AudioResult<()> {
    Fade::new(fade_percentage)?.apply_sequence(sequence);
    Ok(())
}
