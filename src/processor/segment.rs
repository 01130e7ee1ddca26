//! Cutting signals into contiguous segments

use crate::core::{SegmentSequence, Signal};
use crate::error::{AudioError, AudioResult};
use log::trace;

/// How a signal is cut into segments
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SegmentPolicy {
    /// Fixed number of segments; the last one absorbs the remainder
    Count(usize),
    /// Fixed segment duration in milliseconds; the last one may be shorter
    Duration(f64),
}

/// Audio segmentation - split a signal into contiguous, lossless pieces
#[derive(Debug, Clone, Copy)]
pub struct Segmenter {
    policy: SegmentPolicy,
}

impl Segmenter {
    /// Split into `num_segments` pieces
    pub fn by_count(num_segments: usize) -> AudioResult<Self> {
        if num_segments == 0 {
            return Err(AudioError::InvalidArgument(
                "num_segments must be greater than 0".to_string(),
            ));
        }

        Ok(Segmenter {
            policy: SegmentPolicy::Count(num_segments),
        })
    }

    /// Split into pieces of `duration_ms` milliseconds
    pub fn by_duration(duration_ms: f64) -> AudioResult<Self> {
        if !duration_ms.is_finite() || duration_ms <= 0.0 {
            return Err(AudioError::InvalidArgument(format!(
                "segment_duration_ms must be a positive number, got {}",
                duration_ms
            )));
        }

        Ok(Segmenter {
            policy: SegmentPolicy::Duration(duration_ms),
        })
    }

    /// Build a segmenter from a policy, validating its parameter
    pub fn from_policy(policy: SegmentPolicy) -> AudioResult<Self> {
        match policy {
            SegmentPolicy::Count(n) => Self::by_count(n),
            SegmentPolicy::Duration(ms) => Self::by_duration(ms),
        }
    }

    /// The policy this segmenter applies
    pub fn policy(&self) -> SegmentPolicy {
        self.policy
    }

    /// Number of samples per fixed-duration segment at `sample_rate`.
    ///
    /// Returns `None` for count-based segmenters, whose length depends on the signal.
    pub fn samples_per_segment(&self, sample_rate: u32) -> AudioResult<Option<usize>> {
        match self.policy {
            SegmentPolicy::Count(_) => Ok(None),
            SegmentPolicy::Duration(ms) => {
                let samples = (sample_rate as f64 * ms / 1000.0).round();
                if samples < 1.0 {
                    return Err(AudioError::InvalidArgument(format!(
                        "segment_duration_ms {} is too short for sample rate {}",
                        ms, sample_rate
                    )));
                }
                Ok(Some(samples as usize))
            }
        }
    }

    /// Split one signal into a segment sequence
    pub fn split(&self, signal: &Signal) -> AudioResult<SegmentSequence> {
        let samples = signal.samples();
        let sample_rate = signal.sample_rate();

        let buffers: Vec<Vec<f32>> = match self.policy {
            SegmentPolicy::Count(n) => {
                let segment_samples = samples.len() / n;
                (0..n)
                    .map(|i| {
                        let start = i * segment_samples;
                        let end = if i + 1 == n {
                            samples.len()
                        } else {
                            start + segment_samples
                        };
                        samples[start..end].to_vec()
                    })
                    .collect()
            }
            SegmentPolicy::Duration(_) => {
                let segment_samples = self.samples_per_segment(sample_rate)?.unwrap_or(1);
                samples
                    .chunks(segment_samples)
                    .map(<[f32]>::to_vec)
                    .collect()
            }
        };

        trace!(
            "split {} samples into {} segments ({:?})",
            samples.len(),
            buffers.len(),
            self.policy
        );

        SegmentSequence::from_buffers(sample_rate, buffers)
    }

    /// Split several signals with the same policy, one sequence per signal.
    ///
    /// Every signal is validated before any is split.
    pub fn split_all(&self, signals: &[Signal]) -> AudioResult<Vec<SegmentSequence>> {
        for signal in signals {
            self.samples_per_segment(signal.sample_rate())?;
        }
        signals.iter().map(|s| self.split(s)).collect()
    }
}

/// Split `signal` into `num_segments` pieces
pub fn by_count(signal: &Signal, num_segments: usize) -> AudioResult<SegmentSequence> {
    Segmenter::by_count(num_segments)?.split(signal)
}

/// Split every signal in `signals` into `num_segments` pieces
pub fn by_count_many(signals: &[Signal], num_segments: usize) -> AudioResult<Vec<SegmentSequence>> {
    Segmenter::by_count(num_segments)?.split_all(signals)
}

/// Split `signal` into pieces of `duration_ms` milliseconds
pub fn by_duration(signal: &Signal, duration_ms: f64) -> AudioResult<SegmentSequence> {
    Segmenter::by_duration(duration_ms)?.split(signal)
}

/// Split every signal in `signals` into pieces of `duration_ms` milliseconds
pub fn by_duration_many(signals: &[Signal], duration_ms: f64) -> AudioResult<Vec<SegmentSequence>> {
    Segmenter::by_duration(duration_ms)?.split_all(signals)
}
