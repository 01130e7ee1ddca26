use super::Signal;
use crate::error::{AudioError, AudioResult};

/// Ordered segments cut from one source signal.
///
/// Every segment shares the sequence's sample rate. Concatenating the
/// segments in order reproduces the source sample-for-sample.
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentSequence {
    sample_rate: u32,
    segments: Vec<Signal>,
}

impl SegmentSequence {
    /// Build a sequence, rejecting a zero rate or a segment at a different rate
    pub fn new(sample_rate: u32, segments: Vec<Signal>) -> AudioResult<Self> {
        if sample_rate == 0 {
            return Err(AudioError::InvalidArgument(
                "sample_rate must be greater than 0".to_string(),
            ));
        }

        if let Some((index, segment)) = segments
            .iter()
            .enumerate()
            .find(|(_, s)| s.sample_rate() != sample_rate)
        {
            return Err(AudioError::TypeInvalid(format!(
                "segment {} has sample rate {}, expected {}",
                index,
                segment.sample_rate(),
                sample_rate
            )));
        }

        Ok(SegmentSequence {
            sample_rate,
            segments,
        })
    }

    /// Build a sequence from raw sample buffers at one sample rate
    pub fn from_buffers(sample_rate: u32, buffers: Vec<Vec<f32>>) -> AudioResult<Self> {
        let segments = buffers
            .into_iter()
            .map(|b| Signal::new(b, sample_rate))
            .collect::<AudioResult<Vec<_>>>()?;
        Self::new(sample_rate, segments)
    }

    /// Sample rate shared by all segments
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Number of segments
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Check if there are no segments
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Total number of samples across all segments
    pub fn total_samples(&self) -> usize {
        self.segments.iter().map(Signal::len).sum()
    }

    /// Segments in order
    pub fn segments(&self) -> &[Signal] {
        &self.segments
    }

    pub(crate) fn segments_mut(&mut self) -> &mut [Signal] {
        &mut self.segments
    }

    /// Take the segments out of the sequence
    pub fn into_segments(self) -> Vec<Signal> {
        self.segments
    }

    /// Segment at `index`
    pub fn get(&self, index: usize) -> Option<&Signal> {
        self.segments.get(index)
    }
}
