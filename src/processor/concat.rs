//! Reassembling segments

use crate::core::{SegmentSequence, Signal};
use crate::error::AudioResult;

/// Join segments back into one signal, in order, with no gaps or crossfades.
///
/// An empty sequence yields an empty signal at the sequence's sample rate.
pub fn concatenate(sequence: &SegmentSequence) -> AudioResult<Signal> {
    let mut samples = Vec::with_capacity(sequence.total_samples());
    for segment in sequence.segments() {
        samples.extend_from_slice(segment.samples());
    }
    Signal::new(samples, sequence.sample_rate())
}

/// Owning variant of [`concatenate`] that reuses the first segment's buffer
pub fn concatenate_owned(sequence: SegmentSequence) -> AudioResult<Signal> {
    let sample_rate = sequence.sample_rate();
    let total = sequence.total_samples();
    let mut segments = sequence.into_segments().into_iter();

    let mut samples = match segments.next() {
        Some(first) => first.into_samples(),
        None => Vec::new(),
    };
    samples.reserve(total - samples.len());
    for segment in segments {
        samples.extend_from_slice(segment.samples());
    }

    Signal::new(samples, sample_rate)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_concatenate_segments() {
        let seq = SegmentSequence::from_buffers(
            44100,
            vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0], vec![7.0, 8.0, 9.0]],
        )
        .unwrap();

        let joined = concatenate(&seq).unwrap();
        assert_eq!(joined.samples(), &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0]);
        assert_eq!(joined.sample_rate(), 44100);
        assert_eq!(concatenate_owned(seq).unwrap(), joined);
    }

    #[test]
    fn test_concatenate_empty_sequence() {
        let seq = SegmentSequence::new(16000, Vec::new()).unwrap();
        let joined = concatenate(&seq).unwrap();
        assert!(joined.is_empty());
        assert_eq!(joined.sample_rate(), 16000);
        assert!(concatenate_owned(seq).unwrap().is_empty());
    }

    #[test]
    fn test_concatenate_keeps_empty_segments() {
        let seq = SegmentSequence::from_buffers(8000, vec![vec![], vec![1.0], vec![], vec![2.0, 3.0]])
            .unwrap();
        let joined = concatenate(&seq).unwrap();
        assert_eq!(joined.len(), seq.total_samples());
        assert_eq!(joined.samples(), &[1.0, 2.0, 3.0]);
    }
}
