//! Reverse, mute and noise manipulation of selected segments

use super::noise::{NoiseColor, NoiseSpec, NoiseSynthesizer};
use super::select::Selector;
use crate::core::SegmentSequence;
use crate::error::{AudioError, AudioResult};
use log::debug;
use rand::Rng;
use std::fmt;
use std::str::FromStr;

/// Operation applied to a selected segment
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Manipulation {
    /// Reverse the sample order
    Reverse,
    /// Replace with silence of the same length
    Mute,
    /// Replace with RMS-matched noise
    Noise(NoiseSpec),
}

impl Manipulation {
    /// Parse a method name, attaching `noise` settings when the method is `noise`
    pub fn from_name(method: &str, noise: NoiseSpec) -> AudioResult<Self> {
        match method.trim().to_ascii_lowercase().as_str() {
            "reverse" => Ok(Manipulation::Reverse),
            "mute" => Ok(Manipulation::Mute),
            "noise" => Ok(Manipulation::Noise(noise)),
            other => Err(AudioError::InvalidMethod(format!(
                "'{}' (expected reverse, mute or noise)",
                other
            ))),
        }
    }

    /// Method name
    pub fn name(&self) -> &'static str {
        match self {
            Manipulation::Reverse => "reverse",
            Manipulation::Mute => "mute",
            Manipulation::Noise(_) => "noise",
        }
    }
}

impl FromStr for Manipulation {
    type Err = AudioError;

    /// `noise` parses with white noise at level 1.0
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s, NoiseSpec::new(NoiseColor::White, 1.0)?)
    }
}

impl fmt::Display for Manipulation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Manipulation::Noise(spec) => write!(f, "noise({}, {})", spec.color(), spec.level()),
            other => f.write_str(other.name()),
        }
    }
}

/// Applies a manipulation to the segments picked by a selector
#[derive(Debug, Clone)]
pub struct Transformer {
    selector: Selector,
    manipulation: Manipulation,
}

impl Transformer {
    /// Create a transformer
    pub fn new(selector: Selector, manipulation: Manipulation) -> Self {
        Transformer {
            selector,
            manipulation,
        }
    }

    /// Selection strategy
    pub fn selector(&self) -> &Selector {
        &self.selector
    }

    /// Manipulation applied to selected segments
    pub fn manipulation(&self) -> Manipulation {
        self.manipulation
    }

    /// Transform the selected segments of `sequence` in place.
    ///
    /// Selection is resolved before any segment is touched, so an error leaves
    /// the sequence unchanged. Unselected segments are never copied or modified.
    /// `rng` is only drawn from for noise. Returns the indices that were transformed.
    pub fn apply<R: Rng>(&self, sequence: &mut SegmentSequence, rng: &mut R) -> AudioResult<Vec<usize>> {
        let indices = self.selector.indices(sequence.len())?;
        self.log_selection(&indices, sequence.len());

        match self.manipulation {
            Manipulation::Reverse => edit_in_place(sequence, &indices, |s| s.reverse()),
            Manipulation::Mute => edit_in_place(sequence, &indices, |s| s.fill(0.0)),
            Manipulation::Noise(spec) => {
                let mut synth = NoiseSynthesizer::with_rng(rng);
                let replacements = indices
                    .iter()
                    .map(|&i| synth.replacement_for(&sequence.segments()[i], &spec))
                    .collect::<AudioResult<Vec<_>>>()?;
                for (&i, noise) in indices.iter().zip(replacements) {
                    sequence.segments_mut()[i] = noise;
                }
            }
        }

        Ok(indices)
    }

    /// Like [`Transformer::apply`] for manipulations that need no random source.
    ///
    /// Noise fails with `InvalidMethod` and leaves the sequence unchanged.
    pub fn apply_deterministic(&self, sequence: &mut SegmentSequence) -> AudioResult<Vec<usize>> {
        let edit: fn(&mut [f32]) = match self.manipulation {
            Manipulation::Reverse => |s| s.reverse(),
            Manipulation::Mute => |s| s.fill(0.0),
            Manipulation::Noise(_) => {
                return Err(AudioError::InvalidMethod(
                    "noise needs a random source".to_string(),
                ));
            }
        };

        let indices = self.selector.indices(sequence.len())?;
        self.log_selection(&indices, sequence.len());
        edit_in_place(sequence, &indices, edit);
        Ok(indices)
    }

    fn log_selection(&self, indices: &[usize], total: usize) {
        debug!(
            "applying {} to {} of {} segments",
            self.manipulation,
            indices.len(),
            total
        );
    }
}

fn edit_in_place(sequence: &mut SegmentSequence, indices: &[usize], edit: impl Fn(&mut [f32])) {
    for &i in indices {
        edit(sequence.segments_mut()[i].samples_mut());
    }
}

/// Reverse the segments selected by `pattern`
pub fn reverse_segments(sequence: &mut SegmentSequence, pattern: &str) -> AudioResult<Vec<usize>> {
    Transformer::new(Selector::pattern(pattern)?, Manipulation::Reverse).apply_deterministic(sequence)
}

/// Silence the segments at `indices`
pub fn mute_segments(sequence: &mut SegmentSequence, indices: &[usize]) -> AudioResult<Vec<usize>> {
    Transformer::new(Selector::Indices(indices.to_vec()), Manipulation::Mute).apply_deterministic(sequence)
}

/// Apply `method` to every even-indexed segment
pub fn manipulate_segments<R: Rng>(
    sequence: &mut SegmentSequence,
    method: Manipulation,
    rng: &mut R,
) -> AudioResult<Vec<usize>> {
    Transformer::new(Selector::Parity, method).apply(sequence, rng)
}
