//! Noise synthesis with loudness matching.
//!
//! Noise is generated zero-mean and unit-variance, then scaled so its RMS
//! tracks the segment it replaces.

use crate::core::Signal;
use crate::error::{AudioError, AudioResult};
use log::trace;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

/// Guard added to the noise RMS when rescaling
pub const RMS_EPSILON: f64 = 1e-6;

/// Feed-forward taps of the 1/f approximation filter
const PINK_B: [f64; 4] = [0.049922035, -0.095993537, 0.050612699, -0.004408786];
/// Feedback taps of the 1/f approximation filter (`a[0]` is 1)
const PINK_A: [f64; 4] = [1.0, -2.494956002, 2.017265875, -0.522189400];
/// Samples discarded while the pink filter settles (its 60 dB decay time)
const PINK_SETTLE: usize = 1430;

/// Shortest buffer drawn and normalized before cutting to the requested length
pub const MIN_NOISE_LEN: usize = 2048;

/// Spectral color of generated noise
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NoiseColor {
    /// Flat spectrum
    #[default]
    White,
    /// Power falling roughly as 1/f
    Pink,
}

impl NoiseColor {
    /// Lowercase name
    pub fn name(&self) -> &'static str {
        match self {
            NoiseColor::White => "white",
            NoiseColor::Pink => "pink",
        }
    }
}

impl FromStr for NoiseColor {
    type Err = AudioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "white" => Ok(NoiseColor::White),
            "pink" => Ok(NoiseColor::Pink),
            other => Err(AudioError::InvalidArgument(format!(
                "noise color must be 'white' or 'pink', got '{}'",
                other
            ))),
        }
    }
}

impl fmt::Display for NoiseColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Color and loudness of injected noise
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NoiseSpec {
    color: NoiseColor,
    level: f64,
}

impl NoiseSpec {
    /// `level` scales the replaced segment's RMS and must be a positive number
    pub fn new(color: NoiseColor, level: f64) -> AudioResult<Self> {
        validate_level(level)?;
        Ok(NoiseSpec { color, level })
    }

    /// Noise color
    pub fn color(&self) -> NoiseColor {
        self.color
    }

    /// Linear RMS scale relative to the replaced segment
    pub fn level(&self) -> f64 {
        self.level
    }
}

/// Noise generator driven by an injected random source
pub struct NoiseSynthesizer<R: Rng = StdRng> {
    rng: R,
}

impl NoiseSynthesizer<StdRng> {
    /// Synthesizer seeded from the operating system
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Reproducible synthesizer
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl<R: Rng> NoiseSynthesizer<R> {
    /// Synthesizer using a caller-supplied RNG
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }

    /// Generate `length` samples of noise.
    ///
    /// At least [`MIN_NOISE_LEN`] samples are drawn and normalized to zero mean
    /// and unit variance before being cut to `length`, so short requests keep
    /// the statistics of the longer buffer instead of collapsing to a constant.
    pub fn generate(&mut self, length: usize, sample_rate: u32, color: NoiseColor) -> AudioResult<Signal> {
        let drawn = length.max(MIN_NOISE_LEN);
        let mut samples: Vec<f64> = match color {
            NoiseColor::White => (0..drawn).map(|_| standard_normal(&mut self.rng)).collect(),
            NoiseColor::Pink => {
                let white: Vec<f64> = (0..drawn + PINK_SETTLE)
                    .map(|_| standard_normal(&mut self.rng))
                    .collect();
                let mut pink = lfilter(&PINK_B, &PINK_A, &white);
                pink.drain(..PINK_SETTLE);
                pink
            }
        };
        normalize(&mut samples);
        samples.truncate(length);

        trace!("generated {} samples of {} noise", samples.len(), color);
        Signal::new(samples.into_iter().map(|s| s as f32).collect(), sample_rate)
    }

    /// Generate noise as long as `reference`, scaled to `level` times its RMS
    pub fn replacement_for(&mut self, reference: &Signal, spec: &NoiseSpec) -> AudioResult<Signal> {
        let noise = self.generate(reference.len(), reference.sample_rate(), spec.color())?;
        match_rms(noise, reference, spec.level())
    }
}

/// Rescale `noise` so its RMS is `level` times the RMS of `reference`
pub fn match_rms(noise: Signal, reference: &Signal, level: f64) -> AudioResult<Signal> {
    validate_level(level)?;

    let gain = (reference.rms() / (noise.rms() + RMS_EPSILON)) * level;
    let mut noise = noise;
    for sample in noise.samples_mut() {
        *sample = (*sample as f64 * gain) as f32;
    }

    Ok(noise)
}

fn validate_level(level: f64) -> AudioResult<()> {
    if !level.is_finite() || level <= 0.0 {
        return Err(AudioError::InvalidArgument(format!(
            "noise level must be a positive number, got {}",
            level
        )));
    }
    Ok(())
}

/// Box-Muller draw from N(0, 1)
fn standard_normal<R: Rng>(rng: &mut R) -> f64 {
    let u1: f64 = rng.gen_range(f64::MIN_POSITIVE..1.0);
    let u2: f64 = rng.gen_range(0.0..1.0);
    (-2.0 * u1.ln()).sqrt() * (2.0 * PI * u2).cos()
}

/// Direct-form linear filter; `a[0]` must be 1
fn lfilter(b: &[f64], a: &[f64], x: &[f64]) -> Vec<f64> {
    let mut y = vec![0.0; x.len()];
    for n in 0..x.len() {
        let mut acc = 0.0;
        for (k, &bk) in b.iter().enumerate().take(n + 1) {
            acc += bk * x[n - k];
        }
        for (k, &ak) in a.iter().enumerate().skip(1).take(n) {
            acc -= ak * y[n - k];
        }
        y[n] = acc;
    }
    y
}

/// Shift to zero mean and scale to unit variance in place.
///
/// A constant buffer becomes all zeros.
fn normalize(buffer: &mut [f64]) {
    if buffer.is_empty() {
        return;
    }

    let len = buffer.len() as f64;
    let mean = buffer.iter().sum::<f64>() / len;
    let variance = buffer.iter().map(|s| (s - mean) * (s - mean)).sum::<f64>() / len;
    let std_dev = variance.sqrt();

    for sample in buffer.iter_mut() {
        *sample = if std_dev > f64::EPSILON {
            (*sample - mean) / std_dev
        } else {
            0.0
        };
    }
}
