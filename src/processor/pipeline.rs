//! End-to-end segment processing

use super::ProcessingStats;
use super::concat::concatenate_owned;
use super::manipulate::{Manipulation, Transformer};
use super::segment::{SegmentPolicy, Segmenter};
use super::select::Selector;
use crate::core::{AudioFrame, Signal};
use crate::decoder::read_audio;
use crate::encoder::write_wav;
use crate::error::AudioResult;
use crate::filter::{Fade, Filter, Normalize};
use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::path::Path;

/// Where fades are applied
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FadeScope {
    /// Head and tail of every segment, before reassembly
    #[default]
    Segments,
    /// Head and tail of the reassembled signal
    Whole,
}

/// Optional level adjustment of the finished output
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OutputLevel {
    /// Scale to this peak
    Peak(f32),
    /// Scale to this RMS
    Loudness(f32),
}

/// Everything needed to run the segment pipeline
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// How signals are cut into segments
    pub segmentation: SegmentPolicy,
    /// Which segments are transformed
    pub selector: Selector,
    /// What happens to selected segments
    pub manipulation: Manipulation,
    /// Fade percentage (0 to 50), if any
    pub fade: Option<f64>,
    /// Where the fade goes
    pub fade_scope: FadeScope,
    /// Output normalization, if any
    pub output_level: Option<OutputLevel>,
    /// Seed for reproducible noise
    pub seed: Option<u64>,
}

impl PipelineConfig {
    /// Config that applies `manipulation` to even segments of a `policy` split
    pub fn new(segmentation: SegmentPolicy, manipulation: Manipulation) -> Self {
        PipelineConfig {
            segmentation,
            selector: Selector::default(),
            manipulation,
            fade: None,
            fade_scope: FadeScope::default(),
            output_level: None,
            seed: None,
        }
    }
}

/// Segment, transform, smooth and reassemble signals
pub struct Pipeline<R: Rng = StdRng> {
    segmenter: Segmenter,
    transformer: Transformer,
    fade: Option<Fade>,
    fade_scope: FadeScope,
    normalize: Option<Normalize>,
    rng: R,
    stats: ProcessingStats,
}

impl Pipeline<StdRng> {
    /// Build a pipeline, seeding its RNG from `config.seed` or from entropy
    pub fn new(config: PipelineConfig) -> AudioResult<Self> {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::with_rng(config, rng)
    }
}

impl<R: Rng> Pipeline<R> {
    /// Build a pipeline around a caller-supplied RNG; `config.seed` is ignored
    pub fn with_rng(config: PipelineConfig, rng: R) -> AudioResult<Self> {
        let segmenter = Segmenter::from_policy(config.segmentation)?;
        let fade = config.fade.map(Fade::new).transpose()?;
        let normalize = match config.output_level {
            Some(OutputLevel::Peak(target)) => Some(Normalize::peak(target)?),
            Some(OutputLevel::Loudness(target)) => Some(Normalize::loudness(target)?),
            None => None,
        };

        Ok(Pipeline {
            segmenter,
            transformer: Transformer::new(config.selector, config.manipulation),
            fade,
            fade_scope: config.fade_scope,
            normalize,
            rng,
            stats: ProcessingStats::default(),
        })
    }

    /// Counters accumulated over every call so far
    pub fn stats(&self) -> &ProcessingStats {
        &self.stats
    }

    /// Run one mono signal through segment → transform → fade → concatenate
    pub fn process_signal(&mut self, signal: &Signal) -> AudioResult<Signal> {
        let mut sequence = self.segmenter.split(signal)?;
        let transformed = self.transformer.apply(&mut sequence, &mut self.rng)?;

        if let (Some(fade), FadeScope::Segments) = (&self.fade, self.fade_scope) {
            fade.apply_sequence(&mut sequence);
        }

        self.stats.segments_processed += sequence.len() as u64;
        self.stats.segments_transformed += transformed.len() as u64;
        self.stats.samples_processed += sequence.total_samples() as u64;

        let mut output = concatenate_owned(sequence)?;

        if let (Some(fade), FadeScope::Whole) = (&self.fade, self.fade_scope) {
            fade.apply(&mut output);
        }

        Ok(output)
    }

    /// Process every channel of a frame independently, then normalize the result
    pub fn process_frame(&mut self, frame: &AudioFrame) -> AudioResult<AudioFrame> {
        // Fail on an unusable segment length before touching any channel
        self.segmenter.samples_per_segment(frame.sample_rate())?;

        let processed = frame
            .to_signals()
            .iter()
            .map(|signal| self.process_signal(signal))
            .collect::<AudioResult<Vec<_>>>()?;

        let output = AudioFrame::from_signals(processed)?;

        match self.normalize.as_mut() {
            Some(normalize) => normalize.process(&output),
            None => Ok(output),
        }
    }

    /// Decode `input`, process it and write a 32-bit float WAV to `output`
    pub fn process_file<P: AsRef<Path>, Q: AsRef<Path>>(&mut self, input: P, output: Q) -> AudioResult<()> {
        let frame = read_audio(&input)?;
        debug!(
            "decoded {} samples per channel at {} Hz ({})",
            frame.samples_per_channel(),
            frame.sample_rate(),
            frame.channels().name()
        );

        let processed = self.process_frame(&frame)?;
        write_wav(output, &processed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Channels;
    use crate::error::AudioError;
    use crate::processor::noise::{NoiseColor, NoiseSpec};

    fn ramp(len: usize) -> Signal {
        Signal::new((1..=len).map(|i| i as f32).collect(), 1000).unwrap()
    }

    #[test]
    fn test_reverse_every_other_segment() {
        let config = PipelineConfig::new(SegmentPolicy::Count(3), Manipulation::Reverse);
        let mut pipeline = Pipeline::new(config).unwrap();

        let output = pipeline.process_signal(&ramp(9)).unwrap();
        assert_eq!(
            output.samples(),
            &[3.0, 2.0, 1.0, 4.0, 5.0, 6.0, 9.0, 8.0, 7.0]
        );
        assert_eq!(pipeline.stats().segments_processed, 3);
        assert_eq!(pipeline.stats().segments_transformed, 2);
        assert_eq!(pipeline.stats().samples_processed, 9);
    }

    #[test]
    fn test_pattern_mute_with_duration_segments() {
        let mut config = PipelineConfig::new(SegmentPolicy::Duration(2.0), Manipulation::Mute);
        config.selector = Selector::pattern("2*n+1").unwrap();
        let mut pipeline = Pipeline::new(config).unwrap();

        // 2 ms at 1 kHz = 2 samples per segment; last segment has 1
        let output = pipeline.process_signal(&ramp(7)).unwrap();
        assert_eq!(output.samples(), &[1.0, 2.0, 0.0, 0.0, 5.0, 6.0, 7.0]);
    }

    #[test]
    fn test_segment_fades() {
        let mut config = PipelineConfig::new(SegmentPolicy::Count(2), Manipulation::Mute);
        config.selector = Selector::Indices(Vec::new());
        config.fade = Some(20.0);
        let mut pipeline = Pipeline::new(config).unwrap();

        let signal = Signal::new(vec![1.0; 20], 1000).unwrap();
        let output = pipeline.process_signal(&signal).unwrap();
        assert_eq!(output.samples()[0], 0.0);
        assert_eq!(output.samples()[9], 0.0);
        assert_eq!(output.samples()[10], 0.0);
        assert_eq!(output.samples()[19], 0.0);
        assert_eq!(output.samples()[5], 1.0);
    }

    #[test]
    fn test_whole_signal_fade() {
        let mut config = PipelineConfig::new(SegmentPolicy::Count(2), Manipulation::Mute);
        config.selector = Selector::Indices(Vec::new());
        config.fade = Some(10.0);
        config.fade_scope = FadeScope::Whole;
        let mut pipeline = Pipeline::new(config).unwrap();

        let signal = Signal::new(vec![1.0; 20], 1000).unwrap();
        let output = pipeline.process_signal(&signal).unwrap();
        assert_eq!(output.samples()[0], 0.0);
        assert_eq!(output.samples()[9], 1.0);
        assert_eq!(output.samples()[10], 1.0);
        assert_eq!(output.samples()[19], 0.0);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = PipelineConfig::new(SegmentPolicy::Count(0), Manipulation::Reverse);
        assert!(matches!(Pipeline::new(config), Err(AudioError::InvalidArgument(_))));

        let mut config = PipelineConfig::new(SegmentPolicy::Count(2), Manipulation::Reverse);
        config.fade = Some(60.0);
        assert!(Pipeline::new(config).is_err());

        let mut config = PipelineConfig::new(SegmentPolicy::Count(2), Manipulation::Reverse);
        config.output_level = Some(OutputLevel::Peak(2.0));
        assert!(Pipeline::new(config).is_err());
    }

    #[test]
    fn test_out_of_range_indices() {
        let mut config = PipelineConfig::new(SegmentPolicy::Count(2), Manipulation::Mute);
        config.selector = Selector::Indices(vec![5]);
        let mut pipeline = Pipeline::new(config).unwrap();

        assert!(matches!(
            pipeline.process_signal(&ramp(4)),
            Err(AudioError::IndexOutOfRange { index: 5, len: 2 })
        ));
    }

    #[test]
    fn test_seeded_noise_is_reproducible() {
        let noise = Manipulation::Noise(NoiseSpec::new(NoiseColor::Pink, 0.5).unwrap());
        let mut config = PipelineConfig::new(SegmentPolicy::Count(4), noise);
        config.seed = Some(2024);

        let signal = Signal::new(vec![0.5; 4000], 16000).unwrap();
        let a = Pipeline::new(config.clone()).unwrap().process_signal(&signal).unwrap();
        let b = Pipeline::new(config).unwrap().process_signal(&signal).unwrap();

        assert_eq!(a, b);
        assert_eq!(a.len(), signal.len());
        // Odd segments pass through
        assert_eq!(&a.samples()[1000..2000], &signal.samples()[1000..2000]);
        assert_ne!(&a.samples()[..1000], &signal.samples()[..1000]);
    }

    #[test]
    fn test_stereo_frame_channels_processed_alike() {
        let config = PipelineConfig::new(SegmentPolicy::Count(2), Manipulation::Reverse);
        let mut pipeline = Pipeline::new(config).unwrap();

        // L = 1..4, R = -1..-4
        let frame = AudioFrame::new(
            vec![1.0, -1.0, 2.0, -2.0, 3.0, -3.0, 4.0, -4.0],
            1000,
            Channels::Stereo,
        )
        .unwrap();
        let output = pipeline.process_frame(&frame).unwrap();

        assert_eq!(
            output.samples(),
            &[2.0, -2.0, 1.0, -1.0, 3.0, -3.0, 4.0, -4.0]
        );
    }

    #[test]
    fn test_three_channel_frame() {
        let config = PipelineConfig::new(SegmentPolicy::Count(2), Manipulation::Mute);
        let mut pipeline = Pipeline::new(config).unwrap();

        let frame = AudioFrame::new((1..=12).map(|i| i as f32).collect(), 1000, Channels::Other(3))
            .unwrap();
        let output = pipeline.process_frame(&frame).unwrap();

        assert_eq!(output.channels(), Channels::Other(3));
        assert_eq!(
            output.samples(),
            &[0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 7.0, 8.0, 9.0, 10.0, 11.0, 12.0]
        );
    }

    #[test]
    fn test_frame_normalized_after_processing() {
        let mut config = PipelineConfig::new(SegmentPolicy::Count(1), Manipulation::Reverse);
        config.output_level = Some(OutputLevel::Peak(0.5));
        let mut pipeline = Pipeline::new(config).unwrap();

        let frame = AudioFrame::new(vec![2.0, -4.0], 1000, Channels::Mono).unwrap();
        let output = pipeline.process_frame(&frame).unwrap();
        assert_eq!(output.samples(), &[-0.5, 0.25]);
    }

    #[test]
    fn test_frame_rejects_unusable_duration() {
        let config = PipelineConfig::new(SegmentPolicy::Duration(0.1), Manipulation::Reverse);
        let mut pipeline = Pipeline::new(config).unwrap();
        let frame = AudioFrame::new(vec![0.0; 8], 1000, Channels::Mono).unwrap();
        assert!(matches!(
            pipeline.process_frame(&frame),
            Err(AudioError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_process_file_round_trip() {
        let input = tempfile::Builder::new().suffix(".wav").tempfile().unwrap();
        let output = tempfile::Builder::new().suffix(".wav").tempfile().unwrap();

        let frame = AudioFrame::new((1..=8).map(|i| i as f32 / 10.0).collect(), 8000, Channels::Mono)
            .unwrap();
        write_wav(input.path(), &frame).unwrap();

        let config = PipelineConfig::new(SegmentPolicy::Count(2), Manipulation::Reverse);
        Pipeline::new(config)
            .unwrap()
            .process_file(input.path(), output.path())
            .unwrap();

        let result = read_audio(output.path()).unwrap();
        assert_eq!(
            result.samples(),
            &[0.4, 0.3, 0.2, 0.1, 0.5, 0.6, 0.7, 0.8]
        );
    }
}
