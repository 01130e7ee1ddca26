//! segscramble command line interface
//!
//! Splits an audio file into segments, reverses, mutes or replaces a selection
//! of them with loudness-matched noise, and writes the result as WAV.

use clap::{Parser, ValueEnum};
use log::info;
use segscramble::processor::{
    FadeScope, Manipulation, NoiseColor, NoiseSpec, OutputLevel, Pipeline, PipelineConfig,
    SegmentPolicy, SelectionPattern, Selector,
};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "segscramble")]
#[command(about = "Segment-wise audio reversal, muting and noise injection", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Input audio file
    #[arg(value_name = "FILE")]
    input: PathBuf,

    /// Output WAV file
    #[arg(short, long, value_name = "FILE")]
    output: PathBuf,

    /// Split into this many segments
    #[arg(short = 'n', long, required_unless_present = "duration_ms", conflicts_with = "duration_ms")]
    segments: Option<usize>,

    /// Split into segments of this many milliseconds
    #[arg(short, long)]
    duration_ms: Option<f64>,

    /// Manipulation: reverse, mute or noise
    #[arg(short, long, default_value = "reverse")]
    method: String,

    /// Noise color (white, pink)
    #[arg(long, default_value = "white")]
    color: NoiseColor,

    /// Noise RMS relative to the replaced segment
    #[arg(long, default_value_t = 1.0)]
    level: f64,

    /// Select segments by progression, e.g. "2*n+1"
    #[arg(short, long, conflicts_with_all = ["alternate", "indices"])]
    pattern: Option<SelectionPattern>,

    /// Select every even segment (default)
    #[arg(long, conflicts_with = "indices")]
    alternate: bool,

    /// Select explicit segment indices, e.g. 0,3,5
    #[arg(long, value_delimiter = ',')]
    indices: Option<Vec<usize>>,

    /// Fade percentage (0-50) applied to both ends
    #[arg(long)]
    fade: Option<f64>,

    /// Apply the fade to every segment or to the whole output
    #[arg(long, value_enum, default_value_t = Scope::Segments)]
    fade_scope: Scope,

    /// Normalize the output to this peak (0-1]
    #[arg(long, conflicts_with = "normalize_rms")]
    normalize_peak: Option<f32>,

    /// Normalize the output to this RMS (0-1]
    #[arg(long)]
    normalize_rms: Option<f32>,

    /// Seed for reproducible noise
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Clone, Copy, ValueEnum)]
enum Scope {
    Segments,
    Whole,
}

impl Cli {
    fn config(&self) -> segscramble::AudioResult<PipelineConfig> {
        let segmentation = match (self.segments, self.duration_ms) {
            (Some(n), _) => SegmentPolicy::Count(n),
            (None, Some(ms)) => SegmentPolicy::Duration(ms),
            (None, None) => {
                return Err(segscramble::AudioError::InvalidArgument(
                    "either --segments or --duration-ms is required".to_string(),
                ));
            }
        };

        let manipulation = Manipulation::from_name(&self.method, NoiseSpec::new(self.color, self.level)?)?;

        let selector = match (&self.pattern, &self.indices) {
            _ if self.alternate => Selector::Parity,
            (Some(pattern), _) => Selector::Pattern(*pattern),
            (None, Some(indices)) => Selector::Indices(indices.clone()),
            (None, None) => Selector::Parity,
        };

        let output_level = match (self.normalize_peak, self.normalize_rms) {
            (Some(peak), _) => Some(OutputLevel::Peak(peak)),
            (None, Some(rms)) => Some(OutputLevel::Loudness(rms)),
            (None, None) => None,
        };

        Ok(PipelineConfig {
            segmentation,
            selector,
            manipulation,
            fade: self.fade,
            fade_scope: match self.fade_scope {
                Scope::Segments => FadeScope::Segments,
                Scope::Whole => FadeScope::Whole,
            },
            output_level,
            seed: self.seed,
        })
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Setup logging
    if cli.verbose {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Debug)
            .init();
    } else {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Info)
            .init();
    }

    info!("segscramble {}", segscramble::VERSION);

    let config = cli.config()?;
    info!(
        "{:?} segmentation, {} on {:?}",
        config.segmentation, config.manipulation, config.selector
    );

    let mut pipeline = Pipeline::new(config)?;
    pipeline.process_file(&cli.input, &cli.output)?;

    let stats = pipeline.stats();
    info!(
        "{} of {} segments transformed, {} samples processed, output in {}",
        stats.segments_transformed,
        stats.segments_processed,
        stats.samples_processed,
        cli.output.display()
    );

    Ok(())
}
