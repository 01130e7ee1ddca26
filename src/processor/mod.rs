//! Segment selection and transformation engine

pub mod concat;
pub mod manipulate;
pub mod noise;
pub mod pipeline;
pub mod segment;
pub mod select;

pub use concat::concatenate;
pub use manipulate::{Manipulation, Transformer};
pub use noise::{NoiseColor, NoiseSpec, NoiseSynthesizer, match_rms};
pub use pipeline::{FadeScope, OutputLevel, Pipeline, PipelineConfig};
pub use segment::{SegmentPolicy, Segmenter};
pub use select::{SelectionPattern, Selector};

/// Counters accumulated by a pipeline
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessingStats {
    /// Segments produced by the segmenter
    pub segments_processed: u64,
    /// Segments a manipulation was applied to
    pub segments_transformed: u64,
    /// Samples passed through the pipeline
    pub samples_processed: u64,
}
