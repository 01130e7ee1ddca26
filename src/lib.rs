#![warn(missing_docs)]
#![doc = include_str!("../README.md")]

// Declare modules
/// Core signal types and structures
pub mod core;
/// Error types for audio operations
pub mod error;
/// Audio decoder implementations
pub mod decoder;
/// Fade and normalization filters
pub mod filter;
/// Audio encoder implementations
pub mod encoder;
/// Segmentation, selection, manipulation and reassembly
pub mod processor;

// Export public types
pub use core::{AudioFrame, Channels, SegmentSequence, Signal};
pub use error::{AudioError, AudioResult};
pub use processor::{
    Manipulation, NoiseColor, NoiseSpec, Pipeline, PipelineConfig, SegmentPolicy, Selector,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
