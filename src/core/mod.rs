//! Core audio types and structures

/// Signal and frame types
pub mod audio;
/// Segment sequences
pub mod sequence;

pub use audio::{AudioFrame, Channels, Signal};
pub use sequence::SegmentSequence;
