//! Integration module for connecting detection backends with the counter.
//!
//! Foreground extraction is left to implementors of [`DetectionSource`]; this
//! module only supplies the conversion helpers and the per-frame pipeline.

mod builder;
mod detector;
mod pipeline;

pub use builder::BoundingBoxBuilder;
pub use detector::{DetectionSource, IntoDetections};
pub use pipeline::{CountingPipeline, FrameReport, PipelineConfig};
