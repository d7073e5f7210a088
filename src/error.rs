//! Error types shared across the crate.

use thiserror::Error;

/// Rejected configuration value. Returned at construction time, never clamped.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("max_disappeared must be greater than zero")]
    ZeroMaxDisappeared,
    #[error("max_distance must be a positive finite number, got {0}")]
    InvalidMaxDistance(f64),
    #[error("min_hits must be at least 1")]
    ZeroMinHits,
    #[error("history capacity must be greater than zero")]
    ZeroHistoryCapacity,
    #[error("count_line_x must be non-negative, got {0}")]
    NegativeCountLine(i32),
    #[error("min_frames must be at least 1")]
    ZeroMinFrames,
    #[error("count line ratio must lie within [0, 1], got {0}")]
    InvalidLineRatio(f64),
}

/// A bounding box that cannot describe a physical object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("malformed bounding box: width {width} and height {height} must be positive")]
pub struct InvalidBox {
    pub width: i32,
    pub height: i32,
}

/// Failure while scoring predicted counts against ground truth.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MetricsError {
    #[error("cannot evaluate an empty series")]
    Empty,
    #[error("series length mismatch: expected {expected}, predicted {predicted}")]
    LengthMismatch { expected: usize, predicted: usize },
}

/// Error raised by [`CountingPipeline`](crate::integration::CountingPipeline).
#[derive(Debug, Error)]
pub enum PipelineError<E> {
    #[error("detector failed: {0}")]
    Detector(E),
}
