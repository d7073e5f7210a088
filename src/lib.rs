//! Fish counting on top of a centroid tracker.
//!
//! An external detector turns each frame into bounding boxes. The
//! [`CentroidTracker`] associates them into persistent tracks and exports the
//! confirmed ones, and the [`LineCounter`] counts every exported track once
//! when its recent path crosses a vertical reference line.
//!
//! ```
//! use fishcount_rs::{BoundingBox, CentroidTracker, CounterConfig, LineCounter, TrackerConfig};
//!
//! let mut tracker = CentroidTracker::new(TrackerConfig {
//!     min_hits: 1,
//!     ..TrackerConfig::default()
//! })
//! .unwrap();
//! let mut counter = LineCounter::new(CounterConfig {
//!     count_line_x: 100,
//!     ..CounterConfig::default()
//! })
//! .unwrap();
//!
//! let mut total = 0;
//! for x in [10, 48, 86, 124, 162, 200] {
//!     let tracks = tracker.update(&[BoundingBox::new(x - 10, 40, 20, 20)]);
//!     total = counter.update(&tracks);
//! }
//! assert_eq!(total, 1);
//! ```

pub mod counter;
pub mod error;
pub mod integration;
pub mod metrics;
pub mod tracker;

pub use counter::{CounterConfig, CrossingDirection, LineCounter};
pub use error::{ConfigError, InvalidBox, MetricsError, PipelineError};
pub use integration::{
    BoundingBoxBuilder, CountingPipeline, DetectionSource, FrameReport, IntoDetections,
    PipelineConfig,
};
pub use tracker::{ActiveTracks, BoundingBox, CentroidTracker, ExportedTrack, TrackerConfig};
