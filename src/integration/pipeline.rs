//! CountingPipeline for combining detection, tracking and counting.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::counter::{CounterConfig, LineCounter};
use crate::error::{ConfigError, PipelineError};
use crate::tracker::{ActiveTracks, BoundingBox, CentroidTracker, TrackerConfig};

use super::DetectionSource;

/// Configuration for the [`CountingPipeline`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub tracker: TrackerConfig,
    pub counter: CounterConfig,
}

/// Outcome of one processed frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameReport {
    /// Zero-based index of the processed frame
    pub frame_index: u64,
    /// Boxes handed to the tracker, as produced by the detector
    pub detections: Vec<BoundingBox>,
    /// Confirmed tracks after this frame
    pub tracks: ActiveTracks,
    /// Running total of counted tracks
    pub total_count: u64,
}

/// A counting pipeline that bundles a detector with tracking and counting.
///
/// Each frame runs detection, then one tracker update, then one counter
/// update, in that order.
pub struct CountingPipeline<D: DetectionSource> {
    detector: D,
    tracker: CentroidTracker,
    counter: LineCounter,
    frame_count: u64,
}

impl<D: DetectionSource> CountingPipeline<D> {
    /// Create a new pipeline with the given detector and configuration.
    pub fn new(detector: D, config: PipelineConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            detector,
            tracker: CentroidTracker::new(config.tracker)?,
            counter: LineCounter::new(config.counter)?,
            frame_count: 0,
        })
    }

    /// Create a new pipeline whose count line sits at `line_ratio` of the frame width.
    pub fn for_frame_width(
        detector: D,
        tracker: TrackerConfig,
        frame_width: u32,
        line_ratio: f64,
    ) -> Result<Self, ConfigError> {
        let counter = CounterConfig::from_frame_width(frame_width, line_ratio, Default::default())?;
        Self::new(detector, PipelineConfig { tracker, counter })
    }

    /// Detect, track and count a single frame.
    pub fn process_frame(
        &mut self,
        frame: &D::Frame,
    ) -> Result<FrameReport, PipelineError<D::Error>> {
        let detections = self
            .detector
            .detect(frame)
            .map_err(PipelineError::Detector)?;
        Ok(self.process_detections(detections))
    }

    /// Track and count boxes produced outside the pipeline's detector.
    pub fn process_detections(&mut self, detections: Vec<BoundingBox>) -> FrameReport {
        let tracks = self.tracker.update(&detections);
        let total_count = self.counter.update(&tracks);
        let frame_index = self.frame_count;
        self.frame_count += 1;

        debug!(
            frame_index,
            detections = detections.len(),
            tracks = tracks.len(),
            total_count,
            "frame processed"
        );

        FrameReport {
            frame_index,
            detections,
            tracks,
            total_count,
        }
    }

    /// Number of frames processed so far.
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub fn total_count(&self) -> u64 {
        self.counter.total_count()
    }

    /// Whether the track has already been counted; renderers use this for colouring.
    pub fn is_counted(&self, track_id: u64) -> bool {
        self.counter.is_counted(track_id)
    }

    /// Get a reference to the underlying detector.
    pub fn detector(&self) -> &D {
        &self.detector
    }

    /// Get a mutable reference to the underlying detector.
    pub fn detector_mut(&mut self) -> &mut D {
        &mut self.detector
    }

    /// Get a reference to the underlying tracker.
    pub fn tracker(&self) -> &CentroidTracker {
        &self.tracker
    }

    /// Get a reference to the underlying counter.
    pub fn counter(&self) -> &LineCounter {
        &self.counter
    }
}
