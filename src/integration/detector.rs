//! Trait for object detection backends.

use crate::tracker::BoundingBox;

/// Trait for object detection backends.
///
/// Implement this trait to feed any detector (background subtraction, a
/// neural model, a recorded detection dump) into the counting pipeline.
///
/// # Example
///
/// ```ignore
/// use fishcount_rs::{BoundingBox, DetectionSource};
///
/// struct MyDetector {
///     // Background model here
/// }
///
/// impl DetectionSource for MyDetector {
///     type Frame = Vec<u8>;
///     type Error = std::io::Error;
///
///     fn detect(&mut self, frame: &Vec<u8>) -> Result<Vec<BoundingBox>, Self::Error> {
///         // Extract foreground blobs and return their boxes
///         Ok(vec![])
///     }
/// }
/// ```
pub trait DetectionSource {
    /// Frame representation consumed by the detector.
    type Frame;

    /// Error type for detection failures.
    type Error;

    /// Run detection on a frame and return candidate boxes in a stable order.
    fn detect(&mut self, frame: &Self::Frame) -> Result<Vec<BoundingBox>, Self::Error>;
}

/// Helper trait for converting detector-specific outputs to bounding boxes.
pub trait IntoDetections {
    /// Convert the output into a vector of boxes.
    fn into_detections(self) -> Vec<BoundingBox>;
}

impl IntoDetections for Vec<BoundingBox> {
    fn into_detections(self) -> Vec<BoundingBox> {
        self
    }
}

/// `(x, y, w, h)` tuples, as produced by contour bounding-rect extraction.
impl IntoDetections for Vec<(i32, i32, i32, i32)> {
    fn into_detections(self) -> Vec<BoundingBox> {
        self.into_iter()
            .map(|(x, y, w, h)| BoundingBox::new(x, y, w, h))
            .collect()
    }
}
