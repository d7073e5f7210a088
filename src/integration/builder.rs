//! Builder for creating bounding boxes from various detector output formats.

use crate::error::InvalidBox;
use crate::tracker::BoundingBox;

/// Converts detector-native float coordinates into a [`BoundingBox`].
///
/// Internally the builder keeps the left/top and right/bottom edges; every
/// setter overwrites all four. Float coordinates are truncated toward zero
/// when the box is built.
#[derive(Debug, Clone, Default)]
pub struct BoundingBoxBuilder {
    left: f32,
    top: f32,
    right: f32,
    bottom: f32,
}

impl BoundingBoxBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Corner pair: left, top, right, bottom.
    pub fn tlbr(self, left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Center form, as emitted by most YOLO-style heads.
    pub fn xywh(self, cx: f32, cy: f32, w: f32, h: f32) -> Self {
        let (half_w, half_h) = (w / 2.0, h / 2.0);
        self.tlbr(cx - half_w, cy - half_h, cx + half_w, cy + half_h)
    }

    /// Left, top, width, height, as emitted by contour bounding rects.
    pub fn tlwh(self, left: f32, top: f32, w: f32, h: f32) -> Self {
        self.tlbr(left, top, left + w, top + h)
    }

    /// Build the final box, rejecting non-positive dimensions.
    pub fn build(self) -> Result<BoundingBox, InvalidBox> {
        let x = self.left as i32;
        let y = self.top as i32;
        let w = (self.right - self.left) as i32;
        let h = (self.bottom - self.top) as i32;
        BoundingBox::try_new(x, y, w, h)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tlbr() {
        let bbox = BoundingBoxBuilder::new()
            .tlbr(10.0, 20.0, 50.0, 80.0)
            .build()
            .unwrap();
        assert_eq!(bbox, BoundingBox::new(10, 20, 40, 60));
    }

    #[test]
    fn test_xywh() {
        let bbox = BoundingBoxBuilder::new()
            .xywh(30.0, 50.0, 40.0, 60.0)
            .build()
            .unwrap();
        assert_eq!(bbox, BoundingBox::new(10, 20, 40, 60));
    }

    #[test]
    fn test_tlwh_truncates() {
        let bbox = BoundingBoxBuilder::new()
            .tlwh(10.7, 20.2, 40.9, 60.0)
            .build()
            .unwrap();
        assert_eq!(bbox.x, 10);
        assert_eq!(bbox.y, 20);
        assert_eq!(bbox.w, 40);
    }

    #[test]
    fn test_inverted_corners_are_rejected() {
        let err = BoundingBoxBuilder::new()
            .tlbr(50.0, 20.0, 10.0, 80.0)
            .build()
            .unwrap_err();
        assert_eq!(err.width, -40);
    }
}
