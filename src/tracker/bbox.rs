use nalgebra::Point2;

use crate::error::InvalidBox;

/// Axis-aligned bounding box in integer pixel coordinates.
///
/// Stored in TLWH format: top-left x, top-left y, width, height. A box
/// describes a physical object only when both `w` and `h` are positive;
/// see [`BoundingBox::is_valid`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize)]
pub struct BoundingBox {
    /// Top-left x coordinate
    pub x: i32,
    /// Top-left y coordinate
    pub y: i32,
    /// Width of the bounding box
    pub w: i32,
    /// Height of the bounding box
    pub h: i32,
}

impl BoundingBox {
    /// Create a box without validating its dimensions.
    #[inline]
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// Create a box, rejecting non-positive width or height.
    pub fn try_new(x: i32, y: i32, w: i32, h: i32) -> Result<Self, InvalidBox> {
        let bbox = Self::new(x, y, w, h);
        if bbox.is_valid() {
            Ok(bbox)
        } else {
            Err(InvalidBox {
                width: w,
                height: h,
            })
        }
    }

    #[inline]
    pub fn is_valid(&self) -> bool {
        self.w > 0 && self.h > 0
    }

    /// Center point, each coordinate truncated toward zero.
    #[inline]
    pub fn center(&self) -> Point2<i32> {
        let cx = self.x as f64 + self.w as f64 / 2.0;
        let cy = self.y as f64 + self.h as f64 / 2.0;
        Point2::new(cx as i32, cy as i32)
    }

    #[inline]
    pub fn area(&self) -> i64 {
        self.w as i64 * self.h as i64
    }

    /// Right edge, widened so boxes near `i32::MAX` cannot overflow.
    #[inline]
    pub fn right(&self) -> i64 {
        self.x as i64 + self.w as i64
    }

    #[inline]
    pub fn bottom(&self) -> i64 {
        self.y as i64 + self.h as i64
    }

    /// Width over height, `0.0` for a zero-height box.
    #[inline]
    pub fn aspect_ratio(&self) -> f64 {
        if self.h != 0 {
            self.w as f64 / self.h as f64
        } else {
            0.0
        }
    }

    /// Calculate Intersection over Union (IoU) with another bounding box.
    pub fn iou(&self, other: &BoundingBox) -> f64 {
        let x1 = self.x.max(other.x) as i64;
        let y1 = self.y.max(other.y) as i64;
        let x2 = self.right().min(other.right());
        let y2 = self.bottom().min(other.bottom());

        let inter_area = (x2 - x1).max(0) * (y2 - y1).max(0);
        let union_area = self.area() + other.area() - inter_area;

        if union_area > 0 {
            inter_area as f64 / union_area as f64
        } else {
            0.0
        }
    }
}

/// Euclidean distance between two integer points.
#[inline]
pub fn center_distance(a: &Point2<i32>, b: &Point2<i32>) -> f64 {
    nalgebra::distance(&a.cast::<f64>(), &b.cast::<f64>())
}
