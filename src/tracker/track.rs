//! Single tracked object.

use std::num::NonZeroUsize;
use std::time::Instant;

use nalgebra::Point2;

use crate::tracker::bbox::BoundingBox;
use crate::tracker::history::CentroidHistory;

/// Tracks more than this many frames stale are not offered new detections.
pub const REMATCH_STALENESS: u32 = 5;

/// Single object track. Owned by the track store.
#[derive(Debug, Clone)]
pub struct Track {
    /// Unique track identifier, assigned by the store
    pub(crate) id: u64,
    /// Bounding box of the last matched detection
    pub(crate) bbox: BoundingBox,
    /// Recent centers, oldest first
    pub(crate) history: CentroidHistory,
    /// Frames elapsed since creation
    pub(crate) age: u32,
    /// Frames in which the track was matched, creation included
    pub(crate) hits: u32,
    /// Consecutive frames since the last match
    pub(crate) disappeared: u32,
    /// One-way latch, never reset once set
    confirmed: bool,
    pub(crate) created_at: Instant,
}

impl Track {
    pub(crate) fn new(id: u64, bbox: BoundingBox, history_capacity: NonZeroUsize) -> Self {
        let mut history = CentroidHistory::with_capacity(history_capacity);
        history.push(bbox.center());

        Self {
            id,
            bbox,
            history,
            age: 0,
            hits: 1,
            disappeared: 0,
            confirmed: false,
            created_at: Instant::now(),
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn bbox(&self) -> BoundingBox {
        self.bbox
    }

    /// Center of the current bounding box.
    pub fn center(&self) -> Point2<i32> {
        self.bbox.center()
    }

    pub fn history(&self) -> &CentroidHistory {
        &self.history
    }

    pub fn age(&self) -> u32 {
        self.age
    }

    pub fn hits(&self) -> u32 {
        self.hits
    }

    pub fn disappeared(&self) -> u32 {
        self.disappeared
    }

    pub fn is_confirmed(&self) -> bool {
        self.confirmed
    }

    pub fn created_at(&self) -> Instant {
        self.created_at
    }

    /// Whether the track may still be matched or suppress new tracks.
    #[inline]
    pub fn is_fresh(&self) -> bool {
        self.disappeared <= REMATCH_STALENESS
    }

    /// Apply a matched detection.
    pub(crate) fn update(&mut self, bbox: BoundingBox) {
        self.bbox = bbox;
        self.disappeared = 0;
        self.history.push(bbox.center());
        self.hits += 1;
        self.age += 1;
    }

    /// Record a frame without a match.
    pub(crate) fn mark_missed(&mut self) {
        self.disappeared += 1;
        self.age += 1;
    }

    /// Latch the confirmed flag once `hits` reaches `min_hits`.
    ///
    /// Returns `true` only on the frame the latch flips.
    pub(crate) fn try_confirm(&mut self, min_hits: u32) -> bool {
        if !self.confirmed && self.hits >= min_hits {
            self.confirmed = true;
            return true;
        }
        false
    }
}
