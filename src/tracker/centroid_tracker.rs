//! Track lifecycle: creation, confirmation, aging and removal.

use std::collections::BTreeMap;
use std::num::NonZeroUsize;

use nalgebra::Point2;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::error::ConfigError;
use crate::tracker::association::{self, AssignmentResult};
use crate::tracker::bbox::{BoundingBox, center_distance};
use crate::tracker::store::TrackStore;
use crate::tracker::track::Track;

/// Unmatched detections this close to a fresh track never spawn a new one.
pub const SUPPRESSION_RADIUS: f64 = 60.0;

/// Configuration for the [`CentroidTracker`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    /// Frames a track may go unmatched before it is deleted
    pub max_disappeared: u32,
    /// Exclusive upper bound on track-to-detection center distance
    pub max_distance: f64,
    /// Matches required before a track is exported
    pub min_hits: u32,
    /// Centers kept per track
    pub history_capacity: usize,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            max_disappeared: 30,
            max_distance: 100.0,
            min_hits: 10,
            history_capacity: 15,
        }
    }
}

impl TrackerConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_disappeared == 0 {
            return Err(ConfigError::ZeroMaxDisappeared);
        }
        if !self.max_distance.is_finite() || self.max_distance <= 0.0 {
            return Err(ConfigError::InvalidMaxDistance(self.max_distance));
        }
        if self.min_hits == 0 {
            return Err(ConfigError::ZeroMinHits);
        }
        if self.history_capacity == 0 {
            return Err(ConfigError::ZeroHistoryCapacity);
        }
        Ok(())
    }
}

/// Snapshot of a confirmed, live track handed to downstream consumers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportedTrack {
    pub bbox: BoundingBox,
    /// Most recent center
    pub center: Point2<i32>,
    /// Centers oldest to newest
    pub centroid_history: Vec<Point2<i32>>,
    pub age: u32,
    pub hits: u32,
    pub confirmed: bool,
}

impl From<&Track> for ExportedTrack {
    fn from(track: &Track) -> Self {
        let centroid_history = track.history().to_vec();
        let center = centroid_history
            .last()
            .copied()
            .unwrap_or_else(|| track.center());
        Self {
            bbox: track.bbox(),
            center,
            centroid_history,
            age: track.age(),
            hits: track.hits(),
            confirmed: track.is_confirmed(),
        }
    }
}

/// Exported tracks keyed by id, ascending.
pub type ActiveTracks = BTreeMap<u64, ExportedTrack>;

/// Centroid tracker with greedy association and hit-based confirmation.
#[derive(Debug, Clone)]
pub struct CentroidTracker {
    store: TrackStore,
    config: TrackerConfig,
}

impl CentroidTracker {
    pub fn new(config: TrackerConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let history_capacity =
            NonZeroUsize::new(config.history_capacity).ok_or(ConfigError::ZeroHistoryCapacity)?;
        Ok(Self {
            store: TrackStore::new(history_capacity),
            config,
        })
    }

    /// Advance the tracker by one frame and return the exported tracks.
    ///
    /// Malformed boxes are dropped before association.
    pub fn update(&mut self, detections: &[BoundingBox]) -> ActiveTracks {
        let detections: Vec<BoundingBox> = detections
            .iter()
            .filter(|d| {
                if d.is_valid() {
                    true
                } else {
                    warn!(bbox = ?d, "dropping malformed detection");
                    false
                }
            })
            .copied()
            .collect();

        if self.store.is_empty() {
            for bbox in &detections {
                self.create_track(*bbox);
            }
        } else if detections.is_empty() {
            for track in self.store.tracks_mut() {
                track.mark_missed();
            }
        } else {
            let AssignmentResult {
                matches,
                unmatched_tracks,
                unmatched_detections,
            } = association::greedy_assignment(
                self.store.tracks(),
                &detections,
                self.config.max_distance,
            );

            for (itracked, idet) in matches {
                let track = &mut self.store.tracks_mut()[itracked];
                track.update(detections[idet]);
                let id = track.id();
                if track.try_confirm(self.config.min_hits) {
                    debug!(track_id = id, "track confirmed");
                    self.store.mark_confirmed(id);
                }
            }
            for idx in unmatched_tracks {
                self.store.tracks_mut()[idx].mark_missed();
            }

            for idx in unmatched_detections {
                let bbox = detections[idx];
                match self.nearby_fresh_track(&bbox) {
                    Some(id) => {
                        debug!(track_id = id, bbox = ?bbox, "suppressed duplicate detection")
                    }
                    None => self.create_track(bbox),
                }
            }
        }

        let max_disappeared = self.config.max_disappeared;
        for track in self
            .store
            .remove_where(|t| t.disappeared() > max_disappeared)
        {
            debug!(
                track_id = track.id(),
                age = track.age(),
                hits = track.hits(),
                "track removed"
            );
        }

        let active = self.active_tracks();
        trace!(
            detections = detections.len(),
            live = self.store.len(),
            exported = active.len(),
            "frame updated"
        );
        active
    }

    /// Confirmed tracks still within the disappearance budget.
    pub fn active_tracks(&self) -> ActiveTracks {
        self.store
            .tracks()
            .iter()
            .filter(|t| t.is_confirmed() && t.disappeared() <= self.config.max_disappeared)
            .map(|t| (t.id(), ExportedTrack::from(t)))
            .collect()
    }

    fn create_track(&mut self, bbox: BoundingBox) {
        let id = self.store.create(bbox);
        debug!(track_id = id, bbox = ?bbox, "track created");

        // min_hits of 1 is already met by the creating detection.
        if let Some(track) = self.store.tracks_mut().last_mut() {
            if track.try_confirm(self.config.min_hits) {
                debug!(track_id = id, "track confirmed");
                self.store.mark_confirmed(id);
            }
        }
    }

    /// First fresh track whose center lies within [`SUPPRESSION_RADIUS`] of `bbox`.
    fn nearby_fresh_track(&self, bbox: &BoundingBox) -> Option<u64> {
        let center = bbox.center();
        self.store
            .tracks()
            .iter()
            .filter(|t| t.is_fresh())
            .find(|t| center_distance(&t.center(), &center) < SUPPRESSION_RADIUS)
            .map(|t| t.id())
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    pub fn track(&self, id: u64) -> Option<&Track> {
        self.store.get(id)
    }

    /// Live tracks in creation order, confirmed or not.
    pub fn tracks(&self) -> &[Track] {
        self.store.tracks()
    }

    pub fn confirmed_ids(&self) -> impl Iterator<Item = u64> + '_ {
        self.store.confirmed_ids().iter().copied()
    }

    pub fn next_id(&self) -> u64 {
        self.store.next_id()
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }
}
