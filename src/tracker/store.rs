//! Ownership of live tracks and identifier assignment.

use std::collections::BTreeSet;
use std::num::NonZeroUsize;

use crate::tracker::bbox::BoundingBox;
use crate::tracker::track::Track;

/// Live tracks kept in creation order.
///
/// Identifiers come from a counter that only moves forward, so creation order
/// is also ascending id order and lookups can binary search.
#[derive(Debug, Clone)]
pub struct TrackStore {
    tracks: Vec<Track>,
    confirmed_ids: BTreeSet<u64>,
    next_id: u64,
    history_capacity: NonZeroUsize,
}

impl TrackStore {
    pub fn new(history_capacity: NonZeroUsize) -> Self {
        Self {
            tracks: Vec::new(),
            confirmed_ids: BTreeSet::new(),
            next_id: 0,
            history_capacity,
        }
    }

    /// Create a track for `bbox` and return its id.
    pub fn create(&mut self, bbox: BoundingBox) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.tracks.push(Track::new(id, bbox, self.history_capacity));
        id
    }

    /// Register `id` as confirmed.
    pub fn mark_confirmed(&mut self, id: u64) {
        self.confirmed_ids.insert(id);
    }

    /// Delete every track matching `pred`, returning the removed tracks.
    ///
    /// Removed ids leave the confirmed set too.
    pub fn remove_where<F>(&mut self, mut pred: F) -> Vec<Track>
    where
        F: FnMut(&Track) -> bool,
    {
        let mut removed = Vec::new();
        let mut kept = Vec::with_capacity(self.tracks.len());
        for track in self.tracks.drain(..) {
            if pred(&track) {
                self.confirmed_ids.remove(&track.id);
                removed.push(track);
            } else {
                kept.push(track);
            }
        }
        self.tracks = kept;
        removed
    }

    pub fn get(&self, id: u64) -> Option<&Track> {
        self.tracks
            .binary_search_by_key(&id, |t| t.id)
            .ok()
            .map(|idx| &self.tracks[idx])
    }

    /// Tracks in creation order.
    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub(crate) fn tracks_mut(&mut self) -> &mut [Track] {
        &mut self.tracks
    }

    pub fn confirmed_ids(&self) -> &BTreeSet<u64> {
        &self.confirmed_ids
    }

    /// Identifier the next created track will receive.
    pub fn next_id(&self) -> u64 {
        self.next_id
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }
}
