//! Greedy nearest-center association between tracks and detections.

use nalgebra::Point2;
use ndarray::Array2;

use crate::tracker::bbox::{BoundingBox, center_distance};
use crate::tracker::track::Track;

/// How far a detection may sit behind a track (in x) and still match it.
pub const BACKTRACK_TOLERANCE: i32 = 30;

/// Compute the center distance matrix between tracks and detections.
///
/// Returns a matrix of shape (M, N) where M is the number of tracks and N the
/// number of detections.
pub fn center_distance_matrix(tracks: &[Track], detections: &[BoundingBox]) -> Array2<f64> {
    let det_centers: Vec<Point2<i32>> = detections.iter().map(|d| d.center()).collect();
    let mut dists = Array2::zeros((tracks.len(), detections.len()));
    for (i, t) in tracks.iter().enumerate() {
        let track_center = t.center();
        for (j, d) in det_centers.iter().enumerate() {
            dists[[i, j]] = center_distance(&track_center, d);
        }
    }
    dists
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssignmentResult {
    /// `(track index, detection index)` pairs, in track order
    pub matches: Vec<(usize, usize)>,
    /// Tracks left without a detection, stale ones included
    pub unmatched_tracks: Vec<usize>,
    /// Detections no track consumed, in input order
    pub unmatched_detections: Vec<usize>,
}

/// Match detections to tracks greedily in track creation order.
///
/// Each fresh track takes the nearest unconsumed detection whose distance is
/// below `max_distance` and whose center lies no more than
/// [`BACKTRACK_TOLERANCE`] pixels behind the track in x. Ties go to the
/// detection seen first. Stale tracks are reported as unmatched without
/// being offered any detection.
pub fn greedy_assignment(
    tracks: &[Track],
    detections: &[BoundingBox],
    max_distance: f64,
) -> AssignmentResult {
    let dists = center_distance_matrix(tracks, detections);
    let det_centers: Vec<Point2<i32>> = detections.iter().map(|d| d.center()).collect();

    let mut consumed = vec![false; detections.len()];
    let mut matches = Vec::new();
    let mut unmatched_tracks = Vec::new();

    for (i, track) in tracks.iter().enumerate() {
        if !track.is_fresh() {
            unmatched_tracks.push(i);
            continue;
        }

        let gate_x = track.center().x.saturating_sub(BACKTRACK_TOLERANCE);
        let mut best: Option<(usize, f64)> = None;

        for (j, center) in det_centers.iter().enumerate() {
            if consumed[j] {
                continue;
            }
            let distance = dists[[i, j]];
            if distance >= max_distance || center.x <= gate_x {
                continue;
            }
            if best.is_none_or(|(_, best_distance)| distance < best_distance) {
                best = Some((j, distance));
            }
        }

        match best {
            Some((j, _)) => {
                consumed[j] = true;
                matches.push((i, j));
            }
            None => unmatched_tracks.push(i),
        }
    }

    let unmatched_detections = consumed
        .iter()
        .enumerate()
        .filter_map(|(j, &used)| if used { None } else { Some(j) })
        .collect();

    AssignmentResult {
        matches,
        unmatched_tracks,
        unmatched_detections,
    }
}
