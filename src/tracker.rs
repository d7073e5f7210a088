mod association;
mod bbox;
mod centroid_tracker;
mod history;
mod store;
mod track;

pub use association::{
    AssignmentResult, BACKTRACK_TOLERANCE, center_distance_matrix, greedy_assignment,
};
pub use bbox::{BoundingBox, center_distance};
pub use centroid_tracker::{
    ActiveTracks, CentroidTracker, ExportedTrack, SUPPRESSION_RADIUS, TrackerConfig,
};
pub use history::CentroidHistory;
pub use store::TrackStore;
pub use track::{REMATCH_STALENESS, Track};
