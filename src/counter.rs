//! Line-crossing counter over exported tracks.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::ConfigError;
use crate::tracker::ActiveTracks;

/// Direction of travel that counts as a crossing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CrossingDirection {
    /// From `x < line` to `x > line`
    #[default]
    #[serde(alias = "right")]
    Increasing,
    /// From `x > line` to `x < line`
    #[serde(alias = "left")]
    Decreasing,
}

impl CrossingDirection {
    /// Whether a path from `first_x` to `last_x` strictly crosses `line_x`.
    #[inline]
    pub fn crosses(self, first_x: i32, last_x: i32, line_x: i32) -> bool {
        match self {
            Self::Increasing => first_x < line_x && line_x < last_x,
            Self::Decreasing => first_x > line_x && line_x > last_x,
        }
    }
}

/// Configuration for the [`LineCounter`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CounterConfig {
    /// Vertical reference line, in pixels
    pub count_line_x: i32,
    pub direction: CrossingDirection,
    /// History length required before a track may be counted
    pub min_frames: usize,
}

impl Default for CounterConfig {
    fn default() -> Self {
        Self {
            count_line_x: 0,
            direction: CrossingDirection::default(),
            min_frames: 3,
        }
    }
}

impl CounterConfig {
    /// Place the count line at `ratio` of the frame width.
    pub fn from_frame_width(
        frame_width: u32,
        ratio: f64,
        direction: CrossingDirection,
    ) -> Result<Self, ConfigError> {
        if !(0.0..=1.0).contains(&ratio) {
            return Err(ConfigError::InvalidLineRatio(ratio));
        }
        let config = Self {
            count_line_x: (frame_width as f64 * ratio) as i32,
            direction,
            ..Self::default()
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.count_line_x < 0 {
            return Err(ConfigError::NegativeCountLine(self.count_line_x));
        }
        if self.min_frames == 0 {
            return Err(ConfigError::ZeroMinFrames);
        }
        Ok(())
    }
}

/// Counts each track at most once when its history spans the count line.
///
/// Counted ids are retained for the lifetime of the counter, even after the
/// tracker has dropped the track.
#[derive(Debug, Clone)]
pub struct LineCounter {
    config: CounterConfig,
    counted_ids: BTreeSet<u64>,
    total_count: u64,
}

impl LineCounter {
    pub fn new(config: CounterConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            counted_ids: BTreeSet::new(),
            total_count: 0,
        })
    }

    /// Count newly crossing tracks and return the running total.
    pub fn update(&mut self, tracks: &ActiveTracks) -> u64 {
        for (&track_id, track) in tracks {
            if self.counted_ids.contains(&track_id) {
                continue;
            }
            if track.centroid_history.len() < self.config.min_frames {
                continue;
            }
            let (Some(first), Some(last)) =
                (track.centroid_history.first(), track.centroid_history.last())
            else {
                continue;
            };

            if self
                .config
                .direction
                .crosses(first.x, last.x, self.config.count_line_x)
            {
                self.counted_ids.insert(track_id);
                self.total_count += 1;
                info!(
                    track_id,
                    first_x = first.x,
                    last_x = last.x,
                    total = self.total_count,
                    "track crossed count line"
                );
            }
        }

        self.total_count
    }

    pub fn total_count(&self) -> u64 {
        self.total_count
    }

    pub fn is_counted(&self, track_id: u64) -> bool {
        self.counted_ids.contains(&track_id)
    }

    pub fn counted_ids(&self) -> &BTreeSet<u64> {
        &self.counted_ids
    }

    pub fn count_line_x(&self) -> i32 {
        self.config.count_line_x
    }

    pub fn direction(&self) -> CrossingDirection {
        self.config.direction
    }

    pub fn config(&self) -> &CounterConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tracker::{BoundingBox, ExportedTrack};
    use nalgebra::Point2;

    fn exported(xs: &[i32]) -> ExportedTrack {
        let centroid_history: Vec<Point2<i32>> = xs.iter().map(|&x| Point2::new(x, 50)).collect();
        let last = *centroid_history.last().unwrap();
        ExportedTrack {
            bbox: BoundingBox::new(last.x - 5, last.y - 5, 10, 10),
            center: last,
            centroid_history,
            age: xs.len() as u32 - 1,
            hits: xs.len() as u32,
            confirmed: true,
        }
    }

    fn counter(direction: CrossingDirection) -> LineCounter {
        LineCounter::new(CounterConfig {
            count_line_x: 100,
            direction,
            min_frames: 3,
        })
        .unwrap()
    }

    #[test]
    fn test_counts_increasing_crossing_once() {
        let mut counter = counter(CrossingDirection::Increasing);
        let tracks = ActiveTracks::from([(4, exported(&[80, 95, 120]))]);

        assert_eq!(counter.update(&tracks), 1);
        assert_eq!(counter.update(&tracks), 1);
        assert_eq!(counter.update(&tracks), 1);
        assert!(counter.is_counted(4));
        assert_eq!(counter.counted_ids().len(), 1);
    }

    #[test]
    fn test_requires_min_frames() {
        let mut counter = counter(CrossingDirection::Increasing);
        let tracks = ActiveTracks::from([(0, exported(&[80, 120]))]);
        assert_eq!(counter.update(&tracks), 0);
    }

    #[test]
    fn test_landing_on_line_does_not_count() {
        let mut counter = counter(CrossingDirection::Increasing);
        let tracks = ActiveTracks::from([
            (0, exported(&[100, 110, 120])),
            (1, exported(&[80, 90, 100])),
        ]);
        assert_eq!(counter.update(&tracks), 0);
    }

    #[test]
    fn test_decreasing_direction() {
        let mut counter = counter(CrossingDirection::Decreasing);
        let tracks = ActiveTracks::from([
            (0, exported(&[80, 95, 120])),
            (1, exported(&[130, 110, 90])),
        ]);
        assert_eq!(counter.update(&tracks), 1);
        assert!(counter.is_counted(1));
        assert!(!counter.is_counted(0));
    }

    #[test]
    fn test_counted_ids_survive_track_loss() {
        let mut counter = counter(CrossingDirection::Increasing);
        counter.update(&ActiveTracks::from([(2, exported(&[50, 90, 150]))]));
        assert_eq!(counter.update(&ActiveTracks::new()), 1);
        assert!(counter.is_counted(2));
    }

    #[test]
    fn test_from_frame_width() {
        let config =
            CounterConfig::from_frame_width(640, 0.85, CrossingDirection::Increasing).unwrap();
        assert_eq!(config.count_line_x, 544);
        assert_eq!(config.min_frames, 3);

        assert_eq!(
            CounterConfig::from_frame_width(640, 1.5, CrossingDirection::Increasing),
            Err(ConfigError::InvalidLineRatio(1.5))
        );
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let err = LineCounter::new(CounterConfig {
            count_line_x: -1,
            ..Default::default()
        })
        .unwrap_err();
        assert_eq!(err, ConfigError::NegativeCountLine(-1));

        let err = LineCounter::new(CounterConfig {
            min_frames: 0,
            ..Default::default()
        })
        .unwrap_err();
        assert_eq!(err, ConfigError::ZeroMinFrames);
    }
}
