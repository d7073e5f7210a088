use fishcount_rs::tracker::REMATCH_STALENESS;
use fishcount_rs::{
    BoundingBox, CentroidTracker, CounterConfig, CrossingDirection, LineCounter, TrackerConfig,
};

fn fish_at(cx: i32, cy: i32) -> BoundingBox {
    BoundingBox::new(cx - 20, cy - 10, 40, 20)
}

fn tracker(min_hits: u32) -> CentroidTracker {
    CentroidTracker::new(TrackerConfig {
        min_hits,
        ..TrackerConfig::default()
    })
    .unwrap()
}

fn counter(count_line_x: i32, direction: CrossingDirection) -> LineCounter {
    LineCounter::new(CounterConfig {
        count_line_x,
        direction,
        min_frames: 3,
    })
    .unwrap()
}

#[test]
fn test_steady_crossing_counts_once() {
    let mut tracker = tracker(1);
    let mut counter = counter(100, CrossingDirection::Increasing);

    let xs = [10, 48, 86, 124, 162, 200];
    let mut totals = Vec::new();
    for &x in &xs {
        let tracks = tracker.update(&[fish_at(x, 100)]);
        totals.push(counter.update(&tracks));
    }

    // History first spans the line once the center reaches x=124.
    assert_eq!(totals, vec![0, 0, 0, 1, 1, 1]);
    assert_eq!(tracker.len(), 1);

    // Holding still afterwards never adds to the total.
    for _ in 0..10 {
        let tracks = tracker.update(&[fish_at(200, 100)]);
        assert_eq!(counter.update(&tracks), 1);
    }
}

#[test]
fn test_oscillation_without_crossing_is_not_counted() {
    let mut tracker = tracker(1);
    let mut counter = counter(100, CrossingDirection::Increasing);

    for i in 0..40 {
        let x = if i % 2 == 0 { 60 } else { 90 };
        let tracks = tracker.update(&[fish_at(x, 100)]);
        assert_eq!(counter.update(&tracks), 0);
    }
}

#[test]
fn test_simultaneous_distant_detections_get_sequential_ids() {
    let mut tracker = tracker(1);
    let active = tracker.update(&[fish_at(100, 100), fish_at(300, 100)]);
    assert_eq!(active.keys().copied().collect::<Vec<_>>(), vec![0, 1]);

    // Again on a non-empty store, so the suppression rule is in play.
    let active = tracker.update(&[fish_at(110, 100), fish_at(310, 100), fish_at(500, 400)]);
    assert_eq!(active.keys().copied().collect::<Vec<_>>(), vec![0, 1, 2]);
}

#[test]
fn test_disappeared_track_leaves_export() {
    let max_disappeared = 30;
    let mut tracker = CentroidTracker::new(TrackerConfig {
        max_disappeared,
        min_hits: 1,
        ..TrackerConfig::default()
    })
    .unwrap();

    assert!(tracker.update(&[fish_at(100, 100)]).contains_key(&0));
    for _ in 0..max_disappeared {
        assert!(tracker.update(&[]).contains_key(&0));
    }
    assert!(!tracker.update(&[]).contains_key(&0));
    assert!(tracker.track(0).is_none());

    for _ in 0..5 {
        assert!(tracker.update(&[]).is_empty());
    }
}

#[test]
fn test_unconfirmed_track_is_never_counted() {
    let mut tracker = tracker(10);
    let mut counter = counter(100, CrossingDirection::Increasing);

    // Five matches then gone for good: crosses the line but never confirms.
    for x in [40, 70, 100, 130, 160] {
        let tracks = tracker.update(&[fish_at(x, 100)]);
        assert!(tracks.is_empty());
        counter.update(&tracks);
    }
    for _ in 0..40 {
        let tracks = tracker.update(&[]);
        assert_eq!(counter.update(&tracks), 0);
    }
    assert!(tracker.is_empty());
    assert_eq!(counter.counted_ids().len(), 0);
}

#[test]
fn test_nearby_detection_does_not_spawn_track() {
    let mut tracker = tracker(10);
    tracker.update(&[fish_at(200, 100)]);

    // Two detections: one matches, the other sits 50px away from the fresh track.
    tracker.update(&[fish_at(210, 100), fish_at(250, 130)]);
    assert_eq!(tracker.len(), 1);
    assert_eq!(tracker.next_id(), 1);

    // Once the track goes stale it no longer suppresses creation.
    for _ in 0..=REMATCH_STALENESS {
        tracker.update(&[]);
    }
    tracker.update(&[fish_at(150, 100)]);
    assert_eq!(tracker.len(), 2);
}

#[test]
fn test_track_created_this_frame_suppresses_neighbour() {
    let mut tracker = tracker(10);
    tracker.update(&[fish_at(100, 100)]);

    // Track 0 takes the first box; the other two are unmatched and 30px apart.
    tracker.update(&[fish_at(110, 100), fish_at(400, 300), fish_at(430, 300)]);
    assert_eq!(tracker.next_id(), 2);
    assert_eq!(tracker.len(), 2);
    assert_eq!(tracker.track(1).map(|t| t.center().x), Some(400));
    assert!(tracker.track(2).is_none());
}

#[test]
fn test_decreasing_direction_counts_leftward_fish() {
    let mut tracker = tracker(2);
    let mut counter = counter(300, CrossingDirection::Decreasing);

    // 20px steps stay inside the backtrack tolerance, so one track follows the fish.
    let mut total = 0;
    for i in 0..10 {
        let tracks = tracker.update(&[fish_at(400 - i * 20, 100)]);
        total = counter.update(&tracks);
    }
    assert_eq!(total, 1);
    assert!(counter.is_counted(0));
}

#[test]
fn test_monotonic_ids_and_totals() {
    let mut tracker = tracker(2);
    let mut counter = counter(320, CrossingDirection::Increasing);

    let mut last_next_id = tracker.next_id();
    let mut last_total = 0;
    for frame in 0..120 {
        // A new fish enters on the left every 20 frames and swims right.
        let detections: Vec<BoundingBox> = (0..=frame / 20)
            .map(|k| frame - k * 20)
            .filter(|&t| t < 40)
            .map(|t| fish_at(20 + t * 25, 100))
            .collect();
        let tracks = tracker.update(&detections);
        let total = counter.update(&tracks);

        assert!(total >= last_total);
        assert!(tracker.next_id() >= last_next_id);
        last_total = total;
        last_next_id = tracker.next_id();
    }
    assert_eq!(last_total, 6);
}
