//! Integration tests for the tracking loop.
//!
//! Runs the tracker over synthetic clips of a bright square on a dark
//! background, with the contrast classifier as measurement model.

use condtrack_core::{Image, Offset, PixelFormat, Rect, TrackerError};
use condtrack_tracking::{
    ClassifierMeasurementModel, CondensationTracker, ContrastClassifier, ContrastClassifierParams,
    FilteringPositionExtractor, GridSampler, GridSamplerParams, LowVarianceSampling,
    MaxWeightPositionExtractor, ResamplingSampler, ResamplingSamplerParams, SimpleTransitionModel,
    TransitionParams, WeightedMeanPositionExtractor,
};

// ── Helpers ────────────────────────────────────────────────────

const OBJECT: i32 = 16;

fn square_at(x: i32, y: i32) -> Rect {
    Rect::new(x, y, OBJECT, OBJECT)
}

fn frame(width: u32, height: u32, object: Rect) -> Image {
    Image::with_square(width, height, object, 230, 20)
}

fn blank(width: u32, height: u32) -> Image {
    Image::with_square(width, height, Rect::default(), 20, 20)
}

fn sharp_model() -> ClassifierMeasurementModel<ContrastClassifier> {
    ClassifierMeasurementModel::new(ContrastClassifier::new(ContrastClassifierParams {
        gain: 20.0,
        bias: 0.4,
        ..Default::default()
    }))
}

/// Grid tracker scanning only windows of the object's size.
fn grid_tracker() -> CondensationTracker {
    let grid = GridSampler::new(GridSamplerParams {
        min_size: 0.2,
        max_size: 0.2,
        size_scale: 1.2,
        step_size: 0.0,
    });
    CondensationTracker::new(
        Box::new(grid),
        Box::new(sharp_model()),
        Box::new(MaxWeightPositionExtractor),
    )
}

fn particle_tracker(seed: u64) -> CondensationTracker {
    let sampler = ResamplingSampler::new(
        ResamplingSamplerParams {
            count: 1000,
            random_rate: 0.35,
            min_size: 0.1,
            max_size: 0.5,
        },
        Box::new(LowVarianceSampling::new(seed)),
        Box::new(SimpleTransitionModel::new(TransitionParams::default(), seed + 1)),
        seed + 2,
    );
    CondensationTracker::new(
        Box::new(sampler),
        Box::new(sharp_model()),
        Box::new(FilteringPositionExtractor::new(Box::new(
            WeightedMeanPositionExtractor,
        ))),
    )
}

// ── Grid sampling: deterministic detection ─────────────────────

#[test]
fn grid_tracker_finds_exact_square() {
    let mut tracker = grid_tracker();
    let object = square_at(30, 20);
    let rect = tracker.process(&frame(80, 80, object)).unwrap();
    assert_eq!(rect, Some(object));
    assert_eq!(tracker.samples().len(), 65 * 65);
}

#[test]
fn grid_tracker_offset_matches_motion() {
    let mut tracker = grid_tracker();
    for i in 0..10 {
        let object = square_at(20 + 2 * i, 20 + i);
        let rect = tracker.process(&frame(80, 80, object)).unwrap();
        assert_eq!(rect, Some(object));
        let expected = if i == 0 {
            Offset::ZERO
        } else {
            Offset::new(2.0, 1.0)
        };
        assert_eq!(tracker.offset(), expected);
    }
}

#[test]
fn lost_object_keeps_last_position() {
    let mut tracker = grid_tracker();
    let object = square_at(50, 50);
    tracker.process(&frame(80, 80, object)).unwrap();
    assert_eq!(tracker.process(&blank(80, 80)).unwrap(), None);

    let position = tracker.position().unwrap();
    assert_eq!(position.bounds(), object);
    assert_eq!(tracker.offset(), Offset::ZERO);

    // Reappearing 10 px to the right is measured from the sticky position.
    tracker.process(&frame(80, 80, square_at(60, 50))).unwrap();
    assert_eq!(tracker.offset(), Offset::new(10.0, 0.0));
}

#[test]
fn empty_frame_is_reported() {
    let mut tracker = grid_tracker();
    let err = tracker
        .process(&Image::new(0, 0, PixelFormat::Gray8))
        .unwrap_err();
    assert!(matches!(err, TrackerError::EmptyImage { .. }));
}

// ── Particle filter ────────────────────────────────────────────

#[test]
fn particle_tracker_follows_moving_square() {
    let mut tracker = particle_tracker(11);
    let (width, height) = (120, 120);
    let mut detections = 0;
    let mut total_error = 0.0;

    for i in 0..60 {
        let object = square_at(20 + i, 30 + i / 2);
        let rect = tracker.process(&frame(width, height, object)).unwrap();
        assert_eq!(tracker.samples().len(), 1000);
        if i < 20 {
            continue;
        }
        if let Some(rect) = rect {
            detections += 1;
            total_error += (rect.center() - object.center()).length();
        }
    }

    assert!(detections >= 30, "only {detections} detections");
    assert!(total_error / detections as f64 <= 6.0);
}

#[test]
fn particle_tracker_keeps_all_particles_inside_frame() {
    let mut tracker = particle_tracker(3);
    let bounds = Rect::from_size(120, 90);
    for i in 0..15 {
        // Object runs off the right edge.
        tracker
            .process(&frame(120, 90, square_at(90 + 3 * i, 40)))
            .unwrap();
        assert!(tracker
            .samples()
            .iter()
            .all(|s| bounds.contains(s.bounds())));
    }
}

#[test]
fn particle_tracker_without_object_reports_nothing() {
    let mut tracker = particle_tracker(5);
    for _ in 0..5 {
        assert_eq!(tracker.process(&blank(100, 100)).unwrap(), None);
    }
    assert!(tracker.position().is_none());
    assert!(tracker.samples().iter().all(|s| !s.is_object()));
}
