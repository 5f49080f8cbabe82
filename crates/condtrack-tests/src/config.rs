//! Integration tests for building trackers from JSON configuration.

use condtrack_core::{Image, Rect};
use condtrack_tracking::{ClassifierMeasurementModel, ContrastClassifier, TrackerConfig};

fn model() -> Box<ClassifierMeasurementModel<ContrastClassifier>> {
    Box::new(ClassifierMeasurementModel::new(ContrastClassifier::default()))
}

#[test]
fn grid_config_builds_working_tracker() {
    let json = r#"{
        "sampler": { "type": "grid", "min_size": 0.25, "max_size": 0.25, "step_size": 0.0 },
        "extractor": { "type": "max_weight" }
    }"#;
    let config = TrackerConfig::from_json_str(json).unwrap();
    let mut tracker = config.build(model()).unwrap();

    let object = Rect::new(12, 30, 20, 20);
    let image = Image::with_square(80, 80, object, 230, 20);
    assert_eq!(tracker.process(&image).unwrap(), Some(object));
}

#[test]
fn default_config_is_reproducible() {
    let image = Image::with_square(100, 100, Rect::new(40, 40, 20, 20), 230, 20);
    let run = || {
        let mut tracker = TrackerConfig::default().build(model()).unwrap();
        (0..5)
            .map(|_| tracker.process(&image).unwrap())
            .collect::<Vec<_>>()
    };
    assert_eq!(run(), run());
}

#[test]
fn config_survives_json_round_trip() {
    let config = TrackerConfig {
        seed: 1234,
        ..Default::default()
    };
    let json = config.to_json_string().unwrap();
    let parsed = TrackerConfig::from_json_str(&json).unwrap();
    assert_eq!(parsed.seed, 1234);
    assert_eq!(parsed.to_json_string().unwrap(), json);
}
