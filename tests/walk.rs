mod common;

use common::mocks::{CountingActuator, MockPhotoSource};
use common::synthetic_image::uniform_rgb;
use common::{init_logging, scratch_dir};
use rover_pilot::image::io::save_rgb_frame;
use rover_pilot::image::GrayFrame;
use rover_pilot::{
    action_code, RobotError, WalkController, WalkDecisionEngine, WalkParams, WalkSettings,
};
use std::fs;

#[test]
fn uniform_patch_at_baseline_is_undecided() {
    let engine = WalkDecisionEngine::zone(WalkParams::default());
    let patch = GrayFrame::filled(32, 24, 130);
    let decision = engine.classify(&patch, 130.0);
    assert_eq!(decision, None);
    assert_eq!(action_code(decision), -1);
}

#[test]
fn prepare_action_with_working_collaborators() {
    init_logging();
    let dir = scratch_dir("prepare_action");
    let photo = dir.join("floor.png");
    save_rgb_frame(&uniform_rgb(64, 48, 140), &photo).expect("write photo");

    let settings = WalkSettings {
        diagnostics_dir: dir.join("diag"),
        pulse_ms: 0,
        ..Default::default()
    };
    let mut walker = WalkController::new(
        CountingActuator::default(),
        MockPhotoSource::new(&photo),
        WalkDecisionEngine::zone(WalkParams::default()),
        settings,
    );
    assert!(walker.prepare_action().expect("prepare"));
    assert_eq!(walker.baseline(), Some(140.0));
    assert_eq!(walker.last_frame_path(), Some(photo.as_path()));
}

#[test]
fn model_file_drives_the_engine() {
    let dir = scratch_dir("model");
    let model = dir.join("model.json");
    // 2x2 input; only the bias matters, and it favours `go_straight`.
    fs::write(
        &model,
        r#"{"inputWidth": 2, "inputHeight": 2,
            "layers": [{"weights": [[0,0,0,0],[0,0,0,0],[0,0,0,0],[0,0,0,0]],
                        "bias": [0, 0, 6, 0]}]}"#,
    )
    .expect("write model");

    let params = WalkParams {
        model: Some(model),
        ..Default::default()
    };
    let engine = WalkDecisionEngine::from_params(params).expect("model loads");
    assert_eq!(engine.patch_size(), (2, 2));
    assert_eq!(engine.classifier_name(), "mlp");

    let patch = GrayFrame::new(2, 2, vec![40, 200, 40, 200]).expect("patch");
    assert_eq!(action_code(engine.classify(&patch, 120.0)), 2);
}

#[test]
fn missing_model_is_a_configuration_error() {
    let params = WalkParams {
        model: Some(scratch_dir("no_model").join("absent.json")),
        ..Default::default()
    };
    assert!(matches!(
        WalkDecisionEngine::from_params(params),
        Err(RobotError::Configuration(_))
    ));
}
