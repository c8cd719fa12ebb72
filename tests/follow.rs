mod common;

use common::mocks::{CountingActuator, MockPhotoSource};
use common::synthetic_image::{tape_rgb, uniform_rgb, FLOOR};
use common::{init_logging, scratch_dir};
use rover_pilot::image::io::save_rgb_frame;
use rover_pilot::{FollowController, FollowOutcome, FollowParams, LineTracker};

#[test]
fn centred_tape_reads_straight_ahead() {
    init_logging();
    let frame = tape_rgb(320, 240, 159.5, 10.0);
    let vector = LineTracker::default()
        .extract(&frame)
        .expect("expected a line in the synthetic frame");
    assert_eq!(vector.angle.round() as i32, 90, "angle={}", vector.angle);
    assert!(vector.shift.abs() < 1.0, "shift={}", vector.shift);
}

#[test]
fn blank_frame_has_no_line() {
    let frame = uniform_rgb(320, 240, FLOOR);
    assert!(LineTracker::default().extract(&frame).is_none());
}

#[test]
fn extraction_is_idempotent() {
    let frame = tape_rgb(320, 240, 100.0, 7.0);
    let tracker = LineTracker::default();
    let first = tracker.extract(&frame);
    assert!(first.is_some());
    assert_eq!(first, tracker.extract(&frame));
}

#[test]
fn prepare_follow_equals_extract_file() {
    init_logging();
    let dir = scratch_dir("prepare_follow");
    let photo = dir.join("tape.jpg");
    save_rgb_frame(&tape_rgb(320, 240, 200.0, 9.0), &photo).expect("write photo");

    let tracker = LineTracker::default();
    let expected = tracker.extract_file(&photo).expect("readable photo");
    let mut controller = FollowController::new(
        CountingActuator::default(),
        MockPhotoSource::new(&photo),
        tracker,
        FollowParams::default(),
    );
    let actual = controller.prepare_follow().expect("capture succeeds");

    assert!(expected.is_some());
    assert_eq!(actual, expected);
}

#[test]
fn follow_run_pairs_every_pulse() {
    init_logging();
    let dir = scratch_dir("follow_run");
    let photo = dir.join("tape.png");
    save_rgb_frame(&tape_rgb(160, 120, 79.5, 8.0), &photo).expect("write photo");

    let params = FollowParams {
        pulse_ms: 0,
        ..Default::default()
    };
    let mut controller = FollowController::new(
        CountingActuator::default(),
        MockPhotoSource::new(&photo),
        LineTracker::default(),
        params,
    );
    assert_eq!(
        controller.run(4).expect("run"),
        FollowOutcome::Completed { cycles: 4 }
    );
    let (actuator, source) = controller.into_parts();
    assert_eq!(source.captures, 4);
    assert_eq!(actuator.on, 4);
    assert_eq!(actuator.off, 4);
}
