use super::*;
use crate::camera::{PhotoId, PhotoLocation, ReplaySource};
use crate::image::io::save_gray_frame;
use crate::image::GrayFrame;
use crate::motion::DryRunActuator;
use std::path::PathBuf;

fn vector(angle: f32, shift_ratio: f32) -> SteeringVector {
    SteeringVector {
        angle,
        shift: shift_ratio * 80.0,
        shift_ratio,
        centroid: [80.0 + shift_ratio * 80.0, 90.0],
    }
}

#[test]
fn centred_straight_line_goes_forward() {
    let p = FollowParams::default();
    assert_eq!(steer(&vector(90.0, 0.0), &p), FollowCommand::Forward);
    assert_eq!(steer(&vector(100.0, 0.1), &p), FollowCommand::Forward);
}

#[test]
fn offset_line_is_chased() {
    let p = FollowParams::default();
    assert_eq!(steer(&vector(90.0, 0.6), &p), FollowCommand::TurnRight);
    assert_eq!(steer(&vector(90.0, -0.6), &p), FollowCommand::TurnLeft);
    // Offset wins over a heading that points the other way.
    assert_eq!(steer(&vector(130.0, 0.6), &p), FollowCommand::TurnRight);
}

#[test]
fn leaning_line_corrects_heading() {
    let p = FollowParams::default();
    assert_eq!(steer(&vector(60.0, 0.0), &p), FollowCommand::TurnRight);
    assert_eq!(steer(&vector(120.0, 0.0), &p), FollowCommand::TurnLeft);
}

struct OneFile {
    dir: PathBuf,
    name: &'static str,
    fail: bool,
}

impl FrameSource for OneFile {
    fn make_photo(&mut self) -> Option<PhotoId> {
        (!self.fail).then(|| PhotoId::new(self.name))
    }

    fn get_path(&self, id: &PhotoId) -> PhotoLocation {
        PhotoLocation::new(&self.dir, id.as_str())
    }
}

fn scratch(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "rover_pilot_follow_{name}_{}",
        std::process::id()
    ));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    dir
}

/// Light floor, dark vertical tape at column `cx`.
fn write_tape(path: &Path, cx: usize) {
    let (w, h) = (160usize, 120usize);
    let mut data = vec![210u8; w * h];
    for y in 0..h {
        for x in cx.saturating_sub(8)..(cx + 8).min(w) {
            data[y * w + x] = 25;
        }
    }
    save_gray_frame(&GrayFrame::new(w, h, data).unwrap(), path).unwrap();
}

fn controller(dir: &Path, name: &'static str) -> FollowController<DryRunActuator, OneFile> {
    let params = FollowParams {
        pulse_ms: 0,
        ..Default::default()
    };
    FollowController::new(
        DryRunActuator::new(),
        OneFile {
            dir: dir.to_path_buf(),
            name,
            fail: false,
        },
        LineTracker::default(),
        params,
    )
}

#[test]
fn prepare_follow_matches_direct_extraction() {
    let dir = scratch("prepare");
    write_tape(&dir.join("tape.png"), 80);
    let mut follow = controller(&dir, "tape.png");
    let via_controller = follow.prepare_follow().unwrap();
    let direct = LineTracker::default()
        .extract_file(&dir.join("tape.png"))
        .unwrap();
    assert!(via_controller.is_some());
    assert_eq!(via_controller, direct);
}

#[test]
fn failed_capture_and_missing_file_are_distinct_errors() {
    let dir = scratch("errors");
    let mut follow = controller(&dir, "absent.png");
    assert!(matches!(
        follow.prepare_follow(),
        Err(RobotError::Image { .. })
    ));
    follow.source.fail = true;
    assert!(matches!(
        follow.prepare_follow(),
        Err(RobotError::Capture { .. })
    ));
}

#[test]
fn step_pulses_toward_offset_line() {
    let dir = scratch("step");
    write_tape(&dir.join("right.png"), 140);
    let mut follow = controller(&dir, "right.png");
    assert_eq!(follow.step().unwrap(), Some(FollowCommand::TurnRight));
    assert_eq!(follow.actuator().pulses(), vec![Direction::Right]);
}

#[test]
fn run_reports_lost_line() {
    let dir = scratch("lost");
    let blank = GrayFrame::filled(160, 120, 210);
    save_gray_frame(&blank, &dir.join("blank.png")).unwrap();
    let mut follow = controller(&dir, "blank.png");
    assert_eq!(
        follow.run(10).unwrap(),
        FollowOutcome::LineLost { cycles: 3 }
    );
    assert!(follow.actuator().pulses().is_empty());
}

#[test]
fn photos_can_be_removed_after_use() {
    let dir = scratch("remove");
    let photo = dir.join("tape.png");
    write_tape(&photo, 80);
    let mut follow = controller(&dir, "tape.png");
    follow.params.remove_photos = true;
    assert!(follow.prepare_follow().unwrap().is_some());
    assert!(!photo.exists());
}

#[test]
fn replayed_photos_are_never_removed() {
    let dir = scratch("replay");
    let photo = dir.join("tape.png");
    write_tape(&photo, 80);
    let params = FollowParams {
        pulse_ms: 0,
        remove_photos: true,
        ..Default::default()
    };
    let source = ReplaySource::open(&dir, true).unwrap();
    let mut follow =
        FollowController::new(DryRunActuator::new(), source, LineTracker::default(), params);
    assert!(follow.prepare_follow().unwrap().is_some());
    assert!(photo.exists());
    // The looping source hands the same file out again.
    assert!(follow.prepare_follow().unwrap().is_some());
    assert!(photo.exists());
}
