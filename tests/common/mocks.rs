#![allow(dead_code)]

use rover_pilot::camera::{FrameSource, PhotoId, PhotoLocation};
use rover_pilot::motion::MotionActuator;
use std::path::{Path, PathBuf};

/// Photo source that always "captures" the same file.
pub struct MockPhotoSource {
    dir: PathBuf,
    file_name: String,
    pub captures: usize,
}

impl MockPhotoSource {
    pub fn new(path: &Path) -> Self {
        Self {
            dir: path.parent().map(Path::to_path_buf).unwrap_or_default(),
            file_name: path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default(),
            captures: 0,
        }
    }
}

impl FrameSource for MockPhotoSource {
    fn make_photo(&mut self) -> Option<PhotoId> {
        self.captures += 1;
        Some(PhotoId::new(format!("mock{}", self.captures)))
    }

    fn get_path(&self, _id: &PhotoId) -> PhotoLocation {
        PhotoLocation::new(self.dir.clone(), self.file_name.clone())
    }
}

/// Counts switch calls and accepts them all.
#[derive(Default)]
pub struct CountingActuator {
    pub on: usize,
    pub off: usize,
}

impl CountingActuator {
    fn on(&mut self) -> bool {
        self.on += 1;
        true
    }

    fn off(&mut self) -> bool {
        self.off += 1;
        true
    }
}

impl MotionActuator for CountingActuator {
    fn fwd_on(&mut self) -> bool {
        self.on()
    }
    fn fwd_off(&mut self) -> bool {
        self.off()
    }
    fn back_on(&mut self) -> bool {
        self.on()
    }
    fn back_off(&mut self) -> bool {
        self.off()
    }
    fn left_on(&mut self) -> bool {
        self.on()
    }
    fn left_off(&mut self) -> bool {
        self.off()
    }
    fn right_on(&mut self) -> bool {
        self.on()
    }
    fn right_off(&mut self) -> bool {
        self.off()
    }
}
