use super::{FrameSource, PhotoId, PhotoLocation};
use crate::error::RobotError;
use log::debug;
use std::fs;
use std::path::{Path, PathBuf};

const IMAGE_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];

/// Serves previously captured images from a directory in file-name order.
///
/// Ids are the file names themselves. With `looping` the sequence wraps;
/// otherwise `make_photo` fails once every file was handed out. The files
/// belong to the user and are never removed by the controllers.
#[derive(Debug)]
pub struct ReplaySource {
    dir: PathBuf,
    files: Vec<String>,
    next: usize,
    looping: bool,
}

impl ReplaySource {
    pub fn open(dir: &Path, looping: bool) -> Result<Self, RobotError> {
        let entries = fs::read_dir(dir).map_err(|e| RobotError::io_at(dir, e))?;
        let mut files = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| RobotError::io_at(dir, e))?;
            let path = entry.path();
            let is_image = path
                .extension()
                .and_then(|e| e.to_str())
                .map(|e| IMAGE_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()))
                .unwrap_or(false);
            if is_image {
                if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                    files.push(name.to_string());
                }
            }
        }
        files.sort();
        debug!("replay source {}: {} images", dir.display(), files.len());
        Ok(Self {
            dir: dir.to_path_buf(),
            files,
            next: 0,
            looping,
        })
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl FrameSource for ReplaySource {
    fn make_photo(&mut self) -> Option<PhotoId> {
        if self.files.is_empty() {
            return None;
        }
        if self.next >= self.files.len() {
            if !self.looping {
                return None;
            }
            self.next = 0;
        }
        let name = self.files[self.next].clone();
        self.next += 1;
        Some(PhotoId(name))
    }

    fn get_path(&self, id: &PhotoId) -> PhotoLocation {
        PhotoLocation::new(self.dir.clone(), id.as_str())
    }

    fn owns_photos(&self) -> bool {
        false
    }
}
