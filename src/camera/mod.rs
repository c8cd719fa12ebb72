//! Photo collaborator contract and capture backends.
//!
//! A `FrameSource` takes a photo and tells the caller where it landed as a
//! (directory, file name) pair. The file exists and is non-empty only when
//! `make_photo` returned an id. Files the source created for the caller may
//! be removed after use; `owns_photos` says which sources hand out such files.
//!
//! Backends:
//! - `CommandCamera`: shells out to a still-capture tool (e.g. `raspistill`).
//! - `ReplaySource`: serves existing image files from a directory.

mod command;
mod replay;

pub use command::{CameraConfig, CommandCamera};
pub use replay::ReplaySource;

use crate::error::RobotError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Opaque identifier of a captured photo.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PhotoId(pub String);

impl PhotoId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PhotoId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Where a photo was stored.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PhotoLocation {
    pub dir: PathBuf,
    pub file_name: String,
}

impl PhotoLocation {
    pub fn new(dir: impl Into<PathBuf>, file_name: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            file_name: file_name.into(),
        }
    }

    pub fn path(&self) -> PathBuf {
        self.dir.join(&self.file_name)
    }
}

pub trait FrameSource {
    /// Take a photo. `None` means the capture failed.
    fn make_photo(&mut self) -> Option<PhotoId>;

    /// Resolve where photo `id` is stored.
    fn get_path(&self, id: &PhotoId) -> PhotoLocation;

    /// Whether returned files are fresh captures the caller may delete.
    fn owns_photos(&self) -> bool {
        true
    }
}

impl<S: FrameSource + ?Sized> FrameSource for &mut S {
    fn make_photo(&mut self) -> Option<PhotoId> {
        (**self).make_photo()
    }

    fn get_path(&self, id: &PhotoId) -> PhotoLocation {
        (**self).get_path(id)
    }

    fn owns_photos(&self) -> bool {
        (**self).owns_photos()
    }
}

impl<S: FrameSource + ?Sized> FrameSource for Box<S> {
    fn make_photo(&mut self) -> Option<PhotoId> {
        (**self).make_photo()
    }

    fn get_path(&self, id: &PhotoId) -> PhotoLocation {
        (**self).get_path(id)
    }

    fn owns_photos(&self) -> bool {
        (**self).owns_photos()
    }
}

/// Take a photo and return the path of a non-empty file holding it.
pub fn capture_path<S: FrameSource + ?Sized>(source: &mut S) -> Result<PathBuf, RobotError> {
    let id = source
        .make_photo()
        .ok_or_else(|| RobotError::capture("photo source reported failure"))?;
    let path = source.get_path(&id).path();
    ensure_non_empty(&path)?;
    Ok(path)
}

pub(crate) fn ensure_non_empty(path: &Path) -> Result<(), RobotError> {
    let meta = fs::metadata(path).map_err(|e| RobotError::Image {
        path: Some(path.to_path_buf()),
        reason: format!("photo not readable: {e}"),
    })?;
    if meta.len() == 0 {
        return Err(RobotError::Image {
            path: Some(path.to_path_buf()),
            reason: "photo file is empty".to_string(),
        });
    }
    Ok(())
}
