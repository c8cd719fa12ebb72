//! I/O helpers for captured frames and JSON reports.
//!
//! - `load_rgb_frame`: decode a JPEG/PNG capture into an owned RGB frame.
//! - `load_gray_frame`: decode and convert to 8-bit luma.
//! - `save_gray_frame`: write a grayscale frame (format follows the extension).
//! - `write_json_file`: pretty-print a serializable value to disk.
use super::frame::{GrayFrame, RgbFrame};
use crate::error::RobotError;
use image::{GrayImage, ImageBuffer};
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Load an image from disk as 8-bit RGB.
pub fn load_rgb_frame(path: &Path) -> Result<RgbFrame, RobotError> {
    let img = image::open(path)
        .map_err(|e| RobotError::image_at(path, e))?
        .into_rgb8();
    let width = img.width() as usize;
    let height = img.height() as usize;
    RgbFrame::new(width, height, img.into_raw()).map_err(|e| e.with_path(path))
}

/// Load an image from disk and convert to 8-bit luma with the same weights
/// as `RgbFrame::to_gray`, so both load paths agree pixel for pixel.
pub fn load_gray_frame(path: &Path) -> Result<GrayFrame, RobotError> {
    Ok(load_rgb_frame(path)?.to_gray())
}

/// Save an 8-bit grayscale frame. The encoder is chosen from the extension.
pub fn save_gray_frame(frame: &GrayFrame, path: &Path) -> Result<(), RobotError> {
    ensure_parent_dir(path)?;
    let image: GrayImage = ImageBuffer::from_raw(
        frame.width() as u32,
        frame.height() as u32,
        frame.as_raw().to_vec(),
    )
    .ok_or_else(|| RobotError::Image {
        path: Some(path.to_path_buf()),
        reason: "failed to create image buffer".to_string(),
    })?;
    image.save(path).map_err(|e| RobotError::image_at(path, e))
}

/// Save an RGB frame. Used by the replay tooling and tests.
pub fn save_rgb_frame(frame: &RgbFrame, path: &Path) -> Result<(), RobotError> {
    ensure_parent_dir(path)?;
    let image: image::RgbImage = ImageBuffer::from_raw(
        frame.width() as u32,
        frame.height() as u32,
        frame.as_raw().to_vec(),
    )
    .ok_or_else(|| RobotError::Image {
        path: Some(path.to_path_buf()),
        reason: "failed to create image buffer".to_string(),
    })?;
    image.save(path).map_err(|e| RobotError::image_at(path, e))
}

/// Serialize a value as pretty JSON to `path`, creating parent directories.
pub fn write_json_file<T: Serialize>(path: &Path, value: &T) -> Result<(), RobotError> {
    ensure_parent_dir(path)?;
    let json = serde_json::to_string_pretty(value).map_err(|e| RobotError::Io {
        path: path.to_path_buf(),
        reason: format!("failed to serialize JSON: {e}"),
    })?;
    fs::write(path, json).map_err(|e| RobotError::io_at(path, e))
}

pub(crate) fn ensure_parent_dir(path: &Path) -> Result<(), RobotError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| RobotError::io_at(parent, e))?;
        }
    }
    Ok(())
}
