//! Owned camera frames.
//!
//! `RgbFrame` holds interleaved 8-bit RGB as decoded from a capture.
//! `GrayFrame` holds single-channel luma and doubles as the walk patch type.
//! Both validate their buffer length on construction, so every frame that
//! exists is well formed.
use super::u8::ImageU8;
use crate::error::RobotError;

/// Interleaved 8-bit RGB frame, row-major, no padding.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RgbFrame {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl RgbFrame {
    pub fn new(width: usize, height: usize, data: Vec<u8>) -> Result<Self, RobotError> {
        let expected = width * height * 3;
        if data.len() != expected {
            return Err(RobotError::Image {
                path: None,
                reason: format!(
                    "rgb buffer holds {} bytes, expected {expected} for {width}x{height}",
                    data.len()
                ),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn as_raw(&self) -> &[u8] {
        &self.data
    }

    /// ITU-R BT.601 luma, matching what most camera pipelines call "gray".
    pub fn to_gray(&self) -> GrayFrame {
        let data = self
            .data
            .chunks_exact(3)
            .map(|px| {
                let y = 0.299 * px[0] as f32 + 0.587 * px[1] as f32 + 0.114 * px[2] as f32;
                y.round().clamp(0.0, 255.0) as u8
            })
            .collect();
        GrayFrame {
            width: self.width,
            height: self.height,
            data,
        }
    }
}

/// Single-channel 8-bit frame, row-major, no padding.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GrayFrame {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl GrayFrame {
    pub fn new(width: usize, height: usize, data: Vec<u8>) -> Result<Self, RobotError> {
        let expected = width * height;
        if data.len() != expected {
            return Err(RobotError::Image {
                path: None,
                reason: format!(
                    "gray buffer holds {} bytes, expected {expected} for {width}x{height}",
                    data.len()
                ),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Caller guarantees `data.len() == width * height`.
    pub(crate) fn from_raw_parts(width: usize, height: usize, data: Vec<u8>) -> Self {
        debug_assert_eq!(data.len(), width * height);
        Self {
            width,
            height,
            data,
        }
    }

    /// Frame of constant intensity.
    pub fn filled(width: usize, height: usize, value: u8) -> Self {
        Self {
            width,
            height,
            data: vec![value; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn as_raw(&self) -> &[u8] {
        &self.data
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> u8 {
        self.data[y * self.width + x]
    }

    /// Borrow as a read-only `ImageU8` view
    pub fn as_view(&self) -> ImageU8<'_> {
        ImageU8 {
            w: self.width,
            h: self.height,
            stride: self.width,
            data: &self.data,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_mismatched_buffers() {
        assert!(RgbFrame::new(4, 4, vec![0; 47]).is_err());
        assert!(GrayFrame::new(4, 4, vec![0; 15]).is_err());
        assert!(RgbFrame::new(4, 4, vec![0; 48]).is_ok());
    }

    #[test]
    fn gray_conversion_keeps_neutral_levels() {
        let frame = RgbFrame::new(2, 1, vec![0, 0, 0, 200, 200, 200]).unwrap();
        let gray = frame.to_gray();
        assert_eq!(gray.as_raw(), &[0, 200]);
    }
}
