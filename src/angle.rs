//! Angle utilities for steering geometry.
//!
//! Image coordinates have `y` growing downward while the robot's forward axis
//! points up the frame. Line orientations are undirected, so they live in
//! `[0, 180)` degrees with 90 meaning "straight ahead".

/// Normalizes an angle in degrees into the range [0, 180).
#[inline]
pub fn normalize_half_turn_deg(angle: f32) -> f32 {
    let norm = angle.rem_euclid(180.0);
    if norm >= 180.0 - 1e-4 {
        0.0
    } else {
        // Folds -0.0 into 0.0.
        norm + 0.0
    }
}

/// Orientation of an image-space direction `(dx, dy)` measured counter-clockwise
/// from the image's +x axis with the y axis flipped to point up, folded into
/// [0, 180). A vertical direction yields 90 regardless of its sign.
#[inline]
pub fn heading_deg(dx: f32, dy: f32) -> f32 {
    normalize_half_turn_deg((-dy).atan2(dx).to_degrees())
}

/// Signed deviation from straight ahead: positive when the line leans left
/// (angle above 90), negative when it leans right.
#[inline]
pub fn deviation_from_forward_deg(angle: f32) -> f32 {
    angle - 90.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-3
    }

    #[test]
    fn normalize_wraps_into_half_turn() {
        assert!(approx_eq(normalize_half_turn_deg(45.0), 45.0));
        assert!(approx_eq(normalize_half_turn_deg(-45.0), 135.0));
        assert!(approx_eq(normalize_half_turn_deg(180.0), 0.0));
        assert!(approx_eq(normalize_half_turn_deg(540.0), 0.0));
    }

    #[test]
    fn vertical_heading_is_ninety_either_way() {
        assert!(approx_eq(heading_deg(0.0, 1.0), 90.0));
        assert!(approx_eq(heading_deg(0.0, -1.0), 90.0));
    }

    #[test]
    fn heading_flips_image_y() {
        // Up and to the right in the image.
        assert!(approx_eq(heading_deg(1.0, -1.0), 45.0));
        // Down and to the right in the image.
        assert!(approx_eq(heading_deg(1.0, 1.0), 135.0));
        assert!(approx_eq(heading_deg(1.0, 0.0), 0.0));
    }

    #[test]
    fn horizontal_heading_is_positive_zero() {
        let angle = heading_deg(1.0, 0.0);
        assert_eq!(angle, 0.0);
        assert!(angle.is_sign_positive());
        assert!(normalize_half_turn_deg(-0.0).is_sign_positive());
        assert_eq!(serde_json::to_string(&angle).unwrap(), "0.0");
    }
}
