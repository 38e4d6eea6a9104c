//! Joint angle calculation
//!
//! Measures the interior angle at a joint from the two segments meeting at it,
//! e.g. hip→knee (thigh) and knee→ankle (shin) for the knee.

use super::Point;

/// Interior angle at vertex `b` in degrees, in [0, 180]
///
/// Uses the difference of the two segment headings:
/// `|atan2(c - b) - atan2(a - b)|`, folded back into [0, 180].
///
/// - 180° = segments in a straight line (leg locked out)
/// - 90° = right angle (thigh parallel to the floor in a squat)
///
/// Coincident points yield a finite but meaningless angle and NaN inputs
/// propagate; gate on landmark visibility before trusting the result.
pub fn angle(a: Point, b: Point, c: Point) -> f32 {
    let radians = (c.y - b.y).atan2(c.x - b.x) - (a.y - b.y).atan2(a.x - b.x);
    let degrees = radians.to_degrees().abs();

    if degrees > 180.0 {
        360.0 - degrees
    } else {
        degrees
    }
}

/// Lean of the `top`→`bottom` segment away from vertical, in degrees
///
/// 0° = `top` directly above `bottom` (upright torso), 90° = horizontal.
pub fn inclination_from_vertical(top: Point, bottom: Point) -> f32 {
    let dx = (top.x - bottom.x).abs();
    let dy = bottom.y - top.y; // image y grows downward
    dx.atan2(dy).to_degrees()
}
