//! Distances, deltas and small numeric helpers

use super::Point;

/// 2D Euclidean distance (depth ignored, it is too noisy from a single camera)
pub fn distance(a: Point, b: Point) -> f32 {
    (b.x - a.x).hypot(b.y - a.y)
}

/// Signed vertical offset of `to` relative to `from` (positive = `to` is lower)
pub fn vertical_delta(from: Point, to: Point) -> f32 {
    to.y - from.y
}

/// Signed horizontal offset of `to` relative to `from` (positive = `to` is further right)
pub fn horizontal_delta(from: Point, to: Point) -> f32 {
    to.x - from.x
}

/// Arithmetic mean; NaN for an empty slice
pub fn average(values: &[f32]) -> f32 {
    values.iter().sum::<f32>() / values.len() as f32
}

/// Inclusive range check
pub fn in_range(value: f32, min: f32, max: f32) -> bool {
    value >= min && value <= max
}

pub fn midpoint(a: Point, b: Point) -> Point {
    Point::with_depth((a.x + b.x) / 2.0, (a.y + b.y) / 2.0, (a.z + b.z) / 2.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_distance() {
        assert_relative_eq!(distance(Point::new(0.0, 0.0), Point::new(0.3, 0.4)), 0.5);
    }

    #[test]
    fn test_deltas_are_signed() {
        let heel = Point::new(0.40, 0.90);
        let toe = Point::new(0.45, 0.93);
        assert_relative_eq!(vertical_delta(heel, toe), 0.03, epsilon = 1e-6);
        assert_relative_eq!(vertical_delta(toe, heel), -0.03, epsilon = 1e-6);
        assert_relative_eq!(horizontal_delta(heel, toe), 0.05, epsilon = 1e-6);
    }

    #[test]
    fn test_average() {
        assert_relative_eq!(average(&[120.0, 130.0]), 125.0);
        assert!(average(&[]).is_nan());
    }

    #[test]
    fn test_in_range_is_inclusive() {
        assert!(in_range(80.0, 80.0, 100.0));
        assert!(in_range(100.0, 80.0, 100.0));
        assert!(!in_range(100.1, 80.0, 100.0));
    }

    #[test]
    fn test_midpoint() {
        let m = midpoint(Point::new(0.4, 0.2), Point::new(0.6, 0.4));
        assert_relative_eq!(m.x, 0.5);
        assert_relative_eq!(m.y, 0.3);
    }
}
