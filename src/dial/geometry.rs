//! Dial layout and screen-space conversions

use std::f64::consts::FRAC_PI_2;

use serde::{Deserialize, Serialize};

use super::mapping::normalize_angle;

/// A point in canvas coordinates (y grows downwards)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Fixed layout of the dial on its canvas
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DialGeometry {
    /// Center of the circle
    pub center: Point,
    /// Radius of the circle outline the dot travels on
    pub radius: f64,
    /// Radius of the draggable dot
    pub dot_radius: f64,
    pub canvas_width: f64,
    pub canvas_height: f64,
}

impl DialGeometry {
    /// Create a geometry for a square canvas with the dial centred on it
    pub fn centered(canvas_size: f64, radius: f64, dot_radius: f64) -> Self {
        Self {
            center: Point::new(canvas_size / 2.0, canvas_size / 2.0),
            radius,
            dot_radius,
            canvas_width: canvas_size,
            canvas_height: canvas_size,
        }
    }

    /// Point on the circle for a dial angle.
    ///
    /// Zero is 12 o'clock and angles grow clockwise, so the usual sine and
    /// cosine terms are swapped and the vertical one negated.
    pub fn point_at_angle(&self, angle: f64) -> Point {
        Point::new(
            self.center.x + self.radius * angle.sin(),
            self.center.y - self.radius * angle.cos(),
        )
    }

    /// Dial angle of a pointer position relative to the center, in `[0, 2π)`
    pub fn pointer_angle(&self, point: Point) -> f64 {
        let dx = point.x - self.center.x;
        let dy = point.y - self.center.y;
        normalize_angle(dy.atan2(dx) + FRAC_PI_2)
    }

    /// Whether a point falls on the dial canvas
    pub fn contains(&self, point: Point) -> bool {
        (0.0..=self.canvas_width).contains(&point.x) && (0.0..=self.canvas_height).contains(&point.y)
    }
}

impl Default for DialGeometry {
    fn default() -> Self {
        Self::centered(300.0, 100.0, 15.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{PI, TAU};

    fn assert_close(actual: f64, expected: f64) {
        assert!((actual - expected).abs() < 1e-9, "expected {expected}, got {actual}");
    }

    #[test]
    fn zero_angle_points_up() {
        let geometry = DialGeometry::default();
        let top = geometry.point_at_angle(0.0);
        assert_close(top.x, 150.0);
        assert_close(top.y, 50.0);
    }

    #[test]
    fn angles_grow_clockwise() {
        let geometry = DialGeometry::default();

        let right = geometry.point_at_angle(PI / 2.0);
        assert_close(right.x, 250.0);
        assert_close(right.y, 150.0);

        let bottom = geometry.point_at_angle(PI);
        assert_close(bottom.x, 150.0);
        assert_close(bottom.y, 250.0);

        let left = geometry.point_at_angle(3.0 * PI / 2.0);
        assert_close(left.x, 50.0);
        assert_close(left.y, 150.0);
    }

    #[test]
    fn pointer_angle_inverts_point_at_angle() {
        let geometry = DialGeometry::default();
        for step in 1..16 {
            let angle = TAU * step as f64 / 16.0;
            let point = geometry.point_at_angle(angle);
            assert_close(geometry.pointer_angle(point), angle);
        }
    }

    #[test]
    fn pointer_at_top_is_exactly_zero() {
        let geometry = DialGeometry::default();
        assert_eq!(geometry.pointer_angle(Point::new(150.0, 10.0)), 0.0);
    }

    #[test]
    fn contains_checks_canvas_bounds() {
        let geometry = DialGeometry::default();
        assert!(geometry.contains(Point::new(0.0, 0.0)));
        assert!(geometry.contains(Point::new(300.0, 300.0)));
        assert!(!geometry.contains(Point::new(-1.0, 150.0)));
        assert!(!geometry.contains(Point::new(150.0, 301.0)));
    }
}
