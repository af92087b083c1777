//! Planar geometry helpers for the zone bounds and the Voronoi dual

use glam::DVec2;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Tolerance used when testing whether a point sits on the bounds perimeter.
///
/// Corner positions come from clamped triangle circumcenters, so points that
/// belong on the perimeter can be off by a little less than one world unit.
const PERIMETER_TOLERANCE: f64 = 1.0;

/// Axis-aligned rectangle bounding a zone
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    /// Create bounds from an origin and dimensions
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Square bounds [0, extent] x [0, extent]
    pub fn square(extent: f64) -> Self {
        Self::new(0.0, 0.0, extent, extent)
    }

    #[inline]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    #[inline]
    pub fn center(&self) -> DVec2 {
        DVec2::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// True if the point lies inside or on the rectangle
    pub fn contains(&self, p: DVec2) -> bool {
        p.x >= self.x && p.x <= self.right() && p.y >= self.y && p.y <= self.bottom()
    }

    /// Clamp a point into the rectangle
    pub fn clamp(&self, p: DVec2) -> DVec2 {
        DVec2::new(
            p.x.clamp(self.x, self.right()),
            p.y.clamp(self.y, self.bottom()),
        )
    }

    /// True if the point lies on the rectangle's perimeter
    pub fn lies_on_perimeter(&self, p: DVec2) -> bool {
        close_enough(p.x, self.x, PERIMETER_TOLERANCE)
            || close_enough(p.y, self.y, PERIMETER_TOLERANCE)
            || close_enough(p.x, self.right(), PERIMETER_TOLERANCE)
            || close_enough(p.y, self.bottom(), PERIMETER_TOLERANCE)
    }
}

/// True if two scalars differ by at most `diff`
#[inline]
pub fn close_enough(a: f64, b: f64, diff: f64) -> bool {
    (a - b).abs() <= diff
}

/// Circumcenter of the triangle (a, b, c)
///
/// Falls back to the triangle centroid when the points are (nearly)
/// collinear and the circumcenter is unusable.
pub fn circumcenter(a: DVec2, b: DVec2, c: DVec2) -> DVec2 {
    let d = 2.0 * (a.x * (b.y - c.y) + b.x * (c.y - a.y) + c.x * (a.y - b.y));
    if d.abs() < 1e-12 {
        return (a + b + c) / 3.0;
    }

    let a2 = a.length_squared();
    let b2 = b.length_squared();
    let c2 = c.length_squared();

    DVec2::new(
        (a2 * (b.y - c.y) + b2 * (c.y - a.y) + c2 * (a.y - b.y)) / d,
        (a2 * (c.x - b.x) + b2 * (a.x - c.x) + c2 * (b.x - a.x)) / d,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_contains_and_clamp() {
        let bounds = Bounds::square(100.0);

        assert!(bounds.contains(DVec2::new(50.0, 50.0)));
        assert!(bounds.contains(DVec2::new(0.0, 100.0)));
        assert!(!bounds.contains(DVec2::new(-1.0, 50.0)));
        assert!(!bounds.contains(DVec2::new(50.0, 101.0)));

        let clamped = bounds.clamp(DVec2::new(150.0, -20.0));
        assert_eq!(clamped, DVec2::new(100.0, 0.0));
    }

    #[test]
    fn test_lies_on_perimeter() {
        let bounds = Bounds::square(100.0);

        assert!(bounds.lies_on_perimeter(DVec2::new(0.0, 50.0)));
        assert!(bounds.lies_on_perimeter(DVec2::new(100.0, 50.0)));
        assert!(bounds.lies_on_perimeter(DVec2::new(50.0, 0.5)));
        assert!(!bounds.lies_on_perimeter(DVec2::new(50.0, 50.0)));
    }

    #[test]
    fn test_circumcenter_right_triangle() {
        // The circumcenter of a right triangle is the midpoint of its hypotenuse
        let cc = circumcenter(
            DVec2::new(0.0, 0.0),
            DVec2::new(4.0, 0.0),
            DVec2::new(0.0, 3.0),
        );
        assert!((cc.x - 2.0).abs() < 1e-9);
        assert!((cc.y - 1.5).abs() < 1e-9);
    }

    #[test]
    fn test_circumcenter_collinear_fallback() {
        let cc = circumcenter(
            DVec2::new(0.0, 0.0),
            DVec2::new(1.0, 1.0),
            DVec2::new(2.0, 2.0),
        );
        // Degenerate input falls back to the centroid instead of blowing up
        assert!((cc.x - 1.0).abs() < 1e-9);
        assert!((cc.y - 1.0).abs() < 1e-9);
    }
}
