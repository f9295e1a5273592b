//! The result circle

use glam::DVec2;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Number of segments used when a circle is drawn
pub const DEFAULT_CIRCLE_SEGMENTS: usize = 40;

/// A circle in the plane
///
/// For a solved problem, `radius` is the distance from `center` to the
/// nearest site, so no site lies strictly inside.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    pub center: DVec2,
    pub radius: f64,
}

impl Circle {
    pub fn new(center: DVec2, radius: f64) -> Self {
        Self { center, radius }
    }

    pub fn area(&self) -> f64 {
        std::f64::consts::PI * self.radius * self.radius
    }

    /// True when `p` lies strictly inside the circle
    pub fn contains_strictly(&self, p: DVec2) -> bool {
        self.center.distance(p) < self.radius
    }

    /// Points evenly spaced around the circle, starting at angle 0
    ///
    /// The loop is implicitly closed: the last point connects back to the
    /// first. Fewer than 3 segments are treated as 3.
    ///
    /// # Example
    ///
    /// ```rust
    /// use largest_empty_circle::Circle;
    /// use glam::DVec2;
    ///
    /// let circle = Circle::new(DVec2::ZERO, 2.0);
    /// let points = circle.polyline(40);
    ///
    /// assert_eq!(points.len(), 40);
    /// assert!((points[0] - DVec2::new(2.0, 0.0)).length() < 1e-12);
    /// ```
    pub fn polyline(&self, segments: usize) -> Vec<DVec2> {
        let segments = segments.max(3);
        let step = std::f64::consts::TAU / segments as f64;
        (0..segments)
            .map(|i| {
                let angle = step * i as f64;
                self.center + self.radius * DVec2::new(angle.cos(), angle.sin())
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_polyline_on_circle() {
        let circle = Circle::new(DVec2::new(1.0, -2.0), 0.5);
        let points = circle.polyline(DEFAULT_CIRCLE_SEGMENTS);

        assert_eq!(points.len(), DEFAULT_CIRCLE_SEGMENTS);
        for p in points {
            assert!((p.distance(circle.center) - 0.5).abs() < 1e-12);
        }
        assert_eq!(circle.polyline(1).len(), 3);
    }

    #[test]
    fn test_contains_strictly_excludes_rim() {
        let circle = Circle::new(DVec2::ZERO, 1.0);
        assert!(circle.contains_strictly(DVec2::new(0.5, 0.5)));
        assert!(!circle.contains_strictly(DVec2::new(1.0, 0.0)));
        assert!((circle.area() - std::f64::consts::PI).abs() < 1e-12);
    }
}
