//! Convex boundary polygons
//!
//! The boundary limits where a circle center may lie. By default it is the
//! convex hull of the sites (Andrew's monotone chain); callers may also supply
//! their own convex polygon.

use glam::DVec2;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{CircleError, Result};
use crate::geometry::{orient2d, point_in_polygon, Segment};

/// Counter-clockwise convex polygon with no repeated or collinear vertices
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct ConvexPolygon {
    vertices: Vec<DVec2>,
}

impl ConvexPolygon {
    /// Same polygon with every vertex multiplied by a positive `factor`
    pub(crate) fn scaled(&self, factor: f64) -> Self {
        Self {
            vertices: self.vertices.iter().map(|&v| v * factor).collect(),
        }
    }

    /// Convex hull of `sites`
    ///
    /// Sites on a hull edge but not at a corner are left out, so every
    /// returned vertex is a strict convex corner.
    ///
    /// # Errors
    ///
    /// - `NonFiniteSite` if any coordinate is NaN or infinite
    /// - `DegenerateInput` if the hull has fewer than 3 vertices
    ///
    /// # Example
    ///
    /// ```rust
    /// use largest_empty_circle::pipeline::ConvexPolygon;
    /// use glam::DVec2;
    ///
    /// let sites = [
    ///     DVec2::new(0.0, 0.0),
    ///     DVec2::new(2.0, 0.0),
    ///     DVec2::new(1.0, 0.5),
    ///     DVec2::new(2.0, 2.0),
    ///     DVec2::new(0.0, 2.0),
    /// ];
    /// let hull = ConvexPolygon::hull_of(&sites).unwrap();
    /// assert_eq!(hull.vertices().len(), 4);
    /// ```
    pub fn hull_of(sites: &[DVec2]) -> Result<Self> {
        if let Some(index) = sites.iter().position(|p| !p.is_finite()) {
            return Err(CircleError::NonFiniteSite(index));
        }

        let mut points = sites.to_vec();
        points.sort_by(|a, b| a.x.total_cmp(&b.x).then(a.y.total_cmp(&b.y)));
        points.dedup();

        if points.len() < 3 {
            return Err(CircleError::DegenerateInput(format!(
                "convex hull needs at least 3 distinct sites (got {})",
                points.len()
            )));
        }

        let mut lower: Vec<DVec2> = Vec::with_capacity(points.len());
        for &p in &points {
            while lower.len() >= 2 && !orient2d(lower[lower.len() - 2], lower[lower.len() - 1], p).is_left() {
                lower.pop();
            }
            lower.push(p);
        }

        let mut upper: Vec<DVec2> = Vec::with_capacity(points.len());
        for &p in points.iter().rev() {
            while upper.len() >= 2 && !orient2d(upper[upper.len() - 2], upper[upper.len() - 1], p).is_left() {
                upper.pop();
            }
            upper.push(p);
        }

        // Each chain ends where the other begins
        lower.pop();
        upper.pop();
        lower.extend(upper);

        if lower.len() < 3 {
            return Err(CircleError::DegenerateInput("all sites are collinear".into()));
        }
        Ok(Self { vertices: lower })
    }

    /// Validate a caller-supplied convex polygon
    ///
    /// Repeated and collinear vertices are dropped and clockwise input is
    /// reversed. The first vertex need not be repeated at the end.
    ///
    /// # Errors
    ///
    /// Returns `InvalidBoundary` if a coordinate is not finite, fewer than 3
    /// corners remain, or the polygon is not convex and simple.
    pub fn from_vertices(vertices: Vec<DVec2>) -> Result<Self> {
        if vertices.iter().any(|p| !p.is_finite()) {
            return Err(CircleError::InvalidBoundary("non-finite vertex".into()));
        }

        let mut ring = vertices;
        ring.dedup();
        while ring.len() > 1 && ring.first() == ring.last() {
            ring.pop();
        }
        if ring.len() < 3 {
            return Err(CircleError::InvalidBoundary(format!(
                "need at least 3 distinct vertices (got {})",
                ring.len()
            )));
        }

        if signed_area(&ring) < 0.0 {
            ring.reverse();
        }

        // Drop collinear corners until every turn is strict
        loop {
            let n = ring.len();
            if n < 3 {
                return Err(CircleError::InvalidBoundary("polygon has zero area".into()));
            }
            let flat = (0..n).find(|&i| {
                orient2d(ring[(i + n - 1) % n], ring[i], ring[(i + 1) % n]).is_collinear()
            });
            match flat {
                Some(i) => {
                    ring.remove(i);
                }
                None => break,
            }
        }

        let n = ring.len();
        for i in 0..n {
            let a = ring[i];
            let b = ring[(i + 1) % n];
            if ring.iter().any(|&p| orient2d(a, b, p).is_right()) {
                return Err(CircleError::InvalidBoundary(
                    "polygon is not convex or not simple".into(),
                ));
            }
        }

        Ok(Self { vertices: ring })
    }

    /// Corners in counter-clockwise order
    pub fn vertices(&self) -> &[DVec2] {
        &self.vertices
    }

    /// Edges in counter-clockwise order, the last one closing back to the first vertex
    pub fn edges(&self) -> Vec<Segment> {
        let n = self.vertices.len();
        (0..n)
            .map(|i| Segment::new(self.vertices[i], self.vertices[(i + 1) % n]))
            .collect()
    }

    /// Boundary-inclusive containment, with points within `tolerance` of an edge counting as inside
    pub fn contains(&self, p: DVec2, tolerance: f64) -> bool {
        point_in_polygon(p, &self.vertices, tolerance)
    }

    pub fn area(&self) -> f64 {
        signed_area(&self.vertices)
    }
}

/// Shoelace formula, positive for counter-clockwise rings
fn signed_area(ring: &[DVec2]) -> f64 {
    let n = ring.len();
    (0..n)
        .map(|i| ring[i].perp_dot(ring[(i + 1) % n]))
        .sum::<f64>()
        * 0.5
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_ccw(polygon: &ConvexPolygon) {
        let v = polygon.vertices();
        let n = v.len();
        for i in 0..n {
            assert!(orient2d(v[i], v[(i + 1) % n], v[(i + 2) % n]).is_left());
        }
    }

    #[test]
    fn test_hull_skips_interior_and_edge_points() {
        let sites = [
            DVec2::new(0.0, 0.0),
            DVec2::new(1.0, 0.0),
            DVec2::new(2.0, 0.0),
            DVec2::new(2.0, 2.0),
            DVec2::new(1.0, 1.0),
            DVec2::new(0.0, 2.0),
            DVec2::new(0.0, 1.0),
            DVec2::new(2.0, 2.0),
        ];
        let hull = ConvexPolygon::hull_of(&sites).unwrap();

        assert_eq!(
            hull.vertices(),
            &[
                DVec2::new(0.0, 0.0),
                DVec2::new(2.0, 0.0),
                DVec2::new(2.0, 2.0),
                DVec2::new(0.0, 2.0)
            ]
        );
        assert_ccw(&hull);
        assert_eq!(hull.area(), 4.0);
    }

    #[test]
    fn test_hull_degenerate() {
        let collinear = [DVec2::ZERO, DVec2::ONE, DVec2::splat(2.0), DVec2::splat(3.0)];
        assert!(matches!(
            ConvexPolygon::hull_of(&collinear),
            Err(CircleError::DegenerateInput(_))
        ));

        let repeated = [DVec2::ONE, DVec2::ONE, DVec2::ZERO];
        assert!(matches!(
            ConvexPolygon::hull_of(&repeated),
            Err(CircleError::DegenerateInput(_))
        ));

        let nan = [DVec2::ZERO, DVec2::new(0.0, f64::NAN), DVec2::ONE];
        assert_eq!(
            ConvexPolygon::hull_of(&nan).unwrap_err(),
            CircleError::NonFiniteSite(1)
        );
    }

    #[test]
    fn test_edges_wrap_around() {
        let hull = ConvexPolygon::hull_of(&[DVec2::ZERO, DVec2::X, DVec2::Y]).unwrap();
        let edges = hull.edges();

        assert_eq!(edges.len(), 3);
        for (i, edge) in edges.iter().enumerate() {
            assert_eq!(edge.b, edges[(i + 1) % 3].a);
        }
    }

    #[test]
    fn test_from_vertices_normalizes() {
        // Clockwise, closed, with a repeated and a collinear vertex
        let polygon = ConvexPolygon::from_vertices(vec![
            DVec2::new(0.0, 0.0),
            DVec2::new(0.0, 2.0),
            DVec2::new(0.0, 2.0),
            DVec2::new(2.0, 2.0),
            DVec2::new(2.0, 1.0),
            DVec2::new(2.0, 0.0),
            DVec2::new(0.0, 0.0),
        ])
        .unwrap();

        assert_eq!(polygon.vertices().len(), 4);
        assert_ccw(&polygon);
        assert!(polygon.area() > 0.0);
    }

    #[test]
    fn test_from_vertices_rejects_bad_polygons() {
        let concave = vec![
            DVec2::new(0.0, 0.0),
            DVec2::new(2.0, 0.0),
            DVec2::new(1.0, 0.5),
            DVec2::new(2.0, 2.0),
            DVec2::new(0.0, 2.0),
        ];
        assert!(matches!(
            ConvexPolygon::from_vertices(concave),
            Err(CircleError::InvalidBoundary(_))
        ));

        // Every turn is a left turn, but the ring winds twice
        let pentagram: Vec<DVec2> = (0..5)
            .map(|k| {
                let angle = std::f64::consts::TAU * (2 * k) as f64 / 5.0;
                DVec2::new(angle.cos(), angle.sin())
            })
            .collect();
        assert!(matches!(
            ConvexPolygon::from_vertices(pentagram),
            Err(CircleError::InvalidBoundary(_))
        ));

        let flat = vec![DVec2::ZERO, DVec2::X, DVec2::new(2.0, 0.0)];
        assert!(ConvexPolygon::from_vertices(flat).is_err());
    }

    #[test]
    fn test_contains_is_boundary_inclusive() {
        let hull = ConvexPolygon::hull_of(&[DVec2::ZERO, DVec2::X, DVec2::ONE, DVec2::Y]).unwrap();
        assert!(hull.contains(DVec2::splat(0.5), 0.0));
        assert!(hull.contains(DVec2::new(0.5, 0.0), 0.0));
        assert!(!hull.contains(DVec2::new(0.5, -0.1), 0.0));
    }
}
