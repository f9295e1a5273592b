//! Candidate centers for the largest empty circle
//!
//! The distance-to-nearest-site function restricted to a convex region peaks
//! at a Voronoi vertex inside the region, at a point where a Voronoi edge
//! crosses the region boundary, or at a corner of the region. This module
//! enumerates all three kinds.

use std::collections::HashMap;

use glam::DVec2;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::clip::ClippedEdge;
use super::hull::ConvexPolygon;
use crate::geometry::{segment_intersection, Intersection};

/// Where a candidate came from
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CandidateSource {
    /// Endpoint of a clipped Voronoi edge lying inside the boundary
    VoronoiVertex,
    /// A Voronoi edge crossing a boundary edge
    BoundaryCrossing,
    /// Corner of a caller-supplied boundary
    BoundaryCorner,
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    pub point: DVec2,
    pub source: CandidateSource,
}

/// Grid hash that remembers accepted points and rejects near-duplicates
///
/// Cells are `tolerance` wide, so any point within `tolerance` of an accepted
/// one lives in the same or an adjacent cell.
struct PointSet {
    tolerance: f64,
    cells: HashMap<(i64, i64), Vec<DVec2>>,
}

impl PointSet {
    fn new(tolerance: f64) -> Self {
        Self {
            tolerance,
            cells: HashMap::new(),
        }
    }

    fn cell(&self, p: DVec2) -> (i64, i64) {
        if self.tolerance > 0.0 {
            (
                (p.x / self.tolerance).floor() as i64,
                (p.y / self.tolerance).floor() as i64,
            )
        } else {
            // Adding 0.0 folds -0.0 into 0.0
            ((p.x + 0.0).to_bits() as i64, (p.y + 0.0).to_bits() as i64)
        }
    }

    /// Insert `p` unless an accepted point lies within tolerance; true if inserted
    fn insert(&mut self, p: DVec2) -> bool {
        let (cx, cy) = self.cell(p);
        if self.tolerance > 0.0 {
            let limit = self.tolerance * self.tolerance;
            for dx in -1..=1 {
                for dy in -1..=1 {
                    let key = (cx.saturating_add(dx), cy.saturating_add(dy));
                    if let Some(points) = self.cells.get(&key) {
                        if points.iter().any(|q| q.distance_squared(p) <= limit) {
                            return false;
                        }
                    }
                }
            }
        } else if self.cells.contains_key(&(cx, cy)) {
            return false;
        }
        self.cells.entry((cx, cy)).or_default().push(p);
        true
    }
}

/// Enumerate candidate centers in generation order, without near-duplicates
///
/// 1. Endpoints of clipped Voronoi edges inside or on the boundary
/// 2. Crossings of every boundary edge with every clipped edge
/// 3. Boundary corners, when `include_corners` is set
///
/// Points closer than `tolerance` to an earlier candidate are dropped; the
/// same `tolerance` decides whether a point is on the boundary.
pub fn generate_candidates(
    clipped: &[ClippedEdge],
    boundary: &ConvexPolygon,
    include_corners: bool,
    tolerance: f64,
) -> Vec<Candidate> {
    let mut seen = PointSet::new(tolerance);
    let mut candidates = Vec::new();

    for edge in clipped {
        for point in [edge.segment.a, edge.segment.b] {
            if boundary.contains(point, tolerance) && seen.insert(point) {
                candidates.push(Candidate {
                    point,
                    source: CandidateSource::VoronoiVertex,
                });
            }
        }
    }
    let vertices = candidates.len();

    for side in boundary.edges() {
        for edge in clipped {
            // Overlaps are covered by the endpoint candidates
            if let Intersection::Point(point) = segment_intersection(&side, &edge.segment) {
                if seen.insert(point) {
                    candidates.push(Candidate {
                        point,
                        source: CandidateSource::BoundaryCrossing,
                    });
                }
            }
        }
    }
    let crossings = candidates.len() - vertices;

    if include_corners {
        for &point in boundary.vertices() {
            if seen.insert(point) {
                candidates.push(Candidate {
                    point,
                    source: CandidateSource::BoundaryCorner,
                });
            }
        }
    }

    tracing::debug!(
        vertices,
        crossings,
        total = candidates.len(),
        "candidates generated"
    );
    candidates
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Segment;

    fn square() -> ConvexPolygon {
        ConvexPolygon::from_vertices(vec![
            DVec2::new(0.0, 0.0),
            DVec2::new(2.0, 0.0),
            DVec2::new(2.0, 2.0),
            DVec2::new(0.0, 2.0),
        ])
        .unwrap()
    }

    fn edge(a: DVec2, b: DVec2) -> ClippedEdge {
        ClippedEdge {
            sites: [0, 1],
            segment: Segment::new(a, b),
        }
    }

    #[test]
    fn test_vertices_inside_are_kept() {
        let clipped = [
            edge(DVec2::new(1.0, 1.0), DVec2::new(1.5, 1.0)),
            edge(DVec2::new(1.5, 1.0), DVec2::new(5.0, 1.0)),
        ];
        let candidates = generate_candidates(&clipped, &square(), false, 1e-9);

        let vertices: Vec<DVec2> = candidates
            .iter()
            .filter(|c| c.source == CandidateSource::VoronoiVertex)
            .map(|c| c.point)
            .collect();
        assert_eq!(vertices, vec![DVec2::new(1.0, 1.0), DVec2::new(1.5, 1.0)]);

        let crossings: Vec<DVec2> = candidates
            .iter()
            .filter(|c| c.source == CandidateSource::BoundaryCrossing)
            .map(|c| c.point)
            .collect();
        assert_eq!(crossings.len(), 1);
        assert!((crossings[0] - DVec2::new(2.0, 1.0)).length() < 1e-12);
    }

    #[test]
    fn test_near_duplicates_merge_to_first() {
        let clipped = [
            edge(DVec2::new(1.0, 1.0), DVec2::new(1.0 + 1e-12, 1.0)),
            edge(DVec2::new(0.5, 0.5), DVec2::new(1.0, 1.0 - 1e-12)),
        ];
        let candidates = generate_candidates(&clipped, &square(), false, 1e-9);

        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0].point, DVec2::new(1.0, 1.0));
        assert_eq!(candidates[1].point, DVec2::new(0.5, 0.5));
    }

    #[test]
    fn test_zero_tolerance_merges_exact_copies_only() {
        let clipped = [
            edge(DVec2::new(1.0, 1.0), DVec2::new(0.0, 0.5)),
            edge(DVec2::new(1.0, 1.0), DVec2::new(1.0, 1.0 + 1e-12)),
        ];
        let candidates = generate_candidates(&clipped, &square(), false, 0.0);
        assert_eq!(candidates.len(), 3);
    }

    #[test]
    fn test_corners_only_when_requested() {
        let without = generate_candidates(&[], &square(), false, 1e-9);
        assert!(without.is_empty());

        let with = generate_candidates(&[], &square(), true, 1e-9);
        assert_eq!(with.len(), 4);
        assert!(with.iter().all(|c| c.source == CandidateSource::BoundaryCorner));
    }

    #[test]
    fn test_overlap_with_boundary_is_ignored() {
        // Runs along the bottom edge: its endpoints count, the overlap does not
        let clipped = [edge(DVec2::new(0.5, 0.0), DVec2::new(1.5, 0.0))];
        let candidates = generate_candidates(&clipped, &square(), false, 1e-9);

        assert_eq!(candidates.len(), 2);
        assert!(candidates.iter().all(|c| c.source == CandidateSource::VoronoiVertex));
    }
}
