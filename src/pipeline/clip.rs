//! Clipping the unbounded Voronoi diagram to a finite box

use glam::DVec2;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::geometry::{clip_to_box, BoundingBox, Intersection, Segment};
use crate::triangulation::DualEdge;

/// The part of a Voronoi edge that lies inside the clipping box
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClippedEdge {
    /// The two sites this edge separates
    pub sites: [usize; 2],
    pub segment: Segment,
}

/// Box used for clipping: everything in `points` grown by `margin` times the diagonal
///
/// Returns `None` for an empty point set.
pub fn clipping_box<'a, I>(points: I, margin: f64) -> Option<BoundingBox>
where
    I: IntoIterator<Item = &'a DVec2>,
{
    BoundingBox::enclosing(points, margin)
}

/// Clip every Voronoi edge against `bbox`, keeping input order
///
/// Edges that miss the box, or touch it in a single point, are dropped.
pub fn clip_voronoi(edges: &[DualEdge], bbox: &BoundingBox) -> Vec<ClippedEdge> {
    edges
        .iter()
        .filter_map(|dual| match clip_to_box(&dual.edge, bbox) {
            Intersection::Segment(segment) => Some(ClippedEdge {
                sites: dual.sites,
                segment,
            }),
            _ => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Ray;
    use crate::triangulation::{DelaunayTriangulation, VoronoiEdge};

    #[test]
    fn test_rays_end_on_box() {
        let sites = [DVec2::new(0.0, 0.0), DVec2::new(4.0, 0.0), DVec2::new(2.0, 3.0)];
        let mesh = DelaunayTriangulation::new(&sites).unwrap();
        let bbox = clipping_box(&sites, 1.0).unwrap();

        let clipped = clip_voronoi(&mesh.dual_edges().unwrap(), &bbox);
        assert_eq!(clipped.len(), 3);

        for edge in &clipped {
            assert!(bbox.contains_strictly(edge.segment.a));
            let end = edge.segment.b;
            let on_side = (end.x - bbox.min.x).abs() < 1e-9
                || (end.x - bbox.max.x).abs() < 1e-9
                || (end.y - bbox.min.y).abs() < 1e-9
                || (end.y - bbox.max.y).abs() < 1e-9;
            assert!(on_side, "ray end {:?} not on the box", end);
        }
    }

    #[test]
    fn test_edges_outside_box_are_dropped() {
        let bbox = BoundingBox::new(DVec2::ZERO, DVec2::ONE);
        let edges = [
            DualEdge {
                sites: [0, 1],
                edge: VoronoiEdge::Ray(Ray {
                    origin: DVec2::new(2.0, 2.0),
                    direction: DVec2::ONE,
                }),
            },
            DualEdge {
                sites: [1, 2],
                edge: VoronoiEdge::Segment(Segment::new(DVec2::splat(0.25), DVec2::splat(0.75))),
            },
            // Touches the corner only
            DualEdge {
                sites: [2, 3],
                edge: VoronoiEdge::Segment(Segment::new(DVec2::new(1.0, 1.0), DVec2::new(2.0, 0.0))),
            },
        ];

        let clipped = clip_voronoi(&edges, &bbox);
        assert_eq!(clipped.len(), 1);
        assert_eq!(clipped[0].sites, [1, 2]);
        assert_eq!(clipped[0].segment, Segment::new(DVec2::splat(0.25), DVec2::splat(0.75)));
    }
}
