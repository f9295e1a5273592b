//! Voronoi edges as the dual of the Delaunay triangulation
//!
//! Each Voronoi vertex is the circumcenter of a finite Delaunay triangle. An
//! interior Delaunay edge becomes the segment joining the circumcenters on
//! either side; a hull edge becomes a ray leaving the single finite
//! circumcenter along the edge's outward normal.
//!
//! A very thin triangle can have its circumcenter beyond the `f64` range.
//! Such a vertex is far outside any clipping box, so each edge touching it is
//! cut short there: a segment to it becomes a ray along the bisector, and a
//! ray from it becomes the whole bisector line or vanishes, depending on the
//! side the vertex lies on.

use glam::DVec2;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::{DelaunayTriangulation, VertexId, INFINITE};
use crate::error::{CircleError, Result};
use crate::geometry::primitives::finite_circumcenter;
use crate::geometry::{orient2d, Line, Parametric, Ray, Segment};

/// One edge of the unclipped Voronoi diagram
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum VoronoiEdge {
    Segment(Segment),
    Ray(Ray),
    /// Whole bisector of two sites; stands in for edges whose Voronoi
    /// vertices both lie beyond the `f64` range
    Line(Line),
}

impl Parametric for VoronoiEdge {
    fn parametric(&self) -> (DVec2, DVec2, f64, f64) {
        match self {
            VoronoiEdge::Segment(s) => s.parametric(),
            VoronoiEdge::Ray(r) => r.parametric(),
            VoronoiEdge::Line(l) => l.parametric(),
        }
    }

    fn point_at(&self, t: f64) -> DVec2 {
        match self {
            VoronoiEdge::Segment(s) => s.point_at(t),
            VoronoiEdge::Ray(r) => r.point_at(t),
            VoronoiEdge::Line(l) => l.point_at(t),
        }
    }
}

/// A Voronoi edge together with the two sites it separates
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DualEdge {
    /// Site indices at the ends of the dual Delaunay edge
    pub sites: [usize; 2],
    pub edge: VoronoiEdge,
}

#[derive(Debug, Clone, Copy)]
enum Center {
    Ghost,
    Finite(DVec2),
    /// Circumcenter not representable in `f64`
    Far,
}

impl DelaunayTriangulation {
    /// Voronoi edges dual to every Delaunay edge, each reported once
    ///
    /// Edges are emitted triangle by triangle in arena order, so the output
    /// is deterministic for a given mesh.
    ///
    /// # Errors
    ///
    /// Returns `DegenerateTriangle` if a finite triangle is collinear, which
    /// would mean the mesh invariants are broken.
    pub fn dual_edges(&self) -> Result<Vec<DualEdge>> {
        let mut centers = Vec::with_capacity(self.triangles.len());
        let mut far = 0;
        for tri in &self.triangles {
            if tri.is_ghost() {
                centers.push(Center::Ghost);
                continue;
            }
            let [a, b, c] = tri.vertices.map(|v| self.position(v));
            match finite_circumcenter(a, b, c) {
                Some(center) => centers.push(Center::Finite(center)),
                None if orient2d(a, b, c).is_collinear() => {
                    tracing::error!(?a, ?b, ?c, "collinear finite triangle in mesh");
                    return Err(CircleError::DegenerateTriangle { a, b, c });
                }
                None => {
                    far += 1;
                    centers.push(Center::Far);
                }
            }
        }

        let mut edges = Vec::with_capacity(3 * self.vertex_count());
        for (t, tri) in self.triangles.iter().enumerate() {
            if matches!(centers[t], Center::Ghost) {
                continue;
            }
            for i in 0..3 {
                let x = tri.vertices[(i + 1) % 3];
                let y = tri.vertices[(i + 2) % 3];
                let z = tri.vertices[i];
                let n = tri.neighbors[i];
                if !matches!(centers[n], Center::Ghost) && n < t {
                    continue;
                }

                let along = self.position(y) - self.position(x);
                let outward = DVec2::new(along.y, -along.x);
                let midpoint = self.position(x) + 0.5 * along;
                // Direction from the edge toward each far circumcenter
                let t_inside = self.acute_at(x, y, z);
                let toward_t = if t_inside { -outward } else { outward };
                let toward_n = || {
                    let w = self.triangles[n]
                        .vertices
                        .into_iter()
                        .find(|&v| v != x && v != y)
                        .unwrap_or(INFINITE);
                    if self.acute_at(x, y, w) {
                        outward
                    } else {
                        -outward
                    }
                };

                let edge = match (centers[t], centers[n]) {
                    (Center::Finite(c), Center::Ghost) => Some(VoronoiEdge::Ray(Ray {
                        origin: c,
                        direction: outward,
                    })),
                    // The far vertex lies inside: the ray sweeps the whole box
                    (Center::Far, Center::Ghost) if t_inside => Some(VoronoiEdge::Line(Line {
                        point: midpoint,
                        direction: outward,
                    })),
                    (Center::Far, Center::Ghost) => None,
                    (Center::Finite(c), Center::Finite(d)) => {
                        Some(VoronoiEdge::Segment(Segment::new(c, d)))
                    }
                    (Center::Finite(c), Center::Far) => Some(VoronoiEdge::Ray(Ray {
                        origin: c,
                        direction: toward_n(),
                    })),
                    (Center::Far, Center::Finite(d)) => Some(VoronoiEdge::Ray(Ray {
                        origin: d,
                        direction: toward_t,
                    })),
                    (Center::Far, Center::Far) if toward_t != toward_n() => {
                        Some(VoronoiEdge::Line(Line {
                            point: midpoint,
                            direction: outward,
                        }))
                    }
                    (Center::Far, Center::Far) => None,
                    (Center::Ghost, _) => None,
                };

                if let Some(edge) = edge {
                    let sites = [self.vertices[x].site, self.vertices[y].site];
                    edges.push(DualEdge { sites, edge });
                }
            }
        }

        if far > 0 {
            tracing::debug!(triangles = far, "circumcenters beyond f64 range cut at the bisector");
        }
        tracing::debug!(edges = edges.len(), "voronoi edges extracted");
        Ok(edges)
    }

    /// True if the angle at `apex` in the triangle `(x, y, apex)` is acute,
    /// i.e. its circumcenter lies on the apex side of `x -> y`
    fn acute_at(&self, x: VertexId, y: VertexId, apex: VertexId) -> bool {
        let p = self.position(apex);
        let u = self.position(x) - p;
        let v = self.position(y) - p;
        let scale = u.abs().max_element().max(v.abs().max_element());
        (u / scale).dot(v / scale) > 0.0
    }
}
