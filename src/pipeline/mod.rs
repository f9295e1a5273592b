//! Largest-empty-circle pipeline
//!
//! Sites are triangulated, the dual Voronoi diagram is clipped to a box around
//! the problem, candidate centers are collected inside the boundary, and the
//! candidate farthest from its nearest site wins.

pub mod candidates;
pub mod clip;
pub mod hull;
pub mod solver;

pub use candidates::{generate_candidates, Candidate, CandidateSource};
pub use clip::{clip_voronoi, clipping_box, ClippedEdge};
pub use hull::ConvexPolygon;
pub use solver::{farthest_candidate, BruteForceSites, NearestSite};

use std::time::Instant;

use glam::DVec2;

use crate::circle::Circle;
use crate::config::{NearestSiteStrategy, SolverConfig};
use crate::error::{CircleError, Result};
use crate::geometry::primitives::unit_scale;
use crate::geometry::{BoundingBox, Line, Ray, Segment};
use crate::triangulation::{DelaunayTriangulation, DualEdge, VoronoiEdge};

/// A solved largest-empty-circle problem, with every intermediate stage kept for inspection
///
/// # Example
///
/// ```rust
/// use largest_empty_circle::*;
///
/// let sites = vec![
///     DVec2::new(0.0, 0.0),
///     DVec2::new(1.0, 0.0),
///     DVec2::new(1.0, 1.0),
///     DVec2::new(0.0, 1.0),
/// ];
///
/// let solved = LargestEmptyCircle::compute(&sites, &SolverConfig::default()).unwrap();
/// let circle = solved.circle();
///
/// assert!((circle.center - DVec2::new(0.5, 0.5)).length() < 1e-12);
/// assert!((circle.radius - 0.5f64.sqrt()).abs() < 1e-12);
/// ```
#[derive(Debug, Clone)]
pub struct LargestEmptyCircle {
    circle: Circle,
    triangulation: DelaunayTriangulation,
    boundary: ConvexPolygon,
    bounding_box: BoundingBox,
    voronoi_edges: Vec<ClippedEdge>,
    candidates: Vec<Candidate>,
    best_candidate: usize,
    center_site: usize,
}

impl LargestEmptyCircle {
    /// Solve with the convex hull of the sites as the boundary
    ///
    /// # Errors
    ///
    /// - `NonFiniteSite` if any coordinate is NaN or infinite
    /// - `DegenerateInput` for fewer than 3 distinct sites or collinear sites
    pub fn compute(sites: &[DVec2], config: &SolverConfig) -> Result<Self> {
        let started = Instant::now();
        let triangulation = DelaunayTriangulation::with_seed(sites, config.walk_seed)?;
        let boundary = ConvexPolygon::hull_of(sites)?;
        tracing::debug!(
            elapsed = ?started.elapsed(),
            hull_vertices = boundary.vertices().len(),
            "triangulation and hull done"
        );
        Self::solve(triangulation, boundary, false, config)
    }

    /// Solve with a caller-supplied convex boundary
    ///
    /// The boundary corners join the candidate set. Sites outside the
    /// boundary still count as obstacles.
    ///
    /// # Errors
    ///
    /// Same as [`LargestEmptyCircle::compute`].
    pub fn compute_within(
        sites: &[DVec2],
        boundary: &ConvexPolygon,
        config: &SolverConfig,
    ) -> Result<Self> {
        let started = Instant::now();
        let triangulation = DelaunayTriangulation::with_seed(sites, config.walk_seed)?;
        tracing::debug!(elapsed = ?started.elapsed(), "triangulation done");
        Self::solve(triangulation, boundary.clone(), true, config)
    }

    fn solve(
        triangulation: DelaunayTriangulation,
        boundary: ConvexPolygon,
        include_corners: bool,
        config: &SolverConfig,
    ) -> Result<Self> {
        let started = Instant::now();
        let sites = triangulation.sites();
        let frame = Frame::fitting(sites.iter().chain(boundary.vertices()));

        // Everything below runs in the rescaled frame
        let local_boundary = boundary.scaled(frame.scale);
        let local_sites: Vec<DVec2> = sites.iter().map(|&p| frame.to_local(p)).collect();

        let extent_points = || local_sites.iter().chain(local_boundary.vertices());
        let extent = BoundingBox::from_points(extent_points())
            .ok_or_else(|| CircleError::DegenerateInput("no sites".into()))?;
        let tolerance = config.merge_tolerance * extent.diagonal();
        let local_box = clipping_box(extent_points(), config.box_margin)
            .ok_or_else(|| CircleError::DegenerateInput("no sites".into()))?;

        let dual: Vec<DualEdge> = triangulation
            .dual_edges()?
            .into_iter()
            .map(|dual| DualEdge {
                sites: dual.sites,
                edge: frame.edge_to_local(dual.edge),
            })
            .collect();
        let local_edges = clip_voronoi(&dual, &local_box);
        tracing::debug!(
            dual_edges = dual.len(),
            clipped_edges = local_edges.len(),
            scale = frame.scale,
            "voronoi diagram clipped"
        );

        let local_candidates =
            generate_candidates(&local_edges, &local_boundary, include_corners, tolerance);

        let (local_circle, best_candidate) = match config.nearest_site {
            NearestSiteStrategy::Walk => {
                let index = LocalMesh { mesh: &triangulation, frame };
                farthest_candidate(&local_candidates, &index, config.parallel)?
            }
            NearestSiteStrategy::BruteForce => farthest_candidate(
                &local_candidates,
                &BruteForceSites::new(&local_sites),
                config.parallel,
            )?,
            #[cfg(feature = "spatial-index")]
            NearestSiteStrategy::KdTree => {
                let index = crate::spatial::SiteIndex::new(&local_sites);
                farthest_candidate(&local_candidates, &index, config.parallel)?
            }
        };

        let circle = Circle::new(
            frame.to_world(local_circle.center),
            local_circle.radius / frame.scale,
        );
        let center_site = triangulation.nearest_site(circle.center);
        let bounding_box = BoundingBox::new(frame.to_world(local_box.min), frame.to_world(local_box.max));
        let voronoi_edges = local_edges
            .into_iter()
            .map(|edge| ClippedEdge {
                sites: edge.sites,
                segment: Segment::new(frame.to_world(edge.segment.a), frame.to_world(edge.segment.b)),
            })
            .collect();
        let candidates: Vec<Candidate> = local_candidates
            .into_iter()
            .map(|candidate| Candidate {
                point: frame.to_world(candidate.point),
                source: candidate.source,
            })
            .collect();

        tracing::debug!(
            elapsed = ?started.elapsed(),
            candidates = candidates.len(),
            strategy = config.nearest_site.name(),
            radius = circle.radius,
            "largest empty circle found"
        );

        Ok(Self {
            circle,
            triangulation,
            boundary,
            bounding_box,
            voronoi_edges,
            candidates,
            best_candidate,
            center_site,
        })
    }

    /// The largest empty circle
    pub fn circle(&self) -> Circle {
        self.circle
    }

    pub fn triangulation(&self) -> &DelaunayTriangulation {
        &self.triangulation
    }

    pub fn sites(&self) -> &[DVec2] {
        self.triangulation.sites()
    }

    /// Region the center was constrained to
    pub fn boundary(&self) -> &ConvexPolygon {
        &self.boundary
    }

    pub fn boundary_edges(&self) -> Vec<Segment> {
        self.boundary.edges()
    }

    /// Box the Voronoi diagram was clipped to
    pub fn bounding_box(&self) -> BoundingBox {
        self.bounding_box
    }

    /// Voronoi edges clipped to [`Self::bounding_box`]
    pub fn voronoi_edges(&self) -> &[ClippedEdge] {
        &self.voronoi_edges
    }

    /// Every candidate center, in generation order
    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    /// Index into [`Self::candidates`] of the winning center
    pub fn best_candidate(&self) -> usize {
        self.best_candidate
    }

    /// A site on the rim of the circle (nearest to its center)
    pub fn center_site(&self) -> usize {
        self.center_site
    }
}

/// Power-of-two rescaling that brings the problem near unit size
///
/// Multiplying by a power of two is exact outside the subnormal range, so the
/// rescaled problem has the same answer while squared distances stay far from
/// overflow.
#[derive(Debug, Clone, Copy)]
struct Frame {
    scale: f64,
}

impl Frame {
    fn fitting<'a>(points: impl Iterator<Item = &'a DVec2>) -> Self {
        let largest = points.fold(0.0, |m: f64, p| m.max(p.abs().max_element()));
        Self {
            scale: unit_scale(largest),
        }
    }

    #[inline]
    fn to_local(self, p: DVec2) -> DVec2 {
        p * self.scale
    }

    #[inline]
    fn to_world(self, p: DVec2) -> DVec2 {
        p / self.scale
    }

    fn edge_to_local(self, edge: VoronoiEdge) -> VoronoiEdge {
        match edge {
            VoronoiEdge::Segment(s) => {
                VoronoiEdge::Segment(Segment::new(self.to_local(s.a), self.to_local(s.b)))
            }
            VoronoiEdge::Ray(r) => VoronoiEdge::Ray(Ray {
                origin: self.to_local(r.origin),
                direction: self.to_local(r.direction),
            }),
            VoronoiEdge::Line(l) => VoronoiEdge::Line(Line {
                point: self.to_local(l.point),
                direction: self.to_local(l.direction),
            }),
        }
    }
}

/// Triangulation walk answering queries posed in a rescaled frame
struct LocalMesh<'a> {
    mesh: &'a DelaunayTriangulation,
    frame: Frame,
}

impl NearestSite for LocalMesh<'_> {
    fn nearest_site(&self, point: DVec2) -> usize {
        self.mesh.nearest_site(self.frame.to_world(point))
    }

    fn site(&self, index: usize) -> DVec2 {
        self.frame.to_local(self.mesh.site(index))
    }
}

/// Largest empty circle of `sites` within their convex hull, with default settings
///
/// # Example
///
/// ```rust
/// use largest_empty_circle::*;
///
/// let sites = random_sites(100, 42);
/// let circle = largest_empty_circle(&sites).unwrap();
///
/// assert!(sites.iter().all(|s| s.distance(circle.center) >= circle.radius - 1e-12));
/// ```
pub fn largest_empty_circle(sites: &[DVec2]) -> Result<Circle> {
    LargestEmptyCircle::compute(sites, &SolverConfig::default()).map(|solved| solved.circle())
}
