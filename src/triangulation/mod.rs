//! Incremental Delaunay triangulation
//!
//! Triangles and vertices live in flat arenas addressed by index. Vertex `0`
//! is a symbolic vertex at infinity: every convex-hull edge is closed off by
//! a *ghost* triangle that contains it, so every triangle has exactly three
//! neighbours and point location never falls off the mesh.
//!
//! Sites are inserted one at a time: a stochastic visibility walk finds the
//! face, edge or vertex under the new site, the face or edge is split, and
//! Lawson flips restore the Delaunay property. All decisions use the exact
//! predicates from [`crate::geometry`].

mod dual;

pub use dual::{DualEdge, VoronoiEdge};

use glam::DVec2;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::error::{CircleError, Result};
use crate::geometry::primitives::{beyond, strictly_between, unit_scale};
use crate::geometry::{in_circle, orient2d, CirclePosition, Orientation};

/// Seed used for the point-location walk unless one is supplied
pub const DEFAULT_WALK_SEED: u64 = 0x5EED;

pub(crate) type VertexId = usize;
pub(crate) type TriangleId = usize;

/// The symbolic vertex at infinity
const INFINITE: VertexId = 0;

const UNASSIGNED: VertexId = usize::MAX;

#[derive(Debug, Clone)]
struct Vertex {
    position: DVec2,
    /// First input site that landed on this vertex
    site: usize,
    /// Any triangle incident to this vertex
    triangle: TriangleId,
}

/// Vertices are counter-clockwise; `neighbors[i]` is across the edge opposite `vertices[i]`
#[derive(Debug, Clone)]
struct Triangle {
    vertices: [VertexId; 3],
    neighbors: [TriangleId; 3],
}

impl Triangle {
    #[inline]
    fn infinite_index(&self) -> Option<usize> {
        self.vertices.iter().position(|&v| v == INFINITE)
    }

    #[inline]
    fn is_ghost(&self) -> bool {
        self.infinite_index().is_some()
    }

    #[inline]
    fn index_of(&self, vertex: VertexId) -> Option<usize> {
        self.vertices.iter().position(|&v| v == vertex)
    }

    #[inline]
    fn index_of_neighbor(&self, triangle: TriangleId) -> Option<usize> {
        self.neighbors.iter().position(|&n| n == triangle)
    }

    fn replace_neighbor(&mut self, old: TriangleId, new: TriangleId) {
        if let Some(k) = self.index_of_neighbor(old) {
            self.neighbors[k] = new;
        }
    }
}

/// Where a query point sits in the current mesh
#[derive(Debug, Clone, Copy, PartialEq)]
enum Location {
    /// Strictly inside a finite triangle, or strictly outside the hull edge of a ghost
    Face(TriangleId),
    /// In the relative interior of the edge opposite vertex `i` of the triangle
    Edge(TriangleId, usize),
    /// Coincides with an existing vertex
    Vertex(VertexId),
}

enum Step {
    Found(Location),
    Move(TriangleId),
}

/// Delaunay triangulation of a planar site set
///
/// # Example
///
/// ```rust
/// use largest_empty_circle::triangulation::DelaunayTriangulation;
/// use glam::DVec2;
///
/// let sites = [
///     DVec2::new(0.0, 0.0),
///     DVec2::new(1.0, 0.0),
///     DVec2::new(0.0, 1.0),
///     DVec2::new(1.0, 1.0),
/// ];
/// let mesh = DelaunayTriangulation::new(&sites).unwrap();
///
/// assert_eq!(mesh.triangles().len(), 2);
/// assert!(mesh.is_delaunay());
/// assert_eq!(mesh.nearest_site(DVec2::new(0.9, 0.8)), 3);
/// ```
#[derive(Debug, Clone)]
pub struct DelaunayTriangulation {
    vertices: Vec<Vertex>,
    triangles: Vec<Triangle>,
    sites: Vec<DVec2>,
    site_vertex: Vec<VertexId>,
    last: TriangleId,
    rng: ChaCha8Rng,
    /// Largest absolute coordinate inserted so far
    largest: f64,
}

impl DelaunayTriangulation {
    /// Triangulate `sites` using the default walk seed
    ///
    /// # Errors
    ///
    /// - `NonFiniteSite` if any coordinate is NaN or infinite
    /// - `DegenerateInput` if there are fewer than 3 distinct sites or all
    ///   sites are collinear
    pub fn new(sites: &[DVec2]) -> Result<Self> {
        Self::with_seed(sites, DEFAULT_WALK_SEED)
    }

    /// Triangulate `sites`, seeding the point-location walk with `seed`
    ///
    /// The first non-collinear triple seeds the mesh; every other site is then
    /// inserted in input order.
    pub fn with_seed(sites: &[DVec2], seed: u64) -> Result<Self> {
        if let Some(index) = sites.iter().position(|p| !p.is_finite()) {
            return Err(CircleError::NonFiniteSite(index));
        }

        let (ia, ib, ic) = initial_triple(sites)?;
        let (ib, ic) = if orient2d(sites[ia], sites[ib], sites[ic]).is_left() {
            (ib, ic)
        } else {
            (ic, ib)
        };

        let mut mesh = Self::seed_mesh(sites, [ia, ib, ic], seed);
        for site in 0..sites.len() {
            if site != ia && site != ib && site != ic {
                mesh.insert_site(site);
            }
        }

        tracing::debug!(
            sites = sites.len(),
            vertices = mesh.vertex_count(),
            triangles = mesh.triangles.len(),
            "triangulation built"
        );
        Ok(mesh)
    }

    /// One CCW triangle and its three ghosts
    fn seed_mesh(sites: &[DVec2], seed_sites: [usize; 3], seed: u64) -> Self {
        let mut vertices = Vec::with_capacity(sites.len() + 1);
        vertices.push(Vertex {
            position: DVec2::ZERO,
            site: UNASSIGNED,
            triangle: 1,
        });
        for site in seed_sites {
            vertices.push(Vertex {
                position: sites[site],
                site,
                triangle: 0,
            });
        }

        let mut triangles = Vec::with_capacity(2 * sites.len() + 2);
        triangles.push(Triangle { vertices: [1, 2, 3], neighbors: [2, 3, 1] });
        triangles.push(Triangle { vertices: [2, 1, INFINITE], neighbors: [3, 2, 0] });
        triangles.push(Triangle { vertices: [3, 2, INFINITE], neighbors: [1, 3, 0] });
        triangles.push(Triangle { vertices: [1, 3, INFINITE], neighbors: [2, 1, 0] });

        let mut site_vertex = vec![UNASSIGNED; sites.len()];
        for (k, &site) in seed_sites.iter().enumerate() {
            site_vertex[site] = k + 1;
        }

        Self {
            vertices,
            triangles,
            sites: sites.to_vec(),
            site_vertex,
            last: 0,
            rng: ChaCha8Rng::seed_from_u64(seed),
            largest: sites.iter().fold(0.0, |m, p| m.max(p.abs().max_element())),
        }
    }

    /// Insert one more site, returning its index
    ///
    /// A site that coincides with an existing one is recorded but adds no
    /// topology; it resolves to the vertex of the earlier copy.
    ///
    /// # Errors
    ///
    /// Returns `NonFiniteSite` if the coordinates are not finite.
    pub fn insert(&mut self, site: DVec2) -> Result<usize> {
        let index = self.sites.len();
        if !site.is_finite() {
            return Err(CircleError::NonFiniteSite(index));
        }
        self.sites.push(site);
        self.site_vertex.push(UNASSIGNED);
        self.largest = self.largest.max(site.abs().max_element());
        self.insert_site(index);
        Ok(index)
    }

    fn insert_site(&mut self, site: usize) {
        let p = self.sites[site];
        let vertex = match self.locate(p) {
            Location::Vertex(existing) => {
                self.site_vertex[site] = existing;
                return;
            }
            Location::Face(t) => {
                let v = self.push_vertex(p, site);
                let created = self.split_face(t, v);
                self.legalize(&created, p);
                v
            }
            Location::Edge(t, i) => {
                let v = self.push_vertex(p, site);
                let created = self.split_edge(t, i, v);
                self.legalize(&created, p);
                v
            }
        };
        self.site_vertex[site] = vertex;
        self.last = self.vertices[vertex].triangle;
    }

    fn push_vertex(&mut self, position: DVec2, site: usize) -> VertexId {
        self.vertices.push(Vertex {
            position,
            site,
            triangle: 0,
        });
        self.vertices.len() - 1
    }

    #[inline]
    fn position(&self, v: VertexId) -> DVec2 {
        self.vertices[v].position
    }

    // ------------------------------------------------------------------
    // Point location
    // ------------------------------------------------------------------

    fn locate(&mut self, p: DVec2) -> Location {
        let cap = 4 * self.triangles.len() + 16;
        let mut current = if self.last < self.triangles.len() { self.last } else { 0 };

        for _ in 0..cap {
            let start = self.rng.gen_range(0..3);
            match self.classify(current, p, start) {
                Step::Found(location) => return location,
                Step::Move(next) => current = next,
            }
        }

        tracing::warn!(
            x = p.x,
            y = p.y,
            steps = cap,
            "visibility walk did not terminate, scanning all triangles"
        );
        self.locate_exhaustive(p)
    }

    fn locate_exhaustive(&self, p: DVec2) -> Location {
        for t in 0..self.triangles.len() {
            if let Step::Found(location) = self.classify(t, p, 0) {
                return location;
            }
        }
        // A valid mesh covers the plane, so some triangle always accepts p
        unreachable!("point ({}, {}) not covered by the triangulation", p.x, p.y)
    }

    /// Decide whether `p` is in triangle `t`, or which neighbour to visit next
    ///
    /// `start` rotates the order in which the edges are tested.
    fn classify(&self, t: TriangleId, p: DVec2, start: usize) -> Step {
        let tri = &self.triangles[t];

        if let Some(k) = tri.infinite_index() {
            let u = tri.vertices[(k + 1) % 3];
            let w = tri.vertices[(k + 2) % 3];
            let (pu, pw) = (self.position(u), self.position(w));
            return match orient2d(pu, pw, p) {
                Orientation::Left => Step::Found(Location::Face(t)),
                Orientation::Right => Step::Move(tri.neighbors[k]),
                Orientation::Collinear => {
                    if p == pu {
                        Step::Found(Location::Vertex(u))
                    } else if p == pw {
                        Step::Found(Location::Vertex(w))
                    } else if strictly_between(pu, pw, p) {
                        Step::Found(Location::Edge(t, k))
                    } else if beyond(pu, pw, p) {
                        Step::Move(tri.neighbors[(k + 1) % 3])
                    } else {
                        Step::Move(tri.neighbors[(k + 2) % 3])
                    }
                }
            };
        }

        let mut on_edge = None;
        for offset in 0..3 {
            let i = (start + offset) % 3;
            let a = self.position(tri.vertices[(i + 1) % 3]);
            let b = self.position(tri.vertices[(i + 2) % 3]);
            match orient2d(a, b, p) {
                Orientation::Right => return Step::Move(tri.neighbors[i]),
                Orientation::Collinear => on_edge = Some(i),
                Orientation::Left => {}
            }
        }

        if let Some(&v) = tri.vertices.iter().find(|&&v| self.position(v) == p) {
            return Step::Found(Location::Vertex(v));
        }
        match on_edge {
            Some(i) => Step::Found(Location::Edge(t, i)),
            None => Step::Found(Location::Face(t)),
        }
    }

    // ------------------------------------------------------------------
    // Topology updates
    // ------------------------------------------------------------------

    /// Split triangle `t` into three around the new vertex `p`
    ///
    /// Works for ghosts as well: one of the three pieces becomes finite.
    fn split_face(&mut self, t: TriangleId, p: VertexId) -> [TriangleId; 3] {
        let Triangle { vertices: [a, b, c], neighbors: [n0, n1, n2] } = self.triangles[t].clone();

        let t0 = t;
        let t1 = self.triangles.len();
        let t2 = t1 + 1;

        self.triangles[t0] = Triangle { vertices: [p, a, b], neighbors: [n2, t1, t2] };
        self.triangles.push(Triangle { vertices: [p, b, c], neighbors: [n0, t2, t0] });
        self.triangles.push(Triangle { vertices: [p, c, a], neighbors: [n1, t0, t1] });

        self.triangles[n0].replace_neighbor(t, t1);
        self.triangles[n1].replace_neighbor(t, t2);

        self.vertices[a].triangle = t0;
        self.vertices[b].triangle = t0;
        self.vertices[c].triangle = t1;
        self.vertices[p].triangle = t0;

        [t0, t1, t2]
    }

    /// Split the edge opposite vertex `i` of `t1`, and the triangle across it, around `p`
    fn split_edge(&mut self, t1: TriangleId, i: usize, p: VertexId) -> [TriangleId; 4] {
        let first = self.triangles[t1].clone();
        let c = first.vertices[i];
        let a = first.vertices[(i + 1) % 3];
        let b = first.vertices[(i + 2) % 3];
        let n_bc = first.neighbors[(i + 1) % 3];
        let n_ca = first.neighbors[(i + 2) % 3];

        let t2 = first.neighbors[i];
        let second = self.triangles[t2].clone();
        let j = second
            .index_of_neighbor(t1)
            .unwrap_or_else(|| unreachable!("asymmetric adjacency between {} and {}", t1, t2));
        let d = second.vertices[j];
        let n_ad = second.neighbors[(j + 1) % 3];
        let n_db = second.neighbors[(j + 2) % 3];

        let ta = t1;
        let tc = t2;
        let tb = self.triangles.len();
        let td = tb + 1;

        self.triangles[ta] = Triangle { vertices: [p, c, a], neighbors: [n_ca, td, tb] };
        self.triangles[tc] = Triangle { vertices: [p, d, b], neighbors: [n_db, tb, td] };
        self.triangles.push(Triangle { vertices: [p, b, c], neighbors: [n_bc, ta, tc] });
        self.triangles.push(Triangle { vertices: [p, a, d], neighbors: [n_ad, tc, ta] });

        self.triangles[n_bc].replace_neighbor(t1, tb);
        self.triangles[n_ad].replace_neighbor(t2, td);

        self.vertices[a].triangle = ta;
        self.vertices[c].triangle = ta;
        self.vertices[b].triangle = tb;
        self.vertices[d].triangle = tc;
        self.vertices[p].triangle = ta;

        [ta, tb, tc, td]
    }

    /// Does `p` conflict with triangle `t`?
    ///
    /// Finite triangles conflict when `p` is strictly inside the circumcircle;
    /// ghosts when `p` is strictly outside their hull edge.
    fn conflicts(&self, t: TriangleId, p: DVec2) -> bool {
        let tri = &self.triangles[t];
        match tri.infinite_index() {
            Some(k) => {
                let u = self.position(tri.vertices[(k + 1) % 3]);
                let w = self.position(tri.vertices[(k + 2) % 3]);
                orient2d(u, w, p).is_left()
            }
            None => {
                let [a, b, c] = tri.vertices.map(|v| self.position(v));
                in_circle(a, b, c, p) == CirclePosition::Inside
            }
        }
    }

    /// Flip edges until every triangle around `p` is locally Delaunay
    ///
    /// Every triangle on the stack has the new vertex at index 0, so the edge
    /// to test is always the one opposite index 0.
    fn legalize(&mut self, created: &[TriangleId], p: DVec2) {
        let mut stack: Vec<TriangleId> = created.to_vec();
        while let Some(t) = stack.pop() {
            let n = self.triangles[t].neighbors[0];
            if self.conflicts(n, p) {
                self.flip(t, n);
                stack.push(t);
                stack.push(n);
            }
        }
    }

    /// Flip the edge shared by `t = (p, x, y)` and its neighbour `n` across `x-y`
    fn flip(&mut self, t: TriangleId, n: TriangleId) {
        let Triangle { vertices: [p, x, y], neighbors: [_, t_yp, t_px] } = self.triangles[t].clone();
        let other = self.triangles[n].clone();
        let j = other
            .index_of_neighbor(t)
            .unwrap_or_else(|| unreachable!("asymmetric adjacency between {} and {}", t, n));
        let d = other.vertices[j];
        let n_xd = other.neighbors[(j + 1) % 3];
        let n_dy = other.neighbors[(j + 2) % 3];

        self.triangles[t] = Triangle { vertices: [p, x, d], neighbors: [n_xd, n, t_px] };
        self.triangles[n] = Triangle { vertices: [p, d, y], neighbors: [n_dy, t_yp, t] };

        self.triangles[n_xd].replace_neighbor(n, t);
        self.triangles[t_yp].replace_neighbor(t, n);

        self.vertices[p].triangle = t;
        self.vertices[x].triangle = t;
        self.vertices[d].triangle = t;
        self.vertices[y].triangle = n;
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    /// Vertices adjacent to `v`, in counter-clockwise order (may include the infinite vertex)
    fn vertex_ring(&self, v: VertexId) -> impl Iterator<Item = VertexId> + '_ {
        let start = self.vertices[v].triangle;
        let mut current = Some(start);
        let mut steps = 0;
        std::iter::from_fn(move || {
            let tri = &self.triangles[current?];
            let k = tri.index_of(v)?;
            let next = tri.neighbors[(k + 1) % 3];
            steps += 1;
            current = (next != start && steps <= self.triangles.len()).then_some(next);
            Some(tri.vertices[(k + 1) % 3])
        })
    }

    fn nearest_vertex(&self, p: DVec2) -> VertexId {
        // Compared in a power-of-two rescaled frame so squares cannot overflow
        let unit = unit_scale(self.largest.max(p.abs().max_element()));
        let distance = |v: VertexId| ((self.position(v) - p) * unit).length_squared();

        let finite = self.vertices.len() - 1;
        let samples = ((finite as f64).cbrt().ceil() as usize).max(1);
        let stride = (finite / samples).max(1);

        let mut best = 1;
        let mut best_distance = distance(1);
        for v in (1..=finite).step_by(stride) {
            let d = distance(v);
            if d < best_distance {
                best = v;
                best_distance = d;
            }
        }

        // Greedy descent: a vertex that is not the nearest always has a
        // strictly closer Delaunay neighbour
        loop {
            let mut improved = false;
            for w in self.vertex_ring(best) {
                if w == INFINITE {
                    continue;
                }
                let d = distance(w);
                if d < best_distance {
                    best = w;
                    best_distance = d;
                    improved = true;
                }
            }
            if !improved {
                return best;
            }
        }
    }

    /// Index of a site closest to `point`
    ///
    /// Jump-and-walk: start from the best of ⌈n^(1/3)⌉ sampled vertices, then
    /// move to strictly closer Delaunay neighbours. Valid for any point in the
    /// plane, inside or outside the hull. Coincident sites resolve to the
    /// earliest copy.
    pub fn nearest_site(&self, point: DVec2) -> usize {
        self.vertices[self.nearest_vertex(point)].site
    }

    /// All input sites, in input order
    pub fn sites(&self) -> &[DVec2] {
        &self.sites
    }

    /// Position of site `index`
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    pub fn site(&self, index: usize) -> DVec2 {
        self.sites[index]
    }

    /// Number of distinct (finite) vertices in the mesh
    pub fn vertex_count(&self) -> usize {
        self.vertices.len() - 1
    }

    /// Finite triangles as counter-clockwise site-index triples
    pub fn triangles(&self) -> Vec<[usize; 3]> {
        self.triangles
            .iter()
            .filter(|t| !t.is_ghost())
            .map(|t| t.vertices.map(|v| self.vertices[v].site))
            .collect()
    }

    /// Number of convex-hull edges (one ghost triangle each)
    pub fn hull_edge_count(&self) -> usize {
        self.triangles.iter().filter(|t| t.is_ghost()).count()
    }

    /// True when no vertex lies strictly inside the circumcircle of a neighbouring finite triangle
    ///
    /// The local test implies the global empty-circle property.
    pub fn is_delaunay(&self) -> bool {
        for (t, tri) in self.triangles.iter().enumerate() {
            if tri.is_ghost() {
                continue;
            }
            let [a, b, c] = tri.vertices.map(|v| self.position(v));
            for &n in &tri.neighbors {
                let other = &self.triangles[n];
                if other.is_ghost() {
                    continue;
                }
                let Some(j) = other.index_of_neighbor(t) else {
                    return false;
                };
                let d = self.position(other.vertices[j]);
                if in_circle(a, b, c, d) == CirclePosition::Inside {
                    return false;
                }
            }
        }
        true
    }

    /// Structural self-check
    ///
    /// Verifies that adjacency is symmetric and shares the right edge, finite
    /// triangles are strictly counter-clockwise, vertex back-pointers are
    /// correct, and the triangle count matches Euler's formula.
    pub fn is_valid(&self) -> bool {
        for (t, tri) in self.triangles.iter().enumerate() {
            for i in 0..3 {
                let n = tri.neighbors[i];
                let Some(other) = self.triangles.get(n) else {
                    return false;
                };
                let Some(j) = other.index_of_neighbor(t) else {
                    return false;
                };
                // Shared edge appears reversed in the neighbour
                let x = tri.vertices[(i + 1) % 3];
                let y = tri.vertices[(i + 2) % 3];
                if other.vertices[(j + 1) % 3] != y || other.vertices[(j + 2) % 3] != x {
                    return false;
                }
            }
            if !tri.is_ghost() {
                let [a, b, c] = tri.vertices.map(|v| self.position(v));
                if !orient2d(a, b, c).is_left() {
                    return false;
                }
            }
        }

        for (v, vertex) in self.vertices.iter().enumerate() {
            match self.triangles.get(vertex.triangle) {
                Some(tri) if tri.index_of(v).is_some() => {}
                _ => return false,
            }
        }

        let hull = self.hull_edge_count();
        let finite = self.triangles.len() - hull;
        finite + hull + 2 == 2 * self.vertex_count()
            && self.site_vertex.iter().all(|&v| v != UNASSIGNED && v < self.vertices.len())
    }
}

/// Indices of the first three sites that span a proper triangle
fn initial_triple(sites: &[DVec2]) -> Result<(usize, usize, usize)> {
    if sites.len() < 3 {
        return Err(CircleError::DegenerateInput(format!(
            "at least 3 sites are required (got {})",
            sites.len()
        )));
    }

    let a = sites[0];
    let ib = sites
        .iter()
        .position(|p| *p != a)
        .ok_or_else(|| CircleError::DegenerateInput("all sites coincide".into()))?;
    let b = sites[ib];
    let ic = sites
        .iter()
        .position(|p| !orient2d(a, b, *p).is_collinear())
        .ok_or_else(|| CircleError::DegenerateInput("all sites are collinear".into()))?;

    Ok((0, ib, ic))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    fn random_sites(count: usize, seed: u64) -> Vec<DVec2> {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        (0..count)
            .map(|_| DVec2::new(rng.gen_range(-1.0..1.0), rng.gen_range(-1.0..1.0)))
            .collect()
    }

    fn brute_force_distance(sites: &[DVec2], p: DVec2) -> f64 {
        sites
            .iter()
            .map(|s| s.distance_squared(p))
            .fold(f64::INFINITY, f64::min)
    }

    #[test]
    fn test_single_triangle() {
        let sites = [DVec2::new(0.0, 0.0), DVec2::new(0.0, 1.0), DVec2::new(1.0, 0.0)];
        let mesh = DelaunayTriangulation::new(&sites).unwrap();

        assert!(mesh.is_valid());
        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.hull_edge_count(), 3);

        let triangles = mesh.triangles();
        assert_eq!(triangles.len(), 1);
        let [a, b, c] = triangles[0].map(|i| sites[i]);
        assert!(orient2d(a, b, c).is_left());
    }

    #[test]
    fn test_random_sites_are_delaunay() {
        let sites = random_sites(400, 42);
        let mesh = DelaunayTriangulation::new(&sites).unwrap();

        assert!(mesh.is_valid());
        assert!(mesh.is_delaunay());
        assert_eq!(mesh.vertex_count(), 400);
        // Euler for a triangulated point set: 2n - h - 2 triangles
        assert_eq!(mesh.triangles().len(), 2 * 400 - mesh.hull_edge_count() - 2);
    }

    #[test]
    fn test_grid_with_cocircular_and_collinear_sites() {
        let mut sites = Vec::new();
        for i in 0..7 {
            for j in 0..7 {
                sites.push(DVec2::new(i as f64, j as f64));
            }
        }
        let mesh = DelaunayTriangulation::new(&sites).unwrap();

        assert!(mesh.is_valid());
        assert!(mesh.is_delaunay());
        assert_eq!(mesh.vertex_count(), 49);
        // Collinear hull points stay on the hull
        assert_eq!(mesh.hull_edge_count(), 24);
        assert_eq!(mesh.triangles().len(), 2 * 49 - 24 - 2);
    }

    #[test]
    fn test_duplicates_map_to_first_copy() {
        let sites = vec![
            DVec2::new(0.0, 0.0),
            DVec2::new(1.0, 0.0),
            DVec2::new(0.0, 0.0),
            DVec2::new(0.0, 1.0),
            DVec2::new(1.0, 0.0),
            DVec2::new(0.3, 0.3),
        ];
        let mesh = DelaunayTriangulation::new(&sites).unwrap();

        assert!(mesh.is_valid());
        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.sites().len(), 6);
        assert_eq!(mesh.nearest_site(DVec2::new(-0.1, -0.1)), 0);
        assert_eq!(mesh.nearest_site(DVec2::new(1.2, -0.1)), 1);
    }

    #[test]
    fn test_degenerate_inputs() {
        let too_few = [DVec2::ZERO, DVec2::X];
        assert!(matches!(
            DelaunayTriangulation::new(&too_few),
            Err(CircleError::DegenerateInput(_))
        ));

        let collinear: Vec<DVec2> = (0..10).map(|i| DVec2::new(i as f64, 2.0 * i as f64)).collect();
        assert!(matches!(
            DelaunayTriangulation::new(&collinear),
            Err(CircleError::DegenerateInput(_))
        ));

        let coincident = [DVec2::ONE; 5];
        assert!(matches!(
            DelaunayTriangulation::new(&coincident),
            Err(CircleError::DegenerateInput(_))
        ));

        let nan = [DVec2::ZERO, DVec2::X, DVec2::new(f64::NAN, 0.0), DVec2::Y];
        assert_eq!(
            DelaunayTriangulation::new(&nan).unwrap_err(),
            CircleError::NonFiniteSite(2)
        );
    }

    #[test]
    fn test_collinear_prefix_then_off_line_site() {
        // Many collinear sites before the first one that leaves the line
        let mut sites: Vec<DVec2> = (0..20).map(|i| DVec2::new(i as f64 * 0.1, 0.0)).collect();
        sites.push(DVec2::new(0.5, 1.0));
        sites.push(DVec2::new(0.5, -1.0));

        let mesh = DelaunayTriangulation::new(&sites).unwrap();
        assert!(mesh.is_valid());
        assert!(mesh.is_delaunay());
        assert_eq!(mesh.vertex_count(), 22);
    }

    #[test]
    fn test_insert_after_construction() {
        let mut mesh = DelaunayTriangulation::new(&random_sites(50, 3)).unwrap();

        let inside = mesh.insert(DVec2::new(0.01, 0.02)).unwrap();
        let outside = mesh.insert(DVec2::new(5.0, 5.0)).unwrap();
        assert_eq!(inside, 50);
        assert_eq!(outside, 51);
        assert!(mesh.is_valid());
        assert!(mesh.is_delaunay());

        assert_eq!(
            mesh.insert(DVec2::new(f64::INFINITY, 0.0)),
            Err(CircleError::NonFiniteSite(52))
        );
    }

    #[test]
    fn test_nearest_site_matches_brute_force() {
        let sites = random_sites(300, 9);
        let mesh = DelaunayTriangulation::new(&sites).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(10);

        for _ in 0..500 {
            // Include queries well outside the hull
            let q = DVec2::new(rng.gen_range(-3.0..3.0), rng.gen_range(-3.0..3.0));
            let found = mesh.nearest_site(q);
            assert_eq!(sites[found].distance_squared(q), brute_force_distance(&sites, q));
        }
    }

    #[test]
    fn test_nearest_site_with_huge_coordinates() {
        // Squared distances here would overflow f64; a power of two keeps the
        // scaled sites an exact copy of the small ones
        let scale = 2f64.powi(660);
        let small = random_sites(100, 12);
        let sites: Vec<DVec2> = small.iter().map(|&p| p * scale).collect();
        let mesh = DelaunayTriangulation::new(&sites).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(13);

        for _ in 0..200 {
            let q = DVec2::new(rng.gen_range(-1.5..1.5), rng.gen_range(-1.5..1.5));
            let found = mesh.nearest_site(q * scale);
            assert_eq!(small[found].distance_squared(q), brute_force_distance(&small, q));
        }
    }

    #[test]
    fn test_same_seed_same_mesh() {
        let sites = random_sites(200, 77);
        let first = DelaunayTriangulation::with_seed(&sites, 1).unwrap();
        let second = DelaunayTriangulation::with_seed(&sites, 1).unwrap();
        assert_eq!(first.triangles(), second.triangles());
    }

    #[test]
    fn test_walk_handles_sorted_input() {
        // Sorted insertion makes long walks; the result must still be valid
        let mut sites = random_sites(300, 5);
        sites.sort_by(|a, b| a.x.total_cmp(&b.x));
        let mesh = DelaunayTriangulation::new(&sites).unwrap();
        assert!(mesh.is_valid());
        assert!(mesh.is_delaunay());
    }

    #[test]
    fn test_exhaustive_location_agrees_with_walk() {
        let sites = random_sites(60, 21);
        let mut mesh = DelaunayTriangulation::new(&sites).unwrap();

        for &q in &[DVec2::new(0.1, 0.1), DVec2::new(4.0, -2.0), sites[10]] {
            let walked = mesh.locate(q);
            let scanned = mesh.locate_exhaustive(q);
            match (walked, scanned) {
                (Location::Vertex(a), Location::Vertex(b)) => assert_eq!(a, b),
                (Location::Face(_), Location::Face(_)) => {}
                other => panic!("location kinds differ: {:?}", other),
            }
        }
    }
}
