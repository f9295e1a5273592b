//! Choosing the candidate farthest from every site
//!
//! Nearest-site queries go through the [`NearestSite`] trait so the solver can
//! run on the triangulation walk, a KD-tree, or a plain linear scan.

use glam::DVec2;

use super::candidates::Candidate;
use crate::circle::Circle;
use crate::error::{CircleError, Result};
use crate::geometry::squared_distance;
use crate::triangulation::DelaunayTriangulation;

/// Nearest-site lookup over a fixed site set
pub trait NearestSite: Sync {
    /// Index of a site closest to `point`
    fn nearest_site(&self, point: DVec2) -> usize;

    /// Position of site `index`
    fn site(&self, index: usize) -> DVec2;

    /// Squared distance from `point` to its nearest site
    fn nearest_distance_squared(&self, point: DVec2) -> f64 {
        self.site(self.nearest_site(point)).distance_squared(point)
    }
}

impl NearestSite for DelaunayTriangulation {
    fn nearest_site(&self, point: DVec2) -> usize {
        DelaunayTriangulation::nearest_site(self, point)
    }

    fn site(&self, index: usize) -> DVec2 {
        DelaunayTriangulation::site(self, index)
    }
}

/// Linear scan over the sites
///
/// Ties resolve to the lowest site index.
#[derive(Debug, Clone, Copy)]
pub struct BruteForceSites<'a> {
    sites: &'a [DVec2],
}

impl<'a> BruteForceSites<'a> {
    pub fn new(sites: &'a [DVec2]) -> Self {
        Self { sites }
    }
}

impl NearestSite for BruteForceSites<'_> {
    fn nearest_site(&self, point: DVec2) -> usize {
        let mut best = 0;
        let mut best_distance = f64::INFINITY;
        for (i, site) in self.sites.iter().enumerate() {
            let d = squared_distance(*site, point);
            if d < best_distance {
                best = i;
                best_distance = d;
            }
        }
        best
    }

    fn site(&self, index: usize) -> DVec2 {
        self.sites[index]
    }
}

/// Pick the candidate whose nearest site is farthest away
///
/// Returns the circle centered on that candidate, reaching its nearest site,
/// and the candidate's index. Ties go to the earliest candidate, with or
/// without `parallel`, so both modes give bitwise identical results.
///
/// # Errors
///
/// Returns `EmptyCandidateSet` if `candidates` is empty.
pub fn farthest_candidate<N>(
    candidates: &[Candidate],
    index: &N,
    parallel: bool,
) -> Result<(Circle, usize)>
where
    N: NearestSite + ?Sized,
{
    if candidates.is_empty() {
        return Err(CircleError::EmptyCandidateSet);
    }

    let (best_distance, best) = if parallel {
        scan_parallel(candidates, index)
    } else {
        scan_sequential(candidates, index)
    };

    let circle = Circle::new(candidates[best].point, best_distance.sqrt());
    Ok((circle, best))
}

fn scan_sequential<N: NearestSite + ?Sized>(candidates: &[Candidate], index: &N) -> (f64, usize) {
    let mut best = 0;
    let mut best_distance = f64::NEG_INFINITY;
    for (i, candidate) in candidates.iter().enumerate() {
        let d = index.nearest_distance_squared(candidate.point);
        if d > best_distance {
            best = i;
            best_distance = d;
        }
    }
    (best_distance, best)
}

#[cfg(feature = "parallel")]
fn scan_parallel<N: NearestSite + ?Sized>(candidates: &[Candidate], index: &N) -> (f64, usize) {
    use rayon::prelude::*;

    candidates
        .par_iter()
        .enumerate()
        .map(|(i, candidate)| (index.nearest_distance_squared(candidate.point), i))
        .reduce(
            || (f64::NEG_INFINITY, usize::MAX),
            |a, b| {
                if b.0 > a.0 || (b.0 == a.0 && b.1 < a.1) {
                    b
                } else {
                    a
                }
            },
        )
}

#[cfg(not(feature = "parallel"))]
fn scan_parallel<N: NearestSite + ?Sized>(candidates: &[Candidate], index: &N) -> (f64, usize) {
    scan_sequential(candidates, index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::candidates::CandidateSource;

    fn candidate(x: f64, y: f64) -> Candidate {
        Candidate {
            point: DVec2::new(x, y),
            source: CandidateSource::VoronoiVertex,
        }
    }

    #[test]
    fn test_brute_force_nearest() {
        let sites = [DVec2::ZERO, DVec2::new(2.0, 0.0), DVec2::new(0.0, 2.0)];
        let index = BruteForceSites::new(&sites);

        assert_eq!(index.nearest_site(DVec2::new(1.9, 0.3)), 1);
        // Equidistant from sites 0 and 1
        assert_eq!(index.nearest_site(DVec2::new(1.0, -5.0)), 0);
        assert_eq!(index.nearest_distance_squared(DVec2::new(0.0, 3.0)), 1.0);
    }

    #[test]
    fn test_farthest_candidate() {
        let sites = [DVec2::ZERO, DVec2::new(4.0, 0.0), DVec2::new(0.0, 4.0)];
        let index = BruteForceSites::new(&sites);
        let candidates = [candidate(1.0, 1.0), candidate(2.0, 2.0), candidate(0.5, 0.0)];

        let (circle, best) = farthest_candidate(&candidates, &index, false).unwrap();
        assert_eq!(best, 1);
        assert_eq!(circle.center, DVec2::new(2.0, 2.0));
        assert!((circle.radius - 8f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_ties_go_to_first_candidate() {
        let sites = [DVec2::new(-1.0, 0.0), DVec2::new(1.0, 0.0)];
        let index = BruteForceSites::new(&sites);
        let candidates = [candidate(0.0, 1.0), candidate(0.0, -1.0), candidate(0.0, 0.0)];

        let (_, best) = farthest_candidate(&candidates, &index, false).unwrap();
        assert_eq!(best, 0);
        let (_, best) = farthest_candidate(&candidates, &index, true).unwrap();
        assert_eq!(best, 0);
    }

    #[test]
    fn test_empty_candidates() {
        let sites = [DVec2::ZERO];
        let index = BruteForceSites::new(&sites);
        assert_eq!(
            farthest_candidate(&[], &index, false).unwrap_err(),
            CircleError::EmptyCandidateSet
        );
    }

    #[test]
    fn test_triangulation_as_index() {
        let sites = [DVec2::ZERO, DVec2::new(4.0, 0.0), DVec2::new(0.0, 4.0), DVec2::new(4.0, 4.0)];
        let mesh = DelaunayTriangulation::new(&sites).unwrap();
        let candidates = [candidate(2.0, 2.0), candidate(1.0, 0.0)];

        let (circle, best) = farthest_candidate(&candidates, &mesh, false).unwrap();
        assert_eq!(best, 0);
        assert!((circle.radius - 8f64.sqrt()).abs() < 1e-12);
    }
}
