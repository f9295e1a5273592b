//! KD-tree nearest-site index
//!
//! This module is only available with the `spatial-index` feature.

use glam::DVec2;
use kiddo::immutable::float::kdtree::ImmutableKdTree;
use kiddo::SquaredEuclidean;

use crate::pipeline::NearestSite;

/// Immutable KD-tree over the sites
///
/// An alternative to the triangulation walk for scoring candidates. Building
/// is O(n log n); each query is O(log n).
///
/// # Example
///
/// ```
/// use largest_empty_circle::*;
///
/// # #[cfg(feature = "spatial-index")]
/// # {
/// let sites = vec![
///     DVec2::new(0.0, 0.0),
///     DVec2::new(1.0, 0.0),
///     DVec2::new(0.0, 1.0),
/// ];
///
/// let index = SiteIndex::new(&sites);
/// assert_eq!(index.find_nearest(DVec2::new(0.9, 0.2)), 1);
/// # }
/// ```
#[derive(Clone)]
pub struct SiteIndex {
    tree: ImmutableKdTree<f64, usize, 2, 32>,
    sites: Vec<DVec2>,
}

impl SiteIndex {
    /// Build the index from site positions
    pub fn new(sites: &[DVec2]) -> Self {
        let points: Vec<[f64; 2]> = sites.iter().map(|s| [s.x, s.y]).collect();

        Self {
            tree: ImmutableKdTree::new_from_slice(&points),
            sites: sites.to_vec(),
        }
    }

    /// Index of a site closest to `position`
    pub fn find_nearest(&self, position: DVec2) -> usize {
        let query = [position.x, position.y];
        self.tree.nearest_one::<SquaredEuclidean>(&query).item
    }

    pub fn len(&self) -> usize {
        self.sites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sites.is_empty()
    }
}

impl NearestSite for SiteIndex {
    fn nearest_site(&self, point: DVec2) -> usize {
        self.find_nearest(point)
    }

    fn site(&self, index: usize) -> DVec2 {
        self.sites[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::BruteForceSites;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_site_index_basic() {
        let sites = vec![
            DVec2::new(1.0, 0.0),
            DVec2::new(0.0, 1.0),
            DVec2::new(-1.0, 0.0),
            DVec2::new(0.0, -1.0),
        ];

        let index = SiteIndex::new(&sites);

        assert_eq!(index.find_nearest(DVec2::new(0.9, 0.1)), 0);
        assert_eq!(index.find_nearest(DVec2::new(0.0, 0.95)), 1);
        assert_eq!(index.find_nearest(DVec2::new(-0.8, 0.0)), 2);
        assert_eq!(index.find_nearest(DVec2::new(0.1, -3.0)), 3);
        assert_eq!(index.len(), 4);
    }

    #[test]
    fn test_site_index_exact_match() {
        let sites = vec![DVec2::new(10.0, 0.0), DVec2::new(0.0, 10.0)];
        let index = SiteIndex::new(&sites);

        assert_eq!(index.find_nearest(sites[0]), 0);
        assert_eq!(index.find_nearest(sites[1]), 1);
    }

    #[test]
    fn test_distances_match_brute_force() {
        let mut rng = ChaCha8Rng::seed_from_u64(8);
        let sites: Vec<DVec2> = (0..500)
            .map(|_| DVec2::new(rng.gen_range(-1.0..1.0), rng.gen_range(-1.0..1.0)))
            .collect();
        let index = SiteIndex::new(&sites);
        let brute = BruteForceSites::new(&sites);

        for _ in 0..200 {
            let q = DVec2::new(rng.gen_range(-2.0..2.0), rng.gen_range(-2.0..2.0));
            assert_eq!(
                index.nearest_distance_squared(q),
                brute.nearest_distance_squared(q)
            );
        }
    }
}
