//! Site sources
//!
//! Seeded random sites for demos and tests, and a helper that maps arbitrary
//! coordinates (for example longitude/latitude) into the `[-1, 1]` square.

use glam::DVec2;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::error::{CircleError, Result};

/// Generate `count` sites uniformly in `[-1, 1] x [-1, 1]`
///
/// The same seed always yields the same sites.
///
/// # Arguments
///
/// * `count` - Number of sites to generate
/// * `seed` - Random seed
///
/// # Example
///
/// ```rust
/// use largest_empty_circle::sites::random_sites;
///
/// let sites = random_sites(1000, 42);
/// assert_eq!(sites.len(), 1000);
/// assert!(sites.iter().all(|s| s.x.abs() <= 1.0 && s.y.abs() <= 1.0));
/// assert_eq!(sites, random_sites(1000, 42));
/// ```
pub fn random_sites(count: usize, seed: u64) -> Vec<DVec2> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..count)
        .map(|_| DVec2::new(rng.gen_range(-1.0..=1.0), rng.gen_range(-1.0..=1.0)))
        .collect()
}

/// Scale and translate `sites` into `[-1, 1] x [-1, 1]`, preserving aspect ratio
///
/// The larger extent is mapped onto the full width of 2, the smaller one
/// keeps the same scale, and the result is centered on the origin.
///
/// # Errors
///
/// Returns `DegenerateInput` if `sites` is empty or every site coincides, and
/// `NonFiniteSite` for NaN or infinite coordinates.
pub fn normalize_to_unit_range(sites: &[DVec2]) -> Result<Vec<DVec2>> {
    if let Some(index) = sites.iter().position(|p| !p.is_finite()) {
        return Err(CircleError::NonFiniteSite(index));
    }

    let first = *sites
        .first()
        .ok_or_else(|| CircleError::DegenerateInput("no sites to normalize".into()))?;
    let (min, max) = sites
        .iter()
        .fold((first, first), |(min, max), p| (min.min(*p), max.max(*p)));

    let extent = max - min;
    if extent.x == 0.0 && extent.y == 0.0 {
        return Err(CircleError::DegenerateInput(
            "sites have zero extent in both axes".into(),
        ));
    }

    let scale = if extent.x == 0.0 {
        2.0 / extent.y
    } else if extent.y == 0.0 {
        2.0 / extent.x
    } else {
        (2.0 / extent.x).min(2.0 / extent.y)
    };
    let half = extent * scale * 0.5;

    Ok(sites.iter().map(|p| (*p - min) * scale - half).collect())
}
