//! Solver configuration and builder
//!
//! The pipeline takes no configuration beyond the sites and an optional boundary
//! for its mathematical result; these settings only tune numeric tolerances and
//! how nearest-site queries are answered.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{CircleError, Result};
use crate::triangulation::DEFAULT_WALK_SEED;

/// How the solver answers "which site is closest to this candidate?"
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NearestSiteStrategy {
    /// Jump-and-walk through the Delaunay triangulation (default)
    #[default]
    Walk,
    /// Linear scan over every site
    BruteForce,
    /// KD-tree lookup over the sites
    #[cfg(feature = "spatial-index")]
    KdTree,
}

impl NearestSiteStrategy {
    /// Get a human-readable name for this strategy
    pub fn name(self) -> &'static str {
        match self {
            NearestSiteStrategy::Walk => "walk",
            NearestSiteStrategy::BruteForce => "brute-force",
            #[cfg(feature = "spatial-index")]
            NearestSiteStrategy::KdTree => "kd-tree",
        }
    }
}

/// Configuration for a largest-empty-circle computation
///
/// Two runs with the same sites and the same configuration produce bitwise
/// identical circles.
///
/// # Example
///
/// ```rust
/// use largest_empty_circle::*;
///
/// let config = SolverConfigBuilder::new()
///     .merge_tolerance(1e-8)
///     .unwrap()
///     .nearest_site(NearestSiteStrategy::BruteForce)
///     .build()
///     .unwrap();
///
/// assert_eq!(config.merge_tolerance, 1e-8);
/// ```
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverConfig {
    /// Distance under which two candidate points are merged, and within which a
    /// point counts as lying on the boundary
    ///
    /// Expressed as a fraction of the diagonal of the box around the sites and
    /// boundary, so the same value works at any coordinate scale.
    pub merge_tolerance: f64,

    /// Margin added on every side of the clipping box, as a fraction of the
    /// diagonal of the box around the sites and boundary
    ///
    /// Any positive value keeps every Voronoi vertex inside the boundary away
    /// from the box edges.
    pub box_margin: f64,

    /// Nearest-site query backend used when scoring candidates
    pub nearest_site: NearestSiteStrategy,

    /// Score candidates on the rayon thread pool (requires the `parallel` feature)
    ///
    /// Ignored when the feature is disabled. The result is identical either way.
    pub parallel: bool,

    /// Seed for the stochastic point-location walk used during insertion
    pub walk_seed: u64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        SolverConfigBuilder::new().into_config()
    }
}

/// Builder for creating [`SolverConfig`] with validation
///
/// # Example
///
/// ```rust
/// use largest_empty_circle::*;
///
/// // Use defaults
/// let config = SolverConfigBuilder::new().build().unwrap();
/// assert_eq!(config, SolverConfig::default());
///
/// // Invalid margins are rejected
/// assert!(SolverConfigBuilder::new().box_margin(0.0).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct SolverConfigBuilder {
    merge_tolerance: f64,
    box_margin: f64,
    nearest_site: NearestSiteStrategy,
    parallel: bool,
    walk_seed: u64,
}

impl SolverConfigBuilder {
    /// Create a new builder with default values
    ///
    /// Defaults:
    /// - merge_tolerance: 1e-9
    /// - box_margin: 1.0 (one diagonal on every side)
    /// - nearest_site: Walk
    /// - parallel: false
    /// - walk_seed: 0x5EED
    pub fn new() -> Self {
        Self {
            merge_tolerance: 1e-9,
            box_margin: 1.0,
            nearest_site: NearestSiteStrategy::default(),
            parallel: false,
            walk_seed: DEFAULT_WALK_SEED,
        }
    }

    /// Set the relative merge tolerance
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the tolerance is negative, not finite, or
    /// 1e-3 or more (coarser than any useful candidate resolution)
    pub fn merge_tolerance(mut self, tolerance: f64) -> Result<Self> {
        if !tolerance.is_finite() || tolerance < 0.0 || tolerance >= 1e-3 {
            return Err(CircleError::InvalidConfig(format!(
                "merge tolerance must be in [0, 1e-3) (got {})",
                tolerance
            )));
        }
        self.merge_tolerance = tolerance;
        Ok(self)
    }

    /// Set the relative clipping-box margin
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the margin is not strictly positive and finite
    pub fn box_margin(mut self, margin: f64) -> Result<Self> {
        if !margin.is_finite() || margin <= 0.0 {
            return Err(CircleError::InvalidConfig(format!(
                "box margin must be positive (got {})",
                margin
            )));
        }
        self.box_margin = margin;
        Ok(self)
    }

    /// Set the nearest-site query backend
    pub fn nearest_site(mut self, strategy: NearestSiteStrategy) -> Self {
        self.nearest_site = strategy;
        self
    }

    /// Enable or disable parallel candidate scoring
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Set the point-location walk seed
    pub fn walk_seed(mut self, seed: u64) -> Self {
        self.walk_seed = seed;
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<SolverConfig> {
        Ok(self.into_config())
    }

    fn into_config(self) -> SolverConfig {
        SolverConfig {
            merge_tolerance: self.merge_tolerance,
            box_margin: self.box_margin,
            nearest_site: self.nearest_site,
            parallel: self.parallel,
            walk_seed: self.walk_seed,
        }
    }
}

impl Default for SolverConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
