//! Largest empty circle of a planar site set
//!
//! Finds the largest circle whose interior contains no site and whose center
//! lies inside a convex region (by default the convex hull of the sites). The
//! center is found among the Voronoi vertices inside the region, the points
//! where Voronoi edges cross the region boundary, and the region corners.
//!
//! # Quick Start
//!
//! ```rust
//! use largest_empty_circle::*;
//!
//! let sites = random_sites(500, 42);
//!
//! let config = SolverConfigBuilder::new()
//!     .merge_tolerance(1e-9).unwrap()
//!     .build().unwrap();
//!
//! let solved = LargestEmptyCircle::compute(&sites, &config).unwrap();
//! let circle = solved.circle();
//! println!("center {:?}, radius {}", circle.center, circle.radius);
//!
//! // Line and point buffers for drawing
//! let overlay = build_overlay(&solved, &OverlayOptions::default(), &BasicPalette);
//! println!("{} line segments", overlay.line_count());
//! ```
//!
//! # Features
//!
//! - `spatial-index` (default): KD-tree nearest-site backend
//! - `parallel`: score candidates on the rayon thread pool
//! - `serde`: serialization for configuration and result types
//! - `geojson`: read sites from GeoJSON feature collections

// Modules
pub mod error;
pub mod config;
pub mod geometry;
pub mod triangulation;
pub mod pipeline;
pub mod circle;
pub mod sites;
pub mod overlay;

#[cfg(feature = "spatial-index")]
pub mod spatial;

#[cfg(feature = "geojson")]
pub mod geojson;

// Re-export core types for convenience
pub use error::{CircleError, Result};
pub use config::{NearestSiteStrategy, SolverConfig, SolverConfigBuilder};
pub use circle::Circle;
pub use triangulation::{DelaunayTriangulation, DualEdge, VoronoiEdge};
pub use pipeline::{
    largest_empty_circle, Candidate, CandidateSource, ClippedEdge, ConvexPolygon,
    LargestEmptyCircle, NearestSite,
};
pub use sites::{normalize_to_unit_range, random_sites};
pub use overlay::{
    build_overlay, BasicPalette, CustomPalette, Layer, LayerPalette, OverlayData, OverlayOptions,
};

#[cfg(feature = "spatial-index")]
pub use spatial::SiteIndex;

// Re-export glam::DVec2 for convenience
pub use glam::DVec2;
