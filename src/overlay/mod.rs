//! Overlay data for drawing a solved problem
//!
//! Produces engine-agnostic point and line buffers; the caller uploads them
//! to whatever renderer it uses.

mod colors;

pub use colors::{BasicPalette, CustomPalette, Layer, LayerColor, LayerPalette};

use glam::DVec2;

use crate::circle::DEFAULT_CIRCLE_SEGMENTS;
use crate::pipeline::LargestEmptyCircle;

/// Engine-agnostic overlay buffers
///
/// - `points` / `point_colors`: one entry per drawn point
/// - `lines` / `line_colors`: two entries per segment (line-list topology)
/// - `circle`: closed loop (line-strip with wrap-around)
#[derive(Debug, Clone, Default)]
pub struct OverlayData {
    pub points: Vec<[f32; 2]>,
    pub point_colors: Vec<LayerColor>,
    pub lines: Vec<[f32; 2]>,
    pub line_colors: Vec<LayerColor>,
    pub circle: Vec<[f32; 2]>,
    pub circle_color: LayerColor,
}

impl OverlayData {
    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    /// Number of line segments
    pub fn line_count(&self) -> usize {
        self.lines.len() / 2
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty() && self.lines.is_empty() && self.circle.is_empty()
    }

    fn push_point(&mut self, p: DVec2, color: LayerColor) {
        self.points.push(to_f32(p));
        self.point_colors.push(color);
    }

    fn push_line(&mut self, a: DVec2, b: DVec2, color: LayerColor) {
        self.lines.push(to_f32(a));
        self.lines.push(to_f32(b));
        self.line_colors.push(color);
        self.line_colors.push(color);
    }
}

/// Which layers to draw
///
/// Sites, the center and the circle are always drawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayOptions {
    pub show_voronoi: bool,
    pub show_hull: bool,
    pub show_candidates: bool,
    pub circle_segments: usize,
}

impl Default for OverlayOptions {
    fn default() -> Self {
        Self {
            show_voronoi: true,
            show_hull: true,
            show_candidates: true,
            circle_segments: DEFAULT_CIRCLE_SEGMENTS,
        }
    }
}

/// Build overlay buffers for a solved problem
///
/// Points come out as sites, then candidates, then the center; lines as
/// Voronoi edges, then boundary edges.
///
/// # Example
///
/// ```rust
/// use largest_empty_circle::*;
///
/// let sites = random_sites(20, 1);
/// let solved = LargestEmptyCircle::compute(&sites, &SolverConfig::default()).unwrap();
///
/// let overlay = build_overlay(&solved, &OverlayOptions::default(), &BasicPalette);
/// assert_eq!(overlay.circle.len(), 40);
/// ```
pub fn build_overlay<P: LayerPalette>(
    solved: &LargestEmptyCircle,
    options: &OverlayOptions,
    palette: &P,
) -> OverlayData {
    let mut overlay = OverlayData::default();

    let site_color = palette.layer_color(Layer::Sites);
    for &site in solved.sites() {
        overlay.push_point(site, site_color);
    }

    if options.show_candidates {
        let color = palette.layer_color(Layer::Candidates);
        for candidate in solved.candidates() {
            overlay.push_point(candidate.point, color);
        }
    }

    let circle = solved.circle();
    overlay.push_point(circle.center, palette.layer_color(Layer::Center));

    if options.show_voronoi {
        let color = palette.layer_color(Layer::Voronoi);
        for edge in solved.voronoi_edges() {
            overlay.push_line(edge.segment.a, edge.segment.b, color);
        }
    }

    if options.show_hull {
        let color = palette.layer_color(Layer::Hull);
        for edge in solved.boundary_edges() {
            overlay.push_line(edge.a, edge.b, color);
        }
    }

    overlay.circle = circle
        .polyline(options.circle_segments)
        .into_iter()
        .map(to_f32)
        .collect();
    overlay.circle_color = palette.layer_color(Layer::Circle);

    overlay
}

#[inline]
fn to_f32(p: DVec2) -> [f32; 2] {
    [p.x as f32, p.y as f32]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SolverConfig;
    use crate::sites::random_sites;

    fn solved() -> LargestEmptyCircle {
        LargestEmptyCircle::compute(&random_sites(30, 5), &SolverConfig::default()).unwrap()
    }

    #[test]
    fn test_full_overlay() {
        let solved = solved();
        let overlay = build_overlay(&solved, &OverlayOptions::default(), &BasicPalette);

        assert_eq!(overlay.point_count(), 30 + solved.candidates().len() + 1);
        assert_eq!(
            overlay.line_count(),
            solved.voronoi_edges().len() + solved.boundary_edges().len()
        );
        assert_eq!(overlay.lines.len(), overlay.line_colors.len());
        assert_eq!(overlay.points.len(), overlay.point_colors.len());
        assert_eq!(overlay.circle.len(), DEFAULT_CIRCLE_SEGMENTS);
        assert_eq!(overlay.point_colors[0], [1.0, 0.0, 0.0]);
        assert_eq!(overlay.circle_color, [1.0, 1.0, 1.0]);
    }

    #[test]
    fn test_layers_can_be_hidden() {
        let solved = solved();
        let options = OverlayOptions {
            show_voronoi: false,
            show_hull: false,
            show_candidates: false,
            circle_segments: 12,
        };
        let overlay = build_overlay(&solved, &options, &BasicPalette);

        assert_eq!(overlay.point_count(), 31);
        assert_eq!(overlay.line_count(), 0);
        assert_eq!(overlay.circle.len(), 12);
        assert!(!overlay.is_empty());
    }

    #[test]
    fn test_custom_palette_colours_hull() {
        let solved = solved();
        let palette = CustomPalette {
            hull: [0.2, 0.2, 0.2],
            ..Default::default()
        };
        let options = OverlayOptions {
            show_voronoi: false,
            ..Default::default()
        };
        let overlay = build_overlay(&solved, &options, &palette);

        assert!(overlay.line_colors.iter().all(|c| *c == [0.2, 0.2, 0.2]));
    }
}
