//! Largest empty circle of random sites
//!
//! Run with `RUST_LOG=debug` to see stage timings.

use largest_empty_circle::*;

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

fn main() -> Result<()> {
    init_tracing();

    println!("=== Largest Empty Circle Demo ===\n");

    let count = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(1_000);

    let config = SolverConfigBuilder::new()
        .nearest_site(NearestSiteStrategy::Walk)
        .build()?;

    let sites = random_sites(count, 42);
    println!("Sites: {} uniform in [-1, 1]^2", sites.len());

    let solved = LargestEmptyCircle::compute(&sites, &config)?;
    let circle = solved.circle();

    println!("Triangles: {}", solved.triangulation().triangles().len());
    println!("Hull vertices: {}", solved.boundary().vertices().len());
    println!("Clipped Voronoi edges: {}", solved.voronoi_edges().len());
    println!("Candidates: {}", solved.candidates().len());
    println!();
    println!("Center: ({:.6}, {:.6})", circle.center.x, circle.center.y);
    println!("Radius: {:.6}", circle.radius);
    println!(
        "Winning candidate: {:?}",
        solved.candidates()[solved.best_candidate()].source
    );

    let overlay = build_overlay(&solved, &OverlayOptions::default(), &BasicPalette);
    println!(
        "\nOverlay: {} points, {} line segments, {}-gon circle",
        overlay.point_count(),
        overlay.line_count(),
        overlay.circle.len()
    );

    Ok(())
}
