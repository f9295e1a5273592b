//! Largest empty circle from two GeoJSON files
//!
//! ```text
//! cargo run --example geojson_sites --features geojson -- boundary.geojson points.geojson
//! ```
//!
//! The boundary ring and the points are normalised into [-1, 1]^2 before
//! solving, and the circle is reported in those units.

use largest_empty_circle::geojson::read_sites;
use largest_empty_circle::*;

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

fn main() -> Result<()> {
    init_tracing();

    let mut args = std::env::args().skip(1);
    let (Some(boundary_path), Some(points_path)) = (args.next(), args.next()) else {
        eprintln!("usage: geojson_sites <boundary.geojson> <points.geojson>");
        std::process::exit(2);
    };

    let raw = read_sites(&boundary_path, &points_path)?;
    let sites = sites::normalize_to_unit_range(&raw)?;
    println!("Loaded {} sites from {} and {}", sites.len(), boundary_path, points_path);

    let solved = LargestEmptyCircle::compute(&sites, &SolverConfig::default())?;
    let circle = solved.circle();
    let rim = solved.sites()[solved.center_site()];

    println!("Center: ({:.6}, {:.6})", circle.center.x, circle.center.y);
    println!("Radius: {:.6}", circle.radius);
    println!("Touching site #{} at ({:.6}, {:.6})", solved.center_site(), rim.x, rim.y);

    Ok(())
}
