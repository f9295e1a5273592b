//! Reading sites from GeoJSON feature collections
//!
//! This module is only available with the `geojson` feature.
//!
//! Two sources are combined: a boundary file whose first feature is a
//! polygon, and a points file whose `Point` features are the obstacles.
//! Other geometry types in the points file are skipped.

use std::path::Path;

use glam::DVec2;
use serde_json::Value;

use crate::error::{CircleError, Result};

fn parse(json: &str) -> Result<Value> {
    serde_json::from_str(json).map_err(|e| CircleError::InvalidInput(format!("malformed JSON: {}", e)))
}

fn features(document: &Value) -> Result<&Vec<Value>> {
    document
        .get("features")
        .and_then(Value::as_array)
        .ok_or_else(|| CircleError::InvalidInput("expected a FeatureCollection with a features array".into()))
}

fn position(value: &Value) -> Result<DVec2> {
    let coords = value
        .as_array()
        .filter(|c| c.len() >= 2)
        .ok_or_else(|| CircleError::InvalidInput(format!("expected a position, got {}", value)))?;
    match (coords[0].as_f64(), coords[1].as_f64()) {
        (Some(x), Some(y)) => Ok(DVec2::new(x, y)),
        _ => Err(CircleError::InvalidInput(format!(
            "position has non-numeric coordinates: {}",
            value
        ))),
    }
}

/// Outer ring of the first feature's polygon
///
/// The ring is returned as stored, including a closing vertex equal to the first.
///
/// # Errors
///
/// Returns `InvalidInput` if the JSON is malformed, there are no features, or
/// the first feature has no polygon ring.
///
/// # Example
///
/// ```rust
/// use largest_empty_circle::geojson::parse_boundary_ring;
///
/// let json = r#"{"type": "FeatureCollection", "features": [{
///     "type": "Feature",
///     "geometry": {"type": "Polygon", "coordinates": [[[0, 0], [4, 0], [4, 3], [0, 0]]]}
/// }]}"#;
///
/// let ring = parse_boundary_ring(json).unwrap();
/// assert_eq!(ring.len(), 4);
/// ```
pub fn parse_boundary_ring(json: &str) -> Result<Vec<DVec2>> {
    let document = parse(json)?;
    let first = features(&document)?
        .first()
        .ok_or_else(|| CircleError::InvalidInput("boundary collection has no features".into()))?;

    let ring = first
        .pointer("/geometry/coordinates/0")
        .and_then(Value::as_array)
        .ok_or_else(|| CircleError::InvalidInput("first feature has no polygon ring".into()))?;

    ring.iter().map(position).collect()
}

/// Coordinates of every `Point` feature, in file order
///
/// # Errors
///
/// Returns `InvalidInput` if the JSON is malformed or a point has bad coordinates.
pub fn parse_point_features(json: &str) -> Result<Vec<DVec2>> {
    let document = parse(json)?;
    let mut points = Vec::new();

    for feature in features(&document)? {
        let kind = feature.pointer("/geometry/type").and_then(Value::as_str);
        if kind != Some("Point") {
            continue;
        }
        let coordinates = feature
            .pointer("/geometry/coordinates")
            .ok_or_else(|| CircleError::InvalidInput("point feature without coordinates".into()))?;
        points.push(position(coordinates)?);
    }

    tracing::debug!(points = points.len(), "point features parsed");
    Ok(points)
}

/// Boundary ring vertices followed by the point features
pub fn load_sites(boundary_json: &str, points_json: &str) -> Result<Vec<DVec2>> {
    let mut sites = parse_boundary_ring(boundary_json)?;
    sites.extend(parse_point_features(points_json)?);
    Ok(sites)
}

/// Read both files from disk and combine them like [`load_sites`]
///
/// # Errors
///
/// Returns `Io` if a file cannot be read, otherwise as [`load_sites`].
pub fn read_sites(boundary_path: impl AsRef<Path>, points_path: impl AsRef<Path>) -> Result<Vec<DVec2>> {
    let boundary = std::fs::read_to_string(boundary_path.as_ref())?;
    let points = std::fs::read_to_string(points_path.as_ref())?;
    load_sites(&boundary, &points)
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOUNDARY: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            {"type": "Feature", "properties": {},
             "geometry": {"type": "Polygon",
                          "coordinates": [[[10.0, 50.0], [11.0, 50.0], [11.0, 51.0], [10.0, 51.0], [10.0, 50.0]]]}}
        ]
    }"#;

    const POINTS: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            {"type": "Feature", "geometry": {"type": "Point", "coordinates": [10.2, 50.3]}},
            {"type": "Feature", "geometry": {"type": "Polygon", "coordinates": [[[10.5, 50.5], [10.6, 50.5], [10.6, 50.6]]]}},
            {"type": "Feature", "geometry": {"type": "Point", "coordinates": [10.7, 50.8, 120.0]}}
        ]
    }"#;

    #[test]
    fn test_parse_boundary_ring() {
        let ring = parse_boundary_ring(BOUNDARY).unwrap();
        assert_eq!(ring.len(), 5);
        assert_eq!(ring[0], DVec2::new(10.0, 50.0));
        assert_eq!(ring[2], DVec2::new(11.0, 51.0));
    }

    #[test]
    fn test_parse_points_skips_polygons() {
        let points = parse_point_features(POINTS).unwrap();
        assert_eq!(points, vec![DVec2::new(10.2, 50.3), DVec2::new(10.7, 50.8)]);
    }

    #[test]
    fn test_load_sites_order() {
        let sites = load_sites(BOUNDARY, POINTS).unwrap();
        assert_eq!(sites.len(), 7);
        assert_eq!(sites[5], DVec2::new(10.2, 50.3));
    }

    #[test]
    fn test_malformed_input() {
        assert!(matches!(parse_boundary_ring("{"), Err(CircleError::InvalidInput(_))));
        assert!(matches!(
            parse_boundary_ring(r#"{"features": []}"#),
            Err(CircleError::InvalidInput(_))
        ));
        assert!(matches!(
            parse_point_features(r#"{"type": "Feature"}"#),
            Err(CircleError::InvalidInput(_))
        ));
        assert!(matches!(
            parse_point_features(
                r#"{"features": [{"geometry": {"type": "Point", "coordinates": ["a", 1]}}]}"#
            ),
            Err(CircleError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        let err = read_sites("/nonexistent/boundary.geojson", "/nonexistent/points.geojson").unwrap_err();
        assert!(matches!(err, CircleError::Io(_)));
    }
}
