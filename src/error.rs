//! Error types for largest-empty-circle computation

use std::fmt;

use glam::DVec2;

/// Errors that can occur while building the triangulation or solving for the circle
#[derive(Debug, Clone, PartialEq)]
pub enum CircleError {
    /// Fewer than 3 distinct sites, or all sites collinear
    DegenerateInput(String),
    /// A site has a NaN or infinite coordinate
    NonFiniteSite(usize),
    /// Circumcenter requested for a collinear triple
    ///
    /// Unreachable while the mesh invariants hold; seeing it means a
    /// predicate disagreed with the mesh topology.
    DegenerateTriangle {
        a: DVec2,
        b: DVec2,
        c: DVec2,
    },
    /// No candidate centers were produced
    EmptyCandidateSet,
    /// Caller-supplied boundary polygon is not a proper convex polygon
    InvalidBoundary(String),
    /// Configuration validation failed
    InvalidConfig(String),
    /// External site data could not be interpreted
    InvalidInput(String),
    /// Reading external site data failed
    Io(String),
}

impl fmt::Display for CircleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CircleError::DegenerateInput(msg) => write!(f, "degenerate input: {}", msg),
            CircleError::NonFiniteSite(index) => {
                write!(f, "site {} has a non-finite coordinate", index)
            }
            CircleError::DegenerateTriangle { a, b, c } => write!(
                f,
                "degenerate triangle ({}, {}), ({}, {}), ({}, {}) has no circumcenter",
                a.x, a.y, b.x, b.y, c.x, c.y
            ),
            CircleError::EmptyCandidateSet => write!(f, "candidate set is empty"),
            CircleError::InvalidBoundary(msg) => write!(f, "invalid boundary: {}", msg),
            CircleError::InvalidConfig(msg) => write!(f, "invalid configuration: {}", msg),
            CircleError::InvalidInput(msg) => write!(f, "invalid input: {}", msg),
            CircleError::Io(msg) => write!(f, "i/o error: {}", msg),
        }
    }
}

impl std::error::Error for CircleError {}

impl From<std::io::Error> for CircleError {
    fn from(err: std::io::Error) -> Self {
        CircleError::Io(err.to_string())
    }
}

/// Result type alias for largest-empty-circle operations
pub type Result<T> = std::result::Result<T, CircleError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = CircleError::DegenerateInput("all sites are collinear".into());
        assert_eq!(err.to_string(), "degenerate input: all sites are collinear");

        let err = CircleError::NonFiniteSite(3);
        assert_eq!(err.to_string(), "site 3 has a non-finite coordinate");

        assert_eq!(
            CircleError::EmptyCandidateSet.to_string(),
            "candidate set is empty"
        );
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing.geojson");
        let err: CircleError = io.into();
        assert!(matches!(err, CircleError::Io(ref msg) if msg.contains("missing.geojson")));
    }
}
