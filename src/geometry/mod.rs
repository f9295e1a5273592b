//! Geometric kernel: exact predicates and the primitives built on them

pub mod predicates;
pub mod primitives;

pub use predicates::{in_circle, orient2d, CirclePosition, Orientation};
pub use primitives::{
    circumcenter, clip_to_box, point_in_polygon, segment_intersection, squared_distance,
    BoundingBox, Intersection, Line, Parametric, Ray, Segment,
};
