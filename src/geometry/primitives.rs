//! Linear primitives, boxes, and the constructions built on them
//!
//! Constructions (circumcenters, intersection points, clipped endpoints) are
//! computed in `f64`; every yes/no decision that feeds topology is taken by
//! the exact predicates in [`super::predicates`].

use glam::DVec2;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::predicates::orient2d;
use crate::error::{CircleError, Result};

/// Finite segment from `a` to `b`
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub a: DVec2,
    pub b: DVec2,
}

impl Segment {
    #[inline]
    pub fn new(a: DVec2, b: DVec2) -> Self {
        Self { a, b }
    }

    #[inline]
    pub fn length(&self) -> f64 {
        (self.b - self.a).length()
    }

    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.a == self.b
    }

    /// Euclidean distance from `p` to the closest point of the segment
    pub fn distance_to(&self, p: DVec2) -> f64 {
        let ab = self.b - self.a;
        let len2 = ab.length_squared();
        if len2 == 0.0 {
            return (p - self.a).length();
        }
        let t = ((p - self.a).dot(ab) / len2).clamp(0.0, 1.0);
        (p - (self.a + ab * t)).length()
    }

    /// Exact test for `p` lying on the closed segment
    pub fn contains_exact(&self, p: DVec2) -> bool {
        orient2d(self.a, self.b, p).is_collinear() && within_span(self.a, self.b, p)
    }
}

/// Half-line starting at `origin` heading along `direction`
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: DVec2,
    pub direction: DVec2,
}

/// Infinite line through `point` with the given `direction`
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line {
    pub point: DVec2,
    pub direction: DVec2,
}

/// A primitive that can be written as `origin + t * direction` for `t` in a range
pub trait Parametric {
    /// Returns `(origin, direction, t_min, t_max)`
    fn parametric(&self) -> (DVec2, DVec2, f64, f64);

    /// Point at parameter `t`
    fn point_at(&self, t: f64) -> DVec2 {
        let (origin, direction, _, _) = self.parametric();
        if t == 0.0 {
            origin
        } else {
            origin + direction * t
        }
    }
}

impl Parametric for Segment {
    fn parametric(&self) -> (DVec2, DVec2, f64, f64) {
        (self.a, self.b - self.a, 0.0, 1.0)
    }

    fn point_at(&self, t: f64) -> DVec2 {
        // Keep the stored endpoints bit-exact when the box does not cut them
        if t == 0.0 {
            self.a
        } else if t == 1.0 {
            self.b
        } else {
            self.a + (self.b - self.a) * t
        }
    }
}

impl Parametric for Ray {
    fn parametric(&self) -> (DVec2, DVec2, f64, f64) {
        (self.origin, self.direction, 0.0, f64::INFINITY)
    }
}

impl Parametric for Line {
    fn parametric(&self) -> (DVec2, DVec2, f64, f64) {
        (self.point, self.direction, f64::NEG_INFINITY, f64::INFINITY)
    }
}

/// Outcome of intersecting two primitives
///
/// Box clipping yields `None` or `Segment`; segment/segment intersection yields
/// `None`, `Point` or `OverlappingSegment`.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Intersection {
    None,
    Point(DVec2),
    Segment(Segment),
    OverlappingSegment(Segment),
}

/// Axis-aligned rectangle
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min: DVec2,
    pub max: DVec2,
}

impl BoundingBox {
    pub fn new(min: DVec2, max: DVec2) -> Self {
        Self { min, max }
    }

    /// Tight box around a set of points, `None` when the set is empty
    pub fn from_points<'a, I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a DVec2>,
    {
        let mut iter = points.into_iter();
        let first = *iter.next()?;
        let (min, max) = iter.fold((first, first), |(min, max), p| (min.min(*p), max.max(*p)));
        Some(Self { min, max })
    }

    /// Box around `points` grown on every side by `margin` times its diagonal
    ///
    /// A single-point set is grown by `margin` in absolute units so the box
    /// always has positive area.
    pub fn enclosing<'a, I>(points: I, margin: f64) -> Option<Self>
    where
        I: IntoIterator<Item = &'a DVec2>,
    {
        let tight = Self::from_points(points)?;
        let diagonal = tight.diagonal();
        let pad = if diagonal > 0.0 { margin * diagonal } else { margin };
        Some(Self {
            min: tight.min - DVec2::splat(pad),
            max: tight.max + DVec2::splat(pad),
        })
    }

    #[inline]
    pub fn diagonal(&self) -> f64 {
        (self.max - self.min).length()
    }

    /// Closed containment test
    #[inline]
    pub fn contains(&self, p: DVec2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    /// True when `p` lies strictly inside the box
    #[inline]
    pub fn contains_strictly(&self, p: DVec2) -> bool {
        p.x > self.min.x && p.x < self.max.x && p.y > self.min.y && p.y < self.max.y
    }
}

/// Squared Euclidean distance between two points
#[inline]
pub fn squared_distance(a: DVec2, b: DVec2) -> f64 {
    a.distance_squared(b)
}

/// Power of two that brings `largest` into `[1, 2)`
///
/// Multiplying by it is exact, so it rescales geometry without changing any
/// predicate outcome. Used to keep squared magnitudes clear of overflow.
pub(crate) fn unit_scale(largest: f64) -> f64 {
    let exponent = if largest > 0.0 && largest.is_finite() {
        ((largest.to_bits() >> 52) & 0x7ff) as i64 - 1023
    } else {
        0
    };
    let exponent = exponent.clamp(-1022, 1022);
    f64::from_bits(((1023 - exponent) as u64) << 52)
}

/// Center of the circle through `a`, `b` and `c`
///
/// The edge vectors are normalized before squaring, so any triangle whose
/// circumcenter is representable gets one, however large its coordinates.
///
/// # Errors
///
/// Returns `DegenerateTriangle` when the points are exactly collinear, or when
/// the triangle is so thin that its circumcenter lies beyond the `f64` range.
pub fn circumcenter(a: DVec2, b: DVec2, c: DVec2) -> Result<DVec2> {
    if orient2d(a, b, c).is_collinear() {
        tracing::error!(?a, ?b, ?c, "circumcenter requested for collinear triple");
        return Err(CircleError::DegenerateTriangle { a, b, c });
    }

    finite_circumcenter(a, b, c).ok_or_else(|| {
        tracing::error!(?a, ?b, ?c, "circumcenter beyond f64 range");
        CircleError::DegenerateTriangle { a, b, c }
    })
}

/// Circumcenter of a non-collinear triple, `None` if it is not representable
pub(crate) fn finite_circumcenter(a: DVec2, b: DVec2, c: DVec2) -> Option<DVec2> {
    let ab = b - a;
    let ac = c - a;
    let scale = ab.abs().max_element().max(ac.abs().max_element());
    if !(scale > 0.0 && scale.is_finite()) {
        return None;
    }

    let (ab, ac) = (ab / scale, ac / scale);
    let d = 2.0 * ab.perp_dot(ac);
    let ab2 = ab.length_squared();
    let ac2 = ac.length_squared();

    let offset = DVec2::new(
        (ac.y * ab2 - ab.y * ac2) / d,
        (ab.x * ac2 - ac.x * ab2) / d,
    );
    let center = a + offset * scale;
    center.is_finite().then_some(center)
}

/// Clip a segment, ray or line against an axis-aligned box
///
/// Liang–Barsky: the parameter interval is narrowed by each of the four
/// half-planes in turn. Returns `Intersection::Segment` for a surviving
/// interval of positive length and `Intersection::None` otherwise.
///
/// # Example
///
/// ```rust
/// use largest_empty_circle::geometry::{clip_to_box, BoundingBox, Intersection, Ray};
/// use glam::DVec2;
///
/// let bbox = BoundingBox::new(DVec2::splat(-1.0), DVec2::splat(1.0));
/// let ray = Ray { origin: DVec2::ZERO, direction: DVec2::X };
///
/// match clip_to_box(&ray, &bbox) {
///     Intersection::Segment(s) => assert_eq!(s.b, DVec2::new(1.0, 0.0)),
///     other => panic!("unexpected {:?}", other),
/// }
/// ```
pub fn clip_to_box<P: Parametric>(primitive: &P, bbox: &BoundingBox) -> Intersection {
    let (origin, direction, mut t_min, mut t_max) = primitive.parametric();
    if direction == DVec2::ZERO {
        return Intersection::None;
    }

    // Each entry encodes `denominator * t <= numerator`
    let constraints = [
        (-direction.x, origin.x - bbox.min.x),
        (direction.x, bbox.max.x - origin.x),
        (-direction.y, origin.y - bbox.min.y),
        (direction.y, bbox.max.y - origin.y),
    ];

    for (denominator, numerator) in constraints {
        if denominator == 0.0 {
            if numerator < 0.0 {
                return Intersection::None;
            }
            continue;
        }
        let t = numerator / denominator;
        if denominator < 0.0 {
            if t > t_min {
                t_min = t;
            }
        } else if t < t_max {
            t_max = t;
        }
    }

    if !(t_min < t_max) || !t_min.is_finite() || !t_max.is_finite() {
        return Intersection::None;
    }

    let a = primitive.point_at(t_min);
    let b = primitive.point_at(t_max);
    if a == b {
        return Intersection::None;
    }
    Intersection::Segment(Segment::new(a, b))
}

/// Intersect two closed segments
///
/// Returns `Point` for a single crossing or touching point, `OverlappingSegment`
/// for a collinear overlap of positive length, and `None` otherwise. When an
/// endpoint lies exactly on the other segment, that endpoint is returned as is.
pub fn segment_intersection(s1: &Segment, s2: &Segment) -> Intersection {
    let (p, p2, q, q2) = (s1.a, s1.b, s2.a, s2.b);

    let o1 = orient2d(p, p2, q);
    let o2 = orient2d(p, p2, q2);
    let o3 = orient2d(q, q2, p);
    let o4 = orient2d(q, q2, p2);

    if o1.is_collinear() && o2.is_collinear() && o3.is_collinear() && o4.is_collinear() {
        return collinear_overlap(s1, s2);
    }
    if o1 == o2 && !o1.is_collinear() {
        return Intersection::None;
    }
    if o3 == o4 && !o3.is_collinear() {
        return Intersection::None;
    }

    if o1.is_collinear() {
        return Intersection::Point(q);
    }
    if o2.is_collinear() {
        return Intersection::Point(q2);
    }
    if o3.is_collinear() {
        return Intersection::Point(p);
    }
    if o4.is_collinear() {
        return Intersection::Point(p2);
    }

    let r = p2 - p;
    let s = q2 - q;
    let denominator = r.perp_dot(s);
    let t = ((q - p).perp_dot(s) / denominator).clamp(0.0, 1.0);
    Intersection::Point(p + r * t)
}

fn collinear_overlap(s1: &Segment, s2: &Segment) -> Intersection {
    let reference = if s1.is_degenerate() { s2.b - s2.a } else { s1.b - s1.a };
    if reference == DVec2::ZERO {
        // Both segments are single points
        return if s1.a == s2.a {
            Intersection::Point(s1.a)
        } else {
            Intersection::None
        };
    }

    let key = |p: DVec2| if reference.x.abs() >= reference.y.abs() { p.x } else { p.y };
    let ordered = |s: &Segment| {
        if key(s.a) <= key(s.b) {
            (s.a, s.b)
        } else {
            (s.b, s.a)
        }
    };

    let (lo1, hi1) = ordered(s1);
    let (lo2, hi2) = ordered(s2);
    let lo = if key(lo1) >= key(lo2) { lo1 } else { lo2 };
    let hi = if key(hi1) <= key(hi2) { hi1 } else { hi2 };

    if key(lo) > key(hi) {
        Intersection::None
    } else if key(lo) == key(hi) {
        Intersection::Point(lo)
    } else {
        Intersection::OverlappingSegment(Segment::new(lo, hi))
    }
}

/// Boundary-inclusive point-in-polygon test
///
/// Points within `tolerance` of an edge (or exactly on it) count as inside;
/// everything else is decided by crossing parity. The polygon is given by its
/// vertices in order, without repeating the first vertex.
pub fn point_in_polygon(p: DVec2, polygon: &[DVec2], tolerance: f64) -> bool {
    let n = polygon.len();
    if n == 0 {
        return false;
    }

    for i in 0..n {
        let edge = Segment::new(polygon[i], polygon[(i + 1) % n]);
        if edge.contains_exact(p) || edge.distance_to(p) <= tolerance {
            return true;
        }
    }

    let mut inside = false;
    for i in 0..n {
        let a = polygon[i];
        let b = polygon[(i + 1) % n];
        if (a.y > p.y) != (b.y > p.y) {
            let x = a.x + (p.y - a.y) * (b.x - a.x) / (b.y - a.y);
            if p.x < x {
                inside = !inside;
            }
        }
    }
    inside
}

/// `p` lies within the axis-aligned span of `a` and `b` (inclusive)
#[inline]
fn within_span(a: DVec2, b: DVec2, p: DVec2) -> bool {
    p.x >= a.x.min(b.x) && p.x <= a.x.max(b.x) && p.y >= a.y.min(b.y) && p.y <= a.y.max(b.y)
}

/// `p`, known to be collinear with `a` and `b`, lies strictly between them
pub(crate) fn strictly_between(a: DVec2, b: DVec2, p: DVec2) -> bool {
    if a.x != b.x {
        (a.x < p.x && p.x < b.x) || (b.x < p.x && p.x < a.x)
    } else {
        (a.y < p.y && p.y < b.y) || (b.y < p.y && p.y < a.y)
    }
}

/// `p`, known to be collinear with `a` and `b`, lies beyond `b` when walking from `a`
pub(crate) fn beyond(a: DVec2, b: DVec2, p: DVec2) -> bool {
    if a.x != b.x {
        (a.x < b.x && p.x > b.x) || (a.x > b.x && p.x < b.x)
    } else {
        (a.y < b.y && p.y > b.y) || (a.y > b.y && p.y < b.y)
    }
}
