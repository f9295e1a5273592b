//! Robust orientation and in-circle predicates
//!
//! Both predicates first evaluate the determinant in `f64` and accept the sign
//! whenever it clears a forward error bound (Shewchuk's stage-A bounds). Inputs
//! that land inside the bound are recomputed exactly with `rug::Rational`, so the
//! returned sign is always the sign of the exact determinant of the given
//! floating-point coordinates.

use std::cmp::Ordering;

use glam::DVec2;
use rug::Rational;

/// Half an ulp of 1.0
const EPSILON: f64 = f64::EPSILON * 0.5;

/// Error bound for the filtered orientation determinant
const ORIENT_ERRBOUND: f64 = (3.0 + 16.0 * EPSILON) * EPSILON;

/// Error bound for the filtered in-circle determinant
const INCIRCLE_ERRBOUND: f64 = (10.0 + 96.0 * EPSILON) * EPSILON;

/// Below this magnitude products may have underflowed and the bounds above
/// no longer hold
const UNDERFLOW_GUARD: f64 = f64::MIN_POSITIVE / f64::EPSILON;

/// Side of the directed line `a -> b` on which a point lies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Orientation {
    /// Counter-clockwise turn
    Left,
    /// Clockwise turn
    Right,
    /// Exactly on the line
    Collinear,
}

impl Orientation {
    fn from_sign(sign: Ordering) -> Self {
        match sign {
            Ordering::Greater => Orientation::Left,
            Ordering::Less => Orientation::Right,
            Ordering::Equal => Orientation::Collinear,
        }
    }

    /// True for a strict counter-clockwise turn
    #[inline]
    pub fn is_left(self) -> bool {
        self == Orientation::Left
    }

    /// True for a strict clockwise turn
    #[inline]
    pub fn is_right(self) -> bool {
        self == Orientation::Right
    }

    /// True when the three points are exactly collinear
    #[inline]
    pub fn is_collinear(self) -> bool {
        self == Orientation::Collinear
    }
}

/// Position of a point relative to the circle through three CCW points
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CirclePosition {
    Inside,
    On,
    Outside,
}

/// Orientation of the triple `(a, b, c)`
///
/// `Left` means `c` lies strictly to the left of the directed line `a -> b`.
///
/// # Example
///
/// ```rust
/// use largest_empty_circle::geometry::{orient2d, Orientation};
/// use glam::DVec2;
///
/// let o = orient2d(DVec2::ZERO, DVec2::X, DVec2::Y);
/// assert_eq!(o, Orientation::Left);
/// ```
pub fn orient2d(a: DVec2, b: DVec2, c: DVec2) -> Orientation {
    let det_left = (a.x - c.x) * (b.y - c.y);
    let det_right = (a.y - c.y) * (b.x - c.x);
    let det = det_left - det_right;
    let det_sum = det_left.abs() + det_right.abs();

    if det_sum >= UNDERFLOW_GUARD && det.abs() > ORIENT_ERRBOUND * det_sum {
        return Orientation::from_sign(sign_of(det));
    }

    Orientation::from_sign(orient2d_exact(a, b, c))
}

/// Position of `d` relative to the circumcircle of the CCW triangle `(a, b, c)`
///
/// The answer is reversed if `(a, b, c)` is clockwise.
pub fn in_circle(a: DVec2, b: DVec2, c: DVec2, d: DVec2) -> CirclePosition {
    let adx = a.x - d.x;
    let ady = a.y - d.y;
    let bdx = b.x - d.x;
    let bdy = b.y - d.y;
    let cdx = c.x - d.x;
    let cdy = c.y - d.y;

    let bdxcdy = bdx * cdy;
    let cdxbdy = cdx * bdy;
    let alift = adx * adx + ady * ady;

    let cdxady = cdx * ady;
    let adxcdy = adx * cdy;
    let blift = bdx * bdx + bdy * bdy;

    let adxbdy = adx * bdy;
    let bdxady = bdx * ady;
    let clift = cdx * cdx + cdy * cdy;

    let det = alift * (bdxcdy - cdxbdy) + blift * (cdxady - adxcdy) + clift * (adxbdy - bdxady);
    let permanent = (bdxcdy.abs() + cdxbdy.abs()) * alift
        + (cdxady.abs() + adxcdy.abs()) * blift
        + (adxbdy.abs() + bdxady.abs()) * clift;

    let sign = if permanent >= UNDERFLOW_GUARD && det.abs() > INCIRCLE_ERRBOUND * permanent {
        sign_of(det)
    } else {
        in_circle_exact(a, b, c, d)
    };

    match sign {
        Ordering::Greater => CirclePosition::Inside,
        Ordering::Less => CirclePosition::Outside,
        Ordering::Equal => CirclePosition::On,
    }
}

#[inline]
fn sign_of(value: f64) -> Ordering {
    if value > 0.0 {
        Ordering::Greater
    } else if value < 0.0 {
        Ordering::Less
    } else {
        Ordering::Equal
    }
}

/// Exact rational image of a finite double
#[inline]
fn exact(value: f64) -> Rational {
    Rational::from_f64(value).unwrap_or_default()
}

fn orient2d_exact(a: DVec2, b: DVec2, c: DVec2) -> Ordering {
    let acx = exact(a.x) - exact(c.x);
    let acy = exact(a.y) - exact(c.y);
    let bcx = exact(b.x) - exact(c.x);
    let bcy = exact(b.y) - exact(c.y);

    let det = acx * &bcy - acy * &bcx;
    det.cmp0()
}

fn in_circle_exact(a: DVec2, b: DVec2, c: DVec2, d: DVec2) -> Ordering {
    let adx = exact(a.x) - exact(d.x);
    let ady = exact(a.y) - exact(d.y);
    let bdx = exact(b.x) - exact(d.x);
    let bdy = exact(b.y) - exact(d.y);
    let cdx = exact(c.x) - exact(d.x);
    let cdy = exact(c.y) - exact(d.y);

    let alift = adx.clone() * &adx + ady.clone() * &ady;
    let blift = bdx.clone() * &bdx + bdy.clone() * &bdy;
    let clift = cdx.clone() * &cdx + cdy.clone() * &cdy;

    let bc = bdx.clone() * &cdy - cdx.clone() * &bdy;
    let ca = cdx * &ady - adx.clone() * &cdy;
    let ab = adx * &bdy - bdx * &ady;

    let det = alift * &bc + blift * &ca + clift * &ab;
    det.cmp0()
}
