//! The supported polynomial map forms and their rigorous bounding-box
//! evaluators.
//!
//! Each evaluator returns an axis-aligned rectangle that encloses the true
//! image of the input rectangle under the map. The component functions are
//! expanded algebraically into real/imaginary monomials in `x0,x1,y0,y1` and
//! every monomial is bounded by min/max over the products of its factor
//! endpoints; lower bounds sum `min` terms, upper bounds sum `max` terms, and
//! the constant interval (the seed `c`, and the fixed factor `A` where
//! present) is added last. The bounds are pessimistic but never exclude a
//! point of the true image.
//!
//! Bounding even powers by their endpoint values requires that a rectangle
//! never straddles a coordinate axis. Grid cells satisfy this by
//! construction: the global square is centered on the origin and its side is
//! a power-of-two number of pixels, so 0 always falls on a cell edge.

use serde::{Deserialize, Serialize};

use crate::complex::Complex;
use crate::rect::PlaneRect;

/// The polynomial map variant: `z² + c` in its specialized form, or
/// `z^d + A·z + c` for degrees 2 through 6.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MapKind {
    Z2C,
    Z2AZC,
    Z3AZC,
    Z4AZC,
    Z5AZC,
    Z6AZC,
}

impl MapKind {
    pub const ALL: [MapKind; 6] = [
        MapKind::Z2C,
        MapKind::Z2AZC,
        MapKind::Z3AZC,
        MapKind::Z4AZC,
        MapKind::Z5AZC,
        MapKind::Z6AZC,
    ];

    /// Parse a case-insensitive variant name, e.g. `z3azc`.
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|k| k.name().eq_ignore_ascii_case(name))
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Z2C => "Z2C",
            Self::Z2AZC => "Z2AZC",
            Self::Z3AZC => "Z3AZC",
            Self::Z4AZC => "Z4AZC",
            Self::Z5AZC => "Z5AZC",
            Self::Z6AZC => "Z6AZC",
        }
    }

    /// Degree of the iterated polynomial.
    pub fn degree(self) -> usize {
        match self {
            Self::Z2C | Self::Z2AZC => 2,
            Self::Z3AZC => 3,
            Self::Z4AZC => 4,
            Self::Z5AZC => 5,
            Self::Z6AZC => 6,
        }
    }

    /// `true` for the `z^d + A·z + c` family, which consumes the factor `A`.
    pub fn uses_factor(self) -> bool {
        !matches!(self, Self::Z2C)
    }
}

impl std::fmt::Display for MapKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// Endpoint-product helpers
// ---------------------------------------------------------------------------

#[inline]
fn min4(a: f64, b: f64, c: f64, d: f64) -> f64 {
    a.min(b).min(c).min(d)
}

#[inline]
fn max4(a: f64, b: f64, c: f64, d: f64) -> f64 {
    a.max(b).max(c).max(d)
}

#[inline]
fn sq(v: f64) -> f64 {
    v * v
}

#[inline]
fn cube(v: f64) -> f64 {
    v * v * v
}

#[inline]
fn pow4(v: f64) -> f64 {
    sq(sq(v))
}

#[inline]
fn pow5(v: f64) -> f64 {
    pow4(v) * v
}

#[inline]
fn pow6(v: f64) -> f64 {
    sq(cube(v))
}

// ---------------------------------------------------------------------------
// z² + c
// ---------------------------------------------------------------------------

pub(crate) fn bbox_z2c(a: &PlaneRect, c0: Complex, c1: Complex) -> PlaneRect {
    let x2_lo = sq(a.x0).min(sq(a.x1));
    let x2_hi = sq(a.x0).max(sq(a.x1));
    let y2_lo = sq(a.y0).min(sq(a.y1));
    let y2_hi = sq(a.y0).max(sq(a.y1));
    let xy_lo = min4(a.x0 * a.y0, a.x0 * a.y1, a.x1 * a.y0, a.x1 * a.y1);
    let xy_hi = max4(a.x0 * a.y0, a.x0 * a.y1, a.x1 * a.y0, a.x1 * a.y1);

    PlaneRect {
        x0: x2_lo - y2_hi + c0.re,
        x1: x2_hi - y2_lo + c1.re,
        y0: 2.0 * xy_lo + c0.im,
        y1: 2.0 * xy_hi + c1.im,
    }
}

// ---------------------------------------------------------------------------
// z² + A·z + c
// ---------------------------------------------------------------------------

pub(crate) fn bbox_z2azc(a: &PlaneRect, c0: Complex, c1: Complex, fa: Complex) -> PlaneRect {
    let (ar, ai) = (fa.re, fa.im);
    let arx_lo = (ar * a.x0).min(ar * a.x1);
    let arx_hi = (ar * a.x0).max(ar * a.x1);
    let ary_lo = (ar * a.y0).min(ar * a.y1);
    let ary_hi = (ar * a.y0).max(ar * a.y1);
    let aix_lo = (ai * a.x0).min(ai * a.x1);
    let aix_hi = (ai * a.x0).max(ai * a.x1);
    let aiy_lo = (ai * a.y0).min(ai * a.y1);
    let aiy_hi = (ai * a.y0).max(ai * a.y1);

    let x2_lo = sq(a.x0).min(sq(a.x1));
    let x2_hi = sq(a.x0).max(sq(a.x1));
    let y2_lo = sq(a.y0).min(sq(a.y1));
    let y2_hi = sq(a.y0).max(sq(a.y1));
    let xy_lo = min4(a.x0 * a.y0, a.x0 * a.y1, a.x1 * a.y0, a.x1 * a.y1);
    let xy_hi = max4(a.x0 * a.y0, a.x0 * a.y1, a.x1 * a.y0, a.x1 * a.y1);

    PlaneRect {
        x0: c0.re + arx_lo + x2_lo - aiy_hi - y2_hi,
        x1: c1.re + arx_hi + x2_hi - aiy_lo - y2_lo,
        y0: c0.im + aix_lo + ary_lo + 2.0 * xy_lo,
        y1: c1.im + aix_hi + ary_hi + 2.0 * xy_hi,
    }
}

// ---------------------------------------------------------------------------
// z³ + A·z + c
// ---------------------------------------------------------------------------

pub(crate) fn bbox_z3azc(a: &PlaneRect, c0: Complex, c1: Complex, fa: Complex) -> PlaneRect {
    let (ar, ai) = (fa.re, fa.im);
    let arx_lo = (ar * a.x0).min(ar * a.x1);
    let arx_hi = (ar * a.x0).max(ar * a.x1);
    let ary_lo = (ar * a.y0).min(ar * a.y1);
    let ary_hi = (ar * a.y0).max(ar * a.y1);
    let aix_lo = (ai * a.x0).min(ai * a.x1);
    let aix_hi = (ai * a.x0).max(ai * a.x1);
    let aiy_lo = (ai * a.y0).min(ai * a.y1);
    let aiy_hi = (ai * a.y0).max(ai * a.y1);

    let x2_lo = sq(a.x0).min(sq(a.x1));
    let x2_hi = sq(a.x0).max(sq(a.x1));
    let y2_lo = sq(a.y0).min(sq(a.y1));
    let y2_hi = sq(a.y0).max(sq(a.y1));

    // x·y² and x²·y monomials.
    let xy2_lo = min4(a.x0 * y2_lo, a.x0 * y2_hi, a.x1 * y2_lo, a.x1 * y2_hi);
    let xy2_hi = max4(a.x0 * y2_lo, a.x0 * y2_hi, a.x1 * y2_lo, a.x1 * y2_hi);
    let x2y_lo = min4(x2_lo * a.y0, x2_lo * a.y1, x2_hi * a.y0, x2_hi * a.y1);
    let x2y_hi = max4(x2_lo * a.y0, x2_lo * a.y1, x2_hi * a.y0, x2_hi * a.y1);

    // Odd cubes are monotone, so the endpoint cubes bound them directly.
    PlaneRect {
        x0: arx_lo - aiy_hi + cube(a.x0) - 3.0 * xy2_hi + c0.re,
        x1: arx_hi - aiy_lo + cube(a.x1) - 3.0 * xy2_lo + c1.re,
        y0: ary_lo + aix_lo + 3.0 * x2y_lo - cube(a.y1) + c0.im,
        y1: ary_hi + aix_hi + 3.0 * x2y_hi - cube(a.y0) + c1.im,
    }
}

// ---------------------------------------------------------------------------
// z⁴ + A·z + c
// ---------------------------------------------------------------------------

pub(crate) fn bbox_z4azc(a: &PlaneRect, c0: Complex, c1: Complex, fa: Complex) -> PlaneRect {
    let (ar, ai) = (fa.re, fa.im);
    let arx_lo = (ar * a.x0).min(ar * a.x1);
    let arx_hi = (ar * a.x0).max(ar * a.x1);
    let ary_lo = (ar * a.y0).min(ar * a.y1);
    let ary_hi = (ar * a.y0).max(ar * a.y1);
    let aix_lo = (ai * a.x0).min(ai * a.x1);
    let aix_hi = (ai * a.x0).max(ai * a.x1);
    let aiy_lo = (ai * a.y0).min(ai * a.y1);
    let aiy_hi = (ai * a.y0).max(ai * a.y1);

    let x2_lo = sq(a.x0).min(sq(a.x1));
    let x2_hi = sq(a.x0).max(sq(a.x1));
    let y2_lo = sq(a.y0).min(sq(a.y1));
    let y2_hi = sq(a.y0).max(sq(a.y1));
    let x4_lo = pow4(a.x0).min(pow4(a.x1));
    let x4_hi = pow4(a.x0).max(pow4(a.x1));
    let y4_lo = pow4(a.y0).min(pow4(a.y1));
    let y4_hi = pow4(a.y0).max(pow4(a.y1));

    let x2y2_lo = min4(x2_lo * y2_lo, x2_lo * y2_hi, x2_hi * y2_lo, x2_hi * y2_hi);
    let x2y2_hi = max4(x2_lo * y2_lo, x2_lo * y2_hi, x2_hi * y2_lo, x2_hi * y2_hi);
    let x3y_lo = min4(
        cube(a.x0) * a.y0,
        cube(a.x0) * a.y1,
        cube(a.x1) * a.y0,
        cube(a.x1) * a.y1,
    );
    let x3y_hi = max4(
        cube(a.x0) * a.y0,
        cube(a.x0) * a.y1,
        cube(a.x1) * a.y0,
        cube(a.x1) * a.y1,
    );
    let xy3_lo = min4(
        a.x0 * cube(a.y0),
        a.x0 * cube(a.y1),
        a.x1 * cube(a.y0),
        a.x1 * cube(a.y1),
    );
    let xy3_hi = max4(
        a.x0 * cube(a.y0),
        a.x0 * cube(a.y1),
        a.x1 * cube(a.y0),
        a.x1 * cube(a.y1),
    );

    PlaneRect {
        x0: arx_lo - aiy_hi + x4_lo - 6.0 * x2y2_hi + y4_lo + c0.re,
        x1: arx_hi - aiy_lo + x4_hi - 6.0 * x2y2_lo + y4_hi + c1.re,
        y0: ary_lo + aix_lo + 4.0 * x3y_lo - 4.0 * xy3_hi + c0.im,
        y1: ary_hi + aix_hi + 4.0 * x3y_hi - 4.0 * xy3_lo + c1.im,
    }
}

// ---------------------------------------------------------------------------
// z⁵ + A·z + c
// ---------------------------------------------------------------------------

pub(crate) fn bbox_z5azc(a: &PlaneRect, c0: Complex, c1: Complex, fa: Complex) -> PlaneRect {
    let (ar, ai) = (fa.re, fa.im);
    let arx_lo = (ar * a.x0).min(ar * a.x1);
    let arx_hi = (ar * a.x0).max(ar * a.x1);
    let ary_lo = (ar * a.y0).min(ar * a.y1);
    let ary_hi = (ar * a.y0).max(ar * a.y1);
    let aix_lo = (ai * a.x0).min(ai * a.x1);
    let aix_hi = (ai * a.x0).max(ai * a.x1);
    let aiy_lo = (ai * a.y0).min(ai * a.y1);
    let aiy_hi = (ai * a.y0).max(ai * a.y1);

    let x2_lo = sq(a.x0).min(sq(a.x1));
    let x2_hi = sq(a.x0).max(sq(a.x1));
    let y2_lo = sq(a.y0).min(sq(a.y1));
    let y2_hi = sq(a.y0).max(sq(a.y1));
    let x4_lo = pow4(a.x0).min(pow4(a.x1));
    let x4_hi = pow4(a.x0).max(pow4(a.x1));
    let y4_lo = pow4(a.y0).min(pow4(a.y1));
    let y4_hi = pow4(a.y0).max(pow4(a.y1));

    let x3y2_lo = min4(
        cube(a.x0) * y2_lo,
        cube(a.x0) * y2_hi,
        cube(a.x1) * y2_lo,
        cube(a.x1) * y2_hi,
    );
    let x3y2_hi = max4(
        cube(a.x0) * y2_lo,
        cube(a.x0) * y2_hi,
        cube(a.x1) * y2_lo,
        cube(a.x1) * y2_hi,
    );
    let xy4_lo = min4(a.x0 * y4_lo, a.x0 * y4_hi, a.x1 * y4_lo, a.x1 * y4_hi);
    let xy4_hi = max4(a.x0 * y4_lo, a.x0 * y4_hi, a.x1 * y4_lo, a.x1 * y4_hi);
    let x4y_lo = min4(x4_lo * a.y0, x4_lo * a.y1, x4_hi * a.y0, x4_hi * a.y1);
    let x4y_hi = max4(x4_lo * a.y0, x4_lo * a.y1, x4_hi * a.y0, x4_hi * a.y1);
    let x2y3_lo = min4(
        x2_lo * cube(a.y0),
        x2_lo * cube(a.y1),
        x2_hi * cube(a.y0),
        x2_hi * cube(a.y1),
    );
    let x2y3_hi = max4(
        x2_lo * cube(a.y0),
        x2_lo * cube(a.y1),
        x2_hi * cube(a.y0),
        x2_hi * cube(a.y1),
    );

    PlaneRect {
        x0: arx_lo - aiy_hi + pow5(a.x0) - 10.0 * x3y2_hi + 5.0 * xy4_lo + c0.re,
        x1: arx_hi - aiy_lo + pow5(a.x1) - 10.0 * x3y2_lo + 5.0 * xy4_hi + c1.re,
        y0: ary_lo + aix_lo + 5.0 * x4y_lo - 10.0 * x2y3_hi + pow5(a.y0) + c0.im,
        y1: ary_hi + aix_hi + 5.0 * x4y_hi - 10.0 * x2y3_lo + pow5(a.y1) + c1.im,
    }
}

// ---------------------------------------------------------------------------
// z⁶ + A·z + c
// ---------------------------------------------------------------------------

pub(crate) fn bbox_z6azc(a: &PlaneRect, c0: Complex, c1: Complex, fa: Complex) -> PlaneRect {
    let (ar, ai) = (fa.re, fa.im);
    let arx_lo = (ar * a.x0).min(ar * a.x1);
    let arx_hi = (ar * a.x0).max(ar * a.x1);
    let ary_lo = (ar * a.y0).min(ar * a.y1);
    let ary_hi = (ar * a.y0).max(ar * a.y1);
    let aix_lo = (ai * a.x0).min(ai * a.x1);
    let aix_hi = (ai * a.x0).max(ai * a.x1);
    let aiy_lo = (ai * a.y0).min(ai * a.y1);
    let aiy_hi = (ai * a.y0).max(ai * a.y1);

    let x2_lo = sq(a.x0).min(sq(a.x1));
    let x2_hi = sq(a.x0).max(sq(a.x1));
    let y2_lo = sq(a.y0).min(sq(a.y1));
    let y2_hi = sq(a.y0).max(sq(a.y1));
    let x4_lo = pow4(a.x0).min(pow4(a.x1));
    let x4_hi = pow4(a.x0).max(pow4(a.x1));
    let y4_lo = pow4(a.y0).min(pow4(a.y1));
    let y4_hi = pow4(a.y0).max(pow4(a.y1));
    let x6_lo = pow6(a.x0).min(pow6(a.x1));
    let x6_hi = pow6(a.x0).max(pow6(a.x1));
    let y6_lo = pow6(a.y0).min(pow6(a.y1));
    let y6_hi = pow6(a.y0).max(pow6(a.y1));

    let x4y2_lo = min4(x4_lo * y2_lo, x4_lo * y2_hi, x4_hi * y2_lo, x4_hi * y2_hi);
    let x4y2_hi = max4(x4_lo * y2_lo, x4_lo * y2_hi, x4_hi * y2_lo, x4_hi * y2_hi);
    let x2y4_lo = min4(x2_lo * y4_lo, x2_lo * y4_hi, x2_hi * y4_lo, x2_hi * y4_hi);
    let x2y4_hi = max4(x2_lo * y4_lo, x2_lo * y4_hi, x2_hi * y4_lo, x2_hi * y4_hi);

    let x5y_lo = min4(
        pow5(a.x0) * a.y0,
        pow5(a.x0) * a.y1,
        pow5(a.x1) * a.y0,
        pow5(a.x1) * a.y1,
    );
    let x5y_hi = max4(
        pow5(a.x0) * a.y0,
        pow5(a.x0) * a.y1,
        pow5(a.x1) * a.y0,
        pow5(a.x1) * a.y1,
    );
    let x3y3_lo = min4(
        cube(a.x0) * cube(a.y0),
        cube(a.x0) * cube(a.y1),
        cube(a.x1) * cube(a.y0),
        cube(a.x1) * cube(a.y1),
    );
    let x3y3_hi = max4(
        cube(a.x0) * cube(a.y0),
        cube(a.x0) * cube(a.y1),
        cube(a.x1) * cube(a.y0),
        cube(a.x1) * cube(a.y1),
    );
    let xy5_lo = min4(
        a.x0 * pow5(a.y0),
        a.x0 * pow5(a.y1),
        a.x1 * pow5(a.y0),
        a.x1 * pow5(a.y1),
    );
    let xy5_hi = max4(
        a.x0 * pow5(a.y0),
        a.x0 * pow5(a.y1),
        a.x1 * pow5(a.y0),
        a.x1 * pow5(a.y1),
    );

    PlaneRect {
        x0: c0.re + arx_lo - aiy_hi + x6_lo - 15.0 * x4y2_hi + 15.0 * x2y4_lo - y6_hi,
        x1: c1.re + arx_hi - aiy_lo + x6_hi - 15.0 * x4y2_lo + 15.0 * x2y4_hi - y6_lo,
        y0: ary_lo + aix_lo + 6.0 * x5y_lo - 20.0 * x3y3_hi + 6.0 * xy5_lo + c0.im,
        y1: ary_hi + aix_hi + 6.0 * x5y_hi - 20.0 * x3y3_lo + 6.0 * xy5_hi + c1.im,
    }
}
