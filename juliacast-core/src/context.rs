use crate::complex::Complex;
use crate::map::{self, MapKind};
use crate::polynomial::Polynomial;
use crate::rect::PlaneRect;

/// Everything the evaluators and the propagator need about one run:
/// the selected map form, the iterated polynomial, the seed interval, the
/// fixed factor `A`, and the global square radius `R` from the Lagrange
/// bound. Built once per run and passed by reference; no hidden state.
///
/// The seed is carried as the interval `[c0,c1] × [c0,c1]` so that families
/// with uncertainty in `c` can be analyzed; the CLI collapses it to a point.
#[derive(Debug, Clone)]
pub struct Context {
    pub kind: MapKind,
    pub poly: Polynomial,
    pub c0: Complex,
    pub c1: Complex,
    pub factor_a: Complex,
    /// Half side length of the global square `[-R, R]²` containing the
    /// filled-in Julia set. Always a power of two.
    pub radius: f64,
}

impl Context {
    /// Context for a point seed (the common case).
    pub fn new(kind: MapKind, c: Complex, factor_a: Complex) -> Self {
        Self::with_seed_interval(kind, c, c, factor_a)
    }

    /// Context for an interval seed `[c0,c1] × [c0,c1]`; the iterated
    /// polynomial uses the lower endpoint.
    pub fn with_seed_interval(kind: MapKind, c0: Complex, c1: Complex, factor_a: Complex) -> Self {
        let mut poly = Polynomial::new();
        poly.set_coeff_re(kind.degree(), 1.0);
        if kind.uses_factor() {
            poly.set_coeff(1, factor_a);
        }
        poly.set_coeff(0, c0);
        let radius = poly.lagrange_radius();
        Self {
            kind,
            poly,
            c0,
            c1,
            factor_a,
            radius,
        }
    }

    /// Rigorous outward bounding box of the map's image of `a`.
    #[inline]
    pub fn bbox(&self, a: &PlaneRect) -> PlaneRect {
        match self.kind {
            MapKind::Z2C => map::bbox_z2c(a, self.c0, self.c1),
            MapKind::Z2AZC => map::bbox_z2azc(a, self.c0, self.c1, self.factor_a),
            MapKind::Z3AZC => map::bbox_z3azc(a, self.c0, self.c1, self.factor_a),
            MapKind::Z4AZC => map::bbox_z4azc(a, self.c0, self.c1, self.factor_a),
            MapKind::Z5AZC => map::bbox_z5azc(a, self.c0, self.c1, self.factor_a),
            MapKind::Z6AZC => map::bbox_z6azc(a, self.c0, self.c1, self.factor_a),
        }
    }

    /// The global square `[-R, R]²` as a rectangle.
    #[inline]
    pub fn complete(&self) -> PlaneRect {
        PlaneRect::new(-self.radius, self.radius, -self.radius, self.radius)
    }

    /// Squared escape radius `R²` for orbit iteration.
    #[inline]
    pub fn escape_radius_sq(&self) -> f64 {
        self.radius * self.radius
    }

    /// Parameter string for re-running the cell-mapping renderer on the same
    /// map, in its `key=value` argument convention.
    pub fn compute_command(&self) -> String {
        let name = self.kind.name().to_ascii_lowercase();
        if self.kind.uses_factor() {
            format!(
                "func={} c={},{} A={},{} cmd=period,-1",
                name, self.c0.re, self.c0.im, self.factor_a.re, self.factor_a.im
            )
        } else {
            format!("func={} c={},{} cmd=period,-1", name, self.c0.re, self.c0.im)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basilica_radius() {
        let ctx = Context::new(MapKind::Z2C, Complex::new(-1.0, 0.0), Complex::ZERO);
        assert_eq!(ctx.radius, 4.0);
        assert_eq!(ctx.escape_radius_sq(), 16.0);
        let sq = ctx.complete();
        assert_eq!(sq.x0, -4.0);
        assert_eq!(sq.y1, 4.0);
    }

    #[test]
    fn polynomial_matches_kind() {
        let a = Complex::new(0.25, -0.125);
        let c = Complex::new(0.1, 0.2);
        let ctx = Context::new(MapKind::Z3AZC, c, a);
        assert_eq!(ctx.poly.degree(), 3);
        // p(z) = z³ + A·z + c at z = 1+0i gives 1 + A + c.
        let v = ctx.poly.eval(Complex::ONE);
        let want = Complex::ONE + a + c;
        assert!((v - want).norm_sq() < 1e-24);
    }

    #[test]
    fn bbox_dispatch_encloses_orbit_step() {
        let ctx = Context::new(MapKind::Z2C, Complex::new(-1.0, 0.0), Complex::ZERO);
        // The cell around the fixed-ish point 0 maps near c = -1.
        let a = PlaneRect::new(-0.01, 0.01, -0.01, 0.01);
        let bb = ctx.bbox(&a);
        assert!(bb.x0 <= -1.0 && -1.0 <= bb.x1);
        assert!(bb.y0 <= 0.0 && 0.0 <= bb.y1);
    }

    #[test]
    fn compute_command_formats() {
        let ctx = Context::new(MapKind::Z2C, Complex::new(-1.0, 0.0), Complex::ZERO);
        assert_eq!(ctx.compute_command(), "func=z2c c=-1,0 cmd=period,-1");
        let ctx = Context::new(
            MapKind::Z4AZC,
            Complex::new(0.5, 0.0),
            Complex::new(0.25, 0.0),
        );
        assert_eq!(
            ctx.compute_command(),
            "func=z4azc c=0.5,0 A=0.25,0 cmd=period,-1"
        );
    }
}
