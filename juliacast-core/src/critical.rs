use tracing::debug;

use crate::complex::{Complex, ZERO_EPS};
use crate::context::Context;
use crate::error::CoreError;
use crate::polynomial::Polynomial;
use crate::MAX_ITERATIONS;

/// Hard cap on distinct critical points; exceeding it is a fatal error.
pub const MAX_ROOTS: usize = 1024;

/// Seeds per edge of the search square.
const SEEDS_PER_EDGE: i64 = 1024;

/// Newton iteration for a root of `f`, using `df` as its derivative.
///
/// Converges when two consecutive iterates differ by squared modulus below
/// [`ZERO_EPS`]; returns the root and the step count (≥ 1). `None` means no
/// convergence within the iteration budget — a seed that contributes
/// nothing. A zero derivative poisons the iterate with non-finite values,
/// which then simply never converges.
pub fn newton(f: &Polynomial, df: &Polynomial, seed: Complex) -> Option<(Complex, u32)> {
    let mut z = seed;
    for i in 1..MAX_ITERATIONS as u32 {
        let prev = z;
        z = z - f.eval(z) / df.eval(z);
        if (z - prev).norm_sq() < ZERO_EPS {
            return Some((z, i));
        }
    }
    None
}

/// Locate the roots of `p'` (the critical points of the iterated map).
///
/// Newton seeds walk the border of the square `[-3R, 3R]²` at a
/// 1024×1024 grid resolution — far enough out that every Newton channel to a
/// root is reachable (after Hubbard, Schleicher, Sutherland: how to find all
/// roots of complex polynomials by Newton's method). Edge order: left
/// (bottom to top), top, right (top to bottom), bottom. The walk stops as
/// soon as `deg(p')` distinct roots have been collected.
pub fn find_critical_points(ctx: &Context) -> Result<Vec<Complex>, CoreError> {
    let dp = ctx.poly.derivative();
    let ddp = dp.derivative();
    let target = dp.degree();

    let half = 3.0 * ctx.radius;
    let step = 2.0 * half / SEEDS_PER_EDGE as f64;

    let mut roots: Vec<Complex> = Vec::new();
    let n = SEEDS_PER_EDGE;

    let mut edges: [Box<dyn Iterator<Item = (i64, i64)>>; 4] = [
        Box::new((0..n).map(|y| (0, y))),
        Box::new((0..n).map(|x| (x, n - 1))),
        Box::new((0..n).rev().map(|y| (n - 1, y))),
        Box::new((0..n).rev().map(|x| (x, 0))),
    ];

    'walk: for edge in edges.iter_mut() {
        for (sx, sy) in edge {
            if roots.len() >= target {
                break 'walk;
            }
            let seed = Complex::new(sx as f64 * step - half, sy as f64 * step - half);
            let Some((root, steps)) = newton(&dp, &ddp, seed) else {
                continue;
            };
            if roots.iter().any(|r| r.approx_eq(root)) {
                continue;
            }
            if roots.len() >= MAX_ROOTS {
                return Err(CoreError::TooManyRoots);
            }
            debug!(%root, steps, "critical point found");
            roots.push(root);
        }
    }

    if roots.is_empty() {
        return Err(CoreError::NoCriticalPoints);
    }
    Ok(roots)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::MapKind;

    #[test]
    fn newton_residual_is_tiny() {
        // p = z² - 1, p' = 2z; roots ±1.
        let mut p = Polynomial::new();
        p.set_coeff_re(2, 1.0);
        p.set_coeff_re(0, -1.0);
        let dp = p.derivative();
        let (root, steps) = newton(&p, &dp, Complex::new(2.0, 0.5)).unwrap();
        assert!(steps > 0);
        assert!(p.eval(root).norm_sq() < ZERO_EPS);
    }

    #[test]
    fn newton_from_bad_seed_gives_up_quietly() {
        // f = z² + 1 from a real seed: iteration stays real and never
        // converges to the complex roots ±i.
        let mut p = Polynomial::new();
        p.set_coeff_re(2, 1.0);
        p.set_coeff_re(0, 1.0);
        let dp = p.derivative();
        assert!(newton(&p, &dp, Complex::new(0.7, 0.0)).is_none());
    }

    #[test]
    fn z2c_has_single_critical_point_at_origin() {
        let ctx = Context::new(MapKind::Z2C, Complex::new(-1.0, 0.0), Complex::ZERO);
        let cps = find_critical_points(&ctx).unwrap();
        assert_eq!(cps.len(), 1);
        assert!(cps[0].approx_eq(Complex::ZERO));
    }

    #[test]
    fn newton_residual_holds_for_found_critical_points() {
        let ctx = Context::new(MapKind::Z2C, Complex::new(0.285, 0.01), Complex::ZERO);
        let dp = ctx.poly.derivative();
        for cp in find_critical_points(&ctx).unwrap() {
            assert!(dp.eval(cp).norm_sq() < ZERO_EPS);
        }
    }

    #[test]
    fn cubic_map_critical_points() {
        // p = z³ + A·z + c with A = -0.75: p' = 3z² - 0.75 has the two
        // distinct roots ±0.5.
        let ctx = Context::new(
            MapKind::Z3AZC,
            Complex::new(0.1, 0.0),
            Complex::new(-0.75, 0.0),
        );
        let cps = find_critical_points(&ctx).unwrap();
        assert_eq!(cps.len(), 2);
        assert!(cps.iter().any(|c| c.approx_eq(Complex::new(0.5, 0.0))));
        assert!(cps.iter().any(|c| c.approx_eq(Complex::new(-0.5, 0.0))));
    }

    #[test]
    fn pure_cube_finds_degenerate_critical_point() {
        // p = z³: p' = 3z² has only the double root 0. Newton converges
        // linearly here, so different seeds may stop a hair apart and the
        // dedup can keep two copies — but everything found must sit at the
        // origin and the walk must terminate.
        let ctx = Context::new(MapKind::Z3AZC, Complex::ZERO, Complex::ZERO);
        let cps = find_critical_points(&ctx).unwrap();
        assert!(!cps.is_empty() && cps.len() <= 2);
        for cp in cps {
            assert!(cp.norm() < 1e-7, "critical point {cp} should be ~0");
        }
    }
}
