use tracing::debug;

use crate::complex::Complex;
use crate::context::Context;
use crate::error::CoreError;
use crate::rect::PlaneRect;
use crate::MAX_ITERATIONS;

/// A repelling cycle has multiplier magnitude above this (small slack keeps
/// numerically neutral cycles).
pub const MULTIPLIER_SLACK: f64 = 1.00001;

/// One point of an attracting cycle, together with its screen-space
/// neighborhood ranges at the refinement level currently under analysis.
///
/// `mem0..=mem1` is the horizontal range in 32-cell words, `y0..=y1` the
/// vertical pixel range; both are recomputed by the grid builder per level.
#[derive(Debug, Clone, Copy)]
pub struct PeriodicPoint {
    pub pp: Complex,
    pub mem0: i64,
    pub mem1: i64,
    pub y0: i64,
    pub y1: i64,
}

impl PeriodicPoint {
    pub fn new(pp: Complex) -> Self {
        Self {
            pp,
            mem0: 0,
            mem1: 0,
            y0: 0,
            y1: 0,
        }
    }
}

/// One discovered critical point and, if its forward orbit is bounded and
/// closes into a fresh attracting (or neutral) cycle, that cycle.
///
/// `cycle` is ordered along the orbit; the closing edge back to the first
/// point is implicit. An empty cycle means the critical point was discarded
/// (escaping, non-closing, duplicate, or repelling).
#[derive(Debug, Clone)]
pub struct Root {
    pub attractor: Complex,
    pub cycle: Vec<PeriodicPoint>,
    /// `|Π p'(z_k)|` over the cycle; 0 until classified.
    pub multiplier: f64,
    /// 1-based number among extracted cycles; 0 if none.
    pub cycle_number: u32,
    /// Complex rectangle of the analyzed neighborhood at the last tried
    /// refinement level; used for the cross-cycle overlap advisory.
    pub basin_rect: Option<PlaneRect>,
    /// Smallest refinement level at which interior cells were proven, or 0.
    pub interior_found: u32,
}

impl Root {
    pub fn new(attractor: Complex) -> Self {
        Self {
            attractor,
            cycle: Vec::new(),
            multiplier: 0.0,
            cycle_number: 0,
            basin_rect: None,
            interior_found: 0,
        }
    }

    /// The point the cycle re-enters after its last member (for reports).
    pub fn reentry(&self, ctx: &Context) -> Option<Complex> {
        self.cycle.last().map(|p| ctx.poly.eval(p.pp))
    }
}

/// Classify the forward orbit of every critical point.
///
/// Each orbit is iterated up to [`MAX_ITERATIONS`]; escaping the global
/// square discards the critical point. A bounded orbit is scanned backward
/// for the first earlier point coinciding with its last one — the tail
/// between them is the cycle. Cycles already claimed by an earlier critical
/// point are dropped, and repelling cycles are zeroed out after numbering.
///
/// Returns the root table, or [`CoreError::NoCriticalOrbits`] when not a
/// single bounded periodic orbit was found.
pub fn classify_critical_orbits(
    ctx: &Context,
    criticals: &[Complex],
) -> Result<Vec<Root>, CoreError> {
    let escape_sq = ctx.escape_radius_sq();
    let deriv = ctx.poly.derivative();
    let mut roots: Vec<Root> = criticals.iter().copied().map(Root::new).collect();
    let mut cycle_number = 1u32;
    let mut found = 0usize;
    let mut orbit: Vec<Complex> = Vec::with_capacity(MAX_ITERATIONS);

    for idx in 0..roots.len() {
        orbit.clear();
        let mut z = roots[idx].attractor;
        let mut escaped = false;
        for _ in 0..MAX_ITERATIONS {
            orbit.push(z);
            if z.norm_sq() > escape_sq {
                escaped = true;
                break;
            }
            z = ctx.poly.eval(z);
        }
        if escaped {
            debug!(critical = %roots[idx].attractor, "orbit escapes");
            continue;
        }

        let last = orbit[orbit.len() - 1];
        let Some(start) = (0..orbit.len() - 1).rev().find(|&i| orbit[i].approx_eq(last)) else {
            // Bounded but did not close within the iteration budget.
            debug!(critical = %roots[idx].attractor, "orbit did not close");
            continue;
        };

        // An earlier critical point may already have claimed this cycle.
        let duplicate = roots[..idx]
            .iter()
            .any(|r| r.cycle.iter().any(|p| p.pp.approx_eq(last)));
        if duplicate {
            debug!(critical = %roots[idx].attractor, "cycle already claimed");
            continue;
        }

        let points: Vec<PeriodicPoint> = orbit[start + 1..]
            .iter()
            .copied()
            .map(PeriodicPoint::new)
            .collect();
        let mut multiplier = Complex::ONE;
        for p in &points {
            multiplier = multiplier * deriv.eval(p.pp);
        }

        let root = &mut roots[idx];
        root.cycle = points;
        root.multiplier = multiplier.norm();
        root.cycle_number = cycle_number;
        cycle_number += 1;

        if root.multiplier > MULTIPLIER_SLACK {
            // Repelling: keep the numbering, drop the cycle from analysis.
            debug!(
                cycle = root.cycle_number,
                multiplier = root.multiplier,
                "repelling cycle discarded"
            );
            root.cycle.clear();
            root.interior_found = 0;
        } else {
            debug!(
                cycle = root.cycle_number,
                period = root.cycle.len(),
                multiplier = root.multiplier,
                "cycle accepted"
            );
        }
        found += 1;
    }

    if found == 0 {
        return Err(CoreError::NoCriticalOrbits);
    }
    Ok(roots)
}
