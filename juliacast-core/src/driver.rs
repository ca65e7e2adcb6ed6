use std::time::{Duration, Instant};

use tracing::{debug, info};

use crate::config::RunConfig;
use crate::context::Context;
use crate::critical::find_critical_points;
use crate::error::CoreError;
use crate::orbit::{classify_critical_orbits, Root};
use crate::propagator::first_interior_level;

/// The complete outcome of one run.
#[derive(Debug)]
pub struct Analysis {
    /// The map context the run was performed against.
    pub context: Context,
    /// One entry per discovered critical point; entries with a nonempty
    /// cycle carry the detection verdict.
    pub roots: Vec<Root>,
    /// Advisory: the basin rectangles of two detected cycles overlap, so
    /// interior found for one cycle may actually belong to the other.
    pub overlapping: bool,
    pub elapsed: Duration,
}

/// Run the whole pipeline: Lagrange bound → critical points → orbit
/// classification → per-cycle cell mapping → overlap advisory.
pub fn analyze(config: &RunConfig) -> Result<Analysis, CoreError> {
    let start = Instant::now();

    let ctx = Context::new(config.kind, config.c, config.factor_a);
    info!(kind = %ctx.kind, radius = ctx.radius, "global square fixed");

    let criticals = find_critical_points(&ctx)?;
    info!(count = criticals.len(), "critical points located");

    let mut roots = classify_critical_orbits(&ctx, &criticals)?;

    for root in roots.iter_mut() {
        if root.cycle.is_empty() {
            continue;
        }
        if !config.period_selected(root.cycle.len()) {
            debug!(
                cycle = root.cycle_number,
                period = root.cycle.len(),
                "skipped by periods filter"
            );
            continue;
        }
        info!(
            cycle = root.cycle_number,
            period = root.cycle.len(),
            multiplier = root.multiplier,
            "analyzing cycle"
        );
        first_interior_level(&ctx, root, config)?;
    }

    let overlapping = basins_overlap(&roots);

    Ok(Analysis {
        context: ctx,
        roots,
        overlapping,
        elapsed: start.elapsed(),
    })
}

/// Do the basin rectangles of two distinct detected cycles overlap?
fn basins_overlap(roots: &[Root]) -> bool {
    for (i, a) in roots.iter().enumerate() {
        if a.cycle.is_empty() || a.interior_found == 0 {
            continue;
        }
        for (k, b) in roots.iter().enumerate() {
            if i == k || b.cycle.is_empty() || b.interior_found == 0 {
                continue;
            }
            if let (Some(ra), Some(rb)) = (a.basin_rect, b.basin_rect) {
                if ra.intersects(&rb) {
                    return true;
                }
            }
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::complex::Complex;
    use crate::map::MapKind;
    use crate::orbit::PeriodicPoint;
    use crate::rect::PlaneRect;

    #[test]
    fn basilica_end_to_end() {
        let config = RunConfig::new(MapKind::Z2C)
            .with_seed(-1.0, 0.0)
            .with_levels(10, 12);
        let analysis = analyze(&config).unwrap();
        assert_eq!(analysis.roots.len(), 1);
        let root = &analysis.roots[0];
        assert_eq!(root.cycle.len(), 2);
        assert_eq!(root.interior_found, 10);
        assert!(!analysis.overlapping, "a single cycle cannot overlap");
    }

    #[test]
    fn periods_filter_skips_analysis() {
        let config = RunConfig::new(MapKind::Z2C)
            .with_seed(-1.0, 0.0)
            .with_levels(10, 10)
            .with_periods(3, 5);
        let analysis = analyze(&config).unwrap();
        // The period-2 cycle exists but was never propagated.
        let root = &analysis.roots[0];
        assert_eq!(root.cycle.len(), 2);
        assert_eq!(root.interior_found, 0);
        assert!(root.basin_rect.is_none());
    }

    fn detected_root(x: f64, rect: PlaneRect) -> Root {
        let mut r = Root::new(Complex::new(x, 0.0));
        r.cycle = vec![PeriodicPoint::new(Complex::new(x, 0.0))];
        r.interior_found = 10;
        r.basin_rect = Some(rect);
        r
    }

    #[test]
    fn overlap_detection_on_synthetic_roots() {
        let a = detected_root(0.0, PlaneRect::new(-1.0, 1.0, -1.0, 1.0));
        let b = detected_root(0.5, PlaneRect::new(0.5, 2.0, 0.5, 2.0));
        let c = detected_root(3.0, PlaneRect::new(2.5, 3.5, 2.5, 3.5));

        assert!(basins_overlap(&[a.clone(), b.clone()]));
        assert!(!basins_overlap(&[a.clone(), c.clone()]));

        // Cycles without detection never participate.
        let mut undetected = b.clone();
        undetected.interior_found = 0;
        assert!(!basins_overlap(&[a, undetected]));
    }
}
