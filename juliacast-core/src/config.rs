use serde::{Deserialize, Serialize};

use crate::complex::Complex;
use crate::grid::CellMark;
use crate::map::MapKind;

/// Seed components are quantized to this denominator (2²⁵) so that a run is
/// reproducible from the printed parameters, whatever the caller typed.
pub const SEED_DENOM: f64 = (1u64 << 25) as f64;

/// Refinement level bounds.
pub const LEVEL_MIN: u32 = 8;
pub const LEVEL_MAX: u32 = 31;

/// Neighborhood half-width defaults and floor, in pixels.
pub const ENCW_DEFAULT: i64 = 128;
pub const ENCW_MIN: i64 = 32;

/// Quantize one seed component: `floor(v · 2²⁵) / 2²⁵`. Idempotent.
#[inline]
pub fn quantize(v: f64) -> f64 {
    (v * SEED_DENOM).floor() / SEED_DENOM
}

/// Validated parameters of one analysis run.
///
/// Constructed through the builder methods, which quantize the seeds and
/// clamp levels and neighborhood width to their legal ranges.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RunConfig {
    pub kind: MapKind,
    /// Seed `c`, quantized.
    pub c: Complex,
    /// Factor `A` of the `z^d + A·z + c` forms, quantized.
    pub factor_a: Complex,
    /// Neighborhood half-width in pixels (always the magnitude, ≥ 32).
    pub encw: i64,
    /// Initial mark of unstamped cells; [`CellMark::Gray`] analyzes the
    /// whole enclosing rectangle.
    pub start: CellMark,
    pub level0: u32,
    pub level1: u32,
    /// Analyze only cycles whose length falls in this inclusive range.
    pub periods: Option<(usize, usize)>,
}

impl RunConfig {
    pub fn new(kind: MapKind) -> Self {
        Self {
            kind,
            c: Complex::new(quantize(-1.0), quantize(0.0)),
            factor_a: Complex::ZERO,
            encw: ENCW_DEFAULT,
            start: CellMark::Potw,
            level0: 10,
            level1: 24,
            periods: None,
        }
    }

    pub fn with_seed(mut self, re: f64, im: f64) -> Self {
        self.c = Complex::new(quantize(re), quantize(im));
        self
    }

    pub fn with_factor(mut self, re: f64, im: f64) -> Self {
        self.factor_a = Complex::new(quantize(re), quantize(im));
        self
    }

    /// Set the neighborhood half-width. A negative value selects the
    /// start-GRAY whole-rectangle mode with the magnitude as width; the
    /// magnitude is floored at [`ENCW_MIN`].
    pub fn with_encw(mut self, encw: i64) -> Self {
        self.start = if encw < 0 {
            CellMark::Gray
        } else {
            CellMark::Potw
        };
        self.encw = encw.abs().max(ENCW_MIN);
        self
    }

    /// Set the refinement range; the lower bound is floored at
    /// [`LEVEL_MIN`], the upper capped at [`LEVEL_MAX`].
    pub fn with_levels(mut self, level0: u32, level1: u32) -> Self {
        self.level0 = level0.max(LEVEL_MIN);
        self.level1 = level1.min(LEVEL_MAX);
        self
    }

    pub fn with_periods(mut self, lo: usize, hi: usize) -> Self {
        self.periods = Some((lo, hi));
        self
    }

    /// Does a cycle of this length pass the periods filter?
    pub fn period_selected(&self, len: usize) -> bool {
        match self.periods {
            Some((lo, hi)) => lo <= len && len <= hi,
            None => true,
        }
    }
}

impl Default for RunConfig {
    fn default() -> Self {
        Self::new(MapKind::Z2C)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quantization_is_idempotent() {
        for &v in &[-1.0, 0.0, 0.285, 0.01, -0.7456, 1.999999, -2.0] {
            let q = quantize(v);
            assert_eq!(quantize(q), q, "quantizing {v} twice must be stable");
        }
    }

    #[test]
    fn quantization_of_exact_dyadics_is_identity() {
        assert_eq!(quantize(-1.0), -1.0);
        assert_eq!(quantize(0.0), 0.0);
        assert_eq!(quantize(0.5), 0.5);
        assert_eq!(quantize(-0.25), -0.25);
    }

    #[test]
    fn quantization_rounds_down() {
        let q = quantize(0.285);
        assert!(q <= 0.285);
        assert!(0.285 - q < 1.0 / SEED_DENOM);
    }

    #[test]
    fn negative_encw_flips_start_mark() {
        let cfg = RunConfig::default().with_encw(-64);
        assert_eq!(cfg.start, CellMark::Gray);
        assert_eq!(cfg.encw, 64);

        let cfg = RunConfig::default().with_encw(128);
        assert_eq!(cfg.start, CellMark::Potw);
        assert_eq!(cfg.encw, 128);
    }

    #[test]
    fn encw_magnitude_is_floored() {
        assert_eq!(RunConfig::default().with_encw(5).encw, ENCW_MIN);
        let cfg = RunConfig::default().with_encw(-5);
        assert_eq!(cfg.encw, ENCW_MIN);
        assert_eq!(cfg.start, CellMark::Gray);
    }

    #[test]
    fn levels_are_clamped_one_sided() {
        let cfg = RunConfig::default().with_levels(2, 40);
        assert_eq!(cfg.level0, LEVEL_MIN);
        assert_eq!(cfg.level1, LEVEL_MAX);
        // In-range values pass through untouched.
        let cfg = RunConfig::default().with_levels(10, 12);
        assert_eq!((cfg.level0, cfg.level1), (10, 12));
    }

    #[test]
    fn period_filter() {
        let cfg = RunConfig::default().with_periods(2, 4);
        assert!(!cfg.period_selected(1));
        assert!(cfg.period_selected(2));
        assert!(cfg.period_selected(4));
        assert!(!cfg.period_selected(5));
        assert!(RunConfig::default().period_selected(17));
    }
}
