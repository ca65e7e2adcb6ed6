use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle on the complex plane, `x0 ≤ x1`, `y0 ≤ y1`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlaneRect {
    pub x0: f64,
    pub x1: f64,
    pub y0: f64,
    pub y1: f64,
}

impl PlaneRect {
    pub fn new(x0: f64, x1: f64, y0: f64, y1: f64) -> Self {
        Self { x0, x1, y0, y1 }
    }

    /// `true` when `other` lies entirely inside `self` (closed intervals).
    #[inline]
    pub fn contains(&self, other: &PlaneRect) -> bool {
        self.x0 <= other.x0 && other.x1 <= self.x1 && self.y0 <= other.y0 && other.y1 <= self.y1
    }

    /// Standard 2-D AABB overlap test.
    #[inline]
    pub fn intersects(&self, other: &PlaneRect) -> bool {
        !(self.x1 < other.x0 || self.x0 > other.x1 || self.y1 < other.y0 || self.y0 > other.y1)
    }
}

/// The integer-pixel counterpart of [`PlaneRect`] at one refinement level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenRect {
    pub x0: i64,
    pub x1: i64,
    pub y0: i64,
    pub y1: i64,
}

/// Geometry of one refinement level over the global square `[-R, R]²`.
///
/// The grid is `2^level` pixels wide; `scale_rng` is the complex-plane extent
/// of one pixel and `scale_pix` its reciprocal per unit length.
#[derive(Debug, Clone, Copy)]
pub struct Frame {
    pub level: u32,
    /// Grid side length in pixels, `2^level`.
    pub size: i64,
    /// Half side length of the global square.
    pub radius: f64,
    /// Complex-plane units per pixel.
    pub scale_rng: f64,
    /// Pixels per complex-plane unit.
    pub scale_pix: f64,
}

impl Frame {
    pub fn new(level: u32, radius: f64) -> Self {
        let size = 1i64 << level;
        let span = 2.0 * radius;
        Self {
            level,
            size,
            radius,
            scale_rng: span / size as f64,
            scale_pix: size as f64 / span,
        }
    }

    /// Screen coordinate of the pixel containing the plane coordinate `v`.
    ///
    /// A coordinate lying on an edge or corner (and hence belonging to more
    /// than one pixel) is assigned to the pixel whose left/bottom edge it
    /// lies on.
    #[inline]
    pub fn pixel_floor(&self, v: f64) -> i64 {
        ((v + self.radius) * self.scale_pix).floor() as i64
    }

    /// Plane coordinate of the lower-left corner of pixel `i`.
    #[inline]
    pub fn plane_coord(&self, i: i64) -> f64 {
        i as f64 * self.scale_rng - self.radius
    }

    /// The complex rectangle covered by one pixel.
    #[inline]
    pub fn cell_rect(&self, x: i64, y: i64) -> PlaneRect {
        let x0 = self.plane_coord(x);
        let y0 = self.plane_coord(y);
        PlaneRect::new(x0, x0 + self.scale_rng, y0, y0 + self.scale_rng)
    }
}
