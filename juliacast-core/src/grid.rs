use serde::{Deserialize, Serialize};

use crate::arena::{RowSpan, WordArena};
use crate::error::CoreError;
use crate::orbit::PeriodicPoint;
use crate::rect::{Frame, PlaneRect, ScreenRect};

/// Cells per word as a shift: 32-bit words, one bit per cell.
pub const WORD_SHIFT: u32 = 5;

/// A word whose 32 cells are all GRAY (possibly bounded).
pub const ALL_GRAY: u32 = 0;

/// A word whose 32 cells are all potentially white (proven escaping).
pub const ALL_POTW: u32 = u32::MAX;

/// The mark every cell of a freshly allocated row starts with.
///
/// `Potw` analyzes only the stamped periodic-point neighborhoods; `Gray`
/// puts the whole enclosing rectangle up for analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellMark {
    Gray,
    Potw,
}

impl CellMark {
    #[inline]
    pub fn word(self) -> u32 {
        match self {
            Self::Gray => ALL_GRAY,
            Self::Potw => ALL_POTW,
        }
    }
}

/// The bit-packed tri-valued grid over the local rectangle enclosing one
/// cycle's periodic points at one refinement level.
///
/// Rows are sparse: only rows intersecting at least one periodic-point
/// neighborhood are materialized (each spanning the cycle's full word
/// range); everything else implicitly reads as potentially white. Word
/// storage lives in the [`WordArena`], so the grid holds handles, not
/// buffers, and must be rebuilt after `free_all`.
#[derive(Debug)]
pub struct LocalGrid {
    /// Union of the padded periodic-point rectangles, absolute pixels.
    pub enclosement: ScreenRect,
    /// Absolute word range covered by every allocated row.
    pub mem0: i64,
    pub mem1: i64,
    rows: Vec<Option<RowSpan>>,
    row_has_gray: Vec<bool>,
}

impl LocalGrid {
    /// Build the grid for one cycle: compute each periodic point's padded,
    /// clamped neighborhood rectangle (recording its word and row ranges on
    /// the point), allocate the union's rows initialized to `start`, and
    /// stamp every neighborhood rectangle GRAY.
    pub fn build(
        frame: &Frame,
        cycle: &mut [PeriodicPoint],
        encw: i64,
        start: CellMark,
        arena: &mut WordArena,
    ) -> Result<Self, CoreError> {
        let size = frame.size;
        let max_words = size >> WORD_SHIFT;
        let mut encl = ScreenRect {
            x0: size,
            x1: 0,
            y0: size,
            y1: 0,
        };

        for point in cycle.iter_mut() {
            let xx = frame.pixel_floor(point.pp.re);
            let yy = frame.pixel_floor(point.pp.im);
            let scr = ScreenRect {
                x0: (xx - encw).clamp(0, size - 1),
                x1: (xx + encw).clamp(0, size - 1),
                y0: (yy - encw).clamp(0, size - 1),
                y1: (yy + encw).clamp(0, size - 1),
            };
            encl.x0 = encl.x0.min(scr.x0);
            encl.x1 = encl.x1.max(scr.x1);
            encl.y0 = encl.y0.min(scr.y0);
            encl.y1 = encl.y1.max(scr.y1);

            point.mem0 = scr.x0 >> WORD_SHIFT;
            point.mem1 = scr.x1 >> WORD_SHIFT;
            debug_assert!(point.mem1 < max_words, "word index beyond the grid");
            point.y0 = scr.y0;
            point.y1 = scr.y1;
        }

        let mem0 = encl.x0 >> WORD_SHIFT;
        let mem1 = encl.x1 >> WORD_SHIFT;
        debug_assert!(mem1 < max_words, "union word range beyond the grid");

        let height = (encl.y1 - encl.y0 + 1) as usize;
        let width_words = (mem1 - mem0 + 1) as usize;

        // Rows worth materializing: those crossing any periodic-point
        // neighborhood. The rest stay implicitly potentially-white.
        let mut wanted = vec![false; height];
        for point in cycle.iter() {
            for y in point.y0..=point.y1 {
                wanted[(y - encl.y0) as usize] = true;
            }
        }

        let mut rows = Vec::with_capacity(height);
        for &w in &wanted {
            if w {
                let span = arena.alloc(width_words)?;
                arena.row_mut(span).fill(start.word());
                rows.push(Some(span));
            } else {
                rows.push(None);
            }
        }

        let grid = Self {
            enclosement: encl,
            mem0,
            mem1,
            rows,
            row_has_gray: wanted,
        };

        // Prime the propagation: the cells around every periodic point are
        // known bounded, whatever the start mark was.
        for point in cycle.iter() {
            for y in point.y0..=point.y1 {
                for m in point.mem0..=point.mem1 {
                    grid.set_word(arena, m, y, ALL_GRAY);
                }
            }
        }

        Ok(grid)
    }

    /// The complex rectangle corresponding to the enclosing screen
    /// rectangle; doubles as the cycle's basin rectangle.
    pub fn local_rect(&self, frame: &Frame) -> PlaneRect {
        PlaneRect {
            x0: frame.plane_coord(self.enclosement.x0),
            x1: frame.plane_coord(self.enclosement.x1 + 1),
            y0: frame.plane_coord(self.enclosement.y0),
            y1: frame.plane_coord(self.enclosement.y1 + 1),
        }
    }

    #[inline]
    fn row_index(&self, y: i64) -> Option<usize> {
        if y < self.enclosement.y0 || y > self.enclosement.y1 {
            None
        } else {
            Some((y - self.enclosement.y0) as usize)
        }
    }

    /// Word `m` of row `y` (absolute coordinates). Unallocated rows and
    /// positions outside the tracked ranges read as all potentially white.
    #[inline]
    pub fn word(&self, arena: &WordArena, m: i64, y: i64) -> u32 {
        let Some(idx) = self.row_index(y) else {
            return ALL_POTW;
        };
        match self.rows[idx] {
            Some(span) if m >= self.mem0 && m <= self.mem1 => {
                arena.row(span)[(m - self.mem0) as usize]
            }
            _ => ALL_POTW,
        }
    }

    /// Store word `m` of row `y`. Writing outside the allocated ranges is an
    /// implementation error and panics.
    #[inline]
    pub fn set_word(&self, arena: &mut WordArena, m: i64, y: i64, value: u32) {
        let idx = self
            .row_index(y)
            .unwrap_or_else(|| panic!("grid write outside row range: y={y}"));
        let span = self.rows[idx]
            .unwrap_or_else(|| panic!("grid write into unallocated row: y={y}"));
        assert!(
            m >= self.mem0 && m <= self.mem1,
            "grid write outside word range: m={m}"
        );
        arena.row_mut(span)[(m - self.mem0) as usize] = value;
    }

    /// The mark of the cell at pixel `(x, y)`: potentially white for
    /// anything outside the enclosing rectangle or on an unallocated row,
    /// otherwise the stored bit.
    #[inline]
    pub fn cell_is_potw(&self, arena: &WordArena, x: i64, y: i64) -> bool {
        if x < self.enclosement.x0
            || x > self.enclosement.x1
            || y < self.enclosement.y0
            || y > self.enclosement.y1
        {
            return true;
        }
        let word = self.word(arena, x >> WORD_SHIFT, y);
        (word >> (x & 31)) & 1 == 1
    }

    /// `true` while row `y` is still worth sweeping.
    #[inline]
    pub fn row_flagged(&self, y: i64) -> bool {
        self.row_index(y).map(|i| self.row_has_gray[i]).unwrap_or(false)
    }

    /// Drop row `y` from future sweeps (no GRAY cell left in it).
    #[inline]
    pub fn clear_row_flag(&mut self, y: i64) {
        if let Some(i) = self.row_index(y) {
            self.row_has_gray[i] = false;
        }
    }

    /// Post-fixed-point decision: does any allocated word still hold a GRAY
    /// cell? If so, interior cells provably exist at this level.
    pub fn any_gray(&self, arena: &WordArena) -> bool {
        self.rows
            .iter()
            .flatten()
            .any(|&span| arena.row(span).iter().any(|&w| w != ALL_POTW))
    }
}
