//! The interval-arithmetic cell-mapping propagator.
//!
//! For one attracting cycle and one refinement level, the local grid starts
//! with the periodic-point neighborhoods marked GRAY (possibly bounded) and
//! a "potentially white" marker is propagated to a fixed point: a GRAY cell
//! flips as soon as its rigorous image bounding box leaves the tracked
//! region or touches a cell already known to escape. Because a flip is
//! irreversible the update lattice is monotone, the fixed point is
//! independent of sweep order, and the loop terminates after at most
//! one flip per cell.
//!
//! Any cell still GRAY at the fixed point proves a bounded invariant set:
//! the cell-mapping renderer would classify interior (black) cells at this
//! level, which is exactly what the oracle predicts.

use tracing::{debug, info};

use crate::arena::WordArena;
use crate::config::RunConfig;
use crate::context::Context;
use crate::error::CoreError;
use crate::grid::{LocalGrid, ALL_POTW, WORD_SHIFT};
use crate::orbit::Root;
use crate::rect::{Frame, PlaneRect};

/// Find the smallest refinement level in `[config.level0, config.level1]`
/// at which at least one grid cell around `root`'s cycle survives the
/// propagation fixed point, i.e. the cycle is detectable.
///
/// Returns that level, or 0 when every level washes out. `root` is updated
/// in place: `interior_found`, the basin rectangle of the last tried level,
/// and the per-level screen ranges of its periodic points.
pub fn first_interior_level(
    ctx: &Context,
    root: &mut Root,
    config: &RunConfig,
) -> Result<u32, CoreError> {
    assert!(!root.cycle.is_empty(), "cannot analyze an empty cycle");
    let mut arena = WordArena::new();
    root.interior_found = 0;

    for level in config.level0..=config.level1 {
        let frame = Frame::new(level, ctx.radius);
        // Handles into the previous level's rows die with the arena reset;
        // the grid is rebuilt from scratch right after.
        arena.free_all();
        let mut grid = LocalGrid::build(
            &frame,
            &mut root.cycle,
            config.encw,
            config.start,
            &mut arena,
        )?;
        root.basin_rect = Some(grid.local_rect(&frame));

        let sweeps = propagate(ctx, &frame, &mut grid, &mut arena);

        if grid.any_gray(&arena) {
            info!(level, sweeps, cycle = root.cycle_number, "interior cells survive");
            root.interior_found = level;
            return Ok(level);
        }
        debug!(level, sweeps, cycle = root.cycle_number, "level washed out");
    }

    Ok(0)
}

/// Run the potentially-white propagation to its fixed point.
///
/// Sweep order is deterministic: rows ascending, words ascending, bits
/// 0..31. Returns the number of full sweeps (the last one is the clean
/// sweep that confirms convergence).
pub fn propagate(ctx: &Context, frame: &Frame, grid: &mut LocalGrid, arena: &mut WordArena) -> u32 {
    let local = grid.local_rect(frame);
    let complete = ctx.complete();
    let mut sweeps = 0u32;
    let mut changed = true;

    while changed {
        changed = false;
        sweeps += 1;

        for y in grid.enclosement.y0..=grid.enclosement.y1 {
            if !grid.row_flagged(y) {
                continue;
            }
            let mut gray_seen = false;
            let cell_y0 = frame.plane_coord(y);
            let cell_y1 = cell_y0 + frame.scale_rng;

            for m in grid.mem0..=grid.mem1 {
                let word = grid.word(arena, m, y);
                if word == ALL_POTW {
                    continue;
                }
                let mut updated = word;

                for bit in 0..32u32 {
                    if (word >> bit) & 1 == 1 {
                        continue;
                    }
                    gray_seen = true;

                    let x = (m << WORD_SHIFT) + bit as i64;
                    let cell_x0 = frame.plane_coord(x);
                    let cell = PlaneRect {
                        x0: cell_x0,
                        x1: cell_x0 + frame.scale_rng,
                        y0: cell_y0,
                        y1: cell_y1,
                    };
                    let image = ctx.bbox(&cell);

                    // Escape provable: the image pokes out of the tracked
                    // neighborhood or out of the global square. Both checks
                    // are needed — boxes from cells near the neighborhood
                    // border may leave `local` yet stay in the square.
                    if !local.contains(&image) || !complete.contains(&image) {
                        updated |= 1u32 << bit;
                        continue;
                    }

                    if image_touches_potw(grid, arena, frame, &image) {
                        updated |= 1u32 << bit;
                    }
                }

                if updated != word {
                    grid.set_word(arena, m, y, updated);
                    changed = true;
                }
            }

            if !gray_seen {
                grid.clear_row_flag(y);
            }
        }
    }

    sweeps
}

/// Does the image box intersect any potentially-white cell?
///
/// The box is mapped to pixels with the lower-left convention; pixels
/// outside the tracked union rectangle and unallocated rows count as
/// potentially white.
#[inline]
fn image_touches_potw(
    grid: &LocalGrid,
    arena: &WordArena,
    frame: &Frame,
    image: &PlaneRect,
) -> bool {
    let bx0 = frame.pixel_floor(image.x0);
    let bx1 = frame.pixel_floor(image.x1);
    let by0 = frame.pixel_floor(image.y0);
    let by1 = frame.pixel_floor(image.y1);
    for by in by0..=by1 {
        for bx in bx0..=bx1 {
            if grid.cell_is_potw(arena, bx, by) {
                return true;
            }
        }
    }
    false
}
