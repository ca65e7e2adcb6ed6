//! Human-readable run report, printed to the console and appended to the
//! run log so successive invocations accumulate in one file.

use std::fmt::Write as _;
use std::fs::OpenOptions;
use std::io::{self, Write as _};
use std::path::Path;

use juliacast_core::{Analysis, CellMark, RunConfig};

/// Format the whole report section for one run.
pub fn render(analysis: &Analysis, config: &RunConfig) -> String {
    let mut out = String::new();
    let ctx = &analysis.context;

    let _ = writeln!(out, "{}", ctx.poly);
    let _ = writeln!(out, "ENCW={} pixels", config.encw);
    match config.start {
        CellMark::Gray => {
            let _ = writeln!(
                out,
                "  per cycle: analyzing the whole rectangle around all periodic points"
            );
        }
        CellMark::Potw => {
            let _ = writeln!(
                out,
                "  per cycle: analyzing small neighbourhoods around the periodic points"
            );
        }
    }
    let _ = writeln!(
        out,
        "filled-in set is contained in the {:.0}-square",
        ctx.radius
    );

    for root in &analysis.roots {
        let _ = writeln!(out, "critical point: {}", root.attractor);
    }

    for root in &analysis.roots {
        if root.cycle.is_empty() {
            continue;
        }
        let _ = write!(
            out,
            "cycle #{} |multiplier|={:.5} len={}: ",
            root.cycle_number,
            root.multiplier,
            root.cycle.len()
        );
        for point in &root.cycle {
            let _ = write!(out, "{} -> ", point.pp);
        }
        match root.reentry(ctx) {
            Some(reentry) => {
                let _ = writeln!(out, "(reentering {reentry})");
            }
            None => {
                let _ = writeln!(out);
            }
        }
    }

    for root in &analysis.roots {
        if root.cycle.is_empty() || !config.period_selected(root.cycle.len()) {
            continue;
        }
        let _ = writeln!(
            out,
            "\nanalyzing cycle #{} (period {}):",
            root.cycle_number,
            root.cycle.len()
        );
        if root.interior_found > 0 {
            let _ = writeln!(
                out,
                "  black present at refinement level {}",
                root.interior_found
            );
            let _ = writeln!(
                out,
                "  compute this and all cycles emerging up to here from scratch with:"
            );
            let _ = writeln!(
                out,
                "    juliatsacore_d range={:.0} len={} {}",
                ctx.radius,
                root.interior_found,
                ctx.compute_command()
            );
            if root.interior_found > 12 {
                let _ = writeln!(
                    out,
                    "  (level-by-level computation reusing lower levels is recommended for speed)"
                );
            }
        } else {
            let _ = writeln!(
                out,
                "  NO black found in levels {}..{} at the current parameters",
                config.level0, config.level1
            );
        }
    }

    if analysis.overlapping {
        let _ = writeln!(
            out,
            "\nCAVE: enclosures of periodic points of different cycles overlap."
        );
        let _ = writeln!(
            out,
            "  Black detected for a specific cycle might actually belong to a different one."
        );
    }

    let _ = writeln!(out, "\n{} sec duration", analysis.elapsed.as_secs());
    out
}

/// Append one report section to the run log, separated from earlier runs.
pub fn append_to_log(path: &Path, section: &str) -> io::Result<()> {
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    writeln!(file, "\n-----------------")?;
    file.write_all(section.as_bytes())?;
    file.flush()
}
