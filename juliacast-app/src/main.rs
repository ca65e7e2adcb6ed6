mod report;

use std::path::PathBuf;
use std::process;

use clap::Parser;
use tracing::error;

use juliacast_core::{analyze, MapKind, RunConfig};

/// Predict the grid refinement level at which the rigorous cell-mapping
/// algorithm starts detecting interior cells for an attracting cycle of
/// `p(z) = z^d + A·z + c`.
#[derive(Parser, Debug)]
#[command(name = "juliacast", version, about)]
struct Cli {
    /// Map form: z2c, z2azc, z3azc, z4azc, z5azc or z6azc.
    #[arg(long, default_value = "z2c", value_parser = parse_kind)]
    func: MapKind,

    /// Seed c as "re,im"; components are quantized to 2^-25 steps.
    #[arg(long, default_value = "-1,0", value_parser = parse_pair, allow_hyphen_values = true)]
    c: (f64, f64),

    /// Factor A as "re,im" (ignored by z2c), quantized like the seed.
    #[arg(long, default_value = "0,0", value_parser = parse_pair, allow_hyphen_values = true)]
    a: (f64, f64),

    /// Neighborhood half-width in pixels around each periodic point.
    /// Negative: analyze the whole enclosing rectangle (start all-GRAY).
    #[arg(long, default_value_t = 128, allow_hyphen_values = true)]
    encw: i64,

    /// Refinement level range "lo,hi", clamped to 8..=31.
    #[arg(long, default_value = "10,24", value_parser = parse_u32_pair)]
    level: (u32, u32),

    /// Analyze only cycles whose length lies in "lo,hi".
    #[arg(long, value_parser = parse_usize_pair)]
    periods: Option<(usize, usize)>,

    /// Run log; every invocation appends one report section.
    #[arg(long, default_value = "juliacast.log")]
    log: PathBuf,
}

fn parse_kind(s: &str) -> Result<MapKind, String> {
    MapKind::parse(s).ok_or_else(|| format!("unknown map form `{s}`"))
}

fn parse_pair(s: &str) -> Result<(f64, f64), String> {
    let (re, im) = split_pair(s)?;
    let re = re.parse::<f64>().map_err(|e| e.to_string())?;
    let im = im.parse::<f64>().map_err(|e| e.to_string())?;
    Ok((re, im))
}

fn parse_u32_pair(s: &str) -> Result<(u32, u32), String> {
    let (lo, hi) = split_pair(s)?;
    Ok((
        lo.parse::<u32>().map_err(|e| e.to_string())?,
        hi.parse::<u32>().map_err(|e| e.to_string())?,
    ))
}

fn parse_usize_pair(s: &str) -> Result<(usize, usize), String> {
    let (lo, hi) = split_pair(s)?;
    Ok((
        lo.parse::<usize>().map_err(|e| e.to_string())?,
        hi.parse::<usize>().map_err(|e| e.to_string())?,
    ))
}

fn split_pair(s: &str) -> Result<(&str, &str), String> {
    s.split_once(',')
        .ok_or_else(|| format!("expected two comma-separated values, got `{s}`"))
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    if let Err(err) = run(&cli) {
        error!("fatal: {err}");
        process::exit(99);
    }
}

fn run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = RunConfig::new(cli.func)
        .with_seed(cli.c.0, cli.c.1)
        .with_factor(cli.a.0, cli.a.1)
        .with_encw(cli.encw)
        .with_levels(cli.level.0, cli.level.1);
    if let Some((lo, hi)) = cli.periods {
        config = config.with_periods(lo, hi);
    }

    let analysis = analyze(&config)?;
    let section = report::render(&analysis, &config);
    print!("{section}");
    report::append_to_log(&cli.log, &section)?;
    Ok(())
}
