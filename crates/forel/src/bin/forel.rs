use clap::{Parser, ValueEnum};
use forel::io::{self, OutputFormat};
use forel::{Config, DegenerateDimensions, FirstRemaining};
use snafu::{ResultExt, Whatever};
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Copy, Clone, ValueEnum)]
enum Format {
    /// Points of each cluster followed by a separator line
    Blocks,
    /// CSV with the cluster id as the last column
    Labeled,
}

impl From<Format> for OutputFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Blocks => OutputFormat::Blocks,
            Format::Labeled => OutputFormat::Labeled,
        }
    }
}

/// Cluster points read from a CSV file with the FOREL algorithm.
///
/// The first line of the input holds the minimum number of clusters, every
/// other line a point.
#[derive(Parser)]
#[command(version)]
struct Args {
    /// Input file
    input: PathBuf,

    /// Write clusters here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    #[arg(short, long, value_enum, default_value = "blocks")]
    format: Format,

    /// Override the minimum number of clusters from the input file
    #[arg(long, allow_negative_numbers = true)]
    min_clusters: Option<i64>,

    /// Mean-shift convergence tolerance, in normalized coordinates
    #[arg(long, default_value_t = forel::config::DEFAULT_TOLERANCE)]
    tolerance: f64,

    /// Fraction of the radius removed before pass k is (k + 1) times this
    #[arg(long, default_value_t = forel::config::DEFAULT_SHRINK_STEP)]
    shrink_step: f64,

    #[arg(long, default_value_t = forel::config::DEFAULT_MAX_PASSES)]
    max_passes: usize,

    /// Map dimensions where all points agree to 0 instead of failing
    #[arg(long)]
    collapse_degenerate: bool,

    /// Print the radius and cluster count of every pass to stderr
    #[arg(long)]
    trace_passes: bool,

    /// Log more (-v debug, -vv trace); RUST_LOG takes precedence
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "forel=debug",
        _ => "forel=trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)),
        )
        .with_writer(std::io::stderr)
        .init();
}

#[snafu::report]
fn main() -> Result<(), Whatever> {
    let args = Args::parse();
    init_logging(args.verbose);

    let input = io::read_input_file(&args.input)
        .with_whatever_context(|_| format!("could not parse {}", args.input.display()))?;
    let min_clusters = args.min_clusters.unwrap_or(input.min_clusters);

    let config = Config {
        tolerance: args.tolerance,
        shrink_step: args.shrink_step,
        max_passes: args.max_passes,
        degenerate_dimensions: if args.collapse_degenerate {
            DegenerateDimensions::Collapse
        } else {
            DegenerateDimensions::Reject
        },
        ..Config::default()
    };

    let (clusters, info) =
        forel::cluster_extra_debug(&input.points, min_clusters, &config, &FirstRemaining)
            .whatever_context("clustering failed")?;

    if args.trace_passes {
        for (k, pass) in info.passes.iter().enumerate() {
            eprintln!(
                "pass {k}: radius {:.6}, {} clusters{}",
                pass.radius,
                pass.clusters,
                if pass.accepted { ", accepted" } else { "" }
            );
        }
    }

    let format = args.format.into();
    let written = match &args.output {
        Some(path) => {
            let file = File::create(path)
                .with_whatever_context(|_| format!("could not create {}", path.display()))?;
            io::write_clusters(BufWriter::new(file), &clusters, format)
        }
        None => io::write_clusters(std::io::stdout().lock(), &clusters, format),
    };
    written.whatever_context("could not write output")?;

    Ok(())
}
