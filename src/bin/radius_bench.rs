//! radius-bench - compare KD-tree and linear-scan radius search
//!
//! Usage:
//!   radius-bench [--points <n>] [--radius <m>]... [--iterations <n>] [--warmup <n>]
//!
//! Scatters synthetic points uniformly over a disk around the center, then times tree
//! construction, tree query and linear scan for each requested radius.

use std::io::Write;
use std::process::ExitCode;

use clap::Parser;
use geo_radius::bench::{run_benchmark, BenchmarkConfig, BenchmarkReport};
use geo_radius::GeoPoint;

#[derive(Parser)]
#[command(name = "radius-bench")]
#[command(about = "Benchmark KD-tree vs. linear radius search", long_about = None)]
struct Cli {
    /// Number of synthetic points
    #[arg(short = 'n', long, default_value = "1000")]
    points: usize,

    /// Query radius in meters; repeat to sweep several radii
    #[arg(short, long, default_values_t = vec![500.0])]
    radius: Vec<f64>,

    /// Recorded iterations per radius
    #[arg(short, long, default_value = "50")]
    iterations: usize,

    /// Discarded warm-up iterations per radius
    #[arg(short, long, default_value = "5")]
    warmup: usize,

    /// Longitude of the query center
    #[arg(long, default_value = "2.3522", allow_hyphen_values = true)]
    lon: f64,

    /// Latitude of the query center
    #[arg(long, default_value = "48.8566", allow_hyphen_values = true)]
    lat: f64,

    /// Radius in meters of the disk the points are scattered over
    #[arg(long, default_value = "3000")]
    disk_radius: f64,

    /// RNG seed for the synthetic points
    #[arg(long, default_value = "42")]
    seed: u64,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format(|buf, record| writeln!(buf, "[{:5}] {}", record.level(), record.args()))
        .init();

    let cli = Cli::parse();

    println!(
        "{} points within {} m of ({}, {}), {} iterations after {} warm-up",
        cli.points, cli.disk_radius, cli.lon, cli.lat, cli.iterations, cli.warmup
    );
    println!(
        "{:>10} {:>8} {:>8} {:>8} {:>20} {:>20} {:>20} {:>8}",
        "radius_m", "tree", "linear", "visited", "build_ms", "query_ms", "scan_ms", "speedup"
    );

    for radius_m in &cli.radius {
        let config = BenchmarkConfig {
            num_points: cli.points,
            iterations: cli.iterations,
            warmup: cli.warmup,
            center: GeoPoint::new(cli.lon, cli.lat),
            radius_m: *radius_m,
            disk_radius_m: cli.disk_radius,
            seed: cli.seed,
        };

        match run_benchmark(&config) {
            Ok(report) => print_row(&report),
            Err(e) => {
                log::error!("{e}");
                return ExitCode::FAILURE;
            }
        }
    }

    ExitCode::SUCCESS
}

fn print_row(report: &BenchmarkReport) {
    let timings = &report.timings;
    let fmt = |mean: f64, std_dev: f64| format!("{mean:.4} ± {std_dev:.4}");
    println!(
        "{:>10} {:>8} {:>8} {:>8} {:>20} {:>20} {:>20} {:>8}",
        report.radius_m,
        report.tree_matches,
        report.linear_matches,
        report.visited,
        fmt(timings.build.mean, timings.build.std_dev),
        fmt(timings.tree_query.mean, timings.tree_query.std_dev),
        fmt(timings.linear_scan.mean, timings.linear_scan.std_dev),
        report
            .query_speedup()
            .map_or_else(|| "n/a".to_string(), |s| format!("{s:.1}x"))
    );
    if report.mismatches > 0 {
        log::info!(
            "{} points at the edge of {} m matched by only one strategy",
            report.mismatches,
            report.radius_m
        );
    }
}
