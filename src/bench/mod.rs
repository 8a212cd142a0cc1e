//! Timing harness comparing the projected KD-tree against the linear haversine scan.

mod harness;
mod stats;
#[cfg(feature = "synthetic")]
mod synthetic;

#[cfg(feature = "synthetic")]
pub use harness::run_benchmark;
pub use harness::{run_benchmark_with_points, BenchmarkConfig, BenchmarkReport, PhaseTimings};
pub use stats::Summary;
#[cfg(feature = "synthetic")]
pub use synthetic::{offset, random_in_disk, SyntheticDisk};
