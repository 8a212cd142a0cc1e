use std::hint::black_box;
use std::time::{Duration, Instant};

use geo_traits::CoordTrait;

use crate::bench::Summary;
use crate::error::{GeoRadiusError, Result};
use crate::projected::ProjectedIndex;
use crate::scan::linear_range_query;
use crate::GeoPoint;

/// What to benchmark and how many times.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BenchmarkConfig {
    /// Number of synthetic points to generate. Ignored by
    /// [`run_benchmark_with_points`], which uses the points it is given.
    pub num_points: usize,
    /// Number of recorded iterations.
    pub iterations: usize,
    /// Iterations run before recording starts.
    pub warmup: usize,
    /// Query center.
    pub center: GeoPoint,
    /// Query radius in meters.
    pub radius_m: f64,
    /// Radius in meters of the disk synthetic points are scattered over.
    pub disk_radius_m: f64,
    /// Seed for the synthetic points.
    pub seed: u64,
}

impl Default for BenchmarkConfig {
    fn default() -> Self {
        Self {
            num_points: 1000,
            iterations: 50,
            warmup: 5,
            center: GeoPoint::new(2.3522, 48.8566),
            radius_m: 500.0,
            disk_radius_m: 3000.0,
            seed: 42,
        }
    }
}

impl BenchmarkConfig {
    /// Check that this configuration can produce measurements.
    pub fn validate(&self) -> Result<()> {
        if self.iterations == 0 {
            return Err(GeoRadiusError::InvalidConfig(
                "at least one recorded iteration is required".to_string(),
            ));
        }
        self.total_iterations()?;
        Ok(())
    }

    /// Warm-up plus recorded iterations.
    pub fn total_iterations(&self) -> Result<usize> {
        self.warmup.checked_add(self.iterations).ok_or_else(|| {
            GeoRadiusError::InvalidConfig(format!(
                "{} warm-up plus {} recorded iterations overflows",
                self.warmup, self.iterations
            ))
        })
    }
}

/// Timing summaries for each phase, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PhaseTimings {
    /// Projecting the points and building the tree.
    pub build: Summary,
    /// Projecting the center, correcting the radius and searching the tree.
    pub tree_query: Summary,
    /// Haversine check against every point.
    pub linear_scan: Summary,
}

/// Outcome of a benchmark run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BenchmarkReport {
    /// Number of points searched.
    pub num_points: usize,
    /// Query radius in meters.
    pub radius_m: f64,
    /// Per-phase timings over the recorded iterations.
    pub timings: PhaseTimings,
    /// Matches found by the tree.
    pub tree_matches: usize,
    /// Matches found by the linear scan.
    pub linear_matches: usize,
    /// Points matched by exactly one of the two strategies. These come from the projection
    /// approximation and are expected to sit right at the radius.
    pub mismatches: usize,
    /// Tree nodes visited by the query; the linear scan always visits `num_points`.
    pub visited: usize,
}

impl BenchmarkReport {
    /// How many times faster the tree query is than the linear scan, by mean time.
    ///
    /// `None` when the tree query mean is too small for the clock to resolve.
    pub fn query_speedup(&self) -> Option<f64> {
        let tree = self.timings.tree_query.mean;
        if tree > 0.0 {
            Some(self.timings.linear_scan.mean / tree)
        } else {
            None
        }
    }
}

/// Benchmark both strategies over a synthetic disk of points described by `config`.
#[cfg(feature = "synthetic")]
pub fn run_benchmark(config: &BenchmarkConfig) -> Result<BenchmarkReport> {
    config.validate()?;

    let points = crate::bench::SyntheticDisk {
        center: config.center,
        radius_m: config.disk_radius_m,
        count: config.num_points,
        seed: config.seed,
    }
    .generate()?;
    log::debug!(
        "generated {} points within {} m of ({}, {})",
        points.len(),
        config.disk_radius_m,
        config.center.lon,
        config.center.lat
    );

    run_benchmark_with_points(config, &points)
}

/// Benchmark both strategies over caller-supplied geographic points.
///
/// Every iteration builds a fresh tree. Build, tree query and linear scan each get their own
/// clock reads, and the first `config.warmup` iterations are discarded.
pub fn run_benchmark_with_points<P: CoordTrait<T = f64>>(
    config: &BenchmarkConfig,
    points: &[P],
) -> Result<BenchmarkReport> {
    config.validate()?;
    if points.is_empty() {
        log::warn!("benchmarking an empty point set");
    }
    if !(config.radius_m > 0.0) {
        log::warn!(
            "query radius {} m matches nothing; only traversal overhead is measured",
            config.radius_m
        );
    }

    let mut build = Vec::with_capacity(config.iterations);
    let mut tree_query = Vec::with_capacity(config.iterations);
    let mut linear_scan = Vec::with_capacity(config.iterations);
    let mut last = None;

    for i in 0..config.total_iterations()? {
        let started = Instant::now();
        let index = ProjectedIndex::new(points);
        let build_elapsed = started.elapsed();

        let started = Instant::now();
        let tree_matches = black_box(index.within_meters(&config.center, config.radius_m));
        let query_elapsed = started.elapsed();

        let started = Instant::now();
        let linear_matches = black_box(linear_range_query(points, &config.center, config.radius_m));
        let scan_elapsed = started.elapsed();

        if i < config.warmup {
            continue;
        }

        build.push(build_elapsed);
        tree_query.push(query_elapsed);
        linear_scan.push(scan_elapsed);
        last = Some((index, tree_matches, linear_matches));
    }

    let (index, tree_matches, linear_matches) = last.ok_or_else(|| {
        GeoRadiusError::InvalidConfig("no iteration was recorded".to_string())
    })?;

    let visited = index.trace_meters(&config.center, config.radius_m).count();
    let report = BenchmarkReport {
        num_points: points.len(),
        radius_m: config.radius_m,
        timings: PhaseTimings {
            build: summarize("build", &build),
            tree_query: summarize("tree query", &tree_query),
            linear_scan: summarize("linear scan", &linear_scan),
        },
        tree_matches: tree_matches.len(),
        linear_matches: linear_matches.len(),
        mismatches: symmetric_difference(tree_matches, linear_matches),
        visited,
    };

    if report.mismatches > 0 {
        log::debug!(
            "{} points matched by only one strategy at radius {} m",
            report.mismatches,
            config.radius_m
        );
    }

    Ok(report)
}

fn summarize(phase: &str, durations: &[Duration]) -> Summary {
    let summary = Summary::from_durations(durations);
    log::debug!(
        "{phase}: {:.4} ms ± {:.4} over {} iterations",
        summary.mean,
        summary.std_dev,
        summary.samples
    );
    summary
}

fn symmetric_difference(mut a: Vec<u32>, mut b: Vec<u32>) -> usize {
    a.sort_unstable();
    b.sort_unstable();

    let (mut i, mut j, mut count) = (0, 0, 0);
    while i < a.len() && j < b.len() {
        match a[i].cmp(&b[j]) {
            std::cmp::Ordering::Less => {
                count += 1;
                i += 1;
            }
            std::cmp::Ordering::Greater => {
                count += 1;
                j += 1;
            }
            std::cmp::Ordering::Equal => {
                i += 1;
                j += 1;
            }
        }
    }
    count + (a.len() - i) + (b.len() - j)
}

#[cfg(all(test, feature = "synthetic"))]
mod test {
    use super::*;

    fn init_logger() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn quick_config() -> BenchmarkConfig {
        BenchmarkConfig {
            num_points: 500,
            iterations: 4,
            warmup: 2,
            ..Default::default()
        }
    }

    #[test]
    fn records_only_measured_iterations() {
        init_logger();
        let report = run_benchmark(&quick_config()).unwrap();

        assert_eq!(report.num_points, 500);
        assert_eq!(report.timings.build.samples, 4);
        assert_eq!(report.timings.tree_query.samples, 4);
        assert_eq!(report.timings.linear_scan.samples, 4);
        assert!(report.timings.build.mean >= 0.0);
        assert!(report.timings.linear_scan.std_dev >= 0.0);
    }

    #[test]
    fn strategies_agree_on_synthetic_disk() {
        init_logger();
        let report = run_benchmark(&quick_config()).unwrap();

        assert!(report.linear_matches > 0);
        assert!(report.mismatches <= 2, "{report:?}");
        assert!(report.visited < report.num_points);
    }

    #[test]
    fn real_points() {
        init_logger();
        let center = GeoPoint::new(-122.4194, 37.7749);
        let points = vec![
            center,
            crate::bench::offset(center, 100.0, 0.0),
            crate::bench::offset(center, 0.0, -900.0),
            crate::bench::offset(center, 5000.0, 5000.0),
        ];
        let config = BenchmarkConfig {
            center,
            radius_m: 1000.0,
            iterations: 3,
            warmup: 0,
            ..Default::default()
        };

        let report = run_benchmark_with_points(&config, &points).unwrap();
        assert_eq!(report.tree_matches, 3);
        assert_eq!(report.linear_matches, 3);
        assert_eq!(report.mismatches, 0);
    }

    #[test]
    fn empty_points() {
        init_logger();
        let points: Vec<GeoPoint> = vec![];
        let config = BenchmarkConfig {
            iterations: 2,
            ..Default::default()
        };
        let report = run_benchmark_with_points(&config, &points).unwrap();
        assert_eq!(report.tree_matches, 0);
        assert_eq!(report.linear_matches, 0);
        assert_eq!(report.visited, 0);
    }

    #[test]
    fn rejects_zero_iterations() {
        let config = BenchmarkConfig {
            iterations: 0,
            ..Default::default()
        };
        assert!(matches!(
            run_benchmark(&config),
            Err(GeoRadiusError::InvalidConfig(_))
        ));
    }

    #[test]
    fn rejects_overflowing_iteration_count() {
        let config = BenchmarkConfig {
            warmup: usize::MAX,
            iterations: 1,
            ..Default::default()
        };
        assert!(matches!(
            config.total_iterations(),
            Err(GeoRadiusError::InvalidConfig(_))
        ));
        assert!(matches!(
            run_benchmark(&config),
            Err(GeoRadiusError::InvalidConfig(_))
        ));
    }

    #[test]
    fn speedup_needs_a_measurable_tree_query() {
        let mut report = BenchmarkReport {
            num_points: 10,
            radius_m: 500.0,
            timings: PhaseTimings::default(),
            tree_matches: 0,
            linear_matches: 0,
            mismatches: 0,
            visited: 0,
        };
        report.timings.linear_scan.mean = 0.5;
        assert_eq!(report.query_speedup(), None);

        report.timings.tree_query.mean = 0.1;
        let speedup = report.query_speedup().unwrap();
        assert!((speedup - 5.0).abs() < 1e-9);
    }

    #[test]
    fn rejects_bad_disk() {
        let config = BenchmarkConfig {
            disk_radius_m: -1.0,
            ..quick_config()
        };
        assert!(run_benchmark(&config).is_err());
    }

    #[test]
    fn counts_symmetric_difference() {
        assert_eq!(symmetric_difference(vec![3, 1, 2], vec![2, 3, 4, 5]), 3);
        assert_eq!(symmetric_difference(vec![], vec![]), 0);
        assert_eq!(symmetric_difference(vec![7], vec![7]), 0);
    }
}
