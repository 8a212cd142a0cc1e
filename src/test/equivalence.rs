//! The projected tree and the haversine scan must find the same points.

use crate::bench::{offset, SyntheticDisk};
use crate::geodesic::{haversine, MEAN_EARTH_RADIUS};
use crate::kdtree::KDTreeIndex;
use crate::projection::{planar_radius, project, project_coord};
use crate::{linear_range_query, GeoPoint, Place, ProjectedIndex};

fn disk(center: GeoPoint, seed: u64) -> Vec<GeoPoint> {
    SyntheticDisk {
        center,
        radius_m: 3000.0,
        count: 1000,
        seed,
    }
    .generate()
    .unwrap()
}

fn sorted(mut ids: Vec<u32>) -> Vec<u32> {
    ids.sort_unstable();
    ids
}

/// Ids found by only one strategy must lie within `tolerance` (relative) of the radius.
fn assert_equivalent(points: &[GeoPoint], center: GeoPoint, radius_m: f64, tolerance: f64) {
    let index = ProjectedIndex::new(points);
    let tree = sorted(index.within_meters(&center, radius_m));
    let linear = linear_range_query(points, &center, radius_m);

    for id in tree.iter().filter(|id| !linear.contains(id)) {
        let d = haversine(&points[*id as usize], &center);
        assert!(
            (d - radius_m).abs() <= radius_m * tolerance,
            "tree-only match {id} at {d} m for radius {radius_m} m"
        );
    }
    for id in linear.iter().filter(|id| !tree.contains(id)) {
        let d = haversine(&points[*id as usize], &center);
        assert!(
            (d - radius_m).abs() <= radius_m * tolerance,
            "scan-only match {id} at {d} m for radius {radius_m} m"
        );
    }
}

#[test]
fn tree_matches_linear_scan() {
    let centers = [
        GeoPoint::new(2.3522, 48.8566),
        GeoPoint::new(-58.3816, -34.6037),
        GeoPoint::new(103.8198, 1.3521),
        GeoPoint::new(18.0686, 59.3293),
    ];
    for (seed, center) in centers.into_iter().enumerate() {
        let points = disk(center, seed as u64);
        for radius_m in [50.0, 250.0, 800.0, 1500.0, 2900.0] {
            assert_equivalent(&points, center, radius_m, 0.001);
        }
    }
}

/// Great-circle destination from `origin` after `distance_m` along `bearing_deg`.
fn destination(origin: GeoPoint, bearing_deg: f64, distance_m: f64) -> GeoPoint {
    let delta = distance_m / MEAN_EARTH_RADIUS;
    let theta = bearing_deg.to_radians();
    let phi1 = origin.lat.to_radians();
    let lambda1 = origin.lon.to_radians();

    let phi2 = (phi1.sin() * delta.cos() + phi1.cos() * delta.sin() * theta.cos()).asin();
    let lambda2 = lambda1
        + (theta.sin() * delta.sin() * phi1.cos()).atan2(delta.cos() - phi1.sin() * phi2.sin());
    GeoPoint::new(lambda2.to_degrees(), phi2.to_degrees())
}

#[test]
fn no_systematic_miss_at_the_rim() {
    for (center, radius_m) in [
        (GeoPoint::new(2.3522, 48.8566), 1000.0),
        (GeoPoint::new(2.3522, 48.8566), 2000.0),
        (GeoPoint::new(18.0686, 59.3293), 1000.0),
        (GeoPoint::new(-58.3816, -34.6037), 1500.0),
    ] {
        let ring = |scale: f64| -> Vec<GeoPoint> {
            (0..8)
                .map(|i| destination(center, 45.0 * i as f64, radius_m * scale))
                .collect()
        };

        let inside = ring(0.9995);
        let index = ProjectedIndex::new(&inside);
        let all: Vec<u32> = (0..8).collect();
        assert_eq!(linear_range_query(&inside, &center, radius_m), all);
        assert_eq!(
            sorted(index.within_meters(&center, radius_m)),
            all,
            "{radius_m} m around ({}, {})",
            center.lon,
            center.lat
        );

        let outside = ring(1.0005);
        let index = ProjectedIndex::new(&outside);
        assert!(linear_range_query(&outside, &center, radius_m).is_empty());
        assert!(index.within_meters(&center, radius_m).is_empty());
    }
}

#[test]
fn off_center_query() {
    let center = GeoPoint::new(-0.1278, 51.5074);
    let points = disk(center, 99);
    let query = offset(center, 1200.0, -700.0);
    assert_equivalent(&points, query, 600.0, 0.001);
}

#[test]
fn empty_inputs() {
    let points: Vec<GeoPoint> = vec![];
    let center = GeoPoint::new(0.0, 0.0);
    assert!(ProjectedIndex::new(&points)
        .within_meters(&center, 1000.0)
        .is_empty());
    assert!(linear_range_query(&points, &center, 1000.0).is_empty());
}

#[test]
fn tree_boundary_point_in_projected_space() {
    let center = GeoPoint::new(4.9041, 52.3676);
    let (cx, cy) = project(center.lon, center.lat);
    let index = ProjectedIndex::new(&[center, GeoPoint::new(5.0, 52.4)]);
    let tree = index.tree();

    // a radius built from the exact planar offset includes the point
    let target = project_coord(&GeoPoint::new(5.0, 52.4));
    let (dx, dy) = (target.x - cx, target.y - cy);
    let d2 = dx * dx + dy * dy;
    let mut r = d2.sqrt();
    if r * r < d2 {
        r = f64::from_bits(r.to_bits() + 1);
    }
    assert_eq!(sorted(tree.within(cx, cy, r)), vec![0, 1]);
    assert_eq!(tree.within(cx, cy, r * (1.0 - 1e-9)), vec![0]);
}

#[test]
fn maps_back_to_places() {
    let center = GeoPoint::new(-73.9857, 40.7484);
    let places = vec![
        Place::new("empire-state", center).with_tag("kind", "landmark"),
        Place::new("bryant-park", offset(center, -150.0, 600.0)).with_tag("kind", "park"),
        Place::new("brooklyn", offset(center, 3000.0, -6000.0)),
    ];

    let index = ProjectedIndex::new(&places);
    let found: Vec<&str> = sorted(index.within_meters(&center, 1000.0))
        .into_iter()
        .map(|id| places[id as usize].id.as_str())
        .collect();
    assert_eq!(found, vec!["empire-state", "bryant-park"]);
    assert_eq!(
        sorted(linear_range_query(&places, &center, 1000.0)),
        vec![0, 1]
    );
}

#[test]
fn repeated_builds_give_identical_results() {
    let center = GeoPoint::new(139.6917, 35.6895);
    let points = disk(center, 5);
    let first = ProjectedIndex::new(&points).within_meters(&center, 700.0);
    for _ in 0..3 {
        assert_eq!(ProjectedIndex::new(&points).within_meters(&center, 700.0), first);
    }
}

#[test]
fn tree_prunes_most_of_the_disk() {
    let center = GeoPoint::new(2.3522, 48.8566);
    let points = disk(center, 17);
    let index = ProjectedIndex::new(&points);

    // radii up to ~40% of the 6 km span of the disk
    for radius_m in [100.0, 300.0, 600.0, 1200.0, 2000.0] {
        let visited = index.trace_meters(&center, radius_m).count();
        assert!(
            visited < points.len(),
            "visited {visited} of {} at {radius_m} m",
            points.len()
        );
    }

    let visited = index.trace_meters(&center, 300.0).count();
    assert!(visited * 4 < points.len(), "visited {visited} at 300 m");
}

#[test]
fn trace_matches_are_the_search_result() {
    let center = GeoPoint::new(12.4964, 41.9028);
    let points = disk(center, 8);
    let index = ProjectedIndex::new(&points);

    let matched: Vec<u32> = index
        .trace_meters(&center, 900.0)
        .filter(|step| step.matched)
        .map(|step| step.id)
        .collect();
    assert_eq!(matched, index.within_meters(&center, 900.0));
}

#[test]
fn radius_correction_is_needed_away_from_equator() {
    // at 60°N the projection doubles distances; without the correction the tree misses points
    let center = GeoPoint::new(10.7522, 59.9139);
    let points = disk(center, 4);
    let index = ProjectedIndex::new(&points);
    let (qx, qy) = project(center.lon, center.lat);

    let uncorrected = index.tree().within(qx, qy, 1000.0).len();
    let corrected = index
        .tree()
        .within(qx, qy, planar_radius(1000.0, center.lat))
        .len();
    let linear = linear_range_query(&points, &center, 1000.0).len();
    assert!(corrected.abs_diff(linear) <= 2, "{corrected} vs {linear}");
    assert!(uncorrected * 2 < corrected);
}
