//! Baseline radius search: a haversine distance check against every point.

use geo_traits::CoordTrait;

use crate::geodesic::haversine;

/// Indices of every point within `radius_m` meters (inclusive) of `center`, by great-circle
/// distance.
///
/// Always visits every point. A radius that is not strictly positive matches nothing, the same
/// as the tree search.
pub fn linear_range_query<P: CoordTrait<T = f64>>(
    points: &[P],
    center: &impl CoordTrait<T = f64>,
    radius_m: f64,
) -> Vec<u32> {
    // also rejects NaN
    if !(radius_m > 0.0) {
        return vec![];
    }

    points
        .iter()
        .enumerate()
        .filter(|(_, point)| haversine(*point, center) <= radius_m)
        .map(|(i, _)| i as u32)
        .collect()
}
