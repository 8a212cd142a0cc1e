//! Great-circle distance on a spherical Earth.
//!
//! Only the linear scan measures distance this way. The tree works purely in projected space, so
//! the two strategies stay independent and can be checked against each other.

use geo_traits::CoordTrait;

/// Mean Earth radius (IUGG), in meters.
pub const MEAN_EARTH_RADIUS: f64 = 6_371_008.8;

/// Haversine distance in meters between two points given as latitude/longitude in degrees.
///
/// Symmetric and total. Precision near antipodal points is not a concern here.
#[inline]
pub fn geodesic_distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let phi1 = lat1.to_radians();
    let phi2 = lat2.to_radians();
    let d_phi = (lat2 - lat1).to_radians();
    let d_lambda = (lon2 - lon1).to_radians();

    let a = (d_phi / 2.0).sin().powi(2) + phi1.cos() * phi2.cos() * (d_lambda / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    MEAN_EARTH_RADIUS * c
}

/// Haversine distance in meters between two geographic coordinates (`x = lon`, `y = lat`).
#[inline]
pub fn haversine(a: &impl CoordTrait<T = f64>, b: &impl CoordTrait<T = f64>) -> f64 {
    geodesic_distance(a.y(), a.x(), b.y(), b.x())
}
