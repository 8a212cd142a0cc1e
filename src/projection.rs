//! Spherical Mercator projection between longitude/latitude and planar meters.
//!
//! The tree searches in projected space, where Euclidean distance stands in for geodesic
//! distance. Mercator stretches distances by `1 / cos(lat)`, so a geodesic radius has to be
//! widened with [`planar_radius`] before it is handed to the tree. The correction uses the
//! latitude of the query center and assumes the search area is small relative to the Earth.
//! Antimeridian wraparound and polar regions are not handled.

use std::f64::consts::FRAC_PI_4;

use geo_traits::CoordTrait;

use crate::geodesic::MEAN_EARTH_RADIUS;
use crate::r#type::Coord;

/// Sphere radius of the projection, in meters.
///
/// This is the haversine sphere rather than the 6 378 137 m web-Mercator sphere, so a corrected
/// planar radius covers the same ground as the geodesic radius it came from.
pub const MERCATOR_RADIUS: f64 = MEAN_EARTH_RADIUS;

/// Project longitude/latitude in degrees to planar `(x, y)` in meters.
///
/// Latitudes at or beyond ±90° produce non-finite output. Keeping inputs inside the domain is
/// the caller's responsibility.
#[inline]
pub fn project(lon: f64, lat: f64) -> (f64, f64) {
    let x = MERCATOR_RADIUS * lon.to_radians();
    let y = MERCATOR_RADIUS * (FRAC_PI_4 + lat.to_radians() / 2.0).tan().ln();
    (x, y)
}

/// Inverse of [`project`]: planar meters back to longitude/latitude in degrees.
#[inline]
pub fn unproject(x: f64, y: f64) -> (f64, f64) {
    let lon = (x / MERCATOR_RADIUS).to_degrees();
    let lat = (2.0 * (y / MERCATOR_RADIUS).exp().atan() - 2.0 * FRAC_PI_4).to_degrees();
    (lon, lat)
}

/// Project any geographic coordinate (`x = lon`, `y = lat`) to a planar [`Coord`].
#[inline]
pub fn project_coord(coord: &impl CoordTrait<T = f64>) -> Coord<f64> {
    project(coord.x(), coord.y()).into()
}

/// Convert a geodesic radius around a center at `center_lat` degrees into the planar search
/// radius of the projection.
#[inline]
pub fn planar_radius(radius_m: f64, center_lat: f64) -> f64 {
    radius_m / center_lat.to_radians().cos()
}
