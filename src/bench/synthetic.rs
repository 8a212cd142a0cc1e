//! Synthetic point sets for benchmarking.
//!
//! Feature-gated behind `synthetic`.

use std::f64::consts::PI;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::{GeoRadiusError, Result};
use crate::geodesic::MEAN_EARTH_RADIUS;
use crate::GeoPoint;

/// Points scattered uniformly (by area) over a disk around a center.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SyntheticDisk {
    /// Center of the disk.
    pub center: GeoPoint,
    /// Disk radius in meters.
    pub radius_m: f64,
    /// Number of points to generate.
    pub count: usize,
    /// RNG seed; the same seed always gives the same points.
    pub seed: u64,
}

impl SyntheticDisk {
    /// Generate the points.
    pub fn generate(&self) -> Result<Vec<GeoPoint>> {
        if !self.radius_m.is_finite() || self.radius_m <= 0.0 {
            return Err(GeoRadiusError::InvalidConfig(format!(
                "disk radius must be a positive number of meters, got {}",
                self.radius_m
            )));
        }

        let mut rng = StdRng::seed_from_u64(self.seed);
        Ok((0..self.count)
            .map(|_| random_in_disk(&mut rng, self.center, self.radius_m))
            .collect())
    }
}

/// A point uniformly distributed over the disk of `radius_m` meters around `center`.
///
/// Offsets are applied on a local tangent plane, which is accurate for disks of a few
/// kilometers.
pub fn random_in_disk<R: Rng>(rng: &mut R, center: GeoPoint, radius_m: f64) -> GeoPoint {
    // sqrt keeps the density uniform over the area rather than the radius
    let distance = radius_m * rng.gen::<f64>().sqrt();
    let bearing = rng.gen_range(0.0..2.0 * PI);
    offset(center, distance * bearing.cos(), distance * bearing.sin())
}

/// Move `origin` by `east_m` and `north_m` meters on the local tangent plane.
pub fn offset(origin: GeoPoint, east_m: f64, north_m: f64) -> GeoPoint {
    let d_lat = (north_m / MEAN_EARTH_RADIUS).to_degrees();
    let d_lon = (east_m / (MEAN_EARTH_RADIUS * origin.lat.to_radians().cos())).to_degrees();
    GeoPoint::new(origin.lon + d_lon, origin.lat + d_lat)
}
