//! Geographic input records.

use geo_traits::CoordTrait;

/// A geographic coordinate in degrees.
///
/// Implements [`CoordTrait`] with `x = lon` and `y = lat`, so it can be passed anywhere the crate
/// accepts geographic points.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeoPoint {
    /// Longitude in degrees.
    pub lon: f64,
    /// Latitude in degrees.
    pub lat: f64,
}

impl GeoPoint {
    /// Create a new point from longitude and latitude, in that order.
    pub fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }
}

impl CoordTrait for GeoPoint {
    type T = f64;

    fn dim(&self) -> geo_traits::Dimensions {
        geo_traits::Dimensions::Xy
    }

    fn x(&self) -> Self::T {
        self.lon
    }

    fn y(&self) -> Self::T {
        self.lat
    }

    fn nth_or_panic(&self, n: usize) -> Self::T {
        match n {
            0 => self.lon,
            1 => self.lat,
            _ => panic!("Invalid index of coord"),
        }
    }
}

/// A geographic point tagged with an identifier and free-form metadata.
///
/// This is the shape callers typically hand over after resolving places from a geocoder or a
/// point-of-interest service. Search never looks at `id` or `tags`; matches are reported as
/// indices into the caller's slice.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Place {
    /// Opaque identifier.
    pub id: String,
    /// Location of the place.
    pub location: GeoPoint,
    /// Arbitrary key/value metadata.
    pub tags: Vec<(String, String)>,
}

impl Place {
    /// Create an untagged place.
    pub fn new(id: impl Into<String>, location: GeoPoint) -> Self {
        Self {
            id: id.into(),
            location,
            tags: vec![],
        }
    }

    /// Attach a metadata entry.
    pub fn with_tag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.tags.push((key.into(), value.into()));
        self
    }
}

impl CoordTrait for Place {
    type T = f64;

    fn dim(&self) -> geo_traits::Dimensions {
        geo_traits::Dimensions::Xy
    }

    fn x(&self) -> Self::T {
        self.location.lon
    }

    fn y(&self) -> Self::T {
        self.location.lat
    }

    fn nth_or_panic(&self, n: usize) -> Self::T {
        self.location.nth_or_panic(n)
    }
}
