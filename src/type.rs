use std::fmt::Debug;

use geo_traits::CoordTrait;
use num_traits::{Float, NumCast};

/// A trait for types that can be used for indexed planar coordinates.
///
/// This trait is sealed and cannot be implemented for external types. Radius search compares
/// squared distances and needs `sqrt`-free float arithmetic, so only `f32` and `f64` are allowed.
pub trait IndexableNum:
    private::Sealed + Float + NumCast + Debug + Default + Send + Sync + 'static
{
}

impl IndexableNum for f32 {}

impl IndexableNum for f64 {}

/// A planar point: `x, y` in projected meters.
///
/// This is the unit the KD-tree is built from and the type returned by
/// [`range_query`][crate::range_query].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Coord<N: IndexableNum> {
    /// Coordinate on axis 0.
    pub x: N,
    /// Coordinate on axis 1.
    pub y: N,
}

impl<N: IndexableNum> Coord<N> {
    /// Create a new planar coordinate.
    pub fn new(x: N, y: N) -> Self {
        Self { x, y }
    }

    /// The coordinate on the given split axis (0 for x, 1 for y).
    #[inline]
    pub fn axis(&self, axis: usize) -> N {
        if axis == 0 {
            self.x
        } else {
            self.y
        }
    }
}

impl<N: IndexableNum> From<(N, N)> for Coord<N> {
    fn from((x, y): (N, N)) -> Self {
        Self { x, y }
    }
}

impl<N: IndexableNum> CoordTrait for Coord<N> {
    type T = N;

    fn dim(&self) -> geo_traits::Dimensions {
        geo_traits::Dimensions::Xy
    }

    fn x(&self) -> Self::T {
        self.x
    }

    fn y(&self) -> Self::T {
        self.y
    }

    fn nth_or_panic(&self, n: usize) -> Self::T {
        match n {
            0 => self.x,
            1 => self.y,
            _ => panic!("Invalid index of coord"),
        }
    }
}

// https://rust-lang.github.io/api-guidelines/future-proofing.html#sealed-traits-protect-against-downstream-implementations-c-sealed
mod private {
    pub trait Sealed {}

    impl Sealed for f32 {}
    impl Sealed for f64 {}
}
