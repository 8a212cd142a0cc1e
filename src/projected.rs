//! Radius search over geographic points through the projected KD-tree.

use geo_traits::CoordTrait;

use crate::kdtree::{KDTree, KDTreeBuilder, KDTreeIndex, RadiusTrace};
use crate::projection::{planar_radius, project};

/// A KD-tree over the Mercator projection of a set of geographic points.
///
/// Ids reported by queries are indices into the slice the index was built from, so matches map
/// straight back onto the caller's records.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectedIndex {
    tree: KDTree<f64>,
}

impl ProjectedIndex {
    /// Project every point (`x = lon`, `y = lat`) and build the tree.
    pub fn new<P: CoordTrait<T = f64>>(points: &[P]) -> Self {
        let mut builder = KDTreeBuilder::new(points.len());
        for point in points {
            let (x, y) = project(point.x(), point.y());
            builder.add(x, y);
        }

        Self {
            tree: builder.finish(),
        }
    }

    /// The underlying planar tree.
    pub fn tree(&self) -> &KDTree<f64> {
        &self.tree
    }

    /// Indices of the points within `radius_m` meters of `center`.
    ///
    /// The radius is widened by `1 / cos(center latitude)` to undo the Mercator scale before it
    /// reaches the tree.
    pub fn within_meters(&self, center: &impl CoordTrait<T = f64>, radius_m: f64) -> Vec<u32> {
        let (qx, qy) = project(center.x(), center.y());
        self.tree.within(qx, qy, planar_radius(radius_m, center.y()))
    }

    /// Step-by-step replay of [`within_meters`][Self::within_meters].
    pub fn trace_meters(
        &self,
        center: &impl CoordTrait<T = f64>,
        radius_m: f64,
    ) -> RadiusTrace<'_, f64, KDTree<f64>> {
        let (qx, qy) = project(center.x(), center.y());
        self.tree
            .within_trace(qx, qy, planar_radius(radius_m, center.y()))
    }
}
