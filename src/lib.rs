#![doc = include_str!("../README.md")]

pub mod bench;
mod error;
pub mod geodesic;
pub mod kdtree;
mod point;
mod projected;
pub mod projection;
pub mod scan;
mod r#type;

pub use error::{GeoRadiusError, Result};
pub use geodesic::geodesic_distance;
pub use point::{GeoPoint, Place};
pub use projected::ProjectedIndex;
pub use projection::project;
pub use r#type::{Coord, IndexableNum};
pub use scan::linear_range_query;

use kdtree::{KDTree, KDTreeBuilder, KDTreeIndex};

/// Build a KD-tree over planar points. An empty slice gives an empty tree.
pub fn build_index<N: IndexableNum>(points: &[Coord<N>]) -> KDTree<N> {
    let mut builder = KDTreeBuilder::new(points.len());
    for point in points {
        builder.add(point.x, point.y);
    }
    builder.finish()
}

/// Every point of `tree` within `radius` (inclusive) of `target`, in no particular order.
pub fn range_query<N: IndexableNum>(
    tree: &impl KDTreeIndex<N>,
    target: Coord<N>,
    radius: N,
) -> Vec<Coord<N>> {
    tree.within_points(target.x, target.y, radius)
}

#[cfg(test)]
pub(crate) mod test;
