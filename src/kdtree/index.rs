use crate::error::{GeoRadiusError, Result};
use crate::r#type::IndexableNum;

/// An owned, immutable KDTree.
///
/// Usually this will be created from scratch via [`KDTreeBuilder`][crate::kdtree::KDTreeBuilder]
/// or [`build_index`][crate::build_index].
///
/// The points are stored kd-sorted: the node covering positions `[start, end)` sits at
/// `start + (end - start) / 2`, and its left and right subtrees are the positions before and
/// after it.
#[derive(Debug, Clone, PartialEq)]
pub struct KDTree<N: IndexableNum> {
    pub(crate) coords: Vec<N>,
    pub(crate) ids: Vec<u32>,
}

impl<N: IndexableNum> KDTree<N> {
    /// Borrow this tree as a [`KDTreeRef`].
    pub fn as_tree_ref(&self) -> KDTreeRef<'_, N> {
        KDTreeRef {
            coords: &self.coords,
            ids: &self.ids,
        }
    }

    /// Consume the tree, returning the kd-sorted interleaved coordinates and insertion ids.
    pub fn into_parts(self) -> (Vec<N>, Vec<u32>) {
        (self.coords, self.ids)
    }
}

/// A reference on external kd-sorted arrays.
///
/// Usually this will be created from a [`KDTree`] via its [`as_tree_ref`][KDTree::as_tree_ref]
/// method, but it can also be created from arrays previously produced by
/// [`KDTree::into_parts`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KDTreeRef<'a, N: IndexableNum> {
    pub(crate) coords: &'a [N],
    pub(crate) ids: &'a [u32],
}

impl<'a, N: IndexableNum> KDTreeRef<'a, N> {
    /// Wrap kd-sorted interleaved `coords` and their insertion `ids`.
    ///
    /// Only the array lengths are validated; the kd-sort order is trusted.
    pub fn try_new(coords: &'a [N], ids: &'a [u32]) -> Result<Self> {
        let num_items = ids.len();
        if coords.len() != num_items * 2 {
            return Err(GeoRadiusError::LengthMismatch {
                num_items,
                expected: num_items * 2,
                actual: coords.len(),
            });
        }

        Ok(Self { coords, ids })
    }
}
