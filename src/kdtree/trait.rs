use geo_traits::CoordTrait;
use tinyvec::TinyVec;

use crate::kdtree::{KDTree, KDTreeRef, Node, RadiusTrace};
use crate::r#type::{Coord, IndexableNum};

/// A trait for searching and accessing data out of a KDTree.
pub trait KDTreeIndex<N: IndexableNum>: Sized {
    /// The kd-sorted, interleaved `x, y` coordinates of this tree
    fn coords(&self) -> &[N];

    /// The insertion index of each kd-sorted position
    fn ids(&self) -> &[u32];

    /// The number of items in this KDTree
    fn num_items(&self) -> usize {
        self.ids().len()
    }

    /// Whether the tree holds no points
    fn is_empty(&self) -> bool {
        self.ids().is_empty()
    }

    /// The point stored at a kd-sorted position
    fn point(&self, pos: usize) -> Coord<N> {
        let coords = self.coords();
        Coord::new(coords[2 * pos], coords[2 * pos + 1])
    }

    /// Search the index for items within a given radius.
    ///
    /// - qx: x value of query point
    /// - qy: y value of query point
    /// - r: radius, inclusive
    ///
    /// Returns insertion indices of found items. A radius that is not strictly positive matches
    /// nothing.
    fn within(&self, qx: N, qy: N, r: N) -> Vec<u32> {
        let ids = self.ids();
        let mut result = vec![];
        search_within(self.coords(), qx, qy, r, |pos| result.push(ids[pos]));
        result
    }

    /// Search the index for items within a given radius.
    ///
    /// - coord: coordinate of query point
    /// - r: radius, inclusive
    ///
    /// Returns insertion indices of found items
    fn within_coord(&self, coord: &impl CoordTrait<T = N>, r: N) -> Vec<u32> {
        self.within(coord.x(), coord.y(), r)
    }

    /// Search the index for items within a given radius, returning the matched points
    /// themselves rather than their ids.
    fn within_points(&self, qx: N, qy: N, r: N) -> Vec<Coord<N>> {
        let mut result = vec![];
        search_within(self.coords(), qx, qy, r, |pos| result.push(self.point(pos)));
        result
    }

    /// Replay a radius search step by step.
    ///
    /// The returned iterator yields one [`TraceStep`][crate::kdtree::TraceStep] per visited node,
    /// in the same order as [`within`][Self::within] visits them. Clone it to replay from the
    /// current step, or call this again to start over.
    fn within_trace(&self, qx: N, qy: N, r: N) -> RadiusTrace<'_, N, Self> {
        RadiusTrace::new(self, qx, qy, r)
    }

    /// Access the root node of the KDTree for manual traversal. `None` for an empty tree.
    fn root(&self) -> Option<Node<'_, N, Self>> {
        Node::from_root(self)
    }
}

impl<N: IndexableNum> KDTreeIndex<N> for KDTree<N> {
    fn coords(&self) -> &[N] {
        &self.coords
    }

    fn ids(&self) -> &[u32] {
        &self.ids
    }
}

impl<N: IndexableNum> KDTreeIndex<N> for KDTreeRef<'_, N> {
    fn coords(&self) -> &[N] {
        self.coords
    }

    fn ids(&self) -> &[u32] {
        self.ids
    }
}

/// Depth-first branch-and-bound radius search over kd-sorted coords.
///
/// Calls `on_match` with the kd-sorted position of every point whose squared distance to
/// `(qx, qy)` is at most `r * r`.
pub(crate) fn search_within<N: IndexableNum>(
    coords: &[N],
    qx: N,
    qy: N,
    r: N,
    mut on_match: impl FnMut(usize),
) {
    // also rejects NaN
    if !(r > N::zero()) {
        return;
    }

    let r2 = r * r;

    // Use TinyVec to avoid heap allocations. Entries are (start, end, axis) triples.
    let mut stack: TinyVec<[usize; 33]> = TinyVec::new();
    stack.push(0);
    stack.push(coords.len() / 2);
    stack.push(0);

    while let Some(axis) = stack.pop() {
        let end = stack.pop().unwrap_or(0);
        let start = stack.pop().unwrap_or(0);

        // absent child
        if start >= end {
            continue;
        }

        let m = start + ((end - start) >> 1);
        let x = coords[2 * m];
        let y = coords[2 * m + 1];
        if sq_dist(x, y, qx, qy) <= r2 {
            on_match(m);
        }

        let diff = if axis == 0 { qx - x } else { qy - y };
        let (near, far) = split_children(start, m, end, diff);

        // Pushed in backwards order to what gets popped, so the near half is searched first.
        // The far half only if the splitting line is within the radius.
        if diff.abs() <= r {
            stack.push(far.0);
            stack.push(far.1);
            stack.push(1 - axis);
        }
        stack.push(near.0);
        stack.push(near.1);
        stack.push(1 - axis);
    }
}

/// `(near, far)` child ranges of the node at `m`: left is near when the target lies below the
/// split on this axis.
#[inline]
pub(crate) fn split_children<N: IndexableNum>(
    start: usize,
    m: usize,
    end: usize,
    diff: N,
) -> ((usize, usize), (usize, usize)) {
    let left = (start, m);
    let right = (m + 1, end);
    if diff < N::zero() {
        (left, right)
    } else {
        (right, left)
    }
}

#[inline]
pub(crate) fn sq_dist<N: IndexableNum>(ax: N, ay: N, bx: N, by: N) -> N {
    let dx = ax - bx;
    let dy = ay - by;
    dx * dx + dy * dy
}
