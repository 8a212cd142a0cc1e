//! Utilities to traverse the KDTree structure.

use std::marker::PhantomData;

use crate::kdtree::r#trait::{split_children, sq_dist};
use crate::kdtree::KDTreeIndex;
use crate::r#type::{Coord, IndexableNum};

/// A node in the KDTree.
///
/// Each node owns exactly one point. Its subtree covers the kd-sorted positions
/// `[start, end)`, and its bounds are the region of the plane the splits above it confine the
/// subtree to.
#[derive(Debug, Clone)]
pub struct Node<'a, N: IndexableNum, T: KDTreeIndex<N>> {
    /// The tree that this node is a reference onto
    tree: &'a T,

    start: usize,
    end: usize,
    depth: usize,

    phantom: PhantomData<N>,

    min_x: N,
    min_y: N,
    max_x: N,
    max_y: N,
}

impl<'a, N: IndexableNum, T: KDTreeIndex<N>> Node<'a, N, T> {
    pub(crate) fn from_root(tree: &'a T) -> Option<Self> {
        if tree.is_empty() {
            return None;
        }

        Some(Self {
            tree,
            start: 0,
            end: tree.num_items(),
            depth: 0,
            phantom: PhantomData,
            min_x: N::neg_infinity(),
            min_y: N::neg_infinity(),
            max_x: N::infinity(),
            max_y: N::infinity(),
        })
    }

    /// The kd-sorted position of this node's point.
    #[inline]
    pub fn position(&self) -> usize {
        self.start + ((self.end - self.start) >> 1)
    }

    /// The original insertion index of this node's point.
    pub fn id(&self) -> u32 {
        self.tree.ids()[self.position()]
    }

    /// The point owned by this node.
    pub fn point(&self) -> Coord<N> {
        self.tree.point(self.position())
    }

    /// Depth of this node; the root is at depth 0.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// The axis this node splits its children over: 0 for x, 1 for y.
    pub fn axis(&self) -> usize {
        self.depth % 2
    }

    /// Number of points in the subtree rooted here, including this node.
    pub fn subtree_len(&self) -> usize {
        self.end - self.start
    }

    /// All points of the subtree rooted here, in kd-sorted order.
    pub fn subtree_points(&self) -> impl Iterator<Item = Coord<N>> + '_ {
        (self.start..self.end).map(|pos| self.tree.point(pos))
    }

    /// The child node representing the "left" half, if any.
    ///
    /// Note that this **does not include** the point of the current node.
    pub fn left_child(&self) -> Option<Node<'a, N, T>> {
        let m = self.position();
        if m == self.start {
            return None;
        }

        let split = self.point().axis(self.axis());
        let mut max_x = self.max_x;
        let mut max_y = self.max_y;
        if self.axis() == 0 {
            max_x = split;
        } else {
            max_y = split;
        };

        Some(Self {
            tree: self.tree,
            start: self.start,
            end: m,
            depth: self.depth + 1,
            min_x: self.min_x,
            min_y: self.min_y,
            max_x,
            max_y,
            phantom: self.phantom,
        })
    }

    /// The child node representing the "right" half, if any.
    ///
    /// Note that this **does not include** the point of the current node.
    pub fn right_child(&self) -> Option<Node<'a, N, T>> {
        let m = self.position();
        if m + 1 >= self.end {
            return None;
        }

        let split = self.point().axis(self.axis());
        let mut min_x = self.min_x;
        let mut min_y = self.min_y;
        if self.axis() == 0 {
            min_x = split;
        } else {
            min_y = split;
        };

        Some(Self {
            tree: self.tree,
            start: m + 1,
            end: self.end,
            depth: self.depth + 1,
            min_x,
            min_y,
            max_x: self.max_x,
            max_y: self.max_y,
            phantom: self.phantom,
        })
    }

    /// Returns `true` if this is a leaf node without children.
    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.end - self.start == 1
    }

    /// Returns `true` if this is an intermediate node with children.
    #[inline]
    pub fn is_parent(&self) -> bool {
        !self.is_leaf()
    }

    /// Lower corner of the region this node's subtree is confined to.
    ///
    /// Unbounded sides are `-inf`.
    pub fn min(&self) -> Coord<N> {
        Coord {
            x: self.min_x,
            y: self.min_y,
        }
    }

    /// Upper corner of the region this node's subtree is confined to.
    ///
    /// Unbounded sides are `+inf`.
    pub fn max(&self) -> Coord<N> {
        Coord {
            x: self.max_x,
            y: self.max_y,
        }
    }
}

/// One node visited by a radius search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TraceStep<N: IndexableNum> {
    /// Original insertion index of the visited point.
    pub id: u32,
    /// The visited point.
    pub point: Coord<N>,
    /// Depth of the visited node.
    pub depth: usize,
    /// Split axis of the visited node.
    pub axis: usize,
    /// Whether the point lies within the search radius.
    pub matched: bool,
    /// Whether the search went on into both children of this node, i.e. both exist and the
    /// splitting line is within the radius.
    pub branched_both: bool,
}

/// A lazy replay of a radius search, created by
/// [`KDTreeIndex::within_trace`][crate::kdtree::KDTreeIndex::within_trace].
///
/// Visits nodes in exactly the order of [`KDTreeIndex::within`] and applies the same pruning.
/// The matched steps are the search result.
pub struct RadiusTrace<'a, N: IndexableNum, T: KDTreeIndex<N>> {
    tree: &'a T,
    qx: N,
    qy: N,
    r: N,
    r2: N,
    /// Pending `(start, end, depth)` ranges
    stack: Vec<(usize, usize, usize)>,
}

impl<'a, N: IndexableNum, T: KDTreeIndex<N>> RadiusTrace<'a, N, T> {
    pub(crate) fn new(tree: &'a T, qx: N, qy: N, r: N) -> Self {
        let mut stack = vec![];
        if r > N::zero() && !tree.is_empty() {
            stack.push((0, tree.num_items(), 0));
        }

        Self {
            tree,
            qx,
            qy,
            r,
            r2: r * r,
            stack,
        }
    }
}

impl<N: IndexableNum, T: KDTreeIndex<N>> Clone for RadiusTrace<'_, N, T> {
    fn clone(&self) -> Self {
        Self {
            tree: self.tree,
            qx: self.qx,
            qy: self.qy,
            r: self.r,
            r2: self.r2,
            stack: self.stack.clone(),
        }
    }
}

impl<N: IndexableNum, T: KDTreeIndex<N>> Iterator for RadiusTrace<'_, N, T> {
    type Item = TraceStep<N>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let (start, end, depth) = self.stack.pop()?;
            if start >= end {
                continue;
            }

            let m = start + ((end - start) >> 1);
            let axis = depth % 2;
            let point = self.tree.point(m);
            let matched = sq_dist(point.x, point.y, self.qx, self.qy) <= self.r2;

            let diff = if axis == 0 {
                self.qx - point.x
            } else {
                self.qy - point.y
            };
            let (near, far) = split_children(start, m, end, diff);

            let cross = diff.abs() <= self.r;
            if cross {
                self.stack.push((far.0, far.1, depth + 1));
            }
            self.stack.push((near.0, near.1, depth + 1));

            return Some(TraceStep {
                id: self.tree.ids()[m],
                point,
                depth,
                axis,
                matched,
                branched_both: cross && near.0 < near.1 && far.0 < far.1,
            });
        }
    }
}
