//! An implementation of an immutable K-D Tree with radius search.
//!
//! The tree is stored as two kd-sorted arrays (coordinates and insertion ids). The node covering
//! positions `[start, end)` is the median at `start + (end - start) / 2`; the positions before
//! and after it are its left and right subtrees. Split axes alternate between x and y with
//! depth.

#![warn(missing_docs)]

mod builder;
mod index;
mod r#trait;
mod traversal;

pub use builder::KDTreeBuilder;
pub use index::{KDTree, KDTreeRef};
pub use r#trait::KDTreeIndex;
pub use traversal::{Node, RadiusTrace, TraceStep};
