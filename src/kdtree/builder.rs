use std::cmp;

use geo_traits::CoordTrait;

use crate::kdtree::KDTree;
use crate::r#type::IndexableNum;

/// A builder to create a [`KDTree`].
pub struct KDTreeBuilder<N: IndexableNum> {
    /// Interleaved `x, y` pairs, in insertion order until `finish` kd-sorts them.
    coords: Vec<N>,
    ids: Vec<u32>,

    num_items: usize,
}

impl<N: IndexableNum> KDTreeBuilder<N> {
    /// Create a new builder with the provided number of items.
    pub fn new(num_items: usize) -> Self {
        assert!(num_items <= u32::MAX as usize);

        Self {
            coords: Vec::with_capacity(num_items * 2),
            ids: Vec::with_capacity(num_items),
            num_items,
        }
    }

    /// Add a point to the index.
    ///
    /// Returns the insertion index, which is the id reported by queries.
    pub fn add(&mut self, x: N, y: N) -> usize {
        let index = self.ids.len();
        self.ids.push(index as u32);
        self.coords.push(x);
        self.coords.push(y);
        index
    }

    /// Add a point to the index.
    pub fn add_coord(&mut self, coord: &impl CoordTrait<T = N>) -> usize {
        self.add(coord.x(), coord.y())
    }

    /// Consume this builder, performing the k-d sort and generating a KDTree ready for queries.
    pub fn finish(mut self) -> KDTree<N> {
        assert_eq!(
            self.ids.len(),
            self.num_items,
            "Added {} items when expected {}.",
            self.ids.len(),
            self.num_items
        );

        // kd-sort both arrays so the tree shape is implied by the positions
        sort(&mut self.ids, &mut self.coords, 0, self.num_items, 0);
        log::debug!("built kd-tree over {} points", self.num_items);

        KDTree {
            coords: self.coords,
            ids: self.ids,
        }
    }
}

/// Recursively place the median of `[start, end)` at `start + count / 2`, then recurse into both
/// halves on the other axis.
fn sort<N: IndexableNum>(ids: &mut [u32], coords: &mut [N], start: usize, end: usize, axis: usize) {
    if end - start <= 1 {
        return;
    }

    let m = start + ((end - start) >> 1);

    // partition around the middle index so that the halves lie either left/right or
    // below/above correspondingly (taking turns)
    select(ids, coords, m, start, end - 1, axis);

    sort(ids, coords, start, m, 1 - axis);
    sort(ids, coords, m + 1, end, 1 - axis);
}

/// Custom Floyd-Rivest selection algorithm: sort ids and coords so that [left..k-1] items are
/// smaller than or equal to the k-th item, and [k+1..right] items are greater than or equal,
/// on the given axis.
#[inline]
fn select<N: IndexableNum>(
    ids: &mut [u32],
    coords: &mut [N],
    k: usize,
    mut left: usize,
    mut right: usize,
    axis: usize,
) {
    while right > left {
        if right - left > 600 {
            let n = (right - left + 1) as f64;
            let m = (k - left + 1) as f64;
            let z = f64::ln(n);
            let s = 0.5 * f64::exp((2.0 * z) / 3.0);
            let sd = 0.5
                * f64::sqrt((z * s * (n - s)) / n)
                * (if m - n / 2.0 < 0.0 { -1.0 } else { 1.0 });
            let new_left = cmp::max(left, f64::floor(k as f64 - (m * s) / n + sd) as usize);
            let new_right = cmp::min(
                right,
                f64::floor(k as f64 + ((n - m) * s) / n + sd) as usize,
            );
            select(ids, coords, k, new_left, new_right, axis);
        }

        let t = coords[2 * k + axis];
        let mut i = left;
        let mut j = right;

        swap_item(ids, coords, left, k);
        if coords[2 * right + axis] > t {
            swap_item(ids, coords, left, right);
        }

        while i < j {
            swap_item(ids, coords, i, j);
            i += 1;
            j -= 1;
            while coords[2 * i + axis] < t {
                i += 1;
            }
            while coords[2 * j + axis] > t {
                j -= 1;
            }
        }

        if coords[2 * left + axis] == t {
            swap_item(ids, coords, left, j);
        } else {
            j += 1;
            swap_item(ids, coords, j, right);
        }

        if j <= k {
            left = j + 1;
        }
        if k <= j {
            right = j - 1;
        }
    }
}

#[inline]
fn swap_item<N: IndexableNum>(ids: &mut [u32], coords: &mut [N], i: usize, j: usize) {
    ids.swap(i, j);
    coords.swap(2 * i, 2 * j);
    coords.swap(2 * i + 1, 2 * j + 1);
}
