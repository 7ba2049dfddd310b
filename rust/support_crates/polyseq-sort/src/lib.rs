//! Index-based sorting over the three-operation ordering contract.
//!
//! Anything that can report its length, compare two positions and swap two
//! positions implements [`Sortable`] and can be ordered with [`sort`], checked
//! with [`is_sorted`] and scanned for extremes with [`min_index`] and
//! [`max_index`]. The algorithms never look at elements directly, so the same
//! code serves built-in element kinds, caller-defined record types and
//! collections that callers own entirely.

mod adapters;
mod introsort;


pub use adapters::LessSlice;
pub use introsort::sort;

/// The ordering contract: length, strict "less" between two positions, swap.
///
/// `less` must describe a strict weak ordering: irreflexive, transitive, and
/// with incomparability transitive as well.
pub trait Sortable {
    /// Number of elements.
    fn len(&self) -> usize;

    /// Returns `true` if the element at `i` must sort before the element at `j`.
    fn less(&self, i: usize, j: usize) -> bool;

    /// Swaps the elements at `i` and `j`.
    fn swap(&mut self, i: usize, j: usize);

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<S: Sortable + ?Sized> Sortable for &mut S {
    fn len(&self) -> usize {
        (**self).len()
    }

    fn less(&self, i: usize, j: usize) -> bool {
        (**self).less(i, j)
    }

    fn swap(&mut self, i: usize, j: usize) {
        (**self).swap(i, j)
    }
}

/// Returns `true` if no element is less than its predecessor.
pub fn is_sorted<S: Sortable + ?Sized>(data: &S) -> bool {
    (1..data.len()).all(|i| !data.less(i, i - 1))
}

/// Returns the position of the greatest element, or `None` when empty.
///
/// Single linear scan; among equal maxima the first occurrence wins.
pub fn max_index<S: Sortable + ?Sized>(data: &S) -> Option<usize> {
    if data.is_empty() {
        return None;
    }
    let mut best = 0;
    for i in 1..data.len() {
        if data.less(best, i) {
            best = i;
        }
    }
    Some(best)
}

/// Returns the position of the least element, or `None` when empty.
///
/// Single linear scan; among equal minima the first occurrence wins.
pub fn min_index<S: Sortable + ?Sized>(data: &S) -> Option<usize> {
    if data.is_empty() {
        return None;
    }
    let mut best = 0;
    for i in 1..data.len() {
        if data.less(i, best) {
            best = i;
        }
    }
    Some(best)
}
