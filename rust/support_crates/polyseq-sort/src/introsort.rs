use crate::Sortable;

/// Runs shorter than this are finished with insertion sort.
const INSERTION_SORT_THRESHOLD: usize = 12;

/// Sorts `data` in place in O(n log n) comparisons and swaps.
///
/// Quicksort with a median-of-three pivot; recursion deeper than
/// `2 * log2(n)` falls back to heapsort, short runs use insertion sort.
/// The sort is not stable.
pub fn sort<S: Sortable + ?Sized>(data: &mut S) {
    let n = data.len();
    if n < 2 {
        return;
    }
    let max_depth = 2 * (usize::BITS - n.leading_zeros()) as usize;
    quick_sort(data, 0, n, max_depth);
}

fn quick_sort<S: Sortable + ?Sized>(data: &mut S, mut lo: usize, mut hi: usize, mut depth: usize) {
    while hi - lo > INSERTION_SORT_THRESHOLD {
        if depth == 0 {
            heap_sort(data, lo, hi);
            return;
        }
        depth -= 1;
        let p = partition(data, lo, hi);
        // Recurse into the smaller side, loop on the larger one.
        if p - lo < hi - p {
            quick_sort(data, lo, p, depth);
            lo = p + 1;
        } else {
            quick_sort(data, p + 1, hi, depth);
            hi = p;
        }
    }
    if hi - lo > 1 {
        insertion_sort(data, lo, hi);
    }
}

/// Partitions `lo..hi` around a median-of-three pivot and returns the pivot's
/// final position. Requires `hi - lo >= 3`.
fn partition<S: Sortable + ?Sized>(data: &mut S, lo: usize, hi: usize) -> usize {
    let mid = lo + (hi - lo) / 2;
    let last = hi - 1;
    if data.less(mid, lo) {
        data.swap(mid, lo);
    }
    if data.less(last, mid) {
        data.swap(last, mid);
        if data.less(mid, lo) {
            data.swap(mid, lo);
        }
    }
    data.swap(mid, last);

    let mut store = lo;
    for i in lo..last {
        if data.less(i, last) {
            if i != store {
                data.swap(i, store);
            }
            store += 1;
        }
    }
    if store != last {
        data.swap(store, last);
    }
    store
}

fn insertion_sort<S: Sortable + ?Sized>(data: &mut S, lo: usize, hi: usize) {
    for i in lo + 1..hi {
        let mut j = i;
        while j > lo && data.less(j, j - 1) {
            data.swap(j, j - 1);
            j -= 1;
        }
    }
}

fn heap_sort<S: Sortable + ?Sized>(data: &mut S, lo: usize, hi: usize) {
    let n = hi - lo;
    for root in (0..n / 2).rev() {
        sift_down(data, root, n, lo);
    }
    for end in (1..n).rev() {
        data.swap(lo, lo + end);
        sift_down(data, 0, end, lo);
    }
}

/// Restores the max-heap property below `root` in the heap `first..first + n`.
fn sift_down<S: Sortable + ?Sized>(data: &mut S, mut root: usize, n: usize, first: usize) {
    loop {
        let mut child = 2 * root + 1;
        if child >= n {
            return;
        }
        if child + 1 < n && data.less(first + child, first + child + 1) {
            child += 1;
        }
        if !data.less(first + root, first + child) {
            return;
        }
        data.swap(first + root, first + child);
        root = child;
    }
}
