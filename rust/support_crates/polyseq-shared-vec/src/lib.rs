//! A mutable, cheaply cloneable and windowable shared vector.
//!
//! [`SharedVec`] is a view (`offset`, `len`, `cap`) into a backing `Vec<T>` held
//! behind `Rc<RefCell<..>>`. Several views may share one backing vector: element
//! writes through any of them are visible to every view covering the slot.
//!
//! Growth follows the "capacity window" model: a view may grow in place into
//! the `cap - len` slots that follow it in the backing vector; once it runs out
//! of capacity it moves to a freshly allocated backing vector, after which it no
//! longer shares storage with any other view.

use std::cell::{Ref, RefCell, RefMut};
use std::fmt;
use std::rc::Rc;

/// Smallest capacity allocated when a view has to move to new storage.
pub const MIN_GROW_CAPACITY: usize = 4;

/// A window into shared, growable backing storage.
///
/// Invariant: `offset + cap <= inner.len()` and `len <= cap`.
pub struct SharedVec<T> {
    inner: Rc<RefCell<Vec<T>>>,
    offset: usize,
    len: usize,
    cap: usize,
}

impl<T> SharedVec<T> {
    /// Creates a new `SharedVec` owning `vec`. Capacity equals the length.
    pub fn from_vec(vec: Vec<T>) -> Self {
        let len = vec.len();
        SharedVec {
            inner: Rc::new(RefCell::new(vec)),
            offset: 0,
            len,
            cap: len,
        }
    }

    /// Returns an empty `SharedVec`.
    pub fn empty() -> Self {
        SharedVec::from_vec(Vec::new())
    }

    /// Returns the number of elements in the view.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the view is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of elements the view can hold before a push has to
    /// move it to new storage.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.cap
    }

    /// Returns `true` if both views are backed by the same storage.
    pub fn shares_storage(&self, other: &SharedVec<T>) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    /// Borrows the elements of the view.
    ///
    /// # Panics
    ///
    /// Panics if the backing storage is currently borrowed mutably.
    pub fn borrow(&self) -> Ref<'_, [T]> {
        let range = self.offset..self.offset + self.len;
        Ref::map(self.inner.borrow(), |v| &v[range])
    }

    /// Mutably borrows the elements of the view. Writes are visible to every
    /// view sharing the storage.
    ///
    /// # Panics
    ///
    /// Panics if the backing storage is currently borrowed.
    pub fn borrow_mut(&self) -> RefMut<'_, [T]> {
        let range = self.offset..self.offset + self.len;
        RefMut::map(self.inner.borrow_mut(), |v| &mut v[range])
    }

    /// Replaces the element at `index`, returning the previous value.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    pub fn replace(&self, index: usize, value: T) -> T {
        assert!(index < self.len, "index out of bounds");
        std::mem::replace(&mut self.inner.borrow_mut()[self.offset + index], value)
    }

    /// Swaps two elements of the view.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    pub fn swap(&self, i: usize, j: usize) {
        assert!(i < self.len && j < self.len, "index out of bounds");
        self.inner
            .borrow_mut()
            .swap(self.offset + i, self.offset + j);
    }

    /// Returns a sub-window `start..end` whose capacity extends to `max`, all
    /// relative to this view (the three-index slice form).
    ///
    /// # Panics
    ///
    /// Panics unless `start <= end <= max <= self.capacity()`.
    pub fn window(&self, start: usize, end: usize, max: usize) -> Self {
        assert!(
            start <= end && end <= max && max <= self.cap,
            "window out of bounds"
        );
        SharedVec {
            inner: self.inner.clone(),
            offset: self.offset + start,
            len: end - start,
            cap: max - start,
        }
    }

    /// Returns a window over the first `n` elements (clamped to the length) with
    /// capacity pinned to the window length.
    pub fn first(&self, n: usize) -> Self {
        let n = n.min(self.len);
        self.window(0, n, n)
    }

    /// Returns a window over the last `n` elements (clamped to the length) with
    /// capacity pinned to the window length.
    pub fn last(&self, n: usize) -> Self {
        let n = n.min(self.len);
        self.window(self.len - n, self.len, self.len)
    }

    /// Removes the first element by advancing the window. No element moves.
    pub fn shift(&mut self) -> Option<T>
    where
        T: Clone,
    {
        if self.len == 0 {
            return None;
        }
        let value = self.inner.borrow()[self.offset].clone();
        self.offset += 1;
        self.len -= 1;
        self.cap -= 1;
        Some(value)
    }

    /// Removes the last element by shrinking the window. The slot keeps its
    /// value and becomes spare capacity.
    pub fn pop(&mut self) -> Option<T>
    where
        T: Clone,
    {
        if self.len == 0 {
            return None;
        }
        self.len -= 1;
        Some(self.inner.borrow()[self.offset + self.len].clone())
    }
}

impl<T: Clone> SharedVec<T> {
    /// Returns a reference-free copy of the element at `index`.
    pub fn get(&self, index: usize) -> Option<T> {
        if index < self.len {
            Some(self.inner.borrow()[self.offset + index].clone())
        } else {
            None
        }
    }

    /// Converts to a `Vec<T>` by cloning the data.
    pub fn to_vec(&self) -> Vec<T> {
        self.borrow().to_vec()
    }

    /// Returns a view over newly allocated storage holding a copy of this
    /// view's elements. The result shares nothing with `self`.
    pub fn copy(&self) -> Self {
        SharedVec::from_vec(self.to_vec())
    }

    /// Overwrites the elements of the view, in place, with `values`.
    ///
    /// # Panics
    ///
    /// Panics if `values.len() != self.len()`.
    pub fn overwrite(&self, values: Vec<T>) {
        assert_eq!(values.len(), self.len, "length mismatch");
        let mut slots = self.borrow_mut();
        for (slot, value) in slots.iter_mut().zip(values) {
            *slot = value;
        }
    }

    /// Appends `value`.
    ///
    /// When the view has spare capacity the value is written in place, into a
    /// slot that other views of the same storage may cover. Otherwise the view
    /// moves to new storage (filling unused slots with `fill`).
    ///
    /// Returns `true` if the view moved to new storage.
    pub fn push(&mut self, value: T, fill: &T) -> bool {
        let moved = self.reserve_one(fill);
        self.inner.borrow_mut()[self.offset + self.len] = value;
        self.len += 1;
        moved
    }

    /// Inserts `value` at `index`, shifting later elements up by one.
    ///
    /// Returns `true` if the view moved to new storage.
    ///
    /// # Panics
    ///
    /// Panics if `index > self.len()`.
    pub fn insert(&mut self, index: usize, value: T, fill: &T) -> bool {
        assert!(index <= self.len, "insert index out of bounds");
        let moved = self.reserve_one(fill);
        self.len += 1;
        let mut slots = self.borrow_mut();
        slots[index..].rotate_right(1);
        slots[index] = value;
        moved
    }

    /// Removes the element at `index`, shifting later elements down by one and
    /// clearing the vacated trailing slot to `fill`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.len()`.
    pub fn remove(&mut self, index: usize, fill: &T) -> T {
        assert!(index < self.len, "remove index out of bounds");
        let removed = {
            let mut slots = self.borrow_mut();
            slots[index..].rotate_left(1);
            let last = slots.len() - 1;
            std::mem::replace(&mut slots[last], fill.clone())
        };
        self.len -= 1;
        removed
    }

    fn reserve_one(&mut self, fill: &T) -> bool {
        if self.len < self.cap {
            return false;
        }
        let new_cap = (self.cap * 2).max(self.len + 1).max(MIN_GROW_CAPACITY);
        let mut vec = Vec::with_capacity(new_cap);
        vec.extend_from_slice(&self.borrow());
        vec.resize(new_cap, fill.clone());
        self.inner = Rc::new(RefCell::new(vec));
        self.offset = 0;
        self.cap = new_cap;
        true
    }
}

impl<T> Clone for SharedVec<T> {
    /// Returns an alias of this view with its capacity pinned to its length, so
    /// that growing the clone never writes past the end of the original window.
    fn clone(&self) -> Self {
        SharedVec {
            inner: self.inner.clone(),
            offset: self.offset,
            len: self.len,
            cap: self.len,
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for SharedVec<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SharedVec").field(&&*self.borrow()).finish()
    }
}

impl<T: PartialEq> PartialEq for SharedVec<T> {
    fn eq(&self, other: &Self) -> bool {
        *self.borrow() == *other.borrow()
    }
}

impl<T: Eq> Eq for SharedVec<T> {}

impl<T> Default for SharedVec<T> {
    fn default() -> Self {
        SharedVec::empty()
    }
}
