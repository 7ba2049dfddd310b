//! The runtime-typed sequence view.

use std::fmt;
use std::hash::{Hash, Hasher};

use polyseq_common::{Error, Result, result::verify_index};
use polyseq_shared_vec::SharedVec;

use crate::{
    element::{Element, convert},
    element_type::ElementType,
    unify::{Unified, resolve_produced, unify_any},
    value::Value,
};

/// An ordered run of elements sharing one [`ElementType`].
///
/// A `Sequence` is a view over shared storage. `clone`, [`Sequence::first`]
/// and [`Sequence::last`] alias the storage of the source; [`Sequence::copy`]
/// does not. Element writes (`set`, `sort`, `reverse`, ...) are visible to
/// every alias covering the written slot.
#[derive(Clone)]
pub struct Sequence {
    pub(crate) elem_type: ElementType,
    pub(crate) data: SharedVec<Value>,
}

impl Sequence {
    /// Returns an empty sequence of the given element type.
    pub fn empty(elem_type: ElementType) -> Sequence {
        Sequence {
            elem_type,
            data: SharedVec::empty(),
        }
    }

    /// Wraps a typed vector. Takes ownership of the values, no unification
    /// is performed beyond the static type of `T`.
    pub fn from_vec<T: Element>(values: Vec<T>) -> Sequence {
        Sequence::from_element_values::<T>(values.into_iter().map(Element::into_value).collect())
    }

    /// Builds a sequence from dynamically typed values, resolving one element
    /// type for all of them.
    ///
    /// A single sequence value is passed through as that sequence (an alias of
    /// its storage). Conflicting types produce an `Any`-typed sequence.
    pub fn from_values(mut values: Vec<Value>) -> Sequence {
        if values.len() == 1 && matches!(values[0], Value::Seq(_)) {
            if let Some(Value::Seq(seq)) = values.pop() {
                return seq;
            }
        }
        unify_any(values).into_sequence()
    }

    pub fn from_unified(unified: Unified) -> Sequence {
        Sequence::with_type(unified.elem_type, unified.values)
    }

    /// Assumes every value already conforms to `elem_type`.
    pub(crate) fn with_type(elem_type: ElementType, values: Vec<Value>) -> Sequence {
        Sequence {
            elem_type,
            data: SharedVec::from_vec(values),
        }
    }

    /// Replaces nulls with the zero value of `elem_type`.
    pub(crate) fn from_normalized(elem_type: ElementType, mut values: Vec<Value>) -> Sequence {
        if !elem_type.is_any() {
            for value in values.iter_mut().filter(|v| v.is_null()) {
                *value = elem_type.zero_value();
            }
        }
        Sequence::with_type(elem_type, values)
    }

    /// Builds a sequence out of values produced from `U`. The element type is
    /// `U`'s static type when it has one, otherwise it is resolved from the
    /// values themselves.
    pub(crate) fn from_element_values<U: Element>(values: Vec<Value>) -> Sequence {
        let elem_type = resolve_produced::<U>(&values);
        Sequence::from_normalized(elem_type, values)
    }

    #[inline]
    pub fn element_type(&self) -> &ElementType {
        &self.elem_type
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Number of elements the view can hold before growing moves it to new
    /// storage.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.data.capacity()
    }

    /// Returns a sequence with the same type and elements over new storage.
    pub fn copy(&self) -> Sequence {
        Sequence {
            elem_type: self.elem_type.clone(),
            data: self.data.copy(),
        }
    }

    /// Returns a view of the first `n` elements (`n` is clamped to the length).
    ///
    /// The view aliases this sequence's storage and its capacity is pinned to
    /// its length, so growing the view never overwrites elements beyond it.
    pub fn first(&self, n: usize) -> Sequence {
        Sequence {
            elem_type: self.elem_type.clone(),
            data: self.data.first(n),
        }
    }

    /// Returns a view of the last `n` elements (`n` is clamped to the length).
    /// See [`Sequence::first`].
    pub fn last(&self, n: usize) -> Sequence {
        Sequence {
            elem_type: self.elem_type.clone(),
            data: self.data.last(n),
        }
    }

    pub fn get(&self, index: usize) -> Option<Value> {
        self.data.get(index)
    }

    /// Snapshot of the elements.
    pub fn values(&self) -> Vec<Value> {
        self.data.to_vec()
    }

    /// Overwrites the element at `index`. The write is visible through every
    /// view sharing the slot.
    pub fn set(&self, index: usize, value: impl Into<Value>) -> Result<()> {
        verify_index("set", index, self.len(), false)?;
        let value = self.elem_type.coerce("set", value.into())?;
        self.data.replace(index, value);
        Ok(())
    }

    /// Returns `true` if both sequences are views over the same storage.
    pub fn shares_storage_with(&self, other: &Sequence) -> bool {
        self.data.shares_storage(&other.data)
    }

    /// Extracts the elements as `T`.
    ///
    /// Fails with a type mismatch if `T` does not accept the element type, or
    /// if an element does not fit into `T` (e.g. `300` into `u8`).
    ///
    /// `Value` extracts the elements of any sequence as they are.
    pub fn to_vec<T: Element>(&self) -> Result<Vec<T>> {
        self.check_type::<T>("to_vec", T::extracts(&self.elem_type))?;
        self.convert_values("to_vec")
    }

    fn check_type<T: Element>(&self, context: &str, accepted: bool) -> Result<()> {
        if accepted {
            Ok(())
        } else {
            Err(Error::type_mismatch(
                context,
                &self.elem_type,
                std::any::type_name::<T>(),
            ))
        }
    }

    fn convert_values<T: Element>(&self, context: &str) -> Result<Vec<T>> {
        self.values()
            .into_iter()
            .map(|value| convert(context, value))
            .collect()
    }

    /// Converts every element to the callback input type `T` up front, so a
    /// failing conversion is reported before any callback runs. `T` must
    /// declare exactly the element type, so `Value` inputs need an `Any`
    /// sequence.
    pub(crate) fn typed_values<T: Element>(&self, context: &str) -> Result<Vec<T>> {
        self.check_type::<T>(context, T::accepts(&self.elem_type))?;
        self.convert_values(context)
    }
}

impl Default for Sequence {
    fn default() -> Self {
        Sequence::empty(ElementType::Any)
    }
}

impl PartialEq for Sequence {
    fn eq(&self, other: &Self) -> bool {
        self.elem_type == other.elem_type && self.data == other.data
    }
}

impl Eq for Sequence {}

impl Hash for Sequence {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.elem_type.hash(state);
        let values = self.data.borrow();
        values.len().hash(state);
        for value in values.iter() {
            value.hash(state);
        }
    }
}

impl fmt::Debug for Sequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.data.borrow().iter()).finish()
    }
}

impl<T: Element> From<Vec<T>> for Sequence {
    fn from(values: Vec<T>) -> Self {
        Sequence::from_vec(values)
    }
}

/// Iterates over a snapshot of the elements.
impl IntoIterator for Sequence {
    type Item = Value;
    type IntoIter = std::vec::IntoIter<Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.values().into_iter()
    }
}

impl IntoIterator for &Sequence {
    type Item = Value;
    type IntoIter = std::vec::IntoIter<Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.values().into_iter()
    }
}

impl<T: Element> FromIterator<T> for Sequence {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Sequence::from_vec(iter.into_iter().collect())
    }
}
