//! Derivations driven by caller callbacks: map, filter, reduce, group_by, the
//! quantifiers and flatten.
//!
//! A callback's parameter type declares the element type it expects. It is
//! checked against the sequence's element type before the callback is first
//! called, so a mismatch never leaves partial results behind.

use ahash::AHashMap;
use polyseq_common::Result;

use crate::{
    dict::Dict,
    element::Element,
    element_type::ElementType,
    sequence::Sequence,
    unify::{flatten_unify, resolve_produced},
    value::Value,
};

impl Sequence {
    /// Applies `f` to every element. The element type of the result is that of
    /// `U` (resolved from the produced values for nested sequences and
    /// records). The result owns new storage with capacity equal to its length.
    pub fn map<T, U, F>(&self, mut f: F) -> Result<Sequence>
    where
        T: Element,
        U: Element,
        F: FnMut(T) -> U,
    {
        let inputs = self.typed_values::<T>("map")?;
        let outputs = inputs
            .into_iter()
            .map(|input| f(input).into_value())
            .collect();
        Ok(Sequence::from_element_values::<U>(outputs))
    }

    /// Returns the elements for which `predicate` holds, in order, in new
    /// storage.
    pub fn filter<T, F>(&self, mut predicate: F) -> Result<Sequence>
    where
        T: Element,
        F: FnMut(&T) -> bool,
    {
        let inputs = self.typed_values::<T>("filter")?;
        let kept = inputs
            .iter()
            .zip(self.values())
            .filter_map(|(input, value)| predicate(input).then_some(value))
            .collect();
        Ok(Sequence::with_type(self.elem_type.clone(), kept))
    }

    /// Left fold over the elements, starting from `seed` or, when omitted,
    /// from `A::default()`.
    pub fn reduce<A, T, F>(&self, seed: Option<A>, mut f: F) -> Result<A>
    where
        A: Default,
        T: Element,
        F: FnMut(A, T) -> A,
    {
        let inputs = self.typed_values::<T>("reduce")?;
        Ok(inputs.into_iter().fold(seed.unwrap_or_default(), &mut f))
    }

    /// Partitions the elements by the key `f` computes for each of them.
    ///
    /// Every bucket is a sequence of this sequence's element type keeping the
    /// relative order of its elements. The order of buckets is unspecified.
    pub fn group_by<T, K, F>(&self, mut f: F) -> Result<Dict>
    where
        T: Element,
        K: Element,
        F: FnMut(&T) -> K,
    {
        let inputs = self.typed_values::<T>("group_by")?;
        let keys: Vec<Value> = inputs.iter().map(|input| f(input).into_value()).collect();
        let key_type = resolve_produced::<K>(&keys);

        let mut buckets: AHashMap<Value, Vec<Value>> = AHashMap::new();
        for (key, value) in keys.into_iter().zip(self.values()) {
            buckets
                .entry(key_type.normalize(key))
                .or_default()
                .push(value);
        }
        log::trace!("group_by: {} buckets keyed by {key_type}", buckets.len());

        let value_type = ElementType::Seq(Box::new(self.elem_type.clone()));
        let entries = buckets
            .into_iter()
            .map(|(key, bucket)| {
                let group = Sequence::with_type(self.elem_type.clone(), bucket);
                (key, Value::Seq(group))
            })
            .collect();
        Ok(Dict::from_typed_entries(key_type, value_type, entries))
    }

    /// `true` if `predicate` holds for at least one element. Stops at the first
    /// match.
    pub fn any<T, F>(&self, predicate: F) -> Result<bool>
    where
        T: Element,
        F: FnMut(&T) -> bool,
    {
        Ok(self.count_matches("any", predicate, 1)? == 1)
    }

    /// `true` if `predicate` holds for every element; vacuously `true` when
    /// empty. Stops at the first element that fails.
    pub fn all<T, F>(&self, mut predicate: F) -> Result<bool>
    where
        T: Element,
        F: FnMut(&T) -> bool,
    {
        Ok(self.count_matches("all", |input: &T| !predicate(input), 1)? == 0)
    }

    /// `true` if `predicate` holds for no element. Stops at the first match.
    pub fn none<T, F>(&self, predicate: F) -> Result<bool>
    where
        T: Element,
        F: FnMut(&T) -> bool,
    {
        Ok(self.count_matches("none", predicate, 1)? == 0)
    }

    /// `true` if `predicate` holds for exactly one element. Stops at the second
    /// match.
    pub fn one<T, F>(&self, predicate: F) -> Result<bool>
    where
        T: Element,
        F: FnMut(&T) -> bool,
    {
        Ok(self.count_matches("one", predicate, 2)? == 1)
    }

    /// `true` if `predicate` holds for more than one element. Stops at the
    /// second match.
    pub fn many<T, F>(&self, predicate: F) -> Result<bool>
    where
        T: Element,
        F: FnMut(&T) -> bool,
    {
        Ok(self.count_matches("many", predicate, 2)? == 2)
    }

    /// Flattens arbitrarily nested sequences into one sequence of their leaves,
    /// depth first. See [`flatten_unify`].
    pub fn flatten(&self) -> Sequence {
        flatten_unify(&self.values()).into_sequence()
    }

    /// Counts elements matching `predicate`, stopping once `limit` is reached.
    fn count_matches<T, F>(&self, context: &str, mut predicate: F, limit: usize) -> Result<usize>
    where
        T: Element,
        F: FnMut(&T) -> bool,
    {
        let inputs = self.typed_values::<T>(context)?;
        let mut count = 0;
        for input in &inputs {
            if predicate(input) {
                count += 1;
                if count == limit {
                    break;
                }
            }
        }
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;
    use crate::seq;

    fn animals() -> Sequence {
        seq!["dog", "cat", "bear", "cow", "bull", "pig", "iguana"]
    }

    #[test]
    fn test_map_changes_type() {
        let lengths = animals().map(|s: String| s.len()).unwrap();
        assert_eq!(lengths.element_type(), &ElementType::Int);
        assert_eq!(lengths.to_vec::<usize>().unwrap(), vec![3, 3, 4, 3, 4, 3, 6]);
        assert_eq!(lengths.capacity(), lengths.len());

        let halves = seq![1, 2].map(|i: i64| i as f64 / 2.0).unwrap();
        assert_eq!(halves.to_vec::<f64>().unwrap(), vec![0.5, 1.0]);
    }

    #[test]
    fn test_map_resolves_nested_types() {
        let nested = seq![1, 2].map(|i: i64| seq![i, i]).unwrap();
        assert_eq!(nested.element_type(), &ElementType::Seq(Box::new(ElementType::Int)));

        let empty = Sequence::from_vec(Vec::<i64>::new())
            .map(|i: i64| seq![i])
            .unwrap();
        assert_eq!(empty.element_type(), &ElementType::Seq(Box::new(ElementType::Any)));

        let values = seq![1, 2].map(|i: i64| Value::from(i)).unwrap();
        assert!(values.element_type().is_any());
    }

    #[test]
    fn test_map_rejects_mismatched_input() {
        let err = animals().map(|i: i64| i + 1).unwrap_err();
        assert!(err.is_type_mismatch());
    }

    #[test]
    fn test_value_callbacks_rejected_on_typed_sequence() {
        let numbers = seq![1, 2, 3];
        assert!(numbers.map(|v: Value| v.type_label()).unwrap_err().is_type_mismatch());
        assert!(numbers.filter(|v: &Value| !v.is_null()).unwrap_err().is_type_mismatch());
        assert!(numbers.group_by(|v: &Value| v.clone()).unwrap_err().is_type_mismatch());
        assert!(numbers.any(|v: &Value| v.is_null()).unwrap_err().is_type_mismatch());

        let mixed = seq![1, "a"];
        assert_eq!(mixed.map(|v: Value| v.is_null()).unwrap().len(), 2);
    }

    #[test]
    fn test_map_to_sequences_of_differing_types() {
        let nested = seq![0, 1, 2]
            .map(|i: i64| if i == 0 { seq![] } else { seq![i] })
            .unwrap();
        assert_eq!(nested.element_type(), &ElementType::Seq(Box::new(ElementType::Any)));
        let inner = nested.to_vec::<Sequence>().unwrap();
        assert!(inner[0].is_empty());
        assert_eq!(inner[2].to_vec::<i64>().unwrap(), vec![2]);

        let keyed = seq![0, 1]
            .group_by(|i: &i64| if *i == 0 { seq![] } else { seq![*i] })
            .unwrap();
        assert_eq!(keyed.key_type(), &ElementType::Seq(Box::new(ElementType::Any)));
    }

    #[test]
    fn test_filter() {
        let three = animals().filter(|s: &String| s.len() == 3).unwrap();
        assert_eq!(three.to_vec::<String>().unwrap(), vec!["dog", "cat", "cow", "pig"]);
        assert!(!three.shares_storage_with(&animals()));

        let none = seq![1, 2, 3].filter(|i: &i64| *i > 10).unwrap();
        assert!(none.is_empty());
        assert_eq!(none.element_type(), &ElementType::Int);
    }

    #[test]
    fn test_reduce() {
        let joined = seq!["dog", "cat", "bear", "cow"]
            .reduce(Some("monkey".to_string()), |acc: String, s: String| {
                format!("{acc}-{s}")
            })
            .unwrap();
        assert_eq!(joined, "monkey-dog-cat-bear-cow");

        let sum = seq![1, 2, 3, 4].reduce(None, |acc: i64, i: i64| acc + i).unwrap();
        assert_eq!(sum, 10);

        let empty = Sequence::from_vec(Vec::<i64>::new())
            .reduce(None, |acc: i64, i: i64| acc + i)
            .unwrap();
        assert_eq!(empty, 0);
    }

    #[test]
    fn test_group_by() {
        let groups = animals().group_by(|s: &String| s.len()).unwrap();
        assert_eq!(groups.len(), 3);
        assert_eq!(groups.key_type(), &ElementType::Int);
        assert_eq!(
            groups.value_type(),
            &ElementType::Seq(Box::new(ElementType::Str))
        );
        let three = groups.get(3).and_then(Value::as_seq).unwrap();
        assert_eq!(three.to_vec::<String>().unwrap(), vec!["dog", "cat", "cow", "pig"]);
        let four = groups.get(4).and_then(Value::as_seq).unwrap();
        assert_eq!(four.to_vec::<String>().unwrap(), vec!["bear", "bull"]);
        let six = groups.get(6).and_then(Value::as_seq).unwrap();
        assert_eq!(six.to_vec::<String>().unwrap(), vec!["iguana"]);
    }

    #[test]
    fn test_group_by_optional_keys_normalize() {
        let groups = seq![1, 2, 3, 4]
            .group_by(|i: &i64| (*i % 2 == 0).then_some(*i % 3))
            .unwrap();
        // odd elements map to None, which becomes the zero key
        let zero = groups.get(0).and_then(Value::as_seq).unwrap();
        assert_eq!(zero.to_vec::<i64>().unwrap(), vec![1, 3]);
        assert_eq!(groups.len(), 3);
    }

    #[test]
    fn test_quantifiers() {
        let numbers = seq![1, 2, 3, 4];
        assert!(numbers.any(|i: &i64| *i > 3).unwrap());
        assert!(numbers.all(|i: &i64| *i > 0).unwrap());
        assert!(numbers.none(|i: &i64| *i > 4).unwrap());
        assert!(numbers.one(|i: &i64| *i == 2).unwrap());
        assert!(!numbers.one(|i: &i64| *i % 2 == 0).unwrap());
        assert!(numbers.many(|i: &i64| *i % 2 == 0).unwrap());
        assert!(!numbers.many(|i: &i64| *i == 1).unwrap());

        let empty = Sequence::from_vec(Vec::<i64>::new());
        assert!(empty.all(|_: &i64| false).unwrap());
        assert!(!empty.any(|_: &i64| true).unwrap());
        assert!(empty.none(|_: &i64| true).unwrap());
    }

    #[test]
    fn test_quantifiers_short_circuit() {
        let numbers = seq![2, 4, 6, 8];
        let calls = Cell::new(0);
        let even = |i: &i64| {
            calls.set(calls.get() + 1);
            *i % 2 == 0
        };
        assert!(numbers.many(even).unwrap());
        assert_eq!(calls.get(), 2);

        calls.set(0);
        assert!(!numbers.one(even).unwrap());
        assert_eq!(calls.get(), 2);

        calls.set(0);
        assert!(numbers.any(even).unwrap());
        assert_eq!(calls.get(), 1);

        calls.set(0);
        assert!(!numbers.all(|i: &i64| {
            calls.set(calls.get() + 1);
            *i < 4
        })
        .unwrap());
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn test_flatten() {
        let nested = seq![seq![1, 2], Value::Null, seq![seq![3], 4], 5];
        let flat = nested.flatten();
        assert_eq!(flat.element_type(), &ElementType::Int);
        assert_eq!(flat.to_vec::<i64>().unwrap(), vec![1, 2, 0, 3, 4, 5]);

        let mixed = seq![seq![1], seq!["a"]].flatten();
        assert!(mixed.element_type().is_any());
        assert_eq!(mixed.len(), 2);
    }
}
