//! Runtime-typed associative collection.

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

use ahash::AHashMap;
use polyseq_common::{Error, Result};

use crate::{
    element::{Element, convert},
    element_type::ElementType,
    sequence::Sequence,
    unify::{UnifyOptions, resolve_produced, unify},
    value::Value,
};

/// An unordered map from keys of one element type to values of another.
///
/// Both types are fixed at construction. Iteration order is unspecified.
#[derive(Clone, PartialEq)]
pub struct Dict {
    key_type: ElementType,
    value_type: ElementType,
    entries: AHashMap<Value, Value>,
}

impl Dict {
    pub fn new(key_type: ElementType, value_type: ElementType) -> Dict {
        Dict::from_typed_entries(key_type, value_type, AHashMap::new())
    }

    /// An empty `Any` to `Any` map.
    pub fn empty() -> Dict {
        Dict::new(ElementType::Any, ElementType::Any)
    }

    /// Builds a map from typed pairs. Later pairs replace earlier ones with an
    /// equal key.
    pub fn from_pairs<K, V, I>(pairs: I) -> Dict
    where
        K: Element,
        V: Element,
        I: IntoIterator<Item = (K, V)>,
    {
        let (keys, values): (Vec<Value>, Vec<Value>) = pairs
            .into_iter()
            .map(|(key, value)| (key.into_value(), value.into_value()))
            .unzip();
        let key_type = resolve_produced::<K>(&keys);
        let value_type = resolve_produced::<V>(&values);
        let entries = keys
            .into_iter()
            .zip(values)
            .map(|(key, value)| (key_type.normalize(key), value_type.normalize(value)))
            .collect();
        Dict::from_typed_entries(key_type, value_type, entries)
    }

    /// Assumes every key and value already conforms to its type.
    pub(crate) fn from_typed_entries(
        key_type: ElementType,
        value_type: ElementType,
        entries: AHashMap<Value, Value>,
    ) -> Dict {
        Dict {
            key_type,
            value_type,
            entries,
        }
    }

    pub fn key_type(&self) -> &ElementType {
        &self.key_type
    }

    pub fn value_type(&self) -> &ElementType {
        &self.value_type
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Inserts an entry, returning the value previously stored under `key`.
    /// Absent keys and values become the zero value of their type.
    pub fn insert(
        &mut self,
        key: impl Into<Value>,
        value: impl Into<Value>,
    ) -> Result<Option<Value>> {
        let key = self.key_type.coerce("insert", key.into())?;
        let value = self.value_type.coerce("insert", value.into())?;
        Ok(self.entries.insert(key, value))
    }

    pub fn get(&self, key: impl Into<Value>) -> Option<&Value> {
        self.entries.get(&key.into())
    }

    pub fn contains_key(&self, key: impl Into<Value>) -> bool {
        self.entries.contains_key(&key.into())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Value, &Value)> {
        self.entries.iter()
    }

    /// Returns a map with its own entry storage. Nested sequences held as
    /// values are aliased, not copied.
    pub fn copy(&self) -> Dict {
        self.clone()
    }

    /// The keys, in no particular order.
    pub fn keys(&self) -> Sequence {
        Sequence::with_type(self.key_type.clone(), self.entries.keys().cloned().collect())
    }

    /// The values, in no particular order.
    pub fn values(&self) -> Sequence {
        Sequence::with_type(
            self.value_type.clone(),
            self.entries.values().cloned().collect(),
        )
    }

    /// Returns the entries whose key is in `keys`.
    ///
    /// A single sequence argument is taken as the key list. Keys that are not
    /// present are ignored; an empty or absent key set yields an empty map.
    /// Fails with a type mismatch if the keys are not of the key type.
    pub fn only<I>(&self, keys: I) -> Result<Dict>
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        let mut selected = AHashMap::new();
        for key in self.key_set("only", keys)? {
            if let Some((key, value)) = self.entries.get_key_value(&key) {
                selected.insert(key.clone(), value.clone());
            }
        }
        Ok(Dict::from_typed_entries(
            self.key_type.clone(),
            self.value_type.clone(),
            selected,
        ))
    }

    /// Returns `true` if every key in `keys` is present. An empty or absent
    /// key set is trivially present.
    pub fn has_keys<I>(&self, keys: I) -> Result<bool>
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        Ok(self
            .key_set("has_keys", keys)?
            .iter()
            .all(|key| self.entries.contains_key(key)))
    }

    /// Extracts the entries as a typed map.
    pub fn to_hash_map<K, V>(&self) -> Result<HashMap<K, V>>
    where
        K: Element + Eq + Hash,
        V: Element,
    {
        for (accepted, ty, name) in [
            (K::extracts(&self.key_type), &self.key_type, std::any::type_name::<K>()),
            (V::extracts(&self.value_type), &self.value_type, std::any::type_name::<V>()),
        ] {
            if !accepted {
                return Err(Error::type_mismatch("to_hash_map", ty, name));
            }
        }
        self.entries
            .iter()
            .map(|(key, value)| -> Result<(K, V)> {
                Ok((
                    convert("to_hash_map", key.clone())?,
                    convert("to_hash_map", value.clone())?,
                ))
            })
            .collect()
    }

    /// Unifies a caller-supplied key set and checks it against the key type.
    /// An `Any`-keyed map takes the keys as given, so `Null` stays a key of
    /// its own.
    fn key_set<I>(&self, context: &str, keys: I) -> Result<Vec<Value>>
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        let mut keys: Vec<Value> = keys.into_iter().map(Into::into).collect();
        if let [Value::Seq(seq)] = keys.as_slice() {
            keys = seq.values();
        }
        if self.key_type.is_any() {
            return Ok(keys);
        }
        let options = UnifyOptions {
            allow_empty_as_any: false,
        };
        let Some(unified) = unify(keys, options) else {
            return Ok(Vec::new());
        };
        if unified.elem_type != self.key_type {
            return Err(Error::type_mismatch(
                context,
                &self.key_type,
                &unified.elem_type,
            ));
        }
        Ok(unified.values)
    }
}

impl Default for Dict {
    fn default() -> Self {
        Dict::empty()
    }
}

impl fmt::Debug for Dict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.entries.iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seq;

    fn letters() -> Dict {
        Dict::from_pairs([
            ("A", 1),
            ("B", 2),
            ("C", 3),
            ("D", 4),
            ("E", 5),
            ("F", 6),
        ].map(|(k, v)| (k.to_string(), v)))
    }

    #[test]
    fn test_from_pairs_types() {
        let dict = letters();
        assert_eq!(dict.key_type(), &ElementType::Str);
        assert_eq!(dict.value_type(), &ElementType::Int);
        assert_eq!(dict.len(), 6);
        assert_eq!(dict.get("C"), Some(&Value::Int(3)));
        assert!(!dict.contains_key("Z"));
    }

    #[test]
    fn test_only() {
        let selected = letters().only(["A", "C", "F"]).unwrap();
        assert_eq!(selected.len(), 3);
        let mut keys = selected.keys().to_vec::<String>().unwrap();
        keys.sort();
        assert_eq!(keys, vec!["A", "C", "F"]);
        assert_eq!(selected.get("F"), Some(&Value::Int(6)));

        let selected = letters().only([seq!["B", "Z"]]).unwrap();
        assert_eq!(selected.len(), 1);

        assert!(letters().only(Vec::<Value>::new()).unwrap().is_empty());
        assert!(letters().only([Value::Null]).unwrap().is_empty());
        assert!(letters().only([1, 2]).unwrap_err().is_type_mismatch());
    }

    #[test]
    fn test_has_keys() {
        let dict = letters();
        assert!(dict.has_keys(["A", "B"]).unwrap());
        assert!(!dict.has_keys(["A", "Z"]).unwrap());
        assert!(dict.has_keys(Vec::<Value>::new()).unwrap());
        assert!(dict.has_keys([1]).is_err());
    }

    #[test]
    fn test_insert_and_copy() {
        let mut dict = Dict::new(ElementType::Int, ElementType::Str);
        assert_eq!(dict.insert(1, "one").unwrap(), None);
        assert_eq!(dict.insert(1, "uno").unwrap(), Some(Value::from("one")));
        assert!(dict.insert("two", 2).unwrap_err().is_type_mismatch());
        dict.insert(Value::Null, Value::Null).unwrap();
        assert_eq!(dict.get(0), Some(&Value::from("")));

        let copy = dict.copy();
        dict.insert(5, "five").unwrap();
        assert_eq!(copy.len(), 2);
        assert_eq!(dict.len(), 3);
    }

    #[test]
    fn test_keys_and_values() {
        let dict = letters();
        let mut values = dict.values().to_vec::<i64>().unwrap();
        values.sort();
        assert_eq!(values, vec![1, 2, 3, 4, 5, 6]);
        assert_eq!(dict.keys().element_type(), &ElementType::Str);
        assert!(Dict::empty().keys().is_empty());
    }

    #[test]
    fn test_to_hash_map() {
        let map = letters().to_hash_map::<String, i32>().unwrap();
        assert_eq!(map["E"], 5);
        assert!(letters().to_hash_map::<i64, i64>().is_err());
    }

    #[test]
    fn test_any_keyed_dict_accepts_mixed_keys() {
        let mut dict = Dict::empty();
        dict.insert(1, "a").unwrap();
        dict.insert("b", 2).unwrap();
        assert!(dict.has_keys([Value::from(1), Value::from("b")]).unwrap());
        assert_eq!(dict.only([1]).unwrap().len(), 1);
    }

    #[test]
    fn test_any_keyed_dict_keeps_null_key() {
        let mut dict = Dict::empty();
        dict.insert(Value::Null, "nil").unwrap();
        dict.insert(0, "zero").unwrap();
        let selected = dict.only([Value::from(1), Value::Null]).unwrap();
        assert_eq!(selected.len(), 1);
        assert_eq!(selected.get(Value::Null), Some(&Value::from("nil")));
        assert!(!selected.contains_key(0));
        assert!(dict.has_keys([Value::Null, Value::Null]).unwrap());
    }

    #[test]
    fn test_to_hash_map_extracts_values() {
        let map = letters().to_hash_map::<String, Value>().unwrap();
        assert_eq!(map["A"], Value::Int(1));
    }
}
