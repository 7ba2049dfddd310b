//! Sorting, reversal and extreme-value scans.
//!
//! The natural order of a sequence is chosen from its [`OrderKind`]; every
//! algorithm runs against the three-operation [`polyseq_sort::Sortable`]
//! contract through [`LessSlice`].

use ordered_float::OrderedFloat;
use polyseq_common::{Error, Result};
use polyseq_sort::LessSlice;

use crate::{
    element::Element,
    element_type::OrderKind,
    sequence::Sequence,
    value::Value,
};

type ValueLess = fn(&Value, &Value) -> bool;

fn integer_less(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Int(a), Value::Int(b)) => a < b,
        (Value::Char(a), Value::Char(b)) => a < b,
        _ => false,
    }
}

/// NaN sorts after every other float.
fn float_less(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Float(a), Value::Float(b)) => OrderedFloat(*a) < OrderedFloat(*b),
        _ => false,
    }
}

fn string_less(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Str(a), Value::Str(b)) => a < b,
        _ => false,
    }
}

/// Absent records sort first.
fn record_less(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Null, Value::Null) => false,
        (Value::Null, _) => true,
        (_, Value::Null) => false,
        (Value::Record(a), Value::Record(b)) => a.less(b.as_ref()),
        _ => false,
    }
}

impl OrderKind {
    fn value_less(self) -> Option<ValueLess> {
        match self {
            OrderKind::Integer => Some(integer_less),
            OrderKind::Float => Some(float_less),
            OrderKind::String => Some(string_less),
            OrderKind::TotalOrder => Some(record_less),
            OrderKind::Unordered => None,
        }
    }
}

impl Sequence {
    /// Ordering capability of the element type.
    pub fn order_kind(&self) -> OrderKind {
        self.elem_type.order_kind()
    }

    fn natural_less(&self, context: &str) -> Result<ValueLess> {
        self.order_kind()
            .value_less()
            .ok_or_else(|| Error::not_orderable(context, &self.elem_type))
    }

    /// Sorts the elements in place in their natural order and returns an alias
    /// of the sorted sequence.
    ///
    /// Integers, characters and strings sort naturally, floats sort with NaN
    /// last, records through [`Record::less`](crate::Record::less). Other
    /// element types fail with `NotOrderable`.
    pub fn sort(&self) -> Result<Sequence> {
        let less = self.natural_less("sort")?;
        let mut values = self.values();
        polyseq_sort::sort(&mut LessSlice::new(&mut values, less));
        self.data.overwrite(values);
        Ok(self.clone())
    }

    /// Sorts the elements in place by `less` and returns an alias of the
    /// sorted sequence.
    pub fn sort_by<T, F>(&self, less: F) -> Result<Sequence>
    where
        T: Element,
        F: Fn(&T, &T) -> bool,
    {
        let typed = self.typed_values::<T>("sort_by")?;
        let mut pairs: Vec<(T, Value)> = typed.into_iter().zip(self.values()).collect();
        polyseq_sort::sort(&mut LessSlice::new(&mut pairs, |a: &(T, Value), b: &(T, Value)| {
            less(&a.0, &b.0)
        }));
        self.data
            .overwrite(pairs.into_iter().map(|(_, value)| value).collect());
        Ok(self.clone())
    }

    /// Reverses the elements in place and returns an alias.
    pub fn reverse(&self) -> Sequence {
        let len = self.len();
        for i in 0..len / 2 {
            self.data.swap(i, len - 1 - i);
        }
        self.clone()
    }

    /// Returns `true` if the elements are in natural order.
    pub fn is_sorted(&self) -> Result<bool> {
        let less = self.natural_less("is_sorted")?;
        let mut values = self.values();
        Ok(polyseq_sort::is_sorted(&LessSlice::new(&mut values, less)))
    }

    /// Smallest element in natural order, `None` if empty. The first of equal
    /// minima wins.
    pub fn min(&self) -> Result<Option<Value>> {
        let less = self.natural_less("min")?;
        Ok(pick(self.values(), less, Extreme::Min))
    }

    /// Greatest element in natural order, `None` if empty. The first of equal
    /// maxima wins.
    pub fn max(&self) -> Result<Option<Value>> {
        let less = self.natural_less("max")?;
        Ok(pick(self.values(), less, Extreme::Max))
    }

    pub fn min_by<T, F>(&self, less: F) -> Result<Option<T>>
    where
        T: Element,
        F: Fn(&T, &T) -> bool,
    {
        let values = self.typed_values::<T>("min_by")?;
        Ok(pick(values, less, Extreme::Min))
    }

    pub fn max_by<T, F>(&self, less: F) -> Result<Option<T>>
    where
        T: Element,
        F: Fn(&T, &T) -> bool,
    {
        let values = self.typed_values::<T>("max_by")?;
        Ok(pick(values, less, Extreme::Max))
    }
}

#[derive(Clone, Copy)]
enum Extreme {
    Min,
    Max,
}

fn pick<T, F>(mut items: Vec<T>, less: F, extreme: Extreme) -> Option<T>
where
    F: Fn(&T, &T) -> bool,
{
    let slice = LessSlice::new(&mut items, less);
    let index = match extreme {
        Extreme::Min => polyseq_sort::min_index(&slice),
        Extreme::Max => polyseq_sort::max_index(&slice),
    }?;
    Some(items.swap_remove(index))
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use super::*;
    use crate::{Record, downcast_record, seq};

    #[derive(Debug)]
    struct Person {
        name: &'static str,
        age: u32,
    }

    impl Record for Person {
        fn is_ordered(&self) -> bool {
            true
        }

        fn less(&self, other: &dyn Record) -> bool {
            downcast_record::<Person>(other).is_some_and(|o| self.age < o.age)
        }
    }

    #[test]
    fn test_sort_integers() {
        let numbers = seq![3, 5, 21, 1, 34, 55, 13, 2, 8, 89, 1];
        let sorted = numbers.sort().unwrap();
        assert_eq!(
            sorted.to_vec::<i64>().unwrap(),
            vec![1, 1, 2, 3, 5, 8, 13, 21, 34, 55, 89]
        );
        assert!(sorted.shares_storage_with(&numbers));
        assert_eq!(numbers.get(0), Some(Value::Int(1)));
        assert!(numbers.is_sorted().unwrap());
    }

    #[test]
    fn test_sort_floats_nan_last() {
        let floats = seq![2.5, f64::NAN, -1.0, 0.0];
        floats.sort().unwrap();
        let sorted = floats.to_vec::<f64>().unwrap();
        assert_eq!(&sorted[..3], &[-1.0, 0.0, 2.5]);
        assert!(sorted[3].is_nan());
    }

    #[test]
    fn test_sort_strings_and_chars() {
        let words = seq!["pear", "Apple", "apple", "banana"];
        words.sort().unwrap();
        assert_eq!(
            words.to_vec::<String>().unwrap(),
            vec!["Apple", "apple", "banana", "pear"]
        );
        let chars = seq!['c', 'a', 'b'];
        assert_eq!(chars.sort().unwrap().to_vec::<char>().unwrap(), vec!['a', 'b', 'c']);
    }

    #[test]
    fn test_unordered_types_fail() {
        assert!(matches!(
            seq![true, false].sort().unwrap_err().kind(),
            polyseq_common::ErrorKind::NotOrderable { .. }
        ));
        assert!(seq![1, "a"].min().is_err());
        assert!(seq![seq![1], seq![2]].max().is_err());
    }

    #[test]
    fn test_sort_records() {
        let people = Sequence::from_vec(vec![
            Rc::new(Person { name: "ann", age: 41 }),
            Rc::new(Person { name: "bob", age: 23 }),
            Rc::new(Person { name: "cid", age: 35 }),
        ]);
        people.sort().unwrap();
        let names: Vec<_> = people
            .to_vec::<Rc<Person>>()
            .unwrap()
            .iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, vec!["bob", "cid", "ann"]);
        let oldest = people.max().unwrap().unwrap();
        assert_eq!(downcast_record::<Person>(oldest.as_record().unwrap()).unwrap().age, 41);
    }

    #[test]
    fn test_sort_by_and_reverse() {
        let words = seq!["ccc", "a", "bb"];
        words
            .sort_by(|a: &String, b: &String| a.len() > b.len())
            .unwrap();
        assert_eq!(words.to_vec::<String>().unwrap(), vec!["ccc", "bb", "a"]);
        let reversed = words.reverse();
        assert_eq!(reversed.to_vec::<String>().unwrap(), vec!["a", "bb", "ccc"]);
        assert!(words.sort_by(|a: &i64, b: &i64| a < b).is_err());
    }

    #[test]
    fn test_reverse_window_is_visible_in_source() {
        let numbers = seq![1, 2, 3, 4, 5];
        numbers.last(3).reverse();
        assert_eq!(numbers.to_vec::<i64>().unwrap(), vec![1, 2, 5, 4, 3]);
        assert_eq!(seq![].reverse().len(), 0);
    }

    #[test]
    fn test_min_max() {
        let numbers = seq![4, 1, 9, 1, 9];
        assert_eq!(numbers.min().unwrap(), Some(Value::Int(1)));
        assert_eq!(numbers.max().unwrap(), Some(Value::Int(9)));
        assert_eq!(Sequence::from_vec(Vec::<i64>::new()).min().unwrap(), None);

        let words = seq!["kiwi", "fig", "banana"];
        assert_eq!(
            words.min_by(|a: &String, b: &String| a.len() < b.len()).unwrap(),
            Some("fig".to_string())
        );
        assert_eq!(
            words.max_by(|a: &String, b: &String| a.len() < b.len()).unwrap(),
            Some("banana".to_string())
        );
    }

    #[test]
    fn test_ties_go_to_first_occurrence() {
        let words = seq!["ab", "cd", "e", "fg"];
        let longest = words.max_by(|a: &String, b: &String| a.len() < b.len());
        assert_eq!(longest.unwrap(), Some("ab".to_string()));
        let shortest = seq!["xy", "zw"].min_by(|a: &String, b: &String| a.len() < b.len());
        assert_eq!(shortest.unwrap(), Some("xy".to_string()));
    }
}
