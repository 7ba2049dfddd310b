//! Runtime element type tags and their ordering capabilities.

use std::any::TypeId;
use std::fmt;
use std::hash::{Hash, Hasher};

use polyseq_common::{Error, Result};

use crate::{sequence::Sequence, value::Record, value::Value};

/// The concrete type shared by all elements of a sequence.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ElementType {
    /// Heterogeneous fallback. Elements keep their own types, and the sequence
    /// supports no typed ordering or string operations.
    Any,
    Bool,
    /// All integer widths.
    Int,
    /// `f32` and `f64`.
    Float,
    Char,
    Str,
    /// Nested sequences with the given element type.
    Seq(Box<ElementType>),
    Record(RecordType),
}

/// Ordering capability of an element type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderKind {
    /// Integers and characters, natural order.
    Integer,
    /// Natural order with NaN after every other value.
    Float,
    /// Lexicographic byte order.
    String,
    /// Records that declare their own order.
    TotalOrder,
    Unordered,
}

impl ElementType {
    /// Returns the value absent elements of this type are replaced with.
    pub fn zero_value(&self) -> Value {
        match self {
            ElementType::Any | ElementType::Record(_) => Value::Null,
            ElementType::Bool => Value::Bool(false),
            ElementType::Int => Value::Int(0),
            ElementType::Float => Value::Float(0.0),
            ElementType::Char => Value::Char('\0'),
            ElementType::Str => Value::Str(String::new()),
            ElementType::Seq(inner) => Value::Seq(Sequence::empty((**inner).clone())),
        }
    }

    /// Replaces `Null` with the zero value of this type.
    #[inline]
    pub fn normalize(&self, value: Value) -> Value {
        if value.is_null() {
            self.zero_value()
        } else {
            value
        }
    }

    /// Returns `true` if `value` may be stored in a sequence of this type.
    /// `Seq<Any>` holds sequences of every element type.
    pub fn admits(&self, value: &Value) -> bool {
        match (self, value) {
            (ElementType::Any, _) => true,
            (ElementType::Record(_), Value::Null) => true,
            (ElementType::Seq(inner), Value::Seq(_)) if inner.is_any() => true,
            (ty, value) => value.element_type().as_ref() == Some(ty),
        }
    }

    /// Normalizes `value` and verifies that it may be stored under this type.
    pub(crate) fn coerce(&self, context: &str, value: Value) -> Result<Value> {
        let value = self.normalize(value);
        if self.admits(&value) {
            Ok(value)
        } else {
            Err(Error::type_mismatch(context, self, value.type_label()))
        }
    }

    pub fn order_kind(&self) -> OrderKind {
        match self {
            ElementType::Int | ElementType::Char => OrderKind::Integer,
            ElementType::Float => OrderKind::Float,
            ElementType::Str => OrderKind::String,
            ElementType::Record(record) if record.ordered => OrderKind::TotalOrder,
            ElementType::Any | ElementType::Bool | ElementType::Seq(_) | ElementType::Record(_) => {
                OrderKind::Unordered
            }
        }
    }

    #[inline]
    pub fn is_any(&self) -> bool {
        matches!(self, ElementType::Any)
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ElementType::Any => f.write_str("Any"),
            ElementType::Bool => f.write_str("Bool"),
            ElementType::Int => f.write_str("Int"),
            ElementType::Float => f.write_str("Float"),
            ElementType::Char => f.write_str("Char"),
            ElementType::Str => f.write_str("Str"),
            ElementType::Seq(inner) => write!(f, "Seq<{inner}>"),
            ElementType::Record(record) => write!(f, "Record<{}>", record.name),
        }
    }
}

/// Describes a caller-defined record type. Two descriptors are equal when they
/// describe the same Rust type.
#[derive(Debug, Clone, Copy)]
pub struct RecordType {
    pub name: &'static str,
    pub type_id: TypeId,
    pub ordered: bool,
}

impl RecordType {
    pub fn of(record: &dyn Record) -> RecordType {
        RecordType {
            name: record.type_name(),
            type_id: record.record_type_id(),
            ordered: record.is_ordered(),
        }
    }
}

impl PartialEq for RecordType {
    fn eq(&self, other: &Self) -> bool {
        self.type_id == other.type_id
    }
}

impl Eq for RecordType {}

impl Hash for RecordType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.type_id.hash(state);
    }
}
