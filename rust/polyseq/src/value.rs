//! The dynamically typed element representation.

use std::any::{Any, TypeId};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::Rc;

use ordered_float::OrderedFloat;

use crate::{element_type::ElementType, element_type::RecordType, sequence::Sequence};

/// A caller-defined element type.
///
/// Records are stored behind `Rc<dyn Record>`; sequences unify records by their
/// concrete Rust type. A record type becomes orderable (sortable, usable with
/// `min`/`max`) by returning `true` from [`Record::is_ordered`] and
/// implementing [`Record::less`].
pub trait Record: fmt::Debug + Any {
    /// Human readable name of the concrete type, used in error messages.
    fn type_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    /// Identity of the concrete type. Not meant to be overridden.
    fn record_type_id(&self) -> TypeId {
        TypeId::of::<Self>()
    }

    /// Whether records of this type carry a total order through [`Record::less`].
    fn is_ordered(&self) -> bool {
        false
    }

    /// Returns `true` if `self` sorts strictly before `other`.
    ///
    /// Only consulted when [`Record::is_ordered`] returns `true`, and only with
    /// `other` of the same concrete type (see [`downcast_record`]).
    fn less(&self, other: &dyn Record) -> bool {
        let _ = other;
        false
    }

    /// Equality used when records appear as map keys. Defaults to identity.
    fn record_eq(&self, other: &dyn Record) -> bool {
        std::ptr::addr_eq(self as *const Self, other as *const dyn Record)
    }

    /// Hash consistent with [`Record::record_eq`]. The default feeds nothing,
    /// which is consistent with any equality.
    fn record_hash(&self, state: &mut dyn Hasher) {
        let _ = state;
    }
}

/// Downcasts a record to its concrete type.
pub fn downcast_record<R: Record>(record: &dyn Record) -> Option<&R> {
    let any: &dyn Any = record;
    any.downcast_ref::<R>()
}

/// A single element of any supported type.
///
/// `Null` is the absence marker. It only survives inside `Any`- and
/// record-typed sequences; typed sequences replace it with their zero value.
#[derive(Clone, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Char(char),
    Str(String),
    Seq(Sequence),
    Record(Rc<dyn Record>),
}

impl Value {
    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns the concrete type of the value, or `None` for `Null`.
    pub fn element_type(&self) -> Option<ElementType> {
        let ty = match self {
            Value::Null => return None,
            Value::Bool(_) => ElementType::Bool,
            Value::Int(_) => ElementType::Int,
            Value::Float(_) => ElementType::Float,
            Value::Char(_) => ElementType::Char,
            Value::Str(_) => ElementType::Str,
            Value::Seq(seq) => ElementType::Seq(Box::new(seq.element_type().clone())),
            Value::Record(record) => ElementType::Record(RecordType::of(record.as_ref())),
        };
        Some(ty)
    }

    /// Name of the value's type for diagnostics.
    pub fn type_label(&self) -> String {
        self.element_type()
            .map_or_else(|| "Null".to_string(), |ty| ty.to_string())
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_char(&self) -> Option<char> {
        match self {
            Value::Char(c) => Some(*c),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_seq(&self) -> Option<&Sequence> {
        match self {
            Value::Seq(seq) => Some(seq),
            _ => None,
        }
    }

    pub fn as_record(&self) -> Option<&dyn Record> {
        match self {
            Value::Record(record) => Some(record.as_ref()),
            _ => None,
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Bool(b) => fmt::Debug::fmt(b, f),
            Value::Int(i) => fmt::Debug::fmt(i, f),
            Value::Float(x) => fmt::Debug::fmt(x, f),
            Value::Char(c) => fmt::Debug::fmt(c, f),
            Value::Str(s) => fmt::Debug::fmt(s, f),
            Value::Seq(seq) => fmt::Debug::fmt(seq, f),
            Value::Record(record) => fmt::Debug::fmt(record, f),
        }
    }
}

/// Floats compare by total order (`NaN == NaN`), so values can serve as map keys.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => OrderedFloat(*a) == OrderedFloat(*b),
            (Value::Char(a), Value::Char(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Seq(a), Value::Seq(b)) => a == b,
            (Value::Record(a), Value::Record(b)) => {
                a.record_type_id() == b.record_type_id() && a.record_eq(b.as_ref())
            }
            _ => false,
        }
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Value::Null => {}
            Value::Bool(b) => b.hash(state),
            Value::Int(i) => i.hash(state),
            Value::Float(x) => OrderedFloat(*x).hash(state),
            Value::Char(c) => c.hash(state),
            Value::Str(s) => s.hash(state),
            Value::Seq(seq) => seq.hash(state),
            Value::Record(record) => record.record_hash(state),
        }
    }
}

macro_rules! impl_from_integer {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Value {
                fn from(value: $t) -> Value {
                    Value::Int(i64::from(value))
                }
            }
        )*
    };
}

impl_from_integer!(i8, i16, i32, i64, u8, u16, u32);

/// Integers wider than `i64` saturate at its bounds.
macro_rules! impl_from_wide_integer {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Value {
                fn from(value: $t) -> Value {
                    let saturated = if value > <$t>::default() { i64::MAX } else { i64::MIN };
                    Value::Int(i64::try_from(value).unwrap_or(saturated))
                }
            }
        )*
    };
}

impl_from_wide_integer!(isize, u64, usize);

impl From<bool> for Value {
    fn from(value: bool) -> Value {
        Value::Bool(value)
    }
}

impl From<f32> for Value {
    fn from(value: f32) -> Value {
        Value::Float(value as f64)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Value {
        Value::Float(value)
    }
}

impl From<char> for Value {
    fn from(value: char) -> Value {
        Value::Char(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Value {
        Value::Str(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Value {
        Value::Str(value)
    }
}

impl From<Sequence> for Value {
    fn from(value: Sequence) -> Value {
        Value::Seq(value)
    }
}

impl<R: Record> From<Rc<R>> for Value {
    fn from(value: Rc<R>) -> Value {
        Value::Record(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Value {
        value.map_or(Value::Null, Into::into)
    }
}
