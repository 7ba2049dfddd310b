//! Mapping between Rust types and runtime element types.
//!
//! [`Element`] is how a callback's parameter or return type is matched against
//! a sequence's [`ElementType`]: `|x: i64| ...` declares an `Int` input,
//! `|s: String| ...` a `Str` input, `|v: Value| ...` an `Any` input.

use std::any::TypeId;
use std::rc::Rc;

use polyseq_common::{Error, Result};

use crate::{element_type::ElementType, sequence::Sequence, value::Record, value::Value};

/// A Rust type that elements can be converted to and from.
pub trait Element: Sized {
    /// The element type every value of `Self` converts to, when it is known
    /// without looking at a value.
    fn static_type() -> Option<ElementType>;

    /// Whether elements of a sequence typed `ty` can be passed as `Self`.
    fn accepts(ty: &ElementType) -> bool {
        Self::static_type().as_ref() == Some(ty)
    }

    /// Whether elements of a sequence typed `ty` can be extracted as `Self`.
    /// Wider than [`Element::accepts`] only for `Value`, which holds anything.
    fn extracts(ty: &ElementType) -> bool {
        Self::accepts(ty)
    }

    /// Element type of a derived sequence when neither `static_type` nor the
    /// produced values determine one.
    fn fallback_type() -> ElementType {
        ElementType::Any
    }

    fn from_value(value: Value) -> Option<Self>;

    fn into_value(self) -> Value;
}

/// Converts `value` into `T`, reporting a type mismatch on failure.
pub(crate) fn convert<T: Element>(context: &str, value: Value) -> Result<T> {
    let label = value.type_label();
    T::from_value(value)
        .ok_or_else(|| Error::type_mismatch(context, std::any::type_name::<T>(), label))
}

impl Element for Value {
    fn static_type() -> Option<ElementType> {
        Some(ElementType::Any)
    }

    fn extracts(_: &ElementType) -> bool {
        true
    }

    fn from_value(value: Value) -> Option<Self> {
        Some(value)
    }

    fn into_value(self) -> Value {
        self
    }
}

impl Element for bool {
    fn static_type() -> Option<ElementType> {
        Some(ElementType::Bool)
    }

    fn from_value(value: Value) -> Option<Self> {
        value.as_bool()
    }

    fn into_value(self) -> Value {
        Value::Bool(self)
    }
}

macro_rules! impl_integer_element {
    ($($t:ty),*) => {
        $(
            impl Element for $t {
                fn static_type() -> Option<ElementType> {
                    Some(ElementType::Int)
                }

                fn from_value(value: Value) -> Option<Self> {
                    value.as_int().and_then(|i| <$t>::try_from(i).ok())
                }

                fn into_value(self) -> Value {
                    Value::from(self)
                }
            }
        )*
    };
}

impl_integer_element!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl Element for f64 {
    fn static_type() -> Option<ElementType> {
        Some(ElementType::Float)
    }

    fn from_value(value: Value) -> Option<Self> {
        value.as_float()
    }

    fn into_value(self) -> Value {
        Value::Float(self)
    }
}

impl Element for f32 {
    fn static_type() -> Option<ElementType> {
        Some(ElementType::Float)
    }

    /// Fails for values `f32` cannot represent exactly.
    fn from_value(value: Value) -> Option<Self> {
        let f = value.as_float()?;
        let narrowed = f as f32;
        (f.is_nan() || f64::from(narrowed) == f).then_some(narrowed)
    }

    fn into_value(self) -> Value {
        Value::Float(f64::from(self))
    }
}

impl Element for char {
    fn static_type() -> Option<ElementType> {
        Some(ElementType::Char)
    }

    fn from_value(value: Value) -> Option<Self> {
        value.as_char()
    }

    fn into_value(self) -> Value {
        Value::Char(self)
    }
}

impl Element for String {
    fn static_type() -> Option<ElementType> {
        Some(ElementType::Str)
    }

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    fn into_value(self) -> Value {
        Value::Str(self)
    }
}

/// Nested sequences: the inner element type is taken from the values.
impl Element for Sequence {
    fn static_type() -> Option<ElementType> {
        None
    }

    fn accepts(ty: &ElementType) -> bool {
        matches!(ty, ElementType::Seq(_))
    }

    fn fallback_type() -> ElementType {
        ElementType::Seq(Box::new(ElementType::Any))
    }

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Seq(seq) => Some(seq),
            _ => None,
        }
    }

    fn into_value(self) -> Value {
        Value::Seq(self)
    }
}

impl<R: Record> Element for Rc<R> {
    fn static_type() -> Option<ElementType> {
        None
    }

    fn accepts(ty: &ElementType) -> bool {
        matches!(ty, ElementType::Record(record) if record.type_id == TypeId::of::<R>())
    }

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Record(record) => {
                let any: Rc<dyn std::any::Any> = record;
                any.downcast::<R>().ok()
            }
            _ => None,
        }
    }

    fn into_value(self) -> Value {
        Value::Record(self)
    }
}

/// `None` stands for the absence marker.
impl<T: Element> Element for Option<T> {
    fn static_type() -> Option<ElementType> {
        T::static_type()
    }

    fn accepts(ty: &ElementType) -> bool {
        T::accepts(ty)
    }

    fn extracts(ty: &ElementType) -> bool {
        T::extracts(ty)
    }

    fn fallback_type() -> ElementType {
        T::fallback_type()
    }

    fn from_value(value: Value) -> Option<Self> {
        if value.is_null() {
            Some(None)
        } else {
            T::from_value(value).map(Some)
        }
    }

    fn into_value(self) -> Value {
        self.map_or(Value::Null, Element::into_value)
    }
}
