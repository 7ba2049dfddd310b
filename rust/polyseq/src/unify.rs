//! Resolution of a single element type from dynamically typed values.
//!
//! The first non-null value proposes the element type; every later non-null
//! value must have exactly that type. Disagreement never fails: the result
//! degrades to an `Any`-typed list holding the values unchanged.

use crate::{element::Element, element_type::ElementType, sequence::Sequence, value::Value};

/// Options for [`unify`].
#[derive(Debug, Clone, Copy)]
pub struct UnifyOptions {
    /// When no value establishes a type (no values, or only nulls), produce an
    /// `Any`-typed result instead of `None`.
    pub allow_empty_as_any: bool,
}

impl Default for UnifyOptions {
    fn default() -> Self {
        UnifyOptions {
            allow_empty_as_any: true,
        }
    }
}

/// Values normalized to a single element type.
#[derive(Debug, Clone, PartialEq)]
pub struct Unified {
    pub elem_type: ElementType,
    pub values: Vec<Value>,
}

impl Unified {
    pub fn into_sequence(self) -> Sequence {
        Sequence::from_unified(self)
    }
}

/// Running type resolution over a stream of values.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Candidate {
    /// Only nulls (or nothing) seen so far.
    Unset,
    Typed(ElementType),
    Mixed,
}

impl Candidate {
    pub(crate) fn observe(&mut self, value: &Value) {
        let Some(ty) = value.element_type() else {
            return;
        };
        match self {
            Candidate::Unset => *self = Candidate::Typed(ty),
            Candidate::Typed(current) if *current != ty => {
                log::debug!("unify: conflicting element types {current} and {ty}, falling back to Any");
                *self = Candidate::Mixed;
            }
            Candidate::Typed(_) | Candidate::Mixed => {}
        }
    }

    pub(crate) fn resolve<'a>(values: impl IntoIterator<Item = &'a Value>) -> Candidate {
        let mut candidate = Candidate::Unset;
        for value in values {
            candidate.observe(value);
            if candidate == Candidate::Mixed {
                break;
            }
        }
        candidate
    }
}

/// Resolves one element type for `values`.
///
/// - all non-null values share a type: that type, with nulls replaced by its
///   zero value;
/// - conflicting types: `Any`, values unchanged;
/// - no values: empty `Any` result;
/// - exactly one value, which is null: `Any` result holding that null;
/// - two or more values, all null: empty `Any` result.
///
/// The last three cases yield `None` when `options.allow_empty_as_any` is off.
pub fn unify(values: Vec<Value>, options: UnifyOptions) -> Option<Unified> {
    match Candidate::resolve(&values) {
        Candidate::Typed(elem_type) => Some(normalized(elem_type, values)),
        Candidate::Mixed => Some(Unified {
            elem_type: ElementType::Any,
            values,
        }),
        Candidate::Unset if options.allow_empty_as_any => {
            let values = if values.len() == 1 { values } else { Vec::new() };
            Some(Unified {
                elem_type: ElementType::Any,
                values,
            })
        }
        Candidate::Unset => None,
    }
}

/// [`unify`] with default options; always produces a result.
pub(crate) fn unify_any(values: Vec<Value>) -> Unified {
    unify(values, UnifyOptions::default()).unwrap_or_else(|| Unified {
        elem_type: ElementType::Any,
        values: Vec::new(),
    })
}

/// Element type of values produced as `U` by a callback: `U`'s static type
/// when it has one, otherwise the type the values agree on. Values that agree
/// on nothing fall back to `U`'s fallback type, so nested sequences stay
/// sequence-typed.
pub(crate) fn resolve_produced<U: Element>(values: &[Value]) -> ElementType {
    U::static_type().unwrap_or_else(|| match Candidate::resolve(values) {
        Candidate::Typed(ty) => ty,
        Candidate::Mixed | Candidate::Unset => U::fallback_type(),
    })
}

/// Collects the non-sequence leaves of arbitrarily nested sequences, depth
/// first and left to right, and resolves one element type across all of them.
///
/// Nulls become the zero value of the resolved type. If no leaf establishes a
/// type the result is `Any`-typed and the nulls are kept.
pub fn flatten_unify(values: &[Value]) -> Unified {
    let mut leaves = Vec::new();
    let mut candidate = Candidate::Unset;
    collect_leaves(values, &mut leaves, &mut candidate);
    match candidate {
        Candidate::Typed(elem_type) => normalized(elem_type, leaves),
        Candidate::Mixed | Candidate::Unset => Unified {
            elem_type: ElementType::Any,
            values: leaves,
        },
    }
}

fn collect_leaves(values: &[Value], leaves: &mut Vec<Value>, candidate: &mut Candidate) {
    for value in values {
        match value {
            Value::Seq(seq) => collect_leaves(&seq.values(), leaves, candidate),
            leaf => {
                candidate.observe(leaf);
                leaves.push(leaf.clone());
            }
        }
    }
}

fn normalized(elem_type: ElementType, mut values: Vec<Value>) -> Unified {
    for value in values.iter_mut().filter(|v| v.is_null()) {
        *value = elem_type.zero_value();
    }
    Unified { elem_type, values }
}
