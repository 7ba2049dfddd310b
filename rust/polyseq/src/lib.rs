//! Chainable collection operations over sequences and maps whose element type
//! is only known at runtime.
//!
//! # Core Concepts
//!
//! ## Values and element types
//!
//! Every element is a [`Value`], a tagged union over the supported payloads
//! (booleans, integers, floats, characters, strings, nested sequences and
//! caller-defined [`Record`]s). A [`Sequence`] carries one [`ElementType`] that
//! all of its elements conform to; when construction inputs disagree, the
//! sequence falls back to [`ElementType::Any`] instead of failing.
//!
//! ## Declared types of callbacks
//!
//! Operations taking callbacks (`map`, `filter`, `group_by`, ...) are generic
//! over the callback's parameter type, which must implement [`Element`]. The
//! parameter type is checked against the sequence's element type at runtime
//! and a disagreement is reported as a type mismatch error.
//!
//! ## Views and aliasing
//!
//! Cloning a sequence, and taking [`Sequence::first`] or [`Sequence::last`],
//! produces a view over the same storage: element writes through one view are
//! visible through the others. [`Sequence::copy`] produces independent storage.
//! Structural mutation (`push`, `insert`, ...) may move a view to new storage,
//! which ends its sharing with other views.
//!
//! # Example
//!
//! ```
//! use polyseq::seq;
//!
//! let animals = seq!["dog", "cat", "bear", "cow", "bull", "pig", "iguana"];
//! let joined = animals
//!     .group_by(|s: &String| s.len())?
//!     .only([3, 4])?
//!     .values()
//!     .flatten()
//!     .sort()?
//!     .last(2)
//!     .reverse()
//!     .join("-")?;
//! assert_eq!(joined, "pig-dog");
//! # Ok::<(), polyseq::Error>(())
//! ```

pub mod dict;
pub mod element;
pub mod element_type;
pub mod macros;
pub mod mutation;
pub mod ordering;
pub mod sequence;
pub mod strings;
pub mod transform;
pub mod unify;
pub mod value;

#[cfg(test)]
mod tests;

pub use dict::Dict;
pub use element::Element;
pub use element_type::{ElementType, OrderKind, RecordType};
pub use polyseq_common::{Error, ErrorKind, Result};
pub use sequence::Sequence;
pub use unify::{UnifyOptions, Unified, flatten_unify, unify};
pub use value::{Record, Value, downcast_record};
