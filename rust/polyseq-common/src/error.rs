use std::fmt::Display;

use thiserror::Error;

#[derive(Debug, Error)]
#[error(transparent)]
pub struct Error(Box<ErrorKind>);

impl Error {
    pub fn kind(&self) -> &ErrorKind {
        self.0.as_ref()
    }

    pub fn into_kind(self) -> ErrorKind {
        *self.0
    }

    pub fn type_mismatch(
        context: impl Into<String>,
        expected: impl Display,
        actual: impl Display,
    ) -> Error {
        Error(
            ErrorKind::TypeMismatch {
                context: context.into(),
                expected: expected.to_string(),
                actual: actual.to_string(),
            }
            .into(),
        )
    }

    pub fn not_orderable(context: impl Into<String>, element_type: impl Display) -> Error {
        Error(
            ErrorKind::NotOrderable {
                context: context.into(),
                element_type: element_type.to_string(),
            }
            .into(),
        )
    }

    pub fn index_out_of_range(context: impl Into<String>, index: usize, len: usize) -> Error {
        Error(
            ErrorKind::IndexOutOfRange {
                context: context.into(),
                index,
                len,
            }
            .into(),
        )
    }

    pub fn not_joinable(element_type: impl Display) -> Error {
        Error(
            ErrorKind::NotJoinable {
                element_type: element_type.to_string(),
            }
            .into(),
        )
    }

    /// Returns `true` for the type mismatch family of errors.
    pub fn is_type_mismatch(&self) -> bool {
        matches!(self.kind(), ErrorKind::TypeMismatch { .. })
    }
}

/// The failure classes of collection operations.
///
/// All of them describe programmer errors: the operation is abandoned before
/// any element is written, and retrying with the same arguments fails again.
#[derive(Debug, Error)]
pub enum ErrorKind {
    /// A callback, key or value does not agree with the element (or key) type
    /// of the collection it is applied to.
    #[error("type mismatch in {context}: expected {expected}, found {actual}")]
    TypeMismatch {
        context: String,
        expected: String,
        actual: String,
    },

    #[error("{context}: element type {element_type} is not orderable")]
    NotOrderable {
        context: String,
        element_type: String,
    },

    /// `len` is the exclusive (or, for inserts, inclusive) upper bound that
    /// `index` violated.
    #[error("{context}: index {index} out of range for length {len}")]
    IndexOutOfRange {
        context: String,
        index: usize,
        len: usize,
    },

    #[error("join: element type {element_type} is not joinable")]
    NotJoinable { element_type: String },
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Self {
        Error(kind.into())
    }
}
