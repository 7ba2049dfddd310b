/// Builds a [`Sequence`](crate::Sequence) from a list of values, resolving a
/// single element type for all of them.
///
/// ```
/// use polyseq::{ElementType, seq};
///
/// assert_eq!(seq![1, 2, 3].element_type(), &ElementType::Int);
/// assert_eq!(seq![1, "a"].element_type(), &ElementType::Any);
/// assert!(seq![].is_empty());
/// ```
#[macro_export]
macro_rules! seq {
    () => {
        $crate::Sequence::from_values(::std::vec::Vec::new())
    };
    ($($value:expr),+ $(,)?) => {
        $crate::Sequence::from_values(::std::vec![$($crate::Value::from($value)),+])
    };
}
