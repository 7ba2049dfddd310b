pub type Result<T> = std::result::Result<T, crate::error::Error>;

/// Verifies that `index` lies in `0..bound` (or `0..=bound` when `inclusive`).
#[inline]
pub fn verify_index(context: &str, index: usize, bound: usize, inclusive: bool) -> Result<()> {
    let ok = if inclusive {
        index <= bound
    } else {
        index < bound
    };
    if ok {
        Ok(())
    } else {
        index_out_of_range(context, index, bound)
    }
}

#[cold]
pub fn index_out_of_range(context: &str, index: usize, len: usize) -> Result<()> {
    Err(crate::error::ErrorKind::IndexOutOfRange {
        context: context.to_string(),
        index,
        len,
    }
    .into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verify_index_bounds() {
        assert!(verify_index("delete", 0, 2, false).is_ok());
        assert!(verify_index("delete", 1, 2, false).is_ok());
        assert!(verify_index("delete", 2, 2, false).is_err());
        assert!(verify_index("insert", 2, 2, true).is_ok());
        assert!(verify_index("insert", 3, 2, true).is_err());
        assert!(verify_index("delete", 0, 0, false).is_err());
        assert!(verify_index("insert", 0, 0, true).is_ok());
    }
}
