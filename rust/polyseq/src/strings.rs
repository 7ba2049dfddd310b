use itertools::Itertools;
use polyseq_common::{Error, Result};

use crate::{element_type::OrderKind, sequence::Sequence, value::Value};

impl Sequence {
    /// Concatenates the elements of a string sequence, separated by `glue`.
    pub fn join(&self, glue: &str) -> Result<String> {
        if self.order_kind() != OrderKind::String {
            return Err(Error::not_joinable(&self.elem_type));
        }
        let values = self.data.borrow();
        Ok(values.iter().filter_map(Value::as_str).join(glue))
    }
}
