//! In-place structural mutation.
//!
//! Growing operations write into the view's spare capacity when it has any,
//! which is visible to other views covering those slots. A view without spare
//! capacity moves to new storage first and stops sharing with its aliases.

use polyseq_common::{Result, result::verify_index};

use crate::{sequence::Sequence, value::Value};

impl Sequence {
    /// Appends `element`.
    pub fn push(&mut self, element: impl Into<Value>) -> Result<()> {
        let value = self.elem_type.coerce("push", element.into())?;
        let fill = self.elem_type.zero_value();
        if self.data.push(value, &fill) {
            self.log_realloc("push");
        }
        Ok(())
    }

    /// Removes and returns the last element.
    pub fn pop(&mut self) -> Option<Value> {
        self.data.pop()
    }

    /// Removes and returns the first element.
    pub fn shift(&mut self) -> Option<Value> {
        self.data.shift()
    }

    /// Inserts `element` at the front.
    pub fn unshift(&mut self, element: impl Into<Value>) -> Result<()> {
        self.insert_at("unshift", element.into(), 0)
    }

    /// Inserts `element` at `index` (`0..=len`), shifting later elements up.
    pub fn insert(&mut self, element: impl Into<Value>, index: usize) -> Result<()> {
        self.insert_at("insert", element.into(), index)
    }

    /// Removes the element at `index` (`0..len`), shifting later elements down.
    /// The vacated trailing slot is cleared to the zero value.
    pub fn delete(&mut self, index: usize) -> Result<Value> {
        verify_index("delete", index, self.len(), false)?;
        let fill = self.elem_type.zero_value();
        Ok(self.data.remove(index, &fill))
    }

    fn insert_at(&mut self, context: &str, element: Value, index: usize) -> Result<()> {
        verify_index(context, index, self.len(), true)?;
        let value = self.elem_type.coerce(context, element)?;
        let fill = self.elem_type.zero_value();
        if self.data.insert(index, value, &fill) {
            self.log_realloc(context);
        }
        Ok(())
    }

    fn log_realloc(&self, context: &str) {
        log::trace!(
            "{context}: moved {} sequence to new storage (len {}, capacity {})",
            self.elem_type,
            self.len(),
            self.capacity()
        );
    }
}
