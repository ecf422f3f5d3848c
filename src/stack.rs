use alloc::vec::Vec;

use crate::config::check;
use crate::error::ConstructError;
use crate::field_type::FieldType;
use crate::schema::Schema;

/// Staging area for the field types of the next buffer.
///
/// Types are pushed one by one and then drained all at once when a buffer is
/// created from the stack.
#[derive(Debug, Default, Clone)]
pub struct SchemaStack {
    types: Vec<FieldType>,
}

impl SchemaStack {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.types.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Types staged so far, bottom of the stack first.
    #[must_use]
    pub fn types(&self) -> &[FieldType] {
        &self.types
    }

    /// Pushes a field type onto the stack.
    pub fn push(&mut self, field_type: FieldType) {
        self.types.push(field_type);
    }

    /// Removes the `count` most recently pushed types.
    ///
    /// # Errors
    ///
    /// Returns `ConstructError::InvalidNumTypes` if fewer than `count` types
    /// are staged.
    pub fn pop(&mut self, count: usize) -> Result<(), ConstructError> {
        check!(
            count <= self.types.len(),
            ConstructError::InvalidNumTypes {
                requested: count,
                available: self.types.len(),
            }
        );
        let keep = self.types.len() - count;
        self.types.truncate(keep);
        Ok(())
    }

    /// Removes every staged type.
    ///
    /// # Errors
    ///
    /// Returns `ConstructError::NoPushedTypes` if the stack is already empty.
    pub fn flush(&mut self) -> Result<(), ConstructError> {
        check!(!self.types.is_empty(), ConstructError::NoPushedTypes);
        self.types.clear();
        Ok(())
    }

    /// Pushes every field type of `schema`, in order.
    pub fn repush(&mut self, schema: &Schema) {
        self.types.extend_from_slice(schema.types());
    }

    /// Drains the stack into a schema.
    ///
    /// # Errors
    ///
    /// Returns `ConstructError::NoPushedTypes` if nothing is staged. The stack
    /// is left untouched in that case.
    pub fn take_schema(&mut self) -> Result<Schema, ConstructError> {
        check!(!self.types.is_empty(), ConstructError::NoPushedTypes);
        Schema::new(core::mem::take(&mut self.types))
    }
}
