use alloc::vec;
use alloc::vec::Vec;

use crate::config::check;
use crate::error::ConstructError;
use crate::field_type::{FieldType, FieldValue};
use crate::iter::{Row, Rows};
use crate::schema::Schema;
use crate::stack::SchemaStack;

/// Contiguous storage for a number of rows sharing one runtime schema.
///
/// Row `i` occupies bytes `i * stride .. (i + 1) * stride`; fields inside a
/// row follow the schema order with no padding. The buffer also carries a
/// single cursor used by the bind/iterate protocol.
#[derive(Debug, Clone)]
pub struct Buffer {
    schema: Schema,
    rows: usize,
    pub(crate) data: Vec<u8>,
    pub(crate) cursor: Option<usize>,
}

impl Buffer {
    /// Creates a buffer of `rows` rows laid out by `schema`.
    ///
    /// The content of the rows is unspecified; call [`Buffer::zero`] before
    /// reading fields that were never written.
    ///
    /// # Errors
    ///
    /// Returns `ConstructError::SizeOverflow` if `rows * stride` does not fit
    /// in `usize`.
    pub fn new(rows: usize, schema: Schema) -> Result<Self, ConstructError> {
        let bytes = storage_len(rows, schema.stride())?;
        Ok(Self::allocate(rows, schema, bytes))
    }

    pub(crate) fn allocate(rows: usize, schema: Schema, bytes: usize) -> Self {
        log::debug!(
            "creating buffer: {} rows, {} fields, stride {}",
            rows,
            schema.len(),
            schema.stride()
        );
        Self {
            schema,
            rows,
            data: vec![0; bytes],
            cursor: None,
        }
    }

    /// Creates a buffer from the types staged on `stack`, draining it.
    ///
    /// # Errors
    ///
    /// Returns `ConstructError::NoPushedTypes` if the stack is empty and
    /// `ConstructError::SizeOverflow` for an unrepresentable row count.
    pub fn from_stack(stack: &mut SchemaStack, rows: usize) -> Result<Self, ConstructError> {
        let schema = stack.take_schema()?;
        Self::new(rows, schema)
    }

    /// Creates a buffer from an explicit list of field types.
    ///
    /// # Errors
    ///
    /// Returns `ConstructError::BadTypes` if `types` is empty and
    /// `ConstructError::SizeOverflow` for an unrepresentable row count.
    pub fn with_types(rows: usize, types: &[FieldType]) -> Result<Self, ConstructError> {
        Self::new(rows, Schema::from_types(types)?)
    }

    /// Returns a one-row scratch buffer with the same schema.
    #[must_use]
    pub fn single_row_template(&self) -> Buffer {
        Buffer::allocate(1, self.schema.clone(), self.stride())
    }

    /// Returns an empty buffer with the same schema.
    #[must_use]
    pub fn recreate(&self) -> Buffer {
        Buffer::allocate(0, self.schema.clone(), 0)
    }

    #[must_use]
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows == 0
    }

    /// Size of one row in bytes.
    #[must_use]
    pub fn stride(&self) -> usize {
        self.schema.stride()
    }

    /// Size of the whole row storage in bytes.
    #[must_use]
    pub fn byte_len(&self) -> usize {
        self.data.len()
    }

    /// Byte offset of row `index` in the row storage.
    #[must_use]
    pub fn row_offset(&self, index: usize) -> usize {
        index * self.stride()
    }

    /// The raw row storage.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Mutable access to the raw row storage.
    ///
    /// The slice cannot outlive the next structural mutation.
    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Current cursor position, `None` while unbound or after exhaustion.
    #[must_use]
    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    /// Places the cursor directly on `index`.
    ///
    /// # Errors
    ///
    /// Returns `ConstructError::OutOfBoundsIndex` if `index` is past the last row.
    pub fn seek(&mut self, index: usize) -> Result<(), ConstructError> {
        self.check_index(index)?;
        self.cursor = Some(index);
        Ok(())
    }

    /// Positions the cursor so the next [`Buffer::advance`] lands on `row`.
    ///
    /// `row == len()` is accepted: the next advance then ends the walk.
    ///
    /// # Errors
    ///
    /// Returns `ConstructError::OutOfBoundsIndex` if `row > len()`.
    pub fn set_cursor(&mut self, row: usize) -> Result<(), ConstructError> {
        check!(
            row <= self.rows,
            ConstructError::OutOfBoundsIndex {
                index: row,
                length: self.rows,
            }
        );
        self.cursor = row.checked_sub(1);
        Ok(())
    }

    pub fn reset_cursor(&mut self) {
        self.cursor = None;
    }

    /// Moves the cursor to the next row.
    ///
    /// Returns `false` and resets the cursor once the rows are exhausted; the
    /// following call starts again from row 0.
    pub fn advance(&mut self) -> bool {
        let next = self.cursor.map_or(0, |c| c + 1);
        if next >= self.rows {
            self.cursor = None;
            false
        } else {
            self.cursor = Some(next);
            true
        }
    }

    pub(crate) fn check_index(&self, index: usize) -> Result<(), ConstructError> {
        check!(
            index < self.rows,
            ConstructError::OutOfBoundsIndex {
                index,
                length: self.rows,
            }
        );
        Ok(())
    }

    pub(crate) fn check_compatible(&self, other: &Buffer) -> Result<(), ConstructError> {
        check!(
            self.schema.is_layout_compatible(&other.schema),
            ConstructError::UnequalElementSize {
                left: self.stride(),
                right: other.stride(),
            }
        );
        Ok(())
    }

    pub(crate) fn set_rows(&mut self, rows: usize) {
        self.rows = rows;
    }

    pub(crate) fn row_range(&self, index: usize) -> core::ops::Range<usize> {
        let start = self.row_offset(index);
        start..start + self.stride()
    }

    fn field_span(
        &self,
        row: usize,
        field: usize,
        requested: Option<FieldType>,
    ) -> Result<core::ops::Range<usize>, ConstructError> {
        let (start, end) = match requested {
            Some(field_type) => self.schema.typed_field_range(field, field_type)?,
            None => self.schema.field_range(field)?,
        };
        check!(
            row < self.rows,
            ConstructError::OutOfBoundsElement {
                index: row,
                length: self.rows,
            }
        );
        let base = self.row_offset(row);
        Ok(base + start..base + end)
    }

    /// Reads field `field` of row `row`.
    ///
    /// # Errors
    ///
    /// - `ConstructError::InvalidField` if the row has no such field
    /// - `ConstructError::InvalidType` if the field is not declared as `T`
    /// - `ConstructError::OutOfBoundsElement` if `row` is past the last row
    pub fn get<T: FieldValue>(&self, row: usize, field: usize) -> Result<T, ConstructError> {
        let span = self.field_span(row, field, Some(T::TYPE))?;
        Ok(T::decode(&self.data[span]))
    }

    /// Writes `value` into field `field` of row `row`.
    ///
    /// # Errors
    ///
    /// Same conditions as [`Buffer::get`].
    pub fn set<T: FieldValue>(
        &mut self,
        row: usize,
        field: usize,
        value: T,
    ) -> Result<(), ConstructError> {
        let span = self.field_span(row, field, Some(T::TYPE))?;
        value.encode(&mut self.data[span]);
        Ok(())
    }

    /// Raw bytes of one field, regardless of its declared type.
    ///
    /// # Errors
    ///
    /// `ConstructError::InvalidField` or `ConstructError::OutOfBoundsElement`.
    pub fn field_bytes(&self, row: usize, field: usize) -> Result<&[u8], ConstructError> {
        let span = self.field_span(row, field, None)?;
        Ok(&self.data[span])
    }

    /// Mutable raw bytes of one field, valid until the next structural mutation.
    ///
    /// # Errors
    ///
    /// `ConstructError::InvalidField` or `ConstructError::OutOfBoundsElement`.
    pub fn field_bytes_mut(
        &mut self,
        row: usize,
        field: usize,
    ) -> Result<&mut [u8], ConstructError> {
        let span = self.field_span(row, field, None)?;
        Ok(&mut self.data[span])
    }

    /// Copies `bytes` into one field.
    ///
    /// # Errors
    ///
    /// `ConstructError::InvalidData` if `bytes` is not exactly the field width,
    /// plus the conditions of [`Buffer::field_bytes_mut`].
    pub fn set_field_bytes(
        &mut self,
        row: usize,
        field: usize,
        bytes: &[u8],
    ) -> Result<(), ConstructError> {
        let target = self.field_bytes_mut(row, field)?;
        check!(
            target.len() == bytes.len(),
            ConstructError::InvalidData {
                expected: target.len(),
                provided: bytes.len(),
            }
        );
        target.copy_from_slice(bytes);
        Ok(())
    }

    /// Borrowed view of one row.
    ///
    /// # Errors
    ///
    /// Returns `ConstructError::OutOfBoundsIndex` if `index` is past the last row.
    pub fn row(&self, index: usize) -> Result<Row<'_>, ConstructError> {
        self.check_index(index)?;
        Ok(Row::new(index, &self.schema, &self.data[self.row_range(index)]))
    }

    /// Iterates over all rows without touching the cursor.
    #[must_use]
    pub fn rows(&self) -> Rows<'_> {
        Rows::new(self)
    }

    /// Changes the row count, reallocating the storage.
    ///
    /// Shrinking drops trailing rows. Rows added by growing have unspecified
    /// content. A cursor past the new end is reset.
    ///
    /// # Errors
    ///
    /// Returns `ConstructError::SizeOverflow` if `rows * stride` does not fit
    /// in `usize`. The buffer is left unchanged.
    pub fn resize(&mut self, rows: usize) -> Result<(), ConstructError> {
        let bytes = storage_len(rows, self.stride())?;
        log::trace!("resizing buffer: {} -> {} rows", self.rows, rows);
        self.data.resize(bytes, 0);
        self.data.shrink_to_fit();
        self.rows = rows;
        if self.cursor.is_some_and(|c| c >= rows) {
            self.cursor = None;
        }
        Ok(())
    }
}

fn storage_len(rows: usize, stride: usize) -> Result<usize, ConstructError> {
    rows.checked_mul(stride)
        .ok_or(ConstructError::SizeOverflow { rows, stride })
}
