use crate::buffer::Buffer;
use crate::error::ConstructError;
use crate::field_type::FieldValue;
use crate::schema::Schema;

/// Borrowed view of a single row of a [`Buffer`].
#[derive(Debug, Clone, Copy)]
pub struct Row<'a> {
    index: usize,
    schema: &'a Schema,
    bytes: &'a [u8],
}

impl<'a> Row<'a> {
    pub(crate) fn new(index: usize, schema: &'a Schema, bytes: &'a [u8]) -> Self {
        Self {
            index,
            schema,
            bytes,
        }
    }

    /// Index of this row in its buffer.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    #[must_use]
    pub fn as_bytes(&self) -> &'a [u8] {
        self.bytes
    }

    /// Reads one typed field of the row.
    ///
    /// # Errors
    ///
    /// `ConstructError::InvalidField` or `ConstructError::InvalidType`.
    pub fn get<T: FieldValue>(&self, field: usize) -> Result<T, ConstructError> {
        let (start, end) = self.schema.typed_field_range(field, T::TYPE)?;
        Ok(T::decode(&self.bytes[start..end]))
    }

    /// Raw bytes of one field.
    ///
    /// # Errors
    ///
    /// `ConstructError::InvalidField` if the row has no such field.
    pub fn field_bytes(&self, field: usize) -> Result<&'a [u8], ConstructError> {
        let (start, end) = self.schema.field_range(field)?;
        Ok(&self.bytes[start..end])
    }
}

/// Iterator over the rows of a [`Buffer`]
///
/// Independent of the buffer cursor. This iterator implements `Clone`.
#[derive(Clone)]
pub struct Rows<'a> {
    buffer: &'a Buffer,
    front: usize,
    back: usize,
}

impl<'a> Rows<'a> {
    pub(crate) fn new(buffer: &'a Buffer) -> Self {
        Self {
            buffer,
            front: 0,
            back: buffer.len(),
        }
    }

    fn row_at(&self, index: usize) -> Row<'a> {
        let buffer: &'a Buffer = self.buffer;
        Row::new(index, buffer.schema(), &buffer.as_bytes()[buffer.row_range(index)])
    }
}

impl<'a> Iterator for Rows<'a> {
    type Item = Row<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.front >= self.back {
            return None;
        }
        let row = self.row_at(self.front);
        self.front += 1;
        Some(row)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.back - self.front;
        (remaining, Some(remaining))
    }
}

impl DoubleEndedIterator for Rows<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.front >= self.back {
            return None;
        }
        self.back -= 1;
        Some(self.row_at(self.back))
    }
}

impl ExactSizeIterator for Rows<'_> {}

impl<'a> IntoIterator for &'a Buffer {
    type Item = Row<'a>;
    type IntoIter = Rows<'a>;

    fn into_iter(self) -> Self::IntoIter {
        Rows::new(self)
    }
}
