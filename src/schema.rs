use alloc::vec::Vec;

use crate::config::check;
use crate::error::ConstructError;
use crate::field_type::FieldType;

/// Row layout of a buffer: an ordered list of field types.
///
/// Fields are packed back to back with no padding. The byte offset of every
/// field is computed once here and looked up on each access.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    types: Vec<FieldType>,
    offsets: Vec<usize>,
    stride: usize,
}

impl Schema {
    /// Builds a schema from an explicit list of field types.
    ///
    /// # Errors
    ///
    /// Returns `ConstructError::BadTypes` if `types` is empty.
    pub fn new(types: Vec<FieldType>) -> Result<Self, ConstructError> {
        check!(!types.is_empty(), ConstructError::BadTypes);

        let mut offsets = Vec::with_capacity(types.len());
        let mut offset = 0;
        for field_type in &types {
            offsets.push(offset);
            offset += field_type.width();
        }

        Ok(Self {
            types,
            offsets,
            stride: offset,
        })
    }

    /// Builds a schema by copying a slice of field types.
    ///
    /// # Errors
    ///
    /// Returns `ConstructError::BadTypes` if `types` is empty.
    pub fn from_types(types: &[FieldType]) -> Result<Self, ConstructError> {
        Self::new(types.to_vec())
    }

    /// Number of fields in one row.
    #[must_use]
    pub fn len(&self) -> usize {
        self.types.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Size of one row in bytes.
    #[must_use]
    pub fn stride(&self) -> usize {
        self.stride
    }

    #[must_use]
    pub fn types(&self) -> &[FieldType] {
        &self.types
    }

    /// Declared type of `field`, or `None` past the end of the row.
    #[must_use]
    pub fn field_type(&self, field: usize) -> Option<FieldType> {
        self.types.get(field).copied()
    }

    /// Byte offset of `field` within a row, or `None` past the end of the row.
    #[must_use]
    pub fn offset(&self, field: usize) -> Option<usize> {
        self.offsets.get(field).copied()
    }

    /// Two schemas are layout compatible when their rows have the same size.
    ///
    /// Bulk copies between buffers only require compatibility, not an
    /// identical field sequence.
    #[must_use]
    pub fn is_layout_compatible(&self, other: &Schema) -> bool {
        self.stride == other.stride
    }

    /// Byte range of `field` within a row, validated against the schema.
    ///
    /// # Errors
    ///
    /// Returns `ConstructError::InvalidField` if `field` is past the end of
    /// the row.
    pub(crate) fn field_range(&self, field: usize) -> Result<(usize, usize), ConstructError> {
        check!(
            field < self.types.len(),
            ConstructError::InvalidField {
                field,
                num_fields: self.types.len(),
            }
        );
        let start = self.offsets[field];
        Ok((start, start + self.types[field].width()))
    }

    /// Like [`Schema::field_range`], additionally requiring the declared type.
    ///
    /// # Errors
    ///
    /// Returns `ConstructError::InvalidField` for a missing field and
    /// `ConstructError::InvalidType` if its declared type is not `requested`.
    pub(crate) fn typed_field_range(
        &self,
        field: usize,
        requested: FieldType,
    ) -> Result<(usize, usize), ConstructError> {
        let range = self.field_range(field)?;
        check!(
            self.types[field] == requested,
            ConstructError::InvalidType {
                field,
                declared: self.types[field],
                requested,
            }
        );
        Ok(range)
    }
}
