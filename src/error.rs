use thiserror::Error;

/// Error types for `construct` operations
///
/// Every variant corresponds to one violated precondition. Variants carry the
/// values that caused the violation so callers can report them without
/// re-deriving state.
#[derive(Error, Debug, PartialEq, Eq, Clone)]
pub enum ConstructError {
    /// Field index is beyond the schema length
    #[error("Invalid field: field {field} is beyond schema length {num_fields}")]
    InvalidField {
        /// Field that was accessed
        field: usize,
        /// Number of fields in the schema
        num_fields: usize,
    },
    /// No field types were pushed before creating a buffer or flushing the stack
    #[error("No pushed types: the schema stack is empty")]
    NoPushedTypes,
    /// Data payload does not fit the destination
    #[error("Invalid data: expected {expected} bytes, got {provided}")]
    InvalidData {
        /// Number of bytes the operation requires
        expected: usize,
        /// Number of bytes supplied
        provided: usize,
    },
    /// Buffer handle does not refer to a live buffer
    #[error("Bad buffer: handle {slot}:{generation} is not live")]
    BadBuffer {
        /// Arena slot of the handle
        slot: u32,
        /// Generation of the handle
        generation: u32,
    },
    /// Accessor type differs from the declared field type
    #[error("Invalid type: field {field} is declared {declared:?}, accessed as {requested:?}")]
    InvalidType {
        /// Field that was accessed
        field: usize,
        /// Type declared by the schema
        declared: crate::FieldType,
        /// Type requested by the caller
        requested: crate::FieldType,
    },
    /// Row index is beyond the current row count
    #[error("Index out of bounds: index {index} is beyond row count {length}")]
    OutOfBoundsIndex {
        /// Index that was accessed
        index: usize,
        /// Current row count
        length: usize,
    },
    /// Element index is beyond the current row count in a field access
    #[error("Element out of bounds: element {index} is beyond row count {length}")]
    OutOfBoundsElement {
        /// Element that was accessed
        index: usize,
        /// Current row count
        length: usize,
    },
    /// Row strides of two buffers differ
    #[error("Unequal element size: {left} bytes vs {right} bytes")]
    UnequalElementSize {
        /// Stride of the first (source) buffer
        left: usize,
        /// Stride of the second (destination) buffer
        right: usize,
    },
    /// Destination buffer has fewer rows than the source
    #[error("Destination too small: {required} rows required, {provided} available")]
    SmallDestBuffer {
        /// Rows required by the operation
        required: usize,
        /// Rows in the destination
        provided: usize,
    },
    /// More types were popped than are staged
    #[error("Invalid number of types: requested {requested}, {available} staged")]
    InvalidNumTypes {
        /// Number of types requested
        requested: usize,
        /// Number of types on the stack
        available: usize,
    },
    /// Ambient operation with no bound buffer
    #[error("No bound buffer")]
    NoBoundBuffer,
    /// Range start is past its end
    #[error("Invalid index range: start {start} is past end {end}")]
    InvalidIndex {
        /// Start of the range
        start: usize,
        /// End of the range
        end: usize,
    },
    /// Explicit schema is empty
    #[error("Bad types: an explicit schema needs at least one field")]
    BadTypes,
    /// The bound buffer's cursor is not positioned on a row
    #[error("Cursor unpositioned: bind or iterate the buffer first")]
    CursorUnpositioned,
    /// Row storage size does not fit in `usize`
    #[error("Size overflow: {rows} rows of {stride} bytes")]
    SizeOverflow {
        /// Requested row count
        rows: usize,
        /// Row stride in bytes
        stride: usize,
    },
    /// Every handle slot of the context is taken
    #[error("Arena full: no buffer slot left")]
    ArenaFull,
}

impl ConstructError {
    /// Returns the stable identifier of the error kind.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidField { .. } => "ERROR_INVALID_FIELD",
            Self::NoPushedTypes => "ERROR_NO_PUSHED_TYPES",
            Self::InvalidData { .. } => "ERROR_INVALID_DATA",
            Self::BadBuffer { .. } => "ERROR_BAD_BUFFER",
            Self::InvalidType { .. } => "ERROR_INVALID_TYPE",
            Self::OutOfBoundsIndex { .. } => "ERROR_OUT_OF_BOUNDS_INDEX",
            Self::OutOfBoundsElement { .. } => "ERROR_OUT_OF_BOUNDS_ELEMENT",
            Self::UnequalElementSize { .. } => "ERROR_UNEQUAL_ELEMENT_SIZE",
            Self::SmallDestBuffer { .. } => "ERROR_SMALL_DEST_BUFFER",
            Self::InvalidNumTypes { .. } => "ERROR_INVALID_NUM_TYPES",
            Self::NoBoundBuffer => "ERROR_NO_BOUND_BUFFER",
            Self::InvalidIndex { .. } => "ERROR_INVALID_INDEX",
            Self::BadTypes => "ERROR_BAD_TYPES",
            Self::CursorUnpositioned => "ERROR_CURSOR_UNPOSITIONED",
            Self::SizeOverflow { .. } => "ERROR_SIZE_OVERFLOW",
            Self::ArenaFull => "ERROR_ARENA_FULL",
        }
    }
}
