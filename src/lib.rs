#![cfg_attr(not(test), no_std)]

//! `construct`: struct arrays whose layout is decided at run time.
//!
//! A [`Buffer`] stores N rows of a runtime [`Schema`] (an ordered list of
//! primitive [`FieldType`]s) in one contiguous byte region. Fields are read
//! and written by row and field index, with the declared type checked against
//! the type the caller asks for.
//!
//! Row layout: `[field 0][field 1]...[field k-1]`, tightly packed, no padding,
//! native byte order. The row stride is the sum of the field widths and row
//! `i` starts at byte `i * stride`.
//!
//! # Performance Characteristics
//!
//! ## Time Complexity
//! - `get()`, `set()`: O(1) - field offsets come from a table built with the schema
//! - `swap()`, `replace()`: O(stride)
//! - `remove()`, `insert()`: O(N) - later rows are shifted
//! - `append()`, `resize()`: O(N) worst case - storage may be reallocated
//! - `sort_by_field()`: O(N²) worst case, O(N) on already sorted input
//!
//! ## Space Complexity
//! - Row storage: exactly `N * stride` bytes
//! - Schema: one type tag and one offset per field
//!
//! # Field Types
//!
//! | `FieldType` | Rust type | Width |
//! |-------------|-----------|-------|
//! | `UInt32`    | `u32`     | 4     |
//! | `Int32`     | `i32`     | 4     |
//! | `Float32`   | `f32`     | 4     |
//! | `Char`      | `i8`      | 1     |
//! | `UChar`     | `u8`      | 1     |
//! | `Pointer`   | `usize`   | machine word |
//!
//! A `Pointer` field holds a raw word value; the engine never dereferences it.
//!
//! # Explicit Buffers
//!
//! ```
//! # use construct::{Buffer, FieldType};
//! let mut buffer = Buffer::with_types(3, &[FieldType::UInt32, FieldType::Float32]).unwrap();
//!
//! buffer.set(0, 0, 42u32).unwrap();
//! buffer.set(0, 1, 3.5f32).unwrap();
//!
//! assert_eq!(buffer.get::<u32>(0, 0), Ok(42));
//! assert_eq!(buffer.get::<f32>(0, 1), Ok(3.5));
//! assert_eq!(buffer.stride(), 8);
//!
//! // The declared type is enforced unless checks are compiled out
//! if construct::CHECK_MODE.is_checked() {
//!     assert!(buffer.get::<i32>(0, 0).is_err());
//! }
//! ```
//!
//! # Schema Stack and Bound Buffer
//!
//! A [`Context`] stages field types for the next buffer and keeps one buffer
//! bound, so that rows can be walked with a cursor and accessed without
//! repeating the buffer and row:
//!
//! ```
//! # use construct::{Context, FieldType};
//! let mut ctx = Context::new();
//! ctx.push_type(FieldType::UInt32);
//! ctx.push_type(FieldType::Float32);
//! let id = ctx.create(3).unwrap();   // drains the staged types
//! assert!(ctx.stack().is_empty());
//!
//! ctx.bind(id, 0).unwrap();
//! ctx.set_u32(0, 42).unwrap();
//! ctx.set_f32(1, 3.5).unwrap();
//!
//! assert_eq!(ctx.get_u32(0), Ok(42));
//! assert_eq!(ctx.get_f32(1), Ok(3.5));
//!
//! ctx.release(id).unwrap();
//! assert!(ctx.bound().is_none());
//! ```
//!
//! # Structural Operations
//!
//! ```
//! # use construct::{Buffer, FieldType};
//! let mut buffer = Buffer::with_types(4, &[FieldType::Int32]).unwrap();
//! for (row, key) in [5i32, 1, 1, 3].into_iter().enumerate() {
//!     buffer.set(row, 0, key).unwrap();
//! }
//!
//! buffer.sort_by_field(true, 0, FieldType::Int32).unwrap();
//! let keys: Vec<i32> = buffer.rows().map(|row| row.get::<i32>(0).unwrap()).collect();
//! assert_eq!(keys, [1, 1, 3, 5]);
//!
//! buffer.remove(0).unwrap();
//! buffer.reverse();
//! let keys: Vec<i32> = buffer.rows().map(|row| row.get::<i32>(0).unwrap()).collect();
//! assert_eq!(keys, [5, 3, 1]);
//! ```
//!
//! # Binary Transfer
//!
//! [`Buffer::dump`] and [`Buffer::load`] move the raw row storage in and out.
//! No schema is carried along; load into a buffer with the same layout.
//!
//! # Checked and Unchecked Mode
//!
//! Every precondition is validated by default and reported as a
//! [`ConstructError`]. Enabling the `unchecked` feature compiles the checks
//! out for throughput. Violations then go unreported: they panic where a
//! slice access goes out of range and touch the wrong bytes otherwise.
//! Handle validation in [`Context`] stays on in both modes.
//!
//! ```toml
//! [dependencies]
//! construct = { version = "0.1", features = ["unchecked"] }
//! ```
//!
//! # `no_std` Compatibility
//!
//! The crate needs only `core` and `alloc`. Enable the `std` feature for
//! `std::error::Error` integration of the error type.

extern crate alloc;

mod buffer;
mod config;
mod context;
mod error;
mod field_type;
mod iter;
mod ops;
mod schema;
mod stack;
mod transfer;

// Re-export public types and traits
pub use buffer::Buffer;
pub use config::{CheckMode, CHECK_MODE};
pub use context::{BufferId, Context};
pub use error::ConstructError;
pub use field_type::{FieldType, FieldValue};
pub use iter::{Row, Rows};
pub use schema::Schema;
pub use stack::SchemaStack;
