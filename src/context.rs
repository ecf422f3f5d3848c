//! The bound-buffer context.
//!
//! A [`Context`] owns a schema stack, every buffer created through it, and a
//! single slot naming the currently bound buffer. Buffers are addressed by
//! [`BufferId`] handles. A handle becomes stale when its buffer is released;
//! using a stale handle fails with `ConstructError::BadBuffer` instead of
//! touching freed memory.
//!
//! Methods without a handle argument work on the bound buffer, at its cursor
//! where a row is needed. They fail with `ConstructError::NoBoundBuffer` when
//! nothing is bound. Handle and bound-slot validation is always performed,
//! also in unchecked mode.

use alloc::vec::Vec;

use crate::buffer::Buffer;
use crate::config::check;
use crate::error::ConstructError;
use crate::field_type::{FieldType, FieldValue};
use crate::schema::Schema;
use crate::stack::SchemaStack;

/// Handle to a buffer owned by a [`Context`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BufferId {
    slot: u32,
    generation: u32,
}

impl BufferId {
    fn stale(self) -> ConstructError {
        ConstructError::BadBuffer {
            slot: self.slot,
            generation: self.generation,
        }
    }
}

#[derive(Debug, Default)]
struct Slot {
    generation: u32,
    buffer: Option<Buffer>,
}

/// Schema stack, buffer arena and bound-buffer slot.
///
/// One context serves one thread; it has no internal synchronization.
#[derive(Debug, Default)]
pub struct Context {
    stack: SchemaStack,
    slots: Vec<Slot>,
    free: Vec<u32>,
    bound: Option<BufferId>,
}

impl Context {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn slot_index(&self, id: BufferId) -> Result<usize, ConstructError> {
        let index = id.slot as usize;
        match self.slots.get(index) {
            Some(slot) if slot.generation == id.generation && slot.buffer.is_some() => Ok(index),
            _ => Err(id.stale()),
        }
    }

    fn pair_mut(
        &mut self,
        first: BufferId,
        second: BufferId,
    ) -> Result<(&mut Buffer, &mut Buffer), ConstructError> {
        let a = self.slot_index(first)?;
        let b = self.slot_index(second)?;
        debug_assert_ne!(a, b, "pair_mut needs two distinct buffers");
        let (slot_a, slot_b) = if a < b {
            let (head, tail) = self.slots.split_at_mut(b);
            (&mut head[a], &mut tail[0])
        } else {
            let (head, tail) = self.slots.split_at_mut(a);
            (&mut tail[0], &mut head[b])
        };
        match (slot_a.buffer.as_mut(), slot_b.buffer.as_mut()) {
            (Some(x), Some(y)) => Ok((x, y)),
            (None, _) => Err(first.stale()),
            (_, None) => Err(second.stale()),
        }
    }

    // ---- schema stack ----

    #[must_use]
    pub fn stack(&self) -> &SchemaStack {
        &self.stack
    }

    pub fn push_type(&mut self, field_type: FieldType) {
        self.stack.push(field_type);
    }

    /// Removes the `count` most recently pushed types.
    ///
    /// # Errors
    ///
    /// `ConstructError::InvalidNumTypes` if fewer than `count` types are staged.
    pub fn pop_types(&mut self, count: usize) -> Result<(), ConstructError> {
        self.stack.pop(count)
    }

    /// Clears the staged types.
    ///
    /// # Errors
    ///
    /// `ConstructError::NoPushedTypes` if nothing is staged.
    pub fn flush_types(&mut self) -> Result<(), ConstructError> {
        self.stack.flush()
    }

    /// Stages the field types of buffer `id`.
    ///
    /// # Errors
    ///
    /// `ConstructError::BadBuffer` if `id` is stale.
    pub fn repush_buffer_types(&mut self, id: BufferId) -> Result<(), ConstructError> {
        let index = self.slot_index(id)?;
        if let Some(buffer) = &self.slots[index].buffer {
            self.stack.repush(buffer.schema());
        }
        Ok(())
    }

    /// Stages the field types of the bound buffer.
    ///
    /// # Errors
    ///
    /// `ConstructError::NoBoundBuffer` if nothing is bound.
    pub fn repush_types(&mut self) -> Result<(), ConstructError> {
        let id = self.bound_id()?;
        self.repush_buffer_types(id)
    }

    // ---- lifecycle ----

    /// Moves `buffer` into the context and returns its handle.
    ///
    /// # Errors
    ///
    /// `ConstructError::ArenaFull` if every one of the `u32::MAX + 1` handle
    /// slots holds a live buffer.
    pub fn adopt(&mut self, buffer: Buffer) -> Result<BufferId, ConstructError> {
        if let Some(slot) = self.free.pop() {
            let entry = &mut self.slots[slot as usize];
            entry.buffer = Some(buffer);
            return Ok(BufferId {
                slot,
                generation: entry.generation,
            });
        }
        let slot = u32::try_from(self.slots.len()).map_err(|_| ConstructError::ArenaFull)?;
        self.slots.push(Slot {
            generation: 0,
            buffer: Some(buffer),
        });
        Ok(BufferId {
            slot,
            generation: 0,
        })
    }

    /// Creates a buffer of `rows` rows from the staged types, draining the stack.
    ///
    /// # Errors
    ///
    /// `ConstructError::NoPushedTypes` if nothing is staged.
    pub fn create(&mut self, rows: usize) -> Result<BufferId, ConstructError> {
        let buffer = Buffer::from_stack(&mut self.stack, rows)?;
        self.adopt(buffer)
    }

    /// Creates a buffer from an explicit schema, leaving the stack alone.
    ///
    /// # Errors
    ///
    /// `ConstructError::SizeOverflow` for an unrepresentable row count.
    pub fn create_with_schema(
        &mut self,
        rows: usize,
        schema: Schema,
    ) -> Result<BufferId, ConstructError> {
        let buffer = Buffer::new(rows, schema)?;
        self.adopt(buffer)
    }

    /// Creates a buffer from an explicit list of types, leaving the stack alone.
    ///
    /// # Errors
    ///
    /// `ConstructError::BadTypes` if `types` is empty.
    pub fn create_with_types(
        &mut self,
        rows: usize,
        types: &[FieldType],
    ) -> Result<BufferId, ConstructError> {
        let buffer = Buffer::with_types(rows, types)?;
        self.adopt(buffer)
    }

    /// Removes buffer `id` from the context and hands it to the caller.
    ///
    /// Clears the bound slot if `id` was bound.
    ///
    /// # Errors
    ///
    /// `ConstructError::BadBuffer` if `id` is stale.
    pub fn take(&mut self, id: BufferId) -> Result<Buffer, ConstructError> {
        let index = self.slot_index(id)?;
        let slot = &mut self.slots[index];
        let buffer = slot.buffer.take().ok_or_else(|| id.stale())?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(id.slot);
        if self.bound == Some(id) {
            self.bound = None;
        }
        Ok(buffer)
    }

    /// Frees buffer `id`. Its handle is stale afterwards.
    ///
    /// # Errors
    ///
    /// `ConstructError::BadBuffer` if `id` is already stale.
    pub fn release(&mut self, id: BufferId) -> Result<(), ConstructError> {
        let buffer = self.take(id)?;
        log::debug!(
            "released buffer {}:{} ({} rows)",
            id.slot,
            id.generation,
            buffer.len()
        );
        Ok(())
    }

    /// Whether `id` refers to a live buffer.
    #[must_use]
    pub fn contains(&self, id: BufferId) -> bool {
        self.slot_index(id).is_ok()
    }

    /// Number of live buffers.
    #[must_use]
    pub fn buffer_count(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    /// # Errors
    ///
    /// `ConstructError::BadBuffer` if `id` is stale.
    pub fn buffer(&self, id: BufferId) -> Result<&Buffer, ConstructError> {
        let index = self.slot_index(id)?;
        self.slots[index].buffer.as_ref().ok_or_else(|| id.stale())
    }

    /// # Errors
    ///
    /// `ConstructError::BadBuffer` if `id` is stale.
    pub fn buffer_mut(&mut self, id: BufferId) -> Result<&mut Buffer, ConstructError> {
        let index = self.slot_index(id)?;
        self.slots[index].buffer.as_mut().ok_or_else(|| id.stale())
    }

    /// Creates a one-row buffer with the layout of buffer `id`.
    ///
    /// # Errors
    ///
    /// `ConstructError::BadBuffer` if `id` is stale.
    pub fn create_single_buffer_element(&mut self, id: BufferId) -> Result<BufferId, ConstructError> {
        let element = self.buffer(id)?.single_row_template();
        self.adopt(element)
    }

    /// Creates a one-row buffer with the layout of the bound buffer.
    ///
    /// # Errors
    ///
    /// `ConstructError::NoBoundBuffer` if nothing is bound.
    pub fn create_single_element(&mut self) -> Result<BufferId, ConstructError> {
        let id = self.bound_id()?;
        self.create_single_buffer_element(id)
    }

    /// Creates an empty buffer with the layout of buffer `id`.
    ///
    /// # Errors
    ///
    /// `ConstructError::BadBuffer` if `id` is stale.
    pub fn recreate_buffer(&mut self, id: BufferId) -> Result<BufferId, ConstructError> {
        let empty = self.buffer(id)?.recreate();
        self.adopt(empty)
    }

    /// Creates an empty buffer with the layout of the bound buffer.
    ///
    /// # Errors
    ///
    /// `ConstructError::NoBoundBuffer` if nothing is bound.
    pub fn recreate(&mut self) -> Result<BufferId, ConstructError> {
        let id = self.bound_id()?;
        self.recreate_buffer(id)
    }

    /// Deep copy of buffer `id`, including its cursor.
    ///
    /// # Errors
    ///
    /// `ConstructError::BadBuffer` if `id` is stale.
    pub fn copy_buffer(&mut self, id: BufferId) -> Result<BufferId, ConstructError> {
        let copy = self.buffer(id)?.clone();
        self.adopt(copy)
    }

    /// Copies rows `start..end` of buffer `id` into a new buffer.
    ///
    /// # Errors
    ///
    /// `ConstructError::BadBuffer`, plus the conditions of [`Buffer::copy_range`].
    pub fn copy_partial_buffer(
        &mut self,
        id: BufferId,
        start: usize,
        end: usize,
    ) -> Result<BufferId, ConstructError> {
        let copy = self.buffer(id)?.copy_range(start, end)?;
        self.adopt(copy)
    }

    /// Copies rows `start..end` of the bound buffer into a new buffer.
    ///
    /// # Errors
    ///
    /// `ConstructError::NoBoundBuffer`, plus the conditions of [`Buffer::copy_range`].
    pub fn copy_partial(&mut self, start: usize, end: usize) -> Result<BufferId, ConstructError> {
        let id = self.bound_id()?;
        self.copy_partial_buffer(id, start, end)
    }

    // ---- bind / iterate ----

    /// Binds buffer `id` with its cursor on row `index`.
    ///
    /// # Errors
    ///
    /// `ConstructError::BadBuffer` if `id` is stale and
    /// `ConstructError::OutOfBoundsIndex` if `index` is past the last row.
    /// The binding is unchanged on error.
    pub fn bind(&mut self, id: BufferId, index: usize) -> Result<(), ConstructError> {
        self.buffer_mut(id)?.seek(index)?;
        self.bound = Some(id);
        log::debug!("bound buffer {}:{} at row {}", id.slot, id.generation, index);
        Ok(())
    }

    /// Empties the bound slot.
    pub fn unbind(&mut self) {
        self.bound = None;
    }

    /// The bound buffer handle, if any.
    #[must_use]
    pub fn bound(&self) -> Option<BufferId> {
        self.bound
    }

    fn bound_id(&self) -> Result<BufferId, ConstructError> {
        self.bound.ok_or(ConstructError::NoBoundBuffer)
    }

    /// # Errors
    ///
    /// `ConstructError::NoBoundBuffer` if nothing is bound.
    pub fn bound_buffer(&self) -> Result<&Buffer, ConstructError> {
        self.buffer(self.bound_id()?)
    }

    /// # Errors
    ///
    /// `ConstructError::NoBoundBuffer` if nothing is bound.
    pub fn bound_buffer_mut(&mut self) -> Result<&mut Buffer, ConstructError> {
        let id = self.bound_id()?;
        self.buffer_mut(id)
    }

    /// Advances the cursor of buffer `id` and binds it on the new row.
    ///
    /// Returns `false` once every row has been visited; the cursor is reset
    /// and the next call starts again from row 0. An empty buffer always
    /// returns `false`.
    ///
    /// ```
    /// # use construct::{Context, FieldType};
    /// let mut ctx = Context::new();
    /// ctx.push_type(FieldType::UInt32);
    /// let id = ctx.create(3).unwrap();
    ///
    /// let mut n = 0;
    /// while ctx.iterate(id).unwrap() {
    ///     ctx.set_u32(0, n).unwrap();
    ///     n += 1;
    /// }
    /// assert_eq!(n, 3);
    /// assert_eq!(ctx.buffer(id).unwrap().get::<u32>(2, 0), Ok(2));
    /// ```
    ///
    /// # Errors
    ///
    /// `ConstructError::BadBuffer` if `id` is stale.
    pub fn iterate(&mut self, id: BufferId) -> Result<bool, ConstructError> {
        let available = self.buffer_mut(id)?.advance();
        if available {
            self.bound = Some(id);
        }
        Ok(available)
    }

    /// Cursor of the bound buffer.
    ///
    /// # Errors
    ///
    /// `ConstructError::NoBoundBuffer` if nothing is bound.
    pub fn cursor(&self) -> Result<Option<usize>, ConstructError> {
        Ok(self.bound_buffer()?.cursor())
    }

    /// Positions the bound cursor so the next `iterate` lands on `row`.
    ///
    /// # Errors
    ///
    /// `ConstructError::NoBoundBuffer`, plus the conditions of
    /// [`Buffer::set_cursor`].
    pub fn set_cursor(&mut self, row: usize) -> Result<(), ConstructError> {
        self.bound_buffer_mut()?.set_cursor(row)
    }

    fn bound_row(&self) -> Result<(&Buffer, usize), ConstructError> {
        let buffer = self.bound_buffer()?;
        let row = buffer.cursor().ok_or(ConstructError::CursorUnpositioned)?;
        Ok((buffer, row))
    }

    fn bound_row_mut(&mut self) -> Result<(&mut Buffer, usize), ConstructError> {
        let buffer = self.bound_buffer_mut()?;
        let row = buffer.cursor().ok_or(ConstructError::CursorUnpositioned)?;
        Ok((buffer, row))
    }

    // ---- field access on the bound row ----

    /// Reads field `field` of the bound row.
    ///
    /// # Errors
    ///
    /// `ConstructError::NoBoundBuffer`, `ConstructError::CursorUnpositioned`,
    /// plus the conditions of [`Buffer::get`].
    pub fn get<T: FieldValue>(&self, field: usize) -> Result<T, ConstructError> {
        let (buffer, row) = self.bound_row()?;
        buffer.get(row, field)
    }

    /// Writes field `field` of the bound row.
    ///
    /// # Errors
    ///
    /// Same conditions as [`Context::get`].
    pub fn set<T: FieldValue>(&mut self, field: usize, value: T) -> Result<(), ConstructError> {
        let (buffer, row) = self.bound_row_mut()?;
        buffer.set(row, field, value)
    }

    /// Raw bytes of field `field` of the bound row.
    ///
    /// # Errors
    ///
    /// Same conditions as [`Context::get`], without the type check.
    pub fn field_bytes(&self, field: usize) -> Result<&[u8], ConstructError> {
        let (buffer, row) = self.bound_row()?;
        buffer.field_bytes(row, field)
    }

    /// Copies `bytes` into field `field` of the bound row.
    ///
    /// # Errors
    ///
    /// `ConstructError::InvalidData` if `bytes` is not the field width, plus
    /// the conditions of [`Context::field_bytes`].
    pub fn set_field_bytes(&mut self, field: usize, bytes: &[u8]) -> Result<(), ConstructError> {
        let (buffer, row) = self.bound_row_mut()?;
        buffer.set_field_bytes(row, field, bytes)
    }

    // ---- layout of the bound buffer ----

    /// # Errors
    ///
    /// `ConstructError::NoBoundBuffer` if nothing is bound.
    pub fn length(&self) -> Result<usize, ConstructError> {
        Ok(self.bound_buffer()?.len())
    }

    /// Row stride of the bound buffer.
    ///
    /// # Errors
    ///
    /// `ConstructError::NoBoundBuffer` if nothing is bound.
    pub fn element_size(&self) -> Result<usize, ConstructError> {
        Ok(self.bound_buffer()?.stride())
    }

    /// Storage size of the bound buffer in bytes.
    ///
    /// # Errors
    ///
    /// `ConstructError::NoBoundBuffer` if nothing is bound.
    pub fn size(&self) -> Result<usize, ConstructError> {
        Ok(self.bound_buffer()?.byte_len())
    }

    /// # Errors
    ///
    /// `ConstructError::NoBoundBuffer` if nothing is bound.
    pub fn element_data_offset(&self, index: usize) -> Result<usize, ConstructError> {
        Ok(self.bound_buffer()?.row_offset(index))
    }

    // ---- structural operations on the bound buffer ----

    /// # Errors
    ///
    /// `ConstructError::NoBoundBuffer`, plus the conditions of [`Buffer::swap`].
    pub fn swap_at(&mut self, a: usize, b: usize) -> Result<(), ConstructError> {
        self.bound_buffer_mut()?.swap(a, b)
    }

    /// Overwrites row `index` of the bound buffer with one-row buffer `element`.
    ///
    /// # Errors
    ///
    /// `ConstructError::NoBoundBuffer`, `ConstructError::BadBuffer`, plus the
    /// conditions of [`Buffer::replace`].
    pub fn replace_at(&mut self, index: usize, element: BufferId) -> Result<(), ConstructError> {
        let id = self.bound_id()?;
        self.replace_buffer_at(id, index, element)
    }

    /// Overwrites row `index` of buffer `id` with one-row buffer `element`.
    ///
    /// # Errors
    ///
    /// `ConstructError::BadBuffer`, plus the conditions of [`Buffer::replace`].
    pub fn replace_buffer_at(
        &mut self,
        id: BufferId,
        index: usize,
        element: BufferId,
    ) -> Result<(), ConstructError> {
        if id == element {
            let buffer = self.buffer_mut(id)?;
            check!(
                !buffer.is_empty(),
                ConstructError::InvalidData {
                    expected: buffer.stride(),
                    provided: 0,
                }
            );
            return buffer.copy_row_within(0, index);
        }
        let (target, element) = self.pair_mut(id, element)?;
        target.replace(index, element)
    }

    /// Copies row `source_index` over row `index` inside the bound buffer.
    ///
    /// # Errors
    ///
    /// `ConstructError::NoBoundBuffer`, plus the conditions of
    /// [`Buffer::copy_row_within`].
    pub fn replace_inside(&mut self, source_index: usize, index: usize) -> Result<(), ConstructError> {
        self.bound_buffer_mut()?.copy_row_within(source_index, index)
    }

    /// # Errors
    ///
    /// `ConstructError::NoBoundBuffer`, plus the conditions of [`Buffer::insert`].
    pub fn insert_at(&mut self, index: usize, element: BufferId) -> Result<(), ConstructError> {
        let id = self.bound_id()?;
        if id == element {
            let copy = self.buffer(id)?.clone();
            return self.buffer_mut(id)?.insert(index, &copy);
        }
        let (target, element) = self.pair_mut(id, element)?;
        target.insert(index, element)
    }

    /// # Errors
    ///
    /// `ConstructError::NoBoundBuffer`, plus the conditions of [`Buffer::remove`].
    pub fn remove_at(&mut self, index: usize) -> Result<(), ConstructError> {
        self.bound_buffer_mut()?.remove(index)
    }

    /// # Errors
    ///
    /// `ConstructError::NoBoundBuffer`, plus the conditions of [`Buffer::resize`].
    pub fn resize(&mut self, rows: usize) -> Result<(), ConstructError> {
        self.bound_buffer_mut()?.resize(rows)
    }

    /// Appends every row of `source` to the bound buffer.
    ///
    /// # Errors
    ///
    /// `ConstructError::NoBoundBuffer`, `ConstructError::BadBuffer`, plus the
    /// conditions of [`Buffer::append`].
    pub fn append_at(&mut self, source: BufferId) -> Result<(), ConstructError> {
        let id = self.bound_id()?;
        self.append_buffer_at(source, id)
    }

    /// Appends every row of the bound buffer to `dest`.
    ///
    /// # Errors
    ///
    /// `ConstructError::NoBoundBuffer`, `ConstructError::BadBuffer`, plus the
    /// conditions of [`Buffer::append`].
    pub fn append_to(&mut self, dest: BufferId) -> Result<(), ConstructError> {
        let id = self.bound_id()?;
        self.append_buffer_at(id, dest)
    }

    /// Appends row `index` of `source` to the bound buffer.
    ///
    /// # Errors
    ///
    /// `ConstructError::NoBoundBuffer`, `ConstructError::BadBuffer`, plus the
    /// conditions of [`Buffer::append_row`].
    pub fn append_element_at(&mut self, source: BufferId, index: usize) -> Result<(), ConstructError> {
        let id = self.bound_id()?;
        self.append_buffer_element_at(source, index, id)
    }

    /// Appends row `index` of the bound buffer to `dest`.
    ///
    /// # Errors
    ///
    /// `ConstructError::NoBoundBuffer`, `ConstructError::BadBuffer`, plus the
    /// conditions of [`Buffer::append_row`].
    pub fn append_element_to(&mut self, dest: BufferId, index: usize) -> Result<(), ConstructError> {
        let id = self.bound_id()?;
        self.append_buffer_element_at(id, index, dest)
    }

    /// Copies the bound buffer's rows over the first rows of `dest`.
    ///
    /// # Errors
    ///
    /// `ConstructError::NoBoundBuffer`, `ConstructError::BadBuffer`, plus the
    /// conditions of [`Buffer::copy_into`].
    pub fn copy_to_buffer(&mut self, dest: BufferId) -> Result<(), ConstructError> {
        let id = self.bound_id()?;
        self.copy_buffer_to_buffer(id, dest)
    }

    /// Copies the rows of `source` over the first rows of the bound buffer.
    ///
    /// # Errors
    ///
    /// `ConstructError::NoBoundBuffer`, `ConstructError::BadBuffer`, plus the
    /// conditions of [`Buffer::copy_into`].
    pub fn copy_from_buffer(&mut self, source: BufferId) -> Result<(), ConstructError> {
        let id = self.bound_id()?;
        self.copy_buffer_to_buffer(source, id)
    }

    /// # Errors
    ///
    /// `ConstructError::NoBoundBuffer` if nothing is bound.
    pub fn zero_out(&mut self) -> Result<(), ConstructError> {
        self.bound_buffer_mut()?.zero();
        Ok(())
    }

    /// # Errors
    ///
    /// `ConstructError::NoBoundBuffer` if nothing is bound.
    pub fn reverse(&mut self) -> Result<(), ConstructError> {
        self.bound_buffer_mut()?.reverse();
        Ok(())
    }

    /// # Errors
    ///
    /// `ConstructError::NoBoundBuffer`, plus the conditions of
    /// [`Buffer::sort_by_field`].
    pub fn sort_by_field(
        &mut self,
        ascending: bool,
        field: usize,
        field_type: FieldType,
    ) -> Result<(), ConstructError> {
        self.bound_buffer_mut()?
            .sort_by_field(ascending, field, field_type)
    }

    /// Owned copy of the bound buffer's row storage.
    ///
    /// # Errors
    ///
    /// `ConstructError::NoBoundBuffer` if nothing is bound.
    pub fn dump_binary(&self) -> Result<Vec<u8>, ConstructError> {
        Ok(self.bound_buffer()?.dump())
    }

    /// # Errors
    ///
    /// `ConstructError::NoBoundBuffer`, plus the conditions of [`Buffer::load`].
    pub fn load_binary(&mut self, bytes: &[u8]) -> Result<(), ConstructError> {
        self.bound_buffer_mut()?.load(bytes)
    }

    // ---- operations across two handles ----

    /// Exchanges row `source_index` of `source` with row `dest_index` of `dest`.
    ///
    /// # Errors
    ///
    /// `ConstructError::BadBuffer`, plus the conditions of [`Buffer::swap_with`].
    pub fn swap_buffer_at_buffer(
        &mut self,
        source: BufferId,
        source_index: usize,
        dest: BufferId,
        dest_index: usize,
    ) -> Result<(), ConstructError> {
        if source == dest {
            return self.buffer_mut(source)?.swap(source_index, dest_index);
        }
        let (source, dest) = self.pair_mut(source, dest)?;
        source.swap_with(source_index, dest, dest_index)
    }

    /// Overwrites row `dest_index` of `dest` with row `source_index` of `source`.
    ///
    /// # Errors
    ///
    /// `ConstructError::BadBuffer`, plus the conditions of [`Buffer::replace_from`].
    pub fn replace_buffer_at_buffer(
        &mut self,
        source: BufferId,
        source_index: usize,
        dest: BufferId,
        dest_index: usize,
    ) -> Result<(), ConstructError> {
        if source == dest {
            return self
                .buffer_mut(source)?
                .copy_row_within(source_index, dest_index);
        }
        let (source, dest) = self.pair_mut(source, dest)?;
        dest.replace_from(dest_index, source, source_index)
    }

    /// Copies the rows of `source` over the first rows of `dest`.
    ///
    /// # Errors
    ///
    /// `ConstructError::BadBuffer`, plus the conditions of [`Buffer::copy_into`].
    pub fn copy_buffer_to_buffer(
        &mut self,
        source: BufferId,
        dest: BufferId,
    ) -> Result<(), ConstructError> {
        if source == dest {
            return self.buffer(source).map(|_| ());
        }
        let (source, dest) = self.pair_mut(source, dest)?;
        source.copy_into(dest)
    }

    /// Appends every row of `source` to `dest`.
    ///
    /// # Errors
    ///
    /// `ConstructError::BadBuffer`, plus the conditions of [`Buffer::append`].
    pub fn append_buffer_at(&mut self, source: BufferId, dest: BufferId) -> Result<(), ConstructError> {
        if source == dest {
            let copy = self.buffer(source)?.clone();
            return self.buffer_mut(dest)?.append(&copy);
        }
        let (source, dest) = self.pair_mut(source, dest)?;
        dest.append(source)
    }

    /// Appends row `index` of `source` to `dest`.
    ///
    /// # Errors
    ///
    /// `ConstructError::BadBuffer`, plus the conditions of [`Buffer::append_row`].
    pub fn append_buffer_element_at(
        &mut self,
        source: BufferId,
        index: usize,
        dest: BufferId,
    ) -> Result<(), ConstructError> {
        if source == dest {
            let copy = self.buffer(source)?.clone();
            return self.buffer_mut(dest)?.append_row(&copy, index);
        }
        let (source, dest) = self.pair_mut(source, dest)?;
        dest.append_row(source, index)
    }
}

macro_rules! bound_accessors {
    ($($ty:ty => $get:ident, $set:ident;)*) => {
        impl Context {
            $(
                #[doc = concat!("Reads a `", stringify!($ty), "` field of the bound row.")]
                ///
                /// # Errors
                ///
                /// Same conditions as [`Context::get`].
                pub fn $get(&self, field: usize) -> Result<$ty, ConstructError> {
                    self.get::<$ty>(field)
                }

                #[doc = concat!("Writes a `", stringify!($ty), "` field of the bound row.")]
                ///
                /// # Errors
                ///
                /// Same conditions as [`Context::get`].
                pub fn $set(&mut self, field: usize, value: $ty) -> Result<(), ConstructError> {
                    self.set::<$ty>(field, value)
                }
            )*
        }
    };
}

bound_accessors! {
    u32 => get_u32, set_u32;
    i32 => get_i32, set_i32;
    f32 => get_f32, set_f32;
    i8 => get_char, set_char;
    u8 => get_uchar, set_uchar;
    usize => get_pointer, set_pointer;
}
