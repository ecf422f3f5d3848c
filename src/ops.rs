//! Structural operations on buffers.
//!
//! Everything here works on whole rows and moves raw bytes; no field is
//! decoded except by [`Buffer::sort_by_field`]. Operations that change the
//! row count reallocate the storage.

use core::cmp::Ordering;

use crate::buffer::Buffer;
use crate::config::check;
use crate::error::ConstructError;
use crate::field_type::FieldType;

impl Buffer {
    fn swap_rows(&mut self, a: usize, b: usize) {
        if a == b {
            return;
        }
        let stride = self.stride();
        let (lo, hi) = if a < b { (a, b) } else { (b, a) };
        let (head, tail) = self.data.split_at_mut(hi * stride);
        head[lo * stride..(lo + 1) * stride].swap_with_slice(&mut tail[..stride]);
    }

    fn check_single_row_source(&self, source: &Buffer) -> Result<(), ConstructError> {
        self.check_compatible(source)?;
        check!(
            !source.is_empty(),
            ConstructError::InvalidData {
                expected: self.stride(),
                provided: source.byte_len(),
            }
        );
        Ok(())
    }

    /// Exchanges the contents of rows `a` and `b`.
    ///
    /// # Errors
    ///
    /// Returns `ConstructError::OutOfBoundsIndex` if either index is past the
    /// last row.
    pub fn swap(&mut self, a: usize, b: usize) -> Result<(), ConstructError> {
        self.check_index(a)?;
        self.check_index(b)?;
        self.swap_rows(a, b);
        Ok(())
    }

    /// Exchanges row `index` of `self` with row `other_index` of `other`.
    ///
    /// # Errors
    ///
    /// - `ConstructError::OutOfBoundsIndex` if either index is out of range
    /// - `ConstructError::UnequalElementSize` if the strides differ
    /// - `ConstructError::SmallDestBuffer` if `other` has fewer rows than `self`
    pub fn swap_with(
        &mut self,
        index: usize,
        other: &mut Buffer,
        other_index: usize,
    ) -> Result<(), ConstructError> {
        self.check_index(index)?;
        other.check_index(other_index)?;
        self.check_compatible(other)?;
        check!(
            other.len() >= self.len(),
            ConstructError::SmallDestBuffer {
                required: self.len(),
                provided: other.len(),
            }
        );
        let ours = self.row_range(index);
        let theirs = other.row_range(other_index);
        self.data[ours].swap_with_slice(&mut other.data[theirs]);
        Ok(())
    }

    /// Overwrites row `index` with the first row of `element`.
    ///
    /// `element` is typically made by [`Buffer::single_row_template`].
    ///
    /// # Errors
    ///
    /// - `ConstructError::OutOfBoundsIndex` if `index` is out of range
    /// - `ConstructError::UnequalElementSize` if the strides differ
    /// - `ConstructError::InvalidData` if `element` has no rows
    pub fn replace(&mut self, index: usize, element: &Buffer) -> Result<(), ConstructError> {
        self.check_index(index)?;
        self.check_single_row_source(element)?;
        let target = self.row_range(index);
        let stride = self.stride();
        self.data[target].copy_from_slice(&element.data[..stride]);
        Ok(())
    }

    /// Overwrites row `index` with row `source_index` of `source`.
    ///
    /// # Errors
    ///
    /// - `ConstructError::OutOfBoundsIndex` if either index is out of range
    /// - `ConstructError::UnequalElementSize` if the strides differ
    /// - `ConstructError::SmallDestBuffer` if `self` has fewer rows than `source`
    pub fn replace_from(
        &mut self,
        index: usize,
        source: &Buffer,
        source_index: usize,
    ) -> Result<(), ConstructError> {
        self.check_index(index)?;
        source.check_index(source_index)?;
        self.check_compatible(source)?;
        check!(
            self.len() >= source.len(),
            ConstructError::SmallDestBuffer {
                required: source.len(),
                provided: self.len(),
            }
        );
        let target = self.row_range(index);
        self.data[target].copy_from_slice(&source.data[source.row_range(source_index)]);
        Ok(())
    }

    /// Copies row `source_index` over row `index` inside the same buffer.
    ///
    /// # Errors
    ///
    /// Returns `ConstructError::OutOfBoundsIndex` if either index is out of range.
    pub fn copy_row_within(&mut self, source_index: usize, index: usize) -> Result<(), ConstructError> {
        self.check_index(source_index)?;
        self.check_index(index)?;
        let source = self.row_range(source_index);
        let start = self.row_offset(index);
        self.data.copy_within(source, start);
        Ok(())
    }

    /// Inserts the first row of `element` before row `index`.
    ///
    /// `index == len()` appends. A cursor at or after `index` moves with its row.
    ///
    /// # Errors
    ///
    /// - `ConstructError::OutOfBoundsIndex` if `index > len()`
    /// - `ConstructError::UnequalElementSize` if the strides differ
    /// - `ConstructError::InvalidData` if `element` has no rows
    pub fn insert(&mut self, index: usize, element: &Buffer) -> Result<(), ConstructError> {
        check!(
            index <= self.len(),
            ConstructError::OutOfBoundsIndex {
                index,
                length: self.len(),
            }
        );
        self.check_single_row_source(element)?;
        log::trace!("inserting row {} into buffer of {} rows", index, self.len());

        let at = self.row_offset(index);
        let stride = self.stride();
        self.data.extend_from_slice(&element.data[..stride]);
        self.data[at..].rotate_right(stride);
        self.set_rows(self.len() + 1);
        if let Some(c) = self.cursor.filter(|&c| c >= index) {
            self.cursor = Some(c + 1);
        }
        Ok(())
    }

    /// Removes row `index`, shifting the following rows down by one.
    ///
    /// A cursor at or after `index` moves back by one so that an iterate loop
    /// which removes its current row visits the row that took its place.
    ///
    /// # Errors
    ///
    /// Returns `ConstructError::OutOfBoundsIndex` if `index` is out of range.
    pub fn remove(&mut self, index: usize) -> Result<(), ConstructError> {
        self.check_index(index)?;
        log::trace!("removing row {} from buffer of {} rows", index, self.len());

        let range = self.row_range(index);
        self.data.drain(range);
        self.data.shrink_to_fit();
        self.set_rows(self.len() - 1);
        if let Some(c) = self.cursor.filter(|&c| c >= index) {
            self.cursor = c.checked_sub(1);
        }
        Ok(())
    }

    /// Appends every row of `source`.
    ///
    /// # Errors
    ///
    /// Returns `ConstructError::UnequalElementSize` if the strides differ.
    pub fn append(&mut self, source: &Buffer) -> Result<(), ConstructError> {
        self.check_compatible(source)?;
        log::trace!(
            "appending {} rows to buffer of {} rows",
            source.len(),
            self.len()
        );
        self.data.extend_from_slice(&source.data);
        self.set_rows(self.len() + source.len());
        Ok(())
    }

    /// Appends row `source_index` of `source`.
    ///
    /// # Errors
    ///
    /// `ConstructError::UnequalElementSize` or `ConstructError::OutOfBoundsIndex`.
    pub fn append_row(&mut self, source: &Buffer, source_index: usize) -> Result<(), ConstructError> {
        self.check_compatible(source)?;
        source.check_index(source_index)?;
        log::trace!("appending one row to buffer of {} rows", self.len());
        self.data
            .extend_from_slice(&source.data[source.row_range(source_index)]);
        self.set_rows(self.len() + 1);
        Ok(())
    }

    /// Returns a new buffer holding rows `start..end`.
    ///
    /// The cursor of the new buffer is unbound.
    ///
    /// # Errors
    ///
    /// - `ConstructError::InvalidIndex` if `start > end`
    /// - `ConstructError::OutOfBoundsIndex` if `end >= len()`
    pub fn copy_range(&self, start: usize, end: usize) -> Result<Buffer, ConstructError> {
        check!(start <= end, ConstructError::InvalidIndex { start, end });
        self.check_index(end)?;

        let bytes = &self.data[self.row_offset(start)..self.row_offset(end)];
        let mut copy = Buffer::allocate(end - start, self.schema().clone(), bytes.len());
        copy.data.copy_from_slice(bytes);
        Ok(copy)
    }

    /// Copies the rows of `self` over the first rows of `dest`.
    ///
    /// Exactly `self.len()` rows are copied; rows of `dest` past that are left
    /// as they were.
    ///
    /// # Errors
    ///
    /// - `ConstructError::UnequalElementSize` if the strides differ
    /// - `ConstructError::SmallDestBuffer` if `dest` has fewer rows than `self`
    pub fn copy_into(&self, dest: &mut Buffer) -> Result<(), ConstructError> {
        self.check_compatible(dest)?;
        check!(
            dest.len() >= self.len(),
            ConstructError::SmallDestBuffer {
                required: self.len(),
                provided: dest.len(),
            }
        );
        let bytes = self.len().min(dest.len()) * self.stride();
        dest.data[..bytes].copy_from_slice(&self.data[..bytes]);
        Ok(())
    }

    /// Copies the rows of `source` over the first rows of `self`.
    ///
    /// # Errors
    ///
    /// Same conditions as [`Buffer::copy_into`] with the roles swapped.
    pub fn copy_from(&mut self, source: &Buffer) -> Result<(), ConstructError> {
        source.copy_into(self)
    }

    /// Reverses the order of the rows.
    pub fn reverse(&mut self) {
        let rows = self.len();
        for i in 0..rows / 2 {
            self.swap_rows(i, rows - 1 - i);
        }
    }

    /// Sorts the rows by one field.
    ///
    /// This is a bubble sort that stops after the first pass without swaps:
    /// already-sorted input costs a single pass. Rows whose keys compare equal
    /// (or unordered, for NaN floats) are never swapped, so the sort is stable.
    /// Pointer fields are ordered by their raw word value.
    ///
    /// # Errors
    ///
    /// `ConstructError::InvalidField` if the field does not exist and
    /// `ConstructError::InvalidType` if it is not declared as `field_type`.
    pub fn sort_by_field(
        &mut self,
        ascending: bool,
        field: usize,
        field_type: FieldType,
    ) -> Result<(), ConstructError> {
        let (start, end) = self.schema().typed_field_range(field, field_type)?;
        let rows = self.len();

        for pass in 0..rows.saturating_sub(1) {
            let mut swapped = false;
            for i in 0..rows - pass - 1 {
                let out_of_order = {
                    let a = self.row_offset(i);
                    let b = self.row_offset(i + 1);
                    let ordering =
                        field_type.compare(&self.data[a + start..a + end], &self.data[b + start..b + end]);
                    match ordering {
                        Some(Ordering::Greater) => ascending,
                        Some(Ordering::Less) => !ascending,
                        _ => false,
                    }
                };
                if out_of_order {
                    self.swap_rows(i, i + 1);
                    swapped = true;
                }
            }
            if !swapped {
                break;
            }
        }
        Ok(())
    }

    /// Sets every byte of the row storage to zero.
    pub fn zero(&mut self) {
        self.data.fill(0);
    }
}

#[cfg(test)]
mod tests {
    use crate::{Buffer, FieldType};

    fn keys(buffer: &Buffer) -> alloc::vec::Vec<u32> {
        buffer.rows().map(|row| row.get::<u32>(0).unwrap()).collect()
    }

    fn filled(values: &[u32]) -> Buffer {
        let mut buffer = Buffer::with_types(values.len(), &[FieldType::UInt32]).unwrap();
        for (i, v) in values.iter().enumerate() {
            buffer.set(i, 0, *v).unwrap();
        }
        buffer
    }

    #[test]
    fn test_swap_rows_either_order() {
        let mut buffer = filled(&[1, 2, 3, 4]);
        buffer.swap(3, 0).unwrap();
        assert_eq!(keys(&buffer), [4, 2, 3, 1]);
        buffer.swap(1, 1).unwrap();
        assert_eq!(keys(&buffer), [4, 2, 3, 1]);
    }

    #[test]
    fn test_reverse_odd_and_even() {
        let mut buffer = filled(&[1, 2, 3]);
        buffer.reverse();
        assert_eq!(keys(&buffer), [3, 2, 1]);

        let mut buffer = filled(&[1, 2, 3, 4]);
        buffer.reverse();
        assert_eq!(keys(&buffer), [4, 3, 2, 1]);
    }

    #[test]
    fn test_insert_then_remove_restores() {
        let mut buffer = filled(&[1, 2, 3]);
        let element = filled(&[9]);
        buffer.insert(1, &element).unwrap();
        assert_eq!(keys(&buffer), [1, 9, 2, 3]);
        buffer.insert(4, &element).unwrap();
        assert_eq!(keys(&buffer), [1, 9, 2, 3, 9]);
        buffer.remove(4).unwrap();
        buffer.remove(1).unwrap();
        assert_eq!(keys(&buffer), [1, 2, 3]);
    }

    #[test]
    fn test_remove_moves_cursor_back() {
        let mut buffer = filled(&[1, 2, 3]);
        buffer.seek(1).unwrap();
        buffer.remove(1).unwrap();
        assert_eq!(buffer.cursor(), Some(0));
        assert!(buffer.advance());
        assert_eq!(buffer.get::<u32>(buffer.cursor().unwrap(), 0), Ok(3));

        buffer.seek(0).unwrap();
        buffer.remove(0).unwrap();
        assert_eq!(buffer.cursor(), None);
    }

    #[test]
    fn test_sort_descending() {
        let mut buffer = filled(&[2, 9, 4, 9, 1]);
        buffer.sort_by_field(false, 0, FieldType::UInt32).unwrap();
        assert_eq!(keys(&buffer), [9, 9, 4, 2, 1]);
    }
}
