use core::cell::{Ref, RefCell};
use core::fmt;
use core::mem::size_of;

use alloc::vec::Vec;
use zerocopy::{FromBytes, Immutable, IntoBytes};

use crate::codec::{Decode, Encode, ReadError, Result};
use crate::growth::GrowthPolicy;

/// A read/write cursor over a growable byte buffer.
///
/// The cursor does not own the buffer. The caller keeps the bytes in a `RefCell<Vec<u8>>` and
/// the cursor borrows it for each operation, so the bytes can be inspected at any time while the
/// cursor is alive:
///
/// ```
/// use binary_cursor::BinaryCursor;
/// use core::cell::RefCell;
///
/// let blob = RefCell::new(Vec::new());
/// let mut cursor = BinaryCursor::new(&blob);
/// cursor.write("foo").write(&42u64);
///
/// // 8 (length prefix) + 3 ("foo") + 8 (u64)
/// assert_eq!(blob.borrow().len(), 19);
/// ```
///
/// A single position is shared by writes and reads. Writes store their value at the position
/// (overwriting existing bytes, growing the buffer when they run past its end) and advance it.
/// Reads decode from the position and advance it. No operation ever touches bytes outside of
/// `0..len`: reads past the end are clamped or ignored, and positioning past the end is clamped
/// or ignored.
///
/// When the cursor is endian-aware, integers wider than one byte are stored in big-endian
/// (network) byte order, including the length prefixes of strings, blobs and collections.
/// Otherwise they are stored in the host's byte order. `f32` and `f64` are always stored in
/// host byte order. Nothing in the encoded data records which mode was used; the reader must
/// use the same setting as the writer.
///
/// Cloning a cursor yields a new cursor over the same buffer, with its position reset to 0.
pub struct BinaryCursor<'a> {
    memory: &'a RefCell<Vec<u8>>,
    position: usize,
    endian_aware: bool,
    policy: GrowthPolicy,
}

impl<'a> BinaryCursor<'a> {
    /// Creates a cursor at position 0, using the default [`GrowthPolicy`].
    pub fn new(memory: &'a RefCell<Vec<u8>>) -> Self {
        Self::with_policy(memory, GrowthPolicy::default())
    }

    /// Creates a cursor at position 0, using the given [`GrowthPolicy`].
    pub fn with_policy(memory: &'a RefCell<Vec<u8>>, policy: GrowthPolicy) -> Self {
        Self {
            memory,
            position: 0,
            endian_aware: false,
            policy,
        }
    }

    /// Sets the endian awareness, builder style.
    pub fn endian_aware(mut self, endian_aware: bool) -> Self {
        self.endian_aware = endian_aware;
        self
    }

    /// Checks if this cursor converts integers to and from big-endian byte order.
    pub fn is_endian_aware(&self) -> bool {
        self.endian_aware
    }

    /// Turns big-endian conversion on or off. This only affects subsequent operations.
    pub fn set_endian_aware(&mut self, endian_aware: bool) {
        self.endian_aware = endian_aware;
    }

    /// The growth policy used when writes run past the end of the buffer.
    pub fn growth_policy(&self) -> GrowthPolicy {
        self.policy
    }

    /// The shared buffer this cursor works on.
    pub fn storage(&self) -> &'a RefCell<Vec<u8>> {
        self.memory
    }

    /// Borrows the buffer for inspection.
    ///
    /// The returned guard must be dropped before the next write through any cursor over the
    /// same buffer.
    pub fn memory(&self) -> Ref<'a, Vec<u8>> {
        self.memory.borrow()
    }

    /// Checks whether both cursors work on the same buffer.
    pub fn shares_storage_with(&self, other: &BinaryCursor<'_>) -> bool {
        core::ptr::eq(self.memory, other.memory)
    }

    /// The number of valid bytes in the buffer.
    pub fn len(&self) -> usize {
        self.memory.borrow().len()
    }

    /// Checks if the buffer holds no bytes at all.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The number of bytes reserved by the buffer.
    pub fn capacity(&self) -> usize {
        self.memory.borrow().capacity()
    }

    /// Gets the current read/write position.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Sets the read/write position.
    ///
    /// Does nothing if `position` is past the end of the buffer. Check [`Self::position`]
    /// afterwards if that matters.
    pub fn set_position(&mut self, position: usize) {
        if position <= self.len() {
            self.position = position;
        }
    }

    /// Moves the position back to the start of the buffer. No bytes are discarded.
    pub fn reset(&mut self) {
        self.set_position(0);
    }

    /// Advances the position by `bytes`, stopping at the end of the buffer.
    pub fn advance(&mut self, bytes: usize) {
        self.position = self.position.saturating_add(bytes).min(self.len());
    }

    /// Checks if there is nothing left to read.
    pub fn is_eof(&self) -> bool {
        self.position >= self.len()
    }

    /// The number of bytes that can be written at the position without growing the buffer.
    pub fn free(&self) -> usize {
        self.len().saturating_sub(self.position)
    }

    /// The number of bytes left to read at the position.
    pub fn remaining(&self) -> usize {
        self.len().saturating_sub(self.position)
    }

    /// Stores raw bytes at the position, growing the buffer if needed, and advances the
    /// position past them.
    pub fn add(&mut self, data: &[u8]) {
        self.grow(data.len());
        let storage = self.memory;
        let mut memory = storage.borrow_mut();
        let end = self.position + data.len();
        memory[self.position..end].copy_from_slice(data);
        self.position = end;
    }

    /// Copies `data.len()` bytes from the position into `data` and advances the position.
    ///
    /// If fewer bytes remain, neither `data` nor the position are modified.
    pub fn pick(&mut self, data: &mut [u8]) -> Result<()> {
        let storage = self.memory;
        let memory = storage.borrow();
        let src = self
            .position
            .checked_add(data.len())
            .and_then(|end| memory.get(self.position..end))
            .ok_or(ReadError::NeedsMoreData)?;
        data.copy_from_slice(src);
        self.position += data.len();
        Ok(())
    }

    /// Encodes `value` at the position. Returns the cursor, so that writes can be chained.
    pub fn write<T: Encode + ?Sized>(&mut self, value: &T) -> &mut Self {
        value.encode(self);
        self
    }

    /// Decodes into `value` from the position. Returns the cursor, so that reads can be chained.
    ///
    /// Running out of data is not reported: fixed-size values are left untouched, strings, blobs
    /// and collections receive whatever was present. Use [`Self::try_read`] to find out.
    pub fn read<T: Decode>(&mut self, value: &mut T) -> &mut Self {
        let _ = value.decode_into(self);
        self
    }

    /// Decodes into `value` from the position and reports whether the value was complete.
    ///
    /// On error, `value` has been updated the same way [`Self::read`] would have updated it.
    pub fn try_read<T: Decode>(&mut self, value: &mut T) -> Result<()> {
        value.decode_into(self)
    }

    /// Decodes a new value from the position, starting from `T::default()`.
    pub fn read_value<T: Decode + Default>(&mut self) -> T {
        let mut value = T::default();
        self.read(&mut value);
        value
    }

    /// Stores the in-memory representation of `value`.
    pub(crate) fn add_value<T: IntoBytes + Immutable>(&mut self, value: &T) {
        self.add(value.as_bytes());
    }

    /// Reads a value from its in-memory representation, if enough bytes remain.
    pub(crate) fn pick_value<T: FromBytes>(&mut self) -> Option<T> {
        let storage = self.memory;
        let memory = storage.borrow();
        let end = self.position.checked_add(size_of::<T>())?;
        let value = T::read_from_bytes(memory.get(self.position..end)?).ok()?;
        self.position = end;
        Some(value)
    }

    /// Appends up to `len` bytes from the position to `out` and advances past them. Returns the
    /// number of bytes copied.
    pub(crate) fn pick_up_to(&mut self, len: usize, out: &mut Vec<u8>) -> usize {
        let storage = self.memory;
        let memory = storage.borrow();
        let start = self.position.min(memory.len());
        let end = start + len.min(memory.len() - start);
        out.extend_from_slice(&memory[start..end]);
        self.position = end;
        end - start
    }

    /// Makes sure `needed` bytes can be stored at the position.
    fn grow(&mut self, needed: usize) {
        let storage = self.memory;
        let mut memory = storage.borrow_mut();
        let required = self.position.saturating_add(needed);
        if required <= memory.len() {
            return;
        }

        let capacity = memory.capacity();
        let target = self.policy.target_capacity(capacity, required);
        if target > capacity {
            let len = memory.len();
            // The allocator may refuse the slack; the exact requirement is still honoured.
            if memory.try_reserve_exact(target - len).is_err() {
                memory.reserve_exact(required - len);
            }
            tracing::trace!(
                old_capacity = capacity,
                new_capacity = memory.capacity(),
                size = required,
                "grew buffer"
            );
        }
        memory.resize(required, 0);
    }
}

impl Clone for BinaryCursor<'_> {
    /// Creates a new cursor over the same buffer, positioned at 0.
    fn clone(&self) -> Self {
        Self {
            memory: self.memory,
            position: 0,
            endian_aware: self.endian_aware,
            policy: self.policy,
        }
    }
}

impl fmt::Debug for BinaryCursor<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("BinaryCursor");
        s.field("position", &self.position);
        match self.memory.try_borrow() {
            Ok(memory) => {
                s.field("len", &memory.len());
                s.field("capacity", &memory.capacity());
            }
            Err(_) => {
                s.field("len", &"<borrowed>");
            }
        }
        s.field("endian_aware", &self.endian_aware)
            .field("policy", &self.policy)
            .finish()
    }
}
