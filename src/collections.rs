//! Codec for sequences, sets, maps and tuples.
//!
//! A collection is stored as a `u64` element count followed by each element, encoded with its own
//! [`Encode`] implementation. Maps store each entry as a `(key, value)` pair. Nothing in the
//! encoded data describes the element type, so the reader must decode exactly the types the
//! writer encoded.
//!
//! Decoding a sequence appends to it, and decoding a set or map inserts into it; existing
//! contents are kept. Byte blobs (`Vec<u8>`) are the exception and replace their contents.
//! Decoding stops at the end of the data, so a count that claims more elements than are present
//! yields only the elements that could be decoded completely.

use alloc::collections::{BTreeMap, BTreeSet, LinkedList, VecDeque};
use alloc::vec::Vec;

#[cfg(feature = "std")]
use std::collections::{HashMap, HashSet};
#[cfg(feature = "std")]
use std::hash::{BuildHasher, Hash};

use crate::codec::{Decode, Encode, ReadError, Result};
use crate::BinaryCursor;

/// Decodes up to `count` elements, passing each completely decoded one to `insert`.
pub(crate) fn decode_each<T: Decode + Default>(
    count: usize,
    cursor: &mut BinaryCursor<'_>,
    mut insert: impl FnMut(T),
) -> Result<()> {
    for decoded in 0..count {
        if cursor.is_eof() {
            tracing::debug!(claimed = count, decoded, "element count exceeds remaining data");
            return Err(ReadError::NeedsMoreData);
        }
        let mut item = T::default();
        item.decode_into(cursor)?;
        insert(item);
    }
    Ok(())
}

impl<T: Encode> Encode for [T] {
    fn encode(&self, cursor: &mut BinaryCursor<'_>) {
        cursor.write_len(self.len());
        T::encode_slice(self, cursor);
    }
}

impl<T: Encode> Encode for Vec<T> {
    fn encode(&self, cursor: &mut BinaryCursor<'_>) {
        self.as_slice().encode(cursor);
    }
}

/// `Vec<u8>` is the byte blob: a byte count followed by the raw bytes.
impl<T: Decode + Default> Decode for Vec<T> {
    fn decode_into(&mut self, cursor: &mut BinaryCursor<'_>) -> Result<()> {
        match cursor.read_len() {
            Ok(count) => T::decode_vec(count, cursor, self),
            // A blob without its prefix still ends up empty.
            Err(err) => T::decode_vec(0, cursor, self).and(Err(err)),
        }
    }
}

impl<T: Encode> Encode for VecDeque<T> {
    fn encode(&self, cursor: &mut BinaryCursor<'_>) {
        cursor.write_len(self.len());
        let (front, back) = self.as_slices();
        T::encode_slice(front, cursor);
        T::encode_slice(back, cursor);
    }
}

impl<T: Decode + Default> Decode for VecDeque<T> {
    fn decode_into(&mut self, cursor: &mut BinaryCursor<'_>) -> Result<()> {
        let count = cursor.read_len()?;
        self.reserve(count.min(cursor.remaining()));
        decode_each(count, cursor, |item| self.push_back(item))
    }
}

impl<T: Encode> Encode for LinkedList<T> {
    fn encode(&self, cursor: &mut BinaryCursor<'_>) {
        cursor.write_len(self.len());
        for item in self {
            item.encode(cursor);
        }
    }
}

impl<T: Decode + Default> Decode for LinkedList<T> {
    fn decode_into(&mut self, cursor: &mut BinaryCursor<'_>) -> Result<()> {
        let count = cursor.read_len()?;
        decode_each(count, cursor, |item| self.push_back(item))
    }
}

impl<T: Encode> Encode for BTreeSet<T> {
    fn encode(&self, cursor: &mut BinaryCursor<'_>) {
        cursor.write_len(self.len());
        for item in self {
            item.encode(cursor);
        }
    }
}

impl<T: Decode + Default + Ord> Decode for BTreeSet<T> {
    fn decode_into(&mut self, cursor: &mut BinaryCursor<'_>) -> Result<()> {
        let count = cursor.read_len()?;
        decode_each(count, cursor, |item| {
            self.insert(item);
        })
    }
}

impl<K: Encode, V: Encode> Encode for BTreeMap<K, V> {
    fn encode(&self, cursor: &mut BinaryCursor<'_>) {
        cursor.write_len(self.len());
        for (key, value) in self {
            key.encode(cursor);
            value.encode(cursor);
        }
    }
}

/// Later duplicates of a key replace earlier ones.
impl<K, V> Decode for BTreeMap<K, V>
where
    K: Decode + Default + Ord,
    V: Decode + Default,
{
    fn decode_into(&mut self, cursor: &mut BinaryCursor<'_>) -> Result<()> {
        let count = cursor.read_len()?;
        decode_each(count, cursor, |(key, value): (K, V)| {
            self.insert(key, value);
        })
    }
}

#[cfg(feature = "std")]
impl<T: Encode, S> Encode for HashSet<T, S> {
    fn encode(&self, cursor: &mut BinaryCursor<'_>) {
        cursor.write_len(self.len());
        for item in self {
            item.encode(cursor);
        }
    }
}

#[cfg(feature = "std")]
impl<T, S> Decode for HashSet<T, S>
where
    T: Decode + Default + Eq + Hash,
    S: BuildHasher,
{
    fn decode_into(&mut self, cursor: &mut BinaryCursor<'_>) -> Result<()> {
        let count = cursor.read_len()?;
        self.reserve(count.min(cursor.remaining()));
        decode_each(count, cursor, |item| {
            self.insert(item);
        })
    }
}

#[cfg(feature = "std")]
impl<K: Encode, V: Encode, S> Encode for HashMap<K, V, S> {
    fn encode(&self, cursor: &mut BinaryCursor<'_>) {
        cursor.write_len(self.len());
        for (key, value) in self {
            key.encode(cursor);
            value.encode(cursor);
        }
    }
}

/// Later duplicates of a key replace earlier ones.
#[cfg(feature = "std")]
impl<K, V, S> Decode for HashMap<K, V, S>
where
    K: Decode + Default + Eq + Hash,
    V: Decode + Default,
    S: BuildHasher,
{
    fn decode_into(&mut self, cursor: &mut BinaryCursor<'_>) -> Result<()> {
        let count = cursor.read_len()?;
        self.reserve(count.min(cursor.remaining()));
        decode_each(count, cursor, |(key, value): (K, V)| {
            self.insert(key, value);
        })
    }
}

// Tuples are stored as their fields in order, without a prefix.
macro_rules! tuple_codec {
    ($($name:ident $field:ident),+) => {
        impl<$($name: Encode),+> Encode for ($($name,)+) {
            fn encode(&self, cursor: &mut BinaryCursor<'_>) {
                let ($($field,)+) = self;
                $($field.encode(cursor);)+
            }
        }

        impl<$($name: Decode),+> Decode for ($($name,)+) {
            fn decode_into(&mut self, cursor: &mut BinaryCursor<'_>) -> Result<()> {
                let ($($field,)+) = self;
                $($field.decode_into(cursor)?;)+
                Ok(())
            }
        }
    };
}

tuple_codec!(A a, B b);
tuple_codec!(A a, B b, C c);
tuple_codec!(A a, B b, C c, D d);
