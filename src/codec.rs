//! The `Encode` / `Decode` traits and the codec for scalars, strings and byte blobs.
//!
//! Fixed-size values are stored using their in-memory representation. Integers wider than one
//! byte are converted to big-endian byte order first if the cursor is endian-aware; floats never
//! are. Strings and blobs are stored as a `u64` byte count followed by the bytes.

use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;
use zerocopy::byteorder::{BigEndian, I16, I32, I64, U16, U32, U64};

use crate::BinaryCursor;

pub type Result<T> = core::result::Result<T, ReadError>;

/// A value that can be written to a [`BinaryCursor`].
///
/// Writing never fails; the buffer grows as needed.
pub trait Encode {
    /// Writes `self` at the position of `cursor`.
    fn encode(&self, cursor: &mut BinaryCursor<'_>);

    /// Writes the elements of a sequence, without a length prefix.
    ///
    /// The result must be the same as encoding each element in turn. Types with a trivial
    /// encoding override this to copy the whole slice at once.
    #[doc(hidden)]
    fn encode_slice(items: &[Self], cursor: &mut BinaryCursor<'_>)
    where
        Self: Sized,
    {
        for item in items {
            item.encode(cursor);
        }
    }
}

/// A value that can be read from a [`BinaryCursor`].
///
/// Decoding writes into an existing value. If the data runs out, fixed-size values are left
/// unmodified and variable-size values receive as much as is present; either way
/// `Err(ReadError::NeedsMoreData)` is returned.
pub trait Decode {
    /// Reads into `self` from the position of `cursor`.
    fn decode_into(&mut self, cursor: &mut BinaryCursor<'_>) -> Result<()>;

    /// Reads up to `count` elements and appends them to `out`.
    ///
    /// Stops at the first element that cannot be decoded completely. Byte blobs replace the
    /// contents of `out` instead.
    #[doc(hidden)]
    fn decode_vec(count: usize, cursor: &mut BinaryCursor<'_>, out: &mut Vec<Self>) -> Result<()>
    where
        Self: Sized + Default,
    {
        out.reserve(count.min(cursor.remaining()));
        crate::collections::decode_each(count, cursor, |item| out.push(item))
    }
}

impl BinaryCursor<'_> {
    /// Writes the length prefix of a string, blob or collection.
    pub(crate) fn write_len(&mut self, len: usize) {
        (len as u64).encode(self);
    }

    /// Reads the length prefix of a string, blob or collection.
    ///
    /// A length that does not fit in `usize` is saturated; it is clamped by the caller anyway.
    pub(crate) fn read_len(&mut self) -> Result<usize> {
        let mut len = 0u64;
        len.decode_into(self)?;
        Ok(usize::try_from(len).unwrap_or(usize::MAX))
    }

    /// Appends up to `claimed` bytes to `out`, clamped to the remaining data.
    pub(crate) fn take_bytes(&mut self, claimed: usize, out: &mut Vec<u8>) -> Result<()> {
        let copied = self.pick_up_to(claimed, out);
        if copied < claimed {
            tracing::debug!(
                claimed,
                available = copied,
                "length prefix exceeds remaining data"
            );
            return Err(ReadError::NeedsMoreData);
        }
        Ok(())
    }

    /// Replaces the contents of `out` with a length-prefixed byte blob.
    pub(crate) fn read_blob(&mut self, out: &mut Vec<u8>) -> Result<()> {
        out.clear();
        let claimed = self.read_len()?;
        self.take_bytes(claimed, out)
    }
}

impl Encode for u8 {
    fn encode(&self, cursor: &mut BinaryCursor<'_>) {
        cursor.add_value(self);
    }

    fn encode_slice(items: &[Self], cursor: &mut BinaryCursor<'_>) {
        cursor.add(items);
    }
}

impl Decode for u8 {
    fn decode_into(&mut self, cursor: &mut BinaryCursor<'_>) -> Result<()> {
        *self = cursor.pick_value().ok_or(ReadError::NeedsMoreData)?;
        Ok(())
    }

    fn decode_vec(count: usize, cursor: &mut BinaryCursor<'_>, out: &mut Vec<Self>) -> Result<()> {
        out.clear();
        cursor.take_bytes(count, out)
    }
}

// Single bytes and floats: always host byte order.
macro_rules! native_scalar {
    ($($ty:ty),*) => {
        $(
            impl Encode for $ty {
                fn encode(&self, cursor: &mut BinaryCursor<'_>) {
                    cursor.add_value(self);
                }
            }

            impl Decode for $ty {
                fn decode_into(&mut self, cursor: &mut BinaryCursor<'_>) -> Result<()> {
                    *self = cursor.pick_value().ok_or(ReadError::NeedsMoreData)?;
                    Ok(())
                }
            }
        )*
    };
}

native_scalar!(i8, f32, f64);

macro_rules! endian_scalar {
    ($($ty:ty => $wire:ident),*) => {
        $(
            impl Encode for $ty {
                fn encode(&self, cursor: &mut BinaryCursor<'_>) {
                    if cursor.is_endian_aware() {
                        cursor.add_value(&$wire::<BigEndian>::new(*self));
                    } else {
                        cursor.add_value(self);
                    }
                }
            }

            impl Decode for $ty {
                fn decode_into(&mut self, cursor: &mut BinaryCursor<'_>) -> Result<()> {
                    let value = if cursor.is_endian_aware() {
                        cursor.pick_value::<$wire<BigEndian>>().map(|v| v.get())
                    } else {
                        cursor.pick_value::<$ty>()
                    };
                    *self = value.ok_or(ReadError::NeedsMoreData)?;
                    Ok(())
                }
            }
        )*
    };
}

endian_scalar!(
    u16 => U16,
    i16 => I16,
    u32 => U32,
    i32 => I32,
    u64 => U64,
    i64 => I64
);

/// True is encoded as 1, false as 0. Any non-zero byte decodes as true.
impl Encode for bool {
    fn encode(&self, cursor: &mut BinaryCursor<'_>) {
        cursor.add_value(&u8::from(*self));
    }
}

impl Decode for bool {
    fn decode_into(&mut self, cursor: &mut BinaryCursor<'_>) -> Result<()> {
        *self = cursor.pick_value::<u8>().ok_or(ReadError::NeedsMoreData)? != 0;
        Ok(())
    }
}

impl Encode for str {
    fn encode(&self, cursor: &mut BinaryCursor<'_>) {
        cursor.write_len(self.len());
        cursor.add(self.as_bytes());
    }
}

impl Encode for String {
    fn encode(&self, cursor: &mut BinaryCursor<'_>) {
        self.as_str().encode(cursor);
    }
}

/// The bytes are copied as they are. Bytes that are not well-formed UTF-8 are replaced with the
/// Unicode replacement character and `Err(ReadError::InvalidUtf8)` is returned, unless the data
/// was also truncated.
impl Decode for String {
    fn decode_into(&mut self, cursor: &mut BinaryCursor<'_>) -> Result<()> {
        let mut bytes = core::mem::take(self).into_bytes();
        let status = cursor.read_blob(&mut bytes);
        match String::from_utf8(bytes) {
            Ok(s) => {
                *self = s;
                status
            }
            Err(e) => {
                *self = String::from_utf8_lossy(e.as_bytes()).into_owned();
                status.and(Err(ReadError::InvalidUtf8))
            }
        }
    }
}

impl<T: Encode + ?Sized> Encode for &T {
    fn encode(&self, cursor: &mut BinaryCursor<'_>) {
        (**self).encode(cursor);
    }
}

impl<T: Encode + ?Sized> Encode for Box<T> {
    fn encode(&self, cursor: &mut BinaryCursor<'_>) {
        (**self).encode(cursor);
    }
}

impl<T: Decode> Decode for Box<T> {
    fn decode_into(&mut self, cursor: &mut BinaryCursor<'_>) -> Result<()> {
        (**self).decode_into(cursor)
    }
}

#[cfg(feature = "bstr")]
impl Encode for bstr::BStr {
    fn encode(&self, cursor: &mut BinaryCursor<'_>) {
        cursor.write_len(self.len());
        cursor.add(self);
    }
}

#[cfg(feature = "bstr")]
impl Encode for bstr::BString {
    fn encode(&self, cursor: &mut BinaryCursor<'_>) {
        bstr::BStr::new(self.as_slice()).encode(cursor);
    }
}

/// Same framing as `String`, but the bytes are kept exactly as they are.
#[cfg(feature = "bstr")]
impl Decode for bstr::BString {
    fn decode_into(&mut self, cursor: &mut BinaryCursor<'_>) -> Result<()> {
        cursor.read_blob(&mut **self)
    }
}

/// Error type for [`Decode`] and [`BinaryCursor::try_read`].
///
/// Decoding never reads outside of the buffer, and the destination is updated even when an
/// error is reported, so callers that only need best-effort decoding may ignore these.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum ReadError {
    /// The data ended before the value was complete, or a length prefix claimed more bytes or
    /// elements than were present.
    NeedsMoreData,

    /// A string contained bytes that are not well-formed UTF-8. They were replaced with the
    /// Unicode replacement character.
    InvalidUtf8,
}

impl core::error::Error for ReadError {}

impl core::fmt::Display for ReadError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::NeedsMoreData => f.write_str("The data ended before the value was complete"),
            Self::InvalidUtf8 => f.write_str("The string is not well-formed UTF-8"),
        }
    }
}
