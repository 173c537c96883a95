//! A read/write cursor over a growable byte buffer, with a compact binary encoding for scalars,
//! strings, byte blobs and collections.
//!
//! * Fixed-size values (`bool`, 8 to 64 bit integers, `f32`, `f64`) are stored using their
//!   in-memory representation. An endian-aware cursor stores integers in big-endian byte order.
//! * Strings and byte blobs (`Vec<u8>`) are stored as a `u64` byte count followed by the bytes.
//! * Sequences, sets and maps are stored as a `u64` element count followed by the elements, each
//!   encoded the same way, so they nest freely.
//!
//! The encoding carries no type tags, versions or checksums. The reader must decode exactly the
//! types the writer encoded, with the same endian setting.
//!
//! ```
//! use binary_cursor::BinaryCursor;
//! use core::cell::RefCell;
//! use std::collections::BTreeMap;
//!
//! let memory = RefCell::new(Vec::new());
//! let mut cursor = BinaryCursor::new(&memory).endian_aware(true);
//!
//! let mut src = BTreeMap::new();
//! src.insert(String::from("odd"), vec![1i32, 3, 5]);
//! cursor.write(&src).write(&0x1337u16);
//!
//! cursor.reset();
//! let mut dst = BTreeMap::<String, Vec<i32>>::new();
//! let mut tail = 0u16;
//! cursor.read(&mut dst).read(&mut tail);
//! assert_eq!(dst, src);
//! assert_eq!(tail, 0x1337);
//! assert!(cursor.is_eof());
//! ```
//!
//! Decoding is forgiving: running out of data never reads past the end of the buffer, and never
//! panics. [`BinaryCursor::try_read`] reports whether a value was complete.

#![cfg_attr(not(any(feature = "std", test)), no_std)]
#![forbid(unsafe_code)]
#![forbid(unused_must_use)]
#![warn(missing_docs)]

extern crate alloc;

mod codec;
mod collections;
mod cursor;
mod growth;
mod hexdump;
mod version;


pub use codec::{Decode, Encode, ReadError};
pub use cursor::BinaryCursor;
pub use growth::GrowthPolicy;
pub use hexdump::{canonical_dump, from_hex, from_hex_lossy, to_hex, CanonicalDump};
pub use version::{current_version, make_version, version_string, Version, VERSION};
