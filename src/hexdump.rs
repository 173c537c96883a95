//! Human-readable renderings of byte buffers: hex strings and canonical dumps.
//!
//! These work on plain byte slices and are independent of [`BinaryCursor`](crate::BinaryCursor);
//! pass `&cursor.memory()` to render a cursor's buffer.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt::{self, Write};

/// Converts bytes into a lowercase hex string, two digits per byte.
pub fn to_hex(bytes: &[u8]) -> String {
    hex::encode(bytes)
}

/// Converts a hex string into bytes, rejecting anything that is not well-formed.
pub fn from_hex(hex: &str) -> Result<Vec<u8>, hex::FromHexError> {
    hex::decode(hex)
}

/// Converts a hex string into bytes, never failing.
///
/// The string is processed in pairs of characters; a trailing odd character is ignored. Any
/// character that is not a hex digit counts as 0, e.g. `"feR2016X"` yields
/// `[0xfe, 0x02, 0x01, 0x60]`.
pub fn from_hex_lossy(hex: &str) -> Vec<u8> {
    fn nibble(c: u8) -> u8 {
        (c as char).to_digit(16).map_or(0, |d| d as u8)
    }

    hex.as_bytes()
        .chunks_exact(2)
        .map(|pair| (nibble(pair[0]) << 4) | nibble(pair[1]))
        .collect()
}

const BYTES_PER_LINE: usize = 16;
const BYTES_PER_WORD: usize = 8;

/// Renders bytes in canonical form, one line per 16 bytes:
///
/// ```text
/// 0x0000000000000000   54 68 65 20 71 75 69 63  6b 20 62 72 6f 77 6e 20   |The quic k brown |
/// 0x0000000000000010   66 6f 78 20 6a 75 6d 70  73 20 6f 76 65 72 20 74   |fox jump s over t|
/// 0x0000000000000020   68 65 20 6c 61 7a 79 20  64 6f 67                  |he lazy  dog     |
/// ```
///
/// Each line starts with `indent` and ends with a newline. Bytes outside of `0x20..=0x7f` are
/// shown as `.` in the ASCII column. An empty slice renders as an empty string.
pub fn canonical_dump(bytes: &[u8], indent: &str) -> String {
    let lines = bytes.len().div_ceil(BYTES_PER_LINE);
    let mut out = String::with_capacity(lines * (indent.len() + 92));
    // Writing into a String cannot fail.
    let _ = write!(out, "{}", CanonicalDump { bytes, indent });
    out
}

/// `Display` adapter for [`canonical_dump`].
#[derive(Copy, Clone, Debug)]
pub struct CanonicalDump<'a> {
    /// The bytes to render.
    pub bytes: &'a [u8],
    /// Prepended to every line.
    pub indent: &'a str,
}

impl<'a> CanonicalDump<'a> {
    /// Constructor
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, indent: "" }
    }

    /// Sets the indent of each line.
    pub fn with_indent(mut self, indent: &'a str) -> Self {
        self.indent = indent;
        self
    }
}

impl fmt::Display for CanonicalDump<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, line) in self.bytes.chunks(BYTES_PER_LINE).enumerate() {
            write!(f, "{}0x{:016x}   ", self.indent, index * BYTES_PER_LINE)?;

            for i in 0..BYTES_PER_LINE {
                if i == BYTES_PER_WORD {
                    f.write_str(" ")?;
                }
                match line.get(i) {
                    Some(b) => write!(f, "{b:02x}")?,
                    None => f.write_str("  ")?,
                }
                if i + 1 < BYTES_PER_LINE {
                    f.write_str(" ")?;
                }
            }

            f.write_str("   |")?;
            for i in 0..BYTES_PER_LINE {
                if i == BYTES_PER_WORD {
                    f.write_str(" ")?;
                }
                let c = match line.get(i) {
                    Some(&b) if (0x20..0x80).contains(&b) => b as char,
                    Some(_) => '.',
                    None => ' ',
                };
                f.write_char(c)?;
            }
            f.write_str("|\n")?;
        }
        Ok(())
    }
}
