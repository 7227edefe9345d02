//! Timecoin record encoding
//!
//! This library contains the binary format Timecoin uses to persist block
//! headers: little-endian fixed-width integers, raw 32 byte hashes, a compact
//! varint used for length prefixes, and tagged options.
//!
//! | Value          | Encoding                                            |
//! |----------------|-----------------------------------------------------|
//! | `u32/u64/i64`  | 4/8/8 bytes, little-endian                          |
//! | `u128`         | 16 bytes, little-endian                             |
//! | `[u8; 32]`     | 32 raw bytes                                        |
//! | `Vec<u8>`      | varint length, then the bytes                       |
//! | `String`       | varint length, then UTF-8 bytes                     |
//! | `Option<T>`    | `0x00`, or `0x01` followed by `T`                   |
//! | `bool`         | `0x00` or `0x01`                                    |
//!
//! ```rust
//! use timecoin_encoding::{from_bytes, to_bytes};
//!
//! let bytes = to_bytes(&Some(String::from("node-A")));
//! assert_eq!(bytes, b"\x01\x06node-A");
//!
//! let (value, consumed) = from_bytes::<Option<String>>(&bytes).unwrap();
//! assert_eq!(value.as_deref(), Some("node-A"));
//! assert_eq!(consumed, bytes.len());
//! ```

#[cfg(test)]
use hex as _;

pub mod error;
mod io;
pub mod primitive;
mod value;
mod varint;

pub use error::{Error, Result};
pub use value::{read_bytes, read_string, write_bytes, write_string, WireValue};
pub use varint::{read_varint, varint_len, write_varint};

/// Decode a `T` from the front of `bytes`.
///
/// Returns the value and the amount of bytes it occupied, bytes after
/// the value are left untouched.
pub fn from_bytes<T: WireValue>(bytes: &[u8]) -> Result<(T, usize)> {
    let mut r = bytes;
    let value = T::read(&mut r)?;
    Ok((value, bytes.len() - r.len()))
}

/// Decode a `T` that must occupy all of `bytes`.
///
/// # Errors
/// Returns [`Error::TrailingBytes`] if anything is left after the value.
pub fn from_bytes_exact<T: WireValue>(bytes: &[u8]) -> Result<T> {
    let (value, consumed) = from_bytes(bytes)?;
    match bytes.len() - consumed {
        0 => Ok(value),
        trailing => Err(Error::TrailingBytes(trailing)),
    }
}

/// Encode `value` into a new buffer.
pub fn to_bytes<T: WireValue>(value: &T) -> Vec<u8> {
    let mut buf = Vec::with_capacity(value.encoded_len());
    value.write(&mut buf);
    buf
}
