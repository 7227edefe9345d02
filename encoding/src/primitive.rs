//! Fixed-width primitives.
//!
//! All integers are little-endian, hashes are raw bytes.

use bytes::{Buf, BufMut};

use crate::{
    error::Result,
    io::{checked_read, checked_read_primitive},
};

/// Size of a [`read_hash`] value.
pub const HASH_LEN: usize = 32;

/// Read a single byte.
#[inline]
pub fn read_u8<B: Buf>(r: &mut B) -> Result<u8> {
    checked_read_primitive(r, B::get_u8)
}

/// Read a little-endian [`u32`].
#[inline]
pub fn read_u32_le<B: Buf>(r: &mut B) -> Result<u32> {
    checked_read_primitive(r, B::get_u32_le)
}

/// Read a little-endian [`u64`].
#[inline]
pub fn read_u64_le<B: Buf>(r: &mut B) -> Result<u64> {
    checked_read_primitive(r, B::get_u64_le)
}

/// Read a little-endian, two's-complement [`i64`].
#[inline]
pub fn read_i64_le<B: Buf>(r: &mut B) -> Result<i64> {
    checked_read_primitive(r, B::get_i64_le)
}

/// Read a little-endian [`u128`] (16 bytes).
#[inline]
pub fn read_u128_le<B: Buf>(r: &mut B) -> Result<u128> {
    checked_read_primitive(r, B::get_u128_le)
}

/// Read `N` raw bytes.
pub fn read_array<const N: usize, B: Buf>(r: &mut B) -> Result<[u8; N]> {
    checked_read(
        r,
        |r| {
            let mut out = [0_u8; N];
            r.copy_to_slice(&mut out);
            out
        },
        N,
    )
}

/// Read a 32 byte hash.
#[inline]
pub fn read_hash<B: Buf>(r: &mut B) -> Result<[u8; HASH_LEN]> {
    read_array::<HASH_LEN, B>(r)
}

/// Write a single byte.
#[inline]
pub fn write_u8<B: BufMut>(v: u8, w: &mut B) {
    w.put_u8(v);
}

/// Write a little-endian [`u32`].
#[inline]
pub fn write_u32_le<B: BufMut>(v: u32, w: &mut B) {
    w.put_u32_le(v);
}

/// Write a little-endian [`u64`].
#[inline]
pub fn write_u64_le<B: BufMut>(v: u64, w: &mut B) {
    w.put_u64_le(v);
}

/// Write a little-endian [`i64`].
#[inline]
pub fn write_i64_le<B: BufMut>(v: i64, w: &mut B) {
    w.put_i64_le(v);
}

/// Write a little-endian [`u128`].
#[inline]
pub fn write_u128_le<B: BufMut>(v: u128, w: &mut B) {
    w.put_u128_le(v);
}

/// Write raw bytes with no length prefix.
#[inline]
pub fn write_array<B: BufMut>(v: &[u8], w: &mut B) {
    w.put_slice(v);
}

/// Write a 32 byte hash.
#[inline]
pub fn write_hash<B: BufMut>(v: &[u8; HASH_LEN], w: &mut B) {
    write_array(v, w);
}
