use bytes::{Buf, BufMut};

use crate::{
    error::{Error, Result},
    io::checked_read_primitive,
    primitive::read_u8,
};

/// Values below this are written as a single byte.
const SINGLE_BYTE_MAX: u64 = 250;
/// Tag for a [`u16`] payload.
const U16_TAG: u8 = 251;
/// Tag for a [`u32`] payload.
const U32_TAG: u8 = 252;
/// Tag for a [`u64`] payload.
const U64_TAG: u8 = 253;

/// Read a varint.
///
/// Over-long forms (e.g. `5` written with [`U16_TAG`]) are accepted.
///
/// # Errors
/// - [`Error::TruncatedInput`] if the buffer is shorter than the tag implies
/// - [`Error::InvalidTag`] for the unused tags `254` and `255`
pub fn read_varint<B: Buf>(r: &mut B) -> Result<u64> {
    let tag = read_u8(r)?;

    Ok(match tag {
        U16_TAG => checked_read_primitive(r, B::get_u16_le)?.into(),
        U32_TAG => checked_read_primitive(r, B::get_u32_le)?.into(),
        U64_TAG => checked_read_primitive(r, B::get_u64_le)?,
        254 | 255 => return Err(Error::InvalidTag(tag)),
        small => small.into(),
    })
}

/// Write `number` in its shortest varint form.
pub fn write_varint<B: BufMut>(number: u64, w: &mut B) {
    if let Ok(v) = u8::try_from(number) {
        if u64::from(v) <= SINGLE_BYTE_MAX {
            w.put_u8(v);
            return;
        }
    }

    if let Ok(v) = u16::try_from(number) {
        w.put_u8(U16_TAG);
        w.put_u16_le(v);
    } else if let Ok(v) = u32::try_from(number) {
        w.put_u8(U32_TAG);
        w.put_u32_le(v);
    } else {
        w.put_u8(U64_TAG);
        w.put_u64_le(number);
    }
}

/// The amount of bytes [`write_varint`] emits for `number`.
pub const fn varint_len(number: u64) -> usize {
    match number {
        0..=SINGLE_BYTE_MAX => 1,
        251..=0xFFFF => 3,
        0x1_0000..=0xFFFF_FFFF => 5,
        _ => 9,
    }
}
