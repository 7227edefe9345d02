//! The [`WireValue`] trait and its impls for the base values of the format.

use bytes::{Buf, BufMut};

use timecoin_helper::cast::{u64_to_usize_checked, usize_to_u64};

use crate::{
    error::{Error, Result},
    io::checked_read,
    primitive::*,
    varint::{read_varint, varint_len, write_varint},
};

/// A value that can be read from and written to the record format.
///
/// Readers consume exactly the bytes of one value from the front of
/// the [`Buf`], writers never fail.
pub trait WireValue: Sized {
    /// Read a value from the front of `r`.
    fn read<B: Buf>(r: &mut B) -> Result<Self>;

    /// Append the encoding of `self` to `w`.
    fn write<B: BufMut>(&self, w: &mut B);

    /// Exact amount of bytes [`WireValue::write`] appends.
    fn encoded_len(&self) -> usize;
}

macro_rules! wire_numb {
    ($($numb:ty, $read_fn:ident, $write_fn:ident),* $(,)?) => {$(
        impl WireValue for $numb {
            #[inline]
            fn read<B: Buf>(r: &mut B) -> Result<Self> {
                $read_fn(r)
            }

            #[inline]
            fn write<B: BufMut>(&self, w: &mut B) {
                $write_fn(*self, w);
            }

            #[inline]
            fn encoded_len(&self) -> usize {
                size_of::<$numb>()
            }
        }
    )*};
}

wire_numb! {
    u8, read_u8, write_u8,
    u32, read_u32_le, write_u32_le,
    u64, read_u64_le, write_u64_le,
    i64, read_i64_le, write_i64_le,
    u128, read_u128_le, write_u128_le,
}

impl WireValue for bool {
    fn read<B: Buf>(r: &mut B) -> Result<Self> {
        match read_u8(r)? {
            0 => Ok(false),
            1 => Ok(true),
            b => Err(Error::InvalidBool(b)),
        }
    }

    fn write<B: BufMut>(&self, w: &mut B) {
        write_u8(u8::from(*self), w);
    }

    fn encoded_len(&self) -> usize {
        1
    }
}

impl<const N: usize> WireValue for [u8; N] {
    fn read<B: Buf>(r: &mut B) -> Result<Self> {
        read_array::<N, B>(r)
    }

    fn write<B: BufMut>(&self, w: &mut B) {
        write_array(self, w);
    }

    fn encoded_len(&self) -> usize {
        N
    }
}

/// Read a varint length prefix and check it against the remaining input.
fn read_len<B: Buf>(r: &mut B) -> Result<usize> {
    let len = read_varint(r)?;
    u64_to_usize_checked(len).ok_or(Error::LengthOverflow(len))
}

/// Read a length-prefixed byte vector.
pub fn read_bytes<B: Buf>(r: &mut B) -> Result<Vec<u8>> {
    let len = read_len(r)?;
    // Length is checked before the allocation.
    checked_read(
        r,
        |r| {
            let mut out = vec![0_u8; len];
            r.copy_to_slice(&mut out);
            out
        },
        len,
    )
}

/// Write a length-prefixed byte vector.
pub fn write_bytes<B: BufMut>(v: &[u8], w: &mut B) {
    write_varint(usize_to_u64(v.len()), w);
    w.put_slice(v);
}

impl WireValue for Vec<u8> {
    fn read<B: Buf>(r: &mut B) -> Result<Self> {
        read_bytes(r)
    }

    fn write<B: BufMut>(&self, w: &mut B) {
        write_bytes(self, w);
    }

    fn encoded_len(&self) -> usize {
        varint_len(usize_to_u64(self.len())) + self.len()
    }
}

/// Read a length-prefixed UTF-8 string.
pub fn read_string<B: Buf>(r: &mut B) -> Result<String> {
    Ok(String::from_utf8(read_bytes(r)?)?)
}

/// Write a length-prefixed UTF-8 string.
pub fn write_string<B: BufMut>(v: &str, w: &mut B) {
    write_bytes(v.as_bytes(), w);
}

impl WireValue for String {
    fn read<B: Buf>(r: &mut B) -> Result<Self> {
        read_string(r)
    }

    fn write<B: BufMut>(&self, w: &mut B) {
        write_string(self, w);
    }

    fn encoded_len(&self) -> usize {
        varint_len(usize_to_u64(self.len())) + self.len()
    }
}

/// Tag of an absent [`Option`].
const NONE_TAG: u8 = 0;
/// Tag of a present [`Option`].
const SOME_TAG: u8 = 1;

impl<T: WireValue> WireValue for Option<T> {
    fn read<B: Buf>(r: &mut B) -> Result<Self> {
        match read_u8(r)? {
            NONE_TAG => Ok(None),
            SOME_TAG => Ok(Some(T::read(r)?)),
            tag => Err(Error::InvalidTag(tag)),
        }
    }

    fn write<B: BufMut>(&self, w: &mut B) {
        match self {
            None => write_u8(NONE_TAG, w),
            Some(v) => {
                write_u8(SOME_TAG, w);
                v.write(w);
            }
        }
    }

    fn encoded_len(&self) -> usize {
        1 + self.as_ref().map_or(0, T::encoded_len)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    use super::*;
    use crate::{from_bytes, to_bytes};

    #[test]
    fn string_layout() {
        let bytes = to_bytes(&String::from("node-A"));
        assert_eq!(bytes, b"\x06node-A");
        assert_eq!(from_bytes::<String>(&bytes).unwrap(), ("node-A".into(), 7));
    }

    #[test]
    fn long_vec_uses_wide_prefix() {
        let v = vec![7_u8; 300];
        let bytes = to_bytes(&v);
        assert_eq!(&bytes[..3], &[251_u8, 0x2c, 0x01]);
        assert_eq!(bytes.len(), 303);
        assert_eq!(v.encoded_len(), 303);
    }

    #[test]
    fn invalid_utf8() {
        let bytes = [2_u8, 0xc3, 0x28];
        assert_eq!(from_bytes::<String>(&bytes), Err(Error::InvalidUtf8));
        // The same payload is a valid byte vector.
        assert_eq!(
            from_bytes::<Vec<u8>>(&bytes).unwrap(),
            (vec![0xc3, 0x28], 3)
        );
    }

    #[test]
    fn truncated_payload() {
        let bytes = [5_u8, 1, 2];
        assert_eq!(
            from_bytes::<Vec<u8>>(&bytes),
            Err(Error::TruncatedInput {
                needed: 5,
                remaining: 2
            })
        );
    }

    #[test]
    fn option_tags() {
        assert_eq!(from_bytes::<Option<bool>>(&[0]).unwrap(), (None, 1));
        assert_eq!(from_bytes::<Option<bool>>(&[1, 1]).unwrap(), (Some(true), 2));
        assert_eq!(
            from_bytes::<Option<bool>>(&[2, 1]),
            Err(Error::InvalidTag(2))
        );
        assert_eq!(
            from_bytes::<Option<bool>>(&[1, 2]),
            Err(Error::InvalidBool(2))
        );
        assert_eq!(
            from_bytes::<Option<u32>>(&[1, 0]),
            Err(Error::TruncatedInput {
                needed: 4,
                remaining: 1
            })
        );
    }

    #[test]
    fn none_is_one_byte() {
        assert_eq!(to_bytes(&None::<Vec<u8>>), [0_u8]);
        assert_eq!(to_bytes(&None::<u128>), [0_u8]);
    }

    proptest! {
        #[test]
        fn option_vec_round_trip(v in proptest::option::of(proptest::collection::vec(any::<u8>(), 0..600))) {
            let bytes = to_bytes(&v);
            let expected_len = match &v {
                None => 1,
                Some(inner) => 1 + to_bytes(inner).len(),
            };
            prop_assert_eq!(bytes.len(), expected_len);
            prop_assert_eq!(v.encoded_len(), expected_len);

            let (decoded, consumed) = from_bytes::<Option<Vec<u8>>>(&bytes).unwrap();
            prop_assert_eq!(decoded, v);
            prop_assert_eq!(consumed, expected_len);
        }

        #[test]
        fn string_round_trip(s in ".{0,300}") {
            let bytes = to_bytes(&s);
            prop_assert_eq!(from_bytes::<String>(&bytes).unwrap(), (s, bytes.len()));
        }
    }
}
