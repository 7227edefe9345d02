//! [`Hash256`].

//---------------------------------------------------------------------------------------------------- Import
use std::fmt;

use bytes::{Buf, BufMut};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use timecoin_encoding::{
    primitive::{read_hash, write_hash, HASH_LEN},
    Result, WireValue,
};

//---------------------------------------------------------------------------------------------------- Hash256
/// An opaque 32 byte hash.
///
/// Written as raw bytes, it has no endianness.
/// (De)serializes from/to a hexadecimal string with `serde`.
///
/// ```rust
/// # use timecoin_types::Hash256;
/// let hash = Hash256([0x11; 32]);
/// assert_eq!(hash.to_string(), "11".repeat(32));
/// assert!(Hash256::default().is_zeroed());
/// ```
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
#[repr(transparent)]
pub struct Hash256(#[cfg_attr(feature = "serde", serde(with = "hex::serde"))] pub [u8; HASH_LEN]);

impl Hash256 {
    /// Returns `true` if every byte is `0`.
    pub fn is_zeroed(&self) -> bool {
        self.0 == [0; HASH_LEN]
    }

    /// The raw bytes.
    pub const fn as_bytes(&self) -> &[u8; HASH_LEN] {
        &self.0
    }
}

impl From<[u8; HASH_LEN]> for Hash256 {
    fn from(bytes: [u8; HASH_LEN]) -> Self {
        Self(bytes)
    }
}

impl fmt::Display for Hash256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

impl fmt::Debug for Hash256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Hash256({self})")
    }
}

impl WireValue for Hash256 {
    fn read<B: Buf>(r: &mut B) -> Result<Self> {
        read_hash(r).map(Self)
    }

    fn write<B: BufMut>(&self, w: &mut B) {
        write_hash(&self.0, w);
    }

    fn encoded_len(&self) -> usize {
        HASH_LEN
    }
}

//---------------------------------------------------------------------------------------------------- Tests
#[cfg(test)]
mod test {
    use timecoin_encoding::{from_bytes, to_bytes, Error};

    use super::*;

    #[test]
    fn raw_bytes_on_the_wire() {
        let hash: Hash256 = core::array::from_fn(|i| u8::try_from(i).unwrap()).into();
        let bytes = to_bytes(&hash);
        assert_eq!(bytes.as_slice(), hash.as_bytes());
        assert_eq!(from_bytes::<Hash256>(&bytes).unwrap(), (hash, 32));
    }

    #[test]
    fn short_hash() {
        assert_eq!(
            from_bytes::<Hash256>(&[0; 31]),
            Err(Error::TruncatedInput {
                needed: 32,
                remaining: 31
            })
        );
    }

    #[test]
    #[cfg(feature = "serde")]
    fn serde_hex() {
        let hash = Hash256([0xab; 32]);
        let json = serde_json::to_string(&hash).unwrap();
        assert_eq!(json, format!("\"{}\"", "ab".repeat(32)));
        assert_eq!(serde_json::from_str::<Hash256>(&json).unwrap(), hash);
    }
}
