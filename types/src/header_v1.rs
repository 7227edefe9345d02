//! The legacy [`BlockHeaderV1`] and its decoder.

//---------------------------------------------------------------------------------------------------- Import
use bytes::{Buf, BufMut};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use timecoin_encoding::{from_bytes, from_bytes_exact, to_bytes, varint_len, Result, WireValue};
use timecoin_helper::cast::usize_to_u64;

use crate::Hash256;

//---------------------------------------------------------------------------------------------------- LegacyLayout
/// Which legacy build wrote a [`BlockHeaderV1`].
///
/// Some builds appended an `Option<Vec<u8>>` active masternodes bitmap
/// after `attestation_root`, others stopped there. There is no version
/// field for this, a decoder can only tell by bytes remaining after the
/// fixed fields.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum LegacyLayout {
    /// Only the fixed fields.
    #[default]
    Base,
    /// The fixed fields followed by the optional bitmap.
    WithBitmap(Option<Vec<u8>>),
}

impl LegacyLayout {
    /// The bitmap, if one was written and it was `Some`.
    pub fn bitmap(&self) -> Option<&[u8]> {
        match self {
            Self::WithBitmap(Some(bitmap)) => Some(bitmap),
            Self::WithBitmap(None) | Self::Base => None,
        }
    }

    /// Amount of bytes the layout adds after the fixed fields.
    pub fn encoded_len(&self) -> usize {
        match self {
            Self::Base => 0,
            Self::WithBitmap(bitmap) => bitmap.encoded_len(),
        }
    }
}

//---------------------------------------------------------------------------------------------------- BlockHeaderV1
/// A legacy block header.
///
/// Fields are listed in wire order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BlockHeaderV1 {
    pub version: u32,
    pub height: u64,
    /// Seconds since the UNIX epoch, may be negative.
    pub timestamp: i64,
    pub previous_hash: Hash256,
    pub merkle_root: Hash256,
    /// Address of the block producer.
    pub leader: String,
    pub block_reward: u64,
    pub vrf_output: Hash256,
    pub vrf_score: u128,
    /// Root hash of the time attestations merkle tree.
    pub attestation_root: Hash256,
    /// The trailing, build dependent part of the record.
    pub layout: LegacyLayout,
}

impl BlockHeaderV1 {
    /// Decode a header from the front of `bytes`.
    ///
    /// Returns the header and the exact amount of bytes consumed.
    /// If any bytes remain after the fixed fields they are read as the
    /// legacy bitmap, see [`LegacyLayout`].
    ///
    /// # Errors
    /// Fails if any field fails, no partial header is returned.
    pub fn decode(bytes: &[u8]) -> Result<(Self, usize)> {
        from_bytes(bytes)
    }

    /// Decode a header that must occupy all of `bytes`.
    ///
    /// # Errors
    /// Same as [`BlockHeaderV1::decode`], and
    /// [`Error::TrailingBytes`](timecoin_encoding::Error::TrailingBytes)
    /// if anything is left after the bitmap.
    pub fn decode_exact(bytes: &[u8]) -> Result<Self> {
        from_bytes_exact(bytes)
    }

    /// Re-encode in the legacy format, keeping the [`LegacyLayout`].
    pub fn to_bytes(&self) -> Vec<u8> {
        to_bytes(self)
    }

    /// Read the fields shared by every legacy build.
    fn read_fixed<B: Buf>(r: &mut B) -> Result<Self> {
        Ok(Self {
            version: u32::read(r)?,
            height: u64::read(r)?,
            timestamp: i64::read(r)?,
            previous_hash: Hash256::read(r)?,
            merkle_root: Hash256::read(r)?,
            leader: String::read(r)?,
            block_reward: u64::read(r)?,
            vrf_output: Hash256::read(r)?,
            vrf_score: u128::read(r)?,
            attestation_root: Hash256::read(r)?,
            layout: LegacyLayout::Base,
        })
    }

    /// Write the fields shared by every legacy build.
    ///
    /// [`BlockHeaderV2`](crate::BlockHeaderV2) starts with the exact same bytes.
    pub(crate) fn write_fixed<B: BufMut>(&self, w: &mut B) {
        self.version.write(w);
        self.height.write(w);
        self.timestamp.write(w);
        self.previous_hash.write(w);
        self.merkle_root.write(w);
        self.leader.write(w);
        self.block_reward.write(w);
        self.vrf_output.write(w);
        self.vrf_score.write(w);
        self.attestation_root.write(w);
    }

    /// Size of the fixed fields.
    pub(crate) const fn fixed_len(&self) -> usize {
        fixed_len(self.leader.as_str())
    }
}

/// Size of the fixed fields of a header with this `leader`.
pub(crate) const fn fixed_len(leader: &str) -> usize {
    // version, height, timestamp, block_reward, vrf_score
    const INTS: usize = 4 + 8 + 8 + 8 + 16;
    // previous_hash, merkle_root, vrf_output, attestation_root
    const HASHES: usize = 4 * 32;

    INTS + HASHES + varint_len(usize_to_u64(leader.len())) + leader.len()
}

impl WireValue for BlockHeaderV1 {
    fn read<B: Buf>(r: &mut B) -> Result<Self> {
        let mut header = Self::read_fixed(r)?;

        if r.has_remaining() {
            header.layout = LegacyLayout::WithBitmap(Option::<Vec<u8>>::read(r)?);
        }

        Ok(header)
    }

    fn write<B: BufMut>(&self, w: &mut B) {
        self.write_fixed(w);

        if let LegacyLayout::WithBitmap(bitmap) = &self.layout {
            bitmap.write(w);
        }
    }

    fn encoded_len(&self) -> usize {
        self.fixed_len() + self.layout.encoded_len()
    }
}
