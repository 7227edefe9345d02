//! [`MasternodeTierCounts`].

use bytes::{Buf, BufMut};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use timecoin_encoding::{Result, WireValue};

/// Masternode counts by tier at the time a block was produced.
///
/// Always present in [`BlockHeaderV2`](crate::BlockHeaderV2),
/// all-zero for headers migrated from [`BlockHeaderV1`](crate::BlockHeaderV1).
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MasternodeTierCounts {
    pub free: u32,
    pub bronze: u32,
    pub silver: u32,
    pub gold: u32,
}

impl MasternodeTierCounts {
    /// Size of the encoding, four `u32`s.
    pub const ENCODED_LEN: usize = 16;

    /// Sum of all tiers.
    pub const fn total(&self) -> u64 {
        self.free as u64 + self.bronze as u64 + self.silver as u64 + self.gold as u64
    }
}

impl WireValue for MasternodeTierCounts {
    fn read<B: Buf>(r: &mut B) -> Result<Self> {
        Ok(Self {
            free: u32::read(r)?,
            bronze: u32::read(r)?,
            silver: u32::read(r)?,
            gold: u32::read(r)?,
        })
    }

    fn write<B: BufMut>(&self, w: &mut B) {
        self.free.write(w);
        self.bronze.write(w);
        self.silver.write(w);
        self.gold.write(w);
    }

    fn encoded_len(&self) -> usize {
        Self::ENCODED_LEN
    }
}
