//! Telling the schemas apart.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use timecoin_encoding::Error;

use crate::{BlockHeaderV1, BlockHeaderV2, LegacyLayout, V2Defaults};

/// Why a record did not decode into a single header.
#[derive(thiserror::Error, Copy, Clone, Debug, PartialEq, Eq)]
pub enum SchemaError {
    /// Neither schema decodes the record.
    ///
    /// Holds the error of the schema that was tried first.
    #[error(transparent)]
    Decode(#[from] Error),

    /// The record decodes strictly as both V1 (with a bitmap) and V2.
    ///
    /// A V2 record whose tier bytes start with `01 <len>` reads as a
    /// legacy bitmap of `len` bytes. No schema is picked for these.
    #[error("record decodes as both v1+bitmap and v2")]
    Ambiguous,
}

/// The schema (and legacy sub-version) a record was written in.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SchemaVersion {
    /// [`BlockHeaderV1`] with [`LegacyLayout::Base`].
    V1,
    /// [`BlockHeaderV1`] with [`LegacyLayout::WithBitmap`].
    V1WithBitmap,
    /// [`BlockHeaderV2`].
    V2,
}

impl fmt::Display for SchemaVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::V1 => "v1",
            Self::V1WithBitmap => "v1+bitmap",
            Self::V2 => "v2",
        })
    }
}

/// A whole record decoded in whichever schema fits it.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum DecodedHeader {
    V1(BlockHeaderV1),
    V2(BlockHeaderV2),
}

impl DecodedHeader {
    /// Decode a record stored under a legacy key.
    ///
    /// Legacy keys may also hold records already written in the
    /// current schema, so both schemas are tried.
    ///
    /// # Errors
    /// - [`SchemaError::Decode`] with the V1 error if neither schema decodes all of `bytes`
    /// - [`SchemaError::Ambiguous`] if both do
    pub fn decode_legacy_record(bytes: &[u8]) -> Result<Self, SchemaError> {
        match (
            BlockHeaderV1::decode_exact(bytes),
            BlockHeaderV2::decode_exact(bytes),
        ) {
            (Ok(v1), Err(_)) => Ok(Self::V1(v1)),
            (Err(_), Ok(v2)) => Ok(Self::V2(v2)),
            (Ok(_), Ok(_)) => Err(SchemaError::Ambiguous),
            (Err(e), Err(_)) => Err(e.into()),
        }
    }

    /// Decode a record stored under a current key.
    ///
    /// V2 is tried first, then V1.
    ///
    /// # Errors
    /// The V2 error if neither schema decodes all of `bytes`.
    pub fn decode_current_record(bytes: &[u8]) -> Result<Self, Error> {
        match BlockHeaderV2::decode_exact(bytes) {
            Ok(v2) => Ok(Self::V2(v2)),
            Err(e) => BlockHeaderV1::decode_exact(bytes)
                .map(Self::V1)
                .map_err(|_| e),
        }
    }

    /// The schema this record was decoded with.
    pub const fn schema(&self) -> SchemaVersion {
        match self {
            Self::V1(v1) => match v1.layout {
                LegacyLayout::Base => SchemaVersion::V1,
                LegacyLayout::WithBitmap(_) => SchemaVersion::V1WithBitmap,
            },
            Self::V2(_) => SchemaVersion::V2,
        }
    }

    /// The block height.
    pub const fn height(&self) -> u64 {
        match self {
            Self::V1(v1) => v1.height,
            Self::V2(v2) => v2.height,
        }
    }

    /// The header in the current schema, V1 headers are transformed with `defaults`.
    pub fn into_v2(self, defaults: V2Defaults) -> BlockHeaderV2 {
        match self {
            Self::V1(v1) => BlockHeaderV2::from_v1(v1, defaults),
            Self::V2(v2) => v2,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{encode_v2, MasternodeTierCounts};

    #[test]
    fn legacy_key_holding_current_bytes() {
        let v1 = BlockHeaderV1 {
            height: 3,
            leader: "a".into(),
            ..Default::default()
        };
        let current = encode_v2(&v1, &V2Defaults::default());

        let decoded = DecodedHeader::decode_legacy_record(&current).unwrap();
        assert_eq!(decoded.schema(), SchemaVersion::V2);
        assert_eq!(decoded.height(), 3);

        let decoded = DecodedHeader::decode_legacy_record(&v1.to_bytes()).unwrap();
        assert_eq!(decoded.schema(), SchemaVersion::V1);
        assert_eq!(decoded.into_v2(V2Defaults::default()).to_bytes(), current);
    }

    #[test]
    fn neither_schema_reports_preferred_error() {
        let mut bytes = BlockHeaderV1::default().to_bytes();
        // `None` bitmap, then one byte too many.
        bytes.extend_from_slice(&[0, 9]);

        assert_eq!(
            DecodedHeader::decode_legacy_record(&bytes),
            Err(SchemaError::Decode(Error::TrailingBytes(1)))
        );
        assert_eq!(
            DecodedHeader::decode_current_record(&bytes),
            Err(Error::TruncatedInput {
                needed: 4,
                remaining: 2
            })
        );
    }

    #[test]
    fn current_record_that_also_reads_as_legacy_bitmap() {
        // `free = 0x1101` starts the tiers with `01 11`: a `Some` bitmap of
        // 17 bytes, exactly the rest of the record.
        let defaults = V2Defaults {
            masternode_tiers: MasternodeTierCounts {
                free: 0x1101,
                ..Default::default()
            },
            ..Default::default()
        };
        let bytes = encode_v2(&BlockHeaderV1::default(), &defaults);

        let v1 = BlockHeaderV1::decode_exact(&bytes).unwrap();
        assert_eq!(v1.layout.bitmap().map(<[u8]>::len), Some(17));

        assert_eq!(
            DecodedHeader::decode_legacy_record(&bytes),
            Err(SchemaError::Ambiguous)
        );
        assert_eq!(
            DecodedHeader::decode_current_record(&bytes)
                .unwrap()
                .into_v2(V2Defaults::default())
                .masternode_tiers,
            defaults.masternode_tiers
        );
    }

    #[test]
    fn display() {
        assert_eq!(SchemaVersion::V1WithBitmap.to_string(), "v1+bitmap");
    }
}
