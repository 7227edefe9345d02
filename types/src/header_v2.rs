//! The current [`BlockHeaderV2`] and the V1 -> V2 transform.

//---------------------------------------------------------------------------------------------------- Import
use bytes::{Buf, BufMut};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use timecoin_encoding::{from_bytes, from_bytes_exact, to_bytes, write_bytes, Result, WireValue};

use crate::{header_v1::fixed_len, BlockHeaderV1, Hash256, LegacyLayout, MasternodeTierCounts};

//---------------------------------------------------------------------------------------------------- V2Defaults
/// Values for the fields [`BlockHeaderV2`] adds on top of [`BlockHeaderV1`].
///
/// [`Default`] is what a migration uses: zeroed tiers, empty
/// vectors and no liveness recovery flag.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct V2Defaults {
    pub masternode_tiers: MasternodeTierCounts,
    pub vrf_proof: Vec<u8>,
    /// Replaced by the legacy bitmap if the V1 record carried one.
    pub active_masternodes_bitmap: Vec<u8>,
    pub liveness_recovery: Option<bool>,
}

//---------------------------------------------------------------------------------------------------- BlockHeaderV2
/// A block header in the current schema.
///
/// A pure superset of [`BlockHeaderV1`]: the same fields in the same
/// encoding, followed by the fields after `attestation_root`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BlockHeaderV2 {
    pub version: u32,
    pub height: u64,
    pub timestamp: i64,
    pub previous_hash: Hash256,
    pub merkle_root: Hash256,
    pub leader: String,
    pub block_reward: u64,
    pub vrf_output: Hash256,
    pub vrf_score: u128,
    pub attestation_root: Hash256,

    /// Masternode counts by tier at time of block production.
    pub masternode_tiers: MasternodeTierCounts,
    /// VRF proof generated by the block leader.
    #[cfg_attr(feature = "serde", serde(with = "hex::serde"))]
    pub vrf_proof: Vec<u8>,
    /// One bit per masternode, in address order, `1` meaning active.
    #[cfg_attr(feature = "serde", serde(with = "hex::serde"))]
    pub active_masternodes_bitmap: Vec<u8>,
    /// Set if this block resolved stalled transactions.
    pub liveness_recovery: Option<bool>,
}

impl BlockHeaderV2 {
    /// Transform a legacy header.
    ///
    /// Every V1 field is copied unchanged, the new fields come from `defaults`.
    /// A legacy `Some(bitmap)` is kept as `active_masternodes_bitmap`.
    pub fn from_v1(v1: BlockHeaderV1, defaults: V2Defaults) -> Self {
        let BlockHeaderV1 {
            version,
            height,
            timestamp,
            previous_hash,
            merkle_root,
            leader,
            block_reward,
            vrf_output,
            vrf_score,
            attestation_root,
            layout,
        } = v1;

        let active_masternodes_bitmap = match layout {
            LegacyLayout::WithBitmap(Some(bitmap)) => bitmap,
            LegacyLayout::WithBitmap(None) | LegacyLayout::Base => {
                defaults.active_masternodes_bitmap
            }
        };

        Self {
            version,
            height,
            timestamp,
            previous_hash,
            merkle_root,
            leader,
            block_reward,
            vrf_output,
            vrf_score,
            attestation_root,
            masternode_tiers: defaults.masternode_tiers,
            vrf_proof: defaults.vrf_proof,
            active_masternodes_bitmap,
            liveness_recovery: defaults.liveness_recovery,
        }
    }

    /// Decode a header from the front of `bytes`.
    ///
    /// Returns the header and the amount of bytes consumed.
    pub fn decode(bytes: &[u8]) -> Result<(Self, usize)> {
        from_bytes(bytes)
    }

    /// Decode a header that must occupy all of `bytes`.
    pub fn decode_exact(bytes: &[u8]) -> Result<Self> {
        from_bytes_exact(bytes)
    }

    /// Encode in the current schema.
    pub fn to_bytes(&self) -> Vec<u8> {
        to_bytes(self)
    }

    /// The V1 view of this header, the fields both schemas share.
    pub fn to_v1(&self) -> BlockHeaderV1 {
        BlockHeaderV1 {
            version: self.version,
            height: self.height,
            timestamp: self.timestamp,
            previous_hash: self.previous_hash,
            merkle_root: self.merkle_root,
            leader: self.leader.clone(),
            block_reward: self.block_reward,
            vrf_output: self.vrf_output,
            vrf_score: self.vrf_score,
            attestation_root: self.attestation_root,
            layout: LegacyLayout::Base,
        }
    }
}

impl From<BlockHeaderV1> for BlockHeaderV2 {
    /// [`BlockHeaderV2::from_v1`] with [`V2Defaults::default`].
    fn from(v1: BlockHeaderV1) -> Self {
        Self::from_v1(v1, V2Defaults::default())
    }
}

impl WireValue for BlockHeaderV2 {
    fn read<B: Buf>(r: &mut B) -> Result<Self> {
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
            masternode_tiers: MasternodeTierCounts::read(r)?,
            vrf_proof: Vec::<u8>::read(r)?,
            active_masternodes_bitmap: Vec::<u8>::read(r)?,
            liveness_recovery: Option::<bool>::read(r)?,
        })
    }

    fn write<B: BufMut>(&self, w: &mut B) {
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
        self.masternode_tiers.write(w);
        self.vrf_proof.write(w);
        self.active_masternodes_bitmap.write(w);
        self.liveness_recovery.write(w);
    }

    fn encoded_len(&self) -> usize {
        fixed_len(&self.leader)
            + MasternodeTierCounts::ENCODED_LEN
            + self.vrf_proof.encoded_len()
            + self.active_masternodes_bitmap.encoded_len()
            + self.liveness_recovery.encoded_len()
    }
}

//---------------------------------------------------------------------------------------------------- encode_v2
/// Encode a legacy header in the current schema.
///
/// The output starts with the V1 fixed fields, byte for byte as they were
/// written by the legacy encoder, followed by the new fields from `defaults`.
/// The same input always produces the same bytes.
///
/// A bitmap present in a [`LegacyLayout::WithBitmap`] header replaces
/// `defaults.active_masternodes_bitmap`. Older migration tooling always
/// wrote an empty bitmap here, so its output differs for those records.
///
/// ```rust
/// # use timecoin_types::{encode_v2, BlockHeaderV1, V2Defaults};
/// let v1 = BlockHeaderV1::default();
/// let v2 = encode_v2(&v1, &V2Defaults::default());
///
/// assert!(v2.starts_with(&v1.to_bytes()));
/// // tiers, 2 empty vectors, absent `Option<bool>`.
/// assert_eq!(&v2[v1.to_bytes().len()..], &[0_u8; 19]);
/// ```
pub fn encode_v2(v1: &BlockHeaderV1, defaults: &V2Defaults) -> Vec<u8> {
    let mut buf = Vec::with_capacity(v1.fixed_len() + MasternodeTierCounts::ENCODED_LEN + 3);
    v1.write_fixed(&mut buf);

    defaults.masternode_tiers.write(&mut buf);
    defaults.vrf_proof.write(&mut buf);
    write_bytes(
        v1.layout
            .bitmap()
            .unwrap_or(&defaults.active_masternodes_bitmap),
        &mut buf,
    );
    defaults.liveness_recovery.write(&mut buf);

    buf
}

//---------------------------------------------------------------------------------------------------- Tests
#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;
    use timecoin_encoding::Error;

    use super::*;

    fn v1() -> BlockHeaderV1 {
        BlockHeaderV1 {
            version: 1,
            height: 9,
            timestamp: 1_600_000_000,
            previous_hash: Hash256([9; 32]),
            merkle_root: Hash256([8; 32]),
            leader: "tc1q".into(),
            block_reward: 100,
            vrf_output: Hash256([7; 32]),
            vrf_score: 77,
            attestation_root: Hash256([6; 32]),
            layout: LegacyLayout::Base,
        }
    }

    #[test]
    fn encode_v2_matches_from_v1() {
        let v1 = v1();
        let defaults = V2Defaults::default();
        let encoded = encode_v2(&v1, &defaults);

        assert_eq!(encoded, BlockHeaderV2::from_v1(v1.clone(), defaults).to_bytes());
        assert_eq!(encoded, BlockHeaderV2::from(v1).to_bytes());
    }

    #[test]
    fn shared_prefix_is_unchanged() {
        let v1 = v1();
        let legacy = v1.to_bytes();
        let current = encode_v2(&v1, &V2Defaults::default());

        assert_eq!(&current[..legacy.len()], legacy.as_slice());
        assert_eq!(current.len(), legacy.len() + 16 + 1 + 1 + 1);
    }

    #[test]
    fn legacy_bitmap_is_carried_over() {
        let mut v1 = v1();
        v1.layout = LegacyLayout::WithBitmap(Some(vec![0xf0, 0x0f]));

        let v2 = BlockHeaderV2::decode_exact(&encode_v2(&v1, &V2Defaults::default())).unwrap();
        assert_eq!(v2.active_masternodes_bitmap, [0xf0, 0x0f]);
        assert_eq!(v2.vrf_proof, Vec::<u8>::new());

        // The legacy bitmap wins over the default one.
        let defaults = V2Defaults {
            active_masternodes_bitmap: vec![0xff],
            ..Default::default()
        };
        let v2 = BlockHeaderV2::decode_exact(&encode_v2(&v1, &defaults)).unwrap();
        assert_eq!(v2.active_masternodes_bitmap, [0xf0, 0x0f]);

        // An explicit `None` is the same as no bitmap at all.
        v1.layout = LegacyLayout::WithBitmap(None);
        let v2 = BlockHeaderV2::from(v1);
        assert!(v2.active_masternodes_bitmap.is_empty());
    }

    #[test]
    fn custom_defaults() {
        let defaults = V2Defaults {
            masternode_tiers: MasternodeTierCounts {
                free: 4,
                bronze: 3,
                silver: 2,
                gold: 1,
            },
            vrf_proof: vec![0xaa; 64],
            active_masternodes_bitmap: vec![1],
            liveness_recovery: Some(true),
        };

        let bytes = encode_v2(&v1(), &defaults);
        let v2 = BlockHeaderV2::decode_exact(&bytes).unwrap();

        assert_eq!(v2.masternode_tiers, defaults.masternode_tiers);
        assert_eq!(v2.vrf_proof, defaults.vrf_proof);
        assert_eq!(v2.active_masternodes_bitmap, defaults.active_masternodes_bitmap);
        assert_eq!(v2.liveness_recovery, Some(true));
        assert_eq!(v2.to_v1(), v1());
        assert_eq!(v2.encoded_len(), bytes.len());
    }

    #[test]
    fn v2_requires_every_field() {
        let bytes = encode_v2(&v1(), &V2Defaults::default());
        assert_eq!(
            BlockHeaderV2::decode(&bytes[..bytes.len() - 1]),
            Err(Error::TruncatedInput {
                needed: 1,
                remaining: 0
            })
        );
    }
}
