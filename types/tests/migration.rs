//! Decoding hand-assembled legacy records and re-encoding them in the current schema.
#![expect(unused_crate_dependencies, reason = "outer test module")]

use pretty_assertions::assert_eq;
use proptest::prelude::*;

use timecoin_encoding::Error;
use timecoin_types::{
    encode_v2, BlockHeaderV1, BlockHeaderV2, DecodedHeader, Hash256, LegacyLayout,
    MasternodeTierCounts, SchemaVersion, V2Defaults,
};

const VRF_SCORE: u128 = 123_456_789_012_345_678_901_234_567_890;

/// The legacy bytes of block 42, written field by field.
fn legacy_block_42() -> Vec<u8> {
    let mut bytes = Vec::new();
    bytes.extend_from_slice(&1_u32.to_le_bytes());
    bytes.extend_from_slice(&42_u64.to_le_bytes());
    bytes.extend_from_slice(&1_700_000_000_i64.to_le_bytes());
    bytes.extend_from_slice(&[0x00; 32]);
    bytes.extend_from_slice(&[0x11; 32]);
    bytes.push(6);
    bytes.extend_from_slice(b"node-A");
    bytes.extend_from_slice(&1000_u64.to_le_bytes());
    bytes.extend_from_slice(&[0x22; 32]);
    bytes.extend_from_slice(&VRF_SCORE.to_le_bytes());
    bytes.extend_from_slice(&[0x33; 32]);
    bytes
}

/// Offsets at which a field of [`legacy_block_42`] ends.
const FIELD_ENDS: [usize; 10] = [4, 12, 20, 52, 84, 91, 99, 131, 147, 179];

#[test]
fn block_42() {
    let bytes = legacy_block_42();
    assert_eq!(bytes.len(), 179);

    let (v1, consumed) = BlockHeaderV1::decode(&bytes).unwrap();
    assert_eq!(consumed, 179);
    assert_eq!(
        v1,
        BlockHeaderV1 {
            version: 1,
            height: 42,
            timestamp: 1_700_000_000,
            previous_hash: Hash256([0x00; 32]),
            merkle_root: Hash256([0x11; 32]),
            leader: "node-A".into(),
            block_reward: 1000,
            vrf_output: Hash256([0x22; 32]),
            vrf_score: VRF_SCORE,
            attestation_root: Hash256([0x33; 32]),
            layout: LegacyLayout::Base,
        }
    );

    let current = encode_v2(&v1, &V2Defaults::default());
    assert_eq!(&current[..179], bytes.as_slice());
    // zeroed tiers, empty `vrf_proof`, empty bitmap, `None`
    assert_eq!(&current[179..], &[0_u8; 16 + 1 + 1 + 1]);

    let v2 = BlockHeaderV2::decode_exact(&current).unwrap();
    assert_eq!(v2.height, 42);
    assert_eq!(v2.leader, "node-A");
    assert_eq!(v2.vrf_score, VRF_SCORE);
    assert_eq!(v2.masternode_tiers, MasternodeTierCounts::default());
    assert_eq!(v2.liveness_recovery, None);
    assert_eq!(v2.to_v1(), v1);
}

#[test]
fn truncated_at_every_field_boundary() {
    let bytes = legacy_block_42();

    for end in FIELD_ENDS[..FIELD_ENDS.len() - 1].iter().copied() {
        let err = BlockHeaderV1::decode(&bytes[..end]).unwrap_err();
        assert!(
            matches!(err, Error::TruncatedInput { remaining: 0, .. }),
            "cut at {end}: {err:?}"
        );
    }

    // Mid field.
    for end in [0, 3, 10, 30, 85, 88, 150, 178] {
        let err = BlockHeaderV1::decode(&bytes[..end]).unwrap_err();
        assert!(
            matches!(err, Error::TruncatedInput { .. }),
            "cut at {end}: {err:?}"
        );
    }
}

#[test]
fn legacy_bitmap_build() {
    let mut bytes = legacy_block_42();
    bytes.extend_from_slice(&[1, 2, 0b0000_0111, 0b1000_0000]);

    let record = DecodedHeader::decode_legacy_record(&bytes).unwrap();
    assert_eq!(record.schema(), SchemaVersion::V1WithBitmap);

    let v2 = record.into_v2(V2Defaults::default());
    assert_eq!(v2.active_masternodes_bitmap, [0b0000_0111, 0b1000_0000]);
}

#[test]
fn invalid_utf8_leader() {
    let mut bytes = legacy_block_42();
    bytes[84 + 1] = 0xff;
    assert_eq!(BlockHeaderV1::decode(&bytes), Err(Error::InvalidUtf8));
}

fn arb_v1() -> impl Strategy<Value = BlockHeaderV1> {
    (
        any::<(u32, u64, i64, u64, u128)>(),
        any::<[[u8; 32]; 4]>(),
        "[a-zA-Z0-9]{0,300}",
        proptest::option::of(proptest::option::of(proptest::collection::vec(
            any::<u8>(),
            0..64,
        ))),
    )
        .prop_map(
            |((version, height, timestamp, block_reward, vrf_score), hashes, leader, layout)| {
                BlockHeaderV1 {
                    version,
                    height,
                    timestamp,
                    previous_hash: Hash256(hashes[0]),
                    merkle_root: Hash256(hashes[1]),
                    leader,
                    block_reward,
                    vrf_output: Hash256(hashes[2]),
                    vrf_score,
                    attestation_root: Hash256(hashes[3]),
                    layout: layout.map_or(LegacyLayout::Base, LegacyLayout::WithBitmap),
                }
            },
        )
}

proptest! {
    #[test]
    fn decode_is_deterministic(v1 in arb_v1()) {
        let bytes = v1.to_bytes();
        let first = BlockHeaderV1::decode(&bytes).unwrap();
        let second = BlockHeaderV1::decode(&bytes).unwrap();
        prop_assert_eq!(&first, &second);
        prop_assert_eq!(first, (v1, bytes.len()));
    }

    #[test]
    fn encode_v2_is_stable(v1 in arb_v1()) {
        let defaults = V2Defaults::default();
        let once = encode_v2(&v1, &defaults);
        prop_assert_eq!(&once, &encode_v2(&v1, &defaults));

        // Decoding what was migrated and encoding it again changes nothing.
        let v2 = BlockHeaderV2::decode_exact(&once).unwrap();
        prop_assert_eq!(v2.to_bytes(), once);
    }

    #[test]
    fn shared_prefix(v1 in arb_v1()) {
        let mut base = v1.clone();
        base.layout = LegacyLayout::Base;

        let current = encode_v2(&v1, &V2Defaults::default());
        prop_assert!(current.starts_with(&base.to_bytes()));
    }
}
