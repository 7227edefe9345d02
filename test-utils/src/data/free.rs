//! Free functions to access data.

//---------------------------------------------------------------------------------------------------- Import
use timecoin_kv::{KeyScheme, MemoryStore, Store};
use timecoin_types::{encode_v2, BlockHeaderV1, Hash256, LegacyLayout, V2Defaults};

//---------------------------------------------------------------------------------------------------- Headers
/// Block 42, decoded from [`BLOCK_42_V1`](crate::data::BLOCK_42_V1).
pub fn block_42() -> BlockHeaderV1 {
    BlockHeaderV1 {
        version: 1,
        height: 42,
        timestamp: 1_700_000_000,
        previous_hash: Hash256([0x00; 32]),
        merkle_root: Hash256([0x11; 32]),
        leader: "node-A".into(),
        block_reward: 1000,
        vrf_output: Hash256([0x22; 32]),
        vrf_score: 123_456_789_012_345_678_901_234_567_890,
        attestation_root: Hash256([0x33; 32]),
        layout: LegacyLayout::Base,
    }
}

/// A legacy header at `height`, every other field derived from it.
pub fn header_v1(height: u64, layout: LegacyLayout) -> BlockHeaderV1 {
    let byte = height.to_le_bytes()[0];

    BlockHeaderV1 {
        version: 1,
        height,
        timestamp: 1_600_000_000 + i64::from(byte) * 60,
        previous_hash: Hash256([byte.wrapping_sub(1); 32]),
        merkle_root: Hash256([byte ^ 0xaa; 32]),
        leader: format!("node-{height}"),
        block_reward: height.wrapping_mul(100),
        vrf_output: Hash256([byte ^ 0x55; 32]),
        vrf_score: u128::from(height) << 64,
        attestation_root: Hash256([byte; 32]),
        layout,
    }
}

//---------------------------------------------------------------------------------------------------- Stores
/// The heights of [`mixed_store`] and what is stored at them.
pub struct MixedStoreHeights;

impl MixedStoreHeights {
    /// Legacy key, base layout.
    pub const V1: u64 = 1;
    /// Legacy key, `Some(bitmap)` tail.
    pub const V1_WITH_BITMAP: u64 = 2;
    /// Nothing under either key.
    pub const MISSING: u64 = 3;
    /// Legacy key, bytes neither schema decodes.
    pub const GARBAGE: u64 = 4;
    /// Legacy key already holding current schema bytes.
    pub const V2_UNDER_LEGACY_KEY: u64 = 5;
    /// Legacy key, and the current key already written.
    pub const ALREADY_MIGRATED: u64 = 6;

    /// The bitmap stored at [`Self::V1_WITH_BITMAP`].
    pub const BITMAP: [u8; 2] = [0b1111_0000, 0b0000_0001];
}

/// A store with one of every kind of record, see [`MixedStoreHeights`].
pub fn mixed_store() -> MemoryStore {
    type H = MixedStoreHeights;

    let legacy = |height| KeyScheme::Legacy.key(height).into_bytes();
    let current = |height| KeyScheme::Current.key(height).into_bytes();

    let mut store = MemoryStore::new();
    let mut put = |key: Vec<u8>, value: Vec<u8>| store.put(&key, &value).unwrap();

    put(legacy(H::V1), header_v1(H::V1, LegacyLayout::Base).to_bytes());
    put(
        legacy(H::V1_WITH_BITMAP),
        header_v1(
            H::V1_WITH_BITMAP,
            LegacyLayout::WithBitmap(Some(H::BITMAP.to_vec())),
        )
        .to_bytes(),
    );
    put(legacy(H::GARBAGE), vec![0xde, 0xad, 0xbe, 0xef]);
    put(
        legacy(H::V2_UNDER_LEGACY_KEY),
        encode_v2(
            &header_v1(H::V2_UNDER_LEGACY_KEY, LegacyLayout::Base),
            &V2Defaults::default(),
        ),
    );

    let already = header_v1(H::ALREADY_MIGRATED, LegacyLayout::Base);
    put(legacy(H::ALREADY_MIGRATED), already.to_bytes());
    put(
        current(H::ALREADY_MIGRATED),
        encode_v2(&already, &V2Defaults::default()),
    );

    store
}

//---------------------------------------------------------------------------------------------------- Tests
#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::data::BLOCK_42_V1;

    #[test]
    fn block_42_matches_raw_record() {
        assert_eq!(block_42().to_bytes(), BLOCK_42_V1);
        assert_eq!(BlockHeaderV1::decode_exact(&BLOCK_42_V1).unwrap(), block_42());
    }

    #[test]
    fn mixed_store_keys() {
        let store = mixed_store();
        assert_eq!(store.len(), 6);
        assert!(!store
            .contains_key(KeyScheme::Legacy.key(MixedStoreHeights::MISSING).as_bytes())
            .unwrap());
    }
}
