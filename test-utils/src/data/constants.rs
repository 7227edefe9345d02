//! Raw records.

use hex_literal::hex;

/// The legacy record of block 42, no bitmap.
///
/// The record [`block_42`](crate::data::block_42) encodes to.
pub const BLOCK_42_V1: [u8; 179] = hex!(
    "01000000"                                                         // version
    "2a00000000000000"                                                 // height
    "00f1536500000000"                                                 // timestamp
    "0000000000000000000000000000000000000000000000000000000000000000" // previous_hash
    "1111111111111111111111111111111111111111111111111111111111111111" // merkle_root
    "06" "6e6f64652d41"                                                // leader
    "e803000000000000"                                                 // block_reward
    "2222222222222222222222222222222222222222222222222222222222222222" // vrf_output
    "d20a3f4eeee073c3f60fe98e01000000"                                 // vrf_score
    "3333333333333333333333333333333333333333333333333333333333333333" // attestation_root
);
