//! Timecoin block header types.
//!
//! Both schemas a block header has been persisted in, and the transform
//! between them:
//!
//! - [`BlockHeaderV1`], the legacy schema, decoded with [`BlockHeaderV1::decode`]
//! - [`BlockHeaderV2`], the current schema, a field superset of V1
//! - [`encode_v2`], which re-serializes a V1 header in the V2 schema
//!
//! Wire encodings come from [`timecoin_encoding`], every type here implements
//! [`WireValue`](timecoin_encoding::WireValue).

//---------------------------------------------------------------------------------------------------- Public API
mod hash;
mod header_v1;
mod header_v2;
mod schema;
mod tiers;

pub use hash::Hash256;
pub use header_v1::{BlockHeaderV1, LegacyLayout};
pub use header_v2::{encode_v2, BlockHeaderV2, V2Defaults};
pub use schema::{DecodedHeader, SchemaError, SchemaVersion};
pub use tiers::MasternodeTierCounts;

//---------------------------------------------------------------------------------------------------- Private
#[cfg(test)]
use proptest as _;
