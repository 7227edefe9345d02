//! Testing data.

mod constants;
pub use constants::BLOCK_42_V1;

mod free;
pub use free::{block_42, header_v1, mixed_store, MixedStoreHeights};
