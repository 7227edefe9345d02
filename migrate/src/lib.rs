//! Migration of Timecoin block records.
//!
//! Block headers were stored as [`BlockHeaderV1`](timecoin_types::BlockHeaderV1)
//! under `block:<height>` keys. The current node reads
//! [`BlockHeaderV2`](timecoin_types::BlockHeaderV2) records from
//! `block_<height>` keys. This crate moves records from the former to the latter.
//!
//! | Operation          | Writes                | Result            |
//! |--------------------|-----------------------|-------------------|
//! | [`migrate_range`]  | current keys          | [`MigrationReport`] |
//! | [`prune_legacy`]   | deletes legacy keys   | [`PruneReport`]   |
//! | [`inspect`]        | -                     | one decoded header |
//! | [`probe`]          | -                     | both keys of a height, raw |
//!
//! Every operation is written against [`Store`](timecoin_kv::Store), a batch
//! never aborts and every height of it gets one outcome in the report.

//---------------------------------------------------------------------------------------------------- Public API
mod driver;
mod error;
mod inspect;
mod prune;
mod report;

pub use driver::{migrate_one, migrate_range, MigrateOptions};
pub use error::MigrateError;
pub use inspect::{inspect, probe, KeyProbe, RecordProbe, PROBE_PREVIEW_LEN};
pub use prune::prune_legacy;
pub use report::{
    Category, Counts, KeepReason, MigrationReport, Outcome, PruneOutcome, PruneReport, Report,
    SkipReason, Tally,
};

//---------------------------------------------------------------------------------------------------- Private
#[cfg(test)]
use timecoin_test_utils as _;
