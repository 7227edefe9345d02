//! The V1 -> V2 migration of a range of heights.

//---------------------------------------------------------------------------------------------------- Import
use std::ops::RangeInclusive;

use tracing::{debug, info, warn};

use timecoin_kv::{KeyScheme, Store};
use timecoin_types::{encode_v2, DecodedHeader, SchemaError, V2Defaults};

use crate::{MigrationReport, Outcome, SkipReason};

//---------------------------------------------------------------------------------------------------- MigrateOptions
/// Options of [`migrate_range`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MigrateOptions {
    /// Skip heights whose current key already exists.
    ///
    /// Off by default, re-running a migration then rewrites
    /// the same bytes under the current key.
    pub skip_existing: bool,

    /// Values of the fields the current schema adds.
    pub defaults: V2Defaults,
}

//---------------------------------------------------------------------------------------------------- Migration
/// Migrate every height in `heights`.
///
/// Never aborts: every height gets exactly one [`Outcome`] in the returned report.
/// Legacy keys are never modified.
///
/// ```rust
/// use timecoin_kv::{KeyScheme, MemoryStore, Store};
/// use timecoin_migrate::{migrate_range, MigrateOptions, Outcome, SkipReason};
///
/// let mut store = MemoryStore::new();
/// let report = migrate_range(&mut store, 1..=2, &MigrateOptions::default());
///
/// assert_eq!(report.get(1), Some(&Outcome::Skipped(SkipReason::KeyNotFound)));
/// assert_eq!(report.counts().skipped, 2);
/// ```
pub fn migrate_range<S: Store>(
    store: &mut S,
    heights: RangeInclusive<u64>,
    options: &MigrateOptions,
) -> MigrationReport {
    info!(
        start = heights.start(),
        end = heights.end(),
        skip_existing = options.skip_existing,
        "migrating block records"
    );

    let mut report = MigrationReport::new();

    for height in heights {
        let outcome = migrate_one(store, height, options);

        match &outcome {
            Outcome::Migrated { .. } | Outcome::Skipped(SkipReason::AlreadyMigrated) => {
                debug!(height, "{outcome}");
            }
            Outcome::Skipped(_) | Outcome::Failed(_) => warn!(height, "{outcome}"),
        }

        report.record(height, outcome);
    }

    let counts = report.counts();
    info!(
        migrated = counts.done,
        skipped = counts.skipped,
        failed = counts.failed,
        "migration finished"
    );

    report
}

/// Migrate the record at `height`.
pub fn migrate_one<S: Store>(store: &mut S, height: u64, options: &MigrateOptions) -> Outcome {
    let legacy_key = KeyScheme::Legacy.key(height);
    let current_key = KeyScheme::Current.key(height);

    if options.skip_existing {
        match store.contains_key(current_key.as_bytes()) {
            Ok(true) => return Outcome::Skipped(SkipReason::AlreadyMigrated),
            Ok(false) => (),
            Err(e) => return Outcome::Failed(format!("read `{current_key}`: {e}")),
        }
    }

    let old = match store.get(legacy_key.as_bytes()) {
        Ok(Some(bytes)) => bytes,
        Ok(None) => return Outcome::Skipped(SkipReason::KeyNotFound),
        Err(e) => return Outcome::Failed(format!("read `{legacy_key}`: {e}")),
    };

    let record = match DecodedHeader::decode_legacy_record(&old) {
        Ok(record) => record,
        Err(SchemaError::Decode(e)) => return Outcome::Skipped(SkipReason::DecodeError(e)),
        Err(SchemaError::Ambiguous) => return Outcome::Skipped(SkipReason::AmbiguousSchema),
    };

    let from = record.schema();
    if record.height() != height {
        warn!(height, found = record.height(), "record height does not match its key");
    }

    let old_len = old.len();
    let new = match record {
        DecodedHeader::V1(v1) => encode_v2(&v1, &options.defaults),
        // Already in the current schema, copied as is.
        DecodedHeader::V2(_) => old,
    };

    if let Err(e) = store.put(current_key.as_bytes(), &new) {
        return Outcome::Failed(format!("write `{current_key}`: {e}"));
    }

    Outcome::Migrated {
        from,
        old_len,
        new_len: new.len(),
    }
}
