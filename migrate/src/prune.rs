//! Deleting legacy keys that have been migrated.

use std::ops::RangeInclusive;

use tracing::{debug, info, warn};

use timecoin_kv::{KeyScheme, Store};
use timecoin_types::BlockHeaderV2;

use crate::{KeepReason, PruneOutcome, PruneReport};

/// Delete the legacy key of every height in `heights` that has a valid current record.
///
/// A legacy key is only deleted if the current key exists, decodes as
/// [`BlockHeaderV2`] and holds the same height. Never aborts.
pub fn prune_legacy<S: Store>(store: &mut S, heights: RangeInclusive<u64>) -> PruneReport {
    info!(
        start = heights.start(),
        end = heights.end(),
        "pruning legacy block records"
    );

    let mut report = PruneReport::new();

    for height in heights {
        let outcome = prune_one(store, height);

        match &outcome {
            PruneOutcome::Pruned | PruneOutcome::Kept(KeepReason::NoLegacyRecord) => {
                debug!(height, "{outcome}");
            }
            PruneOutcome::Kept(_) | PruneOutcome::Failed(_) => warn!(height, "{outcome}"),
        }

        report.record(height, outcome);
    }

    let counts = report.counts();
    info!(
        pruned = counts.done,
        kept = counts.skipped,
        failed = counts.failed,
        "pruning finished"
    );

    report
}

fn prune_one<S: Store>(store: &mut S, height: u64) -> PruneOutcome {
    let legacy_key = KeyScheme::Legacy.key(height);
    let current_key = KeyScheme::Current.key(height);

    match store.contains_key(legacy_key.as_bytes()) {
        Ok(true) => (),
        Ok(false) => return PruneOutcome::Kept(KeepReason::NoLegacyRecord),
        Err(e) => return PruneOutcome::Failed(format!("read `{legacy_key}`: {e}")),
    }

    let current = match store.get(current_key.as_bytes()) {
        Ok(Some(bytes)) => bytes,
        Ok(None) => return PruneOutcome::Kept(KeepReason::NotMigrated),
        Err(e) => return PruneOutcome::Failed(format!("read `{current_key}`: {e}")),
    };

    match BlockHeaderV2::decode_exact(&current) {
        Ok(v2) if v2.height == height => (),
        Ok(v2) => return PruneOutcome::Kept(KeepReason::HeightMismatch(v2.height)),
        Err(e) => return PruneOutcome::Kept(KeepReason::CurrentInvalid(e)),
    }

    match store.delete(legacy_key.as_bytes()) {
        Ok(_) => PruneOutcome::Pruned,
        Err(e) => PruneOutcome::Failed(format!("delete `{legacy_key}`: {e}")),
    }
}
