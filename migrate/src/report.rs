//! Per-height outcomes of a batch.

//---------------------------------------------------------------------------------------------------- Import
use std::{collections::BTreeMap, fmt};

use serde::Serialize;

use timecoin_types::SchemaVersion;

//---------------------------------------------------------------------------------------------------- Report
/// What happened to each height of a batch, ordered by height.
///
/// Serializes as `{"outcomes": {"<height>": <outcome>, ..}}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Report<O> {
    pub outcomes: BTreeMap<u64, O>,
}

/// The report of [`migrate_range`](crate::migrate_range).
pub type MigrationReport = Report<Outcome>;

/// The report of [`prune_legacy`](crate::prune_legacy).
pub type PruneReport = Report<PruneOutcome>;

impl<O> Report<O> {
    /// An empty report.
    pub const fn new() -> Self {
        Self {
            outcomes: BTreeMap::new(),
        }
    }

    /// Record the outcome of `height`, replacing any earlier one.
    pub fn record(&mut self, height: u64, outcome: O) {
        self.outcomes.insert(height, outcome);
    }

    /// The outcome of `height`, if it was part of the batch.
    pub fn get(&self, height: u64) -> Option<&O> {
        self.outcomes.get(&height)
    }

    /// Amount of heights in the report.
    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    /// Returns `true` if the batch was empty.
    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }
}

impl<O: Tally> Report<O> {
    /// Outcomes per [`Category`].
    pub fn counts(&self) -> Counts {
        let mut counts = Counts::default();

        for outcome in self.outcomes.values() {
            match outcome.category() {
                Category::Done => counts.done += 1,
                Category::Skipped => counts.skipped += 1,
                Category::Failed => counts.failed += 1,
            }
        }

        counts
    }
}

impl<O> Default for Report<O> {
    fn default() -> Self {
        Self::new()
    }
}

//---------------------------------------------------------------------------------------------------- Counts
/// Coarse outcome of a single height.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    /// The operation did its work.
    Done,
    /// Nothing was done, on purpose.
    Skipped,
    /// The store failed.
    Failed,
}

/// An outcome that falls in a [`Category`].
pub trait Tally {
    fn category(&self) -> Category;
}

/// Amount of outcomes per [`Category`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Counts {
    pub done: usize,
    pub skipped: usize,
    pub failed: usize,
}

//---------------------------------------------------------------------------------------------------- Outcome
/// The outcome of migrating a single height.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// The current key now holds the record in the current schema.
    Migrated {
        /// The schema found under the legacy key.
        from: SchemaVersion,
        old_len: usize,
        new_len: usize,
    },
    Skipped(SkipReason),
    /// The store failed while reading or writing the record.
    Failed(String),
}

impl Tally for Outcome {
    fn category(&self) -> Category {
        match self {
            Self::Migrated { .. } => Category::Done,
            Self::Skipped(_) => Category::Skipped,
            Self::Failed(_) => Category::Failed,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Migrated {
                from,
                old_len,
                new_len,
            } => write!(f, "migrated from {from} ({old_len} -> {new_len} bytes)"),
            Self::Skipped(reason) => write!(f, "skipped: {reason}"),
            Self::Failed(reason) => write!(f, "failed: {reason}"),
        }
    }
}

/// Why a height was not migrated.
///
/// Serializes as its [`Display`](fmt::Display) string.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(into = "String")]
pub enum SkipReason {
    /// The current key already existed.
    AlreadyMigrated,
    /// The legacy key does not exist.
    KeyNotFound,
    /// The legacy record decodes in neither schema.
    DecodeError(timecoin_encoding::Error),
    /// The legacy record decodes as both V1 with a bitmap and V2.
    AmbiguousSchema,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AlreadyMigrated => f.write_str("already_migrated"),
            Self::KeyNotFound => f.write_str("key_not_found"),
            Self::DecodeError(e) => write!(f, "decode_error: {e}"),
            Self::AmbiguousSchema => f.write_str("ambiguous_schema"),
        }
    }
}

impl From<SkipReason> for String {
    fn from(reason: SkipReason) -> Self {
        reason.to_string()
    }
}

//---------------------------------------------------------------------------------------------------- PruneOutcome
/// The outcome of pruning a single legacy key.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PruneOutcome {
    /// The legacy key was deleted.
    Pruned,
    Kept(KeepReason),
    /// The store failed.
    Failed(String),
}

impl Tally for PruneOutcome {
    fn category(&self) -> Category {
        match self {
            Self::Pruned => Category::Done,
            Self::Kept(_) => Category::Skipped,
            Self::Failed(_) => Category::Failed,
        }
    }
}

impl fmt::Display for PruneOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pruned => f.write_str("pruned"),
            Self::Kept(reason) => write!(f, "kept: {reason}"),
            Self::Failed(reason) => write!(f, "failed: {reason}"),
        }
    }
}

/// Why a legacy key was not deleted.
///
/// Serializes as its [`Display`](fmt::Display) string.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(into = "String")]
pub enum KeepReason {
    /// There is no legacy key to delete.
    NoLegacyRecord,
    /// The current key does not exist.
    NotMigrated,
    /// The current key exists but does not hold a valid current record.
    CurrentInvalid(timecoin_encoding::Error),
    /// The current record is for another height.
    HeightMismatch(u64),
}

impl fmt::Display for KeepReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoLegacyRecord => f.write_str("no_legacy_record"),
            Self::NotMigrated => f.write_str("not_migrated"),
            Self::CurrentInvalid(e) => write!(f, "current_invalid: {e}"),
            Self::HeightMismatch(found) => write!(f, "height_mismatch: {found}"),
        }
    }
}

impl From<KeepReason> for String {
    fn from(reason: KeepReason) -> Self {
        reason.to_string()
    }
}
