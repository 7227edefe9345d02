//! [`MigrateError`].

use timecoin_kv::{KeyScheme, StoreError};
use timecoin_types::SchemaError;

/// Errors returned by [`inspect`](crate::inspect).
///
/// [`migrate_range`](crate::migrate_range) and
/// [`prune_legacy`](crate::prune_legacy) never return these, every
/// failure there is recorded in the report instead.
#[derive(thiserror::Error, Debug)]
pub enum MigrateError {
    /// The store failed, or the key does not exist ([`StoreError::KeyNotFound`]).
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// The record exists but does not decode into a single schema.
    #[error("`{key}` does not hold a valid {scheme} record: {source}")]
    Decode {
        key: String,
        scheme: KeyScheme,
        #[source]
        source: SchemaError,
    },
}
