//! Timecoin block record storage.
//!
//! A minimal key-value abstraction over the block records:
//!
//! - [`Store`], the interface the migration tooling is written against
//! - [`MemoryStore`], a `BTreeMap` backed store for tests and fixtures
//! - [`RedbStore`], the persistent store, backed by [`redb`] (`redb` feature)
//! - [`KeyScheme`], how a block height maps to a key
//!
//! Keys and values are raw bytes, the store never looks inside a record.
//!
//! # Example
//! ```rust
//! use timecoin_kv::{KeyScheme, MemoryStore, Store};
//!
//! # fn main() -> Result<(), timecoin_kv::StoreError> {
//! let mut store = MemoryStore::new();
//! let key = KeyScheme::Legacy.key(42);
//! assert_eq!(key, "block:42");
//!
//! store.put(key.as_bytes(), b"record")?;
//! assert_eq!(store.get(key.as_bytes())?.as_deref(), Some(b"record".as_slice()));
//! assert!(store.delete(key.as_bytes())?);
//! assert!(!store.contains_key(key.as_bytes())?);
//! # Ok(()) }
//! ```

//---------------------------------------------------------------------------------------------------- Public API
mod backend;
pub use backend::MemoryStore;
#[cfg(feature = "redb")]
pub use backend::RedbStore;

pub mod config;

mod error;
pub use error::{StoreError, StoreResult};

mod key;
pub use key::{KeyScheme, UnknownKeyScheme};

mod store;
pub use store::Store;

//---------------------------------------------------------------------------------------------------- Private
#[cfg(test)]
use tempfile as _;
