//! Stores that misbehave on purpose.

//---------------------------------------------------------------------------------------------------- Import
use std::{collections::BTreeSet, io};

use timecoin_kv::{Store, StoreError, StoreResult};

//---------------------------------------------------------------------------------------------------- FaultyStore
/// Wraps a [`Store`] and fails reads or writes of chosen keys with [`StoreError::Io`].
///
/// ```rust
/// use timecoin_kv::{MemoryStore, Store, StoreError};
/// use timecoin_test_utils::store::FaultyStore;
///
/// let mut store = FaultyStore::new(MemoryStore::new()).fail_writes_to(b"block_1");
/// assert!(matches!(store.put(b"block_1", &[]), Err(StoreError::Io(_))));
/// store.put(b"block_2", &[]).unwrap();
/// ```
#[derive(Clone, Debug, Default)]
pub struct FaultyStore<S> {
    inner: S,
    fail_reads: BTreeSet<Vec<u8>>,
    fail_writes: BTreeSet<Vec<u8>>,
}

impl<S: Store> FaultyStore<S> {
    /// Wrap `inner`, failing nothing yet.
    pub const fn new(inner: S) -> Self {
        Self {
            inner,
            fail_reads: BTreeSet::new(),
            fail_writes: BTreeSet::new(),
        }
    }

    /// Fail every [`Store::get`] and [`Store::contains_key`] of `key`.
    #[must_use]
    pub fn fail_reads_of(mut self, key: impl Into<Vec<u8>>) -> Self {
        self.fail_reads.insert(key.into());
        self
    }

    /// Fail every [`Store::put`] and [`Store::delete`] of `key`.
    #[must_use]
    pub fn fail_writes_to(mut self, key: impl Into<Vec<u8>>) -> Self {
        self.fail_writes.insert(key.into());
        self
    }

    /// The wrapped store.
    pub const fn inner(&self) -> &S {
        &self.inner
    }

    fn check(set: &BTreeSet<Vec<u8>>, key: &[u8]) -> StoreResult<()> {
        if set.contains(key) {
            Err(StoreError::Io(io::Error::other(format!(
                "injected failure for `{}`",
                String::from_utf8_lossy(key)
            ))))
        } else {
            Ok(())
        }
    }
}

impl<S: Store> Store for FaultyStore<S> {
    fn get(&self, key: &[u8]) -> StoreResult<Option<Vec<u8>>> {
        Self::check(&self.fail_reads, key)?;
        self.inner.get(key)
    }

    fn put(&mut self, key: &[u8], value: &[u8]) -> StoreResult<()> {
        Self::check(&self.fail_writes, key)?;
        self.inner.put(key, value)
    }

    fn delete(&mut self, key: &[u8]) -> StoreResult<bool> {
        Self::check(&self.fail_writes, key)?;
        self.inner.delete(key)
    }

    fn contains_key(&self, key: &[u8]) -> StoreResult<bool> {
        Self::check(&self.fail_reads, key)?;
        self.inner.contains_key(key)
    }
}
