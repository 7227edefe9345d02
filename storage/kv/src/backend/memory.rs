//! An in-memory [`Store`].

//---------------------------------------------------------------------------------------------------- Import
use std::collections::BTreeMap;

use crate::{Store, StoreResult};

//---------------------------------------------------------------------------------------------------- MemoryStore
/// A [`Store`] backed by a [`BTreeMap`].
///
/// Never returns an error.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MemoryStore {
    map: BTreeMap<Vec<u8>, Vec<u8>>,
}

impl MemoryStore {
    /// An empty store.
    pub const fn new() -> Self {
        Self {
            map: BTreeMap::new(),
        }
    }

    /// Amount of keys in the store.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Returns `true` if the store holds no keys.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// All keys, in byte order.
    pub fn keys(&self) -> impl Iterator<Item = &[u8]> {
        self.map.keys().map(Vec::as_slice)
    }
}

impl<K, V> FromIterator<(K, V)> for MemoryStore
where
    K: Into<Vec<u8>>,
    V: Into<Vec<u8>>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            map: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl Store for MemoryStore {
    fn get(&self, key: &[u8]) -> StoreResult<Option<Vec<u8>>> {
        Ok(self.map.get(key).cloned())
    }

    fn put(&mut self, key: &[u8], value: &[u8]) -> StoreResult<()> {
        self.map.insert(key.to_vec(), value.to_vec());
        Ok(())
    }

    fn delete(&mut self, key: &[u8]) -> StoreResult<bool> {
        Ok(self.map.remove(key).is_some())
    }

    fn contains_key(&self, key: &[u8]) -> StoreResult<bool> {
        Ok(self.map.contains_key(key))
    }
}
