//! The [`Store`] trait.

use crate::StoreResult;

/// A byte-keyed, byte-valued store of block records.
///
/// Writes take `&mut self`, a store has at most one writer at a time.
pub trait Store {
    /// Get the value stored under `key`.
    ///
    /// Returns `Ok(None)` if the key does not exist.
    fn get(&self, key: &[u8]) -> StoreResult<Option<Vec<u8>>>;

    /// Insert `value` under `key`, overwriting any previous value.
    fn put(&mut self, key: &[u8], value: &[u8]) -> StoreResult<()>;

    /// Remove `key`.
    ///
    /// Returns `true` if the key existed.
    fn delete(&mut self, key: &[u8]) -> StoreResult<bool>;

    /// Returns `true` if `key` exists.
    fn contains_key(&self, key: &[u8]) -> StoreResult<bool> {
        Ok(self.get(key)?.is_some())
    }
}
