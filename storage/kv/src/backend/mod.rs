//! [`Store`](crate::Store) implementations.

mod memory;
pub use memory::MemoryStore;

#[cfg(feature = "redb")]
mod redb;
#[cfg(feature = "redb")]
pub use redb::RedbStore;
