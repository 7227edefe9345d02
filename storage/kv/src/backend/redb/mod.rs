//! [`RedbStore`], the persistent store.

mod error;
mod store;

pub use store::RedbStore;
