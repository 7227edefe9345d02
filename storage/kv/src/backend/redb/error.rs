//! Conversion from `redb`'s errors -> [`StoreError`].
//!
//! `redb`'s errors are `#[non_exhaustive]`, anything without
//! a matching [`StoreError`] variant becomes [`StoreError::Unknown`].

//---------------------------------------------------------------------------------------------------- Import
use crate::StoreError;

//---------------------------------------------------------------------------------------------------- From
impl From<redb::DatabaseError> for StoreError {
    /// Created by `redb` in:
    /// - [`redb::Builder::create_file`]
    /// - [`redb::Builder::create_with_backend`]
    /// - [`redb::Database::check_integrity`]
    fn from(error: redb::DatabaseError) -> Self {
        use redb::DatabaseError as E;

        match error {
            E::RepairAborted => Self::Corrupt,
            E::Storage(error) => error.into(),
            _ => Self::Unknown(Box::new(error)),
        }
    }
}

impl From<redb::StorageError> for StoreError {
    /// Created by `redb` in:
    /// - [`redb::Table`] functions
    /// - [`redb::ReadOnlyTable`] functions
    fn from(error: redb::StorageError) -> Self {
        use redb::StorageError as E;

        match error {
            E::Io(e) => Self::Io(e),
            E::Corrupted(_) => Self::Corrupt,
            _ => Self::Unknown(Box::new(error)),
        }
    }
}

impl From<redb::TransactionError> for StoreError {
    /// Created by `redb` in:
    /// - [`redb::Database::begin_write`]
    /// - [`redb::Database::begin_read`]
    fn from(error: redb::TransactionError) -> Self {
        match error {
            redb::TransactionError::Storage(error) => error.into(),
            _ => Self::Unknown(Box::new(error)),
        }
    }
}

impl From<redb::TableError> for StoreError {
    /// Created by `redb` in:
    /// - [`redb::WriteTransaction::open_table`]
    /// - [`redb::ReadTransaction::open_table`]
    fn from(error: redb::TableError) -> Self {
        match error {
            redb::TableError::Storage(error) => error.into(),
            _ => Self::Unknown(Box::new(error)),
        }
    }
}

impl From<redb::CommitError> for StoreError {
    /// Created by `redb` in:
    /// - [`redb::WriteTransaction::commit`]
    fn from(error: redb::CommitError) -> Self {
        match error {
            redb::CommitError::Storage(error) => error.into(),
            _ => Self::Unknown(Box::new(error)),
        }
    }
}
