//! Store error types.

//---------------------------------------------------------------------------------------------------- Types
/// Alias for a thread-safe boxed error.
type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// [`Result`] with [`StoreError`] as the error.
pub type StoreResult<T> = Result<T, StoreError>;

//---------------------------------------------------------------------------------------------------- StoreError
/// Errors a [`Store`](crate::Store) can return.
///
/// A missing key is not an error for [`Store::get`](crate::Store::get),
/// it returns `Ok(None)`. [`StoreError::KeyNotFound`] is for callers that
/// require a key to exist.
#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    /// The given key did not exist in the store.
    #[error("key/value pair was not found")]
    KeyNotFound,

    /// I/O error.
    #[error("store I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The store file exists but is corrupt.
    #[error("store file is corrupt")]
    Corrupt,

    /// An error from the backend that has no variant of its own.
    #[error("unknown error: {0}")]
    Unknown(BoxError),
}
