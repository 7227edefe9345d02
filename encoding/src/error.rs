//! Codec errors.

/// Alias for a [`Result`](core::result::Result) with the codec [`Error`].
pub type Result<T> = core::result::Result<T, Error>;

/// Errors that can occur while decoding a record.
///
/// Encoding never fails, every writer in this crate emits a fixed
/// amount of bytes for a given value.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
#[expect(clippy::error_impl_error, reason = "the crate only has one error type")]
pub enum Error {
    /// The buffer ended before a field was complete.
    #[error("truncated input: needed {needed} bytes, {remaining} remaining")]
    TruncatedInput {
        /// Bytes the field required.
        needed: usize,
        /// Bytes left in the buffer.
        remaining: usize,
    },

    /// A string payload was not valid UTF-8.
    #[error("string payload is not valid utf8")]
    InvalidUtf8,

    /// An `Option` tag (or a varint tag) outside of the allowed set.
    #[error("invalid tag byte: {0}")]
    InvalidTag(u8),

    /// A `bool` byte that was neither `0` nor `1`.
    #[error("invalid bool byte: {0}")]
    InvalidBool(u8),

    /// A length prefix too large for this platform's `usize`.
    #[error("length prefix {0} does not fit in usize")]
    LengthOverflow(u64),

    /// Bytes were left over after a strict decode.
    #[error("{0} trailing bytes after record")]
    TrailingBytes(usize),
}

impl Error {
    /// Short, stable name of the error kind.
    ///
    /// Used as the reason prefix in migration reports.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::TruncatedInput { .. } => "truncated_input",
            Self::InvalidUtf8 => "invalid_utf8",
            Self::InvalidTag(_) => "invalid_tag",
            Self::InvalidBool(_) => "invalid_bool",
            Self::LengthOverflow(_) => "length_overflow",
            Self::TrailingBytes(_) => "trailing_bytes",
        }
    }
}

impl From<core::str::Utf8Error> for Error {
    fn from(_: core::str::Utf8Error) -> Self {
        Self::InvalidUtf8
    }
}

impl From<std::string::FromUtf8Error> for Error {
    fn from(_: std::string::FromUtf8Error) -> Self {
        Self::InvalidUtf8
    }
}
