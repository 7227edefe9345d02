use bytes::Buf;

use crate::error::{Error, Result};

/// Read from `r` with `f` if at least `size` bytes remain.
///
/// # Errors
/// Returns [`Error::TruncatedInput`] without consuming anything when
/// fewer than `size` bytes are left.
#[inline]
pub(crate) fn checked_read<B: Buf, R>(
    r: &mut B,
    f: impl FnOnce(&mut B) -> R,
    size: usize,
) -> Result<R> {
    let remaining = r.remaining();
    if remaining < size {
        return Err(Error::TruncatedInput {
            needed: size,
            remaining,
        });
    }

    Ok(f(r))
}

/// Same as [`checked_read`] for single primitive gets, e.g. [`Buf::get_u64_le`].
#[inline]
pub(crate) fn checked_read_primitive<B: Buf, R: Sized>(
    r: &mut B,
    f: impl FnOnce(&mut B) -> R,
) -> Result<R> {
    checked_read(r, f, size_of::<R>())
}
