//! Casting.
//!
//! This modules provides utilities for casting between types.
//!
//! `#[no_std]` compatible.
//!
//! # 64-bit invariant
//! Lengths in the record format are written as [`u64`], so widening
//! a [`usize`] is always lossless on the supported {32,64}-bit targets.

#[rustfmt::skip]
//============================ SAFETY: DO NOT REMOVE ===========================//
//                                                                              //
//                                                                              //
//                   Only allow building {32,64}-bit targets.                   //
//          This allows us to assume {32,64}-bit invariants in this file.       //
    #[cfg(not(any(target_pointer_width = "64", target_pointer_width = "32")))]
      compile_error!("This module is only compatible with {32,64}-bit CPUs");
//                                                                              //
//                                                                              //
//============================ SAFETY: DO NOT REMOVE ===========================//

/// Cast [`usize`] to [`u64`].
#[inline(always)]
pub const fn usize_to_u64(u: usize) -> u64 {
    u as u64
}

/// Cast [`u64`] to [`usize`], returning [`None`] if it does not fit.
///
/// This can only fail on 32-bit targets.
#[inline]
pub fn u64_to_usize_checked(u: u64) -> Option<usize> {
    usize::try_from(u).ok()
}

//---------------------------------------------------------------------------------------------------- Tests
#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn lossless_widening() {
        assert_eq!(usize_to_u64(0), 0);
        assert_eq!(usize_to_u64(usize::MAX), usize::MAX.try_into().unwrap());
        assert_eq!(u64_to_usize_checked(7), Some(7));
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn max_64bit() {
        assert_eq!(usize_to_u64(usize::MAX), u64::MAX);
        assert_eq!(u64_to_usize_checked(u64::MAX), Some(usize::MAX));
    }

    #[test]
    #[cfg(target_pointer_width = "32")]
    fn overflow_32bit() {
        assert_eq!(u64_to_usize_checked(u64::from(u32::MAX) + 1), None);
    }
}
