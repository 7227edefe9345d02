//! Helper functions used around the Timecoin tooling.
//!
//! Every module is behind a feature of the same name, all off by default.
#![cfg_attr(not(feature = "std"), no_std)]

//---------------------------------------------------------------------------------------------------- Public API
#[cfg(feature = "cast")]
pub mod cast;

#[cfg(feature = "fmt")]
pub mod fmt;

#[cfg(feature = "fs")]
pub mod fs;

//----------------------------------------------------------------------------------------------------
