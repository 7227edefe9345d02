//! Timecoin testing utilities.
//!
//! - [`data`], block headers and their encoded records
//! - [`store`], stores for exercising the migration tooling

pub mod data;
pub mod store;
