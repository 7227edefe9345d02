//! Block height -> key mapping.

//---------------------------------------------------------------------------------------------------- Import
use std::{fmt, str::FromStr};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

//---------------------------------------------------------------------------------------------------- KeyScheme
/// How a block height is turned into a store key.
///
/// Both schemes render the height in decimal without leading zeros.
///
/// ```rust
/// use timecoin_kv::KeyScheme;
///
/// assert_eq!(KeyScheme::Legacy.key(0), "block:0");
/// assert_eq!(KeyScheme::Current.key(1_000), "block_1000");
/// assert_eq!("current".parse(), Ok(KeyScheme::Current));
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum KeyScheme {
    /// `block:<height>`, written by the legacy node.
    Legacy,
    /// `block_<height>`, written by the current node and the migration.
    Current,
}

impl KeyScheme {
    /// Both schemes, legacy first.
    pub const ALL: [Self; 2] = [Self::Legacy, Self::Current];

    /// The character between `block` and the height.
    pub const fn separator(self) -> char {
        match self {
            Self::Legacy => ':',
            Self::Current => '_',
        }
    }

    /// The key of the block at `height`.
    pub fn key(self, height: u64) -> String {
        format!("block{}{height}", self.separator())
    }

    /// The name used in config files and on the command line.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Legacy => "legacy",
            Self::Current => "current",
        }
    }
}

impl fmt::Display for KeyScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned by [`KeyScheme::from_str`] for anything but `legacy`/`current`.
#[derive(thiserror::Error, Clone, Debug, PartialEq, Eq)]
#[error("unknown key scheme `{0}`, expected `legacy` or `current`")]
pub struct UnknownKeyScheme(pub String);

impl FromStr for KeyScheme {
    type Err = UnknownKeyScheme;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|scheme| scheme.as_str() == s)
            .ok_or_else(|| UnknownKeyScheme(s.to_owned()))
    }
}
