//! [`RedbStore`](crate::RedbStore) configuration.

//---------------------------------------------------------------------------------------------------- Import
use std::path::{Path, PathBuf};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use timecoin_helper::fs::default_block_store_dir;

//---------------------------------------------------------------------------------------------------- Constants
/// The file name of the store inside [`Config::directory`].
pub const STORE_FILE_NAME: &str = "blocks.redb";

//---------------------------------------------------------------------------------------------------- SyncMode
/// Disk synchronization mode.
///
/// Regardless of the variant chosen, dropping the store will
/// always cause it to fully sync to disk.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SyncMode {
    /// Fully sync to disk on every write.
    ///
    /// Maps to [`redb::Durability::Immediate`].
    Safe,

    /// Leave syncing to the OS, only force a sync when the store is dropped.
    ///
    /// Maps to [`redb::Durability::Eventual`].
    #[default]
    Fast,
}

//---------------------------------------------------------------------------------------------------- Config
/// Where and how the persistent store is opened.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// The directory holding [`STORE_FILE_NAME`], created if missing.
    pub directory: PathBuf,
    pub sync_mode: SyncMode,
}

impl Config {
    /// A config with the default [`SyncMode`] that opens the store in `directory`.
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
            sync_mode: SyncMode::default(),
        }
    }

    /// Set the [`SyncMode`].
    #[must_use]
    pub const fn sync_mode(mut self, sync_mode: SyncMode) -> Self {
        self.sync_mode = sync_mode;
        self
    }

    /// The directory of the store.
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// The path of the store file.
    ///
    /// ```rust
    /// use timecoin_kv::config::{Config, STORE_FILE_NAME};
    ///
    /// let config = Config::new("/tmp/timecoin");
    /// assert_eq!(config.store_file(), std::path::Path::new("/tmp/timecoin").join(STORE_FILE_NAME));
    /// ```
    pub fn store_file(&self) -> PathBuf {
        self.directory.join(STORE_FILE_NAME)
    }
}

impl Default for Config {
    /// [`Config::new`] with [`default_block_store_dir`].
    fn default() -> Self {
        Self::new(default_block_store_dir())
    }
}
