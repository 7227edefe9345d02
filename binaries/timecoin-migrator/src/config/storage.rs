use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use timecoin_helper::fs::default_block_store_dir;
use timecoin_kv::config::SyncMode;

use super::macros::config_struct;

config_struct! {
    /// The block store config.
    #[derive(Debug, Deserialize, Serialize, PartialEq, Eq)]
    #[serde(deny_unknown_fields, default)]
    pub(crate) struct StorageConfig {
        /// The directory of the block store.
        ///
        /// Overridden by `--db`.
        ///
        /// Type         | Path
        /// Examples     | "~/.local/share/timecoin/blockchain_storage"
        pub(crate) directory: PathBuf,

        #[comment_out = true]
        /// The sync mode of the block store.
        ///
        /// "safe" syncs every write to disk, which is much slower.
        /// "fast" leaves it to the OS and syncs once on exit.
        ///
        /// Valid values | "fast", "safe"
        pub(crate) sync_mode: SyncMode,
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            directory: default_block_store_dir(),
            sync_mode: SyncMode::default(),
        }
    }
}

impl StorageConfig {
    /// The [`timecoin_kv`] config.
    pub(crate) fn store_config(&self) -> timecoin_kv::config::Config {
        timecoin_kv::config::Config::new(self.directory.clone()).sync_mode(self.sync_mode)
    }
}
