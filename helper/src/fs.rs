//! Timecoin directories and filenames.

//---------------------------------------------------------------------------------------------------- Use
use std::{
    path::{Path, PathBuf},
    sync::OnceLock,
};

//---------------------------------------------------------------------------------------------------- Const
/// Timecoin's main directory name.
///
/// This is `Timecoin` on `Windows|macOS` and `timecoin` on everything else.
pub const TIMECOIN_DIR: &str = {
    if cfg!(target_os = "windows") || cfg!(target_os = "macos") {
        // The standard for main directories is capitalized.
        "Timecoin"
    } else {
        // Standard on Linux + BSDs is lowercase.
        "timecoin"
    }
};

/// The default name of the migrator's config file.
pub const DEFAULT_CONFIG_FILE_NAME: &str = "timecoin-migrator.toml";

/// The name of the directory holding the block store, inside [`timecoin_data_dir`].
pub const BLOCK_STORE_DIR: &str = "blockchain_storage";

/// The name of the directory holding log files, inside [`timecoin_data_dir`].
pub const LOGS_DIR: &str = "logs";

//---------------------------------------------------------------------------------------------------- Directories
/// Create a (private) `OnceLock` and accessor function for common PATHs.
macro_rules! impl_dir_oncelock_and_fn {
    ($(
        $(#[$attr:meta])* // Documentation and any `derive`'s.
        $fn:ident,        // Name of the corresponding access function.
        $dirs_fn:ident,   // Name of the `dirs` function to use, the PATH prefix.
        $once_lock:ident  // Name of the `OnceLock`.
    ),* $(,)?) => {$(
        /// Local `OnceLock` containing the Path.
        static $once_lock: OnceLock<Option<PathBuf>> = OnceLock::new();

        $(#[$attr])*
        ///
        /// Returns [`None`] if the OS directory could not be found,
        /// or if it is the filesystem root.
        pub fn $fn() -> Option<&'static Path> {
            $once_lock
                .get_or_init(|| {
                    let mut path = dirs::$dirs_fn()?;

                    // Refuse to build paths directly under `/`.
                    path.parent()?;

                    path.push(TIMECOIN_DIR);
                    Some(path)
                })
                .as_deref()
        }
    )*};
}

impl_dir_oncelock_and_fn! {
    /// Timecoin's config directory.
    ///
    /// | OS      | PATH                                                 |
    /// |---------|------------------------------------------------------|
    /// | Windows | `C:\Users\Alice\AppData\Roaming\Timecoin\`           |
    /// | macOS   | `/Users/Alice/Library/Application Support/Timecoin/` |
    /// | Linux   | `/home/alice/.config/timecoin/`                      |
    timecoin_config_dir,
    config_dir,
    TIMECOIN_CONFIG_DIR,

    /// Timecoin's data directory.
    ///
    /// | OS      | PATH                                                 |
    /// |---------|------------------------------------------------------|
    /// | Windows | `C:\Users\Alice\AppData\Roaming\Timecoin\`           |
    /// | macOS   | `/Users/Alice/Library/Application Support/Timecoin/` |
    /// | Linux   | `/home/alice/.local/share/timecoin/`                 |
    timecoin_data_dir,
    data_dir,
    TIMECOIN_DATA_DIR,
}

/// The default block store directory, `<data dir>/blockchain_storage`.
///
/// Falls back to a relative `blockchain_storage` when the data directory is unknown.
pub fn default_block_store_dir() -> PathBuf {
    in_data_dir(BLOCK_STORE_DIR)
}

/// The default log file directory, `<data dir>/logs`.
pub fn default_logs_dir() -> PathBuf {
    in_data_dir(LOGS_DIR)
}

fn in_data_dir(name: &str) -> PathBuf {
    timecoin_data_dir().map_or_else(|| PathBuf::from(name), |dir| dir.join(name))
}
