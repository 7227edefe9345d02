use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::level_filters::LevelFilter;

use timecoin_helper::fs::default_logs_dir;

use super::macros::config_struct;

config_struct! {
    /// [`tracing`] config.
    #[derive(Debug, Default, Deserialize, Serialize, Eq, PartialEq)]
    #[serde(deny_unknown_fields, default)]
    pub(crate) struct TracingConfig {
        #[child = true]
        /// Configuration for logging to the terminal (stderr).
        pub(crate) stdout: StdoutTracingConfig,

        #[child = true]
        /// Configuration for logging to daily rotated files.
        pub(crate) file: FileTracingConfig,
    }
}

config_struct! {
    #[derive(Debug, Deserialize, Serialize, Eq, PartialEq)]
    #[serde(deny_unknown_fields, default)]
    pub(crate) struct StdoutTracingConfig {
        /// The minimum log level for the terminal.
        ///
        /// "error" is the highest level only showing errors,
        /// "trace" is the lowest showing every record.
        ///
        /// Type         | Level
        /// Valid values | "off", "error", "warn", "info", "debug", "trace"
        ##[serde(with = "level_filter_serde")]
        pub(crate) level: LevelFilter,
    }
}

impl Default for StdoutTracingConfig {
    fn default() -> Self {
        Self {
            level: LevelFilter::INFO,
        }
    }
}

config_struct! {
    #[derive(Debug, Deserialize, Serialize, Eq, PartialEq)]
    #[serde(deny_unknown_fields, default)]
    pub(crate) struct FileTracingConfig {
        /// The minimum log level for log files.
        ///
        /// "off" disables file logging.
        ///
        /// Type         | Level
        /// Valid values | "off", "error", "warn", "info", "debug", "trace"
        ##[serde(with = "level_filter_serde")]
        pub(crate) level: LevelFilter,

        #[comment_out = true]
        /// The directory log files are written to.
        ///
        /// Type         | Path
        /// Examples     | "/var/log/timecoin", "logs"
        pub(crate) directory: PathBuf,

        /// The maximum amount of log files to keep.
        ///
        /// Once this number is passed the oldest file will be deleted.
        ///
        /// Type         | Number
        /// Valid values | >= 1
        /// Examples     | 1, 7, 200
        pub(crate) max_log_files: usize,
    }
}

impl Default for FileTracingConfig {
    fn default() -> Self {
        Self {
            level: LevelFilter::OFF,
            directory: default_logs_dir(),
            max_log_files: 7,
        }
    }
}

mod level_filter_serde {
    use std::str::FromStr;

    use serde::{Deserialize, Deserializer, Serializer};
    use tracing::level_filters::LevelFilter;

    #[expect(clippy::trivially_copy_pass_by_ref, reason = "serde")]
    pub(super) fn serialize<S>(level_filter: &LevelFilter, s: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        s.serialize_str(&level_filter.to_string())
    }

    pub(super) fn deserialize<'de, D>(d: D) -> Result<LevelFilter, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(d)?;
        LevelFilter::from_str(&s).map_err(serde::de::Error::custom)
    }
}
