//! `timecoin-migrator` config.
use std::{
    fs::read_to_string,
    path::{Path, PathBuf},
    str::FromStr,
};

use anyhow::Context;
use clap::Parser;
use serde::{Deserialize, Serialize};

use timecoin_helper::fs::{timecoin_config_dir, DEFAULT_CONFIG_FILE_NAME};

use crate::constants::CONFIG_HEADER;

mod args;
mod macros;
mod migrate;
mod storage;
mod tracing_config;

pub(crate) use args::Command;
use args::Args;
use macros::config_struct;
use migrate::MigrateConfig;
use storage::StorageConfig;
pub(crate) use tracing_config::TracingConfig;

/// What [`read_config_and_args`] found.
pub(crate) enum Setup {
    /// A quick request was completed, nothing left to do.
    Done,
    Run {
        command: Command,
        config: Config,
        /// The config file that was read, [`None`] if the default config is used.
        config_file: Option<PathBuf>,
    },
}

/// Reads the args & config file.
///
/// # Errors
/// If `--config-file` was given and cannot be read or parsed.
/// A config file found in one of the default locations that cannot be
/// parsed is an error too, a missing one is not.
pub(crate) fn read_config_and_args() -> anyhow::Result<Setup> {
    let mut args = Args::parse();
    if args.do_quick_requests()? {
        return Ok(Setup::Done);
    }
    let command = args.take_command();

    let (config, config_file) = if let Some(config_file) = &args.config_file {
        (
            Config::read_from_path(config_file)?,
            Some(config_file.clone()),
        )
    } else {
        // First the current directory, then the main config directory.
        let candidates = std::env::current_dir()
            .ok()
            .into_iter()
            .chain(timecoin_config_dir().map(Path::to_path_buf))
            .map(|dir| dir.join(DEFAULT_CONFIG_FILE_NAME));

        let mut found = (Config::default(), None);
        for file in candidates {
            if file.is_file() {
                found = (Config::read_from_path(&file)?, Some(file));
                break;
            }
        }
        found
    };

    Ok(Setup::Run {
        command,
        config: args.apply_args(config),
        config_file,
    })
}

config_struct! {
    /// The config for `timecoin-migrator`.
    #[derive(Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
    #[serde(deny_unknown_fields, default)]
    pub(crate) struct Config {
        #[child = true]
        /// Configuration for logging, [`tracing`].
        pub(crate) tracing: TracingConfig,

        #[child = true]
        /// Configuration for the block store.
        pub(crate) storage: StorageConfig,

        #[child = true]
        /// Configuration for the `migrate` command.
        pub(crate) migrate: MigrateConfig,
    }
}

impl Config {
    /// Returns a default [`Config`], with doc comments.
    pub(crate) fn documented_config() -> anyhow::Result<String> {
        let str = toml::ser::to_string_pretty(&Self::default())?;
        let mut doc = toml_edit::DocumentMut::from_str(&str)?;
        Self::write_docs(doc.as_table_mut());
        Ok(format!("{CONFIG_HEADER}{doc}"))
    }

    /// Attempts to read a config file in [`toml`] format from the given [`Path`].
    ///
    /// # Errors
    /// If the file cannot be read or is not a valid [`toml`] config.
    pub(crate) fn read_from_path(file: impl AsRef<Path>) -> anyhow::Result<Self> {
        let file = file.as_ref();

        let file_text = read_to_string(file)
            .with_context(|| format!("failed to read config file {}", file.display()))?;

        toml::from_str(&file_text)
            .with_context(|| format!("failed to parse config file {}", file.display()))
    }
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;
    use toml::from_str;
    use tracing::level_filters::LevelFilter;

    use timecoin_kv::config::SyncMode;

    use super::*;

    #[test]
    fn documented_config() {
        let str = Config::documented_config().unwrap();
        let conf: Config = from_str(&str).unwrap();

        assert_eq!(conf, Config::default());
        assert!(str.starts_with(CONFIG_HEADER));
        assert!(str.contains("## The sync mode of the block store."));
        assert!(str.contains("#sync_mode = \"fast\""));
    }

    #[test]
    fn read_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join(DEFAULT_CONFIG_FILE_NAME);
        std::fs::write(
            &file,
            r#"
            [storage]
            directory = "/srv/timecoin"
            sync_mode = "safe"

            [tracing.stdout]
            level = "warn"

            [migrate]
            skip_existing = true
            "#,
        )
        .unwrap();

        let config = Config::read_from_path(&file).unwrap();
        assert_eq!(config.storage.directory, Path::new("/srv/timecoin"));
        assert_eq!(config.storage.sync_mode, SyncMode::Safe);
        assert_eq!(config.tracing.stdout.level, LevelFilter::WARN);
        assert_eq!(config.tracing.file, Config::default().tracing.file);
        assert!(config.migrate.skip_existing);
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join(DEFAULT_CONFIG_FILE_NAME);
        std::fs::write(&file, "[storage]\nreader_threads = 4\n").unwrap();

        let error = Config::read_from_path(&file).unwrap_err();
        assert!(format!("{error:#}").contains("reader_threads"), "{error:#}");
    }

    #[test]
    fn missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(Config::read_from_path(dir.path().join("nope.toml")).is_err());
    }
}
