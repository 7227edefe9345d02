use std::path::PathBuf;

use clap::{CommandFactory, Parser, Subcommand};
use tracing::level_filters::LevelFilter;

use timecoin_kv::KeyScheme;

use crate::config::Config;

/// Inspect, migrate and prune Timecoin block records.
#[derive(Parser, Debug)]
#[command(version, about)]
pub(crate) struct Args {
    /// The directory of the block store.
    #[arg(long, global = true)]
    pub(crate) db: Option<PathBuf>,
    /// The PATH of the `timecoin-migrator` config file.
    #[arg(long, global = true)]
    pub(crate) config_file: Option<PathBuf>,
    /// The minimum log level shown in the terminal.
    #[arg(long, global = true)]
    pub(crate) log_level: Option<LevelFilter>,
    /// Generate a config file and print it to stdout.
    #[arg(long)]
    pub(crate) generate_config: bool,

    #[command(subcommand)]
    pub(crate) command: Option<Command>,
}

/// A `timecoin-migrator` command.
#[derive(Subcommand, Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Command {
    /// Decode and print the block header at a height.
    Inspect {
        height: u64,
        /// The key to read, `block:<height>` (legacy) or `block_<height>` (current).
        #[arg(long, default_value_t = KeyScheme::Legacy)]
        scheme: KeyScheme,
        /// Print JSON instead of text.
        #[arg(long)]
        json: bool,
    },

    /// Migrate legacy records to the current schema.
    ///
    /// Migrates every height in START..=END, END defaults to START.
    /// Legacy records are left in place, see `prune-legacy`.
    Migrate {
        start: u64,
        end: Option<u64>,
        /// Skip heights that already have a record under the current key.
        #[arg(long)]
        skip_existing: bool,
        /// Print the report as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Show the raw records stored under both keys of a height.
    Probe {
        height: u64,
        /// Print JSON instead of text.
        #[arg(long)]
        json: bool,
    },

    /// Delete legacy records that have a valid record under the current key.
    PruneLegacy {
        start: u64,
        end: u64,
        /// Print the report as JSON.
        #[arg(long)]
        json: bool,
    },
}

impl Args {
    /// Complete any quick requests asked for in [`Args`].
    ///
    /// Returns `true` if the process should exit afterwards.
    pub(crate) fn do_quick_requests(&self) -> anyhow::Result<bool> {
        if self.generate_config {
            println!("{}", Config::documented_config()?);
            return Ok(true);
        }

        Ok(false)
    }

    /// The command to run, exits with a usage error if none was given.
    pub(crate) fn take_command(&mut self) -> Command {
        self.command.take().unwrap_or_else(|| {
            <Self as CommandFactory>::command()
                .error(
                    clap::error::ErrorKind::MissingSubcommand,
                    "a command is required",
                )
                .exit()
        })
    }

    /// Apply the [`Args`] to the given [`Config`].
    pub(crate) fn apply_args(&self, mut config: Config) -> Config {
        if let Some(db) = &self.db {
            config.storage.directory.clone_from(db);
        }

        if let Some(level) = self.log_level {
            config.tracing.stdout.level = level;
        }

        config
    }
}
