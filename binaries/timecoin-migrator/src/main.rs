#![doc = include_str!("../README.md")]

use std::process::ExitCode;

use tracing::{debug, info};

mod commands;
mod config;
mod constants;
mod logging;

use config::Setup;

fn main() -> ExitCode {
    match try_main() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            logging::eprintln_red(&format!("error: {e:#}"));
            ExitCode::FAILURE
        }
    }
}

fn try_main() -> anyhow::Result<()> {
    let Setup::Run {
        command,
        config,
        config_file,
    } = config::read_config_and_args()?
    else {
        return Ok(());
    };

    // Dropping the guard flushes the log file.
    let _guard = logging::init_logging(&config.tracing)?;

    match &config_file {
        Some(file) => info!("using config file {}", file.display()),
        None => info!("no config file found, using the default config"),
    }
    debug!(?config, ?command);

    commands::run(command, &config)
}

