//! Logging setup.
//!
//! Terminal output goes to stderr so `--json` output on stdout stays parseable.

use anyhow::Context;
use nu_ansi_term::Color;
use tracing::level_filters::LevelFilter;
use tracing_appender::{non_blocking::WorkerGuard, rolling::Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, Layer};

use crate::{config::TracingConfig, constants::LOG_FILE_PREFIX};

/// Install the global [`tracing`] subscriber.
///
/// The returned guard flushes the log file when dropped,
/// it must be kept alive until the process exits.
///
/// # Errors
/// If the log directory cannot be created or a subscriber was already set.
pub(crate) fn init_logging(config: &TracingConfig) -> anyhow::Result<Option<WorkerGuard>> {
    let stdout_layer = fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_filter(config.stdout.level);

    let (file_layer, guard) = if config.file.level == LevelFilter::OFF {
        (None, None)
    } else {
        let file = &config.file;
        let appender = tracing_appender::rolling::Builder::new()
            .rotation(Rotation::DAILY)
            .filename_prefix(LOG_FILE_PREFIX)
            .filename_suffix("log")
            .max_log_files(file.max_log_files)
            .build(&file.directory)
            .with_context(|| format!("failed to open log directory {}", file.directory.display()))?;
        let (writer, guard) = tracing_appender::non_blocking(appender);

        let layer = fmt::layer()
            .with_target(false)
            .with_ansi(false)
            .with_writer(writer)
            .with_filter(file.level);

        (Some(layer), Some(guard))
    };

    tracing_subscriber::registry()
        .with(file_layer)
        .with(stdout_layer)
        .try_init()?;

    Ok(guard)
}

/// Print `msg` to stderr in red.
pub(crate) fn eprintln_red(msg: &str) {
    eprintln!("{}", Color::Red.bold().paint(msg));
}
