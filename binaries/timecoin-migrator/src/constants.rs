//! General constants used throughout `timecoin-migrator`.

/// Header to put at the start of the generated config file.
pub(crate) const CONFIG_HEADER: &str = r"## timecoin-migrator config
##
## All these config values can be set to
## their default by commenting them out with '#'.
##
## Command line flags override the values here.

";

/// The prefix of log file names, followed by the date.
pub(crate) const LOG_FILE_PREFIX: &str = "timecoin-migrator";
