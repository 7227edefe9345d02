use serde::{Deserialize, Serialize};

use super::macros::config_struct;

config_struct! {
    /// The `migrate` command config.
    #[derive(Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
    #[serde(deny_unknown_fields, default)]
    pub(crate) struct MigrateConfig {
        /// Skip heights that already have a record under the current key.
        ///
        /// `--skip-existing` turns this on for a single run.
        ///
        /// Type         | boolean
        /// Valid values | true, false
        pub(crate) skip_existing: bool,
    }
}
