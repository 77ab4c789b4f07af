use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Root configuration container.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Quiet period for the debounced message derivation, in milliseconds
    /// (default: 1000).
    #[serde(default = "default_debounce_quiet_ms")]
    pub debounce_quiet_ms: u64,

    /// Overrides for the display-message catalog, keyed by error code.
    /// Known codes replace the default text in place; unknown codes are
    /// appended after the defaults.
    #[serde(default)]
    pub messages: BTreeMap<String, String>,
}

fn default_debounce_quiet_ms() -> u64 {
    1000
}

impl Default for Config {
    fn default() -> Self {
        Self {
            debounce_quiet_ms: default_debounce_quiet_ms(),
            messages: BTreeMap::new(),
        }
    }
}
