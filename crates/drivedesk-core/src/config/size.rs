//! Folder size aggregation configuration.

use serde::{Deserialize, Serialize};

/// Settings for recursive folder size computation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SizeConfig {
    /// Maximum number of concurrent content listings per level.
    #[serde(default = "default_max_fan_out")]
    pub max_fan_out: usize,
}

impl Default for SizeConfig {
    fn default() -> Self {
        Self {
            max_fan_out: default_max_fan_out(),
        }
    }
}

fn default_max_fan_out() -> usize {
    8
}
