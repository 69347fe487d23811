//! Application configuration schemas.
//!
//! All configuration structs are deserialized via the `config` crate from an
//! optional TOML file overlaid with `DRIVEDESK__*` environment variables.
//! Every field has a default so an empty configuration is valid.

pub mod backend;
pub mod logging;
pub mod size;
pub mod transfer;

use serde::{Deserialize, Serialize};

pub use self::backend::BackendConfig;
pub use self::logging::LoggingConfig;
pub use self::size::SizeConfig;
pub use self::transfer::TransferConfig;

use crate::error::AppError;

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Backend connection and session settings.
    #[serde(default)]
    pub backend: BackendConfig,
    /// Upload/download settings.
    #[serde(default)]
    pub transfer: TransferConfig,
    /// Folder size aggregation settings.
    #[serde(default)]
    pub size: SizeConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from a TOML file and the environment.
    ///
    /// The file is optional. Environment variables prefixed with
    /// `DRIVEDESK__` override file values, using `__` as the section separator
    /// (e.g. `DRIVEDESK__SIZE__MAX_FAN_OUT=4`).
    pub fn load(path: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name(path).required(false))
            .add_source(
                config::Environment::with_prefix("DRIVEDESK")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_yields_defaults() {
        let config = AppConfig::load("does/not/exist").expect("defaults");
        assert_eq!(config.size.max_fan_out, 8);
        assert_eq!(config.transfer.chunk_size_bytes, 1024 * 1024);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_partial_document_keeps_other_defaults() {
        let parsed: AppConfig = from_json(
            r#"{"size": {"max_fan_out": 2}, "backend": {"file_system_id": 7}}"#,
        );
        assert_eq!(parsed.size.max_fan_out, 2);
        assert_eq!(parsed.backend.file_system_id, 7);
        assert_eq!(parsed.logging.format, "pretty");
    }

    fn from_json(json: &str) -> AppConfig {
        serde_json::from_str(json).expect("valid config json")
    }
}
