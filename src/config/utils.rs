/// Configuration utilities - loading and validation
use super::schemas::Config;
use crate::logger::{self, LogTag};
use std::path::Path;

/// Default configuration file path
pub const CONFIG_FILE_PATH: &str = "data/config.toml";

/// Load configuration from a specific file path
///
/// A missing file is not an error: the in-source defaults are used. A file
/// that exists but fails to parse or validate is an error.
pub fn load_config_from_path(path: &str) -> Result<Config, String> {
    let config = if Path::new(path).exists() {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file '{}': {}", path, e))?;

        let config = parse_config(&contents)
            .map_err(|e| format!("Failed to parse config file '{}': {}", path, e))?;

        logger::info(LogTag::Config, &format!("Loaded configuration from {}", path));
        config
    } else {
        logger::info(
            LogTag::Config,
            &format!("No config file at {}, using built-in defaults", path),
        );
        Config::default()
    };

    config.validate()?;
    Ok(config)
}

/// Parse TOML contents into a configuration (missing fields take defaults)
pub fn parse_config(contents: &str) -> Result<Config, String> {
    toml::from_str::<Config>(contents).map_err(|e| e.to_string())
}
