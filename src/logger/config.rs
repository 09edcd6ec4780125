/// Logger configuration and command-line driven filtering rules
use super::levels::LogLevel;
use crate::arguments;
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use std::collections::HashSet;

/// Runtime logger configuration
#[derive(Debug, Clone)]
pub struct LoggerConfig {
    /// Highest level that passes the threshold check
    pub min_level: LogLevel,

    /// Tags with debug output enabled (`--debug-<tag>`)
    pub debug_tags: HashSet<String>,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            min_level: LogLevel::Debug,
            debug_tags: HashSet::new(),
        }
    }
}

static LOGGER_CONFIG: Lazy<RwLock<LoggerConfig>> =
    Lazy::new(|| RwLock::new(LoggerConfig::default()));

/// Get a copy of the current logger configuration
pub fn get_logger_config() -> LoggerConfig {
    LOGGER_CONFIG.read().clone()
}

/// Replace the logger configuration
pub fn set_logger_config(config: LoggerConfig) {
    *LOGGER_CONFIG.write() = config;
}

/// Build the logger configuration from command-line flags
pub fn config_from_args(args: &[String]) -> LoggerConfig {
    let mut config = LoggerConfig::default();

    for arg in args {
        if let Some(tag) = arg.strip_prefix("--debug-") {
            if !tag.is_empty() {
                config.debug_tags.insert(tag.to_lowercase());
            }
        }
    }

    let explicit_level = args
        .iter()
        .position(|a| a == "--log-level")
        .and_then(|i| args.get(i + 1))
        .and_then(|value| LogLevel::from_str(value));

    if let Some(level) = explicit_level {
        config.min_level = level;
    } else if args.iter().any(|a| a == "--verbose") {
        config.min_level = LogLevel::Verbose;
    } else if args.iter().any(|a| a == "--quiet" || a == "-q") {
        config.min_level = LogLevel::Warning;
    }

    config
}

/// Initialize configuration from the process arguments
pub fn init_from_args() {
    set_logger_config(config_from_args(&arguments::get_cmd_args()));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_debug_flags_enable_tags() {
        let config = config_from_args(&args(&["bin", "--debug-api", "--debug-Pricing"]));
        assert!(config.debug_tags.contains("api"));
        assert!(config.debug_tags.contains("pricing"));
        assert!(!config.debug_tags.contains("webserver"));
        assert_eq!(config.min_level, LogLevel::Debug);
    }

    #[test]
    fn test_verbose_wins_over_quiet() {
        let config = config_from_args(&args(&["bin", "--quiet", "--verbose"]));
        assert_eq!(config.min_level, LogLevel::Verbose);

        let config = config_from_args(&args(&["bin", "-q"]));
        assert_eq!(config.min_level, LogLevel::Warning);
    }

    #[test]
    fn test_explicit_log_level() {
        let config = config_from_args(&args(&["bin", "--log-level", "error", "--verbose"]));
        assert_eq!(config.min_level, LogLevel::Error);

        let config = config_from_args(&args(&["bin", "--log-level", "nonsense"]));
        assert_eq!(config.min_level, LogLevel::Debug);
    }
}
