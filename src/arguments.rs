/// Centralized command-line argument handling
///
/// The estimator takes no domain parameters on the command line; every
/// constant has a default in the configuration schema. Flags here only
/// control logging, the config file location and the listener address.
use once_cell::sync::Lazy;
use std::env;
use std::sync::Mutex;

/// Global command-line arguments storage
pub static CMD_ARGS: Lazy<Mutex<Vec<String>>> = Lazy::new(|| Mutex::new(env::args().collect()));

/// Sets the global command-line arguments
/// Used by binaries and tests to override the default env::args() collection
pub fn set_cmd_args(args: Vec<String>) {
    if let Ok(mut cmd_args) = CMD_ARGS.lock() {
        *cmd_args = args;
    }
}

/// Gets a copy of the current command-line arguments
pub fn get_cmd_args() -> Vec<String> {
    match CMD_ARGS.lock() {
        Ok(args) => args.clone(),
        Err(_) => env::args().collect(),
    }
}

/// Checks if a specific argument is present in the command line
pub fn has_arg(arg: &str) -> bool {
    get_cmd_args().iter().any(|a| a == arg)
}

/// Gets the value of a command-line argument that follows a flag
pub fn get_arg_value(flag: &str) -> Option<String> {
    let args = get_cmd_args();
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .cloned()
}

// =============================================================================
// OVERRIDES
// =============================================================================

/// Path of the TOML configuration file, if overridden
pub fn get_config_path_override() -> Option<String> {
    get_arg_value("--config")
}

/// Listener port override (`--port <n>`)
///
/// Returns `Ok(None)` when the flag is absent and an error when the value is
/// not a valid non-zero port.
pub fn get_port_override() -> Result<Option<u16>, String> {
    match get_arg_value("--port") {
        None if has_arg("--port") => Err("--port requires a value".to_string()),
        None => Ok(None),
        Some(value) => parse_port(&value).map(Some),
    }
}

/// Listener host override (`--host <ip>`)
pub fn get_host_override() -> Result<Option<String>, String> {
    match get_arg_value("--host") {
        None if has_arg("--host") => Err("--host requires a value".to_string()),
        None => Ok(None),
        Some(value) => {
            value
                .parse::<std::net::IpAddr>()
                .map_err(|e| format!("Invalid --host value '{}': {}", value, e))?;
            Ok(Some(value))
        }
    }
}

fn parse_port(value: &str) -> Result<u16, String> {
    match value.parse::<u16>() {
        Ok(0) => Err("Invalid --port value '0': port must be between 1 and 65535".to_string()),
        Ok(port) => Ok(port),
        Err(e) => Err(format!("Invalid --port value '{}': {}", value, e)),
    }
}

pub mod patterns {
    use super::*;

    /// Checks for help flags
    pub fn is_help_requested() -> bool {
        has_arg("--help") || has_arg("-h")
    }
}

/// Print usage information
pub fn print_help() {
    println!("airdrop-estimator - Airdrop allocation and value estimator");
    println!();
    println!("USAGE:");
    println!("    airdrop-estimator [FLAGS]");
    println!();
    println!("FLAGS:");
    println!("    --config <path>           Configuration file (default: data/config.toml)");
    println!("    --host <ip>               Override the webserver bind address");
    println!("    --port <n>                Override the webserver port");
    println!("    --help, -h                Show this help message");
    println!();
    println!("LOGGING FLAGS:");
    println!("    --debug-api               Upstream API calls debug mode");
    println!("    --debug-pricing           Price updater debug mode");
    println!("    --debug-webserver         Webserver debug mode");
    println!("    --debug-system            Service lifecycle debug mode");
    println!("    --log-level <level>       Minimum level: error, warning, info, debug, verbose");
    println!("    --verbose                 Show all debug and verbose output");
    println!("    --quiet, -q               Only show warnings and errors");
}
