//! Structured logging for the airdrop estimator
//!
//! This module provides a small, ergonomic logging API with:
//! - Standard log levels (Error/Warning/Info/Debug/Verbose)
//! - Per-module debug control via --debug-<module> flags
//! - Colored, aligned console output
//!
//! ## Usage
//!
//! ```rust
//! use airdrop_estimator::logger::{self, LogTag};
//!
//! logger::error(LogTag::Api, "Connection failed");
//! logger::info(LogTag::Pricing, "Price refreshed");
//! logger::debug(LogTag::Api, "Request details: ..."); // Only if --debug-api
//! ```
//!
//! Call `logger::init()` once at startup, before any logging occurs.

mod config;
mod core;
mod format;
mod levels;
mod tags;

pub use config::{
    config_from_args, get_logger_config, init_from_args, set_logger_config, LoggerConfig,
};
pub use levels::LogLevel;
pub use tags::LogTag;

/// Initialize the logger system from command-line arguments
pub fn init() {
    config::init_from_args();
}

/// Log at ERROR level (always shown, critical issues)
pub fn error(tag: LogTag, message: &str) {
    core::log_internal(tag, LogLevel::Error, message);
}

/// Log at WARNING level (important issues)
///
/// Warnings are shown by default, including with --quiet.
pub fn warning(tag: LogTag, message: &str) {
    core::log_internal(tag, LogLevel::Warning, message);
}

/// Log at INFO level (standard operations)
pub fn info(tag: LogTag, message: &str) {
    core::log_internal(tag, LogLevel::Info, message);
}

/// Log at DEBUG level (detailed diagnostics)
///
/// Debug logs are ONLY shown when the --debug-<module> flag for the tag is
/// provided, or when --verbose is set.
pub fn debug(tag: LogTag, message: &str) {
    core::log_internal(tag, LogLevel::Debug, message);
}

/// Log at VERBOSE level (very detailed tracing, --verbose only)
pub fn verbose(tag: LogTag, message: &str) {
    core::log_internal(tag, LogLevel::Verbose, message);
}
