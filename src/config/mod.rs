//! Configuration system
//!
//! Schemas are declared with `config_struct!` so each field carries its own
//! default. The loaded `Config` is passed by value into the components that
//! need it; there is no global configuration instance.

#[macro_use]
mod macros;
mod schemas;
mod utils;

pub use schemas::*;
pub use utils::{load_config_from_path, parse_config, CONFIG_FILE_PATH};
