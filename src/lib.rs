pub mod allocation;
pub mod apis;
pub mod arguments;
pub mod config;
pub mod errors;
pub mod logger;
pub mod pricing;
pub mod run;
pub mod services;
pub mod webserver;
