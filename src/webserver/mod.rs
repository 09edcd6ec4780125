//! Axum webserver
//!
//! Serves the landing page, the allocation endpoint and a health probe.

mod server;

pub mod models;
pub mod routes;
pub mod state;
pub mod templates;
pub mod utils;

pub use server::{apply_layers, bind_listener, build_app, serve};
pub use state::AppState;
