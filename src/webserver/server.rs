/// Axum webserver implementation
///
/// Listener setup, middleware stack and graceful termination
use axum::{http::StatusCode, response::Response, Router};
use std::any::Any;
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::futures::OwnedNotified;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;

use crate::{
    errors::GENERIC_ERROR_MESSAGE,
    logger::{self, LogTag},
    webserver::{routes, state::AppState, utils::error_response},
};

/// Bind the TCP listener for the webserver
pub async fn bind_listener(host: &str, port: u16) -> Result<TcpListener, String> {
    let ip: IpAddr = host
        .parse()
        .map_err(|e| format!("Invalid bind address '{}': {}", host, e))?;
    let addr = SocketAddr::new(ip, port);

    TcpListener::bind(addr).await.map_err(|e| {
        // Provide helpful error message for common cases
        match e.kind() {
            std::io::ErrorKind::AddrInUse => {
                format!(
                    "Failed to bind to {}: Address already in use\n\
                     \n\
                     Another process is listening on port {}.\n\
                     Stop it or choose a different port with --port <n>.",
                    addr, port
                )
            }
            std::io::ErrorKind::PermissionDenied => {
                format!(
                    "Failed to bind to {}: Permission denied\n\
                     \n\
                     Port {} requires elevated privileges on this system.\n\
                     Consider using a port above 1024 or running with appropriate permissions.",
                    addr, port
                )
            }
            _ => format!("Failed to bind to {}: {}", addr, e),
        }
    })
}

/// Serve requests until `shutdown` resolves
///
/// Callers create the waiter with `Notify::notified_owned` before spawning
/// the server task.
pub async fn serve(
    listener: TcpListener,
    state: Arc<AppState>,
    shutdown: OwnedNotified,
) -> Result<(), String> {
    let app = build_app(state);

    if let Ok(addr) = listener.local_addr() {
        logger::debug(
            LogTag::Webserver,
            &format!("API endpoints available at http://{}/api", addr),
        );
    }

    let shutdown_signal = async move {
        shutdown.await;
        logger::debug(
            LogTag::Webserver,
            "Received shutdown signal, stopping webserver...",
        );
    };

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal)
        .await
        .map_err(|e| format!("Server error: {}", e))?;

    logger::debug(LogTag::Webserver, "Webserver stopped gracefully");

    Ok(())
}

/// Build the Axum application with all routes and middleware
pub fn build_app(state: Arc<AppState>) -> Router {
    apply_layers(routes::create_router(state))
}

/// Middleware shared by every route
pub fn apply_layers(router: Router) -> Router {
    router
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(CorsLayer::permissive())
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(message) = err.downcast_ref::<String>() {
        message.clone()
    } else if let Some(message) = err.downcast_ref::<&str>() {
        message.to_string()
    } else {
        "unknown panic payload".to_string()
    };

    logger::error(
        LogTag::Webserver,
        &format!("Request handler panicked: {}", detail),
    );

    error_response(StatusCode::INTERNAL_SERVER_ERROR, GENERIC_ERROR_MESSAGE)
}
