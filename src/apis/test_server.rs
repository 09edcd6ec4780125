//! Local HTTP servers standing in for upstream APIs in tests
use axum::{
    http::{header, StatusCode},
    Router,
};
use tokio::net::TcpListener;

/// Serve `app` on an ephemeral localhost port, returning its base URL
pub async fn spawn_router(app: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}/", addr)
}

/// Serve a fixed JSON body with the given status on every path
pub async fn spawn_json_server(status: StatusCode, body: &'static str) -> String {
    let handler = move || async move { (status, [(header::CONTENT_TYPE, "application/json")], body) };
    let app = Router::new().fallback(handler);
    spawn_router(app).await
}
