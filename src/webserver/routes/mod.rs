use crate::webserver::{state::AppState, templates};
use axum::{extract::State, response::Html, routing, Router};
use std::sync::Arc;

pub mod calculate;
pub mod status;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", routing::get(index_page))
        .route("/calculate", routing::post(calculate::calculate))
        .nest("/api", status::routes())
        .with_state(state)
}

/// Landing page handler
async fn index_page(State(state): State<Arc<AppState>>) -> Html<String> {
    let token = state.token();
    Html(templates::index_page(&token.name, token.total_token_offered))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::allocation::AllocationEstimator;
    use crate::config::TokenConfig;
    use crate::pricing::test_support::ScriptedUpstream;
    use crate::pricing::PriceCache;
    use crate::webserver::build_app;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use tower::ServiceExt;

    fn app(stakes: &[Option<f64>], price: Option<f64>) -> (Router, Arc<ScriptedUpstream>) {
        let upstream = Arc::new(ScriptedUpstream::new(stakes, &[]));
        let cache = Arc::new(PriceCache::new());
        if let Some(price) = price {
            cache.store(price);
        }
        let estimator = Arc::new(AllocationEstimator::new(
            TokenConfig::default(),
            upstream.clone(),
            cache.clone(),
        ));
        let state = Arc::new(AppState::new(estimator, cache));
        (build_app(state), upstream)
    }

    fn form_post(body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/calculate")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn json_body(response: axum::response::Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_index_page() {
        let (app, upstream) = app(&[], None);
        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let html = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(html.contains("kip"));
        assert!(html.contains("50,000,000"));
        assert_eq!(upstream.stake_calls(), 0);
    }

    #[tokio::test]
    async fn test_calculate_success() {
        let (app, upstream) = app(&[Some(1_000_000.0)], Some(0.05));
        let response = app.oneshot(form_post("user_burn=10")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["token_name"], "kip");
        assert_eq!(body["token_price"], 0.05);
        assert_eq!(body["total_burnt"], 1_000_000.0);
        assert!((body["tokens_received"].as_f64().unwrap() - 500.0).abs() < 1e-9);
        assert!((body["airdrop_value"].as_f64().unwrap() - 25.0).abs() < 1e-9);
        assert_eq!(upstream.stake_calls(), 1);
    }

    #[tokio::test]
    async fn test_calculate_negative_burn_is_computed() {
        let (app, upstream) = app(&[Some(1_000_000.0)], Some(0.05));
        let response = app.oneshot(form_post("user_burn=-10")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert!((body["tokens_received"].as_f64().unwrap() + 500.0).abs() < 1e-9);
        assert!((body["airdrop_value"].as_f64().unwrap() + 25.0).abs() < 1e-9);
        assert_eq!(upstream.stake_calls(), 1);
    }

    #[tokio::test]
    async fn test_calculate_non_numeric_input() {
        let (app, _) = app(&[Some(1_000_000.0)], Some(0.05));
        let response = app.oneshot(form_post("user_burn=abc")).await.unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            json_body(response).await,
            serde_json::json!({"error": "Internal server error"})
        );
    }

    #[tokio::test]
    async fn test_calculate_missing_field() {
        let (app, _) = app(&[Some(1_000_000.0)], Some(0.05));
        let response = app.oneshot(form_post("other=1")).await.unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json_body(response).await["error"], "Internal server error");
    }

    #[tokio::test]
    async fn test_calculate_wrong_content_type() {
        let (app, _) = app(&[Some(1_000_000.0)], Some(0.05));
        let request = Request::builder()
            .method("POST")
            .uri("/calculate")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"user_burn": 10}"#))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json_body(response).await["error"], "Internal server error");
    }

    #[tokio::test]
    async fn test_calculate_price_not_cached() {
        let (app, upstream) = app(&[Some(1_000_000.0)], None);
        let response = app.oneshot(form_post("user_burn=10")).await.unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            json_body(response).await["error"],
            "Failed to fetch token price from CoinGecko."
        );
        assert_eq!(upstream.stake_calls(), 0);
    }

    #[tokio::test]
    async fn test_calculate_stake_unavailable() {
        let (app, _) = app(&[None], Some(0.05));
        let response = app.oneshot(form_post("user_burn=10")).await.unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            json_body(response).await["error"],
            "Failed to fetch total staking power from Mocaverse."
        );
    }

    #[tokio::test]
    async fn test_handler_panic_becomes_generic_error() {
        async fn explode() -> &'static str {
            panic!("boom")
        }
        let app = crate::webserver::apply_layers(Router::new().route("/boom", routing::get(explode)));

        let response = app
            .oneshot(Request::builder().uri("/boom").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json_body(response).await["error"], "Internal server error");
    }
}
