/// Response helpers shared by route handlers
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::{
    errors::AirdropError,
    logger::{self, LogTag},
    webserver::models::ErrorResponse,
};

/// 200 response with a JSON body
pub fn success_response<T: Serialize>(data: T) -> Response {
    (StatusCode::OK, Json(data)).into_response()
}

/// Error response with body `{"error": message}`
pub fn error_response(status: StatusCode, message: &str) -> Response {
    let body = ErrorResponse {
        error: message.to_string(),
    };
    (status, Json(body)).into_response()
}

/// Every domain failure becomes an HTTP 500
impl IntoResponse for AirdropError {
    fn into_response(self) -> Response {
        if self.is_data_unavailable() {
            logger::warning(LogTag::Webserver, &self.to_string());
        } else {
            logger::error(
                LogTag::Webserver,
                &format!("Error during calculation: {}", self),
            );
        }

        error_response(StatusCode::INTERNAL_SERVER_ERROR, &self.public_message())
    }
}
