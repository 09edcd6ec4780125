use axum::{
    extract::{rejection::FormRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Form,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::{
    errors::{AirdropError, GENERIC_ERROR_MESSAGE},
    logger::{self, LogTag},
    webserver::{
        state::AppState,
        utils::{error_response, success_response},
    },
};

/// Form body of `POST /calculate`
#[derive(Debug, Deserialize)]
pub struct CalculateForm {
    pub user_burn: Option<String>,
}

/// POST /calculate
pub async fn calculate(
    State(state): State<Arc<AppState>>,
    form: Result<Form<CalculateForm>, FormRejection>,
) -> Response {
    let form = match form {
        Ok(Form(form)) => form,
        Err(rejection) => {
            logger::error(
                LogTag::Webserver,
                &format!("Error during calculation: {}", rejection),
            );
            return error_response(StatusCode::INTERNAL_SERVER_ERROR, GENERIC_ERROR_MESSAGE);
        }
    };

    let Some(raw_user_burn) = form.user_burn else {
        return AirdropError::InvalidInput("missing user_burn field".to_string()).into_response();
    };

    logger::debug(
        LogTag::Webserver,
        &format!("Calculating allocation for user_burn={}", raw_user_burn),
    );

    match state.estimator.estimate(&raw_user_burn).await {
        Ok(estimate) => success_response(estimate),
        Err(e) => e.into_response(),
    }
}
