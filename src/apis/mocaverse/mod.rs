/// Mocaverse staking API client
///
/// Endpoint: `GET /api/mocadrop/projects/<project>` returning the project
/// document with the aggregate `stakingPowerBurnt` across all participants.
pub mod types;

use self::types::MocadropProject;
use crate::apis::client::HttpClient;
use crate::errors::{AirdropError, AirdropResult};

pub struct MocaverseClient {
    http_client: HttpClient,
    project_url: String,
}

impl MocaverseClient {
    pub fn new(http_client: HttpClient, project_url: impl Into<String>) -> Self {
        Self {
            http_client,
            project_url: project_url.into(),
        }
    }

    pub fn project_url(&self) -> &str {
        &self.project_url
    }

    /// Fetch the total staking power burnt for the project
    pub async fn fetch_stake_burnt(&self) -> AirdropResult<f64> {
        let response = self
            .http_client
            .client()
            .get(&self.project_url)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| AirdropError::transport(&self.project_url, e))?;

        if !response.status().is_success() {
            return Err(AirdropError::transport(
                &self.project_url,
                format!("HTTP {}", response.status()),
            ));
        }

        let body = response
            .text()
            .await
            .map_err(|e| AirdropError::transport(&self.project_url, e))?;

        parse_stake_burnt(&body).map_err(|reason| AirdropError::malformed(&self.project_url, reason))
    }
}

/// Extract `stakingPowerBurnt` from a project document
pub fn parse_stake_burnt(body: &str) -> Result<f64, String> {
    let project: MocadropProject =
        serde_json::from_str(body).map_err(|e| format!("invalid JSON: {}", e))?;

    let field = project
        .staking_power_burnt
        .ok_or_else(|| "missing field stakingPowerBurnt".to_string())?;

    field
        .as_f64()
        .ok_or_else(|| format!("stakingPowerBurnt is not numeric: {:?}", field))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::apis::test_server::spawn_json_server;
    use axum::http::StatusCode;

    #[test]
    fn test_parse_numeric_and_string_values() {
        assert_eq!(parse_stake_burnt(r#"{"stakingPowerBurnt": 1000000}"#), Ok(1_000_000.0));
        assert_eq!(parse_stake_burnt(r#"{"stakingPowerBurnt": "2500.5"}"#), Ok(2500.5));
    }

    #[test]
    fn test_parse_rejects_missing_or_bad_field() {
        assert!(parse_stake_burnt(r#"{"name": "kip-protocol"}"#).is_err());
        assert!(parse_stake_burnt(r#"{"stakingPowerBurnt": null}"#).is_err());
        assert!(parse_stake_burnt(r#"{"stakingPowerBurnt": "lots"}"#).is_err());
        assert!(parse_stake_burnt("<html>").is_err());
    }

    #[tokio::test]
    async fn test_fetch_stake_burnt_from_server() {
        let url = spawn_json_server(
            StatusCode::OK,
            r#"{"name": "kip-protocol", "stakingPowerBurnt": 1000000}"#,
        )
        .await;
        let client = MocaverseClient::new(HttpClient::new(5).unwrap(), url);

        assert_eq!(client.fetch_stake_burnt().await, Ok(1_000_000.0));
    }

    #[tokio::test]
    async fn test_fetch_stake_burnt_non_success_status() {
        let url = spawn_json_server(StatusCode::SERVICE_UNAVAILABLE, "{}").await;
        let client = MocaverseClient::new(HttpClient::new(5).unwrap(), url);

        let err = client.fetch_stake_burnt().await.unwrap_err();
        assert!(matches!(err, AirdropError::Transport { .. }));
    }

    #[tokio::test]
    async fn test_fetch_stake_burnt_malformed_body() {
        let url = spawn_json_server(StatusCode::OK, r#"{"stakingPowerBurnt": {}}"#).await;
        let client = MocaverseClient::new(HttpClient::new(5).unwrap(), url);

        let err = client.fetch_stake_burnt().await.unwrap_err();
        assert!(matches!(err, AirdropError::MalformedResponse { .. }));
    }
}
