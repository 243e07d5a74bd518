// HTTP vehicle API implementation
use crate::application::vehicle_api::{Endpoint, VehicleApi};
use crate::domain::telemetry::{HistoryResponse, TelemetrySample};
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum VehicleApiError {
    #[error("{path} answered {status}: {body}")]
    Status {
        path: String,
        status: reqwest::StatusCode,
        body: String,
    },
}

#[derive(Debug, Clone)]
pub struct HttpVehicleApi {
    base_url: String,
    client: reqwest::Client,
}

impl HttpVehicleApi {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build vehicle HTTP client")?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn history_url(&self, seconds: u32) -> String {
        format!("{}/api/history?seconds={}", self.base_url, seconds)
    }

    async fn check(path: &str, response: reqwest::Response) -> Result<reqwest::Response> {
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(VehicleApiError::Status {
                path: path.to_string(),
                status,
                body,
            }
            .into());
        }
        Ok(response)
    }
}

#[async_trait]
impl VehicleApi for HttpVehicleApi {
    async fn post_command(&self, endpoint: Endpoint, body: serde_json::Value) -> Result<()> {
        let path = endpoint.path();
        let response = self
            .client
            .post(self.url(path))
            .json(&body)
            .send()
            .await
            .with_context(|| format!("Failed to send {}", path))?;

        Self::check(path, response).await?;
        Ok(())
    }

    async fn fetch_status(&self) -> Result<TelemetrySample> {
        let path = "/api/status";
        let response = self
            .client
            .get(self.url(path))
            .header("Accept", "application/json")
            .send()
            .await
            .context("Failed to request vehicle status")?;

        Self::check(path, response)
            .await?
            .json::<TelemetrySample>()
            .await
            .context("Failed to parse vehicle status")
    }

    async fn fetch_history(&self, seconds: u32) -> Result<Vec<TelemetrySample>> {
        let response = self
            .client
            .get(self.history_url(seconds))
            .header("Accept", "application/json")
            .send()
            .await
            .context("Failed to request telemetry history")?;

        let data = Self::check("/api/history", response)
            .await?
            .json::<HistoryResponse>()
            .await
            .context("Failed to parse telemetry history")?;

        Ok(data.history)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_urls_strip_trailing_slash() {
        let api = HttpVehicleApi::new("http://car.local:5000/", Duration::from_secs(1)).unwrap();
        assert_eq!(api.url(Endpoint::Settings.path()), "http://car.local:5000/api/settings");
        assert_eq!(api.history_url(600), "http://car.local:5000/api/history?seconds=600");
    }

    #[test]
    fn test_status_error_message() {
        let err = VehicleApiError::Status {
            path: "/api/status".to_string(),
            status: reqwest::StatusCode::SERVICE_UNAVAILABLE,
            body: "warming up".to_string(),
        };
        assert_eq!(err.to_string(), "/api/status answered 503 Service Unavailable: warming up");
    }
}
