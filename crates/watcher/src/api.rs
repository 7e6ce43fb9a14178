//! Homework statuses API client.

use std::future::Future;
use std::time::Duration;

use reqwest::Client;
use reqwest::header::AUTHORIZATION;
use serde_json::Value;

use review_common::error::AppError;
use review_common::types::RawResponse;

/// Transport to the homework statuses endpoint: one authenticated GET per call.
pub trait HomeworkApi: Send + Sync {
    fn get_statuses(
        &self,
        from_date: i64,
    ) -> impl Future<Output = Result<RawResponse, AppError>> + Send;
}

/// reqwest-backed client for the review API.
pub struct PracticumApi {
    client: Client,
    endpoint: String,
    token: String,
}

impl PracticumApi {
    pub fn new(
        endpoint: impl Into<String>,
        token: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
            token: token.into(),
        })
    }

    fn authorization(&self) -> String {
        format!("OAuth {}", self.token)
    }
}

impl HomeworkApi for PracticumApi {
    async fn get_statuses(&self, from_date: i64) -> Result<RawResponse, AppError> {
        let response = self
            .client
            .get(&self.endpoint)
            .header(AUTHORIZATION, self.authorization())
            .query(&[("from_date", from_date)])
            .send()
            .await
            .map_err(|e| AppError::Transport(e.to_string()))?;

        tracing::info!(from_date, "Request sent to homework API");

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| AppError::Transport(e.to_string()))?;

        Ok(RawResponse { status, body })
    }
}

/// Fetch statuses changed since `from_date` and decode the JSON body.
///
/// Anything but `200 OK` is an [`AppError::ApiStatus`]; a body that is not JSON
/// is an [`AppError::Decode`]. The decoded value is not shape-checked here.
pub async fn fetch_statuses(api: &impl HomeworkApi, from_date: i64) -> Result<Value, AppError> {
    let response = api.get_statuses(from_date).await?;

    if response.status != 200 {
        return Err(AppError::ApiStatus(response.status));
    }

    serde_json::from_str(&response.body).map_err(|e| AppError::Decode(e.to_string()))
}
