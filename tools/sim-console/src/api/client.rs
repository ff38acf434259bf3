//! HTTP client for the simulation backend.

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use sim_analytics::{
    AnalyticsSnapshot, Balances, Block, MineRequest, ParamsUpdate, Transaction, TransferRequest,
};

use super::endpoints;
use crate::config::ConsoleConfig;

/// Longest backend error body echoed back to the operator.
const MAX_ERROR_DETAIL: usize = 120;

/// Errors that can occur when talking to the simulation backend.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Connection failed: {0}")]
    Connection(String),

    #[error("{endpoint} returned {status}: {message}")]
    Status {
        endpoint: &'static str,
        status: u16,
        message: String,
    },

    #[error("Failed to parse response from {endpoint}: {reason}")]
    Parse {
        endpoint: &'static str,
        reason: String,
    },
}

impl ApiError {
    /// Message suitable for a flash notification.
    pub fn operator_message(&self) -> String {
        match self {
            ApiError::Status { message, .. } => message.clone(),
            ApiError::Connection(_) => "Backend unreachable".to_string(),
            other => other.to_string(),
        }
    }
}

/// Read and command surface of the simulation backend.
///
/// One method per endpoint. Implementations perform exactly one round trip
/// per call.
#[async_trait]
pub trait SimApi: Send + Sync {
    async fn analytics(&self) -> Result<AnalyticsSnapshot, ApiError>;

    async fn balances(&self) -> Result<Balances, ApiError>;

    /// Pending transactions in admission order.
    async fn mempool(&self) -> Result<Vec<Transaction>, ApiError>;

    /// Blocks by ascending index.
    async fn chain(&self) -> Result<Vec<Block>, ApiError>;

    /// Block-assigned transactions in chain order.
    async fn transactions(&self) -> Result<Vec<Transaction>, ApiError>;

    /// Apply a partial parameter update. Only the OK/not-OK signal matters.
    async fn update_params(&self, update: &ParamsUpdate) -> Result<(), ApiError>;

    /// Submit a transfer; returns the transaction id when the backend reports one.
    async fn send_transaction(&self, request: &TransferRequest)
        -> Result<Option<String>, ApiError>;

    /// Mine the current mempool into a block credited to `request.miner`.
    async fn mine_block(&self, request: &MineRequest) -> Result<(), ApiError>;
}

/// reqwest-backed [`SimApi`].
pub struct SimApiClient {
    client: Client,
    base_url: String,
}

impl SimApiClient {
    /// Create a new client for the configured backend.
    pub fn new(config: &ConsoleConfig) -> Result<Self, ApiError> {
        let client = Client::builder()
            .connect_timeout(config.connect_timeout)
            .build()
            .map_err(ApiError::Http)?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn transport_error(&self, endpoint: &'static str, e: reqwest::Error) -> ApiError {
        if e.is_connect() {
            ApiError::Connection(format!("Cannot connect to {}{}", self.base_url, endpoint))
        } else {
            ApiError::Http(e)
        }
    }

    async fn get<R: DeserializeOwned>(&self, endpoint: &'static str) -> Result<R, ApiError> {
        debug!(endpoint, "GET");

        let response = self
            .client
            .get(self.url(endpoint))
            .send()
            .await
            .map_err(|e| self.transport_error(endpoint, e))?;

        let response = check_status(endpoint, response).await?;
        let body = response.bytes().await?;

        serde_json::from_slice(&body).map_err(|e| ApiError::Parse {
            endpoint,
            reason: e.to_string(),
        })
    }

    async fn post<B: Serialize + Sync>(
        &self,
        endpoint: &'static str,
        body: &B,
    ) -> Result<Response, ApiError> {
        debug!(endpoint, "POST");

        let response = self
            .client
            .post(self.url(endpoint))
            .json(body)
            .send()
            .await
            .map_err(|e| self.transport_error(endpoint, e))?;

        check_status(endpoint, response).await
    }
}

#[async_trait]
impl SimApi for SimApiClient {
    async fn analytics(&self) -> Result<AnalyticsSnapshot, ApiError> {
        self.get(endpoints::ANALYTICS).await
    }

    async fn balances(&self) -> Result<Balances, ApiError> {
        self.get(endpoints::BALANCES).await
    }

    async fn mempool(&self) -> Result<Vec<Transaction>, ApiError> {
        self.get(endpoints::MEMPOOL).await
    }

    async fn chain(&self) -> Result<Vec<Block>, ApiError> {
        self.get(endpoints::CHAIN).await
    }

    async fn transactions(&self) -> Result<Vec<Transaction>, ApiError> {
        self.get(endpoints::TRANSACTIONS).await
    }

    async fn update_params(&self, update: &ParamsUpdate) -> Result<(), ApiError> {
        self.post(endpoints::UPDATE_PARAMS, update).await?;
        Ok(())
    }

    async fn send_transaction(
        &self,
        request: &TransferRequest,
    ) -> Result<Option<String>, ApiError> {
        let response = self.post(endpoints::SEND, request).await?;

        // A 2xx is authoritative; the txid is informational only.
        let txid = match response.json::<serde_json::Value>().await {
            Ok(body) => body.get("txid").and_then(|v| v.as_str()).map(str::to_string),
            Err(e) => {
                warn!(error = %e, "send succeeded but response body was not JSON");
                None
            }
        };
        Ok(txid)
    }

    async fn mine_block(&self, request: &MineRequest) -> Result<(), ApiError> {
        self.post(endpoints::MINE, request).await?;
        Ok(())
    }
}

/// Map a non-2xx response to [`ApiError::Status`].
async fn check_status(endpoint: &'static str, response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(ApiError::Status {
        endpoint,
        status: status.as_u16(),
        message: error_detail(&body),
    })
}

/// Extract the backend's `error`/`message` field, falling back to the raw body.
fn error_detail(body: &str) -> String {
    if let Ok(json) = serde_json::from_str::<serde_json::Value>(body) {
        for key in ["error", "message"] {
            if let Some(text) = json.get(key).and_then(|v| v.as_str()) {
                return text.to_string();
            }
        }
    }

    let trimmed = body.trim();
    if trimmed.is_empty() {
        return "no details".to_string();
    }
    trimmed.chars().take(MAX_ERROR_DETAIL).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_detail_prefers_json_error_field() {
        assert_eq!(
            error_detail(r#"{"error": "Insufficient balance"}"#),
            "Insufficient balance"
        );
        assert_eq!(error_detail(r#"{"message": "nope"}"#), "nope");
    }

    #[test]
    fn test_error_detail_falls_back_to_body() {
        assert_eq!(error_detail(""), "no details");
        assert_eq!(error_detail("  Internal Server Error \n"), "Internal Server Error");
        assert_eq!(error_detail(&"x".repeat(500)).len(), MAX_ERROR_DETAIL);
    }

    #[test]
    fn test_client_strips_trailing_slash() {
        let config = ConsoleConfig {
            base_url: "http://sim:5000/".to_string(),
            ..Default::default()
        };
        let client = SimApiClient::new(&config).unwrap();
        assert_eq!(client.url(endpoints::CHAIN), "http://sim:5000/chain");
    }

    #[test]
    fn test_operator_message() {
        let err = ApiError::Status {
            endpoint: endpoints::SEND,
            status: 400,
            message: "Missing fields".to_string(),
        };
        assert_eq!(err.operator_message(), "Missing fields");
        assert_eq!(
            ApiError::Connection("x".to_string()).operator_message(),
            "Backend unreachable"
        );
    }
}
