//! HTTP client for the external text-sentiment inference service.
//!
//! The service is expensive to initialize on its side, so callers are
//! expected to construct one client per process and share it.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use signal_core::{SentimentModel, SentimentPrediction, SignalError};
use std::time::Duration;

pub mod error;
pub use error::{SentimentError, SentimentResult};

/// Maximum number of characters submitted per inference call. Longer texts
/// are truncated before the request is built.
pub const MAX_TEXT_LEN: usize = 512;

#[derive(Debug, Clone, Serialize)]
struct ClassifyRequest {
    text: String,
}

#[derive(Debug, Clone, Deserialize)]
struct ClassifyResponse {
    label: String,
    confidence: f64,
}

#[derive(Clone)]
pub struct SentimentClient {
    client: reqwest::Client,
    base_url: String,
}

impl SentimentClient {
    pub fn new(base_url: String, timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self { client, base_url }
    }

    /// Build a client from `SENTIMENT_SERVICE_URL`, falling back to the
    /// local default.
    pub fn from_env() -> Self {
        let base_url = std::env::var("SENTIMENT_SERVICE_URL")
            .unwrap_or_else(|_| "http://localhost:8001".to_string());
        Self::new(base_url, Duration::from_secs(10))
    }

    /// Classify one text, truncated to [`MAX_TEXT_LEN`] characters.
    pub async fn classify(&self, text: &str) -> SentimentResult<SentimentPrediction> {
        let request = ClassifyRequest {
            text: truncated(text),
        };

        let response = self
            .client
            .post(format!("{}/classify", self.base_url))
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(SentimentError::ServiceUnavailable(format!(
                "Status: {}",
                response.status()
            )));
        }

        let result = response.json::<ClassifyResponse>().await?;
        Ok(SentimentPrediction {
            label: result.label,
            confidence: result.confidence,
        })
    }

    /// Check service health
    pub async fn health(&self) -> SentimentResult<bool> {
        let response = self
            .client
            .get(format!("{}/health", self.base_url))
            .send()
            .await?;

        Ok(response.status().is_success())
    }
}

#[async_trait]
impl SentimentModel for SentimentClient {
    async fn infer(&self, text: &str) -> Result<SentimentPrediction, SignalError> {
        self.classify(text)
            .await
            .map_err(|e| SignalError::Inference(e.to_string()))
    }
}

fn truncated(text: &str) -> String {
    text.chars().take(MAX_TEXT_LEN).collect()
}
