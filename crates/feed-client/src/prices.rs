//! Daily close history for the price-move confirmation. Bars arrive oldest
//! first; the confirmator only ever asks for the last two.

use crate::http_client;
use async_trait::async_trait;
use serde::Deserialize;
use signal_core::{PriceHistory, SignalError};
use std::time::Duration;

#[derive(Debug, Deserialize)]
struct DailyCloseResponse {
    #[serde(default)]
    results: Vec<DailyBar>,
}

#[derive(Debug, Deserialize)]
struct DailyBar {
    #[allow(dead_code)]
    t: i64,
    c: f64,
}

#[derive(Clone)]
pub struct PriceClient {
    client: reqwest::Client,
    base_url: String,
}

impl PriceClient {
    pub fn new(base_url: String, timeout: Duration) -> Self {
        Self {
            client: http_client(timeout),
            base_url,
        }
    }
}

#[async_trait]
impl PriceHistory for PriceClient {
    async fn recent_closes(&self, symbol: &str, limit: usize) -> Result<Vec<f64>, SignalError> {
        let url = format!("{}/v1/daily/{}", self.base_url, symbol);

        let response = self
            .client
            .get(&url)
            .query(&[("limit", limit.to_string())])
            .send()
            .await
            .map_err(|e| SignalError::Retrieval(e.to_string()))?;

        if !response.status().is_success() {
            return Err(SignalError::Retrieval(format!(
                "HTTP {}: daily closes for {}",
                response.status(),
                symbol
            )));
        }

        let parsed: DailyCloseResponse = response
            .json()
            .await
            .map_err(|e| SignalError::Retrieval(e.to_string()))?;

        let mut closes: Vec<f64> = parsed.results.into_iter().map(|bar| bar.c).collect();
        if closes.len() > limit {
            closes.drain(..closes.len() - limit);
        }
        Ok(closes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn daily_close_response_parses() {
        let body = r#"{"results": [{"t": 1754323200000, "c": 100.0}, {"t": 1754409600000, "c": 105.0}]}"#;
        let parsed: DailyCloseResponse = serde_json::from_str(body).unwrap();
        let closes: Vec<f64> = parsed.results.into_iter().map(|bar| bar.c).collect();
        assert_eq!(closes, vec![100.0, 105.0]);
    }
}
