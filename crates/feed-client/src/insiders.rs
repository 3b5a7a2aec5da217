//! Insider-transaction feed: recent Form 4 style disclosures. Only
//! confirmed open-market purchases are admitted; every other transaction
//! type is filtered out before classification.

use crate::http_client;
use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Deserialize;
use signal_core::{InsiderFeed, InsiderRecord, SignalError, Universe};
use std::time::Duration;

/// Transaction-type code for an open-market purchase in the source data.
pub const OPEN_MARKET_PURCHASE: &str = "P - Open market purchase";

/// Cap on emitted purchase records, newest first as delivered by the source.
pub const MAX_PURCHASES: usize = 10;

#[derive(Debug, Deserialize)]
struct InsiderResponse {
    #[serde(default)]
    results: Vec<InsiderRow>,
}

#[derive(Debug, Deserialize)]
pub struct InsiderRow {
    pub ticker: String,
    pub trade_type: String,
    pub trade_date: NaiveDate,
    pub insider_name: String,
    pub price: Option<f64>,
    pub quantity: Option<i64>,
    pub value: Option<f64>,
}

#[derive(Clone)]
pub struct InsiderFeedClient {
    client: reqwest::Client,
    base_url: String,
}

impl InsiderFeedClient {
    pub fn new(base_url: String, timeout: Duration) -> Self {
        Self {
            client: http_client(timeout),
            base_url,
        }
    }

    /// Fetch the latest raw disclosures, all transaction types included.
    pub async fn fetch_latest(&self) -> Result<Vec<InsiderRow>, SignalError> {
        let url = format!("{}/v1/insider-transactions", self.base_url);

        let response = self
            .client
            .get(&url)
            .query(&[("limit", "100")])
            .send()
            .await
            .map_err(|e| SignalError::Retrieval(e.to_string()))?;

        if !response.status().is_success() {
            return Err(SignalError::Retrieval(format!(
                "HTTP {}: insider feed",
                response.status()
            )));
        }

        let parsed: InsiderResponse = response
            .json()
            .await
            .map_err(|e| SignalError::Retrieval(e.to_string()))?;

        Ok(parsed.results)
    }
}

/// Keep open-market purchases by universe members with fully populated
/// trade fields, capped at [`MAX_PURCHASES`].
pub fn normalize_purchases(rows: Vec<InsiderRow>, universe: &Universe) -> Vec<InsiderRecord> {
    rows.into_iter()
        .filter(|row| row.trade_type == OPEN_MARKET_PURCHASE)
        .filter(|row| universe.contains(&row.ticker))
        .filter_map(|row| {
            Some(InsiderRecord {
                symbol: row.ticker,
                trade_date: row.trade_date,
                insider_name: row.insider_name,
                price: row.price?,
                quantity: row.quantity?,
                value: row.value?,
            })
        })
        .take(MAX_PURCHASES)
        .collect()
}

#[async_trait]
impl InsiderFeed for InsiderFeedClient {
    async fn latest_purchases(&self, universe: &Universe) -> Vec<InsiderRecord> {
        match self.fetch_latest().await {
            Ok(rows) => normalize_purchases(rows, universe),
            Err(e) => {
                tracing::warn!("Insider feed unavailable: {}", e);
                Vec::new()
            }
        }
    }
}
