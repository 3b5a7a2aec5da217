//! Earnings-calendar feed: scheduled reports for a given date with the
//! consensus estimate and the reported figure once available.

use crate::http_client;
use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use signal_core::{EarningsFeed, EarningsRecord, SignalError, Universe};
use std::time::Duration;

#[derive(Debug, Deserialize)]
struct CalendarResponse {
    #[serde(default)]
    results: Vec<CalendarRow>,
}

/// One raw calendar row. Estimate and reported EPS are optional because the
/// source publishes rows before companies report.
#[derive(Debug, Deserialize)]
pub struct CalendarRow {
    pub symbol: String,
    #[serde(default)]
    pub company: Option<String>,
    pub eps_estimate: Option<f64>,
    pub reported_eps: Option<f64>,
}

#[derive(Clone)]
pub struct EarningsCalendarClient {
    client: reqwest::Client,
    base_url: String,
}

impl EarningsCalendarClient {
    pub fn new(base_url: String, timeout: Duration) -> Self {
        Self {
            client: http_client(timeout),
            base_url,
        }
    }

    /// Fetch the raw calendar for one date.
    pub async fn fetch_calendar(&self, date: NaiveDate) -> Result<Vec<CalendarRow>, SignalError> {
        let url = format!("{}/v1/calendar/earnings", self.base_url);

        let response = self
            .client
            .get(&url)
            .query(&[("date", date.format("%Y-%m-%d").to_string())])
            .send()
            .await
            .map_err(|e| SignalError::Retrieval(e.to_string()))?;

        if !response.status().is_success() {
            return Err(SignalError::Retrieval(format!(
                "HTTP {}: earnings calendar",
                response.status()
            )));
        }

        let calendar: CalendarResponse = response
            .json()
            .await
            .map_err(|e| SignalError::Retrieval(e.to_string()))?;

        Ok(calendar.results)
    }
}

/// Restrict raw rows to the universe and drop any row missing a scoring
/// field. A partially populated row never reaches the engine.
pub fn normalize_calendar(rows: Vec<CalendarRow>, universe: &Universe) -> Vec<EarningsRecord> {
    rows.into_iter()
        .filter(|row| universe.contains(&row.symbol))
        .filter_map(|row| {
            let estimated_eps = row.eps_estimate?;
            let reported_eps = row.reported_eps?;
            Some(EarningsRecord {
                company: row.company.unwrap_or_else(|| row.symbol.clone()),
                symbol: row.symbol,
                estimated_eps,
                reported_eps,
            })
        })
        .collect()
}

#[async_trait]
impl EarningsFeed for EarningsCalendarClient {
    async fn todays_earnings(&self, universe: &Universe) -> Vec<EarningsRecord> {
        match self.fetch_calendar(Utc::now().date_naive()).await {
            Ok(rows) => normalize_calendar(rows, universe),
            Err(e) => {
                tracing::warn!("Earnings calendar unavailable: {}", e);
                Vec::new()
            }
        }
    }
}
