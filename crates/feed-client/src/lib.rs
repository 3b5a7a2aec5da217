//! HTTP clients for the raw external feeds: the earnings calendar, the
//! event-filing stream, insider transaction disclosures, and daily close
//! history. Each client normalizes its source into universe-filtered
//! records; retrieval and parse failures stop at the adapter boundary as an
//! empty batch.

pub mod earnings;
pub mod filings;
pub mod insiders;
pub mod prices;

pub use earnings::EarningsCalendarClient;
pub use filings::{bracketed_symbol, FilingFeedClient};
pub use insiders::InsiderFeedClient;
pub use prices::PriceClient;

use std::time::Duration;

/// Fixed per-request timeout. A call that exceeds it is treated as an empty
/// or unavailable result, never retried within the same pipeline run.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

const USER_AGENT: &str = "market-whisperer/0.1";

pub(crate) fn http_client(timeout: Duration) -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(timeout)
        .user_agent(USER_AGENT)
        .build()
        .unwrap_or_else(|_| reqwest::Client::new())
}

/// Endpoint configuration for the external feeds
#[derive(Debug, Clone)]
pub struct FeedConfig {
    pub earnings_url: String,
    pub filings_feed_url: String,
    pub insider_url: String,
    pub price_url: String,
    pub timeout: Duration,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            earnings_url: std::env::var("EARNINGS_FEED_URL")
                .unwrap_or_else(|_| "http://localhost:8101".to_string()),
            filings_feed_url: std::env::var("FILINGS_FEED_URL").unwrap_or_else(|_| {
                "https://www.sec.gov/cgi-bin/browse-edgar?action=getcurrent&type=8-K&count=100&output=atom"
                    .to_string()
            }),
            insider_url: std::env::var("INSIDER_FEED_URL")
                .unwrap_or_else(|_| "http://localhost:8102".to_string()),
            price_url: std::env::var("PRICE_FEED_URL")
                .unwrap_or_else(|_| "http://localhost:8103".to_string()),
            timeout: REQUEST_TIMEOUT,
        }
    }
}

/// All feed clients bundled for the pipelines
#[derive(Clone)]
pub struct FeedClients {
    pub earnings: EarningsCalendarClient,
    pub filings: FilingFeedClient,
    pub insiders: InsiderFeedClient,
    pub prices: PriceClient,
}

impl FeedClients {
    pub fn new(config: FeedConfig) -> Self {
        Self {
            earnings: EarningsCalendarClient::new(config.earnings_url.clone(), config.timeout),
            filings: FilingFeedClient::new(config.filings_feed_url.clone(), config.timeout),
            insiders: InsiderFeedClient::new(config.insider_url.clone(), config.timeout),
            prices: PriceClient::new(config.price_url.clone(), config.timeout),
        }
    }

    pub fn with_defaults() -> Self {
        Self::new(FeedConfig::default())
    }
}
