use crate::{
    EarningsRecord, FilingRecord, InsiderRecord, SentimentPrediction, SignalError, Universe,
};
use async_trait::async_trait;

/// Earnings-calendar feed adapter. Implementations restrict output to the
/// universe and recover any retrieval or parse failure as an empty batch.
#[async_trait]
pub trait EarningsFeed: Send + Sync {
    async fn todays_earnings(&self, universe: &Universe) -> Vec<EarningsRecord>;
}

/// Event-filing feed adapter.
#[async_trait]
pub trait FilingFeed: Send + Sync {
    async fn latest_filings(&self, universe: &Universe) -> Vec<FilingRecord>;
}

/// Insider-transaction feed adapter. Only open-market purchases are emitted.
#[async_trait]
pub trait InsiderFeed: Send + Sync {
    async fn latest_purchases(&self, universe: &Universe) -> Vec<InsiderRecord>;
}

/// Daily close history for one symbol, oldest first.
#[async_trait]
pub trait PriceHistory: Send + Sync {
    async fn recent_closes(&self, symbol: &str, limit: usize) -> Result<Vec<f64>, SignalError>;
}

/// External text-sentiment inference capability.
#[async_trait]
pub trait SentimentModel: Send + Sync {
    async fn infer(&self, text: &str) -> Result<SentimentPrediction, SignalError>;
}
