//! Per-source pipelines: fetch normalized records, score and classify each
//! one, then enrich with an independent price-move confirmation. Each
//! pipeline runs to completion when invoked; failures are isolated at record
//! granularity and never abort siblings.

use feed_client::FeedClients;
use futures_util::future::join_all;
use price_confirm::PriceMoveConfirmator;
use sentiment_client::SentimentClient;
use signal_core::{
    ClassifiedEarnings, ClassifiedFiling, ClassifiedInsider, EarningsFeed, FilingFeed,
    InsiderFeed, PriceHistory, SentimentModel, Universe,
};
use std::cmp::Ordering;
use std::sync::Arc;
use tokio::sync::OnceCell;

type SentimentFactory = Box<dyn Fn() -> Arc<dyn SentimentModel> + Send + Sync>;

pub struct SignalPipeline {
    universe: Universe,
    earnings: Arc<dyn EarningsFeed>,
    filings: Arc<dyn FilingFeed>,
    insiders: Arc<dyn InsiderFeed>,
    confirmator: PriceMoveConfirmator<dyn PriceHistory>,
    /// The inference capability is expensive to spin up on the service side,
    /// so it is acquired once on first use and shared for the process
    /// lifetime.
    sentiment: OnceCell<Arc<dyn SentimentModel>>,
    sentiment_factory: SentimentFactory,
}

impl SignalPipeline {
    pub fn new(
        universe: Universe,
        earnings: Arc<dyn EarningsFeed>,
        filings: Arc<dyn FilingFeed>,
        insiders: Arc<dyn InsiderFeed>,
        prices: Arc<dyn PriceHistory>,
        sentiment_factory: SentimentFactory,
    ) -> Self {
        Self {
            universe,
            earnings,
            filings,
            insiders,
            confirmator: PriceMoveConfirmator::new(prices),
            sentiment: OnceCell::new(),
            sentiment_factory,
        }
    }

    /// Wire the production clients from environment configuration.
    pub fn from_env() -> Self {
        let feeds = FeedClients::with_defaults();
        Self::new(
            Universe::sp500(),
            Arc::new(feeds.earnings),
            Arc::new(feeds.filings),
            Arc::new(feeds.insiders),
            Arc::new(feeds.prices),
            Box::new(|| Arc::new(SentimentClient::from_env()) as Arc<dyn SentimentModel>),
        )
    }

    async fn sentiment(&self) -> Arc<dyn SentimentModel> {
        self.sentiment
            .get_or_init(|| async { (self.sentiment_factory)() })
            .await
            .clone()
    }

    /// Today's earnings, scored by EPS surprise. Records with a zero
    /// estimate are dropped rather than classified.
    pub async fn scan_earnings(&self) -> Vec<ClassifiedEarnings> {
        let records = self.earnings.todays_earnings(&self.universe).await;

        let mut scored = Vec::with_capacity(records.len());
        for record in records {
            match signal_engine::surprise_pct(record.estimated_eps, record.reported_eps) {
                Ok(surprise_pct) => {
                    let signal = signal_engine::classify_earnings(surprise_pct);
                    scored.push((record, surprise_pct, signal));
                }
                Err(e) => {
                    tracing::debug!("Skipping earnings record for {}: {}", record.symbol, e);
                }
            }
        }

        let moves = self
            .confirm_all(scored.iter().map(|(record, _, _)| record.symbol.as_str()))
            .await;

        scored
            .into_iter()
            .zip(moves)
            .map(
                |((record, surprise_pct, signal), price_move_pct)| ClassifiedEarnings {
                    record,
                    surprise_pct,
                    signal,
                    price_move_pct,
                },
            )
            .collect()
    }

    /// Latest event filings, scored by headline sentiment and sorted by
    /// descending score. The sort is stable: ties keep retrieval order.
    pub async fn scan_filings(&self) -> Vec<ClassifiedFiling> {
        let records = self.filings.latest_filings(&self.universe).await;
        if records.is_empty() {
            return Vec::new();
        }

        let model = self.sentiment().await;

        let mut scored = Vec::with_capacity(records.len());
        for record in records {
            let prediction = match model.infer(&record.title).await {
                Ok(prediction) => prediction,
                Err(e) => {
                    tracing::warn!("Dropping filing for {}: {}", record.symbol, e);
                    continue;
                }
            };
            let score = signal_engine::sentiment_score(&prediction.label, prediction.confidence);
            let signal = signal_engine::classify_filing(score);
            scored.push((record, score, signal));
        }

        let moves = self
            .confirm_all(scored.iter().map(|(record, _, _)| record.symbol.as_str()))
            .await;

        let mut classified: Vec<ClassifiedFiling> = scored
            .into_iter()
            .zip(moves)
            .map(|((record, score, signal), price_move_pct)| ClassifiedFiling {
                record,
                score,
                signal,
                price_move_pct,
            })
            .collect();

        classified.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
        classified
    }

    /// Latest insider open-market purchases. Everything the upstream filter
    /// admits is labeled as an insider buy.
    pub async fn scan_insiders(&self) -> Vec<ClassifiedInsider> {
        let records = self.insiders.latest_purchases(&self.universe).await;

        let moves = self
            .confirm_all(records.iter().map(|record| record.symbol.as_str()))
            .await;

        records
            .into_iter()
            .zip(moves)
            .map(|(record, price_move_pct)| ClassifiedInsider {
                record,
                signal: signal_engine::classify_insider(),
                price_move_pct,
            })
            .collect()
    }

    /// Run the confirmation lookups concurrently. Each lookup is fault
    /// isolated: one failure yields `None` for that record only.
    async fn confirm_all<'a, I>(&self, symbols: I) -> Vec<Option<f64>>
    where
        I: Iterator<Item = &'a str>,
    {
        join_all(symbols.map(|symbol| self.confirmator.latest_move_pct(symbol))).await
    }
}

impl std::fmt::Debug for SignalPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignalPipeline")
            .field("universe", &self.universe.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use signal_core::{
        EarningsRecord, FilingRecord, InsiderRecord, Recommendation, SentimentPrediction,
        SignalError,
    };
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering as AtomicOrdering};

    struct FixedEarnings(Vec<EarningsRecord>);

    #[async_trait]
    impl EarningsFeed for FixedEarnings {
        async fn todays_earnings(&self, _universe: &Universe) -> Vec<EarningsRecord> {
            self.0.clone()
        }
    }

    struct FixedFilings(Vec<FilingRecord>);

    #[async_trait]
    impl FilingFeed for FixedFilings {
        async fn latest_filings(&self, _universe: &Universe) -> Vec<FilingRecord> {
            self.0.clone()
        }
    }

    struct FixedInsiders(Vec<InsiderRecord>);

    #[async_trait]
    impl InsiderFeed for FixedInsiders {
        async fn latest_purchases(&self, _universe: &Universe) -> Vec<InsiderRecord> {
            self.0.clone()
        }
    }

    /// Closes per symbol; symbols not in the map fail the lookup.
    struct MappedCloses(HashMap<String, Vec<f64>>);

    #[async_trait]
    impl PriceHistory for MappedCloses {
        async fn recent_closes(
            &self,
            symbol: &str,
            _limit: usize,
        ) -> Result<Vec<f64>, SignalError> {
            self.0
                .get(symbol)
                .cloned()
                .ok_or_else(|| SignalError::Retrieval(format!("no history for {}", symbol)))
        }
    }

    /// Keyword-driven mock inference: "good" titles are positive, "bad"
    /// titles negative, "broken" titles fail, everything else is neutral.
    struct KeywordModel {
        confidence: f64,
    }

    #[async_trait]
    impl SentimentModel for KeywordModel {
        async fn infer(&self, text: &str) -> Result<SentimentPrediction, SignalError> {
            if text.contains("broken") {
                return Err(SignalError::Inference("model offline".to_string()));
            }
            let label = if text.contains("good") {
                "Positive"
            } else if text.contains("bad") {
                "Negative"
            } else {
                "Neutral"
            };
            Ok(SentimentPrediction {
                label: label.to_string(),
                confidence: self.confidence,
            })
        }
    }

    fn earnings_record(symbol: &str, estimate: f64, reported: f64) -> EarningsRecord {
        EarningsRecord {
            symbol: symbol.to_string(),
            company: format!("{} Inc.", symbol),
            estimated_eps: estimate,
            reported_eps: reported,
        }
    }

    fn filing_record(symbol: &str, title: &str) -> FilingRecord {
        FilingRecord {
            symbol: symbol.to_string(),
            title: title.to_string(),
            link: format!("https://example.com/{}", symbol),
        }
    }

    fn pipeline(
        earnings: Vec<EarningsRecord>,
        filings: Vec<FilingRecord>,
        insiders: Vec<InsiderRecord>,
        closes: HashMap<String, Vec<f64>>,
        confidence: f64,
    ) -> SignalPipeline {
        SignalPipeline::new(
            Universe::sp500(),
            Arc::new(FixedEarnings(earnings)),
            Arc::new(FixedFilings(filings)),
            Arc::new(FixedInsiders(insiders)),
            Arc::new(MappedCloses(closes)),
            Box::new(move || Arc::new(KeywordModel { confidence }) as Arc<dyn SentimentModel>),
        )
    }

    #[tokio::test]
    async fn earnings_beat_is_strong_buy() {
        let closes = HashMap::from([("AAPL".to_string(), vec![100.0, 105.0])]);
        let pipeline = pipeline(
            vec![earnings_record("AAPL", 1.0, 1.2)],
            vec![],
            vec![],
            closes,
            0.9,
        );

        let results = pipeline.scan_earnings().await;
        assert_eq!(results.len(), 1);
        assert!((results[0].surprise_pct - 20.0).abs() < 1e-9);
        assert_eq!(results[0].signal, Recommendation::StrongBuy);
        assert_eq!(results[0].price_move_pct, Some(5.0));
    }

    #[tokio::test]
    async fn zero_estimate_record_is_excluded() {
        let pipeline = pipeline(
            vec![
                earnings_record("AAPL", 0.0, 1.0),
                earnings_record("MSFT", 2.0, 2.0),
            ],
            vec![],
            vec![],
            HashMap::new(),
            0.9,
        );

        let results = pipeline.scan_earnings().await;
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].record.symbol, "MSFT");
        assert_eq!(results[0].signal, Recommendation::Hold);
    }

    #[tokio::test]
    async fn failed_confirmation_is_missing_not_zero() {
        let pipeline = pipeline(
            vec![earnings_record("AAPL", 1.0, 1.2)],
            vec![],
            vec![],
            HashMap::new(),
            0.9,
        );

        let results = pipeline.scan_earnings().await;
        assert_eq!(results[0].price_move_pct, None);
        assert_eq!(results[0].signal, Recommendation::StrongBuy);
    }

    #[tokio::test]
    async fn positive_filing_is_strong_buy() {
        let pipeline = pipeline(
            vec![],
            vec![filing_record("AAPL", "good quarter (AAPL)")],
            vec![],
            HashMap::new(),
            0.85,
        );

        let results = pipeline.scan_filings().await;
        assert_eq!(results.len(), 1);
        assert!((results[0].score - 0.85).abs() < 1e-9);
        assert_eq!(results[0].signal, Recommendation::StrongBuy);
    }

    #[tokio::test]
    async fn negative_filing_is_sell() {
        let pipeline = pipeline(
            vec![],
            vec![filing_record("AAPL", "bad outlook (AAPL)")],
            vec![],
            HashMap::new(),
            0.3,
        );

        let results = pipeline.scan_filings().await;
        assert!((results[0].score + 0.3).abs() < 1e-9);
        assert_eq!(results[0].signal, Recommendation::Sell);
    }

    #[tokio::test]
    async fn neutral_filing_is_hold() {
        let pipeline = pipeline(
            vec![],
            vec![filing_record("AAPL", "routine announcement (AAPL)")],
            vec![],
            HashMap::new(),
            0.95,
        );

        let results = pipeline.scan_filings().await;
        assert_eq!(results[0].score, 0.0);
        assert_eq!(results[0].signal, Recommendation::Hold);
    }

    #[tokio::test]
    async fn inference_failure_drops_only_that_record() {
        let pipeline = pipeline(
            vec![],
            vec![
                filing_record("AAPL", "broken feed entry (AAPL)"),
                filing_record("MSFT", "good quarter (MSFT)"),
            ],
            vec![],
            HashMap::new(),
            0.85,
        );

        let results = pipeline.scan_filings().await;
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].record.symbol, "MSFT");
    }

    #[tokio::test]
    async fn filings_sort_descending_and_ties_keep_retrieval_order() {
        let pipeline = pipeline(
            vec![],
            vec![
                filing_record("JPM", "routine announcement (JPM)"),
                filing_record("AAPL", "good quarter (AAPL)"),
                filing_record("MSFT", "routine announcement (MSFT)"),
            ],
            vec![],
            HashMap::new(),
            0.85,
        );

        let results = pipeline.scan_filings().await;
        let symbols: Vec<&str> = results
            .iter()
            .map(|r| r.record.symbol.as_str())
            .collect();
        // AAPL scores highest; JPM and MSFT tie at zero and keep their
        // retrieval order.
        assert_eq!(symbols, vec!["AAPL", "JPM", "MSFT"]);
    }

    #[tokio::test]
    async fn insiders_are_always_insider_buys() {
        let record = InsiderRecord {
            symbol: "AAPL".to_string(),
            trade_date: NaiveDate::from_ymd_opt(2026, 8, 5).unwrap(),
            insider_name: "Doe Jane".to_string(),
            price: 1.0,
            quantity: 1,
            value: 1.0,
        };
        let mut expensive = record.clone();
        expensive.symbol = "MSFT".to_string();
        expensive.price = 500.0;
        expensive.quantity = 1_000_000;
        expensive.value = 5e8;

        let pipeline = pipeline(vec![], vec![], vec![record, expensive], HashMap::new(), 0.9);

        let results = pipeline.scan_insiders().await;
        assert_eq!(results.len(), 2);
        assert!(results
            .iter()
            .all(|r| r.signal == Recommendation::InsiderBuy));
    }

    #[tokio::test]
    async fn sentiment_model_is_acquired_once() {
        static CALLS: AtomicUsize = AtomicUsize::new(0);

        let pipeline = SignalPipeline::new(
            Universe::sp500(),
            Arc::new(FixedEarnings(vec![])),
            Arc::new(FixedFilings(vec![filing_record("AAPL", "good (AAPL)")])),
            Arc::new(FixedInsiders(vec![])),
            Arc::new(MappedCloses(HashMap::new())),
            Box::new(|| {
                CALLS.fetch_add(1, AtomicOrdering::SeqCst);
                Arc::new(KeywordModel { confidence: 0.9 }) as Arc<dyn SentimentModel>
            }),
        );

        pipeline.scan_filings().await;
        pipeline.scan_filings().await;
        assert_eq!(CALLS.load(AtomicOrdering::SeqCst), 1);
    }
}
