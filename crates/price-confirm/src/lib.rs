//! Short-horizon price-move confirmation. Advisory enrichment only: a
//! confirmation can corroborate a signal but never gates or invalidates one.

use signal_core::PriceHistory;
use std::sync::Arc;

pub struct PriceMoveConfirmator<P: PriceHistory + ?Sized> {
    prices: Arc<P>,
}

impl<P: PriceHistory + ?Sized> PriceMoveConfirmator<P> {
    pub fn new(prices: Arc<P>) -> Self {
        Self { prices }
    }

    /// Percent change between the two most recent daily closes, rounded to
    /// two decimals.
    ///
    /// `None` marks an unavailable confirmation: a failed lookup, fewer than
    /// two observations, or a zero prior close. The marker is distinct from
    /// an observed move of zero.
    pub async fn latest_move_pct(&self, symbol: &str) -> Option<f64> {
        let closes = match self.prices.recent_closes(symbol, 2).await {
            Ok(closes) => closes,
            Err(e) => {
                tracing::warn!("Price history lookup failed for {}: {}", symbol, e);
                return None;
            }
        };

        if closes.len() < 2 {
            tracing::debug!("Fewer than two closes for {}", symbol);
            return None;
        }

        let prev = closes[closes.len() - 2];
        let last = closes[closes.len() - 1];
        if prev == 0.0 {
            tracing::debug!("Zero prior close for {}", symbol);
            return None;
        }

        Some(round2((last / prev - 1.0) * 100.0))
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
