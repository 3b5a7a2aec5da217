use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Discrete recommendation label attached to a classified record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Recommendation {
    StrongBuy,
    Buy,
    Hold,
    Sell,
    StrongSell,
    /// Distinguished label for admitted insider purchases. The general
    /// threshold ladder never produces this variant.
    InsiderBuy,
}

impl Recommendation {
    /// Human-readable label for table output
    pub fn label(&self) -> &'static str {
        match self {
            Recommendation::StrongBuy => "STRONG BUY",
            Recommendation::Buy => "BUY",
            Recommendation::Hold => "HOLD",
            Recommendation::Sell => "SELL",
            Recommendation::StrongSell => "STRONG SELL",
            Recommendation::InsiderBuy => "BUY (INSIDER)",
        }
    }
}

/// One scheduled earnings report, normalized from the calendar feed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EarningsRecord {
    pub symbol: String,
    pub company: String,
    pub estimated_eps: f64,
    pub reported_eps: f64,
}

/// One regulatory event filing announcement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilingRecord {
    pub symbol: String,
    pub title: String,
    pub link: String,
}

/// One insider open-market purchase disclosure. Fields pass through to
/// display untransformed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InsiderRecord {
    pub symbol: String,
    pub trade_date: NaiveDate,
    pub insider_name: String,
    pub price: f64,
    pub quantity: i64,
    pub value: f64,
}

/// Output of the external text-sentiment inference capability.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SentimentPrediction {
    pub label: String,
    pub confidence: f64,
}

/// Classified earnings record with its surprise score and confirmation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifiedEarnings {
    pub record: EarningsRecord,
    pub surprise_pct: f64,
    pub signal: Recommendation,
    /// `None` means the confirmation lookup failed or history was too short,
    /// which is distinct from an observed move of zero.
    pub price_move_pct: Option<f64>,
}

/// Classified filing record with its sentiment score and confirmation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifiedFiling {
    pub record: FilingRecord,
    pub score: f64,
    pub signal: Recommendation,
    pub price_move_pct: Option<f64>,
}

/// Classified insider record. Insider purchases carry no continuous score.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifiedInsider {
    pub record: InsiderRecord,
    pub signal: Recommendation,
    pub price_move_pct: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recommendation_labels() {
        assert_eq!(Recommendation::StrongBuy.label(), "STRONG BUY");
        assert_eq!(Recommendation::Hold.label(), "HOLD");
        assert_eq!(Recommendation::InsiderBuy.label(), "BUY (INSIDER)");
    }
}
