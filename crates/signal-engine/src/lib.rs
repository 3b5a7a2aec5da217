//! Scoring and classification for normalized signal records.
//!
//! Everything here is a pure function of its arguments: no I/O, no clocks,
//! no shared state. Callers decide what to do with a rejected record.

use signal_core::{Recommendation, SignalError};

/// Relative deviation of reported vs. estimated EPS, in percent.
///
/// Rejects records with a zero estimate rather than dividing by it; the
/// caller is expected to drop such records.
pub fn surprise_pct(estimated_eps: f64, reported_eps: f64) -> Result<f64, SignalError> {
    if estimated_eps == 0.0 {
        return Err(SignalError::DivisionUndefined);
    }
    Ok((reported_eps - estimated_eps) / estimated_eps.abs() * 100.0)
}

/// Threshold ladder for earnings surprises, evaluated top-down, first match
/// wins. NaN fails every comparison and lands on Hold.
pub fn classify_earnings(surprise_pct: f64) -> Recommendation {
    if surprise_pct > 15.0 {
        Recommendation::StrongBuy
    } else if surprise_pct > 5.0 {
        Recommendation::Buy
    } else if surprise_pct < -10.0 {
        Recommendation::StrongSell
    } else if surprise_pct < -3.0 {
        Recommendation::Sell
    } else {
        Recommendation::Hold
    }
}

/// Signed sentiment score in [-1, 1] from an inference output. Positive
/// labels keep the confidence, negative labels negate it, anything else
/// (neutral included) maps to zero. The label match is case-insensitive
/// since the inference service capitalizes its labels.
pub fn sentiment_score(label: &str, confidence: f64) -> f64 {
    if label.eq_ignore_ascii_case("positive") {
        confidence
    } else if label.eq_ignore_ascii_case("negative") {
        -confidence
    } else {
        0.0
    }
}

/// Threshold ladder for filing sentiment scores. Same first-match-wins
/// discipline as the earnings ladder; NaN lands on Hold.
pub fn classify_filing(score: f64) -> Recommendation {
    if score > 0.7 {
        Recommendation::StrongBuy
    } else if score > 0.4 {
        Recommendation::Buy
    } else if score < -0.5 {
        Recommendation::StrongSell
    } else if score < -0.2 {
        Recommendation::Sell
    } else {
        Recommendation::Hold
    }
}

/// Insider purchases carry no continuous score: anything admitted by the
/// upstream open-market-purchase filter is labeled unconditionally.
pub fn classify_insider() -> Recommendation {
    Recommendation::InsiderBuy
}
