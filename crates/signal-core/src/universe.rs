use std::collections::HashSet;

/// Tracked S&P 500 constituents. Feeds are restricted to this set before any
/// scoring happens.
pub const SP500: &[&str] = &[
    "AAPL", "MSFT", "GOOGL", "AMZN", "NVDA", "META", "TSLA", "BRK.B", "JPM", "V",
    "JNJ", "PG", "UNH", "HD", "MA", "DIS", "NFLX", "ADBE", "CRM", "PYPL",
    "INTC", "AMD", "CSCO", "PEP", "ABBV", "TMO", "AVGO", "COST", "MCD", "ABT",
    "WMT", "ACN", "LIN", "NEE", "DHR", "TXN", "HON", "ORCL", "NKE", "QCOM",
    "LOW", "SBUX", "IBM", "GE", "CAT", "GS", "BLK", "AXP", "BKNG", "MDT",
    "CVS", "GILD", "ISRG", "SYK", "LRCX", "NOW", "MU", "ADP", "LMT", "BA",
    "PLD", "AMT", "SCHW", "T", "VZ", "CME", "PNC", "USB", "COF", "AON",
    "MMC", "CB", "PGR", "AFL", "MET", "TRV", "ALL", "PRU", "AIG", "BK",
    "SPGI", "MCO", "ICE", "CMG", "KLAC", "SNPS", "CDNS", "FTNT", "PANW",
    "CRWD", "ZS", "DDOG", "NET", "DOCU", "TWLO", "OKTA", "RBLX", "SNOW",
];

/// Fixed set of entity identifiers the system tracks. Membership is
/// exact-match and case-sensitive.
#[derive(Debug, Clone)]
pub struct Universe {
    symbols: HashSet<String>,
}

impl Universe {
    /// Universe over the tracked S&P 500 list.
    pub fn sp500() -> Self {
        Self::from_symbols(SP500.iter().map(|s| s.to_string()))
    }

    pub fn from_symbols<I: IntoIterator<Item = String>>(symbols: I) -> Self {
        Self {
            symbols: symbols.into_iter().collect(),
        }
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.symbols.contains(symbol)
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

impl Default for Universe {
    fn default() -> Self {
        Self::sp500()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn membership_is_exact_match() {
        let universe = Universe::sp500();
        assert!(universe.contains("AAPL"));
        assert!(universe.contains("BRK.B"));
        assert!(!universe.contains("ZZZZ"));
    }

    #[test]
    fn membership_is_case_sensitive() {
        let universe = Universe::sp500();
        assert!(!universe.contains("aapl"));
        assert!(!universe.contains("Aapl"));
    }

    #[test]
    fn custom_universe() {
        let universe = Universe::from_symbols(vec!["ACME".to_string()]);
        assert!(universe.contains("ACME"));
        assert!(!universe.contains("AAPL"));
        assert_eq!(universe.len(), 1);
    }
}
