//! Event-filing feed: recent 8-K announcements published as an Atom stream.
//! The entity ticker is carried inside the entry title as a bracketed token,
//! e.g. `ACME CORP (ACME) (Filer)`.

use crate::http_client;
use async_trait::async_trait;
use serde::Deserialize;
use signal_core::{FilingFeed, FilingRecord, SignalError, Universe};
use std::time::Duration;

#[derive(Debug, Deserialize)]
struct AtomFeed {
    #[serde(default, rename = "entry")]
    entries: Vec<AtomEntry>,
}

#[derive(Debug, Deserialize)]
pub struct AtomEntry {
    pub title: String,
    #[serde(default, rename = "link")]
    pub links: Vec<AtomLink>,
}

#[derive(Debug, Deserialize)]
pub struct AtomLink {
    #[serde(rename = "@href")]
    pub href: String,
}

/// First non-empty bracketed token in a filing title, or `None` when the
/// title carries no such token. Malformed titles are a normal input, not an
/// error.
pub fn bracketed_symbol(title: &str) -> Option<&str> {
    let mut rest = title;
    while let Some(start) = rest.find('(') {
        let tail = &rest[start + 1..];
        match tail.find(')') {
            Some(0) => rest = &tail[1..],
            Some(end) => return Some(&tail[..end]),
            None => return None,
        }
    }
    None
}

#[derive(Clone)]
pub struct FilingFeedClient {
    client: reqwest::Client,
    feed_url: String,
}

impl FilingFeedClient {
    pub fn new(feed_url: String, timeout: Duration) -> Self {
        Self {
            client: http_client(timeout),
            feed_url,
        }
    }

    /// Fetch and parse the raw Atom feed.
    pub async fn fetch_feed(&self) -> Result<Vec<AtomEntry>, SignalError> {
        let response = self
            .client
            .get(&self.feed_url)
            .send()
            .await
            .map_err(|e| SignalError::Retrieval(e.to_string()))?;

        if !response.status().is_success() {
            return Err(SignalError::Retrieval(format!(
                "HTTP {}: filing feed",
                response.status()
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| SignalError::Retrieval(e.to_string()))?;

        let feed: AtomFeed = quick_xml::de::from_str(&body)
            .map_err(|e| SignalError::Retrieval(format!("Atom parse: {}", e)))?;

        Ok(feed.entries)
    }
}

/// Keep entries whose title carries a universe ticker and a link. Entries
/// with no bracketed token, an unknown ticker, or no link are dropped.
pub fn normalize_filings(entries: Vec<AtomEntry>, universe: &Universe) -> Vec<FilingRecord> {
    entries
        .into_iter()
        .filter_map(|entry| {
            let symbol = bracketed_symbol(&entry.title)?;
            if !universe.contains(symbol) {
                return None;
            }
            let symbol = symbol.to_string();
            let link = entry.links.into_iter().next()?.href;
            Some(FilingRecord {
                symbol,
                title: entry.title,
                link,
            })
        })
        .collect()
}

#[async_trait]
impl FilingFeed for FilingFeedClient {
    async fn latest_filings(&self, universe: &Universe) -> Vec<FilingRecord> {
        match self.fetch_feed().await {
            Ok(entries) => normalize_filings(entries, universe),
            Err(e) => {
                tracing::warn!("Filing feed unavailable: {}", e);
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bracketed_symbol_first_token() {
        assert_eq!(bracketed_symbol("8-K - ACME CORP (ACME) (Filer)"), Some("ACME"));
    }

    #[test]
    fn bracketed_symbol_none_without_brackets() {
        assert_eq!(bracketed_symbol("8-K - ACME CORP"), None);
        assert_eq!(bracketed_symbol("8-K - ACME (unterminated"), None);
    }

    #[test]
    fn bracketed_symbol_skips_empty_parens() {
        assert_eq!(bracketed_symbol("ACME () CORP (ACME)"), Some("ACME"));
    }

    #[test]
    fn atom_feed_parses() {
        let body = r#"<?xml version="1.0" encoding="ISO-8859-1"?>
<feed xmlns="http://www.w3.org/2005/Atom">
  <title>Latest Filings</title>
  <entry>
    <title>8-K - APPLE INC. (AAPL) (Filer)</title>
    <link rel="alternate" type="text/html" href="https://example.com/filing/1"/>
    <updated>2026-08-06T09:15:00-04:00</updated>
  </entry>
  <entry>
    <title>8-K - UNKNOWN CO (ZZZZ) (Filer)</title>
    <link rel="alternate" type="text/html" href="https://example.com/filing/2"/>
  </entry>
</feed>"#;

        let feed: AtomFeed = quick_xml::de::from_str(body).unwrap();
        assert_eq!(feed.entries.len(), 2);
        assert_eq!(feed.entries[0].links[0].href, "https://example.com/filing/1");
    }

    #[test]
    fn normalize_filters_universe_and_missing_links() {
        let universe = Universe::from_symbols(vec!["AAPL".to_string()]);
        let entries = vec![
            AtomEntry {
                title: "8-K - APPLE INC. (AAPL) (Filer)".to_string(),
                links: vec![AtomLink {
                    href: "https://example.com/filing/1".to_string(),
                }],
            },
            AtomEntry {
                title: "8-K - UNKNOWN CO (ZZZZ) (Filer)".to_string(),
                links: vec![AtomLink {
                    href: "https://example.com/filing/2".to_string(),
                }],
            },
            AtomEntry {
                title: "8-K - APPLE INC. (AAPL) (Filer)".to_string(),
                links: vec![],
            },
            AtomEntry {
                title: "8-K - NO TICKER HERE".to_string(),
                links: vec![AtomLink {
                    href: "https://example.com/filing/3".to_string(),
                }],
            },
        ];

        let records = normalize_filings(entries, &universe);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].symbol, "AAPL");
        assert_eq!(records[0].link, "https://example.com/filing/1");
    }
}
