//! HTTP card lookups against the Scryfall API.
//!
//! Lookups for one batch run concurrently on a private tokio runtime. A new
//! request is started every `rate_limit` so the API never sees a burst, and
//! results are collected in line order regardless of completion order.

use super::{CardProvider, ProviderCard};
use crate::config::DeckqConfig;
use crate::error::{DeckqError, Result};
use crate::model::RawLine;
use log::{debug, info};
use reqwest::Client;
use std::time::Duration;

const USER_AGENT: &str = concat!("deckq/", env!("CARGO_PKG_VERSION"));

pub struct ScryfallProvider {
    api_url: String,
    rate_limit: Duration,
    timeout: Duration,
}

impl ScryfallProvider {
    pub fn new(config: &DeckqConfig) -> Self {
        Self {
            api_url: config.api_url.clone(),
            rate_limit: config.rate_limit(),
            timeout: config.timeout(),
        }
    }

    pub fn card_url(&self, line: &RawLine) -> String {
        self.api_url
            .replace("{set}", &line.set)
            .replace("{number}", &line.number)
            .replace("{lang}", &line.lang)
    }

    async fn fetch_batch(&self, lines: &[RawLine]) -> Result<Vec<ProviderCard>> {
        let client = Client::builder()
            .timeout(self.timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| DeckqError::Http(format!("Failed to create HTTP client: {e}")))?;

        let mut handles = Vec::with_capacity(lines.len());
        for (i, line) in lines.iter().enumerate() {
            if i > 0 {
                tokio::time::sleep(self.rate_limit).await;
            }
            handles.push(tokio::spawn(fetch_card(client.clone(), self.card_url(line))));
        }

        let mut cards = Vec::with_capacity(handles.len());
        for handle in handles {
            let card = handle
                .await
                .map_err(|e| DeckqError::Http(format!("Card lookup did not finish: {e}")))??;
            cards.push(card);
        }
        Ok(cards)
    }
}

impl CardProvider for ScryfallProvider {
    fn fetch_all(&self, lines: &[RawLine]) -> Result<Vec<ProviderCard>> {
        if lines.is_empty() {
            return Ok(Vec::new());
        }
        info!("looking up {} cards", lines.len());
        let cards = tokio::runtime::Runtime::new()
            .map_err(DeckqError::Io)?
            .block_on(self.fetch_batch(lines))?;
        info!("looked up {} cards", cards.len());
        Ok(cards)
    }
}

async fn fetch_card(client: Client, url: String) -> Result<ProviderCard> {
    debug!("GET {}", url);
    let response = client
        .get(&url)
        .send()
        .await
        .map_err(|e| DeckqError::Http(format!("Failed to fetch URL {url}: {e}")))?;

    let status = response.status();
    if !status.is_success() {
        return Err(DeckqError::Provider {
            url,
            status: status.as_u16(),
        });
    }

    let bytes = response
        .bytes()
        .await
        .map_err(|e| DeckqError::Http(format!("Failed to read response body: {e}")))?;
    serde_json::from_slice(&bytes).map_err(DeckqError::Serialization)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fills_the_url_template() {
        let provider = ScryfallProvider::new(&DeckqConfig::default());
        let line = RawLine::new(1, "m10", "146", "ja", false);
        assert_eq!(
            provider.card_url(&line),
            "https://api.scryfall.com/cards/m10/146/ja"
        );
    }

    #[test]
    fn custom_template_and_timing() {
        let config = DeckqConfig {
            api_url: "http://localhost:9/{lang}/{set}-{number}".to_string(),
            rate_limit_ms: 5,
            timeout_secs: 2,
            ..DeckqConfig::default()
        };
        let provider = ScryfallProvider::new(&config);
        let line = RawLine::new(1, "znr", "7", "en", false);
        assert_eq!(provider.card_url(&line), "http://localhost:9/en/znr-7");
        assert_eq!(provider.rate_limit, Duration::from_millis(5));
        assert_eq!(provider.timeout, Duration::from_secs(2));
    }

    #[test]
    fn empty_batch_makes_no_requests() {
        let config = DeckqConfig {
            api_url: "http://127.0.0.1:1/{set}/{number}/{lang}".to_string(),
            ..DeckqConfig::default()
        };
        let cards = ScryfallProvider::new(&config).fetch_all(&[]).unwrap();
        assert!(cards.is_empty());
    }
}
