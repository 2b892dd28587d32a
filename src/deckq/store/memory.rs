use super::{validate_deck_name, DeckInfo, DeckStore};
use crate::error::{DeckqError, Result};
use crate::model::{CardRecord, RawLine};
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::path::PathBuf;

#[derive(Debug, Clone, Default)]
struct Deck {
    raw: Option<Vec<RawLine>>,
    cached: Option<(Vec<CardRecord>, DateTime<Utc>)>,
}

/// Deck storage that lives only as long as the value.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    decks: BTreeMap<String, Deck>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn deck(&self, name: &str) -> Result<&Deck> {
        validate_deck_name(name)?;
        self.decks
            .get(name)
            .ok_or_else(|| DeckqError::DeckNotFound(name.to_string()))
    }

    fn deck_mut(&mut self, name: &str) -> Result<&mut Deck> {
        validate_deck_name(name)?;
        Ok(self.decks.entry(name.to_string()).or_default())
    }
}

impl DeckStore for InMemoryStore {
    fn list_decks(&self) -> Result<Vec<DeckInfo>> {
        Ok(self
            .decks
            .iter()
            .map(|(name, deck)| DeckInfo {
                name: name.clone(),
                has_raw: deck.raw.is_some(),
                cached_at: deck.cached.as_ref().map(|(_, at)| *at),
            })
            .collect())
    }

    fn load_raw(&self, deck: &str) -> Result<Vec<RawLine>> {
        self.deck(deck)?
            .raw
            .clone()
            .ok_or_else(|| DeckqError::InvalidDeck {
                path: PathBuf::from(deck).join("raw.txt"),
                reason: "file not found".to_string(),
            })
    }

    fn load_cached(&self, deck: &str) -> Result<Vec<CardRecord>> {
        self.deck(deck)?
            .cached
            .as_ref()
            .map(|(cards, _)| cards.clone())
            .ok_or_else(|| DeckqError::CacheMissing {
                path: PathBuf::from(deck).join("data.json"),
            })
    }

    fn save_raw(&mut self, deck: &str, lines: &[RawLine]) -> Result<()> {
        self.deck_mut(deck)?.raw = Some(lines.to_vec());
        Ok(())
    }

    fn save_cached(&mut self, deck: &str, cards: &[CardRecord]) -> Result<()> {
        self.deck_mut(deck)?.cached = Some((cards.to_vec(), Utc::now()));
        Ok(())
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::model::fixtures::card;

    pub struct StoreFixture {
        pub store: InMemoryStore,
    }

    impl Default for StoreFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl StoreFixture {
        pub fn new() -> Self {
            Self {
                store: InMemoryStore::new(),
            }
        }

        /// A deck with cached data for the given cards and matching raw lines.
        pub fn with_deck(mut self, deck: &str, cards: Vec<CardRecord>) -> Self {
            let lines: Vec<RawLine> = cards.iter().map(CardRecord::to_raw_line).collect();
            self.store.save_raw(deck, &lines).unwrap();
            self.store.save_cached(deck, &cards).unwrap();
            self
        }

        /// A deck with one card per name.
        pub fn with_cards(self, deck: &str, names: &[&str]) -> Self {
            let cards = names.iter().map(|name| card(name)).collect();
            self.with_deck(deck, cards)
        }

        /// A deck that has never been looked up.
        pub fn with_raw_deck(mut self, deck: &str, lines: Vec<RawLine>) -> Self {
            self.store.save_raw(deck, &lines).unwrap();
            self
        }
    }
}
