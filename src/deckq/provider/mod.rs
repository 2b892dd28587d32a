//! # Card Provider
//!
//! Turns raw inventory lines into full card data. The [`CardProvider`] trait
//! is the seam: [`scryfall::ScryfallProvider`] talks HTTP in production,
//! tests use the fixture provider.
//!
//! Provider responses are shaped like Scryfall card objects. Cards with more
//! than one face (transform, modal) keep some attributes only on their
//! faces; the first face fills in whatever the card itself lacks.

use crate::error::Result;
use crate::model::{CardRecord, RawLine};
use serde::Deserialize;

pub mod scryfall;

/// Looks up full card data for raw lines.
pub trait CardProvider {
    /// Fetch one card per line, in line order. Fails as a whole on the
    /// first lookup that fails.
    fn fetch_all(&self, lines: &[RawLine]) -> Result<Vec<ProviderCard>>;
}

/// Separates type from subtype in a type line.
const TYPE_SEPARATOR: &str = " \u{2014} ";
const COST_SYMBOLS: &str = "WUBRG0123456789";
const LEGAL: &str = "legal";

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ProviderCard {
    pub name: String,
    pub lang: String,
    pub mana_cost: Option<String>,
    #[serde(default)]
    pub cmc: f64,
    pub type_line: Option<String>,
    pub colors: Option<Vec<String>>,
    #[serde(default)]
    pub color_identity: Vec<String>,
    #[serde(default)]
    pub legalities: Legalities,
    #[serde(default)]
    pub set: String,
    #[serde(default)]
    pub set_name: String,
    pub collector_number: String,
    #[serde(default)]
    pub rarity: String,
    #[serde(default)]
    pub full_art: bool,
    #[serde(default)]
    pub prices: Prices,
    #[serde(default)]
    pub card_faces: Vec<CardFace>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CardFace {
    pub mana_cost: Option<String>,
    pub type_line: Option<String>,
    pub colors: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Legalities {
    #[serde(default)]
    pub modern: String,
    #[serde(default)]
    pub commander: String,
}

/// Prices as quoted by the provider: decimal strings, or null when unknown.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Prices {
    pub usd: Option<String>,
    pub usd_foil: Option<String>,
    pub eur: Option<String>,
    pub eur_foil: Option<String>,
}

impl ProviderCard {
    fn front(&self) -> Option<&CardFace> {
        self.card_faces.first()
    }

    pub fn mana_cost(&self) -> &str {
        self.mana_cost
            .as_deref()
            .or_else(|| self.front().and_then(|f| f.mana_cost.as_deref()))
            .unwrap_or_default()
    }

    pub fn type_line(&self) -> &str {
        self.type_line
            .as_deref()
            .or_else(|| self.front().and_then(|f| f.type_line.as_deref()))
            .unwrap_or_default()
    }

    pub fn colors(&self) -> &[String] {
        self.colors
            .as_deref()
            .or_else(|| self.front().and_then(|f| f.colors.as_deref()))
            .unwrap_or_default()
    }

    /// Combine with the raw line it was looked up for.
    pub fn into_record(self, line: &RawLine) -> CardRecord {
        let cost = self
            .mana_cost()
            .chars()
            .filter(|c| COST_SYMBOLS.contains(*c))
            .collect();
        let (card_type, subtype) = match self.type_line().split_once(TYPE_SEPARATOR) {
            Some((main, sub)) => (main.to_string(), Some(sub.to_string())),
            None => (self.type_line().to_string(), None),
        };
        let color = self.colors().concat();
        let (usd, eur) = if line.foil {
            (&self.prices.usd_foil, &self.prices.eur_foil)
        } else {
            (&self.prices.usd, &self.prices.eur)
        };

        CardRecord {
            amount: line.amount,
            foil: line.foil,
            cost,
            cmc: self.cmc as u32,
            card_type,
            subtype,
            color,
            identity: self.color_identity.concat(),
            modern: self.legalities.modern == LEGAL,
            commander: self.legalities.commander == LEGAL,
            set_code: if self.set.is_empty() {
                line.set.clone()
            } else {
                self.set.clone()
            },
            usd: parse_price(usd),
            eur: parse_price(eur),
            name: self.name,
            lang: self.lang,
            set: self.set_name,
            number: self.collector_number,
            rarity: self.rarity,
            fullart: self.full_art,
        }
    }
}

fn parse_price(price: &Option<String>) -> Option<f64> {
    price.as_deref().and_then(|p| p.trim().parse().ok())
}

/// Look every line up and build the records, in line order.
pub fn resolve<P: CardProvider + ?Sized>(
    provider: &P,
    lines: &[RawLine],
) -> Result<Vec<CardRecord>> {
    let cards = provider.fetch_all(lines)?;
    Ok(cards
        .into_iter()
        .zip(lines)
        .map(|(card, line)| card.into_record(line))
        .collect())
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::error::DeckqError;
    use std::cell::Cell;
    use std::collections::HashMap;

    pub fn provider_card(name: &str, set: &str, number: &str) -> ProviderCard {
        ProviderCard {
            name: name.to_string(),
            lang: "en".to_string(),
            mana_cost: Some("{R}".to_string()),
            cmc: 1.0,
            type_line: Some("Instant".to_string()),
            colors: Some(vec!["R".to_string()]),
            color_identity: vec!["R".to_string()],
            legalities: Legalities {
                modern: LEGAL.to_string(),
                commander: LEGAL.to_string(),
            },
            set: set.to_string(),
            set_name: format!("Set {}", set.to_uppercase()),
            collector_number: number.to_string(),
            rarity: "common".to_string(),
            full_art: false,
            prices: Prices {
                usd: Some("0.50".to_string()),
                usd_foil: Some("2.00".to_string()),
                eur: Some("0.40".to_string()),
                eur_foil: None,
            },
            card_faces: Vec::new(),
        }
    }

    /// Answers from a fixed table; unknown cards get a 404.
    #[derive(Default)]
    pub struct FixtureProvider {
        cards: HashMap<(String, String), ProviderCard>,
        calls: Cell<usize>,
    }

    impl FixtureProvider {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_card(mut self, card: ProviderCard) -> Self {
            let key = (card.set.clone(), card.collector_number.clone());
            self.cards.insert(key, card);
            self
        }

        /// Number of `fetch_all` calls so far.
        pub fn calls(&self) -> usize {
            self.calls.get()
        }
    }

    impl CardProvider for FixtureProvider {
        fn fetch_all(&self, lines: &[RawLine]) -> Result<Vec<ProviderCard>> {
            self.calls.set(self.calls.get() + 1);
            lines
                .iter()
                .map(|line| {
                    self.cards
                        .get(&(line.set.clone(), line.number.clone()))
                        .cloned()
                        .ok_or_else(|| DeckqError::Provider {
                            url: format!("fixture://{}/{}/{}", line.set, line.number, line.lang),
                            status: 404,
                        })
                })
                .collect()
        }
    }
}
