use crate::attributes::{AttrValue, Attribute};
use serde::{Deserialize, Deserializer, Serialize};

/// One line of a deck's `raw.txt`: what the user typed in before any card
/// data was looked up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawLine {
    pub amount: u32,
    /// Set code as used by the card provider (e.g. `m10`).
    pub set: String,
    pub number: String,
    pub lang: String,
    pub foil: bool,
}

impl RawLine {
    pub fn new(amount: u32, set: &str, number: &str, lang: &str, foil: bool) -> Self {
        Self {
            amount,
            set: set.to_string(),
            number: number.to_string(),
            lang: lang.to_string(),
            foil,
        }
    }
}

/// A resolved inventory line: quantity plus every attribute the provider
/// knows about the printing.
///
/// Records are never mutated by the query pipeline; collapsing builds new
/// records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardRecord {
    pub amount: u32,
    pub foil: bool,
    pub name: String,
    pub lang: String,
    pub cost: String,
    pub cmc: u32,
    #[serde(rename = "type")]
    pub card_type: String,
    pub subtype: Option<String>,
    pub color: String,
    pub identity: String,
    pub modern: bool,
    pub commander: bool,
    /// Set name as printed (e.g. `Magic 2010`).
    pub set: String,
    /// Set code, kept so the record can be written back as a raw line.
    #[serde(default)]
    pub set_code: String,
    pub number: String,
    pub rarity: String,
    pub fullart: bool,
    #[serde(default, deserialize_with = "de_price")]
    pub usd: Option<f64>,
    #[serde(default, deserialize_with = "de_price")]
    pub eur: Option<f64>,
}

impl CardRecord {
    /// Get an attribute value.
    ///
    /// Returns `None` only for attributes the card has no value for
    /// (no subtype, no price quoted).
    pub fn get_attr(&self, attr: Attribute) -> Option<AttrValue<'_>> {
        match attr {
            Attribute::Amount => Some(AttrValue::Int(i64::from(self.amount))),
            Attribute::Foil => Some(AttrValue::Bool(self.foil)),
            Attribute::Name => Some(AttrValue::Text(&self.name)),
            Attribute::Lang => Some(AttrValue::Text(&self.lang)),
            Attribute::Cost => Some(AttrValue::Text(&self.cost)),
            Attribute::Cmc => Some(AttrValue::Int(i64::from(self.cmc))),
            Attribute::Type => Some(AttrValue::Text(&self.card_type)),
            Attribute::Subtype => self.subtype.as_deref().map(AttrValue::Text),
            Attribute::Color => Some(AttrValue::Text(&self.color)),
            Attribute::Identity => Some(AttrValue::Text(&self.identity)),
            Attribute::Modern => Some(AttrValue::Bool(self.modern)),
            Attribute::Commander => Some(AttrValue::Bool(self.commander)),
            Attribute::Set => Some(AttrValue::Text(&self.set)),
            Attribute::Number => Some(AttrValue::Text(&self.number)),
            Attribute::Rarity => Some(AttrValue::Text(&self.rarity)),
            Attribute::FullArt => Some(AttrValue::Bool(self.fullart)),
            Attribute::Usd => self.usd.map(AttrValue::Float),
            Attribute::Eur => self.eur.map(AttrValue::Float),
        }
    }

    /// The raw line that reproduces this record with its current amount.
    pub fn to_raw_line(&self) -> RawLine {
        RawLine::new(
            self.amount,
            &self.set_code,
            &self.number,
            &self.lang,
            self.foil,
        )
    }
}

/// Prices arrive as decimal strings from the provider (`"0.25"`) and as
/// numbers from our own cache; accept both, and `null`.
fn de_price<'de, D>(deserializer: D) -> std::result::Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Price {
        Number(f64),
        Text(String),
    }

    match Option::<Price>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Price::Number(n)) => Ok(Some(n)),
        Some(Price::Text(s)) => s
            .trim()
            .parse::<f64>()
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::CardRecord;

    /// A plain common with every attribute filled in. Override fields with
    /// struct update syntax: `CardRecord { amount: 3, ..card("Shock") }`.
    pub fn card(name: &str) -> CardRecord {
        CardRecord {
            amount: 1,
            foil: false,
            name: name.to_string(),
            lang: "en".to_string(),
            cost: "1R".to_string(),
            cmc: 2,
            card_type: "Instant".to_string(),
            subtype: None,
            color: "R".to_string(),
            identity: "R".to_string(),
            modern: true,
            commander: true,
            set: "Magic 2010".to_string(),
            set_code: "m10".to_string(),
            number: "1".to_string(),
            rarity: "common".to_string(),
            fullart: false,
            usd: Some(0.25),
            eur: Some(0.2),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::card;
    use super::*;

    #[test]
    fn every_attribute_resolves_on_a_full_card() {
        let full = CardRecord {
            subtype: Some("Goblin".into()),
            ..card("Goblin Guide")
        };
        for attr in Attribute::ALL {
            assert!(full.get_attr(attr).is_some(), "{} missing", attr);
        }
    }

    #[test]
    fn nullable_attributes_may_be_missing() {
        let bare = CardRecord {
            subtype: None,
            usd: None,
            eur: None,
            ..card("Island")
        };
        for attr in Attribute::ALL {
            assert_eq!(bare.get_attr(attr).is_none(), attr.nullable(), "{}", attr);
        }
    }

    #[test]
    fn cache_round_trips_through_json() {
        let original = card("Shock");
        let json = serde_json::to_string(&original).unwrap();
        assert!(json.contains("\"type\":\"Instant\""));
        let back: CardRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, original);
    }

    #[test]
    fn prices_accept_strings_and_null() {
        let mut value = serde_json::to_value(card("Shock")).unwrap();
        value["usd"] = serde_json::json!("1.75");
        value["eur"] = serde_json::Value::Null;
        let parsed: CardRecord = serde_json::from_value(value).unwrap();
        assert_eq!(parsed.usd, Some(1.75));
        assert_eq!(parsed.eur, None);
    }

    #[test]
    fn raw_line_uses_set_code() {
        let foil = CardRecord {
            amount: 4,
            foil: true,
            ..card("Shock")
        };
        assert_eq!(foil.to_raw_line(), RawLine::new(4, "m10", "1", "en", true));
    }
}
