//! # Storage Layer
//!
//! Decks live behind the [`DeckStore`] trait so commands can run against the
//! filesystem in production and against memory in tests.
//!
//! ## Implementations
//!
//! - [`fs::FileStore`]: one directory per deck under the deck directory
//! - [`memory::InMemoryStore`]: no persistence, for tests
//!
//! ## Storage Format
//!
//! ```text
//! decks/
//! ├── collection/
//! │   ├── raw.txt       # what the user owns (see [`raw`])
//! │   └── data.json     # cached card data (JSON array of records)
//! └── burn/
//!     └── raw.txt       # not looked up yet; needs `-get`
//! ```
//!
//! `raw.txt` is the source of truth and is edited by hand. `data.json` is
//! derived from it by looking every line up with the card provider and is
//! rewritten on each `-get`.

use crate::error::{DeckqError, Result};
use crate::model::{CardRecord, RawLine};
use chrono::{DateTime, Utc};

pub mod fs;
pub mod memory;
pub mod raw;

/// A saved deck as shown by `-decks`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeckInfo {
    pub name: String,
    pub has_raw: bool,
    /// When card data was last looked up, if ever.
    pub cached_at: Option<DateTime<Utc>>,
}

/// Abstract interface for deck storage.
pub trait DeckStore {
    /// Every saved deck, sorted by name.
    fn list_decks(&self) -> Result<Vec<DeckInfo>>;

    /// Read a deck's inventory lines.
    fn load_raw(&self, deck: &str) -> Result<Vec<RawLine>>;

    /// Read a deck's cached card data.
    fn load_cached(&self, deck: &str) -> Result<Vec<CardRecord>>;

    /// Replace a deck's inventory lines, creating the deck if needed.
    fn save_raw(&mut self, deck: &str, lines: &[RawLine]) -> Result<()>;

    /// Replace a deck's cached card data, creating the deck if needed.
    fn save_cached(&mut self, deck: &str, cards: &[CardRecord]) -> Result<()>;
}

/// Deck names map to directory names, so they can't escape the deck
/// directory or hide in it.
pub fn validate_deck_name(name: &str) -> Result<()> {
    let invalid = name.is_empty()
        || name.starts_with('.')
        || name.contains(['/', '\\'])
        || name.contains(std::path::MAIN_SEPARATOR);
    if invalid {
        return Err(DeckqError::InvalidDeckName(name.to_string()));
    }
    Ok(())
}
