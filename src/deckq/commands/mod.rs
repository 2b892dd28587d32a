//! # Commands
//!
//! Business logic for each operation. Commands take a store (and a provider
//! where cards may be looked up), do their work and return a [`CmdResult`]:
//! plain data for the CLI to print. Nothing here writes to stdout.

use crate::attributes::Attribute;
use crate::model::CardRecord;
use crate::pipeline::StatLine;
use crate::store::DeckInfo;

pub mod decks;
pub mod export;
pub mod fetch;
pub mod query;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    /// Columns of the result table, in order.
    pub columns: Vec<Attribute>,
    pub cards: Vec<CardRecord>,
    pub stats: Vec<StatLine>,
    /// Number of result rows, when `-unique` asked for it.
    pub unique: Option<usize>,
    /// Decks were read but no card survived the query.
    pub no_matches: bool,
    /// Saved decks, when `-decks` asked for them.
    pub listed_decks: Option<Vec<DeckInfo>>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_columns(mut self, columns: Vec<Attribute>) -> Self {
        self.columns = columns;
        self
    }

    pub fn with_cards(mut self, cards: Vec<CardRecord>) -> Self {
        self.cards = cards;
        self
    }

    pub fn with_stats(mut self, stats: Vec<StatLine>) -> Self {
        self.stats = stats;
        self
    }

    pub fn with_listed_decks(mut self, decks: Vec<DeckInfo>) -> Self {
        self.listed_decks = Some(decks);
        self
    }

    /// Fold another result's messages and listing into this one.
    pub fn merge(&mut self, other: CmdResult) {
        self.messages.extend(other.messages);
        if other.listed_decks.is_some() {
            self.listed_decks = other.listed_decks;
        }
    }
}
