//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer and the single
//! entry point for deckq operations, whatever the UI.
//!
//! The facade:
//! - **Takes** a parsed [`Query`] (see [`crate::query::parse`])
//! - **Dispatches** to the command functions
//! - **Returns structured types** (`Result<CmdResult>`)
//!
//! It does no printing and holds no business logic; that lives in
//! `commands/*.rs`. Parsing happens before a facade exists, so a bad token
//! is reported before the data home or any deck is touched.
//!
//! ## Generic Over Store and Provider
//!
//! `DeckqApi<S: DeckStore, P: CardProvider>`:
//! - Production: `DeckqApi<FileStore, ScryfallProvider>`
//! - Testing: `DeckqApi<InMemoryStore, FixtureProvider>`
//!
//! so everything above the store and the network can be tested without
//! touching either.

use crate::commands;
use crate::error::Result;
use crate::provider::CardProvider;
use crate::query::Query;
use crate::store::DeckStore;

/// The main API facade for deckq operations.
pub struct DeckqApi<S: DeckStore, P: CardProvider> {
    store: S,
    provider: P,
}

impl<S: DeckStore, P: CardProvider> DeckqApi<S, P> {
    pub fn new(store: S, provider: P) -> Self {
        Self { store, provider }
    }

    pub fn run_query(&mut self, query: &Query) -> Result<commands::CmdResult> {
        commands::query::run(&mut self.store, &self.provider, query)
    }
}
