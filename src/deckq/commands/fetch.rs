use crate::error::Result;
use crate::model::CardRecord;
use crate::provider::{resolve, CardProvider};
use crate::store::DeckStore;
use log::info;

/// Look a deck's raw lines up again and replace its cached data.
///
/// The raw file is validated before any lookup, and the cache is only
/// written once every lookup succeeded.
pub fn refresh<S: DeckStore, P: CardProvider + ?Sized>(
    store: &mut S,
    provider: &P,
    deck: &str,
) -> Result<Vec<CardRecord>> {
    let lines = store.load_raw(deck)?;
    info!("refreshing deck '{}' ({} lines)", deck, lines.len());
    let cards = resolve(provider, &lines)?;
    store.save_cached(deck, &cards)?;
    Ok(cards)
}
