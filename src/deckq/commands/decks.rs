use crate::commands::CmdResult;
use crate::error::Result;
use crate::store::DeckStore;

pub fn run<S: DeckStore>(store: &S) -> Result<CmdResult> {
    let decks = store.list_decks()?;
    Ok(CmdResult::default().with_listed_decks(decks))
}

/// Names of every saved deck, for the wildcard.
pub fn all_names<S: DeckStore>(store: &S) -> Result<Vec<String>> {
    Ok(store
        .list_decks()?
        .into_iter()
        .map(|deck| deck.name)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RawLine;
    use crate::store::memory::fixtures::StoreFixture;
    use crate::store::memory::InMemoryStore;

    #[test]
    fn lists_every_deck() {
        let store = StoreFixture::new()
            .with_cards("collection", &["A", "B"])
            .with_raw_deck("wishlist", vec![RawLine::new(1, "m10", "1", "en", false)])
            .store;

        let result = run(&store).unwrap();
        let decks = result.listed_decks.unwrap();
        assert_eq!(decks.len(), 2);
        assert_eq!(decks[0].name, "collection");
        assert!(decks[0].cached_at.is_some());
        assert!(decks[1].cached_at.is_none());
    }

    #[test]
    fn empty_store_lists_nothing() {
        let store = InMemoryStore::new();
        assert_eq!(run(&store).unwrap().listed_decks, Some(vec![]));
        assert!(all_names(&store).unwrap().is_empty());
    }
}
