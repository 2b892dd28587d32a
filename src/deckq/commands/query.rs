use crate::commands::{decks, export, fetch, CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::CardRecord;
use crate::pipeline;
use crate::provider::CardProvider;
use crate::query::{DeckSelection, Flag, Query};
use crate::store::DeckStore;
use log::debug;

/// Run a compiled query: read the selected decks, execute the pipeline,
/// write any output decks, and list decks when asked.
pub fn run<S: DeckStore, P: CardProvider + ?Sized>(
    store: &mut S,
    provider: &P,
    query: &Query,
) -> Result<CmdResult> {
    let decks = selected_decks(store, &query.decks)?;
    let cards = load_cards(store, provider, &decks, query.has_flag(Flag::Get))?;

    let outcome = pipeline::run(cards, query);
    let matched = !outcome.cards.is_empty();

    let mut result = CmdResult::default()
        .with_columns(query.display.clone())
        .with_stats(outcome.stats);
    result.no_matches = !decks.is_empty() && !matched;
    if query.has_flag(Flag::Unique) && matched {
        result.unique = Some(outcome.cards.len());
    }

    for output in &query.outputs {
        result.merge(export::run(store, output, &outcome.cards)?);
    }
    result = result.with_cards(outcome.cards);

    if query.has_flag(Flag::Decks) {
        result.merge(decks::run(store)?);
    }

    if decks.is_empty() && !query.has_flag(Flag::Decks) {
        result.add_message(CmdMessage::info(
            "No deck selected. Name a deck, use '*' for all decks or '-decks' to list them",
        ));
    }

    Ok(result)
}

/// Deck names to read, wildcard expanded, each at most once.
fn selected_decks<S: DeckStore>(store: &S, selection: &DeckSelection) -> Result<Vec<String>> {
    let mut names = if selection.all {
        decks::all_names(store)?
    } else {
        Vec::new()
    };
    for name in &selection.named {
        if !names.contains(name) {
            names.push(name.clone());
        }
    }
    Ok(names)
}

fn load_cards<S: DeckStore, P: CardProvider + ?Sized>(
    store: &mut S,
    provider: &P,
    decks: &[String],
    refresh: bool,
) -> Result<Vec<CardRecord>> {
    let mut cards = Vec::new();
    for deck in decks {
        let deck_cards = if refresh {
            fetch::refresh(store, provider, deck)?
        } else {
            store.load_cached(deck)?
        };
        debug!("deck '{}': {} cards", deck, deck_cards.len());
        cards.extend(deck_cards);
    }
    Ok(cards)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attributes::{Attribute, Statistic};
    use crate::error::DeckqError;
    use crate::model::fixtures::card;
    use crate::model::RawLine;
    use crate::provider::fixtures::{provider_card, FixtureProvider};
    use crate::query::parse;
    use crate::store::memory::fixtures::StoreFixture;
    use crate::store::memory::InMemoryStore;

    fn query(tokens: &[&str]) -> Query {
        parse(tokens).unwrap()
    }

    fn burn_and_collection() -> InMemoryStore {
        StoreFixture::new()
            .with_deck(
                "burn",
                vec![
                    CardRecord {
                        amount: 4,
                        usd: Some(1.0),
                        ..card("Lightning Bolt")
                    },
                    CardRecord {
                        amount: 2,
                        usd: Some(0.25),
                        ..card("Shock")
                    },
                ],
            )
            .with_deck(
                "collection",
                vec![CardRecord {
                    amount: 1,
                    usd: Some(0.25),
                    ..card("Shock")
                }],
            )
            .store
    }

    #[test]
    fn two_decks_merge_duplicates() {
        let mut store = burn_and_collection();
        let result = run(
            &mut store,
            &FixtureProvider::new(),
            &query(&["-name", "-amount", "burn", "collection"]),
        )
        .unwrap();

        assert_eq!(result.columns, vec![Attribute::Name, Attribute::Amount]);
        assert_eq!(result.cards.len(), 2);
        assert_eq!(result.cards[0].name, "Lightning Bolt");
        assert_eq!(result.cards[1].name, "Shock");
        assert_eq!(result.cards[1].amount, 3);
        assert!(!result.no_matches);
    }

    #[test]
    fn wildcard_reads_every_deck_once() {
        let mut store = burn_and_collection();
        let result = run(
            &mut store,
            &FixtureProvider::new(),
            &query(&["-total-amount", "*", "burn"]),
        )
        .unwrap();
        assert_eq!(result.stats.len(), 1);
        assert_eq!(result.stats[0].value, Some(7.0));
    }

    #[test]
    fn stats_and_unique_count() {
        let mut store = burn_and_collection();
        let result = run(
            &mut store,
            &FixtureProvider::new(),
            &query(&["-name", "-total-usd", "-unique", "*"]),
        )
        .unwrap();
        assert_eq!(result.stats[0].request.stat, Statistic::Total);
        assert_eq!(result.stats[0].value, Some(4.75));
        assert_eq!(result.unique, Some(2));
    }

    #[test]
    fn no_matches_still_reports_stats() {
        let mut store = burn_and_collection();
        let result = run(
            &mut store,
            &FixtureProvider::new(),
            &query(&["-usd>=10", "-total-usd", "-unique", "burn"]),
        )
        .unwrap();
        assert!(result.cards.is_empty());
        assert!(result.no_matches);
        assert_eq!(result.unique, None);
        assert_eq!(result.stats[0].value, None);
    }

    #[test]
    fn missing_cache_is_an_error() {
        let mut store = StoreFixture::new()
            .with_raw_deck("burn", vec![RawLine::new(1, "m10", "1", "en", false)])
            .store;
        let err = run(&mut store, &FixtureProvider::new(), &query(&["-name", "burn"])).unwrap_err();
        assert!(matches!(err, DeckqError::CacheMissing { .. }));
    }

    #[test]
    fn get_refreshes_from_the_provider() {
        let mut store = StoreFixture::new()
            .with_raw_deck("burn", vec![RawLine::new(3, "m10", "1", "en", false)])
            .store;
        let provider = FixtureProvider::new().with_card(provider_card("Shock", "m10", "1"));

        let result = run(&mut store, &provider, &query(&["-name", "-get", "burn"])).unwrap();
        assert_eq!(result.cards[0].name, "Shock");
        assert_eq!(result.cards[0].amount, 3);
        assert_eq!(provider.calls(), 1);

        // Cached now, no lookup needed.
        let result = run(&mut store, &provider, &query(&["-name", "burn"])).unwrap();
        assert_eq!(result.cards[0].name, "Shock");
        assert_eq!(provider.calls(), 1);
    }

    #[test]
    fn into_writes_the_result_as_a_deck() {
        let mut store = burn_and_collection();
        let result = run(
            &mut store,
            &FixtureProvider::new(),
            &query(&["-name", "-name=Shock", "*", "-into", "shocks"]),
        )
        .unwrap();
        assert_eq!(result.messages.len(), 1);

        let written = store.load_cached("shocks").unwrap();
        assert_eq!(written.len(), 1);
        assert_eq!(written[0].amount, 3);
        assert_eq!(
            store.load_raw("shocks").unwrap(),
            vec![RawLine::new(3, "m10", "1", "en", false)]
        );
    }

    #[test]
    fn decks_flag_lists_decks() {
        let mut store = burn_and_collection();
        let result = run(&mut store, &FixtureProvider::new(), &query(&["-decks"])).unwrap();
        let names: Vec<_> = result
            .listed_decks
            .unwrap()
            .into_iter()
            .map(|deck| deck.name)
            .collect();
        assert_eq!(names, vec!["burn", "collection"]);
        assert!(result.messages.is_empty());
        assert!(!result.no_matches);
    }

    #[test]
    fn nothing_selected_gets_a_hint() {
        let mut store = burn_and_collection();
        let result = run(&mut store, &FixtureProvider::new(), &query(&["-name"])).unwrap();
        assert!(result.cards.is_empty());
        assert!(!result.no_matches);
        assert_eq!(result.messages.len(), 1);
    }

    #[test]
    fn unknown_deck_is_an_error() {
        let mut store = burn_and_collection();
        let err = run(&mut store, &FixtureProvider::new(), &query(&["ghost"])).unwrap_err();
        assert_eq!(err.to_string(), "Deck not found: 'ghost'");
    }
}
