use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::{CardRecord, RawLine};
use crate::store::DeckStore;

/// Write cards as a deck, replacing both its raw lines and its cache.
///
/// The written deck can be queried right away and refreshed with `-get`
/// later, since every card keeps the set code it was looked up with.
pub fn run<S: DeckStore>(store: &mut S, deck: &str, cards: &[CardRecord]) -> Result<CmdResult> {
    let lines: Vec<RawLine> = cards.iter().map(CardRecord::to_raw_line).collect();
    store.save_raw(deck, &lines)?;
    store.save_cached(deck, cards)?;

    let mut result = CmdResult::default();
    let total: u64 = cards.iter().map(|card| u64::from(card.amount)).sum();
    result.add_message(CmdMessage::success(format!(
        "Wrote {} cards ({} lines) to deck '{}'",
        total,
        lines.len(),
        deck
    )));
    Ok(result)
}
