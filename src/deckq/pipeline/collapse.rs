//! Merging duplicate cards.
//!
//! Two cards are duplicates when they agree on every grouping attribute
//! (everything shown or aggregated, except the quantity). The first card of
//! each group is kept and the others' amounts are added to it, so cards that
//! differ only in columns nobody asked for end up as one row.

use crate::attributes::Attribute;
use crate::model::CardRecord;
use log::debug;

/// Collapse `cards` on `grouping`, keeping first-appearance order.
///
/// Every card is compared with the groups built so far, which keeps the
/// fold stable at the price of quadratic time.
pub fn collapse(cards: Vec<CardRecord>, grouping: &[Attribute]) -> Vec<CardRecord> {
    let before = cards.len();
    let mut collapsed: Vec<CardRecord> = Vec::new();

    for card in cards {
        match collapsed
            .iter_mut()
            .find(|kept| same_on(kept, &card, grouping))
        {
            Some(kept) => kept.amount = kept.amount.saturating_add(card.amount),
            None => collapsed.push(card),
        }
    }

    debug!(
        "collapse on {:?}: {} cards into {}",
        grouping,
        before,
        collapsed.len()
    );
    collapsed
}

fn same_on(a: &CardRecord, b: &CardRecord, grouping: &[Attribute]) -> bool {
    grouping
        .iter()
        .filter(|attr| !attr.is_quantity())
        .all(|attr| a.get_attr(*attr) == b.get_attr(*attr))
}
