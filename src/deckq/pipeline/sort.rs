use crate::attributes::{compare_optional, Attribute};
use crate::model::CardRecord;
use std::cmp::Ordering;

/// Order cards by the shown attributes, first attribute first.
///
/// Stable: cards equal on every shown attribute keep their relative order.
/// A card missing a value sorts before one that has it.
pub fn sort(mut cards: Vec<CardRecord>, display: &[Attribute]) -> Vec<CardRecord> {
    if !display.is_empty() {
        cards.sort_by(|a, b| compare(a, b, display));
    }
    cards
}

pub fn compare(a: &CardRecord, b: &CardRecord, display: &[Attribute]) -> Ordering {
    display
        .iter()
        .map(|attr| compare_optional(a.get_attr(*attr), b.get_attr(*attr)))
        .find(|ordering| ordering.is_ne())
        .unwrap_or(Ordering::Equal)
}
