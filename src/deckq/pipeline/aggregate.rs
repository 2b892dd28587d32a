//! Summary statistics over a result set.
//!
//! Statistics are computed over the expansion multiset: every card counts
//! once per copy owned. The multiset is represented as weighted samples
//! instead of being materialized. The quantity attribute is the exception;
//! each card contributes its amount once, since weighting the amount by
//! itself would double count.

use crate::attributes::{AttrValue, Attribute, Statistic};
use crate::model::CardRecord;
use crate::query::StatRequest;
use std::borrow::Cow;
use std::collections::BTreeSet;

struct Sample<'a> {
    value: AttrValue<'a>,
    weight: u64,
}

/// Compute one statistic. `None` means there was nothing to compute it over.
pub fn aggregate(cards: &[CardRecord], request: StatRequest) -> Option<f64> {
    let samples = samples(cards, request.attr);
    if samples.is_empty() {
        return None;
    }

    if request.stat == Statistic::Unique {
        let distinct: BTreeSet<Cow<'_, str>> = samples.iter().map(|s| s.value.as_text()).collect();
        return Some(distinct.len() as f64);
    }

    let numbers: Vec<(f64, u64)> = samples
        .iter()
        .filter_map(|s| s.value.as_number().map(|v| (v, s.weight)))
        .collect();
    if numbers.is_empty() {
        return None;
    }

    match request.stat {
        Statistic::Total => Some(weighted_sum(&numbers)),
        Statistic::Max => numbers.iter().map(|(v, _)| *v).reduce(f64::max),
        Statistic::Min => numbers.iter().map(|(v, _)| *v).reduce(f64::min),
        Statistic::Avg => {
            let count: u64 = numbers.iter().map(|(_, w)| w).sum();
            Some(weighted_sum(&numbers) / count as f64)
        }
        Statistic::Median => median(numbers),
        Statistic::Unique => None,
    }
}

fn samples(cards: &[CardRecord], attr: Attribute) -> Vec<Sample<'_>> {
    cards
        .iter()
        .filter_map(|card| {
            let value = card.get_attr(attr)?;
            let weight = if attr.is_quantity() {
                1
            } else {
                u64::from(card.amount)
            };
            (weight > 0).then_some(Sample { value, weight })
        })
        .collect()
}

fn weighted_sum(numbers: &[(f64, u64)]) -> f64 {
    numbers.iter().map(|(v, w)| v * *w as f64).sum()
}

fn median(mut numbers: Vec<(f64, u64)>) -> Option<f64> {
    numbers.sort_by(|a, b| a.0.total_cmp(&b.0));
    let count: u64 = numbers.iter().map(|(_, w)| w).sum();
    let upper = nth(&numbers, count / 2)?;
    if count % 2 == 1 {
        Some(upper)
    } else {
        let lower = nth(&numbers, count / 2 - 1)?;
        Some((lower + upper) / 2.0)
    }
}

/// The value at position `index` of the expanded, sorted multiset.
fn nth(sorted: &[(f64, u64)], index: u64) -> Option<f64> {
    let mut seen = 0;
    for (value, weight) in sorted {
        seen += weight;
        if index < seen {
            return Some(*value);
        }
    }
    None
}
