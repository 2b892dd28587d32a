//! # Query Pipeline
//!
//! Executes a compiled [`Query`] over a set of cards. Every stage takes the
//! card set by value and hands back the next one:
//!
//! ```text
//! cards ─► filter (before) ─► collapse ─► filter (after) ─► sort ─► stats
//! ```
//!
//! - [`crate::attributes::apply`] drops cards failing a filter group. Groups
//!   on the quantity run after collapsing, all others before.
//! - [`collapse::collapse`] merges cards equal on the grouping attributes.
//! - [`sort::sort`] orders the result by the shown columns.
//! - [`aggregate::aggregate`] evaluates each requested statistic over the
//!   final result.
//!
//! The pipeline is synchronous and does no I/O.

use crate::attributes::{apply, FilterPhase};
use crate::model::CardRecord;
use crate::query::{Query, StatRequest};
use log::debug;

pub mod aggregate;
pub mod collapse;
pub mod sort;

/// One evaluated statistic; `value` is `None` when there was no data.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatLine {
    pub request: StatRequest,
    pub value: Option<f64>,
}

/// What a query run produced.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Outcome {
    pub cards: Vec<CardRecord>,
    pub stats: Vec<StatLine>,
}

pub fn run(cards: Vec<CardRecord>, query: &Query) -> Outcome {
    debug!("pipeline start: {} cards", cards.len());

    let cards = apply(cards, &query.filters, FilterPhase::BeforeCollapse);
    let cards = collapse::collapse(cards, &query.grouping_attributes());
    let cards = apply(cards, &query.filters, FilterPhase::AfterCollapse);
    let cards = sort::sort(cards, &query.display);

    let stats = query
        .stats
        .iter()
        .map(|request| StatLine {
            request: *request,
            value: aggregate::aggregate(&cards, *request),
        })
        .collect();

    debug!("pipeline done: {} cards", cards.len());
    Outcome { cards, stats }
}
