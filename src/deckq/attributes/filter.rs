//! Attribute filtering.
//!
//! A [`FilterGroup`] holds every alternative given for one attribute in one
//! argument (`-cmc<2/>5`). A card passes a group when it has a value for the
//! attribute and at least one clause holds; it passes a query when it passes
//! every group.
//!
//! Filters run in two phases around collapsing. The quantity of a card is
//! only meaningful once duplicates are merged, so groups on the quantity
//! attribute run after collapsing and everything else runs before.

use super::{AttrValue, Attribute};
use crate::model::CardRecord;
use log::debug;
use std::fmt;

/// Filter operation for comparing an attribute value with an operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterOp {
    /// Exact equality match.
    Eq,
    /// Not equal.
    Ne,
    /// Value contains the operand as a substring.
    Contains,
    /// Value does not contain the operand.
    NotContains,
    Lt,
    Le,
    Gt,
    Ge,
}

impl FilterOp {
    pub const ALL: [FilterOp; 8] = [
        FilterOp::Eq,
        FilterOp::Ne,
        FilterOp::Contains,
        FilterOp::NotContains,
        FilterOp::Lt,
        FilterOp::Le,
        FilterOp::Gt,
        FilterOp::Ge,
    ];

    pub const fn symbol(self) -> &'static str {
        match self {
            FilterOp::Eq => "=",
            FilterOp::Ne => "!=",
            FilterOp::Contains => "?",
            FilterOp::NotContains => "!?",
            FilterOp::Lt => "<",
            FilterOp::Le => "<=",
            FilterOp::Gt => ">",
            FilterOp::Ge => ">=",
        }
    }

    pub fn from_symbol(symbol: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|op| op.symbol() == symbol)
    }

    fn numbers(self, value: f64, operand: f64) -> bool {
        match self {
            FilterOp::Eq => value == operand,
            FilterOp::Ne => value != operand,
            FilterOp::Lt => value < operand,
            FilterOp::Le => value <= operand,
            FilterOp::Gt => value > operand,
            FilterOp::Ge => value >= operand,
            FilterOp::Contains | FilterOp::NotContains => false,
        }
    }

    fn text(self, value: &str, operand: &str) -> bool {
        match self {
            FilterOp::Eq => value == operand,
            FilterOp::Ne => value != operand,
            FilterOp::Contains => value.contains(operand),
            FilterOp::NotContains => !value.contains(operand),
            FilterOp::Lt | FilterOp::Le | FilterOp::Gt | FilterOp::Ge => false,
        }
    }
}

impl fmt::Display for FilterOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// The right-hand side of a clause, typed by the attribute kind at parse time.
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    Number(f64),
    Text(String),
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Number(n) => write!(f, "{}", n),
            Operand::Text(s) => f.write_str(s),
        }
    }
}

/// One `operator operand` alternative.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterClause {
    pub op: FilterOp,
    pub operand: Operand,
}

impl FilterClause {
    pub fn new(op: FilterOp, operand: Operand) -> Self {
        Self { op, operand }
    }

    pub fn holds(&self, value: &AttrValue<'_>) -> bool {
        match &self.operand {
            Operand::Number(n) => value
                .as_number()
                .is_some_and(|v| self.op.numbers(v, *n)),
            Operand::Text(t) => self.op.text(&value.as_text(), t),
        }
    }
}

impl fmt::Display for FilterClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.op, self.operand)
    }
}

/// All alternatives given for one attribute, OR-combined.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterGroup {
    pub attr: Attribute,
    pub clauses: Vec<FilterClause>,
}

impl FilterGroup {
    pub fn new(attr: Attribute, clauses: Vec<FilterClause>) -> Self {
        Self { attr, clauses }
    }

    /// Check if a card passes this group.
    ///
    /// Returns `false` when the card has no value for the attribute,
    /// whatever the operators are.
    pub fn matches(&self, card: &CardRecord) -> bool {
        let Some(value) = card.get_attr(self.attr) else {
            return false;
        };
        self.clauses.iter().any(|clause| clause.holds(&value))
    }
}

impl fmt::Display for FilterGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.attr)?;
        for (i, clause) in self.clauses.iter().enumerate() {
            if i > 0 {
                f.write_str("/")?;
            }
            write!(f, "{}", clause)?;
        }
        Ok(())
    }
}

/// When a filter pass runs relative to collapsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterPhase {
    /// Every group except those on the quantity attribute.
    BeforeCollapse,
    /// Only groups on the quantity attribute.
    AfterCollapse,
}

impl FilterPhase {
    pub fn includes(self, attr: Attribute) -> bool {
        match self {
            FilterPhase::BeforeCollapse => !attr.is_quantity(),
            FilterPhase::AfterCollapse => attr.is_quantity(),
        }
    }
}

/// Keep the cards that pass every group belonging to `phase`.
pub fn apply(
    cards: Vec<CardRecord>,
    groups: &[FilterGroup],
    phase: FilterPhase,
) -> Vec<CardRecord> {
    let active: Vec<&FilterGroup> = groups.iter().filter(|g| phase.includes(g.attr)).collect();
    if active.is_empty() {
        return cards;
    }

    let before = cards.len();
    let kept: Vec<CardRecord> = cards
        .into_iter()
        .filter(|card| active.iter().all(|group| group.matches(card)))
        .collect();
    debug!(
        "filter {:?}: {} groups kept {} of {} cards",
        phase,
        active.len(),
        kept.len(),
        before
    );
    kept
}
