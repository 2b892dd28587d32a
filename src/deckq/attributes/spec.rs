//! Attribute specifications and registry.
//!
//! This module defines the schema for card attributes: which attributes exist,
//! whether they are numeric or categorical, whether a card may lack a value,
//! and which filter operators and statistics each kind accepts.
//!
//! Permissions are derived from [`AttributeKind`] through exhaustive matches,
//! so adding an operator or statistic without deciding which kinds accept it
//! does not compile.

use super::FilterOp;
use std::fmt;

/// The kind of value an attribute holds.
///
/// Numeric attributes are compared as numbers and can be aggregated;
/// categorical attributes are compared as text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttributeKind {
    Numeric,
    Categorical,
}

impl AttributeKind {
    /// Whether a filter operator can be applied to attributes of this kind.
    pub const fn allows_op(self, op: FilterOp) -> bool {
        match op {
            FilterOp::Eq | FilterOp::Ne => true,
            FilterOp::Contains | FilterOp::NotContains => matches!(self, Self::Categorical),
            FilterOp::Lt | FilterOp::Le | FilterOp::Gt | FilterOp::Ge => {
                matches!(self, Self::Numeric)
            }
        }
    }

    /// Whether a statistic can be computed over attributes of this kind.
    pub const fn allows_stat(self, stat: Statistic) -> bool {
        match stat {
            Statistic::Unique => true,
            Statistic::Total
            | Statistic::Max
            | Statistic::Min
            | Statistic::Avg
            | Statistic::Median => matches!(self, Self::Numeric),
        }
    }

    /// Operators accepted by this kind, in canonical order.
    pub fn allowed_ops(self) -> impl Iterator<Item = FilterOp> {
        FilterOp::ALL
            .into_iter()
            .filter(move |op| self.allows_op(*op))
    }

    /// Statistics accepted by this kind, in canonical order.
    pub fn allowed_stats(self) -> impl Iterator<Item = Statistic> {
        Statistic::ALL
            .into_iter()
            .filter(move |stat| self.allows_stat(*stat))
    }
}

impl fmt::Display for AttributeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Numeric => write!(f, "numeric"),
            Self::Categorical => write!(f, "categorical"),
        }
    }
}

/// Identifier for every card attribute a query can reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Attribute {
    Amount,
    Foil,
    Name,
    Lang,
    Cost,
    Cmc,
    Type,
    Subtype,
    Color,
    Identity,
    Modern,
    Commander,
    Set,
    Number,
    Rarity,
    FullArt,
    Usd,
    Eur,
}

impl Attribute {
    /// The quantity attribute. Collapsing sums it, and its filter only
    /// runs once duplicates have been merged.
    pub const QUANTITY: Attribute = Attribute::Amount;

    pub const ALL: [Attribute; 18] = [
        Attribute::Amount,
        Attribute::Foil,
        Attribute::Name,
        Attribute::Lang,
        Attribute::Cost,
        Attribute::Cmc,
        Attribute::Type,
        Attribute::Subtype,
        Attribute::Color,
        Attribute::Identity,
        Attribute::Modern,
        Attribute::Commander,
        Attribute::Set,
        Attribute::Number,
        Attribute::Rarity,
        Attribute::FullArt,
        Attribute::Usd,
        Attribute::Eur,
    ];

    /// The name used on the command line.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Amount => "amount",
            Self::Foil => "foil",
            Self::Name => "name",
            Self::Lang => "lang",
            Self::Cost => "cost",
            Self::Cmc => "cmc",
            Self::Type => "type",
            Self::Subtype => "subtype",
            Self::Color => "color",
            Self::Identity => "identity",
            Self::Modern => "modern",
            Self::Commander => "commander",
            Self::Set => "set",
            Self::Number => "number",
            Self::Rarity => "rarity",
            Self::FullArt => "fullart",
            Self::Usd => "usd",
            Self::Eur => "eur",
        }
    }

    pub const fn kind(self) -> AttributeKind {
        match self {
            Self::Amount | Self::Cmc | Self::Usd | Self::Eur => AttributeKind::Numeric,
            Self::Foil
            | Self::Name
            | Self::Lang
            | Self::Cost
            | Self::Type
            | Self::Subtype
            | Self::Color
            | Self::Identity
            | Self::Modern
            | Self::Commander
            | Self::Set
            | Self::Number
            | Self::Rarity
            | Self::FullArt => AttributeKind::Categorical,
        }
    }

    /// Whether a card may have no value for this attribute.
    pub const fn nullable(self) -> bool {
        matches!(self, Self::Subtype | Self::Usd | Self::Eur)
    }

    pub fn is_quantity(self) -> bool {
        self == Self::QUANTITY
    }

    /// Look up an attribute by its command-line name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|attr| attr.name() == name)
    }

    pub fn allows_op(self, op: FilterOp) -> bool {
        self.kind().allows_op(op)
    }

    pub fn allows_stat(self, stat: Statistic) -> bool {
        self.kind().allows_stat(stat)
    }

    pub fn spec(self) -> &'static AttributeSpec {
        &ATTRIBUTES[self as usize]
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Aggregate statistic that can be requested over an attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Statistic {
    Total,
    Max,
    Min,
    Avg,
    Median,
    /// Number of distinct values.
    Unique,
}

impl Statistic {
    pub const ALL: [Statistic; 6] = [
        Statistic::Total,
        Statistic::Max,
        Statistic::Min,
        Statistic::Avg,
        Statistic::Median,
        Statistic::Unique,
    ];

    /// The modifier used on the command line (`-total-usd`).
    pub const fn name(self) -> &'static str {
        match self {
            Self::Total => "total",
            Self::Max => "max",
            Self::Min => "min",
            Self::Avg => "avg",
            Self::Median => "median",
            Self::Unique => "unique",
        }
    }

    /// Capitalized label used when printing a statistic line.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Total => "Total",
            Self::Max => "Max",
            Self::Min => "Min",
            Self::Avg => "Avg",
            Self::Median => "Median",
            Self::Unique => "Unique",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|stat| stat.name() == name)
    }
}

impl fmt::Display for Statistic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Specification for a single attribute.
///
/// Carries the user-facing description next to the identifier so help output
/// and documentation come from the same table as the parser.
#[derive(Debug, Clone)]
pub struct AttributeSpec {
    pub attr: Attribute,
    pub description: &'static str,
}

impl AttributeSpec {
    const fn new(attr: Attribute, description: &'static str) -> Self {
        Self { attr, description }
    }

    pub const fn name(&self) -> &'static str {
        self.attr.name()
    }

    pub const fn kind(&self) -> AttributeKind {
        self.attr.kind()
    }

}

/// Registry of all card attributes.
///
/// Entries are in [`Attribute`] declaration order so `Attribute::spec` can
/// index directly.
pub const ATTRIBUTES: &[AttributeSpec] = &[
    AttributeSpec::new(Attribute::Amount, "number of copies owned"),
    AttributeSpec::new(Attribute::Foil, "whether the copies are foil"),
    AttributeSpec::new(Attribute::Name, "card name"),
    AttributeSpec::new(Attribute::Lang, "printed language code"),
    AttributeSpec::new(Attribute::Cost, "mana cost symbols (WUBRG and generic)"),
    AttributeSpec::new(Attribute::Cmc, "converted mana cost"),
    AttributeSpec::new(Attribute::Type, "type line before the dash"),
    AttributeSpec::new(Attribute::Subtype, "type line after the dash"),
    AttributeSpec::new(Attribute::Color, "card colors"),
    AttributeSpec::new(Attribute::Identity, "commander color identity"),
    AttributeSpec::new(Attribute::Modern, "legal in modern"),
    AttributeSpec::new(Attribute::Commander, "legal in commander"),
    AttributeSpec::new(Attribute::Set, "set name"),
    AttributeSpec::new(Attribute::Number, "collector number"),
    AttributeSpec::new(Attribute::Rarity, "rarity"),
    AttributeSpec::new(Attribute::FullArt, "full art printing"),
    AttributeSpec::new(Attribute::Usd, "price in US dollars"),
    AttributeSpec::new(Attribute::Eur, "price in euros"),
];
