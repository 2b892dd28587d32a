//! # Query Language
//!
//! A query is the list of command-line arguments, one concept per argument:
//!
//! | Token | Meaning |
//! |-------|---------|
//! | `-name` | show the `name` column (also sorts by it) |
//! | `-usd>=10` | keep cards worth at least $10 and show the column |
//! | `-rarity#=rare/=mythic` | keep rares or mythics, don't show the column |
//! | `-total-usd` | print the total price of the result |
//! | `-max-min-cmc` | print both the highest and lowest mana value |
//! | `-unique-name` | print the number of distinct names |
//! | `-unique` `-decks` `-get` | flags (row count, deck listing, refresh from the provider) |
//! | `burn` | read the deck called `burn` |
//! | `*` | read every known deck |
//! | `-into sideboard` | write the result as the deck called `sideboard` |
//!
//! Each argument parses on its own into a [`Directive`]; the directive list
//! then compiles into a [`Query`], the plan the pipeline executes.

use crate::attributes::{Attribute, FilterClause, FilterGroup, Statistic};
use std::collections::BTreeSet;
use std::fmt;

pub mod parser;

pub use parser::{parse, parse_directives};

/// The deck token that selects every known deck.
pub const WILDCARD: &str = "*";

/// Standalone switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Flag {
    /// Print the number of result rows.
    Unique,
    /// List every known deck.
    Decks,
    /// Look up card data from the provider instead of the cache.
    Get,
    /// The next deck token names an output deck instead of an input.
    Into,
}

impl Flag {
    pub const ALL: [Flag; 4] = [Flag::Unique, Flag::Decks, Flag::Get, Flag::Into];

    pub const fn name(self) -> &'static str {
        match self {
            Flag::Unique => "unique",
            Flag::Decks => "decks",
            Flag::Get => "get",
            Flag::Into => "into",
        }
    }

    pub const fn description(self) -> &'static str {
        match self {
            Flag::Unique => "print the number of result rows",
            Flag::Decks => "list saved decks",
            Flag::Get => "refresh card data from the provider",
            Flag::Into => "write the result to the next deck named",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|flag| flag.name() == name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeckSelector {
    All,
    Named(String),
}

/// One parsed argument.
#[derive(Debug, Clone, PartialEq)]
pub enum Directive {
    Display(Attribute),
    Filter {
        attr: Attribute,
        display: bool,
        clauses: Vec<FilterClause>,
    },
    Stat {
        attr: Attribute,
        stat: Statistic,
    },
    Flag(Flag),
    Deck(DeckSelector),
    /// A deck name consumed by a preceding `-into`.
    Output(String),
}

/// Renders the directive back to a token that parses to the same directive.
impl fmt::Display for Directive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Directive::Display(attr) => write!(f, "-{}", attr),
            Directive::Filter {
                attr,
                display,
                clauses,
            } => {
                write!(f, "-{}", attr)?;
                if !display {
                    write!(f, "{}", parser::HIDE_MARKER)?;
                }
                for (i, clause) in clauses.iter().enumerate() {
                    if i > 0 {
                        write!(f, "{}", parser::ALTERNATIVE_SEPARATOR)?;
                    }
                    write!(f, "{}", clause)?;
                }
                Ok(())
            }
            Directive::Stat { attr, stat } => write!(f, "-{}-{}", stat, attr),
            Directive::Flag(flag) => write!(f, "-{}", flag.name()),
            Directive::Deck(DeckSelector::All) => f.write_str(WILDCARD),
            Directive::Deck(DeckSelector::Named(name)) => f.write_str(name),
            Directive::Output(name) => f.write_str(name),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatRequest {
    pub attr: Attribute,
    pub stat: Statistic,
}

/// Which decks feed the query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeckSelection {
    /// The wildcard was given.
    pub all: bool,
    /// Explicitly named decks, in order of first mention.
    pub named: Vec<String>,
}

impl DeckSelection {
    pub fn is_empty(&self) -> bool {
        !self.all && self.named.is_empty()
    }
}

/// The compiled plan for one run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Query {
    /// Columns to show, in order of first mention. Also the sort keys.
    pub display: Vec<Attribute>,
    /// AND-combined filter groups.
    pub filters: Vec<FilterGroup>,
    pub stats: Vec<StatRequest>,
    pub flags: BTreeSet<Flag>,
    pub decks: DeckSelection,
    /// Decks to write the result to.
    pub outputs: Vec<String>,
}

impl Query {
    pub fn from_directives(directives: Vec<Directive>) -> Self {
        let mut query = Query::default();
        for directive in directives {
            match directive {
                Directive::Display(attr) => query.show(attr),
                Directive::Filter {
                    attr,
                    display,
                    clauses,
                } => {
                    query.filters.push(FilterGroup::new(attr, clauses));
                    if display {
                        query.show(attr);
                    }
                }
                Directive::Stat { attr, stat } => query.stats.push(StatRequest { attr, stat }),
                Directive::Flag(flag) => {
                    query.flags.insert(flag);
                }
                Directive::Deck(DeckSelector::All) => query.decks.all = true,
                Directive::Deck(DeckSelector::Named(name)) => {
                    push_unique(&mut query.decks.named, name)
                }
                Directive::Output(name) => push_unique(&mut query.outputs, name),
            }
        }
        query
    }

    pub fn has_flag(&self, flag: Flag) -> bool {
        self.flags.contains(&flag)
    }

    /// Attributes two cards must agree on to be collapsed into one: every
    /// shown or aggregated attribute except the quantity.
    pub fn grouping_attributes(&self) -> Vec<Attribute> {
        let mut grouping = Vec::new();
        let candidates = self
            .display
            .iter()
            .copied()
            .chain(self.stats.iter().map(|req| req.attr));
        for attr in candidates {
            if !attr.is_quantity() && !grouping.contains(&attr) {
                grouping.push(attr);
            }
        }
        grouping
    }

    fn show(&mut self, attr: Attribute) {
        if !self.display.contains(&attr) {
            self.display.push(attr);
        }
    }
}

fn push_unique(list: &mut Vec<String>, name: String) {
    if !list.contains(&name) {
        list.push(name);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attributes::{FilterOp, Operand};

    #[test]
    fn display_is_deduplicated_in_first_mention_order() {
        let query = Query::from_directives(vec![
            Directive::Display(Attribute::Set),
            Directive::Display(Attribute::Name),
            Directive::Display(Attribute::Set),
        ]);
        assert_eq!(query.display, vec![Attribute::Set, Attribute::Name]);
    }

    #[test]
    fn hidden_filter_does_not_display() {
        let clause = FilterClause::new(FilterOp::Eq, Operand::Text("rare".into()));
        let query = Query::from_directives(vec![
            Directive::Filter {
                attr: Attribute::Rarity,
                display: false,
                clauses: vec![clause.clone()],
            },
            Directive::Filter {
                attr: Attribute::Name,
                display: true,
                clauses: vec![clause],
            },
        ]);
        assert_eq!(query.display, vec![Attribute::Name]);
        assert_eq!(query.filters.len(), 2);
    }

    #[test]
    fn grouping_includes_stats_but_not_quantity() {
        let query = Query::from_directives(vec![
            Directive::Display(Attribute::Amount),
            Directive::Display(Attribute::Name),
            Directive::Stat {
                attr: Attribute::Usd,
                stat: Statistic::Total,
            },
            Directive::Stat {
                attr: Attribute::Name,
                stat: Statistic::Unique,
            },
        ]);
        assert_eq!(
            query.grouping_attributes(),
            vec![Attribute::Name, Attribute::Usd]
        );
    }

    #[test]
    fn decks_and_outputs_are_collected() {
        let query = Query::from_directives(vec![
            Directive::Deck(DeckSelector::Named("burn".into())),
            Directive::Deck(DeckSelector::Named("burn".into())),
            Directive::Flag(Flag::Into),
            Directive::Output("side".into()),
        ]);
        assert_eq!(query.decks.named, vec!["burn".to_string()]);
        assert!(!query.decks.all);
        assert_eq!(query.outputs, vec!["side".to_string()]);
        assert!(query.has_flag(Flag::Into));
    }

    #[test]
    fn directives_render_as_tokens() {
        assert_eq!(Directive::Display(Attribute::Name).to_string(), "-name");
        assert_eq!(
            Directive::Stat {
                attr: Attribute::Usd,
                stat: Statistic::Median
            }
            .to_string(),
            "-median-usd"
        );
        assert_eq!(
            Directive::Filter {
                attr: Attribute::Cmc,
                display: false,
                clauses: vec![FilterClause::new(FilterOp::Le, Operand::Number(3.0))],
            }
            .to_string(),
            "-cmc#<=3"
        );
        assert_eq!(Directive::Deck(DeckSelector::All).to_string(), "*");
        assert_eq!(Directive::Flag(Flag::Get).to_string(), "-get");
    }
}
