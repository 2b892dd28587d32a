//! Per-argument tokenizer and grammar.
//!
//! Every argument is split into `[-modifiers-]name[#][suffix]` and then
//! matched against an ordered list of rules; the first rule that applies
//! wins and an argument no rule accepts rejects the whole query.
//!
//! ```text
//! token  := ["-" (statistic "-")*] name ["#"] [suffix]
//! suffix := clause ("/" clause)*
//! clause := [operator] value
//! ```
//!
//! A clause without an operator reuses the previous clause's operator; the
//! first clause defaults to `=`.

use super::{DeckSelector, Directive, Flag, Query, WILDCARD};
use crate::attributes::{Attribute, AttributeKind, FilterClause, FilterOp, Operand, Statistic};
use crate::error::QueryError;

/// Marks a filter whose attribute should not be shown.
pub const HIDE_MARKER: char = '#';
/// Separates the OR-combined alternatives of one filter.
pub const ALTERNATIVE_SEPARATOR: char = '/';

const SUFFIX_START: &[char] = &['#', '=', '?', '!', '<', '>'];
const OPERATOR_CHARS: &[char] = &['=', '?', '!', '<', '>'];
const DECIMAL_SEPARATORS: &[char] = &['.', '_'];

/// Parse all arguments into a compiled [`Query`].
pub fn parse<I, S>(tokens: I) -> Result<Query, QueryError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    parse_directives(tokens).map(Query::from_directives)
}

/// Parse all arguments into directives, in argument order.
///
/// Fails on the first argument no rule accepts; nothing is partially applied.
pub fn parse_directives<I, S>(tokens: I) -> Result<Vec<Directive>, QueryError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut directives = Vec::new();
    let mut pending_into: Option<String> = None;

    for token in tokens {
        let raw = token.as_ref();
        for directive in parse_token(raw, pending_into.is_some())? {
            match &directive {
                Directive::Flag(Flag::Into) => pending_into = Some(raw.to_string()),
                Directive::Output(_) => pending_into = None,
                _ => {}
            }
            directives.push(directive);
        }
    }

    match pending_into {
        Some(token) => Err(QueryError::MissingOutputTarget { token }),
        None => Ok(directives),
    }
}

/// An argument split into its grammatical parts.
#[derive(Debug, PartialEq)]
struct Token<'a> {
    dashed: bool,
    modifiers: Vec<&'a str>,
    name: &'a str,
    hidden: bool,
    suffix: Option<&'a str>,
}

impl<'a> Token<'a> {
    fn split(raw: &'a str) -> Self {
        let (head, tail) = match raw.find(SUFFIX_START) {
            Some(i) => raw.split_at(i),
            None => (raw, ""),
        };

        let (dashed, modifiers, name) = match head.strip_prefix('-') {
            Some(rest) => {
                let mut parts: Vec<&str> = rest.split('-').collect();
                let name = parts.pop().unwrap_or_default();
                (true, parts, name)
            }
            None => (false, Vec::new(), head),
        };

        let (hidden, suffix) = match tail.strip_prefix(HIDE_MARKER) {
            Some(rest) => (true, rest),
            None => (false, tail),
        };

        Self {
            dashed,
            modifiers,
            name,
            hidden,
            suffix: (!suffix.is_empty()).then_some(suffix),
        }
    }
}

fn parse_token(raw: &str, into_pending: bool) -> Result<Vec<Directive>, QueryError> {
    let token = Token::split(raw);
    let attr = Attribute::from_name(token.name);

    // Statistic modifiers in front of an attribute
    if token.dashed && !token.modifiers.is_empty() {
        return match (attr, token.hidden, token.suffix) {
            (Some(attr), false, None) => token
                .modifiers
                .iter()
                .map(|modifier| stat_directive(raw, modifier, attr))
                .collect(),
            _ => Err(syntax(raw)),
        };
    }

    match (token.dashed, attr, token.hidden, token.suffix) {
        // Filtered attribute, shown unless hidden
        (true, Some(attr), hidden, Some(suffix)) => {
            filter_directive(raw, attr, !hidden, suffix).map(|d| vec![d])
        }
        // Plain column
        (true, Some(attr), false, None) => Ok(vec![Directive::Display(attr)]),
        // Standalone flag
        (true, None, false, None) => Flag::from_name(token.name)
            .map(|flag| vec![Directive::Flag(flag)])
            .ok_or_else(|| syntax(raw)),
        // Wildcard deck
        (false, _, false, None) if token.name == WILDCARD => {
            if into_pending {
                Err(QueryError::SchemaViolation {
                    token: raw.to_string(),
                    reason: "the wildcard cannot be an output deck".to_string(),
                })
            } else {
                Ok(vec![Directive::Deck(DeckSelector::All)])
            }
        }
        // Named deck, or the target of a preceding -into
        (false, _, false, None) if !token.name.is_empty() => {
            let name = token.name.to_string();
            if into_pending {
                Ok(vec![Directive::Output(name)])
            } else {
                Ok(vec![Directive::Deck(DeckSelector::Named(name))])
            }
        }
        _ => Err(syntax(raw)),
    }
}

fn stat_directive(raw: &str, modifier: &str, attr: Attribute) -> Result<Directive, QueryError> {
    let stat = Statistic::from_name(modifier).ok_or_else(|| syntax(raw))?;
    if !attr.allows_stat(stat) {
        return Err(QueryError::SchemaViolation {
            token: raw.to_string(),
            reason: format!(
                "'{}' is a {} attribute, only 'unique' applies",
                attr,
                attr.kind()
            ),
        });
    }
    Ok(Directive::Stat { attr, stat })
}

fn filter_directive(
    raw: &str,
    attr: Attribute,
    display: bool,
    suffix: &str,
) -> Result<Directive, QueryError> {
    let mut clauses = Vec::new();
    let mut malformed = Vec::new();
    let mut op = FilterOp::Eq;

    for alternative in suffix.split(ALTERNATIVE_SEPARATOR) {
        let value_start = alternative
            .find(|c: char| !OPERATOR_CHARS.contains(&c))
            .unwrap_or(alternative.len());
        let (symbol, value) = alternative.split_at(value_start);

        if !symbol.is_empty() {
            op = FilterOp::from_symbol(symbol).ok_or_else(|| QueryError::UnknownOperator {
                token: raw.to_string(),
                operator: symbol.to_string(),
            })?;
        }
        if !attr.allows_op(op) {
            return Err(QueryError::SchemaViolation {
                token: raw.to_string(),
                reason: format!(
                    "'{}' does not apply to {} attribute '{}'",
                    op,
                    attr.kind(),
                    attr
                ),
            });
        }

        let operand = match attr.kind() {
            AttributeKind::Numeric => match parse_number(value) {
                Some(n) => Operand::Number(n),
                None => {
                    malformed.push(value.to_string());
                    continue;
                }
            },
            AttributeKind::Categorical => Operand::Text(value.to_string()),
        };
        clauses.push(FilterClause::new(op, operand));
    }

    if !malformed.is_empty() {
        return Err(QueryError::MalformedOperands {
            token: raw.to_string(),
            operands: malformed,
        });
    }

    Ok(Directive::Filter {
        attr,
        display,
        clauses,
    })
}

/// Accepts `12`, `0.25` and `0_25` (shell-friendly decimal separator).
fn parse_number(value: &str) -> Option<f64> {
    let is_digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    let (whole, fraction) = match value.find(DECIMAL_SEPARATORS) {
        Some(i) => (&value[..i], Some(&value[i + 1..])),
        None => (value, None),
    };
    if !is_digits(whole) || !fraction.map_or(true, is_digits) {
        return None;
    }
    value.replace('_', ".").parse().ok()
}

fn syntax(raw: &str) -> QueryError {
    QueryError::Syntax {
        token: raw.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn one(token: &str) -> Directive {
        let mut directives = parse_directives([token]).unwrap();
        assert_eq!(directives.len(), 1, "{}", token);
        directives.remove(0)
    }

    fn number(op: FilterOp, n: f64) -> FilterClause {
        FilterClause::new(op, Operand::Number(n))
    }

    fn text(op: FilterOp, s: &str) -> FilterClause {
        FilterClause::new(op, Operand::Text(s.into()))
    }

    #[test]
    fn splits_token_parts() {
        assert_eq!(
            Token::split("-max-min-usd#>=1/<5"),
            Token {
                dashed: true,
                modifiers: vec!["max", "min"],
                name: "usd",
                hidden: true,
                suffix: Some(">=1/<5"),
            }
        );
        assert_eq!(
            Token::split("burn"),
            Token {
                dashed: false,
                modifiers: vec![],
                name: "burn",
                hidden: false,
                suffix: None,
            }
        );
    }

    #[test]
    fn plain_attribute_is_display() {
        assert_eq!(one("-name"), Directive::Display(Attribute::Name));
    }

    #[test]
    fn modifier_prefix_is_stat() {
        assert_eq!(
            one("-total-usd"),
            Directive::Stat {
                attr: Attribute::Usd,
                stat: Statistic::Total
            }
        );
    }

    #[test]
    fn several_modifiers_yield_several_stats() {
        let directives = parse_directives(["-max-min-cmc"]).unwrap();
        assert_eq!(
            directives,
            vec![
                Directive::Stat {
                    attr: Attribute::Cmc,
                    stat: Statistic::Max
                },
                Directive::Stat {
                    attr: Attribute::Cmc,
                    stat: Statistic::Min
                },
            ]
        );
    }

    #[test]
    fn unique_stat_applies_to_categorical() {
        assert_eq!(
            one("-unique-name"),
            Directive::Stat {
                attr: Attribute::Name,
                stat: Statistic::Unique
            }
        );
    }

    #[test]
    fn numeric_stat_on_categorical_is_schema_violation() {
        let err = parse_directives(["-total-name"]).unwrap_err();
        assert!(
            matches!(err, QueryError::SchemaViolation { ref token, .. } if token == "-total-name")
        );
    }

    #[test]
    fn unknown_modifier_is_syntax_error() {
        let err = parse_directives(["-sum-usd"]).unwrap_err();
        assert_eq!(
            err,
            QueryError::Syntax {
                token: "-sum-usd".into()
            }
        );
    }

    #[test]
    fn filter_shows_attribute_by_default() {
        assert_eq!(
            one("-usd>=10"),
            Directive::Filter {
                attr: Attribute::Usd,
                display: true,
                clauses: vec![number(FilterOp::Ge, 10.0)],
            }
        );
    }

    #[test]
    fn hide_marker_filters_without_display() {
        assert_eq!(
            one("-rarity#=rare/=mythic"),
            Directive::Filter {
                attr: Attribute::Rarity,
                display: false,
                clauses: vec![text(FilterOp::Eq, "rare"), text(FilterOp::Eq, "mythic")],
            }
        );
    }

    #[test]
    fn omitted_operator_reuses_previous() {
        assert_eq!(
            one("-name?Bolt/Shock"),
            Directive::Filter {
                attr: Attribute::Name,
                display: true,
                clauses: vec![
                    text(FilterOp::Contains, "Bolt"),
                    text(FilterOp::Contains, "Shock")
                ],
            }
        );
        assert_eq!(
            one("-name#Island"),
            Directive::Filter {
                attr: Attribute::Name,
                display: false,
                clauses: vec![text(FilterOp::Eq, "Island")],
            }
        );
    }

    #[test]
    fn values_may_contain_operator_characters_after_the_start() {
        assert_eq!(
            one("-number=#12"),
            Directive::Filter {
                attr: Attribute::Number,
                display: true,
                clauses: vec![text(FilterOp::Eq, "#12")],
            }
        );
    }

    #[test]
    fn decimal_operands() {
        assert_eq!(
            one("-usd<0_5"),
            Directive::Filter {
                attr: Attribute::Usd,
                display: true,
                clauses: vec![number(FilterOp::Lt, 0.5)],
            }
        );
        assert_eq!(parse_number("1.25"), Some(1.25));
        assert_eq!(parse_number("1."), None);
        assert_eq!(parse_number("-1"), None);
        assert_eq!(parse_number(""), None);
    }

    #[test]
    fn ordering_on_categorical_is_schema_violation() {
        let err = parse_directives(["-name<B"]).unwrap_err();
        assert!(matches!(err, QueryError::SchemaViolation { .. }));
    }

    #[test]
    fn containment_on_numeric_is_schema_violation() {
        let err = parse_directives(["-cmc?3"]).unwrap_err();
        assert!(matches!(err, QueryError::SchemaViolation { .. }));
    }

    #[test]
    fn unknown_operator_is_reported() {
        let err = parse_directives(["-cmc=>3"]).unwrap_err();
        assert_eq!(
            err,
            QueryError::UnknownOperator {
                token: "-cmc=>3".into(),
                operator: "=>".into()
            }
        );
    }

    #[test]
    fn every_malformed_operand_is_reported() {
        let err = parse_directives(["-cmc<a/3/b"]).unwrap_err();
        assert_eq!(
            err,
            QueryError::MalformedOperands {
                token: "-cmc<a/3/b".into(),
                operands: vec!["a".into(), "b".into()],
            }
        );
    }

    #[test]
    fn flags_and_decks() {
        assert_eq!(one("-decks"), Directive::Flag(Flag::Decks));
        assert_eq!(one("*"), Directive::Deck(DeckSelector::All));
        assert_eq!(
            one("my-deck"),
            Directive::Deck(DeckSelector::Named("my-deck".into()))
        );
    }

    #[test]
    fn into_routes_exactly_the_next_deck() {
        let directives = parse_directives(["-into", "-name", "side", "main"]).unwrap();
        assert_eq!(
            directives,
            vec![
                Directive::Flag(Flag::Into),
                Directive::Display(Attribute::Name),
                Directive::Output("side".into()),
                Directive::Deck(DeckSelector::Named("main".into())),
            ]
        );
    }

    #[test]
    fn dangling_into_is_rejected() {
        let err = parse_directives(["main", "-into"]).unwrap_err();
        assert_eq!(
            err,
            QueryError::MissingOutputTarget {
                token: "-into".into()
            }
        );
    }

    #[test]
    fn wildcard_cannot_be_an_output() {
        assert!(parse_directives(["-into", "*"]).is_err());
    }

    #[test]
    fn unrecognized_tokens_are_rejected_verbatim() {
        for token in ["-bogus", "-", "", "--name", "-name#", "-decks=1", "burn=1", "-total-"] {
            let err = parse_directives([token]).unwrap_err();
            assert!(
                matches!(err, QueryError::Syntax { .. }),
                "{:?} gave {:?}",
                token,
                err
            );
        }
    }

    #[test]
    fn one_bad_token_rejects_the_query() {
        assert!(parse(["-name", "burn", "-bogus"]).is_err());
    }

    #[test]
    fn directives_round_trip_through_tokens() {
        let tokens = [
            "-name",
            "-usd#>=10",
            "-cmc<2/>5",
            "-rarity=rare",
            "-subtype!?Goblin",
            "-avg-eur",
            "-unique-set",
            "-unique",
            "-into",
            "side",
            "burn",
            "*",
        ];
        let directives = parse_directives(tokens).unwrap();
        let rendered: Vec<String> = directives.iter().map(|d| d.to_string()).collect();
        assert_eq!(parse_directives(&rendered).unwrap(), directives);
    }
}
