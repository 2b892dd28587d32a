//! Attribute value types.
//!
//! This module defines the runtime representation of a single card field as
//! seen by filters, collapsing, sorting and aggregation. Values borrow from
//! the record they were read from.

use std::borrow::Cow;
use std::cmp::Ordering;
use std::fmt;

/// Runtime representation of an attribute value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AttrValue<'a> {
    /// Whole number (e.g., `amount`, `cmc`)
    Int(i64),

    /// Decimal number (e.g., `usd`, `eur`)
    Float(f64),

    /// Flag (e.g., `foil`, `modern`)
    Bool(bool),

    /// Free text (e.g., `name`, `set`)
    Text(&'a str),
}

impl<'a> AttrValue<'a> {
    /// Numeric view used by numeric filters and statistics.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            AttrValue::Int(v) => Some(*v as f64),
            AttrValue::Float(v) => Some(*v),
            AttrValue::Bool(_) | AttrValue::Text(_) => None,
        }
    }

    /// Text view used by categorical filters, the result table and
    /// `unique`. Booleans read `True`/`False`, the spelling saved queries use.
    pub fn as_text(&self) -> Cow<'a, str> {
        match self {
            AttrValue::Text(s) => Cow::Borrowed(*s),
            AttrValue::Bool(true) => Cow::Borrowed("True"),
            AttrValue::Bool(false) => Cow::Borrowed("False"),
            AttrValue::Int(v) => Cow::Owned(v.to_string()),
            AttrValue::Float(v) => Cow::Owned(v.to_string()),
        }
    }

    /// Total order between two values of the same attribute.
    ///
    /// Numbers compare numerically, booleans with `false < true`, text
    /// lexicographically. Values of different variants never come from the
    /// same attribute; they are ordered by variant so the order stays total.
    pub fn compare(&self, other: &AttrValue<'_>) -> Ordering {
        match (self, other) {
            (AttrValue::Int(a), AttrValue::Int(b)) => a.cmp(b),
            (AttrValue::Bool(a), AttrValue::Bool(b)) => a.cmp(b),
            (AttrValue::Text(a), AttrValue::Text(b)) => a.cmp(b),
            _ => match (self.as_number(), other.as_number()) {
                (Some(a), Some(b)) => a.total_cmp(&b),
                _ => self.rank().cmp(&other.rank()),
            },
        }
    }

    fn rank(&self) -> u8 {
        match self {
            AttrValue::Int(_) | AttrValue::Float(_) => 0,
            AttrValue::Bool(_) => 1,
            AttrValue::Text(_) => 2,
        }
    }
}

impl fmt::Display for AttrValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_text())
    }
}

/// Compare two possibly-missing values. A missing value sorts first and two
/// missing values are equal.
pub fn compare_optional(a: Option<AttrValue<'_>>, b: Option<AttrValue<'_>>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(a), Some(b)) => a.compare(&b),
    }
}
