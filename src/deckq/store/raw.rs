//! The `raw.txt` deck format.
//!
//! One tab-separated line per inventory entry:
//!
//! ```text
//! 4	m10	146	en	FALSE
//! 1	znr	134	ja	TRUE
//! ```
//!
//! Columns are amount, set code, collector number, language and foil.
//! Extra columns are ignored; only the exact text `TRUE` marks a foil.

use crate::error::{DeckqError, Result};
use crate::model::RawLine;
use log::warn;
use std::path::Path;

const COLUMNS: usize = 5;
const FOIL_MARKER: &str = "TRUE";

/// Parse a whole `raw.txt`. The path is only used in error messages.
pub fn parse_raw(path: &Path, text: &str) -> Result<Vec<RawLine>> {
    let mut lines = Vec::new();
    for (index, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            warn!("{}: skipping blank line {}", path.display(), index + 1);
            continue;
        }
        lines.push(parse_line(path, index + 1, line)?);
    }
    Ok(lines)
}

fn parse_line(path: &Path, line_no: usize, line: &str) -> Result<RawLine> {
    let columns: Vec<&str> = line.trim_end_matches('\r').split('\t').collect();
    if columns.len() < COLUMNS {
        return Err(invalid(path, format!("too few columns on line {}", line_no)));
    }

    let amount = columns[0]
        .trim()
        .parse::<u32>()
        .ok()
        .filter(|amount| *amount > 0)
        .ok_or_else(|| {
            invalid(
                path,
                format!("'{}' is not a valid amount (line {})", columns[0], line_no),
            )
        })?;

    Ok(RawLine::new(
        amount,
        columns[1],
        columns[2],
        columns[3],
        columns[4] == FOIL_MARKER,
    ))
}

/// Render lines back into `raw.txt` form.
pub fn format_raw(lines: &[RawLine]) -> String {
    lines
        .iter()
        .map(|line| {
            format!(
                "{}\t{}\t{}\t{}\t{}\n",
                line.amount,
                line.set,
                line.number,
                line.lang,
                if line.foil { FOIL_MARKER } else { "FALSE" }
            )
        })
        .collect()
}

fn invalid(path: &Path, reason: String) -> DeckqError {
    DeckqError::InvalidDeck {
        path: path.to_path_buf(),
        reason,
    }
}
