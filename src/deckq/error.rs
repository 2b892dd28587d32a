use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while turning command-line tokens into a query.
///
/// Every variant carries the offending token verbatim so the CLI can point
/// at exactly what to fix.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    #[error("'{token}' is not a recognized command")]
    Syntax { token: String },

    #[error("'{operator}' in '{token}' is not a known filter operator")]
    UnknownOperator { token: String, operator: String },

    #[error("'{token}' is not allowed: {reason}")]
    SchemaViolation { token: String, reason: String },

    #[error("{}", malformed_message(.token, .operands))]
    MalformedOperands { token: String, operands: Vec<String> },

    #[error("'{token}' must be followed by a deck name")]
    MissingOutputTarget { token: String },
}

fn malformed_message(token: &str, operands: &[String]) -> String {
    let quoted = operands
        .iter()
        .map(|v| format!("'{}'", v))
        .collect::<Vec<_>>()
        .join(", ");
    let verb = if operands.len() == 1 {
        "is not a number"
    } else {
        "are not numbers"
    };
    format!("{} in '{}' {}", quoted, token, verb)
}

#[derive(Error, Debug)]
pub enum DeckqError {
    #[error(transparent)]
    Query(#[from] QueryError),

    #[error("Deck not found: '{0}'")]
    DeckNotFound(String),

    #[error("Could not find '{}'. Use '-get' to generate it", .path.display())]
    CacheMissing { path: PathBuf },

    #[error("Invalid deck '{}': {reason}", .path.display())]
    InvalidDeck { path: PathBuf, reason: String },

    #[error("Invalid deck name: '{0}'")]
    InvalidDeckName(String),

    #[error("'{url}' returned http code {status}")]
    Provider { url: String, status: u16 },

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, DeckqError>;
