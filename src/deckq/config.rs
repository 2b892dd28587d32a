use crate::error::{DeckqError, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const CONFIG_FILENAME: &str = "config.json";
const DEFAULT_DECK_DIR: &str = "decks";
const DEFAULT_API_URL: &str = "https://api.scryfall.com/cards/{set}/{number}/{lang}";
const DEFAULT_RATE_LIMIT_MS: u64 = 100;
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Placeholders the card URL template must contain.
pub const URL_PLACEHOLDERS: [&str; 3] = ["{set}", "{number}", "{lang}"];

/// Configuration for deckq, stored as `config.json` in the data home.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct DeckqConfig {
    /// Where decks live. Relative paths are taken from the data home.
    #[serde(default = "default_deck_dir")]
    pub deck_dir: PathBuf,

    /// Card lookup URL with `{set}`, `{number}` and `{lang}` placeholders.
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Pause between two lookups, in milliseconds.
    #[serde(default = "default_rate_limit_ms")]
    pub rate_limit_ms: u64,

    /// Per-request timeout, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_deck_dir() -> PathBuf {
    PathBuf::from(DEFAULT_DECK_DIR)
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_rate_limit_ms() -> u64 {
    DEFAULT_RATE_LIMIT_MS
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for DeckqConfig {
    fn default() -> Self {
        Self {
            deck_dir: default_deck_dir(),
            api_url: default_api_url(),
            rate_limit_ms: DEFAULT_RATE_LIMIT_MS,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl DeckqConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(DeckqError::Io)?;
        let config: DeckqConfig = serde_json::from_str(&content)
            .map_err(|e| DeckqError::Config(format!("{}: {}", config_path.display(), e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let missing: Vec<&str> = URL_PLACEHOLDERS
            .iter()
            .copied()
            .filter(|placeholder| !self.api_url.contains(placeholder))
            .collect();
        if !missing.is_empty() {
            return Err(DeckqError::Config(format!(
                "api_url '{}' is missing {}",
                self.api_url,
                missing.join(", ")
            )));
        }
        Ok(())
    }

    /// The deck directory, resolved against the data home.
    pub fn resolve_deck_dir(&self, home: &Path) -> PathBuf {
        if self.deck_dir.is_absolute() {
            self.deck_dir.clone()
        } else {
            home.join(&self.deck_dir)
        }
    }

    pub fn rate_limit(&self) -> Duration {
        Duration::from_millis(self.rate_limit_ms)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
