use super::raw::{format_raw, parse_raw};
use super::{validate_deck_name, DeckInfo, DeckStore};
use crate::error::{DeckqError, Result};
use crate::model::{CardRecord, RawLine};
use chrono::{DateTime, Utc};
use log::info;
use std::fs;
use std::path::{Path, PathBuf};

const RAW_FILE: &str = "raw.txt";
const DATA_FILE: &str = "data.json";

pub struct FileStore {
    deck_dir: PathBuf,
}

impl FileStore {
    pub fn new(deck_dir: PathBuf) -> Self {
        Self { deck_dir }
    }

    pub fn deck_dir(&self) -> &Path {
        &self.deck_dir
    }

    fn deck_path(&self, deck: &str) -> Result<PathBuf> {
        validate_deck_name(deck)?;
        Ok(self.deck_dir.join(deck))
    }

    /// Path of an existing deck's directory.
    fn existing_deck(&self, deck: &str) -> Result<PathBuf> {
        let path = self.deck_path(deck)?;
        if !path.is_dir() {
            return Err(DeckqError::DeckNotFound(deck.to_string()));
        }
        Ok(path)
    }

    fn ensure_dir(&self, path: &Path) -> Result<()> {
        if !path.exists() {
            fs::create_dir_all(path).map_err(DeckqError::Io)?;
        }
        Ok(())
    }

    fn deck_info(&self, name: String, path: &Path) -> DeckInfo {
        let cached_at = fs::metadata(path.join(DATA_FILE))
            .and_then(|meta| meta.modified())
            .ok()
            .map(DateTime::<Utc>::from);
        DeckInfo {
            name,
            has_raw: path.join(RAW_FILE).is_file(),
            cached_at,
        }
    }
}

impl DeckStore for FileStore {
    fn list_decks(&self) -> Result<Vec<DeckInfo>> {
        if !self.deck_dir.exists() {
            return Ok(Vec::new());
        }

        let mut decks = Vec::new();
        for entry in fs::read_dir(&self.deck_dir).map_err(DeckqError::Io)? {
            let entry = entry.map_err(DeckqError::Io)?;
            let path = entry.path();
            if !path.is_dir() {
                continue;
            }
            let name = entry.file_name().to_string_lossy().into_owned();
            if validate_deck_name(&name).is_err() {
                continue;
            }
            decks.push(self.deck_info(name, &path));
        }

        decks.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(decks)
    }

    fn load_raw(&self, deck: &str) -> Result<Vec<RawLine>> {
        let path = self.existing_deck(deck)?.join(RAW_FILE);
        if !path.is_file() {
            return Err(DeckqError::InvalidDeck {
                path,
                reason: "file not found".to_string(),
            });
        }
        let text = fs::read_to_string(&path).map_err(DeckqError::Io)?;
        parse_raw(&path, &text)
    }

    fn load_cached(&self, deck: &str) -> Result<Vec<CardRecord>> {
        let path = self.existing_deck(deck)?.join(DATA_FILE);
        if !path.is_file() {
            return Err(DeckqError::CacheMissing { path });
        }
        let content = fs::read_to_string(&path).map_err(DeckqError::Io)?;
        serde_json::from_str(&content).map_err(|e| DeckqError::InvalidDeck {
            path,
            reason: format!("contains invalid json ({}). Use '-get' to generate it", e),
        })
    }

    fn save_raw(&mut self, deck: &str, lines: &[RawLine]) -> Result<()> {
        let root = self.deck_path(deck)?;
        self.ensure_dir(&root)?;
        fs::write(root.join(RAW_FILE), format_raw(lines)).map_err(DeckqError::Io)?;
        info!("wrote {} lines to deck '{}'", lines.len(), deck);
        Ok(())
    }

    fn save_cached(&mut self, deck: &str, cards: &[CardRecord]) -> Result<()> {
        let root = self.deck_path(deck)?;
        self.ensure_dir(&root)?;
        let content = serde_json::to_string_pretty(cards).map_err(DeckqError::Serialization)?;
        fs::write(root.join(DATA_FILE), content).map_err(DeckqError::Io)?;
        info!("cached {} cards for deck '{}'", cards.len(), deck);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::fixtures::card;
    use tempfile::TempDir;

    fn setup() -> (TempDir, FileStore) {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path().join("decks"));
        (dir, store)
    }

    #[test]
    fn cached_cards_survive_a_round_trip() {
        let (_dir, mut store) = setup();
        let cards = vec![card("Shock"), card("Lightning Bolt")];
        store.save_cached("burn", &cards).unwrap();
        assert_eq!(store.load_cached("burn").unwrap(), cards);
    }

    #[test]
    fn raw_lines_survive_a_round_trip() {
        let (_dir, mut store) = setup();
        let lines = vec![RawLine::new(4, "m10", "146", "en", true)];
        store.save_raw("burn", &lines).unwrap();
        assert_eq!(store.load_raw("burn").unwrap(), lines);
        let text = fs::read_to_string(store.deck_dir().join("burn/raw.txt")).unwrap();
        assert_eq!(text, "4\tm10\t146\ten\tTRUE\n");
    }

    #[test]
    fn unknown_deck_is_not_found() {
        let (_dir, store) = setup();
        assert!(matches!(
            store.load_cached("nope"),
            Err(DeckqError::DeckNotFound(name)) if name == "nope"
        ));
        assert!(matches!(
            store.load_raw("nope"),
            Err(DeckqError::DeckNotFound(_))
        ));
    }

    #[test]
    fn raw_only_deck_asks_for_get() {
        let (_dir, mut store) = setup();
        store
            .save_raw("burn", &[RawLine::new(1, "m10", "1", "en", false)])
            .unwrap();
        let err = store.load_cached("burn").unwrap_err();
        assert!(matches!(err, DeckqError::CacheMissing { .. }));
        assert!(err.to_string().contains("Use '-get' to generate it"));
    }

    #[test]
    fn corrupt_cache_is_reported_with_its_path() {
        let (_dir, store) = setup();
        let deck = store.deck_dir().join("burn");
        fs::create_dir_all(&deck).unwrap();
        fs::write(deck.join(DATA_FILE), "{not json").unwrap();
        let err = store.load_cached("burn").unwrap_err();
        let message = err.to_string();
        assert!(message.contains("data.json"), "{}", message);
        assert!(message.contains("invalid json"), "{}", message);
    }

    #[test]
    fn lists_decks_sorted_with_cache_state() {
        let (_dir, mut store) = setup();
        store.save_cached("zoo", &[card("A")]).unwrap();
        store
            .save_raw("burn", &[RawLine::new(1, "m10", "1", "en", false)])
            .unwrap();
        fs::create_dir_all(store.deck_dir().join(".trash")).unwrap();
        fs::write(store.deck_dir().join("notes.txt"), "x").unwrap();

        let decks = store.list_decks().unwrap();
        let names: Vec<_> = decks.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["burn", "zoo"]);
        assert!(decks[0].has_raw);
        assert!(decks[0].cached_at.is_none());
        assert!(!decks[1].has_raw);
        assert!(decks[1].cached_at.is_some());
    }

    #[test]
    fn missing_deck_dir_lists_nothing() {
        let (_dir, store) = setup();
        assert!(store.list_decks().unwrap().is_empty());
    }

    #[test]
    fn rejects_escaping_deck_names() {
        let (_dir, mut store) = setup();
        assert!(matches!(
            store.save_cached("../outside", &[]),
            Err(DeckqError::InvalidDeckName(_))
        ));
    }
}
