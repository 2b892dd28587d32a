//! Terminal client: argument parsing, logging setup, wiring the production
//! store and provider, and printing.

use clap::Parser;
use deckq::api::DeckqApi;
use deckq::config::DeckqConfig;
use deckq::error::{DeckqError, Result};
use deckq::provider::scryfall::ScryfallProvider;
use deckq::query::parse;
use deckq::store::fs::FileStore;
use directories::ProjectDirs;
use log::debug;
use std::path::PathBuf;

mod args;
mod print;

use args::Cli;

/// Overrides the data home (config.json and the default deck directory).
const HOME_ENV: &str = "DECKQ_HOME";

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let query = parse(&cli.tokens)?;

    let home = data_home()?;
    let config = DeckqConfig::load(&home)?;
    let deck_dir = config.resolve_deck_dir(&home);
    debug!("data home {}, decks in {}", home.display(), deck_dir.display());

    let mut api = DeckqApi::new(FileStore::new(deck_dir), ScryfallProvider::new(&config));
    let result = api.run_query(&query)?;
    print::print_result(&result);
    Ok(())
}

fn init_logging(verbose: u8) {
    let log_level = match verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };

    env_logger::Builder::new()
        .filter_level(log_level)
        .parse_default_env()
        .init();
}

fn data_home() -> Result<PathBuf> {
    if let Some(home) = std::env::var_os(HOME_ENV).filter(|home| !home.is_empty()) {
        return Ok(PathBuf::from(home));
    }
    ProjectDirs::from("", "", "deckq")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| DeckqError::Config("Could not determine the data directory".to_string()))
}
