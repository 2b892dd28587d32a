//! # deckq Architecture
//!
//! deckq answers questions about a trading card collection from the command
//! line: which cards, how many, worth how much. Every argument is one piece
//! of a query:
//!
//! ```text
//! deckq -name -set -usd>=1 -total-usd -unique collection
//! ```
//!
//! shows name and set of every card in the `collection` deck worth at least
//! a dollar, followed by the total value and the number of rows.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses options and query tokens, sets up logging, prints │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade: takes a parsed query, dispatches commands   │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Loads decks, runs the pipeline, writes output decks      │
//! └─────────────────────────────────────────────────────────────┘
//!              │                                 │
//!              ▼                                 ▼
//! ┌───────────────────────────┐   ┌─────────────────────────────┐
//! │  Pipeline (pipeline/)     │   │  Storage (store/)           │
//! │  filter, collapse, sort,  │   │  Provider (provider/)       │
//! │  aggregate; pure, no I/O  │   │  behind traits              │
//! └───────────────────────────┘   └─────────────────────────────┘
//! ```
//!
//! ## Key Principle: No I/O Assumptions in Core
//!
//! From `api.rs` inward, code takes Rust values and returns
//! `Result<CmdResult>`. It never prints and never exits; diagnostics go
//! through the `log` facade and are only shown when the CLI turns them on.
//!
//! ## Testing Strategy
//!
//! 1. **Query and pipeline** (`query/`, `pipeline/`, `attributes/`): unit
//!    tests of the grammar and every stage, no storage involved.
//! 2. **Commands** (`commands/*.rs`): run against `InMemoryStore` and the
//!    fixture provider.
//! 3. **CLI** (`tests/`): drive the binary over a temporary data home.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade, entry point for all operations
//! - [`attributes`]: Attribute schema, values and filters
//! - [`query`]: Query language parser and compiled [`query::Query`]
//! - [`pipeline`]: Filter, collapse, sort and aggregate stages
//! - [`commands`]: Business logic for each operation
//! - [`store`]: Deck storage abstraction and implementations
//! - [`provider`]: Card data lookup
//! - [`model`]: Core data types (`RawLine`, `CardRecord`)
//! - [`config`]: Configuration management
//! - [`error`]: Error types
//! - `cli`: Argument parsing and printing for the binary (not part of the lib API)

pub mod api;
pub mod attributes;
pub mod commands;
pub mod config;
pub mod error;
pub mod model;
pub mod pipeline;
pub mod provider;
pub mod query;
pub mod store;
