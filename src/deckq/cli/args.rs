use clap::{ArgAction, Parser};
use deckq::attributes::{AttributeKind, FilterOp, Statistic, ATTRIBUTES};
use deckq::query::{Flag, WILDCARD};

#[derive(Parser, Debug)]
#[command(
    name = "deckq",
    bin_name = "deckq",
    version,
    disable_help_flag = true,
    disable_version_flag = true,
    after_help = query_help()
)]
#[command(about = "Query a trading card collection from the command line", long_about = None)]
pub struct Cli {
    /// More log output on stderr (repeat for more)
    #[arg(long, action = ArgAction::Count, help_heading = "Options")]
    pub verbose: u8,

    /// Print help
    #[arg(long, action = ArgAction::Help, help_heading = "Options")]
    pub help: Option<bool>,

    /// Print version
    #[arg(long, action = ArgAction::Version, help_heading = "Options")]
    pub version: Option<bool>,

    /// Columns, filters, statistics, flags and decks (options go first)
    #[arg(
        value_name = "TOKEN",
        allow_hyphen_values = true,
        trailing_var_arg = true
    )]
    pub tokens: Vec<String>,
}

/// The query language reference, built from the attribute registry.
fn query_help() -> String {
    let mut help = String::from("Attributes:\n");
    for spec in ATTRIBUTES {
        let kind = match spec.kind() {
            AttributeKind::Numeric => "numeric",
            AttributeKind::Categorical => "text",
        };
        help.push_str(&format!(
            "  -{:<11}{:<9}{}\n",
            spec.name(),
            kind,
            spec.description
        ));
    }

    help.push_str("\nFilters: -<attribute>[#]<op><value>[/<op><value>...]\n");
    help.push_str("  '#' filters without showing the column, '/' separates alternatives\n");
    for kind in [AttributeKind::Numeric, AttributeKind::Categorical] {
        let ops: Vec<&str> = kind.allowed_ops().map(FilterOp::symbol).collect();
        help.push_str(&format!("  {:<20}{} attributes\n", ops.join(" "), kind));
    }

    help.push_str("\nStatistics: -<statistic>-<attribute>\n");
    for kind in [AttributeKind::Numeric, AttributeKind::Categorical] {
        let stats: Vec<&str> = kind.allowed_stats().map(Statistic::name).collect();
        help.push_str(&format!("  {:<40}{} attributes\n", stats.join(" "), kind));
    }

    help.push_str("\nFlags:\n");
    for flag in Flag::ALL {
        help.push_str(&format!("  -{:<10}{}\n", flag.name(), flag.description()));
    }

    help.push_str(&format!(
        "\nDecks:\n  <name>      read a saved deck\n  {:<12}read every saved deck\n",
        WILDCARD
    ));
    help.push_str("\nExample: deckq -name -usd>=1 -total-usd collection");
    help
}
