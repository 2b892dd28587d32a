use chrono::{DateTime, Utc};
use colored::Colorize;
use deckq::attributes::{Attribute, Statistic};
use deckq::commands::{CmdMessage, CmdResult, MessageLevel};
use deckq::model::CardRecord;
use deckq::pipeline::StatLine;
use deckq::store::DeckInfo;
use timeago::Formatter;
use unicode_width::UnicodeWidthStr;

const COLUMN_GAP: &str = "    ";
const INDENT: &str = "    ";
const MISSING: &str = "-";

pub(super) fn print_result(result: &CmdResult) {
    if !result.cards.is_empty() && !result.columns.is_empty() {
        for row in format_table(&result.columns, &result.cards) {
            println!("{}", row);
        }
        println!();
    }

    for stat in &result.stats {
        println!("{}", format_stat(stat));
    }
    if let Some(count) = result.unique {
        println!("Unique: {}", count);
    }
    if !result.stats.is_empty() || result.unique.is_some() {
        println!();
    }

    if result.no_matches {
        println!("No matches found");
        println!();
    }

    if let Some(decks) = &result.listed_decks {
        print_decks(decks);
    }

    print_messages(&result.messages);
}

pub(super) fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
        }
    }
}

fn print_decks(decks: &[DeckInfo]) {
    println!("Saved decks:");
    let width = decks.iter().map(|d| d.name.width()).max().unwrap_or(0);
    for deck in decks {
        let padding = width.saturating_sub(deck.name.width());
        println!(
            "{}{}{}{}{}",
            INDENT,
            deck.name,
            " ".repeat(padding),
            COLUMN_GAP,
            deck_status(deck).dimmed()
        );
    }
    println!();
}

fn deck_status(deck: &DeckInfo) -> String {
    match (deck.cached_at, deck.has_raw) {
        (Some(at), _) => format!("fetched {}", format_time_ago(at)),
        (None, true) => "not fetched, use -get".to_string(),
        (None, false) => "empty".to_string(),
    }
}

/// Rows of the result table, columns left-aligned by display width.
fn format_table(columns: &[Attribute], cards: &[CardRecord]) -> Vec<String> {
    let cells: Vec<Vec<String>> = cards
        .iter()
        .map(|card| columns.iter().map(|attr| format_cell(card, *attr)).collect())
        .collect();

    let widths: Vec<usize> = (0..columns.len())
        .map(|i| cells.iter().map(|row| row[i].width()).max().unwrap_or(0))
        .collect();

    cells
        .iter()
        .map(|row| {
            let padded: Vec<String> = row
                .iter()
                .zip(&widths)
                .map(|(cell, width)| {
                    format!("{}{}", cell, " ".repeat(width.saturating_sub(cell.width())))
                })
                .collect();
            padded.join(COLUMN_GAP).trim_end().to_string()
        })
        .collect()
}

fn format_cell(card: &CardRecord, attr: Attribute) -> String {
    match (attr, card.get_attr(attr)) {
        (_, None) => MISSING.to_string(),
        (Attribute::Usd | Attribute::Eur, Some(value)) => match value.as_number() {
            Some(price) => format!("{}{:.2}", unit(attr), price),
            None => value.to_string(),
        },
        (_, Some(value)) => value.as_text().into_owned(),
    }
}

fn format_stat(line: &StatLine) -> String {
    let request = line.request;
    let value = match line.value {
        Some(value) => {
            let unit = if request.stat == Statistic::Unique {
                ""
            } else {
                unit(request.attr)
            };
            format!("{}{}", unit, format_number(value))
        }
        None => "no data".to_string(),
    };
    format!("{} {}: {}", request.stat.label(), request.attr, value)
}

fn unit(attr: Attribute) -> &'static str {
    match attr {
        Attribute::Usd => "$",
        Attribute::Eur => "€",
        _ => "",
    }
}

/// Round to two decimals and drop trailing zeros.
fn format_number(value: f64) -> String {
    let text = format!("{:.2}", value);
    let text = text.trim_end_matches('0').trim_end_matches('.');
    if text == "-0" {
        "0".to_string()
    } else {
        text.to_string()
    }
}

fn format_time_ago(timestamp: DateTime<Utc>) -> String {
    let duration = Utc::now().signed_duration_since(timestamp);
    Formatter::new().convert(duration.to_std().unwrap_or_default())
}
