//! Interactive wear and StatTrak prompts.
//!
//! Generic over the reader and writer so the menus can be driven from tests.

use crate::market::{StatTrakMode, Wear, WearSelection};
use anyhow::{Context, Result};
use std::io::{BufRead, Write};

fn ask<R: BufRead, W: Write>(input: &mut R, output: &mut W, question: &str) -> Result<String> {
    write!(output, "{}", question)?;
    output.flush()?;

    let mut line = String::new();
    input.read_line(&mut line).context("Failed to read answer")?;
    Ok(line.trim().to_lowercase())
}

/// Asks for the wear tier.
///
/// With `allow_all` the menu gets a sixth entry covering every wear, which is also
/// the default; otherwise the default is Field-Tested. Unknown answers fall back to
/// the default.
pub fn prompt_wear<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    allow_all: bool,
) -> Result<WearSelection> {
    if allow_all {
        writeln!(output, "Choose wear condition filter:")?;
    } else {
        writeln!(output, "Choose wear condition for all items:")?;
    }
    for wear in Wear::all() {
        writeln!(output, "{}. {}", wear.menu_number(), wear.label())?;
    }

    let (default, question) = if allow_all {
        writeln!(output, "6. All (show all wear conditions)")?;
        (WearSelection::All, "Enter number (default = 6 for all): ")
    } else {
        (WearSelection::One(Wear::FieldTested), "Enter number (default = 3): ")
    };

    let answer = ask(input, output, question)?;
    let selection = match answer.as_str() {
        "6" if allow_all => WearSelection::All,
        "1" | "2" | "3" | "4" | "5" => answer.parse().map(WearSelection::One).unwrap_or(default),
        _ => default,
    };

    Ok(selection)
}

/// Asks whether to look up StatTrak names instead of regular ones. Only "y" enables it.
pub fn prompt_stattrak_toggle<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> Result<StatTrakMode> {
    let answer = ask(input, output, "Enable StatTrak™ mode? (y/n, default=n): ")?;
    Ok(if answer == "y" { StatTrakMode::Only } else { StatTrakMode::No })
}

/// Asks which StatTrak variants to keep. Anything unrecognized keeps both.
pub fn prompt_stattrak_filter<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> Result<StatTrakMode> {
    let answer = ask(input, output, "StatTrak filter (both/only/no, default=both): ")?;
    Ok(match answer.as_str() {
        "only" => StatTrakMode::Only,
        "no" => StatTrakMode::No,
        _ => StatTrakMode::Both,
    })
}
