use anyhow::{Context, Result};
use chrono::Local;
use clap::ValueEnum;
use num_format::{CustomFormat, Grouping, ToFormattedString};
use sparse_life::{PatternFormat, Rule};

pub(super) fn format_count(count: u64) -> Result<String> {
    let fmt = CustomFormat::builder()
        .grouping(Grouping::Standard)
        .separator("_")
        .build()
        .context("Failed to build number format")?;
    Ok(count.to_formatted_string(&fmt))
}

pub(super) fn print_population(population: usize) -> Result<()> {
    println!("Population: {}", format_count(population as u64)?);
    Ok(())
}

pub(super) fn local_time() -> String {
    Local::now().format("%Y-%m-%dT%H:%M:%S%.3f").to_string()
}

/// Accepts both `B3/S23`-style notations and names from the built-in table.
pub(super) fn parse_rule(text: &str) -> Result<Rule> {
    if let Some(rule) = Rule::named(text) {
        return Ok(rule);
    }
    Rule::parse(text).with_context(|| format!("Unknown rule {text:?}"))
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub(super) enum Format {
    /// See https://conwaylife.com/wiki/Run_Length_Encoded
    Rle,
    /// See https://conwaylife.com/wiki/Plaintext
    Plaintext,
    /// See https://conwaylife.com/wiki/Life_1.05
    Life105,
    /// See https://conwaylife.com/wiki/Life_1.06
    Life106,
}

impl From<Format> for PatternFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Rle => PatternFormat::Rle,
            Format::Plaintext => PatternFormat::Plaintext,
            Format::Life105 => PatternFormat::Life105,
            Format::Life106 => PatternFormat::Life106,
        }
    }
}
