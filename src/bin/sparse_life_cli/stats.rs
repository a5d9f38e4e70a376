use crate::util::print_population;
use anyhow::Result;
use clap::Args;
use sparse_life::{formats, RuleFormat};

#[derive(Args, Debug)]
pub(super) struct StatsArgs {
    /// Path to the file containing the pattern; supports .rle, .cells, .lif and .life (optionally .gz)
    pattern: String,
}

pub(super) fn run_stats(args: StatsArgs) -> Result<()> {
    let timer = std::time::Instant::now();
    let (pattern, format) = formats::load_file(&args.pattern)?;
    println!("Format: {}", format.name());
    if let Some(name) = &pattern.name {
        println!("Name: {name}");
    }
    if let Some(author) = &pattern.author {
        println!("Author: {author}");
    }
    println!(
        "Rule: {} ({})",
        pattern.rule,
        pattern.rule.format(RuleFormat::SurvivalBirth)
    );
    print_population(pattern.population())?;
    let rect = pattern.bounding_rect();
    println!(
        "Bounding box: {}x{} at ({}, {})",
        rect.width, rect.height, rect.x, rect.y
    );
    println!(
        "Computed stats in {:.1} secs",
        timer.elapsed().as_secs_f64()
    );
    Ok(())
}
