use crate::util::{format_count, local_time, parse_rule, print_population};
use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use sparse_life::{formats, LifeEngine, QuickLifeEngine, SparseEngine};

#[derive(Args, Debug)]
pub(super) struct RunArgs {
    /// Path to the file containing the pattern; supports .rle, .cells, .lif and .life (optionally .gz)
    pattern: String,

    /// Path to the file where the resulting pattern will be saved
    #[arg(short, long)]
    output: String,

    /// Maximum number of generations; the run stops early if the pattern dies out
    #[arg(short, long, default_value_t = 1)]
    generations: u64,

    /// Overrides the rule stored in the pattern file
    #[arg(short, long)]
    rule: Option<String>,

    /// The engine to use for the simulation, default is sparse
    #[arg(short, long, value_enum, default_value_t = Engine::Sparse)]
    engine: Engine,

    /// Print population after the run
    #[arg(short, long)]
    population: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Engine {
    /// Counts neighbours into a scratch map rebuilt every generation
    Sparse,
    /// Keeps one persistent counter map with biased alive cells
    Quicklife,
}

/// Generations between two progress lines.
const REPORT_INTERVAL: u64 = 1000;

pub(super) fn run_run(args: RunArgs) -> Result<()> {
    let timer = std::time::Instant::now();
    let (mut pattern, format) = formats::load_file(&args.pattern)?;
    if let Some(rule) = &args.rule {
        pattern.rule = parse_rule(rule)?;
    }
    let mut engine: Box<dyn LifeEngine> = match args.engine {
        Engine::Sparse => Box::new(SparseEngine::new()),
        Engine::Quicklife => Box::new(QuickLifeEngine::new()),
    };
    engine.load_pattern(&pattern);
    println!(
        "Loaded {} pattern with rule {} in {:.1} secs",
        format.name(),
        pattern.rule,
        timer.elapsed().as_secs_f64()
    );

    let timer = std::time::Instant::now();
    let mut generations = 0;
    while generations < args.generations {
        let chunk = REPORT_INTERVAL.min(args.generations - generations);
        let done = engine.run(chunk);
        generations += done;
        if done < chunk {
            println!("[{}] Pattern died out", local_time());
            break;
        }
        if generations < args.generations {
            println!(
                "[{}] Updated by {} out of {} generations",
                local_time(),
                format_count(generations)?,
                format_count(args.generations)?
            );
        }
    }
    println!(
        "Updated pattern by {} generations in {:.1} secs",
        format_count(generations)?,
        timer.elapsed().as_secs_f64()
    );

    let updated = engine.current_state();
    if args.population {
        print_population(updated.population())?;
    }
    let pattern = sparse_life::Pattern {
        cells: updated.cells,
        ..pattern
    };
    formats::save_file(&pattern, &args.output, None)
        .with_context(|| format!("Failed to save result to {}", args.output))?;
    Ok(())
}
