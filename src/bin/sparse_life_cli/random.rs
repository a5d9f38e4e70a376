use crate::util::{parse_rule, print_population, Format};
use anyhow::Result;
use clap::Args;
use sparse_life::{formats, Pattern};

#[derive(Args, Debug)]
pub(super) struct RandomArgs {
    /// Width of the filled area
    #[arg(short = 'W', long)]
    width: u32,

    /// Height of the filled area
    #[arg(short = 'H', long)]
    height: u32,

    /// Probability of a cell being alive
    #[arg(short, long, default_value_t = 0.5)]
    density: f64,

    /// Seed for the random number generator, seeds from the OS by default
    #[arg(short, long)]
    seed: Option<u64>,

    /// Rule written to the output file
    #[arg(short, long, default_value = "B3/S23")]
    rule: String,

    /// Path to the file where the soup will be saved
    #[arg(short, long)]
    output: String,

    /// Output format, picked by the output extension by default
    #[arg(short, long, value_enum)]
    format: Option<Format>,
}

pub(super) fn run_random(args: RandomArgs) -> Result<()> {
    let timer = std::time::Instant::now();
    let rule = parse_rule(&args.rule)?;
    let mut pattern = Pattern::random(rule, args.width, args.height, args.density, args.seed)?;
    pattern.name = Some(format!("{}x{} soup", args.width, args.height));
    println!(
        "Generated soup in {:.1} secs",
        timer.elapsed().as_secs_f64()
    );
    print_population(pattern.population())?;
    formats::save_file(&pattern, &args.output, args.format.map(Into::into))?;
    Ok(())
}
