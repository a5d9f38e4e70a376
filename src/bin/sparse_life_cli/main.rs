mod convert;
mod random;
mod run;
mod stats;
mod util;

use anyhow::Result;
use clap::{Parser, Subcommand};
use convert::{run_convert, ConvertArgs};
use random::{run_random, RandomArgs};
use run::{run_run, RunArgs};
use stats::{run_stats, StatsArgs};

#[derive(Parser, Debug)]
#[command(version, about)]
struct CLIParser {
    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand, Debug)]
enum Action {
    /// Run the simulation for a number of generations or until the pattern dies out
    Run(RunArgs),
    /// Convert a pattern file between RLE, Plaintext, Life 1.05 and Life 1.06
    Convert(ConvertArgs),
    /// Print pattern's metadata, rule, population and bounding box
    Stats(StatsArgs),
    /// Generate a random soup (see https://conwaylife.com/wiki/Soup)
    Random(RandomArgs),
}

fn main() -> Result<()> {
    let args = CLIParser::parse();

    match args.action {
        Action::Run(args) => run_run(args),
        Action::Convert(args) => run_convert(args),
        Action::Stats(args) => run_stats(args),
        Action::Random(args) => run_random(args),
    }
}
