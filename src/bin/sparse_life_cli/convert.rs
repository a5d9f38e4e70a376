use crate::util::Format;
use anyhow::Result;
use clap::Args;
use sparse_life::formats;

#[derive(Args, Debug)]
pub(super) struct ConvertArgs {
    /// Path to the file containing the pattern; supports .rle, .cells, .lif and .life (optionally .gz)
    input: String,

    /// Path to the converted file
    #[arg(short, long)]
    output: String,

    /// Output format, picked by the output extension by default
    #[arg(short, long, value_enum)]
    format: Option<Format>,
}

pub(super) fn run_convert(args: ConvertArgs) -> Result<()> {
    let timer = std::time::Instant::now();
    let (pattern, from) = formats::load_file(&args.input)?;
    let to = formats::save_file(&pattern, &args.output, args.format.map(Into::into))?;
    println!(
        "Converted {} to {} in {:.1} secs",
        from.name(),
        to.name(),
        timer.elapsed().as_secs_f64()
    );
    Ok(())
}
