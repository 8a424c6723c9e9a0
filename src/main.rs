use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tetl::{ExportFormat, Schema, TweetETL, DEFAULT_OUTPUT};

/// Flatten a line-delimited tweet export into an analysis table.
#[derive(Parser, Debug)]
#[command(author, version, about = "Tweet NDJSON to scored table", long_about = None)]
struct Cli {
    /// Input file (.json/.jsonl/.ndjson/.zst) or a directory of them.
    input: PathBuf,

    /// Destination for the table.
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    output: PathBuf,

    /// Write the table to `--output`.
    #[arg(long)]
    save: bool,

    /// csv or jsonl.
    #[arg(long, default_value = "csv")]
    format: ExportFormat,

    /// Add clean_text, sentiment, statuses_count, place_coord_boundaries and location.
    #[arg(long)]
    extended: bool,

    /// Extract columns in parallel.
    #[arg(long)]
    parallel: bool,

    /// Rewrite created_at as RFC 3339.
    #[arg(long)]
    human_timestamps: bool,

    #[arg(long)]
    no_progress: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let etl = TweetETL::new()
        .input(&cli.input)
        .output(&cli.output)
        .save(cli.save)
        .format(cli.format)
        .schema(if cli.extended { Schema::Extended } else { Schema::Standard })
        .parallel(cli.parallel)
        .timestamps_human_readable(cli.human_timestamps)
        .progress(!cli.no_progress);

    let table = etl.run()?;
    println!("Built {} rows x {} columns", table.len(), table.columns().len());
    if cli.save {
        println!("File Successfully Saved to {}", cli.output.display());
    }

    Ok(())
}
