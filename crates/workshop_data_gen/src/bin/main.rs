//! CLI for generating workshop data.
//!
//! Usage:
//!   # Denormalized tables, piped straight into psql
//!   gen-workshop-data --products 100000 --orders 50000 | psql workshop
//!
//!   # Normalized tables with their CREATE TABLE statements
//!   gen-workshop-data --variant normalized --with-schema --output normalized.sql

use chrono::{Local, NaiveDateTime};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use workshop_data_gen::{Generator, GeneratorConfig, SqlWriter, TableSummary, Variant};

/// Rows between progress lines when no progress bar is shown
const REPORT_EVERY: usize = 10_000;

#[derive(Parser, Debug)]
#[command(name = "gen-workshop-data")]
#[command(about = "Generate synthetic data for the database workshop schemas", long_about = None)]
struct Args {
    /// Schema variant: bad (denormalized) or normalized
    #[arg(short, long, default_value = "bad")]
    variant: String,

    /// Number of products to generate
    #[arg(short, long, default_value = "500000")]
    products: usize,

    /// Number of orders to generate
    #[arg(short, long, default_value = "200000")]
    orders: usize,

    /// Number of distinct customers
    #[arg(short, long, default_value = "20000")]
    customers: usize,

    /// Random seed for reproducibility
    #[arg(long, default_value = "12345")]
    seed: u64,

    /// Rows per INSERT statement
    #[arg(long, default_value = "1000")]
    batch_size: usize,

    /// Emit CREATE TABLE statements before the data
    #[arg(long)]
    with_schema: bool,

    /// Order dates fall in the year before this time (default: now),
    /// format: "YYYY-MM-DD HH:MM:SS"
    #[arg(long)]
    reference_time: Option<String>,

    /// Output file (default: stdout)
    #[arg(long)]
    output: Option<String>,

    /// Show a progress bar (only when writing to a file)
    #[arg(long)]
    progress: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let variant: Variant = args
        .variant
        .parse()
        .map_err(|e: String| anyhow::anyhow!(e))?;

    let reference_time = match args.reference_time {
        Some(ref s) => NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
            .map_err(|e| anyhow::anyhow!("invalid --reference-time '{}': {}", s, e))?,
        None => Local::now().naive_local(),
    };

    let config = GeneratorConfig {
        variant,
        products: args.products,
        orders: args.orders,
        customers: args.customers,
        seed: args.seed,
        batch_size: args.batch_size,
        include_schema: args.with_schema,
        reference_time,
    };
    config.validate().map_err(|e| anyhow::anyhow!(e))?;

    eprintln!("{}", "=".repeat(50));
    eprintln!("DATA GENERATOR - Database Workshop");
    eprintln!("Variant: {}", variant);
    eprintln!("Products: {}", format_count(config.products));
    eprintln!("Orders: {}", format_count(config.orders));
    eprintln!("{}", "=".repeat(50));

    let mut gen = Generator::new(config);

    let summaries = if let Some(ref path) = args.output {
        let file = BufWriter::new(File::create(path)?);
        let summaries = run(&mut gen, file, args.progress)?;
        eprintln!("Written to {}", path);
        summaries
    } else {
        let stdout = io::stdout();
        run(&mut gen, BufWriter::new(stdout.lock()), false)?
    };

    for summary in &summaries {
        eprintln!("  {}: {} rows", summary.table, format_count(summary.rows));
    }
    eprintln!("DATA GENERATION COMPLETE!");
    Ok(())
}

fn run<W: Write>(
    gen: &mut Generator,
    out: W,
    show_bar: bool,
) -> anyhow::Result<Vec<TableSummary>> {
    let mut writer = SqlWriter::new(out);

    if show_bar {
        let pb = ProgressBar::new(0);
        pb.set_style(
            ProgressStyle::with_template(
                "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}",
            )?
            .progress_chars("█▓▒░  ")
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
        );

        let mut current = String::new();
        let summaries = gen.generate(&mut writer, &mut |table, done, total| {
            if current != table {
                current = table.to_string();
                pb.set_length(total as u64);
                pb.set_message(current.clone());
            }
            pb.set_position(done as u64);
        })?;
        pb.finish_with_message("done");
        Ok(summaries)
    } else {
        let mut last = 0;
        let summaries = gen.generate(&mut writer, &mut |table, done, total| {
            if done / REPORT_EVERY > last / REPORT_EVERY || done == total {
                eprintln!("  {} {} rows...", table, format_count(done));
            }
            last = if done == total { 0 } else { done };
        })?;
        Ok(summaries)
    }
}

/// Format a count with thousands separators
fn format_count(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
