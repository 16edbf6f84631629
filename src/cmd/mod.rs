mod graph;
mod render;
mod workshop;

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use std::io;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "workshop-erd")]
#[command(version)]
#[command(about = "Generate ER diagrams from the workshop SQL schemas", long_about = None)]
pub struct Cli {
    /// Defaults to `workshop` when omitted
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate diagrams for the bad and normalized workshop schemas
    Workshop {
        /// Workshop directory containing sql/ and diagrams/
        #[arg(short, long, default_value = ".")]
        dir: PathBuf,

        /// Only write .dot files, skip PNG rendering with Graphviz
        #[arg(long)]
        no_render: bool,
    },

    /// Generate an ER diagram for a single SQL file
    Graph {
        /// Input SQL file containing CREATE TABLE statements
        file: PathBuf,

        /// Output file (default: stdout). Extension selects the format;
        /// .png, .svg and .pdf are rendered with Graphviz
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Diagram title
        #[arg(long, default_value = "ER Diagram")]
        title: String,

        /// Output format: dot, json
        #[arg(short, long)]
        format: Option<String>,

        /// Layout direction: lr (left-right), tb (top-bottom)
        #[arg(long)]
        layout: Option<String>,

        /// Only include these tables (comma-separated, supports glob patterns)
        #[arg(short, long)]
        tables: Option<String>,

        /// Exclude these tables (comma-separated, supports glob patterns)
        #[arg(short, long)]
        exclude: Option<String>,

        /// Render the DOT output to an image with Graphviz (requires -o)
        #[arg(long)]
        render: bool,
    },

    /// Generate shell completion scripts
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },
}

pub fn run(cli: Cli) -> anyhow::Result<()> {
    let command = cli.command.unwrap_or(Commands::Workshop {
        dir: PathBuf::from("."),
        no_render: false,
    });

    match command {
        Commands::Workshop { dir, no_render } => workshop::run(dir, no_render),
        Commands::Graph {
            file,
            output,
            title,
            format,
            layout,
            tables,
            exclude,
            render,
        } => graph::run(
            file, output, title, format, layout, tables, exclude, render,
        ),
        Commands::Completions { shell } => {
            generate(
                shell,
                &mut Cli::command(),
                "workshop-erd",
                &mut io::stdout(),
            );
            Ok(())
        }
    }
}
