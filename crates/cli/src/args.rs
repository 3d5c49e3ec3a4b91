use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Mines data-flow graphs from Python source",
    subcommand_required = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Mine one file and print its graph
    Graph {
        file: PathBuf,
        #[arg(long, value_enum, default_value_t = Format::Json)]
        format: Format,
    },
    /// Show a variable's definitions and received calls
    Query {
        file: PathBuf,
        name: String,
        /// Treat the input as an incomplete fragment and repair it first
        #[arg(long)]
        partial: bool,
    },
    /// Mine every .py file under a directory into one folder document
    Scan {
        dir: PathBuf,
        /// Write the JSON document here instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
pub enum Format {
    Json,
    Dot,
}

pub fn parse_cli() -> Cli {
    Cli::parse()
}
