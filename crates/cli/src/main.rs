//! Entry point for the command-line interface. A thin wrapper: all the
//! mining lives in the library crates.

use std::fs;

use anyhow::{Context, Result};
use serde_json::json;
use tracing_subscriber::EnvFilter;

mod args;

use args::{parse_cli, Commands, Format};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();
    let cli = parse_cli();
    match cli.command {
        Commands::Graph { file, format } => {
            let graph = pyparse::mine_file(&file)
                .with_context(|| format!("failed to mine {}", file.display()))?;
            match format {
                Format::Json => println!("{}", graph.to_json()?),
                Format::Dot => println!("{}", graph.to_dot()),
            }
        }
        Commands::Query {
            file,
            name,
            partial,
        } => {
            let content = fs::read_to_string(&file)
                .with_context(|| format!("failed to read {}", file.display()))?;
            let graph = if partial {
                match pyparse::mine_fragment(&content) {
                    Ok(g) => g,
                    Err(e) => {
                        // A failed repair means "no recommendation", not a crash.
                        tracing::warn!(error = %e, "fragment could not be repaired");
                        graph::DataFlowGraph::default()
                    }
                }
            } else {
                pyparse::mine(&content)
                    .with_context(|| format!("failed to parse {}", file.display()))?
            };
            let (defs, calls) = graph.find_definitions_and_calls(&name);
            println!(
                "{}",
                serde_json::to_string_pretty(&json!({
                    "name": name,
                    "definitions": defs,
                    "calls": calls,
                }))?
            );
        }
        Commands::Scan { dir, out } => {
            let folder = pyparse::mine_dir(&dir)
                .with_context(|| format!("failed to scan {}", dir.display()))?;
            let doc = serde_json::to_string_pretty(&folder)?;
            match out {
                Some(path) => fs::write(&path, doc)
                    .with_context(|| format!("failed to write {}", path.display()))?,
                None => println!("{doc}"),
            }
        }
    }
    Ok(())
}
