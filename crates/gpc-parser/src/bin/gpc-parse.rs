/// gpc parser CLI

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use gpc_parser::{dump_tree, Driver, ParseOptions};
use tracing_subscriber::EnvFilter;

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    /// Depth-marked text, one node per line
    Tree,
    /// The tree as JSON
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "gpc-parse")]
#[command(about = "Derive a parse tree for a token sequence from a plain-text grammar")]
#[command(version)]
struct Args {
    /// Grammar file
    #[arg(value_name = "GRAMMAR")]
    grammar: PathBuf,

    /// JSON terminal definitions [default: terminals.json beside the grammar]
    #[arg(short, long, value_name = "FILE")]
    terminals: Option<PathBuf>,

    /// JSON token sequence [default: tokens.json beside the grammar]
    #[arg(long, value_name = "FILE")]
    tokens: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Tree)]
    format: Format,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .with_writer(std::io::stderr)
        .init();

    let mut options = ParseOptions::new(&args.grammar).verbose(args.verbose);
    if let Some(terminals) = args.terminals {
        options = options.terminals(terminals);
    }
    if let Some(tokens) = args.tokens {
        options = options.tokens(tokens);
    }

    let output = Driver::new(options)
        .run()
        .with_context(|| format!("Parsing with grammar {} failed", args.grammar.display()))?;

    tracing::info!("Derived {} from {}", output.start_symbol, output.grammar_file.display());

    match args.format {
        Format::Tree => print!("{}", dump_tree(&output.tree)),
        Format::Json => println!("{}", serde_json::to_string_pretty(&output.tree)?),
    }

    Ok(())
}
