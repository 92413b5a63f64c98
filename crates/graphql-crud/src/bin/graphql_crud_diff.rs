//! `graphql-crud-diff` — render a mutation payload from two snapshots.
//!
//! Usage:
//!   graphql-crud-diff --kind update --relation manager < pair.json
//!
//! The input is `{ "initial": ..., "current": ... }`, read from stdin unless
//! `--input` names a file. Set `RUST_LOG=graphql_crud=trace` to follow the
//! engine's per-field decisions on stderr.

use std::io::{self, Read, Write};
use std::path::PathBuf;

use clap::Parser;
use graphql_crud::cli::{run, CliError, CliRequest, PayloadKind};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "graphql-crud-diff", about = "Diff two snapshots into a nested mutation payload")]
struct Args {
    /// create, update or upsert
    #[arg(long, default_value = "update")]
    kind: PayloadKind,

    /// Entity id for upserts
    #[arg(long)]
    id: Option<String>,

    /// One-to-one relation connected by id (repeatable)
    #[arg(long = "relation")]
    relations: Vec<String>,

    /// One-to-one relation connected by localId (repeatable)
    #[arg(long = "offline-relation")]
    offline_relations: Vec<String>,

    /// Emit falsy scalar changes
    #[arg(long)]
    strict: bool,

    #[arg(long)]
    pretty: bool,

    /// Read the snapshot pair from a file instead of stdin
    #[arg(long)]
    input: Option<PathBuf>,
}

fn read_input(path: Option<&PathBuf>) -> Result<String, CliError> {
    match path {
        Some(path) => Ok(std::fs::read_to_string(path)?),
        None => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
    }
}

fn execute(args: Args) -> Result<String, CliError> {
    let input = read_input(args.input.as_ref())?;
    let request = CliRequest {
        kind: args.kind,
        id: args.id,
        relations: args.relations,
        offline_relations: args.offline_relations,
        strict: args.strict,
        pretty: args.pretty,
    };
    run(&request, input.trim())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    match execute(Args::parse()) {
        Ok(out) => {
            let mut stdout = io::stdout();
            if let Err(e) = writeln!(stdout, "{out}") {
                eprintln!("{e}");
                std::process::exit(1);
            }
        }
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    }
}
