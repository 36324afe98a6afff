// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! hyperdpo CLI
//!
//! Runs evolution requests offline from a JSON file, using the same pipeline
//! as the daemon's `POST /evolve`.
#![allow(clippy::print_stdout, clippy::print_stderr)]

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use comfy_table::{presets::UTF8_FULL, Table};
use hyperdpo_api::{
    decode_request, encode_graph, handle_clean, list_matches, run_evolve, ConfigService,
    EvolveRequest, EvolveResponse, FsConfigStore, Limits, Matching,
};
use hyperdpo_core::{Evolution, StopReason};

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// JSON config file holding request limits (defaults apply when omitted)
    #[clap(long, global = true)]
    config: Option<PathBuf>,

    #[clap(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Evolve the request's hypergraph with its rule
    Evolve {
        /// Request file (same body as `POST /evolve`)
        request: PathBuf,
        /// Override the step budget
        #[clap(long)]
        steps: Option<usize>,
        /// Clean the hypergraph before every step
        #[clap(long)]
        clean: bool,
        /// Enumerate every choice of parallel edges
        #[clap(long)]
        exhaustive: bool,
        /// Seed for fresh identifiers
        #[clap(long)]
        seed: Option<u64>,
        /// Output format
        #[clap(long, value_enum, default_value_t = Format::Json)]
        format: Format,
    },
    /// List deletion-safe matches of the rule on the request's hypergraph
    Matches {
        /// Request file
        request: PathBuf,
        /// Enumerate every choice of parallel edges
        #[clap(long)]
        exhaustive: bool,
    },
    /// Print the cleaned hypergraph of the request
    Clean {
        /// Request file
        request: PathBuf,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    Json,
    Table,
}

fn read_request(path: &Path) -> Result<EvolveRequest> {
    let bytes = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_slice(&bytes).with_context(|| format!("parsing {}", path.display()))
}

fn load_limits(config: Option<&Path>) -> Result<Limits> {
    let Some(path) = config else {
        return Ok(Limits::default());
    };
    let config = ConfigService::new(FsConfigStore::at(path))
        .load_service_config()
        .with_context(|| format!("loading config {}", path.display()))?;
    Ok(config.limits)
}

fn stop_label(stop: StopReason) -> &'static str {
    match stop {
        StopReason::StepsExhausted => "steps exhausted",
        StopReason::NoApplicableMatch => "no applicable match",
        StopReason::VertexLimitReached => "vertex limit reached",
    }
}

fn render_table(evolution: &Evolution) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["edge", "vertices"]);
    for (id, members) in evolution.graph.edges() {
        let labels: Vec<&str> = members.iter().map(|v| v.as_str()).collect();
        table.add_row(vec![id.to_string(), labels.join(", ")]);
    }
    format!(
        "{table}\napplied: {} ({})\ndigest: {}",
        evolution.applied,
        stop_label(evolution.stop),
        evolution.graph.digest_hex()
    )
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    let limits = load_limits(args.config.as_deref())?;

    match args.cmd {
        Command::Evolve {
            request,
            steps,
            clean,
            exhaustive,
            seed,
            format,
        } => {
            let mut request = read_request(&request)?;
            if let Some(steps) = steps {
                request.steps = steps;
            }
            request.clean |= clean;
            if exhaustive {
                request.matching = Matching::Exhaustive;
            }
            if seed.is_some() {
                request.seed = seed;
            }
            let evolution = run_evolve(decode_request(&request, &limits)?)?;
            match format {
                Format::Json => print_json(&EvolveResponse {
                    hypergraph: encode_graph(&evolution.graph),
                })?,
                Format::Table => println!("{}", render_table(&evolution)),
            }
        }
        Command::Matches {
            request,
            exhaustive,
        } => {
            let mut request = read_request(&request)?;
            if exhaustive {
                request.matching = Matching::Exhaustive;
            }
            print_json(&list_matches(&request, &limits)?)?;
        }
        Command::Clean { request } => {
            let request = read_request(&request)?;
            print_json(&handle_clean(&request, &limits)?)?;
        }
    }

    Ok(())
}
