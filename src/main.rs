use std::env;
use std::fs;

use anyhow::{Context, Result, bail};
use tracing::info;

use pawnhunt_cluster::{ClusterConfig, solve};
use pawnhunt_core::Board;

const USAGE: &str = "usage: pawnhunt <board-file> --workers N [--threads N]";

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let mut file: Option<String> = None;
    let mut workers: Option<usize> = None;
    let mut threads: Option<usize> = None;

    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--workers" => {
                let value = args.next().context("--workers needs a value")?;
                workers =
                    Some(value.parse().with_context(|| format!("invalid worker count: {value}"))?);
            }
            "--threads" => {
                let value = args.next().context("--threads needs a value")?;
                threads =
                    Some(value.parse().with_context(|| format!("invalid thread count: {value}"))?);
            }
            _ if file.is_none() && !arg.starts_with("--") => file = Some(arg),
            _ => bail!("unexpected argument: {arg}\n{USAGE}"),
        }
    }
    let Some(file) = file else { bail!("{USAGE}") };
    let Some(workers) = workers else { bail!("--workers is required\n{USAGE}") };

    let text = fs::read_to_string(&file).with_context(|| format!("reading {file}"))?;
    let board: Board = text.parse().with_context(|| format!("parsing {file}"))?;
    println!("{board}");

    let mut config = ClusterConfig::new(workers);
    config.search.threads = threads;
    info!(workers, "starting cluster solve");
    let outcome = solve(&board, &config)?;

    println!("=============================");
    if outcome.solution.is_solved() {
        println!("cost: {}", outcome.solution.cost);
    } else {
        println!("cost: no solution within depth {}", board.max_depth());
    }
    println!("nodes: {}", outcome.stats.nodes);
    println!("moves: {}", outcome.solution.moves.len());
    for m in &outcome.solution.moves {
        println!("{m}");
    }
    println!("=============================");
    info!(
        nodes = outcome.stats.nodes,
        frontier = outcome.stats.frontier_len,
        "search finished"
    );
    Ok(())
}
