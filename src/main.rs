//! tictactoe_bench - play against the search engine or benchmark it.

#![warn(missing_docs)]

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command};
use std::path::Path;
use tictactoe_bench::{BenchConfig, OpponentKind, TerminalOpponent, opponent_factory};
use tictactoe_engine::{Board, BenchmarkHarness, Match, Strategy};
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Play { strategy } => run_play(strategy),
        Command::Bench {
            config,
            matches,
            opponent,
            strategies,
            json,
        } => run_bench(&config, matches, opponent, strategies, json),
        Command::Nodes => run_nodes(),
    }
}

/// Plays one match against a person at the terminal.
#[instrument]
fn run_play(strategy: Strategy) -> Result<()> {
    info!("Starting interactive match");
    println!("You are O. The engine ({}) plays X and moves first.", strategy.label());

    let mut game = Match::new(strategy);
    let mut human = TerminalOpponent::stdio("Player");
    let outcome = game
        .run(&mut human)
        .context("Match ended before a result")?;

    println!("{}", game.board());
    println!("{}", outcome);
    for (i, ai_move) in game.ai_moves().iter().enumerate() {
        println!(
            "Engine move {}: {} score {} ({} nodes, {:.5} seconds)",
            i + 1,
            ai_move
                .position
                .map(|p| p.to_string())
                .unwrap_or_else(|| "-".to_string()),
            ai_move.score,
            ai_move.nodes,
            ai_move.elapsed.as_secs_f64()
        );
    }
    Ok(())
}

/// Runs the configured benchmark and prints the report.
#[instrument(skip(strategies))]
fn run_bench(
    config_path: &Path,
    matches: Option<usize>,
    opponent: Option<OpponentKind>,
    strategies: Option<Vec<Strategy>>,
    json: bool,
) -> Result<()> {
    let config = BenchConfig::load_or_default(config_path)?
        .with_overrides(matches, opponent, strategies)?;
    info!(
        match_count = config.match_count(),
        opponent = %config.opponent(),
        "Running benchmark"
    );

    let mut harness = BenchmarkHarness::new(opponent_factory(*config.opponent()));
    let report = harness
        .run_all(config.strategies(), *config.match_count())
        .context("Benchmark aborted")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", report);
    }
    Ok(())
}

/// Searches the empty board with every strategy.
fn run_nodes() -> Result<()> {
    for strategy in [Strategy::Exhaustive, Strategy::Pruned] {
        let mut board = Board::new();
        let result = strategy.best_move(&mut board);
        println!(
            "{}: best move {} score {} ({} nodes)",
            strategy.label(),
            result
                .best_move
                .map(|p| p.to_string())
                .unwrap_or_else(|| "-".to_string()),
            result.score,
            result.nodes
        );
    }
    Ok(())
}
