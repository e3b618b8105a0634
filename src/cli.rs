//! Command-line interface for tictactoe_bench.

use tictactoe_bench::OpponentKind;
use clap::{Parser, Subcommand};
use tictactoe_engine::Strategy;

/// Tic-tac-toe search benchmark - minimax versus alpha-beta pruning
#[derive(Parser, Debug)]
#[command(name = "tictactoe_bench")]
#[command(about = "Compare minimax and alpha-beta move selection", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play one match against the engine at the terminal
    Play {
        /// Search strategy for the engine (minimax or alpha-beta)
        #[arg(short, long, default_value = "alpha-beta")]
        strategy: Strategy,
    },

    /// Run repeated matches per strategy and report statistics
    Bench {
        /// Path to benchmark configuration file
        #[arg(short, long, default_value = "bench.toml")]
        config: std::path::PathBuf,

        /// Matches per strategy (overrides the config file)
        #[arg(short, long)]
        matches: Option<usize>,

        /// Opponent for every match (overrides the config file)
        #[arg(short, long, value_enum)]
        opponent: Option<OpponentKind>,

        /// Strategies to compare (overrides the config file)
        #[arg(short, long, value_delimiter = ',')]
        strategies: Option<Vec<Strategy>>,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the empty-board search result and node count per strategy
    Nodes,
}
