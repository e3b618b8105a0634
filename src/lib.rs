//! Tic-tac-toe search benchmark
//!
//! Front end for [`tictactoe_engine`]: benchmark configuration, a terminal
//! opponent, and the opponent factory the CLI hands to the harness.
//!
//! # Example
//!
//! ```
//! use tictactoe_bench::{BenchConfig, OpponentKind, opponent_factory};
//! use tictactoe_engine::BenchmarkHarness;
//!
//! let config = BenchConfig::default()
//!     .with_overrides(Some(1), Some(OpponentKind::FirstFree), None)
//!     .unwrap();
//! let mut harness = BenchmarkHarness::new(opponent_factory(*config.opponent()));
//! let report = harness.run_all(config.strategies(), *config.match_count()).unwrap();
//! assert_eq!(report.match_count, 1);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
mod terminal;

pub use config::{BenchConfig, ConfigError, OpponentKind};
pub use terminal::{TerminalOpponent, parse_move};

use tictactoe_engine::{FirstFreeOpponent, MoveSource, PerfectOpponent};
use tracing::debug;

/// Builds the move source for one match.
pub fn build_opponent(kind: OpponentKind) -> Box<dyn MoveSource> {
    match kind {
        OpponentKind::Human => Box::new(TerminalOpponent::stdio("Player")),
        OpponentKind::FirstFree => Box::new(FirstFreeOpponent),
        OpponentKind::Perfect => Box::new(PerfectOpponent::default()),
    }
}

/// Opponent factory for [`tictactoe_engine::BenchmarkHarness`].
pub fn opponent_factory(kind: OpponentKind) -> impl FnMut(usize) -> Box<dyn MoveSource> {
    move |round| {
        debug!(round, opponent = %kind, "Creating opponent");
        build_opponent(kind)
    }
}
