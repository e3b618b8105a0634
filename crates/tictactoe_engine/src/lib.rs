//! Tic-tac-toe engine with exhaustive and alpha-beta search.
//!
//! # Architecture
//!
//! - **Board**: 3x3 grid with checked placement and a scoped placement guard
//! - **Rules**: pure win/draw detection
//! - **Search**: one recursive evaluator, run with or without alpha-beta cutoffs
//! - **Match driver**: alternates the engine (X, moves first) and an opponent
//! - **Benchmark**: repeated matches per strategy with timing and outcomes
//!
//! # Example
//!
//! ```
//! use tictactoe_engine::{Board, Position, Strategy};
//!
//! let mut board = Board::from_rows(["XX.", "OO.", "..."]);
//! let result = Strategy::Pruned.best_move(&mut board);
//! assert_eq!(result.best_move, Some(Position::TopRight));
//! assert_eq!(result.score, 1);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod bench;
mod driver;
mod error;
mod opponents;
mod phases;
mod position;
pub mod rules;
mod search;
mod types;

pub use bench::{AggregateStats, BenchmarkHarness, BenchmarkReport, StrategyStats, DEFAULT_MATCH_COUNT};
pub use driver::{AiMove, Match, Turn};
pub use error::{BoardError, MatchError};
pub use opponents::{FirstFreeOpponent, MoveSource, PerfectOpponent, ScriptedOpponent};
pub use phases::{MatchPhase, Outcome};
pub use position::Position;
pub use search::{Score, SearchResult, Strategy, DRAW, LOSS, WIN};
pub use types::{Board, Cell, PlacementGuard, Player};

/// A move is a board position.
pub type Move = Position;
