//! Game-tree search.
//!
//! Both strategies share one recursive evaluator in [`searcher`]; the
//! pruned variant differs only in carrying an alpha-beta window through it.
//! Scores are always from X's point of view.

mod searcher;
mod strategy;

pub use strategy::Strategy;

use crate::Position;
use serde::{Deserialize, Serialize};

/// Score of a position from X's perspective.
pub type Score = i32;

/// X can force a win.
pub const WIN: Score = 1;
/// Perfect play draws.
pub const DRAW: Score = 0;
/// O can force a win.
pub const LOSS: Score = -1;

/// Bound for the alpha-beta window and fold seeds.
pub(crate) const INF: Score = WIN + 1;

/// Result of a root search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Game-theoretic value of the position with X to move.
    pub score: Score,
    /// Move for X, absent only when no empty cell remains.
    pub best_move: Option<Position>,
    /// Evaluator calls made while searching.
    pub nodes: u64,
}
