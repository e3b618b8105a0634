//! Search strategy selection.

use super::searcher::Searcher;
use super::{Score, SearchResult};
use crate::Board;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Tree-search strategy used to pick the engine's move.
///
/// Both variants return the same score for every position; they differ only
/// in how many nodes they visit.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
pub enum Strategy {
    /// Plain minimax over the full game tree.
    #[serde(rename = "minimax", alias = "exhaustive")]
    #[strum(to_string = "minimax", serialize = "exhaustive")]
    Exhaustive,
    /// Minimax with alpha-beta cutoffs.
    #[serde(rename = "alpha-beta", alias = "alphabeta", alias = "pruned")]
    #[strum(to_string = "alpha-beta", serialize = "alphabeta", serialize = "pruned")]
    Pruned,
}

impl Strategy {
    /// Human-readable name used in reports.
    pub fn label(&self) -> &'static str {
        match self {
            Strategy::Exhaustive => "Minimax",
            Strategy::Pruned => "Alpha-Beta Pruning",
        }
    }

    /// Game-theoretic score of `board` from X's point of view.
    ///
    /// `maximizing` is true when X is on turn. The board is handed back
    /// unchanged.
    pub fn evaluate(self, board: &mut Board, maximizing: bool) -> Score {
        self.evaluate_counted(board, maximizing).0
    }

    /// Like [`Strategy::evaluate`], also returning the number of nodes visited.
    pub fn evaluate_counted(self, board: &mut Board, maximizing: bool) -> (Score, u64) {
        let mut searcher = self.searcher();
        let score = searcher.evaluate(board, maximizing);
        (score, searcher.nodes())
    }

    /// Chooses X's move on `board`.
    ///
    /// Ties between equally scored moves go to the first in row-major order.
    #[instrument(skip(board), fields(strategy = %self))]
    pub fn best_move(self, board: &mut Board) -> SearchResult {
        let result = self.searcher().best_move(board);
        debug!(
            best_move = ?result.best_move,
            score = result.score,
            nodes = result.nodes,
            "Search complete"
        );
        result
    }

    fn searcher(self) -> Searcher {
        Searcher::new(matches!(self, Strategy::Pruned))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Position;
    use std::str::FromStr;

    #[test]
    fn test_parse_names() {
        assert_eq!(Strategy::from_str("minimax"), Ok(Strategy::Exhaustive));
        assert_eq!(Strategy::from_str("alpha-beta"), Ok(Strategy::Pruned));
        assert_eq!(Strategy::from_str("alphabeta"), Ok(Strategy::Pruned));
        assert!(Strategy::from_str("mcts").is_err());
        assert_eq!(Strategy::Pruned.to_string(), "alpha-beta");
    }

    #[test]
    fn test_serde_accepts_parse_aliases() {
        for (name, expected) in [
            ("minimax", Strategy::Exhaustive),
            ("exhaustive", Strategy::Exhaustive),
            ("alpha-beta", Strategy::Pruned),
            ("alphabeta", Strategy::Pruned),
            ("pruned", Strategy::Pruned),
        ] {
            let json = format!("\"{}\"", name);
            let decoded: Strategy = serde_json::from_str(&json).expect("Known name");
            assert_eq!(decoded, expected);
            assert_eq!(Strategy::from_str(name), Ok(expected));
        }
        assert_eq!(
            serde_json::to_string(&Strategy::Exhaustive).expect("Serializable"),
            "\"minimax\""
        );
    }

    #[test]
    fn test_immediate_win_taken() {
        for strategy in [Strategy::Exhaustive, Strategy::Pruned] {
            let mut board = Board::from_rows(["XX.", "OO.", "..."]);
            let result = strategy.best_move(&mut board);
            assert_eq!(result.best_move, Some(Position::TopRight));
            assert_eq!(result.score, super::super::WIN);
        }
    }
}
