//! Move sources for the opposing side.
//!
//! The match driver asks a [`MoveSource`] for O's moves. Terminal input,
//! scripted test sequences and engine-backed opponents all plug in here.

use crate::error::MatchError;
use crate::search::{Score, Strategy};
use crate::{Board, Player, Position};
use std::collections::VecDeque;
use tracing::{debug, instrument};

/// Anything that can supply O's moves.
pub trait MoveSource {
    /// Returns the source's display name.
    fn name(&self) -> &str;

    /// Next move as a raw zero-based `(row, col)` pair.
    ///
    /// Returns `None` when the source has nothing more to offer, which ends
    /// the match with [`MatchError::SourceExhausted`].
    fn next_move(&mut self, board: &Board) -> Option<(usize, usize)>;

    /// Called when the driver rejected the last move. The driver asks again
    /// afterwards.
    fn rejected(&mut self, _error: &MatchError) {}
}

impl<S: MoveSource + ?Sized> MoveSource for Box<S> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn next_move(&mut self, board: &Board) -> Option<(usize, usize)> {
        (**self).next_move(board)
    }

    fn rejected(&mut self, error: &MatchError) {
        (**self).rejected(error)
    }
}

/// Plays a fixed list of coordinates in order.
#[derive(Debug, Clone)]
pub struct ScriptedOpponent {
    name: String,
    moves: VecDeque<(usize, usize)>,
    rejections: usize,
}

impl ScriptedOpponent {
    /// Creates a scripted opponent from raw coordinates.
    pub fn new(name: impl Into<String>, moves: impl IntoIterator<Item = (usize, usize)>) -> Self {
        Self {
            name: name.into(),
            moves: moves.into_iter().collect(),
            rejections: 0,
        }
    }

    /// How many of the scripted moves the driver refused.
    pub fn rejections(&self) -> usize {
        self.rejections
    }
}

impl MoveSource for ScriptedOpponent {
    fn name(&self) -> &str {
        &self.name
    }

    fn next_move(&mut self, _board: &Board) -> Option<(usize, usize)> {
        self.moves.pop_front()
    }

    fn rejected(&mut self, _error: &MatchError) {
        self.rejections += 1;
    }
}

/// Takes the first empty cell in row-major order.
#[derive(Debug, Clone, Default)]
pub struct FirstFreeOpponent;

impl MoveSource for FirstFreeOpponent {
    fn name(&self) -> &str {
        "first-free"
    }

    fn next_move(&mut self, board: &Board) -> Option<(usize, usize)> {
        board.empty_positions().next().map(Position::coords)
    }
}

/// Plays O perfectly by minimizing X's best reply score.
///
/// Uses the same X-centric evaluator as the engine: for every candidate it
/// scores the resulting position with X on turn and keeps the lowest, first
/// in row-major order on ties.
#[derive(Debug, Clone, Copy)]
pub struct PerfectOpponent {
    strategy: Strategy,
}

impl PerfectOpponent {
    /// Creates a perfect opponent that evaluates with `strategy`.
    pub fn new(strategy: Strategy) -> Self {
        Self { strategy }
    }

    /// Best position for O, if any cell is free.
    #[instrument(skip(board))]
    pub fn choose(&self, board: &Board) -> Option<Position> {
        let mut scratch = board.clone();
        let mut best: Option<(Position, Score)> = None;

        for pos in Position::ALL {
            let Ok(mut child) = scratch.scoped_place(pos, Player::O) else {
                continue;
            };
            let score = self.strategy.evaluate(&mut child, true);
            if best.is_none_or(|(_, s)| score < s) {
                best = Some((pos, score));
            }
        }

        debug!(choice = ?best, "Opponent search complete");
        best.map(|(pos, _)| pos)
    }
}

impl Default for PerfectOpponent {
    fn default() -> Self {
        Self::new(Strategy::Pruned)
    }
}

impl MoveSource for PerfectOpponent {
    fn name(&self) -> &str {
        "perfect"
    }

    fn next_move(&mut self, board: &Board) -> Option<(usize, usize)> {
        self.choose(board).map(Position::coords)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scripted_pops_in_order() {
        let mut source = ScriptedOpponent::new("script", [(0, 0), (2, 2)]);
        let board = Board::new();
        assert_eq!(source.next_move(&board), Some((0, 0)));
        assert_eq!(source.next_move(&board), Some((2, 2)));
        assert_eq!(source.next_move(&board), None);
    }

    #[test]
    fn test_first_free_skips_taken() {
        let board = Board::from_rows(["XO.", "...", "..."]);
        assert_eq!(FirstFreeOpponent.next_move(&board), Some((0, 2)));
    }

    #[test]
    fn test_perfect_wins_before_blocking() {
        // X threatens (0, 2) but O completes the middle row first.
        let board = Board::from_rows(["XX.", "OO.", "X.."]);
        let choice = PerfectOpponent::default().choose(&board);
        assert_eq!(choice, Some(Position::MiddleRight));
    }

    #[test]
    fn test_perfect_leaves_board_untouched() {
        let board = Board::from_rows(["X..", "...", "..."]);
        let before = board.clone();
        let _ = PerfectOpponent::new(Strategy::Exhaustive).choose(&board);
        assert_eq!(board, before);
    }
}
