//! Draw detection and outcome derivation.

use super::win::{check_winner, has_won};
use crate::{Board, Outcome, Player};

/// Checks if the board is full (all cells occupied).
pub fn is_full(board: &Board) -> bool {
    board.is_full()
}

/// A full board on which neither player holds a line.
pub fn is_draw(board: &Board) -> bool {
    is_full(board) && !has_won(board, Player::X) && !has_won(board, Player::O)
}

/// Derives the outcome of the position.
pub fn outcome(board: &Board) -> Outcome {
    match check_winner(board) {
        Some(player) => Outcome::Winner(player),
        None if is_full(board) => Outcome::Draw,
        None => Outcome::InProgress,
    }
}
