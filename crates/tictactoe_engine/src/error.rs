//! Error types for board mutation and match play.

use super::position::Position;
use super::types::Player;

/// Error raised by [`Board`](crate::Board) placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum BoardError {
    /// Row or column outside `0..=2`.
    #[display("Coordinate ({}, {}) is off the board", row, col)]
    InvalidCoordinate {
        /// Requested row.
        row: usize,
        /// Requested column.
        col: usize,
    },

    /// The cell already holds a mark.
    #[display("Cell {} is already occupied", _0)]
    CellOccupied(Position),
}

impl std::error::Error for BoardError {}

/// Error returned by the match driver.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum MatchError {
    /// The opponent chose an occupied or out-of-range cell.
    ///
    /// Recoverable: the board and turn are unchanged and the same source
    /// is asked again.
    #[display("Illegal move: {}", _0)]
    IllegalMove(BoardError),

    /// A move was submitted for the side that is not on turn.
    #[display("It's not {}'s turn", _0)]
    NotYourTurn(Player),

    /// The match has already finished.
    #[display("Match is already over")]
    Finished,

    /// The opponent's move source has no more moves to give.
    #[display("Move source {} ran out of moves", _0)]
    SourceExhausted(String),

    /// The engine tried to place on an occupied cell.
    ///
    /// Unreachable while the search only scans empty cells.
    #[display("Engine placement failed: {}", _0)]
    Engine(BoardError),
}

impl std::error::Error for MatchError {}

impl MatchError {
    /// True for errors the driver recovers from by asking again.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, MatchError::IllegalMove(_))
    }
}
