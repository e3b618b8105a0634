//! Core domain types for tic-tac-toe.

use super::error::BoardError;
use super::position::Position;
use serde::{Deserialize, Serialize};
use std::ops::{Deref, DerefMut};
use tracing::instrument;

/// Player in the game.
///
/// `X` is the engine-controlled side: it always moves first and the search
/// always maximizes for it. `O` is the opposing side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
pub enum Player {
    /// Player X (engine side, maximizing).
    X,
    /// Player O (opponent side, minimizing).
    O,
}

impl Player {
    /// Returns the opponent player.
    pub fn opponent(self) -> Self {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }
}

/// A cell on the tic-tac-toe board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Cell {
    /// Empty cell.
    #[default]
    Empty,
    /// Cell occupied by a player.
    Occupied(Player),
}

/// 3x3 tic-tac-toe board.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Board {
    /// Cells in row-major order (0-8).
    cells: [Cell; 9],
}

impl Board {
    /// Creates a new empty board.
    pub fn new() -> Self {
        Self {
            cells: [Cell::Empty; 9],
        }
    }

    /// Builds a board from a row-major layout such as `["XX.", ".O.", "..."]`.
    ///
    /// `X` and `O` are marks, any other character is an empty cell.
    pub fn from_rows(rows: [&str; 3]) -> Self {
        let mut board = Self::new();
        for (row, line) in rows.iter().enumerate() {
            for (col, ch) in line.chars().take(3).enumerate() {
                let cell = match ch {
                    'X' | 'x' => Cell::Occupied(Player::X),
                    'O' | 'o' => Cell::Occupied(Player::O),
                    _ => Cell::Empty,
                };
                board.cells[row * 3 + col] = cell;
            }
        }
        board
    }

    /// Places `mark` at a raw `(row, col)` coordinate.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::InvalidCoordinate`] if either coordinate is
    /// outside `0..=2`, and [`BoardError::CellOccupied`] if the cell is
    /// already taken. The board is unchanged on error.
    #[instrument(skip(self))]
    pub fn place(&mut self, row: usize, col: usize, mark: Player) -> Result<Position, BoardError> {
        let pos = Position::from_row_col(row, col)?;
        self.place_at(pos, mark)?;
        Ok(pos)
    }

    /// Places `mark` at an already validated position.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::CellOccupied`] if the cell is not empty.
    pub fn place_at(&mut self, pos: Position, mark: Player) -> Result<(), BoardError> {
        if !self.is_empty(pos) {
            return Err(BoardError::CellOccupied(pos));
        }
        self.cells[pos.to_index()] = Cell::Occupied(mark);
        Ok(())
    }

    /// Resets a cell to empty without checking what was there.
    pub fn clear(&mut self, pos: Position) {
        self.cells[pos.to_index()] = Cell::Empty;
    }

    /// Places `mark` at `pos` for the lifetime of the returned guard.
    ///
    /// The guard derefs to the board, so the search can keep recursing
    /// through it. Dropping the guard clears the cell again.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::CellOccupied`] if the cell is not empty.
    pub fn scoped_place(
        &mut self,
        pos: Position,
        mark: Player,
    ) -> Result<PlacementGuard<'_>, BoardError> {
        self.place_at(pos, mark)?;
        Ok(PlacementGuard { board: self, pos })
    }

    /// Gets the cell at the given position.
    pub fn get(&self, pos: Position) -> Cell {
        self.cells[pos.to_index()]
    }

    /// Gets the cell at a raw `(row, col)` coordinate.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::InvalidCoordinate`] if the coordinate is out of range.
    pub fn at(&self, row: usize, col: usize) -> Result<Cell, BoardError> {
        Ok(self.get(Position::from_row_col(row, col)?))
    }

    /// Checks if a cell is empty.
    pub fn is_empty(&self, pos: Position) -> bool {
        self.get(pos) == Cell::Empty
    }

    /// True iff no empty cell remains.
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|c| *c != Cell::Empty)
    }

    /// Empty positions in row-major order.
    pub fn empty_positions(&self) -> impl Iterator<Item = Position> + '_ {
        Position::ALL.into_iter().filter(|pos| self.is_empty(*pos))
    }

    /// Number of cells holding `player`'s mark.
    pub fn count(&self, player: Player) -> usize {
        self.cells
            .iter()
            .filter(|c| **c == Cell::Occupied(player))
            .count()
    }

    /// Returns all cells as a slice.
    pub fn cells(&self) -> &[Cell; 9] {
        &self.cells
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in 0..3 {
            let symbols: Vec<&str> = (0..3)
                .map(|col| match self.cells[row * 3 + col] {
                    Cell::Empty => " ",
                    Cell::Occupied(Player::X) => "X",
                    Cell::Occupied(Player::O) => "O",
                })
                .collect();
            writeln!(f, "{}", symbols.join(" | "))?;
            writeln!(f, "{}", "-".repeat(9))?;
        }
        Ok(())
    }
}

/// A mark placed for the duration of a scope.
///
/// Created by [`Board::scoped_place`]; clears its cell when dropped, so every
/// recursion level hands the board back exactly as it received it.
#[derive(Debug)]
pub struct PlacementGuard<'a> {
    board: &'a mut Board,
    pos: Position,
}

impl PlacementGuard<'_> {
    /// The position this guard occupies.
    pub fn position(&self) -> Position {
        self.pos
    }
}

impl Deref for PlacementGuard<'_> {
    type Target = Board;

    fn deref(&self) -> &Board {
        self.board
    }
}

impl DerefMut for PlacementGuard<'_> {
    fn deref_mut(&mut self) -> &mut Board {
        self.board
    }
}

impl Drop for PlacementGuard<'_> {
    fn drop(&mut self) {
        self.board.clear(self.pos);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_place_rejects_out_of_range() {
        let mut board = Board::new();
        assert_eq!(
            board.place(3, 0, Player::X),
            Err(BoardError::InvalidCoordinate { row: 3, col: 0 })
        );
        assert_eq!(board, Board::new());
    }

    #[test]
    fn test_place_rejects_occupied() {
        let mut board = Board::new();
        board.place(1, 1, Player::X).unwrap();
        assert_eq!(
            board.place(1, 1, Player::O),
            Err(BoardError::CellOccupied(Position::Center))
        );
        assert_eq!(board.get(Position::Center), Cell::Occupied(Player::X));
    }

    #[test]
    fn test_guard_reverts_on_drop() {
        let mut board = Board::from_rows(["X..", "...", "..O"]);
        let before = board.clone();
        {
            let mut guard = board.scoped_place(Position::Center, Player::X).unwrap();
            assert_eq!(guard.get(Position::Center), Cell::Occupied(Player::X));
            let inner = guard.scoped_place(Position::TopRight, Player::O).unwrap();
            assert_eq!(inner.count(Player::O), 2);
        }
        assert_eq!(board, before);
    }

    #[test]
    fn test_clear_is_unchecked() {
        let mut board = Board::new();
        board.clear(Position::TopLeft);
        assert!(board.is_empty(Position::TopLeft));
    }

    #[test]
    fn test_empty_positions_row_major() {
        let board = Board::from_rows(["XO.", "...", "..X"]);
        let empty: Vec<_> = board.empty_positions().collect();
        assert_eq!(empty.first(), Some(&Position::TopRight));
        assert_eq!(empty.last(), Some(&Position::BottomCenter));
        assert_eq!(empty.len(), 6);
    }

    #[test]
    fn test_display_matches_grid() {
        let board = Board::from_rows(["X..", ".O.", "..."]);
        let rendered = board.to_string();
        assert!(rendered.starts_with("X |   |  \n---------\n"));
    }
}
