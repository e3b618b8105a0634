//! Match driver: alternates the engine and an external opponent.
//!
//! The engine plays X and always moves first. After every placement the
//! driver checks whether the mover has won or the board is full and, if so,
//! moves to [`MatchPhase::Finished`].

use crate::error::MatchError;
use crate::opponents::MoveSource;
use crate::rules::{self, has_won};
use crate::search::{Score, Strategy};
use crate::{Board, MatchPhase, Outcome, Player, Position};
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tracing::{debug, info, instrument, warn};

/// A placement recorded in the match history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Turn {
    /// The player who moved.
    pub player: Player,
    /// Where the mark went.
    pub position: Position,
}

impl std::fmt::Display for Turn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.player, self.position)
    }
}

/// One engine move with its search cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AiMove {
    /// Chosen position, `None` when the board had no empty cell.
    pub position: Option<Position>,
    /// Score the search assigned to the position.
    pub score: Score,
    /// Nodes visited by the search.
    pub nodes: u64,
    /// Wall-clock time of the search call.
    pub elapsed: Duration,
}

/// A single match between the engine and an opponent.
#[derive(Debug, Clone)]
pub struct Match {
    board: Board,
    strategy: Strategy,
    phase: MatchPhase,
    history: Vec<Turn>,
    ai_moves: Vec<AiMove>,
}

impl Match {
    /// Creates a new match with an empty board; the engine is on turn.
    #[instrument]
    pub fn new(strategy: Strategy) -> Self {
        Self {
            board: Board::new(),
            strategy,
            phase: MatchPhase::AwaitingAiTurn,
            history: Vec::new(),
            ai_moves: Vec::new(),
        }
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the strategy the engine searches with.
    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// Returns the current phase.
    pub fn phase(&self) -> MatchPhase {
        self.phase
    }

    /// Outcome of the current position, derived from the board.
    pub fn outcome(&self) -> Outcome {
        rules::outcome(&self.board)
    }

    /// Returns move history.
    pub fn history(&self) -> &[Turn] {
        &self.history
    }

    /// Returns every engine move made so far.
    pub fn ai_moves(&self) -> &[AiMove] {
        &self.ai_moves
    }

    /// Lets the engine search and play its move.
    ///
    /// # Errors
    ///
    /// [`MatchError::NotYourTurn`] if the opponent is on turn,
    /// [`MatchError::Finished`] if the match is over.
    #[instrument(skip(self), fields(strategy = %self.strategy))]
    pub fn play_ai_turn(&mut self) -> Result<AiMove, MatchError> {
        self.expect_turn(Player::X)?;

        let start = Instant::now();
        let result = self.strategy.best_move(&mut self.board);
        let elapsed = start.elapsed();

        let ai_move = AiMove {
            position: result.best_move,
            score: result.score,
            nodes: result.nodes,
            elapsed,
        };
        self.ai_moves.push(ai_move);

        match result.best_move {
            Some(pos) => {
                self.board
                    .place_at(pos, Player::X)
                    .map_err(MatchError::Engine)?;
                debug!(position = %pos, ?elapsed, nodes = result.nodes, "Engine moved");
                self.record(Player::X, pos);
            }
            None => {
                debug!("Engine found no legal move");
                self.phase = MatchPhase::Finished(self.outcome());
            }
        }

        Ok(ai_move)
    }

    /// Places O's mark at a raw `(row, col)` coordinate.
    ///
    /// # Errors
    ///
    /// [`MatchError::IllegalMove`] if the cell is taken or off the board; the
    /// board and turn are left unchanged. [`MatchError::NotYourTurn`] or
    /// [`MatchError::Finished`] on a call in the wrong phase.
    #[instrument(skip(self))]
    pub fn submit_opponent_move(&mut self, row: usize, col: usize) -> Result<Position, MatchError> {
        self.expect_turn(Player::O)?;

        let pos = self
            .board
            .place(row, col, Player::O)
            .map_err(MatchError::IllegalMove)?;
        debug!(position = %pos, "Opponent moved");
        self.record(Player::O, pos);
        Ok(pos)
    }

    /// Plays the match to completion against `source`.
    ///
    /// Illegal opponent moves are reported back to the source, which is then
    /// asked again.
    ///
    /// # Errors
    ///
    /// [`MatchError::SourceExhausted`] if the source stops supplying moves.
    #[instrument(skip(self, source), fields(strategy = %self.strategy, opponent = source.name()))]
    pub fn run<S: MoveSource + ?Sized>(&mut self, source: &mut S) -> Result<Outcome, MatchError> {
        loop {
            match self.phase {
                MatchPhase::AwaitingAiTurn => {
                    self.play_ai_turn()?;
                }
                MatchPhase::AwaitingOpponentTurn => {
                    let Some((row, col)) = source.next_move(&self.board) else {
                        return Err(MatchError::SourceExhausted(source.name().to_string()));
                    };
                    match self.submit_opponent_move(row, col) {
                        Ok(_) => {}
                        Err(e) if e.is_recoverable() => {
                            warn!(error = %e, row, col, "Rejected opponent move");
                            source.rejected(&e);
                        }
                        Err(e) => return Err(e),
                    }
                }
                MatchPhase::Finished(outcome) => {
                    info!(%outcome, moves = self.history.len(), "Match finished");
                    return Ok(outcome);
                }
            }
        }
    }

    fn expect_turn(&self, player: Player) -> Result<(), MatchError> {
        match self.phase.to_move() {
            None => Err(MatchError::Finished),
            Some(on_turn) if on_turn != player => Err(MatchError::NotYourTurn(player)),
            Some(_) => Ok(()),
        }
    }

    /// Appends the move and advances the phase.
    fn record(&mut self, mover: Player, position: Position) {
        self.history.push(Turn {
            player: mover,
            position,
        });

        self.phase = if has_won(&self.board, mover) {
            MatchPhase::Finished(Outcome::Winner(mover))
        } else if self.board.is_full() {
            MatchPhase::Finished(Outcome::Draw)
        } else {
            match mover.opponent() {
                Player::X => MatchPhase::AwaitingAiTurn,
                Player::O => MatchPhase::AwaitingOpponentTurn,
            }
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::opponents::{PerfectOpponent, ScriptedOpponent};

    #[test]
    fn test_engine_moves_first() {
        let mut game = Match::new(Strategy::Pruned);
        assert_eq!(game.phase(), MatchPhase::AwaitingAiTurn);
        assert_eq!(
            game.submit_opponent_move(0, 0),
            Err(MatchError::NotYourTurn(Player::O))
        );
        let ai = game.play_ai_turn().unwrap();
        assert_eq!(ai.position, Some(Position::TopLeft));
        assert_eq!(game.phase(), MatchPhase::AwaitingOpponentTurn);
    }

    #[test]
    fn test_run_reports_exhausted_source() {
        let mut game = Match::new(Strategy::Pruned);
        let mut source = ScriptedOpponent::new("empty", Vec::new());
        assert_eq!(
            game.run(&mut source),
            Err(MatchError::SourceExhausted("empty".to_string()))
        );
        assert_eq!(game.history().len(), 1);
    }

    #[test]
    fn test_finished_rejects_moves() {
        let mut game = Match::new(Strategy::Exhaustive);
        let outcome = game.run(&mut PerfectOpponent::default()).unwrap();
        assert_eq!(outcome, Outcome::Draw);
        assert_eq!(game.phase(), MatchPhase::Finished(Outcome::Draw));
        assert_eq!(game.play_ai_turn(), Err(MatchError::Finished));
        assert_eq!(game.submit_opponent_move(2, 2), Err(MatchError::Finished));
    }
}
