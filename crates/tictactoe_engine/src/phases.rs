//! Match phases and outcomes.

use super::Player;
use serde::{Deserialize, Serialize};

/// Outcome of a position.
///
/// Always derived from the board by [`rules::outcome`](crate::rules::outcome),
/// never tracked separately.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// Player won the game.
    Winner(Player),
    /// Board is full and nobody won.
    Draw,
    /// Game still in progress.
    InProgress,
}

impl Outcome {
    /// Returns the winner if there is one.
    pub fn winner(&self) -> Option<Player> {
        match self {
            Outcome::Winner(player) => Some(*player),
            Outcome::Draw | Outcome::InProgress => None,
        }
    }

    /// Returns true if the game was a draw.
    pub fn is_draw(&self) -> bool {
        matches!(self, Outcome::Draw)
    }

    /// True once the game has concluded.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Outcome::InProgress)
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Winner(player) => write!(f, "{} wins!", player),
            Outcome::Draw => write!(f, "It's a draw!"),
            Outcome::InProgress => write!(f, "In progress"),
        }
    }
}

/// Phase of a match, as seen by the driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatchPhase {
    /// The engine (X) is on turn.
    AwaitingAiTurn,
    /// The external opponent (O) is on turn.
    AwaitingOpponentTurn,
    /// The match is over.
    Finished(Outcome),
}

impl MatchPhase {
    /// Player expected to move, if the match is still running.
    pub fn to_move(&self) -> Option<Player> {
        match self {
            MatchPhase::AwaitingAiTurn => Some(Player::X),
            MatchPhase::AwaitingOpponentTurn => Some(Player::O),
            MatchPhase::Finished(_) => None,
        }
    }

    /// Returns true if the match is over.
    pub fn is_finished(&self) -> bool {
        matches!(self, MatchPhase::Finished(_))
    }
}
