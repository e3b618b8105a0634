//! Shared depth-first evaluator.

use super::{DRAW, INF, LOSS, Score, SearchResult, WIN};
use crate::rules::has_won;
use crate::{Board, Player, Position};

/// Alpha-beta bounds carried by the pruned variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Window {
    /// Best score the maximizer can already guarantee.
    alpha: Score,
    /// Best score the minimizer can already guarantee.
    beta: Score,
}

impl Window {
    fn full() -> Self {
        Self {
            alpha: -INF,
            beta: INF,
        }
    }
}

/// Per-call search state.
#[derive(Debug)]
pub(super) struct Searcher {
    pruning: bool,
    nodes: u64,
}

impl Searcher {
    pub(super) fn new(pruning: bool) -> Self {
        Self { pruning, nodes: 0 }
    }

    /// Nodes visited so far.
    pub(super) fn nodes(&self) -> u64 {
        self.nodes
    }

    /// Scores `board` with X to move when `maximizing`, O otherwise.
    pub(super) fn evaluate(&mut self, board: &mut Board, maximizing: bool) -> Score {
        let window = self.pruning.then(Window::full);
        self.search(board, maximizing, window)
    }

    /// Picks X's move: strictly greatest score wins, ties keep the first
    /// candidate in row-major order.
    pub(super) fn best_move(&mut self, board: &mut Board) -> SearchResult {
        let mut best_move = None;
        let mut best_score = -INF;

        for pos in Position::ALL {
            if !board.is_empty(pos) {
                continue;
            }
            let score = {
                let mut child = place(board, pos, Player::X);
                self.evaluate(&mut child, false)
            };
            if score > best_score {
                best_score = score;
                best_move = Some(pos);
            }
        }

        let score = match best_move {
            Some(_) => best_score,
            None => self.evaluate(board, true),
        };

        SearchResult {
            score,
            best_move,
            nodes: self.nodes,
        }
    }

    fn search(&mut self, board: &mut Board, maximizing: bool, mut window: Option<Window>) -> Score {
        self.nodes += 1;

        if let Some(score) = terminal_score(board) {
            return score;
        }

        let mark = if maximizing { Player::X } else { Player::O };
        let mut best = if maximizing { -INF } else { INF };

        for pos in Position::ALL {
            if !board.is_empty(pos) {
                continue;
            }
            let score = {
                let mut child = place(board, pos, mark);
                self.search(&mut child, !maximizing, window)
            };

            best = if maximizing {
                best.max(score)
            } else {
                best.min(score)
            };

            if let Some(w) = window.as_mut() {
                if maximizing {
                    w.alpha = w.alpha.max(score);
                } else {
                    w.beta = w.beta.min(score);
                }
                if w.beta <= w.alpha {
                    break;
                }
            }
        }

        best
    }
}

/// Base cases in fixed order: X win, O win, full board.
fn terminal_score(board: &Board) -> Option<Score> {
    if has_won(board, Player::X) {
        Some(WIN)
    } else if has_won(board, Player::O) {
        Some(LOSS)
    } else if board.is_full() {
        Some(DRAW)
    } else {
        None
    }
}

/// Places a mark on a cell the caller has just seen empty.
fn place(board: &mut Board, pos: Position, mark: Player) -> crate::PlacementGuard<'_> {
    match board.scoped_place(pos, mark) {
        Ok(guard) => guard,
        Err(e) => unreachable!("search scanned a non-empty cell: {e}"),
    }
}
