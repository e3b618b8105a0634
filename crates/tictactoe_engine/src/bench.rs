//! Benchmark harness comparing search strategies over repeated matches.

use crate::driver::{AiMove, Match};
use crate::error::MatchError;
use crate::opponents::MoveSource;
use crate::search::Strategy;
use crate::{Outcome, Player};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{info, instrument, warn};

/// Matches played per strategy when nothing else is configured.
pub const DEFAULT_MATCH_COUNT: usize = 3;

/// Win/draw counts and search cost accumulated over several matches.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregateStats {
    /// Matches played.
    pub matches: usize,
    /// Matches won by the engine.
    pub ai_wins: usize,
    /// Matches won by the opponent.
    pub opponent_wins: usize,
    /// Drawn matches.
    pub draws: usize,
    /// Engine move calls timed.
    pub ai_moves: usize,
    /// Sum over matches of the time taken by each match's final engine move.
    pub match_move_time: Duration,
    /// Total wall-clock time spent in all engine move calls.
    pub total_move_time: Duration,
    /// Total nodes visited by the engine.
    pub nodes: u64,
}

impl AggregateStats {
    /// Folds one finished match into the totals.
    ///
    /// Unfinished matches are not counted.
    pub fn record(&mut self, outcome: Outcome, ai_moves: &[AiMove]) {
        debug_assert!(outcome.is_terminal(), "recorded an unfinished match");
        match outcome {
            Outcome::Winner(Player::X) => self.ai_wins += 1,
            Outcome::Winner(Player::O) => self.opponent_wins += 1,
            Outcome::Draw => self.draws += 1,
            Outcome::InProgress => {
                warn!("Skipping unfinished match");
                return;
            }
        }
        self.matches += 1;
        self.ai_moves += ai_moves.len();
        self.match_move_time += ai_moves.last().map(|m| m.elapsed).unwrap_or_default();
        self.total_move_time += ai_moves.iter().map(|m| m.elapsed).sum::<Duration>();
        self.nodes += ai_moves.iter().map(|m| m.nodes).sum::<u64>();
    }

    /// Mean engine move time per match in seconds.
    ///
    /// Each match contributes the duration of its final engine move.
    pub fn mean_move_time_seconds(&self) -> f64 {
        if self.matches == 0 {
            0.0
        } else {
            self.match_move_time.as_secs_f64() / self.matches as f64
        }
    }

    /// Mean duration of every engine move call in seconds.
    pub fn mean_time_per_ai_move(&self) -> f64 {
        if self.ai_moves == 0 {
            0.0
        } else {
            self.total_move_time.as_secs_f64() / self.ai_moves as f64
        }
    }

    /// Mean nodes visited per engine move.
    pub fn mean_nodes(&self) -> f64 {
        if self.ai_moves == 0 {
            0.0
        } else {
            self.nodes as f64 / self.ai_moves as f64
        }
    }
}

/// Stats for one strategy inside a [`BenchmarkReport`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrategyStats {
    /// Strategy that was benchmarked.
    pub strategy: Strategy,
    /// Its accumulated results.
    pub stats: AggregateStats,
}

/// Side-by-side results for several strategies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BenchmarkReport {
    /// Matches played per strategy.
    pub match_count: usize,
    /// One entry per strategy, in the order they were run.
    pub entries: Vec<StrategyStats>,
}

impl BenchmarkReport {
    /// Stats for `strategy`, if it was part of the run.
    pub fn get(&self, strategy: Strategy) -> Option<&AggregateStats> {
        self.entries
            .iter()
            .find(|e| e.strategy == strategy)
            .map(|e| &e.stats)
    }
}

impl std::fmt::Display for BenchmarkReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Results after {} games:", self.match_count)?;
        for entry in &self.entries {
            writeln!(
                f,
                "{} - AI Wins: {}, Player Wins: {}, Draws: {}",
                entry.strategy.label(),
                entry.stats.ai_wins,
                entry.stats.opponent_wins,
                entry.stats.draws
            )?;
        }
        writeln!(f)?;
        for entry in &self.entries {
            writeln!(
                f,
                "Average AI Move Time for {}: {:.5} seconds",
                entry.strategy.label(),
                entry.stats.mean_move_time_seconds()
            )?;
            writeln!(
                f,
                "  over all {} AI moves: {:.5} seconds per move ({:.0} nodes per move)",
                entry.stats.ai_moves,
                entry.stats.mean_time_per_ai_move(),
                entry.stats.mean_nodes()
            )?;
        }
        Ok(())
    }
}

/// Runs complete matches and aggregates their results.
///
/// A fresh opponent is built for every match by the factory, which receives
/// the zero-based match number.
pub struct BenchmarkHarness<F> {
    opponents: F,
}

impl<F, S> BenchmarkHarness<F>
where
    F: FnMut(usize) -> S,
    S: MoveSource,
{
    /// Creates a harness drawing opponents from `opponents`.
    pub fn new(opponents: F) -> Self {
        Self { opponents }
    }

    /// Plays `match_count` matches with `strategy`.
    ///
    /// # Errors
    ///
    /// Propagates [`MatchError`] from a match that could not finish, such as
    /// an opponent running out of moves.
    #[instrument(skip(self))]
    pub fn run(&mut self, strategy: Strategy, match_count: usize) -> Result<AggregateStats, MatchError> {
        let mut stats = AggregateStats::default();
        for round in 0..match_count {
            self.play_into(&mut stats, strategy, round)?;
        }
        info!(
            ai_wins = stats.ai_wins,
            opponent_wins = stats.opponent_wins,
            draws = stats.draws,
            mean_move_time = stats.mean_move_time_seconds(),
            "Benchmark complete"
        );
        Ok(stats)
    }

    /// Plays `match_count` rounds, one match per strategy in each round.
    ///
    /// # Errors
    ///
    /// Propagates the first [`MatchError`] from any match.
    #[instrument(skip(self))]
    pub fn run_all(
        &mut self,
        strategies: &[Strategy],
        match_count: usize,
    ) -> Result<BenchmarkReport, MatchError> {
        let mut entries: Vec<StrategyStats> = strategies
            .iter()
            .map(|&strategy| StrategyStats {
                strategy,
                stats: AggregateStats::default(),
            })
            .collect();

        for round in 0..match_count {
            for entry in &mut entries {
                self.play_into(&mut entry.stats, entry.strategy, round)?;
            }
        }

        for entry in &entries {
            info!(
                strategy = %entry.strategy,
                ai_wins = entry.stats.ai_wins,
                opponent_wins = entry.stats.opponent_wins,
                draws = entry.stats.draws,
                mean_move_time = entry.stats.mean_move_time_seconds(),
                "Strategy summary"
            );
        }

        Ok(BenchmarkReport {
            match_count,
            entries,
        })
    }

    fn play_into(
        &mut self,
        stats: &mut AggregateStats,
        strategy: Strategy,
        round: usize,
    ) -> Result<(), MatchError> {
        let mut opponent = (self.opponents)(round);
        let mut game = Match::new(strategy);
        let outcome = game.run(&mut opponent)?;
        info!(round, %strategy, %outcome, "Benchmark match done");
        stats.record(outcome, game.ai_moves());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Position;

    fn ai_move(millis: u64, nodes: u64) -> AiMove {
        AiMove {
            position: Some(Position::Center),
            score: 0,
            nodes,
            elapsed: Duration::from_millis(millis),
        }
    }

    #[test]
    fn test_record_counts_outcomes() {
        let mut stats = AggregateStats::default();
        stats.record(Outcome::Winner(Player::X), &[ai_move(10, 5)]);
        stats.record(Outcome::Winner(Player::O), &[ai_move(20, 5)]);
        stats.record(Outcome::Draw, &[ai_move(30, 5), ai_move(40, 5)]);
        assert_eq!(stats.matches, 3);
        assert_eq!((stats.ai_wins, stats.opponent_wins, stats.draws), (1, 1, 1));
        assert_eq!(stats.ai_moves, 4);
        assert_eq!(stats.nodes, 20);
    }

    #[test]
    fn test_mean_move_time_is_per_match() {
        let mut stats = AggregateStats::default();
        stats.record(Outcome::Winner(Player::X), &[ai_move(10, 5)]);
        stats.record(Outcome::Draw, &[ai_move(100, 5), ai_move(20, 5)]);
        stats.record(
            Outcome::Draw,
            &[ai_move(200, 5), ai_move(50, 5), ai_move(40, 5)],
        );

        // Final moves: 10 + 20 + 40 ms over 3 matches.
        assert_eq!(stats.match_move_time, Duration::from_millis(70));
        assert!((stats.mean_move_time_seconds() - 0.070 / 3.0).abs() < 1e-9);
        // Every call: 420 ms over 6 moves.
        assert_eq!(stats.total_move_time, Duration::from_millis(420));
        assert!((stats.mean_time_per_ai_move() - 0.070).abs() < 1e-9);
    }

    #[test]
    fn test_report_shows_both_means() {
        let mut stats = AggregateStats::default();
        stats.record(Outcome::Draw, &[ai_move(100, 8), ai_move(20, 2)]);
        let report = BenchmarkReport {
            match_count: 1,
            entries: vec![StrategyStats {
                strategy: Strategy::Pruned,
                stats,
            }],
        };
        let rendered = report.to_string();
        assert!(rendered.contains("Average AI Move Time for Alpha-Beta Pruning: 0.02000 seconds"));
        assert!(rendered.contains("over all 2 AI moves: 0.06000 seconds per move (5 nodes per move)"));
    }

    #[test]
    fn test_empty_stats_mean_is_zero() {
        let stats = AggregateStats::default();
        assert_eq!(stats.mean_move_time_seconds(), 0.0);
        assert_eq!(stats.mean_time_per_ai_move(), 0.0);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "unfinished match")]
    fn test_unfinished_match_is_not_a_draw() {
        AggregateStats::default().record(Outcome::InProgress, &[ai_move(10, 1)]);
    }
}
