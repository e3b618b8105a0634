//! Terminal move source: a person typing `row col`.

use std::io::{BufRead, ErrorKind, Write};
use tictactoe_engine::{Board, MatchError, MoveSource};
use tracing::{debug, warn};

/// Consecutive read failures after which the opponent gives up.
const MAX_READ_ERRORS: usize = 3;

/// Reads O's moves as two zero-based integers per line.
///
/// Unparseable lines, including invalid UTF-8, are answered with a hint and
/// read again. End of input, or repeated read failures, end the match.
pub struct TerminalOpponent<R, W> {
    name: String,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> TerminalOpponent<R, W> {
    /// Creates a terminal opponent over the given reader and writer.
    pub fn new(name: impl Into<String>, input: R, output: W) -> Self {
        Self {
            name: name.into(),
            input,
            output,
        }
    }

    fn say(&mut self, message: impl std::fmt::Display) {
        if let Err(e) = writeln!(self.output, "{}", message) {
            warn!(error = %e, "Failed to write prompt");
        }
    }
}

impl TerminalOpponent<std::io::StdinLock<'static>, std::io::Stdout> {
    /// Opponent reading from stdin and prompting on stdout.
    pub fn stdio(name: impl Into<String>) -> Self {
        Self::new(name, std::io::stdin().lock(), std::io::stdout())
    }
}

/// Parses `"row col"` into a coordinate pair.
pub fn parse_move(line: &str) -> Option<(usize, usize)> {
    let mut parts = line.split_whitespace();
    let row = parts.next()?.parse().ok()?;
    let col = parts.next()?.parse().ok()?;
    match parts.next() {
        Some(_) => None,
        None => Some((row, col)),
    }
}

impl<R: BufRead, W: Write> MoveSource for TerminalOpponent<R, W> {
    fn name(&self) -> &str {
        &self.name
    }

    fn next_move(&mut self, board: &Board) -> Option<(usize, usize)> {
        self.say(board);
        let mut read_errors = 0;
        loop {
            self.say("Your move (row col):");
            let mut raw = Vec::new();
            match self.input.read_until(b'\n', &mut raw) {
                Ok(0) => return None,
                Ok(_) => read_errors = 0,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => {
                    read_errors += 1;
                    warn!(error = %e, read_errors, "Failed to read move");
                    if read_errors >= MAX_READ_ERRORS {
                        return None;
                    }
                    self.say("Could not read that line, try again.");
                    continue;
                }
            }
            let line = String::from_utf8_lossy(&raw);
            if let Some(coords) = parse_move(&line) {
                debug!(?coords, "Read move");
                return Some(coords);
            }
            self.say("Enter two numbers between 0 and 2, e.g. `1 2`.");
        }
    }

    fn rejected(&mut self, error: &MatchError) {
        self.say(format!("Invalid move ({}). Try again.", error));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_move() {
        assert_eq!(parse_move("1 2\n"), Some((1, 2)));
        assert_eq!(parse_move("  0   0 "), Some((0, 0)));
        assert_eq!(parse_move("7 9"), Some((7, 9)));
        assert_eq!(parse_move("1"), None);
        assert_eq!(parse_move("a b"), None);
        assert_eq!(parse_move("1 2 3"), None);
        assert_eq!(parse_move("-1 2"), None);
    }
}
