//! Text notation for jumps.
//!
//! Holes are written 1-15 (one more than their index) and a jump as
//! `from:to`, so the opening `0 -> 3` is `1:4`. A game is a whitespace
//! separated list of jumps.

use std::fmt;
use std::str::FromStr;

use crate::board::{Jump, HOLES};

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum NotationError {
    #[error("expected `from:to`, found {0:?}")]
    MissingSeparator(String),
    #[error("invalid hole label {0:?}")]
    InvalidHole(String),
    #[error("hole {0} is outside 1-15")]
    OutOfRange(usize),
}

/// Parse a 1-based hole label into an index.
pub fn parse_hole(label: &str) -> Result<usize, NotationError> {
    let label = label.trim();
    let number: usize = label
        .parse()
        .map_err(|_| NotationError::InvalidHole(label.to_string()))?;
    if number == 0 || number > HOLES {
        return Err(NotationError::OutOfRange(number));
    }
    Ok(number - 1)
}

impl fmt::Display for Jump {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.from + 1, self.to + 1)
    }
}

impl FromStr for Jump {
    type Err = NotationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (from, to) = s
            .trim()
            .split_once(':')
            .ok_or_else(|| NotationError::MissingSeparator(s.to_string()))?;
        Ok(Jump::new(parse_hole(from)?, parse_hole(to)?))
    }
}

/// Parse a whitespace separated list of jumps.
pub fn parse_moves(text: &str) -> Result<Vec<Jump>, NotationError> {
    text.split_whitespace().map(str::parse).collect()
}

/// Format jumps as a single line.
pub fn format_moves(moves: &[Jump]) -> String {
    moves
        .iter()
        .map(Jump::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}
