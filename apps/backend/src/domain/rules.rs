//! Rock-paper-scissors outcome rules.
//!
//! `resolve` is the single source of truth for who wins a pair of moves.
//! It is total over the nine move combinations and has no failure modes;
//! input validation happens at the boundary before a `Move` exists.

use std::fmt;
use std::str::FromStr;

/// A player's move. Immutable once submitted for a participant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Move {
    Rock,
    Paper,
    Scissors,
}

impl Move {
    pub const ALL: [Move; 3] = [Move::Rock, Move::Paper, Move::Scissors];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Move::Rock => "rock",
            Move::Paper => "paper",
            Move::Scissors => "scissors",
        }
    }

    /// The move this one defeats under the cyclic dominance rule.
    pub const fn beats(&self) -> Move {
        match self {
            Move::Rock => Move::Scissors,
            Move::Paper => Move::Rock,
            Move::Scissors => Move::Paper,
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for a string that is not one of the three valid moves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseMoveError(pub String);

impl fmt::Display for ParseMoveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid move: {:?} (expected rock, paper or scissors)", self.0)
    }
}

impl std::error::Error for ParseMoveError {}

impl FromStr for Move {
    type Err = ParseMoveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "rock" => Ok(Move::Rock),
            "paper" => Ok(Move::Paper),
            "scissors" => Ok(Move::Scissors),
            other => Err(ParseMoveError(other.to_string())),
        }
    }
}

/// One side's result, always relative to that side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    Win,
    Lose,
    Draw,
}

impl Outcome {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Outcome::Win => "win",
            Outcome::Lose => "lose",
            Outcome::Draw => "draw",
        }
    }

    /// The complementary outcome for the other side of the same match.
    pub const fn inverse(&self) -> Outcome {
        match self {
            Outcome::Win => Outcome::Lose,
            Outcome::Lose => Outcome::Win,
            Outcome::Draw => Outcome::Draw,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Outcome {
    type Err = ParseMoveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "win" => Ok(Outcome::Win),
            "lose" => Ok(Outcome::Lose),
            "draw" => Ok(Outcome::Draw),
            other => Err(ParseMoveError(other.to_string())),
        }
    }
}

/// Resolve a pair of moves into the outcome for each side.
///
/// Equal moves draw; otherwise exactly one side's move beats the other's.
pub const fn resolve(a: Move, b: Move) -> (Outcome, Outcome) {
    if a as u8 == b as u8 {
        return (Outcome::Draw, Outcome::Draw);
    }
    if a.beats() as u8 == b as u8 {
        (Outcome::Win, Outcome::Lose)
    } else {
        (Outcome::Lose, Outcome::Win)
    }
}
