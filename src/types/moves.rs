//! Moves, seats and outcomes

use std::str::FromStr;
use serde::{Deserialize, Serialize};
use crate::error::GameError;

/// One of the three hand shapes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Move {
    Rock,
    Paper,
    Scissors,
}

impl Move {
    /// All moves, in the order the computer draws from
    pub const ALL: [Move; 3] = [Move::Rock, Move::Paper, Move::Scissors];

    /// The move this one defeats (rock > scissors > paper > rock)
    pub fn defeats(self) -> Move {
        match self {
            Move::Rock => Move::Scissors,
            Move::Paper => Move::Rock,
            Move::Scissors => Move::Paper,
        }
    }

    /// Does this move beat `other`?
    pub fn beats(self, other: Move) -> bool {
        self.defeats() == other
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            Move::Rock => "✊",
            Move::Paper => "✋",
            Move::Scissors => "✌",
        }
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Move::Rock => "rock",
            Move::Paper => "paper",
            Move::Scissors => "scissors",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for Move {
    type Err = GameError;

    /// Accepts full names and single-letter shorthands, any case
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rock" | "r" => Ok(Move::Rock),
            "paper" | "p" => Ok(Move::Paper),
            "scissors" | "s" => Ok(Move::Scissors),
            _ => Err(GameError::InvalidMove(s.trim().to_string())),
        }
    }
}

/// Player position at the table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Seat {
    Player1,
    Player2,
}

impl Seat {
    /// 1 or 2
    pub fn number(self) -> u8 {
        match self {
            Seat::Player1 => 1,
            Seat::Player2 => 2,
        }
    }
}

impl FromStr for Seat {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "1" | "p1" | "player1" | "player_1" => Ok(Seat::Player1),
            "2" | "p2" | "player2" | "player_2" => Ok(Seat::Player2),
            _ => Err(GameError::InvalidSeat(s.trim().to_string())),
        }
    }
}

/// Result of comparing two moves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Draw,
    Player1,
    Player2,
}

impl Outcome {
    /// Winning seat, `None` on a draw
    pub fn winner(self) -> Option<Seat> {
        match self {
            Outcome::Draw => None,
            Outcome::Player1 => Some(Seat::Player1),
            Outcome::Player2 => Some(Seat::Player2),
        }
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Outcome::Draw => "DRAW",
            Outcome::Player1 => "PLAYER1",
            Outcome::Player2 => "PLAYER2",
        };
        write!(f, "{}", name)
    }
}
