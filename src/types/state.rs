//! Game mode and round phase definitions

use std::str::FromStr;
use serde::{Deserialize, Serialize};
use crate::error::GameError;
use crate::types::Seat;

/// Who sits in player 2's chair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// Player 1 against the computer
    #[default]
    Single,
    /// Two humans sharing one input device
    TwoPlayer,
}

impl Mode {
    /// Label for the player 2 seat
    pub fn opponent_label(&self) -> &'static str {
        match self {
            Mode::Single => "Computer",
            Mode::TwoPlayer => "Player 2",
        }
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Mode::Single => "SINGLE",
            Mode::TwoPlayer => "TWO_PLAYER",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for Mode {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "single" | "solo" | "1" | "computer" | "cpu" => Ok(Mode::Single),
            "two" | "two_player" | "two-player" | "duo" | "2" | "versus" => Ok(Mode::TwoPlayer),
            _ => Err(GameError::InvalidMode(s.trim().to_string())),
        }
    }
}

/// The three phases of a round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Phase {
    /// Waiting on player 1's move
    AwaitingPlayer1,
    /// Player 1 has locked in, waiting on player 2 (two-player only)
    AwaitingPlayer2,
    /// Both moves known, outcome scored
    RoundComplete,
}

impl Phase {
    /// Seat whose input is accepted, `None` once the round is complete
    pub fn accepting(&self) -> Option<Seat> {
        match self {
            Phase::AwaitingPlayer1 => Some(Seat::Player1),
            Phase::AwaitingPlayer2 => Some(Seat::Player2),
            Phase::RoundComplete => None,
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            Phase::AwaitingPlayer1 => "⏳",
            Phase::AwaitingPlayer2 => "🔷",
            Phase::RoundComplete => "🏁",
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Phase::AwaitingPlayer1 => "AWAITING_P1",
            Phase::AwaitingPlayer2 => "AWAITING_P2",
            Phase::RoundComplete => "ROUND_COMPLETE",
        };
        write!(f, "{}", name)
    }
}
