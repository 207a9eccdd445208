//! Reason codes for session transitions
//! Every event applied to a session reports exactly one of these

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[allow(non_camel_case_types)]
pub enum ReasonCode {
    // =========================================================================
    // R001: Session
    // =========================================================================
    /// Fresh session, nothing played yet
    R001_SESSION_STARTED,
    /// Mode selected, scores zeroed
    R001_MODE_SELECTED,

    // =========================================================================
    // R002: Moves
    // =========================================================================
    /// Player 1 locked in, player 2 to move
    R002_PLAYER1_LOCKED_IN,

    // =========================================================================
    // R003: Round results
    // =========================================================================
    /// Round resolved as a draw
    R003_ROUND_DRAW,
    /// Round resolved for player 1
    R003_ROUND_PLAYER1,
    /// Round resolved for player 2 or the computer
    R003_ROUND_PLAYER2,
    /// Moves cleared, next round begins
    R003_ROUND_ADVANCED,

    // =========================================================================
    // R004: Ignored input
    // =========================================================================
    /// Move from a seat whose turn it is not
    R004_IGNORED_NOT_YOUR_TURN,
    /// Move submitted after the round was already decided
    R004_IGNORED_ROUND_COMPLETE,
    /// Player 2 input while playing the computer
    R004_IGNORED_SINGLE_MODE,
    /// Advance requested before the round finished
    R004_IGNORED_ROUND_IN_PROGRESS,
}

impl ReasonCode {
    /// Get the code string (for logging)
    pub fn code(&self) -> &'static str {
        match self {
            Self::R001_SESSION_STARTED => "R001_SESSION_STARTED",
            Self::R001_MODE_SELECTED => "R001_MODE_SELECTED",
            Self::R002_PLAYER1_LOCKED_IN => "R002_PLAYER1_LOCKED_IN",
            Self::R003_ROUND_DRAW => "R003_ROUND_DRAW",
            Self::R003_ROUND_PLAYER1 => "R003_ROUND_PLAYER1",
            Self::R003_ROUND_PLAYER2 => "R003_ROUND_PLAYER2",
            Self::R003_ROUND_ADVANCED => "R003_ROUND_ADVANCED",
            Self::R004_IGNORED_NOT_YOUR_TURN => "R004_IGNORED_NOT_YOUR_TURN",
            Self::R004_IGNORED_ROUND_COMPLETE => "R004_IGNORED_ROUND_COMPLETE",
            Self::R004_IGNORED_SINGLE_MODE => "R004_IGNORED_SINGLE_MODE",
            Self::R004_IGNORED_ROUND_IN_PROGRESS => "R004_IGNORED_ROUND_IN_PROGRESS",
        }
    }

    /// Get human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            Self::R001_SESSION_STARTED => "Session started",
            Self::R001_MODE_SELECTED => "Mode selected, scores reset",
            Self::R002_PLAYER1_LOCKED_IN => "Player 1 choice registered",
            Self::R003_ROUND_DRAW => "Round drawn",
            Self::R003_ROUND_PLAYER1 => "Player 1 took the round",
            Self::R003_ROUND_PLAYER2 => "Player 2 took the round",
            Self::R003_ROUND_ADVANCED => "Next round",
            Self::R004_IGNORED_NOT_YOUR_TURN => "Ignored: not this seat's turn",
            Self::R004_IGNORED_ROUND_COMPLETE => "Ignored: round already complete",
            Self::R004_IGNORED_SINGLE_MODE => "Ignored: player 2 is the computer",
            Self::R004_IGNORED_ROUND_IN_PROGRESS => "Ignored: round still in progress",
        }
    }

    /// Was the input dropped without touching the session?
    pub fn is_ignored(&self) -> bool {
        matches!(
            self,
            Self::R004_IGNORED_NOT_YOUR_TURN
                | Self::R004_IGNORED_ROUND_COMPLETE
                | Self::R004_IGNORED_SINGLE_MODE
                | Self::R004_IGNORED_ROUND_IN_PROGRESS
        )
    }
}

impl std::fmt::Display for ReasonCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code(), self.description())
    }
}
