//! Input errors at the presentation boundary
//!
//! The game itself never fails; only turning user text into events can.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("unknown move '{0}' (expected rock, paper or scissors)")]
    InvalidMove(String),

    #[error("unknown mode '{0}' (expected single or two)")]
    InvalidMode(String),

    #[error("unknown seat '{0}' (expected 1 or 2)")]
    InvalidSeat(String),

    #[error("unknown command '{0}' (type 'help')")]
    UnknownCommand(String),
}

impl GameError {
    /// Machine-readable code for API responses
    pub fn code(&self) -> &'static str {
        match self {
            GameError::InvalidMove(_) => "invalid_move",
            GameError::InvalidMode(_) => "invalid_mode",
            GameError::InvalidSeat(_) => "invalid_seat",
            GameError::UnknownCommand(_) => "unknown_command",
        }
    }
}
