//! Session data and the events that drive it

use serde::{Deserialize, Serialize};
use crate::types::{Mode, Move, Outcome, Phase, Seat};

/// Full game state for one play session
///
/// Values are only changed by `core::transition`; everything outside the
/// crate reads them through accessors or a `SessionSnapshot`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub(crate) mode: Mode,
    pub(crate) phase: Phase,
    pub(crate) player1_score: u32,
    pub(crate) player2_score: u32,
    pub(crate) player1_move: Option<Move>,
    pub(crate) player2_move: Option<Move>,
    pub(crate) last_outcome: Option<Outcome>,
    pub(crate) rounds_played: u32,
    pub(crate) draws: u32,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(Mode::default())
    }
}

impl Session {
    /// Fresh session in the given mode, awaiting player 1
    pub fn new(mode: Mode) -> Self {
        Self {
            mode,
            phase: Phase::AwaitingPlayer1,
            player1_score: 0,
            player2_score: 0,
            player1_move: None,
            player2_move: None,
            last_outcome: None,
            rounds_played: 0,
            draws: 0,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Whose turn it is: 1 or 2. Stays at the last mover once the round is complete.
    pub fn current_turn(&self) -> u8 {
        match self.phase.accepting() {
            Some(seat) => seat.number(),
            None => match self.mode {
                Mode::Single => 1,
                Mode::TwoPlayer => 2,
            },
        }
    }

    pub fn score(&self, seat: Seat) -> u32 {
        match seat {
            Seat::Player1 => self.player1_score,
            Seat::Player2 => self.player2_score,
        }
    }

    pub fn player1_score(&self) -> u32 {
        self.player1_score
    }

    pub fn player2_score(&self) -> u32 {
        self.player2_score
    }

    pub fn player_move(&self, seat: Seat) -> Option<Move> {
        match seat {
            Seat::Player1 => self.player1_move,
            Seat::Player2 => self.player2_move,
        }
    }

    /// Outcome of the round on screen; cleared when the next round starts
    pub fn last_outcome(&self) -> Option<Outcome> {
        self.last_outcome
    }

    /// Rounds resolved since the last mode selection
    pub fn rounds_played(&self) -> u32 {
        self.rounds_played
    }

    pub fn draws(&self) -> u32 {
        self.draws
    }

    /// Label for a seat as shown to players
    pub fn label(&self, seat: Seat) -> &'static str {
        match seat {
            Seat::Player1 => "Player 1",
            Seat::Player2 => self.mode.opponent_label(),
        }
    }
}

/// Discrete user input applied to a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// Switch mode; always accepted, zeroes scores
    SelectMode { mode: Mode },
    /// A seat picks a move
    Choose { seat: Seat, mv: Move },
    /// Clear the finished round
    Advance,
}
