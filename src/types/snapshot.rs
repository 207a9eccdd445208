//! Render view of a session
//!
//! Presentation layers draw only from this; they never touch `Session`.

use chrono::{DateTime, Utc};
use colored::{Color, Colorize};
use serde::{Deserialize, Serialize};
use crate::types::{Mode, Move, Outcome, Phase, ReasonCode, Seat, Session};

/// Snapshot of a session after an event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSnapshot {
    /// Timestamp
    pub timestamp: DateTime<Utc>,
    pub mode: Mode,
    pub phase: Phase,
    /// 1 or 2
    pub current_turn: u8,
    pub player1_label: String,
    pub player2_label: String,
    pub player1_score: u32,
    pub player2_score: u32,
    pub rounds_played: u32,
    pub draws: u32,
    /// Hidden while player 2 is still choosing
    pub player1_move: Option<Move>,
    pub player1_locked_in: bool,
    pub player2_move: Option<Move>,
    pub last_outcome: Option<Outcome>,
    /// Reason for the last transition
    pub reason: ReasonCode,
    /// Banner text
    pub message: String,
}

impl SessionSnapshot {
    /// Capture a session together with the reason of its last transition
    pub fn capture(session: &Session, reason: ReasonCode) -> Self {
        let phase = session.phase();
        let hide_player1 = phase == Phase::AwaitingPlayer2;

        Self {
            timestamp: Utc::now(),
            mode: session.mode(),
            phase,
            current_turn: session.current_turn(),
            player1_label: session.label(Seat::Player1).to_string(),
            player2_label: session.label(Seat::Player2).to_string(),
            player1_score: session.player1_score(),
            player2_score: session.player2_score(),
            rounds_played: session.rounds_played(),
            draws: session.draws(),
            player1_move: if hide_player1 { None } else { session.player_move(Seat::Player1) },
            player1_locked_in: session.player_move(Seat::Player1).is_some(),
            player2_move: session.player_move(Seat::Player2),
            last_outcome: session.last_outcome(),
            reason,
            message: banner(session),
        }
    }

    /// Format for terminal display (with colors)
    pub fn to_terminal_string(&self) -> String {
        let color = match self.last_outcome {
            Some(Outcome::Draw) => Color::Yellow,
            Some(Outcome::Player1) => Color::Green,
            Some(Outcome::Player2) => Color::Red,
            None if self.phase == Phase::AwaitingPlayer2 => Color::Blue,
            None => Color::White,
        };

        let moves = match (self.player1_move, self.player2_move) {
            (Some(p1), Some(p2)) => format!(
                " | {} {} vs {} {}",
                p1.emoji(),
                p1,
                p2,
                p2.emoji()
            ),
            _ if self.player1_locked_in => " | P1 locked in".to_string(),
            _ => String::new(),
        };

        let line = format!(
            "{} {} {}-{} {}{} | {}",
            self.phase.emoji(),
            self.player1_label,
            self.player1_score,
            self.player2_score,
            self.player2_label,
            moves,
            self.message
        );
        line.color(color).to_string()
    }

    /// Format for parseable output (no colors)
    pub fn to_parseable_string(&self) -> String {
        let show = |m: Option<Move>| m.map(|m| m.to_string()).unwrap_or_else(|| "-".to_string());
        format!(
            "mode={} | phase={} | score={}-{} | p1={} | p2={} | outcome={} | reason={}",
            self.mode,
            self.phase,
            self.player1_score,
            self.player2_score,
            show(self.player1_move),
            show(self.player2_move),
            self.last_outcome.map(|o| o.to_string()).unwrap_or_else(|| "-".to_string()),
            self.reason.code()
        )
    }
}

/// Status line shown above the board
fn banner(session: &Session) -> String {
    match (session.phase(), session.last_outcome()) {
        (Phase::RoundComplete, Some(Outcome::Draw)) => "It's a Draw!".to_string(),
        (Phase::RoundComplete, Some(outcome)) => {
            let seat = outcome.winner().unwrap_or(Seat::Player1);
            format!("{} Wins the Round!", session.label(seat))
        }
        (Phase::AwaitingPlayer2, _) => "Player 2: Make your choice!".to_string(),
        _ => match session.mode() {
            Mode::Single => "Select your move to play.".to_string(),
            Mode::TwoPlayer => format!("Player {}'s turn.", session.current_turn()),
        },
    }
}
