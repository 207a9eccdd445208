//! Round engine: session state machine plus the game facade
//!
//! Phase transitions:
//! - AWAITING_P1 → ROUND_COMPLETE: player 1 moves, single mode (computer answers)
//! - AWAITING_P1 → AWAITING_P2: player 1 moves, two-player mode
//! - AWAITING_P2 → ROUND_COMPLETE: player 2 moves
//! - ROUND_COMPLETE → AWAITING_P1: advance
//! - any → AWAITING_P1: mode selected (scores zeroed)
//!
//! Anything else is ignored and reported with an R004 reason.

use tracing::{debug, info};
use crate::core::opponent::{Opponent, RandomOpponent};
use crate::core::resolver::resolve;
use crate::types::{Event, Mode, Move, Outcome, Phase, ReasonCode, Seat, Session, SessionSnapshot};

/// Result of applying one event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub session: Session,
    pub reason: ReasonCode,
}

impl Transition {
    fn to(session: Session, reason: ReasonCode) -> Self {
        Self { session, reason }
    }
}

/// Apply an event to a session. The opponent is only asked for a move when
/// player 1 moves in single mode.
pub fn transition(session: Session, event: Event, opponent: &mut dyn Opponent) -> Transition {
    match event {
        Event::SelectMode { mode } => Transition::to(Session::new(mode), ReasonCode::R001_MODE_SELECTED),
        Event::Choose { seat, mv } => choose(session, seat, mv, opponent),
        Event::Advance => advance(session),
    }
}

fn choose(mut session: Session, seat: Seat, mv: Move, opponent: &mut dyn Opponent) -> Transition {
    if seat == Seat::Player2 && session.mode == Mode::Single {
        return Transition::to(session, ReasonCode::R004_IGNORED_SINGLE_MODE);
    }

    match (session.phase, seat) {
        (Phase::RoundComplete, _) => Transition::to(session, ReasonCode::R004_IGNORED_ROUND_COMPLETE),

        (Phase::AwaitingPlayer1, Seat::Player1) => {
            session.player1_move = Some(mv);
            match session.mode {
                Mode::Single => {
                    let computer = opponent.next_move();
                    finish_round(session, mv, computer)
                }
                Mode::TwoPlayer => {
                    session.phase = Phase::AwaitingPlayer2;
                    Transition::to(session, ReasonCode::R002_PLAYER1_LOCKED_IN)
                }
            }
        }

        (Phase::AwaitingPlayer2, Seat::Player2) => {
            // Player 1's move is always set on entry to AWAITING_P2
            match session.player1_move {
                Some(p1) => finish_round(session, p1, mv),
                None => Transition::to(session, ReasonCode::R004_IGNORED_NOT_YOUR_TURN),
            }
        }

        _ => Transition::to(session, ReasonCode::R004_IGNORED_NOT_YOUR_TURN),
    }
}

/// Resolve, score, and close the round
fn finish_round(mut session: Session, p1: Move, p2: Move) -> Transition {
    let outcome = resolve(p1, p2);

    session.player1_move = Some(p1);
    session.player2_move = Some(p2);
    session.last_outcome = Some(outcome);
    session.rounds_played += 1;
    session.phase = Phase::RoundComplete;

    let reason = match outcome {
        Outcome::Draw => {
            session.draws += 1;
            ReasonCode::R003_ROUND_DRAW
        }
        Outcome::Player1 => {
            session.player1_score += 1;
            ReasonCode::R003_ROUND_PLAYER1
        }
        Outcome::Player2 => {
            session.player2_score += 1;
            ReasonCode::R003_ROUND_PLAYER2
        }
    };

    Transition::to(session, reason)
}

fn advance(mut session: Session) -> Transition {
    if session.phase != Phase::RoundComplete {
        return Transition::to(session, ReasonCode::R004_IGNORED_ROUND_IN_PROGRESS);
    }
    session.player1_move = None;
    session.player2_move = None;
    session.last_outcome = None;
    session.phase = Phase::AwaitingPlayer1;
    Transition::to(session, ReasonCode::R003_ROUND_ADVANCED)
}

/// A session bound to its computer opponent
pub struct Game {
    session: Session,
    opponent: Box<dyn Opponent>,
    last_reason: ReasonCode,
}

impl Default for Game {
    fn default() -> Self {
        Self::new(Mode::default())
    }
}

impl std::fmt::Debug for Game {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Game")
            .field("session", &self.session)
            .field("last_reason", &self.last_reason)
            .finish_non_exhaustive()
    }
}

impl Game {
    /// New game against an entropy-seeded computer
    pub fn new(mode: Mode) -> Self {
        Self::with_opponent(mode, RandomOpponent::from_entropy())
    }

    /// New game against a reproducible computer
    pub fn seeded(mode: Mode, seed: u64) -> Self {
        Self::with_opponent(mode, RandomOpponent::seeded(seed))
    }

    pub fn with_opponent(mode: Mode, opponent: impl Opponent + 'static) -> Self {
        Self {
            session: Session::new(mode),
            opponent: Box::new(opponent),
            last_reason: ReasonCode::R001_SESSION_STARTED,
        }
    }

    /// Apply an event and return the resulting snapshot
    pub fn apply(&mut self, event: Event) -> SessionSnapshot {
        let session = std::mem::take(&mut self.session);
        let Transition { session, reason } = transition(session, event, self.opponent.as_mut());
        self.session = session;
        self.last_reason = reason;

        if reason.is_ignored() {
            debug!(?event, reason = reason.code(), phase = %self.session.phase(), "input ignored");
        } else {
            info!(
                ?event,
                reason = reason.code(),
                phase = %self.session.phase(),
                score1 = self.session.player1_score(),
                score2 = self.session.player2_score(),
                "session updated"
            );
        }

        self.snapshot()
    }

    /// Switch mode; zeroes scores and starts a fresh round
    pub fn select_mode(&mut self, mode: Mode) -> SessionSnapshot {
        self.apply(Event::SelectMode { mode })
    }

    /// Submit a move for whichever seat is to play
    pub fn submit_move(&mut self, mv: Move) -> SessionSnapshot {
        let seat = self.session.phase().accepting().unwrap_or(Seat::Player1);
        self.submit_move_as(seat, mv)
    }

    /// Submit a move for an explicit seat; ignored if it is not that seat's turn
    pub fn submit_move_as(&mut self, seat: Seat, mv: Move) -> SessionSnapshot {
        self.apply(Event::Choose { seat, mv })
    }

    pub fn advance_round(&mut self) -> SessionSnapshot {
        self.apply(Event::Advance)
    }

    /// Current view without changing anything
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot::capture(&self.session, self.last_reason)
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn last_reason(&self) -> ReasonCode {
        self.last_reason
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::opponent::ScriptedOpponent;
    use pretty_assertions::assert_eq;

    fn choose(seat: Seat, mv: Move) -> Event {
        Event::Choose { seat, mv }
    }

    #[test]
    fn test_single_mode_resolves_immediately() {
        let mut cpu = ScriptedOpponent::always(Move::Scissors);
        let t = transition(Session::new(Mode::Single), choose(Seat::Player1, Move::Rock), &mut cpu);

        assert_eq!(t.reason, ReasonCode::R003_ROUND_PLAYER1);
        assert_eq!(t.session.phase(), Phase::RoundComplete);
        assert_eq!(t.session.player1_score(), 1);
        assert_eq!(t.session.player2_score(), 0);
        assert_eq!(t.session.player_move(Seat::Player2), Some(Move::Scissors));
        assert_eq!(t.session.last_outcome(), Some(Outcome::Player1));
    }

    #[test]
    fn test_two_player_waits_for_player2() {
        let mut cpu = ScriptedOpponent::always(Move::Rock);
        let t = transition(Session::new(Mode::TwoPlayer), choose(Seat::Player1, Move::Paper), &mut cpu);

        assert_eq!(t.reason, ReasonCode::R002_PLAYER1_LOCKED_IN);
        assert_eq!(t.session.phase(), Phase::AwaitingPlayer2);
        assert_eq!(t.session.current_turn(), 2);

        let t = transition(t.session, choose(Seat::Player2, Move::Rock), &mut cpu);
        assert_eq!(t.reason, ReasonCode::R003_ROUND_PLAYER1);
        assert_eq!(t.session.phase(), Phase::RoundComplete);
    }

    #[test]
    fn test_two_player_never_consults_opponent() {
        struct Panicking;
        impl Opponent for Panicking {
            fn next_move(&mut self) -> Move {
                panic!("opponent consulted in two-player mode");
            }
        }

        let mut opp = Panicking;
        let t = transition(Session::new(Mode::TwoPlayer), choose(Seat::Player1, Move::Rock), &mut opp);
        let t = transition(t.session, choose(Seat::Player2, Move::Paper), &mut opp);
        assert_eq!(t.reason, ReasonCode::R003_ROUND_PLAYER2);
    }

    #[test]
    fn test_inputs_outside_accepting_state_are_noops() {
        let mut cpu = ScriptedOpponent::always(Move::Rock);

        // Player 2 before player 1
        let start = Session::new(Mode::TwoPlayer);
        let t = transition(start.clone(), choose(Seat::Player2, Move::Rock), &mut cpu);
        assert_eq!(t.reason, ReasonCode::R004_IGNORED_NOT_YOUR_TURN);
        assert_eq!(t.session, start);

        // Player 1 twice
        let waiting = transition(start, choose(Seat::Player1, Move::Rock), &mut cpu).session;
        let t = transition(waiting.clone(), choose(Seat::Player1, Move::Paper), &mut cpu);
        assert_eq!(t.reason, ReasonCode::R004_IGNORED_NOT_YOUR_TURN);
        assert_eq!(t.session, waiting);

        // Advance mid-round
        let t = transition(waiting.clone(), Event::Advance, &mut cpu);
        assert_eq!(t.reason, ReasonCode::R004_IGNORED_ROUND_IN_PROGRESS);
        assert_eq!(t.session, waiting);

        // Late move after the round is decided
        let done = transition(waiting, choose(Seat::Player2, Move::Scissors), &mut cpu).session;
        let t = transition(done.clone(), choose(Seat::Player1, Move::Rock), &mut cpu);
        assert_eq!(t.reason, ReasonCode::R004_IGNORED_ROUND_COMPLETE);
        assert_eq!(t.session, done);
    }

    #[test]
    fn test_player2_input_ignored_in_single_mode() {
        let mut cpu = ScriptedOpponent::always(Move::Rock);
        let start = Session::new(Mode::Single);
        let t = transition(start.clone(), choose(Seat::Player2, Move::Paper), &mut cpu);
        assert_eq!(t.reason, ReasonCode::R004_IGNORED_SINGLE_MODE);
        assert_eq!(t.session, start);
    }

    #[test]
    fn test_advance_clears_moves_keeps_score() {
        let mut cpu = ScriptedOpponent::always(Move::Scissors);
        let t = transition(Session::new(Mode::Single), choose(Seat::Player1, Move::Rock), &mut cpu);
        let t = transition(t.session, Event::Advance, &mut cpu);

        assert_eq!(t.reason, ReasonCode::R003_ROUND_ADVANCED);
        assert_eq!(t.session.phase(), Phase::AwaitingPlayer1);
        assert_eq!(t.session.player_move(Seat::Player1), None);
        assert_eq!(t.session.player_move(Seat::Player2), None);
        assert_eq!(t.session.last_outcome(), None);
        assert_eq!(t.session.player1_score(), 1);
        assert_eq!(t.session.rounds_played(), 1);
    }

    #[test]
    fn test_mode_switch_resets_everything() {
        let mut cpu = ScriptedOpponent::always(Move::Scissors);
        let t = transition(Session::new(Mode::Single), choose(Seat::Player1, Move::Rock), &mut cpu);
        assert_eq!(t.session.player1_score(), 1);

        let t = transition(t.session, Event::SelectMode { mode: Mode::TwoPlayer }, &mut cpu);
        assert_eq!(t.reason, ReasonCode::R001_MODE_SELECTED);
        assert_eq!(t.session, Session::new(Mode::TwoPlayer));
    }

    #[test]
    fn test_game_facade_routes_moves_to_current_seat() {
        let mut game = Game::with_opponent(Mode::TwoPlayer, ScriptedOpponent::always(Move::Rock));

        let snap = game.submit_move(Move::Scissors);
        assert_eq!(snap.phase, Phase::AwaitingPlayer2);

        let snap = game.submit_move(Move::Scissors);
        assert_eq!(snap.last_outcome, Some(Outcome::Draw));
        assert_eq!(snap.draws, 1);

        // Round complete: a further move is ignored
        let snap = game.submit_move(Move::Rock);
        assert_eq!(snap.reason, ReasonCode::R004_IGNORED_ROUND_COMPLETE);
        assert_eq!(snap.rounds_played, 1);
    }

    #[test]
    fn test_game_snapshot_is_read_only() {
        let game = Game::seeded(Mode::Single, 9);
        let a = game.snapshot();
        let b = game.snapshot();
        assert_eq!(a.reason, ReasonCode::R001_SESSION_STARTED);
        assert_eq!(a.phase, b.phase);
        assert_eq!(game.session(), &Session::new(Mode::Single));
    }

    #[test]
    fn test_seeded_games_replay_identically() {
        let mut a = Game::seeded(Mode::Single, 1234);
        let mut b = Game::seeded(Mode::Single, 1234);
        for mv in [Move::Rock, Move::Paper, Move::Scissors, Move::Rock] {
            let sa = a.submit_move(mv);
            let sb = b.submit_move(mv);
            assert_eq!(sa.player2_move, sb.player2_move);
            a.advance_round();
            b.advance_round();
        }
        assert_eq!(a.session(), b.session());
    }
}
