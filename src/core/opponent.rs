//! Computer opponent for single-player mode
//!
//! `RandomOpponent` draws uniformly from the three moves using ChaCha8, so a
//! seed reproduces a whole game. `ScriptedOpponent` replays a fixed list and
//! is what tests use to force the computer's hand.

use std::collections::VecDeque;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use crate::types::Move;

/// Source of the computer's moves
pub trait Opponent: Send + Sync {
    fn next_move(&mut self) -> Move;
}

/// Uniform random computer player
#[derive(Clone, Debug)]
pub struct RandomOpponent {
    inner: ChaCha8Rng,
    seed: Option<u64>,
}

impl Default for RandomOpponent {
    fn default() -> Self {
        Self::from_entropy()
    }
}

impl RandomOpponent {
    /// Deterministic opponent
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed: Some(seed),
        }
    }

    /// Opponent seeded from the OS
    #[must_use]
    pub fn from_entropy() -> Self {
        Self {
            inner: ChaCha8Rng::from_entropy(),
            seed: None,
        }
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }
}

impl Opponent for RandomOpponent {
    fn next_move(&mut self) -> Move {
        Move::ALL[self.inner.gen_range(0..Move::ALL.len())]
    }
}

/// Replays a fixed sequence of moves, cycling when exhausted
#[derive(Clone, Debug)]
pub struct ScriptedOpponent {
    moves: VecDeque<Move>,
}

impl ScriptedOpponent {
    /// Panics on an empty script.
    pub fn new(moves: impl IntoIterator<Item = Move>) -> Self {
        let moves: VecDeque<Move> = moves.into_iter().collect();
        assert!(!moves.is_empty(), "scripted opponent needs at least one move");
        Self { moves }
    }

    /// Always plays the same move
    pub fn always(mv: Move) -> Self {
        Self::new([mv])
    }
}

impl Opponent for ScriptedOpponent {
    fn next_move(&mut self) -> Move {
        // non-empty by construction
        let mv = self.moves[0];
        self.moves.rotate_left(1);
        mv
    }
}
