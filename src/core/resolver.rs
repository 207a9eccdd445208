//! Round resolver: two moves in, one outcome out

use crate::types::{Move, Outcome};

/// Decide a round. `a` is player 1's move, `b` is player 2's.
pub fn resolve(a: Move, b: Move) -> Outcome {
    if a == b {
        Outcome::Draw
    } else if a.beats(b) {
        Outcome::Player1
    } else {
        Outcome::Player2
    }
}
