//! Core types for RPS Arena

mod moves;
mod state;
mod reason;
mod session;
mod snapshot;

pub use moves::{Move, Outcome, Seat};
pub use state::{Mode, Phase};
pub use reason::ReasonCode;
pub use session::{Event, Session};
pub use snapshot::SessionSnapshot;
