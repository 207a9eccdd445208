//! RPS Arena: rock-paper-scissors against the computer or a second player
//!
//! Round resolution and the session state machine live in `core`; the
//! terminal front end and the HTTP API only render `SessionSnapshot`s.

pub mod core;
pub mod error;
pub mod types;

pub use error::GameError;

// =============================================================================
// SERVER
// =============================================================================

/// Default listen address for `--serve`
pub const DEFAULT_ADDR: &str = "127.0.0.1:3000";

/// Buffered snapshots per WebSocket broadcast channel
pub const UPDATE_CHANNEL_CAPACITY: usize = 100;

// =============================================================================
// VERSION
// =============================================================================

pub const VERSION: &str = "1.0.0";
