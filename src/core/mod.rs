//! Core modules for RPS Arena

pub mod resolver;
pub mod opponent;
pub mod engine;
pub mod command;
pub mod api;

pub use resolver::resolve;
pub use opponent::{Opponent, RandomOpponent, ScriptedOpponent};
pub use engine::{transition, Game, Transition};
pub use command::{Command, split_script};
pub use api::{create_router, run_server};
