//! Command parser for the terminal front end
//!
//! Accepted forms (case-insensitive):
//! - `rock`, `r`, `paper`, `p`, `scissors`, `s`
//! - `1: rock`, `p2 paper`, `2 s` (explicit seat)
//! - `next`, `n`
//! - `mode single`, `mode two`
//! - `score`, `help`, `quit`, `exit`

use lazy_static::lazy_static;
use regex::Regex;
use crate::error::GameError;
use crate::types::{Mode, Move, Seat};

lazy_static! {
    static ref RE_MOVE: Regex = Regex::new(
        r"(?i)^(?:(?P<seat>p?[12])\s*[:\s]\s*)?(?P<mv>rock|paper|scissors|[rps])$"
    ).unwrap();

    static ref RE_MODE: Regex = Regex::new(
        r"(?i)^mode\s+(?P<mode>\S+)$"
    ).unwrap();
}

/// One line of user input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// A move; `seat` is `None` when the player did not say who they are
    Play { seat: Option<Seat>, mv: Move },
    Next,
    SelectMode(Mode),
    Score,
    Help,
    Quit,
}

impl Command {
    /// Parse a line. Blank lines are not commands and should be skipped by the caller.
    pub fn parse(line: &str) -> Result<Command, GameError> {
        let line = line.trim();

        match line.to_ascii_lowercase().as_str() {
            "next" | "n" => return Ok(Command::Next),
            "score" => return Ok(Command::Score),
            "help" | "?" => return Ok(Command::Help),
            "quit" | "exit" | "q" => return Ok(Command::Quit),
            _ => {}
        }

        if let Some(caps) = RE_MOVE.captures(line) {
            let seat = caps.name("seat").map(|s| s.as_str().parse::<Seat>()).transpose()?;
            let mv = caps["mv"].parse::<Move>()?;
            return Ok(Command::Play { seat, mv });
        }

        if let Some(caps) = RE_MODE.captures(line) {
            return Ok(Command::SelectMode(caps["mode"].parse::<Mode>()?));
        }

        Err(GameError::UnknownCommand(line.to_string()))
    }
}

/// Split a scripted command list (`--moves`) on whitespace and commas.
/// `1: rock` style pairs are rejoined so the seat stays with its move.
pub fn split_script(script: &str) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    let mut tokens = script
        .split(|c: char| c.is_whitespace() || c == ',' || c == ';')
        .filter(|t| !t.is_empty())
        .peekable();

    while let Some(token) = tokens.next() {
        let lowered = token.to_ascii_lowercase();
        let is_seat = matches!(lowered.trim_end_matches(':'), "1" | "2" | "p1" | "p2");
        if is_seat || lowered == "mode" {
            if let Some(next) = tokens.next() {
                out.push(format!("{} {}", token.trim_end_matches(':'), next));
                continue;
            }
        }
        out.push(token.to_string());
    }
    out
}
