//! RPS Arena CLI
//!
//! Usage:
//!   rps-arena                               # Interactive, vs computer
//!   rps-arena --mode two                    # Interactive, two players
//!   rps-arena --moves "rock next paper"     # Scripted run
//!   rps-arena --serve                       # HTTP API server
//!   rps-arena --moves "r" --seed 7 --json   # JSON output

use clap::Parser;
use colored::Colorize;
use std::io::{self, BufRead, Write};
use tracing::{error, warn};
use tracing_subscriber::EnvFilter;

use rps_arena::core::{run_server, split_script, Command, Game};
use rps_arena::types::{Mode, Phase, SessionSnapshot};
use rps_arena::{DEFAULT_ADDR, VERSION};

#[derive(Parser, Debug)]
#[command(
    name = "rps-arena",
    version = VERSION,
    about = "Rock-paper-scissors against the computer or a friend",
    long_about = "RPS Arena plays rock-paper-scissors in the terminal.\n\n\
                  Modes:\n  \
                  single  Player 1 vs the computer (default)\n  \
                  two     Player 1 vs Player 2 on one keyboard\n\n\
                  Commands:\n  \
                  rock | paper | scissors (or r | p | s)\n  \
                  1: rock / 2: paper      move for an explicit seat\n  \
                  next                    start the next round\n  \
                  mode single|two         switch mode (resets scores)\n  \
                  score | help | quit"
)]
struct Args {
    /// Starting mode: single or two
    #[arg(short, long, default_value = "single")]
    mode: Mode,

    /// Seed for the computer's moves
    #[arg(long)]
    seed: Option<u64>,

    /// Run a scripted command list and exit (e.g. "rock next 1: paper 2: rock")
    #[arg(long)]
    moves: Option<String>,

    /// Run as HTTP API server
    #[arg(short, long)]
    serve: bool,

    /// Server address
    #[arg(long, env = "RPS_ARENA_ADDR", default_value = DEFAULT_ADDR)]
    addr: String,

    /// Output snapshots as JSON
    #[arg(long)]
    json: bool,

    /// Disable colors in output
    #[arg(long)]
    no_color: bool,

    /// Debug logging (RUST_LOG overrides)
    #[arg(short, long)]
    verbose: bool,
}

/// What the loop should do after a command
enum Flow {
    Continue,
    Quit,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    init_tracing(&args);

    if args.no_color {
        colored::control::set_override(false);
    }

    let result = if args.serve {
        run_serve(&args).await
    } else if let Some(ref script) = args.moves {
        run_script(script, &args).map_err(Into::into)
    } else {
        run_interactive(&args).map_err(Into::into)
    };

    if let Err(e) = result {
        error!(error = %e, "fatal");
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Logs go to stderr so they never mix with rendered snapshots
fn init_tracing(args: &Args) {
    let default = if args.verbose {
        "debug"
    } else if args.serve {
        "info"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(!args.no_color)
        .init();
}

fn new_game(args: &Args) -> Game {
    match args.seed {
        Some(seed) => Game::seeded(args.mode, seed),
        None => Game::new(args.mode),
    }
}

/// Run a scripted command list
fn run_script(script: &str, args: &Args) -> io::Result<()> {
    let mut game = new_game(args);

    for line in split_script(script) {
        match execute(&mut game, &line, args) {
            Ok(Flow::Quit) => break,
            Ok(Flow::Continue) => {}
            Err(e) => {
                warn!(command = %line, error = %e, "skipping bad command");
                eprintln!("{} {}", "⚠".yellow(), e);
            }
        }
    }

    if !args.json {
        println!("{}", summary_line(&game.snapshot(), false));
    }
    Ok(())
}

/// Run interactive mode
fn run_interactive(args: &Args) -> io::Result<()> {
    let mut game = new_game(args);

    print_header(args.mode, args.json);
    render(&game.snapshot(), args);

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        // Prompt goes to stderr under --json so stdout stays one snapshot per line
        let prompt = format_prompt(&game.snapshot());
        if args.json {
            eprint!("{}", prompt);
        } else {
            print!("{}", prompt);
            stdout.flush()?;
        }

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }

        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match execute(&mut game, line, args) {
            Ok(Flow::Quit) => {
                if !args.json {
                    println!();
                }
                println!("{}", summary_line(&game.snapshot(), args.json));
                break;
            }
            Ok(Flow::Continue) => {}
            Err(e) => eprintln!("{} {}", "⚠".yellow(), e),
        }
    }
    Ok(())
}

/// Parse and apply one command, rendering the result
fn execute(game: &mut Game, line: &str, args: &Args) -> Result<Flow, rps_arena::GameError> {
    let snapshot = match Command::parse(line)? {
        Command::Play { seat: Some(seat), mv } => game.submit_move_as(seat, mv),
        Command::Play { seat: None, mv } => game.submit_move(mv),
        Command::Next => game.advance_round(),
        Command::SelectMode(mode) => game.select_mode(mode),
        Command::Score => {
            println!("{}", summary_line(&game.snapshot(), args.json));
            return Ok(Flow::Continue);
        }
        Command::Help => {
            if args.json {
                eprint!("{}", HELP);
            } else {
                print!("{}", HELP);
            }
            return Ok(Flow::Continue);
        }
        Command::Quit => return Ok(Flow::Quit),
    };

    render(&snapshot, args);
    Ok(Flow::Continue)
}

/// Draw a snapshot in the selected output format
fn render(snapshot: &SessionSnapshot, args: &Args) {
    if args.json {
        println!("{}", snapshot_json(snapshot));
    } else if args.no_color {
        println!("{}", snapshot.to_parseable_string());
    } else {
        println!("{}", snapshot.to_terminal_string());
        if snapshot.reason.is_ignored() {
            println!("{}", format!("  └─ {}", snapshot.reason.description()).dimmed());
        } else if snapshot.phase == Phase::RoundComplete {
            println!("{}", "  └─ type 'next' for another round".dimmed());
        }
    }
}

/// Print header; stderr under --json
fn print_header(mode: Mode, json: bool) {
    let title = format!("RPS Arena v{} - {}", VERSION, mode.opponent_label());
    let rule = "========================================".bold();
    let header = format!(
        "{}\n  {}\n{}\nType rock, paper or scissors. 'help' lists commands, 'quit' exits.\n",
        rule,
        title.bold(),
        rule
    );
    if json {
        eprintln!("{}", header);
    } else {
        println!("{}", header);
    }
}

const HELP: &str = "\
  rock | paper | scissors   (or r | p | s)
  1: rock, 2: paper         move for a specific seat
  next                      next round
  mode single | mode two    switch mode (resets scores)
  score                     show the scoreboard
  quit                      leave
";

/// Format the input prompt for whoever is to move
fn format_prompt(snapshot: &SessionSnapshot) -> String {
    let who = match snapshot.phase {
        Phase::AwaitingPlayer1 => snapshot.player1_label.clone(),
        Phase::AwaitingPlayer2 => snapshot.player2_label.clone(),
        Phase::RoundComplete => "next?".to_string(),
    };
    format!(
        "[{} {}-{} {}] {} > ",
        snapshot.player1_label, snapshot.player1_score, snapshot.player2_score, snapshot.player2_label, who
    )
}

/// Snapshot as one JSON line
fn snapshot_json(snapshot: &SessionSnapshot) -> String {
    serde_json::to_string(snapshot).unwrap_or_else(|e| {
        error!(error = %e, "snapshot serialization failed");
        String::new()
    })
}

/// Scoreboard line: the snapshot itself under --json, text otherwise
fn summary_line(snapshot: &SessionSnapshot, json: bool) -> String {
    if json {
        return snapshot_json(snapshot);
    }
    format!(
        "Score: {} {} - {} {} | rounds={} draws={}",
        snapshot.player1_label,
        snapshot.player1_score,
        snapshot.player2_score,
        snapshot.player2_label,
        snapshot.rounds_played,
        snapshot.draws
    )
}

/// Run HTTP API server
async fn run_serve(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    println!();
    println!("{}", format!("RPS Arena API Server v{}", VERSION).bold());
    println!();
    run_server(&args.addr).await
}
