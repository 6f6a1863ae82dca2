#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that drives a Hexhop session over stdin.
//!
//! One line per action; state and board dumps are emitted as JSON so the
//! output stays scriptable.

use std::io::{self, BufRead, Write};

use anyhow::Context;
use clap::Parser;
use serde::Serialize;
use thiserror::Error;

use hexhop_core::{LoseReason, Outcome};
use hexhop_session::levels::{builtin_level, builtin_levels};
use hexhop_session::Session;
use hexhop_system_rules::{JumpIntent, Landing};

/// Command-line options.
#[derive(Debug, Parser)]
#[command(name = "hexhop", about = "Hex-grid survival runs on the command line")]
struct Cli {
    /// Builtin level to play.
    #[arg(long, default_value_t = 1)]
    level: u32,
    /// Seed for the board shuffle and enemy spawns; random when omitted.
    #[arg(long)]
    seed: Option<u64>,
    /// JSON file holding a list of command strings to run instead of stdin.
    #[arg(long)]
    script: Option<std::path::PathBuf>,
}

/// One parsed input line.
#[derive(Clone, Copy, Debug, PartialEq)]
enum Command {
    /// Jump with a press duration in milliseconds and an angle in degrees.
    Jump { press_ms: u32, angle_deg: f32 },
    /// Build a house on the current tile.
    BuildHouse,
    /// Craft a weapon batch.
    BuildWeapon,
    /// Upgrade the house under the player into a catapult.
    BuildCatapult,
    /// Rewind one turn.
    Undo,
    /// Start the level over, optionally with a fresh seed.
    Restart { seed: Option<u64> },
    /// Dump the current game state as JSON.
    State,
    /// Dump the board as JSON.
    Board,
    /// List the builtin levels.
    Levels,
    /// Show command help.
    Help,
    /// Leave.
    Quit,
}

/// Why an input line could not be turned into a [`Command`].
#[derive(Debug, Error, PartialEq)]
enum ParseError {
    /// The first word matched no known command.
    #[error("unknown command `{0}`; try `help`")]
    Unknown(String),
    /// A known command was given the wrong arguments.
    #[error("usage: {0}")]
    Usage(&'static str),
}

impl Command {
    fn parse(line: &str) -> Result<Option<Self>, ParseError> {
        let mut words = line.split_whitespace();
        let Some(head) = words.next() else {
            return Ok(None);
        };
        let command = match head {
            "jump" | "j" => {
                let press_ms = words
                    .next()
                    .and_then(|w| w.parse().ok())
                    .ok_or(ParseError::Usage("jump <press_ms> <angle_deg>"))?;
                let angle_deg = words
                    .next()
                    .and_then(|w| w.parse().ok())
                    .ok_or(ParseError::Usage("jump <press_ms> <angle_deg>"))?;
                Command::Jump {
                    press_ms,
                    angle_deg,
                }
            }
            "build" | "b" => match words.next() {
                Some("house") => Command::BuildHouse,
                Some("weapon") => Command::BuildWeapon,
                Some("catapult") => Command::BuildCatapult,
                _ => return Err(ParseError::Usage("build house|weapon|catapult")),
            },
            "undo" | "u" => Command::Undo,
            "restart" => {
                let seed = match words.next() {
                    Some(word) => Some(
                        word.parse()
                            .map_err(|_| ParseError::Usage("restart [seed]"))?,
                    ),
                    None => None,
                };
                Command::Restart { seed }
            }
            "state" | "s" => Command::State,
            "board" => Command::Board,
            "levels" => Command::Levels,
            "help" | "?" => Command::Help,
            "quit" | "q" | "exit" => Command::Quit,
            other => return Err(ParseError::Unknown(other.to_owned())),
        };
        if words.next().is_some() {
            return Err(ParseError::Usage("trailing arguments; try `help`"));
        }
        Ok(Some(command))
    }
}

/// JSON view of one board tile.
#[derive(Debug, Serialize)]
struct TileView {
    q: i32,
    r: i32,
    x: f32,
    y: f32,
    resource: String,
    house: bool,
    catapult: bool,
    enemy: bool,
}

/// JSON view of the whole run for `state`.
#[derive(Debug, Serialize)]
struct StateView {
    level: u32,
    turns: u32,
    score: u32,
    score_to_win: u32,
    turn_limit: u32,
    houses: u32,
    catapults: u32,
    inventory: Vec<(String, u32)>,
    enemies: usize,
    undo_depth: usize,
    game_over: bool,
    lose_reason: Option<String>,
    goals: Vec<String>,
}

fn state_view(session: &Session) -> StateView {
    let inventory = hexhop_core::ItemKind::ALL
        .iter()
        .map(|kind| (format!("{kind:?}"), session.player().inventory.count(*kind)))
        .filter(|(_, count)| *count > 0)
        .collect();
    let goals = session
        .goal_progress()
        .into_iter()
        .map(|line| {
            let mark = if line.satisfied { "x" } else { " " };
            format!("[{mark}] {}", line.text)
        })
        .collect();
    StateView {
        level: session.level().id,
        turns: session.turns(),
        score: session.score(),
        score_to_win: session.config().score_to_win,
        turn_limit: session.config().turn_limit,
        houses: session.player().houses,
        catapults: session.catapult_count(),
        inventory,
        enemies: session.enemy_positions().len(),
        undo_depth: session.history_len(),
        game_over: session.is_game_over(),
        lose_reason: session.lose_reason().map(|reason| describe_loss(reason).to_owned()),
        goals,
    }
}

fn board_view(session: &Session) -> Vec<TileView> {
    let enemies = session.enemy_positions();
    session
        .board()
        .iter()
        .map(|tile| TileView {
            q: tile.axial().q(),
            r: tile.axial().r(),
            x: tile.center().x(),
            y: tile.center().y(),
            resource: format!("{:?}", tile.resource()),
            house: tile.has_house(),
            catapult: tile.has_catapult(),
            enemy: enemies.contains(&tile.axial()),
        })
        .collect()
}

const fn describe_loss(reason: LoseReason) -> &'static str {
    match reason {
        LoseReason::Monster => "caught by a monster",
        LoseReason::OutOfMap => "jumped off the board",
        LoseReason::TurnLimit => "ran out of turns",
    }
}

fn describe_report(report: &hexhop_session::TurnReport) -> String {
    let landing = match report.landing {
        Landing::Settled { axial } => format!("landed on ({}, {})", axial.q(), axial.r()),
        Landing::OutOfMap => "missed the board".to_owned(),
    };
    match report.outcome {
        Outcome::Win => format!("{landing}; you win"),
        Outcome::Lose => {
            let reason = report
                .lose_reason
                .map_or("goals failed", describe_loss);
            format!("{landing}; you lose: {reason}")
        }
        Outcome::Ongoing => landing,
    }
}

const HELP: &str = "\
commands:
  jump <press_ms> <angle_deg>   charge and jump (0 = shortest hop)
  build house|weapon|catapult   construct on the current tile
  undo                          rewind one turn
  restart [seed]                start the level over
  state                         dump run state as JSON
  board                         dump the board as JSON
  levels                        list builtin levels
  quit";

fn run_command(session: &mut Session, command: Command, out: &mut impl Write) -> anyhow::Result<bool> {
    match command {
        Command::Jump {
            press_ms,
            angle_deg,
        } => {
            let intent = JumpIntent {
                press_ms,
                angle_rad: angle_deg.to_radians(),
            };
            match session.jump(intent) {
                Some(report) => writeln!(
                    out,
                    "{}; turn {}, score {}",
                    describe_report(&report),
                    session.turns(),
                    session.score()
                )?,
                None => writeln!(out, "the run is over; `undo` or `restart` to continue")?,
            }
        }
        Command::BuildHouse => {
            let built = session.build_house();
            writeln!(out, "{}", if built { "house built" } else { "cannot build a house here" })?;
        }
        Command::BuildWeapon => {
            let built = session.build_weapon();
            writeln!(out, "{}", if built { "weapon crafted" } else { "cannot craft a weapon" })?;
        }
        Command::BuildCatapult => {
            let built = session.build_catapult();
            writeln!(out, "{}", if built { "catapult raised" } else { "cannot build a catapult here" })?;
        }
        Command::Undo => {
            let undone = session.undo();
            writeln!(out, "{}", if undone { "rewound one turn" } else { "nothing to undo" })?;
        }
        Command::Restart { seed } => {
            session.restart(seed.unwrap_or_else(rand::random));
            writeln!(out, "restarted")?;
        }
        Command::State => {
            let json = serde_json::to_string_pretty(&state_view(session))?;
            writeln!(out, "{json}")?;
        }
        Command::Board => {
            let json = serde_json::to_string_pretty(&board_view(session))?;
            writeln!(out, "{json}")?;
        }
        Command::Levels => {
            for level in builtin_levels() {
                writeln!(out, "{}: {}", level.id, level.name)?;
            }
        }
        Command::Help => writeln!(out, "{HELP}")?,
        Command::Quit => return Ok(false),
    }
    Ok(true)
}

/// Entry point for the Hexhop command-line interface.
fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let spec = builtin_level(cli.level)
        .with_context(|| format!("no builtin level with id {}", cli.level))?;
    let seed = cli.seed.unwrap_or_else(rand::random);

    let mut session = Session::new(spec, seed);
    let stdout = io::stdout();
    let mut out = stdout.lock();
    writeln!(
        out,
        "{} (level {}, seed {seed}); `help` lists commands",
        session.level().name,
        session.level().id
    )?;

    if let Some(path) = cli.script {
        let text = std::fs::read_to_string(&path)
            .with_context(|| format!("reading script {}", path.display()))?;
        let lines: Vec<String> =
            serde_json::from_str(&text).context("script must be a JSON list of command strings")?;
        for line in lines {
            match Command::parse(&line) {
                Ok(Some(command)) => {
                    if !run_command(&mut session, command, &mut out)? {
                        break;
                    }
                }
                Ok(None) => {}
                Err(error) => anyhow::bail!("script line `{line}`: {error}"),
            }
        }
        return Ok(());
    }

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line.context("reading stdin")?;
        match Command::parse(&line) {
            Ok(Some(command)) => {
                if !run_command(&mut session, command, &mut out)? {
                    break;
                }
            }
            Ok(None) => {}
            Err(error) => writeln!(out, "{error}")?,
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{Command, ParseError};

    #[test]
    fn parses_jump_with_arguments() {
        let parsed = Command::parse("jump 350 60").expect("valid line");
        assert_eq!(
            parsed,
            Some(Command::Jump {
                press_ms: 350,
                angle_deg: 60.0,
            })
        );
    }

    #[test]
    fn parses_build_variants() {
        assert_eq!(
            Command::parse("build house").expect("valid"),
            Some(Command::BuildHouse)
        );
        assert_eq!(
            Command::parse("build catapult").expect("valid"),
            Some(Command::BuildCatapult)
        );
        assert_eq!(
            Command::parse("build barn"),
            Err(ParseError::Usage("build house|weapon|catapult"))
        );
    }

    #[test]
    fn blank_lines_are_ignored() {
        assert_eq!(Command::parse("   ").expect("valid"), None);
    }

    #[test]
    fn unknown_words_are_reported() {
        assert_eq!(
            Command::parse("fly"),
            Err(ParseError::Unknown("fly".to_owned()))
        );
    }

    #[test]
    fn trailing_arguments_are_rejected() {
        assert!(Command::parse("undo now").is_err());
        assert!(Command::parse("jump 10 20 30").is_err());
    }

    #[test]
    fn short_aliases_map_to_commands() {
        assert_eq!(Command::parse("u").expect("valid"), Some(Command::Undo));
        assert_eq!(Command::parse("q").expect("valid"), Some(Command::Quit));
    }
}
