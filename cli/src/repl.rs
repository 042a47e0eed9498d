// SPDX-License-Identifier: MIT OR Apache-2.0

//! Line-oriented command shell around a [`Game`].

use anyhow::{anyhow, bail, Context, Result};
use goban_core::sgf::parse_move;
use goban_core::{Coord, Game, Move};
use std::cell::Cell;
use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::rc::Rc;

use crate::render;

pub const HELP: &str = "\
Commands:
  move <point>   play a stone; the word 'move' is optional
  pass           pass the turn
  undo / redo    step through the history
  claim <point>  after the game: give the area of a dead stone to its opponent
  show           print the board
  score          print the score
  sgf            print the game record
  save <path>    write the game record to a file
  json           print the game state as JSON
  help           show this text
  quit           leave

Points are SGF letters (dd) or board labels (D4).";

/// One parsed input line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Play(Coord),
    Pass,
    Undo,
    Redo,
    Claim(Coord),
    Show,
    Score,
    Sgf,
    Save(PathBuf),
    Json,
    Help,
    Quit,
}

impl Command {
    /// Parse a command for a board of the given size
    pub fn parse(line: &str, width: u8, height: u8) -> Result<Self> {
        let mut words = line.split_whitespace();
        let Some(word) = words.next() else {
            bail!("Empty command");
        };
        let arg = words.next();
        if words.next().is_some() {
            bail!("Too many arguments. Type 'help' for the command list.");
        }

        let point = |arg: Option<&str>| -> Result<Coord> {
            let arg = arg.ok_or_else(|| anyhow!("Missing point, e.g. 'dd' or 'D4'"))?;
            parse_point(arg, width, height)
        };

        let command = match word.to_lowercase().as_str() {
            "move" | "play" => Command::Play(point(arg)?),
            "pass" => Command::Pass,
            "undo" => Command::Undo,
            "redo" => Command::Redo,
            "claim" => Command::Claim(point(arg)?),
            "show" => Command::Show,
            "score" => Command::Score,
            "sgf" => Command::Sgf,
            "save" => Command::Save(PathBuf::from(
                arg.ok_or_else(|| anyhow!("Missing file name"))?,
            )),
            "json" => Command::Json,
            "help" | "?" => Command::Help,
            "quit" | "exit" => Command::Quit,
            _ if arg.is_none() => Command::Play(parse_point(word, width, height)?),
            _ => bail!("Unknown command '{word}'. Type 'help' for the command list."),
        };
        Ok(command)
    }
}

/// Read a point as SGF letters (`cd`) or a board label (`C4`)
pub fn parse_point(input: &str, width: u8, height: u8) -> Result<Coord> {
    let mut chars = input.chars();
    let first = chars.next().ok_or_else(|| anyhow!("Empty point"))?;
    let rest = chars.as_str();

    if !rest.is_empty() && rest.bytes().all(|b| b.is_ascii_digit()) {
        let col = render::column_char_to_coord(first, width)
            .ok_or_else(|| anyhow!("Invalid column '{first}'"))?;
        let row = match rest.parse::<u8>() {
            Ok(r) if r > 0 && r <= height => r - 1,
            _ => bail!("Invalid row. Must be between 1 and {height}."),
        };
        return Ok(Coord::new(col, row));
    }

    match parse_move(input, width, height) {
        Some(Move::Place(coord)) if input.len() == 2 => Ok(coord),
        _ => bail!("Invalid point '{input}'. Examples: 'dd', 'D4'."),
    }
}

/// Read commands from `input` until `quit` or end of input.
///
/// The board is redrawn after every command that changed the game.
pub fn run<R: BufRead, W: Write>(game: &mut Game, input: R, output: &mut W) -> Result<()> {
    let changed = Rc::new(Cell::new(true));
    let flag = Rc::clone(&changed);
    game.on_state_change(move |view| {
        tracing::trace!(move_number = view.move_number, "state changed");
        flag.set(true);
    });

    for line in input.lines() {
        if changed.replace(false) {
            show(game, output)?;
        }
        write!(output, "> ")?;
        output.flush()?;

        let line = line.context("Failed to read input")?;
        if line.trim().is_empty() {
            continue;
        }

        let (width, height) = (game.board().width(), game.board().height());
        let command = match Command::parse(&line, width, height) {
            Ok(command) => command,
            Err(err) => {
                writeln!(output, "{err}")?;
                continue;
            }
        };

        if command == Command::Quit {
            break;
        }
        if let Err(err) = execute(game, command, output) {
            writeln!(output, "{err:#}")?;
        }
    }

    Ok(())
}

/// Carry out one command. Rejected game operations come back as errors.
pub fn execute<W: Write>(game: &mut Game, command: Command, output: &mut W) -> Result<()> {
    match command {
        Command::Play(coord) => {
            let captured = game.try_play(coord)?;
            if !captured.is_empty() {
                writeln!(output, "Captured {} stone(s)", captured.len())?;
            }
        }
        Command::Pass => {
            game.try_pass()?;
            if game.is_over() {
                writeln!(output, "Both players passed. Claim dead stones with 'claim <point>'.")?;
            }
        }
        Command::Undo => {
            if !game.undo() {
                bail!("Nothing to undo");
            }
        }
        Command::Redo => {
            if !game.redo() {
                bail!("Nothing to redo");
            }
        }
        Command::Claim(coord) => {
            let territory = game.try_claim_territory(coord)?;
            writeln!(output, "Claimed {} point(s) worth {}", territory.len(), territory.score)?;
        }
        Command::Show => show(game, output)?,
        Command::Score => write!(output, "{}", render::render_status(&game.view()))?,
        Command::Sgf => writeln!(output, "{}", game.to_sgf())?,
        Command::Save(path) => {
            std::fs::write(&path, game.to_sgf())
                .with_context(|| format!("Failed to write {}", path.display()))?;
            writeln!(output, "Saved to {}", path.display())?;
        }
        Command::Json => writeln!(output, "{}", serde_json::to_string_pretty(&game.view())?)?,
        Command::Help => writeln!(output, "{HELP}")?,
        Command::Quit => {}
    }
    Ok(())
}

fn show<W: Write>(game: &Game, output: &mut W) -> Result<()> {
    let view = game.view();
    write!(
        output,
        "\n{}{}",
        render::render_board(&view),
        render::render_status(&view)
    )?;
    Ok(())
}
