// SPDX-License-Identifier: MIT OR Apache-2.0

//! Goban CLI - play and replay Go games in the terminal

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use goban_core::{Game, GameConfig};
use goban_cli::{render, repl};
use std::io;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Command-line arguments
#[derive(Parser, Debug)]
#[command(name = "goban", about = "Go rules engine in the terminal", version)]
struct Args {
    /// Enable debug logging on stderr
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Play an interactive game
    Play {
        /// Board size, overrides the config file
        #[arg(short, long)]
        size: Option<u8>,

        /// Config file; defaults to the platform config directory
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Continue a game from an SGF file
        #[arg(short, long)]
        load: Option<PathBuf>,
    },
    /// Load an SGF file and print the final position
    Replay {
        /// SGF file to read
        file: PathBuf,

        /// Print the game state as JSON instead of a board
        #[arg(long)]
        json: bool,

        /// Write the normalized record to this file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Log to stderr so the board on stdout stays readable
fn init_logging(debug: bool) {
    let filter = if debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// `--config` if given, else the platform config file if it exists, else defaults
fn resolve_config(path: Option<&Path>) -> Result<GameConfig> {
    if let Some(path) = path {
        return GameConfig::load(path);
    }

    let default_path = directories::ProjectDirs::from("", "", "goban")
        .map(|dirs| dirs.config_dir().join("config.toml"))
        .filter(|path| path.exists());

    match default_path {
        Some(path) => GameConfig::load(&path),
        None => Ok(GameConfig::default()),
    }
}

fn read_game(path: &Path, config: &GameConfig) -> Result<Game> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    Game::from_sgf_with_config(&text, config)
        .with_context(|| format!("Failed to load {}", path.display()))
}

fn play(size: Option<u8>, config: Option<&Path>, load: Option<&Path>) -> Result<()> {
    let mut config = resolve_config(config)?;
    if let Some(size) = size {
        config.width = size;
        config.height = size;
    }

    let mut game = match load {
        Some(path) => read_game(path, &config)?,
        None => Game::with_config(&config).context("Cannot start a game")?,
    };
    tracing::info!(width = game.board().width(), height = game.board().height(), "starting game");

    println!("Type 'help' for the command list.");
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    repl::run(&mut game, stdin.lock(), &mut stdout)
}

fn replay(file: &Path, json: bool, output: Option<&Path>) -> Result<()> {
    let game = read_game(file, &GameConfig::default())?;
    let view = game.view();

    if json {
        println!("{}", serde_json::to_string_pretty(&view)?);
    } else {
        print!("{}{}", render::render_board(&view), render::render_status(&view));
    }

    if let Some(path) = output {
        std::fs::write(path, game.to_sgf())
            .with_context(|| format!("Failed to write {}", path.display()))?;
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.debug);

    match args.command {
        Command::Play { size, config, load } => {
            play(size, config.as_deref(), load.as_deref())
        }
        Command::Replay { file, json, output } => replay(&file, json, output.as_deref()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use std::io::Write;

    #[test]
    fn test_args_are_consistent() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_parse_args() {
        let args = Args::try_parse_from(["goban", "play", "--size", "9", "--debug"]).unwrap();
        assert!(args.debug);
        assert!(matches!(args.command, Command::Play { size: Some(9), .. }));

        let args = Args::try_parse_from(["goban", "replay", "game.sgf", "--json"]).unwrap();
        assert!(matches!(args.command, Command::Replay { json: true, output: None, .. }));

        assert!(Args::try_parse_from(["goban", "replay"]).is_err());
    }

    #[test]
    fn test_explicit_config_is_used() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "width = 13\nheight = 9").unwrap();

        let config = resolve_config(Some(file.path())).unwrap();
        assert_eq!((config.width, config.height), (13, 9));
        assert!(resolve_config(Some(Path::new("/nonexistent/goban.toml"))).is_err());
    }

    #[test]
    fn test_replay_writes_output() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.sgf");
        let output = dir.path().join("out.sgf");
        std::fs::write(&input, "(;GM[1]SZ[9]PB[someone];B[ee];W[tt])").unwrap();

        replay(&input, true, Some(&output)).unwrap();
        let written = std::fs::read_to_string(&output).unwrap();
        assert_eq!(written, "(;GM[1]FF[4]CA[UTF-8]AP[Goban]SZ[9];B[ee];W[])");
    }
}
