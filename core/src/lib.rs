// SPDX-License-Identifier: MIT OR Apache-2.0

//! Goban Core - Go rules engine
//!
//! This crate provides the core game functionality including:
//! - Go board representation and neighbor queries
//! - Capture resolution, suicide and ko rules
//! - Territory detection and manual territory claims
//! - An undo/redo history of immutable snapshots
//! - SGF (Smart Game Format) import and export

#![deny(unsafe_code)]
#![deny(clippy::all)]

pub mod board;
pub mod config;
pub mod game;
pub mod history;
pub mod rules;
pub mod sgf;
pub mod territory;

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

pub use board::{Board, Intersection};
pub use config::GameConfig;
pub use game::{Game, GameView, Score};
pub use history::{Captures, GameState, History};
pub use sgf::SgfError;
pub use territory::Territory;

/// Largest supported side length; SGF coordinates are single letters `a..=z`.
pub const MAX_BOARD_SIZE: u8 = 26;

/// Player color in a Go game (Black or White)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    /// Black player (traditionally goes first)
    Black,
    /// White player
    White,
}

impl Color {
    /// Returns the opposite color
    pub fn opposite(&self) -> Self {
        match self {
            Color::Black => Color::White,
            Color::White => Color::Black,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Black => write!(f, "black"),
            Color::White => write!(f, "white"),
        }
    }
}

/// Content of an intersection.
///
/// `Contested` only ever appears as a territory owner; a live board holds
/// `Empty`, `Black` or `White`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stone {
    #[default]
    Empty,
    Black,
    White,
    Contested,
}

impl Stone {
    /// The player owning this stone, if it is a real stone
    pub fn color(self) -> Option<Color> {
        match self {
            Stone::Black => Some(Color::Black),
            Stone::White => Some(Color::White),
            Stone::Empty | Stone::Contested => None,
        }
    }

    pub fn is_empty(self) -> bool {
        self == Stone::Empty
    }
}

impl From<Color> for Stone {
    fn from(color: Color) -> Self {
        match color {
            Color::Black => Stone::Black,
            Color::White => Stone::White,
        }
    }
}

/// Board coordinate representing a position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coord {
    /// X coordinate (column)
    pub x: u8,
    /// Y coordinate (row)
    pub y: u8,
}

impl Coord {
    /// Create a new coordinate
    pub fn new(x: u8, y: u8) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.x, self.y)
    }
}

/// Represents a move in the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Move {
    /// Place a stone at the specified coordinate
    Place(Coord),
    /// Pass the turn
    Pass,
}

/// A move together with the player who made it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    pub color: Color,
    pub mv: Move,
}

impl MoveRecord {
    pub fn new(color: Color, mv: Move) -> Self {
        Self { color, mv }
    }

    pub fn is_pass(&self) -> bool {
        self.mv == Move::Pass
    }
}

/// Reasons an operation on the game is not accepted
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GameError {
    /// The coordinate is outside the board
    #[error("Coordinate {0} is outside the board")]
    OutOfRange(Coord),

    /// Board dimensions outside 1..=26
    #[error("Invalid board size {width}x{height}")]
    InvalidBoardSize { width: u8, height: u8 },

    /// The position is already occupied
    #[error("Position {0} already occupied")]
    OccupiedPosition(Coord),

    /// The move would result in self-capture (suicide)
    #[error("Move at {0} would result in self-capture")]
    SelfCapture(Coord),

    /// The move recreates the position before the opponent's last move
    #[error("Move at {0} violates ko rule")]
    KoViolation(Coord),

    /// Moves and passes are not accepted once both players passed
    #[error("Game is over")]
    GameOver,

    /// Territory can only be claimed after the game ended
    #[error("Game is still in progress")]
    GameInProgress,

    /// Claims start from a stone
    #[error("Cannot claim territory from empty point {0}")]
    EmptyClaim(Coord),

    /// The point is already part of a claimed territory
    #[error("Point {0} is already claimed")]
    AlreadyClaimed(Coord),
}
