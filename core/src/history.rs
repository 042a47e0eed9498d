// SPDX-License-Identifier: MIT OR Apache-2.0

//! Snapshot history with undo and redo.
//!
//! Snapshots live in a vector indexed by move number. The current position is
//! an index into it; undo and redo only move that index. Appending from a
//! position in the past drops everything after it, so redo never branches.

use crate::{board::Board, Color, Coord, Move, MoveRecord};
use serde::{Deserialize, Serialize};

/// Stones captured by each player
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Captures {
    pub black: u32,
    pub white: u32,
}

impl Captures {
    pub fn get(&self, color: Color) -> u32 {
        match color {
            Color::Black => self.black,
            Color::White => self.white,
        }
    }

    pub fn add(&mut self, color: Color, count: u32) {
        match color {
            Color::Black => self.black += count,
            Color::White => self.white += count,
        }
    }
}

/// An immutable position in the game
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    board: Board,
    /// `None` once both players passed
    to_move: Option<Color>,
    captures: Captures,
    /// The move that produced this position; `None` for the root
    last_move: Option<MoveRecord>,
    move_number: usize,
}

impl GameState {
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The player to move, or `None` when the game has ended
    pub fn to_move(&self) -> Option<Color> {
        self.to_move
    }

    pub fn is_over(&self) -> bool {
        self.to_move.is_none()
    }

    pub fn captures(&self) -> Captures {
        self.captures
    }

    pub fn last_move(&self) -> Option<&MoveRecord> {
        self.last_move.as_ref()
    }

    /// Whether this position was reached by a pass
    pub fn is_pass(&self) -> bool {
        self.last_move.is_some_and(|rec| rec.is_pass())
    }

    /// Coordinate of the stone that produced this position, if any
    pub fn last_stone(&self) -> Option<Coord> {
        match self.last_move?.mv {
            Move::Place(coord) => Some(coord),
            Move::Pass => None,
        }
    }

    /// Sequence number; the root is 0
    pub fn move_number(&self) -> usize {
        self.move_number
    }
}

/// The chain of positions of one game
#[derive(Debug, Clone)]
pub struct History {
    states: Vec<GameState>,
    current: usize,
}

impl History {
    /// Start a history with an empty position and Black to move
    pub fn new(board: Board) -> Self {
        let root = GameState {
            board,
            to_move: Some(Color::Black),
            captures: Captures::default(),
            last_move: None,
            move_number: 0,
        };
        Self {
            states: vec![root],
            current: 0,
        }
    }

    pub fn current(&self) -> &GameState {
        &self.states[self.current]
    }

    pub fn root(&self) -> &GameState {
        &self.states[0]
    }

    /// Last recorded position, which is ahead of `current` after an undo
    pub fn tip(&self) -> &GameState {
        // the root is never removed
        &self.states[self.states.len() - 1]
    }

    /// Position before the current one
    pub fn parent(&self) -> Option<&GameState> {
        self.current.checked_sub(1).map(|idx| &self.states[idx])
    }

    /// Position redo would move to
    pub fn child(&self) -> Option<&GameState> {
        self.states.get(self.current + 1)
    }

    pub fn state(&self, move_number: usize) -> Option<&GameState> {
        self.states.get(move_number)
    }

    /// Number of recorded positions, root included
    pub fn state_count(&self) -> usize {
        self.states.len()
    }

    pub fn can_undo(&self) -> bool {
        self.current > 0
    }

    pub fn can_redo(&self) -> bool {
        self.current + 1 < self.states.len()
    }

    /// Record a new position after the current one and make it current.
    /// Any redo future is discarded.
    pub fn push(
        &mut self,
        board: Board,
        to_move: Option<Color>,
        captures: Captures,
        record: MoveRecord,
    ) -> &GameState {
        self.states.truncate(self.current + 1);

        let state = GameState {
            board,
            to_move,
            captures,
            last_move: Some(record),
            move_number: self.current + 1,
        };
        self.states.push(state);
        self.current += 1;

        &self.states[self.current]
    }

    /// Step back one position; `false` at the root
    pub fn undo(&mut self) -> bool {
        if !self.can_undo() {
            return false;
        }
        self.current -= 1;
        true
    }

    /// Step forward one position; `false` when nothing was undone
    pub fn redo(&mut self) -> bool {
        if !self.can_redo() {
            return false;
        }
        self.current += 1;
        true
    }

    /// Moves from the first real move up to the tip
    pub fn records(&self) -> impl Iterator<Item = &MoveRecord> {
        self.states.iter().filter_map(|state| state.last_move.as_ref())
    }
}
