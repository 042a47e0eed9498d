// SPDX-License-Identifier: MIT OR Apache-2.0

//! Board representation and position queries

use crate::{Coord, GameError, Stone, MAX_BOARD_SIZE};
use serde::Serialize;
use std::fmt;
use std::hash::{Hash, Hasher};

/// A point on the board as read from a particular position.
///
/// Equality and hashing only look at the coordinates, so the same point read
/// from two different snapshots is the same key in a set.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Intersection {
    pub x: u8,
    pub y: u8,
    pub stone: Stone,
}

impl Intersection {
    pub fn coord(&self) -> Coord {
        Coord::new(self.x, self.y)
    }
}

impl PartialEq for Intersection {
    fn eq(&self, other: &Self) -> bool {
        self.x == other.x && self.y == other.y
    }
}

impl Eq for Intersection {}

impl Hash for Intersection {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.coord().hash(state);
    }
}

/// Represents the Go board with stones and empty positions
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    /// Number of vertical lines (x range)
    width: u8,
    /// Number of horizontal lines (y range)
    height: u8,
    /// Positions on the board, row-major
    positions: Vec<Stone>,
}

impl Board {
    /// Create a new empty board with the specified dimensions
    pub fn new(width: u8, height: u8) -> Result<Self, GameError> {
        if !(1..=MAX_BOARD_SIZE).contains(&width) || !(1..=MAX_BOARD_SIZE).contains(&height) {
            return Err(GameError::InvalidBoardSize { width, height });
        }

        let cells = (width as usize) * (height as usize);
        Ok(Self {
            width,
            height,
            positions: vec![Stone::Empty; cells],
        })
    }

    /// Create a new empty square board
    pub fn square(size: u8) -> Result<Self, GameError> {
        Self::new(size, size)
    }

    pub fn width(&self) -> u8 {
        self.width
    }

    pub fn height(&self) -> u8 {
        self.height
    }

    /// Check if coordinate lies on this board
    pub fn contains(&self, coord: Coord) -> bool {
        coord.x < self.width && coord.y < self.height
    }

    /// Read the intersection at `(x, y)`
    pub fn at(&self, x: u8, y: u8) -> Result<Intersection, GameError> {
        let coord = Coord::new(x, y);
        self.get(coord)
            .map(|stone| Intersection { x, y, stone })
            .ok_or(GameError::OutOfRange(coord))
    }

    /// Get the stone at the specified coordinate, `None` when off the board
    pub fn get(&self, coord: Coord) -> Option<Stone> {
        if !self.contains(coord) {
            return None;
        }

        Some(self.positions[self.coord_to_index(coord)])
    }

    /// Stone at an in-range coordinate; off-board reads as empty
    pub fn stone(&self, coord: Coord) -> Stone {
        self.get(coord).unwrap_or(Stone::Empty)
    }

    /// The four orthogonal neighbors in the order up, down, left, right.
    /// Directions falling off the edge are `None`.
    pub fn neighbors(&self, x: u8, y: u8) -> [Option<Intersection>; 4] {
        let probe = |dx: i16, dy: i16| -> Option<Intersection> {
            let nx = u8::try_from(x as i16 + dx).ok()?;
            let ny = u8::try_from(y as i16 + dy).ok()?;
            self.at(nx, ny).ok()
        };

        [probe(0, -1), probe(0, 1), probe(-1, 0), probe(1, 0)]
    }

    /// In-range orthogonal neighbor coordinates
    pub fn adjacent_coords(&self, coord: Coord) -> impl Iterator<Item = Coord> {
        self.neighbors(coord.x, coord.y)
            .into_iter()
            .flatten()
            .map(|int| int.coord())
    }

    /// Every coordinate, column by column
    pub fn coords(&self) -> impl Iterator<Item = Coord> {
        let height = self.height;
        (0..self.width).flat_map(move |x| (0..height).map(move |y| Coord::new(x, y)))
    }

    /// Stones as a column-major matrix, `grid[x][y]`
    pub fn grid(&self) -> Vec<Vec<Stone>> {
        (0..self.width)
            .map(|x| (0..self.height).map(|y| self.stone(Coord::new(x, y))).collect())
            .collect()
    }

    /// Count stones of the given kind on the board
    pub fn count(&self, stone: Stone) -> usize {
        self.positions.iter().filter(|s| **s == stone).count()
    }

    /// Overwrite a point. Off-board writes are ignored.
    pub(crate) fn set(&mut self, coord: Coord, stone: Stone) {
        debug_assert!(stone != Stone::Contested, "contested is never stored on a board");
        if self.contains(coord) {
            let idx = self.coord_to_index(coord);
            self.positions[idx] = stone;
        }
    }

    /// Convert a coordinate to a vector index
    fn coord_to_index(&self, coord: Coord) -> usize {
        (coord.y as usize) * (self.width as usize) + (coord.x as usize)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.height {
            for x in 0..self.width {
                let ch = match self.stone(Coord::new(x, y)) {
                    Stone::Black => 'X',
                    Stone::White => 'O',
                    Stone::Empty | Stone::Contested => '.',
                };
                if x > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{ch}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
