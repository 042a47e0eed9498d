// SPDX-License-Identifier: MIT OR Apache-2.0

//! Group search, captures and the placement half of move validation.
//!
//! Ko needs the position history and is checked by [`crate::game::Game`];
//! everything here only looks at a single board.

use crate::{board::Board, Color, Coord, GameError, Stone};
use std::collections::HashSet;

/// Outcome of exploring the chain that contains one stone
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupScan {
    /// Chain members found before the search stopped
    pub members: Vec<Coord>,
    /// Whether any member touches an empty point
    pub has_liberty: bool,
}

/// Walk the same-colored chain containing `origin`.
///
/// `visited` is owned by the caller so several scans can share it. With
/// `stop_at_liberty` the walk returns as soon as a liberty shows up and
/// `members` is then partial; when no liberty exists the walk always runs to
/// completion, so a dead chain is always fully enumerated.
pub fn scan_group(
    board: &Board,
    origin: Coord,
    visited: &mut HashSet<Coord>,
    stop_at_liberty: bool,
) -> GroupScan {
    let target = board.stone(origin);
    if target.color().is_none() {
        // an empty point is not a chain
        return GroupScan {
            members: Vec::new(),
            has_liberty: true,
        };
    }

    let mut members = Vec::new();
    let mut has_liberty = false;
    let mut stack = vec![origin];
    visited.insert(origin);

    while let Some(current) = stack.pop() {
        members.push(current);

        for neighbor in board.adjacent_coords(current) {
            let stone = board.stone(neighbor);
            if stone == Stone::Empty {
                has_liberty = true;
                if stop_at_liberty {
                    return GroupScan {
                        members,
                        has_liberty,
                    };
                }
            } else if stone == target && visited.insert(neighbor) {
                stack.push(neighbor);
            }
        }
    }

    GroupScan {
        members,
        has_liberty,
    }
}

/// Whether the chain containing `origin` has at least one liberty
pub fn liberties(board: &Board, origin: Coord) -> bool {
    scan_group(board, origin, &mut HashSet::new(), true).has_liberty
}

/// Find all stones in a group connected to the stone at coord
pub fn find_group(board: &Board, origin: Coord) -> Vec<Coord> {
    scan_group(board, origin, &mut HashSet::new(), false).members
}

/// Members of the chain at `origin` if it has no liberty left
pub fn captured_group(board: &Board, origin: Coord) -> Option<Vec<Coord>> {
    let scan = scan_group(board, origin, &mut HashSet::new(), true);
    (!scan.has_liberty).then_some(scan.members)
}

/// Opposing chains next to the stone at `coord` that have no liberty.
///
/// A chain touching the stone on two sides is reported once.
pub fn captured_neighbor_groups(board: &Board, coord: Coord) -> Vec<Vec<Coord>> {
    let Some(color) = board.stone(coord).color() else {
        return Vec::new();
    };
    let opponent = Stone::from(color.opposite());

    let mut groups = Vec::new();
    let mut seen = HashSet::new();

    for neighbor in board.adjacent_coords(coord) {
        if board.stone(neighbor) != opponent || seen.contains(&neighbor) {
            continue;
        }

        if let Some(group) = captured_group(board, neighbor) {
            seen.extend(group.iter().copied());
            groups.push(group);
        }
    }

    groups
}

/// A stone that was legally placed, before the ko check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    pub coord: Coord,
    pub color: Color,
    /// Opposing stones removed by the placement
    pub captured: Vec<Coord>,
}

/// Place a stone and resolve captures.
///
/// On error the board is left exactly as it was. A move that captures is
/// legal even if the placed stone itself has no liberty before removal.
pub fn place_stone(board: &mut Board, coord: Coord, color: Color) -> Result<Placement, GameError> {
    match board.get(coord) {
        None => return Err(GameError::OutOfRange(coord)),
        Some(Stone::Empty) => {}
        Some(_) => return Err(GameError::OccupiedPosition(coord)),
    }

    board.set(coord, color.into());

    let groups = captured_neighbor_groups(board, coord);
    if groups.is_empty() && !liberties(board, coord) {
        board.set(coord, Stone::Empty);
        return Err(GameError::SelfCapture(coord));
    }

    let captured: Vec<Coord> = groups.into_iter().flatten().collect();
    for stone in &captured {
        board.set(*stone, Stone::Empty);
    }

    if !captured.is_empty() {
        tracing::debug!(%coord, %color, count = captured.len(), "captured stones");
    }

    Ok(Placement {
        coord,
        color,
        captured,
    })
}
