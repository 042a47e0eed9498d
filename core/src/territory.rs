// SPDX-License-Identifier: MIT OR Apache-2.0

//! Territory detection over empty regions and manual territory claims

use crate::{board::Board, Color, Coord, Intersection, Stone};
use serde::Serialize;
use std::collections::HashSet;

/// A region of the board credited to one owner.
///
/// Empty points score 1; stone points score 2 (the point plus the prisoner),
/// which only happens for regions built by a manual claim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Territory {
    /// `Black`, `White`, `Empty` (no owner yet) or `Contested`
    pub owner: Stone,
    pub region: Vec<Intersection>,
    pub score: u32,
}

impl Territory {
    pub fn new(owner: Stone, region: Vec<Intersection>) -> Self {
        let score = region
            .iter()
            .map(|int| if int.stone.is_empty() { 1 } else { 2 })
            .sum();
        Self {
            owner,
            region,
            score,
        }
    }

    /// An empty region that only carries an owner
    pub fn bordered_by(owner: Stone) -> Self {
        Self::new(owner, Vec::new())
    }

    /// Combine two partial results of the same search.
    ///
    /// Disagreeing real owners give `Contested`; otherwise the one that is not
    /// `Empty` wins. Regions concatenate and scores add.
    pub fn merge(mut self, other: Territory) -> Territory {
        self.owner = match (self.owner, other.owner) {
            (Stone::Empty, owner) | (owner, Stone::Empty) => owner,
            (a, b) if a == b => a,
            _ => Stone::Contested,
        };
        self.region.extend(other.region);
        self.score += other.score;
        self
    }

    pub fn contains(&self, coord: Coord) -> bool {
        self.region.iter().any(|int| int.coord() == coord)
    }

    pub fn len(&self) -> usize {
        self.region.len()
    }

    pub fn is_empty(&self) -> bool {
        self.region.is_empty()
    }

    /// The scoring player, if any
    pub fn owner_color(&self) -> Option<Color> {
        self.owner.color()
    }
}

/// Flood from `start` through every point that is not a stone of `owner`.
///
/// Used for manual claims: clicking a dead stone hands its surroundings, up
/// to the owner's walls, to `owner`. Starting on an `owner` stone yields an
/// empty result.
pub fn exclusive_territory(board: &Board, start: Coord, owner: Color) -> Territory {
    let wall = Stone::from(owner);
    if !board.contains(start) || board.stone(start) == wall {
        return Territory::bordered_by(Stone::Empty);
    }

    let mut region = Vec::new();
    let mut visited = HashSet::from([start]);
    let mut stack = vec![start];

    while let Some(current) = stack.pop() {
        region.push(Intersection {
            x: current.x,
            y: current.y,
            stone: board.stone(current),
        });

        for neighbor in board.adjacent_coords(current) {
            if board.stone(neighbor) != wall && visited.insert(neighbor) {
                stack.push(neighbor);
            }
        }
    }

    Territory::new(wall, region)
}

/// Collect the empty region around `start` and decide who surrounds it.
///
/// `visited` is shared across calls so each region is produced once.
/// Claimed points are neither entered nor counted as a border. A region with
/// stones of both colors around it, or with no stones around it at all, comes
/// back `Contested`.
pub fn apparent_territory(
    board: &Board,
    start: Coord,
    visited: &mut HashSet<Coord>,
    claimed: &HashSet<Coord>,
) -> Territory {
    if board.get(start) != Some(Stone::Empty) || claimed.contains(&start) {
        return Territory::bordered_by(Stone::Empty);
    }

    let mut territory = Territory::bordered_by(Stone::Empty);
    let mut stack = vec![start];
    visited.insert(start);

    while let Some(current) = stack.pop() {
        let point = Intersection {
            x: current.x,
            y: current.y,
            stone: Stone::Empty,
        };
        territory = territory.merge(Territory::new(Stone::Empty, vec![point]));

        for neighbor in board.adjacent_coords(current) {
            if claimed.contains(&neighbor) {
                continue;
            }
            match board.stone(neighbor) {
                Stone::Empty => {
                    if visited.insert(neighbor) {
                        stack.push(neighbor);
                    }
                }
                stone => territory = territory.merge(Territory::bordered_by(stone)),
            }
        }
    }

    if territory.owner == Stone::Empty {
        territory.owner = Stone::Contested;
    }
    territory
}

/// Every unclaimed empty region on the board, contested ones included
pub fn apparent_territories(board: &Board, claimed: &HashSet<Coord>) -> Vec<Territory> {
    let mut visited = HashSet::new();
    let mut territories = Vec::new();

    for coord in board.coords() {
        if board.stone(coord).is_empty() && !visited.contains(&coord) && !claimed.contains(&coord) {
            territories.push(apparent_territory(board, coord, &mut visited, claimed));
        }
    }

    territories
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(x: u8, y: u8, stone: Stone) -> Intersection {
        Intersection { x, y, stone }
    }

    #[test]
    fn score_counts_stones_double() {
        let t = Territory::new(
            Stone::Black,
            vec![point(0, 0, Stone::Empty), point(1, 0, Stone::White)],
        );
        assert_eq!(t.score, 3);
    }

    #[test]
    fn merge_rules() {
        let none = Territory::bordered_by(Stone::Empty);
        let black = Territory::new(Stone::Black, vec![point(0, 0, Stone::Empty)]);
        let white = Territory::new(Stone::White, vec![point(1, 0, Stone::Empty)]);

        assert_eq!(none.clone().merge(black.clone()).owner, Stone::Black);
        assert_eq!(black.clone().merge(none.clone()).owner, Stone::Black);
        assert_eq!(black.clone().merge(black.clone()).owner, Stone::Black);

        let mixed = black.clone().merge(white);
        assert_eq!(mixed.owner, Stone::Contested);
        assert_eq!(mixed.len(), 2);
        assert_eq!(mixed.score, 2);

        assert_eq!(mixed.merge(black).owner, Stone::Contested);
    }

    #[test]
    fn merge_is_associative_on_owner() {
        let parts = [Stone::Empty, Stone::Black, Stone::Empty, Stone::White];
        let left = parts
            .iter()
            .fold(Territory::bordered_by(Stone::Empty), |acc, s| acc.merge(Territory::bordered_by(*s)));
        let right = Territory::bordered_by(parts[0]).merge(
            Territory::bordered_by(parts[1])
                .merge(Territory::bordered_by(parts[2]).merge(Territory::bordered_by(parts[3]))),
        );
        assert_eq!(left.owner, right.owner);
    }
}
