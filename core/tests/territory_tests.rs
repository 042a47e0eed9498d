// SPDX-License-Identifier: MIT OR Apache-2.0

use goban_core::territory::{apparent_territories, exclusive_territory};
use goban_core::{Board, Color, Coord, Game, GameError, Stone};
use std::collections::HashSet;

/// Black wall on column 1, white wall on column 3, then a white stone
/// invades black's side at (0,2) and both players pass.
fn walls_with_invader() -> Game {
    let mut game = Game::new(5, 5).unwrap();
    for y in 0..5 {
        assert!(game.play(1, y));
        assert!(game.play(3, y));
    }
    assert!(game.pass());
    assert!(game.play(0, 2));
    assert!(game.pass());
    assert!(game.pass());
    assert!(game.is_over());
    game
}

#[test]
fn empty_board_is_one_contested_region() {
    let mut game = Game::new(9, 9).unwrap();
    game.pass();
    game.pass();

    let regions = apparent_territories(game.board(), &HashSet::new());
    assert_eq!(regions.len(), 1);
    assert_eq!(regions[0].owner, Stone::Contested);
    assert_eq!(regions[0].len(), 81);

    assert!(game.territories().is_empty());
    assert_eq!(game.score(Color::Black).total(), 0);
    assert_eq!(game.score(Color::White).total(), 0);
}

#[test]
fn invaded_area_is_contested_until_claimed() {
    let mut game = walls_with_invader();

    // column 0 touches both colors, column 4 is white's alone
    assert_eq!(game.score(Color::Black).territory, 0);
    assert_eq!(game.score(Color::White).territory, 5);

    let claim = game.try_claim_territory(Coord::new(0, 2)).unwrap();
    assert_eq!(claim.owner, Stone::Black);
    assert_eq!(claim.len(), 5);
    // four empty points plus the dead stone counted twice
    assert_eq!(claim.score, 6);

    assert_eq!(game.score(Color::Black).territory, 6);
    assert_eq!(game.score(Color::White).territory, 5);
    assert_eq!(game.claimed_territories().len(), 1);
    assert_eq!(game.territories().len(), 2);
}

#[test]
fn claim_rejections() {
    let mut game = walls_with_invader();

    assert_eq!(
        game.try_claim_territory(Coord::new(0, 0)).map(|t| t.score),
        Err(GameError::EmptyClaim(Coord::new(0, 0)))
    );
    assert_eq!(
        game.try_claim_territory(Coord::new(5, 0)).map(|t| t.score),
        Err(GameError::OutOfRange(Coord::new(5, 0)))
    );

    assert!(game.claim_territory(0, 2));
    assert!(!game.claim_territory(0, 2));
    assert_eq!(
        game.try_claim_territory(Coord::new(0, 2)).map(|t| t.score),
        Err(GameError::AlreadyClaimed(Coord::new(0, 2)))
    );
    assert_eq!(game.claimed_territories().len(), 1);
}

#[test]
fn later_claim_leaves_earlier_claim_alone() {
    let mut game = walls_with_invader();
    assert!(game.claim_territory(0, 2));

    // white's flood from the black wall reaches back into column 0
    let claim = game.try_claim_territory(Coord::new(1, 1)).unwrap();
    assert_eq!(claim.owner, Stone::White);
    assert_eq!(claim.len(), 10);
    assert!(!claim.contains(Coord::new(0, 0)));
    assert!(claim.contains(Coord::new(2, 2)));
    // five black stones counted twice plus five empty points
    assert_eq!(claim.score, 15);

    let claims = game.claimed_territories();
    for point in &claims[0].region {
        assert!(!claims[1].contains(point.coord()), "{} claimed twice", point.coord());
    }

    assert_eq!(game.score(Color::Black).territory, 6);
    assert_eq!(game.score(Color::White).territory, 20);
}

#[test]
fn undo_and_redo_drop_claims() {
    let mut game = walls_with_invader();
    assert!(game.claim_territory(0, 2));

    assert!(game.undo());
    assert!(game.claimed_territories().is_empty());
    assert!(!game.is_over());

    assert!(game.redo());
    assert!(game.is_over());
    assert!(game.claimed_territories().is_empty());
    assert_eq!(game.score(Color::Black).territory, 0);
}

#[test]
fn exclusive_flood_stops_at_owner_walls() {
    let game = walls_with_invader();
    let board = game.board();

    // starting on the owner's own stone gives nothing
    let own = exclusive_territory(board, Coord::new(1, 0), Color::Black);
    assert!(own.is_empty());
    assert_eq!(own.owner, Stone::Empty);

    let off_board = exclusive_territory(board, Coord::new(9, 9), Color::Black);
    assert!(off_board.is_empty());

    // white wall floods through black stones up to column 3
    let big = exclusive_territory(board, Coord::new(1, 1), Color::White);
    assert_eq!(big.owner, Stone::White);
    assert!(big.contains(Coord::new(2, 2)));
    assert!(!big.contains(Coord::new(0, 2)));
    assert!(!big.contains(Coord::new(3, 0)));
}

#[test]
fn region_bordered_by_one_color() {
    let mut board = Board::square(5).unwrap();
    for y in 0..5 {
        goban_core::rules::place_stone(&mut board, Coord::new(2, y), Color::White).unwrap();
    }

    let regions = apparent_territories(&board, &HashSet::new());
    assert_eq!(regions.len(), 2);
    for region in &regions {
        assert_eq!(region.owner, Stone::White);
        assert_eq!(region.score, 10);
    }
}

#[test]
fn claimed_points_are_skipped() {
    let mut board = Board::square(3).unwrap();
    goban_core::rules::place_stone(&mut board, Coord::new(1, 1), Color::Black).unwrap();

    let claimed = HashSet::from([Coord::new(0, 0), Coord::new(1, 0), Coord::new(2, 0)]);
    let regions = apparent_territories(&board, &claimed);

    assert_eq!(regions.len(), 1);
    assert_eq!(regions[0].len(), 5);
    assert!(!regions[0].contains(Coord::new(1, 0)));
    assert_eq!(regions[0].owner, Stone::Black);
}
