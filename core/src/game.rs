// SPDX-License-Identifier: MIT OR Apache-2.0

//! The game controller.
//!
//! [`Game`] owns the history and the end-of-game territory claims. It is the
//! only type a front end needs: feed it coordinates and commands, then read
//! [`Game::view`] whenever the state-changed listener fires.

use crate::history::{Captures, GameState, History};
use crate::territory::{self, Territory};
use crate::{board::Board, rules, sgf, Color, Coord, GameConfig, GameError, Move, MoveRecord, SgfError, Stone};
use serde::Serialize;
use std::collections::HashSet;
use std::fmt;

/// Points earned by one player
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Score {
    /// Opposing stones captured during play
    pub captures: u32,
    /// Territory points; only counted once the game is over
    pub territory: u32,
}

impl Score {
    pub fn total(&self) -> u32 {
        self.captures + self.territory
    }
}

/// Read-only snapshot handed to a front end
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameView {
    pub width: u8,
    pub height: u8,
    /// Column-major, `board[x][y]`
    pub board: Vec<Vec<Stone>>,
    /// `None` once the game is over
    pub to_move: Option<Color>,
    pub black: Score,
    pub white: Score,
    /// The most recently placed stone; `None` at the start or after a pass
    pub last_move: Option<Coord>,
    pub move_number: usize,
    pub can_undo: bool,
    pub can_redo: bool,
}

impl GameView {
    pub fn is_over(&self) -> bool {
        self.to_move.is_none()
    }

    pub fn score(&self, color: Color) -> Score {
        match color {
            Color::Black => self.black,
            Color::White => self.white,
        }
    }
}

type StateListener = Box<dyn FnMut(&GameView)>;

pub struct Game {
    config: GameConfig,
    history: History,
    /// Territories assigned by hand after the game ended
    claims: Vec<Territory>,
    /// Every point inside `claims`
    claimed: HashSet<Coord>,
    listener: Option<StateListener>,
}

impl Game {
    /// Start a game on an empty `width x height` board
    pub fn new(width: u8, height: u8) -> Result<Self, GameError> {
        Self::with_config(&GameConfig {
            width,
            height,
            ..GameConfig::default()
        })
    }

    pub fn with_config(config: &GameConfig) -> Result<Self, GameError> {
        let board = Board::new(config.width, config.height)?;
        tracing::debug!(width = config.width, height = config.height, "new game");

        Ok(Self {
            config: config.clone(),
            history: History::new(board),
            claims: Vec::new(),
            claimed: HashSet::new(),
            listener: None,
        })
    }

    /// Load a game from SGF text with default settings
    pub fn from_sgf(text: &str) -> Result<Self, SgfError> {
        sgf::decode(text, &GameConfig::default())
    }

    /// Load a game from SGF text; the board size comes from the record
    pub fn from_sgf_with_config(text: &str, config: &GameConfig) -> Result<Self, SgfError> {
        sgf::decode(text, config)
    }

    /// Export every recorded move, including moves that were undone
    pub fn to_sgf(&self) -> String {
        sgf::encode(&self.history, &self.config.application)
    }

    /// Register the callback fired after every accepted state change
    pub fn on_state_change<F>(&mut self, listener: F)
    where
        F: FnMut(&GameView) + 'static,
    {
        self.listener = Some(Box::new(listener));
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn current(&self) -> &GameState {
        self.history.current()
    }

    pub fn board(&self) -> &Board {
        self.history.current().board()
    }

    pub fn to_move(&self) -> Option<Color> {
        self.history.current().to_move()
    }

    pub fn is_over(&self) -> bool {
        self.history.current().is_over()
    }

    pub fn captures(&self) -> Captures {
        self.history.current().captures()
    }

    /// Play a stone for the player to move. Returns whether it was accepted.
    pub fn play(&mut self, x: u8, y: u8) -> bool {
        match self.try_play(Coord::new(x, y)) {
            Ok(_) => true,
            Err(err) => {
                tracing::debug!(x, y, %err, "move rejected");
                false
            }
        }
    }

    /// Play a stone for the player to move and return the captured stones
    pub fn try_play(&mut self, coord: Coord) -> Result<Vec<Coord>, GameError> {
        let color = self.to_move().ok_or(GameError::GameOver)?;
        self.apply(MoveRecord::new(color, Move::Place(coord)))
    }

    /// Pass for the player to move. Returns whether it was accepted.
    pub fn pass(&mut self) -> bool {
        match self.try_pass() {
            Ok(()) => true,
            Err(err) => {
                tracing::debug!(%err, "pass rejected");
                false
            }
        }
    }

    pub fn try_pass(&mut self) -> Result<(), GameError> {
        let color = self.to_move().ok_or(GameError::GameOver)?;
        self.apply(MoveRecord::new(color, Move::Pass)).map(|_| ())
    }

    /// Apply a move for an explicit color, as recorded in a game file.
    ///
    /// The position is only touched when every rule passes; on error the
    /// game is exactly as before.
    pub fn apply(&mut self, record: MoveRecord) -> Result<Vec<Coord>, GameError> {
        let current = self.history.current();
        if current.is_over() {
            return Err(GameError::GameOver);
        }

        let mut board = current.board().clone();
        let mut captures = current.captures();

        let (to_move, captured) = match record.mv {
            Move::Place(coord) => {
                let placement = rules::place_stone(&mut board, coord, record.color)?;

                // ko: the new position may not repeat the one before the
                // opponent's last move
                if self.history.parent().is_some_and(|prev| *prev.board() == board) {
                    tracing::debug!(%coord, color = %record.color, "ko recapture refused");
                    return Err(GameError::KoViolation(coord));
                }

                captures.add(record.color, placement.captured.len() as u32);
                (Some(record.color.opposite()), placement.captured)
            }
            Move::Pass => {
                let ends_game = current.is_pass();
                let to_move = (!ends_game).then(|| record.color.opposite());
                (to_move, Vec::new())
            }
        };

        let state = self.history.push(board, to_move, captures, record);
        if state.is_over() {
            tracing::info!(
                move_number = state.move_number(),
                black_captures = captures.black,
                white_captures = captures.white,
                "both players passed, game over"
            );
        }

        self.notify();
        Ok(captured)
    }

    /// Step back one move. Returns `false` at the start of the game.
    pub fn undo(&mut self) -> bool {
        if !self.history.undo() {
            tracing::debug!("nothing to undo");
            return false;
        }
        self.clear_claims();
        self.notify();
        true
    }

    /// Step forward one undone move. Returns `false` when there is none.
    pub fn redo(&mut self) -> bool {
        if !self.history.redo() {
            tracing::debug!("nothing to redo");
            return false;
        }
        self.clear_claims();
        self.notify();
        true
    }

    /// Hand the region around a dead stone to its opponent.
    /// Returns whether the claim was accepted.
    pub fn claim_territory(&mut self, x: u8, y: u8) -> bool {
        match self.try_claim_territory(Coord::new(x, y)) {
            Ok(_) => true,
            Err(err) => {
                tracing::debug!(x, y, %err, "claim rejected");
                false
            }
        }
    }

    pub fn try_claim_territory(&mut self, coord: Coord) -> Result<&Territory, GameError> {
        if !self.is_over() {
            return Err(GameError::GameInProgress);
        }

        let board = self.history.current().board();
        let stone = board.get(coord).ok_or(GameError::OutOfRange(coord))?;
        let Some(color) = stone.color() else {
            return Err(GameError::EmptyClaim(coord));
        };
        if self.claimed.contains(&coord) {
            return Err(GameError::AlreadyClaimed(coord));
        }

        // points inside an earlier claim keep their first owner
        let flooded = territory::exclusive_territory(board, coord, color.opposite());
        let region = flooded
            .region
            .into_iter()
            .filter(|int| !self.claimed.contains(&int.coord()))
            .collect();
        let territory = Territory::new(flooded.owner, region);
        tracing::debug!(%coord, owner = %color.opposite(), points = territory.len(), "territory claimed");

        self.claimed.extend(territory.region.iter().map(|int| int.coord()));
        self.claims.push(territory);
        self.notify();

        let idx = self.claims.len() - 1;
        Ok(&self.claims[idx])
    }

    /// Territories assigned by hand, in claim order
    pub fn claimed_territories(&self) -> &[Territory] {
        &self.claims
    }

    /// Claimed territories followed by the owned regions found automatically.
    /// Contested regions are left out.
    pub fn territories(&self) -> Vec<Territory> {
        let detected = territory::apparent_territories(self.board(), &self.claimed)
            .into_iter()
            .filter(|t| t.owner_color().is_some());

        self.claims.iter().cloned().chain(detected).collect()
    }

    /// Captures plus, once the game is over, owned territory
    pub fn score(&self, color: Color) -> Score {
        let captures = self.captures().get(color);
        let territory = if self.is_over() {
            self.territories()
                .iter()
                .filter(|t| t.owner_color() == Some(color))
                .map(|t| t.score)
                .sum()
        } else {
            0
        };

        Score {
            captures,
            territory,
        }
    }

    pub fn view(&self) -> GameView {
        let state = self.history.current();
        let board = state.board();

        GameView {
            width: board.width(),
            height: board.height(),
            board: board.grid(),
            to_move: state.to_move(),
            black: self.score(Color::Black),
            white: self.score(Color::White),
            last_move: state.last_stone(),
            move_number: state.move_number(),
            can_undo: self.history.can_undo(),
            can_redo: self.history.can_redo(),
        }
    }

    fn clear_claims(&mut self) {
        self.claims.clear();
        self.claimed.clear();
    }

    fn notify(&mut self) {
        if self.listener.is_none() {
            return;
        }
        let view = self.view();
        if let Some(listener) = self.listener.as_mut() {
            listener(&view);
        }
    }
}

impl fmt::Debug for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Game")
            .field("config", &self.config)
            .field("history", &self.history)
            .field("claims", &self.claims)
            .finish_non_exhaustive()
    }
}
