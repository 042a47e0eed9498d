// SPDX-License-Identifier: MIT OR Apache-2.0

//! SGF (Smart Game Format) parsing and generation.
//!
//! Only the parts needed to exchange a game are interpreted: `GM`, `SZ` and
//! the `B`/`W` move properties of the main line. Everything else is parsed
//! and ignored.

use crate::history::History;
use crate::{Color, Coord, Game, GameConfig, GameError, Move, MoveRecord};
use std::iter::Peekable;
use std::str::CharIndices;
use thiserror::Error;

/// Errors that make an SGF record unusable
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SgfError {
    #[error("SGF syntax error at byte {offset}: {message}")]
    Syntax { offset: usize, message: String },

    #[error("Unsupported game type GM[{0}], only Go (GM[1]) is supported")]
    UnsupportedGame(String),

    #[error("Invalid board size SZ[{0}]")]
    InvalidBoardSize(String),

    #[error("Invalid coordinate '{value}' in move {number}")]
    InvalidCoordinate { number: usize, value: String },

    #[error("Move {number} is illegal: {source}")]
    IllegalMove {
        number: usize,
        #[source]
        source: GameError,
    },
}

/// Represents an SGF property
#[derive(Debug, Clone)]
struct SgfProperty {
    /// Property identifier
    id: String,
    /// Property values
    values: Vec<String>,
}

/// Represents an SGF node
#[derive(Debug, Clone)]
struct SgfNode {
    /// Properties in the node
    properties: Vec<SgfProperty>,
}

impl SgfNode {
    fn value(&self, id: &str) -> Option<&str> {
        self.properties
            .iter()
            .find(|prop| prop.id == id)
            .and_then(|prop| prop.values.first())
            .map(String::as_str)
    }
}

/// Single-pass reader over the SGF text.
///
/// Game trees are tracked with depth counters instead of recursion, so the
/// nesting depth of variations is bounded only by the input size.
struct Parser<'a> {
    chars: Peekable<CharIndices<'a>>,
    len: usize,
}

impl<'a> Parser<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            chars: text.char_indices().peekable(),
            len: text.len(),
        }
    }

    fn offset(&mut self) -> usize {
        self.chars.peek().map_or(self.len, |(idx, _)| *idx)
    }

    fn peek(&mut self) -> Option<char> {
        self.chars.peek().map(|(_, c)| *c)
    }

    fn error(&mut self, message: impl Into<String>) -> SgfError {
        SgfError::Syntax {
            offset: self.offset(),
            message: message.into(),
        }
    }

    fn expect(&mut self, expected: char) -> Result<(), SgfError> {
        if self.peek() == Some(expected) {
            self.chars.next();
            Ok(())
        } else {
            Err(self.error(format!("expected '{expected}'")))
        }
    }

    /// Parse the first game tree of a collection and return its main line:
    /// the root sequence, then the first variation at every branch.
    ///
    /// Other variations are checked for syntax and dropped.
    fn parse(mut self) -> Result<Vec<SgfNode>, SgfError> {
        self.skip_whitespace();
        self.open_tree()?;

        let mut main_line = Vec::new();
        // open trees, and how many of them are on the main line
        let mut depth = 1usize;
        let mut main_depth = 1usize;
        // set once the innermost main-line tree closed; nothing after it is main line
        let mut main_closed = false;
        // nodes may not follow the variations of a tree
        let mut after_variation = false;

        while depth > 0 {
            self.skip_whitespace();
            let on_main = !main_closed && depth == main_depth;

            match self.peek() {
                Some(';') if !after_variation => {
                    let node = self.parse_node()?;
                    if on_main {
                        main_line.push(node);
                    }
                }
                Some('(') => {
                    self.open_tree()?;
                    if on_main {
                        main_depth += 1;
                    }
                    depth += 1;
                    after_variation = false;
                }
                Some(')') => {
                    self.chars.next();
                    if on_main {
                        main_closed = true;
                    }
                    depth -= 1;
                    after_variation = true;
                }
                Some(c) => return Err(self.error(format!("unexpected character '{c}'"))),
                None => return Err(self.error("unexpected end of input")),
            }
        }

        // trailing trees in a collection are other games; ignore them
        Ok(main_line)
    }

    /// Consume `(` and check the tree starts with a node
    fn open_tree(&mut self) -> Result<(), SgfError> {
        self.expect('(')?;
        self.skip_whitespace();
        if self.peek() != Some(';') {
            return Err(self.error("game tree without nodes"));
        }
        Ok(())
    }

    /// Parse a node
    fn parse_node(&mut self) -> Result<SgfNode, SgfError> {
        self.expect(';')?;
        self.skip_whitespace();

        let mut properties = Vec::new();
        while self.peek().is_some_and(|c| c.is_ascii_uppercase()) {
            properties.push(self.parse_property()?);
            self.skip_whitespace();
        }

        match self.peek() {
            Some(';' | '(' | ')') => Ok(SgfNode { properties }),
            Some(c) => Err(self.error(format!("unexpected character '{c}'"))),
            None => Err(self.error("unexpected end of input")),
        }
    }

    /// Parse a property
    fn parse_property(&mut self) -> Result<SgfProperty, SgfError> {
        let mut id = String::new();
        while let Some(c) = self.peek().filter(char::is_ascii_uppercase) {
            id.push(c);
            self.chars.next();
        }
        self.skip_whitespace();

        let mut values = Vec::new();
        while self.peek() == Some('[') {
            values.push(self.parse_property_value()?);
            self.skip_whitespace();
        }
        if values.is_empty() {
            return Err(self.error(format!("property {id} has no value")));
        }

        Ok(SgfProperty { id, values })
    }

    /// Parse a property value, resolving escapes
    fn parse_property_value(&mut self) -> Result<String, SgfError> {
        self.expect('[')?;

        let mut value = String::new();
        loop {
            match self.chars.next() {
                Some((_, ']')) => return Ok(value),
                Some((_, '\\')) => match self.chars.next() {
                    // escaped line break is removed
                    Some((_, '\n')) => {}
                    Some((_, c)) => value.push(c),
                    None => break,
                },
                Some((_, c)) => value.push(c),
                None => break,
            }
        }

        Err(self.error("unterminated property value"))
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.chars.next();
        }
    }
}

/// Read an `SZ` value: `19` or `13:9`
fn parse_size(value: &str) -> Result<(u8, u8), SgfError> {
    let invalid = || SgfError::InvalidBoardSize(value.to_string());
    let parse = |s: &str| s.trim().parse::<u8>().map_err(|_| invalid());

    match value.split_once(':') {
        Some((w, h)) => Ok((parse(w)?, parse(h)?)),
        None => {
            let size = parse(value)?;
            Ok((size, size))
        }
    }
}

/// Interpret a move value: two lowercase letters, or empty for a pass.
///
/// `tt` is the old pass notation and means pass on boards up to 19x19.
pub fn parse_move(value: &str, width: u8, height: u8) -> Option<Move> {
    if value.is_empty() || (value == "tt" && width <= 19 && height <= 19) {
        return Some(Move::Pass);
    }

    let &[x, y] = value.as_bytes() else {
        return None;
    };
    if !x.is_ascii_lowercase() || !y.is_ascii_lowercase() {
        return None;
    }

    let coord = Coord::new(x - b'a', y - b'a');
    (coord.x < width && coord.y < height).then_some(Move::Place(coord))
}

/// Two-letter SGF form of a coordinate
pub fn format_coord(coord: Coord) -> String {
    let x = (b'a' + coord.x) as char;
    let y = (b'a' + coord.y) as char;
    format!("{x}{y}")
}

fn escape(value: &str) -> String {
    value.replace('\\', "\\\\").replace(']', "\\]")
}

/// Replay an SGF record into a new game.
///
/// Every move goes through the normal rules; the first malformed or illegal
/// one fails the whole load.
pub fn decode(text: &str, config: &GameConfig) -> Result<Game, SgfError> {
    let main_line = Parser::new(text).parse()?;
    let Some(root) = main_line.first() else {
        return Err(SgfError::Syntax {
            offset: 0,
            message: "game tree without nodes".to_string(),
        });
    };

    if let Some(gm) = root.value("GM") {
        if gm.trim() != "1" {
            return Err(SgfError::UnsupportedGame(gm.to_string()));
        }
    }

    let (width, height) = match root.value("SZ") {
        Some(sz) => parse_size(sz)?,
        None => (19, 19),
    };

    let game_config = GameConfig {
        width,
        height,
        application: config.application.clone(),
    };
    let mut game = Game::with_config(&game_config)
        .map_err(|_| SgfError::InvalidBoardSize(format!("{width}:{height}")))?;

    let mut number = 0;
    for node in &main_line {
        for prop in &node.properties {
            let color = match prop.id.as_str() {
                "B" => Color::Black,
                "W" => Color::White,
                _ => continue,
            };
            number += 1;

            let value = &prop.values[0];
            let mv = parse_move(value, width, height).ok_or_else(|| SgfError::InvalidCoordinate {
                number,
                value: value.clone(),
            })?;

            game.apply(MoveRecord::new(color, mv))
                .map_err(|source| SgfError::IllegalMove { number, source })?;
        }
    }

    tracing::info!(width, height, moves = number, "loaded SGF record");
    Ok(game)
}

/// Write the game header and every recorded move up to the tip
pub fn encode(history: &History, application: &str) -> String {
    let board = history.root().board();
    let size = if board.width() == board.height() {
        board.width().to_string()
    } else {
        format!("{}:{}", board.width(), board.height())
    };

    let mut sgf = format!(
        "(;GM[1]FF[4]CA[UTF-8]AP[{}]SZ[{}]",
        escape(application),
        size
    );

    for record in history.records() {
        let color = match record.color {
            Color::Black => 'B',
            Color::White => 'W',
        };
        let value = match record.mv {
            Move::Place(coord) => format_coord(coord),
            Move::Pass => String::new(),
        };
        sgf.push_str(&format!(";{color}[{value}]"));
    }

    sgf.push(')');
    sgf
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_nodes_and_variations() {
        let main_line = Parser::new("(;GM[1]SZ[9];B[aa](;W[bb];B[cc])(;W[dd]))").parse().unwrap();
        let moves: Vec<_> = main_line.iter().filter_map(|node| node.value("B").or(node.value("W"))).collect();
        assert_eq!(main_line.len(), 4);
        assert_eq!(moves, vec!["aa", "bb", "cc"]);
    }

    #[test]
    fn main_line_skips_nested_side_variations() {
        let main_line = Parser::new("(;SZ[9](;B[aa](;W[bb])(;W[cc](;B[dd])))(;B[ee]))")
            .parse()
            .unwrap();
        let moves: Vec<_> = main_line.iter().filter_map(|node| node.value("B").or(node.value("W"))).collect();
        assert_eq!(moves, vec!["aa", "bb"]);
    }

    #[test]
    fn node_after_variation_is_error() {
        assert!(matches!(
            Parser::new("(;SZ[9](;B[aa]);W[bb])").parse(),
            Err(SgfError::Syntax { .. })
        ));
        assert!(matches!(
            Parser::new("(;SZ[9](;B[aa])(W[bb]))").parse(),
            Err(SgfError::Syntax { .. })
        ));
    }

    #[test]
    fn parses_escapes_and_multiple_values() {
        let main_line = Parser::new("(;C[a \\] b\\\\c]AB[aa][bb] \n ;B[cc])").parse().unwrap();
        let root = &main_line[0];
        assert_eq!(root.value("C"), Some("a ] b\\c"));
        assert_eq!(root.properties[1].values, vec!["aa", "bb"]);
    }

    #[test]
    fn syntax_errors() {
        assert!(matches!(Parser::new("").parse(), Err(SgfError::Syntax { .. })));
        assert!(matches!(Parser::new("(;B[aa]").parse(), Err(SgfError::Syntax { .. })));
        assert!(matches!(Parser::new("(;B[aa)").parse(), Err(SgfError::Syntax { .. })));
        assert!(matches!(Parser::new("(;B)").parse(), Err(SgfError::Syntax { .. })));
        assert!(matches!(Parser::new("()").parse(), Err(SgfError::Syntax { .. })));
        assert!(matches!(Parser::new("(;B[aa]x)").parse(), Err(SgfError::Syntax { .. })));
    }

    #[test]
    fn size_values() {
        assert_eq!(parse_size("19"), Ok((19, 19)));
        assert_eq!(parse_size("13:9"), Ok((13, 9)));
        assert!(parse_size("big").is_err());
        assert!(parse_size("300").is_err());
    }

    #[test]
    fn move_values() {
        assert_eq!(parse_move("", 9, 9), Some(Move::Pass));
        assert_eq!(parse_move("tt", 19, 19), Some(Move::Pass));
        assert_eq!(parse_move("tt", 21, 21), Some(Move::Place(Coord::new(19, 19))));
        assert_eq!(parse_move("cd", 9, 9), Some(Move::Place(Coord::new(2, 3))));
        assert_eq!(parse_move("jj", 9, 9), None);
        assert_eq!(parse_move("A1", 9, 9), None);
        assert_eq!(parse_move("abc", 9, 9), None);
    }

    #[test]
    fn coord_letters() {
        assert_eq!(format_coord(Coord::new(0, 0)), "aa");
        assert_eq!(format_coord(Coord::new(18, 3)), "sd");
    }

    #[test]
    fn application_is_escaped() {
        let game = Game::with_config(&GameConfig {
            application: "odd]name".to_string(),
            ..GameConfig::with_size(9)
        })
        .unwrap();
        assert_eq!(game.to_sgf(), "(;GM[1]FF[4]CA[UTF-8]AP[odd\\]name]SZ[9])");
    }
}
