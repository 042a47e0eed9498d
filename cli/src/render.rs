// SPDX-License-Identifier: MIT OR Apache-2.0

//! ASCII board rendering for the CLI.

use goban_core::{Color, Coord, GameView, Stone};

/// Render the board as text, row 1 at the top.
///
/// The most recent stone is wrapped in brackets.
pub fn render_board(view: &GameView) -> String {
    let (width, height) = (view.width, view.height);
    let mut output = String::new();

    let labels = column_labels(width);
    output.push_str(&labels);

    for row in 0..height {
        output.push_str(&format!("{:2} ", row + 1));

        for col in 0..width {
            let coord = Coord::new(col, row);
            output.push(separator(view.last_move, coord));

            let symbol = match view.board[col as usize][row as usize] {
                Stone::Black => '●',
                Stone::White => '○',
                _ if is_star_point(coord, width, height) => '*',
                _ => '+',
            };
            output.push(symbol);
        }

        // closes a highlight on the last column
        output.push(separator(view.last_move, Coord::new(width, row)));
        output.push_str(&format!("{}\n", row + 1));
    }

    output.push_str(&labels);
    output
}

/// Turn, move number and score lines shown under the board
pub fn render_status(view: &GameView) -> String {
    let turn = match view.to_move {
        Some(color) => format!("{} to move", capitalize(color)),
        None => "Game over".to_string(),
    };

    let mut status = format!("Move {}: {}\n", view.move_number, turn);
    for color in [Color::Black, Color::White] {
        let score = view.score(color);
        status.push_str(&format!(
            "{:<6} captures {:>3}  territory {:>3}  total {:>3}\n",
            capitalize(color),
            score.captures,
            score.territory,
            score.total()
        ));
    }
    status
}

fn capitalize(color: Color) -> &'static str {
    match color {
        Color::Black => "Black",
        Color::White => "White",
    }
}

/// Character before the point at `coord`: an opening bracket on the last
/// move, a closing one right after it, a space otherwise
fn separator(last_move: Option<Coord>, coord: Coord) -> char {
    match last_move {
        Some(last) if last == coord => '[',
        Some(last) if last.y == coord.y && last.x + 1 == coord.x => ']',
        _ => ' ',
    }
}

fn column_labels(width: u8) -> String {
    let mut labels = String::from("   ");
    for col in 0..width {
        labels.push(' ');
        labels.push(coord_to_column_char(col, width));
    }
    labels.push('\n');
    labels
}

/// Convert a column index to a column character, skipping I.
///
/// Boards wider than 25 need every letter, so I comes back.
pub fn coord_to_column_char(col: u8, width: u8) -> char {
    if col < 8 || width > 25 {
        (b'A' + col) as char
    } else {
        (b'A' + col + 1) as char // Skip 'I'
    }
}

/// Inverse of [`coord_to_column_char`], case-insensitive
pub fn column_char_to_coord(c: char, width: u8) -> Option<u8> {
    let c = c.to_ascii_uppercase();
    if !c.is_ascii_uppercase() {
        return None;
    }
    let offset = c as u8 - b'A';
    let col = match c {
        _ if width > 25 => offset,
        'A'..='H' => offset,
        'I' => return None,
        _ => offset - 1,
    };
    (col < width).then_some(col)
}

/// Check if a coordinate is a star point on the board
fn is_star_point(coord: Coord, width: u8, height: u8) -> bool {
    if width != height {
        return false;
    }
    let (x, y) = (coord.x, coord.y);

    match width {
        9 => {
            // 9x9 has star points at (2,2), (2,6), (4,4), (6,2), (6,6)
            matches!((x, y), (2, 2) | (2, 6) | (4, 4) | (6, 2) | (6, 6))
        }
        13 => {
            // 13x13 has star points at (3,3), (3,9), (6,6), (9,3), (9,9)
            matches!((x, y), (3, 3) | (3, 9) | (6, 6) | (9, 3) | (9, 9))
        }
        19 => {
            // 19x19 has star points at corners, sides, and center
            matches!(x, 3 | 9 | 15) && matches!(y, 3 | 9 | 15)
        }
        _ => false,
    }
}
