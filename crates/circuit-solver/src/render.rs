//! Text rendering of boards and solution replays.
//!
//! Each cell is three characters wide: the tile glyph between two margin
//! characters. Cells the fluid reaches use heavy glyphs, the gap is drawn as
//! `·`, and the cell tapped last is bracketed.

use std::fmt::Write;

use crate::board::{Board, BoardPosition};
use crate::board_state::BoardState;
use crate::configuration::Configuration;
use crate::tile::Tile;

/// A replay tap that the transition rule refused
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("tap {step} at ({x}, {y}) changes nothing")]
pub struct RenderError {
    pub step: usize,
    pub x: u8,
    pub y: u8,
}

fn heavy_glyph(tile: Tile) -> char {
    match tile.bits() >> 4 {
        0b1000 => '╹',
        0b0100 => '╺',
        0b0010 => '╻',
        0b0001 => '╸',
        0b1100 => '┗',
        0b0110 => '┏',
        0b0011 => '┓',
        0b1001 => '┛',
        0b1010 => '┃',
        0b0101 => '━',
        0b0111 => '┳',
        0b1011 => '┫',
        0b1101 => '┻',
        0b1110 => '┣',
        0b1111 => '╋',
        _ => ' ',
    }
}

fn draw(out: &mut String, board: &Board, tapped: Option<BoardPosition>) {
    let dimensions = board.dimensions();
    let state = BoardState::evaluate(board);
    for y in 0..dimensions.height() {
        for x in 0..dimensions.width() {
            let Some(position) = dimensions.position(x, y) else {
                continue;
            };
            let tile = board.tile(position);
            let glyph = if board.is_gap(position) {
                '·'
            } else if state.is_filled(position) {
                heavy_glyph(tile)
            } else {
                tile.to_string().chars().next().unwrap_or(' ')
            };
            let (open, close) = if tapped == Some(position) {
                ('[', ']')
            } else {
                (' ', ' ')
            };
            out.push(open);
            out.push(glyph);
            out.push(close);
        }
        // no trailing margins
        let trimmed = out.trim_end_matches(' ').len();
        out.truncate(trimmed);
        out.push('\n');
    }
}

/// Draw `board`, one line per row.
pub fn render_board(board: &Board) -> String {
    let mut out = String::new();
    draw(&mut out, board, None);
    out
}

/// Replay `taps` from `root`, drawing the starting board and the board
/// after every tap with the tapped cell bracketed.
pub fn render_solution(root: &Configuration, taps: &[BoardPosition]) -> Result<String, RenderError> {
    let dimensions = root.board().dimensions();
    let mut out = String::from("start\n");
    draw(&mut out, root.board(), None);

    let mut current = root.clone();
    for (step, &position) in taps.iter().enumerate() {
        let (x, y) = (dimensions.x(position), dimensions.y(position));
        current = current.tap(position).ok_or(RenderError {
            step: step + 1,
            x,
            y,
        })?;
        // writing into a String cannot fail
        let _ = writeln!(out, "\ntap {}: ({x}, {y})", step + 1);
        draw(&mut out, current.board(), Some(position));
    }

    if BoardState::evaluate(current.board()).is_solved() {
        let _ = writeln!(
            out,
            "\nsolved in {} taps, {} actions",
            current.tap_count(),
            current.action_count()
        );
    }
    Ok(out)
}
