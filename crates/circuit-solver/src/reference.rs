//! The fixed set of reference tiles.
//!
//! Every cell of a level is one of these shapes. Levels name cells by
//! reference, and the renderer picks references to draw cells with. The
//! `filled` variants are the same shapes with fluid in them; a start cell is
//! always filled.

use crate::board::CellRole;
use crate::tile::{Direction, Tile};

/// A named cell shape
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reference {
    pub name: &'static str,
    pub tile: Tile,
    pub role: CellRole,
    pub filled: bool,
}

const U: u8 = 0b1000_0000;
const R: u8 = 0b0100_0000;
const D: u8 = 0b0010_0000;
const L: u8 = 0b0001_0000;

const fn plain(name: &'static str, bits: u8, filled: bool) -> Reference {
    Reference {
        name,
        tile: Tile::from_bits(bits),
        role: CellRole::Plain,
        filled,
    }
}

const fn end(name: &'static str, side: Direction, filled: bool) -> Reference {
    Reference {
        name,
        tile: Tile::single(side),
        role: CellRole::End,
        filled,
    }
}

const fn start(name: &'static str, side: Direction) -> Reference {
    Reference {
        name,
        tile: Tile::single(side),
        role: CellRole::Start,
        filled: true,
    }
}

/// Number of references
pub const REFERENCE_COUNT: usize = 32;

/// Index of the first filled reference
const FIRST_FILLED: usize = 15;

/// All references. Rotated shapes follow their base shape clockwise.
pub const REFERENCES: [Reference; REFERENCE_COUNT] = [
    Reference {
        name: "gap",
        tile: Tile::EMPTY,
        role: CellRole::Gap,
        filled: false,
    },
    plain("empty", 0, false),
    plain("corner_0", U | R, false),
    plain("corner_1", R | D, false),
    plain("corner_2", D | L, false),
    plain("corner_3", U | L, false),
    plain("junction_0", R | D | L, false),
    plain("junction_1", U | D | L, false),
    plain("junction_2", U | R | L, false),
    plain("junction_3", U | R | D, false),
    plain("cross", U | R | D | L, false),
    end("end_0", Direction::Up, false),
    end("end_1", Direction::Right, false),
    end("end_2", Direction::Down, false),
    end("end_3", Direction::Left, false),
    start("start_0", Direction::Up),
    start("start_1", Direction::Right),
    start("start_2", Direction::Down),
    start("start_3", Direction::Left),
    plain("corner_filled_0", U | R, true),
    plain("corner_filled_1", R | D, true),
    plain("corner_filled_2", D | L, true),
    plain("corner_filled_3", U | L, true),
    plain("junction_filled_0", R | D | L, true),
    plain("junction_filled_1", U | D | L, true),
    plain("junction_filled_2", U | R | L, true),
    plain("junction_filled_3", U | R | D, true),
    plain("cross_filled", U | R | D | L, true),
    end("end_filled_0", Direction::Up, true),
    end("end_filled_1", Direction::Right, true),
    end("end_filled_2", Direction::Down, true),
    end("end_filled_3", Direction::Left, true),
];

/// Look a reference up by name.
pub fn by_name(name: &str) -> Option<&'static Reference> {
    REFERENCES.iter().find(|reference| reference.name == name)
}

/// Index of the reference drawing `tile` in the `role` cell, with or without
/// fluid. Rotation counters are ignored.
pub fn reference_index(tile: Tile, role: CellRole, filled: bool) -> Option<usize> {
    let range = if filled {
        FIRST_FILLED..REFERENCE_COUNT
    } else {
        0..FIRST_FILLED
    };
    let normal = tile.normalized();
    range
        .into_iter()
        .find(|&i| REFERENCES[i].tile == normal && REFERENCES[i].role == role)
}

/// The reference drawing `tile` in the `role` cell.
pub fn reference_for(tile: Tile, role: CellRole, filled: bool) -> Option<&'static Reference> {
    reference_index(tile, role, filled).map(|i| &REFERENCES[i])
}
