//! Pipe tiles and the four sides they can connect through.
//!
//! A tile is a single byte:
//!
//! ```text
//! bit:  7 6 5 4 3 2 1 0
//!       U R D L - - C C
//! ```
//!
//! `U`/`R`/`D`/`L` are the open sides and `CC` counts how many times the tile
//! has been turned. Whether a cell is the start, the end or the gap is a
//! property of the board, not of the tile.

use std::fmt;

const CONNECTION_BITS: u8 = 0b1111_0000;
const ROTATION_BITS: u8 = 0b0000_0011;

/// Maximum rotations a single tile may receive through taps.
pub const MAX_ROTATIONS: u8 = 3;

/// One side of a tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    /// All directions, clockwise from up.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
    ];

    /// The connection bit for this side
    pub const fn bit(self) -> u8 {
        match self {
            Direction::Up => 0b1000_0000,
            Direction::Right => 0b0100_0000,
            Direction::Down => 0b0010_0000,
            Direction::Left => 0b0001_0000,
        }
    }

    pub fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Right => Direction::Left,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
        }
    }
}

/// A pipe tile: open sides plus a rotation counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Tile(u8);

impl Tile {
    /// The tile with no open sides. The gap cell always holds it.
    pub const EMPTY: Tile = Tile(0);

    /// The tile open on all four sides.
    pub const CROSS: Tile = Tile(CONNECTION_BITS);

    pub fn new(up: bool, right: bool, down: bool, left: bool) -> Self {
        let mut bits = 0;
        for (open, direction) in [up, right, down, left].into_iter().zip(Direction::ALL) {
            if open {
                bits |= direction.bit();
            }
        }
        Tile(bits)
    }

    /// A tile open on exactly one side, the shape of start and end cells.
    pub const fn single(direction: Direction) -> Self {
        Tile(direction.bit())
    }

    /// A fresh tile from the upper connection nibble of `bits`.
    pub const fn from_bits(bits: u8) -> Self {
        Tile(bits & CONNECTION_BITS)
    }

    pub fn bits(self) -> u8 {
        self.0
    }

    pub fn connects(self, direction: Direction) -> bool {
        self.0 & direction.bit() != 0
    }

    /// Whether fluid flows from `self` into `partner`, which lies on the
    /// `direction` side of `self`.
    pub fn connects_to(self, partner: Tile, direction: Direction) -> bool {
        self.connects(direction) && partner.connects(direction.opposite())
    }

    pub fn connection_count(self) -> u32 {
        (self.0 & CONNECTION_BITS).count_ones()
    }

    pub fn rotations(self) -> u8 {
        self.0 & ROTATION_BITS
    }

    /// Empty and cross tiles look the same from every orientation.
    pub fn can_rotate(self) -> bool {
        let connections = self.0 & CONNECTION_BITS;
        connections != 0 && connections != CONNECTION_BITS
    }

    /// Whether a tap may still turn this tile. A fourth turn would restore
    /// the starting orientation, so it is refused.
    pub fn can_rotate_again(self) -> bool {
        self.can_rotate() && self.rotations() < MAX_ROTATIONS
    }

    /// Turn the tile a quarter clockwise: up becomes right, right becomes
    /// down, down becomes left and left becomes up. The counter wraps after
    /// four turns.
    pub fn rotated(self) -> Option<Tile> {
        if !self.can_rotate() {
            return None;
        }
        let t = self.0;
        let up = (t << 3) & 0b1000_0000;
        let rest = (t >> 1) & 0b0111_0000;
        let counter = t.wrapping_add(1) & ROTATION_BITS;
        Some(Tile(up | rest | counter))
    }

    /// The tile without its rotation counter.
    pub fn normalized(self) -> Tile {
        Tile(self.0 & !ROTATION_BITS)
    }
}

impl fmt::Display for Tile {
    /// Draws the tile as a single box-drawing glyph.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let glyph = match self.0 >> 4 {
            0b0000 => ' ',
            0b1000 => '╵',
            0b0100 => '╶',
            0b0010 => '╷',
            0b0001 => '╴',
            0b1100 => '└',
            0b0110 => '┌',
            0b0011 => '┐',
            0b1001 => '┘',
            0b1010 => '│',
            0b0101 => '─',
            0b0111 => '┬',
            0b1011 => '┤',
            0b1101 => '┴',
            0b1110 => '├',
            _ => '┼',
        };
        write!(f, "{glyph}")
    }
}
