//! The puzzle board: a grid of tiles with a start, an end and a gap.
//!
//! Positions are single indices in row-major order. The width is a power of
//! two so a position splits into column and row with a mask and a shift.

use std::fmt;

use smallvec::SmallVec;

use crate::tile::{Direction, Tile};

/// Columns of a standard level
pub const STANDARD_WIDTH: u8 = 4;
/// Rows of a standard level
pub const STANDARD_HEIGHT: u8 = 6;
/// Largest supported board, in cells
pub const MAX_CELLS: usize = 64;

/// Tiles of a standard board fit inline.
pub(crate) type TileVec = SmallVec<[Tile; 24]>;

/// What a cell means to the puzzle, independent of its tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum CellRole {
    #[display("gap")]
    Gap,
    #[display("start")]
    Start,
    #[display("end")]
    End,
    #[display("plain")]
    Plain,
}

/// Errors raised while assembling a board
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum BoardError {
    #[display("board width {width} is not a power of two")]
    InvalidWidth { width: u8 },
    #[display("board height must be at least 1")]
    InvalidHeight,
    #[display("board of {cells} cells is too large")]
    TooLarge { cells: usize },
    #[display("expected {expected} tiles, found {found}")]
    TileCount { expected: usize, found: usize },
    #[display("{role} cell {index} is outside the board")]
    OutOfBounds { role: CellRole, index: usize },
    #[display("{first} and {second} share cell {index}")]
    SharedCell {
        first: CellRole,
        second: CellRole,
        index: usize,
    },
    #[display("gap cell {index} holds a tile")]
    GapNotEmpty { index: usize },
}

/// Width and height of a board, with the shift that splits an index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Dimensions {
    width: u8,
    height: u8,
    shift: u8,
}

impl Dimensions {
    /// The 4×6 layout of every shipped level.
    pub const STANDARD: Dimensions = Dimensions {
        width: STANDARD_WIDTH,
        height: STANDARD_HEIGHT,
        shift: 2,
    };

    pub fn new(width: u8, height: u8) -> Result<Self, BoardError> {
        if !width.is_power_of_two() {
            return Err(BoardError::InvalidWidth { width });
        }
        if height == 0 {
            return Err(BoardError::InvalidHeight);
        }
        let cells = width as usize * height as usize;
        if cells > MAX_CELLS {
            return Err(BoardError::TooLarge { cells });
        }
        Ok(Self {
            width,
            height,
            shift: width.trailing_zeros() as u8,
        })
    }

    pub fn width(&self) -> u8 {
        self.width
    }

    pub fn height(&self) -> u8 {
        self.height
    }

    pub fn cell_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    pub fn contains(&self, position: BoardPosition) -> bool {
        position.index() < self.cell_count()
    }

    pub fn position(&self, x: u8, y: u8) -> Option<BoardPosition> {
        if x < self.width && y < self.height {
            Some(BoardPosition((y << self.shift) | x))
        } else {
            None
        }
    }

    pub fn x(&self, position: BoardPosition) -> u8 {
        position.0 & (self.width - 1)
    }

    pub fn y(&self, position: BoardPosition) -> u8 {
        position.0 >> self.shift
    }

    /// The cell on the `direction` side of `position`, if the board has one.
    pub fn neighbor(&self, position: BoardPosition, direction: Direction) -> Option<BoardPosition> {
        let index = position.0;
        let width = self.width;
        match direction {
            Direction::Up => (index >= width).then(|| BoardPosition(index - width)),
            Direction::Right => {
                (self.x(position) < width - 1).then(|| BoardPosition(index + 1))
            }
            Direction::Down => ((index as usize) < self.cell_count() - width as usize)
                .then(|| BoardPosition(index + width)),
            Direction::Left => (self.x(position) > 0).then(|| BoardPosition(index - 1)),
        }
    }

    /// Existing neighbors of `position`, clockwise from up.
    pub fn neighbors(
        &self,
        position: BoardPosition,
    ) -> impl Iterator<Item = (Direction, BoardPosition)> + '_ {
        Direction::ALL
            .into_iter()
            .filter_map(move |direction| Some((direction, self.neighbor(position, direction)?)))
    }

    pub fn positions(&self) -> impl Iterator<Item = BoardPosition> {
        (0..self.cell_count() as u8).map(BoardPosition)
    }
}

impl Default for Dimensions {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// Index of a cell, row-major.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct BoardPosition(u8);

impl BoardPosition {
    pub fn new(index: u8) -> Self {
        Self(index)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for BoardPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A grid of tiles with exactly one start, one end and one gap.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    dimensions: Dimensions,
    tiles: TileVec,
    start: BoardPosition,
    end: BoardPosition,
    gap: BoardPosition,
}

impl Board {
    /// Assemble a board, checking the role invariants.
    pub fn new(
        dimensions: Dimensions,
        tiles: impl IntoIterator<Item = Tile>,
        start: BoardPosition,
        end: BoardPosition,
        gap: BoardPosition,
    ) -> Result<Self, BoardError> {
        let tiles: TileVec = tiles.into_iter().collect();
        let expected = dimensions.cell_count();
        if tiles.len() != expected {
            return Err(BoardError::TileCount {
                expected,
                found: tiles.len(),
            });
        }

        let roles = [
            (CellRole::Start, start),
            (CellRole::End, end),
            (CellRole::Gap, gap),
        ];
        for (role, position) in roles {
            if !dimensions.contains(position) {
                return Err(BoardError::OutOfBounds {
                    role,
                    index: position.index(),
                });
            }
        }
        for (i, &(first, a)) in roles.iter().enumerate() {
            for &(second, b) in &roles[i + 1..] {
                if a == b {
                    return Err(BoardError::SharedCell {
                        first,
                        second,
                        index: a.index(),
                    });
                }
            }
        }
        if tiles[gap.index()].normalized() != Tile::EMPTY {
            return Err(BoardError::GapNotEmpty { index: gap.index() });
        }

        Ok(Self {
            dimensions,
            tiles,
            start,
            end,
            gap,
        })
    }

    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    /// The tile at `position`. Cells outside the board read as empty.
    pub fn tile(&self, position: BoardPosition) -> Tile {
        self.tiles
            .get(position.index())
            .copied()
            .unwrap_or(Tile::EMPTY)
    }

    pub fn start(&self) -> BoardPosition {
        self.start
    }

    pub fn end(&self) -> BoardPosition {
        self.end
    }

    pub fn gap(&self) -> BoardPosition {
        self.gap
    }

    pub fn is_start(&self, position: BoardPosition) -> bool {
        self.start == position
    }

    pub fn is_end(&self, position: BoardPosition) -> bool {
        self.end == position
    }

    pub fn is_gap(&self, position: BoardPosition) -> bool {
        self.gap == position
    }

    pub fn role(&self, position: BoardPosition) -> CellRole {
        if self.is_gap(position) {
            CellRole::Gap
        } else if self.is_start(position) {
            CellRole::Start
        } else if self.is_end(position) {
            CellRole::End
        } else {
            CellRole::Plain
        }
    }

    pub fn positions(&self) -> impl Iterator<Item = BoardPosition> {
        self.dimensions.positions()
    }

    /// Whether `position` touches the gap.
    pub fn is_next_to_gap(&self, position: BoardPosition) -> bool {
        self.dimensions
            .neighbors(position)
            .any(|(_, neighbor)| neighbor == self.gap)
    }

    /// Move the tile at `position` into the gap's cell. The gap takes its
    /// place, and a start or end tile carries its role along. Returns
    /// `false`, leaving the board untouched, unless `position` touches the
    /// gap.
    pub fn swap_with_gap(&mut self, position: BoardPosition) -> bool {
        if !self.dimensions.contains(position) || !self.is_next_to_gap(position) {
            return false;
        }
        let old_gap = self.gap;
        self.tiles.swap(position.index(), old_gap.index());
        if self.start == position {
            self.start = old_gap;
        }
        if self.end == position {
            self.end = old_gap;
        }
        self.gap = position;
        true
    }

    /// Turn the tile at `position`. Returns `false`, leaving the board
    /// untouched, when the tile may not turn again or lies off the board.
    pub fn rotate(&mut self, position: BoardPosition) -> bool {
        let Some(&tile) = self.tiles.get(position.index()) else {
            return false;
        };
        if !tile.can_rotate_again() {
            return false;
        }
        match tile.rotated() {
            Some(turned) => {
                self.tiles[position.index()] = turned;
                true
            }
            None => false,
        }
    }

    /// Equality ignoring rotation counters.
    pub fn normalized_eq(&self, other: &Board) -> bool {
        self.dimensions == other.dimensions
            && self.start == other.start
            && self.end == other.end
            && self.gap == other.gap
            && self
                .tiles
                .iter()
                .zip(&other.tiles)
                .all(|(a, b)| a.normalized() == b.normalized())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Six cells, two wide:
    ///
    /// ```text
    /// 0 start(down) | 1 gap
    /// 2 cross       | 3 empty
    /// 4 cross       | 5 end(up)
    /// ```
    pub(crate) fn small_board() -> Board {
        let dims = Dimensions::new(2, 3).unwrap();
        Board::new(
            dims,
            [
                Tile::single(Direction::Down),
                Tile::EMPTY,
                Tile::CROSS,
                Tile::EMPTY,
                Tile::CROSS,
                Tile::single(Direction::Up),
            ],
            BoardPosition::new(0),
            BoardPosition::new(5),
            BoardPosition::new(1),
        )
        .unwrap()
    }

    #[test]
    fn test_dimensions_reject_bad_sizes() {
        assert_eq!(
            Dimensions::new(3, 2),
            Err(BoardError::InvalidWidth { width: 3 })
        );
        assert_eq!(Dimensions::new(4, 0), Err(BoardError::InvalidHeight));
        assert_eq!(
            Dimensions::new(16, 5),
            Err(BoardError::TooLarge { cells: 80 })
        );
    }

    #[test]
    fn test_coordinates() {
        let dims = Dimensions::STANDARD;
        assert_eq!(dims.cell_count(), 24);
        let position = dims.position(3, 2).unwrap();
        assert_eq!(position.index(), 11);
        assert_eq!(dims.x(position), 3);
        assert_eq!(dims.y(position), 2);
        assert_eq!(dims.position(4, 0), None);
        assert_eq!(dims.position(0, 6), None);
    }

    #[test]
    fn test_neighbors_at_edges() {
        let dims = Dimensions::STANDARD;
        let corner = BoardPosition::new(0);
        assert_eq!(dims.neighbor(corner, Direction::Up), None);
        assert_eq!(dims.neighbor(corner, Direction::Left), None);
        assert_eq!(
            dims.neighbor(corner, Direction::Right),
            Some(BoardPosition::new(1))
        );
        assert_eq!(
            dims.neighbor(corner, Direction::Down),
            Some(BoardPosition::new(4))
        );

        let last = BoardPosition::new(23);
        assert_eq!(dims.neighbor(last, Direction::Down), None);
        assert_eq!(dims.neighbor(last, Direction::Right), None);
        assert_eq!(dims.neighbors(last).count(), 2);

        let row_end = BoardPosition::new(7);
        assert_eq!(dims.neighbor(row_end, Direction::Right), None);
        assert_eq!(dims.neighbors(BoardPosition::new(5)).count(), 4);
    }

    #[test]
    fn test_board_rejects_bad_roles() {
        let dims = Dimensions::new(2, 1).unwrap();
        let tiles = [Tile::EMPTY, Tile::EMPTY];
        assert_eq!(
            Board::new(
                dims,
                tiles,
                BoardPosition::new(0),
                BoardPosition::new(0),
                BoardPosition::new(1),
            ),
            Err(BoardError::SharedCell {
                first: CellRole::Start,
                second: CellRole::End,
                index: 0,
            })
        );
        assert_eq!(
            Board::new(
                dims,
                tiles,
                BoardPosition::new(0),
                BoardPosition::new(1),
                BoardPosition::new(2),
            ),
            Err(BoardError::OutOfBounds {
                role: CellRole::Gap,
                index: 2,
            })
        );
        assert_eq!(
            Board::new(
                dims,
                [Tile::EMPTY],
                BoardPosition::new(0),
                BoardPosition::new(1),
                BoardPosition::new(2),
            ),
            Err(BoardError::TileCount {
                expected: 2,
                found: 1,
            })
        );
    }

    #[test]
    fn test_gap_must_be_empty() {
        let dims = Dimensions::new(4, 1).unwrap();
        let result = Board::new(
            dims,
            [Tile::CROSS, Tile::CROSS, Tile::CROSS, Tile::CROSS],
            BoardPosition::new(0),
            BoardPosition::new(1),
            BoardPosition::new(2),
        );
        assert_eq!(result, Err(BoardError::GapNotEmpty { index: 2 }));
    }

    #[test]
    fn test_swap_with_gap_moves_start() {
        let mut board = small_board();
        assert!(board.swap_with_gap(BoardPosition::new(0)));
        assert_eq!(board.gap(), BoardPosition::new(0));
        assert_eq!(board.start(), BoardPosition::new(1));
        assert_eq!(board.tile(BoardPosition::new(1)), Tile::single(Direction::Down));
        assert_eq!(board.tile(BoardPosition::new(0)), Tile::EMPTY);
        assert_eq!(board.end(), BoardPosition::new(5));
    }

    #[test]
    fn test_swap_with_gap_moves_end() {
        let mut board = small_board();
        assert!(board.swap_with_gap(BoardPosition::new(3)));
        assert!(board.swap_with_gap(BoardPosition::new(5)));
        assert_eq!(board.end(), BoardPosition::new(3));
        assert_eq!(board.gap(), BoardPosition::new(5));
        assert_eq!(board.role(BoardPosition::new(3)), CellRole::End);
    }

    #[test]
    fn test_swap_with_gap_refuses_distant_cells() {
        let mut board = small_board();
        // diagonal to the gap, two rows below it, off the board
        for index in [2, 5, 6, 200] {
            assert!(!board.swap_with_gap(BoardPosition::new(index)));
        }
        assert_eq!(board, small_board());
    }

    #[test]
    fn test_off_board_cells_are_inert() {
        let mut board = small_board();
        let outside = BoardPosition::new(200);
        assert_eq!(board.tile(outside), Tile::EMPTY);
        assert!(!board.rotate(outside));
        assert_eq!(board, small_board());
    }

    #[test]
    fn test_rotate_stops_after_three_turns() {
        let mut board = small_board();
        let end = board.end();
        for _ in 0..3 {
            assert!(board.rotate(end));
        }
        assert!(!board.rotate(end));
        assert_eq!(board.tile(end).normalized(), Tile::single(Direction::Left));
        assert!(!board.rotate(BoardPosition::new(2)));
    }

    #[test]
    fn test_normalized_eq() {
        let a = small_board();
        let mut b = small_board();
        assert!(a.normalized_eq(&a));
        assert!(a.normalized_eq(&b));

        b.rotate(b.end());
        assert!(!a.normalized_eq(&b));
        assert!(!b.normalized_eq(&a));

        let mut straight = small_board();
        let mut turned = small_board();
        straight.tiles[3] = Tile::new(true, false, true, false);
        turned.tiles[3] = Tile::new(true, false, true, false);
        turned.rotate(BoardPosition::new(3));
        turned.rotate(BoardPosition::new(3));
        assert_ne!(straight, turned);
        assert!(straight.normalized_eq(&turned));
        assert!(turned.normalized_eq(&straight));
    }
}
