//! Fluid connectivity of a board.
//!
//! The state is derived from a board in one breadth-first sweep from the
//! start cell and is never patched afterwards.

use smallvec::SmallVec;

use crate::board::{Board, BoardPosition, MAX_CELLS};

/// Array-backed queue that accepts at most `capacity` pushes over its whole
/// life. Popping does not free a slot.
struct SweepQueue {
    slots: SmallVec<[BoardPosition; MAX_CELLS]>,
    capacity: usize,
    head: usize,
}

impl SweepQueue {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: SmallVec::new(),
            capacity,
            head: 0,
        }
    }

    fn push(&mut self, position: BoardPosition) {
        assert!(
            self.slots.len() < self.capacity,
            "sweep queue pushed past its {} slots",
            self.capacity
        );
        self.slots.push(position);
    }

    fn pop(&mut self) -> Option<BoardPosition> {
        let position = self.slots.get(self.head).copied()?;
        self.head += 1;
        Some(position)
    }
}

/// Which cells the fluid reaches, and whether it reaches the end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardState {
    filled: SmallVec<[bool; MAX_CELLS]>,
    solved: bool,
}

impl BoardState {
    /// Flood the board from its start cell.
    pub fn evaluate(board: &Board) -> Self {
        let dimensions = board.dimensions();
        let cells = dimensions.cell_count();
        let mut filled: SmallVec<[bool; MAX_CELLS]> = SmallVec::from_elem(false, cells);
        let mut solved = false;

        let mut open = SweepQueue::with_capacity(cells);
        filled[board.start().index()] = true;
        open.push(board.start());

        while let Some(current) = open.pop() {
            if board.is_end(current) {
                solved = true;
            }
            let tile = board.tile(current);
            for (direction, neighbor) in dimensions.neighbors(current) {
                if !filled[neighbor.index()] && tile.connects_to(board.tile(neighbor), direction) {
                    filled[neighbor.index()] = true;
                    open.push(neighbor);
                }
            }
        }

        Self { filled, solved }
    }

    pub fn is_solved(&self) -> bool {
        self.solved
    }

    pub fn is_filled(&self, position: BoardPosition) -> bool {
        self.filled.get(position.index()).copied().unwrap_or(false)
    }

    pub fn filled_count(&self) -> usize {
        self.filled.iter().filter(|&&f| f).count()
    }
}
