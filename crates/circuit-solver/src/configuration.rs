//! Search-tree nodes and the tap transition.
//!
//! A tap on a cell next to the gap slides that cell's tile into the gap.
//! Any other tap turns the tile in place, if it may still turn. Taps that do
//! neither change nothing and are reported as failures.

use smallvec::SmallVec;

use crate::board::{Board, BoardPosition};

/// Longest tap sequence the solver handles
pub const MAX_TAPS: u8 = 16;

/// Tap history; a full-length search never spills to the heap.
pub type TapVec = SmallVec<[BoardPosition; MAX_TAPS as usize]>;

/// What a successful tap did to the board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TapKind {
    /// The tapped tile moved into the gap.
    Slide,
    /// The tapped tile turned a quarter clockwise.
    Rotate,
}

/// A board together with the taps that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Configuration {
    board: Board,
    taps: TapVec,
    action_count: u8,
}

impl Configuration {
    /// The untouched level.
    pub fn new(board: Board) -> Self {
        Self {
            board,
            taps: TapVec::new(),
            action_count: 0,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn taps(&self) -> &[BoardPosition] {
        &self.taps
    }

    pub fn tap_count(&self) -> u8 {
        self.taps.len() as u8
    }

    /// Taps that changed something a player can see. Sliding an empty or
    /// cross tile is free.
    pub fn action_count(&self) -> u8 {
        self.action_count
    }

    /// Whether `position` would slide rather than turn.
    pub fn slides(&self, position: BoardPosition) -> bool {
        self.board.is_next_to_gap(position)
    }

    /// Apply one tap, producing the next configuration, or `None` when the
    /// tap changes nothing.
    pub fn tap(&self, position: BoardPosition) -> Option<Configuration> {
        self.tap_with_kind(position).map(|(next, _)| next)
    }

    /// Like [`Configuration::tap`], also telling what the tap did.
    pub fn tap_with_kind(&self, position: BoardPosition) -> Option<(Configuration, TapKind)> {
        if self.tap_count() >= MAX_TAPS || !self.board.dimensions().contains(position) {
            return None;
        }

        let tile = self.board.tile(position);
        let kind = if self.slides(position) {
            TapKind::Slide
        } else if tile.can_rotate_again() {
            TapKind::Rotate
        } else {
            return None;
        };

        let mut next = self.clone();
        next.taps.push(position);
        match kind {
            TapKind::Slide => {
                if !next.board.swap_with_gap(position) {
                    return None;
                }
                if tile.can_rotate() {
                    next.action_count += 1;
                }
            }
            TapKind::Rotate => {
                if !next.board.rotate(position) {
                    return None;
                }
                next.action_count += 1;
            }
        }
        Some((next, kind))
    }

    /// Apply `taps` in order. Returns `None` at the first failing tap.
    pub fn replay(&self, taps: &[BoardPosition]) -> Option<Configuration> {
        let mut current = self.clone();
        for &position in taps {
            current = current.tap(position)?;
        }
        Some(current)
    }
}
