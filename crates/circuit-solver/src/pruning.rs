//! Search space pruning rules for the solution finder.
//!
//! Both rules only drop branches whose results the finder would discard or
//! find elsewhere, so the final solution list is unchanged.

use crate::board::BoardPosition;
use crate::configuration::{Configuration, TapKind};
use crate::solution_list::SolutionList;

/// Check if no descendant of `config` can tie or beat the stored solutions.
///
/// Every child takes at least one more tap and never fewer actions, so the
/// best a child can reach is `(taps + 1, actions)`. Bounding on actions alone
/// would be wrong: a branch with more actions but fewer taps still wins.
pub fn is_dominated(config: &Configuration, solutions: &SolutionList) -> bool {
    solutions.dominates(config.tap_count().saturating_add(1), config.action_count())
}

/// Lower bound on the positions worth tapping next.
///
/// Between two slides every tap turns a tile that does not touch the gap.
/// Such turns commute, so only the non-decreasing order of them is explored.
/// Gap neighbors are always admitted, and a slide resets the bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TapCursor(BoardPosition);

impl TapCursor {
    /// Check if tapping `position` from `config` may be skipped.
    pub fn skips(self, config: &Configuration, position: BoardPosition) -> bool {
        // Rule 1: gap neighbors slide and are never skipped
        if config.slides(position) {
            return false;
        }
        // Rule 2: turns only at or after the last turned position
        position < self.0
    }

    /// Cursor for the child reached by tapping `position`.
    pub fn after(kind: TapKind, position: BoardPosition) -> Self {
        match kind {
            TapKind::Rotate => TapCursor(position),
            // Slides reset the cursor
            TapKind::Slide => TapCursor::default(),
        }
    }
}
