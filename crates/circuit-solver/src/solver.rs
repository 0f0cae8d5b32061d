//! Exhaustive depth-first search for the shortest tap sequences.
//!
//! Every position is tapped at every node until the tap limit. Solved
//! configurations go to a [`SolutionList`], which keeps only the best.

use std::time::{Duration, Instant};

use log::debug;

use crate::board_state::BoardState;
use crate::configuration::{Configuration, MAX_TAPS};
use crate::pruning::{is_dominated, TapCursor};
use crate::solution_list::SolutionList;

/// Tap limit used when none is given
pub const DEFAULT_MAX_TAPS: u8 = 6;

/// Errors raised for an unusable tap range
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum TapRangeError {
    #[display("minimum of {min} taps exceeds maximum of {max}")]
    Inverted { min: u8, max: u8 },
    #[display("tap limit {max} exceeds the supported maximum")]
    TooMany { max: u8 },
}

/// Inclusive bounds on the length of a solution
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TapRange {
    min: u8,
    max: u8,
}

impl TapRange {
    pub fn new(min: u8, max: u8) -> Result<Self, TapRangeError> {
        if max > MAX_TAPS {
            return Err(TapRangeError::TooMany { max });
        }
        if min > max {
            return Err(TapRangeError::Inverted { min, max });
        }
        Ok(Self { min, max })
    }

    /// Order the bounds and clamp them into the supported range.
    pub fn clamped(a: u8, b: u8) -> Self {
        Self {
            min: a.min(b).min(MAX_TAPS),
            max: a.max(b).min(MAX_TAPS),
        }
    }

    pub fn min(&self) -> u8 {
        self.min
    }

    pub fn max(&self) -> u8 {
        self.max
    }
}

impl Default for TapRange {
    fn default() -> Self {
        Self {
            min: 0,
            max: DEFAULT_MAX_TAPS,
        }
    }
}

/// Configuration for the finder
#[derive(Debug, Clone)]
pub struct SolverConfig {
    /// Bounds on solution length
    pub taps: TapRange,
    /// Skip branches that cannot tie the best solution
    pub pruning: bool,
    /// Explore commuting turns in one order only
    pub symmetry_reduction: bool,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            taps: TapRange::default(),
            pruning: true,
            symmetry_reduction: true,
        }
    }
}

impl SolverConfig {
    /// Plain exhaustive search over `taps`.
    pub fn exhaustive(taps: TapRange) -> Self {
        Self {
            taps,
            pruning: false,
            symmetry_reduction: false,
        }
    }
}

/// Result of one search
#[derive(Debug, Clone)]
pub struct SolverResult {
    /// Best solutions, deduplicated
    pub solutions: SolutionList,
    /// Configurations visited, the root included
    pub solutions_checked: u64,
    /// Wall time spent searching
    pub elapsed: Duration,
}

/// Recursive enumerator of tap sequences.
#[derive(Debug, Clone)]
pub struct SolutionFinder {
    config: SolverConfig,
    solutions_checked: u64,
    solutions: SolutionList,
}

impl SolutionFinder {
    pub fn new(config: SolverConfig) -> Self {
        Self {
            config,
            solutions_checked: 0,
            solutions: SolutionList::new(),
        }
    }

    /// Search every tap sequence from `root` within the tap range.
    pub fn find(&mut self, root: &Configuration) {
        self.visit(root, TapCursor::default());
    }

    fn visit(&mut self, config: &Configuration, cursor: TapCursor) {
        self.solutions_checked += 1;

        // Record solutions; too-short ones are neither reported nor cut off
        let taps = config.tap_count();
        if taps >= self.config.taps.min() && BoardState::evaluate(config.board()).is_solved() {
            self.solutions.append(config);
            return;
        }
        // Check tap limit
        if taps >= self.config.taps.max() {
            return;
        }

        // Bound: no child can tie the best solution
        if self.config.pruning && is_dominated(config, &self.solutions) {
            return;
        }

        // Expand every position in index order
        for position in config.board().positions() {
            // Turns below the cursor were tried in another order
            if self.config.symmetry_reduction && cursor.skips(config, position) {
                continue;
            }
            // Failed taps are dead branches
            if let Some((child, kind)) = config.tap_with_kind(position) {
                self.visit(&child, TapCursor::after(kind, position));
            }
        }
    }

    pub fn solutions_checked(&self) -> u64 {
        self.solutions_checked
    }

    pub fn solution_list(&self) -> &SolutionList {
        &self.solutions
    }

    pub fn into_solution_list(self) -> SolutionList {
        self.solutions
    }
}

/// Run a complete search from `root`.
pub fn solve(root: &Configuration, config: &SolverConfig) -> SolverResult {
    debug!(
        "searching {}..={} taps (pruning: {}, symmetry reduction: {})",
        config.taps.min(),
        config.taps.max(),
        config.pruning,
        config.symmetry_reduction
    );
    let start_time = Instant::now();

    let mut finder = SolutionFinder::new(config.clone());
    finder.find(root);

    let elapsed = start_time.elapsed();
    let solutions_checked = finder.solutions_checked();
    debug!(
        "checked {solutions_checked} configurations in {elapsed:?}, best {:?}",
        finder.solution_list().best()
    );

    SolverResult {
        solutions: finder.into_solution_list(),
        solutions_checked,
        elapsed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{tests::small_board, Board, BoardPosition, Dimensions};
    use crate::tile::Tile;

    fn tile(spec: &str) -> Tile {
        Tile::new(
            spec.contains('U'),
            spec.contains('R'),
            spec.contains('D'),
            spec.contains('L'),
        )
    }

    /// start ─ straight ─ end, then the gap; solved before any tap.
    fn create_trivial_level() -> Configuration {
        let board = Board::new(
            Dimensions::new(4, 1).unwrap(),
            [tile("R"), tile("RL"), tile("L"), Tile::EMPTY],
            BoardPosition::new(0),
            BoardPosition::new(2),
            BoardPosition::new(3),
        )
        .unwrap();
        Configuration::new(board)
    }

    /// ```text
    /// start(D) | gap
    /// │        | empty
    /// ┘        | end(L)
    /// ```
    /// One turn of the corner joins start and end.
    fn create_one_turn_level() -> Configuration {
        let board = Board::new(
            Dimensions::new(2, 3).unwrap(),
            [
                tile("D"),
                Tile::EMPTY,
                tile("UD"),
                Tile::EMPTY,
                tile("UL"),
                tile("L"),
            ],
            BoardPosition::new(0),
            BoardPosition::new(5),
            BoardPosition::new(1),
        )
        .unwrap();
        Configuration::new(board)
    }

    /// A full-size level.
    fn create_standard_level() -> Configuration {
        let rows = [
            ["D", "RD", "RL", "DL"],
            ["UD", "RDL", "URDL", ""],
            ["UR", "UL", "UD", "RD"],
            ["RD", "URL", "RL", "UL"],
            ["UD", "", "RD", "DL"],
            ["UR", "RL", "UL", "U"],
        ];
        let tiles = rows.iter().flatten().map(|spec| tile(spec));
        let board = Board::new(
            Dimensions::STANDARD,
            tiles,
            BoardPosition::new(0),
            BoardPosition::new(23),
            BoardPosition::new(7),
        )
        .unwrap();
        Configuration::new(board)
    }

    fn run(level: &Configuration, config: SolverConfig) -> SolverResult {
        solve(level, &config)
    }

    fn exhaustive(min: u8, max: u8) -> SolverConfig {
        SolverConfig::exhaustive(TapRange::new(min, max).unwrap())
    }

    fn same_boards(a: &SolutionList, b: &SolutionList) -> bool {
        a.len() == b.len()
            && a.solutions().iter().all(|x| {
                b.solutions()
                    .iter()
                    .any(|y| x.board().normalized_eq(y.board()))
            })
    }

    #[test]
    fn test_tap_range_validation() {
        assert_eq!(
            TapRange::new(3, 2),
            Err(TapRangeError::Inverted { min: 3, max: 2 })
        );
        assert_eq!(
            TapRange::new(0, 17),
            Err(TapRangeError::TooMany { max: 17 })
        );
        let range = TapRange::clamped(9, 3);
        assert_eq!((range.min(), range.max()), (3, 9));
        let range = TapRange::clamped(0, 40);
        assert_eq!((range.min(), range.max()), (0, MAX_TAPS));
    }

    #[test]
    fn test_trivial_level() {
        let result = run(&create_trivial_level(), exhaustive(0, 4));
        assert_eq!(result.solutions.best(), Some((0, 0)));
        assert_eq!(result.solutions.len(), 1);
        assert!(result.solutions.solutions()[0].taps().is_empty());
        assert_eq!(result.solutions_checked, 1);
    }

    #[test]
    fn test_minimum_taps_suppresses_short_solutions() {
        let result = run(&create_trivial_level(), exhaustive(1, 2));
        assert_eq!(result.solutions.best(), Some((2, 2)));
        assert_eq!(result.solutions.len(), 1);
        assert!(result
            .solutions
            .solutions()
            .iter()
            .all(|solution| solution.tap_count() >= 1));
    }

    #[test]
    fn test_unsolvable_counts_every_configuration() {
        let level = Configuration::new(small_board());

        let result = run(&level, exhaustive(0, 1));
        assert!(result.solutions.is_empty());
        assert_eq!(result.solutions.best(), None);
        assert_eq!(result.solutions_checked, 4);

        let result = run(&level, exhaustive(0, 2));
        assert!(result.solutions.is_empty());
        assert_eq!(result.solutions_checked, 14);

        // nothing to bound against
        let mut config = exhaustive(0, 2);
        config.pruning = true;
        assert_eq!(run(&level, config).solutions_checked, 14);
    }

    #[test]
    fn test_one_turn_level() {
        let result = run(&create_one_turn_level(), exhaustive(0, 3));
        assert_eq!(result.solutions.best(), Some((1, 1)));
        assert_eq!(result.solutions.len(), 1);
        assert_eq!(
            result.solutions.solutions()[0].taps(),
            &[BoardPosition::new(4)]
        );
    }

    #[test]
    fn test_finder_accessors() {
        let mut finder = SolutionFinder::new(exhaustive(0, 1));
        finder.find(&Configuration::new(small_board()));
        assert_eq!(finder.solutions_checked(), 4);
        assert!(finder.solution_list().is_empty());
        assert!(finder.into_solution_list().is_empty());
    }

    #[test]
    fn test_pruning_matches_exhaustive_search() {
        let levels = [
            (create_one_turn_level(), 4),
            (create_trivial_level(), 3),
            (create_standard_level(), 3),
        ];
        for (level, max) in levels {
            for min in [0, 1, 2] {
                let baseline = run(&level, exhaustive(min, max));
                let mut config = exhaustive(min, max);
                config.pruning = true;
                let pruned = run(&level, config);

                assert_eq!(pruned.solutions.best(), baseline.solutions.best());
                let taps = |list: &SolutionList| -> Vec<Vec<BoardPosition>> {
                    list.solutions().iter().map(|s| s.taps().to_vec()).collect()
                };
                assert_eq!(taps(&pruned.solutions), taps(&baseline.solutions));
                assert!(pruned.solutions_checked <= baseline.solutions_checked);
            }
        }
    }

    #[test]
    fn test_symmetry_reduction_matches_exhaustive_search() {
        let levels = [
            (create_one_turn_level(), 4),
            (create_trivial_level(), 4),
            (Configuration::new(small_board()), 4),
            (create_standard_level(), 3),
        ];
        for (level, max) in levels {
            for min in [0, 2] {
                let baseline = run(&level, exhaustive(min, max));
                for pruning in [false, true] {
                    let config = SolverConfig {
                        taps: TapRange::new(min, max).unwrap(),
                        pruning,
                        symmetry_reduction: true,
                    };
                    let reduced = run(&level, config);
                    assert_eq!(reduced.solutions.best(), baseline.solutions.best());
                    assert!(same_boards(&reduced.solutions, &baseline.solutions));
                    assert!(reduced.solutions_checked <= baseline.solutions_checked);
                }
            }
        }
    }

    #[test]
    fn test_repeated_runs_are_identical() {
        let level = create_standard_level();
        let config = SolverConfig {
            taps: TapRange::new(0, 4).unwrap(),
            ..SolverConfig::default()
        };
        let first = run(&level, config.clone());
        let second = run(&level, config);
        assert_eq!(first.solutions.best(), second.solutions.best());
        assert_eq!(first.solutions_checked, second.solutions_checked);
        let boards = |result: &SolverResult| -> Vec<Configuration> {
            result.solutions.solutions().to_vec()
        };
        assert_eq!(boards(&first), boards(&second));
    }

    #[test]
    fn test_failed_taps_are_not_visited() {
        // every visited configuration came from successful taps only, so
        // replaying each stored solution from the root must succeed
        let level = create_standard_level();
        let result = run(&level, exhaustive(0, 3));
        for solution in result.solutions.solutions() {
            let replayed = level.replay(solution.taps()).unwrap();
            assert_eq!(&replayed, solution);
            assert!(BoardState::evaluate(replayed.board()).is_solved());
        }
    }
}
