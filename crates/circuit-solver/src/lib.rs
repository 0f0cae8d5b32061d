//! Solver for sliding and rotating pipe puzzles.
//!
//! A level is a grid of pipe tiles with one empty gap cell, a start cell the
//! fluid flows from and an end cell it must reach. Tapping a tile next to the
//! gap slides it into the gap; tapping any other tile turns it a quarter
//! clockwise. The solver finds the shortest tap sequences that connect start
//! to end, ranked by tap count and then by action count.

pub mod board;
pub mod board_state;
pub mod configuration;
pub mod level;
pub mod pruning;
pub mod reference;
pub mod render;
pub mod search_log;
pub mod solution_list;
pub mod solver;
pub mod tile;

// Re-export main types
pub use board::{Board, BoardError, BoardPosition, CellRole, Dimensions};
pub use board_state::BoardState;
pub use configuration::{Configuration, TapKind, MAX_TAPS};
pub use level::{load_level, parse_level, Level, LevelError, LevelFile};
pub use render::{render_board, render_solution, RenderError};
pub use search_log::{NullLog, SearchLog, SearchStats, TableLog};
pub use solution_list::SolutionList;
pub use solver::{solve, SolutionFinder, SolverConfig, SolverResult, TapRange, TapRangeError};
pub use tile::{Direction, Tile};
