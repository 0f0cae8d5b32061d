//! Level files.
//!
//! A level is JSON naming every cell by its reference tile, row by row:
//!
//! ```json
//! {
//!   "name": "level 7",
//!   "rows": [
//!     ["start_2", "gap", "corner_1", "empty"],
//!     ["junction_0", "cross", "corner_3", "end_0"]
//!   ]
//! }
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::board::{Board, BoardError, BoardPosition, CellRole, Dimensions, MAX_CELLS};
use crate::board_state::BoardState;
use crate::configuration::Configuration;
use crate::reference::{by_name, reference_for};

/// Errors raised while loading a level
#[derive(Debug, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum LevelError {
    #[display("failed to read {}: {source}", path.display())]
    Io { path: PathBuf, source: io::Error },
    #[display("invalid level JSON: {_0}")]
    Json(#[from] serde_json::Error),
    #[display("level has no cells")]
    Empty,
    #[display("row {row} has {found} cells, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[display("unknown tile {name:?} at ({x}, {y})")]
    UnknownTile { x: usize, y: usize, name: String },
    #[display("level has no {role} cell")]
    MissingRole { role: CellRole },
    #[display("level has a second {role} cell at ({x}, {y})")]
    DuplicateRole { role: CellRole, x: usize, y: usize },
    #[display("invalid board: {_0}")]
    Board(#[from] BoardError),
}

/// On-disk form of a level
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub rows: Vec<Vec<String>>,
}

/// A decoded level, ready to solve
#[derive(Debug, Clone)]
pub struct Level {
    pub name: String,
    pub configuration: Configuration,
}

impl LevelFile {
    pub fn from_json(json: &str) -> Result<Self, LevelError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Describe `board` by reference names. Cells the fluid reaches use the
    /// filled references.
    pub fn from_board(name: Option<String>, board: &Board) -> Self {
        Self {
            name,
            rows: describe_board(board),
        }
    }

    /// Decode the cells into a board, checking there is exactly one gap,
    /// start and end.
    pub fn to_board(&self) -> Result<Board, LevelError> {
        let height = self.rows.len();
        let width = self.rows.first().map_or(0, Vec::len);
        if width == 0 {
            return Err(LevelError::Empty);
        }
        for (row, cells) in self.rows.iter().enumerate() {
            if cells.len() != width {
                return Err(LevelError::Ragged {
                    row,
                    expected: width,
                    found: cells.len(),
                });
            }
        }
        if width * height > MAX_CELLS {
            return Err(BoardError::TooLarge {
                cells: width * height,
            }
            .into());
        }
        let dimensions = Dimensions::new(width as u8, height as u8)?;

        let mut tiles = Vec::with_capacity(width * height);
        let mut start = None;
        let mut end = None;
        let mut gap = None;
        for (y, cells) in self.rows.iter().enumerate() {
            for (x, name) in cells.iter().enumerate() {
                let reference = by_name(name).ok_or_else(|| LevelError::UnknownTile {
                    x,
                    y,
                    name: name.clone(),
                })?;
                let position = BoardPosition::new((y * width + x) as u8);
                let slot = match reference.role {
                    CellRole::Gap => Some(&mut gap),
                    CellRole::Start => Some(&mut start),
                    CellRole::End => Some(&mut end),
                    CellRole::Plain => None,
                };
                if let Some(slot) = slot {
                    if slot.is_some() {
                        return Err(LevelError::DuplicateRole {
                            role: reference.role,
                            x,
                            y,
                        });
                    }
                    *slot = Some(position);
                }
                tiles.push(reference.tile);
            }
        }

        let gap = gap.ok_or(LevelError::MissingRole {
            role: CellRole::Gap,
        })?;
        let start = start.ok_or(LevelError::MissingRole {
            role: CellRole::Start,
        })?;
        let end = end.ok_or(LevelError::MissingRole { role: CellRole::End })?;
        Ok(Board::new(dimensions, tiles, start, end, gap)?)
    }
}

/// Reference names of every cell, row by row. A shape missing from the
/// reference set is written as `"?"`.
pub fn describe_board(board: &Board) -> Vec<Vec<String>> {
    let dimensions = board.dimensions();
    let state = BoardState::evaluate(board);
    (0..dimensions.height())
        .map(|y| {
            (0..dimensions.width())
                .filter_map(|x| dimensions.position(x, y))
                .map(|position| {
                    let role = board.role(position);
                    let filled = role == CellRole::Start || state.is_filled(position);
                    reference_for(board.tile(position), role, filled)
                        .map_or_else(|| "?".to_string(), |r| r.name.to_string())
                })
                .collect()
        })
        .collect()
}

/// Parse a level from JSON text. `fallback_name` is used when the file does
/// not name the level.
pub fn parse_level(json: &str, fallback_name: &str) -> Result<Level, LevelError> {
    let file = LevelFile::from_json(json)?;
    let board = file.to_board()?;
    Ok(Level {
        name: file.name.unwrap_or_else(|| fallback_name.to_string()),
        configuration: Configuration::new(board),
    })
}

/// Read and parse a level file. Unnamed levels take the file stem as name.
pub fn load_level(path: &Path) -> Result<Level, LevelError> {
    let json = fs::read_to_string(path).map_err(|source| LevelError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    parse_level(&json, &stem)
}
