//! Grid coordinates.
//!
//! A [`Coordinate`] is a 1-based `(row, col)` position on a square board. Construction
//! is the only validation gate: once a `Coordinate` exists it is known to lie on the
//! board it was validated against.

use crate::game::GameError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Board size used when no [`GameConfig`] says otherwise
pub const DEFAULT_BOARD_SIZE: u8 = 10;

/// Smallest board that still fits every island shape
pub const MIN_BOARD_SIZE: u8 = 3;

/// Largest supported board
pub const MAX_BOARD_SIZE: u8 = 26;

/// Per-game settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawGameConfig")]
pub struct GameConfig {
    /// Number of rows (and columns) on each player's board
    pub board_size: u8,
}

impl GameConfig {
    /// Create a config, clamping the board size into the supported range
    pub fn new(board_size: u8) -> Self {
        Self {
            board_size: board_size.clamp(MIN_BOARD_SIZE, MAX_BOARD_SIZE),
        }
    }
}

/// Wire form of [`GameConfig`], clamped on the way in
#[derive(Deserialize)]
struct RawGameConfig {
    board_size: u8,
}

impl From<RawGameConfig> for GameConfig {
    fn from(raw: RawGameConfig) -> Self {
        GameConfig::new(raw.board_size)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BOARD_SIZE)
    }
}

/// A validated position on the board.
///
/// Both `row` and `col` are in `1..=board_size`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(try_from = "RawCoordinate")]
pub struct Coordinate {
    row: u8,
    col: u8,
}

/// Wire form of [`Coordinate`]; only boards up to [`MAX_BOARD_SIZE`] are accepted
#[derive(Deserialize)]
struct RawCoordinate {
    row: i32,
    col: i32,
}

impl TryFrom<RawCoordinate> for Coordinate {
    type Error = GameError;

    fn try_from(raw: RawCoordinate) -> Result<Self, Self::Error> {
        Coordinate::bounded(raw.row, raw.col, MAX_BOARD_SIZE)
    }
}

impl Coordinate {
    /// Create a coordinate on a board of [`DEFAULT_BOARD_SIZE`]
    pub fn new(row: i32, col: i32) -> Result<Self, GameError> {
        Self::bounded(row, col, DEFAULT_BOARD_SIZE)
    }

    /// Create a coordinate on a board with `board_size` rows and columns
    pub fn bounded(row: i32, col: i32, board_size: u8) -> Result<Self, GameError> {
        let range = 1..=i32::from(board_size);
        if range.contains(&row) && range.contains(&col) {
            Ok(Self {
                row: row as u8,
                col: col as u8,
            })
        } else {
            Err(GameError::InvalidCoordinate)
        }
    }

    pub fn row(&self) -> u8 {
        self.row
    }

    pub fn col(&self) -> u8 {
        self.col
    }

    /// Every coordinate of a board in row-major order
    pub fn all(board_size: u8) -> impl Iterator<Item = Coordinate> {
        (1..=board_size)
            .flat_map(move |row| (1..=board_size).map(move |col| Coordinate { row, col }))
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}
