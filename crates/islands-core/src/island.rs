//! Island shapes and island instances.
//!
//! Each island type has a fixed shape, described as `(row, col)` offsets from the
//! island's upper-left anchor. An [`Island`] is one placed instance of a shape,
//! tracking which of its coordinates have been hit.

use crate::coordinate::{Coordinate, DEFAULT_BOARD_SIZE};
use crate::game::GameError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// The five island shapes each player places
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum IslandType {
    /// 2x2 block
    Square,
    /// Ring-like shape with a gap in the middle
    Atoll,
    /// Single cell
    Dot,
    /// Three cells down and one to the right
    LShape,
    /// Two offset pairs
    SShape,
}

impl IslandType {
    /// All island types, in the order they are listed on a board
    pub const ALL: [IslandType; 5] = [
        IslandType::Square,
        IslandType::Atoll,
        IslandType::Dot,
        IslandType::LShape,
        IslandType::SShape,
    ];

    /// Offsets `(row, col)` from the upper-left anchor
    pub fn offsets(&self) -> &'static [(i32, i32)] {
        match self {
            IslandType::Square => &[(0, 0), (0, 1), (1, 0), (1, 1)],
            IslandType::Atoll => &[(0, 0), (0, 1), (1, 1), (0, 2), (2, 1)],
            IslandType::Dot => &[(0, 0)],
            IslandType::LShape => &[(0, 0), (1, 0), (2, 0), (2, 1)],
            IslandType::SShape => &[(0, 1), (0, 2), (1, 0), (1, 1)],
        }
    }

    /// Shape key used on the wire
    pub fn key(&self) -> &'static str {
        match self {
            IslandType::Square => "square",
            IslandType::Atoll => "atoll",
            IslandType::Dot => "dot",
            IslandType::LShape => "l_shape",
            IslandType::SShape => "s_shape",
        }
    }
}

impl FromStr for IslandType {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        IslandType::ALL
            .into_iter()
            .find(|t| t.key() == s)
            .ok_or(GameError::InvalidIslandType)
    }
}

impl fmt::Display for IslandType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Result of a guess against a single island or board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GuessResult {
    Hit,
    Miss,
}

/// A placed island.
///
/// `hit_coordinates` is always a subset of `coordinates`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawIsland")]
pub struct Island {
    island_type: IslandType,
    coordinates: BTreeSet<Coordinate>,
    hit_coordinates: BTreeSet<Coordinate>,
}

/// Wire form of [`Island`]
#[derive(Deserialize)]
struct RawIsland {
    island_type: IslandType,
    coordinates: BTreeSet<Coordinate>,
    hit_coordinates: BTreeSet<Coordinate>,
}

impl TryFrom<RawIsland> for Island {
    type Error = GameError;

    fn try_from(raw: RawIsland) -> Result<Self, Self::Error> {
        if raw.coordinates.len() != raw.island_type.offsets().len() {
            return Err(GameError::InvalidCoordinate);
        }
        if !raw.hit_coordinates.is_subset(&raw.coordinates) {
            return Err(GameError::InvalidCoordinate);
        }
        Ok(Self {
            island_type: raw.island_type,
            coordinates: raw.coordinates,
            hit_coordinates: raw.hit_coordinates,
        })
    }
}

impl Island {
    /// Place an island on a board of [`DEFAULT_BOARD_SIZE`]
    pub fn new(island_type: IslandType, upper_left: Coordinate) -> Result<Self, GameError> {
        Self::bounded(island_type, upper_left, DEFAULT_BOARD_SIZE)
    }

    /// Place an island with its shape anchored at `upper_left`.
    ///
    /// Fails with [`GameError::InvalidCoordinate`] as soon as one cell of the shape
    /// falls off the board.
    pub fn bounded(
        island_type: IslandType,
        upper_left: Coordinate,
        board_size: u8,
    ) -> Result<Self, GameError> {
        let row = i32::from(upper_left.row());
        let col = i32::from(upper_left.col());

        let coordinates = island_type
            .offsets()
            .iter()
            .map(|(dr, dc)| Coordinate::bounded(row + dr, col + dc, board_size))
            .collect::<Result<BTreeSet<_>, _>>()?;

        Ok(Self {
            island_type,
            coordinates,
            hit_coordinates: BTreeSet::new(),
        })
    }

    pub fn island_type(&self) -> IslandType {
        self.island_type
    }

    pub fn coordinates(&self) -> &BTreeSet<Coordinate> {
        &self.coordinates
    }

    pub fn hit_coordinates(&self) -> &BTreeSet<Coordinate> {
        &self.hit_coordinates
    }

    /// Check whether this island occupies `coordinate`
    pub fn covers(&self, coordinate: &Coordinate) -> bool {
        self.coordinates.contains(coordinate)
    }

    /// Check whether two islands share any coordinate
    pub fn overlaps(&self, other: &Island) -> bool {
        !self.coordinates.is_disjoint(&other.coordinates)
    }

    /// An island is forested once every coordinate has been hit
    pub fn is_forested(&self) -> bool {
        self.hit_coordinates == self.coordinates
    }

    /// Fire at `coordinate`, returning the result and the updated island
    pub fn guess(&self, coordinate: Coordinate) -> (GuessResult, Island) {
        if self.covers(&coordinate) {
            let mut hit = self.clone();
            hit.hit_coordinates.insert(coordinate);
            (GuessResult::Hit, hit)
        } else {
            (GuessResult::Miss, self.clone())
        }
    }
}
