//! A player's board: one island per type.

use crate::coordinate::Coordinate;
use crate::game::GameError;
use crate::island::{GuessResult, Island, IslandType};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Outcome of firing at a board
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardGuess {
    pub result: GuessResult,
    /// The island this guess finished off, if any
    pub forested: Option<IslandType>,
    pub win: bool,
    pub board: Board,
}

/// One player's islands, keyed by type.
///
/// No two islands on a board share a coordinate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    islands: BTreeMap<IslandType, Island>,
}

impl Board {
    /// Create an empty board
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the island of a given type, if placed
    pub fn island(&self, island_type: IslandType) -> Option<&Island> {
        self.islands.get(&island_type)
    }

    pub fn islands(&self) -> impl Iterator<Item = &Island> {
        self.islands.values()
    }

    /// Place `island` as this board's island of `island_type`.
    ///
    /// An existing island of the same type is replaced and does not count as an
    /// overlap.
    pub fn position_island(
        &self,
        island_type: IslandType,
        island: Island,
    ) -> Result<Board, GameError> {
        let overlaps = self
            .islands
            .iter()
            .any(|(t, existing)| *t != island_type && existing.overlaps(&island));
        if overlaps {
            return Err(GameError::OverlappingIsland);
        }

        let mut board = self.clone();
        board.islands.insert(island_type, island);
        Ok(board)
    }

    /// Check that every island type has been placed
    pub fn all_positioned(&self) -> bool {
        IslandType::ALL.iter().all(|t| self.islands.contains_key(t))
    }

    /// Check whether every island on a fully placed board is forested
    pub fn is_won(&self) -> bool {
        self.all_positioned() && self.islands.values().all(Island::is_forested)
    }

    /// Fire at `coordinate`
    pub fn guess(&self, coordinate: Coordinate) -> BoardGuess {
        let target = self
            .islands
            .iter()
            .find(|(_, island)| island.covers(&coordinate));

        match target {
            None => BoardGuess {
                result: GuessResult::Miss,
                forested: None,
                win: false,
                board: self.clone(),
            },
            Some((&island_type, island)) => {
                let (result, island) = island.guess(coordinate);
                let forested = island.is_forested().then_some(island_type);

                let mut board = self.clone();
                board.islands.insert(island_type, island);
                let win = board.is_won();

                BoardGuess {
                    result,
                    forested,
                    win,
                    board,
                }
            }
        }
    }
}
