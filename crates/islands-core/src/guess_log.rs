//! Shots a player has fired at the opponent's board.

use crate::coordinate::Coordinate;
use crate::game::GameError;
use crate::island::GuessResult;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Hits and misses against one opponent board. The two sets are disjoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuessLog {
    hits: BTreeSet<Coordinate>,
    misses: BTreeSet<Coordinate>,
}

impl GuessLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn hits(&self) -> &BTreeSet<Coordinate> {
        &self.hits
    }

    pub fn misses(&self) -> &BTreeSet<Coordinate> {
        &self.misses
    }

    /// Check whether `coordinate` has already been fired at
    pub fn contains(&self, coordinate: &Coordinate) -> bool {
        self.hits.contains(coordinate) || self.misses.contains(coordinate)
    }

    pub fn record_hit(&self, coordinate: Coordinate) -> Result<GuessLog, GameError> {
        self.record(GuessResult::Hit, coordinate)
    }

    pub fn record_miss(&self, coordinate: Coordinate) -> Result<GuessLog, GameError> {
        self.record(GuessResult::Miss, coordinate)
    }

    /// Record a shot; each coordinate may be fired at once
    pub fn record(&self, result: GuessResult, coordinate: Coordinate) -> Result<GuessLog, GameError> {
        if self.contains(&coordinate) {
            return Err(GameError::DuplicateGuess);
        }

        let mut log = self.clone();
        match result {
            GuessResult::Hit => log.hits.insert(coordinate),
            GuessResult::Miss => log.misses.insert(coordinate),
        };
        Ok(log)
    }
}
