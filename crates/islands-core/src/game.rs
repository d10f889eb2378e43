//! A complete game: two players and the rules that govern them.
//!
//! [`Game`] is a value. Each operation validates against [`Rules`] first, then runs
//! the placement or guess pipeline, and returns a brand new `Game` only when every
//! step succeeded. A failed operation leaves the caller's `Game` as it was.

use crate::board::Board;
use crate::coordinate::{Coordinate, GameConfig};
use crate::guess_log::GuessLog;
use crate::island::{GuessResult, Island, IslandType};
use crate::rules::{Player, Rules, RulesAction, RulesState, WinStatus};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur when applying an operation to a game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum GameError {
    #[error("Coordinate is off the board")]
    InvalidCoordinate,

    #[error("Unknown island type")]
    InvalidIslandType,

    #[error("Island overlaps another island")]
    OverlappingIsland,

    #[error("Not all islands are positioned")]
    NotAllIslandsPositioned,

    #[error("Operation not allowed at this point in the game")]
    InvalidTransition,

    #[error("Coordinate has already been guessed")]
    DuplicateGuess,
}

/// What a guess did to the opponent's board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuessOutcome {
    pub result: GuessResult,
    pub forested: Option<IslandType>,
    pub win: WinStatus,
}

/// One seat at the table
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerState {
    pub name: Option<String>,
    /// This player's own islands
    pub board: Board,
    /// Shots this player has fired at the opponent
    pub guesses: GuessLog,
}

impl PlayerState {
    fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }
}

/// The complete game state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    pub player1: PlayerState,
    pub player2: PlayerState,
    pub rules: Rules,
    pub config: GameConfig,
}

impl Game {
    /// Start a game with the first player seated on a default-sized board
    pub fn new(player1_name: impl Into<String>) -> Self {
        Self::with_config(player1_name, GameConfig::default())
    }

    pub fn with_config(player1_name: impl Into<String>, config: GameConfig) -> Self {
        Self {
            player1: PlayerState::named(player1_name),
            player2: PlayerState::default(),
            rules: Rules::new(),
            config,
        }
    }

    pub fn player(&self, player: Player) -> &PlayerState {
        match player {
            Player::Player1 => &self.player1,
            Player::Player2 => &self.player2,
        }
    }

    fn player_mut(&mut self, player: Player) -> &mut PlayerState {
        match player {
            Player::Player1 => &mut self.player1,
            Player::Player2 => &mut self.player2,
        }
    }

    pub fn state(&self) -> RulesState {
        self.rules.state
    }

    /// Get the winner if the game is finished: the player whose opponent has no
    /// standing islands left
    pub fn winner(&self) -> Option<Player> {
        if !self.rules.is_over() {
            return None;
        }
        Player::ALL
            .into_iter()
            .find(|p| self.player(p.opponent()).board.is_won())
    }

    fn coordinate(&self, row: i32, col: i32) -> Result<Coordinate, GameError> {
        Coordinate::bounded(row, col, self.config.board_size)
    }

    /// Seat the second player
    pub fn add_player(&self, name: impl Into<String>) -> Result<Game, GameError> {
        let rules = self.rules.check(RulesAction::AddPlayer)?;

        let mut game = self.clone();
        game.player2.name = Some(name.into());
        game.rules = rules;
        Ok(game)
    }

    /// Place (or move) one of `player`'s islands with its upper-left cell at
    /// `(row, col)`. `shape` is the island's shape key, e.g. `"l_shape"`.
    pub fn position_island(
        &self,
        player: Player,
        shape: &str,
        row: i32,
        col: i32,
    ) -> Result<Game, GameError> {
        let rules = self.rules.check(RulesAction::PositionIslands(player))?;
        let upper_left = self.coordinate(row, col)?;
        let island_type: IslandType = shape.parse()?;
        let island = Island::bounded(island_type, upper_left, self.config.board_size)?;
        let board = self
            .player(player)
            .board
            .position_island(island_type, island)?;

        let mut game = self.clone();
        game.player_mut(player).board = board;
        game.rules = rules;
        Ok(game)
    }

    /// Lock in `player`'s islands. Once both players have, guessing begins.
    pub fn set_islands(&self, player: Player) -> Result<Game, GameError> {
        let rules = self.rules.check(RulesAction::SetIslands(player))?;
        if !self.player(player).board.all_positioned() {
            return Err(GameError::NotAllIslandsPositioned);
        }

        let mut game = self.clone();
        game.rules = rules;
        Ok(game)
    }

    /// Fire at `(row, col)` on the opponent's board
    pub fn guess(
        &self,
        player: Player,
        row: i32,
        col: i32,
    ) -> Result<(Game, GuessOutcome), GameError> {
        let rules = self.rules.check(RulesAction::GuessCoordinate(player))?;
        let coordinate = self.coordinate(row, col)?;
        let opponent = player.opponent();

        let shot = self.player(opponent).board.guess(coordinate);
        let guesses = self.player(player).guesses.record(shot.result, coordinate)?;
        let win = WinStatus::from(shot.win);
        let rules = rules.check(RulesAction::WinCheck(win))?;

        let mut game = self.clone();
        game.player_mut(opponent).board = shot.board;
        game.player_mut(player).guesses = guesses;
        game.rules = rules;

        let outcome = GuessOutcome {
            result: shot.result,
            forested: shot.forested,
            win,
        };
        Ok((game, outcome))
    }

    /// Serialize the game to JSON
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
