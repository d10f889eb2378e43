//! Game phase state machine.
//!
//! [`Rules`] decides which operations are legal at any point in a game. Every game
//! operation is checked here first; only when [`Rules::check`] succeeds does the game
//! touch boards or guess logs.
//!
//! ```text
//! Initialized -> PlayersSet -> Player1Turn <-> Player2Turn -> GameOver
//! ```

use crate::game::GameError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the two seats in a game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Player {
    Player1,
    Player2,
}

impl Player {
    pub const ALL: [Player; 2] = [Player::Player1, Player::Player2];

    pub fn opponent(self) -> Player {
        match self {
            Player::Player1 => Player::Player2,
            Player::Player2 => Player::Player1,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::Player1 => f.write_str("player1"),
            Player::Player2 => f.write_str("player2"),
        }
    }
}

/// Phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RulesState {
    /// Waiting for the second player
    Initialized,
    /// Both players present, placing islands
    PlayersSet,
    Player1Turn,
    Player2Turn,
    /// Terminal
    GameOver,
}

/// Whether a player has locked in their islands
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IslandsStatus {
    #[default]
    NotSet,
    Set,
}

/// Outcome of the win check after a guess
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WinStatus {
    Win,
    NoWin,
}

impl From<bool> for WinStatus {
    fn from(win: bool) -> Self {
        if win {
            WinStatus::Win
        } else {
            WinStatus::NoWin
        }
    }
}

/// Operations the state machine gates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RulesAction {
    AddPlayer,
    PositionIslands(Player),
    SetIslands(Player),
    GuessCoordinate(Player),
    WinCheck(WinStatus),
}

/// The game's rule state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rules {
    pub state: RulesState,
    pub player1: IslandsStatus,
    pub player2: IslandsStatus,
}

impl Default for Rules {
    fn default() -> Self {
        Self::new()
    }
}

impl Rules {
    /// Fresh rules for a game waiting on its second player
    pub fn new() -> Self {
        Self {
            state: RulesState::Initialized,
            player1: IslandsStatus::NotSet,
            player2: IslandsStatus::NotSet,
        }
    }

    /// Island status of a given player
    pub fn islands(&self, player: Player) -> IslandsStatus {
        match player {
            Player::Player1 => self.player1,
            Player::Player2 => self.player2,
        }
    }

    fn with_islands(mut self, player: Player, status: IslandsStatus) -> Self {
        match player {
            Player::Player1 => self.player1 = status,
            Player::Player2 => self.player2 = status,
        }
        self
    }

    fn with_state(mut self, state: RulesState) -> Self {
        self.state = state;
        self
    }

    pub fn is_over(&self) -> bool {
        self.state == RulesState::GameOver
    }

    /// Player whose turn it is, if the game is in its guessing phase
    pub fn current_turn(&self) -> Option<Player> {
        match self.state {
            RulesState::Player1Turn => Some(Player::Player1),
            RulesState::Player2Turn => Some(Player::Player2),
            _ => None,
        }
    }

    /// Check `action` against the current state, returning the rules after it.
    pub fn check(&self, action: RulesAction) -> Result<Rules, GameError> {
        use RulesAction::*;
        use RulesState::*;

        match (self.state, action) {
            (Initialized, AddPlayer) => Ok(self.with_state(PlayersSet)),

            (PlayersSet, PositionIslands(player)) => match self.islands(player) {
                IslandsStatus::NotSet => Ok(*self),
                IslandsStatus::Set => Err(GameError::InvalidTransition),
            },

            (PlayersSet, SetIslands(player)) => {
                let rules = self.with_islands(player, IslandsStatus::Set);
                if rules.player1 == IslandsStatus::Set && rules.player2 == IslandsStatus::Set {
                    Ok(rules.with_state(Player1Turn))
                } else {
                    Ok(rules)
                }
            }

            (Player1Turn, GuessCoordinate(Player::Player1)) => Ok(self.with_state(Player2Turn)),
            (Player2Turn, GuessCoordinate(Player::Player2)) => Ok(self.with_state(Player1Turn)),

            (Player1Turn | Player2Turn, WinCheck(WinStatus::Win)) => Ok(self.with_state(GameOver)),
            (Player1Turn | Player2Turn, WinCheck(WinStatus::NoWin)) => Ok(*self),

            _ => Err(GameError::InvalidTransition),
        }
    }
}
