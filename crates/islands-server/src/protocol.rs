//! Request/response envelope for transports.
//!
//! A transport (socket, HTTP, CLI) decodes its wire messages into [`Command`]s, hands
//! them to [`GameHandle::dispatch`], and encodes the [`Response`] back.

use crate::actor::{ActorError, GameHandle};
use islands_core::{Game, GuessOutcome, Player};
use serde::{Deserialize, Serialize};

/// Operations a client can request against one game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload")]
pub enum Command {
    /// Take the second seat
    AddPlayer { name: String },

    /// Place or move an island; `island_type` is a shape key such as `"atoll"`
    PositionIsland {
        player: Player,
        island_type: String,
        row: i32,
        col: i32,
    },

    /// Lock in all five islands
    SetIslands { player: Player },

    /// Fire at the opponent's board
    Guess { player: Player, row: i32, col: i32 },

    /// Request the current game state
    Snapshot,
}

/// Replies sent back for each command
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload")]
pub enum Response {
    /// Command applied
    Ok,

    /// Result of a guess
    Guessed { outcome: GuessOutcome },

    /// Current game state
    Snapshot { game: Box<Game> },

    /// Command rejected; the game is unchanged
    Error { kind: String, message: String },
}

impl From<ActorError> for Response {
    fn from(e: ActorError) -> Self {
        Response::Error {
            kind: e.kind().to_string(),
            message: e.to_string(),
        }
    }
}

impl GameHandle {
    /// Run one command against this game
    pub async fn dispatch(&self, command: Command) -> Response {
        let result = match command {
            Command::AddPlayer { name } => self.add_player(name).await.map(|()| Response::Ok),
            Command::PositionIsland {
                player,
                island_type,
                row,
                col,
            } => self
                .position_island(player, island_type, row, col)
                .await
                .map(|()| Response::Ok),
            Command::SetIslands { player } => self.set_islands(player).await.map(|()| Response::Ok),
            Command::Guess { player, row, col } => self
                .guess(player, row, col)
                .await
                .map(|outcome| Response::Guessed { outcome }),
            Command::Snapshot => self
                .snapshot()
                .await
                .map(|game| Response::Snapshot { game: Box::new(game) }),
        };

        result.unwrap_or_else(Response::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use islands_core::{GameConfig, GuessResult, RulesState, WinStatus};
    use uuid::Uuid;

    fn start() -> GameHandle {
        GameHandle::start(Uuid::new_v4(), "Chris", GameConfig::default(), 4)
    }

    #[test]
    fn test_command_wire_format() {
        let json = r#"{"type":"PositionIsland","payload":{"player":"player1","island_type":"l_shape","row":1,"col":5}}"#;
        let command: Command = serde_json::from_str(json).unwrap();
        assert_eq!(
            command,
            Command::PositionIsland {
                player: Player::Player1,
                island_type: "l_shape".to_string(),
                row: 1,
                col: 5,
            }
        );

        let snapshot: Command = serde_json::from_str(r#"{"type":"Snapshot"}"#).unwrap();
        assert_eq!(snapshot, Command::Snapshot);
    }

    #[test]
    fn test_guessed_wire_format() {
        let response = Response::Guessed {
            outcome: GuessOutcome {
                result: GuessResult::Hit,
                forested: None,
                win: WinStatus::NoWin,
            },
        };
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["type"], "Guessed");
        assert_eq!(value["payload"]["outcome"]["result"], "hit");
        assert_eq!(value["payload"]["outcome"]["win"], "no_win");
    }

    #[tokio::test]
    async fn test_dispatch() {
        let handle = start();

        let response = handle
            .dispatch(Command::AddPlayer {
                name: "Alexis".to_string(),
            })
            .await;
        assert_eq!(response, Response::Ok);

        let response = handle
            .dispatch(Command::PositionIsland {
                player: Player::Player2,
                island_type: "hexagon".to_string(),
                row: 1,
                col: 1,
            })
            .await;
        assert_eq!(
            response,
            Response::Error {
                kind: "InvalidIslandType".to_string(),
                message: "Unknown island type".to_string(),
            }
        );

        match handle.dispatch(Command::Snapshot).await {
            Response::Snapshot { game } => assert_eq!(game.state(), RulesState::PlayersSet),
            other => panic!("unexpected response: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_dispatch_after_stop() {
        let handle = start();
        handle.stop().await;

        let response = handle
            .dispatch(Command::SetIslands {
                player: Player::Player1,
            })
            .await;
        assert!(matches!(response, Response::Error { ref kind, .. } if kind == "Stopped"));
    }
}
