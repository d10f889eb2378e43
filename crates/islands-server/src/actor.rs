//! Game actor: the single owner of one game's state.
//!
//! Each game runs in its own tokio task. Callers talk to it through a [`GameHandle`],
//! which pushes requests onto a bounded FIFO mailbox and waits on a per-request reply
//! channel. The actor applies requests one at a time, so a request either replaces
//! the whole [`Game`] or leaves it untouched.

use islands_core::{Game, GameConfig, GameError, GuessOutcome, Player, RulesState};
use thiserror::Error;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Errors returned to callers of a [`GameHandle`]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActorError {
    #[error(transparent)]
    Game(#[from] GameError),

    #[error("Game actor has stopped")]
    Stopped,

    #[error("Game not found")]
    GameNotFound,
}

impl ActorError {
    /// Short machine-readable name for the error
    pub fn kind(&self) -> &'static str {
        match self {
            ActorError::Game(GameError::InvalidCoordinate) => "InvalidCoordinate",
            ActorError::Game(GameError::InvalidIslandType) => "InvalidIslandType",
            ActorError::Game(GameError::OverlappingIsland) => "OverlappingIsland",
            ActorError::Game(GameError::NotAllIslandsPositioned) => "NotAllIslandsPositioned",
            ActorError::Game(GameError::InvalidTransition) => "InvalidTransition",
            ActorError::Game(GameError::DuplicateGuess) => "DuplicateGuess",
            ActorError::Stopped => "Stopped",
            ActorError::GameNotFound => "GameNotFound",
        }
    }
}

type Reply<T> = oneshot::Sender<Result<T, GameError>>;

/// Messages accepted by the actor's mailbox
#[derive(Debug)]
enum Request {
    AddPlayer {
        name: String,
        reply: Reply<()>,
    },
    PositionIsland {
        player: Player,
        shape: String,
        row: i32,
        col: i32,
        reply: Reply<()>,
    },
    SetIslands {
        player: Player,
        reply: Reply<()>,
    },
    Guess {
        player: Player,
        row: i32,
        col: i32,
        reply: Reply<GuessOutcome>,
    },
    Snapshot {
        reply: oneshot::Sender<Game>,
    },
    Stop,
}

/// Cloneable handle to a running game.
///
/// The actor stops once every handle has been dropped or [`GameHandle::stop`] is
/// called. The game state is discarded with it.
#[derive(Debug, Clone)]
pub struct GameHandle {
    id: Uuid,
    mailbox: mpsc::Sender<Request>,
}

impl GameHandle {
    /// Start a new game with `player1_name` in the first seat.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(
        id: Uuid,
        player1_name: impl Into<String>,
        config: GameConfig,
        mailbox_capacity: usize,
    ) -> Self {
        let (tx, rx) = mpsc::channel(mailbox_capacity.max(1));
        let actor = GameActor {
            id,
            game: Game::with_config(player1_name, config),
            mailbox: rx,
        };
        tokio::spawn(actor.run());

        Self { id, mailbox: tx }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Check whether the actor is still accepting requests
    pub fn is_running(&self) -> bool {
        !self.mailbox.is_closed()
    }

    async fn call<T>(
        &self,
        request: impl FnOnce(oneshot::Sender<T>) -> Request,
    ) -> Result<T, ActorError> {
        let (tx, rx) = oneshot::channel();
        self.mailbox
            .send(request(tx))
            .await
            .map_err(|_| ActorError::Stopped)?;
        rx.await.map_err(|_| ActorError::Stopped)
    }

    pub async fn add_player(&self, name: impl Into<String>) -> Result<(), ActorError> {
        let name = name.into();
        Ok(self.call(|reply| Request::AddPlayer { name, reply }).await??)
    }

    pub async fn position_island(
        &self,
        player: Player,
        shape: impl Into<String>,
        row: i32,
        col: i32,
    ) -> Result<(), ActorError> {
        let shape = shape.into();
        Ok(self
            .call(|reply| Request::PositionIsland {
                player,
                shape,
                row,
                col,
                reply,
            })
            .await??)
    }

    pub async fn set_islands(&self, player: Player) -> Result<(), ActorError> {
        Ok(self
            .call(|reply| Request::SetIslands { player, reply })
            .await??)
    }

    pub async fn guess(&self, player: Player, row: i32, col: i32) -> Result<GuessOutcome, ActorError> {
        Ok(self
            .call(|reply| Request::Guess {
                player,
                row,
                col,
                reply,
            })
            .await??)
    }

    /// Copy of the current committed game state
    pub async fn snapshot(&self) -> Result<Game, ActorError> {
        self.call(|reply| Request::Snapshot { reply }).await
    }

    pub async fn rules_state(&self) -> Result<RulesState, ActorError> {
        Ok(self.snapshot().await?.state())
    }

    /// Ask the actor to stop after the requests already queued ahead of this one
    pub async fn stop(&self) {
        let _ = self.mailbox.send(Request::Stop).await;
    }
}

/// The task that owns a game
struct GameActor {
    id: Uuid,
    game: Game,
    mailbox: mpsc::Receiver<Request>,
}

impl GameActor {
    async fn run(mut self) {
        info!("Game {} started by {:?}", self.id, self.game.player1.name);

        while let Some(request) = self.mailbox.recv().await {
            if !self.handle(request) {
                break;
            }
        }

        info!("Game {} stopped in state {:?}", self.id, self.game.state());
    }

    /// Apply one request. Returns false when the actor should stop.
    fn handle(&mut self, request: Request) -> bool {
        match request {
            Request::AddPlayer { name, reply } => {
                let result = self.game.add_player(name).map(|g| (g, ()));
                let _ = reply.send(self.commit("add_player", result));
            }
            Request::PositionIsland {
                player,
                shape,
                row,
                col,
                reply,
            } => {
                let result = self
                    .game
                    .position_island(player, &shape, row, col)
                    .map(|g| (g, ()));
                let _ = reply.send(self.commit("position_island", result));
            }
            Request::SetIslands { player, reply } => {
                let result = self.game.set_islands(player).map(|g| (g, ()));
                let _ = reply.send(self.commit("set_islands", result));
            }
            Request::Guess {
                player,
                row,
                col,
                reply,
            } => {
                let result = self.game.guess(player, row, col);
                let _ = reply.send(self.commit("guess", result));
            }
            Request::Snapshot { reply } => {
                let _ = reply.send(self.game.clone());
            }
            Request::Stop => return false,
        }
        true
    }

    /// Swap in the new game on success; on failure keep the current one.
    fn commit<T>(&mut self, operation: &str, result: Result<(Game, T), GameError>) -> Result<T, GameError> {
        match result {
            Ok((game, value)) => {
                debug!(
                    "Game {}: {} applied, now {:?}",
                    self.id,
                    operation,
                    game.state()
                );
                self.game = game;
                Ok(value)
            }
            Err(e) => {
                warn!("Game {}: {} rejected: {}", self.id, operation, e);
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use islands_core::{GuessResult, IslandType, WinStatus};

    const LAYOUT: [(&str, i32, i32); 5] = [
        ("atoll", 1, 1),
        ("dot", 1, 4),
        ("l_shape", 1, 5),
        ("s_shape", 5, 1),
        ("square", 5, 5),
    ];

    fn start() -> GameHandle {
        GameHandle::start(Uuid::new_v4(), "Chris", GameConfig::default(), 8)
    }

    async fn ready(handle: &GameHandle) {
        handle.add_player("Alexis").await.unwrap();
        for player in Player::ALL {
            for (shape, row, col) in LAYOUT {
                handle.position_island(player, shape, row, col).await.unwrap();
            }
            handle.set_islands(player).await.unwrap();
        }
    }

    #[tokio::test]
    async fn test_setup_through_actor() {
        let handle = start();
        assert_eq!(handle.rules_state().await.unwrap(), RulesState::Initialized);

        handle.add_player("Alexis").await.unwrap();
        for (shape, row, col) in LAYOUT {
            handle
                .position_island(Player::Player1, shape, row, col)
                .await
                .unwrap();
        }
        handle.set_islands(Player::Player1).await.unwrap();

        assert_eq!(
            handle.position_island(Player::Player1, "dot", 12, 1).await,
            Err(ActorError::Game(GameError::InvalidTransition))
        );
        assert_eq!(
            handle.position_island(Player::Player2, "dot", 12, 1).await,
            Err(ActorError::Game(GameError::InvalidCoordinate))
        );

        let game = handle.snapshot().await.unwrap();
        assert_eq!(game.player2.name.as_deref(), Some("Alexis"));
        assert_eq!(game.state(), RulesState::PlayersSet);
    }

    #[tokio::test]
    async fn test_errors_leave_state_untouched() {
        let handle = start();
        handle.add_player("Alexis").await.unwrap();
        handle
            .position_island(Player::Player1, "atoll", 1, 1)
            .await
            .unwrap();
        let before = handle.snapshot().await.unwrap();

        assert_eq!(
            handle.position_island(Player::Player1, "dot", 1, 2).await,
            Err(ActorError::Game(GameError::OverlappingIsland))
        );
        assert_eq!(
            handle.position_island(Player::Player1, "blob", 3, 3).await,
            Err(ActorError::Game(GameError::InvalidIslandType))
        );
        assert_eq!(
            handle.set_islands(Player::Player1).await,
            Err(ActorError::Game(GameError::NotAllIslandsPositioned))
        );

        assert_eq!(handle.snapshot().await.unwrap(), before);
    }

    #[tokio::test]
    async fn test_guess_outcomes() {
        let handle = start();
        ready(&handle).await;

        let outcome = handle.guess(Player::Player1, 1, 4).await.unwrap();
        assert_eq!(outcome.result, GuessResult::Hit);
        assert_eq!(outcome.forested, Some(IslandType::Dot));
        assert_eq!(outcome.win, WinStatus::NoWin);

        assert_eq!(
            handle.guess(Player::Player1, 2, 2).await,
            Err(ActorError::Game(GameError::InvalidTransition))
        );

        let outcome = handle.guess(Player::Player2, 10, 10).await.unwrap();
        assert_eq!(outcome.result, GuessResult::Miss);
        assert_eq!(
            handle.guess(Player::Player1, 1, 4).await,
            Err(ActorError::Game(GameError::DuplicateGuess))
        );
        assert_eq!(handle.rules_state().await.unwrap(), RulesState::Player1Turn);
    }

    #[tokio::test]
    async fn test_concurrent_guesses_are_serialized() {
        let handle = start();
        ready(&handle).await;

        // Both calls claim player1's turn; exactly one may have it.
        let a = tokio::spawn({
            let handle = handle.clone();
            async move { handle.guess(Player::Player1, 9, 9).await }
        });
        let b = tokio::spawn({
            let handle = handle.clone();
            async move { handle.guess(Player::Player1, 9, 8).await }
        });
        let results = [a.await.unwrap(), b.await.unwrap()];

        let ok = results.iter().filter(|r| r.is_ok()).count();
        assert_eq!(ok, 1);
        assert!(results
            .iter()
            .any(|r| *r == Err(ActorError::Game(GameError::InvalidTransition))));

        let game = handle.snapshot().await.unwrap();
        assert_eq!(game.player1.guesses.misses().len(), 1);
        assert_eq!(game.state(), RulesState::Player2Turn);
    }

    #[tokio::test]
    async fn test_game_over_rejects_everything() {
        let handle = start();
        ready(&handle).await;

        let game = handle.snapshot().await.unwrap();
        let targets: Vec<_> = game
            .player2
            .board
            .islands()
            .flat_map(|i| i.coordinates().iter().copied())
            .collect();
        let mut water = islands_core::Coordinate::all(10).filter(|c| !targets.contains(c));

        let mut last = None;
        for target in &targets {
            let outcome = handle
                .guess(Player::Player1, target.row().into(), target.col().into())
                .await
                .unwrap();
            last = Some(outcome.win);
            if outcome.win == WinStatus::Win {
                break;
            }
            let miss = water.next().unwrap();
            handle
                .guess(Player::Player2, miss.row().into(), miss.col().into())
                .await
                .unwrap();
        }
        assert_eq!(last, Some(WinStatus::Win));
        assert_eq!(handle.rules_state().await.unwrap(), RulesState::GameOver);

        let invalid = Err(ActorError::Game(GameError::InvalidTransition));
        assert_eq!(handle.add_player("Late").await, invalid);
        assert_eq!(
            handle.position_island(Player::Player2, "dot", 10, 10).await,
            invalid
        );
        assert_eq!(handle.set_islands(Player::Player1).await, invalid);
        assert_eq!(
            handle.guess(Player::Player2, 10, 10).await.map(|_| ()),
            invalid
        );
        assert_eq!(
            handle.guess(Player::Player1, 10, 10).await.map(|_| ()),
            invalid
        );
    }

    #[tokio::test]
    async fn test_abandoned_call_still_applies() {
        let handle = start();

        {
            let call = handle.add_player("Alexis");
            tokio::pin!(call);
            // One poll enqueues the request; the caller then gives up on the reply.
            tokio::select! {
                biased;
                _ = &mut call => panic!("actor replied before it was scheduled"),
                _ = std::future::ready(()) => {}
            }
        }

        let game = handle.snapshot().await.unwrap();
        assert_eq!(game.state(), RulesState::PlayersSet);
        assert_eq!(game.player2.name.as_deref(), Some("Alexis"));
    }

    #[tokio::test]
    async fn test_timed_out_guess_still_applies() {
        let handle = start();
        ready(&handle).await;

        let guess = tokio::time::timeout(
            std::time::Duration::ZERO,
            handle.guess(Player::Player1, 1, 4),
        );
        // Whether or not the reply beat the deadline, the guess was committed.
        let _ = guess.await;

        let game = handle.snapshot().await.unwrap();
        assert_eq!(game.state(), RulesState::Player2Turn);
        assert!(game
            .player1
            .guesses
            .hits()
            .contains(&islands_core::Coordinate::new(1, 4).unwrap()));
    }

    #[tokio::test]
    async fn test_stop() {
        let handle = start();
        handle.stop().await;

        assert_eq!(handle.add_player("Alexis").await, Err(ActorError::Stopped));
        assert!(!handle.is_running());
    }

    #[test]
    fn test_error_kind() {
        assert_eq!(
            ActorError::Game(GameError::DuplicateGuess).kind(),
            "DuplicateGuess"
        );
        assert_eq!(
            ActorError::Game(GameError::NotAllIslandsPositioned).kind(),
            "NotAllIslandsPositioned"
        );
        assert_eq!(ActorError::Stopped.kind(), "Stopped");
        assert_eq!(ActorError::GameNotFound.kind(), "GameNotFound");
    }
}
