//! Registry of running games.
//!
//! Games are fully independent: each has its own actor and mailbox, and the registry
//! only maps ids to handles.

use crate::actor::{ActorError, GameHandle};
use crate::config::ServerConfig;
use dashmap::DashMap;
use tracing::info;
use uuid::Uuid;

/// All games hosted by this process
pub struct GameRegistry {
    games: DashMap<Uuid, GameHandle>,
    config: ServerConfig,
}

impl GameRegistry {
    pub fn new(config: ServerConfig) -> Self {
        Self {
            games: DashMap::new(),
            config,
        }
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Start a new game with `player1_name` in the first seat
    pub fn start(&self, player1_name: impl Into<String>) -> (Uuid, GameHandle) {
        let id = Uuid::new_v4();
        let handle = GameHandle::start(
            id,
            player1_name,
            self.config.game,
            self.config.mailbox_capacity,
        );
        self.games.insert(id, handle.clone());
        info!("Registered game {} ({} running)", id, self.games.len());
        (id, handle)
    }

    /// Look up a running game
    pub fn get(&self, id: Uuid) -> Result<GameHandle, ActorError> {
        self.games
            .get(&id)
            .map(|entry| entry.value().clone())
            .ok_or(ActorError::GameNotFound)
    }

    /// Stop a game and forget it
    pub async fn remove(&self, id: Uuid) -> Result<(), ActorError> {
        let (_, handle) = self.games.remove(&id).ok_or(ActorError::GameNotFound)?;
        handle.stop().await;
        info!("Removed game {}", id);
        Ok(())
    }

    /// Forget games whose actors are no longer running
    pub fn prune(&self) -> usize {
        let before = self.games.len();
        self.games.retain(|_, handle| handle.is_running());
        before - self.games.len()
    }

    pub fn ids(&self) -> Vec<Uuid> {
        self.games.iter().map(|entry| *entry.key()).collect()
    }

    pub fn len(&self) -> usize {
        self.games.len()
    }

    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }
}

impl Default for GameRegistry {
    fn default() -> Self {
        Self::new(ServerConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use islands_core::{GameError, Player, RulesState};

    #[tokio::test]
    async fn test_games_are_independent() {
        let registry = GameRegistry::default();
        let (first, a) = registry.start("Chris");
        let (second, b) = registry.start("Robin");
        assert_ne!(first, second);
        assert_eq!(registry.len(), 2);

        a.add_player("Alexis").await.unwrap();
        assert_eq!(a.rules_state().await.unwrap(), RulesState::PlayersSet);
        assert_eq!(b.rules_state().await.unwrap(), RulesState::Initialized);

        let b_again = registry.get(second).unwrap();
        assert_eq!(b_again.id(), second);
        assert_eq!(
            b_again.position_island(Player::Player1, "dot", 1, 1).await,
            Err(ActorError::Game(GameError::InvalidTransition))
        );
    }

    #[tokio::test]
    async fn test_remove_stops_game() {
        let registry = GameRegistry::default();
        let (id, handle) = registry.start("Chris");

        registry.remove(id).await.unwrap();
        assert!(registry.is_empty());
        assert_eq!(registry.get(id).map(|_| ()), Err(ActorError::GameNotFound));
        assert_eq!(registry.remove(id).await, Err(ActorError::GameNotFound));
        assert_eq!(handle.add_player("Alexis").await, Err(ActorError::Stopped));
    }

    #[tokio::test]
    async fn test_prune() {
        let registry = GameRegistry::default();
        let (_, stopped) = registry.start("Chris");
        let (kept, _) = registry.start("Robin");

        stopped.stop().await;
        // wait until the actor has drained its mailbox
        let _ = stopped.snapshot().await;

        assert_eq!(registry.prune(), 1);
        assert_eq!(registry.ids(), vec![kept]);
    }

    #[tokio::test]
    async fn test_board_size_from_config() {
        let registry = GameRegistry::new(ServerConfig {
            game: islands_core::GameConfig::new(12),
            ..ServerConfig::default()
        });
        let (_, handle) = registry.start("Chris");

        handle.add_player("Alexis").await.unwrap();
        handle
            .position_island(Player::Player1, "dot", 12, 12)
            .await
            .unwrap();
    }
}
