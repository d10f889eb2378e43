//! Environment configuration.

use anyhow::Context;
use islands_core::{GameConfig, DEFAULT_BOARD_SIZE};

/// Rows and columns on each board
pub const BOARD_SIZE_VAR: &str = "ISLANDS_BOARD_SIZE";

/// Requests a game actor can queue before callers wait to enqueue
pub const MAILBOX_CAPACITY_VAR: &str = "ISLANDS_MAILBOX_CAPACITY";

const DEFAULT_MAILBOX_CAPACITY: usize = 32;

/// Settings shared by every game the server hosts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServerConfig {
    pub game: GameConfig,
    pub mailbox_capacity: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            game: GameConfig::default(),
            mailbox_capacity: DEFAULT_MAILBOX_CAPACITY,
        }
    }
}

impl ServerConfig {
    /// Read configuration from the process environment
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let board_size: u8 = match lookup(BOARD_SIZE_VAR) {
            Some(raw) => raw
                .trim()
                .parse()
                .with_context(|| format!("invalid {}: {:?}", BOARD_SIZE_VAR, raw))?,
            None => DEFAULT_BOARD_SIZE,
        };

        let mailbox_capacity: usize = match lookup(MAILBOX_CAPACITY_VAR) {
            Some(raw) => raw
                .trim()
                .parse()
                .with_context(|| format!("invalid {}: {:?}", MAILBOX_CAPACITY_VAR, raw))?,
            None => DEFAULT_MAILBOX_CAPACITY,
        };

        Ok(Self {
            game: GameConfig::new(board_size),
            // tokio panics on a zero-capacity channel
            mailbox_capacity: mailbox_capacity.max(1),
        })
    }
}
