//! Islands - a two-player island-hunting game engine
//!
//! Each player secretly places five fixed-shape islands on their own board, then the
//! players take turns guessing coordinates on each other's boards. The first player
//! to forest every opposing island wins.
//!
//! # Modules
//!
//! - [`coordinate`]: Validated board positions and per-game configuration
//! - [`island`]: Island shapes, placement and hit tracking
//! - [`board`]: One player's islands, overlap checks and win detection
//! - [`guess_log`]: Hits and misses a player has fired
//! - [`rules`]: Phase state machine gating every operation
//! - [`game`]: The full game value tying the above together
//!
//! Every type here is a plain value. Operations take `&self` and return a new value,
//! so a failed operation never leaves partial changes behind.

pub mod board;
pub mod coordinate;
pub mod game;
pub mod guess_log;
pub mod island;
pub mod rules;

// Re-export commonly used types
pub use board::{Board, BoardGuess};
pub use coordinate::{Coordinate, GameConfig, DEFAULT_BOARD_SIZE, MAX_BOARD_SIZE, MIN_BOARD_SIZE};
pub use game::{Game, GameError, GuessOutcome, PlayerState};
pub use guess_log::GuessLog;
pub use island::{GuessResult, Island, IslandType};
pub use rules::{IslandsStatus, Player, Rules, RulesAction, RulesState, WinStatus};
