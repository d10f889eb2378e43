//! Islands game hosting.
//!
//! Each game is owned by a dedicated actor task ([`actor`]); the [`registry`] keeps
//! track of running games, and [`protocol`] gives transports a serializable
//! command/response envelope.

pub mod actor;
pub mod config;
pub mod protocol;
pub mod registry;

pub use actor::{ActorError, GameHandle};
pub use config::ServerConfig;
pub use protocol::{Command, Response};
pub use registry::GameRegistry;
