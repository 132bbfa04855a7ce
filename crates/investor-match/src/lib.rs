//! Zone recommendation and partner matchmaking for investor services.

pub mod config;
pub mod error;
pub mod matching;
pub mod registry;
pub mod telemetry;
