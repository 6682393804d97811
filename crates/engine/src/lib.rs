//! Session driver for the tile-matching core.
//!
//! Ties a resolved board, the progress tracker and a random source together
//! and runs whole turns: swap, cascade, refill, move accounting.

pub mod config;
pub mod load;
pub mod session;

pub use tile_match_core as core;
pub use tile_match_types as types;

pub use config::EngineConfig;
pub use load::{load_level, start_session};
pub use session::{CascadeStep, Session, TurnError, TurnOutcome};
