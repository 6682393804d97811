//! Tile-matching puzzle engine (workspace facade crate).
//!
//! The implementation lives in dedicated crates under `crates/`; this package
//! re-exports them as `tile_match::{types,core,engine}` and hosts the CLI.

pub mod cli;

pub use tile_match_core as core;
pub use tile_match_engine as engine;
pub use tile_match_types as types;
