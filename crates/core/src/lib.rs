//! Core puzzle logic - pure, deterministic, and testable
//!
//! This crate contains the tile-matching rules: level templates, template
//! resolution, the live grid, match detection and progress bookkeeping. It has
//! **no dependencies** on rendering, audio, input or persistence, making it:
//!
//! - **Deterministic**: Same seed produces the same starting board
//! - **Testable**: Every random draw can come from an injected source
//! - **Portable**: Runs headless, in a terminal, or behind any UI layer
//!
//! # Module Structure
//!
//! - [`rng`]: LCG random source and the weighted tile picker
//! - [`level`]: Parsed, immutable level definitions
//! - [`loader`]: Resolves a template into a concrete [`BoardState`]
//! - [`board`]: Resolved starting board as integer matrices
//! - [`grid`]: Live mutable board of cells with swap/placement rules
//! - [`matcher`]: Match detection with run merging
//! - [`progress`]: Moves, objectives, blockers and win/loss derivation
//! - [`snapshot`]: Serializable session view
//!
//! # Data Flow
//!
//! `LevelTemplate` → `StageLoader` → `BoardState` → `GridModel` → `detect` →
//! cleared cells → `GameProgressTracker`.
//!
//! # Example
//!
//! ```
//! use tile_match_core::{detect, GridModel, LevelTemplate, SimpleRng, StageLoader};
//!
//! let level = LevelTemplate::from_json(r#"{
//!     "rows": 1, "columns": 4, "moves": 5,
//!     "tiles": [{ "id": 1, "weight": 1, "file": "a.png" }],
//!     "tileMap": [[0, 0, 0, 0]],
//!     "bedMap": [[0, 0, 0, 0]],
//!     "blockerTypes": [],
//!     "objectives": [{ "type": "collect", "tileId": 1, "target": 4 }]
//! }"#).unwrap();
//!
//! let board = StageLoader::new(&level).resolve(SimpleRng::new(7)).unwrap();
//! let grid = GridModel::from_board_state(&board, level.blockers());
//!
//! let result = detect(&grid);
//! assert_eq!(result.matches().len(), 1);
//! assert_eq!(result.matched_cells().len(), 4);
//! ```

pub mod board;
pub mod error;
pub mod grid;
pub mod level;
pub mod loader;
pub mod matcher;
pub mod progress;
pub mod rng;
pub mod snapshot;

pub use tile_match_types as types;

// Re-export commonly used types for convenience
pub use board::BoardState;
pub use error::LevelError;
pub use grid::{Cell, GridModel, GridWarning, MoveError};
pub use level::{BlockerCatalog, BlockerSpec, LevelTemplate, Objective, TemplateMasks, TileSpec};
pub use loader::StageLoader;
pub use matcher::{detect, Match, MatchResult};
pub use progress::{GameProgressTracker, ProgressEvent, SubscriptionId};
pub use rng::{RandomSource, SimpleRng, WeightedPicker};
pub use snapshot::{ObjectiveSnapshot, SessionSnapshot};
