//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental value types used throughout the engine.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (template resolution, match detection, UI binding).
//!
//! # Sentinel Values
//!
//! Level templates and resolved boards encode cell state as plain integers:
//!
//! | Constant | Value | Meaning |
//! |----------|-------|---------|
//! | `EMPTY_TILE` | -1 | Resolved cell holds no tile |
//! | `VOID_BED` | -1 | Cell is permanently unplayable |
//! | `SPAWN_MARKER` | 0 | Template cell resolved by a weighted draw |
//! | `BLOCKER_OCCUPIED_MARKER` | -2 | Template cell held by a blocker, no tile |
//! | `NO_BLOCKER` | 0 | Blocker matrix entry without an overlay |
//! | `SPECIAL_TILE_MIN` | 101 | First tile id of the power-tile range |
//!
//! # Coordinates
//!
//! Coordinates are `(row, col)` with `(0, 0)` in the top-left corner. Rows grow
//! downward, which is also the direction tiles fall.
//!
//! # Examples
//!
//! ```
//! use tile_match_types::{Coord, PowerKind, TileTypeId};
//!
//! let a = Coord::new(2, 3);
//! assert!(a.is_adjacent(Coord::new(2, 4)));
//! assert!(!a.is_adjacent(Coord::new(3, 4)));
//!
//! let tile = TileTypeId::new(7).unwrap();
//! assert!(!tile.is_special());
//! assert!(PowerKind::Bomb.tile_id().is_special());
//!
//! assert_eq!(TileTypeId::new(0), None);
//! ```

use std::fmt;

/// Resolved tile value for an empty or cleared cell
pub const EMPTY_TILE: i32 = -1;

/// Bed value for a permanently unplayable cell
pub const VOID_BED: i32 = -1;

/// Template tile value resolved at load time by a weighted draw
pub const SPAWN_MARKER: i32 = 0;

/// Template tile value for a cell held by a blocker (resolves to empty)
pub const BLOCKER_OCCUPIED_MARKER: i32 = -2;

/// Blocker matrix value for "no overlay"
pub const NO_BLOCKER: i32 = 0;

/// First tile id of the special/power tile range
pub const SPECIAL_TILE_MIN: u32 = 101;

/// Minimum run length that counts as a match
pub const MIN_RUN: usize = 3;

/// A board position, `row` first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coord {
    pub row: usize,
    pub col: usize,
}

impl Coord {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// True when `other` is exactly one step away horizontally or vertically.
    pub fn is_adjacent(self, other: Coord) -> bool {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col) == 1
    }

    /// Row-major flat index for a board `cols` wide.
    #[inline(always)]
    pub fn index(self, cols: usize) -> usize {
        self.row * cols + self.col
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Positive tile type identifier.
///
/// Zero and negative values are template sentinels and can never be stored as
/// resolved tile state, so construction rejects them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TileTypeId(u32);

impl TileTypeId {
    /// Returns `None` for zero or negative raw values.
    pub fn new(raw: i32) -> Option<Self> {
        if raw >= 1 {
            Some(Self(raw as u32))
        } else {
            None
        }
    }

    pub fn get(self) -> u32 {
        self.0
    }

    /// Power tiles live in the reserved range starting at [`SPECIAL_TILE_MIN`].
    pub fn is_special(self) -> bool {
        self.0 >= SPECIAL_TILE_MIN
    }

    /// Integer form used by resolved board matrices.
    pub fn as_raw(self) -> i32 {
        self.0 as i32
    }
}

impl fmt::Display for TileTypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identity of one live tile, assigned at spawn/placement time and never reused.
///
/// Match detection works on [`TileTypeId`]; consumers that animate or clear
/// individual pieces key on this instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TileInstanceId(pub u64);

/// Negative blocker kind identifier from the level's blocker catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BlockerId(i32);

impl BlockerId {
    /// Returns `None` unless `raw` is negative.
    pub fn new(raw: i32) -> Option<Self> {
        if raw < 0 {
            Some(Self(raw))
        } else {
            None
        }
    }

    pub fn get(self) -> i32 {
        self.0
    }
}

/// Overlay obstructing a cell independently of its tile.
///
/// A blocked cell is excluded from swapping and matching until cleared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Blocker {
    #[default]
    None,
    Obstruction(BlockerId),
}

impl Blocker {
    pub fn is_blocked(&self) -> bool {
        matches!(self, Blocker::Obstruction(_))
    }

    /// Integer form used by resolved blocker matrices.
    pub fn as_raw(&self) -> i32 {
        match self {
            Blocker::None => NO_BLOCKER,
            Blocker::Obstruction(id) => id.get(),
        }
    }
}

/// Special tiles that can be placed onto the board by request.
///
/// Each kind owns one tile id in the reserved range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PowerKind {
    RowClear,
    ColumnClear,
    Bomb,
    ColorClear,
}

impl PowerKind {
    pub fn tile_id(self) -> TileTypeId {
        let offset = match self {
            PowerKind::RowClear => 0,
            PowerKind::ColumnClear => 1,
            PowerKind::Bomb => 2,
            PowerKind::ColorClear => 3,
        };
        TileTypeId(SPECIAL_TILE_MIN + offset)
    }

    /// Parse from string (case-insensitive)
    ///
    /// ```
    /// use tile_match_types::PowerKind;
    ///
    /// assert_eq!(PowerKind::from_str("bomb"), Some(PowerKind::Bomb));
    /// assert_eq!(PowerKind::from_str("RowClear"), Some(PowerKind::RowClear));
    /// assert_eq!(PowerKind::from_str("rainbow"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "rowclear" => Some(PowerKind::RowClear),
            "columnclear" => Some(PowerKind::ColumnClear),
            "bomb" => Some(PowerKind::Bomb),
            "colorclear" => Some(PowerKind::ColorClear),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PowerKind::RowClear => "rowClear",
            PowerKind::ColumnClear => "columnClear",
            PowerKind::Bomb => "bomb",
            PowerKind::ColorClear => "colorClear",
        }
    }
}

/// What an objective counts.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ObjectiveKind {
    /// Cleared tiles of one type. Without a tile id the objective never advances.
    Collect { tile: Option<TileTypeId> },
    /// Any other objective type named by the level asset.
    Other(String),
}

impl ObjectiveKind {
    /// Parse the asset's `type` field. Only `"collect"` is recognized.
    pub fn from_parts(kind: &str, tile: Option<TileTypeId>) -> Self {
        if kind.eq_ignore_ascii_case("collect") {
            ObjectiveKind::Collect { tile }
        } else {
            ObjectiveKind::Other(kind.to_string())
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            ObjectiveKind::Collect { .. } => "collect",
            ObjectiveKind::Other(name) => name,
        }
    }
}

/// Session state derived from progress bookkeeping.
///
/// - **InProgress**: Initial state
/// - **Won**: All objectives met (and blockers cleared when the level has any)
/// - **Lost**: Out of moves without winning
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameStatus {
    InProgress,
    Won,
    Lost,
}

impl GameStatus {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, GameStatus::InProgress)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GameStatus::InProgress => "in_progress",
            GameStatus::Won => "won",
            GameStatus::Lost => "lost",
        }
    }
}
