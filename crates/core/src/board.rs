//! Board module - resolved starting board
//!
//! [`BoardState`] is the output of template resolution: plain integer matrices
//! of tile ids (`-1` = empty), bed ids (`-1` = void) and optional blocker ids
//! (`0` = none). Uses flat row-major vectors; coordinates are `(row, col)`.

use serde::Serialize;

use crate::error::LevelError;
use crate::level::flatten;
use crate::types::{Coord, EMPTY_TILE, NO_BLOCKER, VOID_BED};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BoardState {
    rows: usize,
    cols: usize,
    tiles: Vec<i32>,
    beds: Vec<i32>,
    blockers: Option<Vec<i32>>,
}

impl BoardState {
    /// Build from nested rows. Every matrix must be exactly `rows x cols`.
    pub fn new(
        rows: usize,
        cols: usize,
        tiles: Vec<Vec<i32>>,
        beds: Vec<Vec<i32>>,
        blockers: Option<Vec<Vec<i32>>>,
    ) -> Result<Self, LevelError> {
        let tiles = flatten("tiles", rows, cols, tiles)?;
        let beds = flatten("beds", rows, cols, beds)?;
        let blockers = blockers
            .map(|b| flatten("blockers", rows, cols, b))
            .transpose()?;
        Ok(Self {
            rows,
            cols,
            tiles,
            beds,
            blockers,
        })
    }

    /// Build from flat row-major vectors whose lengths are already checked.
    pub(crate) fn from_flat(
        rows: usize,
        cols: usize,
        tiles: Vec<i32>,
        beds: Vec<i32>,
        blockers: Option<Vec<i32>>,
    ) -> Self {
        debug_assert_eq!(tiles.len(), rows * cols);
        debug_assert_eq!(beds.len(), rows * cols);
        Self {
            rows,
            cols,
            tiles,
            beds,
            blockers,
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline(always)]
    fn index(&self, at: Coord) -> Option<usize> {
        if at.row < self.rows && at.col < self.cols {
            Some(at.index(self.cols))
        } else {
            None
        }
    }

    /// Tile id at `at`, `None` if out of bounds.
    pub fn tile(&self, at: Coord) -> Option<i32> {
        self.index(at).map(|i| self.tiles[i])
    }

    pub fn bed(&self, at: Coord) -> Option<i32> {
        self.index(at).map(|i| self.beds[i])
    }

    /// Blocker id at `at`; [`NO_BLOCKER`] when the board has no blocker matrix.
    pub fn blocker(&self, at: Coord) -> Option<i32> {
        self.index(at).map(|i| match &self.blockers {
            Some(b) => b[i],
            None => NO_BLOCKER,
        })
    }

    pub fn is_void(&self, at: Coord) -> bool {
        self.bed(at) == Some(VOID_BED)
    }

    pub fn is_empty(&self, at: Coord) -> bool {
        self.tile(at) == Some(EMPTY_TILE)
    }

    pub fn tiles(&self) -> &[i32] {
        &self.tiles
    }

    pub fn beds(&self) -> &[i32] {
        &self.beds
    }

    pub fn blockers(&self) -> Option<&[i32]> {
        self.blockers.as_deref()
    }

    /// Tile matrix as nested rows, for display and snapshots.
    pub fn tile_rows(&self) -> Vec<Vec<i32>> {
        self.tiles.chunks(self.cols).map(|r| r.to_vec()).collect()
    }
}
