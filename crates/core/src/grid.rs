//! Grid module - the live, mutable board
//!
//! [`GridModel`] owns one [`Cell`] per board position. It is built from a
//! resolved [`BoardState`] plus the level's blocker catalog and then mutated by
//! swaps, special-tile placement, clears and collapses.
//!
//! Cell rules:
//! - A void cell (`bed == -1`) never holds a tile or a blocker and never changes.
//! - A cell is *eligible* (may be swapped or matched) iff it exists, holds a
//!   tile and has no blocker.
//! - Instance ids are handed out by [`GridModel::assign_instance_ids`] from a
//!   monotonic counter and are never reused within a grid.

use std::collections::BTreeMap;
use std::fmt;

use arrayvec::ArrayVec;
use thiserror::Error;
use tracing::warn;

use crate::board::BoardState;
use crate::level::BlockerCatalog;
use crate::types::{
    Blocker, BlockerId, Coord, PowerKind, TileInstanceId, TileTypeId, EMPTY_TILE, NO_BLOCKER,
    VOID_BED,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cell {
    pub tile: Option<TileTypeId>,
    pub instance: Option<TileInstanceId>,
    /// Terrain kind; `Some(-1)` is void. Zero is a valid terrain kind.
    pub bed: Option<i32>,
    pub blocker: Blocker,
    pub exists: bool,
}

impl Cell {
    pub fn is_void(&self) -> bool {
        self.bed == Some(VOID_BED)
    }

    pub fn is_blocked(&self) -> bool {
        self.blocker.is_blocked()
    }

    pub fn is_eligible(&self) -> bool {
        self.exists && self.tile.is_some() && !self.is_blocked()
    }
}

/// Non-fatal problems found while building a grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridWarning {
    /// Blocker id not present in the level's catalog; treated as no blocker.
    UnknownBlocker { at: Coord, id: i32 },
    /// Blocker placed on a void cell; dropped.
    BlockerOnVoid { at: Coord, id: i32 },
    /// Tile placed on a void cell; dropped.
    TileOnVoid { at: Coord, id: i32 },
}

impl fmt::Display for GridWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GridWarning::UnknownBlocker { at, id } => {
                write!(f, "unknown blocker id {} at {}, ignoring", id, at)
            }
            GridWarning::BlockerOnVoid { at, id } => {
                write!(f, "blocker id {} on void cell {}, ignoring", id, at)
            }
            GridWarning::TileOnVoid { at, id } => {
                write!(f, "tile id {} on void cell {}, ignoring", id, at)
            }
        }
    }
}

/// Why a swap or placement request was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("{0} is outside the board")]
    OutOfBounds(Coord),
    #[error("{0} and {1} are not adjacent")]
    NotAdjacent(Coord, Coord),
    #[error("{0} is void, blocked or empty")]
    Unavailable(Coord),
    #[error("{0} already holds a special tile")]
    Occupied(Coord),
}

impl MoveError {
    pub fn code(self) -> &'static str {
        match self {
            MoveError::OutOfBounds(_) => "out_of_bounds",
            MoveError::NotAdjacent(..) => "not_adjacent",
            MoveError::Unavailable(_) => "cell_unavailable",
            MoveError::Occupied(_) => "occupied",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridModel {
    rows: usize,
    cols: usize,
    /// Row-major cells (row * cols + col)
    cells: Vec<Cell>,
    next_instance: u64,
    warnings: Vec<GridWarning>,
}

impl GridModel {
    /// Derive the live grid from a resolved board.
    ///
    /// Unrecognized blocker ids degrade to [`Blocker::None`] and are recorded
    /// in [`GridModel::warnings`]; construction itself never fails.
    pub fn from_board_state(board: &BoardState, catalog: &BlockerCatalog) -> Self {
        let rows = board.rows();
        let cols = board.cols();
        let mut cells = Vec::with_capacity(rows * cols);
        let mut warnings = Vec::new();

        for row in 0..rows {
            for col in 0..cols {
                let at = Coord::new(row, col);
                let bed = board.bed(at).unwrap_or(VOID_BED);
                let raw_tile = board.tile(at).unwrap_or(EMPTY_TILE);
                let raw_blocker = board.blocker(at).unwrap_or(NO_BLOCKER);
                let void = bed == VOID_BED;

                let tile = if void {
                    if raw_tile >= 1 {
                        warnings.push(GridWarning::TileOnVoid { at, id: raw_tile });
                    }
                    None
                } else {
                    TileTypeId::new(raw_tile)
                };

                let blocker = if raw_blocker == NO_BLOCKER {
                    Blocker::None
                } else if void {
                    warnings.push(GridWarning::BlockerOnVoid {
                        at,
                        id: raw_blocker,
                    });
                    Blocker::None
                } else {
                    match catalog.lookup(raw_blocker).map(|spec| spec.id) {
                        Some(id) => Blocker::Obstruction(id),
                        None => {
                            warnings.push(GridWarning::UnknownBlocker {
                                at,
                                id: raw_blocker,
                            });
                            Blocker::None
                        }
                    }
                };

                cells.push(Cell {
                    tile,
                    instance: None,
                    bed: Some(bed),
                    blocker,
                    exists: !void,
                });
            }
        }

        for w in &warnings {
            warn!("{}", w);
        }

        Self {
            rows,
            cols,
            cells,
            next_instance: 1,
            warnings,
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn warnings(&self) -> &[GridWarning] {
        &self.warnings
    }

    #[inline(always)]
    fn index(&self, at: Coord) -> Option<usize> {
        if at.row < self.rows && at.col < self.cols {
            Some(at.index(self.cols))
        } else {
            None
        }
    }

    pub fn in_bounds(&self, at: Coord) -> bool {
        self.index(at).is_some()
    }

    /// Cell at `at`, `None` if out of bounds.
    pub fn get(&self, at: Coord) -> Option<&Cell> {
        self.index(at).map(|i| &self.cells[i])
    }

    /// Mutable access to a playable cell. Void cells are refused, so they
    /// can never gain a tile or a blocker.
    pub fn cell_mut(&mut self, at: Coord) -> Option<&mut Cell> {
        let i = self.index(at)?;
        let cell = &mut self.cells[i];
        cell.exists.then_some(cell)
    }

    pub fn is_eligible(&self, at: Coord) -> bool {
        self.get(at).map_or(false, Cell::is_eligible)
    }

    /// Tile type at `at` if the cell may take part in a match.
    pub fn eligible_tile(&self, at: Coord) -> Option<TileTypeId> {
        self.get(at).filter(|c| c.is_eligible()).and_then(|c| c.tile)
    }

    /// In-bounds orthogonal neighbours of `at`.
    pub fn neighbors(&self, at: Coord) -> ArrayVec<Coord, 4> {
        let mut out = ArrayVec::new();
        if at.row > 0 {
            out.push(Coord::new(at.row - 1, at.col));
        }
        if at.row + 1 < self.rows {
            out.push(Coord::new(at.row + 1, at.col));
        }
        if at.col > 0 {
            out.push(Coord::new(at.row, at.col - 1));
        }
        if at.col + 1 < self.cols {
            out.push(Coord::new(at.row, at.col + 1));
        }
        out
    }

    /// Give every tile without an identity a fresh instance id.
    /// Returns how many ids were handed out.
    pub fn assign_instance_ids(&mut self) -> usize {
        let mut assigned = 0;
        for cell in &mut self.cells {
            if cell.tile.is_some() && cell.instance.is_none() {
                cell.instance = Some(TileInstanceId(self.next_instance));
                self.next_instance += 1;
                assigned += 1;
            }
        }
        assigned
    }

    fn fresh_instance(&mut self) -> TileInstanceId {
        let id = TileInstanceId(self.next_instance);
        self.next_instance += 1;
        id
    }

    pub fn validate_swap(&self, a: Coord, b: Coord) -> Result<(), MoveError> {
        for at in [a, b] {
            if !self.in_bounds(at) {
                return Err(MoveError::OutOfBounds(at));
            }
        }
        if !a.is_adjacent(b) {
            return Err(MoveError::NotAdjacent(a, b));
        }
        for at in [a, b] {
            if !self.is_eligible(at) {
                return Err(MoveError::Unavailable(at));
            }
        }
        Ok(())
    }

    /// Exchange the tiles (and their identities) of two adjacent eligible cells.
    pub fn swap(&mut self, a: Coord, b: Coord) -> Result<(), MoveError> {
        self.validate_swap(a, b)?;
        let (ia, ib) = (a.index(self.cols), b.index(self.cols));
        let (ta, na) = (self.cells[ia].tile, self.cells[ia].instance);
        self.cells[ia].tile = self.cells[ib].tile;
        self.cells[ia].instance = self.cells[ib].instance;
        self.cells[ib].tile = ta;
        self.cells[ib].instance = na;
        Ok(())
    }

    pub fn validate_placement(&self, at: Coord, _power: PowerKind) -> Result<(), MoveError> {
        let cell = self.get(at).ok_or(MoveError::OutOfBounds(at))?;
        if !cell.exists || cell.is_blocked() {
            return Err(MoveError::Unavailable(at));
        }
        if cell.tile.map_or(false, TileTypeId::is_special) {
            return Err(MoveError::Occupied(at));
        }
        Ok(())
    }

    /// Put a power tile on `at`, replacing any ordinary tile there.
    ///
    /// Returns the instance id given to the new tile.
    pub fn place_special(
        &mut self,
        at: Coord,
        power: PowerKind,
    ) -> Result<TileInstanceId, MoveError> {
        self.validate_placement(at, power)?;
        let id = self.fresh_instance();
        let i = at.index(self.cols);
        self.cells[i].tile = Some(power.tile_id());
        self.cells[i].instance = Some(id);
        Ok(id)
    }

    /// Empty the given cells, returning what was cleared keyed by position.
    /// Cells without a tile are skipped.
    pub fn clear_cells<'c>(
        &mut self,
        coords: impl IntoIterator<Item = &'c Coord>,
    ) -> BTreeMap<Coord, TileTypeId> {
        let mut cleared = BTreeMap::new();
        for &at in coords {
            if let Some(i) = self.index(at) {
                let cell = &mut self.cells[i];
                if let Some(tile) = cell.tile.take() {
                    cell.instance = None;
                    cleared.insert(at, tile);
                }
            }
        }
        cleared
    }

    /// Remove the blocker at `at`. Returns false if there was none.
    pub fn clear_blocker(&mut self, at: Coord) -> bool {
        match self.index(at) {
            Some(i) if self.cells[i].is_blocked() => {
                self.cells[i].blocker = Blocker::None;
                true
            }
            _ => false,
        }
    }

    /// Number of cells currently carrying a blocker.
    pub fn blocker_count(&self) -> u32 {
        self.cells.iter().filter(|c| c.is_blocked()).count() as u32
    }

    /// Blocker kind at `at`, if any.
    pub fn blocker_at(&self, at: Coord) -> Option<BlockerId> {
        match self.get(at)?.blocker {
            Blocker::Obstruction(id) => Some(id),
            Blocker::None => None,
        }
    }

    /// Let tiles fall toward higher row indices.
    ///
    /// Each column is split into segments by void and blocked cells; tiles
    /// settle at the bottom of their segment and keep their identity. Returns
    /// the cells left empty, in row-major order, ready for refill.
    pub fn collapse(&mut self) -> Vec<Coord> {
        let mut empty = Vec::new();
        for col in 0..self.cols {
            let mut write = self.rows;
            for read in (0..self.rows).rev() {
                let i = Coord::new(read, col).index(self.cols);
                let cell = self.cells[i];
                if !cell.exists || cell.is_blocked() {
                    self.blank_segment(col, read + 1, write, &mut empty);
                    write = read;
                    continue;
                }
                if cell.tile.is_some() {
                    write -= 1;
                    if write != read {
                        let w = Coord::new(write, col).index(self.cols);
                        self.cells[w].tile = cell.tile;
                        self.cells[w].instance = cell.instance;
                        self.cells[i].tile = None;
                        self.cells[i].instance = None;
                    }
                }
            }
            self.blank_segment(col, 0, write, &mut empty);
        }
        empty.sort();
        empty
    }

    fn blank_segment(&mut self, col: usize, from: usize, to: usize, empty: &mut Vec<Coord>) {
        for row in from..to {
            let i = Coord::new(row, col).index(self.cols);
            self.cells[i].tile = None;
            self.cells[i].instance = None;
            empty.push(Coord::new(row, col));
        }
    }

    /// Put a freshly spawned tile into an existing, unblocked, empty cell.
    pub fn spawn_tile(&mut self, at: Coord, tile: TileTypeId) -> bool {
        match self.get(at) {
            Some(cell) if cell.exists && !cell.is_blocked() && cell.tile.is_none() => {
                self.put_fresh(at, tile)
            }
            _ => false,
        }
    }

    /// Swap the tile in an occupied, unblocked cell for a new one with a
    /// fresh identity.
    pub fn replace_tile(&mut self, at: Coord, tile: TileTypeId) -> bool {
        match self.get(at) {
            Some(cell) if cell.exists && !cell.is_blocked() && cell.tile.is_some() => {
                self.put_fresh(at, tile)
            }
            _ => false,
        }
    }

    fn put_fresh(&mut self, at: Coord, tile: TileTypeId) -> bool {
        let id = self.fresh_instance();
        match self.cell_mut(at) {
            Some(cell) => {
                cell.tile = Some(tile);
                cell.instance = Some(id);
                true
            }
            None => false,
        }
    }

    /// Snapshot in resolved-board form.
    pub fn to_board_state(&self) -> BoardState {
        let tiles = self
            .cells
            .iter()
            .map(|c| c.tile.map_or(EMPTY_TILE, TileTypeId::as_raw))
            .collect();
        let beds = self.cells.iter().map(|c| c.bed.unwrap_or(VOID_BED)).collect();
        let blockers = if self.cells.iter().any(Cell::is_blocked) {
            Some(self.cells.iter().map(|c| c.blocker.as_raw()).collect())
        } else {
            None
        };
        BoardState::from_flat(self.rows, self.cols, tiles, beds, blockers)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::level::BlockerSpec;

    pub(crate) fn catalog() -> BlockerCatalog {
        BlockerCatalog::new(vec![BlockerSpec {
            id: BlockerId::new(-1).unwrap(),
            asset: "ice.png".into(),
        }])
    }

    /// Grid from a tile matrix; every bed is terrain 0, no blockers.
    pub(crate) fn grid(tiles: Vec<Vec<i32>>) -> GridModel {
        let rows = tiles.len();
        let cols = tiles[0].len();
        let board = BoardState::new(rows, cols, tiles, vec![vec![0; cols]; rows], None).unwrap();
        let mut g = GridModel::from_board_state(&board, &BlockerCatalog::default());
        g.assign_instance_ids();
        g
    }

    fn t(id: i32) -> TileTypeId {
        TileTypeId::new(id).unwrap()
    }

    #[test]
    fn construction_copies_tiles_and_beds() {
        let board = BoardState::new(
            2,
            2,
            vec![vec![3, -1], vec![-1, 4]],
            vec![vec![0, 2], vec![-1, 0]],
            None,
        )
        .unwrap();
        let g = GridModel::from_board_state(&board, &catalog());

        let c = g.get(Coord::new(0, 0)).unwrap();
        assert_eq!(c.tile, Some(t(3)));
        assert_eq!(c.instance, None);
        assert_eq!(c.bed, Some(0));
        assert!(c.exists);

        let c = g.get(Coord::new(0, 1)).unwrap();
        assert_eq!(c.tile, None);
        assert_eq!(c.bed, Some(2));

        let c = g.get(Coord::new(1, 0)).unwrap();
        assert!(c.is_void());
        assert!(!c.exists);
        assert!(g.warnings().is_empty());
    }

    #[test]
    fn unknown_blocker_degrades_with_warning() {
        let board = BoardState::new(
            1,
            3,
            vec![vec![1, 1, 1]],
            vec![vec![0, 0, 0]],
            Some(vec![vec![-1, -9, 0]]),
        )
        .unwrap();
        let g = GridModel::from_board_state(&board, &catalog());
        assert!(g.get(Coord::new(0, 0)).unwrap().is_blocked());
        assert_eq!(g.get(Coord::new(0, 1)).unwrap().blocker, Blocker::None);
        assert_eq!(
            g.warnings(),
            &[GridWarning::UnknownBlocker {
                at: Coord::new(0, 1),
                id: -9
            }]
        );
        assert_eq!(g.blocker_count(), 1);
    }

    #[test]
    fn void_cells_never_carry_tiles_or_blockers() {
        let board = BoardState::new(
            1,
            2,
            vec![vec![5, 1]],
            vec![vec![-1, 0]],
            Some(vec![vec![-1, 0]]),
        )
        .unwrap();
        let g = GridModel::from_board_state(&board, &catalog());
        let c = g.get(Coord::new(0, 0)).unwrap();
        assert_eq!(c.tile, None);
        assert_eq!(c.blocker, Blocker::None);
        assert_eq!(g.warnings().len(), 2);
    }

    #[test]
    fn instance_ids_are_unique_and_stable() {
        let mut g = grid(vec![vec![1, 2, 3], vec![4, -1, 6]]);
        let mut ids: Vec<_> = g.cells().iter().filter_map(|c| c.instance).collect();
        assert_eq!(ids.len(), 5);
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 5);
        assert_eq!(g.assign_instance_ids(), 0);
    }

    #[test]
    fn swap_exchanges_tiles_and_identity() {
        let mut g = grid(vec![vec![1, 2]]);
        let before_a = g.get(Coord::new(0, 0)).unwrap().instance;
        g.swap(Coord::new(0, 0), Coord::new(0, 1)).unwrap();
        assert_eq!(g.get(Coord::new(0, 0)).unwrap().tile, Some(t(2)));
        assert_eq!(g.get(Coord::new(0, 1)).unwrap().tile, Some(t(1)));
        assert_eq!(g.get(Coord::new(0, 1)).unwrap().instance, before_a);
    }

    #[test]
    fn swap_validation() {
        let board = BoardState::new(
            2,
            3,
            vec![vec![1, 2, -1], vec![3, 4, 5]],
            vec![vec![0, 0, 0], vec![0, 0, -1]],
            Some(vec![vec![0, 0, 0], vec![-1, 0, 0]]),
        )
        .unwrap();
        let mut g = GridModel::from_board_state(&board, &catalog());
        g.assign_instance_ids();

        assert_eq!(
            g.validate_swap(Coord::new(0, 0), Coord::new(0, 3)),
            Err(MoveError::OutOfBounds(Coord::new(0, 3)))
        );
        assert_eq!(
            g.validate_swap(Coord::new(0, 0), Coord::new(1, 1)),
            Err(MoveError::NotAdjacent(Coord::new(0, 0), Coord::new(1, 1)))
        );
        // blocked
        assert_eq!(
            g.validate_swap(Coord::new(0, 0), Coord::new(1, 0)),
            Err(MoveError::Unavailable(Coord::new(1, 0)))
        );
        // empty
        assert_eq!(
            g.validate_swap(Coord::new(0, 1), Coord::new(0, 2)),
            Err(MoveError::Unavailable(Coord::new(0, 2)))
        );
        // void
        assert_eq!(
            g.validate_swap(Coord::new(1, 1), Coord::new(1, 2)),
            Err(MoveError::Unavailable(Coord::new(1, 2)))
        );
        assert_eq!(g.validate_swap(Coord::new(0, 0), Coord::new(0, 1)), Ok(()));
    }

    #[test]
    fn placement_rules() {
        let mut g = grid(vec![vec![1, -1]]);
        let id = g.place_special(Coord::new(0, 1), PowerKind::Bomb).unwrap();
        let c = g.get(Coord::new(0, 1)).unwrap();
        assert_eq!(c.tile, Some(PowerKind::Bomb.tile_id()));
        assert_eq!(c.instance, Some(id));
        assert_eq!(
            g.place_special(Coord::new(0, 1), PowerKind::RowClear),
            Err(MoveError::Occupied(Coord::new(0, 1)))
        );
        assert_eq!(
            g.place_special(Coord::new(3, 3), PowerKind::RowClear),
            Err(MoveError::OutOfBounds(Coord::new(3, 3)))
        );
        // Replacing an ordinary tile gives a new identity.
        let old = g.get(Coord::new(0, 0)).unwrap().instance;
        let new = g.place_special(Coord::new(0, 0), PowerKind::ColorClear).unwrap();
        assert_ne!(old, Some(new));
    }

    #[test]
    fn clear_cells_reports_types() {
        let mut g = grid(vec![vec![1, 1, -1]]);
        let cleared = g.clear_cells(&[Coord::new(0, 0), Coord::new(0, 1), Coord::new(0, 2)]);
        assert_eq!(cleared.len(), 2);
        assert_eq!(cleared[&Coord::new(0, 0)], t(1));
        assert!(g.get(Coord::new(0, 0)).unwrap().tile.is_none());
        assert!(g.get(Coord::new(0, 0)).unwrap().instance.is_none());
    }

    #[test]
    fn collapse_drops_tiles_and_keeps_identity() {
        let mut g = grid(vec![vec![1], vec![-1], vec![2], vec![-1]]);
        let top = g.get(Coord::new(0, 0)).unwrap().instance;
        let empty = g.collapse();
        assert_eq!(empty, vec![Coord::new(0, 0), Coord::new(1, 0)]);
        assert_eq!(g.get(Coord::new(2, 0)).unwrap().tile, Some(t(1)));
        assert_eq!(g.get(Coord::new(2, 0)).unwrap().instance, top);
        assert_eq!(g.get(Coord::new(3, 0)).unwrap().tile, Some(t(2)));
    }

    #[test]
    fn collapse_stops_at_void_and_blockers() {
        let board = BoardState::new(
            5,
            1,
            vec![vec![1], vec![-1], vec![-1], vec![2], vec![-1]],
            vec![vec![0], vec![0], vec![-1], vec![0], vec![0]],
            None,
        )
        .unwrap();
        let mut g = GridModel::from_board_state(&board, &catalog());
        let empty = g.collapse();
        // Tile 1 settles above the void cell, tile 2 drops to the bottom.
        assert_eq!(g.get(Coord::new(1, 0)).unwrap().tile, Some(t(1)));
        assert_eq!(g.get(Coord::new(4, 0)).unwrap().tile, Some(t(2)));
        assert_eq!(empty, vec![Coord::new(0, 0), Coord::new(3, 0)]);
    }

    #[test]
    fn spawn_tile_only_fills_open_cells() {
        let mut g = grid(vec![vec![1, -1]]);
        assert!(!g.spawn_tile(Coord::new(0, 0), t(2)));
        assert!(g.spawn_tile(Coord::new(0, 1), t(2)));
        assert!(g.get(Coord::new(0, 1)).unwrap().instance.is_some());
    }

    #[test]
    fn void_cells_are_not_mutable() {
        let board =
            BoardState::new(1, 2, vec![vec![1, 0]], vec![vec![0, -1]], None).unwrap();
        let mut g = GridModel::from_board_state(&board, &catalog());
        assert!(g.cell_mut(Coord::new(0, 0)).is_some());
        assert!(g.cell_mut(Coord::new(0, 1)).is_none());
        assert!(g.cell_mut(Coord::new(0, 2)).is_none());
        assert!(!g.spawn_tile(Coord::new(0, 1), t(2)));
        assert!(!g.replace_tile(Coord::new(0, 1), t(2)));
        assert!(g.get(Coord::new(0, 1)).unwrap().tile.is_none());
    }

    #[test]
    fn replace_tile_gives_a_fresh_identity() {
        let mut g = grid(vec![vec![1, -1]]);
        let before = g.get(Coord::new(0, 0)).unwrap().instance;
        assert!(g.replace_tile(Coord::new(0, 0), t(3)));
        let cell = g.get(Coord::new(0, 0)).unwrap();
        assert_eq!(cell.tile, Some(t(3)));
        assert_ne!(cell.instance, before);
        assert!(!g.replace_tile(Coord::new(0, 1), t(3)));
    }

    #[test]
    fn neighbors_respect_bounds() {
        let g = grid(vec![vec![1, 2, 3], vec![4, 5, 6]]);
        assert_eq!(g.neighbors(Coord::new(0, 0)).len(), 2);
        assert_eq!(g.neighbors(Coord::new(1, 1)).len(), 3);
    }

    #[test]
    fn board_state_snapshot_round_trips_layout() {
        let g = grid(vec![vec![1, -1], vec![3, 4]]);
        let b = g.to_board_state();
        assert_eq!(b.tiles(), &[1, -1, 3, 4]);
        assert_eq!(b.blockers(), None);
    }
}
