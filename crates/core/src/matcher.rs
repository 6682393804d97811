//! Match detection
//!
//! [`detect`] is a pure function of the grid. It collects every maximal
//! horizontal and vertical run of at least [`MIN_RUN`] eligible cells sharing a
//! tile type, then merges runs that cross each other, so L, T and cross shapes
//! come out as a single [`Match`]. Runs are never split: a line of five is one
//! group of five.

use std::collections::BTreeSet;

use crate::grid::GridModel;
use crate::types::{Coord, TileTypeId, MIN_RUN};

/// One connected group of same-type cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match {
    pub cells: BTreeSet<Coord>,
    pub tile: TileTypeId,
}

impl Match {
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// Result of one detection pass. The matched-cell union is derived from the
/// matches at construction and cannot be set independently.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MatchResult {
    matches: Vec<Match>,
    matched: BTreeSet<Coord>,
}

impl MatchResult {
    pub fn new(matches: Vec<Match>) -> Self {
        let matched = matches
            .iter()
            .flat_map(|m| m.cells.iter().copied())
            .collect();
        Self { matches, matched }
    }

    pub fn matches(&self) -> &[Match] {
        &self.matches
    }

    /// Union of every match's cells.
    pub fn matched_cells(&self) -> &BTreeSet<Coord> {
        &self.matched
    }

    pub fn has_matches(&self) -> bool {
        !self.matches.is_empty()
    }

    /// Distinct tile types across all matches.
    pub fn matched_tile_ids(&self) -> BTreeSet<TileTypeId> {
        self.matches.iter().map(|m| m.tile).collect()
    }
}

struct Run {
    tile: TileTypeId,
    cells: Vec<Coord>,
}

/// Find all matches on the grid.
pub fn detect(grid: &GridModel) -> MatchResult {
    let rows = grid.rows();
    let cols = grid.cols();
    let mut runs: Vec<Run> = Vec::new();

    // Per cell: index of the horizontal run covering it, if any.
    let mut h_owner: Vec<Option<usize>> = vec![None; rows * cols];

    for row in 0..rows {
        scan_line(
            (0..cols).map(|col| Coord::new(row, col)),
            grid,
            &mut runs,
        );
    }
    for (i, run) in runs.iter().enumerate() {
        for c in &run.cells {
            h_owner[c.index(cols)] = Some(i);
        }
    }
    let horizontal = runs.len();

    for col in 0..cols {
        scan_line(
            (0..rows).map(|row| Coord::new(row, col)),
            grid,
            &mut runs,
        );
    }

    let mut groups = DisjointSet::new(runs.len());
    for (v, run) in runs.iter().enumerate().skip(horizontal) {
        for c in &run.cells {
            if let Some(h) = h_owner[c.index(cols)] {
                // A cell has one tile type, so crossing runs always agree.
                debug_assert_eq!(runs[h].tile, run.tile);
                groups.union(h, v);
            }
        }
    }

    let mut merged: Vec<Option<Match>> = (0..runs.len()).map(|_| None).collect();
    for (i, run) in runs.iter().enumerate() {
        let root = groups.find(i);
        let entry = merged[root].get_or_insert_with(|| Match {
            cells: BTreeSet::new(),
            tile: run.tile,
        });
        entry.cells.extend(run.cells.iter().copied());
    }

    let mut matches: Vec<Match> = merged.into_iter().flatten().collect();
    matches.sort_by_key(|m| m.cells.iter().next().copied());
    MatchResult::new(matches)
}

/// Append every maximal run of length >= MIN_RUN along one line.
fn scan_line(line: impl Iterator<Item = Coord>, grid: &GridModel, runs: &mut Vec<Run>) {
    let mut current: Option<TileTypeId> = None;
    let mut cells: Vec<Coord> = Vec::new();

    for at in line {
        let tile = grid.eligible_tile(at);
        if tile.is_some() && tile == current {
            cells.push(at);
            continue;
        }
        flush(current, &mut cells, runs);
        current = tile;
        if tile.is_some() {
            cells.push(at);
        }
    }
    flush(current, &mut cells, runs);
}

fn flush(tile: Option<TileTypeId>, cells: &mut Vec<Coord>, runs: &mut Vec<Run>) {
    if let Some(tile) = tile {
        if cells.len() >= MIN_RUN {
            runs.push(Run {
                tile,
                cells: std::mem::take(cells),
            });
            return;
        }
    }
    cells.clear();
}

struct DisjointSet {
    parent: Vec<usize>,
}

impl DisjointSet {
    fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
        }
    }

    fn find(&mut self, mut x: usize) -> usize {
        while self.parent[x] != x {
            self.parent[x] = self.parent[self.parent[x]];
            x = self.parent[x];
        }
        x
    }

    fn union(&mut self, a: usize, b: usize) {
        let (ra, rb) = (self.find(a), self.find(b));
        if ra != rb {
            self.parent[rb.max(ra)] = ra.min(rb);
        }
    }
}
