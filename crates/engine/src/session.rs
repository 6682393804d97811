//! Play session - one board, one tracker, one random source
//!
//! A [`Session`] owns everything a single play-through mutates. Every public
//! call runs to completion before returning; there is no re-entrant mutation.
//!
//! Turn order for an accepted swap:
//! 1. swap the two tiles and detect matches (undo and reject unless a
//!    swapped cell is matched)
//! 2. clear matched cells, clear adjacent blockers, credit objectives
//! 3. collapse and refill, assign identities, detect again (cascade)
//! 4. spend the move, then derive Won/Lost
//!
//! Objectives are credited before the move is spent, so a level completed on
//! its final move reports `Won`.
//!
//! A swap counts only if one of the two swapped cells ends up in a match. A
//! freshly resolved board is settled first: matches it starts with are
//! re-rolled or cleared silently, so the player never gets credit for them.

use std::collections::{BTreeMap, BTreeSet};

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::EngineConfig;
use crate::core::{
    detect, GameProgressTracker, GridModel, LevelError, LevelTemplate, MatchResult, MoveError,
    ProgressEvent, SessionSnapshot, SimpleRng, StageLoader, SubscriptionId, WeightedPicker,
};
use crate::types::{Coord, GameStatus, PowerKind, TileInstanceId, TileTypeId, SPAWN_MARKER};

/// Rounds of re-rolling matched spawn cells before falling back to clearing.
const SETTLE_REROLLS: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TurnError {
    #[error("game is not playable")]
    NotPlayable,
    #[error(transparent)]
    Rejected(#[from] MoveError),
    #[error("swap does not produce a match")]
    NoMatch,
}

impl TurnError {
    pub fn code(self) -> &'static str {
        match self {
            TurnError::NotPlayable => "not_playable",
            TurnError::Rejected(err) => err.code(),
            TurnError::NoMatch => "no_match",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            TurnError::NotPlayable => "game is already won or lost",
            TurnError::Rejected(MoveError::OutOfBounds(_)) => "position is outside the board",
            TurnError::Rejected(MoveError::NotAdjacent(..)) => "cells are not adjacent",
            TurnError::Rejected(MoveError::Unavailable(_)) => "cell is void, blocked or empty",
            TurnError::Rejected(MoveError::Occupied(_)) => "cell already holds a special tile",
            TurnError::NoMatch => "swap does not produce a match",
        }
    }
}

/// One detect/clear/refill round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CascadeStep {
    pub matches: MatchResult,
    /// Cleared cells and the tile type each held
    pub cleared: BTreeMap<Coord, TileTypeId>,
    pub blockers_cleared: Vec<Coord>,
    /// Cells that received a new tile
    pub spawned: Vec<Coord>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnOutcome {
    pub steps: Vec<CascadeStep>,
    pub status: GameStatus,
}

impl TurnOutcome {
    /// Every cell cleared this turn. A cell refilled and cleared again in a
    /// later step reports its last tile type.
    pub fn cleared(&self) -> BTreeMap<Coord, TileTypeId> {
        self.steps
            .iter()
            .flat_map(|s| s.cleared.iter().map(|(&c, &t)| (c, t)))
            .collect()
    }

    pub fn tiles_cleared(&self) -> usize {
        self.steps.iter().map(|s| s.cleared.len()).sum()
    }
}

#[derive(Debug)]
pub struct Session {
    template: LevelTemplate,
    config: EngineConfig,
    grid: GridModel,
    tracker: GameProgressTracker,
    rng: SimpleRng,
}

impl Session {
    /// Resolve the template and set up a fresh session.
    pub fn new(template: LevelTemplate, config: EngineConfig) -> Result<Self, LevelError> {
        let (grid, rng) = build_grid(&template, &config)?;
        let tracker = GameProgressTracker::new(&template, grid.blocker_count());

        debug!(
            rows = template.rows(),
            cols = template.cols(),
            moves = template.moves(),
            blockers = grid.blocker_count(),
            "session started"
        );

        Ok(Self {
            template,
            config,
            grid,
            tracker,
            rng,
        })
    }

    pub fn template(&self) -> &LevelTemplate {
        &self.template
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn grid(&self) -> &GridModel {
        &self.grid
    }

    pub fn tracker(&self) -> &GameProgressTracker {
        &self.tracker
    }

    pub fn status(&self) -> GameStatus {
        self.tracker.status()
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot::capture(&self.grid, &self.tracker)
    }

    pub fn subscribe(&mut self, listener: impl FnMut(&ProgressEvent) + 'static) -> SubscriptionId {
        self.tracker.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.tracker.unsubscribe(id)
    }

    /// Play one swap.
    pub fn swap(&mut self, a: Coord, b: Coord) -> Result<TurnOutcome, TurnError> {
        if self.status().is_terminal() {
            return Err(TurnError::NotPlayable);
        }

        self.grid.swap(a, b)?;
        let first = detect(&self.grid);
        if !swap_matches(&first, a, b) && self.config.require_match {
            if let Err(err) = self.grid.swap(a, b) {
                warn!(%err, "failed to undo swap");
            }
            return Err(TurnError::NoMatch);
        }

        let steps = self.resolve(first);
        self.tracker.decrement_moves();

        let status = self.tracker.status();
        if status.is_terminal() {
            info!(
                status = status.as_str(),
                moves_remaining = self.tracker.moves_remaining(),
                "level finished"
            );
        }

        Ok(TurnOutcome { steps, status })
    }

    /// Put a power tile on the board. Costs no move and does not trigger
    /// match detection.
    pub fn place_special(
        &mut self,
        at: Coord,
        power: PowerKind,
    ) -> Result<TileInstanceId, TurnError> {
        if self.status().is_terminal() {
            return Err(TurnError::NotPlayable);
        }
        Ok(self.grid.place_special(at, power)?)
    }

    /// First adjacent swap (row-major) that would put a swapped tile into a
    /// match.
    pub fn find_swap(&self) -> Option<(Coord, Coord)> {
        let mut trial = self.grid.clone();
        for row in 0..self.grid.rows() {
            for col in 0..self.grid.cols() {
                let a = Coord::new(row, col);
                for b in [Coord::new(row, col + 1), Coord::new(row + 1, col)] {
                    if trial.swap(a, b).is_err() {
                        continue;
                    }
                    let hit = swap_matches(&detect(&trial), a, b);
                    if let Err(err) = trial.swap(a, b) {
                        warn!(%err, "failed to undo trial swap");
                        trial = self.grid.clone();
                    }
                    if hit {
                        return Some((a, b));
                    }
                }
            }
        }
        None
    }

    /// Start over with the same template and seed. Observers stay registered.
    pub fn reset(&mut self) -> Result<(), LevelError> {
        let (grid, rng) = build_grid(&self.template, &self.config)?;
        self.grid = grid;
        self.rng = rng;
        self.tracker.reset();
        Ok(())
    }

    fn resolve(&mut self, first: MatchResult) -> Vec<CascadeStep> {
        let limit = self.config.max_cascades.max(1) as usize;
        let mut steps = Vec::new();
        let mut result = first;

        while result.has_matches() && steps.len() < limit {
            let cleared = self.grid.clear_cells(result.matched_cells());

            let blockers_cleared = if self.config.clear_adjacent_blockers {
                self.clear_adjacent_blockers(&cleared)
            } else {
                Vec::new()
            };
            if !blockers_cleared.is_empty() {
                self.tracker
                    .decrement_blockers_remaining(blockers_cleared.len() as i64);
            }

            self.tracker.process_cleared_tiles(&cleared);
            let spawned = self.refill();

            debug!(
                step = steps.len(),
                cleared = cleared.len(),
                blockers = blockers_cleared.len(),
                spawned = spawned.len(),
                "cascade step"
            );

            steps.push(CascadeStep {
                matches: result,
                cleared,
                blockers_cleared,
                spawned,
            });
            result = detect(&self.grid);
        }

        if result.has_matches() {
            warn!(limit, "cascade limit reached with matches still on the board");
        }
        steps
    }

    fn clear_adjacent_blockers(&mut self, cleared: &BTreeMap<Coord, TileTypeId>) -> Vec<Coord> {
        let targets: BTreeSet<Coord> = cleared
            .keys()
            .flat_map(|&at| self.grid.neighbors(at))
            .filter(|&n| self.grid.blocker_at(n).is_some())
            .collect();

        targets
            .into_iter()
            .filter(|&at| self.grid.clear_blocker(at))
            .collect()
    }

    fn refill(&mut self) -> Vec<Coord> {
        refill(&mut self.grid, &self.template, &mut self.rng)
    }
}

/// True if `a` or `b` is part of a match.
fn swap_matches(result: &MatchResult, a: Coord, b: Coord) -> bool {
    let cells = result.matched_cells();
    cells.contains(&a) || cells.contains(&b)
}

/// Collapse the board and fill every open cell from the tile catalog.
fn refill(grid: &mut GridModel, template: &LevelTemplate, rng: &mut SimpleRng) -> Vec<Coord> {
    let open = grid.collapse();
    let mut picker = match WeightedPicker::new(&template.weights(), &mut *rng) {
        Ok(p) => p,
        Err(err) => {
            debug!(%err, "catalog cannot spawn tiles, leaving cells empty");
            return Vec::new();
        }
    };

    let tiles = template.tiles();
    let mut spawned = Vec::with_capacity(open.len());
    for at in open {
        let tile = tiles[picker.pick_index()].id;
        if grid.spawn_tile(at, tile) {
            spawned.push(at);
        }
    }
    spawned
}

fn build_grid(
    template: &LevelTemplate,
    config: &EngineConfig,
) -> Result<(GridModel, SimpleRng), LevelError> {
    let mut rng = SimpleRng::new(config.seed);
    let board = StageLoader::new(template).resolve(&mut rng)?;
    let mut grid = GridModel::from_board_state(&board, template.blockers());
    settle(&mut grid, template, &mut rng, config.max_cascades.max(1) as usize);
    grid.assign_instance_ids();
    Ok((grid, rng))
}

/// Remove the matches a resolved board starts with. Matched spawn cells are
/// re-drawn first; whatever remains is cleared and refilled. Objectives and
/// blockers are untouched.
fn settle(grid: &mut GridModel, template: &LevelTemplate, rng: &mut SimpleRng, limit: usize) {
    for _ in 0..SETTLE_REROLLS {
        let result = detect(grid);
        if !result.has_matches() {
            return;
        }
        if !reroll_spawned(grid, template, rng, result.matched_cells()) {
            break;
        }
    }

    for round in 0..limit {
        let result = detect(grid);
        if !result.has_matches() {
            return;
        }
        let cleared = grid.clear_cells(result.matched_cells());
        debug!(round, cleared = cleared.len(), "settling starting board");
        refill(grid, template, rng);
    }

    if detect(grid).has_matches() {
        warn!(limit, "starting board still has matches after settling");
    }
}

/// Re-draw every matched cell that came from a weighted spawn marker.
/// Returns false if there was nothing to re-draw.
fn reroll_spawned(
    grid: &mut GridModel,
    template: &LevelTemplate,
    rng: &mut SimpleRng,
    matched: &BTreeSet<Coord>,
) -> bool {
    let markers = template.tile_map();
    let cols = grid.cols();
    let targets: Vec<Coord> = matched
        .iter()
        .copied()
        .filter(|at| markers[at.index(cols)] == SPAWN_MARKER)
        .collect();
    if targets.is_empty() {
        return false;
    }

    let mut picker = match WeightedPicker::new(&template.weights(), &mut *rng) {
        Ok(p) => p,
        Err(_) => return false,
    };
    let tiles = template.tiles();
    for at in targets {
        grid.replace_tile(at, tiles[picker.pick_index()].id);
    }
    true
}
