//! Template resolution: [`LevelTemplate`] to a concrete [`BoardState`].

use tracing::debug;

use crate::board::BoardState;
use crate::error::LevelError;
use crate::level::LevelTemplate;
use crate::rng::{RandomSource, WeightedPicker};
use crate::types::{EMPTY_TILE, SPAWN_MARKER, VOID_BED};

/// Resolves weighted-spawn markers into concrete tiles.
///
/// Cells are visited in row-major order and draws are taken only for marker
/// cells on playable beds, so a seeded source always produces the same board.
#[derive(Debug, Clone, Copy)]
pub struct StageLoader<'a> {
    template: &'a LevelTemplate,
}

impl<'a> StageLoader<'a> {
    pub fn new(template: &'a LevelTemplate) -> Self {
        Self { template }
    }

    pub fn resolve<R: RandomSource>(&self, rng: R) -> Result<BoardState, LevelError> {
        let t = self.template;
        let beds = t.bed_map();
        let raw = t.tile_map();

        let spawn_cells = raw
            .iter()
            .zip(beds)
            .filter(|&(&tile, &bed)| bed != VOID_BED && tile == SPAWN_MARKER)
            .count();

        // Checked before any draw so a bad template never consumes randomness.
        if spawn_cells > 0 && t.tiles().is_empty() {
            return Err(LevelError::Configuration(format!(
                "{} weighted spawn cell(s) but the tile catalog is empty",
                spawn_cells
            )));
        }

        let mut picker = if spawn_cells > 0 {
            Some(WeightedPicker::new(&t.weights(), rng)?)
        } else {
            None
        };

        let mut tiles = Vec::with_capacity(raw.len());
        for (&value, &bed) in raw.iter().zip(beds) {
            let resolved = if bed == VOID_BED {
                EMPTY_TILE
            } else if value >= 1 {
                value
            } else if value == SPAWN_MARKER {
                match picker.as_mut() {
                    Some(p) => t.tiles()[p.pick_index()].id.as_raw(),
                    None => EMPTY_TILE,
                }
            } else {
                EMPTY_TILE
            };
            tiles.push(resolved);
        }

        debug!(
            rows = t.rows(),
            cols = t.cols(),
            spawn_cells,
            "resolved level template"
        );

        Ok(BoardState::from_flat(
            t.rows(),
            t.cols(),
            tiles,
            beds.to_vec(),
            t.blocker_map().map(|b| b.to_vec()),
        ))
    }
}
