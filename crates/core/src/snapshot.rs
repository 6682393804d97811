//! Serializable snapshot of a running session.

use serde::Serialize;

use crate::grid::{Cell, GridModel};
use crate::progress::GameProgressTracker;
use crate::types::VOID_BED;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectiveSnapshot {
    #[serde(rename = "type")]
    pub kind: String,
    pub tile_id: Option<u32>,
    pub target: u32,
    pub current: u32,
}

/// Plain-data view of a session, for UI binding and the CLI's JSON output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub rows: usize,
    pub columns: usize,
    pub tile_map: Vec<Vec<i32>>,
    pub bed_map: Vec<Vec<i32>>,
    pub blocker_map: Vec<Vec<i32>>,
    pub moves_remaining: u32,
    pub blockers_remaining: u32,
    pub objectives: Vec<ObjectiveSnapshot>,
    pub status: &'static str,
}

impl SessionSnapshot {
    pub fn capture(grid: &GridModel, tracker: &GameProgressTracker) -> Self {
        let board = grid.to_board_state();
        let objectives = tracker
            .objectives()
            .iter()
            .zip(tracker.progress())
            .map(|(o, &current)| ObjectiveSnapshot {
                kind: o.kind.as_str().to_string(),
                tile_id: o.collect_tile().map(|t| t.get()),
                target: o.target,
                current,
            })
            .collect();

        Self {
            rows: grid.rows(),
            columns: grid.cols(),
            tile_map: board.tile_rows(),
            bed_map: cell_rows(grid, |c| c.bed.unwrap_or(VOID_BED)),
            blocker_map: cell_rows(grid, |c| c.blocker.as_raw()),
            moves_remaining: tracker.moves_remaining(),
            blockers_remaining: tracker.blockers_remaining(),
            objectives,
            status: tracker.status().as_str(),
        }
    }
}

fn cell_rows(grid: &GridModel, f: impl Fn(&Cell) -> i32) -> Vec<Vec<i32>> {
    grid.cells()
        .chunks(grid.cols())
        .map(|row| row.iter().map(&f).collect())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::tests::grid;
    use crate::level::Objective;
    use crate::types::TileTypeId;

    #[test]
    fn capture_serializes_camel_case() {
        let g = grid(vec![vec![1, 2], vec![-1, 3]]);
        let t = GameProgressTracker::with_objectives(
            4,
            vec![Objective::collect(TileTypeId::new(2).unwrap(), 6)],
            0,
        );
        let snap = SessionSnapshot::capture(&g, &t);
        assert_eq!(snap.tile_map, vec![vec![1, 2], vec![-1, 3]]);
        assert_eq!(snap.blocker_map, vec![vec![0, 0], vec![0, 0]]);

        let json = serde_json::to_value(&snap).unwrap();
        assert_eq!(json["movesRemaining"], 4);
        assert_eq!(json["status"], "in_progress");
        assert_eq!(json["objectives"][0]["type"], "collect");
        assert_eq!(json["objectives"][0]["tileId"], 2);
        assert_eq!(json["objectives"][0]["current"], 0);
    }
}
