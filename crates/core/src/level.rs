//! Level module - immutable level definitions
//!
//! A [`LevelTemplate`] is parsed once from a JSON level asset and never
//! mutated. It carries the board size, move budget, tile catalog, the raw tile
//! and bed masks, an optional blocker mask, the blocker catalog and the
//! objective list.
//!
//! # Asset Format
//!
//! ```json
//! {
//!   "rows": 2, "columns": 3, "moves": 10,
//!   "tiles": [{ "id": 1, "weight": 5, "file": "red.png" }],
//!   "tileMap": [[0, 0, 1], [0, -2, 0]],
//!   "bedMap": [[0, 0, 0], [0, 1, -1]],
//!   "blockerMap": [[0, 0, 0], [0, -1, 0]],
//!   "blockerTypes": [{ "id": -1, "file": "ice.png" }],
//!   "objectives": [{ "type": "collect", "tileId": 1, "target": 12 }]
//! }
//! ```
//!
//! `blockerMap` is optional; every other field is required.

use serde::Deserialize;

use crate::error::LevelError;
use crate::types::{BlockerId, ObjectiveKind, TileTypeId};

/// One entry of the tile-type catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileSpec {
    pub id: TileTypeId,
    pub weight: i64,
    pub asset: String,
}

/// One entry of the blocker catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockerSpec {
    pub id: BlockerId,
    pub asset: String,
}

/// Blocker kinds known to a level.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlockerCatalog {
    entries: Vec<BlockerSpec>,
}

impl BlockerCatalog {
    pub fn new(entries: Vec<BlockerSpec>) -> Self {
        Self { entries }
    }

    /// Look up a raw blocker matrix value.
    pub fn lookup(&self, raw: i32) -> Option<&BlockerSpec> {
        self.entries.iter().find(|b| b.id.get() == raw)
    }

    pub fn entries(&self) -> &[BlockerSpec] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A win-condition counter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Objective {
    pub kind: ObjectiveKind,
    pub target: u32,
}

impl Objective {
    pub fn collect(tile: TileTypeId, target: u32) -> Self {
        Self {
            kind: ObjectiveKind::Collect { tile: Some(tile) },
            target,
        }
    }

    /// Tile type this objective counts, if it counts cleared tiles at all.
    pub fn collect_tile(&self) -> Option<TileTypeId> {
        match &self.kind {
            ObjectiveKind::Collect { tile } => *tile,
            ObjectiveKind::Other(_) => None,
        }
    }
}

/// Parsed, validated level definition. Matrices are stored row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelTemplate {
    rows: usize,
    cols: usize,
    moves: u32,
    tiles: Vec<TileSpec>,
    tile_map: Vec<i32>,
    bed_map: Vec<i32>,
    blocker_map: Option<Vec<i32>>,
    blockers: BlockerCatalog,
    objectives: Vec<Objective>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LevelAsset {
    rows: i64,
    columns: i64,
    moves: i64,
    tiles: Vec<TileAsset>,
    tile_map: Vec<Vec<i32>>,
    bed_map: Vec<Vec<i32>>,
    #[serde(default)]
    blocker_map: Option<Vec<Vec<i32>>>,
    blocker_types: Vec<BlockerAsset>,
    objectives: Vec<ObjectiveAsset>,
}

#[derive(Debug, Deserialize)]
struct TileAsset {
    id: i64,
    weight: i64,
    file: String,
}

#[derive(Debug, Deserialize)]
struct BlockerAsset {
    id: i64,
    file: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ObjectiveAsset {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    tile_id: Option<i64>,
    target: i64,
}

/// Template matrices as nested rows, before flattening.
#[derive(Debug, Clone, Default)]
pub struct TemplateMasks {
    pub tile_map: Vec<Vec<i32>>,
    pub bed_map: Vec<Vec<i32>>,
    pub blocker_map: Option<Vec<Vec<i32>>>,
}

impl LevelTemplate {
    /// Parse and validate a JSON level asset.
    pub fn from_json(text: &str) -> Result<Self, LevelError> {
        let asset: LevelAsset = serde_json::from_str(text)?;

        let rows = positive("rows", asset.rows)?;
        let cols = positive("columns", asset.columns)?;
        let moves = positive("moves", asset.moves)? as u32;

        let tiles = asset
            .tiles
            .into_iter()
            .map(|t| {
                let id = to_i32("tiles[].id", t.id)
                    .ok()
                    .and_then(TileTypeId::new)
                    .ok_or_else(|| {
                        LevelError::Format(format!("tile id {} must be a positive integer", t.id))
                    })?;
                Ok(TileSpec {
                    id,
                    weight: t.weight,
                    asset: t.file,
                })
            })
            .collect::<Result<Vec<_>, LevelError>>()?;

        let blockers = asset
            .blocker_types
            .into_iter()
            .map(|b| {
                let id = to_i32("blockerTypes[].id", b.id)
                    .ok()
                    .and_then(BlockerId::new)
                    .ok_or_else(|| {
                        LevelError::Format(format!("blocker id {} must be negative", b.id))
                    })?;
                Ok(BlockerSpec { id, asset: b.file })
            })
            .collect::<Result<Vec<_>, LevelError>>()?;

        let objectives = asset
            .objectives
            .into_iter()
            .map(|o| {
                let tile = match o.tile_id {
                    Some(raw) => Some(
                        to_i32("objectives[].tileId", raw)
                            .ok()
                            .and_then(TileTypeId::new)
                            .ok_or_else(|| {
                                LevelError::Format(format!(
                                    "objective tile id {} must be a positive integer",
                                    raw
                                ))
                            })?,
                    ),
                    None => None,
                };
                let target = positive("objectives[].target", o.target)? as u32;
                Ok(Objective {
                    kind: ObjectiveKind::from_parts(&o.kind, tile),
                    target,
                })
            })
            .collect::<Result<Vec<_>, LevelError>>()?;

        Self::from_parts(
            rows,
            cols,
            moves,
            tiles,
            TemplateMasks {
                tile_map: asset.tile_map,
                bed_map: asset.bed_map,
                blocker_map: asset.blocker_map,
            },
            BlockerCatalog::new(blockers),
            objectives,
        )
    }

    /// Build a template from already-typed parts, applying the same
    /// validation as [`LevelTemplate::from_json`].
    pub fn from_parts(
        rows: usize,
        cols: usize,
        moves: u32,
        tiles: Vec<TileSpec>,
        masks: TemplateMasks,
        blockers: BlockerCatalog,
        objectives: Vec<Objective>,
    ) -> Result<Self, LevelError> {
        if rows == 0 || cols == 0 {
            return Err(LevelError::Format(format!(
                "board must be at least 1x1, got {}x{}",
                rows, cols
            )));
        }
        if moves == 0 {
            return Err(LevelError::Format("moves must be positive".into()));
        }

        for (i, t) in tiles.iter().enumerate() {
            if t.weight < 0 {
                return Err(LevelError::Format(format!(
                    "tile {} has negative weight {}",
                    t.id, t.weight
                )));
            }
            if tiles[..i].iter().any(|prev| prev.id == t.id) {
                return Err(LevelError::Format(format!("duplicate tile id {}", t.id)));
            }
        }
        for (i, b) in blockers.entries().iter().enumerate() {
            if blockers.entries()[..i].iter().any(|prev| prev.id == b.id) {
                return Err(LevelError::Format(format!(
                    "duplicate blocker id {}",
                    b.id.get()
                )));
            }
        }
        if let Some(o) = objectives.iter().find(|o| o.target == 0) {
            return Err(LevelError::Format(format!(
                "objective {:?} must have a positive target",
                o.kind
            )));
        }

        let tile_map = flatten("tileMap", rows, cols, masks.tile_map)?;
        let bed_map = flatten("bedMap", rows, cols, masks.bed_map)?;
        let blocker_map = masks
            .blocker_map
            .map(|m| flatten("blockerMap", rows, cols, m))
            .transpose()?;

        Ok(Self {
            rows,
            cols,
            moves,
            tiles,
            tile_map,
            bed_map,
            blocker_map,
            blockers,
            objectives,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn moves(&self) -> u32 {
        self.moves
    }

    pub fn tiles(&self) -> &[TileSpec] {
        &self.tiles
    }

    /// Catalog weights in catalog order, as consumed by the weighted picker.
    pub fn weights(&self) -> Vec<i64> {
        self.tiles.iter().map(|t| t.weight).collect()
    }

    pub fn tile_map(&self) -> &[i32] {
        &self.tile_map
    }

    pub fn bed_map(&self) -> &[i32] {
        &self.bed_map
    }

    pub fn blocker_map(&self) -> Option<&[i32]> {
        self.blocker_map.as_deref()
    }

    pub fn blockers(&self) -> &BlockerCatalog {
        &self.blockers
    }

    pub fn objectives(&self) -> &[Objective] {
        &self.objectives
    }
}

fn positive(field: &str, value: i64) -> Result<usize, LevelError> {
    if value <= 0 || value > u32::MAX as i64 {
        return Err(LevelError::Format(format!(
            "{} must be a positive integer, got {}",
            field, value
        )));
    }
    Ok(value as usize)
}

fn to_i32(field: &str, value: i64) -> Result<i32, LevelError> {
    i32::try_from(value)
        .map_err(|_| LevelError::Format(format!("{} value {} is out of range", field, value)))
}

/// Check a nested matrix against the declared size and flatten it row-major.
pub(crate) fn flatten(
    what: &str,
    rows: usize,
    cols: usize,
    matrix: Vec<Vec<i32>>,
) -> Result<Vec<i32>, LevelError> {
    if matrix.len() != rows {
        return Err(LevelError::dimension(
            format!("{} rows", what),
            rows,
            matrix.len(),
        ));
    }
    let mut flat = Vec::with_capacity(rows * cols);
    for (r, row) in matrix.into_iter().enumerate() {
        if row.len() != cols {
            return Err(LevelError::dimension(
                format!("{} row {} columns", what, r),
                cols,
                row.len(),
            ));
        }
        flat.extend(row);
    }
    Ok(flat)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "rows": 2, "columns": 3, "moves": 10,
        "tiles": [
            { "id": 1, "weight": 5, "file": "red.png" },
            { "id": 2, "weight": 0, "file": "blue.png" }
        ],
        "tileMap": [[0, 0, 1], [0, -2, 0]],
        "bedMap": [[0, 0, 0], [0, 1, -1]],
        "blockerMap": [[0, 0, 0], [0, -1, 0]],
        "blockerTypes": [{ "id": -1, "file": "ice.png" }],
        "objectives": [
            { "type": "collect", "tileId": 1, "target": 12 },
            { "type": "score", "target": 500 }
        ]
    }"#;

    #[test]
    fn parses_complete_asset() {
        let t = LevelTemplate::from_json(SAMPLE).unwrap();
        assert_eq!(t.rows(), 2);
        assert_eq!(t.cols(), 3);
        assert_eq!(t.moves(), 10);
        assert_eq!(t.weights(), vec![5, 0]);
        assert_eq!(t.tile_map(), &[0, 0, 1, 0, -2, 0]);
        assert_eq!(t.bed_map(), &[0, 0, 0, 0, 1, -1]);
        assert_eq!(t.blocker_map(), Some(&[0, 0, 0, 0, -1, 0][..]));
        assert!(t.blockers().lookup(-1).is_some());
        assert!(t.blockers().lookup(-7).is_none());
        assert_eq!(t.objectives().len(), 2);
        assert_eq!(t.objectives()[0].collect_tile(), TileTypeId::new(1));
        assert_eq!(
            t.objectives()[1].kind,
            ObjectiveKind::Other("score".to_string())
        );
    }

    #[test]
    fn blocker_map_is_optional() {
        let text = SAMPLE.replace(r#""blockerMap": [[0, 0, 0], [0, -1, 0]],"#, "");
        let t = LevelTemplate::from_json(&text).unwrap();
        assert_eq!(t.blocker_map(), None);
    }

    #[test]
    fn missing_required_field_is_format_error() {
        let text = SAMPLE.replace(r#""moves": 10,"#, "");
        let err = LevelTemplate::from_json(&text).unwrap_err();
        assert!(matches!(err, LevelError::Format(_)), "{:?}", err);
    }

    #[test]
    fn malformed_json_is_format_error() {
        let err = LevelTemplate::from_json("{ not json").unwrap_err();
        assert_eq!(err.code(), "format_error");
    }

    #[test]
    fn non_positive_dimensions_are_rejected() {
        let text = SAMPLE.replace(r#""rows": 2"#, r#""rows": 0"#);
        assert!(matches!(
            LevelTemplate::from_json(&text).unwrap_err(),
            LevelError::Format(_)
        ));
    }

    #[test]
    fn row_count_mismatch_is_dimension_error() {
        let text = SAMPLE.replace(r#""bedMap": [[0, 0, 0], [0, 1, -1]]"#, r#""bedMap": [[0, 0, 0]]"#);
        match LevelTemplate::from_json(&text).unwrap_err() {
            LevelError::DimensionMismatch {
                what,
                expected,
                found,
            } => {
                assert_eq!(what, "bedMap rows");
                assert_eq!(expected, 2);
                assert_eq!(found, 1);
            }
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn column_count_mismatch_is_dimension_error() {
        let text = SAMPLE.replace(
            r#""blockerMap": [[0, 0, 0], [0, -1, 0]]"#,
            r#""blockerMap": [[0, 0, 0], [0, -1]]"#,
        );
        let err = LevelTemplate::from_json(&text).unwrap_err();
        assert_eq!(err.code(), "dimension_mismatch");
    }

    #[test]
    fn tile_id_must_be_positive() {
        let text = SAMPLE.replace(r#""id": 2, "weight": 0"#, r#""id": 0, "weight": 0"#);
        assert!(matches!(
            LevelTemplate::from_json(&text).unwrap_err(),
            LevelError::Format(_)
        ));
    }

    #[test]
    fn blocker_id_must_be_negative() {
        let text = SAMPLE.replace(r#"{ "id": -1, "file": "ice.png" }"#, r#"{ "id": 3, "file": "ice.png" }"#);
        assert!(matches!(
            LevelTemplate::from_json(&text).unwrap_err(),
            LevelError::Format(_)
        ));
    }

    #[test]
    fn duplicate_tile_ids_are_rejected() {
        let text = SAMPLE.replace(r#""id": 2, "weight": 0"#, r#""id": 1, "weight": 0"#);
        assert!(matches!(
            LevelTemplate::from_json(&text).unwrap_err(),
            LevelError::Format(_)
        ));
    }
}
