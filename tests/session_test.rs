//! End-to-end sessions against the bundled sample level.

use std::path::PathBuf;

use tile_match::core::LevelTemplate;
use tile_match::engine::{load_level, start_session, EngineConfig, Session, TurnError};
use tile_match::types::{Coord, GameStatus};

fn sample_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("levels/sample.json")
}

fn sample() -> LevelTemplate {
    let text = std::fs::read_to_string(sample_path()).unwrap();
    LevelTemplate::from_json(&text).unwrap()
}

#[tokio::test]
async fn sample_level_loads_asynchronously() {
    let template = load_level(sample_path()).await.unwrap();
    assert_eq!((template.rows(), template.cols()), (8, 8));
    assert_eq!(template.moves(), 20);
    assert_eq!(template.tiles().len(), 5);
    assert_eq!(template.objectives().len(), 2);
}

#[test]
fn sample_level_loads_with_block_on() {
    let session = tokio_test::block_on(start_session(sample_path(), EngineConfig::default()))
        .unwrap();
    assert_eq!(session.tracker().initial_blockers(), 4);
    assert_eq!(session.status(), GameStatus::InProgress);
}

#[test]
fn same_seed_same_board() {
    let cfg = EngineConfig::default().with_seed(31337);
    let a = Session::new(sample(), cfg.clone()).unwrap();
    let b = Session::new(sample(), cfg).unwrap();
    assert_eq!(a.grid().to_board_state(), b.grid().to_board_state());
}

#[test]
fn resolved_board_respects_void_corners() {
    let s = Session::new(sample(), EngineConfig::default()).unwrap();
    for at in [
        Coord::new(0, 0),
        Coord::new(0, 7),
        Coord::new(7, 0),
        Coord::new(7, 7),
    ] {
        let cell = s.grid().get(at).unwrap();
        assert!(cell.is_void());
        assert!(cell.tile.is_none());
    }
    for cell in s.grid().cells().iter().filter(|c| !c.is_void()) {
        assert!(cell.tile.is_some());
        assert!(cell.instance.is_some());
    }
}

#[test]
fn playing_hints_until_the_end_keeps_invariants() {
    let mut s = Session::new(sample(), EngineConfig::default().with_seed(5)).unwrap();
    let mut moves = s.tracker().moves_remaining();

    while !s.status().is_terminal() {
        let Some((a, b)) = s.find_swap() else {
            break;
        };
        let outcome = s.swap(a, b).unwrap();
        assert!(!outcome.steps.is_empty());
        assert_eq!(s.tracker().moves_remaining(), moves - 1);
        moves -= 1;

        for (i, (o, &p)) in s
            .tracker()
            .objectives()
            .iter()
            .zip(s.tracker().progress())
            .enumerate()
        {
            assert!(p <= o.target, "objective {} over target", i);
        }
        assert!(s.tracker().blockers_remaining() <= s.tracker().initial_blockers());
        assert_eq!(s.tracker().blockers_remaining(), s.grid().blocker_count());
        assert_eq!(outcome.status, s.status());
    }

    if s.status().is_terminal() {
        let (a, b) = (Coord::new(1, 1), Coord::new(1, 2));
        assert_eq!(s.swap(a, b).unwrap_err(), TurnError::NotPlayable);
    }
}

#[test]
fn snapshot_reflects_session() {
    let s = Session::new(sample(), EngineConfig::default()).unwrap();
    let json = serde_json::to_value(s.snapshot()).unwrap();
    assert_eq!(json["rows"], 8);
    assert_eq!(json["columns"], 8);
    assert_eq!(json["movesRemaining"], 20);
    assert_eq!(json["blockersRemaining"], 4);
    assert_eq!(json["bedMap"][0][0], -1);
    assert_eq!(json["blockerMap"][3][3], -1);
    assert_eq!(json["objectives"][1]["tileId"], 4);
    assert_eq!(json["status"], "in_progress");
}
