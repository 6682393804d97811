//! Command-line front end helpers.
//!
//! Usage: `tile-match <level.json> [--seed N] [--json]`, then one swap per
//! stdin line as `r1 c1 r2 c2`. `hint` prints a playable swap, `reset`
//! restarts the level and `quit` exits.

use std::fmt::Write as _;

use anyhow::{anyhow, Result};

use crate::core::{GameProgressTracker, GridModel};
use crate::types::Coord;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliArgs {
    pub level: String,
    /// Overrides `TILE_MATCH_SEED` when set
    pub seed: Option<u32>,
    pub json: bool,
}

pub fn parse_args(args: &[String]) -> Result<CliArgs> {
    let mut level = None;
    let mut seed = None;
    let mut json = false;
    let mut i = 0usize;
    while i < args.len() {
        match args[i].as_str() {
            "--seed" => {
                i += 1;
                let v = args
                    .get(i)
                    .ok_or_else(|| anyhow!("missing value for --seed"))?;
                seed = Some(
                    v.parse::<u32>()
                        .map_err(|_| anyhow!("invalid --seed value: {}", v))?,
                );
            }
            "--json" => json = true,
            other if other.starts_with("--") => {
                return Err(anyhow!("unknown argument: {}", other));
            }
            path => {
                if level.replace(path.to_string()).is_some() {
                    return Err(anyhow!("only one level file may be given"));
                }
            }
        }
        i += 1;
    }

    let level = level.ok_or_else(|| anyhow!("usage: tile-match <level.json> [--seed N] [--json]"))?;
    Ok(CliArgs { level, seed, json })
}

/// One line of player input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Swap(Coord, Coord),
    Hint,
    Reset,
    Quit,
}

pub fn parse_command(line: &str) -> Result<Option<Command>> {
    let line = line.trim();
    match line {
        "" => return Ok(None),
        "hint" => return Ok(Some(Command::Hint)),
        "reset" => return Ok(Some(Command::Reset)),
        "quit" | "q" | "exit" => return Ok(Some(Command::Quit)),
        _ => {}
    }

    let nums = line
        .split_whitespace()
        .map(|t| {
            t.parse::<usize>()
                .map_err(|_| anyhow!("expected a coordinate, got {:?}", t))
        })
        .collect::<Result<Vec<_>>>()?;
    match nums.as_slice() {
        &[r1, c1, r2, c2] => Ok(Some(Command::Swap(Coord::new(r1, c1), Coord::new(r2, c2)))),
        _ => Err(anyhow!("expected `r1 c1 r2 c2`, got {} numbers", nums.len())),
    }
}

/// Plain-text board with a status line.
///
/// Void cells print as blank, empty cells as `.`, blockers as `#`, special
/// tiles as `*` followed by their id.
pub fn render_board(grid: &GridModel, tracker: &GameProgressTracker) -> String {
    let mut out = String::new();
    let _ = write!(out, "    ");
    for col in 0..grid.cols() {
        let _ = write!(out, "{:>4}", col);
    }
    out.push('\n');

    for (row, cells) in grid.cells().chunks(grid.cols()).enumerate() {
        let _ = write!(out, "{:>3} ", row);
        for cell in cells {
            let glyph = if cell.is_void() {
                String::new()
            } else if cell.is_blocked() {
                "#".to_string()
            } else {
                match cell.tile {
                    Some(t) if t.is_special() => format!("*{}", t.get()),
                    Some(t) => t.get().to_string(),
                    None => ".".to_string(),
                }
            };
            let _ = write!(out, "{:>4}", glyph);
        }
        out.push('\n');
    }

    let progress: Vec<String> = tracker
        .objectives()
        .iter()
        .zip(tracker.progress())
        .map(|(o, p)| format!("{} {}/{}", o.kind.as_str(), p, o.target))
        .collect();
    let _ = writeln!(
        out,
        "moves {}  blockers {}  [{}]  {}",
        tracker.moves_remaining(),
        tracker.blockers_remaining(),
        progress.join(", "),
        tracker.status().as_str()
    );
    out
}
